//! Reconstruction of the management tree from the flat employee list.
//!
//! Placement rules, in order:
//!
//! 1. Records are indexed by normalized email ([`DirectoryIndex`]).
//! 2. The [`RootStrategy`] picks the root. No root means no hierarchy.
//! 3. Every record whose manager resolves to the root, or to nothing at all,
//!    becomes a direct report of the root.
//! 4. Manager-like records pull in the unvisited records that report to
//!    them, level by level.
//! 5. Whatever is still unvisited (broken chains, cycles, reports of
//!    non-manager records) is attached under the root.
//!
//! The visited set is local to one [`Resolver::resolve`] call, which makes
//! termination independent of the input: each record is attached once.

use std::fmt;

use log::{debug, info, trace, warn};
use thiserror::Error;

use orgchart_core::employee::EmployeeRecord;

use super::{
    Hierarchy, HierarchyNode, NodeId,
    classify::{KeywordClassifier, ManagerClassifier},
    collate::{SiblingKey, sibling_order},
    index::DirectoryIndex,
    root::{MostDirectReports, RootStrategy},
};
use crate::{config::HierarchyConfig, error::OrgChartError};

/// Why no hierarchy could be built.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ResolveFailure {
    #[error("no root candidate among {records} employee record(s)")]
    NoRoot { records: usize },
}

/// Non-fatal findings of a resolution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolveWarning {
    /// Two records share an email; `kept` owns it, `replaced` lost the slot
    /// but is still placed in the tree.
    DuplicateEmail {
        email: String,
        kept: NodeId,
        replaced: NodeId,
    },
    /// The record could not be reached through its manager chain and was
    /// attached under the root.
    Unreachable {
        node: NodeId,
        manager_email: Option<String>,
    },
}

impl fmt::Display for ResolveWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateEmail {
                email,
                kept,
                replaced,
            } => write!(
                f,
                "email `{email}` is used by records #{} and #{}, the later one wins",
                replaced.index(),
                kept.index()
            ),
            Self::Unreachable {
                node,
                manager_email: Some(manager),
            } => write!(
                f,
                "record #{} is not reachable through manager `{manager}`, placed under the root",
                node.index()
            ),
            Self::Unreachable {
                node,
                manager_email: None,
            } => write!(
                f,
                "record #{} is not reachable from the root, placed under the root",
                node.index()
            ),
        }
    }
}

/// Outcome of [`Resolver::resolve`].
///
/// A failed resolution still carries a (empty) hierarchy so callers can keep
/// rendering "nothing" without special-casing.
#[derive(Debug, Clone)]
pub struct Resolution {
    hierarchy: Hierarchy,
    failure: Option<ResolveFailure>,
    warnings: Vec<ResolveWarning>,
}

impl Resolution {
    fn resolved(hierarchy: Hierarchy, warnings: Vec<ResolveWarning>) -> Self {
        Self {
            hierarchy,
            failure: None,
            warnings,
        }
    }

    fn failed(failure: ResolveFailure, warnings: Vec<ResolveWarning>) -> Self {
        Self {
            hierarchy: Hierarchy::empty(),
            failure: Some(failure),
            warnings,
        }
    }

    /// The resolved tree, or the empty sentinel after a failure.
    pub fn hierarchy(&self) -> &Hierarchy {
        &self.hierarchy
    }

    pub fn into_hierarchy(self) -> Hierarchy {
        self.hierarchy
    }

    pub fn failure(&self) -> Option<&ResolveFailure> {
        self.failure.as_ref()
    }

    pub fn is_resolved(&self) -> bool {
        self.failure.is_none()
    }

    pub fn warnings(&self) -> &[ResolveWarning] {
        &self.warnings
    }

    /// Converts a failed resolution into an error.
    pub fn into_result(self) -> Result<Hierarchy, OrgChartError> {
        match self.failure {
            Some(failure) => Err(OrgChartError::Resolution(failure)),
            None => Ok(self.hierarchy),
        }
    }
}

/// Builds a [`Hierarchy`] from employee records.
///
/// # Examples
///
/// ```
/// use orgchart::hierarchy::Resolver;
/// use orgchart_core::employee::EmployeeRecord;
///
/// let records = vec![
///     EmployeeRecord::new("1", "Grace", "Hopper").with_email("ceo@x.com"),
///     EmployeeRecord::new("2", "Alan", "Turing")
///         .with_email("alan@x.com")
///         .with_manager("ceo@x.com")
///         .with_job_title("Engineer"),
/// ];
///
/// let hierarchy = Resolver::default().resolve(&records).into_hierarchy();
/// let root = hierarchy.root().unwrap();
/// assert_eq!(hierarchy.children(root).len(), 1);
/// ```
pub struct Resolver {
    root_strategy: Box<dyn RootStrategy>,
    classifier: Box<dyn ManagerClassifier>,
}

impl Default for Resolver {
    fn default() -> Self {
        Self {
            root_strategy: Box::new(MostDirectReports),
            classifier: Box::new(KeywordClassifier::default()),
        }
    }
}

impl Resolver {
    pub fn new(
        root_strategy: impl RootStrategy + 'static,
        classifier: impl ManagerClassifier + 'static,
    ) -> Self {
        Self {
            root_strategy: Box::new(root_strategy),
            classifier: Box::new(classifier),
        }
    }

    /// Creates a resolver from the `[hierarchy]` configuration section.
    pub fn from_config(config: &HierarchyConfig) -> Self {
        let classifier = match config.manager_keywords() {
            Some(keywords) => KeywordClassifier::new(keywords),
            None => KeywordClassifier::default(),
        };
        Self {
            root_strategy: config.root().to_strategy(),
            classifier: Box::new(classifier),
        }
    }

    pub fn with_root_strategy(mut self, root_strategy: impl RootStrategy + 'static) -> Self {
        self.root_strategy = Box::new(root_strategy);
        self
    }

    pub fn with_classifier(mut self, classifier: impl ManagerClassifier + 'static) -> Self {
        self.classifier = Box::new(classifier);
        self
    }

    pub(crate) fn set_root_strategy(&mut self, root_strategy: Box<dyn RootStrategy>) {
        self.root_strategy = root_strategy;
    }

    pub(crate) fn set_classifier(&mut self, classifier: Box<dyn ManagerClassifier>) {
        self.classifier = classifier;
    }

    /// Resolves `records` into a rooted tree.
    ///
    /// Never panics on malformed input. The only failure is a missing root,
    /// reported through [`Resolution::failure`].
    pub fn resolve(&self, records: &[EmployeeRecord]) -> Resolution {
        info!(records = records.len(); "Resolving hierarchy");

        let index = DirectoryIndex::build(records);
        let mut warnings: Vec<ResolveWarning> = index
            .duplicates()
            .iter()
            .map(|duplicate| {
                warn!(
                    email = duplicate.email.to_string(),
                    kept = duplicate.kept,
                    replaced = duplicate.replaced;
                    "Duplicate employee email, later record wins"
                );
                ResolveWarning::DuplicateEmail {
                    email: duplicate.email.to_string(),
                    kept: NodeId(duplicate.kept),
                    replaced: NodeId(duplicate.replaced),
                }
            })
            .collect();

        let root = match self.root_strategy.select_root(&index) {
            Some(root) if root < records.len() => root,
            _ => {
                warn!(
                    records = records.len(),
                    strategy:? = self.root_strategy;
                    "No root candidate found, hierarchy unavailable"
                );
                return Resolution::failed(
                    ResolveFailure::NoRoot {
                        records: records.len(),
                    },
                    warnings,
                );
            }
        };
        debug!(root, email = records[root].email(); "Root selected");

        let manager_like: Vec<bool> = records
            .iter()
            .map(|record| self.classifier.is_manager_like(record))
            .collect();
        let keys: Vec<SiblingKey> = records
            .iter()
            .zip(&manager_like)
            .enumerate()
            .map(|(position, (record, &is_manager))| SiblingKey::new(record, is_manager, position))
            .collect();

        let mut placement = Placement::new(records.len(), root);

        let direct_reports: Vec<usize> = (0..records.len())
            .filter(|&position| {
                position != root
                    && index
                        .manager_of(position)
                        .is_none_or(|manager| manager == root)
            })
            .collect();
        placement.attach(root, direct_reports, &keys);

        let mut pending: Vec<usize> = placement.children[root]
            .iter()
            .rev()
            .copied()
            .filter(|&child| manager_like[child])
            .collect();

        while let Some(manager) = pending.pop() {
            let subordinates: Vec<usize> = index
                .reports_of(manager)
                .iter()
                .copied()
                .filter(|&report| !placement.visited[report])
                .collect();
            if subordinates.is_empty() {
                continue;
            }
            trace!(manager, count = subordinates.len(); "Attaching subordinates");
            placement.attach(manager, subordinates, &keys);
            pending.extend(
                placement.children[manager]
                    .iter()
                    .rev()
                    .copied()
                    .filter(|&child| manager_like[child]),
            );
        }

        let unreachable: Vec<usize> = (0..records.len())
            .filter(|&position| !placement.visited[position])
            .collect();
        for &position in &unreachable {
            debug!(
                position,
                id = records[position].id(),
                manager = records[position].manager_email_1();
                "Unreachable employee placed under the root"
            );
            warnings.push(ResolveWarning::Unreachable {
                node: NodeId(position),
                manager_email: records[position].manager_email_1().map(str::to_string),
            });
        }
        placement.attach(root, unreachable, &keys);

        let hierarchy = placement.into_hierarchy(records, &manager_like);
        info!(
            nodes = hierarchy.len(),
            max_depth = hierarchy.max_depth(),
            warnings = warnings.len();
            "Hierarchy resolved"
        );

        Resolution::resolved(hierarchy, warnings)
    }
}

/// Mutable state of one resolution pass.
struct Placement {
    root: usize,
    visited: Vec<bool>,
    parent: Vec<Option<usize>>,
    depth: Vec<usize>,
    children: Vec<Vec<usize>>,
}

impl Placement {
    fn new(len: usize, root: usize) -> Self {
        let mut visited = vec![false; len];
        visited[root] = true;
        Self {
            root,
            visited,
            parent: vec![None; len],
            depth: vec![0; len],
            children: vec![Vec::new(); len],
        }
    }

    /// Attaches `new_children` under `parent` and re-sorts its child list.
    fn attach(&mut self, parent: usize, new_children: Vec<usize>, keys: &[SiblingKey]) {
        if new_children.is_empty() {
            return;
        }
        let depth = self.depth[parent] + 1;
        for &child in &new_children {
            self.visited[child] = true;
            self.parent[child] = Some(parent);
            self.depth[child] = depth;
        }
        let children = &mut self.children[parent];
        children.extend(new_children);
        children.sort_by(|&a, &b| sibling_order(&keys[a], &keys[b]));
    }

    fn into_hierarchy(self, records: &[EmployeeRecord], manager_like: &[bool]) -> Hierarchy {
        let Self {
            root,
            parent,
            depth,
            children,
            ..
        } = self;

        let nodes = records
            .iter()
            .zip(parent)
            .zip(depth)
            .zip(children)
            .enumerate()
            .map(|(position, (((record, parent), depth), children))| HierarchyNode {
                record: record.clone(),
                parent: parent.map(NodeId),
                children: children.into_iter().map(NodeId).collect(),
                depth,
                is_root: position == root,
                is_manager_like: manager_like[position],
            })
            .collect();

        Hierarchy::from_parts(nodes, NodeId(root))
    }
}


#[cfg(test)]
mod proptest_tests {
    use std::collections::HashSet;

    use proptest::prelude::*;

    use super::*;

    // ===================
    // Strategies
    // ===================

    /// Records `e0..eN` where `e0` has no manager and every other record points
    /// at a random email, possibly unknown, possibly itself, possibly blank.
    fn directory_strategy() -> impl Strategy<Value = Vec<EmployeeRecord>> {
        (1usize..40).prop_flat_map(|len| {
            let references = prop::collection::vec(
                prop_oneof![
                    (0..len + 5).prop_map(Some),
                    Just(None),
                ],
                len,
            );
            let titles = prop::collection::vec(
                prop_oneof![Just("Manager"), Just("Engineer"), Just("Directeur")],
                len,
            );
            let emailless = prop::collection::vec(prop::bool::weighted(0.1), len);
            (references, titles, emailless).prop_map(move |(references, titles, emailless)| {
                (0..len)
                    .map(|position| {
                        let mut record = EmployeeRecord::new(
                            position.to_string(),
                            format!("Name{}", position % 7),
                            format!("Last{position}"),
                        )
                        .with_job_title(titles[position]);
                        if position == 0 || !emailless[position] {
                            record = record.with_email(format!("e{position}@x.com"));
                        }
                        if position > 0 {
                            if let Some(target) = references[position] {
                                record = record.with_manager(format!("E{target}@X.com"));
                            }
                        }
                        record
                    })
                    .collect()
            })
        })
    }

    fn ids_in_order(hierarchy: &Hierarchy) -> Vec<(NodeId, Option<NodeId>, usize)> {
        hierarchy
            .iter()
            .map(|(id, node)| (id, node.parent(), node.depth()))
            .collect()
    }

    // ===================
    // Property Test Functions
    // ===================

    /// Every record shows up exactly once and depths follow parents.
    fn check_every_record_placed_once(records: Vec<EmployeeRecord>) -> Result<(), TestCaseError> {
        let resolution = Resolver::default()
            .with_root_strategy(crate::hierarchy::ByEmail::new("e0@x.com"))
            .resolve(&records);
        let hierarchy = resolution.hierarchy();

        let visited: Vec<NodeId> = hierarchy.iter().map(|(id, _)| id).collect();
        let unique: HashSet<NodeId> = visited.iter().copied().collect();
        prop_assert_eq!(visited.len(), records.len());
        prop_assert_eq!(unique.len(), records.len());

        for (id, node) in hierarchy.iter() {
            match node.parent() {
                None => prop_assert_eq!(Some(id), hierarchy.root()),
                Some(parent) => {
                    let parent_node = hierarchy.node(parent).unwrap();
                    prop_assert_eq!(node.depth(), parent_node.depth() + 1);
                    prop_assert!(parent_node.children().contains(&id));
                }
            }
        }
        Ok(())
    }

    /// Resolving the same input twice gives the same tree.
    fn check_resolution_is_idempotent(records: Vec<EmployeeRecord>) -> Result<(), TestCaseError> {
        let resolver = Resolver::default();
        let first = resolver.resolve(&records);
        let second = resolver.resolve(&records);

        prop_assert_eq!(first.is_resolved(), second.is_resolved());
        prop_assert_eq!(ids_in_order(first.hierarchy()), ids_in_order(second.hierarchy()));
        Ok(())
    }

    // ===================
    // Proptest Wrappers
    // ===================

    proptest! {
        #[test]
        fn every_record_placed_once(records in directory_strategy()) {
            check_every_record_placed_once(records)?;
        }

        #[test]
        fn resolution_is_idempotent(records in directory_strategy()) {
            check_resolution_is_idempotent(records)?;
        }
    }
}
