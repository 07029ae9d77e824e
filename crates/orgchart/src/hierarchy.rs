//! Management hierarchy reconstruction.
//!
//! This module turns the flat, email-linked employee list into a rooted tree.
//!
//! # Overview
//!
//! - [`Resolver`] - Runs the resolution algorithm and produces a [`Resolution`].
//! - [`Hierarchy`] - Arena of [`HierarchyNode`]s addressed by [`NodeId`].
//! - [`RootStrategy`] - Pluggable root selection ([`MostDirectReports`], [`ByEmail`], [`ByName`]).
//! - [`ManagerClassifier`] - Pluggable "is this a manager" heuristic ([`KeywordClassifier`]).

mod classify;
mod collate;
mod index;
mod resolver;
mod root;

pub use classify::{DEFAULT_MANAGER_KEYWORDS, KeywordClassifier, ManagerClassifier};
pub use collate::fold_text;
pub use index::{DirectoryIndex, DuplicateEmail};
pub use resolver::{Resolution, ResolveFailure, ResolveWarning, Resolver};
pub use root::{ByEmail, ByName, MostDirectReports, RootSelector, RootStrategy};

use serde::Serialize;

use orgchart_core::{employee::EmployeeRecord, identifier::Id};

/// Index of a node in a [`Hierarchy`].
///
/// Equal to the position of the source record in the resolver input, so
/// the same id addresses the record, the tree node and its layout entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub(crate) usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One employee placed in the tree.
#[derive(Debug, Clone)]
pub struct HierarchyNode {
    record: EmployeeRecord,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
    depth: usize,
    is_root: bool,
    is_manager_like: bool,
}

impl HierarchyNode {
    pub fn record(&self) -> &EmployeeRecord {
        &self.record
    }

    /// The parent node. `None` only for the root.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in display order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Distance from the root, which has depth 0.
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn is_root(&self) -> bool {
        self.is_root
    }

    pub fn is_manager_like(&self) -> bool {
        self.is_manager_like
    }
}

/// A rooted tree of employees.
///
/// The empty hierarchy is the "nothing to draw" sentinel returned when no
/// root could be found.
#[derive(Debug, Clone, Default)]
pub struct Hierarchy {
    nodes: Vec<HierarchyNode>,
    root: Option<NodeId>,
}

impl Hierarchy {
    pub const fn empty() -> Self {
        Self {
            nodes: Vec::new(),
            root: None,
        }
    }

    pub(crate) fn from_parts(nodes: Vec<HierarchyNode>, root: NodeId) -> Self {
        Self {
            nodes,
            root: Some(root),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Number of placed nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn root_node(&self) -> Option<&HierarchyNode> {
        self.root.and_then(|root| self.node(root))
    }

    pub fn node(&self, id: NodeId) -> Option<&HierarchyNode> {
        self.nodes.get(id.0)
    }

    /// Children of `id` in display order. Empty for unknown ids.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id).map(HierarchyNode::children).unwrap_or_default()
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).and_then(HierarchyNode::parent)
    }

    /// Finds the node owning `email`, compared case-insensitively.
    ///
    /// With duplicate emails the later record wins, matching the resolver.
    pub fn find_by_email(&self, email: &str) -> Option<NodeId> {
        let key = Id::lookup_email(email)?;
        self.nodes
            .iter()
            .rposition(|node| node.record.email_key() == Some(key))
            .map(NodeId)
    }

    /// Pre-order traversal from the root, children in display order.
    pub fn iter(&self) -> PreOrder<'_> {
        PreOrder {
            hierarchy: self,
            stack: self.root.into_iter().collect(),
        }
    }

    /// Largest node depth, 0 for an empty hierarchy.
    pub fn max_depth(&self) -> usize {
        self.nodes.iter().map(|node| node.depth).max().unwrap_or(0)
    }
}

/// Pre-order iterator returned by [`Hierarchy::iter`].
#[derive(Debug)]
pub struct PreOrder<'a> {
    hierarchy: &'a Hierarchy,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for PreOrder<'a> {
    type Item = (NodeId, &'a HierarchyNode);

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.hierarchy.node(id)?;
        self.stack.extend(node.children.iter().rev().copied());
        Some((id, node))
    }
}

impl<'a> IntoIterator for &'a Hierarchy {
    type Item = (NodeId, &'a HierarchyNode);
    type IntoIter = PreOrder<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
