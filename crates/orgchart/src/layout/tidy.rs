//! Tidy tree layout by contour merging.
//!
//! Subtrees are laid out bottom-up. Each subtree keeps its contour, the
//! leftmost and rightmost node center on every level relative to the subtree
//! root. Children are placed left to right, and each child subtree is pushed
//! right until, on every level it shares with the already placed siblings, its
//! left contour clears their right contour. The parent is then centered over
//! its first and last child.
//!
//! Two neighbors on the first level of a merge are siblings and keep
//! `node_width + sibling_gap` between centers. Deeper levels always pair nodes
//! of different parents, which keep `node_width + subtree_gap`.

use log::{debug, info, trace};

use orgchart_core::geometry::{Point, Size};

use super::{Edge, PositionedNode, TreeLayout};
use crate::{
    config::LayoutConfig,
    hierarchy::{Hierarchy, NodeId},
};

/// Extent of a subtree on one level, as center offsets from the subtree root.
#[derive(Debug, Clone, Copy)]
struct Span {
    left: f32,
    right: f32,
}

impl Span {
    fn shifted(self, offset: f32) -> Self {
        Self {
            left: self.left + offset,
            right: self.right + offset,
        }
    }
}

/// Tidy (Reingold-Tilford style) tree layout engine.
///
/// # Examples
///
/// ```
/// use orgchart::{hierarchy::Resolver, layout::TidyTree};
/// use orgchart_core::employee::EmployeeRecord;
///
/// let records = vec![
///     EmployeeRecord::new("1", "Root", "").with_email("root@x.com"),
///     EmployeeRecord::new("2", "Ann", "").with_manager("root@x.com"),
///     EmployeeRecord::new("3", "Bob", "").with_manager("root@x.com"),
/// ];
/// let hierarchy = Resolver::default().resolve(&records).into_hierarchy();
///
/// let layout = TidyTree::default().with_sibling_gap(20.0).layout(&hierarchy);
/// assert_eq!(layout.nodes().len(), 3);
/// assert_eq!(layout.edges().len(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct TidyTree {
    node_size: Size,
    level_gap: f32,
    sibling_gap: f32,
    subtree_gap: f32,
}

impl Default for TidyTree {
    fn default() -> Self {
        Self::from_config(&LayoutConfig::default())
    }
}

impl TidyTree {
    /// Creates an engine from the `[layout]` configuration section.
    pub fn from_config(config: &LayoutConfig) -> Self {
        Self {
            node_size: config.node_size(),
            level_gap: config.level_gap(),
            sibling_gap: config.sibling_gap(),
            subtree_gap: config.subtree_gap(),
        }
    }

    /// Set the size of every node box
    pub fn with_node_size(mut self, node_size: Size) -> Self {
        self.node_size = node_size;
        self
    }

    /// Set the vertical gap between levels
    pub fn with_level_gap(mut self, gap: f32) -> Self {
        self.level_gap = gap;
        self
    }

    /// Set the horizontal gap between siblings
    pub fn with_sibling_gap(mut self, gap: f32) -> Self {
        self.sibling_gap = gap;
        self
    }

    /// Set the horizontal gap between neighboring subtrees
    pub fn with_subtree_gap(mut self, gap: f32) -> Self {
        self.subtree_gap = gap;
        self
    }

    /// Vertical distance between the centers of consecutive levels.
    fn level_step(&self) -> f32 {
        self.node_size.height() + self.level_gap
    }

    /// Minimum center distance on a merge level. Level 0 holds siblings.
    fn separation(&self, level: usize) -> f32 {
        let gap = if level == 0 {
            self.sibling_gap
        } else {
            self.subtree_gap
        };
        self.node_size.width() + gap
    }

    /// Lays out `hierarchy`. An empty hierarchy yields an empty layout.
    pub fn layout(&self, hierarchy: &Hierarchy) -> TreeLayout {
        let Some(root) = hierarchy.root() else {
            debug!("Empty hierarchy, nothing to lay out");
            return TreeLayout::default();
        };
        info!(nodes = hierarchy.len(); "Laying out tree");

        let order: Vec<NodeId> = hierarchy.iter().map(|(id, _)| id).collect();

        // Offset of each node's center from its parent's center.
        let mut offsets = vec![0.0_f32; hierarchy.len()];
        let mut contours: Vec<Vec<Span>> = vec![Vec::new(); hierarchy.len()];

        // Reverse pre-order visits every child before its parent.
        for &id in order.iter().rev() {
            let children = hierarchy.children(id);
            let mut merged: Vec<Span> = Vec::new();
            let mut shifts = Vec::with_capacity(children.len());

            for &child in children {
                let contour = std::mem::take(&mut contours[child.index()]);
                let shift = if shifts.is_empty() {
                    0.0
                } else {
                    merged
                        .iter()
                        .zip(&contour)
                        .enumerate()
                        .map(|(level, (placed, next))| {
                            placed.right - next.left + self.separation(level)
                        })
                        .fold(f32::NEG_INFINITY, f32::max)
                };
                trace!(node = id.index(), child = child.index(), shift; "Placing subtree");

                for (level, span) in contour.into_iter().enumerate() {
                    let span = span.shifted(shift);
                    match merged.get_mut(level) {
                        Some(placed) => placed.right = span.right,
                        None => merged.push(span),
                    }
                }
                shifts.push(shift);
            }

            let middle = match (shifts.first(), shifts.last()) {
                (Some(first), Some(last)) => (first + last) / 2.0,
                _ => 0.0,
            };
            for (&child, shift) in children.iter().zip(&shifts) {
                offsets[child.index()] = shift - middle;
            }

            let mut contour = Vec::with_capacity(merged.len() + 1);
            contour.push(Span {
                left: 0.0,
                right: 0.0,
            });
            contour.extend(merged.into_iter().map(|span| span.shifted(-middle)));
            contours[id.index()] = contour;
        }

        let mut x = vec![0.0_f32; hierarchy.len()];
        let mut nodes = Vec::with_capacity(order.len());
        let mut edges = Vec::with_capacity(order.len().saturating_sub(1));
        for &id in &order {
            let Some(node) = hierarchy.node(id) else {
                continue;
            };
            if let Some(parent) = node.parent() {
                x[id.index()] = x[parent.index()] + offsets[id.index()];
                edges.push(Edge::new(parent, id));
            }
            let center = Point::new(x[id.index()], node.depth() as f32 * self.level_step());
            nodes.push(PositionedNode::new(id, center, self.node_size, node.depth()));
        }

        let layout = TreeLayout::new(nodes, edges);
        debug!(
            root = root.index(),
            width = layout.bounds().width(),
            height = layout.bounds().height();
            "Tree laid out"
        );
        layout
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::approx_eq;
    use orgchart_core::{employee::EmployeeRecord, geometry::Bounds};

    use super::*;
    use crate::hierarchy::Resolver;

    fn resolve(records: &[EmployeeRecord]) -> Hierarchy {
        Resolver::default().resolve(records).into_hierarchy()
    }

    fn report(id: &str, email: &str, manager: &str, title: &str) -> EmployeeRecord {
        EmployeeRecord::new(id, id, "")
            .with_email(email)
            .with_manager(manager)
            .with_job_title(title)
    }

    fn center_of(layout: &TreeLayout, hierarchy: &Hierarchy, email: &str) -> Point {
        let id = hierarchy.find_by_email(email).unwrap();
        layout.node(id).unwrap().center()
    }

    #[test]
    fn test_empty_hierarchy() {
        let layout = TidyTree::default().layout(&Hierarchy::empty());
        assert!(layout.nodes().is_empty());
        assert!(layout.edges().is_empty());
        assert_eq!(layout.bounds(), Bounds::default());
    }

    #[test]
    fn test_single_node_at_origin() {
        let hierarchy = resolve(&[report("ceo", "ceo@x.com", "", "CEO")]);
        let layout = TidyTree::default().layout(&hierarchy);
        assert_eq!(layout.nodes().len(), 1);
        assert_eq!(layout.nodes()[0].center(), Point::new(0.0, 0.0));
        assert_eq!(layout.bounds().width(), 200.0);
        assert_eq!(layout.bounds().height(), 72.0);
    }

    #[test]
    fn test_siblings_are_spaced_and_parent_centered() {
        let hierarchy = resolve(&[
            report("root", "root@x.com", "", "CEO"),
            report("a", "a@x.com", "root@x.com", "Engineer"),
            report("b", "b@x.com", "root@x.com", "Engineer"),
            report("c", "c@x.com", "root@x.com", "Engineer"),
        ]);
        let engine = TidyTree::default()
            .with_node_size(Size::new(100.0, 40.0))
            .with_level_gap(20.0)
            .with_sibling_gap(10.0);
        let layout = engine.layout(&hierarchy);

        let a = center_of(&layout, &hierarchy, "a@x.com");
        let b = center_of(&layout, &hierarchy, "b@x.com");
        let c = center_of(&layout, &hierarchy, "c@x.com");
        assert!(approx_eq!(f32, b.x() - a.x(), 110.0));
        assert!(approx_eq!(f32, c.x() - b.x(), 110.0));
        assert!(approx_eq!(f32, b.x(), 0.0));
        assert!(approx_eq!(f32, a.y(), 60.0));
        assert_eq!(center_of(&layout, &hierarchy, "root@x.com"), Point::new(0.0, 0.0));
    }

    #[test]
    fn test_cousins_use_subtree_gap() {
        let hierarchy = resolve(&[
            report("root", "root@x.com", "", "CEO"),
            report("m1", "m1@x.com", "root@x.com", "Manager"),
            report("m2", "m2@x.com", "root@x.com", "Manager"),
            report("e1", "e1@x.com", "m1@x.com", "Engineer"),
            report("e2", "e2@x.com", "m2@x.com", "Engineer"),
        ]);
        let engine = TidyTree::default()
            .with_node_size(Size::new(100.0, 40.0))
            .with_sibling_gap(10.0)
            .with_subtree_gap(50.0);
        let layout = engine.layout(&hierarchy);

        let m1 = center_of(&layout, &hierarchy, "m1@x.com");
        let m2 = center_of(&layout, &hierarchy, "m2@x.com");
        let e1 = center_of(&layout, &hierarchy, "e1@x.com");
        let e2 = center_of(&layout, &hierarchy, "e2@x.com");
        assert!(approx_eq!(f32, e2.x() - e1.x(), 150.0));
        assert!(approx_eq!(f32, m2.x() - m1.x(), 150.0));
        assert!(approx_eq!(f32, e1.x(), m1.x()));
    }

    #[test]
    fn test_edges_in_pre_order() {
        let hierarchy = resolve(&[
            report("root", "root@x.com", "", "CEO"),
            report("m", "m@x.com", "root@x.com", "Manager"),
            report("e", "e@x.com", "m@x.com", "Engineer"),
            report("z", "z@x.com", "root@x.com", "Engineer"),
        ]);
        let layout = TidyTree::default().layout(&hierarchy);
        let pairs: Vec<(usize, usize)> = layout
            .edges()
            .iter()
            .map(|edge| (edge.parent().index(), edge.child().index()))
            .collect();
        assert_eq!(pairs, [(0, 1), (1, 2), (0, 3)]);
    }
}
