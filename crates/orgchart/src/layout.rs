//! Tree layout.
//!
//! Turns a resolved [`Hierarchy`] into drawable geometry: one
//! [`PositionedNode`] per employee, one [`Edge`] per reporting line and the
//! overall [`Bounds`]. Coordinates are chart units with the root centered at
//! `x = 0` and depth growing toward +Y.
//!
//! [`Hierarchy`]: crate::hierarchy::Hierarchy

mod tidy;

pub use tidy::TidyTree;

use serde::Serialize;

use orgchart_core::geometry::{Bounds, Point, Size};

use crate::hierarchy::NodeId;

/// A node with its final position.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PositionedNode {
    id: NodeId,
    center: Point,
    size: Size,
    depth: usize,
}

impl PositionedNode {
    pub fn new(id: NodeId, center: Point, size: Size, depth: usize) -> Self {
        Self {
            id,
            center,
            size,
            depth,
        }
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn size(&self) -> Size {
        self.size
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// The drawn box of the node.
    pub fn bounds(&self) -> Bounds {
        Bounds::new_from_center(self.center, self.size)
    }

    /// Bottom-center of the box, where links to children start.
    pub fn bottom_anchor(&self) -> Point {
        self.center.with_y(self.center.y() + self.size.height() / 2.0)
    }

    /// Top-center of the box, where the link from the parent ends.
    pub fn top_anchor(&self) -> Point {
        self.center.with_y(self.center.y() - self.size.height() / 2.0)
    }
}

/// A parent to child reporting line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct Edge {
    parent: NodeId,
    child: NodeId,
}

impl Edge {
    pub fn new(parent: NodeId, child: NodeId) -> Self {
        Self { parent, child }
    }

    pub fn parent(&self) -> NodeId {
        self.parent
    }

    pub fn child(&self) -> NodeId {
        self.child
    }
}

/// Result of laying out a hierarchy.
///
/// Nodes and edges are stored in pre-order.
#[derive(Debug, Clone, Default, Serialize)]
pub struct TreeLayout {
    nodes: Vec<PositionedNode>,
    edges: Vec<Edge>,
    bounds: Bounds,

    /// Position in `nodes` of each `NodeId`.
    #[serde(skip)]
    slots: Vec<Option<usize>>,
}

impl TreeLayout {
    pub(crate) fn new(nodes: Vec<PositionedNode>, edges: Vec<Edge>) -> Self {
        let bounds = nodes
            .iter()
            .map(PositionedNode::bounds)
            .reduce(|acc, bounds| acc.merge(&bounds))
            .unwrap_or_default();

        let slot_count = nodes.iter().map(|node| node.id.index() + 1).max().unwrap_or(0);
        let mut slots = vec![None; slot_count];
        for (position, node) in nodes.iter().enumerate() {
            slots[node.id.index()] = Some(position);
        }

        Self {
            nodes,
            edges,
            bounds,
            slots,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn nodes(&self) -> &[PositionedNode] {
        &self.nodes
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Union of every node box, zero-area for an empty layout.
    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn node(&self, id: NodeId) -> Option<&PositionedNode> {
        self.slots
            .get(id.index())
            .copied()
            .flatten()
            .and_then(|position| self.nodes.get(position))
    }

    /// Start and end of the link drawn for `edge`: the bottom-center of the
    /// parent box and the top-center of the child box.
    pub fn edge_endpoints(&self, edge: &Edge) -> Option<(Point, Point)> {
        let parent = self.node(edge.parent)?;
        let child = self.node(edge.child)?;
        Some((parent.bottom_anchor(), child.top_anchor()))
    }

    /// The node whose box contains `point`, in chart coordinates.
    pub fn hit_test(&self, point: Point) -> Option<NodeId> {
        self.nodes
            .iter()
            .rev()
            .find(|node| node.bounds().contains_point(point))
            .map(PositionedNode::id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout() -> TreeLayout {
        let size = Size::new(100.0, 40.0);
        TreeLayout::new(
            vec![
                PositionedNode::new(NodeId(2), Point::new(0.0, 0.0), size, 0),
                PositionedNode::new(NodeId(0), Point::new(-60.0, 80.0), size, 1),
                PositionedNode::new(NodeId(1), Point::new(60.0, 80.0), size, 1),
            ],
            vec![Edge::new(NodeId(2), NodeId(0)), Edge::new(NodeId(2), NodeId(1))],
        )
    }

    #[test]
    fn test_bounds_cover_all_boxes() {
        let bounds = layout().bounds();
        assert_eq!(bounds.min_x(), -110.0);
        assert_eq!(bounds.max_x(), 110.0);
        assert_eq!(bounds.min_y(), -20.0);
        assert_eq!(bounds.max_y(), 100.0);
    }

    #[test]
    fn test_node_lookup_by_id() {
        let layout = layout();
        assert_eq!(layout.node(NodeId(1)).unwrap().center(), Point::new(60.0, 80.0));
        assert!(layout.node(NodeId(7)).is_none());
    }

    #[test]
    fn test_edge_endpoints_use_box_anchors() {
        let layout = layout();
        let (start, end) = layout.edge_endpoints(&layout.edges()[0]).unwrap();
        assert_eq!(start, Point::new(0.0, 20.0));
        assert_eq!(end, Point::new(-60.0, 60.0));
        assert!(
            layout
                .edge_endpoints(&Edge::new(NodeId(2), NodeId(9)))
                .is_none()
        );
    }

    #[test]
    fn test_hit_test() {
        let layout = layout();
        assert_eq!(layout.hit_test(Point::new(5.0, 5.0)), Some(NodeId(2)));
        assert_eq!(layout.hit_test(Point::new(90.0, 70.0)), Some(NodeId(1)));
        assert_eq!(layout.hit_test(Point::new(0.0, 50.0)), None);
    }

    #[test]
    fn test_empty_layout() {
        let layout = TreeLayout::default();
        assert!(layout.is_empty());
        assert_eq!(layout.bounds(), Bounds::default());
        assert!(layout.node(NodeId(0)).is_none());
        assert_eq!(layout.hit_test(Point::default()), None);
    }
}
