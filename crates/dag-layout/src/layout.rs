use crate::{DagNode, LayoutConfig, NodeId, Point, Rect, Vec2};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::collections::HashMap;
use std::sync::Arc;

/// A node with its position in the drawing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LaidOutNode {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,

    /// Row of the node, 0 for roots
    pub depth: usize,

    /// Position among the children of the node's first parent, 0 for roots
    ///
    /// Used to spread edges leaving siblings vertically.
    pub index: usize,

    pub node: DagNode,
}

impl LaidOutNode {
    pub fn id(&self) -> NodeId {
        self.node.id
    }

    /// Top left corner
    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn rect(&self) -> Rect {
        Rect::from_min_size(self.position(), self.size())
    }
}

/// Link from a node (`from`) to one of its parents (`to`)
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub from: Arc<LaidOutNode>,
    pub to: Arc<LaidOutNode>,
}

impl Edge {
    /// Whether the edge starts or ends at the given node
    pub fn touches(&self, id: NodeId) -> bool {
        self.from.id() == id || self.to.id() == id
    }

    /// Orthogonal polyline joining the two nodes
    ///
    /// The edge leaves `from` on the side facing `to`, runs vertically to a
    /// horizontal lane, then vertically again into `to`. The lane is halfway
    /// between the nodes, pushed away from `from` by its sibling index so
    /// edges of siblings don't overlap.
    pub fn route(&self, config: &LayoutConfig) -> [Point; 4] {
        let (from, to) = (&self.from, &self.to);
        let is_above = from.y > to.y;

        let from_x = from.center().x;
        let from_y = from.y + if is_above { 0.0 } else { from.height };
        let to_x = to.center().x;
        let to_y = to.y + if is_above { to.height } else { 0.0 };

        let lane = (to_y - from_y).abs() / 2.0 + from.index as f32 * config.edge_padding;

        [
            Point::new(from_x, from_y),
            Point::new(from_x, from_y - lane),
            Point::new(to_x, from_y - lane),
            Point::new(to_x, to_y),
        ]
    }
}

impl Serialize for Edge {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Edge", 2)?;
        state.serialize_field("from", &self.from.id())?;
        state.serialize_field("to", &self.to.id())?;
        state.end()
    }
}

/// Reorder edges so the ones touching `selected` come last
///
/// Renderers draw edges in order, this puts the selected node's edges on
/// top. The relative order within both groups is kept. Without a selection
/// the edges are returned as they are.
pub fn prioritize_edges(edges: Vec<Edge>, selected: Option<NodeId>) -> Vec<Edge> {
    let Some(selected) = selected else {
        return edges;
    };

    let (touching, mut others): (Vec<_>, Vec<_>) =
        edges.into_iter().partition(|edge| edge.touches(selected));
    others.extend(touching);
    others
}

/// Result of a layout computation
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Layout {
    /// Laid out nodes, deepest row first
    pub nodes: Vec<Arc<LaidOutNode>>,
    pub edges: Vec<Edge>,

    /// Position of each node in `nodes`
    #[serde(skip)]
    index: HashMap<NodeId, usize>,
}

impl Layout {
    pub fn new(nodes: Vec<Arc<LaidOutNode>>, edges: Vec<Edge>) -> Self {
        let index = nodes
            .iter()
            .enumerate()
            .map(|(position, node)| (node.id(), position))
            .collect();
        Self {
            nodes,
            edges,
            index,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> Option<&Arc<LaidOutNode>> {
        self.index.get(&id).and_then(|&position| self.nodes.get(position))
    }

    /// Same layout with the edges of `selected` drawn last
    pub fn prioritize(self, selected: Option<NodeId>) -> Self {
        Self {
            edges: prioritize_edges(self.edges, selected),
            ..self
        }
    }

    /// Route of every edge, in edge order
    pub fn routes(&self, config: &LayoutConfig) -> Vec<[Point; 4]> {
        self.edges.iter().map(|edge| edge.route(config)).collect()
    }

    /// Rectangle enclosing every node
    pub fn bounds(&self) -> Option<Rect> {
        self.nodes
            .iter()
            .map(|node| node.rect())
            .reduce(Rect::union)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    fn laid_out(id: NodeId, x: f32, y: f32, index: usize) -> Arc<LaidOutNode> {
        Arc::new(LaidOutNode {
            x,
            y,
            width: 100.0,
            height: 50.0,
            depth: 0,
            index,
            node: DagNode::new(id),
        })
    }

    fn edge(from: NodeId, to: NodeId) -> Edge {
        Edge {
            from: laid_out(from, 0.0, 0.0, 0),
            to: laid_out(to, 0.0, 0.0, 0),
        }
    }

    fn ids(edges: &[Edge]) -> Vec<(NodeId, NodeId)> {
        edges.iter().map(|e| (e.from.id(), e.to.id())).collect()
    }

    #[test]
    fn test_prioritize_moves_selected_edges_last() {
        let edges = vec![edge(1, 2), edge(2, 3), edge(3, 4)];

        let sorted = prioritize_edges(edges, Some(3));
        assert_eq!(ids(&sorted), vec![(1, 2), (2, 3), (3, 4)]);

        let edges = vec![edge(2, 3), edge(1, 2), edge(3, 4), edge(5, 6)];
        let sorted = prioritize_edges(edges, Some(3));
        assert_eq!(ids(&sorted), vec![(1, 2), (5, 6), (2, 3), (3, 4)]);
    }

    #[test]
    fn test_prioritize_without_selection_keeps_order() {
        let edges = vec![edge(3, 4), edge(1, 2)];
        let sorted = prioritize_edges(edges.clone(), None);
        assert_eq!(sorted, edges);
    }

    #[test]
    fn test_prioritize_unknown_selection_keeps_order() {
        let edges = vec![edge(3, 4), edge(1, 2)];
        let sorted = prioritize_edges(edges.clone(), Some(42));
        assert_eq!(sorted, edges);
    }

    #[test]
    fn test_prioritize_node_zero_is_a_selection() {
        let edges = vec![edge(1, 0), edge(2, 1), edge(3, 0)];
        let sorted = prioritize_edges(edges, Some(0));
        assert_eq!(ids(&sorted), vec![(2, 1), (1, 0), (3, 0)]);
    }

    #[test]
    fn test_node_lookup() {
        let layout = Layout::new(
            vec![laid_out(4, 0.0, 100.0, 0), laid_out(1, 10.0, 0.0, 0)],
            vec![edge(4, 1)],
        );

        assert_eq!(layout.node(1).map(|n| n.x), Some(10.0));
        assert_eq!(layout.node(4).map(|n| n.center()), Some(Point::new(50.0, 125.0)));
        assert!(layout.node(2).is_none());
        assert!(Layout::default().node(1).is_none());
    }

    #[test]
    fn test_route_from_child_to_parent() {
        let config = LayoutConfig::DEFAULT;
        let edge = Edge {
            from: laid_out(2, 200.0, 100.0, 2),
            to: laid_out(1, 0.0, 0.0, 0),
        };

        let route = edge.route(&config);
        // Child top is at 100, parent bottom at 50, half way is 25 away, plus
        // 2 * 3 of padding
        assert_eq!(
            route,
            [
                Point::new(250.0, 100.0),
                Point::new(250.0, 69.0),
                Point::new(50.0, 69.0),
                Point::new(50.0, 50.0),
            ]
        );
    }

    #[test]
    fn test_route_downwards() {
        let config = LayoutConfig {
            edge_padding: 0.0,
            ..LayoutConfig::DEFAULT
        };
        let edge = Edge {
            from: laid_out(1, 0.0, 0.0, 0),
            to: laid_out(2, 0.0, 100.0, 0),
        };

        let route = edge.route(&config);
        assert_eq!(route[0], Point::new(50.0, 50.0));
        assert_eq!(route[1], Point::new(50.0, 25.0));
        assert_eq!(route[3], Point::new(50.0, 100.0));
    }

    #[test]
    fn test_bounds() {
        let layout = Layout::new(
            vec![laid_out(1, 10.0, 0.0, 0), laid_out(2, 200.0, 100.0, 0)],
            Vec::new(),
        );

        let bounds = layout.bounds().unwrap();
        assert_eq!(bounds.min, Point::new(10.0, 0.0));
        assert_eq!(bounds.max, Point::new(300.0, 150.0));
        assert!(Layout::default().bounds().is_none());
    }

    #[test]
    fn test_edge_serializes_ids() {
        let json = serde_json::to_string(&edge(4, 2)).unwrap();
        assert_eq!(json, r#"{"from":4,"to":2}"#);
    }
}
