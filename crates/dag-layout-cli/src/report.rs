use dag_layout::{Layout, LayoutConfig, NodeId, Point};
use serde::Serialize;

/// Document printed by the command line tool
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub config: LayoutConfig,
    pub nodes: Vec<NodeReport>,
    pub edges: Vec<EdgeReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeReport {
    pub id: NodeId,
    pub label: String,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub depth: usize,
    pub index: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EdgeReport {
    pub from: NodeId,
    pub to: NodeId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub route: Option<Vec<Point>>,
}

impl Report {
    pub fn new(layout: &Layout, config: LayoutConfig, with_routes: bool) -> Self {
        let nodes = layout
            .nodes
            .iter()
            .map(|node| NodeReport {
                id: node.id(),
                label: node.node.label(),
                x: node.x,
                y: node.y,
                width: node.width,
                height: node.height,
                depth: node.depth,
                index: node.index,
            })
            .collect();

        let edges = layout
            .edges
            .iter()
            .map(|edge| EdgeReport {
                from: edge.from.id(),
                to: edge.to.id(),
                route: with_routes.then(|| edge.route(&config).to_vec()),
            })
            .collect();

        Self {
            config,
            nodes,
            edges,
        }
    }
}
