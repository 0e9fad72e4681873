mod adjacency;
mod depths;
mod edges;
mod leaves;
mod positions;
mod rows;

use crate::diagnostics::Diagnostics;
use crate::{DagNode, Layout, LayoutConfig, LayoutEngine, NodeId, NodeSizes};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use adjacency::normalize;
use depths::assign_depths;
use edges::derive_edges;
use leaves::count_leaves;
use positions::assign_coordinates;
use rows::{bucket_rows, row_positions};

/// Layered layout placing each node one row below its deepest parent
///
/// Parents are centered over the leaves they lead to. There is no crossing
/// minimization, rows are ordered by first parent.
#[derive(Debug, Clone, Default)]
pub struct LayeredLayout {
    pub config: LayoutConfig,
}

impl LayeredLayout {
    /// Create a new layered layout with the given configuration
    pub fn new(config: impl Into<LayoutConfig>) -> Self {
        Self {
            config: config.into(),
        }
    }
}

/// Row structure of a node list, independent of node sizes
#[derive(Debug, Clone, Default)]
pub struct Layers {
    /// Nodes taking part in the layout, in declaration order
    pub nodes: Vec<DagNode>,

    /// Valid parents of each node
    pub parent_ids: HashMap<NodeId, Vec<NodeId>>,

    /// Children of each node, in declaration order
    pub children: HashMap<NodeId, Vec<NodeId>>,

    pub depths: HashMap<NodeId, usize>,

    /// Nodes of each depth, in drawing order
    pub rows: Vec<Vec<NodeId>>,

    /// Position of each node in its row
    pub depth_index: HashMap<NodeId, usize>,

    /// Number of deepest row slots each node is centered over
    pub leaf_counts: HashMap<NodeId, usize>,

    /// Length of the widest row
    pub max_row_len: usize,

    pub(crate) id_to_index: HashMap<NodeId, usize>,
}

impl Layers {
    pub fn node(&self, id: NodeId) -> Option<&DagNode> {
        self.id_to_index.get(&id).map(|&index| &self.nodes[index])
    }

    pub fn parents(&self, id: NodeId) -> &[NodeId] {
        self.parent_ids.get(&id).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn first_parent(&self, id: NodeId) -> Option<NodeId> {
        self.parents(id).first().copied()
    }

    pub fn depth(&self, id: NodeId) -> Option<usize> {
        self.depths.get(&id).copied()
    }

    /// Depth of the deepest row, `None` when there are no nodes
    pub fn max_depth(&self) -> Option<usize> {
        self.rows.len().checked_sub(1)
    }

    pub fn leaf_count(&self, id: NodeId) -> usize {
        self.leaf_counts.get(&id).copied().unwrap_or(0)
    }

    /// Position of a node among the children of its first parent
    pub fn sibling_index(&self, id: NodeId) -> usize {
        self.first_parent(id)
            .and_then(|parent| self.children.get(&parent))
            .and_then(|siblings| siblings.iter().position(|&sibling| sibling == id))
            .unwrap_or(0)
    }
}

impl LayeredLayout {
    /// Compute the row structure of the nodes
    ///
    /// Validates parent references, assigns depths, buckets nodes into rows
    /// and counts leaves. Problems with the input are sent to `diagnostics`
    /// and never stop the computation.
    pub fn compute_layers<D>(&self, nodes: &[DagNode], diagnostics: &D) -> Layers
    where
        D: Diagnostics + ?Sized,
    {
        let adjacency = normalize(nodes, diagnostics);
        let depths = assign_depths(&adjacency);
        let rows = bucket_rows(&adjacency, &depths);
        let leaf_counts = count_leaves(&adjacency, &rows);

        let layers = Layers {
            depth_index: row_positions(&rows),
            max_row_len: rows.iter().map(Vec::len).max().unwrap_or(0),
            nodes: adjacency.nodes,
            parent_ids: adjacency.parent_ids,
            children: adjacency.children,
            id_to_index: adjacency.id_to_index,
            depths,
            rows,
            leaf_counts,
        };

        debug!(
            "{} node(s) in {} row(s), widest row has {} node(s)",
            layers.nodes.len(),
            layers.rows.len(),
            layers.max_row_len
        );

        layers
    }

    /// Compute node coordinates and edges from the row structure
    pub fn compute_positions<S, D>(&self, layers: &Layers, sizes: &S, diagnostics: &D) -> Layout
    where
        S: NodeSizes + ?Sized,
        D: Diagnostics + ?Sized,
    {
        let nodes: Vec<Arc<_>> = assign_coordinates(layers, &self.config, sizes)
            .into_iter()
            .map(Arc::new)
            .collect();

        let by_id: HashMap<NodeId, Arc<_>> = nodes
            .iter()
            .map(|node| (node.id(), Arc::clone(node)))
            .collect();
        let edges = derive_edges(layers, &by_id, diagnostics);

        Layout::new(nodes, edges)
    }
}

// Single call form, both phases one after the other
impl LayoutEngine for LayeredLayout {
    fn layout<S, D>(&self, nodes: &[DagNode], sizes: &S, diagnostics: &D) -> Layout
    where
        S: NodeSizes + ?Sized,
        D: Diagnostics + ?Sized,
    {
        let layers = self.compute_layers(nodes, diagnostics);
        self.compute_positions(&layers, sizes, diagnostics)
    }
}
