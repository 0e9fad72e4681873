use crate::{DagNode, Diagnostics, Layout, NodeSizes};

/// A layout engine that can compute positions for a node list
///
/// Engines never fail: malformed input is reported to `diagnostics` and
/// otherwise ignored, so the result can always be drawn.
pub trait LayoutEngine {
    /// Compute node positions and edges for the given nodes
    fn layout<S, D>(&self, nodes: &[DagNode], sizes: &S, diagnostics: &D) -> Layout
    where
        S: NodeSizes + ?Sized,
        D: Diagnostics + ?Sized;
}
