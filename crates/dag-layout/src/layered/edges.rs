use super::Layers;
use crate::diagnostics::{emit, Diagnostic, Diagnostics};
use crate::{Edge, LaidOutNode, NodeId};
use std::collections::HashMap;
use std::sync::Arc;

/// One edge per node and valid parent
///
/// Edges follow node declaration order, then parent order. A parent listed
/// twice yields two edges.
pub(crate) fn derive_edges<D>(
    layers: &Layers,
    placed: &HashMap<NodeId, Arc<LaidOutNode>>,
    diagnostics: &D,
) -> Vec<Edge>
where
    D: Diagnostics + ?Sized,
{
    let mut edges = Vec::new();

    for node in &layers.nodes {
        for &parent in layers.parents(node.id) {
            let (Some(from), Some(to)) = (placed.get(&node.id), placed.get(&parent)) else {
                emit(
                    diagnostics,
                    Diagnostic::UnresolvedEdge {
                        from: node.id,
                        to: parent,
                    },
                );
                continue;
            };

            edges.push(Edge {
                from: Arc::clone(from),
                to: Arc::clone(to),
            });
        }
    }

    edges
}
