use super::Layers;
use crate::{LaidOutNode, LayoutConfig, NodeSizes};
use tracing::trace;

/// Assign coordinates to nodes based on their rows and leaf counts
///
/// Rows are filled left to right, deepest first. Each node gets a span as
/// wide as its leaf count (at least one slot) and sits in the middle of it,
/// spans of a row are laid edge to edge. Rows narrower than the widest one
/// are shifted right to be centered.
pub(crate) fn assign_coordinates<S>(
    layers: &Layers,
    config: &LayoutConfig,
    sizes: &S,
) -> Vec<LaidOutNode>
where
    S: NodeSizes + ?Sized,
{
    let mut placed = Vec::with_capacity(layers.nodes.len());

    for (depth, row) in layers.rows.iter().enumerate().rev() {
        let mut slot = layers.max_row_len.saturating_sub(row.len()) as f32 / 2.0;

        for &id in row {
            let Some(node) = layers.node(id) else {
                continue;
            };

            let half_span = layers.leaf_count(id).max(1) as f32 / 2.0;
            slot += half_span;

            let size = sizes.size(node).unwrap_or(config.node_size());
            let laid_out = LaidOutNode {
                x: config.slot_width() * slot,
                y: config.row_height() * depth as f32,
                width: size.x,
                height: size.y,
                depth,
                index: layers.sibling_index(id),
                node: node.clone(),
            };
            trace!("Node {id} at ({}, {})", laid_out.x, laid_out.y);
            placed.push(laid_out);

            slot += half_span;
        }
    }

    placed
}
