use super::adjacency::Adjacency;
use crate::NodeId;
use std::collections::HashMap;

/// Count how many slots of the deepest row each node spans
///
/// Nodes of the deepest row count for one. Going up, every node adds its own
/// count to each of its parents, so a parent covers the sum of what its
/// children cover. Nodes without children above the deepest row stay at 0.
pub(crate) fn count_leaves(
    adjacency: &Adjacency,
    rows: &[Vec<NodeId>],
) -> HashMap<NodeId, usize> {
    let mut counts: HashMap<NodeId, usize> =
        adjacency.nodes.iter().map(|node| (node.id, 0)).collect();

    let Some(deepest) = rows.len().checked_sub(1) else {
        return counts;
    };

    for &id in &rows[deepest] {
        counts.insert(id, 1);
    }

    for (depth, row) in rows.iter().enumerate().rev() {
        for &id in row {
            let contribution = if depth == deepest {
                1
            } else {
                counts.get(&id).copied().unwrap_or(0)
            };

            for &parent in adjacency.parents(id) {
                *counts.entry(parent).or_default() += contribution;
            }
        }
    }

    counts
}
