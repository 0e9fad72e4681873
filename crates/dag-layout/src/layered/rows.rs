use super::adjacency::Adjacency;
use crate::NodeId;
use std::collections::HashMap;

/// Group nodes by depth
///
/// Every depth up to the deepest one gets a row, even if empty. Interior rows
/// are ordered by first parent then id so siblings stay together, the root
/// row and the deepest row keep declaration order.
pub(crate) fn bucket_rows(
    adjacency: &Adjacency,
    depths: &HashMap<NodeId, usize>,
) -> Vec<Vec<NodeId>> {
    let Some(max_depth) = depths.values().copied().max() else {
        return Vec::new();
    };

    let mut rows = vec![Vec::new(); max_depth + 1];
    for node in &adjacency.nodes {
        if let Some(&depth) = depths.get(&node.id) {
            rows[depth].push(node.id);
        }
    }

    for row in rows.iter_mut().take(max_depth).skip(1) {
        row.sort_by_key(|&id| (first_parent(adjacency, id).unwrap_or(0), id));
    }

    rows
}

pub(crate) fn first_parent(adjacency: &Adjacency, id: NodeId) -> Option<NodeId> {
    adjacency.parents(id).first().copied()
}

/// Position of every node within its row
pub(crate) fn row_positions(rows: &[Vec<NodeId>]) -> HashMap<NodeId, usize> {
    rows.iter()
        .flat_map(|row| row.iter().enumerate().map(|(position, &id)| (id, position)))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layered::adjacency::normalize;
    use crate::layered::depths::assign_depths;
    use crate::DagNode;
    use test_log::test;

    fn rows(nodes: &[DagNode]) -> Vec<Vec<NodeId>> {
        let adjacency = normalize(nodes, &());
        let depths = assign_depths(&adjacency);
        bucket_rows(&adjacency, &depths)
    }

    #[test]
    fn test_empty_input_has_no_rows() {
        assert!(rows(&[]).is_empty());
    }

    #[test]
    fn test_interior_rows_sorted_by_lineage() {
        let r = rows(&[
            DagNode::new(2),
            DagNode::new(1),
            DagNode::new(30).with_parents([2]),
            DagNode::new(10).with_parents([1]),
            DagNode::new(20).with_parents([2]),
            DagNode::new(11).with_parents([1]),
            DagNode::new(300).with_parents([30]),
            DagNode::new(100).with_parents([10]),
        ]);

        assert_eq!(r[0], vec![2, 1]);
        assert_eq!(r[1], vec![10, 11, 20, 30]);
        // The deepest row is left alone
        assert_eq!(r[2], vec![300, 100]);
    }

    #[test]
    fn test_only_first_parent_orders_a_row() {
        let r = rows(&[
            DagNode::new(1),
            DagNode::new(2),
            DagNode::new(4).with_parents([2, 1]),
            DagNode::new(3).with_parents([1, 2]),
            DagNode::new(5).with_parents([4]),
        ]);

        assert_eq!(r[1], vec![3, 4]);
    }

    #[test]
    fn test_cycle_leaves_empty_rows() {
        let r = rows(&[
            DagNode::new(1).with_parents([2]),
            DagNode::new(2).with_parents([1]),
        ]);

        assert_eq!(r, vec![vec![], vec![1, 2]]);
    }

    #[test]
    fn test_row_positions() {
        let positions = row_positions(&[vec![4], vec![7, 5]]);
        assert_eq!(positions[&4], 0);
        assert_eq!(positions[&7], 0);
        assert_eq!(positions[&5], 1);
    }
}
