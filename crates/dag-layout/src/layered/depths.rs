use super::adjacency::Adjacency;
use crate::NodeId;
use petgraph::algo::tarjan_scc;
use petgraph::graphmap::DiGraphMap;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Assign each node the length of its longest chain of parents
///
/// Roots are at depth 0 and every other node sits one below its deepest
/// parent. Parent references forming a cycle are tolerated: a parent that is
/// already on the chain being walked is not followed again.
pub(crate) fn assign_depths(adjacency: &Adjacency) -> HashMap<NodeId, usize> {
    // Edges go from parent to child
    let mut graph = DiGraphMap::<NodeId, ()>::new();
    for node in &adjacency.nodes {
        graph.add_node(node.id);
    }
    for node in &adjacency.nodes {
        for &parent in adjacency.parents(node.id) {
            graph.add_edge(parent, node.id, ());
        }
    }

    let on_cycle = cycle_members(&graph);
    if !on_cycle.is_empty() {
        debug!(
            "{} node(s) on a parent cycle, their depths depend on where the walk starts",
            on_cycle.len()
        );
    }

    let mut memo = HashMap::with_capacity(adjacency.nodes.len());
    adjacency
        .nodes
        .iter()
        .map(|node| {
            let depth = longest_chain(node.id, adjacency, &on_cycle, &mut memo);
            (node.id, depth)
        })
        .collect()
}

/// Nodes sharing a strongly connected component with another node
///
/// Only those can meet one of their own ancestors on the chain being walked.
/// Every other node, self parents included, has the same depth wherever the
/// walk starts and can be memoized.
fn cycle_members(graph: &DiGraphMap<NodeId, ()>) -> HashSet<NodeId> {
    tarjan_scc(graph)
        .into_iter()
        .filter(|component| component.len() > 1)
        .flatten()
        .collect()
}

#[derive(Debug, Clone, Copy)]
struct Frame {
    node: NodeId,
    next_parent: usize,
    best: usize,
}

impl Frame {
    fn new(node: NodeId) -> Self {
        Self {
            node,
            next_parent: 0,
            best: 0,
        }
    }
}

/// Walk up the parents of `start` with an explicit stack
fn longest_chain(
    start: NodeId,
    adjacency: &Adjacency,
    on_cycle: &HashSet<NodeId>,
    memo: &mut HashMap<NodeId, usize>,
) -> usize {
    if let Some(&depth) = memo.get(&start) {
        return depth;
    }

    let mut path = HashSet::from([start]);
    let mut stack = vec![Frame::new(start)];

    while let Some(frame) = stack.last_mut() {
        if let Some(&parent) = adjacency.parents(frame.node).get(frame.next_parent) {
            frame.next_parent += 1;

            if path.contains(&parent) {
                continue;
            }
            if let Some(&depth) = memo.get(&parent) {
                frame.best = frame.best.max(depth + 1);
                continue;
            }

            path.insert(parent);
            stack.push(Frame::new(parent));
            continue;
        }

        let done = *frame;
        stack.pop();
        path.remove(&done.node);
        if !on_cycle.contains(&done.node) {
            memo.insert(done.node, done.best);
        }

        match stack.last_mut() {
            Some(child) => child.best = child.best.max(done.best + 1),
            None => return done.best,
        }
    }

    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layered::adjacency::normalize;
    use crate::DagNode;
    use test_log::test;

    fn depths(nodes: &[DagNode]) -> HashMap<NodeId, usize> {
        assign_depths(&normalize(nodes, &()))
    }

    #[test]
    fn test_roots_are_at_depth_zero() {
        let d = depths(&[DagNode::new(1), DagNode::new(2).with_parents([])]);
        assert_eq!(d[&1], 0);
        assert_eq!(d[&2], 0);
    }

    #[test]
    fn test_longest_chain_wins() {
        // 1 -> 2 -> 3 -> 4 and a shortcut 1 -> 4
        let d = depths(&[
            DagNode::new(4).with_parents([1, 3]),
            DagNode::new(3).with_parents([2]),
            DagNode::new(2).with_parents([1]),
            DagNode::new(1),
        ]);
        assert_eq!(d[&1], 0);
        assert_eq!(d[&2], 1);
        assert_eq!(d[&3], 2);
        assert_eq!(d[&4], 3);
    }

    #[test]
    fn test_self_parent_terminates() {
        let d = depths(&[DagNode::new(1), DagNode::new(2).with_parents([2])]);
        assert_eq!(d[&1], 0);
        assert_eq!(d[&2], 0);
    }

    #[test]
    fn test_two_node_cycle_terminates() {
        let d = depths(&[
            DagNode::new(1).with_parents([2]),
            DagNode::new(2).with_parents([1]),
        ]);
        assert_eq!(d[&1], 1);
        assert_eq!(d[&2], 1);
    }

    #[test]
    fn test_cycle_below_a_root() {
        let d = depths(&[
            DagNode::new(1),
            DagNode::new(2).with_parents([1, 3]),
            DagNode::new(3).with_parents([2]),
            DagNode::new(4).with_parents([3]),
        ]);
        assert_eq!(d[&1], 0);
        assert_eq!(d[&2], 1);
        assert_eq!(d[&3], 2);
        assert_eq!(d[&4], 3);
    }

    #[test]
    fn test_deep_chain_does_not_overflow() {
        let mut nodes = vec![DagNode::new(0)];
        nodes.extend((1..20_000).map(|id| DagNode::new(id).with_parents([id - 1])));
        nodes.reverse();

        let d = depths(&nodes);
        assert_eq!(d[&19_999], 19_999);
    }

    #[test]
    fn test_cycle_members() {
        let nodes = [
            DagNode::new(1),
            DagNode::new(2).with_parents([1, 3]),
            DagNode::new(3).with_parents([2]),
            DagNode::new(4).with_parents([3]),
            DagNode::new(5).with_parents([1, 5]),
        ];
        let adjacency = normalize(&nodes, &());
        let mut graph = DiGraphMap::<NodeId, ()>::new();
        for node in &adjacency.nodes {
            for &parent in adjacency.parents(node.id) {
                graph.add_edge(parent, node.id, ());
            }
        }

        assert_eq!(cycle_members(&graph), HashSet::from([2, 3]));
    }

    /// Each level hangs two nodes under the previous join and joins them again
    fn diamond_ladder(levels: NodeId, root: DagNode) -> Vec<DagNode> {
        let mut nodes = vec![root];
        for level in 1..=levels {
            let join = 3 * (level - 1);
            let (left, right) = (3 * level - 2, 3 * level - 1);
            nodes.push(DagNode::new(left).with_parents([join]));
            nodes.push(DagNode::new(right).with_parents([join]));
            nodes.push(DagNode::new(3 * level).with_parents([left, right]));
        }
        nodes
    }

    #[test]
    fn test_self_parent_above_diamonds_stays_linear() {
        let plain = depths(&diamond_ladder(30, DagNode::new(0)));
        let mut looped = diamond_ladder(30, DagNode::new(0).with_parents([0]));
        // Deepest first, so every walk starts as far from the root as possible
        looped.reverse();

        let d = depths(&looped);
        assert_eq!(d, plain);
        assert_eq!(d[&0], 0);
        assert_eq!(d[&90], 60);
    }

    #[test]
    fn test_depth_below_a_cycle_ignores_walk_order() {
        // 1 <-> 2 above the diamond 2 -> {3, 4} -> 5
        let nodes = vec![
            DagNode::new(1).with_parents([2]),
            DagNode::new(2).with_parents([1]),
            DagNode::new(3).with_parents([2]),
            DagNode::new(4).with_parents([2]),
            DagNode::new(5).with_parents([3, 4]),
        ];

        for shift in 0..nodes.len() {
            for reverse in [false, true] {
                let mut order = nodes.clone();
                order.rotate_left(shift);
                if reverse {
                    order.reverse();
                }

                let d = depths(&order);
                assert_eq!(d[&1], 1, "order {shift} {reverse}");
                assert_eq!(d[&2], 1, "order {shift} {reverse}");
                assert_eq!(d[&3], 2, "order {shift} {reverse}");
                assert_eq!(d[&4], 2, "order {shift} {reverse}");
                assert_eq!(d[&5], 3, "order {shift} {reverse}");
            }
        }
    }
}
