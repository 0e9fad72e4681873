use crate::{DagNode, NodeId, Vec2};
use std::collections::HashMap;

/// Trait for overriding node sizes during layout computation
///
/// Returning `None` keeps the size from the [`LayoutConfig`](crate::LayoutConfig).
/// Only the drawn size changes, nodes still occupy configuration sized slots.
pub trait NodeSizes {
    /// Get the size of a node, if it differs from the configured one
    fn size(&self, node: &DagNode) -> Option<Vec2>;
}

/// No overrides, every node uses the configured size
impl NodeSizes for () {
    fn size(&self, _node: &DagNode) -> Option<Vec2> {
        None
    }
}

// Blanket implementation for closures
impl<F> NodeSizes for F
where
    F: Fn(&DagNode) -> Option<Vec2>,
{
    fn size(&self, node: &DagNode) -> Option<Vec2> {
        self(node)
    }
}

// Implementation for HashMap
impl NodeSizes for HashMap<NodeId, Vec2> {
    fn size(&self, node: &DagNode) -> Option<Vec2> {
        self.get(&node.id).copied()
    }
}
