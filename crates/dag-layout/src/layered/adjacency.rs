use crate::diagnostics::{emit, Diagnostic, Diagnostics};
use crate::{DagNode, NodeId, ParentRef};
use std::collections::HashMap;
use tracing::trace;

/// Validated parent/child relations of a node list
#[derive(Debug, Clone, Default)]
pub(crate) struct Adjacency {
    /// Nodes kept for the layout, in declaration order
    pub nodes: Vec<DagNode>,

    /// Position of each node in `nodes`
    pub id_to_index: HashMap<NodeId, usize>,

    /// Parents of each node, only ids of known nodes
    pub parent_ids: HashMap<NodeId, Vec<NodeId>>,

    /// Children of each node, in the order they were declared
    pub children: HashMap<NodeId, Vec<NodeId>>,
}

/// Clean up the declared parents of every node
///
/// Null, malformed and unknown parent references are dropped and reported.
/// When an id is declared more than once the last declaration wins.
pub(crate) fn normalize<D>(nodes: &[DagNode], diagnostics: &D) -> Adjacency
where
    D: Diagnostics + ?Sized,
{
    let mut last_declaration: HashMap<NodeId, usize> = HashMap::with_capacity(nodes.len());
    for (position, node) in nodes.iter().enumerate() {
        if last_declaration.insert(node.id, position).is_some() {
            emit(diagnostics, Diagnostic::DuplicateNode { id: node.id });
        }
    }

    let kept: Vec<DagNode> = nodes
        .iter()
        .enumerate()
        .filter(|(position, node)| last_declaration.get(&node.id) == Some(position))
        .map(|(_, node)| node.clone())
        .collect();

    let mut adjacency = Adjacency {
        id_to_index: kept
            .iter()
            .enumerate()
            .map(|(index, node)| (node.id, index))
            .collect(),
        ..Default::default()
    };

    for node in &kept {
        let parents: Vec<NodeId> = node
            .parents
            .iter()
            .filter_map(|parent| match parent {
                ParentRef::Id(id) if adjacency.id_to_index.contains_key(id) => Some(*id),
                ParentRef::Id(id) => {
                    emit(
                        diagnostics,
                        Diagnostic::UnknownParent {
                            node: node.id,
                            parent: *id,
                        },
                    );
                    None
                }
                ParentRef::Null => {
                    emit(diagnostics, Diagnostic::NullParent { node: node.id });
                    None
                }
                ParentRef::Invalid(value) => {
                    emit(
                        diagnostics,
                        Diagnostic::MalformedParent {
                            node: node.id,
                            value: value.clone(),
                        },
                    );
                    None
                }
            })
            .collect();

        trace!("Parents of {}: {parents:?}", node.id);

        for &parent in &parents {
            adjacency.children.entry(parent).or_default().push(node.id);
        }

        adjacency.parent_ids.insert(node.id, parents);
    }

    adjacency.nodes = kept;
    adjacency
}

impl Adjacency {
    pub fn parents(&self, id: NodeId) -> &[NodeId] {
        self.parent_ids.get(&id).map(Vec::as_slice).unwrap_or_default()
    }
}
