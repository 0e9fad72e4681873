use crate::NodeId;
use std::sync::Mutex;
use thiserror::Error;
use tracing::warn;

/// Non fatal problems found while laying out a graph
///
/// The layout always completes, the offending input is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Diagnostic {
    #[error("node {node}: ignoring null parent reference")]
    NullParent { node: NodeId },

    #[error("node {node}: ignoring malformed parent reference {value}")]
    MalformedParent { node: NodeId, value: String },

    #[error("node {node}: unable to find parent {parent}")]
    UnknownParent { node: NodeId, parent: NodeId },

    #[error("node {id} is declared more than once, keeping the last declaration")]
    DuplicateNode { id: NodeId },

    #[error("edge {from} -> {to}: endpoint was not laid out")]
    UnresolvedEdge { from: NodeId, to: NodeId },
}

impl Diagnostic {
    /// The node the diagnostic is about
    pub fn node(&self) -> NodeId {
        match self {
            Diagnostic::NullParent { node }
            | Diagnostic::MalformedParent { node, .. }
            | Diagnostic::UnknownParent { node, .. } => *node,
            Diagnostic::DuplicateNode { id } => *id,
            Diagnostic::UnresolvedEdge { from, .. } => *from,
        }
    }
}

/// Sink receiving the diagnostics of a layout computation
///
/// Diagnostics are also logged with `tracing`, a sink is only needed to get
/// hold of them programmatically.
pub trait Diagnostics {
    fn report(&self, diagnostic: Diagnostic);
}

/// Discard diagnostics
impl Diagnostics for () {
    fn report(&self, _diagnostic: Diagnostic) {}
}

// Blanket implementation for closures
impl<F> Diagnostics for F
where
    F: Fn(Diagnostic),
{
    fn report(&self, diagnostic: Diagnostic) {
        self(diagnostic)
    }
}

/// Collect diagnostics, can be shared between threads
impl Diagnostics for Mutex<Vec<Diagnostic>> {
    fn report(&self, diagnostic: Diagnostic) {
        self.lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(diagnostic);
    }
}

pub(crate) fn emit<D>(sink: &D, diagnostic: Diagnostic)
where
    D: Diagnostics + ?Sized,
{
    warn!("{diagnostic}");
    sink.report(diagnostic);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use test_log::test;

    #[test]
    fn test_closure_sink() {
        let seen = RefCell::new(Vec::new());
        let sink = |d: Diagnostic| seen.borrow_mut().push(d.node());

        emit(&sink, Diagnostic::NullParent { node: 4 });
        emit(&sink, Diagnostic::UnresolvedEdge { from: 5, to: 6 });

        assert_eq!(*seen.borrow(), vec![4, 5]);
    }

    #[test]
    fn test_mutex_sink() {
        let sink = Mutex::new(Vec::new());
        emit(&sink, Diagnostic::DuplicateNode { id: 1 });

        let collected = sink.into_inner().unwrap();
        assert_eq!(collected, vec![Diagnostic::DuplicateNode { id: 1 }]);
        assert_eq!(
            collected[0].to_string(),
            "node 1 is declared more than once, keeping the last declaration"
        );
    }
}
