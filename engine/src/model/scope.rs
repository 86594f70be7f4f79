//! Scope — immutable per-evaluation binding frames.

use std::collections::HashMap;
use std::sync::Arc;

use crate::model::id::NodeId;
use crate::model::value::DVal;

/// An immutable mapping from node id to resolved value.
///
/// A scope short-circuits evaluation: when the executor reaches a node whose
/// id is bound, the bound value is returned without visiting the node's
/// arguments. This is how block arguments are delivered to block bodies.
///
/// Scopes are cheap to clone (shared backing map) and a new frame is built
/// for every block invocation.
#[derive(Clone, Debug, Default)]
pub struct Scope {
    bindings: Arc<HashMap<NodeId, DVal>>,
}

impl Scope {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn lookup(&self, id: NodeId) -> Option<&DVal> {
        self.bindings.get(&id)
    }

    /// Left-biased merge: the new bindings win over existing ones.
    pub fn extended(&self, bindings: impl IntoIterator<Item = (NodeId, DVal)>) -> Scope {
        let mut merged = (*self.bindings).clone();
        for (id, value) in bindings {
            merged.insert(id, value);
        }
        Scope {
            bindings: Arc::new(merged),
        }
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}
