//! Parameters and per-node argument bindings.

use std::collections::HashMap;

use crate::error::{EngineError, EvalError};
use crate::model::id::NodeId;
use crate::model::value::DVal;

/// Data type tag for a parameter.
///
/// `Block` is distinguished: edge arguments bound to block-tagged parameters
/// are anonymous blocks owned by the call site, which matters for
/// dependent-node reporting.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TypeTag {
    Any,
    Int,
    Float,
    Str,
    Bool,
    List,
    Datastore,
    Block,
}

/// A named, typed parameter of a standard-library function.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub type_tag: TypeTag,
}

impl Param {
    pub fn new(name: &str, type_tag: TypeTag) -> Self {
        Self {
            name: name.to_string(),
            type_tag,
        }
    }

    pub fn is_block(&self) -> bool {
        self.type_tag == TypeTag::Block
    }
}

/// One argument slot: either a constant value or an edge to another node.
///
/// A blank slot is `Const(Incomplete)`.
#[derive(Clone, Debug, PartialEq)]
pub enum Arg {
    Const(DVal),
    Edge(NodeId),
}

impl Arg {
    pub fn blank() -> Self {
        Arg::Const(DVal::Incomplete)
    }

    pub fn edge_id(&self) -> Option<NodeId> {
        match self {
            Arg::Edge(id) => Some(*id),
            Arg::Const(_) => None,
        }
    }
}

/// Mapping from parameter name to argument slot.
///
/// Invariant: the key set is exactly the parameter-name set of the owning
/// function — no gaps, no extras. Construction fills every slot blank and
/// [`ArgMap::set`] refuses unknown keys.
#[derive(Clone, Debug, Default)]
pub struct ArgMap {
    slots: HashMap<String, Arg>,
}

impl ArgMap {
    pub fn for_params(params: &[Param]) -> Self {
        Self {
            slots: params
                .iter()
                .map(|p| (p.name.clone(), Arg::blank()))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Arg> {
        self.slots.get(name)
    }

    /// Replace the argument bound under an existing parameter name.
    pub fn set(&mut self, function: &str, name: &str, arg: Arg) -> Result<(), EngineError> {
        match self.slots.get_mut(name) {
            Some(slot) => {
                *slot = arg;
                Ok(())
            }
            None => Err(EvalError::UnknownArgument {
                function: function.to_string(),
                argument: name.to_string(),
            }
            .into()),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Arg)> {
        self.slots.iter()
    }

    /// All edge targets referenced by this map.
    pub fn edge_ids(&self) -> Vec<NodeId> {
        self.slots.values().filter_map(Arg::edge_id).collect()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.slots.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params() -> Vec<Param> {
        vec![
            Param::new("a", TypeTag::Any),
            Param::new("b", TypeTag::Any),
        ]
    }

    #[test]
    fn test_for_params_fills_every_slot_blank() {
        let args = ArgMap::for_params(&params());
        assert_eq!(args.len(), 2);
        assert_eq!(args.get("a"), Some(&Arg::Const(DVal::Incomplete)));
        assert_eq!(args.get("b"), Some(&Arg::Const(DVal::Incomplete)));
    }

    #[test]
    fn test_set_unknown_key_is_rejected() {
        let mut args = ArgMap::for_params(&params());
        let err = args.set("add", "c", Arg::Const(DVal::Int(1)));
        assert!(err.is_err());
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn test_set_replaces_binding() {
        let mut args = ArgMap::for_params(&params());
        let target = NodeId::fresh();
        args.set("add", "a", Arg::Edge(target)).unwrap();
        assert_eq!(args.get("a"), Some(&Arg::Edge(target)));
        assert_eq!(args.edge_ids(), vec![target]);
    }
}
