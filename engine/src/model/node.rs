//! The node taxonomy of the dataflow graph.

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EvalError};
use crate::eval::memo::MemoCache;
use crate::model::argument::{Arg, ArgMap};
use crate::model::id::NodeId;
use crate::model::literal::parse_literal;
use crate::model::value::DVal;
use crate::stdlib::FunctionRegistry;

/// Editor layout coordinate. The engine never interprets it.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Pos {
    pub x: i64,
    pub y: i64,
}

impl Pos {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

/// A vertex of the dataflow graph: shared preamble plus per-variant data.
///
/// `cursor` is an editor-side index selector consumed only by preview hooks;
/// evaluation attaches no meaning to it. Both `cursor` and `position` are
/// mutated by editor commands between evaluations, never during one.
#[derive(Clone, Debug)]
pub struct Node {
    pub id: NodeId,
    pub position: Pos,
    pub cursor: i64,
    kind: NodeKind,
}

/// Variant data for the five node kinds.
#[derive(Clone, Debug)]
pub enum NodeKind {
    /// A literal, parsed once from its source string at construction.
    Value { source: String, parsed: DVal },
    /// A call to a named standard-library function. Owns its argument
    /// bindings and its memo cache.
    Function {
        name: String,
        args: ArgMap,
        memo: MemoCache,
    },
    /// A reference to a datastore table.
    Datastore { table: String },
    /// An anonymous sub-graph behaving as a first-class callable. Its body
    /// is discovered dynamically from the argument nodes.
    Block { arg_ids: Vec<NodeId> },
    /// Placeholder for one positional parameter of an enclosing block.
    Arg {
        block_id: NodeId,
        index: usize,
        arg_ids: Vec<NodeId>,
    },
}

impl Node {
    pub fn value(source: &str) -> Self {
        Self {
            id: NodeId::fresh(),
            position: Pos::default(),
            cursor: 0,
            kind: NodeKind::Value {
                source: source.to_string(),
                parsed: parse_literal(source),
            },
        }
    }

    /// Build a function node. The name is resolved against the registry now;
    /// an unknown name is fatal at construction time. Every argument slot
    /// starts blank.
    pub fn function(name: &str, registry: &FunctionRegistry) -> Result<Self, EngineError> {
        let spec = registry.lookup(name)?;
        Ok(Self {
            id: NodeId::fresh(),
            position: Pos::default(),
            cursor: 0,
            kind: NodeKind::Function {
                name: name.to_string(),
                args: ArgMap::for_params(&spec.parameters),
                memo: MemoCache::new(),
            },
        })
    }

    pub fn datastore(table: &str) -> Self {
        Self {
            id: NodeId::fresh(),
            position: Pos::default(),
            cursor: 0,
            kind: NodeKind::Datastore {
                table: table.to_string(),
            },
        }
    }

    /// Build a block node together with its positional arg nodes, wired both
    /// ways: the block lists the arg ids in order, each arg node back-
    /// references the block and its own index.
    pub fn block(arg_count: usize) -> (Self, Vec<Self>) {
        let block_id = NodeId::fresh();
        let args: Vec<Node> = (0..arg_count)
            .map(|index| Node {
                id: NodeId::fresh(),
                position: Pos::default(),
                cursor: 0,
                kind: NodeKind::Arg {
                    block_id,
                    index,
                    arg_ids: Vec::new(),
                },
            })
            .collect();
        let arg_ids: Vec<NodeId> = args.iter().map(|a| a.id).collect();

        let args = args
            .into_iter()
            .map(|mut a| {
                if let NodeKind::Arg { arg_ids: ids, .. } = &mut a.kind {
                    *ids = arg_ids.clone();
                }
                a
            })
            .collect();

        let block = Node {
            id: block_id,
            position: Pos::default(),
            cursor: 0,
            kind: NodeKind::Block {
                arg_ids: arg_ids.clone(),
            },
        };
        (block, args)
    }

    /// Place the node at an editor layout coordinate.
    pub fn with_position(mut self, position: Pos) -> Self {
        self.position = position;
        self
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    /// Variant name used on the wire.
    pub fn type_name(&self) -> &'static str {
        match &self.kind {
            NodeKind::Value { .. } => "value",
            NodeKind::Function { .. } => "function",
            NodeKind::Datastore { .. } => "datastore",
            NodeKind::Block { .. } => "block",
            NodeKind::Arg { .. } => "arg",
        }
    }

    /// Display name: the literal source, function name or table name.
    pub fn name(&self) -> String {
        match &self.kind {
            NodeKind::Value { source, .. } => source.clone(),
            NodeKind::Function { name, .. } => name.clone(),
            NodeKind::Datastore { table } => table.clone(),
            NodeKind::Block { .. } => "_block".to_string(),
            NodeKind::Arg { .. } => "_arg".to_string(),
        }
    }

    /// Argument bindings, present only on variants that carry parameters.
    pub fn arg_map(&self) -> Option<&ArgMap> {
        match &self.kind {
            NodeKind::Function { args, .. } => Some(args),
            _ => None,
        }
    }

    /// Bind an argument slot of a function node.
    pub fn set_arg(&mut self, name: &str, arg: Arg) -> Result<(), EngineError> {
        match &mut self.kind {
            NodeKind::Function {
                name: function,
                args,
                ..
            } => args.set(function, name, arg),
            _ => Err(EngineError::eval(format!(
                "Node {} is not a function and takes no arguments",
                self.id
            ))),
        }
    }

    /// Repoint a function node at a different standard-library function.
    ///
    /// The argument map is re-initialized for the new parameter list and the
    /// memo cache is dropped: entries keyed under the old function would
    /// otherwise leak into the new one.
    pub fn set_function_name(
        &mut self,
        name: &str,
        registry: &FunctionRegistry,
    ) -> Result<(), EngineError> {
        let spec = registry.lookup(name)?;
        match &mut self.kind {
            NodeKind::Function {
                name: current,
                args,
                memo,
            } => {
                *current = name.to_string();
                *args = ArgMap::for_params(&spec.parameters);
                memo.clear();
                Ok(())
            }
            _ => Err(EvalError::Other(format!(
                "Node {} is not a function node",
                self.id
            ))
            .into()),
        }
    }

    pub fn memo(&self) -> Option<&MemoCache> {
        match &self.kind {
            NodeKind::Function { memo, .. } => Some(memo),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::argument::TypeTag;

    #[test]
    fn test_value_node_parses_once() {
        let node = Node::value("42");
        match node.kind() {
            NodeKind::Value { parsed, .. } => assert_eq!(parsed, &DVal::Int(42)),
            other => panic!("unexpected kind: {:?}", other),
        }
    }

    #[test]
    fn test_function_node_requires_known_name() {
        let registry = FunctionRegistry::with_builtins();
        assert!(Node::function("no_such_function", &registry).is_err());

        let node = Node::function("add", &registry).unwrap();
        let args = node.arg_map().unwrap();
        assert!(args.contains("a"));
        assert!(args.contains("b"));
        assert_eq!(args.len(), 2);
    }

    #[test]
    fn test_block_wires_arg_nodes_both_ways() {
        let (block, args) = Node::block(2);
        let block_arg_ids = match block.kind() {
            NodeKind::Block { arg_ids } => arg_ids.clone(),
            other => panic!("unexpected kind: {:?}", other),
        };
        assert_eq!(args.len(), 2);
        for (i, arg) in args.iter().enumerate() {
            match arg.kind() {
                NodeKind::Arg {
                    block_id,
                    index,
                    arg_ids,
                } => {
                    assert_eq!(*block_id, block.id);
                    assert_eq!(*index, i);
                    assert_eq!(arg_ids, &block_arg_ids);
                    assert_eq!(block_arg_ids[i], arg.id);
                }
                other => panic!("unexpected kind: {:?}", other),
            }
        }
    }

    #[test]
    fn test_set_function_name_clears_memo_and_rebuilds_args() {
        let registry = FunctionRegistry::with_builtins();
        let mut node = Node::function("add", &registry).unwrap();
        node.memo().unwrap().put("k".to_string(), DVal::Int(1));
        node.set_arg("a", Arg::Const(DVal::Int(1))).unwrap();

        node.set_function_name("length", &registry).unwrap();
        assert!(node.memo().unwrap().is_empty());
        let args = node.arg_map().unwrap();
        assert!(args.contains("s"));
        assert!(!args.contains("a"));
    }

    #[test]
    fn test_block_param_tag_is_distinguished() {
        let registry = FunctionRegistry::with_builtins();
        let spec = registry.lookup("map").unwrap();
        let f = spec.parameters.iter().find(|p| p.name == "f").unwrap();
        assert_eq!(f.type_tag, TypeTag::Block);
    }
}
