//! Demand-driven dataflow graph execution engine for the visual editor.
//!
//! Programs are directed graphs whose nodes are literal values, function
//! calls, datastores, first-class anonymous blocks, and block-argument
//! placeholders. The executor resolves a node to a runtime value by
//! recursive descent, memoizing pure applications per call-site node and
//! turning block nodes into invocable closures that deliver their arguments
//! through a lexical scope.

pub mod error;
pub mod eval;
pub mod frontend;
pub mod graph;
pub mod model;
pub mod stdlib;

pub use error::{EngineError, EvalError, GraphError};

pub use eval::executor::Executor;
pub use eval::memo::MemoCache;
pub use frontend::{ArgRepr, LiveValue, NodeView};
pub use graph::store::GraphStore;
pub use graph::GraphView;
pub use model::argument::{Arg, ArgMap, Param, TypeTag};
pub use model::id::NodeId;
pub use model::literal::parse_literal;
pub use model::node::{Node, NodeKind, Pos};
pub use model::scope::Scope;
pub use model::value::{BlockFn, DVal};
pub use stdlib::{ArgValues, FunctionRegistry, FunctionSpec};
