use thiserror::Error;

use crate::model::id::NodeId;

#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Node not found: {0}")]
    NodeNotFound(NodeId),
    #[error("Edge target not found: {0}")]
    EdgeTargetMissing(NodeId),
    #[error("Graph error: {0}")]
    Other(String),
}

#[derive(Error, Debug)]
pub enum EvalError {
    #[error("Unknown function: {0}")]
    UnknownFunction(String),
    #[error("Function {function} has no argument named {argument}")]
    UnknownArgument { function: String, argument: String },
    #[error("Block {block} invoked with {got} arguments, expected {expected}")]
    ArityMismatch {
        block: NodeId,
        expected: usize,
        got: usize,
    },
    #[error("Block {0} has no body reachable from its argument nodes")]
    EmptyBlock(NodeId),
    #[error("Arg node {arg} expects exactly one caller of block {block}, found {found}")]
    CallerCount {
        arg: NodeId,
        block: NodeId,
        found: usize,
    },
    #[error("Node {0} cannot be previewed")]
    NotPreviewable(NodeId),
    #[error("Evaluation error: {0}")]
    Other(String),
}

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0}")]
    Graph(#[from] GraphError),
    #[error("{0}")]
    Eval(#[from] EvalError),
    #[error("Function {function} failed: {message}")]
    Function { function: String, message: String },
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience constructors to minimize call-site changes
impl EngineError {
    pub fn graph(msg: impl Into<String>) -> Self {
        Self::Graph(GraphError::Other(msg.into()))
    }

    pub fn eval(msg: impl Into<String>) -> Self {
        Self::Eval(EvalError::Other(msg.into()))
    }

    pub fn function(name: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Function {
            function: name.into(),
            message: msg.into(),
        }
    }
}
