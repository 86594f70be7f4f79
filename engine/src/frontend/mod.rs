//! Projection of nodes and their observed values into the wire format the
//! editor front-end consumes. Field names are fixed for wire compatibility.

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::model::argument::Arg;
use crate::model::id::NodeId;
use crate::model::node::{Node, NodeKind, Pos};
use crate::model::value::DVal;
use crate::stdlib::FunctionRegistry;

/// The most recently observed evaluation result of a node, as reported to
/// the front-end. The engine does not store observed values; the caller
/// supplies this quadruple.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct LiveValue {
    pub value: String,
    #[serde(rename = "type")]
    pub type_tag: String,
    pub json: serde_json::Value,
    pub exc: Option<String>,
}

impl LiveValue {
    pub fn from_value(value: &DVal) -> Self {
        Self {
            value: value.to_string(),
            type_tag: value.type_name().to_string(),
            json: value.json_repr(),
            exc: None,
        }
    }

    pub fn incomplete() -> Self {
        Self::from_value(&DVal::Incomplete)
    }

    /// Live value for a node whose evaluation raised: the request handler
    /// attaches the captured message here.
    pub fn exception(message: impl Into<String>) -> Self {
        Self {
            value: String::new(),
            type_tag: "Error".to_string(),
            json: serde_json::Value::Null,
            exc: Some(message.into()),
        }
    }
}

/// One argument slot on the wire: an edge by target id, or a constant by its
/// string representation.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum ArgRepr {
    AEdge(NodeId),
    AConst(String),
}

impl From<&Arg> for ArgRepr {
    fn from(arg: &Arg) -> Self {
        match arg {
            Arg::Edge(id) => ArgRepr::AEdge(*id),
            Arg::Const(v) => ArgRepr::AConst(v.to_string()),
        }
    }
}

/// The serialized record for one node.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NodeView {
    pub name: String,
    pub id: NodeId,
    #[serde(rename = "type")]
    pub node_type: String,
    pub pos: Pos,
    pub live: LiveValue,
    pub cursor: i64,
    pub arguments: Vec<(String, ArgRepr)>,
    pub block_id: Option<NodeId>,
    pub arg_ids: Vec<NodeId>,
}

impl NodeView {
    /// Project a node plus its observed live value. Function-node arguments
    /// are listed in parameter order, which requires the registry.
    pub fn project(
        node: &Node,
        registry: &FunctionRegistry,
        live: LiveValue,
    ) -> Result<Self, EngineError> {
        let mut arguments = Vec::new();
        if let NodeKind::Function { name, args, .. } = node.kind() {
            let spec = registry.lookup(name)?;
            for p in &spec.parameters {
                let repr = args
                    .get(&p.name)
                    .map(ArgRepr::from)
                    .unwrap_or(ArgRepr::AConst(DVal::Incomplete.to_string()));
                arguments.push((p.name.clone(), repr));
            }
        }

        let (block_id, arg_ids) = match node.kind() {
            NodeKind::Block { arg_ids } => (None, arg_ids.clone()),
            NodeKind::Arg {
                block_id, arg_ids, ..
            } => (Some(*block_id), arg_ids.clone()),
            _ => (None, Vec::new()),
        };

        Ok(Self {
            name: node.name(),
            id: node.id,
            node_type: node.type_name().to_string(),
            pos: node.position,
            live,
            cursor: node.cursor,
            arguments,
            block_id,
            arg_ids,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arg_repr_wire_shape() {
        let edge = serde_json::to_value(ArgRepr::AEdge(NodeId::fresh())).unwrap();
        let obj = edge.as_object().unwrap();
        assert!(obj.contains_key("AEdge"));
        assert!(obj["AEdge"].is_u64());

        let constant = serde_json::to_value(ArgRepr::AConst("42".to_string())).unwrap();
        assert_eq!(constant, serde_json::json!({ "AConst": "42" }));
    }

    #[test]
    fn test_live_value_exception() {
        let live = LiveValue::exception("boom");
        assert_eq!(live.exc.as_deref(), Some("boom"));
        assert_eq!(live.type_tag, "Error");
    }
}
