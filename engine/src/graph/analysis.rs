//! Graph analysis utilities for graph maintenance.
//!
//! Dependent-node reporting lets the surrounding store garbage-collect the
//! satellites of a node when it is removed: the anonymous blocks owned by a
//! call site, a block's argument nodes, an arg node's owning block.

use crate::error::EngineError;
use crate::graph::GraphView;
use crate::model::id::NodeId;
use crate::model::node::{Node, NodeKind};
use crate::stdlib::FunctionRegistry;

/// Nodes whose lifetime is tied to `node`.
///
/// - Function node: every edge-valued argument whose parameter is tagged
///   `Block` — anonymous blocks owned by this call site.
/// - Block node: its argument nodes plus every consumer of the block.
/// - Arg node: its owning block.
/// - Value/datastore node: none.
pub fn dependents(
    node: &Node,
    graph: &dyn GraphView,
    registry: &FunctionRegistry,
) -> Result<Vec<NodeId>, EngineError> {
    match node.kind() {
        NodeKind::Function { name, args, .. } => {
            let spec = registry.lookup(name)?;
            Ok(spec
                .parameters
                .iter()
                .filter(|p| p.is_block())
                .filter_map(|p| args.get(&p.name).and_then(|arg| arg.edge_id()))
                .collect())
        }
        NodeKind::Block { arg_ids } => {
            let mut ids = arg_ids.clone();
            ids.extend(graph.children(node.id).iter().map(|n| n.id));
            Ok(ids)
        }
        NodeKind::Arg { block_id, .. } => Ok(vec![*block_id]),
        NodeKind::Value { .. } | NodeKind::Datastore { .. } => Ok(Vec::new()),
    }
}
