//! The recursive evaluator.

use std::collections::HashMap;
use std::sync::Arc;

use log::{debug, trace};

use crate::error::{EngineError, EvalError};
use crate::graph::GraphView;
use crate::model::argument::Arg;
use crate::model::id::NodeId;
use crate::model::node::{Node, NodeKind};
use crate::model::scope::Scope;
use crate::model::value::{canonical_key, BlockFn, DVal};
use crate::stdlib::{ArgValues, FunctionRegistry};

/// Resolves nodes to values against one graph snapshot.
///
/// Cheap to clone: block closures capture a clone so they can evaluate their
/// return node at call time. The executor never mutates the graph; the only
/// state it touches are the memo caches owned by function nodes, whose
/// writes are monotonic.
#[derive(Clone)]
pub struct Executor {
    graph: Arc<dyn GraphView>,
    registry: Arc<FunctionRegistry>,
}

impl Executor {
    pub fn new(graph: Arc<dyn GraphView>, registry: Arc<FunctionRegistry>) -> Self {
        Self { graph, registry }
    }

    pub fn registry(&self) -> &FunctionRegistry {
        self.registry.as_ref()
    }

    /// Resolve `node` to a value under `scope`.
    ///
    /// A scope binding for the node's id wins outright — that is how block
    /// arguments reach the nodes of a block body. Recursion is bounded by
    /// graph depth; the graph layer guarantees acyclicity.
    pub fn execute(&self, node: &Node, scope: &Scope) -> Result<DVal, EngineError> {
        if let Some(bound) = scope.lookup(node.id) {
            trace!("execute: scope short-circuit on {}", node.id);
            return Ok(bound.clone());
        }

        let resolved = self.resolve_arguments(node, scope)?;

        match node.kind() {
            NodeKind::Value { parsed, .. } => Ok(parsed.clone()),
            NodeKind::Datastore { table } => Ok(DVal::Opaque(table.clone())),
            NodeKind::Function { name, memo, .. } => {
                self.execute_function(node, name, memo, resolved)
            }
            NodeKind::Block { arg_ids } => self.execute_block(node, arg_ids, scope),
            NodeKind::Arg {
                block_id, index, ..
            } => self.execute_arg(node, *block_id, *index),
        }
    }

    /// Resolve every argument slot of `node`: constants are taken as-is,
    /// edges recurse under the same scope.
    pub(crate) fn resolve_arguments(
        &self,
        node: &Node,
        scope: &Scope,
    ) -> Result<ArgValues, EngineError> {
        let mut resolved = HashMap::new();
        if let Some(args) = node.arg_map() {
            for (name, arg) in args.iter() {
                let value = match arg {
                    Arg::Const(v) => v.clone(),
                    Arg::Edge(id) => self.execute(self.graph.node(*id)?, scope)?,
                };
                resolved.insert(name.clone(), value);
            }
        }
        Ok(resolved)
    }

    fn execute_function(
        &self,
        node: &Node,
        name: &str,
        memo: &crate::eval::memo::MemoCache,
        resolved: ArgValues,
    ) -> Result<DVal, EngineError> {
        let spec = self.registry.lookup(name)?;

        if !spec.pure {
            return spec.invoke(&resolved);
        }

        // Incomplete inputs bypass the memo entirely: the result is not
        // representative of a fully-applied call.
        if resolved.values().any(DVal::is_incomplete) {
            return spec.invoke(&resolved);
        }

        match canonical_key(&resolved) {
            None => {
                debug!(
                    "execute: {} on node {} has uncacheable arguments, memo bypassed",
                    name, node.id
                );
                spec.invoke(&resolved)
            }
            Some(key) => {
                if let Some(hit) = memo.get(&key) {
                    trace!("execute: memo hit for {} on node {}", name, node.id);
                    return Ok(hit);
                }
                let result = spec.invoke(&resolved)?;
                memo.put(key, result.clone());
                Ok(result)
            }
        }
    }

    /// A block node does not evaluate its interior. It resolves its return
    /// node and closes over the current scope, producing a callable value.
    fn execute_block(
        &self,
        node: &Node,
        arg_ids: &[NodeId],
        scope: &Scope,
    ) -> Result<DVal, EngineError> {
        let body = self.resolve_block_body(node, arg_ids)?;

        let executor = self.clone();
        let outer = scope.clone();
        let ids = arg_ids.to_vec();
        let block_id = node.id;

        let closure = BlockFn::new(move |args: &[DVal]| {
            if args.len() != ids.len() {
                return Err(EvalError::ArityMismatch {
                    block: block_id,
                    expected: ids.len(),
                    got: args.len(),
                }
                .into());
            }
            let frame = ids.iter().copied().zip(args.iter().cloned());
            let merged = outer.extended(frame);
            let body_node = executor.graph.node(body)?;
            executor.execute(body_node, &merged)
        });

        Ok(DVal::Block(block_id, closure))
    }

    /// The block's return node is the shallowest of the nodes reachable from
    /// its argument nodes, by maximum depth.
    //
    // TODO: the shallowest-of-deepest rule misbehaves when an argument node
    // fans out into independent chains of equal depth; revisit once the
    // editor can mark the return node explicitly.
    fn resolve_block_body(&self, node: &Node, arg_ids: &[NodeId]) -> Result<NodeId, EngineError> {
        let mut reachable: Vec<(usize, NodeId)> = Vec::new();
        for arg_id in arg_ids {
            reachable.extend(
                self.graph
                    .deepest(*arg_id)
                    .into_iter()
                    .map(|(depth, n)| (depth, n.id)),
            );
        }
        reachable.sort();
        reachable
            .first()
            .map(|(_, id)| *id)
            .ok_or_else(|| EvalError::EmptyBlock(node.id).into())
    }

    /// An arg node reached during forward evaluation was not bound in scope:
    /// that only legitimately happens under preview. Its sample value is the
    /// per-argument live value its block's single caller reports.
    fn execute_arg(
        &self,
        node: &Node,
        block_id: NodeId,
        index: usize,
    ) -> Result<DVal, EngineError> {
        let callers = self.graph.children(block_id);
        if callers.len() != 1 {
            return Err(EvalError::CallerCount {
                arg: node.id,
                block: block_id,
                found: callers.len(),
            }
            .into());
        }
        let caller = callers[0];
        let live = self.preview(caller, caller.cursor)?;
        Ok(live.get(index).cloned().unwrap_or(DVal::Incomplete))
    }
}
