//! Graph access: the read-side capabilities the executor consumes.

pub mod analysis;
pub mod store;

use crate::error::EngineError;
use crate::model::id::NodeId;
use crate::model::node::Node;

/// Read-only view of the graph required by the executor.
///
/// An edge runs from a consumer to the node it references: a function node
/// with `Edge(p)` bound in its argument map has an edge pointing to `p`.
/// The executor never mutates the graph through this interface.
pub trait GraphView: Send + Sync {
    /// Look up a node by id. Absence is an internal invariant violation.
    fn node(&self, id: NodeId) -> Result<&Node, EngineError>;

    /// Nodes that have an edge pointing to `id` — its consumers.
    fn children(&self, id: NodeId) -> Vec<&Node>;

    /// Every node reachable from `id` by following consumer edges
    /// exhaustively, tagged with its maximum depth from `id`. Used by block
    /// evaluation to locate a block's return node.
    fn deepest(&self, id: NodeId) -> Vec<(usize, &Node)>;
}
