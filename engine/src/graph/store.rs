//! In-memory graph store.

use std::collections::HashMap;

use log::debug;

use crate::error::{EngineError, GraphError};
use crate::graph::GraphView;
use crate::model::argument::Arg;
use crate::model::id::NodeId;
use crate::model::node::Node;
use crate::model::value::DVal;

/// Owner of the nodes of one program graph.
///
/// Nodes have graph-lifetime identity: a function node's memo cache lives
/// exactly as long as its entry here. Edge bookkeeping happens through the
/// argument maps of the stored nodes; the store validates that edges only
/// ever point at present nodes.
#[derive(Clone, Debug, Default)]
pub struct GraphStore {
    nodes: HashMap<NodeId, Node>,
}

impl GraphStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node, returning its id.
    pub fn insert(&mut self, node: Node) -> NodeId {
        let id = node.id;
        debug!("graph: insert {} node {}", node.type_name(), id);
        self.nodes.insert(id, node);
        id
    }

    /// Remove a node. Its memo cache is dropped with it.
    pub fn remove(&mut self, id: NodeId) -> Option<Node> {
        self.nodes.remove(&id)
    }

    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Bind `consumer`'s parameter `param` to the result of `producer`.
    pub fn connect(
        &mut self,
        consumer: NodeId,
        param: &str,
        producer: NodeId,
    ) -> Result<(), EngineError> {
        if !self.nodes.contains_key(&producer) {
            return Err(GraphError::EdgeTargetMissing(producer).into());
        }
        let node = self
            .nodes
            .get_mut(&consumer)
            .ok_or(GraphError::NodeNotFound(consumer))?;
        node.set_arg(param, Arg::Edge(producer))
    }

    /// Bind `consumer`'s parameter `param` to a constant.
    pub fn set_const(
        &mut self,
        consumer: NodeId,
        param: &str,
        value: DVal,
    ) -> Result<(), EngineError> {
        let node = self
            .nodes
            .get_mut(&consumer)
            .ok_or(GraphError::NodeNotFound(consumer))?;
        node.set_arg(param, Arg::Const(value))
    }
}

impl GraphView for GraphStore {
    fn node(&self, id: NodeId) -> Result<&Node, EngineError> {
        self.nodes
            .get(&id)
            .ok_or_else(|| GraphError::NodeNotFound(id).into())
    }

    fn children(&self, id: NodeId) -> Vec<&Node> {
        let mut consumers: Vec<&Node> = self
            .nodes
            .values()
            .filter(|n| {
                n.arg_map()
                    .map(|args| args.edge_ids().contains(&id))
                    .unwrap_or(false)
            })
            .collect();
        consumers.sort_by_key(|n| n.id);
        consumers
    }

    fn deepest(&self, id: NodeId) -> Vec<(usize, &Node)> {
        // Longest-path depth per reachable node. The graph layer guarantees
        // acyclicity, so repeated relaxation terminates.
        let mut depths: HashMap<NodeId, usize> = HashMap::new();
        let mut frontier = vec![(id, 0usize)];
        while let Some((current, depth)) = frontier.pop() {
            for child in self.children(current) {
                let next = depth + 1;
                let known = depths.entry(child.id).or_insert(0);
                if *known < next {
                    *known = next;
                    frontier.push((child.id, next));
                }
            }
        }

        let mut reachable: Vec<(usize, &Node)> = depths
            .into_iter()
            .filter_map(|(nid, depth)| self.nodes.get(&nid).map(|n| (depth, n)))
            .collect();
        reachable.sort_by_key(|(depth, n)| (*depth, n.id));
        reachable
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stdlib::FunctionRegistry;

    fn setup() -> (GraphStore, FunctionRegistry) {
        (GraphStore::new(), FunctionRegistry::with_builtins())
    }

    #[test]
    fn test_connect_rejects_missing_producer() {
        let (mut store, registry) = setup();
        let f = store.insert(Node::function("add", &registry).unwrap());
        let ghost = NodeId::fresh();
        assert!(store.connect(f, "a", ghost).is_err());
    }

    #[test]
    fn test_children_are_consumers() {
        let (mut store, registry) = setup();
        let v = store.insert(Node::value("1"));
        let f = store.insert(Node::function("add", &registry).unwrap());
        store.connect(f, "a", v).unwrap();

        let children: Vec<NodeId> = store.children(v).iter().map(|n| n.id).collect();
        assert_eq!(children, vec![f]);
        assert!(store.children(f).is_empty());
    }

    #[test]
    fn test_deepest_reports_maximum_depth() {
        // v feeds both f directly and g through f: g's depth from v is 2.
        let (mut store, registry) = setup();
        let v = store.insert(Node::value("1"));
        let f = store.insert(Node::function("add", &registry).unwrap());
        let g = store.insert(Node::function("add", &registry).unwrap());
        store.connect(f, "a", v).unwrap();
        store.connect(g, "a", v).unwrap();
        store.connect(g, "b", f).unwrap();

        let deepest: Vec<(usize, NodeId)> =
            store.deepest(v).iter().map(|(d, n)| (*d, n.id)).collect();
        assert_eq!(deepest, vec![(1, f), (2, g)]);
    }

    #[test]
    fn test_remove_drops_node() {
        let (mut store, _) = setup();
        let v = store.insert(Node::value("1"));
        assert!(store.remove(v).is_some());
        assert!(store.node(v).is_err());
    }
}
