//! Undirected capacitated network.

use std::collections::{BTreeSet, HashMap};

/// Node identifier. Callers relabel string node names to integers
/// before handing a network to this crate.
pub type NodeId = usize;

/// Canonical unordered node pair identifying an undirected edge.
///
/// The constructor sorts its endpoints, so `EdgeKey::new(u, v)` and
/// `EdgeKey::new(v, u)` address the same map entry and a traversal in
/// either direction counts against the same load.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeKey(NodeId, NodeId);

impl EdgeKey {
    pub fn new(u: NodeId, v: NodeId) -> Self {
        if u <= v {
            EdgeKey(u, v)
        } else {
            EdgeKey(v, u)
        }
    }

    /// Endpoints in canonical (ascending) order.
    pub fn endpoints(&self) -> (NodeId, NodeId) {
        (self.0, self.1)
    }
}

/// Per-edge attributes.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeAttrs {
    /// Travel cost of traversing the edge (time, length, or weight —
    /// one scalar, semantics fixed per experiment). Strictly positive.
    pub cost: f64,

    /// Load the edge carries without congestion. Non-negative.
    pub capacity: f64,
}

/// Undirected network with a cost and a capacity on every edge.
///
/// Only edge lookup is needed by the optimizers; there is no adjacency
/// structure here. Path *enumeration* happens outside this crate.
#[derive(Debug, Clone, Default)]
pub struct Network {
    nodes: BTreeSet<NodeId>,
    edges: HashMap<EdgeKey, EdgeAttrs>,
}

impl Network {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an undirected edge with the given cost and capacity.
    ///
    /// Rejects self-loops, duplicate edges, non-positive or non-finite
    /// cost, and negative or non-finite capacity. Zero-cost edges are
    /// rejected because they degenerate path comparisons.
    pub fn add_edge(
        &mut self,
        u: NodeId,
        v: NodeId,
        cost: f64,
        capacity: f64,
    ) -> Result<(), String> {
        if u == v {
            return Err(format!("self-loop edge at node {u}"));
        }
        if !cost.is_finite() || cost <= 0.0 {
            return Err(format!("edge ({u}, {v}): cost must be finite and > 0, got {cost}"));
        }
        if !capacity.is_finite() || capacity < 0.0 {
            return Err(format!(
                "edge ({u}, {v}): capacity must be finite and >= 0, got {capacity}"
            ));
        }
        let key = EdgeKey::new(u, v);
        if self.edges.contains_key(&key) {
            return Err(format!("duplicate edge ({u}, {v})"));
        }
        self.nodes.insert(u);
        self.nodes.insert(v);
        self.edges.insert(key, EdgeAttrs { cost, capacity });
        Ok(())
    }

    /// Looks up an edge in either direction.
    pub fn edge(&self, u: NodeId, v: NodeId) -> Option<&EdgeAttrs> {
        self.edges.get(&EdgeKey::new(u, v))
    }

    pub fn attrs(&self, key: EdgeKey) -> Option<&EdgeAttrs> {
        self.edges.get(&key)
    }

    pub fn contains_node(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Iterates over all edges with their attributes.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeKey, &EdgeAttrs)> {
        self.edges.iter().map(|(k, a)| (*k, a))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_edge_key_canonical() {
        assert_eq!(EdgeKey::new(3, 1), EdgeKey::new(1, 3));
        assert_eq!(EdgeKey::new(1, 3).endpoints(), (1, 3));
        assert_eq!(EdgeKey::new(3, 1).endpoints(), (1, 3));
    }

    #[test]
    fn test_add_and_lookup_both_directions() {
        let mut net = Network::new();
        net.add_edge(0, 1, 5.0, 100.0).unwrap();

        let fwd = net.edge(0, 1).unwrap();
        let rev = net.edge(1, 0).unwrap();
        assert_eq!(fwd.cost, 5.0);
        assert_eq!(rev.capacity, 100.0);
        assert_eq!(net.node_count(), 2);
        assert_eq!(net.edge_count(), 1);
    }

    #[test]
    fn test_rejects_self_loop() {
        let mut net = Network::new();
        assert!(net.add_edge(2, 2, 1.0, 1.0).is_err());
    }

    #[test]
    fn test_rejects_bad_attributes() {
        let mut net = Network::new();
        assert!(net.add_edge(0, 1, 0.0, 1.0).is_err());
        assert!(net.add_edge(0, 1, -1.0, 1.0).is_err());
        assert!(net.add_edge(0, 1, f64::NAN, 1.0).is_err());
        assert!(net.add_edge(0, 1, 1.0, -1.0).is_err());
        assert!(net.add_edge(0, 1, 1.0, f64::INFINITY).is_err());
        // zero capacity is allowed: every traversal is congestion
        assert!(net.add_edge(0, 1, 1.0, 0.0).is_ok());
    }

    #[test]
    fn test_rejects_duplicate_edge() {
        let mut net = Network::new();
        net.add_edge(0, 1, 1.0, 1.0).unwrap();
        assert!(net.add_edge(1, 0, 2.0, 2.0).is_err());
    }
}
