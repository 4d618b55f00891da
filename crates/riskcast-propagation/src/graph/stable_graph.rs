//! petgraph::StableGraph wrapper keyed by factor id.

use std::collections::HashMap;

use petgraph::stable_graph::{NodeIndex, StableGraph};
use petgraph::Directed;

/// A node in the risk graph.
#[derive(Debug, Clone)]
pub struct RiskNode {
    pub factor_id: String,
}

/// Edges point from parent (cause) to child (effect).
pub type RiskStableGraph = StableGraph<RiskNode, (), Directed>;

/// Wrapper providing id-indexed access to the risk graph.
pub struct IndexedGraph {
    pub graph: RiskStableGraph,
    /// Map from factor id → NodeIndex for O(1) lookup.
    pub node_index: HashMap<String, NodeIndex>,
}

impl IndexedGraph {
    pub fn new() -> Self {
        Self {
            graph: StableGraph::new(),
            node_index: HashMap::new(),
        }
    }

    /// Get or create the node for a factor.
    pub fn ensure_node(&mut self, factor_id: &str) -> NodeIndex {
        if let Some(&idx) = self.node_index.get(factor_id) {
            return idx;
        }
        let idx = self.graph.add_node(RiskNode {
            factor_id: factor_id.to_string(),
        });
        self.node_index.insert(factor_id.to_string(), idx);
        idx
    }

    pub fn get_node(&self, factor_id: &str) -> Option<NodeIndex> {
        self.node_index.get(factor_id).copied()
    }

    /// Factor id stored at a node.
    pub fn factor_id(&self, idx: NodeIndex) -> &str {
        self.graph
            .node_weight(idx)
            .map(|n| n.factor_id.as_str())
            .unwrap_or_default()
    }

    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }
}

impl Default for IndexedGraph {
    fn default() -> Self {
        Self::new()
    }
}
