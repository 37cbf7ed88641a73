//! Shared utilities for graph algorithms
//!
//! Provides a read-only, optimized view of the graph topology for algorithm execution.

use std::collections::HashMap;

/// Node Identifier type (u64)
pub type NodeId = u64;

/// A dense, integer-indexed view of an undirected graph in Compressed Sparse Row (CSR) format.
///
/// Every undirected edge is stored twice, once per endpoint. Neighbor order
/// within a row is preserved from the input and is significant: the chain
/// search explores candidates in this order.
#[derive(Debug)]
pub struct GraphView {
    /// Number of nodes
    pub node_count: usize,
    /// Mapping from dense index (0..N) back to NodeId
    pub index_to_node: Vec<NodeId>,
    /// Mapping from NodeId to dense index
    pub node_to_index: HashMap<NodeId, usize>,

    /// Offsets into `targets`. Size = node_count + 1
    pub offsets: Vec<usize>,
    /// Contiguous array of neighbor indices
    pub targets: Vec<usize>,
}

impl GraphView {
    /// Get the degree of a node (by index)
    pub fn degree(&self, idx: usize) -> usize {
        self.offsets[idx + 1] - self.offsets[idx]
    }

    /// Get neighbors of a node
    pub fn neighbors(&self, idx: usize) -> &[usize] {
        let start = self.offsets[idx];
        let end = self.offsets[idx + 1];
        &self.targets[start..end]
    }

    /// Total number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.targets.len() / 2
    }

    /// Build a view from per-node neighbor lists.
    ///
    /// `adjacency[i]` holds the dense indices adjacent to node `i`. The
    /// caller is responsible for symmetry.
    pub fn from_adjacency_list(index_to_node: Vec<NodeId>, adjacency: Vec<Vec<usize>>) -> Self {
        let node_count = index_to_node.len();
        let mut node_to_index = HashMap::with_capacity(node_count);
        for (idx, &node_id) in index_to_node.iter().enumerate() {
            node_to_index.insert(node_id, idx);
        }

        let mut offsets = Vec::with_capacity(node_count + 1);
        let mut targets = Vec::new();

        offsets.push(0);
        for neighbors in adjacency.into_iter().take(node_count) {
            targets.extend(neighbors);
            offsets.push(targets.len());
        }
        // Pad rows for nodes that had no adjacency entry
        while offsets.len() < node_count + 1 {
            offsets.push(targets.len());
        }

        GraphView {
            node_count,
            index_to_node,
            node_to_index,
            offsets,
            targets,
        }
    }

    /// Build a view from undirected edges over node ids `0..node_count`.
    /// Mostly useful for tests and benchmarks.
    pub fn from_edges(node_count: usize, edges: &[(NodeId, NodeId)]) -> Self {
        let mut adjacency = vec![Vec::new(); node_count];
        for &(u, v) in edges {
            let (u, v) = (u as usize, v as usize);
            if u == v || adjacency[u].contains(&v) {
                continue;
            }
            adjacency[u].push(v);
            adjacency[v].push(u);
        }
        Self::from_adjacency_list((0..node_count as NodeId).collect(), adjacency)
    }
}
