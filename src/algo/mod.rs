//! Graph algorithms module
//!
//! Algorithms are implemented in the `coocgraph-algorithms` crate over dense
//! integer views. This module provides the integration/adapter layer between
//! entities in the store and node ids in the view.

pub mod chain;
pub mod islands;

use crate::graph::CoocStore;
use coocgraph_algorithms::NodeId as AlgoNodeId;

pub use chain::{chain_between, chain_lengths_from, ChainLength};
pub use islands::{partition, partition_view, Island, IslandPartition};

// Re-export algorithms
pub use coocgraph_algorithms::{
    bfs_layers, find_chain, find_islands, GraphView, IslandError, Layer, PathResult,
};

/// Build a GraphView from the store.
///
/// Node ids are the entities' positions in the store's adjacency map, so
/// `store.entity_at(id as usize)` maps results back. Neighbor order is kept.
pub fn build_view(store: &CoocStore) -> GraphView {
    let adjacency = store.adjacency();

    let index_to_node: Vec<AlgoNodeId> = (0..adjacency.len() as AlgoNodeId).collect();

    let neighbors: Vec<Vec<usize>> = adjacency
        .values()
        .map(|partners| {
            partners
                .iter()
                .filter_map(|partner| store.index_of(partner))
                .collect()
        })
        .collect();

    GraphView::from_adjacency_list(index_to_node, neighbors)
}
