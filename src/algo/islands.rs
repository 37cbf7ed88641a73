//! Island partitioning adapter
//!
//! Runs island detection over the dense view and maps node ids back to
//! entities. The partition is rebuilt wholesale after every update cycle.

use super::build_view;
use crate::graph::{CoocStore, Entity};
use coocgraph_algorithms::{find_islands, GraphView, IslandError};
use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, error};

/// A connected component of the co-occurrence graph
pub type Island = Vec<Entity>;

/// Islands (largest first) plus the entity -> island index
#[derive(Debug, Clone, Default, Serialize)]
pub struct IslandPartition {
    islands: Vec<Island>,
    /// Entity -> position in `islands`
    index: IndexMap<Entity, usize>,
}

impl IslandPartition {
    pub fn islands(&self) -> &[Island] {
        &self.islands
    }

    pub fn index(&self) -> &IndexMap<Entity, usize> {
        &self.index
    }

    pub fn island_count(&self) -> usize {
        self.islands.len()
    }

    /// Size of the largest island, 0 if there are none
    pub fn largest_island_size(&self) -> usize {
        self.islands.first().map(|i| i.len()).unwrap_or(0)
    }

    /// Whether both entities are indexed and share an island
    pub fn same_island(&self, a: &Entity, b: &Entity) -> bool {
        match (self.index.get(a), self.index.get(b)) {
            (Some(x), Some(y)) => x == y,
            _ => false,
        }
    }

    /// Rebuild the entity index from the island list, replacing any prior index
    fn build_index(islands: &[Island]) -> IndexMap<Entity, usize> {
        let mut index = IndexMap::new();
        for (pos, island) in islands.iter().enumerate() {
            for entity in island {
                index.insert(entity.clone(), pos);
            }
        }
        index
    }
}

/// Partition the store's graph into islands
pub fn partition(store: &CoocStore) -> Result<IslandPartition, IslandError> {
    partition_view(store, &build_view(store))
}

/// Partition using a view already built from `store`
pub fn partition_view(store: &CoocStore, view: &GraphView) -> Result<IslandPartition, IslandError> {
    let result = find_islands(view).map_err(|e| {
        error!("island partitioning failed: {}", e);
        e
    })?;
    debug!(
        "partition: islands={}, largest_island={}",
        result.islands.len(),
        result.largest()
    );

    let islands: Vec<Island> = result
        .islands
        .into_iter()
        .map(|members| {
            members
                .into_iter()
                .filter_map(|id| store.entity_at(id as usize).cloned())
                .collect()
        })
        .collect();

    let index = IslandPartition::build_index(&islands);
    Ok(IslandPartition { islands, index })
}
