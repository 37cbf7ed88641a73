//! In-memory co-occurrence storage
//!
//! Holds cumulative mention counts and the undirected, unweighted adjacency
//! relation between entities. Both grow monotonically; nothing is ever removed.

use super::types::Entity;
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;
use tracing::debug;

/// What a single merge changed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Entities that received their first adjacency entry
    pub new_entities: usize,
    /// Undirected edges that did not exist before
    pub new_edges: usize,
}

/// Mention counts and co-occurrence adjacency.
///
/// Both maps are insertion ordered: neighbor order is the order in which edges
/// were first recorded, which fixes the exploration order of chain search.
#[derive(Debug, Default, Clone, Serialize)]
pub struct CoocStore {
    /// Entity -> cumulative mention count
    mention_counts: IndexMap<Entity, u64>,
    /// Entity -> co-occurring entities (symmetric)
    adjacency: IndexMap<Entity, IndexSet<Entity>>,
}

impl CoocStore {
    /// Create a new empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one window of facets into the store.
    ///
    /// Every entity in `entity_counts` has its count delta added. Every entity in
    /// `co_entities` gets an adjacency entry, and each listed partner gets an
    /// entry plus a symmetric edge. Partners may enter the adjacency relation
    /// before their own mention count is known.
    pub fn merge_facets(
        &mut self,
        entity_counts: &IndexMap<Entity, u64>,
        co_entities: &IndexMap<Entity, Vec<Entity>>,
    ) -> MergeStats {
        let mut stats = MergeStats::default();

        for (entity, delta) in entity_counts {
            *self.mention_counts.entry(entity.clone()).or_insert(0) += delta;
        }

        for (entity, partners) in co_entities {
            if self.ensure_entity(entity) {
                stats.new_entities += 1;
            }
            for partner in partners {
                if partner == entity {
                    continue;
                }
                if self.ensure_entity(partner) {
                    stats.new_entities += 1;
                }
                if self.add_edge(entity, partner) {
                    stats.new_edges += 1;
                }
            }
        }

        debug!(
            "merge_facets: new_entities={}, new_edges={}",
            stats.new_entities, stats.new_edges
        );
        stats
    }

    /// Returns true if the entity was not in the adjacency relation before
    fn ensure_entity(&mut self, entity: &Entity) -> bool {
        if self.adjacency.contains_key(entity) {
            return false;
        }
        self.adjacency.insert(entity.clone(), IndexSet::new());
        true
    }

    /// Returns true if the edge is new. Both endpoints must already exist.
    fn add_edge(&mut self, a: &Entity, b: &Entity) -> bool {
        let added = self
            .adjacency
            .get_mut(b)
            .map(|set| set.insert(a.clone()))
            .unwrap_or(false);
        if let Some(set) = self.adjacency.get_mut(a) {
            set.insert(b.clone());
        }
        added
    }

    /// Whether the entity has a mention count (has been seen as a root)
    pub fn is_known(&self, entity: &Entity) -> bool {
        self.mention_counts.contains_key(entity)
    }

    pub fn mention_counts(&self) -> &IndexMap<Entity, u64> {
        &self.mention_counts
    }

    pub fn adjacency(&self) -> &IndexMap<Entity, IndexSet<Entity>> {
        &self.adjacency
    }

    /// Number of entities with a mention count
    pub fn known_count(&self) -> usize {
        self.mention_counts.len()
    }

    /// Number of entities in the adjacency relation
    pub fn entity_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of undirected edges
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(|set| set.len()).sum::<usize>() / 2
    }

    /// Dense index of an entity in the adjacency relation
    pub fn index_of(&self, entity: &Entity) -> Option<usize> {
        self.adjacency.get_index_of(entity)
    }

    /// Entity at a dense adjacency index
    pub fn entity_at(&self, idx: usize) -> Option<&Entity> {
        self.adjacency.get_index(idx).map(|(entity, _)| entity)
    }
}
