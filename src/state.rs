//! Correlation state
//!
//! All process-lifetime data in one owned value: mention counts and adjacency,
//! window coverage, and the derived view and islands. Only the pipeline
//! mutates it, and only through [`CorrelationState::apply_cycle`].

use crate::algo::{self, GraphView, IslandError, IslandPartition};
use crate::graph::{CoocStore, Entity, MergeStats, TimeWindow, TimeWindowTracker};
use crate::summary::{
    ChainLengthsReport, ChainReport, CountsSummary, FullDump, Summary, TimesSummary,
};
use indexmap::IndexMap;
use tracing::debug;

#[derive(Debug)]
pub struct CorrelationState {
    store: CoocStore,
    window: TimeWindowTracker,
    /// Dense projection of `store`, rebuilt every cycle
    view: GraphView,
    islands: IslandPartition,
}

impl Default for CorrelationState {
    fn default() -> Self {
        Self::new()
    }
}

impl CorrelationState {
    pub fn new() -> Self {
        let store = CoocStore::new();
        let view = algo::build_view(&store);
        Self {
            store,
            window: TimeWindowTracker::new(),
            view,
            islands: IslandPartition::default(),
        }
    }

    pub fn store(&self) -> &CoocStore {
        &self.store
    }

    pub fn window(&self) -> &TimeWindowTracker {
        &self.window
    }

    pub fn islands(&self) -> &IslandPartition {
        &self.islands
    }

    /// Merge one fetched window and recompute islands.
    ///
    /// The merge is staged on a copy: if island partitioning fails nothing
    /// changes, including window coverage.
    pub fn apply_cycle(
        &mut self,
        window: TimeWindow,
        entity_counts: &IndexMap<Entity, u64>,
        co_entities: &IndexMap<Entity, Vec<Entity>>,
    ) -> Result<MergeStats, IslandError> {
        let mut store = self.store.clone();
        let stats = store.merge_facets(entity_counts, co_entities);

        let view = algo::build_view(&store);
        debug!(
            "view rebuilt: nodes={}, edges={}",
            view.node_count,
            view.edge_count()
        );
        let islands = algo::partition_view(&store, &view)?;

        self.store = store;
        self.view = view;
        self.islands = islands;
        self.window.record_window(window);
        Ok(stats)
    }

    pub fn chain_between(&self, entity1: &Entity, entity2: &Entity) -> ChainReport {
        ChainReport {
            entity1: entity1.clone(),
            entity2: entity2.clone(),
            chain: algo::chain_between(&self.store, &self.view, &self.islands, entity1, entity2),
        }
    }

    pub fn chain_lengths_from(&self, root: &Entity) -> ChainLengthsReport {
        ChainLengthsReport {
            root_entity: root.clone(),
            chain_lengths: algo::chain_lengths_from(&self.store, &self.view, root),
        }
    }

    pub fn summary(&self, ontology: &str) -> Summary {
        Summary {
            ontology: ontology.to_string(),
            times: TimesSummary::new(
                self.window.earliest_after_secs(),
                self.window.latest_before_secs(),
            ),
            counts: CountsSummary {
                known_entities: self.store.known_count(),
                all_islands: self.islands.island_count(),
                largest_island_size: self.islands.largest_island_size(),
            },
        }
    }

    pub fn dump(&self, ontology: &str) -> FullDump {
        FullDump {
            summary: self.summary(ontology),
            known_entities: self.store.mention_counts().clone(),
            all_coocs: self.store.adjacency().clone(),
            all_islands: self.islands.islands().to_vec(),
            all_islands_by_entity: self.islands.index().clone(),
        }
    }
}
