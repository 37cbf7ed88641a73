//! Update pipeline and query surface
//!
//! One cycle: pick a window, search it once, search once more per mentioned
//! entity (concurrently, capped), then merge everything and recompute islands
//! under a single write lock. Cycles are serialized; queries take a read lock
//! and see either the pre- or post-cycle state.

use crate::algo::{Island, IslandError};
use crate::config::CorrelatorConfig;
use crate::graph::window::now_secs;
use crate::graph::{Entity, TimeWindow, TimeWindowTracker};
use crate::search::{co_entities, entity_counts, SearchClient, SearchError, SearchParams};
use crate::state::CorrelationState;
use crate::summary::{ChainLengthsReport, ChainReport, FullDump, Summary};
use futures::stream::{self, StreamExt};
use indexmap::IndexMap;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, error, info, warn};

/// Update cycle errors
#[derive(Error, Debug)]
pub enum CorrelatorError {
    #[error("search failed: {0}")]
    Search(#[from] SearchError),

    #[error("island partitioning failed: {0}")]
    Island(#[from] IslandError),

    #[error("no valid window of {interval_secs} seconds before the covered range")]
    InvalidWindow { interval_secs: i64 },
}

pub type CorrelatorResult<T> = Result<T, CorrelatorError>;

/// Facets gathered for one window, ready to merge
struct Fetched {
    entity_counts: IndexMap<Entity, u64>,
    co_entities: IndexMap<Entity, Vec<Entity>>,
}

/// Owns correlation state and drives update cycles against a search client
pub struct Correlator {
    config: CorrelatorConfig,
    client: Arc<dyn SearchClient>,
    state: Arc<RwLock<CorrelationState>>,
    /// Serializes update cycles
    cycle_lock: Mutex<()>,
}

impl Correlator {
    pub fn new(config: CorrelatorConfig, client: Arc<dyn SearchClient>) -> Self {
        Self {
            config,
            client,
            state: Arc::new(RwLock::new(CorrelationState::new())),
            cycle_lock: Mutex::new(()),
        }
    }

    pub fn config(&self) -> &CorrelatorConfig {
        &self.config
    }

    /// Extend coverage forward to now
    pub async fn update_to_latest(&self) -> CorrelatorResult<Summary> {
        self.update_to_latest_at(now_secs()).await
    }

    /// Extend coverage forward to `now_secs`
    pub async fn update_to_latest_at(&self, now_secs: i64) -> CorrelatorResult<Summary> {
        self.run_cycle(|tracker| Ok(tracker.next_latest_window(now_secs)))
            .await
    }

    /// Extend coverage backward by `interval_secs`.
    ///
    /// Fails with [`CorrelatorError::InvalidWindow`] if the interval is not
    /// positive or reaches outside the calendar range; state is untouched.
    pub async fn update_earlier_by(&self, interval_secs: i64) -> CorrelatorResult<Summary> {
        self.update_earlier_by_at(interval_secs, now_secs()).await
    }

    pub async fn update_earlier_by_at(
        &self,
        interval_secs: i64,
        now_secs: i64,
    ) -> CorrelatorResult<Summary> {
        self.run_cycle(|tracker| {
            tracker
                .next_earlier_window(interval_secs, now_secs)
                .ok_or(CorrelatorError::InvalidWindow { interval_secs })
        })
        .await
    }

    async fn run_cycle<F>(&self, select: F) -> CorrelatorResult<Summary>
    where
        F: FnOnce(&TimeWindowTracker) -> CorrelatorResult<TimeWindow>,
    {
        let _cycle = self.cycle_lock.lock().await;

        let window = select(self.state.read().await.window()).map_err(|e| {
            warn!("update cycle rejected: {}", e);
            e
        })?;
        info!(
            "update cycle: after_secs={}, before_secs={}",
            window.after_secs, window.before_secs
        );

        let fetched = self.fetch_window(window).await?;

        let mut state = self.state.write().await;
        let stats = state
            .apply_cycle(window, &fetched.entity_counts, &fetched.co_entities)
            .map_err(|e| {
                error!("update cycle aborted: {}", e);
                e
            })?;
        let summary = state.summary(&self.config.ontology);

        info!(
            "update cycle done: new_entities={}, new_edges={}, known_entities={}, \
             graph_entities={}, graph_edges={}, islands={}, largest_island={}",
            stats.new_entities,
            stats.new_edges,
            summary.counts.known_entities,
            state.store().entity_count(),
            state.store().edge_count(),
            summary.counts.all_islands,
            summary.counts.largest_island_size
        );
        Ok(summary)
    }

    /// Root search for the window, then one constrained search per mentioned entity
    async fn fetch_window(&self, window: TimeWindow) -> CorrelatorResult<Fetched> {
        let ontology = self.config.ontology.as_str();
        let root_params = SearchParams::window(window.after_secs, window.before_secs, ontology);

        let root = self.client.search(&root_params).await.map_err(|e| {
            warn!("window search failed: {}", e);
            e
        })?;
        let entity_counts = entity_counts(&root, ontology);
        info!(
            "window search: num_results={:?}, entities={}",
            root.payload.index_count(),
            entity_counts.len()
        );

        // `buffered` keeps request order so merges are deterministic
        let responses: Vec<_> = stream::iter(entity_counts.keys().cloned())
            .map(|entity| {
                let client = Arc::clone(&self.client);
                let params = root_params.clone().constrained_to(entity);
                async move { client.search(&params).await }
            })
            .buffered(self.config.max_concurrent_fetches.max(1))
            .collect()
            .await;

        let mut co = IndexMap::with_capacity(responses.len());
        for response in responses {
            let response = response.map_err(|e| {
                warn!("entity search failed: {}", e);
                e
            })?;
            if let Some((target, partners)) = co_entities(&response, ontology) {
                debug!("entity search: target={}, partners={}", target, partners.len());
                co.insert(target, partners);
            }
        }

        Ok(Fetched {
            entity_counts,
            co_entities: co,
        })
    }

    pub async fn chain_between(&self, entity1: &Entity, entity2: &Entity) -> ChainReport {
        self.state.read().await.chain_between(entity1, entity2)
    }

    pub async fn chain_lengths_from(&self, root: &Entity) -> ChainLengthsReport {
        self.state.read().await.chain_lengths_from(root)
    }

    /// Islands, largest first
    pub async fn all_islands(&self) -> Vec<Island> {
        self.state.read().await.islands().islands().to_vec()
    }

    pub async fn summary(&self) -> Summary {
        self.state.read().await.summary(&self.config.ontology)
    }

    pub async fn full_dump(&self) -> FullDump {
        self.state.read().await.dump(&self.config.ontology)
    }
}
