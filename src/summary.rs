//! Read-only reports derived from correlation state

use crate::algo::{ChainLength, Island};
use crate::graph::window::format_secs;
use crate::graph::Entity;
use indexmap::{IndexMap, IndexSet};
use serde::Serialize;

/// Covered time span
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimesSummary {
    pub earliest_after_secs: i64,
    pub earliest_after_date: String,
    pub latest_before_secs: i64,
    pub latest_before_date: String,
    pub interval_covered_secs: i64,
    pub interval_covered_hrs: f64,
}

impl TimesSummary {
    pub fn new(earliest_after_secs: i64, latest_before_secs: i64) -> Self {
        let interval_covered_secs = latest_before_secs.saturating_sub(earliest_after_secs);
        Self {
            earliest_after_secs,
            earliest_after_date: format_secs(earliest_after_secs),
            latest_before_secs,
            latest_before_date: format_secs(latest_before_secs),
            interval_covered_secs,
            interval_covered_hrs: interval_covered_secs as f64 / 3600.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CountsSummary {
    /// Entities with a mention count
    pub known_entities: usize,
    pub all_islands: usize,
    pub largest_island_size: usize,
}

/// Headline statistics returned after every update cycle
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Summary {
    pub ontology: String,
    pub times: TimesSummary,
    pub counts: CountsSummary,
}

/// Everything, for inspection and debugging
#[derive(Debug, Clone, Serialize)]
pub struct FullDump {
    #[serde(flatten)]
    pub summary: Summary,
    pub known_entities: IndexMap<Entity, u64>,
    pub all_coocs: IndexMap<Entity, IndexSet<Entity>>,
    pub all_islands: Vec<Island>,
    /// Entity -> position in `all_islands`
    pub all_islands_by_entity: IndexMap<Entity, usize>,
}

/// Result of a chain query, echoing its inputs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainReport {
    pub entity1: Entity,
    pub entity2: Entity,
    pub chain: Vec<Entity>,
}

/// Result of a layering query, echoing its input
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainLengthsReport {
    pub root_entity: Entity,
    pub chain_lengths: Vec<ChainLength>,
}
