//! Coocgraph
//!
//! Builds an undirected co-occurrence graph of entities from time-windowed
//! search facets, partitions it into islands (connected components), and
//! answers chain and distance-layer queries.
//!
//! # Architecture
//!
//! - `graph`: entities, mention counts, adjacency, time window coverage
//! - `algo`: adapter onto `coocgraph-algorithms` (islands, chains, layers)
//! - `search`: the faceted search collaborator and response extraction
//! - `state`: all process-lifetime data in one owned value
//! - `correlator`: update pipeline and query surface
//! - `http`: JSON API over the correlator
//!
//! ## Example Usage
//!
//! ```rust
//! use coocgraph::graph::{CoocStore, Entity};
//! use indexmap::IndexMap;
//!
//! let mut store = CoocStore::new();
//!
//! let mut counts = IndexMap::new();
//! counts.insert(Entity::new("people", "Ada"), 3);
//!
//! let mut coocs = IndexMap::new();
//! coocs.insert(Entity::new("people", "Ada"), vec![Entity::new("people", "Bob")]);
//!
//! store.merge_facets(&counts, &coocs);
//!
//! let islands = coocgraph::algo::partition(&store).unwrap();
//! assert_eq!(islands.largest_island_size(), 2);
//! ```

#![allow(missing_docs)]
#![warn(clippy::all)]

pub mod algo;
pub mod config;
pub mod correlator;
pub mod graph;
pub mod http;
pub mod search;
pub mod state;
pub mod summary;

// Re-export main types for convenience
pub use graph::{CoocStore, Entity, MergeStats, TimeWindow, TimeWindowTracker};

pub use algo::{ChainLength, Island, IslandPartition};

pub use config::{ConfigError, CorrelatorConfig, SearchConfig};

pub use correlator::{Correlator, CorrelatorError, CorrelatorResult};

pub use search::{
    SapiClient, SearchClient, SearchError, SearchParams, SearchResponse, SearchResult,
};

pub use state::CorrelationState;

pub use summary::{ChainLengthsReport, ChainReport, FullDump, Summary};

pub use http::{router, HttpServer};

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get version string
pub fn version() -> &'static str {
    VERSION
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        let ver = version();
        assert!(!ver.is_empty());
        assert_eq!(ver, "0.3.0");
    }
}
