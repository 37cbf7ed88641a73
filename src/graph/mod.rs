//! Co-occurrence graph data model
//!
//! - Entities identified by `<category>:<name>` strings
//! - Cumulative mention counts per entity
//! - Undirected, unweighted adjacency that only ever grows
//! - Time window coverage bookkeeping

pub mod store;
pub mod types;
pub mod window;

// Re-export main types
pub use store::{CoocStore, MergeStats};
pub use types::Entity;
pub use window::{TimeWindow, TimeWindowTracker};
