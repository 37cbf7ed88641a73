pub mod common;
pub mod community;
pub mod pathfinding;

pub use common::{GraphView, NodeId};
pub use community::{find_islands, IslandError, IslandResult};
pub use pathfinding::{bfs_layers, find_chain, Layer, PathResult};
