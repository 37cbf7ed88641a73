//! Island (connected component) detection
//!
//! Islands are found by repeatedly merging overlapping candidate sets rather
//! than with union-find: the resulting island order feeds downstream tie-breaks
//! and must stay stable for a given input order.

use super::common::{GraphView, NodeId};
use indexmap::IndexSet;
use std::collections::HashMap;
use thiserror::Error;

/// Errors raised by island partitioning
#[derive(Error, Debug, PartialEq)]
pub enum IslandError {
    /// More than one candidate set survived the merge loop
    #[error("{0} candidate islands left unmerged, expected 0 or 1")]
    UnmergedCandidates(usize),
}

/// Result of island partitioning
#[derive(Debug, Clone)]
pub struct IslandResult {
    /// Islands, largest first. Members keep their merge order.
    pub islands: Vec<Vec<NodeId>>,
    /// Map of NodeId -> position in `islands`
    pub node_island: HashMap<NodeId, usize>,
}

impl IslandResult {
    /// Size of the largest island, or 0 when there are none
    pub fn largest(&self) -> usize {
        self.islands.first().map(|i| i.len()).unwrap_or(0)
    }
}

/// Partition the view into islands.
///
/// Every node seeds one candidate set holding itself and its neighbors. The
/// last candidate is popped and merged into the first remaining candidate it
/// overlaps with; a candidate that overlaps nothing is a finished island.
/// Worst case O(n²) set scans.
pub fn find_islands(view: &GraphView) -> Result<IslandResult, IslandError> {
    let mut candidates: Vec<IndexSet<usize>> = (0..view.node_count)
        .map(|idx| {
            let mut set = IndexSet::with_capacity(view.degree(idx) + 1);
            set.insert(idx);
            set.extend(view.neighbors(idx).iter().copied());
            set
        })
        .collect();

    let mut finished: Vec<IndexSet<usize>> = Vec::new();

    while candidates.len() > 1 {
        let Some(candidate) = candidates.pop() else { break };

        let target = candidates
            .iter()
            .position(|other| candidate.iter().any(|member| other.contains(member)));

        match target {
            Some(pos) => candidates[pos].extend(candidate),
            None => finished.push(candidate),
        }
    }

    if candidates.len() > 1 {
        return Err(IslandError::UnmergedCandidates(candidates.len()));
    }
    finished.extend(candidates.pop());

    // Stable: equal-sized islands keep the order they were finished in
    finished.sort_by(|a, b| b.len().cmp(&a.len()));

    let mut islands = Vec::with_capacity(finished.len());
    let mut node_island = HashMap::with_capacity(view.node_count);

    for (island_idx, members) in finished.into_iter().enumerate() {
        let ids: Vec<NodeId> = members.into_iter().map(|idx| view.index_to_node[idx]).collect();
        for &id in &ids {
            node_island.insert(id, island_idx);
        }
        islands.push(ids);
    }

    Ok(IslandResult { islands, node_island })
}
