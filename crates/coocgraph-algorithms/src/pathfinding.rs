//! Chain search and breadth layering
//!
//! `find_chain` is a bounded depth-first search that returns a connecting
//! chain which is short but not guaranteed shortest. `bfs_layers` is an exact
//! breadth-first layering.

use super::common::{GraphView, NodeId};

/// Result of a chain search
#[derive(Debug, Clone)]
pub struct PathResult {
    pub source: NodeId,
    pub target: NodeId,
    /// Nodes from source to target inclusive
    pub path: Vec<NodeId>,
}

impl PathResult {
    /// Number of edges in the path
    pub fn hops(&self) -> usize {
        self.path.len().saturating_sub(1)
    }
}

/// All nodes at one hop distance from the root
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub distance: usize,
    pub nodes: Vec<NodeId>,
}

/// One level of the depth-first search: the node at this depth and the
/// position of the next neighbor to try.
struct Frame {
    node: usize,
    next: usize,
}

/// Outcome of stepping onto a node
enum Visit {
    /// The target neighbors this node, chain recorded
    Hit,
    /// Extending from this node cannot beat the best chain
    Pruned,
    /// Explore this node's neighbors
    Descend,
}

/// Depth-first chain search with two pruning rules.
///
/// On entering a node (path length `p`, best chain length `b`):
/// 1. if `p >= b - 1` the node is abandoned;
/// 2. if the target is a neighbor, `path + [target]` becomes the best chain and
///    the node's other neighbors are not explored;
/// 3. if `p >= b - 2` the node is abandoned;
/// 4. otherwise neighbors not already on the path are explored in order.
///
/// Because a direct hit stops exploration at that level, the returned chain
/// can be longer than the true shortest path.
pub fn find_chain(view: &GraphView, source: NodeId, target: NodeId) -> Option<PathResult> {
    let source_idx = *view.node_to_index.get(&source)?;
    let target_idx = *view.node_to_index.get(&target)?;
    if source_idx == target_idx {
        return None;
    }

    let mut best: Option<Vec<usize>> = None;
    let mut path: Vec<usize> = Vec::new();
    let mut on_path = vec![false; view.node_count];
    let mut stack: Vec<Frame> = Vec::new();

    let enter = |node: usize,
                 path: &mut Vec<usize>,
                 on_path: &mut Vec<bool>,
                 best: &mut Option<Vec<usize>>|
     -> Visit {
        path.push(node);
        on_path[node] = true;

        if let Some(b) = best.as_ref() {
            if path.len() + 1 >= b.len() {
                return Visit::Pruned;
            }
        }

        if view.neighbors(node).contains(&target_idx) {
            let mut chain = path.clone();
            chain.push(target_idx);
            *best = Some(chain);
            return Visit::Hit;
        }

        if let Some(b) = best.as_ref() {
            if path.len() + 2 >= b.len() {
                return Visit::Pruned;
            }
        }

        Visit::Descend
    };

    match enter(source_idx, &mut path, &mut on_path, &mut best) {
        Visit::Descend => stack.push(Frame { node: source_idx, next: 0 }),
        Visit::Hit | Visit::Pruned => {}
    }

    while let Some(frame) = stack.last_mut() {
        let neighbors = view.neighbors(frame.node);

        let mut candidate = None;
        while frame.next < neighbors.len() {
            let n = neighbors[frame.next];
            frame.next += 1;
            if !on_path[n] {
                candidate = Some(n);
                break;
            }
        }

        match candidate {
            Some(n) => match enter(n, &mut path, &mut on_path, &mut best) {
                Visit::Descend => stack.push(Frame { node: n, next: 0 }),
                Visit::Hit | Visit::Pruned => {
                    if let Some(last) = path.pop() {
                        on_path[last] = false;
                    }
                }
            },
            None => {
                stack.pop();
                if let Some(last) = path.pop() {
                    on_path[last] = false;
                }
            }
        }
    }

    best.map(|chain| PathResult {
        source,
        target,
        path: chain.into_iter().map(|idx| view.index_to_node[idx]).collect(),
    })
}

/// Breadth-first layers from `root`.
///
/// Layer 0 is the root alone; each following layer holds the unseen neighbors
/// of the previous one, in discovery order. Returns an empty vector when the
/// root is not in the view.
pub fn bfs_layers(view: &GraphView, root: NodeId) -> Vec<Layer> {
    let Some(&root_idx) = view.node_to_index.get(&root) else {
        return Vec::new();
    };

    let mut seen = vec![false; view.node_count];
    seen[root_idx] = true;

    let mut layers = vec![Layer { distance: 0, nodes: vec![root] }];
    let mut frontier = vec![root_idx];

    while !frontier.is_empty() {
        let mut next = Vec::new();
        for &idx in &frontier {
            for &n in view.neighbors(idx) {
                if !seen[n] {
                    seen[n] = true;
                    next.push(n);
                }
            }
        }

        if !next.is_empty() {
            layers.push(Layer {
                distance: layers.len(),
                nodes: next.iter().map(|&idx| view.index_to_node[idx]).collect(),
            });
        }
        frontier = next;
    }

    layers
}
