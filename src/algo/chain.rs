//! Chain and distance-layer queries over entities
//!
//! Unknown entities are not errors: they yield empty results and a debug log.

use super::islands::IslandPartition;
use crate::graph::{CoocStore, Entity};
use coocgraph_algorithms::{bfs_layers, find_chain, GraphView};
use serde::Serialize;
use tracing::debug;

/// Entities at one hop distance from a root
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChainLength {
    pub links: usize,
    pub entities: Vec<Entity>,
}

/// Approximate shortest chain of co-occurrence edges from `entity1` to `entity2`.
///
/// Empty when the entities are equal, either is unknown, or they sit on
/// different islands.
pub fn chain_between(
    store: &CoocStore,
    view: &GraphView,
    islands: &IslandPartition,
    entity1: &Entity,
    entity2: &Entity,
) -> Vec<Entity> {
    if entity1 == entity2 {
        debug!("chain_between: equal entities. entity1={}", entity1);
        return Vec::new();
    }
    if !store.is_known(entity1) {
        debug!("chain_between: unknown entity. entity1={}", entity1);
        return Vec::new();
    }
    if !store.is_known(entity2) {
        debug!("chain_between: unknown entity. entity2={}", entity2);
        return Vec::new();
    }
    if !islands.same_island(entity1, entity2) {
        debug!(
            "chain_between: entities not on same island. entity1={}, entity2={}",
            entity1, entity2
        );
        return Vec::new();
    }

    let (Some(source), Some(target)) = (store.index_of(entity1), store.index_of(entity2)) else {
        return Vec::new();
    };

    find_chain(view, source as u64, target as u64)
        .map(|result| {
            debug!(
                "chain_between: entity1={}, entity2={}, hops={}",
                entity1,
                entity2,
                result.hops()
            );
            result
                .path
                .into_iter()
                .filter_map(|id| store.entity_at(id as usize).cloned())
                .collect()
        })
        .unwrap_or_default()
}

/// Breadth-first layers of entities reachable from `root`.
///
/// Empty when the root is unknown. A known root with no co-occurrences yields
/// just layer 0.
pub fn chain_lengths_from(store: &CoocStore, view: &GraphView, root: &Entity) -> Vec<ChainLength> {
    if !store.is_known(root) {
        debug!("chain_lengths_from: unknown root entity={}", root);
        return Vec::new();
    }

    let Some(root_idx) = store.index_of(root) else {
        return vec![ChainLength { links: 0, entities: vec![root.clone()] }];
    };

    bfs_layers(view, root_idx as u64)
        .into_iter()
        .map(|layer| ChainLength {
            links: layer.distance,
            entities: layer
                .nodes
                .into_iter()
                .filter_map(|id| store.entity_at(id as usize).cloned())
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::{build_view, partition};
    use indexmap::IndexMap;

    fn e(s: &str) -> Entity {
        Entity::from(s)
    }

    /// Every edge endpoint gets a mention count so both ends are queryable
    fn store_with_edges(edges: &[(&str, &str)]) -> CoocStore {
        let mut store = CoocStore::new();
        for (a, b) in edges {
            let mut counts = IndexMap::new();
            counts.insert(e(a), 1);
            counts.insert(e(b), 1);
            let mut coocs = IndexMap::new();
            coocs.insert(e(a), vec![e(b)]);
            store.merge_facets(&counts, &coocs);
        }
        store
    }

    fn names(chain: &[Entity]) -> Vec<&str> {
        chain.iter().map(|e| e.as_str()).collect()
    }

    #[test]
    fn test_chain_scenario() {
        let store = store_with_edges(&[("A", "B"), ("B", "C"), ("D", "E")]);
        let view = build_view(&store);
        let islands = partition(&store).unwrap();

        let chain = chain_between(&store, &view, &islands, &e("A"), &e("C"));
        assert_eq!(names(&chain), vec!["A", "B", "C"]);
        assert!(chain_between(&store, &view, &islands, &e("A"), &e("D")).is_empty());
        assert!(chain_between(&store, &view, &islands, &e("A"), &e("A")).is_empty());
        assert!(chain_between(&store, &view, &islands, &e("A"), &e("Z")).is_empty());
    }

    #[test]
    fn test_chain_requires_known_entities() {
        // C only appears as a partner, never as a root
        let mut store = CoocStore::new();
        let mut counts = IndexMap::new();
        counts.insert(e("A"), 1);
        let mut coocs = IndexMap::new();
        coocs.insert(e("A"), vec![e("C")]);
        store.merge_facets(&counts, &coocs);

        let view = build_view(&store);
        let islands = partition(&store).unwrap();
        assert!(chain_between(&store, &view, &islands, &e("A"), &e("C")).is_empty());
    }

    #[test]
    fn test_chain_lengths_scenario() {
        let store = store_with_edges(&[("A", "B"), ("B", "C"), ("D", "E")]);
        let view = build_view(&store);

        let layers = chain_lengths_from(&store, &view, &e("A"));
        assert_eq!(
            layers,
            vec![
                ChainLength { links: 0, entities: vec![e("A")] },
                ChainLength { links: 1, entities: vec![e("B")] },
                ChainLength { links: 2, entities: vec![e("C")] },
            ]
        );

        assert!(chain_lengths_from(&store, &view, &e("Z")).is_empty());
    }

    #[test]
    fn test_chain_lengths_for_root_without_edges() {
        let mut store = CoocStore::new();
        let mut counts = IndexMap::new();
        counts.insert(e("A"), 1);
        store.merge_facets(&counts, &IndexMap::new());

        let view = build_view(&store);
        let layers = chain_lengths_from(&store, &view, &e("A"));
        assert_eq!(layers, vec![ChainLength { links: 0, entities: vec![e("A")] }]);
    }
}
