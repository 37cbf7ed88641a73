//! Scripted search client shared by integration tests
#![allow(dead_code)]

use async_trait::async_trait;
use coocgraph::search::{Facet, FacetElement, SearchPayload};
use coocgraph::{SearchClient, SearchError, SearchParams, SearchResponse, SearchResult};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// What the search service returns during one update cycle
#[derive(Default, Clone)]
pub struct CycleScript {
    /// Names mentioned in the window, with counts
    pub mentions: Vec<(&'static str, u64)>,
    /// Name -> co-mentioned names (the name itself may be included)
    pub coocs: HashMap<&'static str, Vec<&'static str>>,
    /// Names whose constrained search returns a payload with no facets
    pub missing_facets: Vec<&'static str>,
    /// Fail the constrained search for this name
    pub fail_entity: Option<&'static str>,
}

impl CycleScript {
    pub fn new(
        mentions: &[(&'static str, u64)],
        coocs: &[(&'static str, &[&'static str])],
    ) -> Self {
        Self {
            mentions: mentions.to_vec(),
            coocs: coocs.iter().map(|(k, v)| (*k, v.to_vec())).collect(),
            ..Self::default()
        }
    }
}

/// Replays one script per update cycle; the root search advances the cycle
pub struct ScriptedClient {
    cycles: Vec<CycleScript>,
    current: Mutex<Option<usize>>,
    pub calls: AtomicUsize,
}

impl ScriptedClient {
    pub fn new(cycles: Vec<CycleScript>) -> Self {
        Self {
            cycles,
            current: Mutex::new(None),
            calls: AtomicUsize::new(0),
        }
    }
}

pub fn people_payload(elements: &[(&str, u64)]) -> SearchPayload {
    SearchPayload::with_facets(
        elements.len() as u64,
        vec![Facet {
            name: "people".to_string(),
            facet_elements: elements
                .iter()
                .map(|(n, c)| FacetElement { name: n.to_string(), count: *c })
                .collect(),
        }],
    )
}

#[async_trait]
impl SearchClient for ScriptedClient {
    async fn search(&self, params: &SearchParams) -> SearchResult<SearchResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);

        let mut current = self.current.lock().unwrap();
        let payload = match params.constraints.first() {
            None => {
                let next = (*current).map(|c| c + 1).unwrap_or(0);
                *current = Some(next);
                match self.cycles.get(next) {
                    Some(script) => people_payload(&script.mentions),
                    None => SearchPayload::default(),
                }
            }
            Some(entity) => {
                let script = (*current)
                    .and_then(|c| self.cycles.get(c))
                    .ok_or_else(|| SearchError::ApiError("no active cycle".to_string()))?;
                let name = entity.name();
                if script.fail_entity == Some(name) {
                    return Err(SearchError::NetworkError(format!("timeout for {}", name)));
                }
                if script.missing_facets.contains(&name) {
                    SearchPayload::default()
                } else {
                    let partners: Vec<(&str, u64)> = script
                        .coocs
                        .get(name)
                        .map(|names| names.iter().map(|n| (*n, 1)).collect())
                        .unwrap_or_default();
                    people_payload(&partners)
                }
            }
        };

        Ok(SearchResponse {
            params: params.clone(),
            payload,
        })
    }
}
