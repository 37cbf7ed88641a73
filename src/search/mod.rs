//! Search service collaborator
//!
//! The correlator only needs time-ranged faceted searches: one per window, and
//! one per mentioned entity constrained to that entity. Responses are loosely
//! shaped; any missing level means "no data" and is never an error.

pub mod client;

use crate::graph::Entity;
use async_trait::async_trait;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

pub use client::SapiClient;

/// Search errors
#[derive(Error, Debug)]
pub enum SearchError {
    /// Non-success status from the search service
    #[error("Search API error: {0}")]
    ApiError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Network error
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Serialization/Deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

pub type SearchResult<T> = Result<T, SearchError>;

/// Parameters of one search call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchParams {
    pub after_secs: i64,
    pub before_secs: i64,
    /// Facet category to count, e.g. `people`
    pub ontology: String,
    /// Restrict results to content mentioning these entities
    #[serde(default)]
    pub constraints: Vec<Entity>,
}

impl SearchParams {
    pub fn window(after_secs: i64, before_secs: i64, ontology: &str) -> Self {
        Self {
            after_secs,
            before_secs,
            ontology: ontology.to_string(),
            constraints: Vec::new(),
        }
    }

    pub fn constrained_to(mut self, entity: Entity) -> Self {
        self.constraints.push(entity);
        self
    }
}

/// One facet value and its number of matching documents
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FacetElement {
    pub name: String,
    pub count: u64,
}

/// Facet counts for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Facet {
    pub name: String,
    #[serde(default)]
    pub facet_elements: Vec<FacetElement>,
}

/// One result set of the raw search payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResultSet {
    pub index_count: Option<u64>,
    pub facets: Option<Vec<Facet>>,
}

/// Raw search payload; every level may be absent
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchPayload {
    pub results: Option<Vec<ResultSet>>,
}

impl SearchPayload {
    /// Payload with a single result set, mostly for tests and fakes
    pub fn with_facets(index_count: u64, facets: Vec<Facet>) -> Self {
        Self {
            results: Some(vec![ResultSet {
                index_count: Some(index_count),
                facets: Some(facets),
            }]),
        }
    }

    fn first_result(&self, caller: &str) -> Option<&ResultSet> {
        match self.results.as_deref() {
            None => {
                debug!("{}: no results", caller);
                None
            }
            Some([]) => {
                debug!("{}: no results[0]", caller);
                None
            }
            Some([first, ..]) => Some(first),
        }
    }

    fn facets(&self, caller: &str) -> Option<&[Facet]> {
        let first = self.first_result(caller)?;
        match first.facets.as_deref() {
            Some(facets) => Some(facets),
            None => {
                debug!("{}: no results[0].facets", caller);
                None
            }
        }
    }

    pub fn index_count(&self) -> Option<u64> {
        self.results.as_ref()?.first()?.index_count
    }
}

/// A payload echoed with the parameters that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub params: SearchParams,
    pub payload: SearchPayload,
}

/// Time-ranged faceted search
#[async_trait]
pub trait SearchClient: Send + Sync {
    async fn search(&self, params: &SearchParams) -> SearchResult<SearchResponse>;
}

/// Entities mentioned in a window with their counts, restricted to `ontology`.
///
/// Missing results or facets yield an empty map.
pub fn entity_counts(response: &SearchResponse, ontology: &str) -> IndexMap<Entity, u64> {
    let mut counts = IndexMap::new();
    let Some(facets) = response.payload.facets("entity_counts") else {
        return counts;
    };

    for facet in facets.iter().filter(|f| f.name == ontology) {
        for element in &facet.facet_elements {
            counts.insert(Entity::new(ontology, &element.name), element.count);
        }
    }
    counts
}

/// Co-mentioned entities for a constrained search, keyed by the echoed constraint.
///
/// Returns `None` when the response has no constraint or no facets; the entity
/// then contributes no adjacency this cycle. The constrained entity itself is
/// excluded from its partners.
pub fn co_entities(response: &SearchResponse, ontology: &str) -> Option<(Entity, Vec<Entity>)> {
    let Some(target) = response.params.constraints.first() else {
        debug!("co_entities: response has no constraint");
        return None;
    };
    let facets = response.payload.facets("co_entities")?;

    let partners = facets
        .iter()
        .filter(|f| f.name == ontology)
        .flat_map(|facet| facet.facet_elements.iter())
        .map(|element| Entity::new(ontology, &element.name))
        .filter(|entity| entity != target)
        .collect();

    Some((target.clone(), partners))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn facet(name: &str, elements: &[(&str, u64)]) -> Facet {
        Facet {
            name: name.to_string(),
            facet_elements: elements
                .iter()
                .map(|(n, c)| FacetElement { name: n.to_string(), count: *c })
                .collect(),
        }
    }

    fn response(params: SearchParams, payload: SearchPayload) -> SearchResponse {
        SearchResponse { params, payload }
    }

    #[test]
    fn test_entity_counts_filters_ontology() {
        let resp = response(
            SearchParams::window(0, 10, "people"),
            SearchPayload::with_facets(
                12,
                vec![
                    facet("people", &[("Ada", 3), ("Bob", 1)]),
                    facet("topics", &[("Maths", 9)]),
                ],
            ),
        );

        let counts = entity_counts(&resp, "people");
        assert_eq!(counts.len(), 2);
        assert_eq!(counts[&Entity::from("people:Ada")], 3);
        assert_eq!(counts[&Entity::from("people:Bob")], 1);
        assert_eq!(resp.payload.index_count(), Some(12));
    }

    #[test]
    fn test_missing_levels_are_empty() {
        let params = SearchParams::window(0, 10, "people");

        let no_results = response(params.clone(), SearchPayload::default());
        assert!(entity_counts(&no_results, "people").is_empty());

        let empty_results = response(params.clone(), SearchPayload { results: Some(vec![]) });
        assert!(entity_counts(&empty_results, "people").is_empty());

        let no_facets = response(
            params,
            SearchPayload { results: Some(vec![ResultSet { index_count: Some(0), facets: None }]) },
        );
        assert!(entity_counts(&no_facets, "people").is_empty());
    }

    #[test]
    fn test_co_entities_excludes_target() {
        let params =
            SearchParams::window(0, 10, "people").constrained_to(Entity::from("people:Ada"));
        let resp = response(
            params,
            SearchPayload::with_facets(
                4,
                vec![facet("people", &[("Ada", 4), ("Bob", 2), ("Cy", 1)])],
            ),
        );

        let (target, partners) = co_entities(&resp, "people").unwrap();
        assert_eq!(target, Entity::from("people:Ada"));
        assert_eq!(partners, vec![Entity::from("people:Bob"), Entity::from("people:Cy")]);
    }

    #[test]
    fn test_co_entities_without_facets_or_constraint() {
        let constrained =
            SearchParams::window(0, 10, "people").constrained_to(Entity::from("people:Ada"));
        assert!(co_entities(&response(constrained, SearchPayload::default()), "people").is_none());

        let unconstrained = SearchParams::window(0, 10, "people");
        let payload = SearchPayload::with_facets(1, vec![facet("people", &[("Bob", 1)])]);
        assert!(co_entities(&response(unconstrained, payload), "people").is_none());
    }

    #[test]
    fn test_payload_deserializes_from_wire_shape() {
        let json = r#"{
            "results": [{
                "indexCount": 2,
                "facets": [{ "name": "people", "facetElements": [{ "name": "Ada", "count": 2 }] }]
            }]
        }"#;
        let payload: SearchPayload = serde_json::from_str(json).unwrap();
        assert_eq!(payload.index_count(), Some(2));
        assert_eq!(payload.results.unwrap()[0].facets.as_ref().unwrap()[0].facet_elements.len(), 1);
    }

    #[test]
    fn test_payload_tolerates_missing_fields() {
        let payload: SearchPayload = serde_json::from_str(r#"{ "results": [{}] }"#).unwrap();
        assert_eq!(payload.index_count(), None);

        let payload: SearchPayload = serde_json::from_str("{}").unwrap();
        assert!(payload.results.is_none());
    }
}
