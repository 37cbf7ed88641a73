//! HTTP client for the content search API

use crate::config::SearchConfig;
use crate::search::{
    SearchClient, SearchError, SearchParams, SearchPayload, SearchResponse, SearchResult,
};
use async_trait::async_trait;
use chrono::{DateTime, SecondsFormat, Utc};
use reqwest::{Client, Url};
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, warn};

/// Search client for a SAPI-style faceted content search endpoint
pub struct SapiClient {
    client: Client,
    endpoint: Url,
    curations: Vec<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SearchRequest<'a> {
    query_string: String,
    query_context: QueryContext<'a>,
    result_context: ResultContext<'a>,
}

#[derive(Serialize)]
struct QueryContext<'a> {
    curations: &'a [String],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ResultContext<'a> {
    max_results: u32,
    facets: FacetRequest<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FacetRequest<'a> {
    names: [&'a str; 1],
    max_elements: i32,
    min_threshold: u32,
}

impl SapiClient {
    pub fn new(config: &SearchConfig) -> SearchResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SearchError::ConfigError(e.to_string()))?;

        let api_key = config
            .api_key
            .as_ref()
            .ok_or_else(|| SearchError::ConfigError("search API requires an API key".to_string()))?;

        let endpoint = Url::parse_with_params(&config.api_base_url, &[("apiKey", api_key.as_str())])
            .map_err(|e| SearchError::ConfigError(format!("invalid api_base_url: {}", e)))?;

        Ok(Self {
            client,
            endpoint,
            curations: config.curations.clone(),
        })
    }

    /// Query string for the time range plus one clause per constraint
    pub fn query_string(params: &SearchParams) -> String {
        let mut query = format!(
            "lastPublishDateTime:>{} and lastPublishDateTime:<{}",
            query_timestamp(params.after_secs),
            query_timestamp(params.before_secs),
        );
        for entity in &params.constraints {
            query.push_str(&format!(
                " and {}:\"{}\"",
                entity.category(),
                entity.name().replace('"', "\\\"")
            ));
        }
        query
    }
}

/// `YYYY-MM-DDTHH:MM:SSZ`, the epoch if out of range
fn query_timestamp(secs: i64) -> String {
    DateTime::<Utc>::from_timestamp(secs, 0)
        .unwrap_or_default()
        .to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[async_trait]
impl SearchClient for SapiClient {
    async fn search(&self, params: &SearchParams) -> SearchResult<SearchResponse> {
        let request = SearchRequest {
            query_string: Self::query_string(params),
            query_context: QueryContext { curations: &self.curations },
            result_context: ResultContext {
                max_results: 1,
                facets: FacetRequest {
                    names: [params.ontology.as_str()],
                    max_elements: -1,
                    min_threshold: 1,
                },
            },
        };
        debug!("search: {}", request.query_string);

        let resp = self
            .client
            .post(self.endpoint.clone())
            .json(&request)
            .send()
            .await
            .map_err(|e| SearchError::NetworkError(e.to_string()))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            warn!("search failed: status={}, body={}", status, text);
            return Err(SearchError::ApiError(format!("{}: {}", status, text)));
        }

        let payload: SearchPayload = resp
            .json()
            .await
            .map_err(|e| SearchError::SerializationError(e.to_string()))?;

        Ok(SearchResponse {
            params: params.clone(),
            payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Entity;

    #[test]
    fn test_query_string_for_window() {
        let params = SearchParams::window(0, 3600, "people");
        assert_eq!(
            SapiClient::query_string(&params),
            "lastPublishDateTime:>1970-01-01T00:00:00Z \
             and lastPublishDateTime:<1970-01-01T01:00:00Z"
        );
    }

    #[test]
    fn test_query_timestamp_uses_zulu_suffix() {
        assert_eq!(query_timestamp(1_700_000_000), "2023-11-14T22:13:20Z");
    }

    #[test]
    fn test_query_string_with_constraint() {
        let params = SearchParams::window(0, 3600, "people")
            .constrained_to(Entity::new("people", "Ada \"A\" L"));
        assert!(SapiClient::query_string(&params).ends_with(" and people:\"Ada \\\"A\\\" L\""));
    }

    #[test]
    fn test_new_requires_api_key() {
        let config = SearchConfig { api_key: None, ..SearchConfig::default() };
        assert!(matches!(SapiClient::new(&config), Err(SearchError::ConfigError(_))));
    }

    #[test]
    fn test_new_appends_api_key() {
        let config = SearchConfig {
            api_key: Some("secret".to_string()),
            ..SearchConfig::default()
        };
        let client = SapiClient::new(&config).unwrap();
        assert_eq!(client.endpoint.query(), Some("apiKey=secret"));
    }
}
