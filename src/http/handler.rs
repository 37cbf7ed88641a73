//! HTTP handlers for the correlation API

use crate::correlator::{Correlator, CorrelatorError};
use crate::graph::Entity;
use axum::{
    extract::{Json, Query, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Deserialize)]
pub struct EarlierParams {
    pub interval_secs: Option<i64>,
}

#[derive(Deserialize)]
pub struct ChainParams {
    pub entity1: String,
    pub entity2: String,
}

#[derive(Deserialize)]
pub struct ChainLengthsParams {
    pub root: String,
}

fn update_error(e: CorrelatorError) -> axum::response::Response {
    let status = match e {
        CorrelatorError::Search(_) => StatusCode::BAD_GATEWAY,
        CorrelatorError::Island(_) => StatusCode::INTERNAL_SERVER_ERROR,
        CorrelatorError::InvalidWindow { .. } => StatusCode::BAD_REQUEST,
    };
    (status, Json(json!({ "error": e.to_string() }))).into_response()
}

/// Handler for system status
pub async fn status_handler(State(correlator): State<Arc<Correlator>>) -> impl IntoResponse {
    let summary = correlator.summary().await;
    Json(json!({
        "status": "healthy",
        "version": crate::VERSION,
        "ontology": summary.ontology,
        "known_entities": summary.counts.known_entities,
    }))
}

pub async fn update_latest_handler(State(correlator): State<Arc<Correlator>>) -> impl IntoResponse {
    match correlator.update_to_latest().await {
        Ok(summary) => Json(summary).into_response(),
        Err(e) => update_error(e),
    }
}

pub async fn update_earlier_handler(
    State(correlator): State<Arc<Correlator>>,
    Query(params): Query<EarlierParams>,
) -> impl IntoResponse {
    let interval_secs = params
        .interval_secs
        .unwrap_or(correlator.config().default_interval_secs);
    if interval_secs <= 0 {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "interval_secs must be positive" })),
        )
            .into_response();
    }

    match correlator.update_earlier_by(interval_secs).await {
        Ok(summary) => Json(summary).into_response(),
        Err(e) => update_error(e),
    }
}

pub async fn chain_handler(
    State(correlator): State<Arc<Correlator>>,
    Query(params): Query<ChainParams>,
) -> impl IntoResponse {
    let report = correlator
        .chain_between(&Entity::from(params.entity1), &Entity::from(params.entity2))
        .await;
    Json(report)
}

pub async fn chain_lengths_handler(
    State(correlator): State<Arc<Correlator>>,
    Query(params): Query<ChainLengthsParams>,
) -> impl IntoResponse {
    Json(correlator.chain_lengths_from(&Entity::from(params.root)).await)
}

pub async fn islands_handler(State(correlator): State<Arc<Correlator>>) -> impl IntoResponse {
    Json(correlator.all_islands().await)
}

pub async fn summary_handler(State(correlator): State<Arc<Correlator>>) -> impl IntoResponse {
    Json(correlator.summary().await)
}

pub async fn dump_handler(State(correlator): State<Arc<Correlator>>) -> impl IntoResponse {
    Json(correlator.full_dump().await)
}
