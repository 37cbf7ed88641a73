//! HTTP server exposing the correlation API

use super::handler::{
    chain_handler, chain_lengths_handler, dump_handler, islands_handler, status_handler,
    summary_handler, update_earlier_handler, update_latest_handler,
};
use crate::correlator::Correlator;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::info;

/// Build the API router
pub fn router(correlator: Arc<Correlator>) -> Router {
    Router::new()
        .route("/api/status", get(status_handler))
        .route("/api/update/latest", post(update_latest_handler))
        .route("/api/update/earlier", post(update_earlier_handler))
        .route("/api/chain", get(chain_handler))
        .route("/api/chain-lengths", get(chain_lengths_handler))
        .route("/api/islands", get(islands_handler))
        .route("/api/summary", get(summary_handler))
        .route("/api/dump", get(dump_handler))
        .layer(CorsLayer::permissive())
        .with_state(correlator)
}

/// HTTP server for the correlation API
pub struct HttpServer {
    correlator: Arc<Correlator>,
    port: u16,
}

impl HttpServer {
    /// Create a new HTTP server
    pub fn new(correlator: Arc<Correlator>, port: u16) -> Self {
        Self { correlator, port }
    }

    /// Start the HTTP server
    pub async fn start(&self) -> Result<(), Box<dyn std::error::Error>> {
        let app = router(Arc::clone(&self.correlator));

        let addr = format!("0.0.0.0:{}", self.port);
        let listener = tokio::net::TcpListener::bind(&addr).await?;

        info!("Correlation API available at http://localhost:{}", self.port);

        axum::serve(listener, app).await?;

        Ok(())
    }
}
