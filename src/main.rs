use anyhow::Context;
use coocgraph::{Correlator, CorrelatorConfig, HttpServer, SapiClient};
use std::sync::Arc;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = CorrelatorConfig::load().context("loading configuration")?;
    info!(
        "Coocgraph v{} tracking ontology={}",
        coocgraph::version(),
        config.ontology
    );

    let client = SapiClient::new(&config.search).context("building search client")?;
    let port = config.http_port;
    let correlator = Arc::new(Correlator::new(config, Arc::new(client)));

    // Prime the graph with the most recent window; the API still starts if it fails
    match correlator.update_to_latest().await {
        Ok(summary) => info!(
            "initial update: known_entities={}, islands={}",
            summary.counts.known_entities, summary.counts.all_islands
        ),
        Err(e) => warn!("initial update failed: {}", e),
    }

    let server = HttpServer::new(correlator, port);
    server
        .start()
        .await
        .map_err(|e| anyhow::anyhow!("server error: {}", e))?;

    Ok(())
}
