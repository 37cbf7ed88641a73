//! Coocgraph CLI: command-line interface for the correlation API
//!
//! Talks to a running `coocgraph` server over HTTP.

use clap::{Parser, Subcommand};
use comfy_table::{ContentArrangement, Table};
use reqwest::{Client, Method, Url};
use serde_json::Value;

#[derive(Parser)]
#[command(name = "coocgraph", version, about = "Coocgraph correlation CLI")]
struct Cli {
    /// Server HTTP URL
    #[arg(long, default_value = "http://localhost:8080", global = true, env = "COOCGRAPH_URL")]
    url: String,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, clap::ValueEnum)]
enum OutputFormat {
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Get server status
    Status,
    /// Fetch the newest window up to now
    UpdateLatest,
    /// Fetch a window of the given length before the oldest covered point
    UpdateEarlier {
        /// Window length in seconds
        interval_secs: i64,
    },
    /// Chain of co-occurrences between two entities (e.g. "people:Ada Lovelace")
    Chain { entity1: String, entity2: String },
    /// Entities at each hop distance from a root entity
    Layers { root: String },
    /// List islands, largest first
    Islands {
        /// Show at most this many islands
        #[arg(long, default_value_t = 10)]
        limit: usize,
    },
    /// Show covered time span and counts
    Summary,
}

/// Minimal HTTP client for the correlation API
struct ApiClient {
    base_url: String,
    http_client: Client,
}

impl ApiClient {
    fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            http_client: Client::new(),
        }
    }

    async fn call(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, &str)],
    ) -> Result<Value, Box<dyn std::error::Error>> {
        let url = Url::parse_with_params(&format!("{}{}", self.base_url, path), params)?;
        let response = self.http_client.request(method, url).send().await?;
        let status = response.status();
        let body: Value = response.json().await.unwrap_or(Value::Null);

        if status.is_success() {
            Ok(body)
        } else {
            let msg = body
                .get("error")
                .and_then(|v| v.as_str())
                .unwrap_or("Unknown error")
                .to_string();
            Err(format!("{}: {}", status, msg).into())
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let client = ApiClient::new(&cli.url);

    let result = match &cli.command {
        Commands::Status => client.call(Method::GET, "/api/status", &[]).await,
        Commands::UpdateLatest => client.call(Method::POST, "/api/update/latest", &[]).await,
        Commands::UpdateEarlier { interval_secs } => {
            let secs = interval_secs.to_string();
            client
                .call(Method::POST, "/api/update/earlier", &[("interval_secs", secs.as_str())])
                .await
        }
        Commands::Chain { entity1, entity2 } => {
            let params = [("entity1", entity1.as_str()), ("entity2", entity2.as_str())];
            client.call(Method::GET, "/api/chain", &params).await
        }
        Commands::Layers { root } => {
            client
                .call(Method::GET, "/api/chain-lengths", &[("root", root.as_str())])
                .await
        }
        Commands::Islands { .. } => client.call(Method::GET, "/api/islands", &[]).await,
        Commands::Summary => client.call(Method::GET, "/api/summary", &[]).await,
    };

    let outcome = result.and_then(|body| render(&cli.command, &cli.format, &body));
    if let Err(e) = outcome {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn render(
    command: &Commands,
    format: &OutputFormat,
    body: &Value,
) -> Result<(), Box<dyn std::error::Error>> {
    if let OutputFormat::Json = format {
        println!("{}", serde_json::to_string_pretty(body)?);
        return Ok(());
    }

    match command {
        Commands::Status => {
            println!("Status:   {}", as_text(&body["status"]));
            println!("Version:  {}", as_text(&body["version"]));
            println!("Ontology: {}", as_text(&body["ontology"]));
            println!("Entities: {}", as_text(&body["known_entities"]));
        }
        Commands::UpdateLatest | Commands::UpdateEarlier { .. } | Commands::Summary => {
            print_summary(body);
        }
        Commands::Chain { entity1, entity2 } => {
            let chain = strings(&body["chain"]);
            if chain.is_empty() {
                println!("No chain between {} and {}", entity1, entity2);
            } else {
                println!("{}", chain.join(" -> "));
                println!("{} link(s)", chain.len() - 1);
            }
        }
        Commands::Layers { root } => {
            let layers = body["chain_lengths"].as_array().cloned().unwrap_or_default();
            if layers.is_empty() {
                println!("Unknown entity {}", root);
                return Ok(());
            }

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["links", "count", "entities"]);
            for layer in &layers {
                let entities = strings(&layer["entities"]);
                table.add_row(vec![
                    as_text(&layer["links"]),
                    entities.len().to_string(),
                    entities.join(", "),
                ]);
            }
            println!("{}", table);
        }
        Commands::Islands { limit } => {
            let islands = body.as_array().cloned().unwrap_or_default();

            let mut table = Table::new();
            table.set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["#", "size", "members"]);
            for (i, island) in islands.iter().take(*limit).enumerate() {
                let members = strings(island);
                table.add_row(vec![i.to_string(), members.len().to_string(), members.join(", ")]);
            }
            println!("{}", table);
            println!("{} island(s)", islands.len());
        }
    }

    Ok(())
}

fn print_summary(body: &Value) {
    let times = &body["times"];
    let counts = &body["counts"];
    println!("Ontology:       {}", as_text(&body["ontology"]));
    println!(
        "Covered:        {} .. {} ({} h)",
        as_text(&times["earliest_after_date"]),
        as_text(&times["latest_before_date"]),
        as_text(&times["interval_covered_hrs"])
    );
    println!("Known entities: {}", as_text(&counts["known_entities"]));
    println!("Islands:        {}", as_text(&counts["all_islands"]));
    println!("Largest island: {}", as_text(&counts["largest_island_size"]));
}

fn strings(value: &Value) -> Vec<String> {
    value
        .as_array()
        .map(|items| items.iter().map(as_text).collect())
        .unwrap_or_default()
}

fn as_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "-".to_string(),
        other => other.to_string(),
    }
}
