//! Configuration loading
//!
//! Defaults, then an optional YAML file (path in `COOCGRAPH_CONFIG`), then
//! environment overrides:
//!
//! | Variable | Field |
//! |---|---|
//! | `ONTOLOGY` | `ontology` |
//! | `SAPI_URL` | `search.api_base_url` |
//! | `CAPI_KEY` | `search.api_key` |
//! | `COOCGRAPH_PORT` | `http_port` |
//! | `COOCGRAPH_MAX_FETCHES` | `max_concurrent_fetches` |

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid value for {key}: {value}")]
    InvalidValue { key: String, value: String },
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Search service connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Search endpoint URL
    pub api_base_url: String,
    /// API key, required by the production client
    pub api_key: Option<String>,
    /// Per-request HTTP timeout in seconds
    pub timeout_secs: u64,
    /// Content curations to search
    pub curations: Vec<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.ft.com/content/search/v1".to_string(),
            api_key: None,
            timeout_secs: 30,
            curations: vec!["ARTICLES".to_string(), "BLOGS".to_string()],
        }
    }
}

/// Correlator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrelatorConfig {
    /// Entity category to track, e.g. `people`
    pub ontology: String,
    /// Cap on concurrent per-entity searches within one cycle
    pub max_concurrent_fetches: usize,
    /// Interval used by backward updates when none is given
    pub default_interval_secs: i64,
    /// HTTP API port
    pub http_port: u16,
    pub search: SearchConfig,
}

impl Default for CorrelatorConfig {
    fn default() -> Self {
        Self {
            ontology: "people".to_string(),
            max_concurrent_fetches: 16,
            default_interval_secs: 3600,
            http_port: 8080,
            search: SearchConfig::default(),
        }
    }
}

impl CorrelatorConfig {
    /// Parse a YAML document; missing fields take defaults
    pub fn from_yaml_str(yaml: &str) -> ConfigResult<Self> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    pub fn from_yaml_file(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_yaml_str(&text)
    }

    /// Load from the process environment
    pub fn load() -> ConfigResult<Self> {
        let vars: HashMap<String, String> = std::env::vars().collect();
        let mut config = match vars.get("COOCGRAPH_CONFIG") {
            Some(path) => Self::from_yaml_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(&vars)?;
        Ok(config)
    }

    /// Apply environment-style overrides from a variable map
    pub fn apply_overrides(&mut self, vars: &HashMap<String, String>) -> ConfigResult<()> {
        if let Some(ontology) = vars.get("ONTOLOGY") {
            self.ontology = ontology.clone();
        }
        if let Some(url) = vars.get("SAPI_URL") {
            self.search.api_base_url = url.clone();
        }
        if let Some(key) = vars.get("CAPI_KEY") {
            self.search.api_key = Some(key.clone());
        }
        if let Some(port) = vars.get("COOCGRAPH_PORT") {
            self.http_port = parse_var("COOCGRAPH_PORT", port)?;
        }
        if let Some(max) = vars.get("COOCGRAPH_MAX_FETCHES") {
            self.max_concurrent_fetches = parse_var("COOCGRAPH_MAX_FETCHES", max)?;
        }
        self.validate()
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.ontology.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "ontology".to_string(),
                value: String::new(),
            });
        }
        if self.max_concurrent_fetches == 0 {
            return Err(ConfigError::InvalidValue {
                key: "max_concurrent_fetches".to_string(),
                value: "0".to_string(),
            });
        }
        Ok(())
    }
}

fn parse_var<T: std::str::FromStr>(key: &str, value: &str) -> ConfigResult<T> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn vars(items: &[(&str, &str)]) -> HashMap<String, String> {
        items.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn test_defaults() {
        let config = CorrelatorConfig::default();
        assert_eq!(config.ontology, "people");
        assert_eq!(config.max_concurrent_fetches, 16);
        assert_eq!(config.search.timeout_secs, 30);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let yaml = "ontology: organisations\nsearch:\n  timeout_secs: 5\n";
        let config = CorrelatorConfig::from_yaml_str(yaml).unwrap();
        assert_eq!(config.ontology, "organisations");
        assert_eq!(config.search.timeout_secs, 5);
        assert_eq!(config.http_port, 8080);
        assert_eq!(config.search.curations.len(), 2);
    }

    #[test]
    fn test_yaml_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_concurrent_fetches: 4").unwrap();
        let config = CorrelatorConfig::from_yaml_file(file.path()).unwrap();
        assert_eq!(config.max_concurrent_fetches, 4);
    }

    #[test]
    fn test_missing_file() {
        let err = CorrelatorConfig::from_yaml_file("/nonexistent/coocgraph.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_overrides() {
        let mut config = CorrelatorConfig::default();
        config
            .apply_overrides(&vars(&[
                ("ONTOLOGY", "topics"),
                ("CAPI_KEY", "k"),
                ("COOCGRAPH_PORT", "9000"),
            ]))
            .unwrap();
        assert_eq!(config.ontology, "topics");
        assert_eq!(config.search.api_key.as_deref(), Some("k"));
        assert_eq!(config.http_port, 9000);
    }

    #[test]
    fn test_invalid_overrides() {
        let mut config = CorrelatorConfig::default();
        let err = config.apply_overrides(&vars(&[("COOCGRAPH_PORT", "nope")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));

        let mut config = CorrelatorConfig::default();
        assert!(config.apply_overrides(&vars(&[("COOCGRAPH_MAX_FETCHES", "0")])).is_err());
    }
}
