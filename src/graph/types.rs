//! Core type definitions for the co-occurrence graph

use serde::{Deserialize, Serialize};
use std::fmt;

/// Entity identifier, conventionally `<category>:<name>` (e.g. `people:Ada Lovelace`)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, PartialOrd, Ord)]
#[serde(transparent)]
pub struct Entity(String);

impl Entity {
    /// Build an entity from its category and name
    pub fn new(category: &str, name: &str) -> Self {
        Entity(format!("{}:{}", category, name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Category part, empty if the identifier has no `:`
    pub fn category(&self) -> &str {
        self.0.split_once(':').map(|(c, _)| c).unwrap_or("")
    }

    /// Name part, the whole identifier if it has no `:`
    pub fn name(&self) -> &str {
        self.0.split_once(':').map(|(_, n)| n).unwrap_or(&self.0)
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for Entity {
    fn from(s: String) -> Self {
        Entity(s)
    }
}

impl From<&str> for Entity {
    fn from(s: &str) -> Self {
        Entity(s.to_string())
    }
}
