//! Settings schema definitions.
//!
//! All types derive Serde traits for deserialization from the settings file.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Root settings for the `hconf` binary.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    /// First tokens that open a new section.
    pub sections: Vec<String>,

    /// Configuration files to load, in order.
    pub sources: Vec<PathBuf>,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sections: default_sections(),
            sources: Vec::new(),
            observability: ObservabilityConfig::default(),
        }
    }
}

/// Section keywords of a stock haproxy configuration.
pub fn default_sections() -> Vec<String> {
    [
        "global",
        "defaults",
        "frontend",
        "backend",
        "listen",
        "userlist",
        "peers",
        "resolvers",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}
