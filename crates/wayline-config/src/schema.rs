//! Configuration schema definitions.

use serde::{Deserialize, Serialize};

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub interceptors: InterceptorsConfig,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter directive, overridden by `RUST_LOG`.
    #[serde(default = "default_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable text.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            json: false,
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

/// Which interceptors a worker installs, outermost first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterceptorsConfig {
    #[serde(default = "default_true")]
    pub metadata_context: bool,

    #[serde(default = "default_true")]
    pub root_workflow_name: bool,

    #[serde(default = "default_true")]
    pub node_id: bool,

    /// Header the node id is written to.
    #[serde(default = "default_node_id_header_key")]
    pub node_id_header_key: String,
}

impl Default for InterceptorsConfig {
    fn default() -> Self {
        Self {
            metadata_context: true,
            root_workflow_name: true,
            node_id: true,
            node_id_header_key: default_node_id_header_key(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_node_id_header_key() -> String {
    "node_id".to_string()
}
