//! Catalog loading errors

use crate::tools::ToolFilterError;

/// Errors that can occur while loading or saving a tool catalog
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Filter(#[from] ToolFilterError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
