// File: crates/chart-core/src/error.rs
// Summary: Error type for the loading helpers. Rendering itself is infallible.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChartError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("unsupported config format: {0}")]
    UnsupportedFormat(String),
}

pub type Result<T> = std::result::Result<T, ChartError>;
