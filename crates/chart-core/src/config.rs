// File: crates/chart-core/src/config.rs
// Summary: Load chart descriptions from TOML or JSON files.

use std::path::Path;

use crate::chart::Chart;
use crate::error::{ChartError, Result};

pub fn parse_chart_toml(src: &str) -> Result<Chart> {
    Ok(toml::from_str(src)?)
}

pub fn parse_chart_json(src: &str) -> Result<Chart> {
    Ok(serde_json::from_str(src)?)
}

/// Read a chart description, choosing the format from the file extension
/// (`.toml` or `.json`, case-insensitive).
pub fn load_chart(path: impl AsRef<Path>) -> Result<Chart> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let chart = match ext.as_str() {
        "toml" => parse_chart_toml(&std::fs::read_to_string(path)?)?,
        "json" => parse_chart_json(&std::fs::read_to_string(path)?)?,
        _ => return Err(ChartError::UnsupportedFormat(path.display().to_string())),
    };
    log::debug!("loaded {:?} chart with {} series from {}", chart.kind, chart.series.len(), path.display());
    Ok(chart)
}
