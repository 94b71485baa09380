// File: crates/chart-core/src/data.rs
// Summary: Data points (one record per x position) and API envelope parsing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::error::Result;
use crate::format::format_coord;

/// One record of chart input: field name -> JSON value (number, string, or anything else).
/// Only finite numbers count as plottable values.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DataPoint(pub Map<String, Value>);

impl DataPoint {
    pub fn new() -> Self { Self(Map::new()) }

    /// Record with its x label stored under `x_key`.
    pub fn labeled(x_key: &str, label: impl Into<String>) -> Self {
        let mut p = Self::new();
        p.0.insert(x_key.to_string(), Value::String(label.into()));
        p
    }

    /// Builder: set a numeric field. Non-finite numbers are stored as `null`.
    pub fn with(mut self, key: &str, value: f64) -> Self {
        self.set_number(key, value);
        self
    }

    /// Builder: set an arbitrary JSON field.
    pub fn with_value(mut self, key: &str, value: Value) -> Self {
        self.0.insert(key.to_string(), value);
        self
    }

    pub fn set_number(&mut self, key: &str, value: f64) {
        let v = Number::from_f64(value).map(Value::Number).unwrap_or(Value::Null);
        self.0.insert(key.to_string(), v);
    }

    pub fn get(&self, key: &str) -> Option<&Value> { self.0.get(key) }

    /// Finite numeric value under `key`, if any.
    pub fn number(&self, key: &str) -> Option<f64> {
        match self.0.get(key) {
            Some(Value::Number(n)) => n.as_f64().filter(|v| v.is_finite()),
            _ => None,
        }
    }

    /// Display text for `key`: strings verbatim, numbers in shortest form, missing/null empty.
    pub fn label(&self, key: &str) -> String {
        match self.0.get(key) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.as_f64().map(format_coord).unwrap_or_else(|| n.to_string()),
            Some(other) => other.to_string(),
        }
    }
}

impl FromIterator<(String, Value)> for DataPoint {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// `{ success, data, message }` envelope returned by the dashboard API.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    pub success: bool,
    pub data: T,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RecordsPayload {
    Envelope(ApiEnvelope<Vec<DataPoint>>),
    Bare(Vec<DataPoint>),
}

/// Parse chart records from either a bare JSON array or an API envelope.
/// An envelope with `success: false` yields no records.
pub fn parse_records(json: &str) -> Result<Vec<DataPoint>> {
    let payload: RecordsPayload = serde_json::from_str(json)?;
    Ok(match payload {
        RecordsPayload::Envelope(env) if env.success => env.data,
        RecordsPayload::Envelope(env) => {
            log::warn!("API envelope reported failure: {}", env.message.as_deref().unwrap_or("no message"));
            Vec::new()
        }
        RecordsPayload::Bare(points) => points,
    })
}

/// Build a record from text cells (CSV row): numeric cells become numbers, the rest strings.
pub fn record_from_cells<'a, I>(cells: I) -> DataPoint
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    cells
        .into_iter()
        .map(|(k, raw)| {
            let raw = raw.trim();
            let value = match raw.parse::<f64>().ok().and_then(Number::from_f64) {
                Some(n) => Value::Number(n),
                None if raw.is_empty() => Value::Null,
                None => Value::String(raw.to_string()),
            };
            (k.to_string(), value)
        })
        .collect()
}
