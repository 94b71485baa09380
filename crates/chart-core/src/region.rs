// File: crates/chart-core/src/region.rs
// Summary: Minimal GeoJSON feature model and label anchors for administrative regions.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;
use crate::geometry::{centroid, Coords};

/// Property holding the region code shown on the map marker.
pub const CODE_PROPERTY: &str = "CC_1";
pub const NAME_PROPERTY: &str = "NAME_1";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Geometry {
    #[serde(rename = "type")]
    pub kind: String,
    pub coordinates: Coords,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    #[serde(default)]
    pub properties: Map<String, Value>,
    /// `null` geometries are allowed by GeoJSON and produce no label.
    #[serde(default)]
    pub geometry: Option<Geometry>,
}

impl Feature {
    /// Property as display text; numbers keep their JSON spelling.
    pub fn property(&self, key: &str) -> Option<String> {
        match self.properties.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            Value::Null => None,
            other => Some(other.to_string()),
        }
    }

    pub fn centroid(&self) -> Option<(f64, f64)> {
        self.geometry.as_ref().and_then(|g| centroid(&g.coordinates))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(default)]
    pub features: Vec<Feature>,
}

pub fn parse_feature_collection(json: &str) -> Result<FeatureCollection> {
    Ok(serde_json::from_str(json)?)
}

/// Marker for one region: its code, name and label anchor (bounding-box centre).
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RegionLabel {
    pub code: String,
    pub name: String,
    pub position: (f64, f64),
}

impl RegionLabel {
    /// Numeric id of the region, matching the integer the dashboard selects states by.
    pub fn state_id(&self) -> Option<i64> {
        self.code.trim().parse().ok()
    }
}

/// One label per feature that has at least one position. Features without
/// geometry are skipped with a warning.
pub fn region_labels(collection: &FeatureCollection) -> Vec<RegionLabel> {
    collection
        .features
        .iter()
        .enumerate()
        .filter_map(|(i, f)| {
            let Some(position) = f.centroid() else {
                log::warn!("feature #{i} has no coordinates, skipping label");
                return None;
            };
            Some(RegionLabel {
                code: f.property(CODE_PROPERTY).unwrap_or_default(),
                name: f.property(NAME_PROPERTY).unwrap_or_default(),
                position,
            })
        })
        .collect()
}
