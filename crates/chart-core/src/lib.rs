// File: crates/chart-core/src/lib.rs
// Summary: Core library entry point; exports the chart model, scales, path builders, scene and region geometry.

pub mod axis;
pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod format;
pub mod geometry;
pub mod grid;
pub mod interaction;
pub mod path;
pub mod region;
pub mod scale;
pub mod scene;
pub mod series;
pub mod theme;
pub mod types;
pub mod view;

pub use axis::Axis;
pub use chart::{Chart, ChartKind};
pub use color::Color;
pub use config::load_chart;
pub use data::{parse_records, ApiEnvelope, DataPoint};
pub use error::{ChartError, Result};
pub use format::{format_kpi_value, format_number, to_fixed};
pub use geometry::{centroid, Coords, Rect};
pub use grid::GridOptions;
pub use interaction::{HoverTarget, InteractionState};
pub use path::{BarLayout, CornerRadii, PathData};
pub use region::{parse_feature_collection, region_labels, FeatureCollection, RegionLabel};
pub use scale::{Domain, LinearScale};
pub use scene::{Node, Scene};
pub use series::Series;
pub use theme::Theme;
pub use types::{Margin, Viewport};
pub use view::ChartView;
