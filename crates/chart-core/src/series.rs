// File: crates/chart-core/src/series.rs
// Summary: Series model: which data key to plot, how to label it and how to draw it.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::geometry::size_or;
use crate::path::CornerRadii;

/// Line and dot styling for line charts.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LineStyle {
    pub stroke_width: f64,
    pub dots: bool,
    pub dot_radius: f64,
    pub active_dot_radius: f64,
    pub dot_fill: Option<Color>,
    pub dot_stroke_width: f64,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            stroke_width: 3.0,
            dots: true,
            dot_radius: 4.0,
            active_dot_radius: 8.0,
            dot_fill: None,
            dot_stroke_width: 2.0,
        }
    }
}

impl LineStyle {
    /// Same style with every NaN, infinite or negative size replaced by its default.
    pub fn resolved(&self) -> Self {
        let d = Self::default();
        Self {
            stroke_width: size_or(self.stroke_width, d.stroke_width),
            dot_radius: size_or(self.dot_radius, d.dot_radius),
            active_dot_radius: size_or(self.active_dot_radius, d.active_dot_radius),
            dot_stroke_width: size_or(self.dot_stroke_width, d.dot_stroke_width),
            ..*self
        }
    }
}

/// Bar styling for bar charts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BarStyle {
    pub radius: CornerRadii,
}

/// One plotted attribute of the data points (e.g. "delivered").
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Series {
    pub key: String,
    pub name: Option<String>,
    pub color: Option<Color>,
    pub line: LineStyle,
    pub bar: BarStyle,
}

impl Series {
    pub fn new(key: impl Into<String>) -> Self {
        Self { key: key.into(), ..Self::default() }
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn colored(mut self, color: Color) -> Self {
        self.color = Some(color);
        self
    }

    pub fn with_radius(mut self, radius: impl Into<CornerRadii>) -> Self {
        self.bar.radius = radius.into();
        self
    }

    pub fn with_stroke_width(mut self, width: f64) -> Self {
        self.line.stroke_width = width;
        self
    }

    pub fn without_dots(mut self) -> Self {
        self.line.dots = false;
        self
    }

    /// Label used in legends and tooltips; falls back to the data key.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.key)
    }

    /// Series color or the theme default.
    pub fn color_or(&self, fallback: Color) -> Color {
        self.color.unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unusable_line_sizes_resolve_to_defaults() {
        let src = r#"
key = "a"
line = { stroke_width = nan, dot_radius = inf, active_dot_radius = -3.0, dot_stroke_width = 1.5 }
"#;
        let s: Series = toml::from_str(src).expect("series toml");
        let line = s.line.resolved();
        assert_eq!(line.stroke_width, 3.0);
        assert_eq!(line.dot_radius, 4.0);
        assert_eq!(line.active_dot_radius, 8.0);
        assert_eq!(line.dot_stroke_width, 1.5);
        assert!(line.dots);
    }

    #[test]
    fn display_name_falls_back_to_key() {
        assert_eq!(Series::new("failed").display_name(), "failed");
        assert_eq!(Series::new("failed").named("non-livrés").display_name(), "non-livrés");
    }

    #[test]
    fn deserializes_with_defaults() {
        let s: Series = serde_json::from_str(r##"{"key":"delivered","color":"#3b82f6","bar":{"radius":2}}"##)
            .expect("series json");
        assert_eq!(s.key, "delivered");
        assert_eq!(s.color, Some(Color::rgb(0x3b, 0x82, 0xf6)));
        assert_eq!(s.bar.radius, CornerRadii::top(2.0));
        assert_eq!(s.line, LineStyle::default());
    }
}
