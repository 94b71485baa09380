// File: crates/chart-core/src/axis.rs
// Summary: Axis options: colors, label size, axis line and y domain/tick overrides.

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::geometry::size_or;
use crate::scale::Domain;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Axis {
    /// Axis line and label color; the theme's axis color when unset.
    pub stroke: Option<Color>,
    pub font_size: f64,
    pub axis_line: bool,
    /// Fixed `[min, max]` value range (y axis only).
    pub domain: Option<[f64; 2]>,
    /// Explicit tick values, drawn verbatim (y axis only).
    pub ticks: Option<Vec<f64>>,
}

impl Default for Axis {
    fn default() -> Self {
        Self { stroke: None, font_size: 12.0, axis_line: true, domain: None, ticks: None }
    }
}

impl Axis {
    pub fn with_domain(mut self, min: f64, max: f64) -> Self {
        self.domain = Some([min, max]);
        self
    }

    pub fn with_ticks(mut self, ticks: impl Into<Vec<f64>>) -> Self {
        self.ticks = Some(ticks.into());
        self
    }

    pub fn domain_override(&self) -> Option<Domain> {
        self.domain.map(|[a, b]| Domain::new(a, b))
    }

    /// Tick label size; the default when the configured one is not a usable size.
    pub fn label_size(&self) -> f64 {
        size_or(self.font_size, Self::default().font_size)
    }

    pub fn color_or(&self, fallback: Color) -> Color {
        self.stroke.unwrap_or(fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_is_normalized() {
        let a = Axis::default().with_domain(100.0, 0.0);
        assert_eq!(a.domain_override(), Some(Domain::new(0.0, 100.0)));
        assert_eq!(Axis::default().domain_override(), None);
    }

    #[test]
    fn toml_overrides_merge_with_defaults() {
        let a: Axis = toml::from_str("domain = [0, 100]\nticks = [0, 25, 50, 75, 100]").expect("axis toml");
        assert_eq!(a.font_size, 12.0);
        assert!(a.axis_line);
        assert_eq!(a.ticks.as_deref(), Some(&[0.0, 25.0, 50.0, 75.0, 100.0][..]));
    }

    #[test]
    fn bad_font_size_uses_default() {
        let a: Axis = toml::from_str("font_size = inf").expect("axis toml");
        assert_eq!(a.label_size(), 12.0);
        let a: Axis = toml::from_str("font_size = 10").expect("axis toml");
        assert_eq!(a.label_size(), 10.0);
    }
}
