// File: crates/chart-core/src/types.rs
// Summary: Shared types and constants (logical canvas size, margins, insets, viewport fit).

use serde::{Deserialize, Serialize};

/// Logical canvas width. Charts are laid out in these units and scaled by the view box.
pub const WIDTH: f64 = 700.0;
/// Logical canvas height for fixed-height charts.
pub const HEIGHT: f64 = 400.0;
/// Height divisor used by responsive line charts (golden ratio).
pub const GOLDEN_RATIO: f64 = 1.618;

/// Caller-supplied margins. Unset sides fall back to the chart kind's defaults.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: Option<f64>,
    pub right: Option<f64>,
    pub bottom: Option<f64>,
    pub left: Option<f64>,
}

impl Margin {
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self { top: Some(top), right: Some(right), bottom: Some(bottom), left: Some(left) }
    }
}

/// Resolved plot insets, in logical units.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Insets {
    pub left: f64,
    pub right: f64,
    pub top: f64,
    pub bottom: f64,
}

impl Insets {
    pub const fn new(left: f64, right: f64, top: f64, bottom: f64) -> Self {
        Self { left, right, top, bottom }
    }
    /// Total horizontal inset (left + right).
    pub fn hsum(&self) -> f64 { self.left + self.right }
    /// Total vertical inset (top + bottom).
    pub fn vsum(&self) -> f64 { self.top + self.bottom }
}

/// Plot rectangle inside the logical canvas.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct PlotArea {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl PlotArea {
    pub fn new(width: f64, height: f64, insets: Insets) -> Self {
        Self {
            left: insets.left,
            top: insets.top,
            right: width - insets.right,
            bottom: height - insets.bottom,
        }
    }
    pub fn width(&self) -> f64 { self.right - self.left }
    pub fn height(&self) -> f64 { self.bottom - self.top }
}

/// Logical view box and its fit into a physical container
/// (`preserveAspectRatio="xMidYMid meet"`).
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

/// Uniform scale plus centring offsets, in container pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Fit {
    pub scale: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

impl Viewport {
    pub const fn new(width: f64, height: f64) -> Self { Self { width, height } }

    pub fn fit(&self, container_w: f64, container_h: f64) -> Fit {
        if self.width <= 0.0 || self.height <= 0.0 || container_w <= 0.0 || container_h <= 0.0 {
            return Fit { scale: 1.0, offset_x: 0.0, offset_y: 0.0 };
        }
        let scale = (container_w / self.width).min(container_h / self.height);
        Fit {
            scale,
            offset_x: (container_w - self.width * scale) / 2.0,
            offset_y: (container_h - self.height * scale) / 2.0,
        }
    }

    /// Container pixel -> logical coordinate.
    pub fn to_logical(&self, px: f64, py: f64, container_w: f64, container_h: f64) -> (f64, f64) {
        let fit = self.fit(container_w, container_h);
        ((px - fit.offset_x) / fit.scale, (py - fit.offset_y) / fit.scale)
    }

    /// Logical coordinate -> container pixel.
    pub fn to_container(&self, x: f64, y: f64, container_w: f64, container_h: f64) -> (f64, f64) {
        let fit = self.fit(container_w, container_h);
        (x * fit.scale + fit.offset_x, y * fit.scale + fit.offset_y)
    }
}

impl Default for Viewport {
    fn default() -> Self { Self::new(WIDTH, HEIGHT) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn fit_letterboxes_wide_container() {
        let vp = Viewport::new(700.0, 400.0);
        let fit = vp.fit(1400.0, 400.0);
        assert_abs_diff_eq!(fit.scale, 1.0);
        assert_abs_diff_eq!(fit.offset_x, 350.0);
        assert_abs_diff_eq!(fit.offset_y, 0.0);
    }

    #[test]
    fn logical_and_container_round_trip() {
        let vp = Viewport::new(700.0, 400.0);
        let (px, py) = vp.to_container(120.0, 75.0, 350.0, 600.0);
        let (x, y) = vp.to_logical(px, py, 350.0, 600.0);
        assert_abs_diff_eq!(x, 120.0, epsilon = 1e-9);
        assert_abs_diff_eq!(y, 75.0, epsilon = 1e-9);
    }

    #[test]
    fn zero_sized_container_is_identity() {
        let vp = Viewport::default();
        assert_eq!(vp.to_logical(10.0, 20.0, 0.0, 0.0), (10.0, 20.0));
    }
}
