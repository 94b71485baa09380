// File: crates/chart-core/src/path.rs
// Summary: SVG path construction: line series paths, grouped bar layout and rounded bar outlines.

use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

use crate::data::DataPoint;
use crate::format::format_coord;
use crate::geometry::Rect;
use crate::scale::{BandScale, IndexScale, LinearScale};

/// Fraction of a bar slot left empty on each side of a bar.
pub const BAR_GUTTER_FRACTION: f64 = 0.2;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    /// Quadratic curve: control point, then end point.
    QuadTo(f64, f64, f64, f64),
    Close,
}

impl fmt::Display for PathCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = |v: f64| format_coord(v);
        match *self {
            PathCommand::MoveTo(x, y) => write!(f, "M {} {}", c(x), c(y)),
            PathCommand::LineTo(x, y) => write!(f, "L {} {}", c(x), c(y)),
            PathCommand::QuadTo(cx, cy, x, y) => write!(f, "Q {} {} {} {}", c(cx), c(cy), c(x), c(y)),
            PathCommand::Close => f.write_str("Z"),
        }
    }
}

/// Ordered path commands; `Display` yields the SVG `d` attribute.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathData(pub Vec<PathCommand>);

impl PathData {
    pub fn new() -> Self { Self(Vec::new()) }
    pub fn is_empty(&self) -> bool { self.0.is_empty() }
    pub fn commands(&self) -> &[PathCommand] { &self.0 }
    pub fn push(&mut self, cmd: PathCommand) { self.0.push(cmd); }

    /// Number of straight segments (`L` commands).
    pub fn line_segments(&self) -> usize {
        self.0.iter().filter(|c| matches!(c, PathCommand::LineTo(..))).count()
    }

    /// Number of sub-paths started (`M` commands).
    pub fn move_count(&self) -> usize {
        self.0.iter().filter(|c| matches!(c, PathCommand::MoveTo(..))).count()
    }
}

impl fmt::Display for PathData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, cmd) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{cmd}")?;
        }
        Ok(())
    }
}

impl Serialize for PathData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Polyline through the defined points. Gaps are bridged by the next `L`,
/// so there is exactly one `M` however many points are missing.
pub fn polyline<I>(points: I) -> PathData
where
    I: IntoIterator<Item = Option<(f64, f64)>>,
{
    let mut path = PathData::new();
    for (x, y) in points.into_iter().flatten() {
        if path.is_empty() {
            path.push(PathCommand::MoveTo(x, y));
        } else {
            path.push(PathCommand::LineTo(x, y));
        }
    }
    path
}

/// Line path for `key` across `data`; non-numeric values are skipped.
pub fn line_path(data: &[DataPoint], key: &str, x: &IndexScale, y: &LinearScale) -> PathData {
    polyline(data.iter().enumerate().map(|(i, d)| d.number(key).map(|v| (x.position(i), y.map(v)))))
}

/// Per-corner rounding radii, clockwise from top-left.
/// A single number rounds only the top corners.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "RadiusSpec", into = "[f64; 4]")]
pub struct CornerRadii {
    pub top_left: f64,
    pub top_right: f64,
    pub bottom_right: f64,
    pub bottom_left: f64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RadiusSpec {
    Uniform(f64),
    Corners([f64; 4]),
}

impl From<RadiusSpec> for CornerRadii {
    fn from(spec: RadiusSpec) -> Self {
        match spec {
            RadiusSpec::Uniform(r) => CornerRadii::top(r),
            RadiusSpec::Corners(c) => c.into(),
        }
    }
}

impl CornerRadii {
    pub const fn top(r: f64) -> Self {
        Self { top_left: r, top_right: r, bottom_right: 0.0, bottom_left: 0.0 }
    }
    pub const fn all(r: f64) -> Self {
        Self { top_left: r, top_right: r, bottom_right: r, bottom_left: r }
    }

    /// Radii limited to `[0, min(width, height) / 2]`.
    pub fn clamped(&self, width: f64, height: f64) -> Self {
        let max = (width.min(height) / 2.0).max(0.0);
        let c = |r: f64| if r.is_finite() { r.clamp(0.0, max) } else { 0.0 };
        Self {
            top_left: c(self.top_left),
            top_right: c(self.top_right),
            bottom_right: c(self.bottom_right),
            bottom_left: c(self.bottom_left),
        }
    }
}

impl From<f64> for CornerRadii {
    fn from(r: f64) -> Self { CornerRadii::top(r) }
}

impl From<[f64; 4]> for CornerRadii {
    fn from(c: [f64; 4]) -> Self {
        Self { top_left: c[0], top_right: c[1], bottom_right: c[2], bottom_left: c[3] }
    }
}

impl From<CornerRadii> for [f64; 4] {
    fn from(r: CornerRadii) -> Self { [r.top_left, r.top_right, r.bottom_right, r.bottom_left] }
}

/// Outline of a rect with independently rounded corners. Zero-radius corners stay sharp.
pub fn rounded_rect(rect: Rect, radii: CornerRadii) -> PathData {
    let Rect { x, y, width: w, height: h } = rect.normalized();
    let r = radii.clamped(w, h);
    let mut p = PathData::new();

    p.push(PathCommand::MoveTo(x, y + r.top_left));
    if r.top_left > 0.0 {
        p.push(PathCommand::QuadTo(x, y, x + r.top_left, y));
    }
    p.push(PathCommand::LineTo(x + w - r.top_right, y));
    if r.top_right > 0.0 {
        p.push(PathCommand::QuadTo(x + w, y, x + w, y + r.top_right));
    }
    p.push(PathCommand::LineTo(x + w, y + h - r.bottom_right));
    if r.bottom_right > 0.0 {
        p.push(PathCommand::QuadTo(x + w, y + h, x + w - r.bottom_right, y + h));
    }
    p.push(PathCommand::LineTo(x + r.bottom_left, y + h));
    if r.bottom_left > 0.0 {
        p.push(PathCommand::QuadTo(x, y + h, x, y + h - r.bottom_left));
    }
    p.push(PathCommand::Close);
    p
}

/// Grouped bar placement: each category band holds one slot per series plus one
/// slot of padding; each bar gives up a gutter on both sides of its slot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarLayout {
    pub band: BandScale,
    pub series_count: usize,
}

impl BarLayout {
    pub fn new(band: BandScale, series_count: usize) -> Self { Self { band, series_count } }

    pub fn slot_width(&self) -> f64 { self.band.band_width() / (self.series_count + 1) as f64 }

    pub fn gutter(&self) -> f64 { self.slot_width() * BAR_GUTTER_FRACTION }

    pub fn bar_width(&self) -> f64 { (self.slot_width() - 2.0 * self.gutter()).max(0.0) }

    pub fn bar_x(&self, category: usize, series: usize) -> f64 {
        self.band.band_start(category) + series as f64 * self.slot_width() + self.gutter()
    }

    /// Bar rect spanning from the value's pixel `top` down to the `base` pixel.
    pub fn bar_rect(&self, category: usize, series: usize, top: f64, base: f64) -> Rect {
        Rect::new(self.bar_x(category, series), top, self.bar_width(), base - top)
    }
}
