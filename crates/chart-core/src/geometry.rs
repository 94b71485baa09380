// File: crates/chart-core/src/geometry.rs
// Summary: Lightweight geometry helpers: pixel rects, bounding boxes and region label centroids.

use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }
    /// Same rect with non-negative width and height.
    pub fn normalized(&self) -> Self {
        let (x, width) = if self.width < 0.0 { (self.x + self.width, -self.width) } else { (self.x, self.width) };
        let (y, height) = if self.height < 0.0 { (self.y + self.height, -self.height) } else { (self.y, self.height) };
        Self { x, y, width, height }
    }
    pub fn right(&self) -> f64 { self.x + self.width }
    pub fn bottom(&self) -> f64 { self.y + self.height }
    pub fn contains(&self, px: f64, py: f64) -> bool {
        let r = self.normalized();
        px >= r.x && px <= r.right() && py >= r.y && py <= r.bottom()
    }
}

/// `v` when it is a usable size (finite, non-negative), `fallback` otherwise.
#[inline]
pub fn size_or(v: f64, fallback: f64) -> f64 {
    if v.is_finite() && v >= 0.0 { v } else { fallback }
}

/// Axis-aligned bounds accumulated from points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn empty() -> Self {
        Self {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        }
    }

    pub fn is_empty(&self) -> bool { self.min_x > self.max_x || self.min_y > self.max_y }

    pub fn extend(&mut self, x: f64, y: f64) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }

    pub fn center(&self) -> Option<(f64, f64)> {
        if self.is_empty() {
            return None;
        }
        Some(((self.min_x + self.max_x) / 2.0, (self.min_y + self.max_y) / 2.0))
    }
}

/// GeoJSON coordinates of any nesting depth: a position `[x, y, ...]`,
/// or a list of further coordinates (ring, polygon, multi-polygon).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coords {
    Position(Vec<f64>),
    Nested(Vec<Coords>),
}

impl Coords {
    /// Polygon built from `[x, y]` pairs; convenient for tests and callers without GeoJSON.
    pub fn ring(points: &[(f64, f64)]) -> Self {
        Coords::Nested(points.iter().map(|&(x, y)| Coords::Position(vec![x, y])).collect())
    }

    /// Grow `bbox` by every position in this structure.
    pub fn accumulate(&self, bbox: &mut BoundingBox) {
        match self {
            // positions shorter than [x, y] carry no location
            Coords::Position(p) if p.len() >= 2 => bbox.extend(p[0], p[1]),
            Coords::Position(_) => {}
            Coords::Nested(children) => {
                for c in children {
                    c.accumulate(bbox);
                }
            }
        }
    }

    pub fn bounding_box(&self) -> BoundingBox {
        let mut bbox = BoundingBox::empty();
        self.accumulate(&mut bbox);
        bbox
    }
}

/// Label anchor for a region: the centre of the bounding box of all its positions.
/// Not the area-weighted centroid. `None` when the structure holds no positions.
pub fn centroid(coords: &Coords) -> Option<(f64, f64)> {
    coords.bounding_box().center()
}
