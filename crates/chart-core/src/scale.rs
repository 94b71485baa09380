// File: crates/chart-core/src/scale.rs
// Summary: Value domains, linear value scales, index/band x scales and tick generation.

use serde::{Deserialize, Serialize};

use crate::grid::linspace;

/// Default number of generated ticks.
pub const DEFAULT_TICK_COUNT: usize = 5;
/// Mapped pixels are saturated this far beyond either end of the range.
pub const PIXEL_LIMIT: f64 = 1e6;

/// Numeric value range `[min, max]` with `max >= min`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Domain {
    pub min: f64,
    pub max: f64,
}

impl Domain {
    /// Build a domain; reversed bounds are swapped, non-finite bounds fall back to `0..1`.
    pub fn new(a: f64, b: f64) -> Self {
        if !a.is_finite() || !b.is_finite() {
            return Self::default();
        }
        if a <= b { Self { min: a, max: b } } else { Self { min: b, max: a } }
    }

    /// Min/max over finite values; `0..1` when there are none.
    pub fn from_values<I: IntoIterator<Item = f64>>(values: I) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in values.into_iter().filter(|v| v.is_finite()) {
            min = min.min(v);
            max = max.max(v);
        }
        if min.is_finite() && max.is_finite() { Self { min, max } } else { Self::default() }
    }

    /// `max - min`, or 1 when the domain is degenerate.
    pub fn span(&self) -> f64 {
        let s = self.max - self.min;
        if s == 0.0 { 1.0 } else { s }
    }

    pub fn is_degenerate(&self) -> bool { self.max == self.min }

    /// Widen both sides by `fraction * span`.
    pub fn padded(&self, fraction: f64) -> Self {
        if self.is_degenerate() || fraction <= 0.0 {
            return *self;
        }
        let pad = self.span() * fraction;
        let (min, max) = (self.min - pad, self.max + pad);
        if min.is_finite() && max.is_finite() { Self { min, max } } else { *self }
    }
}

impl Default for Domain {
    fn default() -> Self { Self { min: 0.0, max: 1.0 } }
}

/// Linear map from a value domain onto a pixel range. `range.0` receives `domain.min`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearScale {
    pub domain: Domain,
    pub range: (f64, f64),
}

impl LinearScale {
    pub fn new(domain: Domain, p_start: f64, p_end: f64) -> Self {
        Self { domain, range: (p_start, p_end) }
    }

    /// Vertical scale for screen coordinates: `domain.min` at `bottom`, `domain.max` at `top`.
    pub fn vertical(domain: Domain, top: f64, bottom: f64) -> Self {
        Self::new(domain, bottom, top)
    }

    /// Pixel for `v`. Out-of-domain values extrapolate linearly but are saturated
    /// to `PIXEL_LIMIT` beyond the range, so the result is always finite.
    #[inline]
    pub fn map(&self, v: f64) -> f64 {
        let (p0, p1) = self.range;
        let mid = (p0 + p1) / 2.0;
        if self.domain.is_degenerate() {
            return mid;
        }
        let px = p0 + (p1 - p0) * self.fraction(v);
        if px.is_nan() {
            return mid;
        }
        px.clamp(p0.min(p1) - PIXEL_LIMIT, p0.max(p1) + PIXEL_LIMIT)
    }

    /// Position of `v` within the domain, 0 at `min` and 1 at `max`.
    fn fraction(&self, v: f64) -> f64 {
        let Domain { min, max } = self.domain;
        let span = self.domain.span();
        if span.is_finite() {
            (v - min) / span
        } else {
            // domains spanning most of the f64 range overflow `max - min`
            (v / 2.0 - min / 2.0) / (max / 2.0 - min / 2.0)
        }
    }

    #[inline]
    pub fn invert(&self, px: f64) -> f64 {
        let (p0, p1) = self.range;
        let extent = p1 - p0;
        if self.domain.is_degenerate() || extent == 0.0 {
            return self.domain.min;
        }
        self.domain.min + (px - p0) / extent * self.domain.span()
    }
}

/// Evenly spaced positions for an ordered sequence of `count` points (line charts).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IndexScale {
    pub count: usize,
    pub left: f64,
    pub right: f64,
}

impl IndexScale {
    pub fn new(count: usize, left: f64, right: f64) -> Self { Self { count, left, right } }

    /// A single point sits in the middle of the range.
    #[inline]
    pub fn position(&self, index: usize) -> f64 {
        if self.count <= 1 {
            return (self.left + self.right) / 2.0;
        }
        self.left + (index as f64 / (self.count - 1) as f64) * (self.right - self.left)
    }
}

/// Equal-width category bands (bar charts).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BandScale {
    pub count: usize,
    pub left: f64,
    pub right: f64,
}

impl BandScale {
    pub fn new(count: usize, left: f64, right: f64) -> Self { Self { count, left, right } }

    pub fn band_width(&self) -> f64 {
        if self.count == 0 { 0.0 } else { (self.right - self.left) / self.count as f64 }
    }
    pub fn band_start(&self, index: usize) -> f64 { self.left + index as f64 * self.band_width() }
    pub fn band_center(&self, index: usize) -> f64 { self.band_start(index) + self.band_width() / 2.0 }
}

/// Tick values: explicit ticks verbatim, otherwise `count` evenly spaced values over the domain.
pub fn ticks(domain: Domain, explicit: Option<&[f64]>, count: usize) -> Vec<f64> {
    if let Some(t) = explicit {
        return t.to_vec();
    }
    if domain.is_degenerate() {
        return vec![domain.min];
    }
    let mut out = linspace(domain.min, domain.max, count.max(2));
    // pin the last tick to max so it never drifts by float error
    if let Some(last) = out.last_mut() {
        *last = domain.max;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn domain_swaps_reversed_bounds() {
        assert_eq!(Domain::new(5.0, 1.0), Domain { min: 1.0, max: 5.0 });
    }

    #[test]
    fn empty_values_yield_unit_domain() {
        assert_eq!(Domain::from_values(Vec::<f64>::new()), Domain { min: 0.0, max: 1.0 });
        assert_eq!(Domain::from_values(vec![f64::NAN]), Domain::default());
    }

    #[test]
    fn degenerate_domain_maps_to_center() {
        let s = LinearScale::new(Domain::new(3.0, 3.0), 100.0, 300.0);
        assert_abs_diff_eq!(s.map(3.0), 200.0);
        assert_abs_diff_eq!(s.map(-1e9), 200.0);
        assert_abs_diff_eq!(s.map(42.0), 200.0);
    }

    #[test]
    fn vertical_scale_grows_downward() {
        let s = LinearScale::vertical(Domain::new(0.0, 100.0), 20.0, 380.0);
        assert_abs_diff_eq!(s.map(0.0), 380.0);
        assert_abs_diff_eq!(s.map(100.0), 20.0);
        assert_abs_diff_eq!(s.map(50.0), 200.0);
        assert_abs_diff_eq!(s.invert(200.0), 50.0);
    }

    #[test]
    fn out_of_domain_values_extrapolate() {
        let s = LinearScale::new(Domain::new(0.0, 10.0), 0.0, 100.0);
        assert_abs_diff_eq!(s.map(20.0), 200.0);
        assert_abs_diff_eq!(s.map(-5.0), -50.0);
    }

    #[test]
    fn far_out_values_saturate_to_finite_pixels() {
        let s = LinearScale::vertical(Domain::new(0.0, 1e-86), 20.0, 380.0);
        assert_eq!(s.map(-8.6e256), 380.0 + PIXEL_LIMIT);
        assert_eq!(s.map(8.6e256), 20.0 - PIXEL_LIMIT);
        assert_eq!(s.map(f64::NAN), 200.0);
        let wide = LinearScale::new(Domain::new(-f64::MAX, f64::MAX), 0.0, 100.0);
        assert_abs_diff_eq!(wide.map(0.0), 50.0);
    }

    #[test]
    fn padded_domain_matches_ten_percent_rule() {
        let d = Domain::new(10.0, 20.0).padded(0.1);
        assert_abs_diff_eq!(d.min, 9.0);
        assert_abs_diff_eq!(d.max, 21.0);
    }

    #[test]
    fn explicit_ticks_are_verbatim() {
        let t = ticks(Domain::new(0.0, 3.0), Some(&[0.0, 25.0, 50.0, 75.0, 100.0]), 5);
        assert_eq!(t, vec![0.0, 25.0, 50.0, 75.0, 100.0]);
    }

    #[test]
    fn generated_ticks_cover_domain() {
        assert_eq!(ticks(Domain::new(0.0, 100.0), None, DEFAULT_TICK_COUNT), vec![0.0, 25.0, 50.0, 75.0, 100.0]);
        assert_eq!(ticks(Domain::new(7.0, 7.0), None, 5), vec![7.0]);
        assert_eq!(ticks(Domain::new(0.0, 1.0), None, 0).len(), 2);
    }

    #[test]
    fn single_point_index_scale_is_centered() {
        let s = IndexScale::new(1, 60.0, 670.0);
        assert_abs_diff_eq!(s.position(0), 365.0);
        let s = IndexScale::new(3, 0.0, 100.0);
        assert_abs_diff_eq!(s.position(2), 100.0);
    }

    #[test]
    fn band_scale_splits_width() {
        let b = BandScale::new(4, 20.0, 420.0);
        assert_abs_diff_eq!(b.band_width(), 100.0);
        assert_abs_diff_eq!(b.band_center(1), 170.0);
        assert_eq!(BandScale::new(0, 0.0, 10.0).band_width(), 0.0);
    }

    proptest! {
        #[test]
        fn prop_endpoints_hit_range(min in -1e6f64..1e6, width in 1e-3f64..1e6, p0 in -1e3f64..1e3, p1 in -1e3f64..1e3) {
            let d = Domain::new(min, min + width);
            let s = LinearScale::new(d, p0, p1);
            prop_assert!((s.map(d.min) - p0).abs() < 1e-6);
            prop_assert!((s.map(d.max) - p1).abs() < 1e-6 * (1.0 + p1.abs()));
        }

        #[test]
        fn prop_vertical_scale_is_monotonic(min in -1e6f64..1e6, width in 1e-3f64..1e6, a in 0.0f64..1.0, b in 0.0f64..1.0) {
            let d = Domain::new(min, min + width);
            let s = LinearScale::vertical(d, 20.0, 380.0);
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            let (vlo, vhi) = (d.min + lo * width, d.min + hi * width);
            prop_assert!(s.map(vhi) <= s.map(vlo));
        }

        #[test]
        fn prop_map_is_always_finite(min in any::<f64>(), max in any::<f64>(), v in any::<f64>()) {
            let s = LinearScale::vertical(Domain::new(min, max), 20.0, 380.0);
            prop_assert!(s.map(v).is_finite());
        }

        #[test]
        fn prop_degenerate_domain_is_constant(v in -1e9f64..1e9, at in -1e9f64..1e9) {
            let s = LinearScale::new(Domain::new(at, at), 0.0, 360.0);
            prop_assert_eq!(s.map(v), 180.0);
        }
    }
}
