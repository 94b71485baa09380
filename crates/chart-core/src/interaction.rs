// File: crates/chart-core/src/interaction.rs
// Summary: Hover state, hit testing and tooltip placement for interactive charts.

use serde::Serialize;

use crate::geometry::Rect;

/// Tooltip box size in logical units.
pub const TOOLTIP_WIDTH: f64 = 160.0;
pub const TOOLTIP_HEIGHT: f64 = 80.0;
/// Offset of the tooltip's top-left corner from its anchor.
pub const TOOLTIP_OFFSET: (f64, f64) = (-80.0, -60.0);

/// A hovered mark: which series and which data point.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct HoverTarget {
    pub series: usize,
    pub point: usize,
}

impl HoverTarget {
    pub const fn new(series: usize, point: usize) -> Self { Self { series, point } }
}

/// Per-chart hover state. At most one mark is hovered at a time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InteractionState {
    hovered: Option<HoverTarget>,
}

impl InteractionState {
    pub fn new() -> Self { Self::default() }

    pub fn pointer_enter(&mut self, target: HoverTarget) {
        self.hovered = Some(target);
    }

    pub fn pointer_leave(&mut self) {
        self.hovered = None;
    }

    pub fn hovered(&self) -> Option<HoverTarget> { self.hovered }

    /// Resolve a pointer position against the drawn hit targets. Later targets are drawn
    /// on top, so the last one containing the point wins. Returns true when the state changed.
    pub fn pointer_move(&mut self, x: f64, y: f64, targets: &[HitTarget]) -> bool {
        let next = hit_test(x, y, targets);
        let changed = next != self.hovered;
        self.hovered = next;
        changed
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum HitShape {
    Rect(Rect),
    Circle { cx: f64, cy: f64, r: f64 },
}

impl HitShape {
    pub fn contains(&self, x: f64, y: f64) -> bool {
        match *self {
            HitShape::Rect(rect) => rect.contains(x, y),
            HitShape::Circle { cx, cy, r } => {
                let (dx, dy) = (x - cx, y - cy);
                dx * dx + dy * dy <= r * r
            }
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct HitTarget {
    pub target: HoverTarget,
    pub shape: HitShape,
}

pub fn hit_test(x: f64, y: f64, targets: &[HitTarget]) -> Option<HoverTarget> {
    if !x.is_finite() || !y.is_finite() {
        return None;
    }
    targets.iter().rev().find(|t| t.shape.contains(x, y)).map(|t| t.target)
}

/// Tooltip box for an anchor point. The box is not clamped to the canvas.
pub fn tooltip_rect(anchor_x: f64, anchor_y: f64) -> Rect {
    Rect::new(anchor_x + TOOLTIP_OFFSET.0, anchor_y + TOOLTIP_OFFSET.1, TOOLTIP_WIDTH, TOOLTIP_HEIGHT)
}
