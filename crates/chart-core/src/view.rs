// File: crates/chart-core/src/view.rs
// Summary: Interactive chart view: owns chart, data and hover state and keeps the scene current.

use crate::chart::Chart;
use crate::data::DataPoint;
use crate::interaction::{hit_test, HoverTarget, InteractionState};
use crate::scene::Scene;
use crate::types::Viewport;

/// One mounted chart. Pointer events update the hover state; the scene is
/// rebuilt only when the hover state actually changes.
#[derive(Clone, Debug)]
pub struct ChartView {
    chart: Chart,
    data: Vec<DataPoint>,
    state: InteractionState,
    scene: Scene,
}

impl ChartView {
    pub fn new(chart: Chart, data: Vec<DataPoint>) -> Self {
        let scene = chart.render(&data, None);
        Self { chart, data, state: InteractionState::new(), scene }
    }

    pub fn chart(&self) -> &Chart { &self.chart }
    pub fn data(&self) -> &[DataPoint] { &self.data }
    pub fn scene(&self) -> &Scene { &self.scene }
    pub fn hovered(&self) -> Option<HoverTarget> { self.state.hovered() }

    pub fn svg(&self) -> String { self.scene.to_svg() }

    /// Logical view box of the current scene.
    pub fn viewport(&self) -> Viewport { Viewport::new(self.scene.width, self.scene.height) }

    /// Pointer position in logical units. Returns true when the hover state changed.
    pub fn pointer_move(&mut self, x: f64, y: f64) -> bool {
        let targets = self.scene.hit_targets();
        let changed = self.state.pointer_move(x, y, &targets);
        if changed {
            self.rebuild();
        }
        changed
    }

    /// Pointer position in container pixels for a container of the given size.
    pub fn pointer_move_in(&mut self, px: f64, py: f64, container_w: f64, container_h: f64) -> bool {
        let (x, y) = self.viewport().to_logical(px, py, container_w, container_h);
        self.pointer_move(x, y)
    }

    /// Mark under container pixel `(px, py)`, without touching the hover state.
    pub fn hover_at(&self, px: f64, py: f64, container_w: f64, container_h: f64) -> Option<HoverTarget> {
        let (x, y) = self.viewport().to_logical(px, py, container_w, container_h);
        hit_test(x, y, &self.scene.hit_targets())
    }

    pub fn pointer_enter(&mut self, target: HoverTarget) {
        if self.state.hovered() != Some(target) {
            self.state.pointer_enter(target);
            self.rebuild();
        }
    }

    pub fn pointer_leave(&mut self) -> bool {
        if self.state.hovered().is_none() {
            return false;
        }
        self.state.pointer_leave();
        self.rebuild();
        true
    }

    /// Replace the data; any hover is dropped since its indices may no longer exist.
    pub fn set_data(&mut self, data: Vec<DataPoint>) {
        self.data = data;
        self.state.pointer_leave();
        self.rebuild();
    }

    pub fn set_chart(&mut self, chart: Chart) {
        self.chart = chart;
        self.state.pointer_leave();
        self.rebuild();
    }

    /// Adopt `chart` and `data` if either differs from what is mounted. Returns true
    /// when the view was rebuilt; the hover is dropped in that case.
    pub fn sync(&mut self, chart: &Chart, data: &[DataPoint]) -> bool {
        let chart_changed = self.chart != *chart;
        let data_changed = self.data != data;
        if !chart_changed && !data_changed {
            return false;
        }
        if chart_changed {
            self.chart = chart.clone();
        }
        if data_changed {
            self.data = data.to_vec();
        }
        self.state.pointer_leave();
        self.rebuild();
        true
    }

    fn rebuild(&mut self) {
        self.scene = self.chart.render(&self.data, self.state.hovered());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chart::series;
    use crate::interaction::HitShape;

    fn view() -> ChartView {
        let data = vec![
            DataPoint::labeled("day", "Mon").with("delivered", 10.0),
            DataPoint::labeled("day", "Tue").with("delivered", 30.0),
        ];
        ChartView::new(Chart::bar().with_x_key("day").with_series(series("delivered", "#3b82f6")), data)
    }

    #[test]
    fn pointer_over_bar_hovers_then_leave_clears() {
        let mut v = view();
        let target = v.scene().hit_targets()[1];
        let HitShape::Rect(r) = target.shape else { panic!("bar hit target is a rect") };
        assert!(v.pointer_move(r.x + r.width / 2.0, r.y + r.height / 2.0));
        assert_eq!(v.hovered(), Some(HoverTarget::new(0, 1)));
        assert!(v.scene().tooltip().is_some());
        assert!(v.pointer_leave());
        assert!(v.scene().tooltip().is_none());
        assert!(!v.pointer_leave());
    }

    #[test]
    fn moving_within_same_bar_keeps_scene() {
        let mut v = view();
        let HitShape::Rect(r) = v.scene().hit_targets()[0].shape else { panic!("rect") };
        assert!(v.pointer_move(r.x + 1.0, r.bottom() - 1.0));
        let before = v.scene().clone();
        assert!(!v.pointer_move(r.x + 2.0, r.bottom() - 2.0));
        assert_eq!(&before, v.scene());
    }

    #[test]
    fn new_data_drops_hover() {
        let mut v = view();
        v.pointer_enter(HoverTarget::new(0, 1));
        v.set_data(Vec::new());
        assert_eq!(v.hovered(), None);
        assert!(v.scene().is_placeholder());
    }

    #[test]
    fn hover_at_reads_without_changing_state() {
        let v = view();
        let HitShape::Rect(r) = v.scene().hit_targets()[1].shape else { panic!("rect") };
        // 1400x800 container: the 700x400 view box is drawn at 2x with no offset
        let (px, py) = (2.0 * (r.x + r.width / 2.0), 2.0 * (r.y + r.height / 2.0));
        assert_eq!(v.hover_at(px, py, 1400.0, 800.0), Some(HoverTarget::new(0, 1)));
        assert_eq!(v.hovered(), None);
        assert_eq!(v.hover_at(1.0, 1.0, 1400.0, 800.0), None);
    }

    #[test]
    fn sync_rebuilds_only_on_change() {
        let mut v = view();
        let chart = v.chart().clone();
        let data = v.data().to_vec();
        v.pointer_enter(HoverTarget::new(0, 0));
        assert!(!v.sync(&chart, &data));
        assert_eq!(v.hovered(), Some(HoverTarget::new(0, 0)));

        let mut more = data.clone();
        more.push(DataPoint::labeled("day", "Wed").with("delivered", 20.0));
        assert!(v.sync(&chart, &more));
        assert_eq!(v.hovered(), None);
        assert_eq!(v.scene().hit_targets().len(), 3);

        let line = chart.clone().with_title("Volume");
        assert!(v.sync(&line, &more));
        assert_eq!(v.chart().title.as_deref(), Some("Volume"));
        assert!(!v.sync(&line, &more));
    }
}
