// File: crates/chart-core/src/chart.rs
// Summary: Declarative bar/line chart description and the scene-building render pipeline.

use serde::{Deserialize, Serialize};

use crate::axis::Axis;
use crate::color::Color;
use crate::data::DataPoint;
use crate::format::format_number;
use crate::grid::{thinned_label_indices, GridOptions};
use crate::interaction::{tooltip_rect, HitShape, HitTarget, HoverTarget};
use crate::path::{line_path, rounded_rect, BarLayout};
use crate::scale::{ticks, BandScale, Domain, IndexScale, LinearScale, DEFAULT_TICK_COUNT};
use crate::scene::{Node, Scene, Stroke, TextAnchor, TextStyle, Tooltip, TooltipRow, PLACEHOLDER_MESSAGE};
use crate::series::Series;
use crate::theme::{self, Theme};
use crate::types::{Insets, Margin, PlotArea, GOLDEN_RATIO, HEIGHT, WIDTH};

/// Line charts pad their automatic y domain by this fraction on both sides.
pub const LINE_DOMAIN_PADDING: f64 = 0.1;
/// Line charts with more x labels than this draw every other label.
pub const MAX_DENSE_LABELS: usize = 10;
/// Horizontal distance between legend items.
pub const LEGEND_ITEM_SPACING: f64 = 120.0;
pub const HOVERED_BAR_OPACITY: f64 = 0.8;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Bar,
    Line,
}

impl ChartKind {
    /// Margin used for sides the caller leaves unset.
    pub fn default_margin(self) -> Margin {
        match self {
            ChartKind::Bar => Margin::new(20.0, 30.0, 5.0, 20.0),
            ChartKind::Line => Margin::new(5.0, 0.0, 5.0, 0.0),
        }
    }

    /// Plot insets for a caller margin.
    ///
    /// Bar charts use the margin directly, replacing zero sides with fixed fallbacks;
    /// line charts add room for the title, tick labels and legend on top of the margin.
    pub fn insets(self, margin: &Margin) -> Insets {
        let defaults = self.default_margin();
        let side = |v: Option<f64>, d: Option<f64>| v.filter(|v| v.is_finite()).or(d).unwrap_or(0.0);
        let (top, right, bottom, left) = (
            side(margin.top, defaults.top),
            side(margin.right, defaults.right),
            side(margin.bottom, defaults.bottom),
            side(margin.left, defaults.left),
        );
        match self {
            ChartKind::Bar => {
                let or = |v: f64, fallback: f64| if v == 0.0 { fallback } else { v };
                Insets::new(or(left, 60.0), or(right, 30.0), or(top, 20.0), or(bottom, 40.0))
            }
            ChartKind::Line => Insets::new(left + 60.0, right + 30.0, top + 20.0, bottom + 40.0),
        }
    }

    /// Fixed decimals for tick and tooltip values.
    pub fn value_decimals(self) -> usize {
        match self {
            ChartKind::Bar => 0,
            ChartKind::Line => 1,
        }
    }
}

/// Everything needed to draw a chart except the data and hover state.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Chart {
    pub kind: ChartKind,
    /// Data field holding the x label of each point.
    pub x_key: String,
    pub series: Vec<Series>,
    pub x_axis: Axis,
    pub y_axis: Axis,
    pub grid: GridOptions,
    pub title: Option<String>,
    pub legend: bool,
    pub tooltip: bool,
    pub margin: Margin,
    /// Line charts only: golden-ratio height instead of the fixed canvas height.
    pub responsive: bool,
    pub theme: String,
}

impl Default for Chart {
    fn default() -> Self {
        Self {
            kind: ChartKind::Bar,
            x_key: "name".to_string(),
            series: Vec::new(),
            x_axis: Axis::default(),
            y_axis: Axis::default(),
            grid: GridOptions::default(),
            title: None,
            legend: false,
            tooltip: true,
            margin: Margin::default(),
            responsive: false,
            theme: "light".to_string(),
        }
    }
}

impl Chart {
    pub fn new(kind: ChartKind) -> Self {
        Self { kind, ..Self::default() }
    }
    pub fn bar() -> Self { Self::new(ChartKind::Bar) }
    pub fn line() -> Self { Self::new(ChartKind::Line) }

    pub fn with_x_key(mut self, key: impl Into<String>) -> Self {
        self.x_key = key.into();
        self
    }

    pub fn with_series(mut self, series: Series) -> Self {
        self.series.push(series);
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_legend(mut self, legend: bool) -> Self {
        self.legend = legend;
        self
    }

    pub fn with_margin(mut self, margin: Margin) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_y_axis(mut self, axis: Axis) -> Self {
        self.y_axis = axis;
        self
    }

    pub fn with_theme(mut self, name: impl Into<String>) -> Self {
        self.theme = name.into();
        self
    }

    /// Logical canvas size.
    pub fn size(&self) -> (f64, f64) {
        match self.kind {
            ChartKind::Line if self.responsive => (WIDTH, WIDTH / GOLDEN_RATIO),
            _ => (WIDTH, HEIGHT),
        }
    }

    pub fn insets(&self) -> Insets { self.kind.insets(&self.margin) }

    pub fn plot_area(&self) -> PlotArea {
        let (w, h) = self.size();
        PlotArea::new(w, h, self.insets())
    }

    pub fn theme(&self) -> Theme { theme::find(&self.theme) }

    fn values<'a>(&'a self, data: &'a [DataPoint]) -> impl Iterator<Item = f64> + 'a {
        self.series.iter().flat_map(move |s| data.iter().filter_map(move |d| d.number(&s.key)))
    }

    /// Y domain before padding: the axis override, else `0..max` for bars and
    /// `min..max` for lines. No numeric values gives `0..1`.
    pub fn y_domain(&self, data: &[DataPoint]) -> Domain {
        if let Some(d) = self.y_axis.domain_override() {
            return d;
        }
        match self.kind {
            ChartKind::Bar => match self.values(data).reduce(f64::max) {
                Some(max) => Domain::new(0.0, max),
                None => Domain::default(),
            },
            ChartKind::Line => Domain::from_values(self.values(data)),
        }
    }

    /// Domain the y scale maps over.
    fn scale_domain(&self, data: &[DataPoint]) -> Domain {
        let base = self.y_domain(data);
        match self.kind {
            ChartKind::Line if self.y_axis.domain.is_none() => base.padded(LINE_DOMAIN_PADDING),
            _ => base,
        }
    }

    /// Build the scene for `data` with an optional hovered mark. Never fails:
    /// empty data gives a placeholder, unusable values are skipped and
    /// out-of-range hover targets are ignored.
    pub fn render(&self, data: &[DataPoint], hover: Option<HoverTarget>) -> Scene {
        let theme = self.theme();
        let (width, height) = self.size();
        let mut scene = Scene::new(width, height, theme.background);

        if data.is_empty() {
            log::debug!("render {:?}: no data, placeholder", self.kind);
            scene.push(Node::Placeholder {
                x: width / 2.0,
                y: height / 2.0,
                message: PLACEHOLDER_MESSAGE.to_string(),
                style: TextStyle::new(14.0, theme.placeholder_text, TextAnchor::Middle),
            });
            return scene;
        }

        let hover = hover.filter(|h| {
            let valid = h.series < self.series.len() && h.point < data.len();
            if !valid {
                log::warn!("ignoring stale hover target {h:?} ({} series, {} points)", self.series.len(), data.len());
            }
            valid
        });

        let ctx = Frame::new(self, data, theme);
        log::debug!(
            "render {:?}: {} points, {} series, y domain {:?}",
            self.kind,
            data.len(),
            self.series.len(),
            ctx.y.domain
        );

        self.push_title(&mut scene, &ctx);
        self.push_grid(&mut scene, &ctx);
        self.push_axes(&mut scene, &ctx);
        self.push_tick_labels(&mut scene, &ctx);
        match self.kind {
            ChartKind::Bar => self.push_bars(&mut scene, &ctx, hover),
            ChartKind::Line => self.push_lines(&mut scene, &ctx, hover),
        }
        if self.legend && !self.series.is_empty() {
            scene.push(self.legend_node(&ctx));
        }
        if self.tooltip {
            if let Some(node) = hover.and_then(|h| self.tooltip_node(&ctx, h)) {
                scene.push(node);
            }
        }
        scene
    }

    fn push_title(&self, scene: &mut Scene, ctx: &Frame<'_>) {
        let Some(title) = self.title.as_deref().filter(|t| !t.is_empty()) else { return };
        scene.push(Node::Text {
            x: ctx.width / 2.0,
            y: ctx.plot.top - 10.0,
            content: title.to_string(),
            style: TextStyle::new(16.0, ctx.theme.title, TextAnchor::Middle).weight(600),
        });
    }

    fn push_grid(&self, scene: &mut Scene, ctx: &Frame<'_>) {
        let stroke = Stroke::dashed(self.grid.stroke.unwrap_or(ctx.theme.grid), 1.0, self.grid.dash.clone());
        if self.grid.horizontal {
            for &t in &ctx.ticks {
                let y = ctx.y.map(t);
                scene.push(Node::Line { x1: ctx.plot.left, y1: y, x2: ctx.plot.right, y2: y, stroke: stroke.clone() });
            }
        }
        if self.grid.vertical {
            for i in 0..ctx.data.len() {
                let x = ctx.x_position(i);
                scene.push(Node::Line { x1: x, y1: ctx.plot.top, x2: x, y2: ctx.plot.bottom, stroke: stroke.clone() });
            }
        }
    }

    fn push_axes(&self, scene: &mut Scene, ctx: &Frame<'_>) {
        let p = ctx.plot;
        if self.y_axis.axis_line {
            let stroke = Stroke::solid(self.y_axis.color_or(ctx.theme.axis), 1.0);
            scene.push(Node::Line { x1: p.left, y1: p.top, x2: p.left, y2: p.bottom, stroke });
        }
        if self.x_axis.axis_line {
            let stroke = Stroke::solid(self.x_axis.color_or(ctx.theme.axis), 1.0);
            scene.push(Node::Line { x1: p.left, y1: p.bottom, x2: p.right, y2: p.bottom, stroke });
        }
    }

    fn push_tick_labels(&self, scene: &mut Scene, ctx: &Frame<'_>) {
        let decimals = self.kind.value_decimals();
        let y_style = TextStyle::new(self.y_axis.label_size(), self.y_axis.color_or(ctx.theme.axis), TextAnchor::End);
        for &t in &ctx.ticks {
            scene.push(Node::Text {
                x: ctx.plot.left - 10.0,
                y: ctx.y.map(t) + 4.0,
                content: format_number(t, decimals),
                style: y_style.clone(),
            });
        }

        let x_style = TextStyle::new(self.x_axis.label_size(), self.x_axis.color_or(ctx.theme.axis), TextAnchor::Middle);
        let indices: Vec<usize> = match self.kind {
            ChartKind::Bar => (0..ctx.data.len()).collect(),
            ChartKind::Line => thinned_label_indices(ctx.data.len(), MAX_DENSE_LABELS),
        };
        for i in indices {
            scene.push(Node::Text {
                x: ctx.x_position(i),
                y: ctx.plot.bottom + 20.0,
                content: ctx.data[i].label(&self.x_key),
                style: x_style.clone(),
            });
        }
    }

    fn push_bars(&self, scene: &mut Scene, ctx: &Frame<'_>, hover: Option<HoverTarget>) {
        let layout = BarLayout::new(ctx.band(), self.series.len());
        let base = ctx.y.map(ctx.y.domain.min);
        for (di, d) in ctx.data.iter().enumerate() {
            for (si, s) in self.series.iter().enumerate() {
                let Some(v) = d.number(&s.key) else { continue };
                let rect = layout.bar_rect(di, si, ctx.y.map(v), base);
                let target = HoverTarget::new(si, di);
                scene.push(Node::Path {
                    d: rounded_rect(rect, s.bar.radius),
                    fill: Some(s.color_or(ctx.theme.series_default)),
                    stroke: None,
                    opacity: if hover == Some(target) { HOVERED_BAR_OPACITY } else { 1.0 },
                    hit: Some(HitTarget { target, shape: HitShape::Rect(rect.normalized()) }),
                });
            }
        }
    }

    fn push_lines(&self, scene: &mut Scene, ctx: &Frame<'_>, hover: Option<HoverTarget>) {
        let xs = ctx.index();
        for (si, s) in self.series.iter().enumerate() {
            let color = s.color_or(ctx.theme.series_default);
            let style = s.line.resolved();
            let mut children = vec![Node::Path {
                d: line_path(ctx.data, &s.key, &xs, &ctx.y),
                fill: None,
                stroke: Some(Stroke::solid(color, style.stroke_width).rounded()),
                opacity: 1.0,
                hit: None,
            }];
            if style.dots {
                for (pi, d) in ctx.data.iter().enumerate() {
                    let Some(v) = d.number(&s.key) else { continue };
                    let target = HoverTarget::new(si, pi);
                    let (cx, cy) = (xs.position(pi), ctx.y.map(v));
                    let r = if hover == Some(target) { style.active_dot_radius } else { style.dot_radius };
                    children.push(Node::Circle {
                        cx,
                        cy,
                        r,
                        fill: style.dot_fill.unwrap_or(color),
                        stroke: Some(Stroke::solid(ctx.theme.dot_outline, style.dot_stroke_width)),
                        hit: Some(HitTarget { target, shape: HitShape::Circle { cx, cy, r } }),
                    });
                }
            }
            scene.push(Node::Group { translate: (0.0, 0.0), children });
        }
    }

    fn legend_node(&self, ctx: &Frame<'_>) -> Node {
        let n = self.series.len() as f64;
        let items = self
            .series
            .iter()
            .enumerate()
            .map(|(idx, s)| Node::Group {
                translate: ((idx as f64 - n / 2.0) * LEGEND_ITEM_SPACING, 0.0),
                children: vec![
                    Node::Line {
                        x1: 0.0,
                        y1: 0.0,
                        x2: 20.0,
                        y2: 0.0,
                        stroke: Stroke::solid(s.color_or(ctx.theme.series_default), 3.0),
                    },
                    Node::Text {
                        x: 25.0,
                        y: 4.0,
                        content: s.display_name().to_string(),
                        style: TextStyle::new(12.0, ctx.theme.legend_text, TextAnchor::Start),
                    },
                ],
            })
            .collect();
        Node::Group { translate: (ctx.width / 2.0, ctx.height - 10.0), children: items }
    }

    /// Tooltip for a hovered mark: bars anchor at the band centre on the plot top,
    /// line points at the point itself.
    fn tooltip_node(&self, ctx: &Frame<'_>, hover: HoverTarget) -> Option<Node> {
        let point = &ctx.data[hover.point];
        let (ax, ay) = match self.kind {
            ChartKind::Bar => (ctx.band().band_center(hover.point), ctx.plot.top),
            ChartKind::Line => {
                let v = point.number(&self.series[hover.series].key)?;
                (ctx.index().position(hover.point), ctx.y.map(v))
            }
        };
        let decimals = self.kind.value_decimals();
        let rows = self
            .series
            .iter()
            .map(|s| TooltipRow {
                label: s.display_name().to_string(),
                value: match point.number(&s.key) {
                    Some(v) => format_number(v, decimals),
                    None => point.label(&s.key),
                },
                color: s.color_or(ctx.theme.series_default),
            })
            .collect();
        Some(Node::Tooltip(Tooltip {
            rect: tooltip_rect(ax, ay),
            title: point.label(&self.x_key),
            rows,
            background: ctx.theme.tooltip_background,
            border: ctx.theme.tooltip_border,
            text: ctx.theme.tooltip_text,
        }))
    }
}

/// Resolved layout shared by the render passes of one frame.
struct Frame<'a> {
    data: &'a [DataPoint],
    theme: Theme,
    kind: ChartKind,
    width: f64,
    height: f64,
    plot: PlotArea,
    y: LinearScale,
    ticks: Vec<f64>,
}

impl<'a> Frame<'a> {
    fn new(chart: &Chart, data: &'a [DataPoint], theme: Theme) -> Self {
        let (width, height) = chart.size();
        let plot = chart.plot_area();
        let y = LinearScale::vertical(chart.scale_domain(data), plot.top, plot.bottom);
        let ticks = ticks(chart.y_domain(data), chart.y_axis.ticks.as_deref(), DEFAULT_TICK_COUNT)
            .into_iter()
            .filter(|t| t.is_finite())
            .collect();
        Self { data, theme, kind: chart.kind, width, height, plot, y, ticks }
    }

    fn band(&self) -> BandScale { BandScale::new(self.data.len(), self.plot.left, self.plot.right) }

    fn index(&self) -> IndexScale { IndexScale::new(self.data.len(), self.plot.left, self.plot.right) }

    /// X pixel of category `i`: band centre for bars, point position for lines.
    fn x_position(&self, i: usize) -> f64 {
        match self.kind {
            ChartKind::Bar => self.band().band_center(i),
            ChartKind::Line => self.index().position(i),
        }
    }
}

/// Shorthand for a series with a fixed color, used by demos and tests.
pub fn series(key: &str, color: &str) -> Series {
    Series::new(key).colored(Color::hex(color))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn week() -> Vec<DataPoint> {
        [("Mon", 40.0, 10.0), ("Tue", 55.0, 5.0), ("Wed", 70.0, 12.0)]
            .iter()
            .map(|&(day, delivered, failed)| {
                DataPoint::labeled("day", day).with("delivered", delivered).with("failed", failed)
            })
            .collect()
    }

    fn bar_chart() -> Chart {
        Chart::bar()
            .with_x_key("day")
            .with_series(series("delivered", "#3b82f6").with_radius([2.0, 2.0, 0.0, 0.0]))
            .with_series(series("failed", "#6366f1"))
    }

    #[test]
    fn bar_insets_replace_zero_sides() {
        assert_eq!(ChartKind::Bar.insets(&Margin::default()), Insets::new(20.0, 30.0, 20.0, 5.0));
        assert_eq!(ChartKind::Bar.insets(&Margin::new(0.0, 0.0, 0.0, 0.0)), Insets::new(60.0, 30.0, 20.0, 40.0));
    }

    #[test]
    fn line_insets_add_room_to_margin() {
        assert_eq!(ChartKind::Line.insets(&Margin::default()), Insets::new(60.0, 30.0, 25.0, 45.0));
        let m = Margin { top: Some(10.0), ..Margin::default() };
        assert_eq!(ChartKind::Line.insets(&m).top, 30.0);
    }

    #[test]
    fn responsive_line_uses_golden_ratio_height() {
        let mut c = Chart::line();
        c.responsive = true;
        let (w, h) = c.size();
        assert_eq!(w, 700.0);
        assert_abs_diff_eq!(h, 700.0 / 1.618, epsilon = 1e-9);
        assert_eq!(Chart::bar().size(), (700.0, 400.0));
    }

    #[test]
    fn bar_domain_starts_at_zero_and_honours_override() {
        let c = bar_chart();
        assert_eq!(c.y_domain(&week()), Domain::new(0.0, 70.0));
        let c = c.with_y_axis(Axis::default().with_domain(0.0, 100.0));
        assert_eq!(c.y_domain(&week()), Domain::new(0.0, 100.0));
    }

    #[test]
    fn line_domain_is_padded_only_when_automatic() {
        let c = Chart::line().with_series(Series::new("delivered"));
        let d = c.scale_domain(&week());
        assert_abs_diff_eq!(d.min, 37.0, epsilon = 1e-9);
        assert_abs_diff_eq!(d.max, 73.0, epsilon = 1e-9);
        let c = c.with_y_axis(Axis::default().with_domain(0.0, 100.0));
        assert_eq!(c.scale_domain(&week()), Domain::new(0.0, 100.0));
    }

    #[test]
    fn empty_data_renders_single_placeholder() {
        let scene = bar_chart().render(&[], None);
        assert_eq!(scene.nodes.len(), 1);
        assert!(scene.is_placeholder());
    }

    #[test]
    fn bar_scene_has_one_path_per_numeric_cell() {
        let mut data = week();
        data[1].set_number("failed", f64::NAN);
        let scene = bar_chart().render(&data, None);
        assert_eq!(scene.count(|n| matches!(n, Node::Path { .. })), 5);
        assert_eq!(scene.hit_targets().len(), 5);
    }

    #[test]
    fn hovered_bar_is_translucent_and_shows_tooltip() {
        let scene = bar_chart().render(&week(), Some(HoverTarget::new(1, 2)));
        let translucent = scene.count(|n| matches!(n, Node::Path { opacity, .. } if *opacity < 1.0));
        assert_eq!(translucent, 1);
        let tip = scene.tooltip().expect("tooltip");
        assert_eq!(tip.title, "Wed");
        assert_eq!(tip.rows[0].value, "70");
        assert_eq!(tip.rows[1].label, "failed");
        // band centre of the last of three bands
        let plot = bar_chart().plot_area();
        let band = (plot.right - plot.left) / 3.0;
        assert_abs_diff_eq!(tip.rect.x, plot.left + 2.5 * band - 80.0, epsilon = 1e-9);
        assert_abs_diff_eq!(tip.rect.y, plot.top - 60.0, epsilon = 1e-9);
    }

    #[test]
    fn stale_hover_is_ignored() {
        let c = bar_chart();
        let scene = c.render(&week(), Some(HoverTarget::new(7, 0)));
        assert_eq!(scene, c.render(&week(), None));
    }

    #[test]
    fn hovered_line_point_grows() {
        let c = Chart::line().with_x_key("day").with_series(series("delivered", "#3b82f6"));
        let scene = c.render(&week(), Some(HoverTarget::new(0, 1)));
        let radii: Vec<f64> = scene
            .hit_targets()
            .iter()
            .map(|t| match t.shape {
                HitShape::Circle { r, .. } => r,
                HitShape::Rect(_) => 0.0,
            })
            .collect();
        assert_eq!(radii, vec![4.0, 8.0, 4.0]);
        assert_eq!(scene.tooltip().map(|t| t.rows[0].value.as_str()), Some("55.0"));
    }

    #[test]
    fn line_tick_labels_use_one_decimal() {
        let c = Chart::line().with_series(Series::new("delivered"));
        let labels: Vec<String> = c
            .render(&week(), None)
            .nodes
            .iter()
            .filter_map(|n| match n {
                Node::Text { content, style, .. } if style.anchor == TextAnchor::End => Some(content.clone()),
                _ => None,
            })
            .collect();
        assert_eq!(labels, vec!["40.0", "47.5", "55.0", "62.5", "70.0"]);
    }

    #[test]
    fn legend_items_are_spaced_around_centre() {
        let scene = bar_chart().with_legend(true).render(&week(), None);
        let legend = scene.nodes.iter().find_map(|n| match n {
            Node::Group { translate, children } if *translate == (350.0, 390.0) => Some(children),
            _ => None,
        });
        let offsets: Vec<f64> = legend
            .expect("legend group")
            .iter()
            .filter_map(|n| match n {
                Node::Group { translate, .. } => Some(translate.0),
                _ => None,
            })
            .collect();
        assert_eq!(offsets, vec![-120.0, 0.0]);
    }

    #[test]
    fn chart_deserializes_from_toml() {
        let src = r##"
            kind = "line"
            x_key = "day"
            legend = true

            [[series]]
            key = "delivered"
            color = "#3b82f6"
        "##;
        let c: Chart = toml::from_str(src).expect("chart toml");
        assert_eq!(c.kind, ChartKind::Line);
        assert_eq!(c.series.len(), 1);
        assert!(c.tooltip);
        assert_eq!(c.grid.dash, "3 3");
    }
}
