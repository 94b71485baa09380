// File: crates/chart-dioxus/src/lib.rs
// Summary: Dioxus desktop bindings: a ChartCanvas component that mounts a ChartView and feeds it pointer events.
// Notes:
// - UI deps stay behind the `desktop` feature; the sample dashboard data builds without them.
// - The canvas shows the scene as an SVG data URL scaled with `object-fit: contain`, which matches
//   `Viewport::fit`, so element coordinates map back to logical chart units.

use chart_core::chart::series;
use chart_core::{Chart, ChartView, DataPoint};

const WEEK: [(&str, f64, f64, f64); 7] = [
    ("Lun", 1240.0, 86.0, 93.1),
    ("Mar", 1318.0, 71.0, 94.6),
    ("Mer", 1187.0, 95.0, 92.0),
    ("Jeu", 1402.0, 64.0, 95.6),
    ("Ven", 1529.0, 110.0, 93.3),
    ("Sam", 802.0, 41.0, 95.1),
    ("Dim", 214.0, 9.0, 96.0),
];

/// Last week of delivery counts, as the dashboard API returns them.
pub fn sample_week() -> Vec<DataPoint> {
    WEEK.iter()
        .map(|&(day, delivered, failed, rate)| {
            DataPoint::labeled("day", day).with("delivered", delivered).with("failed", failed).with("rate", rate)
        })
        .collect()
}

/// Delivered vs failed parcels per day.
pub fn volume_chart() -> Chart {
    Chart::bar()
        .with_x_key("day")
        .with_legend(true)
        .with_series(series("delivered", "#3b82f6").named("Livrés").with_radius(4.0))
        .with_series(series("failed", "#ef4444").named("Échecs").with_radius(4.0))
}

/// Daily on-time delivery rate.
pub fn rate_chart() -> Chart {
    Chart::line()
        .with_x_key("day")
        .with_title("Taux de livraison (%)")
        .with_series(series("rate", "#10b981").named("Taux"))
}

/// Views mounted by the demo dashboard.
pub fn demo_views() -> Vec<ChartView> {
    let week = sample_week();
    vec![ChartView::new(volume_chart(), week.clone()), ChartView::new(rate_chart(), week)]
}

#[cfg(feature = "desktop")]
pub mod ui {
    use super::*;
    use base64::Engine as _;
    use dioxus::prelude::*;

    /// `data:` URL for the current scene of `view`.
    pub fn svg_data_url(view: &ChartView) -> String {
        let b64 = base64::engine::general_purpose::STANDARD.encode(view.svg());
        format!("data:image/svg+xml;base64,{b64}")
    }

    #[derive(Props, Clone, PartialEq)]
    pub struct ChartCanvasProps {
        pub chart: Chart,
        pub data: Vec<DataPoint>,
        /// Container width in pixels
        #[props(default = 700)]
        pub width_px: i32,
        /// Container height in pixels
        #[props(default = 400)]
        pub height_px: i32,
    }

    /// Mounts one chart. New `chart`/`data` props replace the mounted ones; mouse moves
    /// are hit-tested against the scene and leaving the container clears the hover.
    #[component]
    pub fn ChartCanvas(props: ChartCanvasProps) -> Element {
        let mut view = use_signal(|| ChartView::new(props.chart.clone(), props.data.clone()));
        let (w, h) = (props.width_px.max(1), props.height_px.max(1));

        use_effect(use_reactive((&props.chart, &props.data), move |(chart, data)| {
            if view.peek().chart() != &chart || view.peek().data() != data.as_slice() {
                log::debug!("chart props changed, rebuilding view");
                view.write().sync(&chart, &data);
            }
        }));

        let src = svg_data_url(&view.read());

        rsx! {
            div {
                style: format!("position:relative; width:{w}px; height:{h}px; background:#fff; border-radius:8px;"),
                onmousemove: move |evt: MouseEvent| {
                    let p = evt.element_coordinates();
                    let (cw, ch) = (w as f64, h as f64);
                    // peek first so an unchanged hover does not trigger a re-render
                    let next = view.peek().hover_at(p.x, p.y, cw, ch);
                    if next != view.peek().hovered() {
                        log::trace!("hover -> {next:?}");
                        view.write().pointer_move_in(p.x, p.y, cw, ch);
                    }
                },
                onmouseleave: move |_| {
                    if view.peek().hovered().is_some() {
                        view.write().pointer_leave();
                    }
                },
                img {
                    style: "position:absolute; inset:0; width:100%; height:100%; object-fit:contain; pointer-events:none;",
                    src: src,
                }
            }
        }
    }

    /// Tiny demo launcher: the sample week as a bar chart and a line chart.
    pub fn run_demo_ui() -> Result<(), String> {
        #[component]
        fn App() -> Element {
            let views = demo_views();
            rsx! {
                div { style: "display:flex; flex-direction:column; gap:16px; padding:16px; background:#f3f4f6;",
                    for (i, v) in views.into_iter().enumerate() {
                        ChartCanvas { key: "{i}", chart: v.chart().clone(), data: v.data().to_vec() }
                    }
                }
            }
        }

        let cfg = dioxus_desktop::Config::new()
            .with_prerendered("<style>html,body{margin:0;height:100%}</style>".to_string());
        let providers: Vec<Box<dyn Fn() -> Box<dyn std::any::Any> + Send + Sync>> = Vec::new();
        let globals: Vec<Box<dyn std::any::Any>> = vec![Box::new(cfg)];
        dioxus_desktop::launch::launch(App, providers, globals);
        Ok(())
    }
}

/// Fallback when the `desktop` feature is not enabled.
#[cfg(not(feature = "desktop"))]
pub fn run_demo_ui() -> Result<(), &'static str> {
    Err("chart-dioxus built without `desktop` feature; enable features to run UI demo")
}

#[cfg(test)]
mod tests {
    use super::*;
    use chart_core::HoverTarget;

    #[test]
    fn sample_week_has_all_series() {
        let week = sample_week();
        assert_eq!(week.len(), 7);
        for key in ["delivered", "failed", "rate"] {
            assert!(week.iter().all(|p| p.number(key).is_some()), "{key} missing");
        }
    }

    #[test]
    fn demo_views_render_and_hover() {
        let mut views = demo_views();
        assert_eq!(views.len(), 2);
        for v in &views {
            assert!(!v.scene().is_placeholder());
        }
        // hover the first dot of the rate line through its own hit target
        let rate = &mut views[1];
        let (cx, cy) = rate
            .scene()
            .hit_targets()
            .into_iter()
            .find(|t| t.target == HoverTarget::new(0, 0))
            .map(|t| match t.shape {
                chart_core::interaction::HitShape::Circle { cx, cy, .. } => (cx, cy),
                chart_core::interaction::HitShape::Rect(r) => (r.x + r.width / 2.0, r.y + r.height / 2.0),
            })
            .expect("first dot is a hit target");
        assert!(rate.pointer_move(cx, cy));
        assert_eq!(rate.hovered(), Some(HoverTarget::new(0, 0)));
        assert!(rate.scene().tooltip().is_some());
    }

    #[test]
    fn canvas_hover_check_matches_pointer_move() {
        let mut views = demo_views();
        let volume = &mut views[0];
        let (w, h) = (700.0, 400.0);
        let target = volume.scene().hit_targets()[2];
        let chart_core::interaction::HitShape::Rect(r) = target.shape else { panic!("bar rect") };
        let (px, py) = (r.x + r.width / 2.0, r.bottom() - 2.0);
        let next = volume.hover_at(px, py, w, h);
        assert_eq!(next, Some(target.target));
        assert!(volume.pointer_move_in(px, py, w, h));
        assert_eq!(volume.hovered(), next);
        // same spot again: nothing to write
        assert_eq!(volume.hover_at(px, py, w, h), volume.hovered());
    }

    #[test]
    fn new_props_replace_mounted_chart() {
        let mut view = ChartView::new(volume_chart(), sample_week());
        view.pointer_enter(HoverTarget::new(0, 0));
        let shorter: Vec<DataPoint> = sample_week().into_iter().take(3).collect();
        assert!(view.sync(&volume_chart(), &shorter));
        assert_eq!(view.data().len(), 3);
        assert_eq!(view.hovered(), None);
        assert!(view.sync(&rate_chart(), &shorter));
        let targets = view.scene().hit_targets();
        assert!(targets.iter().all(|t| matches!(t.shape, chart_core::interaction::HitShape::Circle { .. })));
        assert!(!view.sync(&rate_chart(), &shorter));
    }

    #[cfg(not(feature = "desktop"))]
    #[test]
    fn demo_requires_desktop_feature() {
        assert!(run_demo_ui().is_err());
    }
}
