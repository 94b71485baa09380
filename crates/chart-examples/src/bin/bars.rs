// File: crates/chart-examples/src/bin/bars.rs
// Summary: Minimal example that renders delivered/failed parcels per site as a grouped bar chart.

use anyhow::Result;
use chart_core::chart::series;
use chart_core::{Axis, Chart, CornerRadii, DataPoint};
use chart_render_skia::SkiaRenderer;

fn main() -> Result<()> {
    let sites = [("Tunis", 3120.0, 140.0), ("Sfax", 2210.0, 96.0), ("Sousse", 1875.0, 120.0), ("Gabès", 940.0, 33.0)];
    let data: Vec<DataPoint> = sites
        .iter()
        .map(|&(site, ok, ko)| DataPoint::labeled("site", site).with("delivered", ok).with("failed", ko))
        .collect();

    let chart = Chart::bar()
        .with_x_key("site")
        .with_legend(true)
        .with_y_axis(Axis::default().with_domain(0.0, 3500.0))
        .with_series(series("delivered", "#3b82f6").named("Livrés").with_radius(CornerRadii::top(6.0)))
        .with_series(series("failed", "#ef4444").named("Échecs").with_radius(CornerRadii::top(6.0)));

    let scene = chart.render(&data, None);

    let out = std::path::PathBuf::from("target/out/example_bars.svg");
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&out, scene.to_svg())?;
    println!("Wrote {}", out.display());

    let png = out.with_extension("png");
    SkiaRenderer::default().render_to_png(&scene, &png)?;
    println!("Wrote {}", png.display());
    Ok(())
}
