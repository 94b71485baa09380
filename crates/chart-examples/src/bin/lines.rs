// File: crates/chart-examples/src/bin/lines.rs
// Summary: Minimal example that renders a monthly delivery trend line chart to SVG and PNG.

use anyhow::Result;
use chart_core::chart::series;
use chart_core::{Chart, DataPoint, HoverTarget};
use chart_render_skia::SkiaRenderer;

fn main() -> Result<()> {
    let months = ["Jan", "Fév", "Mar", "Avr", "Mai", "Juin", "Juil", "Août", "Sep", "Oct", "Nov", "Déc"];
    let data: Vec<DataPoint> = months
        .iter()
        .enumerate()
        .map(|(i, m)| {
            let t = i as f64;
            DataPoint::labeled("month", *m)
                .with("parcels", 42_000.0 + (t * 0.6).sin() * 6_000.0 + t * 900.0)
                .with("letters", 61_000.0 - t * 2_100.0)
        })
        .collect();

    let chart = Chart::line()
        .with_x_key("month")
        .with_title("Volume mensuel")
        .with_legend(true)
        .with_series(series("parcels", "#3b82f6").named("Colis"))
        .with_series(series("letters", "#f59e0b").named("Courrier"));

    let scene = chart.render(&data, Some(HoverTarget::new(0, 5)));

    let out = std::path::PathBuf::from("target/out/example_lines.svg");
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
