// File: crates/demo/src/main.rs
// Summary: CLI that renders a chart config + data file to SVG (and optionally PNG), lists region labels
//          from a GeoJSON file and formats KPI card values.

use anyhow::{bail, Context, Result};
use chart_core::{load_chart, parse_feature_collection, parse_records, region_labels, DataPoint, HoverTarget};
use chart_render_skia::{RasterOptions, SkiaRenderer};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "postal-charts")]
#[command(about = "Render postal dashboard charts and map labels")]
#[command(version)]
struct Cli {
    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: tracing::Level,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one chart to SVG
    Chart {
        /// Records: CSV with a header row, or JSON (API envelope or bare array)
        #[arg(short, long)]
        data: PathBuf,

        /// Chart configuration (.toml or .json)
        #[arg(short, long)]
        config: PathBuf,

        /// SVG output path
        #[arg(short, long, default_value = "target/out/chart.svg")]
        out: PathBuf,

        /// Also rasterize to this PNG path
        #[arg(long)]
        png: Option<PathBuf>,

        /// Device pixel ratio for the PNG
        #[arg(long, default_value = "1.0")]
        scale: f32,

        /// Render with a hovered element, as `series,point`
        #[arg(long)]
        hover: Option<String>,
    },

    /// Print the label anchor of every region in a GeoJSON FeatureCollection
    Regions {
        #[arg(short, long)]
        geojson: PathBuf,

        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Format KPI card values the way the dashboard shows them
    Kpi {
        /// Numbers, ISO-8601 durations (P1DT2H) or timestamps
        values: Vec<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt().with_max_level(cli.log_level).with_target(false).init();

    match cli.command {
        Commands::Chart { data, config, out, png, scale, hover } => {
            cmd_chart(&data, &config, &out, png.as_deref(), scale, hover.as_deref())
        }
        Commands::Regions { geojson, json } => cmd_regions(&geojson, json),
        Commands::Kpi { values } => {
            for v in &values {
                println!("{v}\t{}", kpi(v));
            }
            Ok(())
        }
    }
}

fn cmd_chart(
    data: &Path,
    config: &Path,
    out: &Path,
    png: Option<&Path>,
    scale: f32,
    hover: Option<&str>,
) -> Result<()> {
    let chart = load_chart(config).with_context(|| format!("loading chart config '{}'", config.display()))?;
    let records = load_records(data).with_context(|| format!("loading data '{}'", data.display()))?;
    tracing::info!(records = records.len(), series = chart.series.len(), "rendering {:?} chart", chart.kind);

    let hover = hover.map(parse_hover).transpose()?;
    let scene = chart.render(&records, hover);

    write_file(out, scene.to_svg().as_bytes())?;
    println!("Wrote {}", out.display());

    if let Some(png) = png {
        SkiaRenderer::new(RasterOptions { scale, draw_text: true })
            .render_to_png(&scene, png)
            .with_context(|| format!("rasterizing to '{}'", png.display()))?;
        println!("Wrote {}", png.display());
    }
    Ok(())
}

fn cmd_regions(geojson: &Path, json: bool) -> Result<()> {
    let src = std::fs::read_to_string(geojson).with_context(|| format!("reading '{}'", geojson.display()))?;
    let collection = parse_feature_collection(&src)?;
    let labels = region_labels(&collection);
    tracing::info!(features = collection.features.len(), labels = labels.len(), "computed region labels");

    if json {
        println!("{}", serde_json::to_string_pretty(&labels)?);
        return Ok(());
    }
    for l in &labels {
        let id = l.state_id().map(|n| n.to_string()).unwrap_or_else(|| "-".to_string());
        println!("{:>4}  {:<24} ({:.4}, {:.4})", id, l.name, l.position.0, l.position.1);
    }
    Ok(())
}

fn kpi(raw: &str) -> String {
    match raw.trim().parse::<f64>() {
        Ok(v) => chart_core::format_kpi_value(v),
        Err(_) => chart_core::format_kpi_value(raw),
    }
}

/// Load records by extension: `.csv` through the csv reader, anything else as JSON.
fn load_records(path: &Path) -> Result<Vec<DataPoint>> {
    let is_csv = path.extension().and_then(|e| e.to_str()).is_some_and(|e| e.eq_ignore_ascii_case("csv"));
    if !is_csv {
        let src = std::fs::read_to_string(path)?;
        return Ok(parse_records(&src)?);
    }

    let mut rdr = csv::ReaderBuilder::new().has_headers(true).trim(csv::Trim::All).from_path(path)?;
    let headers = rdr.headers()?.clone();
    tracing::debug!(?headers, "csv headers");
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        out.push(chart_core::data::record_from_cells(headers.iter().zip(rec.iter())));
    }
    Ok(out)
}

fn parse_hover(raw: &str) -> Result<HoverTarget> {
    let Some((s, p)) = raw.split_once(',') else {
        bail!("--hover expects `series,point`, got '{raw}'");
    };
    let series = s.trim().parse().with_context(|| format!("bad series index '{s}'"))?;
    let point = p.trim().parse().with_context(|| format!("bad point index '{p}'"))?;
    Ok(HoverTarget::new(series, point))
}

fn write_file(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, bytes).with_context(|| format!("writing '{}'", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_argument_parsing() {
        assert_eq!(parse_hover("1, 4").unwrap(), HoverTarget::new(1, 4));
        assert!(parse_hover("3").is_err());
        assert!(parse_hover("a,1").is_err());
    }

    #[test]
    fn kpi_accepts_numbers_and_text() {
        assert_eq!(kpi("0.953"), "95.3%");
        assert_eq!(kpi("P1DT2H"), "1d 2h");
    }

    #[test]
    fn csv_records_keep_numbers_and_labels() {
        let dir = std::env::temp_dir().join("postal-charts-test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("week.csv");
        std::fs::write(&path, "day,delivered\nLun, 12\nMar,\n").unwrap();
        let records = load_records(&path).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].label("day"), "Lun");
        assert_eq!(records[0].number("delivered"), Some(12.0));
        assert_eq!(records[1].number("delivered"), None);
    }

    #[test]
    fn bundled_inputs_render() {
        let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data");
        let week = load_records(&dir.join("week.csv")).unwrap();
        assert_eq!(week.len(), 7);
        for config in ["volume.toml", "rate.json"] {
            let chart = load_chart(dir.join(config)).unwrap();
            let scene = chart.render(&week, Some(HoverTarget::new(0, 3)));
            assert!(!scene.is_placeholder(), "{config}");
            assert!(scene.tooltip().is_some(), "{config}");
        }
        let regions = std::fs::read_to_string(dir.join("regions.geojson")).unwrap();
        let labels = region_labels(&parse_feature_collection(&regions).unwrap());
        assert_eq!(labels.iter().map(|l| l.state_id()).collect::<Vec<_>>(), vec![Some(11), Some(34)]);
    }
}
