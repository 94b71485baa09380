// File: crates/chart-render-skia/src/lib.rs
// Summary: Skia CPU raster backend for chart-core scenes: PNG bytes, PNG files and RGBA8 buffers.

use anyhow::{anyhow, Result};
use skia_safe as skia;

use chart_core::path::{PathCommand, PathData};
use chart_core::scene::{Node, Scene, Stroke, TextAnchor, TextStyle, Tooltip};
use chart_core::Color;

pub mod text;
pub use text::TextShaper;

/// Smallest device pixel ratio the renderer accepts.
pub const MIN_SCALE: f32 = 0.01;

/// Raster options. `scale` multiplies the scene's logical size (device pixel ratio).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RasterOptions {
    pub scale: f32,
    /// Text is the only platform-dependent output; snapshot tests turn it off.
    pub draw_text: bool,
}

impl Default for RasterOptions {
    fn default() -> Self { Self { scale: 1.0, draw_text: true } }
}

pub struct SkiaRenderer {
    opts: RasterOptions,
    shaper: TextShaper,
}

impl Default for SkiaRenderer {
    fn default() -> Self { Self::new(RasterOptions::default()) }
}

impl SkiaRenderer {
    pub fn new(opts: RasterOptions) -> Self {
        Self { opts, shaper: TextShaper::new() }
    }

    pub fn options(&self) -> RasterOptions { self.opts }

    /// Device pixel ratio actually applied: `scale` raised to `MIN_SCALE`, or 1 when not finite.
    pub fn scale_factor(&self) -> f32 {
        let s = self.opts.scale;
        if s.is_finite() { s.max(MIN_SCALE) } else { 1.0 }
    }

    /// Pixel size of the raster for `scene`.
    pub fn pixel_size(&self, scene: &Scene) -> (i32, i32) {
        let s = self.scale_factor() as f64;
        ((scene.width * s).round().max(1.0) as i32, (scene.height * s).round().max(1.0) as i32)
    }

    fn draw_surface(&self, scene: &Scene) -> Result<skia::Surface> {
        let (w, h) = self.pixel_size(scene);
        let mut surface = skia::surfaces::raster_n32_premul((w, h))
            .ok_or_else(|| anyhow!("failed to create {w}x{h} raster surface"))?;
        let canvas = surface.canvas();
        canvas.clear(sk_color(scene.background));
        let s = self.scale_factor();
        canvas.scale((s, s));
        for node in &scene.nodes {
            self.draw_node(canvas, node);
        }
        log::debug!("rasterized {} nodes into {w}x{h}", scene.nodes.len());
        Ok(surface)
    }

    /// Encode the scene as PNG.
    pub fn render_png_bytes(&self, scene: &Scene) -> Result<Vec<u8>> {
        let mut surface = self.draw_surface(scene)?;
        let image = surface.image_snapshot();
        #[allow(deprecated)]
        let data = image
            .encode_to_data(skia::EncodedImageFormat::PNG)
            .ok_or_else(|| anyhow!("encode PNG failed"))?;
        Ok(data.as_bytes().to_vec())
    }

    /// Render the scene to a PNG at `output_png_path`, creating parent directories.
    pub fn render_to_png(&self, scene: &Scene, output_png_path: impl AsRef<std::path::Path>) -> Result<()> {
        let bytes = self.render_png_bytes(scene)?;
        if let Some(parent) = output_png_path.as_ref().parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(output_png_path, bytes)?;
        Ok(())
    }

    /// Unpremultiplied RGBA8 pixels: `(pixels, width, height, row_bytes)`.
    pub fn render_rgba8(&self, scene: &Scene) -> Result<(Vec<u8>, u32, u32, usize)> {
        let mut surface = self.draw_surface(scene)?;
        let (w, h) = self.pixel_size(scene);
        let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
        let row_bytes = w as usize * 4;
        let mut pixels = vec![0u8; row_bytes * h as usize];
        if !surface.read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
            return Err(anyhow!("reading back {w}x{h} pixels failed"));
        }
        Ok((pixels, w as u32, h as u32, row_bytes))
    }

    fn draw_node(&self, canvas: &skia::Canvas, node: &Node) {
        match node {
            Node::Line { x1, y1, x2, y2, stroke } => {
                canvas.draw_line(pt(*x1, *y1), pt(*x2, *y2), &stroke_paint(stroke));
            }
            Node::Text { x, y, content, style } | Node::Placeholder { x, y, message: content, style } => {
                self.draw_text(canvas, *x, *y, content, style);
            }
            Node::Path { d, fill, stroke, opacity, .. } => {
                let path = sk_path(d);
                if let Some(color) = fill {
                    let mut paint = fill_paint(*color);
                    paint.set_alpha_f(paint.alpha_f() * (*opacity as f32).clamp(0.0, 1.0));
                    canvas.draw_path(&path, &paint);
                }
                if let Some(s) = stroke {
                    canvas.draw_path(&path, &stroke_paint(s));
                }
            }
            Node::Circle { cx, cy, r, fill, stroke, .. } => {
                canvas.draw_circle(pt(*cx, *cy), *r as f32, &fill_paint(*fill));
                if let Some(s) = stroke {
                    canvas.draw_circle(pt(*cx, *cy), *r as f32, &stroke_paint(s));
                }
            }
            Node::Group { translate, children } => {
                canvas.save();
                canvas.translate(pt(translate.0, translate.1));
                for child in children {
                    self.draw_node(canvas, child);
                }
                canvas.restore();
            }
            Node::Tooltip(t) => self.draw_tooltip(canvas, t),
        }
    }

    fn draw_text(&self, canvas: &skia::Canvas, x: f64, y: f64, content: &str, style: &TextStyle) {
        if !self.opts.draw_text || content.is_empty() {
            return;
        }
        self.shaper.draw(
            canvas,
            content,
            x as f32,
            y as f32,
            style.size as f32,
            sk_color(style.fill),
            style.anchor,
            style.weight,
        );
    }

    fn draw_tooltip(&self, canvas: &skia::Canvas, t: &Tooltip) {
        let r = t.rect;
        let rect = skia::Rect::from_xywh(r.x as f32, r.y as f32, r.width as f32, r.height as f32);
        canvas.draw_round_rect(rect, 8.0, 8.0, &fill_paint(t.background));
        canvas.draw_round_rect(rect, 8.0, 8.0, &stroke_paint(&Stroke::solid(t.border, 1.0)));

        let left = r.x + 12.0;
        self.draw_text(canvas, left, r.y + 20.0, &t.title, &TextStyle::new(12.0, t.text, TextAnchor::Start).weight(700));
        for (i, row) in t.rows.iter().enumerate() {
            let y = r.y + 38.0 + i as f64 * 16.0;
            self.draw_text(canvas, left, y, &format!("{}:", row.label), &TextStyle::new(12.0, row.color, TextAnchor::Start));
            let value = TextStyle::new(12.0, row.color, TextAnchor::End).weight(700);
            self.draw_text(canvas, r.x + r.width - 12.0, y, &row.value, &value);
        }
    }
}

// ---- helpers ----------------------------------------------------------------

fn pt(x: f64, y: f64) -> skia::Point { skia::Point::new(x as f32, y as f32) }

fn sk_color(c: Color) -> skia::Color { skia::Color::from_argb(c.a, c.r, c.g, c.b) }

fn fill_paint(color: Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint.set_color(sk_color(color));
    paint
}

fn stroke_paint(stroke: &Stroke) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(stroke.width as f32);
    paint.set_color(sk_color(stroke.color));
    if stroke.round {
        paint.set_stroke_cap(skia::paint::Cap::Round);
        paint.set_stroke_join(skia::paint::Join::Round);
    }
    if let Some(intervals) = stroke.dash.as_deref().and_then(dash_intervals) {
        paint.set_path_effect(skia::PathEffect::dash(&intervals, 0.0));
    }
    paint
}

/// Parse an SVG `stroke-dasharray` ("3 3", "4,2"). Odd-length lists repeat, as in SVG.
fn dash_intervals(spec: &str) -> Option<Vec<f32>> {
    let mut v: Vec<f32> = spec
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f32>().ok().filter(|x| x.is_finite() && *x >= 0.0))
        .collect::<Option<_>>()?;
    if v.is_empty() || v.iter().all(|x| *x == 0.0) {
        return None;
    }
    if v.len() % 2 == 1 {
        v.extend_from_within(..);
    }
    Some(v)
}

fn sk_path(d: &PathData) -> skia::Path {
    let mut path = skia::Path::new();
    for cmd in d.commands() {
        match *cmd {
            PathCommand::MoveTo(x, y) => { path.move_to(pt(x, y)); }
            PathCommand::LineTo(x, y) => { path.line_to(pt(x, y)); }
            PathCommand::QuadTo(cx, cy, x, y) => { path.quad_to(pt(cx, cy), pt(x, y)); }
            PathCommand::Close => { path.close(); }
        }
    }
    path
}
