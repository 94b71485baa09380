// File: crates/chart-core/src/scene.rs
// Summary: Backend-neutral scene graph produced by the chart renderer, with SVG serialization.

use std::fmt;

use serde::Serialize;

use crate::color::Color;
use crate::format::format_coord;
use crate::geometry::Rect;
use crate::interaction::{HitTarget, TOOLTIP_WIDTH};
use crate::path::PathData;

pub const PLACEHOLDER_MESSAGE: &str = "No data available";
pub const FONT_FAMILY: &str = "Inter, system-ui, sans-serif";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextAnchor {
    Start,
    Middle,
    End,
}

impl TextAnchor {
    pub fn as_str(&self) -> &'static str {
        match self {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
            TextAnchor::End => "end",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Stroke {
    pub color: Color,
    pub width: f64,
    pub dash: Option<String>,
    /// Round caps and joins.
    pub round: bool,
}

impl Stroke {
    pub fn solid(color: Color, width: f64) -> Self {
        Self { color, width, dash: None, round: false }
    }
    pub fn dashed(color: Color, width: f64, dash: impl Into<String>) -> Self {
        Self { color, width, dash: Some(dash.into()), round: false }
    }
    pub fn rounded(mut self) -> Self {
        self.round = true;
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TextStyle {
    pub size: f64,
    pub fill: Color,
    pub anchor: TextAnchor,
    pub weight: Option<u16>,
}

impl TextStyle {
    pub fn new(size: f64, fill: Color, anchor: TextAnchor) -> Self {
        Self { size, fill, anchor, weight: None }
    }
    pub fn weight(mut self, weight: u16) -> Self {
        self.weight = Some(weight);
        self
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TooltipRow {
    pub label: String,
    pub value: String,
    pub color: Color,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Tooltip {
    pub rect: Rect,
    pub title: String,
    pub rows: Vec<TooltipRow>,
    pub background: Color,
    pub border: Color,
    pub text: Color,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    Line { x1: f64, y1: f64, x2: f64, y2: f64, stroke: Stroke },
    Text { x: f64, y: f64, content: String, style: TextStyle },
    Path {
        d: PathData,
        fill: Option<Color>,
        stroke: Option<Stroke>,
        opacity: f64,
        hit: Option<HitTarget>,
    },
    Circle {
        cx: f64,
        cy: f64,
        r: f64,
        fill: Color,
        stroke: Option<Stroke>,
        hit: Option<HitTarget>,
    },
    Group { translate: (f64, f64), children: Vec<Node> },
    Tooltip(Tooltip),
    Placeholder { x: f64, y: f64, message: String, style: TextStyle },
}

impl Node {
    fn visit<'a>(&'a self, f: &mut impl FnMut(&'a Node)) {
        f(self);
        if let Node::Group { children, .. } = self {
            for c in children {
                c.visit(f);
            }
        }
    }
}

/// Everything needed to draw one chart in logical units.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub background: Color,
    pub nodes: Vec<Node>,
}

impl Scene {
    pub fn new(width: f64, height: f64, background: Color) -> Self {
        Self { width, height, background, nodes: Vec::new() }
    }

    pub fn push(&mut self, node: Node) { self.nodes.push(node); }

    /// Depth-first walk in draw order, groups before their children.
    pub fn walk<'a>(&'a self, mut f: impl FnMut(&'a Node)) {
        for n in &self.nodes {
            n.visit(&mut f);
        }
    }

    /// Number of nodes (including nested ones) matching `pred`.
    pub fn count(&self, pred: impl Fn(&Node) -> bool) -> usize {
        let mut n = 0;
        self.walk(|node| {
            if pred(node) {
                n += 1;
            }
        });
        n
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self.nodes.as_slice(), [Node::Placeholder { .. }])
    }

    /// Hit targets in draw order. Group translations are not applied; hit geometry is
    /// always recorded in absolute logical coordinates.
    pub fn hit_targets(&self) -> Vec<HitTarget> {
        let mut out = Vec::new();
        self.walk(|node| match node {
            Node::Path { hit: Some(h), .. } | Node::Circle { hit: Some(h), .. } => out.push(*h),
            _ => {}
        });
        out
    }

    pub fn tooltip(&self) -> Option<&Tooltip> {
        self.nodes.iter().find_map(|n| match n {
            Node::Tooltip(t) => Some(t),
            _ => None,
        })
    }

    /// Standalone SVG document scaled to its container with `xMidYMid meet`.
    pub fn to_svg(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for Scene {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (w, h) = (format_coord(self.width), format_coord(self.height));
        writeln!(
            f,
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="100%" height="100%" viewBox="0 0 {w} {h}" preserveAspectRatio="xMidYMid meet">"#
        )?;
        writeln!(f, r#"<rect width="{w}" height="{h}" fill="{}"/>"#, self.background)?;
        for node in &self.nodes {
            write_node(f, node)?;
        }
        writeln!(f, "</svg>")
    }
}

fn c(v: f64) -> String { format_coord(v) }

fn write_node(f: &mut fmt::Formatter<'_>, node: &Node) -> fmt::Result {
    match node {
        Node::Line { x1, y1, x2, y2, stroke } => {
            write!(f, r#"<line x1="{}" y1="{}" x2="{}" y2="{}""#, c(*x1), c(*y1), c(*x2), c(*y2))?;
            write_stroke(f, stroke)?;
            writeln!(f, "/>")
        }
        Node::Text { x, y, content, style } => write_text(f, *x, *y, content, style),
        Node::Placeholder { x, y, message, style } => write_text(f, *x, *y, message, style),
        Node::Path { d, fill, stroke, opacity, .. } => {
            write!(f, r#"<path d="{d}""#)?;
            match fill {
                Some(color) => write!(f, r#" fill="{color}""#)?,
                None => write!(f, r#" fill="none""#)?,
            }
            if let Some(s) = stroke {
                write_stroke(f, s)?;
            }
            if *opacity < 1.0 {
                write!(f, r#" opacity="{}""#, c(*opacity))?;
            }
            writeln!(f, "/>")
        }
        Node::Circle { cx, cy, r, fill, stroke, .. } => {
            write!(f, r#"<circle cx="{}" cy="{}" r="{}" fill="{fill}""#, c(*cx), c(*cy), c(*r))?;
            if let Some(s) = stroke {
                write_stroke(f, s)?;
            }
            writeln!(f, "/>")
        }
        Node::Group { translate, children } => {
            writeln!(f, r#"<g transform="translate({}, {})">"#, c(translate.0), c(translate.1))?;
            for child in children {
                write_node(f, child)?;
            }
            writeln!(f, "</g>")
        }
        Node::Tooltip(t) => write_tooltip(f, t),
    }
}

fn write_stroke(f: &mut fmt::Formatter<'_>, s: &Stroke) -> fmt::Result {
    write!(f, r#" stroke="{}" stroke-width="{}""#, s.color, c(s.width))?;
    if let Some(dash) = &s.dash {
        write!(f, r#" stroke-dasharray="{}""#, escape_xml(dash))?;
    }
    if s.round {
        write!(f, r#" stroke-linejoin="round" stroke-linecap="round""#)?;
    }
    Ok(())
}

fn write_text(f: &mut fmt::Formatter<'_>, x: f64, y: f64, content: &str, style: &TextStyle) -> fmt::Result {
    write!(
        f,
        r#"<text x="{}" y="{}" font-family="{FONT_FAMILY}" font-size="{}" fill="{}" text-anchor="{}""#,
        c(x),
        c(y),
        c(style.size),
        style.fill,
        style.anchor.as_str()
    )?;
    if let Some(weight) = style.weight {
        write!(f, r#" font-weight="{weight}""#)?;
    }
    writeln!(f, ">{}</text>", escape_xml(content))
}

fn write_tooltip(f: &mut fmt::Formatter<'_>, t: &Tooltip) -> fmt::Result {
    let Rect { x, y, width, height } = t.rect;
    writeln!(f, r#"<g class="tooltip">"#)?;
    writeln!(
        f,
        r#"<rect x="{}" y="{}" width="{}" height="{}" rx="8" fill="{}" stroke="{}" stroke-width="1"/>"#,
        c(x),
        c(y),
        c(width),
        c(height),
        t.background,
        t.border
    )?;
    let left = x + 12.0;
    let title = TextStyle::new(12.0, t.text, TextAnchor::Start).weight(700);
    write_text(f, left, y + 20.0, &t.title, &title)?;
    for (i, row) in t.rows.iter().enumerate() {
        let ry = y + 38.0 + i as f64 * 16.0;
        write_text(f, left, ry, &format!("{}:", row.label), &TextStyle::new(12.0, row.color, TextAnchor::Start))?;
        let value = TextStyle::new(12.0, row.color, TextAnchor::End).weight(700);
        write_text(f, x + TOOLTIP_WIDTH - 12.0, ry, &row.value, &value)?;
    }
    writeln!(f, "</g>")
}

pub fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interaction::{HitShape, HoverTarget};
    use crate::path::{rounded_rect, CornerRadii};

    fn placeholder_scene() -> Scene {
        let mut s = Scene::new(700.0, 400.0, Color::WHITE);
        s.push(Node::Placeholder {
            x: 350.0,
            y: 200.0,
            message: PLACEHOLDER_MESSAGE.to_string(),
            style: TextStyle::new(14.0, Color::hex("#6b7280"), TextAnchor::Middle),
        });
        s
    }

    #[test]
    fn placeholder_svg_has_no_paths() {
        let s = placeholder_scene();
        assert!(s.is_placeholder());
        let svg = s.to_svg();
        assert!(svg.starts_with("<svg"));
        assert!(svg.contains(r#"viewBox="0 0 700 400""#));
        assert!(svg.contains("No data available"));
        assert!(!svg.contains("<path"));
    }

    #[test]
    fn text_is_escaped() {
        assert_eq!(escape_xml(r#"a<b & "c"'"#), "a&lt;b &amp; &quot;c&quot;&apos;");
    }

    #[test]
    fn hit_targets_are_collected_in_draw_order_through_groups() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let hit = |s| HitTarget { target: HoverTarget::new(s, 0), shape: HitShape::Rect(rect) };
        let mut scene = Scene::new(100.0, 100.0, Color::WHITE);
        scene.push(Node::Path {
            d: rounded_rect(rect, CornerRadii::default()),
            fill: Some(Color::BLACK),
            stroke: None,
            opacity: 1.0,
            hit: Some(hit(0)),
        });
        scene.push(Node::Group {
            translate: (0.0, 0.0),
            children: vec![Node::Circle { cx: 5.0, cy: 5.0, r: 4.0, fill: Color::BLACK, stroke: None, hit: Some(hit(1)) }],
        });
        let targets = scene.hit_targets();
        assert_eq!(targets.len(), 2);
        assert_eq!(targets[1].target.series, 1);
        assert_eq!(scene.count(|n| matches!(n, Node::Circle { .. })), 1);
    }

    #[test]
    fn translucent_path_emits_opacity() {
        let mut scene = Scene::new(10.0, 10.0, Color::WHITE);
        scene.push(Node::Path {
            d: rounded_rect(Rect::new(1.0, 1.0, 2.0, 2.0), CornerRadii::default()),
            fill: Some(Color::BLACK),
            stroke: None,
            opacity: 0.8,
            hit: None,
        });
        assert!(scene.to_svg().contains(r#"opacity="0.8""#));
    }
}
