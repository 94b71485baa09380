// File: crates/chart-core/src/theme.rs
// Summary: Light/Dark theming for chart rendering colors.

use crate::color::Color;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub background: Color,
    pub grid: Color,
    pub axis: Color,
    pub title: Color,
    pub legend_text: Color,
    pub placeholder_text: Color,
    pub tooltip_background: Color,
    pub tooltip_border: Color,
    pub tooltip_text: Color,
    pub dot_outline: Color,
    pub series_default: Color,
}

impl Theme {
    /// Dashboard default: white card, grey axes, dark tooltip.
    pub fn light() -> Self {
        Self {
            name: "light",
            background: Color::WHITE,
            grid: Color::rgb(0xe5, 0xe7, 0xeb),
            axis: Color::rgb(0x6b, 0x72, 0x80),
            title: Color::rgb(0x11, 0x18, 0x27),
            legend_text: Color::rgb(0x37, 0x41, 0x51),
            placeholder_text: Color::rgb(0x6b, 0x72, 0x80),
            tooltip_background: Color::rgb(0x1f, 0x29, 0x37),
            tooltip_border: Color::rgb(0x37, 0x41, 0x51),
            tooltip_text: Color::WHITE,
            dot_outline: Color::WHITE,
            series_default: Color::rgb(0x88, 0x84, 0xd8),
        }
    }

    pub fn dark() -> Self {
        Self {
            name: "dark",
            background: Color::rgb(18, 18, 20),
            grid: Color::rgb(40, 40, 45),
            axis: Color::rgb(180, 180, 190),
            title: Color::rgb(235, 235, 245),
            legend_text: Color::rgb(210, 210, 220),
            placeholder_text: Color::rgb(150, 150, 160),
            tooltip_background: Color::rgb(0x37, 0x41, 0x51),
            tooltip_border: Color::rgb(0x6b, 0x72, 0x80),
            tooltip_text: Color::WHITE,
            dot_outline: Color::rgb(18, 18, 20),
            series_default: Color::rgb(64, 160, 255),
        }
    }
}

impl Default for Theme {
    fn default() -> Self { Self::light() }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::light(), Theme::dark()]
}

/// Find a theme by its `name`, falling back to light.
pub fn find(name: &str) -> Theme {
    for t in presets() { if t.name.eq_ignore_ascii_case(name) { return t; } }
    Theme::light()
}
