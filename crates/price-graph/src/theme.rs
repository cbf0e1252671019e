// File: crates/price-graph/src/theme.rs
// Summary: Built-in dark/light themes and field-wise merging of user overrides.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::Deserialize;
use skia_safe as skia;
use tracing::{debug, warn};

use crate::analysis::PriceTone;
use crate::error::{Error, Result};

/// Dash pattern for reference lines.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(try_from = "String")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
    DashDot,
}

impl LineStyle {
    /// On/off intervals scaled to the stroke width; `None` for solid lines.
    pub fn dash_intervals(&self, width: f32) -> Option<Vec<f32>> {
        let w = width.max(1.0);
        match self {
            LineStyle::Solid => None,
            LineStyle::Dashed => Some(vec![3.7 * w, 1.6 * w]),
            LineStyle::Dotted => Some(vec![w, 1.65 * w]),
            LineStyle::DashDot => Some(vec![6.4 * w, 1.6 * w, w, 1.6 * w]),
        }
    }
}

impl FromStr for LineStyle {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "-" | "solid" => Ok(LineStyle::Solid),
            "--" | "dashed" => Ok(LineStyle::Dashed),
            ":" | "dotted" => Ok(LineStyle::Dotted),
            "-." | "dashdot" => Ok(LineStyle::DashDot),
            other => Err(format!("unknown line style '{other}'")),
        }
    }
}

impl TryFrom<String> for LineStyle {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

/// Color parsed from `#rgb`, `#rrggbb`, `#rrggbbaa` or `none`.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(try_from = "String")]
pub struct HexColor(pub skia::Color);

impl FromStr for HexColor {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let raw = s.trim();
        if raw.eq_ignore_ascii_case("none") {
            return Ok(HexColor(skia::Color::TRANSPARENT));
        }
        let hex = raw.strip_prefix('#').ok_or_else(|| format!("invalid color '{raw}'"))?;
        if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(format!("invalid color '{raw}'"));
        }
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|e| e.to_string());
        let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).map(|v| v * 17).map_err(|e| e.to_string());
        let (r, g, b, a) = match hex.len() {
            3 => (nibble(0)?, nibble(1)?, nibble(2)?, 255),
            6 => (byte(0)?, byte(2)?, byte(4)?, 255),
            8 => (byte(0)?, byte(2)?, byte(4)?, byte(6)?),
            _ => return Err(format!("invalid color '{raw}'")),
        };
        Ok(HexColor(skia::Color::from_argb(a, r, g, b)))
    }
}

impl TryFrom<String> for HexColor {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Theme {
    pub name: &'static str,
    pub avgline_color: skia::Color,
    pub avgline_style: LineStyle,
    pub axis_label_color: skia::Color,
    pub background_color: skia::Color,
    pub cheap_price_color: skia::Color,
    pub cheapline_color: skia::Color,
    pub cheapline_style: LineStyle,
    pub fill_alpha: f32,
    pub fill_color: skia::Color,
    pub grid_alpha: f32,
    pub grid_color: skia::Color,
    pub label_color: skia::Color,
    pub label_color_avg: skia::Color,
    pub label_color_max: skia::Color,
    pub label_color_min: skia::Color,
    /// Outline text in the background color.
    pub label_stroke: bool,
    pub nowline_alpha: f32,
    pub nowline_color: skia::Color,
    pub plot_linewidth: f32,
    pub price_line_color: skia::Color,
    pub price_line_color_above_avg: skia::Color,
    pub price_line_color_below_avg: skia::Color,
    pub price_line_color_near_avg: skia::Color,
    pub spine_color: skia::Color,
    pub tick_color: skia::Color,
    pub tickline_color: skia::Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            avgline_color: skia::Color::from_rgb(0xfc, 0xd3, 0x4d),
            avgline_style: LineStyle::Dotted,
            axis_label_color: skia::Color::from_rgb(0xcf, 0xd6, 0xe6),
            background_color: skia::Color::from_rgb(0x0b, 0x0f, 0x14),
            cheap_price_color: skia::Color::from_rgb(0x22, 0xc5, 0x5e),
            cheapline_color: skia::Color::from_rgb(0x6e, 0xe7, 0xb7),
            cheapline_style: LineStyle::Dashed,
            fill_alpha: 0.18,
            fill_color: skia::Color::from_rgb(0x7d, 0xc3, 0xff),
            grid_alpha: 0.45,
            grid_color: skia::Color::from_rgb(0x2a, 0x2f, 0x36),
            label_color: skia::Color::from_rgb(0xe6, 0xed, 0xf3),
            label_color_avg: skia::Color::from_rgb(0xfc, 0xd3, 0x4d),
            label_color_max: skia::Color::from_rgb(0xf8, 0x71, 0x71),
            label_color_min: skia::Color::from_rgb(0x6e, 0xe7, 0xb7),
            label_stroke: true,
            nowline_alpha: 0.5,
            nowline_color: skia::Color::from_rgb(0xff, 0x6b, 0x6b),
            plot_linewidth: 2.2,
            price_line_color: skia::Color::from_rgb(0x7d, 0xc3, 0xff),
            price_line_color_above_avg: skia::Color::from_rgb(0xf8, 0x71, 0x71),
            price_line_color_below_avg: skia::Color::from_rgb(0x7d, 0xc3, 0xff),
            price_line_color_near_avg: skia::Color::from_rgb(0xfc, 0xd3, 0x4d),
            spine_color: skia::Color::from_rgb(0x3a, 0x42, 0x50),
            tick_color: skia::Color::from_rgb(0xcf, 0xd6, 0xe6),
            tickline_color: skia::Color::from_rgb(0x1f, 0x25, 0x30),
        }
    }

    pub fn light() -> Self {
        Self {
            name: "light",
            avgline_color: skia::Color::from_rgb(0xfb, 0xbf, 0x24),
            avgline_style: LineStyle::Dotted,
            axis_label_color: skia::Color::from_rgb(0x00, 0x00, 0x00),
            background_color: skia::Color::WHITE,
            cheap_price_color: skia::Color::from_rgb(0x16, 0xa3, 0x4a),
            cheapline_color: skia::Color::from_rgb(0x22, 0xc5, 0x5e),
            cheapline_style: LineStyle::Dashed,
            fill_alpha: 0.25,
            fill_color: skia::Color::from_rgb(0x03, 0x9b, 0xe5),
            grid_alpha: 0.25,
            grid_color: skia::Color::from_rgb(0x80, 0x80, 0x80),
            label_color: skia::Color::from_rgb(0x00, 0x00, 0x00),
            label_color_avg: skia::Color::from_rgb(0xfb, 0xbf, 0x24),
            label_color_max: skia::Color::from_rgb(0xef, 0x44, 0x44),
            label_color_min: skia::Color::from_rgb(0x22, 0xc5, 0x5e),
            label_stroke: false,
            nowline_alpha: 0.35,
            nowline_color: skia::Color::from_rgb(0xff, 0x00, 0x00),
            plot_linewidth: 2.0,
            price_line_color: skia::Color::from_rgb(0x03, 0x9b, 0xe5),
            price_line_color_above_avg: skia::Color::from_rgb(0xef, 0x44, 0x44),
            price_line_color_below_avg: skia::Color::from_rgb(0x03, 0x9b, 0xe5),
            price_line_color_near_avg: skia::Color::from_rgb(0xf5, 0x9e, 0x0b),
            spine_color: skia::Color::from_rgb(0xcc, 0xcc, 0xcc),
            tick_color: skia::Color::from_rgb(0x00, 0x00, 0x00),
            tickline_color: skia::Color::from_rgb(0xe0, 0xe0, 0xe0),
        }
    }

    /// Line color for a price on the given side of the average.
    pub fn tone_color(&self, tone: PriceTone) -> skia::Color {
        match tone {
            PriceTone::Below => self.price_line_color_below_avg,
            PriceTone::Near => self.price_line_color_near_avg,
            PriceTone::Above => self.price_line_color_above_avg,
        }
    }
}

/// Return a list of built-in theme presets.
pub fn presets() -> Vec<Theme> {
    vec![Theme::dark(), Theme::light()]
}

/// Built-in theme by name, case-insensitive.
pub fn builtin(name: &str) -> Option<Theme> {
    presets().into_iter().find(|t| t.name.eq_ignore_ascii_case(name.trim()))
}

/// User overrides; every property is optional and unknown keys are kept
/// only so they can be reported.
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(default)]
pub struct CustomTheme {
    pub avgline_color: Option<HexColor>,
    pub avgline_style: Option<LineStyle>,
    pub axis_label_color: Option<HexColor>,
    pub background_color: Option<HexColor>,
    pub cheap_price_color: Option<HexColor>,
    pub cheapline_color: Option<HexColor>,
    pub cheapline_style: Option<LineStyle>,
    pub fill_alpha: Option<f32>,
    pub fill_color: Option<HexColor>,
    pub grid_alpha: Option<f32>,
    pub grid_color: Option<HexColor>,
    pub label_color: Option<HexColor>,
    pub label_color_avg: Option<HexColor>,
    pub label_color_max: Option<HexColor>,
    pub label_color_min: Option<HexColor>,
    pub label_stroke: Option<bool>,
    pub nowline_alpha: Option<f32>,
    pub nowline_color: Option<HexColor>,
    pub plot_linewidth: Option<f32>,
    pub price_line_color: Option<HexColor>,
    pub price_line_color_above_avg: Option<HexColor>,
    pub price_line_color_below_avg: Option<HexColor>,
    pub price_line_color_near_avg: Option<HexColor>,
    pub spine_color: Option<HexColor>,
    pub tick_color: Option<HexColor>,
    pub tickline_color: Option<HexColor>,
    #[serde(flatten)]
    pub unknown: BTreeMap<String, serde_json::Value>,
}

impl CustomTheme {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    fn validate(&self) -> Result<()> {
        for (key, alpha) in [
            ("fill_alpha", self.fill_alpha),
            ("grid_alpha", self.grid_alpha),
            ("nowline_alpha", self.nowline_alpha),
        ] {
            if let Some(a) = alpha {
                if !(0.0..=1.0).contains(&a) {
                    return Err(Error::config(format!("{key} must be within 0.0..=1.0, got {a}")));
                }
            }
        }
        if let Some(w) = self.plot_linewidth {
            if !w.is_finite() || w < 0.0 {
                return Err(Error::config(format!("plot_linewidth must be non-negative, got {w}")));
            }
        }
        Ok(())
    }
}

/// Resolve the built-in theme `name` and lay `custom` over it.
pub fn resolve(name: &str, custom: Option<&CustomTheme>) -> Result<Theme> {
    let base = builtin(name).ok_or_else(|| Error::config(format!("unknown theme '{name}'")))?;
    let Some(c) = custom else { return Ok(base) };

    c.validate()?;
    if !c.unknown.is_empty() {
        let keys: Vec<&str> = c.unknown.keys().map(String::as_str).collect();
        warn!(?keys, "ignoring unknown theme properties");
    }

    let color = |v: Option<HexColor>, fallback: skia::Color| v.map(|h| h.0).unwrap_or(fallback);
    let theme = Theme {
        name: base.name,
        avgline_color: color(c.avgline_color, base.avgline_color),
        avgline_style: c.avgline_style.unwrap_or(base.avgline_style),
        axis_label_color: color(c.axis_label_color, base.axis_label_color),
        background_color: color(c.background_color, base.background_color),
        cheap_price_color: color(c.cheap_price_color, base.cheap_price_color),
        cheapline_color: color(c.cheapline_color, base.cheapline_color),
        cheapline_style: c.cheapline_style.unwrap_or(base.cheapline_style),
        fill_alpha: c.fill_alpha.unwrap_or(base.fill_alpha),
        fill_color: color(c.fill_color, base.fill_color),
        grid_alpha: c.grid_alpha.unwrap_or(base.grid_alpha),
        grid_color: color(c.grid_color, base.grid_color),
        label_color: color(c.label_color, base.label_color),
        label_color_avg: color(c.label_color_avg, base.label_color_avg),
        label_color_max: color(c.label_color_max, base.label_color_max),
        label_color_min: color(c.label_color_min, base.label_color_min),
        label_stroke: c.label_stroke.unwrap_or(base.label_stroke),
        nowline_alpha: c.nowline_alpha.unwrap_or(base.nowline_alpha),
        nowline_color: color(c.nowline_color, base.nowline_color),
        plot_linewidth: c.plot_linewidth.unwrap_or(base.plot_linewidth),
        price_line_color: color(c.price_line_color, base.price_line_color),
        price_line_color_above_avg: color(c.price_line_color_above_avg, base.price_line_color_above_avg),
        price_line_color_below_avg: color(c.price_line_color_below_avg, base.price_line_color_below_avg),
        price_line_color_near_avg: color(c.price_line_color_near_avg, base.price_line_color_near_avg),
        spine_color: color(c.spine_color, base.spine_color),
        tick_color: color(c.tick_color, base.tick_color),
        tickline_color: color(c.tickline_color, base.tickline_color),
    };
    debug!(theme = theme.name, "applied custom theme overrides");
    Ok(theme)
}

/// Scale the color's own alpha by `alpha`.
pub fn fade(color: skia::Color, alpha: f32) -> skia::Color {
    let a = (color.a() as f32 * alpha.clamp(0.0, 1.0)).round() as u8;
    color.with_a(a)
}
