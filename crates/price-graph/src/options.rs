// File: crates/price-graph/src/options.rs
// Summary: Render option surface, its defaults, and validation.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::types::{HEIGHT, MAX_CANVAS, WIDTH};
use crate::window::{DisplayWindow, StartMode};

/// Longest accepted `hours_to_show`, one month.
pub const MAX_HOURS_TO_SHOW: u32 = 24 * 31;
/// Largest accepted `y_tick_count`.
pub const MAX_Y_TICKS: u32 = 20;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AxisSide {
    #[default]
    Left,
    Right,
}

/// Where cheap periods are highlighted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheapHighlight {
    Off,
    #[default]
    Bands,
    XAxis,
    BandsAndXAxis,
}

impl CheapHighlight {
    pub fn bands(&self) -> bool {
        matches!(self, CheapHighlight::Bands | CheapHighlight::BandsAndXAxis)
    }

    pub fn x_axis(&self) -> bool {
        matches!(self, CheapHighlight::XAxis | CheapHighlight::BandsAndXAxis)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    // General
    pub theme: String,
    pub transparent_background: bool,
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Fraction of the canvas height reserved below the plot.
    pub bottom_margin: f32,
    /// Fraction of the canvas width reserved left of the plot.
    pub left_margin: f32,
    pub timezone: Tz,

    // X axis
    pub show_x_axis: bool,
    pub show_x_ticks: bool,
    pub x_axis_label_rotation_deg: f32,
    pub x_tick_step_hours: u32,
    pub start_graph_at: StartMode,
    pub hours_to_show: Option<u32>,
    pub show_vertical_grid: bool,
    pub cheap_highlight: CheapHighlight,

    // Y axis
    pub show_y_axis: bool,
    pub show_y_axis_ticks: bool,
    pub show_horizontal_grid: bool,
    pub y_axis_side: AxisSide,
    pub y_axis_label_rotation_deg: f32,
    pub y_tick_count: Option<u32>,
    pub y_tick_use_colors: bool,
    pub show_average_price_line: bool,
    pub show_cheap_price_line: bool,

    // Prices and labels
    pub use_hourly_prices: bool,
    pub use_cents: bool,
    pub currency_override: Option<String>,
    pub cheap_price_points: usize,
    pub cheap_price_threshold: f64,
    pub label_current: bool,
    pub label_current_in_header: bool,
    pub label_current_in_header_more: bool,
    pub label_minmax_in_header: bool,
    pub label_font_size: f32,
    pub label_font_weight: FontWeight,
    pub header_font_weight: FontWeight,
    pub label_max: bool,
    pub label_max_below_point: bool,
    pub label_min: bool,
    pub label_minmax_show_price: bool,
    pub label_show_currency: bool,
    pub label_use_colors: bool,
    pub price_decimals: Option<u8>,
    pub color_price_line_by_average: bool,
    /// Relative band around the average, e.g. 0.25 for ±25%.
    pub near_average_threshold: f64,
    pub dim_past_prices: bool,
    pub show_data_source: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            theme: "dark".to_string(),
            transparent_background: false,
            canvas_width: WIDTH,
            canvas_height: HEIGHT,
            bottom_margin: 0.14,
            left_margin: 0.12,
            timezone: Tz::UTC,

            show_x_axis: true,
            show_x_ticks: false,
            x_axis_label_rotation_deg: 0.0,
            x_tick_step_hours: 3,
            start_graph_at: StartMode::ShowAll,
            hours_to_show: None,
            show_vertical_grid: true,
            cheap_highlight: CheapHighlight::Bands,

            show_y_axis: true,
            show_y_axis_ticks: false,
            show_horizontal_grid: false,
            y_axis_side: AxisSide::Left,
            y_axis_label_rotation_deg: 0.0,
            y_tick_count: None,
            y_tick_use_colors: false,
            show_average_price_line: true,
            show_cheap_price_line: false,

            use_hourly_prices: false,
            use_cents: false,
            currency_override: None,
            cheap_price_points: 0,
            cheap_price_threshold: 0.0,
            label_current: true,
            label_current_in_header: true,
            label_current_in_header_more: true,
            label_minmax_in_header: false,
            label_font_size: 11.0,
            label_font_weight: FontWeight::Normal,
            header_font_weight: FontWeight::Bold,
            label_max: true,
            label_max_below_point: false,
            label_min: true,
            label_minmax_show_price: true,
            label_show_currency: true,
            label_use_colors: false,
            price_decimals: None,
            color_price_line_by_average: true,
            near_average_threshold: 0.25,
            dim_past_prices: true,
            show_data_source: false,
        }
    }
}

impl RenderOptions {
    /// Parse a (possibly partial) JSON object and validate the result.
    pub fn from_json(json: &str) -> Result<Self> {
        let opts: Self = serde_json::from_str(json)?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, v) in [("canvas_width", self.canvas_width), ("canvas_height", self.canvas_height)] {
            if v == 0 || v > MAX_CANVAS {
                return Err(Error::render(format!("{name} must be within 1..={MAX_CANVAS}, got {v}")));
            }
        }
        if !self.label_font_size.is_finite() || self.label_font_size <= 0.0 {
            return Err(Error::render(format!("label_font_size must be positive, got {}", self.label_font_size)));
        }
        for (name, m) in [("bottom_margin", self.bottom_margin), ("left_margin", self.left_margin)] {
            if !(0.0..=0.45).contains(&m) {
                return Err(Error::render(format!("{name} must be within 0.0..=0.45, got {m}")));
            }
        }
        if !self.near_average_threshold.is_finite() || self.near_average_threshold < 0.0 {
            return Err(Error::render(format!(
                "near_average_threshold must be non-negative, got {}",
                self.near_average_threshold
            )));
        }
        if !self.cheap_price_threshold.is_finite() {
            return Err(Error::render("cheap_price_threshold must be finite"));
        }
        for (name, deg) in [
            ("x_axis_label_rotation_deg", self.x_axis_label_rotation_deg),
            ("y_axis_label_rotation_deg", self.y_axis_label_rotation_deg),
        ] {
            if !deg.is_finite() {
                return Err(Error::render(format!("{name} must be finite")));
            }
        }
        if self.x_tick_step_hours == 0 || self.x_tick_step_hours > 24 {
            return Err(Error::config(format!(
                "x_tick_step_hours must be within 1..=24, got {}",
                self.x_tick_step_hours
            )));
        }
        if let Some(h) = self.hours_to_show {
            if h == 0 || h > MAX_HOURS_TO_SHOW {
                return Err(Error::config(format!("hours_to_show must be within 1..={MAX_HOURS_TO_SHOW}, got {h}")));
            }
        }
        if let Some(n) = self.y_tick_count.filter(|n| *n > MAX_Y_TICKS) {
            return Err(Error::config(format!("y_tick_count must be at most {MAX_Y_TICKS}, got {n}")));
        }
        Ok(())
    }

    pub fn display_window(&self) -> DisplayWindow {
        DisplayWindow { start: self.start_graph_at, duration_hours: self.hours_to_show }
    }

    /// Decimal places for every price shown on the chart.
    pub fn decimals(&self) -> usize {
        match self.price_decimals {
            Some(d) => d as usize,
            None if self.use_cents => 0,
            None => 2,
        }
    }

    /// Factor from series units to displayed units.
    pub fn display_scale(&self) -> f64 {
        if self.use_cents {
            100.0
        } else {
            1.0
        }
    }
}
