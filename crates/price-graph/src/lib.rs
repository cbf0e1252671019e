// File: crates/price-graph/src/lib.rs
// Summary: Library entry point; exports the price-series pipeline and chart rendering API.

pub mod analysis;
pub mod chart;
pub mod error;
pub mod format;
pub mod geometry;
pub mod grid;
pub mod normalize;
pub mod options;
pub mod pipeline;
pub mod scale;
pub mod series;
pub mod text;
pub mod theme;
pub mod types;
pub mod window;

pub use analysis::{analyze, current_index, find_cheap_periods, price_tone, CheapPeriod, DayRange, PriceTone, Statistics};
pub use chart::{layout, render_png, render_rgba8, ChartView, PlotLayout};
pub use error::{Error, Result};
pub use normalize::{normalize, resolve_currency, FieldSpec, Normalized};
pub use options::{AxisSide, CheapHighlight, FontWeight, RenderOptions};
pub use pipeline::{PriceGraph, RenderMetadata, RenderOutput};
pub use series::{sample_interval, PricePoint, PriceSeries};
pub use text::TextShaper;
pub use theme::{CustomTheme, LineStyle, Theme};
pub use window::{aggregate_hourly, apply_window, DisplayWindow, StartMode, VisibleWindow, WindowBounds};
