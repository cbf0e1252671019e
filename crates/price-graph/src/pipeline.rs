// File: crates/price-graph/src/pipeline.rs
// Summary: End-to-end render: raw price payload in, PNG bytes and metadata out.

use chrono::{DateTime, FixedOffset, TimeZone};
use serde::Serialize;
use serde_json::Value;
use tracing::debug;

use crate::chart::{render_png, ChartView};
use crate::error::{Error, Result};
use crate::normalize::{normalize, resolve_currency, FieldSpec};
use crate::options::RenderOptions;
use crate::theme::{resolve, CustomTheme, Theme};
use crate::window::{aggregate_hourly, apply_window};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RenderMetadata {
    pub rendered_at: DateTime<FixedOffset>,
    /// Samples left after normalization (and aggregation).
    pub sample_count: usize,
    /// Samples inside the display window that count for statistics.
    pub visible_count: usize,
    pub dropped_count: usize,
    pub duplicate_count: usize,
    pub cheap_period_count: usize,
    pub currency: String,
    pub data_source_label: Option<String>,
    pub width: u32,
    pub height: u32,
}

#[derive(Clone, Debug)]
pub struct RenderOutput {
    pub png: Vec<u8>,
    pub metadata: RenderMetadata,
}

/// Immutable render configuration for one chart.
#[derive(Clone, Debug)]
pub struct PriceGraph {
    options: RenderOptions,
    theme: Theme,
    fields: FieldSpec,
    source_label: Option<String>,
}

impl PriceGraph {
    /// Validate `options` and resolve the theme it names, with `custom` laid on top.
    pub fn new(options: RenderOptions, custom: Option<&CustomTheme>) -> Result<Self> {
        options.validate()?;
        let theme = resolve(&options.theme, custom)?;
        Ok(Self { options, theme, fields: FieldSpec::default(), source_label: None })
    }

    pub fn with_fields(mut self, fields: FieldSpec) -> Self {
        self.fields = fields;
        self
    }

    pub fn with_source_label(mut self, label: impl Into<String>) -> Self {
        self.source_label = Some(label.into());
        self
    }

    pub fn options(&self) -> &RenderOptions { &self.options }
    pub fn theme(&self) -> &Theme { &self.theme }
    pub fn fields(&self) -> &FieldSpec { &self.fields }

    /// Render `source` as seen at `now`.
    ///
    /// Fails when the payload has no price list, the list is empty, or
    /// none of its records parse. A window that misses the data renders
    /// the "No data" image instead.
    pub fn render<Z: TimeZone>(&self, source: &Value, now: DateTime<Z>) -> Result<RenderOutput> {
        let tz = self.options.timezone;
        let now = now.with_timezone(&tz);

        let normalized = normalize(source, &self.fields, tz)?;
        if normalized.records == 0 {
            return Err(Error::data_source("price list is empty"));
        }
        if normalized.series.is_empty() {
            return Err(Error::data_source(format!(
                "none of the {} price records could be parsed",
                normalized.records
            )));
        }

        let series = if self.options.use_hourly_prices {
            aggregate_hourly(&normalized.series)
        } else {
            normalized.series
        };
        let window = apply_window(&series, self.options.display_window(), now);
        let currency = resolve_currency(self.options.currency_override.as_deref(), &series, self.options.use_cents);

        let view = ChartView::new(window, currency, now, &self.options).with_source_label(self.source_label.clone());
        let png = render_png(&view, &self.theme, &self.options)?;

        let metadata = RenderMetadata {
            rendered_at: now.fixed_offset(),
            sample_count: series.len(),
            visible_count: view.stats_points().len(),
            dropped_count: normalized.dropped,
            duplicate_count: normalized.duplicates,
            cheap_period_count: view.cheap_periods.len(),
            currency: view.currency.clone(),
            data_source_label: self.source_label.clone(),
            width: self.options.canvas_width,
            height: self.options.canvas_height,
        };
        debug!(
            samples = metadata.sample_count,
            visible = metadata.visible_count,
            bytes = png.len(),
            "price graph rendered"
        );
        Ok(RenderOutput { png, metadata })
    }
}
