// File: crates/price-graph/src/series.rs
// Summary: Price sample and series model produced by the normalizer.
// Notes:
// - A `PriceSeries` is owned by a single render call and never shared.
// - Timestamps are carried in the display timezone so calendar-day grouping
//   and hour boundaries follow local time.

use chrono::{DateTime, Duration};
use chrono_tz::Tz;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PricePoint {
    pub timestamp: DateTime<Tz>,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp: DateTime<Tz>, price: f64) -> Self {
        Self { timestamp, price }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct PriceSeries {
    /// Strictly ascending by timestamp, no duplicates.
    pub points: Vec<PricePoint>,
    /// Currency attribute reported by the source, if any.
    pub currency: Option<String>,
    /// Raw `unit_of_measurement`, e.g. `SEK/kWh`.
    pub unit: Option<String>,
    /// Multiplier applied to raw prices during normalization.
    pub unit_scale: f64,
}

impl PriceSeries {
    pub fn new(points: Vec<PricePoint>) -> Self {
        Self { points, currency: None, unit: None, unit_scale: 1.0 }
    }

    pub fn len(&self) -> usize { self.points.len() }
    pub fn is_empty(&self) -> bool { self.points.is_empty() }

    pub fn first(&self) -> Option<&PricePoint> { self.points.first() }
    pub fn last(&self) -> Option<&PricePoint> { self.points.last() }

    /// Same metadata, different samples.
    pub fn with_points(&self, points: Vec<PricePoint>) -> Self {
        Self {
            points,
            currency: self.currency.clone(),
            unit: self.unit.clone(),
            unit_scale: self.unit_scale,
        }
    }
}

/// Spacing between samples: the first positive gap, or one hour when the
/// series is too short to tell.
pub fn sample_interval(points: &[PricePoint]) -> Duration {
    points
        .windows(2)
        .map(|w| w[1].timestamp - w[0].timestamp)
        .find(|d| *d > Duration::zero())
        .unwrap_or_else(|| Duration::hours(1))
}
