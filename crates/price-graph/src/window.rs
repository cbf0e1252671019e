// File: crates/price-graph/src/window.rs
// Summary: Hourly aggregation and display-window selection.

use chrono::{DateTime, Duration, NaiveTime, TimeZone, Timelike};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::series::{sample_interval, PricePoint, PriceSeries};

/// Where the visible window begins.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StartMode {
    /// Local midnight of the day containing "now".
    Midnight,
    /// The hour containing "now", plus one leading sample for continuity.
    CurrentHour,
    /// The first available sample.
    #[default]
    ShowAll,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DisplayWindow {
    pub start: StartMode,
    /// Length measured from the anchor; `None` runs to the end of the data.
    pub duration_hours: Option<u32>,
}

/// Half-open `[start, end)` interval.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WindowBounds {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl WindowBounds {
    pub fn contains(&self, t: DateTime<Tz>) -> bool {
        self.start <= t && t < self.end
    }
}

/// Samples selected by a [`DisplayWindow`].
#[derive(Clone, Debug)]
pub struct VisibleWindow {
    /// Every sample inside `bounds`, continuity sample included.
    pub points: Vec<PricePoint>,
    /// Index of the first sample that counts for statistics.
    pub stats_start: usize,
    pub bounds: WindowBounds,
    /// Statistics cover samples at or after this instant.
    pub anchor: DateTime<Tz>,
    pub interval: Duration,
}

impl VisibleWindow {
    pub fn stats_points(&self) -> &[PricePoint] {
        &self.points[self.stats_start..]
    }

    /// Leading samples kept only so the line does not start abruptly.
    pub fn continuity_points(&self) -> &[PricePoint] {
        &self.points[..self.stats_start]
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// Start of the local hour containing `ts`.
pub fn hour_floor(ts: DateTime<Tz>) -> DateTime<Tz> {
    ts - Duration::minutes(ts.minute() as i64)
        - Duration::seconds(ts.second() as i64)
        - Duration::nanoseconds(ts.nanosecond() as i64)
}

/// Local midnight of the day containing `ts`.
pub fn local_midnight(ts: DateTime<Tz>) -> DateTime<Tz> {
    let naive = ts.date_naive().and_time(NaiveTime::MIN);
    ts.timezone()
        .from_local_datetime(&naive)
        .earliest()
        .unwrap_or_else(|| hour_floor(ts) - Duration::hours(ts.hour() as i64))
}

/// Collapse samples of the same local hour into one point at the hour
/// boundary priced at the group mean. Already-hourly input is unchanged.
pub fn aggregate_hourly(series: &PriceSeries) -> PriceSeries {
    let mut out: Vec<PricePoint> = Vec::with_capacity(series.len() / 4 + 1);
    let mut sum = 0.0;
    let mut count = 0usize;
    for p in &series.points {
        let hour = hour_floor(p.timestamp);
        match out.last_mut() {
            Some(last) if last.timestamp == hour => {
                sum += p.price;
                count += 1;
                last.price = sum / count as f64;
            }
            _ => {
                out.push(PricePoint::new(hour, p.price));
                sum = p.price;
                count = 1;
            }
        }
    }
    series.with_points(out)
}

/// Resolve `window` against `now` and the data, returning the samples in
/// `[start, end)`.
pub fn apply_window(series: &PriceSeries, window: DisplayWindow, now: DateTime<Tz>) -> VisibleWindow {
    let points = &series.points;
    let interval = sample_interval(points);
    let first = points.first().map(|p| p.timestamp).unwrap_or(now);

    let (anchor, start) = match window.start {
        StartMode::Midnight => {
            let m = local_midnight(now);
            (m, m)
        }
        StartMode::CurrentHour => {
            let h = hour_floor(now);
            (h, h - interval)
        }
        StartMode::ShowAll => (first, first),
    };

    let data_end = points.last().map(|p| p.timestamp + interval).unwrap_or(start);
    let mut end = match window.duration_hours {
        Some(h) => Duration::try_hours(i64::from(h))
            .and_then(|d| anchor.checked_add_signed(d))
            .map_or(data_end, |e| e.min(data_end)),
        None => data_end,
    };
    if end < start {
        end = start;
    }
    let bounds = WindowBounds { start, end };

    let visible: Vec<PricePoint> = points.iter().filter(|p| bounds.contains(p.timestamp)).copied().collect();
    let stats_start = visible.iter().take_while(|p| p.timestamp < anchor).count();

    debug!(
        start = %bounds.start,
        end = %bounds.end,
        visible = visible.len(),
        continuity = stats_start,
        "resolved display window"
    );

    VisibleWindow { points: visible, stats_start, bounds, anchor, interval }
}
