// File: crates/price-graph/src/analysis.rs
// Summary: Min/max/average statistics and cheap-period detection over the visible samples.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate};
use chrono_tz::Tz;

use crate::series::PricePoint;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DayRange {
    pub min: PricePoint,
    pub max: PricePoint,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Statistics {
    pub min: PricePoint,
    pub max: PricePoint,
    pub average: f64,
    /// Keyed by local calendar date.
    pub per_day: BTreeMap<NaiveDate, DayRange>,
}

/// Position of a price relative to the average.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PriceTone {
    Below,
    Near,
    Above,
}

/// `Near` when `price` is within `near_threshold * |average|` of the average,
/// boundary included.
pub fn price_tone(price: f64, average: f64, near_threshold: f64) -> PriceTone {
    if (price - average).abs() <= average.abs() * near_threshold {
        PriceTone::Near
    } else if price < average {
        PriceTone::Below
    } else {
        PriceTone::Above
    }
}

/// Contiguous run of qualifying samples; indices are inclusive.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CheapPeriod {
    pub start_index: usize,
    pub end_index: usize,
    /// The last sample of the run has already ended.
    pub past: bool,
}

impl CheapPeriod {
    pub fn contains(&self, index: usize) -> bool {
        self.start_index <= index && index <= self.end_index
    }
}

/// `None` when `points` is empty. Ties on min/max keep the earliest sample.
pub fn analyze(points: &[PricePoint]) -> Option<Statistics> {
    let first = *points.first()?;
    let mut min = first;
    let mut max = first;
    let mut sum = 0.0;
    let mut per_day: BTreeMap<NaiveDate, DayRange> = BTreeMap::new();

    for p in points {
        sum += p.price;
        if p.price < min.price {
            min = *p;
        }
        if p.price > max.price {
            max = *p;
        }
        per_day
            .entry(p.timestamp.date_naive())
            .and_modify(|d| {
                if p.price < d.min.price {
                    d.min = *p;
                }
                if p.price > d.max.price {
                    d.max = *p;
                }
            })
            .or_insert(DayRange { min: *p, max: *p });
    }

    Some(Statistics { min, max, average: sum / points.len() as f64, per_day })
}

/// Mark the `top_n` cheapest samples of each local day, plus every sample
/// priced below `threshold` when it is positive, and merge consecutive marks.
pub fn find_cheap_periods(
    points: &[PricePoint],
    top_n: usize,
    threshold: f64,
    now: DateTime<Tz>,
    interval: Duration,
) -> Vec<CheapPeriod> {
    if top_n == 0 && threshold <= 0.0 {
        return Vec::new();
    }

    let mut cheap = vec![false; points.len()];

    if top_n > 0 {
        let mut by_day: BTreeMap<NaiveDate, Vec<usize>> = BTreeMap::new();
        for (i, p) in points.iter().enumerate() {
            by_day.entry(p.timestamp.date_naive()).or_default().push(i);
        }
        for indices in by_day.values_mut() {
            indices.sort_by(|&a, &b| {
                points[a]
                    .price
                    .total_cmp(&points[b].price)
                    .then(points[a].timestamp.cmp(&points[b].timestamp))
                    .then(a.cmp(&b))
            });
            for &i in indices.iter().take(top_n) {
                cheap[i] = true;
            }
        }
    }

    if threshold > 0.0 {
        for (flag, p) in cheap.iter_mut().zip(points) {
            if p.price < threshold {
                *flag = true;
            }
        }
    }

    let mut periods: Vec<CheapPeriod> = Vec::new();
    let mut run_start: Option<usize> = None;
    for i in 0..=points.len() {
        let marked = cheap.get(i).copied().unwrap_or(false);
        match (marked, run_start) {
            (true, None) => run_start = Some(i),
            (false, Some(start)) => {
                let end = i - 1;
                let past = points[end].timestamp + interval <= now;
                periods.push(CheapPeriod { start_index: start, end_index: end, past });
                run_start = None;
            }
            _ => {}
        }
    }
    periods
}

/// Index of the sample whose interval covers `now`.
pub fn current_index(points: &[PricePoint], now: DateTime<Tz>, interval: Duration) -> Option<usize> {
    let idx = points.partition_point(|p| p.timestamp <= now).checked_sub(1)?;
    (now < points[idx].timestamp + interval).then_some(idx)
}
