// File: crates/price-graph/src/grid.rs
// Summary: Tick layout helpers for both axes.

use chrono::{DateTime, Duration};
use chrono_tz::Tz;

use crate::options::MAX_Y_TICKS;
use crate::window::{hour_floor, WindowBounds};

/// Round step (1, 2, 2.5 or 5 times a power of ten) giving about `target`
/// ticks over `[lo, hi]`.
pub fn nice_step(lo: f64, hi: f64, target: usize) -> f64 {
    let span = (hi - lo).abs();
    if span <= f64::EPSILON || target == 0 {
        return 1.0;
    }
    let raw = span / target as f64;
    let mag = 10f64.powf(raw.log10().floor());
    let norm = raw / mag;
    let mult = [1.0, 2.0, 2.5, 5.0, 10.0].into_iter().find(|m| norm <= *m).unwrap_or(10.0);
    mult * mag
}

/// Multiples of a nice step inside `[lo, hi]`.
pub fn nice_ticks(lo: f64, hi: f64, target: usize) -> Vec<f64> {
    let step = nice_step(lo, hi, target);
    let first = (lo / step).ceil() * step;
    let eps = step * 1e-9;
    let mut out = Vec::new();
    let mut i = 0;
    loop {
        let v = first + step * i as f64;
        if v > hi + eps { break; }
        // avoid printing -0.00
        out.push(if v.abs() < eps { 0.0 } else { v });
        i += 1;
    }
    out
}

/// Y tick values for a configured count.
///
/// `None` (or zero) picks nice ticks over the axis range; 1 is the average;
/// 2 is min and max; 3 adds the average in between; larger counts (capped at
/// [`MAX_Y_TICKS`]) are spread evenly strictly between min and max.
pub fn y_tick_values(count: Option<u32>, min: f64, avg: f64, max: f64, axis_lo: f64, axis_hi: f64) -> Vec<f64> {
    match count.unwrap_or(0) {
        0 => nice_ticks(axis_lo, axis_hi, 5),
        1 => vec![avg],
        2 => vec![min, max],
        3 => vec![min, avg, max],
        n => {
            let n = n.min(MAX_Y_TICKS);
            let step = (max - min) / (n as f64 + 1.0);
            (1..=n).map(|i| min + step * i as f64).collect()
        }
    }
}

/// Tick instants every `step_hours`, starting at the first whole hour inside
/// the window and ending at its end.
pub fn x_tick_times(bounds: &WindowBounds, step_hours: u32) -> Vec<DateTime<Tz>> {
    let step = Duration::hours(step_hours.max(1) as i64);
    let mut t = hour_floor(bounds.start);
    if t < bounds.start {
        t += Duration::hours(1);
    }
    let mut out = Vec::new();
    while t <= bounds.end {
        out.push(t);
        t += step;
    }
    out
}
