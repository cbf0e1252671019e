// File: crates/price-graph/tests/window.rs
// Purpose: Hourly aggregation and display-window resolution.

use chrono::{DateTime, Duration, TimeZone};
use chrono_tz::{Europe::Stockholm, Tz};
use price_graph::window::{hour_floor, local_midnight};
use price_graph::{aggregate_hourly, analyze, apply_window, DisplayWindow, PricePoint, PriceSeries, StartMode};

fn at(h: u32, m: u32) -> DateTime<Tz> {
    Stockholm.with_ymd_and_hms(2024, 5, 1, h, m, 0).unwrap()
}

fn quarter_series(hours: i64) -> PriceSeries {
    let start = at(0, 0);
    let points = (0..hours * 4)
        .map(|i| PricePoint::new(start + Duration::minutes(15 * i), i as f64))
        .collect();
    PriceSeries::new(points)
}

fn hourly_series(start: DateTime<Tz>, prices: &[f64]) -> PriceSeries {
    let points = prices
        .iter()
        .enumerate()
        .map(|(i, p)| PricePoint::new(start + Duration::hours(i as i64), *p))
        .collect();
    PriceSeries::new(points)
}

#[test]
fn hourly_aggregation_averages_quarters() {
    let agg = aggregate_hourly(&quarter_series(3));
    assert_eq!(agg.len(), 3);
    assert_eq!(agg.points[0].timestamp, at(0, 0));
    assert!((agg.points[0].price - 1.5).abs() < 1e-12);
    assert!((agg.points[2].price - 9.5).abs() < 1e-12);
}

#[test]
fn hourly_aggregation_is_idempotent() {
    let once = aggregate_hourly(&quarter_series(24));
    let twice = aggregate_hourly(&once);
    assert_eq!(once.len(), twice.len());
    for (a, b) in once.points.iter().zip(&twice.points) {
        assert_eq!(a.timestamp, b.timestamp);
        assert!((a.price - b.price).abs() < 1e-9);
    }
}

#[test]
fn single_sample_groups_pass_through() {
    let s = PriceSeries::new(vec![PricePoint::new(at(5, 30), 2.5)]);
    let agg = aggregate_hourly(&s);
    assert_eq!(agg.points, vec![PricePoint::new(at(5, 0), 2.5)]);
}

#[test]
fn current_hour_keeps_one_continuity_point() {
    let series = quarter_series(24);
    let now = at(10, 30);
    let w = apply_window(&series, DisplayWindow { start: StartMode::CurrentHour, duration_hours: None }, now);

    assert_eq!(w.bounds.start, at(9, 45));
    assert_eq!(w.points.first().map(|p| p.timestamp), Some(at(9, 45)));
    assert_eq!(w.continuity_points().len(), 1);
    assert!(w.stats_points().iter().all(|p| p.timestamp >= at(10, 0)));

    let stats = analyze(w.stats_points()).expect("stats");
    // 10:00 is the 40th quarter
    assert_eq!(stats.min.price, 40.0);
}

#[test]
fn every_visible_point_is_inside_bounds() {
    let series = quarter_series(48);
    for start in [StartMode::Midnight, StartMode::CurrentHour, StartMode::ShowAll] {
        for duration in [None, Some(1), Some(6), Some(100)] {
            let w = apply_window(&series, DisplayWindow { start, duration_hours: duration }, at(13, 10));
            assert!(w.bounds.start <= w.bounds.end);
            assert!(w.points.iter().all(|p| w.bounds.contains(p.timestamp)));
        }
    }
}

#[test]
fn midnight_with_duration() {
    let series = hourly_series(at(0, 0) - Duration::hours(6), &[1.0; 54]);
    let w = apply_window(&series, DisplayWindow { start: StartMode::Midnight, duration_hours: Some(24) }, at(15, 0));
    assert_eq!(w.bounds.start, at(0, 0));
    assert_eq!(w.bounds.end, at(0, 0) + Duration::hours(24));
    assert_eq!(w.points.len(), 24);
    assert_eq!(w.stats_start, 0);
}

#[test]
fn duration_is_clipped_to_data_end() {
    let series = hourly_series(at(0, 0), &[1.0, 2.0, 3.0]);
    let w = apply_window(&series, DisplayWindow { start: StartMode::ShowAll, duration_hours: Some(12) }, at(1, 0));
    assert_eq!(w.bounds.end, at(3, 0));
    assert_eq!(w.points.len(), 3);
}

#[test]
fn huge_duration_runs_to_data_end() {
    let series = hourly_series(at(0, 0), &[1.0, 2.0, 3.0]);
    let w = apply_window(&series, DisplayWindow { start: StartMode::ShowAll, duration_hours: Some(u32::MAX) }, at(1, 0));
    assert_eq!(w.bounds.end, at(3, 0));
    assert_eq!(w.points.len(), 3);
}

#[test]
fn window_after_data_is_empty() {
    let series = hourly_series(at(0, 0), &[1.0, 2.0]);
    let w = apply_window(&series, DisplayWindow { start: StartMode::CurrentHour, duration_hours: None }, at(20, 0));
    assert!(w.is_empty());
    assert_eq!(w.bounds.start, w.bounds.end);
    assert!(analyze(w.stats_points()).is_none());
}

#[test]
fn floor_and_midnight_follow_local_time() {
    assert_eq!(hour_floor(at(7, 59)), at(7, 0));
    assert_eq!(local_midnight(at(23, 59)), at(0, 0));

    // DST starts 2024-03-31 at 02:00 in Stockholm
    let after = Stockholm.with_ymd_and_hms(2024, 3, 31, 3, 30, 0).unwrap();
    assert_eq!(hour_floor(after), Stockholm.with_ymd_and_hms(2024, 3, 31, 3, 0, 0).unwrap());
    assert_eq!(local_midnight(after), Stockholm.with_ymd_and_hms(2024, 3, 31, 0, 0, 0).unwrap());
}
