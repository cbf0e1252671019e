// File: crates/price-graph/tests/pipeline.rs
// Purpose: End-to-end behavior of PriceGraph::render: metadata, errors and no-data output.

use chrono::{DateTime, Duration, TimeZone, Utc};
use price_graph::{CustomTheme, Error, PriceGraph, RenderOptions, StartMode};
use serde_json::{json, Value};

fn quarter_payload(n: usize) -> Value {
    let start = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
    let prices: Vec<Value> = (0..n)
        .map(|i| {
            let t = start + Duration::minutes(15 * i as i64);
            json!({ "startsAt": t.to_rfc3339(), "total": 0.5 + (i % 7) as f64 * 0.1 })
        })
        .collect();
    json!({ "unit_of_measurement": "SEK/kWh", "prices": prices })
}

fn small() -> RenderOptions {
    RenderOptions { canvas_width: 400, canvas_height: 260, ..RenderOptions::default() }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 10, 30, 0).unwrap()
}

#[test]
fn metadata_reports_counts() {
    let mut payload = quarter_payload(10);
    payload["prices"][3]["startsAt"] = json!("yesterday-ish");
    let graph = PriceGraph::new(small(), None).expect("graph").with_source_label("Tibber");

    let out = graph.render(&payload, now()).expect("render");
    let m = &out.metadata;
    assert_eq!(m.sample_count, 9);
    assert_eq!(m.dropped_count, 1);
    assert_eq!(m.duplicate_count, 0);
    assert_eq!((m.width, m.height), (400, 260));
    assert_eq!(m.data_source_label.as_deref(), Some("Tibber"));
    assert_eq!(m.currency, "SEK");
    assert_eq!(m.rendered_at, now().fixed_offset());
    assert!(out.png.starts_with(&[137, 80, 78, 71]));

    let json = serde_json::to_value(m).expect("serialize");
    assert_eq!(json["dropped_count"], 1);
}

#[test]
fn hourly_aggregation_and_cents() {
    let opts = RenderOptions { use_hourly_prices: true, use_cents: true, ..small() };
    let out = PriceGraph::new(opts, None).expect("graph").render(&quarter_payload(96), now()).expect("render");
    assert_eq!(out.metadata.sample_count, 24);
    assert_eq!(out.metadata.currency, "öre");
}

#[test]
fn current_hour_window_counts_only_stats_points() {
    let opts = RenderOptions { start_graph_at: StartMode::CurrentHour, hours_to_show: Some(2), ..small() };
    let out = PriceGraph::new(opts, None).expect("graph").render(&quarter_payload(96), now()).expect("render");
    // 10:00 up to 12:00, the 09:45 continuity sample excluded
    assert_eq!(out.metadata.visible_count, 8);
}

#[test]
fn source_level_failures_are_data_source_errors() {
    let graph = PriceGraph::new(small(), None).expect("graph");
    let empty = graph.render(&json!({ "prices": [] }), now());
    assert!(matches!(empty, Err(Error::DataSource(_))));

    let junk = graph.render(&json!({ "prices": [{ "start": "?", "price": 1 }] }), now());
    assert!(matches!(junk, Err(Error::DataSource(_))));

    let missing = graph.render(&json!({ "nothing": true }), now());
    assert!(matches!(missing, Err(Error::DataSource(_))));
}

#[test]
fn window_without_data_still_renders() {
    let opts = RenderOptions { start_graph_at: StartMode::Midnight, ..small() };
    let later = now() + Duration::days(3);
    let out = PriceGraph::new(opts, None).expect("graph").render(&quarter_payload(96), later).expect("render");
    assert_eq!(out.metadata.visible_count, 0);
    let img = image::load_from_memory(&out.png).expect("decode");
    assert_eq!((img.width(), img.height()), (400, 260));
}

#[test]
fn configuration_is_checked_up_front() {
    let unknown = RenderOptions { theme: "sepia".into(), ..small() };
    assert!(matches!(PriceGraph::new(unknown, None), Err(Error::Configuration(_))));

    let bad = RenderOptions { label_font_size: -2.0, ..small() };
    assert!(matches!(PriceGraph::new(bad, None), Err(Error::Render(_))));

    let custom = CustomTheme::from_json(r##"{ "background_color": "#123456" }"##).expect("parse");
    let graph = PriceGraph::new(small(), Some(&custom)).expect("graph");
    assert_eq!(graph.theme().background_color, skia_safe::Color::from_rgb(0x12, 0x34, 0x56));
}
