// File: crates/price-graph/tests/smoke.rs
// Purpose: Basic end-to-end render smoke tests producing PNG bytes.

use chrono::{Duration, TimeZone};
use chrono_tz::Europe::Stockholm;
use price_graph::{apply_window, render_png, ChartView, DisplayWindow, PricePoint, PriceSeries, RenderOptions, StartMode, Theme};

fn day_series() -> PriceSeries {
    let start = Stockholm.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
    let points = (0..96)
        .map(|i| {
            let x = i as f64;
            PricePoint::new(start + Duration::minutes(15 * i), 0.8 + (x * 0.13).sin() * 0.5)
        })
        .collect();
    PriceSeries::new(points)
}

#[test]
fn render_smoke_png() {
    let now = Stockholm.with_ymd_and_hms(2024, 5, 1, 10, 20, 0).unwrap();
    let opts = RenderOptions {
        cheap_price_points: 4,
        show_horizontal_grid: true,
        show_cheap_price_line: true,
        cheap_price_threshold: 0.5,
        show_data_source: true,
        ..RenderOptions::default()
    };
    let window = apply_window(&day_series(), opts.display_window(), now);
    let view = ChartView::new(window, "SEK", now, &opts).with_source_label(Some("Nord Pool".into()));

    let bytes = render_png(&view, &Theme::dark(), &opts).expect("render should succeed");
    assert!(bytes.starts_with(&[137, 80, 78, 71]), "should be PNG header");

    let img = image::load_from_memory(&bytes).expect("decode").to_rgba8();
    assert_eq!(img.dimensions(), (1180, 820));

    let out = std::path::PathBuf::from("target/test_out/smoke.png");
    std::fs::create_dir_all(out.parent().unwrap()).unwrap();
    std::fs::write(&out, &bytes).expect("write output");
}

#[test]
fn every_label_mode_renders() {
    let now = Stockholm.with_ymd_and_hms(2024, 5, 1, 17, 5, 0).unwrap();
    let base = RenderOptions { canvas_width: 480, canvas_height: 320, ..RenderOptions::default() };
    let variants = [
        RenderOptions { label_current_in_header: false, ..base.clone() },
        RenderOptions { label_minmax_in_header: true, label_use_colors: true, ..base.clone() },
        RenderOptions { y_tick_count: Some(3), y_tick_use_colors: true, show_y_axis_ticks: true, ..base.clone() },
        RenderOptions { y_tick_count: Some(6), y_axis_side: price_graph::AxisSide::Right, ..base.clone() },
        RenderOptions { x_axis_label_rotation_deg: 45.0, show_x_ticks: true, cheap_price_points: 3,
            cheap_highlight: price_graph::CheapHighlight::BandsAndXAxis, ..base.clone() },
        RenderOptions { start_graph_at: StartMode::CurrentHour, hours_to_show: Some(6), use_cents: true, ..base.clone() },
        RenderOptions { show_x_axis: false, show_y_axis: false, transparent_background: true, ..base.clone() },
    ];
    for opts in variants {
        let window = apply_window(&day_series(), opts.display_window(), now);
        let view = ChartView::new(window, "SEK", now, &opts);
        let bytes = render_png(&view, &Theme::light(), &opts).expect("render");
        let img = image::load_from_memory(&bytes).expect("decode");
        assert_eq!((img.width(), img.height()), (480, 320));
    }
}

#[test]
fn empty_window_renders_placeholder() {
    let now = Stockholm.with_ymd_and_hms(2024, 5, 3, 12, 0, 0).unwrap();
    let opts = RenderOptions { canvas_width: 640, canvas_height: 400, ..RenderOptions::default() };
    let window = apply_window(
        &day_series(),
        DisplayWindow { start: StartMode::CurrentHour, duration_hours: None },
        now,
    );
    assert!(window.is_empty());
    let view = ChartView::new(window, "SEK", now, &opts);
    assert!(view.stats.is_none());

    let bytes = render_png(&view, &Theme::dark(), &opts).expect("no-data render must not fail");
    let img = image::load_from_memory(&bytes).expect("decode");
    assert_eq!((img.width(), img.height()), (640, 400));
}
