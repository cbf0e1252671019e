// File: crates/price-graph/tests/snapshot.rs
// Purpose: Golden snapshot harness with bless flow, plus render determinism.
// Behavior:
// - Renders a fixed day of prices to PNG bytes.
// - If env UPDATE_SNAPSHOTS=1, (re)writes the snapshot file.
// - Else, if snapshot exists, compares decoded pixels for exact match.
// - Else, logs a note and returns (skips) without failing to ease first run.

use chrono::{Duration, TimeZone};
use chrono_tz::Europe::Berlin;
use price_graph::{apply_window, render_png, ChartView, PricePoint, PriceSeries, RenderOptions, Theme};

fn render_bytes() -> Vec<u8> {
    let start = Berlin.with_ymd_and_hms(2024, 2, 20, 0, 0, 0).unwrap();
    let prices = [
        0.21, 0.19, 0.18, 0.18, 0.19, 0.23, 0.29, 0.34, 0.36, 0.31, 0.27, 0.24,
        0.22, 0.21, 0.23, 0.26, 0.31, 0.38, 0.41, 0.37, 0.30, 0.26, 0.24, 0.22,
    ];
    let points = prices
        .iter()
        .enumerate()
        .map(|(i, p)| PricePoint::new(start + Duration::hours(i as i64), *p))
        .collect();
    let now = start + Duration::minutes(9 * 60 + 40);
    let opts = RenderOptions {
        canvas_width: 600,
        canvas_height: 400,
        cheap_price_points: 3,
        ..RenderOptions::default()
    };
    let window = apply_window(&PriceSeries::new(points), opts.display_window(), now);
    let view = ChartView::new(window, "EUR", now, &opts);
    render_png(&view, &Theme::dark(), &opts).expect("render")
}

#[test]
fn identical_inputs_render_identical_bytes() {
    assert_eq!(render_bytes(), render_bytes());
}

#[test]
fn golden_price_day() {
    let bytes = render_bytes();
    let snap_dir = std::path::PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/__snapshots__");
    let snap_path = snap_dir.join("price_day.png");

    let update = std::env::var("UPDATE_SNAPSHOTS").ok().map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false);

    if update {
        std::fs::create_dir_all(&snap_dir).expect("create snapshots dir");
        std::fs::write(&snap_path, &bytes).expect("write snapshot");
        eprintln!("[snapshot] Updated {} ({} bytes)", snap_path.display(), bytes.len());
        return;
    }

    if snap_path.exists() {
        let want = std::fs::read(&snap_path).expect("read snapshot");
        // Compare decoded pixel buffers to avoid PNG encoder variance
        let got_img = image::load_from_memory(&bytes).expect("decode got").to_rgba8();
        let want_img = image::load_from_memory(&want).expect("decode want").to_rgba8();
        assert_eq!(got_img.as_raw(), want_img.as_raw(), "rendered pixels differ from golden snapshot: {}", snap_path.display());
    } else {
        eprintln!("[snapshot] Missing snapshot {}; set UPDATE_SNAPSHOTS=1 to bless.", snap_path.display());
    }
}
