// File: crates/price-graph/benches/render_bench.rs
// Summary: Criterion benchmark of the full render path for hourly and quarter-hour payloads.

use anyhow::Result;
use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use price_graph::{PriceGraph, RenderOptions};
use serde_json::{json, Value};

fn build_payload(n: usize, step_minutes: i64) -> Value {
    let start = Utc.with_ymd_and_hms(2024, 5, 1, 0, 0, 0).unwrap();
    let prices: Vec<Value> = (0..n)
        .map(|i| {
            let t = start + Duration::minutes(step_minutes * i as i64);
            let y = 0.8 + (i as f64 * 0.07).sin() * 0.4;
            json!({ "start_time": t.to_rfc3339(), "price": y })
        })
        .collect();
    json!({ "currency": "EUR", "prices": prices })
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_png_bytes");
    let now = Utc.with_ymd_and_hms(2024, 5, 1, 13, 20, 0).unwrap();
    for &(n, step) in &[(48usize, 60i64), (192usize, 15i64)] {
        group.bench_function(format!("prices_{n}"), |b| {
            let payload = build_payload(n, step);
            let opts = RenderOptions { cheap_price_points: 3, ..RenderOptions::default() };
            let graph = PriceGraph::new(opts, None).expect("graph");
            b.iter(|| -> Result<()> {
                let out = graph.render(&payload, now)?;
                black_box(out.png);
                Ok(())
            });
        });
    }
    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
