// File: crates/demo/src/main.rs
// Summary: Demo renders a JSON or CSV price file (or a built-in sample day) to PNG.
// Usage: price-graph-demo [INPUT] [--options FILE] [--theme-override FILE] [--now RFC3339] [--label TEXT] [--out FILE]

use anyhow::{Context, Result};
use chrono::{DateTime, Duration, TimeZone, Utc};
use price_graph::{CustomTheme, PriceGraph, RenderOptions};
use serde_json::{json, Map, Value};
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Default)]
struct Args {
    input: Option<PathBuf>,
    options: Option<PathBuf>,
    theme_override: Option<PathBuf>,
    now: Option<String>,
    label: Option<String>,
    out: Option<PathBuf>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("price_graph=info".parse()?))
        .with_target(true)
        .init();

    let args = parse_args(std::env::args().skip(1))?;

    let options = match &args.options {
        Some(p) => RenderOptions::from_json(&read(p)?).with_context(|| format!("invalid options in '{}'", p.display()))?,
        None => RenderOptions::default(),
    };
    let custom = match &args.theme_override {
        Some(p) => Some(CustomTheme::from_json(&read(p)?).with_context(|| format!("invalid theme in '{}'", p.display()))?),
        None => None,
    };
    let now: DateTime<Utc> = match &args.now {
        Some(s) => DateTime::parse_from_rfc3339(s).with_context(|| format!("bad --now '{s}'"))?.with_timezone(&Utc),
        None => Utc::now(),
    };

    let payload = match &args.input {
        Some(p) => load_payload(p).with_context(|| format!("failed to load '{}'", p.display()))?,
        None => {
            warn!("no input given; rendering a built-in sample day");
            sample_payload(now)
        }
    };

    let mut graph = PriceGraph::new(options, custom.as_ref()).context("invalid render configuration")?;
    if let Some(label) = &args.label {
        graph = graph.with_source_label(label.clone());
    }
    let output = graph.render(&payload, now).context("render failed")?;

    let out = args.out.unwrap_or_else(|| PathBuf::from("target/out/price_graph.png"));
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(&out, &output.png).with_context(|| format!("writing {}", out.display()))?;
    info!(path = %out.display(), bytes = output.png.len(), "wrote chart");
    println!("{}", serde_json::to_string_pretty(&output.metadata)?);
    Ok(())
}

fn parse_args(mut it: impl Iterator<Item = String>) -> Result<Args> {
    let mut args = Args::default();
    while let Some(arg) = it.next() {
        let mut value = |flag: &str| it.next().with_context(|| format!("{flag} needs a value"));
        match arg.as_str() {
            "--options" => args.options = Some(value("--options")?.into()),
            "--theme-override" => args.theme_override = Some(value("--theme-override")?.into()),
            "--now" => args.now = Some(value("--now")?),
            "--label" => args.label = Some(value("--label")?),
            "--out" => args.out = Some(value("--out")?.into()),
            flag if flag.starts_with("--") => anyhow::bail!("unknown flag {flag}"),
            _ if args.input.is_none() => args.input = Some(PathBuf::from(&arg)),
            _ => anyhow::bail!("unexpected argument '{arg}'"),
        }
    }
    Ok(args)
}

fn read(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}

fn load_payload(path: &Path) -> Result<Value> {
    let ext = path.extension().map(|e| e.to_string_lossy().to_lowercase()).unwrap_or_default();
    match ext.as_str() {
        "csv" => load_csv(path),
        _ => Ok(serde_json::from_str(&read(path)?)?),
    }
}

/// Each CSV row becomes one record keyed by the lowercased headers.
fn load_csv(path: &Path) -> Result<Value> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let headers = rdr.headers()?.iter().map(|h| h.to_lowercase()).collect::<Vec<_>>();
    info!(?headers, "csv headers");

    let mut rows = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let obj: Map<String, Value> = headers
            .iter()
            .zip(rec.iter())
            .map(|(h, v)| (h.clone(), cell(v)))
            .collect();
        rows.push(Value::Object(obj));
    }
    info!(rows = rows.len(), "loaded csv rows");
    Ok(json!({ "prices": rows }))
}

fn cell(raw: &str) -> Value {
    if let Ok(n) = raw.parse::<i64>() {
        return json!(n);
    }
    match raw.parse::<f64>() {
        Ok(f) if f.is_finite() => json!(f),
        _ => Value::String(raw.to_string()),
    }
}

/// Two days of quarter-hour prices with morning and evening peaks.
fn sample_payload(now: DateTime<Utc>) -> Value {
    let day = now.date_naive().and_hms_opt(0, 0, 0).map(|n| Utc.from_utc_datetime(&n)).unwrap_or(now);
    let prices: Vec<Value> = (0..192)
        .map(|i| {
            let t = day + Duration::minutes(15 * i);
            let h = (i % 96) as f64 / 4.0;
            let peak = (-(h - 8.0).powi(2) / 6.0).exp() * 0.9 + (-(h - 18.5).powi(2) / 5.0).exp() * 1.2;
            json!({ "startsAt": t.to_rfc3339(), "total": 0.35 + peak })
        })
        .collect();
    json!({ "currency": "EUR", "prices": prices })
}
