// File: crates/price-graph/src/normalize.rs
// Summary: Turns heterogeneous raw price records into an ordered `PriceSeries`.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::series::{PricePoint, PriceSeries};

/// Container keys tried when `FieldSpec::list_key` is unset.
pub const LIST_KEYS: &[&str] = &["prices", "data"];
/// Start-time keys tried in order when `FieldSpec::time_field` is unset.
pub const TIME_KEYS: &[&str] = &["start_time", "start", "startsAt"];
/// Price keys tried in order when `FieldSpec::price_field` is unset.
pub const PRICE_KEYS: &[&str] = &["price", "price_per_kwh", "total"];

/// Currency used when neither the caller nor the source names one.
pub const FALLBACK_CURRENCY: &str = "EUR";
/// Minor-unit symbol used when the major currency has no specific one.
pub const FALLBACK_MINOR_UNIT: &str = "¢";

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%d %H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%:z",
];

const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

/// Where to find the samples and how to read them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldSpec {
    pub list_key: Option<String>,
    pub time_field: Option<String>,
    pub price_field: Option<String>,
    /// chrono format string; ISO-8601 is attempted when unset.
    pub time_format: Option<String>,
    /// `price' = price * factor + add`
    pub factor: f64,
    pub add: f64,
}

impl Default for FieldSpec {
    fn default() -> Self {
        Self {
            list_key: None,
            time_field: None,
            price_field: None,
            time_format: None,
            factor: 1.0,
            add: 0.0,
        }
    }
}

/// Result of a normalization pass.
#[derive(Clone, Debug)]
pub struct Normalized {
    pub series: PriceSeries,
    /// Records found in the container.
    pub records: usize,
    /// Records that could not be turned into a point.
    pub dropped: usize,
    /// Later records whose timestamp was already taken.
    pub duplicates: usize,
}

/// Parse `source` into a sorted, de-duplicated series in timezone `tz`.
///
/// Individual bad records are dropped and counted. The call only fails when
/// the record container itself is missing or is not a list.
pub fn normalize(source: &Value, fields: &FieldSpec, tz: Tz) -> Result<Normalized> {
    let (records, meta) = locate_records(source, fields)?;

    let mut points = Vec::with_capacity(records.len());
    let mut dropped = 0usize;
    for (index, record) in records.iter().enumerate() {
        match parse_record(record, fields, tz) {
            Ok(p) => points.push(p),
            Err(reason) => {
                dropped += 1;
                debug!(index, reason, "dropping price record");
            }
        }
    }

    // Stable sort keeps first-seen order among equal timestamps.
    points.sort_by_key(|p| p.timestamp);
    let before = points.len();
    points.dedup_by_key(|p| p.timestamp);
    let duplicates = before - points.len();

    if dropped > 0 {
        warn!(dropped, total = records.len(), "dropped unparsable price records");
    }
    if duplicates > 0 {
        warn!(duplicates, "dropped records with duplicate timestamps");
    }

    let mut series = PriceSeries::new(points);
    series.unit_scale = fields.factor;
    if let Some(meta) = meta {
        series.currency = string_attr(meta, "currency");
        series.unit = string_attr(meta, "unit_of_measurement");
    }
    debug!(points = series.len(), "normalized price series");

    Ok(Normalized { series, records: records.len(), dropped, duplicates })
}

fn locate_records<'a>(
    source: &'a Value,
    fields: &FieldSpec,
) -> Result<(&'a [Value], Option<&'a Map<String, Value>>)> {
    match source {
        Value::Array(items) => Ok((items.as_slice(), None)),
        Value::Object(obj) => {
            let found = match fields.list_key.as_deref() {
                Some(key) => present(obj, key).map(|v| (key, v)),
                None => LIST_KEYS.iter().find_map(|k| present(obj, k).map(|v| (*k, v))),
            };
            match found {
                Some((_, Value::Array(items))) => Ok((items.as_slice(), Some(obj))),
                Some((key, other)) => Err(Error::data_source(format!(
                    "price container '{key}' is not a list (got {})",
                    json_kind(other)
                ))),
                None => Err(Error::data_source("no price list found in source")),
            }
        }
        other => Err(Error::data_source(format!(
            "price source must be an object or a list, got {}",
            json_kind(other)
        ))),
    }
}

fn parse_record(record: &Value, fields: &FieldSpec, tz: Tz) -> std::result::Result<PricePoint, &'static str> {
    let obj = record.as_object().ok_or("record is not an object")?;

    let raw_time = resolve_field(obj, fields.time_field.as_deref(), TIME_KEYS).ok_or("missing start time")?;
    let timestamp = match raw_time {
        Value::String(s) => parse_timestamp(s, fields.time_format.as_deref(), tz),
        Value::Number(n) => n.as_i64().and_then(|v| from_epoch(v, tz)),
        _ => None,
    }
    .ok_or("unparsable start time")?;

    let raw_price = resolve_field(obj, fields.price_field.as_deref(), PRICE_KEYS).ok_or("missing price")?;
    let price = match raw_price {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|p| p.is_finite())
    .ok_or("unparsable price")?;

    Ok(PricePoint::new(timestamp, price * fields.factor + fields.add))
}

/// First present, non-null value among the candidate keys.
fn resolve_field<'a>(obj: &'a Map<String, Value>, explicit: Option<&str>, candidates: &[&str]) -> Option<&'a Value> {
    match explicit {
        Some(key) => present(obj, key),
        None => candidates.iter().find_map(|k| present(obj, k)),
    }
}

fn present<'a>(obj: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    obj.get(key).filter(|v| !v.is_null())
}

/// Parse a timestamp string into an instant in `tz`.
///
/// Values without an offset are read as local time in `tz`.
pub fn parse_timestamp(raw: &str, format: Option<&str>, tz: Tz) -> Option<DateTime<Tz>> {
    let raw = raw.trim();
    if let Some(fmt) = format {
        if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
            return Some(dt.with_timezone(&tz));
        }
        return NaiveDateTime::parse_from_str(raw, fmt).ok().and_then(|n| localize(n, tz));
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&tz));
    }
    for fmt in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(raw, fmt) {
            return Some(dt.with_timezone(&tz));
        }
    }
    for fmt in NAIVE_FORMATS {
        if let Ok(n) = NaiveDateTime::parse_from_str(raw, fmt) {
            return localize(n, tz);
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .and_then(|n| localize(n, tz))
}

fn localize(naive: NaiveDateTime, tz: Tz) -> Option<DateTime<Tz>> {
    tz.from_local_datetime(&naive).earliest()
}

fn from_epoch(v: i64, tz: Tz) -> Option<DateTime<Tz>> {
    // epoch ms -> sec
    let secs = if v > 10_i64.pow(12) { v / 1000 } else { v };
    DateTime::<Utc>::from_timestamp(secs, 0).map(|dt| dt.with_timezone(&tz))
}

fn string_attr(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

fn json_kind(v: &Value) -> &'static str {
    match v {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}

/// Currency token to display next to prices.
///
/// Precedence: explicit override, series currency, token from the unit of
/// measurement, then [`FALLBACK_CURRENCY`]. In cents mode the major currency
/// is mapped to its minor unit unless an override is given.
pub fn resolve_currency(override_currency: Option<&str>, series: &PriceSeries, use_cents: bool) -> String {
    if let Some(c) = non_empty(override_currency) {
        return c.to_string();
    }
    let major = non_empty(series.currency.as_deref())
        .or_else(|| series.unit.as_deref().and_then(unit_currency))
        .unwrap_or(FALLBACK_CURRENCY);
    if use_cents {
        minor_unit(major).to_string()
    } else {
        major.to_string()
    }
}

/// `SEK/kWh` -> `SEK`
pub fn unit_currency(unit: &str) -> Option<&str> {
    let token = unit.split('/').next()?.trim();
    let is_currency = !token.is_empty()
        && !token.eq_ignore_ascii_case("kwh")
        && !token.chars().any(|c| c.is_ascii_digit());
    is_currency.then_some(token)
}

fn minor_unit(major: &str) -> &str {
    match major.to_ascii_uppercase().as_str() {
        "SEK" => "öre",
        "NOK" | "DKK" => "øre",
        _ if is_minor_unit(major) => major,
        _ => FALLBACK_MINOR_UNIT,
    }
}

fn is_minor_unit(token: &str) -> bool {
    matches!(token, "öre" | "øre" | "¢" | "ct" | "c" | "cent" | "cents")
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.map(str::trim).filter(|s| !s.is_empty())
}
