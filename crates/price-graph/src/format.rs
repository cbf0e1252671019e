// File: crates/price-graph/src/format.rs
// Summary: Price, time and percentage label formatting.

use chrono::DateTime;
use chrono_tz::Tz;

const PREFIX_SYMBOLS: &[&str] = &["$", "£", "¥"];
const PREFIX_CODES: &[&str] = &["USD", "GBP"];

/// `1.234` with 2 decimals and `SEK` -> `1.23 SEK`; `$` and `£` style
/// currencies are prefixed instead.
pub fn format_price(value: f64, decimals: usize, currency: Option<&str>) -> String {
    let number = format!("{:.*}", decimals, value);
    // avoid "-0.00"
    let number = if number.trim_start_matches('-').chars().all(|c| c == '0' || c == '.') {
        number.trim_start_matches('-').to_string()
    } else {
        number
    };
    match currency.map(str::trim).filter(|c| !c.is_empty()) {
        None => number,
        Some(c) if PREFIX_SYMBOLS.contains(&c) => format!("{c}{number}"),
        Some(c) if PREFIX_CODES.iter().any(|p| p.eq_ignore_ascii_case(c)) => format!("{c} {number}"),
        Some(c) => format!("{number} {c}"),
    }
}

pub fn format_time(t: DateTime<Tz>) -> String {
    t.format("%H:%M").to_string()
}

/// Signed whole-percent difference of `value` from `reference`, e.g. `+12%`.
pub fn format_percent_diff(value: f64, reference: f64) -> Option<String> {
    if reference.abs() < f64::EPSILON {
        return None;
    }
    let pct = ((value - reference) / reference.abs() * 100.0).round();
    let pct = if pct == 0.0 { 0.0 } else { pct };
    Some(format!("{pct:+.0}%"))
}
