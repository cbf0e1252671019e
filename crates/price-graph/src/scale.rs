// File: crates/price-graph/src/scale.rs
// Summary: Time (X) and value (Y) transforms from data space to canvas pixels.

use chrono::DateTime;
use chrono_tz::Tz;

use crate::window::WindowBounds;

/// Horizontal scale mapping `[start, end)` onto `[left_px, right_px]`.
#[derive(Clone, Copy, Debug)]
pub struct TimeScale {
    pub left_px: f32,
    pub right_px: f32,
    start_ms: i64,
    span_ms: i64,
}

impl TimeScale {
    pub fn new(left_px: f32, right_px: f32, bounds: &WindowBounds) -> Self {
        let start_ms = bounds.start.timestamp_millis();
        let span_ms = (bounds.end.timestamp_millis() - start_ms).max(1);
        Self { left_px, right_px, start_ms, span_ms }
    }

    #[inline]
    pub fn to_px(&self, t: DateTime<Tz>) -> f32 {
        let frac = (t.timestamp_millis() - self.start_ms) as f64 / self.span_ms as f64;
        self.left_px + frac as f32 * (self.right_px - self.left_px)
    }
}

/// Vertical value scale mapping data range to [top, bottom] pixels.
#[derive(Clone, Copy, Debug)]
pub struct ValueScale {
    pub top_px: f32,
    pub bottom_px: f32,
    pub vmin: f64,
    pub vmax: f64,
}

impl ValueScale {
    pub fn new_linear(top_px: f32, bottom_px: f32, vmin: f64, vmax: f64) -> Self {
        let mut s = Self { top_px, bottom_px, vmin, vmax };
        if (s.vmax - s.vmin).abs() < 1e-12 {
            s.vmin -= 0.5;
            s.vmax += 0.5;
        }
        s
    }

    /// Scale covering `[lo, hi]` with a fractional margin on both ends.
    pub fn padded(top_px: f32, bottom_px: f32, lo: f64, hi: f64, pad: f64) -> Self {
        let m = (hi - lo).abs() * pad;
        Self::new_linear(top_px, bottom_px, lo - m, hi + m)
    }

    #[inline]
    pub fn to_px(&self, y: f64) -> f32 {
        let span = (self.vmax - self.vmin).max(1e-12);
        self.bottom_px - ((y - self.vmin) / span) as f32 * (self.bottom_px - self.top_px)
    }

    pub fn contains(&self, y: f64) -> bool {
        self.vmin <= y && y <= self.vmax
    }
}
