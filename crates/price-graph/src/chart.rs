// File: crates/price-graph/src/chart.rs
// Summary: Chart view and headless rendering pipeline using Skia CPU raster surfaces.

use chrono::DateTime;
use chrono_tz::Tz;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, RgbaImage};
use skia_safe as skia;
use tracing::debug;

use crate::analysis::{analyze, current_index, find_cheap_periods, price_tone, CheapPeriod, Statistics};
use crate::error::{Error, Result};
use crate::format::{format_percent_diff, format_price, format_time};
use crate::geometry::{clamp, place_labels, RectF};
use crate::grid::{x_tick_times, y_tick_values};
use crate::options::{AxisSide, FontWeight, RenderOptions};
use crate::scale::{TimeScale, ValueScale};
use crate::series::PricePoint;
use crate::text::{LabelStyle, TextShaper};
use crate::theme::{fade, Theme};
use crate::types::Insets;
use crate::window::{hour_floor, StartMode, VisibleWindow};

const BAND_ALPHA: f32 = 0.22;
const PAST_ALPHA: f32 = 0.4;
const LABEL_GAP: f32 = 8.0;
const MARKER_RADIUS: f32 = 4.0;

/// Everything the renderer draws, already windowed and analyzed.
#[derive(Clone, Debug)]
pub struct ChartView {
    pub window: VisibleWindow,
    /// Computed over `window.stats_points()`.
    pub stats: Option<Statistics>,
    /// Indices relative to `window.stats_points()`.
    pub cheap_periods: Vec<CheapPeriod>,
    /// Display currency token, already resolved.
    pub currency: String,
    pub now: DateTime<Tz>,
    pub start_mode: StartMode,
    pub source_label: Option<String>,
}

impl ChartView {
    /// Analyze `window` with the cheap-period rules from `options`.
    pub fn new(window: VisibleWindow, currency: impl Into<String>, now: DateTime<Tz>, options: &RenderOptions) -> Self {
        let stats = analyze(window.stats_points());
        let cheap_periods = find_cheap_periods(
            window.stats_points(),
            options.cheap_price_points,
            options.cheap_price_threshold,
            now,
            window.interval,
        );
        Self {
            window,
            stats,
            cheap_periods,
            currency: currency.into(),
            now,
            start_mode: options.start_graph_at,
            source_label: None,
        }
    }

    pub fn with_source_label(mut self, label: Option<String>) -> Self {
        self.source_label = label;
        self
    }

    pub fn stats_points(&self) -> &[PricePoint] {
        self.window.stats_points()
    }

    pub fn current_index(&self) -> Option<usize> {
        current_index(self.stats_points(), self.now, self.window.interval)
    }

    /// Samples from the current hour on, used for min/max labels and Y
    /// ticks. Midnight mode, or a window with nothing upcoming, uses every
    /// sample.
    pub fn upcoming_points(&self) -> &[PricePoint] {
        let points = self.stats_points();
        if self.start_mode == StartMode::Midnight {
            return points;
        }
        let hour = hour_floor(self.now);
        let from = points.partition_point(|p| p.timestamp < hour);
        if from == points.len() { points } else { &points[from..] }
    }

    /// Whether `t` falls inside a cheap period.
    pub fn in_cheap_period(&self, t: DateTime<Tz>) -> bool {
        let points = self.stats_points();
        let interval = self.window.interval;
        self.cheap_periods
            .iter()
            .any(|c| points[c.start_index].timestamp <= t && t < points[c.end_index].timestamp + interval)
    }
}

/// Plot rectangle and the scales mapping samples into it.
#[derive(Clone, Copy, Debug)]
pub struct PlotLayout {
    pub plot: RectF,
    pub xs: TimeScale,
    pub ys: ValueScale,
}

/// Lay out the plot area for `view` on the configured canvas.
pub fn layout(view: &ChartView, opts: &RenderOptions) -> PlotLayout {
    let (w, h) = (opts.canvas_width as f32, opts.canvas_height as f32);
    let header = (opts.label_current && opts.label_current_in_header && view.current_index().is_some())
        || opts.label_minmax_in_header;
    let insets = Insets::for_canvas(
        w,
        h,
        if opts.show_y_axis { opts.left_margin } else { 0.04 },
        opts.bottom_margin,
        opts.y_axis_side == AxisSide::Right,
        header,
    );
    let plot = RectF::from_ltrb(insets.left, insets.top, w - insets.right, h - insets.bottom);

    let (lo, hi) = view
        .window
        .points
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), p| (lo.min(p.price), hi.max(p.price)));
    let lo = if opts.show_cheap_price_line && opts.cheap_price_threshold > 0.0 {
        lo.min(opts.cheap_price_threshold)
    } else {
        lo
    };
    PlotLayout {
        plot,
        xs: TimeScale::new(plot.left, plot.right, &view.window.bounds),
        ys: ValueScale::padded(plot.top, plot.bottom, lo, hi, 0.08),
    }
}

/// Render to an encoded PNG.
pub fn render_png(view: &ChartView, theme: &Theme, options: &RenderOptions) -> Result<Vec<u8>> {
    let img = render_rgba8(view, theme, options)?;
    let mut png = Vec::new();
    PngEncoder::new(&mut png)
        .write_image(img.as_raw(), img.width(), img.height(), ExtendedColorType::Rgba8)
        .map_err(|e| Error::render(format!("encode PNG failed: {e}")))?;
    Ok(png)
}

/// Render to an unpremultiplied RGBA buffer of the configured canvas size.
pub fn render_rgba8(view: &ChartView, theme: &Theme, options: &RenderOptions) -> Result<RgbaImage> {
    options.validate()?;
    let (w, h) = (options.canvas_width as i32, options.canvas_height as i32);
    let mut surface = skia::surfaces::raster_n32_premul((w, h))
        .ok_or_else(|| Error::render("failed to create raster surface"))?;

    draw(surface.canvas(), view, theme, options);

    let info = skia::ImageInfo::new((w, h), skia::ColorType::RGBA8888, skia::AlphaType::Unpremul, None);
    let row_bytes = w as usize * 4;
    let mut pixels = vec![0u8; row_bytes * h as usize];
    if !surface.read_pixels(&info, &mut pixels, row_bytes, (0, 0)) {
        return Err(Error::render("failed to read back raster surface"));
    }
    RgbaImage::from_raw(w as u32, h as u32, pixels).ok_or_else(|| Error::render("pixel buffer size mismatch"))
}

fn draw(canvas: &skia::Canvas, view: &ChartView, theme: &Theme, opts: &RenderOptions) {
    let background = if opts.transparent_background { skia::Color::TRANSPARENT } else { theme.background_color };
    canvas.clear(background);

    let shaper = TextShaper::new();
    match &view.stats {
        Some(stats) => {
            let frame = Frame::new(canvas, &shaper, view, stats, theme, opts);
            frame.draw();
        }
        None => draw_no_data(canvas, &shaper, theme, opts),
    }
}

fn draw_no_data(canvas: &skia::Canvas, shaper: &TextShaper, theme: &Theme, opts: &RenderOptions) {
    let style = LabelStyle::new(opts.label_font_size * 2.0, theme.label_color);
    let (cx, cy) = (opts.canvas_width as f32 * 0.5, opts.canvas_height as f32 * 0.5);
    shaper.draw_rotated(canvas, "No data", &style, cx, cy, 0.0);
    debug!("rendered empty chart placeholder");
}

// ---- helpers ----------------------------------------------------------------

fn stroke(color: skia::Color, width: f32) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_color(color);
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Stroke);
    paint.set_stroke_width(width);
    paint
}

fn fill(color: skia::Color) -> skia::Paint {
    let mut paint = skia::Paint::default();
    paint.set_color(color);
    paint.set_anti_alias(true);
    paint.set_style(skia::paint::Style::Fill);
    paint
}

/// Axis-aligned box of a `w` x `h` label rotated by `degrees`.
fn rotated_extent(w: f32, h: f32, degrees: f32) -> (f32, f32) {
    let r = degrees.to_radians();
    let (s, c) = (r.sin().abs(), r.cos().abs());
    (w * c + h * s, w * s + h * c)
}

struct Label {
    text: String,
    style: LabelStyle,
    anchor: (f32, f32),
    above: bool,
}

impl Label {
    fn rect(&self, shaper: &TextShaper, above: bool) -> RectF {
        let (w, h) = shaper.measure(&self.text, &self.style);
        let (x, y) = self.anchor;
        let top = if above { y - LABEL_GAP - h } else { y + LABEL_GAP };
        RectF::from_ltwh(x - w * 0.5, top, w, h)
    }
}

struct Frame<'a> {
    canvas: &'a skia::Canvas,
    shaper: &'a TextShaper,
    view: &'a ChartView,
    stats: &'a Statistics,
    /// Statistics over [`ChartView::upcoming_points`].
    upcoming: Statistics,
    theme: &'a Theme,
    opts: &'a RenderOptions,
    plot: RectF,
    xs: TimeScale,
    ys: ValueScale,
    current: Option<usize>,
    currency: Option<&'a str>,
    halo: Option<skia::Color>,
}

impl<'a> Frame<'a> {
    fn new(
        canvas: &'a skia::Canvas,
        shaper: &'a TextShaper,
        view: &'a ChartView,
        stats: &'a Statistics,
        theme: &'a Theme,
        opts: &'a RenderOptions,
    ) -> Self {
        let PlotLayout { plot, xs, ys } = layout(view, opts);
        let current = view.current_index();
        let upcoming = analyze(view.upcoming_points()).unwrap_or_else(|| stats.clone());

        let currency = opts.label_show_currency.then_some(view.currency.as_str());
        let halo = theme.label_stroke.then(|| {
            if opts.transparent_background {
                skia::Color::from_argb(0x80, 0, 0, 0)
            } else {
                theme.background_color
            }
        });

        Self { canvas, shaper, view, stats, upcoming, theme, opts, plot, xs, ys, current, currency, halo }
    }

    fn draw(&self) {
        let x_ticks = x_tick_times(&self.view.window.bounds, self.opts.x_tick_step_hours);
        let y_ticks = self.y_ticks();

        self.draw_grid(&x_ticks, &y_ticks);
        if self.opts.cheap_highlight.bands() {
            self.draw_cheap_bands();
        }
        self.draw_axes(&x_ticks, &y_ticks);
        self.draw_reference_lines();
        self.draw_price_line();
        self.draw_now_line();
        self.draw_labels();
        self.draw_header();
        self.draw_footer();

        debug!(
            points = self.view.window.points.len(),
            cheap_periods = self.view.cheap_periods.len(),
            x_ticks = x_ticks.len(),
            y_ticks = y_ticks.len(),
            "rendered price chart"
        );
    }

    fn display(&self, price: f64) -> f64 {
        price * self.opts.display_scale()
    }

    fn price_text(&self, price: f64) -> String {
        format_price(self.display(price), self.opts.decimals(), self.currency)
    }

    fn label_style(&self, color: skia::Color) -> LabelStyle {
        LabelStyle::new(self.opts.label_font_size, color)
            .bold(self.opts.label_font_weight == FontWeight::Bold)
            .halo(self.halo)
    }

    fn point_px(&self, p: &PricePoint) -> (f32, f32) {
        (self.xs.to_px(p.timestamp) + self.segment_width(p) * 0.5, self.ys.to_px(p.price))
    }

    fn segment_width(&self, p: &PricePoint) -> f32 {
        let end = (p.timestamp + self.view.window.interval).min(self.view.window.bounds.end);
        (self.xs.to_px(end) - self.xs.to_px(p.timestamp)).max(0.0)
    }

    /// Min, average and max used for Y ticks.
    fn tick_range(&self) -> (f64, f64, f64) {
        (self.upcoming.min.price, self.upcoming.average, self.upcoming.max.price)
    }

    fn y_ticks(&self) -> Vec<f64> {
        let (lo, avg, hi) = self.tick_range();
        y_tick_values(self.opts.y_tick_count, lo, avg, hi, self.ys.vmin, self.ys.vmax)
            .into_iter()
            .filter(|v| self.ys.contains(*v))
            .collect()
    }

    fn draw_grid(&self, x_ticks: &[DateTime<Tz>], y_ticks: &[f64]) {
        if self.opts.show_vertical_grid {
            let paint = stroke(self.theme.tickline_color, 1.5);
            for t in x_ticks {
                let x = self.xs.to_px(*t);
                self.canvas.draw_line((x, self.plot.top), (x, self.plot.bottom), &paint);
            }
        }
        if self.opts.show_horizontal_grid {
            let paint = stroke(fade(self.theme.grid_color, self.theme.grid_alpha), 1.0);
            for v in y_ticks {
                let y = self.ys.to_px(*v);
                self.canvas.draw_line((self.plot.left, y), (self.plot.right, y), &paint);
            }
        }
    }

    fn draw_cheap_bands(&self) {
        let points = self.view.stats_points();
        let interval = self.view.window.interval;
        for period in &self.view.cheap_periods {
            let start = points[period.start_index].timestamp;
            let end = (points[period.end_index].timestamp + interval).min(self.view.window.bounds.end);
            let alpha = if period.past { BAND_ALPHA * 0.5 } else { BAND_ALPHA };
            let x0 = clamp(self.xs.to_px(start), self.plot.left, self.plot.right);
            let x1 = clamp(self.xs.to_px(end), self.plot.left, self.plot.right);
            let band = RectF::from_ltrb(x0, self.plot.top, x1, self.plot.bottom);
            self.canvas.draw_rect(band.to_skia(), &fill(fade(self.theme.cheap_price_color, alpha)));
        }
    }

    fn draw_axes(&self, x_ticks: &[DateTime<Tz>], y_ticks: &[f64]) {
        let spine = stroke(self.theme.spine_color, 1.0);
        let tick = stroke(self.theme.tick_color, 1.0);

        if self.opts.show_x_axis {
            let y = self.plot.bottom;
            self.canvas.draw_line((self.plot.left, y), (self.plot.right, y), &spine);

            let deg = self.opts.x_axis_label_rotation_deg;
            let mut last: Option<RectF> = None;
            for t in x_ticks {
                let x = self.xs.to_px(*t);
                if self.opts.show_x_ticks {
                    self.canvas.draw_line((x, y), (x, y + 5.0), &tick);
                }
                let color = if self.opts.cheap_highlight.x_axis() && self.view.in_cheap_period(*t) {
                    self.theme.cheap_price_color
                } else {
                    self.theme.axis_label_color
                };
                let style = LabelStyle::new(self.opts.label_font_size, color).halo(self.halo);
                let text = format_time(*t);
                let (w, h) = self.shaper.measure(&text, &style);
                let (rw, rh) = rotated_extent(w, h, deg);
                let cy = y + 8.0 + rh * 0.5;
                let rect = RectF::from_ltwh(x - rw * 0.5, cy - rh * 0.5, rw, rh);
                if last.is_some_and(|r| r.intersects(&rect)) {
                    continue;
                }
                self.shaper.draw_rotated(self.canvas, &text, &style, x, cy, deg);
                last = Some(rect);
            }
        }

        if self.opts.show_y_axis {
            let right = self.opts.y_axis_side == AxisSide::Right;
            let x = if right { self.plot.right } else { self.plot.left };
            self.canvas.draw_line((x, self.plot.top), (x, self.plot.bottom), &spine);

            let deg = self.opts.y_axis_label_rotation_deg;
            let (lo, avg, hi) = self.tick_range();
            for v in y_ticks {
                let y = self.ys.to_px(*v);
                if self.opts.show_y_axis_ticks {
                    let dx = if right { 5.0 } else { -5.0 };
                    self.canvas.draw_line((x, y), (x + dx, y), &tick);
                }
                let color = if self.opts.y_tick_use_colors {
                    self.nearest_stat_color(*v, lo, avg, hi)
                } else {
                    self.theme.axis_label_color
                };
                let style = LabelStyle::new(self.opts.label_font_size, color).halo(self.halo);
                let text = format_price(self.display(*v), self.opts.decimals(), None);
                let (w, h) = self.shaper.measure(&text, &style);
                let (rw, _) = rotated_extent(w, h, deg);
                let cx = if right { x + 8.0 + rw * 0.5 } else { x - 8.0 - rw * 0.5 };
                self.shaper.draw_rotated(self.canvas, &text, &style, cx, y, deg);
            }
        }
    }

    fn nearest_stat_color(&self, v: f64, lo: f64, avg: f64, hi: f64) -> skia::Color {
        let candidates = [
            ((v - lo).abs(), self.theme.label_color_min),
            ((v - avg).abs(), self.theme.label_color_avg),
            ((v - hi).abs(), self.theme.label_color_max),
        ];
        candidates
            .into_iter()
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, c)| c)
            .unwrap_or(self.theme.axis_label_color)
    }

    fn draw_reference_lines(&self) {
        let mut lines = Vec::new();
        if self.opts.show_average_price_line {
            lines.push((self.stats.average, self.theme.avgline_color, self.theme.avgline_style));
        }
        if self.opts.show_cheap_price_line && self.opts.cheap_price_threshold > 0.0 {
            lines.push((self.opts.cheap_price_threshold, self.theme.cheapline_color, self.theme.cheapline_style));
        }
        for (value, color, style) in lines {
            let y = self.ys.to_px(value);
            let width = 1.2;
            let mut paint = stroke(color, width);
            if let Some(intervals) = style.dash_intervals(width) {
                paint.set_path_effect(skia::PathEffect::dash(&intervals, 0.0));
            }
            self.canvas.draw_line((self.plot.left, y), (self.plot.right, y), &paint);
        }
    }

    fn segment_color(&self, p: &PricePoint) -> skia::Color {
        let color = if self.opts.color_price_line_by_average {
            self.theme.tone_color(price_tone(p.price, self.stats.average, self.opts.near_average_threshold))
        } else {
            self.theme.price_line_color
        };
        if self.is_past(p) {
            fade(color, PAST_ALPHA)
        } else {
            color
        }
    }

    fn is_past(&self, p: &PricePoint) -> bool {
        self.opts.dim_past_prices && p.timestamp + self.view.window.interval <= self.view.now
    }

    fn draw_price_line(&self) {
        let points = &self.view.window.points;
        let Some(first) = points.first() else { return };
        let base = self.ys.to_px(clamp(0.0, self.ys.vmin, self.ys.vmax));
        let x_end = |p: &PricePoint| self.xs.to_px(p.timestamp) + self.segment_width(p);

        let mut area = skia::Path::new();
        area.move_to((self.xs.to_px(first.timestamp), base));
        for p in points {
            let y = self.ys.to_px(p.price);
            area.line_to((self.xs.to_px(p.timestamp), y));
            area.line_to((x_end(p), y));
        }
        if let Some(last) = points.last() {
            area.line_to((x_end(last), base));
        }
        area.close();
        self.canvas.draw_path(&area, &fill(fade(self.theme.fill_color, self.theme.fill_alpha)));

        let width = self.theme.plot_linewidth;
        for (i, p) in points.iter().enumerate() {
            let mut paint = stroke(self.segment_color(p), width);
            paint.set_stroke_cap(skia::paint::Cap::Round);
            let y = self.ys.to_px(p.price);
            let x1 = x_end(p);
            self.canvas.draw_line((self.xs.to_px(p.timestamp), y), (x1, y), &paint);
            if let Some(next) = points.get(i + 1) {
                let riser = stroke(self.segment_color(next), width);
                self.canvas.draw_line((x1, y), (x1, self.ys.to_px(next.price)), &riser);
            }
        }
    }

    fn draw_now_line(&self) {
        let now = self.view.now;
        if !self.view.window.bounds.contains(now) {
            return;
        }
        let x = self.xs.to_px(now);
        let paint = stroke(fade(self.theme.nowline_color, self.theme.nowline_alpha), 1.5);
        self.canvas.draw_line((x, self.plot.top), (x, self.plot.bottom), &paint);
    }

    fn min_max_text(&self, p: &PricePoint) -> String {
        if self.opts.label_minmax_show_price {
            format!("{}\n{}", self.price_text(p.price), format_time(p.timestamp))
        } else {
            format_time(p.timestamp)
        }
    }

    fn stat_color(&self, color: skia::Color) -> skia::Color {
        if self.opts.label_use_colors {
            color
        } else {
            self.theme.label_color
        }
    }

    fn draw_marker(&self, anchor: (f32, f32), color: skia::Color) {
        self.canvas.draw_circle(anchor, MARKER_RADIUS, &fill(color));
        if let Some(halo) = self.halo {
            self.canvas.draw_circle(anchor, MARKER_RADIUS, &stroke(halo, 1.0));
        }
    }

    /// Current, min and max labels inside the plot, highest priority first.
    fn plot_labels(&self) -> Vec<Label> {
        let points = self.view.stats_points();
        let mut labels = Vec::new();

        let current = self.current.map(|i| points[i]);
        if let Some(p) = current.filter(|_| self.opts.label_current && !self.opts.label_current_in_header) {
            let (x, _) = self.point_px(&p);
            labels.push(Label {
                text: format!("{}\nat {}", self.price_text(p.price), format_time(self.view.now)),
                style: self.label_style(self.theme.label_color),
                anchor: (x, self.ys.to_px(p.price)),
                above: true,
            });
        }
        if self.opts.label_minmax_in_header {
            return labels;
        }

        let (min, max) = (&self.upcoming.min, &self.upcoming.max);
        let same_as_current = |p: &PricePoint| current.is_some_and(|c| c.timestamp == p.timestamp);
        if self.opts.label_min && !same_as_current(min) {
            labels.push(Label {
                text: self.min_max_text(min),
                style: self.label_style(self.stat_color(self.theme.label_color_min)),
                anchor: self.point_px(min),
                above: true,
            });
        }
        if self.opts.label_max && !same_as_current(max) && max != min {
            let below = self.opts.label_max_below_point || self.opts.label_current_in_header;
            labels.push(Label {
                text: self.min_max_text(max),
                style: self.label_style(self.stat_color(self.theme.label_color_max)),
                anchor: self.point_px(max),
                above: !below,
            });
        }
        labels
    }

    fn draw_labels(&self) {
        if let Some(i) = self.current {
            let p = self.view.stats_points()[i];
            let anchor = (self.xs.to_px(self.view.now), self.ys.to_px(p.price));
            if self.view.window.bounds.contains(self.view.now) {
                self.draw_marker(anchor, self.segment_color(&p));
            }
        }

        let labels = self.plot_labels();
        let candidates: Vec<(RectF, RectF)> = labels
            .iter()
            .map(|l| (l.rect(self.shaper, l.above), l.rect(self.shaper, !l.above)))
            .collect();
        for (label, rect) in labels.iter().zip(place_labels(&self.plot, &candidates)) {
            let Some(rect) = rect else {
                debug!(text = %label.text, "dropping overlapping label");
                continue;
            };
            self.draw_marker(label.anchor, label.style.color);
            self.shaper.draw_in(self.canvas, &label.text, &label.style, &rect);
        }
    }

    /// Current price (and optionally min/max) above the plot.
    fn draw_header(&self) {
        let mut rows: Vec<Vec<(String, skia::Color)>> = Vec::new();
        let points = self.view.stats_points();

        if let Some(p) = self.current.map(|i| points[i]) {
            if self.opts.label_current && self.opts.label_current_in_header {
                let mut row = vec![(
                    format!("{} at {}", self.price_text(p.price), format_time(self.view.now)),
                    self.theme.label_color,
                )];
                if self.opts.label_current_in_header_more {
                    let mut more = format!("avg {}", self.price_text(self.stats.average));
                    if let Some(pct) = format_percent_diff(p.price, self.stats.average) {
                        more.push_str(&format!(" ({pct})"));
                    }
                    row.push((more, self.stat_color(self.theme.label_color_avg)));
                }
                rows.push(row);
            }
        }
        if self.opts.label_minmax_in_header {
            let mut row = Vec::new();
            if self.opts.label_min {
                let text = format!("min {}", self.min_max_text(&self.upcoming.min).replace('\n', " at "));
                row.push((text, self.stat_color(self.theme.label_color_min)));
            }
            if self.opts.label_max {
                let text = format!("max {}", self.min_max_text(&self.upcoming.max).replace('\n', " at "));
                row.push((text, self.stat_color(self.theme.label_color_max)));
            }
            if !row.is_empty() {
                rows.push(row);
            }
        }
        if rows.is_empty() {
            return;
        }

        let bold = self.opts.header_font_weight == FontWeight::Bold;
        let gap = self.opts.label_font_size * 1.5;
        let cx = (self.plot.left + self.plot.right) * 0.5;
        let mut top = self.plot.top * 0.15;
        for (r, row) in rows.iter().enumerate() {
            // first row is the headline, the rest are smaller
            let size = if r == 0 { self.opts.label_font_size * 1.6 } else { self.opts.label_font_size * 1.2 };
            let styles: Vec<LabelStyle> = row
                .iter()
                .map(|(_, c)| LabelStyle::new(size, *c).bold(bold).halo(self.halo))
                .collect();
            let sizes: Vec<(f32, f32)> =
                row.iter().zip(&styles).map(|((t, _), s)| self.shaper.measure(t, s)).collect();
            let total: f32 = sizes.iter().map(|s| s.0).sum::<f32>() + gap * (row.len() as f32 - 1.0);
            let height = sizes.iter().map(|s| s.1).fold(0.0, f32::max);
            let mut x = cx - total * 0.5;
            for (((text, _), style), (w, _)) in row.iter().zip(&styles).zip(&sizes) {
                self.shaper.draw(self.canvas, text, style, x, top);
                x += w + gap;
            }
            top += height + 2.0;
        }
    }

    fn draw_footer(&self) {
        if !self.opts.show_data_source {
            return;
        }
        let Some(label) = self.view.source_label.as_deref().filter(|s| !s.is_empty()) else { return };
        let style = LabelStyle::new(self.opts.label_font_size * 0.9, fade(self.theme.axis_label_color, 0.8));
        let (w, h) = self.shaper.measure(label, &style);
        let x = self.opts.canvas_width as f32 - w - self.opts.canvas_width as f32 * 0.02;
        let y = self.opts.canvas_height as f32 - h - 6.0;
        self.shaper.draw(self.canvas, label, &style, x, y);
    }
}

