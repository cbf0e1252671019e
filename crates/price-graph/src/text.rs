// File: crates/price-graph/src/text.rs
// Summary: Label shaping and drawing on top of Skia textlayout, with optional halo and rotation.

use skia_safe as skia;
use skia::textlayout::{FontCollection, Paragraph, ParagraphBuilder, ParagraphStyle, TextAlign, TextStyle};

use crate::geometry::RectF;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LabelStyle {
    pub size: f32,
    pub color: skia::Color,
    pub bold: bool,
    /// Outline drawn behind the glyphs.
    pub halo: Option<skia::Color>,
}

impl LabelStyle {
    pub fn new(size: f32, color: skia::Color) -> Self {
        Self { size, color, bold: false, halo: None }
    }

    pub fn bold(mut self, bold: bool) -> Self {
        self.bold = bold;
        self
    }

    pub fn halo(mut self, halo: Option<skia::Color>) -> Self {
        self.halo = halo;
        self
    }
}

pub struct TextShaper {
    fonts: FontCollection,
}

impl TextShaper {
    pub fn new() -> Self {
        let mut fc = FontCollection::new();
        fc.set_default_font_manager(skia::FontMgr::default(), None);
        Self { fonts: fc }
    }

    fn make_style(style: &LabelStyle, outline: Option<skia::Color>) -> TextStyle {
        let mut ts = TextStyle::new();
        ts.set_font_size(style.size.max(1.0));
        ts.set_font_families(&["Segoe UI", "Arial", "Helvetica", "Roboto", "DejaVu Sans", "sans-serif"]);
        if style.bold {
            ts.set_font_style(skia::FontStyle::bold());
        }
        let mut paint = skia::Paint::default();
        paint.set_anti_alias(true);
        match outline {
            Some(c) => {
                paint.set_color(c);
                paint.set_style(skia::paint::Style::Stroke);
                paint.set_stroke_width((style.size * 0.22).max(1.5));
                paint.set_stroke_join(skia::paint::Join::Round);
            }
            None => {
                paint.set_color(style.color);
            }
        }
        ts.set_foreground_paint(&paint);
        ts
    }

    /// Lines are centered within the paragraph's own width.
    fn layout(&self, text: &str, style: &LabelStyle, outline: Option<skia::Color>) -> Paragraph {
        let mut pstyle = ParagraphStyle::new();
        pstyle.set_text_align(TextAlign::Center);
        let mut builder = ParagraphBuilder::new(&pstyle, &self.fonts);
        builder.push_style(&Self::make_style(style, outline));
        builder.add_text(text);
        let mut paragraph = builder.build();
        paragraph.layout(10_000.0);
        let width = paragraph.longest_line().ceil() + 1.0;
        paragraph.layout(width);
        paragraph
    }

    /// Width and height of the laid-out text.
    pub fn measure(&self, text: &str, style: &LabelStyle) -> (f32, f32) {
        let p = self.layout(text, style, None);
        (p.max_width(), p.height())
    }

    /// Draw with the top-left corner of the text box at (`x`, `y`).
    pub fn draw(&self, canvas: &skia::Canvas, text: &str, style: &LabelStyle, x: f32, y: f32) {
        if let Some(halo) = style.halo {
            self.layout(text, style, Some(halo)).paint(canvas, (x, y));
        }
        self.layout(text, style, None).paint(canvas, (x, y));
    }

    pub fn draw_in(&self, canvas: &skia::Canvas, text: &str, style: &LabelStyle, rect: &RectF) {
        self.draw(canvas, text, style, rect.left, rect.top);
    }

    /// Draw centered on (`cx`, `cy`) and rotated by `degrees` around that point.
    pub fn draw_rotated(&self, canvas: &skia::Canvas, text: &str, style: &LabelStyle, cx: f32, cy: f32, degrees: f32) {
        let (w, h) = self.measure(text, style);
        if degrees.abs() < f32::EPSILON {
            self.draw(canvas, text, style, cx - w * 0.5, cy - h * 0.5);
            return;
        }
        canvas.save();
        canvas.translate((cx, cy));
        canvas.rotate(degrees, None);
        self.draw(canvas, text, style, -w * 0.5, -h * 0.5);
        canvas.restore();
    }
}

impl Default for TextShaper {
    fn default() -> Self {
        Self::new()
    }
}
