// File: crates/price-graph/src/types.rs
// Summary: Shared canvas constants and plot insets.

/// Default canvas width in pixels.
pub const WIDTH: u32 = 1180;
/// Default canvas height in pixels.
pub const HEIGHT: u32 = 820;
/// Largest accepted canvas edge.
pub const MAX_CANVAS: u32 = 8192;

/// Screen margins around the plot area, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Insets {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
}

impl Insets {
    pub fn new(left: f32, right: f32, top: f32, bottom: f32) -> Self {
        Self { left: left.max(0.0), right: right.max(0.0), top: top.max(0.0), bottom: bottom.max(0.0) }
    }

    /// Insets for a `width` x `height` canvas from fractional margins.
    ///
    /// The Y axis takes `left_margin` on whichever side it is drawn; the
    /// opposite side keeps a small gutter. The top reserves room for the
    /// header row when one is drawn.
    pub fn for_canvas(width: f32, height: f32, left_margin: f32, bottom_margin: f32, axis_right: bool, header: bool) -> Self {
        let axis = width * left_margin;
        let gutter = width * 0.04;
        let (left, right) = if axis_right { (gutter, axis) } else { (axis, gutter) };
        let top = if header { height * 0.11 } else { height * 0.05 };
        Self::new(left, right, top, height * bottom_margin)
    }
}
