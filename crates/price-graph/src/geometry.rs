// File: crates/price-graph/src/geometry.rs
// Summary: Lightweight geometry helpers for label placement.

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl RectF {
    pub fn from_ltrb(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self { left, top, right, bottom }
    }

    pub fn from_ltwh(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self { left, top, right: left + width, bottom: top + height }
    }

    pub fn intersects(&self, other: &RectF) -> bool {
        self.left < other.right && other.left < self.right && self.top < other.bottom && other.top < self.bottom
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self::from_ltrb(self.left + dx, self.top + dy, self.right + dx, self.bottom + dy)
    }

    /// Shift `self` so it lies inside `bounds`; oversized rects align to the
    /// top-left corner of `bounds`.
    pub fn clamp_into(&self, bounds: &RectF) -> Self {
        let dx = if self.left < bounds.left {
            bounds.left - self.left
        } else if self.right > bounds.right {
            (bounds.right - self.right).max(bounds.left - self.left)
        } else {
            0.0
        };
        let dy = if self.top < bounds.top {
            bounds.top - self.top
        } else if self.bottom > bounds.bottom {
            (bounds.bottom - self.bottom).max(bounds.top - self.top)
        } else {
            0.0
        };
        self.offset(dx, dy)
    }

    pub fn to_skia(&self) -> skia_safe::Rect {
        skia_safe::Rect::from_ltrb(self.left, self.top, self.right, self.bottom)
    }
}

/// Place labels in priority order. Each candidate is its preferred box and a
/// flipped alternative; both are clamped into `bounds`. A label whose boxes
/// both overlap an earlier placement is dropped (`None`).
pub fn place_labels(bounds: &RectF, candidates: &[(RectF, RectF)]) -> Vec<Option<RectF>> {
    let mut placed: Vec<RectF> = Vec::new();
    candidates
        .iter()
        .map(|(preferred, flipped)| {
            let free = |r: &RectF| !placed.iter().any(|q| q.intersects(r));
            let rect = [preferred, flipped].into_iter().map(|r| r.clamp_into(bounds)).find(|r| free(r));
            if let Some(r) = rect {
                placed.push(r);
            }
            rect
        })
        .collect()
}

#[inline]
pub fn clamp<T: PartialOrd>(v: T, lo: T, hi: T) -> T {
    if v < lo { lo } else if v > hi { hi } else { v }
}
