use serde::Serialize;

/// Axis-aligned rectangle. `x, y` is the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn area(&self) -> f64 {
        self.width * self.height
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// True when either side has no extent.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Shrink by `pad` on every side. Sides never go below zero.
    pub fn inset(&self, pad: f64) -> Self {
        Self {
            x: self.x + pad,
            y: self.y + pad,
            width: (self.width - 2.0 * pad).max(0.0),
            height: (self.height - 2.0 * pad).max(0.0),
        }
    }

    /// Grow width and height up to `min` without moving the origin.
    pub fn at_least(&self, min: f64) -> Self {
        Self {
            width: self.width.max(min),
            height: self.height.max(min),
            ..*self
        }
    }

    /// Half-open containment: left/top edges inclusive, right/bottom exclusive.
    pub fn contains(&self, px: f64, py: f64) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Area shared with `other` (0 when they only touch or are apart).
    pub fn overlap_area(&self, other: &Rect) -> f64 {
        let w = self.right().min(other.right()) - self.x.max(other.x);
        let h = self.bottom().min(other.bottom()) - self.y.max(other.y);
        if w <= 0.0 || h <= 0.0 {
            0.0
        } else {
            w * h
        }
    }

    /// Split off a leading slice of `ratio` along the width (side by side).
    pub fn split_horizontal(&self, ratio: f64) -> (Self, Self) {
        let first_w = self.width * ratio;
        (
            Self::new(self.x, self.y, first_w, self.height),
            Self::new(self.x + first_w, self.y, self.width - first_w, self.height),
        )
    }

    /// Split off a leading slice of `ratio` along the height (stacked).
    pub fn split_vertical(&self, ratio: f64) -> (Self, Self) {
        let first_h = self.height * ratio;
        (
            Self::new(self.x, self.y, self.width, first_h),
            Self::new(self.x, self.y + first_h, self.width, self.height - first_h),
        )
    }
}
