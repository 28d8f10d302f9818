//! Axis-aligned box types and overlap metrics.
//!
//! Two box encodings are used. [`Roi`] stores corner coordinates as produced
//! by the proposal stage. [`Rect`] stores a top-left corner plus size, where
//! the size follows the inclusive-pixel convention (`w = x2 - x1 + 1`).

/// Region proposal in corner form `(x1, y1, x2, y2)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Roi {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl Roi {
    /// Creates a proposal from corner coordinates.
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    /// Divides every coordinate by `scale`, mapping scaled space back to the
    /// original image.
    pub fn unscale(self, scale: f32) -> Self {
        Self {
            x1: self.x1 / scale,
            y1: self.y1 / scale,
            x2: self.x2 / scale,
            y2: self.y2 / scale,
        }
    }

    /// Inclusive width `x2 - x1 + 1`.
    pub fn width(&self) -> f32 {
        self.x2 - self.x1 + 1.0
    }

    /// Inclusive height `y2 - y1 + 1`.
    pub fn height(&self) -> f32 {
        self.y2 - self.y1 + 1.0
    }
}

impl From<[f32; 4]> for Roi {
    fn from(v: [f32; 4]) -> Self {
        Self::new(v[0], v[1], v[2], v[3])
    }
}

/// Detection rectangle: top-left corner plus size.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    /// Creates a rectangle from its top-left corner and size.
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Builds a rectangle from clipped corners using `w = x2 - x1 + 1`.
    pub fn from_corners(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self {
            x: x1,
            y: y1,
            w: x2 - x1 + 1.0,
            h: y2 - y1 + 1.0,
        }
    }

    /// Right edge `x + w`.
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// Bottom edge `y + h`.
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn area(&self) -> f32 {
        self.w * self.h
    }

    /// Area shared with `other`, zero when the rectangles are disjoint.
    pub fn intersection_area(&self, other: &Rect) -> f32 {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        if x1 <= x0 || y1 <= y0 {
            return 0.0;
        }
        (x1 - x0) * (y1 - y0)
    }

    /// Intersection over union with `other`.
    pub fn iou(&self, other: &Rect) -> f32 {
        let inter = self.intersection_area(other);
        iou_from_areas(inter, self.area(), other.area())
    }
}

/// IoU from precomputed areas; a non-positive union yields 0.
#[inline]
pub(crate) fn iou_from_areas(inter: f32, area_a: f32, area_b: f32) -> f32 {
    let union = area_a + area_b - inter;
    if union <= 0.0 {
        return 0.0;
    }
    inter / union
}
