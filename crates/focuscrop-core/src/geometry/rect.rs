//! Axis-aligned rectangles.
//!
//! `Rect` doubles as a pixel rectangle and as a fractional sub-rectangle of
//! some other rectangle. The editor keeps the image's on-screen rectangle in
//! pixels and maps normalized crop/hotspot rectangles onto it with
//! [`Rect::multiply`] and [`Rect::crop_relative`].

use serde::{Deserialize, Serialize};

use super::{Point, Size};

/// An axis-aligned rectangle given by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// The unit square, i.e. "the whole thing" in fractional coordinates.
    pub const UNIT: Rect = Rect {
        left: 0.0,
        top: 0.0,
        width: 1.0,
        height: 1.0,
    };

    /// Rect from its top-left corner and size.
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A rect of the given size anchored at the origin.
    pub fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// X of the right edge.
    #[inline]
    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    /// Y of the bottom edge.
    #[inline]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Midpoint of the rect.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// Width and height as a `Size`.
    #[inline]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Corners in clockwise order starting at the top-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            Point::new(self.left, self.top),
            Point::new(self.right(), self.top),
            Point::new(self.right(), self.bottom()),
            Point::new(self.left, self.bottom()),
        ]
    }

    /// Expand every edge outward by `delta`, keeping the center fixed.
    ///
    /// A negative `delta` shrinks the rect. The size never goes below zero;
    /// over-shrinking collapses the rect onto its center.
    pub fn grow(&self, delta: f64) -> Self {
        let center = self.center();
        let width = (self.width + 2.0 * delta).max(0.0);
        let height = (self.height + 2.0 * delta).max(0.0);
        Self::new(
            center.x - width / 2.0,
            center.y - height / 2.0,
            width,
            height,
        )
    }

    /// Move every edge inward by `delta`. See [`Rect::grow`].
    pub fn shrink(&self, delta: f64) -> Self {
        self.grow(-delta)
    }

    /// Map a fractional rect into this rect's space.
    ///
    /// `other` is read as fractions of `self`: `other.left = 0.5` means
    /// "halfway across `self`". The result may extend beyond `self` when
    /// `other` does.
    pub fn multiply(&self, other: &Rect) -> Self {
        Self::new(
            self.left + other.left * self.width,
            self.top + other.top * self.height,
            other.width * self.width,
            other.height * self.height,
        )
    }

    /// Map a fractional crop rect into this rect's space.
    ///
    /// Unlike [`Rect::multiply`], the crop is first clamped to the unit
    /// square so the result never leaves `self`.
    pub fn crop_relative(&self, crop: &Rect) -> Self {
        self.multiply(&crop.clamp(&Rect::UNIT))
    }

    /// Fit this rect entirely inside `bounds`.
    ///
    /// Shrinks before relocating: an axis that is larger than the bounds is
    /// reduced to the bounds' extent and aligned to the bounds' near edge.
    /// Whatever overflow remains is then removed by translation only.
    pub fn clamp(&self, bounds: &Rect) -> Self {
        let (left, width) = clamp_axis(self.left, self.width, bounds.left, bounds.width);
        let (top, height) = clamp_axis(self.top, self.height, bounds.top, bounds.height);
        self.set_size(Size::new(width, height))
            .set_top_left(Point::new(left, top))
    }

    /// Move the rect so its center is `center`, keeping its size.
    pub fn set_center(&self, center: Point) -> Self {
        self.set_top_left(Point::new(
            center.x - self.width / 2.0,
            center.y - self.height / 2.0,
        ))
    }

    /// Resize the rect, keeping its top-left corner.
    pub fn set_size(&self, size: Size) -> Self {
        Self::new(self.left, self.top, size.width, size.height)
    }

    /// Move the rect so its top-left corner is `point`, keeping its size.
    pub fn set_top_left(&self, point: Point) -> Self {
        Self::new(point.x, point.y, self.width, self.height)
    }

    /// The largest rect of the given aspect ratio that fits inside `self`,
    /// centered on both axes.
    ///
    /// Returns `self` unchanged when `aspect` is not a positive finite number.
    pub fn fit_aspect(&self, aspect: f64) -> Self {
        if !(aspect.is_finite() && aspect > 0.0) || self.height <= 0.0 {
            return *self;
        }
        let size = if self.width / self.height > aspect {
            Size::new(self.height * aspect, self.height)
        } else {
            Size::new(self.width, self.width / aspect)
        };
        Rect::from_size(size).set_center(self.center())
    }
}

/// Clamp one axis of a rect (`start`, `extent`) into (`min`, `span`).
fn clamp_axis(start: f64, extent: f64, min: f64, span: f64) -> (f64, f64) {
    if extent > span {
        return (min, span);
    }
    let max = min + span;
    if start < min {
        (min, extent)
    } else if start + extent > max {
        (max - extent, extent)
    } else {
        (start, extent)
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================
