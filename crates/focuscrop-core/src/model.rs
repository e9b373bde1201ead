//! The persisted crop/hotspot value and its constraints.
//!
//! Both shapes are stored as fractions of the *full* image so they survive
//! any resizing of the source asset:
//!
//! - [`Crop`] is four insets measured inward from each edge
//! - [`Hotspot`] is an ellipse given by its center and full diameters
//!
//! Values coming back from storage are untrusted. Rather than rejecting them,
//! [`CropAndHotspot::normalized`] repairs them to the nearest valid value.

use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect, Size};

/// Smallest crop a handle drag may produce, as a fraction of the image.
pub const MIN_CROP_SIZE: f64 = 0.05;

/// No inset on any edge.
pub const DEFAULT_CROP: Crop = Crop {
    top: 0.0,
    right: 0.0,
    bottom: 0.0,
    left: 0.0,
};

/// A centered ellipse touching all four image edges.
pub const DEFAULT_HOTSPOT: Hotspot = Hotspot {
    x: 0.5,
    y: 0.5,
    width: 1.0,
    height: 1.0,
};

/// Rectangular crop expressed as insets from each image edge (0.0 to 1.0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Crop {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

impl Default for Crop {
    fn default() -> Self {
        DEFAULT_CROP
    }
}

/// A crop converted from insets to size and edge positions.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropDimensions {
    /// Net width, `1 - left - right`
    pub width: f64,
    /// Net height, `1 - top - bottom`
    pub height: f64,
    /// Position of the left edge
    pub left: f64,
    /// Position of the right edge, `1 - crop.right`
    pub right: f64,
    /// Position of the top edge
    pub top: f64,
    /// Position of the bottom edge, `1 - crop.bottom`
    pub bottom: f64,
}

impl Crop {
    /// Crop from its four insets, in CSS order.
    pub const fn new(top: f64, right: f64, bottom: f64, left: f64) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Net size and edge positions of the cropped region.
    pub fn dimensions(&self) -> CropDimensions {
        CropDimensions {
            width: 1.0 - self.left - self.right,
            height: 1.0 - self.top - self.bottom,
            left: self.left,
            right: 1.0 - self.right,
            top: self.top,
            bottom: 1.0 - self.bottom,
        }
    }

    /// The cropped region as a fractional rect of the image.
    pub fn to_rect(&self) -> Rect {
        let dims = self.dimensions();
        Rect::new(dims.left, dims.top, dims.width, dims.height)
    }

    /// True when every inset is finite and non-negative and the crop has
    /// positive area.
    pub fn is_valid(&self) -> bool {
        let insets = [self.top, self.right, self.bottom, self.left];
        insets.iter().all(|v| v.is_finite() && *v >= 0.0)
            && self.left + self.right < 1.0
            && self.top + self.bottom < 1.0
    }

    /// Repair a crop read from storage.
    ///
    /// Non-finite or negative insets become 0. An axis whose two insets leave
    /// no width (or height) is reset to the default for that axis.
    pub fn normalized(&self) -> Self {
        if self.is_valid() {
            return *self;
        }
        let (left, right) = normalize_axis(self.left, self.right);
        let (top, bottom) = normalize_axis(self.top, self.bottom);
        Self::new(top, right, bottom, left)
    }
}

fn normalize_inset(v: f64) -> f64 {
    if v.is_finite() {
        v.max(0.0)
    } else {
        0.0
    }
}

fn normalize_axis(near: f64, far: f64) -> (f64, f64) {
    let near = normalize_inset(near);
    let far = normalize_inset(far);
    if near + far >= 1.0 {
        (0.0, 0.0)
    } else {
        (near, far)
    }
}

/// Elliptical focal region, in fractions of the full image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Hotspot {
    /// Center X (0.0 to 1.0)
    pub x: f64,
    /// Center Y (0.0 to 1.0)
    pub y: f64,
    /// Horizontal diameter
    pub width: f64,
    /// Vertical diameter
    pub height: f64,
}

impl Default for Hotspot {
    fn default() -> Self {
        DEFAULT_HOTSPOT
    }
}

impl Hotspot {
    /// Hotspot centered at `(x, y)` with the given diameters.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Center of the ellipse.
    pub fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The ellipse's bounding box as a fractional rect of the image.
    pub fn to_rect(&self) -> Rect {
        Rect::from_size(Size::new(self.width, self.height)).set_center(self.center())
    }

    /// Repair a hotspot read from storage, substituting defaults for
    /// non-finite fields and non-positive diameters.
    pub fn normalized(&self) -> Self {
        let coord = |v: f64, default: f64| if v.is_finite() { v } else { default };
        let diameter = |v: f64, default: f64| {
            if v.is_finite() && v > 0.0 {
                v
            } else {
                default
            }
        };
        Self::new(
            coord(self.x, DEFAULT_HOTSPOT.x),
            coord(self.y, DEFAULT_HOTSPOT.y),
            diameter(self.width, DEFAULT_HOTSPOT.width),
            diameter(self.height, DEFAULT_HOTSPOT.height),
        )
    }
}

/// Shrink the hotspot to fit within the crop, then move its center so the
/// ellipse's bounding box lies entirely inside the crop.
///
/// Idempotent: constraining an already constrained hotspot is a no-op.
pub fn constrain_hotspot_to_crop(hotspot: &Hotspot, crop: &Crop) -> Hotspot {
    let dims = crop.dimensions();

    let width = hotspot.width.min(dims.width);
    let height = hotspot.height.min(dims.height);

    let min_x = dims.left + width / 2.0;
    let max_x = dims.right - width / 2.0;
    let min_y = dims.top + height / 2.0;
    let max_y = dims.bottom - height / 2.0;

    Hotspot {
        x: hotspot.x.max(min_x).min(max_x),
        y: hotspot.y.max(min_y).min(max_y),
        width,
        height,
    }
}

/// The persisted value: a crop and a hotspot, always written together.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CropAndHotspot {
    pub crop: Crop,
    pub hotspot: Hotspot,
}

impl CropAndHotspot {
    /// Pair a crop with a hotspot as given, without constraining.
    pub const fn new(crop: Crop, hotspot: Hotspot) -> Self {
        Self { crop, hotspot }
    }

    /// Repair a value read from storage so the editor can always work on it.
    ///
    /// The crop is repaired first, then the hotspot, then the hotspot is
    /// constrained into the repaired crop.
    pub fn normalized(&self) -> Self {
        let crop = self.crop.normalized();
        let hotspot = constrain_hotspot_to_crop(&self.hotspot.normalized(), &crop);
        let repaired = Self { crop, hotspot };
        if repaired != *self {
            tracing::warn!(original = ?self, repaired = ?repaired, "repaired stored crop/hotspot value");
        }
        repaired
    }

    /// Replace the hotspot with one constrained to the current crop.
    pub fn with_constrained_hotspot(self) -> Self {
        Self {
            hotspot: constrain_hotspot_to_crop(&self.hotspot, &self.crop),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_dimensions() {
        let crop = Crop::new(0.1, 0.2, 0.3, 0.15);
        let dims = crop.dimensions();
        assert!((dims.width - 0.65).abs() < EPS);
        assert!((dims.height - 0.6).abs() < EPS);
        assert!((dims.right - 0.8).abs() < EPS);
        assert!((dims.bottom - 0.7).abs() < EPS);
        assert_eq!(dims.left, 0.15);
        assert_eq!(dims.top, 0.1);
    }

    #[test]
    fn test_constrain_shrinks_oversized_hotspot() {
        let crop = Crop::new(0.25, 0.25, 0.25, 0.25);
        let h = constrain_hotspot_to_crop(&DEFAULT_HOTSPOT, &crop);
        assert_eq!(h.width, 0.5);
        assert_eq!(h.height, 0.5);
        assert_eq!(h.x, 0.5);
        assert_eq!(h.y, 0.5);
    }

    #[test]
    fn test_constrain_moves_center_inside() {
        let crop = Crop::new(0.0, 0.5, 0.0, 0.0);
        let h = constrain_hotspot_to_crop(&Hotspot::new(0.9, 0.5, 0.2, 0.2), &crop);
        assert!((h.x - 0.4).abs() < EPS);
        assert_eq!(h.y, 0.5);
    }

    #[test]
    fn test_constrain_leaves_valid_hotspot_alone() {
        let h = Hotspot::new(0.3, 0.6, 0.2, 0.1);
        assert_eq!(constrain_hotspot_to_crop(&h, &DEFAULT_CROP), h);
    }

    #[test]
    fn test_crop_normalized_resets_collapsed_axis() {
        let crop = Crop::new(0.1, 0.6, 0.2, 0.5).normalized();
        assert_eq!(crop, Crop::new(0.1, 0.0, 0.2, 0.0));
    }

    #[test]
    fn test_crop_normalized_non_finite() {
        let crop = Crop::new(f64::NAN, -0.2, f64::INFINITY, 0.3).normalized();
        assert_eq!(crop, Crop::new(0.0, 0.0, 0.0, 0.3));
        assert!(crop.is_valid());
    }

    #[test]
    fn test_hotspot_normalized_degenerate() {
        let h = Hotspot::new(f64::NAN, 0.2, 0.0, -1.0).normalized();
        assert_eq!(h, Hotspot::new(0.5, 0.2, 1.0, 1.0));
    }

    #[test]
    fn test_value_normalized_constrains_hotspot() {
        let value = CropAndHotspot::new(
            Crop::new(0.5, 0.0, 0.0, 0.0),
            Hotspot::new(0.5, 0.1, 0.4, 0.4),
        );
        let n = value.normalized();
        assert_eq!(n.crop, value.crop);
        assert!((n.hotspot.y - 0.7).abs() < EPS);
    }

    #[test]
    fn test_valid_value_is_unchanged() {
        let value = CropAndHotspot::new(
            Crop::new(0.1, 0.1, 0.1, 0.1),
            Hotspot::new(0.5, 0.5, 0.3, 0.3),
        );
        assert_eq!(value.normalized(), value);
    }

    #[test]
    fn test_hotspot_to_rect() {
        let r = Hotspot::new(0.5, 0.4, 0.2, 0.4).to_rect();
        assert!((r.left - 0.4).abs() < EPS);
        assert!((r.top - 0.2).abs() < EPS);
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_value(CropAndHotspot::default()).unwrap();
        assert_eq!(json["crop"]["left"], 0.0);
        assert_eq!(json["hotspot"]["width"], 1.0);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for valid crops (positive net width and height).
    fn crop_strategy() -> impl Strategy<Value = Crop> {
        (0.0f64..0.9, 0.0f64..1.0, 0.0f64..0.9, 0.0f64..1.0).prop_map(|(top, tf, left, lf)| {
            // Far inset takes a fraction of what the near inset leaves
            let bottom = (1.0 - top) * tf * 0.95;
            let right = (1.0 - left) * lf * 0.95;
            Crop::new(top, right, bottom, left)
        })
    }

    fn hotspot_strategy() -> impl Strategy<Value = Hotspot> {
        (-0.5f64..1.5, -0.5f64..1.5, 0.0f64..2.0, 0.0f64..2.0)
            .prop_map(|(x, y, w, h)| Hotspot::new(x, y, w, h))
    }

    proptest! {
        /// Property: constraining is idempotent.
        #[test]
        fn prop_constrain_idempotent(h in hotspot_strategy(), crop in crop_strategy()) {
            let once = constrain_hotspot_to_crop(&h, &crop);
            let twice = constrain_hotspot_to_crop(&once, &crop);
            prop_assert_eq!(once, twice);
        }

        /// Property: the constrained hotspot's bounding box is inside the crop.
        #[test]
        fn prop_constrained_inside_crop(h in hotspot_strategy(), crop in crop_strategy()) {
            let c = constrain_hotspot_to_crop(&h, &crop);
            let dims = crop.dimensions();
            let eps = 1e-9;
            prop_assert!(c.x - c.width / 2.0 >= dims.left - eps);
            prop_assert!(c.x + c.width / 2.0 <= dims.right + eps);
            prop_assert!(c.y - c.height / 2.0 >= dims.top - eps);
            prop_assert!(c.y + c.height / 2.0 <= dims.bottom + eps);
        }

        /// Property: net width plus both insets is always 1.
        #[test]
        fn prop_dimensions_sum_to_one(crop in crop_strategy()) {
            let dims = crop.dimensions();
            prop_assert!((dims.width + crop.left + crop.right - 1.0).abs() < 1e-12);
            prop_assert!((dims.height + crop.top + crop.bottom - 1.0).abs() < 1e-12);
        }

        /// Property: normalizing arbitrary input always yields a usable value.
        #[test]
        fn prop_normalized_is_valid(
            insets in proptest::array::uniform4(-1.0f64..2.0),
            h in hotspot_strategy(),
        ) {
            let value = CropAndHotspot::new(Crop::new(insets[0], insets[1], insets[2], insets[3]), h);
            let n = value.normalized();
            prop_assert!(n.crop.is_valid());
            prop_assert!(n.hotspot.width > 0.0);
            prop_assert!(n.hotspot.height > 0.0);
            prop_assert_eq!(n.normalized(), n);
        }
    }
}
