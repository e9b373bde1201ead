//! Value transforms applied by a drag.
//!
//! Each function takes the value captured when the gesture started plus the
//! *total* normalized cursor delta since then, and returns the new value.
//! Dragging past a limit and back returns to exactly where the gesture began.
//!
//! Deltas are fractions of the image rect, so `delta.x = 0.1` means "a tenth
//! of the image's width".

use super::handles::CropHandle;
use crate::geometry::Point;
use crate::model::{constrain_hotspot_to_crop, Crop, CropAndHotspot, Hotspot};

/// Smallest hotspot diameter a resize may produce.
pub const MIN_HOTSPOT_SIZE: f64 = 0.01;

/// Translate the hotspot center, keeping it inside the crop.
pub fn move_hotspot(value: &CropAndHotspot, delta: Point) -> CropAndHotspot {
    let hotspot = Hotspot {
        x: value.hotspot.x + delta.x,
        y: value.hotspot.y + delta.y,
        ..value.hotspot
    };
    CropAndHotspot {
        crop: value.crop,
        hotspot: constrain_hotspot_to_crop(&hotspot, &value.crop),
    }
}

/// Resize the hotspot around its center.
///
/// The handle sits on the ellipse, so a cursor moving by `d` changes the
/// diameter by `2d`. Diameters are floored at [`MIN_HOTSPOT_SIZE`] and
/// capped to the crop's net size before the center is re-clamped.
pub fn resize_hotspot(value: &CropAndHotspot, delta: Point) -> CropAndHotspot {
    let dims = value.crop.dimensions();
    let resize = |diameter: f64, d: f64, max: f64| {
        (diameter + 2.0 * d).max(MIN_HOTSPOT_SIZE).min(max)
    };
    let hotspot = Hotspot {
        width: resize(value.hotspot.width, delta.x, dims.width),
        height: resize(value.hotspot.height, delta.y, dims.height),
        ..value.hotspot
    };
    CropAndHotspot {
        crop: value.crop,
        hotspot: constrain_hotspot_to_crop(&hotspot, &value.crop),
    }
}

/// Translate the whole crop, keeping its net size, and carry the hotspot
/// along by however far the crop actually moved.
pub fn move_crop(value: &CropAndHotspot, delta: Point) -> CropAndHotspot {
    let crop = value.crop;
    let (left, right) = shift_insets(crop.left, crop.right, delta.x);
    let (top, bottom) = shift_insets(crop.top, crop.bottom, delta.y);
    let moved = Crop::new(top, right, bottom, left);

    let hotspot = Hotspot {
        x: value.hotspot.x + (left - crop.left),
        y: value.hotspot.y + (top - crop.top),
        ..value.hotspot
    };
    CropAndHotspot {
        crop: moved,
        hotspot: constrain_hotspot_to_crop(&hotspot, &moved),
    }
}

/// Move `delta` from the far inset to the near one, keeping their sum.
fn shift_insets(near: f64, far: f64, delta: f64) -> (f64, f64) {
    let d = delta.clamp(-near, far);
    (near + d, far - d)
}

/// Drag one crop handle.
///
/// Only the insets on the handle's edges change. Each is kept within
/// `[0, 1 - opposite - min_crop_size]` so the crop never drops below the
/// minimum size. The hotspot is re-constrained into the new crop.
pub fn resize_crop(
    value: &CropAndHotspot,
    handle: CropHandle,
    delta: Point,
    min_crop_size: f64,
) -> CropAndHotspot {
    let edges = handle.edges();
    let c = value.crop;
    let limit = |inset: f64, opposite: f64| inset.min(1.0 - opposite - min_crop_size).max(0.0);

    let crop = Crop {
        left: if edges.left {
            limit(c.left + delta.x, c.right)
        } else {
            c.left
        },
        right: if edges.right {
            limit(c.right - delta.x, c.left)
        } else {
            c.right
        },
        top: if edges.top {
            limit(c.top + delta.y, c.bottom)
        } else {
            c.top
        },
        bottom: if edges.bottom {
            limit(c.bottom - delta.y, c.top)
        } else {
            c.bottom
        },
    };

    CropAndHotspot {
        crop,
        hotspot: constrain_hotspot_to_crop(&value.hotspot, &crop),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MIN_CROP_SIZE;

    const EPS: f64 = 1e-9;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < EPS
    }

    fn small_hotspot() -> CropAndHotspot {
        CropAndHotspot::new(Crop::default(), Hotspot::new(0.5, 0.5, 0.2, 0.2))
    }

    #[test]
    fn test_move_hotspot() {
        let v = move_hotspot(&small_hotspot(), Point::new(0.1, -0.2));
        assert!(approx(v.hotspot.x, 0.6));
        assert!(approx(v.hotspot.y, 0.3));
        assert_eq!(v.crop, Crop::default());
    }

    #[test]
    fn test_move_hotspot_stops_at_crop_edge() {
        let v = move_hotspot(&small_hotspot(), Point::new(5.0, 0.0));
        assert!(approx(v.hotspot.x, 0.9));
    }

    #[test]
    fn test_resize_hotspot_doubles_delta() {
        let v = resize_hotspot(&small_hotspot(), Point::new(0.05, 0.1));
        assert!(approx(v.hotspot.width, 0.3));
        assert!(approx(v.hotspot.height, 0.4));
        assert_eq!(v.hotspot.center(), Point::new(0.5, 0.5));
    }

    #[test]
    fn test_resize_hotspot_floor_and_cap() {
        let v = resize_hotspot(&small_hotspot(), Point::new(-1.0, 1.0));
        assert_eq!(v.hotspot.width, MIN_HOTSPOT_SIZE);
        assert_eq!(v.hotspot.height, 1.0);
        assert!(approx(v.hotspot.y, 0.5));
    }

    #[test]
    fn test_resize_hotspot_recenters_when_growing_at_edge() {
        let value = CropAndHotspot::new(Crop::default(), Hotspot::new(0.1, 0.5, 0.2, 0.2));
        let v = resize_hotspot(&value, Point::new(0.1, 0.0));
        assert!(approx(v.hotspot.width, 0.4));
        assert!(approx(v.hotspot.x, 0.2));
    }

    #[test]
    fn test_move_crop_keeps_size_and_carries_hotspot() {
        let value = CropAndHotspot::new(
            Crop::new(0.2, 0.2, 0.2, 0.2),
            Hotspot::new(0.5, 0.5, 0.2, 0.2),
        );
        let v = move_crop(&value, Point::new(0.1, -0.1));
        assert!(approx(v.crop.left, 0.3));
        assert!(approx(v.crop.right, 0.1));
        assert!(approx(v.crop.top, 0.1));
        assert!(approx(v.crop.bottom, 0.3));
        assert!(approx(v.hotspot.x, 0.6));
        assert!(approx(v.hotspot.y, 0.4));
    }

    #[test]
    fn test_move_crop_clamps_at_image_edge() {
        let value = CropAndHotspot::new(
            Crop::new(0.2, 0.2, 0.2, 0.2),
            Hotspot::new(0.5, 0.5, 0.2, 0.2),
        );
        let v = move_crop(&value, Point::new(-1.0, 1.0));
        assert_eq!(v.crop.left, 0.0);
        assert!(approx(v.crop.right, 0.4));
        assert!(approx(v.crop.top, 0.4));
        assert_eq!(v.crop.bottom, 0.0);
        // Hotspot moved by the clamped shift, not the raw delta
        assert!(approx(v.hotspot.x, 0.3));
        assert!(approx(v.hotspot.y, 0.7));
    }

    #[test]
    fn test_move_uncropped_is_noop() {
        let v = move_crop(&small_hotspot(), Point::new(0.3, 0.3));
        assert_eq!(v, small_hotspot());
    }

    #[test]
    fn test_resize_crop_top_left() {
        let v = resize_crop(
            &CropAndHotspot::default(),
            CropHandle::TopLeft,
            Point::new(0.2, 0.2),
            MIN_CROP_SIZE,
        );
        assert!(approx(v.crop.left, 0.2));
        assert!(approx(v.crop.top, 0.2));
        assert_eq!(v.crop.right, 0.0);
        assert_eq!(v.crop.bottom, 0.0);
        assert!(approx(v.hotspot.width, 0.8));
        assert!(approx(v.hotspot.x, 0.6));
    }

    #[test]
    fn test_resize_crop_edge_changes_one_inset() {
        let v = resize_crop(
            &CropAndHotspot::default(),
            CropHandle::Right,
            Point::new(-0.3, 0.4),
            MIN_CROP_SIZE,
        );
        assert!(approx(v.crop.right, 0.3));
        assert_eq!(v.crop.left, 0.0);
        assert_eq!(v.crop.top, 0.0);
        assert_eq!(v.crop.bottom, 0.0);
    }

    #[test]
    fn test_resize_crop_respects_min_size() {
        let v = resize_crop(
            &CropAndHotspot::default(),
            CropHandle::BottomRight,
            Point::new(-2.0, -2.0),
            MIN_CROP_SIZE,
        );
        assert!(approx(v.crop.dimensions().width, MIN_CROP_SIZE));
        assert!(approx(v.crop.dimensions().height, MIN_CROP_SIZE));
    }

    #[test]
    fn test_resize_crop_cannot_go_outside_image() {
        let value = CropAndHotspot::new(Crop::new(0.1, 0.1, 0.1, 0.1), Hotspot::default());
        let v = resize_crop(&value, CropHandle::TopLeft, Point::new(-1.0, -1.0), MIN_CROP_SIZE);
        assert_eq!(v.crop.left, 0.0);
        assert_eq!(v.crop.top, 0.0);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use crate::model::MIN_CROP_SIZE;
    use proptest::prelude::*;

    fn value_strategy() -> impl Strategy<Value = CropAndHotspot> {
        (
            0.0f64..0.9,
            0.0f64..1.0,
            0.0f64..0.9,
            0.0f64..1.0,
            0.0f64..1.0,
            0.0f64..1.0,
            0.01f64..1.0,
            0.01f64..1.0,
        )
            .prop_map(|(top, tf, left, lf, x, y, w, h)| {
                let crop = Crop::new(top, (1.0 - left) * lf * 0.9, (1.0 - top) * tf * 0.9, left);
                CropAndHotspot::new(crop, Hotspot::new(x, y, w, h)).with_constrained_hotspot()
            })
    }

    fn delta_strategy() -> impl Strategy<Value = Point> {
        (-2.0f64..2.0, -2.0f64..2.0).prop_map(|(x, y)| Point::new(x, y))
    }

    fn handle_strategy() -> impl Strategy<Value = CropHandle> {
        prop::sample::select(CropHandle::ALL.to_vec())
    }

    fn assert_hotspot_inside(v: &CropAndHotspot) -> Result<(), TestCaseError> {
        let dims = v.crop.dimensions();
        let h = v.hotspot;
        let eps = 1e-9;
        prop_assert!(h.x - h.width / 2.0 >= dims.left - eps);
        prop_assert!(h.x + h.width / 2.0 <= dims.right + eps);
        prop_assert!(h.y - h.height / 2.0 >= dims.top - eps);
        prop_assert!(h.y + h.height / 2.0 <= dims.bottom + eps);
        Ok(())
    }

    proptest! {
        /// Property: a handle resize never collapses or inverts the crop.
        #[test]
        fn prop_resize_crop_stays_valid(
            value in value_strategy(),
            handle in handle_strategy(),
            delta in delta_strategy(),
        ) {
            let v = resize_crop(&value, handle, delta, MIN_CROP_SIZE);
            prop_assert!(v.crop.left + v.crop.right < 1.0);
            prop_assert!(v.crop.top + v.crop.bottom < 1.0);
            prop_assert!(v.crop.left >= 0.0 && v.crop.right >= 0.0);
            prop_assert!(v.crop.top >= 0.0 && v.crop.bottom >= 0.0);
            assert_hotspot_inside(&v)?;
        }

        /// Property: moving the crop preserves its net size.
        #[test]
        fn prop_move_crop_keeps_size(value in value_strategy(), delta in delta_strategy()) {
            let v = move_crop(&value, delta);
            let before = value.crop.dimensions();
            let after = v.crop.dimensions();
            prop_assert!((before.width - after.width).abs() < 1e-9);
            prop_assert!((before.height - after.height).abs() < 1e-9);
            prop_assert!(v.crop.left >= 0.0 && v.crop.right >= 0.0);
            assert_hotspot_inside(&v)?;
        }

        /// Property: hotspot drags keep the hotspot inside the crop.
        #[test]
        fn prop_hotspot_drags_stay_inside(value in value_strategy(), delta in delta_strategy()) {
            assert_hotspot_inside(&move_hotspot(&value, delta))?;
            let resized = resize_hotspot(&value, delta);
            assert_hotspot_inside(&resized)?;
            prop_assert!(resized.hotspot.width > 0.0 && resized.hotspot.height > 0.0);
        }

        /// Property: a zero delta leaves the value untouched.
        #[test]
        fn prop_zero_delta_is_identity(value in value_strategy()) {
            prop_assert_eq!(move_hotspot(&value, Point::ZERO), value);
            prop_assert_eq!(move_crop(&value, Point::ZERO), value);
        }
    }
}
