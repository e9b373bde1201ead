//! Pointer gesture state machine.
//!
//! A gesture starts on a press over a [`HitTarget`], runs while the same
//! pointer moves, and ends on release (commit) or cancel (revert). Only one
//! pointer can drive a gesture; events from other pointer ids are ignored
//! until it ends.
//!
//! ```text
//!            press on target
//!   Idle ─────────────────────▶ Dragging* / Resizing*
//!    ▲                               │
//!    └──── release / cancel / leave ─┘
//! ```

use super::drag;
use super::handles::CropHandle;
use super::layout::{HitTarget, ToolGeometry, ToolLayout};
use crate::geometry::Point;
use crate::model::CropAndHotspot;

/// Everything captured when a gesture starts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragOrigin {
    pub pointer_id: i32,
    /// Cursor position at press time, in editor pixels
    pub cursor: Point,
    /// Value at press time; every move recomputes from this
    pub value: CropAndHotspot,
}

/// The active pointer gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Gesture {
    #[default]
    Idle,
    DraggingHotspot(DragOrigin),
    ResizingHotspot(DragOrigin),
    DraggingCrop(DragOrigin),
    ResizingCrop {
        handle: CropHandle,
        origin: DragOrigin,
    },
}

impl Gesture {
    /// The gesture a press on `target` starts.
    pub fn start(target: HitTarget, origin: DragOrigin) -> Self {
        match target {
            HitTarget::Hotspot => Gesture::DraggingHotspot(origin),
            HitTarget::HotspotHandle => Gesture::ResizingHotspot(origin),
            HitTarget::Crop => Gesture::DraggingCrop(origin),
            HitTarget::CropHandle(handle) => Gesture::ResizingCrop { handle, origin },
        }
    }

    /// True while a pointer is captured.
    pub fn is_active(&self) -> bool {
        !matches!(self, Gesture::Idle)
    }

    /// Where the running gesture started.
    pub fn origin(&self) -> Option<&DragOrigin> {
        match self {
            Gesture::Idle => None,
            Gesture::DraggingHotspot(origin)
            | Gesture::ResizingHotspot(origin)
            | Gesture::DraggingCrop(origin)
            | Gesture::ResizingCrop { origin, .. } => Some(origin),
        }
    }

    /// What the gesture is acting on, for cursor derivation.
    pub fn target(&self) -> Option<HitTarget> {
        match self {
            Gesture::Idle => None,
            Gesture::DraggingHotspot(_) => Some(HitTarget::Hotspot),
            Gesture::ResizingHotspot(_) => Some(HitTarget::HotspotHandle),
            Gesture::DraggingCrop(_) => Some(HitTarget::Crop),
            Gesture::ResizingCrop { handle, .. } => Some(HitTarget::CropHandle(*handle)),
        }
    }

    /// Apply the total normalized `delta` to the origin snapshot.
    ///
    /// Returns `None` when idle.
    pub fn apply(&self, delta: Point, min_crop_size: f64) -> Option<CropAndHotspot> {
        let value = match self {
            Gesture::Idle => return None,
            Gesture::DraggingHotspot(o) => drag::move_hotspot(&o.value, delta),
            Gesture::ResizingHotspot(o) => drag::resize_hotspot(&o.value, delta),
            Gesture::DraggingCrop(o) => drag::move_crop(&o.value, delta),
            Gesture::ResizingCrop { handle, origin } => {
                drag::resize_crop(&origin.value, *handle, delta, min_crop_size)
            }
        };
        Some(value)
    }
}

/// Owns the current gesture and the idle hover target.
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    gesture: Gesture,
    hover: Option<HitTarget>,
}

impl PointerTracker {
    /// An idle tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// The running gesture.
    pub fn gesture(&self) -> &Gesture {
        &self.gesture
    }

    /// Last hover target seen while idle.
    pub fn hover(&self) -> Option<HitTarget> {
        self.hover
    }

    /// Start a gesture if `point` hits something.
    ///
    /// Returns `true` when a gesture started and the host should capture
    /// the pointer. A press while another gesture is running is ignored.
    pub fn press(
        &mut self,
        geometry: &ToolGeometry,
        pointer_id: i32,
        point: Point,
        value: CropAndHotspot,
    ) -> bool {
        if self.gesture.is_active() {
            return false;
        }
        let Some(target) = geometry.hit_test(point) else {
            return false;
        };
        let origin = DragOrigin {
            pointer_id,
            cursor: point,
            value,
        };
        self.gesture = Gesture::start(target, origin);
        self.hover = Some(target);
        tracing::debug!(hit = ?target, pointer_id, "gesture started");
        true
    }

    /// Recompute the value for the captured pointer at `point`.
    ///
    /// Returns `None` when idle or when `pointer_id` is not the captured
    /// pointer.
    pub fn drag(
        &self,
        layout: &ToolLayout,
        pointer_id: i32,
        point: Point,
        min_crop_size: f64,
    ) -> Option<CropAndHotspot> {
        let origin = self.gesture.origin()?;
        if origin.pointer_id != pointer_id {
            return None;
        }
        let delta = layout.normalize_delta(origin.cursor, point);
        self.gesture.apply(delta, min_crop_size)
    }

    /// Update the hover target. Ignored during a gesture.
    pub fn update_hover(&mut self, geometry: &ToolGeometry, point: Point) {
        if !self.gesture.is_active() {
            self.hover = geometry.hit_test(point);
        }
    }

    /// End the gesture normally.
    ///
    /// Returns `true` when the captured pointer was released, meaning the
    /// caller should commit its current value.
    pub fn release(&mut self, pointer_id: i32) -> bool {
        match self.gesture.origin() {
            Some(origin) if origin.pointer_id == pointer_id => {
                tracing::debug!(gesture = ?self.gesture.target(), pointer_id, "gesture ended");
                self.gesture = Gesture::Idle;
                true
            }
            _ => false,
        }
    }

    /// Abort the gesture for `pointer_id`.
    ///
    /// Returns the snapshot the caller should revert to.
    pub fn cancel(&mut self, pointer_id: i32) -> Option<CropAndHotspot> {
        match self.gesture.origin() {
            Some(origin) if origin.pointer_id == pointer_id => {
                let snapshot = origin.value;
                tracing::debug!(gesture = ?self.gesture.target(), pointer_id, "gesture cancelled");
                self.gesture = Gesture::Idle;
                Some(snapshot)
            }
            _ => None,
        }
    }

    /// The pointer left the editor surface.
    ///
    /// Clears the hover target. A running gesture for that pointer is
    /// cancelled, and its snapshot returned.
    pub fn leave(&mut self, pointer_id: i32) -> Option<CropAndHotspot> {
        self.hover = None;
        self.cancel(pointer_id)
    }

    /// Drop any gesture without reporting it, e.g. when switching to
    /// read-only mode.
    pub fn abort(&mut self) -> Option<CropAndHotspot> {
        let snapshot = self.gesture.origin().map(|o| o.value);
        if snapshot.is_some() {
            tracing::debug!(gesture = ?self.gesture.target(), "gesture aborted");
        }
        self.gesture = Gesture::Idle;
        self.hover = None;
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ToolConfig;
    use crate::geometry::Size;
    use crate::model::{Crop, Hotspot, MIN_CROP_SIZE};

    fn setup() -> (ToolLayout, ToolGeometry, CropAndHotspot) {
        let layout = ToolLayout::new(Size::new(100.0, 100.0), Size::new(100.0, 100.0), 0.0);
        let value = CropAndHotspot::new(
            Crop::new(0.1, 0.1, 0.1, 0.1),
            Hotspot::new(0.5, 0.5, 0.4, 0.4),
        );
        let geometry = layout.geometry(&value, &ToolConfig::default(), false);
        (layout, geometry, value)
    }

    #[test]
    fn test_press_on_hotspot_starts_drag() {
        let (_, geometry, value) = setup();
        let mut tracker = PointerTracker::new();
        assert!(tracker.press(&geometry, 1, Point::new(50.0, 50.0), value));
        assert!(matches!(tracker.gesture(), Gesture::DraggingHotspot(_)));
        assert_eq!(tracker.gesture().target(), Some(HitTarget::Hotspot));
    }

    #[test]
    fn test_press_on_nothing_stays_idle() {
        let (_, geometry, value) = setup();
        let mut tracker = PointerTracker::new();
        assert!(!tracker.press(&geometry, 1, Point::new(95.0, 30.0), value));
        assert_eq!(*tracker.gesture(), Gesture::Idle);
    }

    #[test]
    fn test_drag_recomputes_from_snapshot() {
        let (layout, geometry, value) = setup();
        let mut tracker = PointerTracker::new();
        tracker.press(&geometry, 1, Point::new(50.0, 50.0), value);

        let first = tracker
            .drag(&layout, 1, Point::new(60.0, 50.0), MIN_CROP_SIZE)
            .unwrap();
        assert!((first.hotspot.x - 0.6).abs() < 1e-9);

        // Same cursor position gives the same value regardless of history
        tracker.drag(&layout, 1, Point::new(90.0, 10.0), MIN_CROP_SIZE);
        let again = tracker
            .drag(&layout, 1, Point::new(60.0, 50.0), MIN_CROP_SIZE)
            .unwrap();
        assert_eq!(first, again);
    }

    #[test]
    fn test_other_pointers_are_ignored() {
        let (layout, geometry, value) = setup();
        let mut tracker = PointerTracker::new();
        tracker.press(&geometry, 1, Point::new(50.0, 50.0), value);

        assert!(!tracker.press(&geometry, 2, Point::new(50.0, 50.0), value));
        assert!(tracker
            .drag(&layout, 2, Point::new(60.0, 60.0), MIN_CROP_SIZE)
            .is_none());
        assert!(!tracker.release(2));
        assert!(tracker.cancel(2).is_none());
        assert!(tracker.gesture().is_active());
        assert!(tracker.release(1));
        assert!(!tracker.gesture().is_active());
    }

    #[test]
    fn test_cancel_returns_snapshot() {
        let (_, geometry, value) = setup();
        let mut tracker = PointerTracker::new();
        tracker.press(&geometry, 7, Point::new(15.0, 30.0), value);
        assert!(matches!(tracker.gesture(), Gesture::DraggingCrop(_)));
        assert_eq!(tracker.cancel(7), Some(value));
        assert_eq!(*tracker.gesture(), Gesture::Idle);
    }

    #[test]
    fn test_leave_clears_hover_and_cancels() {
        let (_, geometry, value) = setup();
        let mut tracker = PointerTracker::new();
        tracker.update_hover(&geometry, Point::new(50.0, 50.0));
        assert_eq!(tracker.hover(), Some(HitTarget::Hotspot));
        assert_eq!(tracker.leave(1), None);
        assert_eq!(tracker.hover(), None);

        tracker.press(&geometry, 1, Point::new(50.0, 50.0), value);
        assert_eq!(tracker.leave(1), Some(value));
    }

    #[test]
    fn test_hover_frozen_during_gesture() {
        let (_, geometry, value) = setup();
        let mut tracker = PointerTracker::new();
        tracker.press(&geometry, 1, Point::new(50.0, 50.0), value);
        tracker.update_hover(&geometry, Point::new(15.0, 30.0));
        assert_eq!(tracker.hover(), Some(HitTarget::Hotspot));
    }

    #[test]
    fn test_press_on_corner_resizes_crop() {
        let (layout, geometry, value) = setup();
        let mut tracker = PointerTracker::new();
        assert!(tracker.press(&geometry, 1, Point::new(10.0, 10.0), value));
        assert_eq!(
            tracker.gesture().target(),
            Some(HitTarget::CropHandle(CropHandle::TopLeft))
        );
        let v = tracker
            .drag(&layout, 1, Point::new(20.0, 30.0), MIN_CROP_SIZE)
            .unwrap();
        assert!((v.crop.left - 0.2).abs() < 1e-9);
        assert!((v.crop.top - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_drag_hotspot_handle_resizes_diameter() {
        let (layout, geometry, value) = setup();
        let handle = geometry.hotspot_handle.unwrap().hit.center;
        let mut tracker = PointerTracker::new();
        assert!(tracker.press(&geometry, 1, handle, value));
        assert!(matches!(tracker.gesture(), Gesture::ResizingHotspot(_)));

        // 5 px of a 100 px image: the diameter grows by twice that
        let v = tracker
            .drag(&layout, 1, Point::new(handle.x + 5.0, handle.y), MIN_CROP_SIZE)
            .unwrap();
        assert!((v.hotspot.width - 0.5).abs() < 1e-9);
        assert!((v.hotspot.height - 0.4).abs() < 1e-9);
        assert!((v.hotspot.x - 0.5).abs() < 1e-9);
        assert!((v.hotspot.y - 0.5).abs() < 1e-9);
        assert_eq!(v.crop, value.crop);
    }

    #[test]
    fn test_drag_crop_body_moves_crop_and_hotspot() {
        let (layout, geometry, value) = setup();
        let mut tracker = PointerTracker::new();
        assert!(tracker.press(&geometry, 1, Point::new(15.0, 30.0), value));
        assert!(matches!(tracker.gesture(), Gesture::DraggingCrop(_)));

        let v = tracker
            .drag(&layout, 1, Point::new(20.0, 20.0), MIN_CROP_SIZE)
            .unwrap();
        assert!((v.crop.left - 0.15).abs() < 1e-9);
        assert!((v.crop.right - 0.05).abs() < 1e-9);
        assert_eq!(v.crop.top, 0.0);
        assert!((v.crop.bottom - 0.2).abs() < 1e-9);
        assert!((v.hotspot.x - 0.55).abs() < 1e-9);
        assert!((v.hotspot.y - 0.4).abs() < 1e-9);

        // Overshooting stops at the image edge and the hotspot follows the clamped shift
        let v = tracker
            .drag(&layout, 1, Point::new(65.0, 30.0), MIN_CROP_SIZE)
            .unwrap();
        assert!((v.crop.left - 0.2).abs() < 1e-9);
        assert_eq!(v.crop.right, 0.0);
        assert!((v.hotspot.x - 0.6).abs() < 1e-9);
    }
}
