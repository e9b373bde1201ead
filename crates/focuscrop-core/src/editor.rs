//! The interactive crop/hotspot editor.
//!
//! [`HotspotEditor`] ties the layout, pointer and keyboard layers together
//! around one current value. Hosts forward input events and render from
//! [`HotspotEditor::geometry`]; every method that can change the value
//! returns the [`Change`] to report upward.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::ToolConfig;
use crate::geometry::{Point, Size};
use crate::interaction::{
    derive_cursor, Cursor, FocusTarget, Gesture, HitTarget, Key, KeyboardControls, Modifiers,
    PointerTracker, ToolGeometry, ToolLayout,
};
use crate::model::CropAndHotspot;

/// A value change to report to the host.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum Change {
    /// Live update while a gesture or key sequence is in progress
    Preview(CropAndHotspot),
    /// Final value to persist
    Commit(CropAndHotspot),
}

impl Change {
    /// The value carried by this change.
    pub fn value(&self) -> &CropAndHotspot {
        match self {
            Change::Preview(v) | Change::Commit(v) => v,
        }
    }

    /// True for `onChangeEnd` changes.
    pub fn is_commit(&self) -> bool {
        matches!(self, Change::Commit(_))
    }
}

/// Editing session for one image.
#[derive(Debug, Clone)]
pub struct HotspotEditor {
    config: ToolConfig,
    image_size: Size,
    layout: ToolLayout,
    value: CropAndHotspot,
    read_only: bool,
    pointer: PointerTracker,
    keyboard: KeyboardControls,
}

impl HotspotEditor {
    /// Create an editor for an image of `image_size` pixels drawn in an
    /// editor surface of `editor_size` pixels. The value starts at the
    /// defaults until [`set_value`](Self::set_value) is called.
    pub fn new(image_size: Size, editor_size: Size, config: ToolConfig) -> Self {
        let layout = ToolLayout::new(editor_size, image_size, config.margin_px);
        let keyboard = KeyboardControls::new(config.commit_debounce());
        Self {
            config,
            image_size,
            layout,
            value: CropAndHotspot::default(),
            read_only: false,
            pointer: PointerTracker::new(),
            keyboard,
        }
    }

    /// The current value, updated live during a gesture.
    pub fn value(&self) -> CropAndHotspot {
        self.value
    }

    /// The configuration the editor was built with.
    pub fn config(&self) -> &ToolConfig {
        &self.config
    }

    /// Where the image sits inside the editor surface.
    pub fn layout(&self) -> &ToolLayout {
        &self.layout
    }

    /// The running pointer gesture, or `Gesture::Idle`.
    pub fn gesture(&self) -> &Gesture {
        self.pointer.gesture()
    }

    /// What the idle pointer is over.
    pub fn hover(&self) -> Option<HitTarget> {
        self.pointer.hover()
    }

    /// Which shape the keyboard drives.
    pub fn focused(&self) -> Option<FocusTarget> {
        self.keyboard.focused()
    }

    /// True when edits are disabled.
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// Replace the value from the host, repairing it if needed.
    ///
    /// Ignored while a pointer gesture is running; returns whether the value
    /// was accepted.
    pub fn set_value(&mut self, value: CropAndHotspot) -> bool {
        if self.pointer.gesture().is_active() {
            tracing::debug!("ignoring host value during gesture");
            return false;
        }
        self.value = value.normalized();
        true
    }

    /// The editor surface changed size.
    pub fn resize(&mut self, editor_size: Size) {
        self.layout = ToolLayout::new(editor_size, self.image_size, self.config.margin_px);
    }

    /// The source image changed dimensions.
    pub fn set_image_size(&mut self, image_size: Size) {
        self.image_size = image_size;
        self.layout = ToolLayout::new(
            Size::new(self.layout.editor.width, self.layout.editor.height),
            image_size,
            self.config.margin_px,
        );
    }

    /// Switch read-only mode.
    ///
    /// Entering read-only mode reverts a running gesture to its snapshot and
    /// flushes a pending keyboard commit.
    pub fn set_read_only(&mut self, read_only: bool) -> Vec<Change> {
        self.read_only = read_only;
        let mut changes = Vec::new();
        if !read_only {
            return changes;
        }
        if let Some(snapshot) = self.pointer.abort() {
            self.value = snapshot;
            changes.push(Change::Preview(snapshot));
        }
        if self.keyboard.blur() {
            changes.push(Change::Commit(self.value));
        }
        changes
    }

    /// The view model for the current frame.
    pub fn geometry(&self) -> ToolGeometry {
        self.layout.geometry(&self.value, &self.config, self.read_only)
    }

    /// Cursor for the editor surface in its current state.
    pub fn cursor(&self) -> Cursor {
        derive_cursor(
            self.pointer.gesture().target(),
            self.pointer.hover(),
            self.read_only,
        )
    }

    /// Handle a pointer press at `point` (editor pixels).
    ///
    /// Returns `true` when a gesture started and the host should capture
    /// the pointer.
    pub fn pointer_down(&mut self, pointer_id: i32, point: Point) -> bool {
        if self.read_only {
            return false;
        }
        let geometry = self.geometry();
        self.pointer.press(&geometry, pointer_id, point, self.value)
    }

    /// Handle pointer movement: a drag step during a gesture, a hover update
    /// otherwise.
    pub fn pointer_move(&mut self, pointer_id: i32, point: Point) -> Option<Change> {
        if !self.pointer.gesture().is_active() {
            if !self.read_only {
                let geometry = self.geometry();
                self.pointer.update_hover(&geometry, point);
            }
            return None;
        }
        let next = self
            .pointer
            .drag(&self.layout, pointer_id, point, self.config.min_crop_size)?;
        if next == self.value {
            return None;
        }
        self.value = next;
        Some(Change::Preview(next))
    }

    /// Finish the gesture for `pointer_id` and commit.
    pub fn pointer_up(&mut self, pointer_id: i32) -> Option<Change> {
        if !self.pointer.release(pointer_id) {
            return None;
        }
        // The commit covers any keyboard edits made before the gesture
        self.keyboard.cancel_pending();
        Some(Change::Commit(self.value))
    }

    /// The host lost pointer capture: revert to the gesture's snapshot.
    pub fn pointer_cancel(&mut self, pointer_id: i32) -> Option<Change> {
        let snapshot = self.pointer.cancel(pointer_id)?;
        self.value = snapshot;
        Some(Change::Preview(snapshot))
    }

    /// The pointer left the editor surface.
    pub fn pointer_leave(&mut self, pointer_id: i32) -> Option<Change> {
        let snapshot = self.pointer.leave(pointer_id)?;
        self.value = snapshot;
        Some(Change::Preview(snapshot))
    }

    /// Give keyboard focus to a shape. Switching shapes flushes a pending
    /// commit.
    pub fn focus(&mut self, target: FocusTarget) -> Option<Change> {
        if self.read_only {
            return None;
        }
        self.keyboard.focus(target).then(|| self.commit_keyboard())
    }

    /// Drop keyboard focus, flushing a pending commit.
    pub fn blur(&mut self) -> Option<Change> {
        self.keyboard.blur().then(|| self.commit_keyboard())
    }

    /// Handle an arrow key press at host time `now`.
    ///
    /// Ignored in read-only mode, during a pointer gesture, and when no
    /// shape has focus.
    pub fn key_down(&mut self, key: Key, modifiers: Modifiers, now: Duration) -> Option<Change> {
        if self.read_only || self.pointer.gesture().is_active() {
            return None;
        }
        let next = self.keyboard.key_down(
            &self.value,
            key,
            modifiers,
            now,
            &self.layout,
            &self.config,
        )?;
        self.value = next;
        Some(Change::Preview(next))
    }

    /// Fire the debounced keyboard commit if it is due at `now`.
    ///
    /// Deferred while a pointer gesture is running.
    pub fn poll(&mut self, now: Duration) -> Option<Change> {
        if self.pointer.gesture().is_active() {
            return None;
        }
        self.keyboard.poll(now).then(|| self.commit_keyboard())
    }

    /// When the host should next call [`poll`](Self::poll), if ever.
    pub fn pending_commit_deadline(&self) -> Option<Duration> {
        self.keyboard.pending_commit_deadline()
    }

    fn commit_keyboard(&self) -> Change {
        tracing::debug!(value = ?self.value, "committing keyboard edit");
        Change::Commit(self.value)
    }
}
