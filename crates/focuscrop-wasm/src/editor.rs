//! Interactive editor bindings.
//!
//! `JsHotspotEditor` wraps the core editor and turns its [`Change`] results
//! into calls to two host callbacks:
//!
//! - `onChange(value)` for every live preview
//! - `onChangeEnd(value)` for every commit
//!
//! # Example (TypeScript)
//! ```typescript
//! const editor = new JsHotspotEditor(img.naturalWidth, img.naturalHeight,
//!                                    rect.width, rect.height, { margin_px: 8 });
//! editor.set_value(field.value);
//! editor.set_on_change((v) => preview(v));
//! editor.set_on_change_end((v) => field.set(v));
//!
//! canvas.onpointerdown = (e) => {
//!   if (editor.pointer_down(e.pointerId, e.offsetX, e.offsetY)) {
//!     canvas.setPointerCapture(e.pointerId);
//!   }
//! };
//! canvas.onpointermove = (e) => editor.pointer_move(e.pointerId, e.offsetX, e.offsetY);
//! canvas.onpointerup = (e) => editor.pointer_up(e.pointerId);
//! canvas.onkeydown = (e) => {
//!   if (editor.key_down(e.key, e.shiftKey, e.ctrlKey, e.metaKey, performance.now())) {
//!     e.preventDefault();
//!   }
//! };
//! ```

use focuscrop_core::{
    Change, CropAndHotspot, FocusTarget, HotspotEditor, Key, Modifiers, Point, Size, ToolConfig,
    ToolError,
};
use js_sys::Function;
use wasm_bindgen::prelude::*;

use crate::types::{duration_from_ms, duration_to_ms, from_js, to_js};

/// Crop and hotspot editor for JavaScript hosts.
#[wasm_bindgen]
pub struct JsHotspotEditor {
    inner: HotspotEditor,
    on_change: Option<Function>,
    on_change_end: Option<Function>,
}

#[wasm_bindgen]
impl JsHotspotEditor {
    /// Create an editor.
    ///
    /// # Arguments
    /// * `image_width`, `image_height` - Natural image size in pixels
    /// * `editor_width`, `editor_height` - Editor surface size in CSS pixels
    /// * `config` - Optional partial `ToolConfig` object
    ///
    /// # Errors
    /// Returns error if `config` is not a valid config object
    #[wasm_bindgen(constructor)]
    pub fn new(
        image_width: f64,
        image_height: f64,
        editor_width: f64,
        editor_height: f64,
        config: JsValue,
    ) -> Result<JsHotspotEditor, JsValue> {
        let config: ToolConfig = if config.is_undefined() || config.is_null() {
            ToolConfig::default()
        } else {
            from_js(config, "config")?
        };
        Ok(JsHotspotEditor {
            inner: HotspotEditor::new(
                Size::new(image_width, image_height),
                Size::new(editor_width, editor_height),
                config,
            ),
            on_change: None,
            on_change_end: None,
        })
    }

    /// Register the live preview callback, or clear it with `undefined`.
    pub fn set_on_change(&mut self, callback: Option<Function>) {
        self.on_change = callback;
    }

    /// Register the commit callback, or clear it with `undefined`.
    pub fn set_on_change_end(&mut self, callback: Option<Function>) {
        self.on_change_end = callback;
    }

    /// The current `{crop, hotspot}` value.
    pub fn value(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.value())
    }

    /// Replace the value from the host field.
    ///
    /// Malformed values are repaired, with a console warning. Returns
    /// `false` when ignored because a pointer gesture is running.
    pub fn set_value(&mut self, value: JsValue) -> Result<bool, JsValue> {
        let value: CropAndHotspot = from_js(value, "crop/hotspot value")?;
        let accepted = self.inner.set_value(value);
        if accepted && self.inner.value() != value {
            web_sys::console::warn_1(&JsValue::from_str(
                "focuscrop: stored crop/hotspot value was out of range and has been repaired",
            ));
        }
        Ok(accepted)
    }

    /// The editor surface was resized.
    pub fn resize(&mut self, editor_width: f64, editor_height: f64) {
        self.inner.resize(Size::new(editor_width, editor_height));
    }

    /// The image's natural size changed.
    pub fn set_image_size(&mut self, image_width: f64, image_height: f64) {
        self.inner.set_image_size(Size::new(image_width, image_height));
    }

    /// Whether editing is disabled.
    #[wasm_bindgen(getter)]
    pub fn read_only(&self) -> bool {
        self.inner.is_read_only()
    }

    /// Switch read-only mode. Entering it reverts a running gesture.
    pub fn set_read_only(&mut self, read_only: bool) -> Result<(), JsValue> {
        for change in self.inner.set_read_only(read_only) {
            self.emit(change)?;
        }
        Ok(())
    }

    /// Everything needed to draw the current frame, in editor pixels.
    pub fn geometry(&self) -> Result<JsValue, JsValue> {
        to_js(&self.inner.geometry())
    }

    /// CSS cursor for the editor surface.
    pub fn cursor(&self) -> String {
        self.inner.cursor().as_css().to_string()
    }

    /// Returns `true` when the host should call `setPointerCapture`.
    pub fn pointer_down(&mut self, pointer_id: i32, x: f64, y: f64) -> bool {
        self.inner.pointer_down(pointer_id, Point::new(x, y))
    }

    /// Forward a `pointermove`. Fires `onChange` while dragging.
    pub fn pointer_move(&mut self, pointer_id: i32, x: f64, y: f64) -> Result<(), JsValue> {
        let change = self.inner.pointer_move(pointer_id, Point::new(x, y));
        self.emit_opt(change)
    }

    /// Forward a `pointerup`. Fires `onChangeEnd` when a gesture ends.
    pub fn pointer_up(&mut self, pointer_id: i32) -> Result<(), JsValue> {
        let change = self.inner.pointer_up(pointer_id);
        self.emit_opt(change)
    }

    /// Call on `pointercancel` and `lostpointercapture`.
    pub fn pointer_cancel(&mut self, pointer_id: i32) -> Result<(), JsValue> {
        let change = self.inner.pointer_cancel(pointer_id);
        self.emit_opt(change)
    }

    /// Forward a `pointerleave`. A running gesture is reverted.
    pub fn pointer_leave(&mut self, pointer_id: i32) -> Result<(), JsValue> {
        let change = self.inner.pointer_leave(pointer_id);
        self.emit_opt(change)
    }

    /// Give keyboard focus to `"hotspot"` or `"crop"`.
    ///
    /// # Errors
    /// Returns error for any other target name
    pub fn focus(&mut self, target: &str) -> Result<(), JsValue> {
        let target: FocusTarget = target
            .parse()
            .map_err(|e: ToolError| JsValue::from_str(&e.to_string()))?;
        let change = self.inner.focus(target);
        self.emit_opt(change)
    }

    /// Drop keyboard focus, committing any pending keyboard edit.
    pub fn blur(&mut self) -> Result<(), JsValue> {
        let change = self.inner.blur();
        self.emit_opt(change)
    }

    /// Forward a `keydown` event.
    ///
    /// Returns `true` when the key was handled and the host should call
    /// `preventDefault`. Keys the editor does not use return `false`.
    pub fn key_down(
        &mut self,
        key: &str,
        shift: bool,
        ctrl: bool,
        meta: bool,
        now_ms: f64,
    ) -> Result<bool, JsValue> {
        let Ok(key) = key.parse::<Key>() else {
            return Ok(false);
        };
        let modifiers = Modifiers { shift, ctrl, meta };
        match self.inner.key_down(key, modifiers, duration_from_ms(now_ms)) {
            Some(change) => {
                self.emit(change)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Fire the debounced keyboard commit if it is due at `now_ms`.
    pub fn poll(&mut self, now_ms: f64) -> Result<(), JsValue> {
        let change = self.inner.poll(duration_from_ms(now_ms));
        self.emit_opt(change)
    }

    /// Timestamp at which `poll` should next be called, if a commit is
    /// pending.
    pub fn pending_commit_deadline(&self) -> Option<f64> {
        self.inner.pending_commit_deadline().map(duration_to_ms)
    }
}

impl JsHotspotEditor {
    fn emit_opt(&self, change: Option<Change>) -> Result<(), JsValue> {
        match change {
            Some(change) => self.emit(change),
            None => Ok(()),
        }
    }

    fn emit(&self, change: Change) -> Result<(), JsValue> {
        let callback = match change {
            Change::Preview(_) => &self.on_change,
            Change::Commit(_) => &self.on_change_end,
        };
        if let Some(callback) = callback {
            let value = to_js(change.value())?;
            callback.call1(&JsValue::NULL, &value)?;
        }
        Ok(())
    }
}
