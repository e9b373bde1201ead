//! Value helpers for hosts that edit crop/hotspot values outside the editor.

use focuscrop_core::{probe_image_size as core_probe, CropAndHotspot, ImageLoadState};
use wasm_bindgen::prelude::*;

use crate::types::{from_js, to_js, JsImageSize};

/// Shrink and move the hotspot so it lies inside the crop.
///
/// # Arguments
/// * `value` - `{crop, hotspot}` object
///
/// # Returns
/// A new `{crop, hotspot}` object with the constrained hotspot.
#[wasm_bindgen]
pub fn constrain_hotspot(value: JsValue) -> Result<JsValue, JsValue> {
    let value: CropAndHotspot = from_js(value, "crop/hotspot value")?;
    to_js(&value.with_constrained_hotspot())
}

/// Repair a stored value: clamp insets, default degenerate hotspot fields
/// and constrain the hotspot into the crop.
#[wasm_bindgen]
pub fn normalize_value(value: JsValue) -> Result<JsValue, JsValue> {
    let value: CropAndHotspot = from_js(value, "crop/hotspot value")?;
    to_js(&value.normalized())
}

/// Read an image's displayed size from its header bytes.
///
/// EXIF orientation is applied, so a sideways-stored portrait photo reports
/// portrait dimensions.
///
/// # Errors
/// Returns error if the format is not recognized or the size is zero
#[wasm_bindgen]
pub fn probe_image_size(bytes: &[u8]) -> Result<JsImageSize, JsValue> {
    core_probe(bytes)
        .map(JsImageSize::from)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Probe image bytes and report the outcome as a load state.
///
/// Unlike [`probe_image_size`] this never throws. A failed probe is returned
/// as `{ status: "error", data: message }`; a successful one as
/// `{ status: "loaded", data: { width, height } }`.
#[wasm_bindgen]
pub fn load_state(bytes: &[u8]) -> Result<JsValue, JsValue> {
    to_js(&ImageLoadState::probe(bytes))
}
