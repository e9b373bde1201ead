//! Display projection bindings.
//!
//! Renders a stored crop/hotspot value into CSS for a container of any
//! aspect ratio.

use focuscrop_core::projection::{self, Align, HorizontalAlign, VerticalAlign};
use focuscrop_core::{CropAndHotspot, ProjectedStyles, ToolError};
use wasm_bindgen::prelude::*;

use crate::types::{from_js, to_js};

/// Compute CSS boxes for showing `value` in a container.
///
/// # Arguments
/// * `source_aspect` - Natural width / height of the full image
/// * `value` - `{crop, hotspot}` object
/// * `viewport_aspect` - Width / height of the target container
/// * `align_x` - `"left"`, `"center"` or `"right"` (default `"center"`)
/// * `align_y` - `"top"`, `"center"` or `"bottom"` (default `"center"`)
///
/// # Returns
/// `{ method, crop: {top, left, width, height}, image: {...} }` where each
/// length is `0` or a percentage string such as `"33.33%"`.
///
/// # Example (TypeScript)
/// ```typescript
/// const styles = calculate_styles(img.width / img.height, value, 16 / 9);
/// Object.assign(cropEl.style, styles.crop);
/// Object.assign(imgEl.style, styles.image);
/// ```
///
/// # Errors
/// Returns error for a non-positive aspect, malformed value or unknown
/// alignment name
#[wasm_bindgen]
pub fn calculate_styles(
    source_aspect: f64,
    value: JsValue,
    viewport_aspect: f64,
    align_x: Option<String>,
    align_y: Option<String>,
) -> Result<JsValue, JsValue> {
    let value: CropAndHotspot = from_js(value, "crop/hotspot value")?;
    let styles = styles_for(
        source_aspect,
        &value,
        viewport_aspect,
        align_x.as_deref(),
        align_y.as_deref(),
    )
    .map_err(|e| JsValue::from_str(&e.to_string()))?;
    to_js(&styles)
}

/// JsValue-free core of [`calculate_styles`].
fn styles_for(
    source_aspect: f64,
    value: &CropAndHotspot,
    viewport_aspect: f64,
    align_x: Option<&str>,
    align_y: Option<&str>,
) -> Result<ProjectedStyles, ToolError> {
    let x = align_x
        .map(str::parse::<HorizontalAlign>)
        .transpose()?
        .unwrap_or_default();
    let y = align_y
        .map(str::parse::<VerticalAlign>)
        .transpose()?
        .unwrap_or_default();
    projection::calculate_styles(source_aspect, value, viewport_aspect, Align::new(x, y))
}
