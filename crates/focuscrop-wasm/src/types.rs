//! Conversions between JavaScript values and core types.
//!
//! Structured values cross the boundary through `serde-wasm-bindgen`, so the
//! JS shapes match the core types' serde representation exactly:
//! `{ crop: { top, right, bottom, left }, hotspot: { x, y, width, height } }`.

use std::time::Duration;

use focuscrop_core::ImageSize;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::prelude::*;

/// Deserialize a JS value, prefixing errors with `what`.
pub(crate) fn from_js<T: DeserializeOwned>(value: JsValue, what: &str) -> Result<T, JsValue> {
    serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid {}: {}", what, e)))
}

/// Serialize to a plain JS object.
pub(crate) fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Convert a `performance.now()` style timestamp to a `Duration`.
///
/// Negative or non-finite timestamps map to zero.
pub(crate) fn duration_from_ms(ms: f64) -> Duration {
    Duration::try_from_secs_f64(ms / 1000.0).unwrap_or_default()
}

/// Inverse of [`duration_from_ms`].
pub(crate) fn duration_to_ms(duration: Duration) -> f64 {
    duration.as_nanos() as f64 / 1_000_000.0
}

/// Displayed pixel dimensions of an image.
#[wasm_bindgen]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JsImageSize {
    width: u32,
    height: u32,
}

#[wasm_bindgen]
impl JsImageSize {
    /// Displayed width in pixels.
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Displayed height in pixels.
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Width divided by height, as used for `calculate_styles`.
    #[wasm_bindgen(getter)]
    pub fn aspect(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

impl From<ImageSize> for JsImageSize {
    fn from(size: ImageSize) -> Self {
        Self {
            width: size.width,
            height: size.height,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_from_ms() {
        assert_eq!(duration_from_ms(1500.0), Duration::from_millis(1500));
        assert_eq!(duration_from_ms(-5.0), Duration::ZERO);
        assert_eq!(duration_from_ms(f64::NAN), Duration::ZERO);
        assert_eq!(duration_from_ms(f64::INFINITY), Duration::ZERO);
    }

    #[test]
    fn test_duration_to_ms() {
        assert_eq!(duration_to_ms(Duration::from_millis(300)), 300.0);
    }

    #[test]
    fn test_image_size_aspect() {
        let size = JsImageSize::from(ImageSize::new(400, 200));
        assert_eq!(size.width(), 400);
        assert_eq!(size.aspect(), 2.0);
    }
}
