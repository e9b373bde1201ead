//! Focuscrop WASM - WebAssembly bindings for Focuscrop
//!
//! This crate provides WASM bindings to expose the focuscrop-core
//! functionality to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `editor` - Interactive crop/hotspot editor with host callbacks
//! - `projection` - CSS projection of a value into any aspect ratio
//! - `model` - Value helpers and the image size probe
//! - `types` - JS conversion helpers and wrapper types
//!
//! # Usage
//!
//! ```typescript
//! import init, { calculate_styles, probe_image_size } from '@focuscrop/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const size = probe_image_size(new Uint8Array(await file.arrayBuffer()));
//! const styles = calculate_styles(size.aspect, value, 16 / 9);
//! ```

use wasm_bindgen::prelude::*;

mod editor;
mod model;
mod projection;
mod types;

// Re-export public types
pub use editor::JsHotspotEditor;
pub use model::{constrain_hotspot, load_state, normalize_value, probe_image_size};
pub use projection::calculate_styles;
pub use types::JsImageSize;

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
