//! Focuscrop Core - crop and hotspot geometry engine
//!
//! This crate provides the geometry behind responsive image cropping: a
//! rectangular crop plus an elliptical focal "hotspot", both stored as
//! fractions of the full image, an interactive editor that manipulates them,
//! and a projection that renders them into any target aspect ratio without
//! clipping the hotspot.
//!
//! The crate is pure Rust with no browser dependencies; `focuscrop-wasm`
//! exposes it to JavaScript hosts.

pub mod config;
pub mod editor;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod load;
pub mod model;
pub mod projection;

pub use config::ToolConfig;
pub use editor::{Change, HotspotEditor};
pub use error::ToolError;
pub use geometry::{Point, Rect, Size};
pub use interaction::{Cursor, CropHandle, FocusTarget, HitTarget, Key, Modifiers, ToolGeometry};
pub use load::{probe_image_size, ImageLoadState, ImageSize};
pub use model::{
    constrain_hotspot_to_crop, Crop, CropAndHotspot, CropDimensions, Hotspot, DEFAULT_CROP,
    DEFAULT_HOTSPOT, MIN_CROP_SIZE,
};
pub use projection::{
    calculate_styles, project, Align, CssBox, CssLength, FitMethod, HorizontalAlign,
    ProjectedStyles, Projection, VerticalAlign,
};
