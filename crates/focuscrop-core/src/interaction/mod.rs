//! Pointer and keyboard editing of a [`CropAndHotspot`](crate::CropAndHotspot).
//!
//! - [`layout`]: where the image sits in the editor and the per-frame
//!   [`ToolGeometry`] view model with hit-testing
//! - [`drag`]: pure value transforms for each kind of drag
//! - [`pointer`]: the [`Gesture`] state machine
//! - [`keyboard`]: arrow-key nudging and the debounced commit
//! - [`cursor`]: CSS cursor for the current hover or gesture

pub mod cursor;
pub mod drag;
pub mod handles;
pub mod keyboard;
pub mod layout;
pub mod pointer;

pub use cursor::{derive_cursor, Cursor};
pub use drag::{move_crop, move_hotspot, resize_crop, resize_hotspot, MIN_HOTSPOT_SIZE};
pub use handles::{CropHandle, HandleEdges};
pub use keyboard::{nudge, Debouncer, FocusTarget, Key, KeyboardControls, Modifiers};
pub use layout::{HandleRect, HitTarget, HotspotHandle, ToolGeometry, ToolLayout};
pub use pointer::{DragOrigin, Gesture, PointerTracker};
