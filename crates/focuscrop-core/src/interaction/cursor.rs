//! CSS cursor for the editor surface.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::handles::CropHandle;
use super::layout::HitTarget;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Cursor {
    #[default]
    Default,
    Grab,
    Grabbing,
    Move,
    NsResize,
    EwResize,
    NeswResize,
    NwseResize,
}

impl Cursor {
    /// The CSS `cursor` property value.
    pub fn as_css(self) -> &'static str {
        match self {
            Cursor::Default => "default",
            Cursor::Grab => "grab",
            Cursor::Grabbing => "grabbing",
            Cursor::Move => "move",
            Cursor::NsResize => "ns-resize",
            Cursor::EwResize => "ew-resize",
            Cursor::NeswResize => "nesw-resize",
            Cursor::NwseResize => "nwse-resize",
        }
    }

    /// Resize cursor matching the axis a handle drags along.
    pub fn for_handle(handle: CropHandle) -> Self {
        match handle {
            CropHandle::Top | CropHandle::Bottom => Cursor::NsResize,
            CropHandle::Left | CropHandle::Right => Cursor::EwResize,
            CropHandle::TopRight | CropHandle::BottomLeft => Cursor::NeswResize,
            CropHandle::TopLeft | CropHandle::BottomRight => Cursor::NwseResize,
        }
    }
}

impl fmt::Display for Cursor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_css())
    }
}

/// Pick the cursor for the current interaction.
///
/// `active` is the target of a running gesture and wins over `hover`.
/// Read-only editors always show the default cursor.
pub fn derive_cursor(active: Option<HitTarget>, hover: Option<HitTarget>, read_only: bool) -> Cursor {
    if read_only {
        return Cursor::Default;
    }
    match (active, hover) {
        (Some(HitTarget::Hotspot | HitTarget::Crop), _) => Cursor::Grabbing,
        (Some(target), _) | (None, Some(target)) => match target {
            HitTarget::Hotspot | HitTarget::Crop => Cursor::Grab,
            HitTarget::HotspotHandle => Cursor::Move,
            HitTarget::CropHandle(handle) => Cursor::for_handle(handle),
        },
        (None, None) => Cursor::Default,
    }
}
