//! Crop handle identities and their geometry.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ToolError;
use crate::geometry::{Point, Rect, Size};

/// One of the eight crop resize handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CropHandle {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Top,
    Right,
    Bottom,
    Left,
}

/// Which crop insets a handle is allowed to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HandleEdges {
    pub top: bool,
    pub right: bool,
    pub bottom: bool,
    pub left: bool,
}

impl CropHandle {
    /// All handles in hit-test order: corners before edges, so a corner wins
    /// wherever its hit area overlaps an edge's.
    pub const ALL: [CropHandle; 8] = [
        CropHandle::TopLeft,
        CropHandle::TopRight,
        CropHandle::BottomLeft,
        CropHandle::BottomRight,
        CropHandle::Top,
        CropHandle::Right,
        CropHandle::Bottom,
        CropHandle::Left,
    ];

    /// Which crop insets this handle moves.
    pub fn edges(self) -> HandleEdges {
        let top = matches!(
            self,
            CropHandle::Top | CropHandle::TopLeft | CropHandle::TopRight
        );
        let bottom = matches!(
            self,
            CropHandle::Bottom | CropHandle::BottomLeft | CropHandle::BottomRight
        );
        let left = matches!(
            self,
            CropHandle::Left | CropHandle::TopLeft | CropHandle::BottomLeft
        );
        let right = matches!(
            self,
            CropHandle::Right | CropHandle::TopRight | CropHandle::BottomRight
        );
        HandleEdges {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Where the handle sits on `crop`: a corner or an edge midpoint.
    pub fn anchor(self, crop: &Rect) -> Point {
        let center = crop.center();
        let edges = self.edges();
        let x = if edges.left {
            crop.left
        } else if edges.right {
            crop.right()
        } else {
            center.x
        };
        let y = if edges.top {
            crop.top
        } else if edges.bottom {
            crop.bottom()
        } else {
            center.y
        };
        Point::new(x, y)
    }

    /// Square hit target of side `size` centered on the handle's anchor.
    pub fn hit_rect(self, crop: &Rect, size: f64) -> Rect {
        Rect::from_size(Size::new(size, size)).set_center(self.anchor(crop))
    }

    /// camelCase name used by the host.
    pub fn as_str(self) -> &'static str {
        match self {
            CropHandle::TopLeft => "topLeft",
            CropHandle::TopRight => "topRight",
            CropHandle::BottomLeft => "bottomLeft",
            CropHandle::BottomRight => "bottomRight",
            CropHandle::Top => "top",
            CropHandle::Right => "right",
            CropHandle::Bottom => "bottom",
            CropHandle::Left => "left",
        }
    }
}

impl fmt::Display for CropHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CropHandle {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept the prefixed form used for DOM data attributes too
        let name = s.strip_prefix("crop-").unwrap_or(s);
        CropHandle::ALL
            .into_iter()
            .find(|h| h.as_str() == name)
            .ok_or_else(|| ToolError::UnknownHandle(s.to_string()))
    }
}
