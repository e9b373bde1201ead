//! Responsive display projection.
//!
//! Given a crop/hotspot value and a target container aspect ratio, this module
//! decides how to place the cropped image inside the container so that it
//! fills the container (full bleed) whenever that does not cut into the
//! hotspot, and falls back to letterboxing only when it would.
//!
//! # Output
//!
//! Two boxes are produced, both in fractions:
//!
//! - `crop`: where the cropped region sits inside the container. Values
//!   outside 0.0 to 1.0 mean the crop overflows the container and is clipped.
//! - `image`: where the full, uncropped image sits inside the `crop` box.
//!   Rendered with `overflow: hidden` on the crop box, only the cropped
//!   region shows.
//!
//! [`ProjectedStyles`] converts both boxes to CSS percentage lengths.
//!
//! # Scale
//!
//! Scale 1.0 means the crop's width equals the container's width. At scale
//! `s` the crop covers `s` of the container's width and
//! `s * viewport_aspect / crop_aspect` of its height.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};

use crate::error::{check_aspect, ToolError};
use crate::geometry::Rect;
use crate::model::{CropAndHotspot, Hotspot};

/// Extents within this distance of the container size count as an exact fit.
const FIT_EPSILON: f64 = 1e-9;

/// Horizontal placement of a letterboxed image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HorizontalAlign {
    Left,
    #[default]
    Center,
    Right,
}

/// Vertical placement of a letterboxed image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VerticalAlign {
    Top,
    #[default]
    Center,
    Bottom,
}

impl HorizontalAlign {
    /// Fraction of the free space placed before the image, or `None` when
    /// the hotspot decides.
    fn factor(self) -> Option<f64> {
        match self {
            HorizontalAlign::Left => Some(0.0),
            HorizontalAlign::Center => None,
            HorizontalAlign::Right => Some(1.0),
        }
    }
}

impl VerticalAlign {
    fn factor(self) -> Option<f64> {
        match self {
            VerticalAlign::Top => Some(0.0),
            VerticalAlign::Center => None,
            VerticalAlign::Bottom => Some(1.0),
        }
    }
}

impl FromStr for HorizontalAlign {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "left" => Ok(HorizontalAlign::Left),
            "center" => Ok(HorizontalAlign::Center),
            "right" => Ok(HorizontalAlign::Right),
            other => Err(ToolError::UnknownAlignment(other.to_string())),
        }
    }
}

impl FromStr for VerticalAlign {
    type Err = ToolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "top" => Ok(VerticalAlign::Top),
            "center" => Ok(VerticalAlign::Center),
            "bottom" => Ok(VerticalAlign::Bottom),
            other => Err(ToolError::UnknownAlignment(other.to_string())),
        }
    }
}

/// Alignment preference used when the image has to be letterboxed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Align {
    #[serde(default)]
    pub x: HorizontalAlign,
    #[serde(default)]
    pub y: VerticalAlign,
}

impl Align {
    /// Alignment for each axis.
    pub const fn new(x: HorizontalAlign, y: VerticalAlign) -> Self {
        Self { x, y }
    }
}

/// How the cropped image was fitted into the container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitMethod {
    /// Crop width equals container width; height overflows or matches
    FullWidth,
    /// Crop height equals container height; width overflows
    FullHeight,
    /// Full bleed would clip the hotspot, so empty bars are left
    Letterbox,
}

/// Numeric result of the projection. See the module docs for the meaning of
/// each box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub method: FitMethod,
    pub crop: Rect,
    pub image: Rect,
}

/// Compute how to display `value` in a container of `viewport_aspect`.
///
/// # Arguments
///
/// * `source_aspect` - Width / height of the source image
/// * `value` - Crop and hotspot, normalized before use
/// * `viewport_aspect` - Width / height of the target container
/// * `align` - Placement used when letterboxing
///
/// # Errors
///
/// Returns `ToolError::InvalidAspect` if either aspect ratio is zero,
/// negative, or not finite.
pub fn project(
    source_aspect: f64,
    value: &CropAndHotspot,
    viewport_aspect: f64,
    align: Align,
) -> Result<Projection, ToolError> {
    let source_aspect = check_aspect(source_aspect)?;
    let viewport_aspect = check_aspect(viewport_aspect)?;

    let value = value.normalized();
    let dims = value.crop.dimensions();

    let crop_rational_aspect = dims.width / dims.height;
    let crop_aspect = crop_rational_aspect * source_aspect;

    // Hotspot in fractions of the crop rather than of the full image
    let hotspot = Hotspot::new(
        (value.hotspot.x - dims.left) / dims.width,
        (value.hotspot.y - dims.top) / dims.height,
        value.hotspot.width / dims.width,
        value.hotspot.height / dims.height,
    );

    // Container heights covered per unit of scale
    let height_per_scale = viewport_aspect / crop_aspect;

    let max_scale = (1.0 / hotspot.width).min(1.0 / (hotspot.height * height_per_scale));
    let crop_is_taller = crop_aspect <= viewport_aspect;
    let min_full_bleed_scale = if crop_is_taller {
        1.0
    } else {
        crop_aspect / viewport_aspect
    };

    let (method, width, height) = if min_full_bleed_scale > max_scale {
        (
            FitMethod::Letterbox,
            max_scale,
            max_scale * height_per_scale,
        )
    } else if crop_is_taller {
        (FitMethod::FullWidth, 1.0, height_per_scale)
    } else {
        (FitMethod::FullHeight, min_full_bleed_scale, 1.0)
    };

    let left = place(width, hotspot.x, align.x.factor());
    let top = place(height, hotspot.y, align.y.factor());

    let image = Rect::new(
        -dims.left / dims.width,
        -dims.top / dims.height,
        1.0 / dims.width,
        1.0 / dims.height,
    );

    Ok(Projection {
        method,
        crop: Rect::new(left, top, width, height),
        image,
    })
}

/// Offset along one axis for an image of `extent` (in container units).
///
/// An image that fits is pinned flush by an edge `align`. Otherwise it is
/// moved so `focus` (a fraction of the image) lands at the container's
/// center, kept inside the container when it fits and covering the
/// container when it overflows.
fn place(extent: f64, focus: f64, align: Option<f64>) -> f64 {
    let centered = 0.5 - focus * extent;
    if extent <= 1.0 + FIT_EPSILON {
        let free = (1.0 - extent).max(0.0);
        match align {
            Some(factor) => free * factor,
            None => centered.clamp(0.0, free),
        }
    } else {
        centered.clamp(1.0 - extent, 0.0)
    }
}

/// A CSS length in percent, rounded to two decimals.
///
/// Zero is rendered as the bare number `0`; every other value carries a `%`
/// unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CssLength(f64);

impl CssLength {
    /// Build from a fraction, where 1.0 is 100%.
    pub fn from_fraction(fraction: f64) -> Self {
        let percent = (fraction * 100.0 * 100.0).round() / 100.0;
        // Fold -0.0 into 0.0
        Self(if percent == 0.0 { 0.0 } else { percent })
    }

    /// The rounded percentage.
    pub fn percent(&self) -> f64 {
        self.0
    }

    /// True when the length rounds to zero.
    pub fn is_zero(&self) -> bool {
        self.0 == 0.0
    }
}

impl fmt::Display for CssLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_zero() {
            write!(f, "0")
        } else {
            write!(f, "{}%", self.0)
        }
    }
}

impl Serialize for CssLength {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if self.is_zero() {
            serializer.serialize_u8(0)
        } else {
            serializer.collect_str(self)
        }
    }
}

/// A box positioned with CSS percentage offsets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CssBox {
    pub top: CssLength,
    pub left: CssLength,
    pub width: CssLength,
    pub height: CssLength,
}

impl From<Rect> for CssBox {
    fn from(rect: Rect) -> Self {
        Self {
            top: CssLength::from_fraction(rect.top),
            left: CssLength::from_fraction(rect.left),
            width: CssLength::from_fraction(rect.width),
            height: CssLength::from_fraction(rect.height),
        }
    }
}

/// The projection rendered as CSS boxes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ProjectedStyles {
    pub method: FitMethod,
    pub crop: CssBox,
    pub image: CssBox,
}

impl From<Projection> for ProjectedStyles {
    fn from(projection: Projection) -> Self {
        Self {
            method: projection.method,
            crop: projection.crop.into(),
            image: projection.image.into(),
        }
    }
}

/// [`project`] followed by conversion to CSS boxes.
pub fn calculate_styles(
    source_aspect: f64,
    value: &CropAndHotspot,
    viewport_aspect: f64,
    align: Align,
) -> Result<ProjectedStyles, ToolError> {
    Ok(project(source_aspect, value, viewport_aspect, align)?.into())
}


// ============================================================================
// Property-Based Tests
// ============================================================================
