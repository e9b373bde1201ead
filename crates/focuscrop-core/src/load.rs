//! Image size probing and load state.
//!
//! The editor only needs an image's displayed pixel size to lay itself out.
//! [`probe_image_size`] reads that from the container header without decoding
//! any pixels, then applies the EXIF orientation so that portrait photos
//! stored sideways report their upright dimensions.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::ImageReader;
use serde::{Deserialize, Serialize};

use crate::error::ToolError;

/// Pixel dimensions of an image as displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

impl ImageSize {
    /// Size of `width` by `height` pixels.
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

/// EXIF orientation tag values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Normal = 1,
    FlipHorizontal = 2,
    Rotate180 = 3,
    FlipVertical = 4,
    Transpose = 5,
    Rotate90CW = 6,
    Transverse = 7,
    Rotate270CW = 8,
}

impl Orientation {
    /// Quarter-turn orientations display the image with width and height
    /// exchanged.
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Orientation::Transpose
                | Orientation::Rotate90CW
                | Orientation::Transverse
                | Orientation::Rotate270CW
        )
    }

    /// Apply this orientation to stored dimensions.
    pub fn orient(self, stored: ImageSize) -> ImageSize {
        if self.swaps_dimensions() {
            ImageSize::new(stored.height, stored.width)
        } else {
            stored
        }
    }
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// Read the EXIF orientation, falling back to `Normal` when the container
/// has no EXIF block or no orientation tag.
pub fn read_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    let Ok(exif) = Reader::new().read_from_container(&mut cursor) else {
        return Orientation::Normal;
    };
    exif.get_field(Tag::Orientation, In::PRIMARY)
        .and_then(|field| field.value.get_uint(0))
        .map(Orientation::from)
        .unwrap_or_default()
}

/// Determine an image's displayed size from its encoded bytes.
///
/// # Arguments
///
/// * `bytes` - Encoded image file (JPEG, PNG, GIF or WebP)
///
/// # Returns
///
/// The width and height after EXIF orientation is applied.
///
/// # Errors
///
/// Returns `ToolError::InvalidImage` if the format is not recognized or the
/// header cannot be read, and `ToolError::EmptyImage` for a zero dimension.
pub fn probe_image_size(bytes: &[u8]) -> Result<ImageSize, ToolError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| ToolError::InvalidImage(e.to_string()))?;

    if reader.format().is_none() {
        return Err(ToolError::InvalidImage("unrecognized format".to_string()));
    }

    let (width, height) = reader
        .into_dimensions()
        .map_err(|e| ToolError::InvalidImage(e.to_string()))?;

    if width == 0 || height == 0 {
        return Err(ToolError::EmptyImage);
    }

    let orientation = read_orientation(bytes);
    let size = orientation.orient(ImageSize::new(width, height));
    tracing::debug!(width = size.width, height = size.height, ?orientation, "probed image size");
    Ok(size)
}

/// Outcome of resolving the source image, as reported by the host's loader.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", content = "data", rename_all = "camelCase")]
pub enum ImageLoadState {
    Loading,
    Loaded(ImageSize),
    Error(String),
}

impl ImageLoadState {
    /// Build the state from a probe result.
    pub fn from_probe(result: Result<ImageSize, ToolError>) -> Self {
        match result {
            Ok(size) => ImageLoadState::Loaded(size),
            Err(e) => ImageLoadState::Error(e.to_string()),
        }
    }

    /// Probe `bytes` and report the outcome as a load state.
    pub fn probe(bytes: &[u8]) -> Self {
        Self::from_probe(probe_image_size(bytes))
    }

    /// The displayed size, once loaded.
    pub fn size(&self) -> Option<ImageSize> {
        match self {
            ImageLoadState::Loaded(size) => Some(*size),
            _ => None,
        }
    }
}
