//! Error types for the crop/hotspot engine.
//!
//! Malformed *values* (bad insets, degenerate hotspots) are never errors:
//! they are repaired by [`CropAndHotspot::normalized`](crate::CropAndHotspot::normalized).
//! The variants here cover inputs that cannot be repaired meaningfully.

use thiserror::Error;

/// Errors produced by the engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ToolError {
    /// An aspect ratio was zero, negative, or not finite.
    #[error("Invalid aspect ratio: {0}")]
    InvalidAspect(f64),

    /// An alignment name from the host was not recognized.
    #[error("Unknown alignment: {0}")]
    UnknownAlignment(String),

    /// A crop handle name from the host was not recognized.
    #[error("Unknown crop handle: {0}")]
    UnknownHandle(String),

    /// A focus target name from the host was not recognized.
    #[error("Unknown focus target: {0}")]
    UnknownFocusTarget(String),

    /// A key name from the host is not one the editor responds to.
    #[error("Unsupported key: {0}")]
    UnknownKey(String),

    /// The image header could not be read.
    #[error("Invalid or unsupported image: {0}")]
    InvalidImage(String),

    /// The image reported a zero width or height.
    #[error("Image has zero width or height")]
    EmptyImage,
}

/// Validate an aspect ratio used by the display projection.
pub(crate) fn check_aspect(aspect: f64) -> Result<f64, ToolError> {
    if aspect.is_finite() && aspect > 0.0 {
        Ok(aspect)
    } else {
        Err(ToolError::InvalidAspect(aspect))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_aspect() {
        assert_eq!(check_aspect(1.5), Ok(1.5));
        assert!(matches!(check_aspect(0.0), Err(ToolError::InvalidAspect(_))));
        assert!(matches!(check_aspect(-2.0), Err(ToolError::InvalidAspect(_))));
        assert!(check_aspect(f64::NAN).is_err());
        assert!(check_aspect(f64::INFINITY).is_err());
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            ToolError::UnknownHandle("middle".into()).to_string(),
            "Unknown crop handle: middle"
        );
        assert_eq!(
            ToolError::EmptyImage.to_string(),
            "Image has zero width or height"
        );
    }
}
