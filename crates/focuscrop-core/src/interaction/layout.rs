//! Mapping between the normalized value and the editor's pixel space.
//!
//! [`ToolLayout`] knows where the image is drawn inside the editor surface.
//! [`ToolGeometry`] is the per-frame view model derived from it: every rect a
//! canvas painter or an SVG renderer needs, plus the hit-testing that turns a
//! pointer press into a [`HitTarget`].

use serde::{Deserialize, Serialize};

use super::handles::CropHandle;
use crate::config::ToolConfig;
use crate::geometry::{
    is_point_in_circle, is_point_in_ellipse, is_point_in_rect, point_at_circumference, Circle,
    Point, Rect, Size,
};
use crate::model::CropAndHotspot;

/// Something on the editor surface that can be hovered or dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "handle", rename_all = "camelCase")]
pub enum HitTarget {
    Hotspot,
    HotspotHandle,
    Crop,
    CropHandle(CropHandle),
}

/// Placement of the image inside the editor surface.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToolLayout {
    /// The whole editor surface
    pub editor: Rect,
    /// Where the full image is drawn
    pub image: Rect,
}

impl ToolLayout {
    /// Shrink the editor rect by `margin` and fit the image's aspect ratio
    /// inside what is left, centered.
    ///
    /// An image with no usable aspect ratio fills the shrunk rect.
    pub fn new(editor_size: Size, image_size: Size, margin: f64) -> Self {
        let editor = Rect::from_size(editor_size);
        let inner = editor.shrink(margin);
        let image = match image_size.aspect() {
            Some(aspect) => inner.fit_aspect(aspect),
            None => inner,
        };
        Self { editor, image }
    }

    /// Convert a pixel displacement into a fraction of the image size.
    ///
    /// An empty image rect yields a zero delta rather than infinities.
    pub fn normalize_delta(&self, from: Point, to: Point) -> Point {
        if self.image.size().is_empty() {
            return Point::ZERO;
        }
        let d = from.delta_to(to);
        Point::new(d.x / self.image.width, d.y / self.image.height)
    }

    /// Build the view model for `value`.
    ///
    /// In read-only mode no handles are produced, which both hides them and
    /// makes them untargetable.
    pub fn geometry(
        &self,
        value: &CropAndHotspot,
        config: &ToolConfig,
        read_only: bool,
    ) -> ToolGeometry {
        let crop = self.image.crop_relative(&value.crop.to_rect());
        let hotspot = self.image.multiply(&value.hotspot.to_rect());

        let (hotspot_handle, crop_handles) = if read_only {
            (None, Vec::new())
        } else {
            let center = point_at_circumference(config.hotspot_handle_angle, &hotspot);
            let handle = HotspotHandle {
                visual: Circle::new(center, config.hotspot_handle_radius),
                hit: Circle::new(center, config.hotspot_handle_hit_radius),
            };
            let handles = CropHandle::ALL
                .into_iter()
                .map(|handle| HandleRect {
                    handle,
                    rect: handle.hit_rect(&crop, config.crop_handle_hit_size),
                })
                .collect();
            (Some(handle), handles)
        };

        ToolGeometry {
            image: self.image,
            crop,
            hotspot,
            hotspot_handle,
            crop_handles,
        }
    }
}

/// The hotspot resize handle: drawn small, hit-tested large.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HotspotHandle {
    pub visual: Circle,
    pub hit: Circle,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HandleRect {
    pub handle: CropHandle,
    pub rect: Rect,
}

/// Everything needed to draw the editor for one frame, in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolGeometry {
    pub image: Rect,
    pub crop: Rect,
    /// Bounding box of the hotspot ellipse
    pub hotspot: Rect,
    pub hotspot_handle: Option<HotspotHandle>,
    /// Hit rects in hit-test order, corners first
    pub crop_handles: Vec<HandleRect>,
}

impl ToolGeometry {
    /// Resolve a point to the topmost target under it.
    ///
    /// Precedence follows paint order, top to bottom: crop handles (corners
    /// before edges), the hotspot handle, the hotspot ellipse, then the crop
    /// body.
    pub fn hit_test(&self, point: Point) -> Option<HitTarget> {
        if let Some(h) = self
            .crop_handles
            .iter()
            .find(|h| is_point_in_rect(point, &h.rect))
        {
            return Some(HitTarget::CropHandle(h.handle));
        }
        if let Some(handle) = &self.hotspot_handle {
            if is_point_in_circle(point, &handle.hit) {
                return Some(HitTarget::HotspotHandle);
            }
        }
        if is_point_in_ellipse(point, &self.hotspot) {
            return Some(HitTarget::Hotspot);
        }
        if is_point_in_rect(point, &self.crop) {
            return Some(HitTarget::Crop);
        }
        None
    }
}
