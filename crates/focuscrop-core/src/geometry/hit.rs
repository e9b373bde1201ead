//! Hit-testing helpers used to resolve pointer presses to editor targets.

use serde::{Deserialize, Serialize};

use super::{Point, Rect};

/// A circle, used for the hotspot resize handle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Circle {
    pub center: Point,
    pub radius: f64,
}

impl Circle {
    /// Circle of `radius` around `center`.
    pub const fn new(center: Point, radius: f64) -> Self {
        Self { center, radius }
    }
}

/// Inclusive point-in-rect test.
#[inline]
pub fn is_point_in_rect(point: Point, rect: &Rect) -> bool {
    point.x >= rect.left
        && point.x <= rect.right()
        && point.y >= rect.top
        && point.y <= rect.bottom()
}

/// Test whether `point` lies inside the ellipse inscribed in `rect`.
///
/// A degenerate ellipse (zero width or height) contains nothing.
pub fn is_point_in_ellipse(point: Point, rect: &Rect) -> bool {
    let rx = rect.width.abs() / 2.0;
    let ry = rect.height.abs() / 2.0;
    if rx <= 0.0 || ry <= 0.0 {
        return false;
    }
    let center = rect.center();
    let nx = (point.x - center.x) / rx;
    let ny = (point.y - center.y) / ry;
    nx * nx + ny * ny <= 1.0
}

/// True when `point` is inside or on `circle`.
#[inline]
pub fn is_point_in_circle(point: Point, circle: &Circle) -> bool {
    let dx = point.x - circle.center.x;
    let dy = point.y - circle.center.y;
    dx * dx + dy * dy <= circle.radius * circle.radius
}

/// The point at `radians` on the circumference of the ellipse inscribed in
/// `rect`. Zero radians points right; angles grow clockwise (y points down).
pub fn point_at_circumference(radians: f64, rect: &Rect) -> Point {
    let center = rect.center();
    Point::new(
        center.x + rect.width / 2.0 * radians.cos(),
        center.y + rect.height / 2.0 * radians.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::{FRAC_PI_2, FRAC_PI_4};

    #[test]
    fn test_point_in_rect_is_inclusive() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(is_point_in_rect(Point::new(0.0, 0.0), &r));
        assert!(is_point_in_rect(Point::new(10.0, 10.0), &r));
        assert!(!is_point_in_rect(Point::new(10.1, 5.0), &r));
    }

    #[test]
    fn test_point_in_ellipse() {
        let r = Rect::new(0.0, 0.0, 200.0, 100.0);
        assert!(is_point_in_ellipse(Point::new(100.0, 50.0), &r));
        assert!(is_point_in_ellipse(Point::new(199.0, 50.0), &r));
        // Bounding box corner is outside the ellipse
        assert!(!is_point_in_ellipse(Point::new(5.0, 5.0), &r));
    }

    #[test]
    fn test_degenerate_ellipse_contains_nothing() {
        let r = Rect::new(0.0, 0.0, 0.0, 100.0);
        assert!(!is_point_in_ellipse(Point::new(0.0, 50.0), &r));
    }

    #[test]
    fn test_point_in_circle() {
        let c = Circle::new(Point::new(10.0, 10.0), 5.0);
        assert!(is_point_in_circle(Point::new(13.0, 14.0), &c));
        assert!(!is_point_in_circle(Point::new(14.0, 14.0), &c));
    }

    #[test]
    fn test_point_at_circumference() {
        let r = Rect::new(0.0, 0.0, 200.0, 100.0);
        let p = point_at_circumference(FRAC_PI_2, &r);
        assert!((p.x - 100.0).abs() < 1e-9);
        assert!((p.y - 100.0).abs() < 1e-9);

        // Bottom-right diagonal
        let p = point_at_circumference(FRAC_PI_4, &r);
        assert!(p.x > 100.0 && p.y > 50.0);
        assert!(is_point_in_ellipse(p, &r.grow(0.001)));
    }
}
