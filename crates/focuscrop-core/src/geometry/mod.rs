//! Pixel- and unit-space geometry primitives.
//!
//! Everything in this module is a plain `Copy` value. Operations never mutate
//! in place; each one returns a new value, so intermediate rectangles can be
//! chained freely while computing a frame.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner, y grows downward
//! - The same types are used for pixel rectangles and for fractional
//!   (0.0 to 1.0) rectangles; [`Rect::multiply`] maps one into the other

mod hit;
mod point;
mod rect;

pub use hit::{
    is_point_in_circle, is_point_in_ellipse, is_point_in_rect, point_at_circumference, Circle,
};
pub use point::{Point, Size};
pub use rect::Rect;
