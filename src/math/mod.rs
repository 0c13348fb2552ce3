//! Geometry types shared by the renderer, the event layer and scene objects.
//!
//! # Module Organization
//!
//! - [`vec`] contains the 2D vector type (re-exported at root level)
//! - [`rect`] contains pixel sizes and rectangles (re-exported at root level)
//!
//! Everything is in screen pixels with the origin at the top-left corner of the
//! window and the y axis pointing down.

pub mod rect;
pub mod vec;

pub use rect::{Rect, Size};
pub use vec::Vec2;
