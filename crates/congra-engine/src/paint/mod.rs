//! Paint model for conic gradients.
//!
//! Scope:
//! - color representation (premultiplied alpha)
//! - the conic gradient source, built from a parsed descriptor
//!
//! Geometry types remain in `coords`.

pub mod color;
pub mod gradient;

pub use color::Color;
pub use gradient::{ColorStop, ConicGradient, Hint, SpreadMode};
