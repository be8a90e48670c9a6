//! Coordinate types shared by the paint model and the sampler.
//!
//! Canonical CPU space:
//! - Pixels, origin top-left
//! - +X right, +Y down
//!
//! Gradient centers are stored as fractions of the target size and scaled
//! to pixels at sample time.

mod vec2;

pub use vec2::Vec2;
