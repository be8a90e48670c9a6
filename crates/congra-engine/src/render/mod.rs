//! Renderer-facing output for conic gradients.
//!
//! `uniform` packs a gradient into the fixed-capacity block a fragment shader
//! reads; `sampler` runs the same per-fragment math on the CPU.
//!
//! Convention:
//! - Pixel space is top-left origin, +Y down.
//! - Angles are turns, clockwise from the top.

pub mod sampler;
pub mod uniform;

pub use sampler::{angle_at, rasterize, sample};
pub use uniform::{ConicUniform, MAX_STOPS};
