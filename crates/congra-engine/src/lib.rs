//! Congra engine crate.
//!
//! Turns parsed [`congra_parser::GradientDescriptor`]s into something a
//! renderer can use: a paint model, a packed uniform block, and a CPU
//! reference sampler. Also owns logger initialization for binaries.

pub mod coords;
pub mod logging;
pub mod paint;
pub mod render;
