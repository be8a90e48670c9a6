//! Lexer, grammar, and color-stop normalizer for CSS `conic-gradient()` and
//! `repeating-conic-gradient()` values.
//!
//! The output is a [`GradientDescriptor`]: start angle, center, and a list of
//! color stops whose positions and interpolation hints are fully resolved, so
//! a renderer never has to re-implement the CSS stop fixup rules.
//!
//! This crate only depends on `log` (plus `serde` behind the `serde` feature)
//! so tooling can use it without pulling in the engine.
//!
//! # Structure
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`lexer`] | `Lexer`, `Token`, `Spanned` |
//! | [`grammar`] | `Cursor` and the primitive matchers (`angle_percentage`, `color`, ...) |
//! | [`color`] | `ColorValue`, `ColorLiteral`, `parse_color`, `decode_color` |
//! | [`clause`] | `from` / `at` clause decoders, `parse_position` |
//! | [`stops`] | `ColorStopToken`, `StopList`, `parse_stop_list` |
//! | [`normalize`] | position fixup and hint-pair derivation |
//! | [`descriptor`] | `GradientDescriptor`, `Center`, `HintPair` |
//! | [`parser`] | `parse_conic_gradient` entry points, `ParseOptions` |
//! | [`error`] | `ParseError`, `ErrorKind` |
//!
//! # Quick start
//!
//! ```rust
//! use congra_parser::parse_conic_gradient;
//!
//! let g = parse_conic_gradient("conic-gradient(from 45deg, red 0%, lime 50%, blue)").unwrap();
//! assert_eq!(g.angle, 0.125);
//! assert_eq!(g.offsets, vec![0.0, 0.5, 1.0]);
//! assert_eq!(g.hints[0].midpoint, 0.25);
//! ```

pub mod clause;
pub mod color;
pub mod descriptor;
pub mod error;
pub mod grammar;
pub mod lexer;
pub mod normalize;
pub mod parser;
pub mod stops;

pub use clause::{parse_angle_percentage, parse_position};
pub use color::{decode_color, parse_color, ColorNotation, ColorValue};
pub use descriptor::{Center, GradientDescriptor, HintPair, ResolvedStop};
pub use error::{ErrorKind, ParseError};
pub use parser::{parse_conic_gradient, parse_conic_gradient_with, ParseOptions, DEFAULT_MAX_STOPS};
pub use stops::{parse_stop_list, ColorStopToken, StopList};
