//! `<color>` values and the color decoder.
//!
//! The grammar recognises a [`ColorLiteral`]; decoding turns it into a
//! straight-alpha [`ColorValue`] with every channel clamped to `[0, 1]`.

pub mod named;

use crate::error::{ErrorKind, ParseError};
use crate::grammar::{self, Cursor};
use crate::lexer::Lexer;

// ── ColorValue ────────────────────────────────────────────────────────────

/// Straight-alpha RGBA color, channels in `[0, 1]`.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ColorValue {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl ColorValue {
    /// Builds a color from unit-range channels, clamping each to `[0, 1]`.
    pub fn from_unit(r: f64, g: f64, b: f64, a: f64) -> Self {
        let unit = |v: f64| v.clamp(0.0, 1.0) as f32;
        Self { r: unit(r), g: unit(g), b: unit(b), a: unit(a) }
    }

    /// Opaque color from sRGB bytes.
    pub fn from_rgb8([r, g, b]: [u8; 3]) -> Self {
        Self {
            r: r as f32 / 255.0,
            g: g as f32 / 255.0,
            b: b as f32 / 255.0,
            a: 1.0,
        }
    }

    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

// ── ColorLiteral ──────────────────────────────────────────────────────────

/// Which of the supported notations a color literal was written in.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ColorNotation {
    Hex,
    Rgb,
    Rgba,
    Hsl,
    Hsla,
    Named,
}

/// A color as matched by the grammar, before decoding.
///
/// Percentages are already fractions (`50%` is `0.5`); everything else is
/// the number as written.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorLiteral {
    /// Lowercase hex digits without `#`, 3 or 6 of them.
    Hex(String),
    Rgb([f64; 3]),
    Rgba([f64; 4]),
    Hsl { hue: f64, saturation: f64, lightness: f64 },
    Hsla { hue: f64, saturation: f64, lightness: f64, alpha: f64 },
    /// Lowercase color name.
    Named(String),
}

impl ColorLiteral {
    pub fn notation(&self) -> ColorNotation {
        match self {
            ColorLiteral::Hex(_)      => ColorNotation::Hex,
            ColorLiteral::Rgb(_)      => ColorNotation::Rgb,
            ColorLiteral::Rgba(_)     => ColorNotation::Rgba,
            ColorLiteral::Hsl { .. }  => ColorNotation::Hsl,
            ColorLiteral::Hsla { .. } => ColorNotation::Hsla,
            ColorLiteral::Named(_)    => ColorNotation::Named,
        }
    }

    /// Decodes the literal. Errors carry offset `0`; callers re-anchor them.
    pub fn decode(&self) -> Result<ColorValue, ParseError> {
        match self {
            ColorLiteral::Hex(hex) => decode_hex(hex),
            ColorLiteral::Rgb([r, g, b]) => Ok(ColorValue::from_unit(r / 255.0, g / 255.0, b / 255.0, 1.0)),
            ColorLiteral::Rgba([r, g, b, a]) => Ok(ColorValue::from_unit(r / 255.0, g / 255.0, b / 255.0, *a)),
            ColorLiteral::Hsl { hue, saturation, lightness } => Ok(decode_hsl(*hue, *saturation, *lightness, 1.0)),
            ColorLiteral::Hsla { hue, saturation, lightness, alpha } => {
                Ok(decode_hsl(*hue, *saturation, *lightness, *alpha))
            }
            ColorLiteral::Named(name) => named::lookup(name)
                .map(ColorValue::from_rgb8)
                .ok_or_else(|| {
                    ParseError::new(ErrorKind::UnknownColor, format!("unknown color name {:?}", name), 0)
                }),
        }
    }
}

fn decode_hex(hex: &str) -> Result<ColorValue, ParseError> {
    let expanded: String = match hex.len() {
        3 => hex.chars().flat_map(|c| [c, c]).collect(),
        6 => hex.to_string(),
        n => return Err(ParseError::syntax(format!("hex color must have 3 or 6 digits, got {}", n), 0)),
    };
    let rgb = u32::from_str_radix(&expanded, 16)
        .map_err(|_| ParseError::syntax(format!("invalid hex color #{}", hex), 0))?;
    Ok(ColorValue::from_rgb8([(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8]))
}

fn decode_hsl(hue_deg: f64, saturation: f64, lightness: f64, alpha: f64) -> ColorValue {
    let h = hue_deg.rem_euclid(360.0) / 360.0;
    let [r, g, b] = hsl_to_rgb(h, saturation.clamp(0.0, 1.0), lightness.clamp(0.0, 1.0));
    ColorValue::from_unit(r, g, b, alpha)
}

/// HSL to RGB with all inputs and outputs in `[0, 1]`. Hue is in turns.
pub fn hsl_to_rgb(h: f64, s: f64, l: f64) -> [f64; 3] {
    if s == 0.0 {
        return [l, l, l]; // achromatic
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    [
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    ]
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

// ── Entry points ──────────────────────────────────────────────────────────

fn match_literal(src: &str) -> Result<(ColorLiteral, usize), ParseError> {
    let tokens = Lexer::new(src).tokenize()?;
    let mut c = Cursor::new(&tokens);
    let offset = c.offset();
    let literal = grammar::color(&mut c).ok_or_else(|| grammar::expected_color(&c, "a color"))?;
    c.expect_end()?;
    Ok((literal, offset))
}

/// Parses and decodes a standalone `<color>` string such as `"#ff0000"`.
pub fn parse_color(src: &str) -> Result<ColorValue, ParseError> {
    let (literal, offset) = match_literal(src)?;
    literal.decode().map_err(|e| e.at(offset))
}

/// Decodes `src`, which must be written in `notation`.
pub fn decode_color(src: &str, notation: ColorNotation) -> Result<ColorValue, ParseError> {
    let (literal, offset) = match_literal(src)?;
    if literal.notation() != notation {
        return Err(ParseError::syntax(
            format!("expected a {:?} color, got {:?}", notation, literal.notation()),
            offset,
        ));
    }
    literal.decode().map_err(|e| e.at(offset))
}
