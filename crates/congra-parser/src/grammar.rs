//! Primitive grammar: composable matchers over the token stream.
//!
//! Every matcher takes a [`Cursor`] and returns `Some(value)` after consuming
//! the tokens it recognised, or `None` with the cursor left where it was.
//! A non-match is never an error here; callers decide what a miss means.

use std::f64::consts::TAU;

use crate::color::ColorLiteral;
use crate::color::named;
use crate::error::{ErrorKind, ParseError};
use crate::lexer::{Spanned, Token};

static EOF: Token = Token::Eof;

// ── Cursor ────────────────────────────────────────────────────────────────

/// Read position over a token slice. Reading past the end yields `Eof`.
#[derive(Debug, Clone)]
pub struct Cursor<'t> {
    tokens: &'t [Spanned],
    pos: usize,
}

impl<'t> Cursor<'t> {
    pub fn new(tokens: &'t [Spanned]) -> Self {
        Self { tokens, pos: 0 }
    }

    pub fn peek(&self) -> &'t Token {
        self.peek_ahead(0)
    }

    /// Look at the token `n` positions ahead of current without consuming.
    pub fn peek_ahead(&self, n: usize) -> &'t Token {
        self.tokens.get(self.pos + n).map(|t| &t.token).unwrap_or(&EOF)
    }

    pub fn advance(&mut self) -> &'t Token {
        let tok = self.tokens.get(self.pos).map(|t| &t.token).unwrap_or(&EOF);
        if self.pos < self.tokens.len() {
            self.pos += 1;
        }
        tok
    }

    /// Byte offset of the current token (or of the last token once exhausted).
    pub fn offset(&self) -> usize {
        self.tokens
            .get(self.pos)
            .or_else(|| self.tokens.last())
            .map(|t| t.offset)
            .unwrap_or(0)
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn is_at_end(&self) -> bool {
        matches!(self.peek(), Token::Eof)
    }

    /// Tokens between two cursor positions.
    pub fn slice(&self, from: usize, to: usize) -> &'t [Spanned] {
        &self.tokens[from..to]
    }

    /// Runs `f`, rewinding the cursor if it does not match.
    pub fn attempt<T>(&mut self, f: impl FnOnce(&mut Self) -> Option<T>) -> Option<T> {
        let start = self.pos;
        let out = f(self);
        if out.is_none() {
            self.pos = start;
        }
        out
    }

    /// Consumes the keyword `word` if it is next.
    pub fn eat_keyword(&mut self, word: &str) -> bool {
        match self.peek() {
            Token::Ident(s) if s == word => {
                self.advance();
                true
            }
            _ => false,
        }
    }

    pub fn err(&self, msg: impl Into<String>) -> ParseError {
        ParseError::syntax(msg, self.offset())
    }

    pub fn expect(&mut self, expected: &Token, what: &str) -> Result<(), ParseError> {
        if self.peek() == expected {
            self.advance();
            Ok(())
        } else {
            Err(self.err(format!("expected {}, got {:?}", what, self.peek())))
        }
    }

    pub fn expect_end(&mut self) -> Result<(), ParseError> {
        if self.is_at_end() {
            Ok(())
        } else {
            Err(self.err(format!("unexpected trailing {:?}", self.peek())))
        }
    }
}

// ── Numbers ───────────────────────────────────────────────────────────────

/// `<number>`
pub fn number(c: &mut Cursor<'_>) -> Option<f64> {
    c.attempt(|c| match c.advance() {
        Token::Number(n) => Some(*n),
        _ => None,
    })
}

/// `<percentage>`, returned as a fraction (`50%` → `0.5`).
pub fn percentage(c: &mut Cursor<'_>) -> Option<f64> {
    c.attempt(|c| match c.advance() {
        Token::Percentage(p) => Some(p / 100.0),
        _ => None,
    })
}

/// Units per turn for the supported `<angle>` units.
pub fn angle_unit_divisor(unit: &str) -> Option<f64> {
    match unit {
        "deg"  => Some(360.0),
        "rad"  => Some(TAU),
        "turn" => Some(1.0),
        _      => None,
    }
}

/// `<angle>` in turns.
pub fn angle(c: &mut Cursor<'_>) -> Option<f64> {
    c.attempt(|c| match c.advance() {
        Token::Dimension(v, unit) => angle_unit_divisor(unit).map(|per_turn| v / per_turn),
        _ => None,
    })
}

/// `<angle> | <percentage>` as a fraction of a turn.
pub fn angle_percentage(c: &mut Cursor<'_>) -> Option<f64> {
    angle(c).or_else(|| percentage(c))
}

// ── Positions ─────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PositionKeyword {
    Center,
    Left,
    Right,
    Top,
    Bottom,
}

impl PositionKeyword {
    pub fn from_name(name: &str) -> Option<Self> {
        Some(match name {
            "center" => Self::Center,
            "left"   => Self::Left,
            "right"  => Self::Right,
            "top"    => Self::Top,
            "bottom" => Self::Bottom,
            _ => return None,
        })
    }

    /// Position along its axis: near edge `0.0`, center `0.5`, far edge `1.0`.
    pub fn value(self) -> f64 {
        match self {
            Self::Left | Self::Top => 0.0,
            Self::Center => 0.5,
            Self::Right | Self::Bottom => 1.0,
        }
    }

    pub fn is_horizontal(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }
}

/// One token of an `at` position: a keyword or a percentage.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PositionComponent {
    Keyword(PositionKeyword),
    Percentage(f64),
}

impl PositionComponent {
    pub fn value(self) -> f64 {
        match self {
            Self::Keyword(k) => k.value(),
            Self::Percentage(p) => p,
        }
    }

    pub fn keyword(self) -> Option<PositionKeyword> {
        match self {
            Self::Keyword(k) => Some(k),
            Self::Percentage(_) => None,
        }
    }
}

/// `<position-keyword>`
pub fn position_keyword(c: &mut Cursor<'_>) -> Option<PositionKeyword> {
    c.attempt(|c| match c.advance() {
        Token::Ident(name) => PositionKeyword::from_name(name),
        _ => None,
    })
}

/// `<percentage> | <position-keyword>`
pub fn position_component(c: &mut Cursor<'_>) -> Option<PositionComponent> {
    percentage(c)
        .map(PositionComponent::Percentage)
        .or_else(|| position_keyword(c).map(PositionComponent::Keyword))
}

// ── Colors ────────────────────────────────────────────────────────────────

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Arg {
    Number,
    Percentage,
}

/// Matches `arg (, arg)* )` after a function token, one value per `kinds` entry.
fn arguments<const N: usize>(c: &mut Cursor<'_>, kinds: [Arg; N]) -> Option<[f64; N]> {
    c.attempt(|c| {
        let mut out = [0.0; N];
        for (i, kind) in kinds.iter().enumerate() {
            if i > 0 && c.advance() != &Token::Comma {
                return None;
            }
            out[i] = match kind {
                Arg::Number => number(c)?,
                Arg::Percentage => percentage(c)?,
            };
        }
        (c.advance() == &Token::RParen).then_some(out)
    })
}

fn is_hex_color(s: &str) -> bool {
    matches!(s.len(), 3 | 6) && s.chars().all(|ch| ch.is_ascii_hexdigit())
}

/// `<color>`: hex, `rgb()`, `rgba()`, `hsl()`, `hsla()`, or a named color.
pub fn color(c: &mut Cursor<'_>) -> Option<ColorLiteral> {
    use Arg::{Number as N, Percentage as P};

    c.attempt(|c| match c.advance() {
        Token::Hash(hex) if is_hex_color(hex) => Some(ColorLiteral::Hex(hex.clone())),
        Token::Ident(name) if named::lookup(name).is_some() => {
            Some(ColorLiteral::Named(name.clone()))
        }
        Token::Function(f) => match f.as_str() {
            "rgb"  => arguments(c, [N, N, N]).map(ColorLiteral::Rgb),
            "rgba" => arguments(c, [N, N, N, N]).map(ColorLiteral::Rgba),
            "hsl"  => arguments(c, [N, P, P])
                .map(|[hue, saturation, lightness]| ColorLiteral::Hsl { hue, saturation, lightness }),
            "hsla" => arguments(c, [N, P, P, N]).map(|[hue, saturation, lightness, alpha]| {
                ColorLiteral::Hsla { hue, saturation, lightness, alpha }
            }),
            _ => None,
        },
        _ => None,
    })
}

/// Builds the error for a token where an `<angle-percentage>` was required,
/// naming the unit when that is the problem.
pub(crate) fn expected_angle_percentage(c: &Cursor<'_>) -> ParseError {
    match c.peek() {
        Token::Dimension(_, unit) => ParseError::new(
            ErrorKind::Syntax,
            format!("unsupported unit {:?}; expected deg, rad, turn or %", unit),
            c.offset(),
        ),
        tok => c.err(format!("expected an angle or percentage, got {:?}", tok)),
    }
}

/// Builds the error for a token where a `<color>` was required. A bare word
/// that missed the named-color table is an unknown color; the clause and
/// position keywords stay syntax errors.
pub(crate) fn expected_color(c: &Cursor<'_>, what: &str) -> ParseError {
    let reserved = |name: &str| matches!(name, "from" | "at") || PositionKeyword::from_name(name).is_some();
    match c.peek() {
        Token::Ident(name) if !reserved(name) => ParseError::new(
            ErrorKind::UnknownColor,
            format!("unknown color name {:?}", name),
            c.offset(),
        ),
        tok => c.err(format!("expected {}, got {:?}", what, tok)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Lexer;

    fn tokens(src: &str) -> Vec<Spanned> {
        Lexer::new(src).tokenize().unwrap()
    }

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    // ── angles ────────────────────────────────────────────────────────────

    #[test]
    fn angle_units_normalize_to_turns() {
        for (src, turns) in [("90deg", 0.25), ("0.5turn", 0.5), ("-45deg", -0.125), ("25%", 0.25)] {
            let toks = tokens(src);
            let mut c = Cursor::new(&toks);
            assert!(close(angle_percentage(&mut c).unwrap(), turns), "{src}");
            assert!(c.is_at_end());
        }
        let toks = tokens("3.14159265358979rad");
        assert!(close(angle(&mut Cursor::new(&toks)).unwrap(), 0.5));
    }

    #[test]
    fn unknown_unit_does_not_match_and_rewinds() {
        let toks = tokens("10px");
        let mut c = Cursor::new(&toks);
        assert_eq!(angle_percentage(&mut c), None);
        assert_eq!(c.position(), 0);
        assert!(expected_angle_percentage(&c).message.contains("px"));
    }

    #[test]
    fn plain_number_is_not_an_angle() {
        let toks = tokens("0");
        assert_eq!(angle_percentage(&mut Cursor::new(&toks)), None);
    }

    // ── positions ─────────────────────────────────────────────────────────

    #[test]
    fn position_keywords_map_to_edges() {
        let toks = tokens("left center bottom 30%");
        let mut c = Cursor::new(&toks);
        let got: Vec<f64> = std::iter::from_fn(|| position_component(&mut c).map(|p| p.value())).collect();
        assert_eq!(got, vec![0.0, 0.5, 1.0, 0.3]);
    }

    #[test]
    fn non_keyword_ident_is_not_a_position() {
        let toks = tokens("middle");
        assert_eq!(position_keyword(&mut Cursor::new(&toks)), None);
    }

    // ── colors ────────────────────────────────────────────────────────────

    #[test]
    fn color_notations_are_recognised() {
        let cases = [
            "#abc", "#AABBCC", "rgb(1, 2, 3)", "rgba(1,2,3,0.5)",
            "hsl(120, 50%, 50%)", "hsla(120,50%,50%,1)", "RebeccaPurple",
        ];
        for src in cases {
            let toks = tokens(src);
            let mut c = Cursor::new(&toks);
            assert!(color(&mut c).is_some(), "{src}");
            assert!(c.is_at_end(), "{src}");
        }
    }

    #[test]
    fn malformed_colors_do_not_match() {
        let cases = [
            "#abcd", "#ggg", "rgb(1,2)", "rgb(1,2,3,4)", "rgba(1,2,3)",
            "hsl(1,2,3)", "hsl(120,50%,50%", "notacolor", "lab(1,2,3)",
        ];
        for src in cases {
            let toks = tokens(src);
            let mut c = Cursor::new(&toks);
            assert_eq!(color(&mut c), None, "{src}");
            assert_eq!(c.position(), 0, "{src}");
        }
    }

    #[test]
    fn unknown_word_is_unknown_color_but_keywords_are_syntax() {
        let toks = tokens("bluish");
        assert_eq!(expected_color(&Cursor::new(&toks), "a color").kind, ErrorKind::UnknownColor);
        for src in ["at", "from", "center", "10px"] {
            let toks = tokens(src);
            assert_eq!(expected_color(&Cursor::new(&toks), "a color").kind, ErrorKind::Syntax, "{src}");
        }
    }
}
