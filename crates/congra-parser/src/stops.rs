//! Stop-list tokenizer: splits the list at top-level commas and decodes
//! each entry into a [`ColorStopToken`].

use crate::color::ColorValue;
use crate::error::{ErrorKind, ParseError};
use crate::grammar::{self, Cursor};
use crate::lexer::{Lexer, Spanned, Token};

// ── ColorStopToken ────────────────────────────────────────────────────────

/// One raw entry of the stop list, positions in turns.
///
/// `red 10%` has an offset; `red 10% 20%` has a hint and an offset; a bare
/// `15%` is a lone hint (no color).
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct ColorStopToken {
    pub color: Option<ColorValue>,
    pub hint: Option<f64>,
    pub offset: Option<f64>,
}

impl ColorStopToken {
    pub fn colored(color: ColorValue, hint: Option<f64>, offset: Option<f64>) -> Self {
        Self { color: Some(color), hint, offset }
    }

    pub fn lone_hint(hint: f64) -> Self {
        Self { color: None, hint: Some(hint), offset: None }
    }

    pub fn is_lone_hint(&self) -> bool {
        self.color.is_none()
    }
}

// ── StopList ──────────────────────────────────────────────────────────────

/// A stop list that passed shape validation: at least two entries, colored
/// at both ends, no adjacent lone hints, and no colored stop carrying a hint
/// without a position. Only this type can be normalized.
#[derive(Debug, Clone, PartialEq)]
pub struct StopList {
    tokens: Vec<ColorStopToken>,
}

impl StopList {
    /// Validates `tokens` built outside the parser. Errors carry offset `0`.
    pub fn new(tokens: Vec<ColorStopToken>) -> Result<Self, ParseError> {
        validate(&tokens, &[])?;
        Ok(Self { tokens })
    }

    pub fn tokens(&self) -> &[ColorStopToken] {
        &self.tokens
    }

    /// Number of colored stops, i.e. stops in the resolved gradient.
    pub fn color_count(&self) -> usize {
        self.tokens.iter().filter(|t| !t.is_lone_hint()).count()
    }
}

fn validate(tokens: &[ColorStopToken], offsets: &[usize]) -> Result<(), ParseError> {
    let at = |i: usize| offsets.get(i).copied().unwrap_or(0);
    let shape = |msg: &str, i: usize| ParseError::new(ErrorKind::InvalidStopShape, msg, at(i));

    let (Some(first), Some(last)) = (tokens.first(), tokens.last()) else {
        return Err(ParseError::new(ErrorKind::EmptyStopList, "the color-stop list is empty", 0));
    };
    if tokens.len() < 2 {
        return Err(shape("a gradient needs at least two color stops", 0));
    }
    if first.is_lone_hint() {
        return Err(shape("the first entry must have a color", 0));
    }
    if last.is_lone_hint() {
        return Err(shape("the last entry must have a color", tokens.len() - 1));
    }
    if let Some(i) = tokens.windows(2).position(|w| w[0].is_lone_hint() && w[1].is_lone_hint()) {
        return Err(shape("two color hints in a row", i + 1));
    }
    if let Some(i) = tokens.iter().position(|t| !t.is_lone_hint() && t.hint.is_some() && t.offset.is_none()) {
        return Err(shape("a color stop with a hint must also have a position", i));
    }
    Ok(())
}

// ── Splitting ─────────────────────────────────────────────────────────────

/// One comma-separated entry: its tokens and where it starts.
#[derive(Debug, Clone, Copy)]
pub struct Entry<'t> {
    pub tokens: &'t [Spanned],
    pub offset: usize,
}

/// Consumes a stop list up to the first `)` at depth 0 (left unconsumed) or
/// `Eof`, splitting it at depth-0 commas. Commas inside color functions stay
/// inside their entry.
pub fn split_entries<'t>(c: &mut Cursor<'t>) -> Result<Vec<Entry<'t>>, ParseError> {
    let mut entries = Vec::new();
    let mut depth = 0usize;
    let mut start = c.position();
    let mut start_offset = c.offset();

    loop {
        match c.peek() {
            Token::Eof if depth > 0 => return Err(c.err("unclosed '(' in color-stop list")),
            Token::RParen if depth == 0 => break,
            Token::Eof => break,
            Token::Function(_) | Token::LParen => depth += 1,
            Token::RParen => depth -= 1,
            Token::Comma if depth == 0 => {
                entries.push(Entry { tokens: c.slice(start, c.position()), offset: start_offset });
                c.advance();
                start = c.position();
                start_offset = c.offset();
                continue;
            }
            _ => {}
        }
        c.advance();
    }

    let tail = c.slice(start, c.position());
    // `conic-gradient()` has no entries at all; `a, ` has an empty trailing one.
    if !tail.is_empty() || !entries.is_empty() {
        entries.push(Entry { tokens: tail, offset: start_offset });
    }
    Ok(entries)
}

// ── Entry decoding ────────────────────────────────────────────────────────

/// Decodes `<color> [<angle-percentage>]{0,2}` or a lone `<angle-percentage>`.
pub fn decode_entry(entry: &Entry<'_>) -> Result<ColorStopToken, ParseError> {
    if entry.tokens.is_empty() {
        return Err(ParseError::syntax("empty entry in color-stop list", entry.offset));
    }
    let mut c = Cursor::new(entry.tokens);

    let token = match grammar::color(&mut c) {
        Some(literal) => {
            let color = literal.decode().map_err(|e| e.at(entry.offset))?;
            let first = next_position(&mut c)?;
            let second = if first.is_some() { next_position(&mut c)? } else { None };
            // One position is an offset; two are a hint followed by an offset.
            match (first, second) {
                (Some(hint), Some(offset)) => ColorStopToken::colored(color, Some(hint), Some(offset)),
                (offset, _) => ColorStopToken::colored(color, None, offset),
            }
        }
        None => match grammar::angle_percentage(&mut c) {
            Some(hint) => ColorStopToken::lone_hint(hint),
            None if matches!(c.peek(), Token::Dimension(..)) => {
                return Err(grammar::expected_angle_percentage(&c));
            }
            None => return Err(grammar::expected_color(&c, "a color or color hint")),
        },
    };

    if !c.is_at_end() {
        return Err(c.err(format!("unexpected {:?} in color stop", c.peek())));
    }
    Ok(token)
}

fn next_position(c: &mut Cursor<'_>) -> Result<Option<f64>, ParseError> {
    if c.is_at_end() {
        return Ok(None);
    }
    grammar::angle_percentage(c)
        .map(Some)
        .ok_or_else(|| grammar::expected_angle_percentage(c))
}

/// Decodes and validates split entries.
pub fn decode_entries(entries: &[Entry<'_>]) -> Result<StopList, ParseError> {
    let tokens = entries.iter().map(decode_entry).collect::<Result<Vec<_>, _>>()?;
    let offsets: Vec<usize> = entries.iter().map(|e| e.offset).collect();
    validate(&tokens, &offsets)?;
    log::trace!("tokenized {} color-stop entries", tokens.len());
    Ok(StopList { tokens })
}

/// Parses a bare color-stop list such as `"red, 30%, blue 80%"`.
pub fn parse_stop_list(src: &str) -> Result<StopList, ParseError> {
    let tokens = Lexer::new(src).tokenize()?;
    let mut c = Cursor::new(&tokens);
    let entries = split_entries(&mut c)?;
    c.expect_end()?;
    decode_entries(&entries)
}
