use crate::clause;
use crate::descriptor::{Center, GradientDescriptor};
use crate::error::{ErrorKind, ParseError};
use crate::grammar::Cursor;
use crate::lexer::{Lexer, Token};
use crate::normalize::normalize;
use crate::stops;

/// Stop capacity of the reference renderer's uniform block.
pub const DEFAULT_MAX_STOPS: usize = 16;

/// Knobs for [`parse_conic_gradient_with`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Largest number of colored stops accepted; more is
    /// [`ErrorKind::TooManyStops`].
    pub max_stops: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self { max_stops: DEFAULT_MAX_STOPS }
    }
}

// ── Head ──────────────────────────────────────────────────────────────────

/// Consumes the function token and reports whether it is the repeating form.
fn gradient_function(c: &mut Cursor<'_>) -> Result<bool, ParseError> {
    let repeating = match c.peek() {
        Token::Function(name) if name == "conic-gradient" => false,
        Token::Function(name) if name == "repeating-conic-gradient" => true,
        tok => {
            return Err(c.err(format!(
                "expected conic-gradient( or repeating-conic-gradient(, got {:?}",
                tok
            )));
        }
    };
    c.advance();
    Ok(repeating)
}

fn at_keyword(c: &Cursor<'_>, word: &str) -> bool {
    matches!(c.peek(), Token::Ident(s) if s == word)
}

/// `[from <angle-percentage>] [at <position>] ,` in that order, with the comma
/// required whenever either clause is present.
fn clauses(c: &mut Cursor<'_>) -> Result<(f64, Center), ParseError> {
    let mut angle = 0.0;
    let mut center = Center::default();
    let mut any = false;

    if at_keyword(c, "from") {
        angle = clause::from_clause(c)?;
        any = true;
    }
    if at_keyword(c, "at") {
        center = clause::at_clause(c)?;
        any = true;
    }
    if any {
        c.expect(&Token::Comma, "',' after the gradient clauses")?;
    }
    Ok((angle, center))
}

// ── Entry points ──────────────────────────────────────────────────────────

/// Parses `conic-gradient(...)` or `repeating-conic-gradient(...)` with the
/// default [`ParseOptions`].
pub fn parse_conic_gradient(src: &str) -> Result<GradientDescriptor, ParseError> {
    parse_conic_gradient_with(src, &ParseOptions::default())
}

pub fn parse_conic_gradient_with(
    src: &str,
    options: &ParseOptions,
) -> Result<GradientDescriptor, ParseError> {
    let tokens = Lexer::new(src).tokenize()?;
    let mut c = Cursor::new(&tokens);

    let repeating = gradient_function(&mut c)?;
    let (angle, center) = clauses(&mut c)?;

    let list_offset = c.offset();
    let entries = stops::split_entries(&mut c)?;
    c.expect(&Token::RParen, "')' closing the gradient")?;
    c.expect_end()?;

    let list = stops::decode_entries(&entries)?;
    let count = list.color_count();
    if count > options.max_stops {
        return Err(ParseError::new(
            ErrorKind::TooManyStops,
            format!("{} color stops exceed the limit of {}", count, options.max_stops),
            list_offset,
        ));
    }

    let normalized = normalize(&list);
    let descriptor = GradientDescriptor {
        repeating,
        angle,
        center,
        colors: normalized.stops.iter().map(|s| s.color).collect(),
        offsets: normalized.stops.iter().map(|s| s.offset).collect(),
        hints: normalized.hints,
    };

    log::debug!(
        "parsed {}conic-gradient: {} stops, angle {} turn, center ({}, {})",
        if repeating { "repeating-" } else { "" },
        descriptor.stop_count(),
        descriptor.angle,
        descriptor.center.x,
        descriptor.center.y,
    );
    Ok(descriptor)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kind(src: &str) -> ErrorKind {
        parse_conic_gradient(src).unwrap_err().kind
    }

    // ── head ──────────────────────────────────────────────────────────────

    #[test]
    fn function_name_is_case_insensitive() {
        assert!(!parse_conic_gradient("Conic-Gradient(red, blue)").unwrap().repeating);
        assert!(parse_conic_gradient("REPEATING-conic-gradient(red, blue)").unwrap().repeating);
    }

    #[test]
    fn other_functions_are_syntax() {
        assert_eq!(kind("linear-gradient(red, blue)"), ErrorKind::Syntax);
        assert_eq!(kind("conic-gradient (red, blue)"), ErrorKind::Syntax);
        assert_eq!(kind("red, blue"), ErrorKind::Syntax);
        assert_eq!(kind(""), ErrorKind::Syntax);
    }

    // ── clause combinations ───────────────────────────────────────────────

    #[test]
    fn all_four_clause_forms() {
        let none = parse_conic_gradient("conic-gradient(red, blue)").unwrap();
        assert_eq!((none.angle, none.center), (0.0, Center::new(0.5, 0.5)));

        let from = parse_conic_gradient("conic-gradient(from 0.25turn, red, blue)").unwrap();
        assert_eq!((from.angle, from.center), (0.25, Center::new(0.5, 0.5)));

        let at = parse_conic_gradient("conic-gradient(at 10% 20%, red, blue)").unwrap();
        assert_eq!((at.angle, at.center), (0.0, Center::new(0.1, 0.2)));

        let both = parse_conic_gradient("conic-gradient(from 90deg at right top, red, blue)").unwrap();
        assert_eq!((both.angle, both.center), (0.25, Center::new(1.0, 0.0)));
    }

    #[test]
    fn clause_without_comma_is_syntax() {
        assert_eq!(kind("conic-gradient(from 45deg red, blue)"), ErrorKind::Syntax);
        assert_eq!(kind("conic-gradient(at center red, blue)"), ErrorKind::Syntax);
        assert_eq!(kind("conic-gradient(from 45deg at center red, blue)"), ErrorKind::Syntax);
    }

    #[test]
    fn clause_order_and_repeats_are_syntax() {
        assert_eq!(kind("conic-gradient(at center from 45deg, red, blue)"), ErrorKind::Syntax);
        assert_eq!(kind("conic-gradient(from 45deg from 10deg, red, blue)"), ErrorKind::Syntax);
        assert_eq!(kind("conic-gradient(at center at left top, red, blue)"), ErrorKind::Syntax);
        assert_eq!(kind("conic-gradient(from 45deg, at center, red, blue)"), ErrorKind::Syntax);
    }

    // ── closing ───────────────────────────────────────────────────────────

    #[test]
    fn unclosed_or_trailing_is_syntax() {
        assert_eq!(kind("conic-gradient(red, blue"), ErrorKind::Syntax);
        assert_eq!(kind("conic-gradient(red, blue) extra"), ErrorKind::Syntax);
        assert_eq!(kind("conic-gradient(red, blue))"), ErrorKind::Syntax);
    }

    // ── capacity ──────────────────────────────────────────────────────────

    #[test]
    fn stop_capacity_is_enforced() {
        let sixteen = format!("conic-gradient({})", vec!["red"; 16].join(", "));
        assert_eq!(parse_conic_gradient(&sixteen).unwrap().stop_count(), 16);

        let seventeen = format!("conic-gradient({})", vec!["red"; 17].join(", "));
        assert_eq!(kind(&seventeen), ErrorKind::TooManyStops);
    }

    #[test]
    fn lone_hints_do_not_count_toward_capacity() {
        let opts = ParseOptions { max_stops: 2 };
        assert!(parse_conic_gradient_with("conic-gradient(red, 30%, blue)", &opts).is_ok());
        let err = parse_conic_gradient_with("conic-gradient(red, lime, blue)", &opts).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TooManyStops);
        assert_eq!(err.offset, 15);
    }
}
