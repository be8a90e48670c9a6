//! Decoders for the `from <angle-percentage>` and `at <position>` clauses.

use crate::descriptor::Center;
use crate::error::{ErrorKind, ParseError};
use crate::grammar::{self, Cursor, PositionComponent, PositionKeyword};
use crate::lexer::Lexer;

/// `from <angle-percentage>`, with the cursor on `from`. Returns turns.
pub fn from_clause(c: &mut Cursor<'_>) -> Result<f64, ParseError> {
    if !c.eat_keyword("from") {
        return Err(c.err(format!("expected 'from', got {:?}", c.peek())));
    }
    grammar::angle_percentage(c).ok_or_else(|| grammar::expected_angle_percentage(c))
}

/// `at <position>`, with the cursor on `at`.
pub fn at_clause(c: &mut Cursor<'_>) -> Result<Center, ParseError> {
    if !c.eat_keyword("at") {
        return Err(c.err(format!("expected 'at', got {:?}", c.peek())));
    }
    position(c)
}

/// `<position>`: either `center` alone, or two components in either order.
pub fn position(c: &mut Cursor<'_>) -> Result<Center, ParseError> {
    let start = c.offset();
    let first = grammar::position_component(c)
        .ok_or_else(|| c.err(format!("expected a position, got {:?}", c.peek())))?;

    let Some(second) = grammar::position_component(c) else {
        return match first {
            PositionComponent::Keyword(PositionKeyword::Center) => Ok(Center::default()),
            _ => Err(ParseError::syntax("a one-value position must be 'center'", start)),
        };
    };
    resolve_pair(first, second, start)
}

fn resolve_pair(
    first: PositionComponent,
    second: PositionComponent,
    offset: usize,
) -> Result<Center, ParseError> {
    let (a, b) = (first.keyword(), second.keyword());
    let both = |on_axis: fn(PositionKeyword) -> bool| a.is_some_and(on_axis) && b.is_some_and(on_axis);

    if both(PositionKeyword::is_horizontal) || both(PositionKeyword::is_vertical) {
        return Err(ParseError::new(
            ErrorKind::PositionConflict,
            format!("position keywords {:?} and {:?} name the same axis", first, second),
            offset,
        ));
    }

    // `top`/`bottom` first or `left`/`right` second means y was written first.
    let y_first = a.is_some_and(PositionKeyword::is_vertical) || b.is_some_and(PositionKeyword::is_horizontal);
    let (x, y) = if y_first { (second, first) } else { (first, second) };
    Ok(Center::new(x.value(), y.value()))
}

/// Parses a standalone `<angle-percentage>` string into turns.
pub fn parse_angle_percentage(src: &str) -> Result<f64, ParseError> {
    let tokens = Lexer::new(src).tokenize()?;
    let mut c = Cursor::new(&tokens);
    let turns = grammar::angle_percentage(&mut c).ok_or_else(|| grammar::expected_angle_percentage(&c))?;
    c.expect_end()?;
    Ok(turns)
}

/// Parses a standalone `<position>` string (without the `at` keyword).
pub fn parse_position(src: &str) -> Result<Center, ParseError> {
    let tokens = Lexer::new(src).tokenize()?;
    let mut c = Cursor::new(&tokens);
    let center = position(&mut c)?;
    c.expect_end()?;
    Ok(center)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(src: &str) -> Result<Center, ParseError> {
        let tokens = Lexer::new(src).tokenize().unwrap();
        at_clause(&mut Cursor::new(&tokens))
    }

    // ── from ──────────────────────────────────────────────────────────────

    #[test]
    fn from_decodes_angle_and_percentage() {
        for (src, turns) in [("from 45deg", 0.125), ("from 50%", 0.5), ("from -0.25turn", -0.25)] {
            let tokens = Lexer::new(src).tokenize().unwrap();
            assert_eq!(from_clause(&mut Cursor::new(&tokens)).unwrap(), turns, "{src}");
        }
    }

    #[test]
    fn from_without_value_fails() {
        let tokens = Lexer::new("from red").tokenize().unwrap();
        assert_eq!(from_clause(&mut Cursor::new(&tokens)).unwrap_err().kind, ErrorKind::Syntax);
    }

    // ── at ────────────────────────────────────────────────────────────────

    #[test]
    fn at_center_alone() {
        assert_eq!(at("at center").unwrap(), Center::new(0.5, 0.5));
    }

    #[test]
    fn at_single_non_center_is_malformed() {
        let err = at("at left").unwrap_err();
        assert_eq!(err.kind, ErrorKind::Syntax);
        assert!(at("at 30%").is_err());
    }

    #[test]
    fn at_percentages_are_x_then_y() {
        assert_eq!(at("at 25% 75%").unwrap(), Center::new(0.25, 0.75));
    }

    #[test]
    fn at_keywords_reorder_to_x_y() {
        assert_eq!(at("at top left").unwrap(), Center::new(0.0, 0.0));
        assert_eq!(at("at left top").unwrap(), Center::new(0.0, 0.0));
        assert_eq!(at("at bottom 20%").unwrap(), Center::new(0.2, 1.0));
        assert_eq!(at("at 20% bottom").unwrap(), Center::new(0.2, 1.0));
        assert_eq!(at("at center right").unwrap(), Center::new(1.0, 0.5));
        assert_eq!(at("at 10% left").unwrap(), Center::new(0.0, 0.1));
    }

    #[test]
    fn at_same_axis_conflicts() {
        assert_eq!(at("at left right").unwrap_err().kind, ErrorKind::PositionConflict);
        assert_eq!(at("at top bottom").unwrap_err().kind, ErrorKind::PositionConflict);
        assert_eq!(at("at top top").unwrap_err().kind, ErrorKind::PositionConflict);
    }

    // ── standalone ────────────────────────────────────────────────────────

    #[test]
    fn standalone_parsers() {
        assert_eq!(parse_angle_percentage("90deg").unwrap(), 0.25);
        assert_eq!(parse_position("RIGHT Bottom").unwrap(), Center::new(1.0, 1.0));
        assert!(parse_angle_percentage("90deg 10%").is_err());
        assert!(parse_position("").is_err());
    }
}
