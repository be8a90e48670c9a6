use crate::error::ParseError;

// ── Token ─────────────────────────────────────────────────────────────────

/// A lexeme of the gradient value grammar.
///
/// Identifiers, function names, and units are ASCII-lowercased at lex time,
/// which is what makes every keyword match case-insensitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Token {
    // Words
    Ident(String),
    /// An identifier immediately followed by `(`, e.g. `rgba(`.
    Function(String),
    // Numerics
    Number(f64),
    /// Raw percentage value: `50%` lexes as `Percentage(50.0)`.
    Percentage(f64),
    /// A number with a unit suffix: `45deg` lexes as `Dimension(45.0, "deg")`.
    Dimension(f64, String),
    /// `#` followed by alphanumerics; validated as hex by the color grammar.
    Hash(String),
    // Punctuation
    Comma,
    LParen,
    RParen,
    // Sentinel
    Eof,
}

/// A token with the byte offset where it starts in the source.
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned {
    pub token: Token,
    pub offset: usize,
}

// ── Lexer ─────────────────────────────────────────────────────────────────

pub struct Lexer<'s> {
    src: &'s str,
    pos: usize,
}

impl<'s> Lexer<'s> {
    pub fn new(src: &'s str) -> Self {
        Self { src, pos: 0 }
    }

    /// Lexes the whole source. The returned vector always ends with `Eof`.
    pub fn tokenize(mut self) -> Result<Vec<Spanned>, ParseError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace();
            let offset = self.pos;
            let token = self.next_token()?;
            let eof = token == Token::Eof;
            tokens.push(Spanned { token, offset });
            if eof {
                break;
            }
        }
        Ok(tokens)
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.src[self.pos..].chars().nth(n)
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.src[self.pos..].chars().next()?;
        self.pos += ch.len_utf8();
        Some(ch)
    }

    fn skip_whitespace(&mut self) {
        while matches!(self.peek(), Some(c) if c.is_whitespace()) {
            self.advance();
        }
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
        let mut count = 0;
        while matches!(self.peek(), Some(c) if pred(c)) {
            self.advance();
            count += 1;
        }
        count
    }

    /// True when the upcoming characters begin a number: `5`, `.5`, `-5`, `+.5`.
    fn at_number_start(&self) -> bool {
        let digit_at = |n: usize| self.peek_nth(n).is_some_and(|c| c.is_ascii_digit());
        match self.peek() {
            Some(c) if c.is_ascii_digit() => true,
            Some('.') => digit_at(1),
            Some('+' | '-') => digit_at(1) || (self.peek_nth(1) == Some('.') && digit_at(2)),
            _ => false,
        }
    }

    fn next_token(&mut self) -> Result<Token, ParseError> {
        let ch = match self.peek() {
            None => return Ok(Token::Eof),
            Some(c) => c,
        };

        match ch {
            ',' => { self.advance(); Ok(Token::Comma) }
            '(' => { self.advance(); Ok(Token::LParen) }
            ')' => { self.advance(); Ok(Token::RParen) }
            '#' => self.lex_hash(),
            _ if self.at_number_start() => self.lex_numeric(),
            '-' if matches!(self.peek_nth(1), Some(c) if is_ident_start(c)) => {
                Ok(self.lex_ident_or_function())
            }
            c if is_ident_start(c) => Ok(self.lex_ident_or_function()),
            other => Err(ParseError::syntax(
                format!("unexpected character {:?}", other),
                self.pos,
            )),
        }
    }

    fn lex_hash(&mut self) -> Result<Token, ParseError> {
        let start = self.pos;
        self.advance(); // consume `#`
        let body = self.pos;
        if self.eat_while(|c| c.is_ascii_alphanumeric()) == 0 {
            return Err(ParseError::syntax("expected hex digits after '#'", start));
        }
        Ok(Token::Hash(self.src[body..self.pos].to_ascii_lowercase()))
    }

    fn lex_numeric(&mut self) -> Result<Token, ParseError> {
        let start = self.pos;
        if matches!(self.peek(), Some('+' | '-')) {
            self.advance();
        }
        self.eat_while(|c| c.is_ascii_digit());
        if self.peek() == Some('.') && self.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
            self.eat_while(|c| c.is_ascii_digit());
        }
        // Exponent only when digits follow, so `2em`-style units stay units.
        if matches!(self.peek(), Some('e' | 'E')) {
            let signed = matches!(self.peek_nth(1), Some('+' | '-'));
            let digit_idx = if signed { 2 } else { 1 };
            if self.peek_nth(digit_idx).is_some_and(|c| c.is_ascii_digit()) {
                for _ in 0..digit_idx {
                    self.advance();
                }
                self.eat_while(|c| c.is_ascii_digit());
            }
        }

        let text = &self.src[start..self.pos];
        let value: f64 = text
            .parse()
            .map_err(|_| ParseError::syntax(format!("invalid number {:?}", text), start))?;
        if !value.is_finite() {
            return Err(ParseError::syntax(format!("number {:?} is out of range", text), start));
        }

        if self.peek() == Some('%') {
            self.advance();
            return Ok(Token::Percentage(value));
        }
        if matches!(self.peek(), Some(c) if c.is_ascii_alphabetic()) {
            let unit_start = self.pos;
            self.eat_while(|c| c.is_ascii_alphanumeric());
            let unit = self.src[unit_start..self.pos].to_ascii_lowercase();
            return Ok(Token::Dimension(value, unit));
        }
        Ok(Token::Number(value))
    }

    fn lex_ident_or_function(&mut self) -> Token {
        let start = self.pos;
        self.eat_while(|c| c.is_alphanumeric() || c == '-' || c == '_');
        let word = self.src[start..self.pos].to_ascii_lowercase();
        if self.peek() == Some('(') {
            self.advance();
            Token::Function(word)
        } else {
            Token::Ident(word)
        }
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lex(src: &str) -> Vec<Token> {
        Lexer::new(src).tokenize().unwrap().into_iter().map(|s| s.token).collect()
    }

    #[test]
    fn gradient_head() {
        assert_eq!(
            lex("Repeating-Conic-Gradient(from 45DEG,"),
            vec![
                Token::Function("repeating-conic-gradient".into()),
                Token::Ident("from".into()),
                Token::Dimension(45.0, "deg".into()),
                Token::Comma,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn numerics() {
        assert_eq!(
            lex("1 -2.5 .5 +3% 1e2 2.5e-1turn"),
            vec![
                Token::Number(1.0),
                Token::Number(-2.5),
                Token::Number(0.5),
                Token::Percentage(3.0),
                Token::Number(100.0),
                Token::Dimension(0.25, "turn".into()),
                Token::Eof,
            ]
        );
    }

    #[test]
    fn unit_starting_with_e_is_not_an_exponent() {
        assert_eq!(lex("2em"), vec![Token::Dimension(2.0, "em".into()), Token::Eof]);
    }

    #[test]
    fn hash_and_function_args() {
        assert_eq!(
            lex("#FFF rgba(0,0,255,0.7)"),
            vec![
                Token::Hash("fff".into()),
                Token::Function("rgba".into()),
                Token::Number(0.0),
                Token::Comma,
                Token::Number(0.0),
                Token::Comma,
                Token::Number(255.0),
                Token::Comma,
                Token::Number(0.7),
                Token::RParen,
                Token::Eof,
            ]
        );
    }

    #[test]
    fn offsets_point_at_token_start() {
        let toks = Lexer::new("  red ,blue").tokenize().unwrap();
        let offsets: Vec<usize> = toks.iter().map(|t| t.offset).collect();
        assert_eq!(offsets, vec![2, 6, 7, 11]);
    }

    #[test]
    fn space_before_paren_is_not_a_function() {
        assert_eq!(
            lex("rgb (1,2,3)")[..2],
            [Token::Ident("rgb".into()), Token::LParen]
        );
    }

    #[test]
    fn stray_character_is_rejected() {
        let err = Lexer::new("red; blue").tokenize().unwrap_err();
        assert_eq!(err.kind, crate::ErrorKind::Syntax);
        assert_eq!(err.offset, 3);
    }

    #[test]
    fn overflowing_number_is_rejected() {
        let err = Lexer::new("red 1e400%").tokenize().unwrap_err();
        assert_eq!(err.kind, crate::ErrorKind::Syntax);
        assert_eq!(err.offset, 4);
        let err = crate::parse_conic_gradient("conic-gradient(from 1e999deg, red, blue)").unwrap_err();
        assert_eq!(err.kind, crate::ErrorKind::Syntax);
        assert_eq!(err.offset, 20);
    }

    #[test]
    fn bare_hash_is_rejected() {
        assert!(Lexer::new("# red").tokenize().is_err());
    }
}
