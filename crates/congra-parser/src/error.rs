use std::fmt;

/// Failure category for a conic-gradient parse.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// The input does not match the gradient grammar (wrong function name,
    /// unbalanced parentheses, unknown unit, stray token, ...).
    Syntax,
    /// The color-stop list is absent or has no entries.
    EmptyStopList,
    /// The first or last stop has no color, two lone hints are adjacent, or
    /// the list has fewer than two entries.
    InvalidStopShape,
    /// The `at` clause names the same axis twice (`at left right`).
    PositionConflict,
    /// A named color missed the lookup table.
    UnknownColor,
    /// More color stops than the renderer's fixed capacity.
    TooManyStops,
}

impl ErrorKind {
    /// Stable machine-readable name, used in reports.
    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::Syntax           => "syntax",
            ErrorKind::EmptyStopList    => "empty-stop-list",
            ErrorKind::InvalidStopShape => "invalid-stop-shape",
            ErrorKind::PositionConflict => "position-conflict",
            ErrorKind::UnknownColor     => "unknown-color",
            ErrorKind::TooManyStops     => "too-many-stops",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A parse error from a gradient or value string.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub kind: ErrorKind,
    pub message: String,
    /// Byte offset into the source where the error was detected.
    pub offset: usize,
}

impl ParseError {
    pub(crate) fn new(kind: ErrorKind, msg: impl Into<String>, offset: usize) -> Self {
        Self { kind, message: msg.into(), offset }
    }

    pub(crate) fn syntax(msg: impl Into<String>, offset: usize) -> Self {
        Self::new(ErrorKind::Syntax, msg, offset)
    }

    /// Re-anchors an error produced without source context (e.g. a color
    /// decode) at `offset`.
    pub(crate) fn at(mut self, offset: usize) -> Self {
        self.offset = offset;
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "conic-gradient parse error ({}) at byte {}: {}",
            self.kind, self.offset, self.message
        )
    }
}

impl std::error::Error for ParseError {}
