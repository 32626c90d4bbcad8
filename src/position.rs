//! Source positions.
//!
//! Every token and AST node in this crate carries a `Position`. Unlike the
//! byte-range spans used by lossless syntax trees, positions here are the
//! explicit `(line, column)` pairs the spec's diagnostics are keyed on.

use std::fmt;

/// A one-based line and column into the original source.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Position {
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub const fn new(line: u32, column: u32) -> Self {
        Self { line, column }
    }

    /// The sentinel position used by the return-value diagnostic; see
    /// `analyze::type_analysis` for why this exists instead of the
    /// enclosing function's real position.
    pub const ZERO: Position = Position::new(0, 0);
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}
