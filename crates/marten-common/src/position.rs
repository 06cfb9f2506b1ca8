//! Source positions attached to parse issues.

use std::fmt;

/// A location in the decoded input.
///
/// `line` and `column` are 1-based and count characters after newline
/// normalization; `offset` counts characters from the start of the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SourcePosition {
    /// Character offset from the start of the input.
    pub offset: usize,
    /// 1-based line number.
    pub line: usize,
    /// 1-based column number.
    pub column: usize,
}

impl SourcePosition {
    /// The position of the first character of the input.
    pub const START: Self = Self {
        offset: 0,
        line: 1,
        column: 1,
    };

    /// Advance past `c`, moving to the next line on LF.
    #[must_use]
    pub const fn advance(self, c: char) -> Self {
        if c == '\n' {
            Self {
                offset: self.offset + 1,
                line: self.line + 1,
                column: 1,
            }
        } else {
            Self {
                offset: self.offset + 1,
                line: self.line,
                column: self.column + 1,
            }
        }
    }
}

impl Default for SourcePosition {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for SourcePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn advance_tracks_lines_and_columns() {
        let pos = SourcePosition::START.advance('a').advance('\n').advance('b');
        assert_eq!(pos.offset, 3);
        assert_eq!(pos.line, 2);
        assert_eq!(pos.column, 2);
        assert_eq!(pos.to_string(), "2:2");
    }
}
