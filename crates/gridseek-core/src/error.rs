//! Error types for grid construction and input validation.
//!
//! Every variant is an input-validation failure detected before any
//! engine touches the data. Engines themselves have no error path.

use std::error::Error;
use std::fmt;

/// Errors arising from grid construction, parsing, or pairing a
/// pattern with a matrix.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// The grid has zero rows, or a row of zero length.
    EmptyGrid,
    /// Row lengths within a grid differ.
    RaggedGrid {
        /// Index of the first row whose length disagrees with row 0.
        row: usize,
        /// Length of row 0.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// The pattern is taller or wider than the matrix.
    InvalidDimensions {
        /// Pattern `(height, width)`.
        pattern: (usize, usize),
        /// Matrix `(height, width)`.
        matrix: (usize, usize),
    },
    /// A token in textual grid input is not an integer.
    Parse {
        /// 1-based line number of the offending token.
        line: usize,
        /// The token that failed to parse.
        token: String,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid must have at least one row and one column"),
            Self::RaggedGrid {
                row,
                expected,
                found,
            } => {
                write!(f, "row {row} has length {found}, expected {expected}")
            }
            Self::InvalidDimensions { pattern, matrix } => {
                write!(
                    f,
                    "pattern {}x{} does not fit in matrix {}x{}",
                    pattern.0, pattern.1, matrix.0, matrix.1
                )
            }
            Self::Parse { line, token } => {
                write!(f, "line {line}: '{token}' is not an integer")
            }
        }
    }
}

impl Error for GridError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ragged_display_names_row() {
        let e = GridError::RaggedGrid {
            row: 2,
            expected: 3,
            found: 1,
        };
        assert_eq!(e.to_string(), "row 2 has length 1, expected 3");
    }

    #[test]
    fn invalid_dimensions_display() {
        let e = GridError::InvalidDimensions {
            pattern: (3, 1),
            matrix: (2, 2),
        };
        let msg = e.to_string();
        assert!(msg.contains("3x1"));
        assert!(msg.contains("2x2"));
    }
}
