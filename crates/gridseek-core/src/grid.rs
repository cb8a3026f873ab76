//! Rectangular integer grids, anchors, and validated matrix/pattern pairs.

use std::fmt;
use std::str::FromStr;

use crate::error::GridError;

/// Immutable rectangular matrix of integers.
///
/// Stored row-major in a single flat buffer. Construction guarantees
/// `height >= 1`, `width >= 1`, and that every row has length `width`.
/// The same type is used for the haystack matrix and the needle pattern.
///
/// # Examples
///
/// ```
/// use gridseek_core::Grid;
///
/// let g: Grid = "1 2 3\n4 5 6".parse().unwrap();
/// assert_eq!(g.height(), 2);
/// assert_eq!(g.width(), 3);
/// assert_eq!(g.row(1), &[4, 5, 6]);
/// assert_eq!(g.get(0, 2), 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Grid {
    cells: Vec<i64>,
    height: usize,
    width: usize,
}

impl Grid {
    /// Build a grid from owned rows.
    ///
    /// # Errors
    ///
    /// [`GridError::EmptyGrid`] if there are no rows or row 0 is empty,
    /// [`GridError::RaggedGrid`] if any row's length differs from row 0.
    pub fn new(rows: Vec<Vec<i64>>) -> Result<Self, GridError> {
        let width = rows.first().map_or(0, Vec::len);
        if width == 0 {
            return Err(GridError::EmptyGrid);
        }
        let height = rows.len();
        let mut cells = Vec::with_capacity(height * width);
        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != width {
                return Err(GridError::RaggedGrid {
                    row: i,
                    expected: width,
                    found: row.len(),
                });
            }
            cells.extend(row);
        }
        Ok(Self {
            cells,
            height,
            width,
        })
    }

    /// Build a grid from borrowed row slices.
    pub fn from_rows(rows: &[&[i64]]) -> Result<Self, GridError> {
        Self::new(rows.iter().map(|r| r.to_vec()).collect())
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// `(height, width)`.
    pub fn dims(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Total number of cells.
    pub fn area(&self) -> usize {
        self.cells.len()
    }

    /// Row `r` as a slice. Panics if `r >= height`.
    #[inline]
    pub fn row(&self, r: usize) -> &[i64] {
        let start = r * self.width;
        &self.cells[start..start + self.width]
    }

    /// Value at `(r, c)`. Panics if out of bounds.
    #[inline]
    pub fn get(&self, r: usize, c: usize) -> i64 {
        debug_assert!(c < self.width, "column {c} out of range {}", self.width);
        self.cells[r * self.width + c]
    }

    /// Iterate over rows top to bottom.
    pub fn rows(&self) -> impl ExactSizeIterator<Item = &[i64]> + '_ {
        self.cells.chunks_exact(self.width)
    }

    /// Sum of every cell, with wrapping on overflow.
    pub fn sum(&self) -> i64 {
        self.cells.iter().fold(0i64, |acc, &v| acc.wrapping_add(v))
    }
}

impl TryFrom<Vec<Vec<i64>>> for Grid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<i64>>) -> Result<Self, Self::Error> {
        Self::new(rows)
    }
}

/// Parses whitespace-separated integers, one grid row per line.
///
/// Blank lines are skipped, so trailing newlines and spacer lines are
/// harmless. Line numbers in [`GridError::Parse`] are 1-based and count
/// blank lines.
impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows = Vec::new();
        for (idx, line) in s.lines().enumerate() {
            if line.trim().is_empty() {
                continue;
            }
            let row = line
                .split_whitespace()
                .map(|tok| {
                    tok.parse::<i64>().map_err(|_| GridError::Parse {
                        line: idx + 1,
                        token: tok.to_string(),
                    })
                })
                .collect::<Result<Vec<_>, _>>()?;
            rows.push(row);
        }
        Self::new(rows)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.rows().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            for (j, v) in row.iter().enumerate() {
                if j > 0 {
                    write!(f, " ")?;
                }
                write!(f, "{v}")?;
            }
        }
        Ok(())
    }
}

/// Top-left anchor of a candidate pattern placement within the matrix.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    /// Matrix row of the pattern's top edge.
    pub row: usize,
    /// Matrix column of the pattern's left edge.
    pub col: usize,
}

impl Position {
    /// Construct an anchor.
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

impl From<(usize, usize)> for Position {
    fn from((row, col): (usize, usize)) -> Self {
        Self { row, col }
    }
}

/// A matrix/pattern pair that has passed dimension validation.
///
/// Holding a `MatchInput` proves the pattern fits inside the matrix, so
/// at least one anchor exists and every engine scan is total.
#[derive(Clone, Copy, Debug)]
pub struct MatchInput<'a> {
    matrix: &'a Grid,
    pattern: &'a Grid,
}

impl<'a> MatchInput<'a> {
    /// Pair a matrix with a pattern.
    ///
    /// # Errors
    ///
    /// [`GridError::InvalidDimensions`] if the pattern is taller or wider
    /// than the matrix.
    pub fn new(matrix: &'a Grid, pattern: &'a Grid) -> Result<Self, GridError> {
        if pattern.height() > matrix.height() || pattern.width() > matrix.width() {
            return Err(GridError::InvalidDimensions {
                pattern: pattern.dims(),
                matrix: matrix.dims(),
            });
        }
        Ok(Self { matrix, pattern })
    }

    /// The haystack.
    pub fn matrix(&self) -> &'a Grid {
        self.matrix
    }

    /// The needle.
    pub fn pattern(&self) -> &'a Grid {
        self.pattern
    }

    /// Number of valid anchor rows: `H - h + 1`.
    pub fn anchor_rows(&self) -> usize {
        self.matrix.height() - self.pattern.height() + 1
    }

    /// Number of valid anchor columns: `W - w + 1`.
    pub fn anchor_cols(&self) -> usize {
        self.matrix.width() - self.pattern.width() + 1
    }

    /// Total number of valid anchors.
    pub fn anchor_count(&self) -> usize {
        self.anchor_rows() * self.anchor_cols()
    }
}
