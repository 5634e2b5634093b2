//! The [`CostGrid`] type: a rectangular grid of per-cell traversal costs.
//!
//! A cell value of `0` is impassable; any positive value is the cost paid
//! when a route moves *into* that cell. The grid is immutable once built, so
//! a single instance can back any number of concurrent readers.

use crate::geom::{Coord, Range};

/// Cost value meaning "no way through this cell".
pub const IMPASSABLE: u32 = 0;

/// Errors raised while constructing a [`CostGrid`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GridError {
    /// A row's length differs from the first row's.
    #[error("grid is not rectangular: row {row} has {found} cells, expected {expected}")]
    Ragged {
        row: usize,
        expected: usize,
        found: usize,
    },
    /// The grid does not fit in signed 32-bit coordinates.
    #[error("grid of {rows}x{cols} cells is too large")]
    TooLarge { rows: usize, cols: usize },
}

/// A rectangular, row-major grid of `u32` traversal costs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "Vec<Vec<u32>>", into = "Vec<Vec<u32>>")
)]
pub struct CostGrid {
    cells: Vec<u32>,
    bounds: Range,
}

impl CostGrid {
    /// Create a `rows` × `cols` grid where every cell is impassable.
    pub fn new(rows: usize, cols: usize) -> Result<Self, GridError> {
        Self::filled(rows, cols, IMPASSABLE)
    }

    /// Create a `rows` × `cols` grid where every cell has cost `value`.
    pub fn filled(rows: usize, cols: usize, value: u32) -> Result<Self, GridError> {
        let bounds = checked_bounds(rows, cols)?;
        Ok(Self {
            cells: vec![value; bounds.len()],
            bounds,
        })
    }

    /// Create a grid by evaluating `f` at every coordinate, row-major.
    pub fn from_fn(
        rows: usize,
        cols: usize,
        mut f: impl FnMut(Coord) -> u32,
    ) -> Result<Self, GridError> {
        let bounds = checked_bounds(rows, cols)?;
        Ok(Self {
            cells: bounds.iter().map(&mut f).collect(),
            bounds,
        })
    }

    /// Build a grid from a sequence of rows.
    ///
    /// Every row must have the same length as the first one. No rows, or
    /// rows of length zero, give an empty grid.
    pub fn from_rows<I, R>(rows: I) -> Result<Self, GridError>
    where
        I: IntoIterator<Item = R>,
        R: AsRef<[u32]>,
    {
        let mut cells = Vec::new();
        let mut width = None;
        let mut height = 0usize;

        for (row, r) in rows.into_iter().enumerate() {
            let r = r.as_ref();
            let expected = *width.get_or_insert(r.len());
            if r.len() != expected {
                return Err(GridError::Ragged {
                    row,
                    expected,
                    found: r.len(),
                });
            }
            cells.extend_from_slice(r);
            height += 1;
        }

        let width = width.unwrap_or(0);
        if width == 0 {
            return Ok(Self::default());
        }
        let bounds = checked_bounds(height, width)?;
        Ok(Self { cells, bounds })
    }

    /// The bounding range of the grid.
    #[inline]
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Number of rows (floors).
    #[inline]
    pub fn rows(&self) -> usize {
        self.bounds.height() as usize
    }

    /// Number of columns (rooms per floor).
    #[inline]
    pub fn cols(&self) -> usize {
        self.bounds.width() as usize
    }

    /// Whether the grid has no cells at all.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bounds.is_empty()
    }

    /// Whether `c` lies inside the grid.
    #[inline]
    pub fn contains(&self, c: Coord) -> bool {
        self.bounds.contains(c)
    }

    /// The cost at `c`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, c: Coord) -> Option<u32> {
        self.bounds.index(c).map(|i| self.cells[i])
    }

    /// Whether `c` is inside the grid and has a positive cost.
    #[inline]
    pub fn is_passable(&self, c: Coord) -> bool {
        self.at(c).is_some_and(|v| v != IMPASSABLE)
    }

    /// Number of passable cells.
    pub fn passable_count(&self) -> usize {
        self.cells.iter().filter(|&&v| v != IMPASSABLE).count()
    }

    /// Row `row` as a slice, or `None` if out of bounds.
    pub fn row(&self, row: usize) -> Option<&[u32]> {
        if row >= self.rows() {
            return None;
        }
        let w = self.cols();
        Some(&self.cells[row * w..(row + 1) * w])
    }

    /// A copy of the grid with the row order reversed.
    ///
    /// Useful when the source data lists floors top-down but row 0 should be
    /// the ground floor.
    pub fn flipped(&self) -> Self {
        let w = self.cols();
        let mut cells = Vec::with_capacity(self.cells.len());
        if w > 0 {
            for r in self.cells.chunks(w).rev() {
                cells.extend_from_slice(r);
            }
        }
        Self {
            cells,
            bounds: self.bounds,
        }
    }

    /// Iterate over `(Coord, cost)` pairs in row-major order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (Coord, u32)> + '_ {
        self.bounds.iter().zip(self.cells.iter().copied())
    }
}

fn checked_bounds(rows: usize, cols: usize) -> Result<Range, GridError> {
    let too_large = || GridError::TooLarge { rows, cols };
    let r = i32::try_from(rows).map_err(|_| too_large())?;
    let c = i32::try_from(cols).map_err(|_| too_large())?;
    rows.checked_mul(cols).ok_or_else(too_large)?;
    Ok(Range::new(0, 0, r, c))
}

impl TryFrom<Vec<Vec<u32>>> for CostGrid {
    type Error = GridError;

    fn try_from(rows: Vec<Vec<u32>>) -> Result<Self, GridError> {
        Self::from_rows(rows)
    }
}

impl From<CostGrid> for Vec<Vec<u32>> {
    fn from(grid: CostGrid) -> Self {
        (0..grid.rows())
            .filter_map(|r| grid.row(r).map(<[u32]>::to_vec))
            .collect()
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn grid_reads_as_nested_rows() {
        let g: CostGrid = serde_json::from_str("[[1, 2], [0, 3]]").unwrap();
        assert_eq!(g.at(Coord::new(1, 1)), Some(3));
        assert_eq!(serde_json::to_string(&g).unwrap(), "[[1,2],[0,3]]");
    }

    #[test]
    fn ragged_json_is_rejected() {
        let err = serde_json::from_str::<CostGrid>("[[1, 2], [3]]").unwrap_err();
        assert!(err.to_string().contains("not rectangular"));
    }
}
