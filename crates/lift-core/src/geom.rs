//! Geometry primitives: [`Coord`] and [`Range`].
//!
//! A building is addressed by floor and room, so coordinates are
//! `(row, col)` pairs rather than screen-style `(x, y)` points.

use std::fmt;
use std::str::FromStr;

// ---------------------------------------------------------------------------
// Coord
// ---------------------------------------------------------------------------

/// A zero-based grid coordinate. `row` is the floor, `col` the room.
///
/// Coordinates are signed so that requests outside the grid (including
/// negative ones) can be expressed and rejected instead of wrapping.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    #[cfg_attr(feature = "serde", serde(alias = "floor"))]
    pub row: i32,
    #[cfg_attr(feature = "serde", serde(alias = "room"))]
    pub col: i32,
}

impl Coord {
    /// Origin (0, 0).
    pub const ZERO: Self = Self { row: 0, col: 0 };

    /// Create a new coordinate.
    #[inline]
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Return a coordinate shifted by (drow, dcol).
    #[inline]
    pub const fn shift(self, drow: i32, dcol: i32) -> Self {
        Self {
            row: self.row + drow,
            col: self.col + dcol,
        }
    }

    /// The four orthogonal neighbours in scan order: up, down, left, right.
    ///
    /// "Up" is `row - 1`. The order is part of the routing contract: among
    /// equal-cost routes, the one discovered first in this order wins.
    #[inline]
    pub const fn neighbors_4(self) -> [Coord; 4] {
        [
            self.shift(-1, 0),
            self.shift(1, 0),
            self.shift(0, -1),
            self.shift(0, 1),
        ]
    }

    /// Whether `other` is exactly one orthogonal step away.
    #[inline]
    pub fn is_adjacent(self, other: Coord) -> bool {
        matches!(
            (self.row.abs_diff(other.row), self.col.abs_diff(other.col)),
            (0, 1) | (1, 0)
        )
    }
}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coord {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.row, self.col)
    }
}

/// Error returned when parsing a [`Coord`] from text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid cell {0:?}: expected <row>:<col>")]
pub struct ParseCoordError(String);

impl FromStr for Coord {
    type Err = ParseCoordError;

    /// Parse the `row:col` form produced by `Display`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseCoordError(s.to_string());
        let (row, col) = s.trim().split_once(':').ok_or_else(err)?;
        Ok(Self::new(
            row.trim().parse().map_err(|_| err())?,
            col.trim().parse().map_err(|_| err())?,
        ))
    }
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// A half-open rectangle \[min, max). `min` is inclusive, `max` is exclusive.
///
/// All empty ranges are considered equal.
#[derive(Copy, Clone, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub min: Coord,
    pub max: Coord,
}

impl PartialEq for Range {
    fn eq(&self, other: &Self) -> bool {
        (self.min == other.min && self.max == other.max) || (self.is_empty() && other.is_empty())
    }
}

impl Eq for Range {}

impl Range {
    /// Create a new range from two corners, canonicalized so that
    /// `min` ≤ `max` on each axis.
    #[inline]
    pub fn new(row0: i32, col0: i32, row1: i32, col1: i32) -> Self {
        Self {
            min: Coord::new(row0.min(row1), col0.min(col1)),
            max: Coord::new(row0.max(row1), col0.max(col1)),
        }
    }

    /// Number of rows.
    #[inline]
    pub fn height(self) -> i32 {
        self.max.row - self.min.row
    }

    /// Number of columns.
    #[inline]
    pub fn width(self) -> i32 {
        self.max.col - self.min.col
    }

    /// Total number of cells in the range.
    #[inline]
    pub fn len(self) -> usize {
        if self.is_empty() {
            return 0;
        }
        (self.width() as usize) * (self.height() as usize)
    }

    /// Whether the range has zero or negative area.
    #[inline]
    pub fn is_empty(self) -> bool {
        self.min.row >= self.max.row || self.min.col >= self.max.col
    }

    /// Whether `c` is inside the half-open range.
    #[inline]
    pub fn contains(self, c: Coord) -> bool {
        c.row >= self.min.row && c.row < self.max.row && c.col >= self.min.col && c.col < self.max.col
    }

    /// Row-major flat index of `c`, or `None` if it lies outside.
    #[inline]
    pub fn index(self, c: Coord) -> Option<usize> {
        if !self.contains(c) {
            return None;
        }
        let row = (c.row - self.min.row) as usize;
        let col = (c.col - self.min.col) as usize;
        Some(row * self.width() as usize + col)
    }

    /// Row-major iterator over every coordinate in the range.
    #[inline]
    pub fn iter(self) -> RangeIter {
        RangeIter {
            range: self,
            cur: self.min,
        }
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}-{})", self.min, self.max)
    }
}

// ---------------------------------------------------------------------------
// RangeIter
// ---------------------------------------------------------------------------

/// Row-major iterator over the coordinates in a [`Range`].
#[derive(Clone, Debug)]
pub struct RangeIter {
    range: Range,
    cur: Coord,
}

impl Iterator for RangeIter {
    type Item = Coord;

    #[inline]
    fn next(&mut self) -> Option<Coord> {
        if self.cur.row >= self.range.max.row || self.range.is_empty() {
            return None;
        }
        let c = self.cur;
        self.cur.col += 1;
        if self.cur.col >= self.range.max.col {
            self.cur.col = self.range.min.col;
            self.cur.row += 1;
        }
        Some(c)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.range.is_empty() || self.cur.row >= self.range.max.row {
            return (0, Some(0));
        }
        let w = self.range.width() as usize;
        let remaining_in_row = (self.range.max.col - self.cur.col) as usize;
        let remaining_rows = (self.range.max.row - self.cur.row - 1) as usize;
        let total = remaining_in_row + remaining_rows * w;
        (total, Some(total))
    }
}

impl ExactSizeIterator for RangeIter {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn neighbors_scan_order() {
        let c = Coord::new(2, 2);
        assert_eq!(
            c.neighbors_4(),
            [
                Coord::new(1, 2),
                Coord::new(3, 2),
                Coord::new(2, 1),
                Coord::new(2, 3),
            ]
        );
    }

    #[test]
    fn adjacency() {
        let c = Coord::new(1, 1);
        for n in c.neighbors_4() {
            assert!(c.is_adjacent(n));
        }
        assert!(!c.is_adjacent(c));
        assert!(!c.is_adjacent(Coord::new(2, 2)));
        assert!(!c.is_adjacent(Coord::new(1, 3)));
    }

    #[test]
    fn adjacency_of_distant_coords() {
        let c = Coord::new(0, 0);
        assert!(!c.is_adjacent(Coord::new(i32::MIN, 0)));
        assert!(!Coord::new(i32::MAX, i32::MAX).is_adjacent(Coord::new(i32::MIN, i32::MIN)));
        assert!(Coord::new(i32::MIN, 0).is_adjacent(Coord::new(i32::MIN + 1, 0)));
    }

    #[test]
    fn coord_parses_display_form() {
        let c = Coord::new(3, 12);
        assert_eq!(c.to_string().parse::<Coord>(), Ok(c));
        assert_eq!(" 0 : 1 ".parse::<Coord>(), Ok(Coord::new(0, 1)));
        assert_eq!("-1:2".parse::<Coord>(), Ok(Coord::new(-1, 2)));
        assert!("3".parse::<Coord>().is_err());
        assert!("a:b".parse::<Coord>().is_err());
    }

    #[test]
    fn coord_orders_row_major() {
        let mut v = vec![Coord::new(1, 0), Coord::new(0, 2), Coord::new(0, 1)];
        v.sort();
        assert_eq!(v, vec![Coord::new(0, 1), Coord::new(0, 2), Coord::new(1, 0)]);
    }

    #[test]
    fn range_basics() {
        let r = Range::new(0, 0, 2, 3);
        assert_eq!(r.height(), 2);
        assert_eq!(r.width(), 3);
        assert_eq!(r.len(), 6);
        assert!(r.contains(Coord::new(1, 2)));
        assert!(!r.contains(Coord::new(2, 0)));
        assert!(!r.contains(Coord::new(0, -1)));
    }

    #[test]
    fn range_index_follows_iteration_order() {
        let r = Range::new(0, 0, 3, 4);
        for (i, c) in r.iter().enumerate() {
            assert_eq!(r.index(c), Some(i));
        }
        assert_eq!(r.index(Coord::new(3, 0)), None);
    }

    #[test]
    fn range_iter_size_hint() {
        let r = Range::new(0, 0, 2, 3);
        let mut it = r.iter();
        assert_eq!(it.len(), 6);
        it.next();
        assert_eq!(it.len(), 5);
        assert_eq!(it.count(), 5);
    }

    #[test]
    fn empty_ranges_compare_equal() {
        let a = Range::new(0, 0, 0, 5);
        let b = Range::new(0, 0, 4, 0);
        assert!(a.is_empty());
        assert_eq!(a, b);
        assert_eq!(a.len(), 0);
        assert_eq!(a.iter().count(), 0);
    }
}

#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    #[test]
    fn coord_accepts_floor_and_room_names() {
        let a: Coord = serde_json::from_str(r#"{"row": 2, "col": 1}"#).unwrap();
        let b: Coord = serde_json::from_str(r#"{"floor": 2, "room": 1}"#).unwrap();
        assert_eq!(a, Coord::new(2, 1));
        assert_eq!(a, b);
    }
}
