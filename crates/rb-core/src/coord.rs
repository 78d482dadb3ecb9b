//! Integer grid coordinates.
//!
//! The planning domain never sees fractional positions; pixel or world
//! positions belong to whatever renders the simulation.

use std::fmt;

/// A grid cell address.  Ordered by `(col, row)` so it can key a `BTreeMap`.
///
/// Signed so that neighbours of edge cells can be formed before the bounds
/// check rejects them.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coord {
    pub col: i32,
    pub row: i32,
}

impl Coord {
    #[inline]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    /// Manhattan distance: the A* heuristic for 4-directional movement.
    #[inline]
    pub fn manhattan(self, other: Coord) -> u32 {
        self.col.abs_diff(other.col) + self.row.abs_diff(other.row)
    }

    /// The four orthogonal neighbours in fixed visitation order:
    /// right, down, left, up.
    ///
    /// The planner's tie-breaking depends on this order staying stable.
    #[inline]
    pub fn neighbours(self) -> [Coord; 4] {
        [
            Coord::new(self.col + 1, self.row),
            Coord::new(self.col, self.row + 1),
            Coord::new(self.col - 1, self.row),
            Coord::new(self.col, self.row - 1),
        ]
    }

    /// `true` if `other` is exactly one orthogonal step away.
    #[inline]
    pub fn is_adjacent(self, other: Coord) -> bool {
        self.manhattan(other) == 1
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

impl From<(i32, i32)> for Coord {
    #[inline]
    fn from((col, row): (i32, i32)) -> Self {
        Coord::new(col, row)
    }
}
