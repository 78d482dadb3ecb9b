//! Path planning trait and the default A* implementation.
//!
//! # Pluggability
//!
//! The coordinator calls planning through the [`PathPlanner`] trait, so a
//! different search (jump point search, weighted costs) can be swapped in
//! without touching `rb-control`.  The default [`AStarPlanner`] searches a
//! 4-connected grid with unit step cost and a Manhattan heuristic.
//!
//! # Determinism
//!
//! For fixed extents, obstacles, origin and destination the returned plan is
//! always the same.  The open set is ordered by `(f, h, insertion sequence)`
//! and neighbours are expanded right, down, left, up
//! ([`Coord::neighbours`]), so ties among equal-cost paths always resolve
//! the same way.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rb_core::Coord;

use crate::{Grid, SpatialError, SpatialResult};

#[cfg(feature = "fx-hash")]
type CellSet = rustc_hash::FxHashSet<Coord>;
#[cfg(not(feature = "fx-hash"))]
type CellSet = std::collections::HashSet<Coord>;

// ── ObstacleSet ───────────────────────────────────────────────────────────────

/// Cells temporarily excluded from traversal.
///
/// Rebuilt for every query: cleared, filled from the grid's collidables,
/// then the query's own destination is removed so a blocked target cell can
/// still be reached.
#[derive(Clone, Debug, Default)]
pub struct ObstacleSet {
    cells: CellSet,
}

impl ObstacleSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.cells.clear();
    }

    pub fn insert(&mut self, cell: Coord) -> bool {
        self.cells.insert(cell)
    }

    /// Unblock a single cell.
    pub fn remove(&mut self, cell: Coord) -> bool {
        self.cells.remove(&cell)
    }

    #[inline]
    pub fn contains(&self, cell: Coord) -> bool {
        self.cells.contains(&cell)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl Extend<Coord> for ObstacleSet {
    fn extend<I: IntoIterator<Item = Coord>>(&mut self, iter: I) {
        self.cells.extend(iter);
    }
}

impl FromIterator<Coord> for ObstacleSet {
    fn from_iter<I: IntoIterator<Item = Coord>>(iter: I) -> Self {
        Self { cells: iter.into_iter().collect() }
    }
}

// ── Plan ──────────────────────────────────────────────────────────────────────

/// The result of a path query: cells from origin to destination inclusive.
///
/// An empty plan means the destination is unreachable.  A single-cell plan
/// means origin and destination coincide.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Plan {
    pub cells: Vec<Coord>,
}

impl Plan {
    /// The "unreachable" plan.
    pub fn empty() -> Self {
        Self::default()
    }

    /// `true` if no path was found.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Number of moves (cells after the origin).
    #[inline]
    pub fn steps(&self) -> usize {
        self.cells.len().saturating_sub(1)
    }

    pub fn origin(&self) -> Option<Coord> {
        self.cells.first().copied()
    }

    pub fn destination(&self) -> Option<Coord> {
        self.cells.last().copied()
    }

    /// Convert to a robot's path stack: destination at index 0, the next
    /// step at the end (`Vec::last` / `Vec::pop`), origin dropped.
    pub fn into_stack(mut self) -> Vec<Coord> {
        if !self.cells.is_empty() {
            self.cells.remove(0);
        }
        self.cells.reverse();
        self.cells
    }
}

// ── PathPlanner trait ─────────────────────────────────────────────────────────

/// Pluggable grid search.
///
/// Implementations must be `Send + Sync` so candidate destinations can be
/// searched on Rayon's pool (the `parallel` feature of `rb-control`).
pub trait PathPlanner: Send + Sync {
    /// Shortest path from `origin` to `destination` avoiding `obstacles`.
    ///
    /// Returns `Ok(Plan::empty())` if the destination is unreachable.  The
    /// origin is never treated as blocked.
    ///
    /// # Errors
    ///
    /// [`SpatialError::OutOfBounds`] if either endpoint lies outside the
    /// planner's world.
    fn find_path(
        &self,
        origin:      Coord,
        destination: Coord,
        obstacles:   &ObstacleSet,
    ) -> SpatialResult<Plan>;
}

// ── AStarPlanner ──────────────────────────────────────────────────────────────

/// A* over a `columns x rows` world: 4-directional, unit cost, Manhattan
/// heuristic.
#[derive(Clone, Debug)]
pub struct AStarPlanner {
    columns: u32,
    rows:    u32,
}

impl AStarPlanner {
    pub fn new(columns: u32, rows: u32) -> Self {
        Self { columns, rows }
    }

    /// A planner sized to `grid`.
    pub fn for_grid(grid: &Grid) -> Self {
        Self::new(grid.columns(), grid.rows())
    }

    #[inline]
    fn contains(&self, c: Coord) -> bool {
        c.col >= 0 && c.row >= 0 && (c.col as u32) < self.columns && (c.row as u32) < self.rows
    }

    #[inline]
    fn index(&self, c: Coord) -> usize {
        c.row as usize * self.columns as usize + c.col as usize
    }

    #[inline]
    fn coord(&self, i: usize) -> Coord {
        let cols = self.columns as usize;
        Coord::new((i % cols) as i32, (i / cols) as i32)
    }

    fn check(&self, c: Coord) -> SpatialResult<()> {
        if self.contains(c) {
            Ok(())
        } else {
            Err(SpatialError::OutOfBounds { coord: c, columns: self.columns, rows: self.rows })
        }
    }
}

impl PathPlanner for AStarPlanner {
    fn find_path(
        &self,
        origin:      Coord,
        destination: Coord,
        obstacles:   &ObstacleSet,
    ) -> SpatialResult<Plan> {
        self.check(origin)?;
        self.check(destination)?;
        Ok(astar(self, origin, destination, obstacles))
    }
}

// ── A* internals ──────────────────────────────────────────────────────────────

/// Sentinel for "no predecessor".
const NO_PREV: usize = usize::MAX;

fn astar(planner: &AStarPlanner, origin: Coord, destination: Coord, obstacles: &ObstacleSet) -> Plan {
    if origin == destination {
        return Plan { cells: vec![origin] };
    }

    let n = planner.columns as usize * planner.rows as usize;
    // g[v] = best known step count to reach v.
    let mut g      = vec![u32::MAX; n];
    let mut prev   = vec![NO_PREV; n];
    let mut closed = vec![false; n];

    g[planner.index(origin)] = 0;

    // Min-heap on (f, h, seq).  Preferring lower h among equal f expands
    // toward the goal first; seq makes the order total and reproducible.
    let mut heap: BinaryHeap<Reverse<(u32, u32, u64, Coord)>> = BinaryHeap::new();
    let mut seq: u64 = 0;
    let h0 = origin.manhattan(destination);
    heap.push(Reverse((h0, h0, seq, origin)));

    while let Some(Reverse((_, _, _, node))) = heap.pop() {
        let ni = planner.index(node);
        if closed[ni] {
            continue;
        }
        closed[ni] = true;

        if node == destination {
            return reconstruct(planner, &prev, destination);
        }

        for next in node.neighbours() {
            if !planner.contains(next) {
                continue;
            }
            if next != destination && obstacles.contains(next) {
                continue;
            }
            let xi = planner.index(next);
            if closed[xi] {
                continue;
            }
            let cost = g[ni] + 1;
            if cost < g[xi] {
                g[xi] = cost;
                prev[xi] = ni;
                seq += 1;
                let h = next.manhattan(destination);
                heap.push(Reverse((cost + h, h, seq, next)));
            }
        }
    }

    Plan::empty()
}

fn reconstruct(planner: &AStarPlanner, prev: &[usize], destination: Coord) -> Plan {
    let mut cells = vec![destination];
    let mut cur = planner.index(destination);
    while prev[cur] != NO_PREV {
        cur = prev[cur];
        cells.push(planner.coord(cur));
    }
    cells.reverse();
    Plan { cells }
}
