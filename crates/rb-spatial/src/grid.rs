//! The grid model: one `Cell` per coordinate plus the derived point sets.
//!
//! # Data layout
//!
//! Cells are stored densely in row-major order, so `Coord { col, row }` maps
//! to index `row * columns + col`.  The derived sets (`starts`, `ends`,
//! `packages`, `available_packages`) are `Vec`s kept free of duplicates:
//! their order is declaration order, and the coordinator depends on that
//! order for its first-found-wins tie-breaks.
//!
//! # Transient collidables
//!
//! `static_collidables` is a stack of cells the coordinator blocks for the
//! duration of one path query (a contested cell during a detour).  It is
//! pushed immediately before a query and popped right after, so outside of
//! a query it is always empty.

use std::collections::BTreeSet;
use std::fmt;

use rb_core::{Coord, SimRng};

use crate::{SpatialError, SpatialResult};

// ── Cell ──────────────────────────────────────────────────────────────────────

/// The state of one grid cell.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Cell {
    #[default]
    Empty,
    Package,
    Start,
    End,
    Blockade,
}

impl Cell {
    /// Character used by the text layout format.
    pub fn symbol(self) -> char {
        match self {
            Cell::Empty    => '.',
            Cell::Package  => 'P',
            Cell::Start    => 'S',
            Cell::End      => 'E',
            Cell::Blockade => '#',
        }
    }

    /// Inverse of [`Cell::symbol`].
    pub fn from_symbol(c: char) -> Option<Cell> {
        match c {
            '.' => Some(Cell::Empty),
            'P' => Some(Cell::Package),
            'S' => Some(Cell::Start),
            'E' => Some(Cell::End),
            '#' => Some(Cell::Blockade),
            _ => None,
        }
    }
}

// ── Grid ──────────────────────────────────────────────────────────────────────

/// A `columns x rows` grid of cells.
///
/// Every coordinate in `[0, columns) x [0, rows)` has exactly one `Cell`;
/// anything outside that range does not exist and yields
/// [`SpatialError::OutOfBounds`].
#[derive(Clone, Debug)]
pub struct Grid {
    columns: u32,
    rows:    u32,
    cells:   Vec<Cell>,

    starts:             Vec<Coord>,
    ends:               Vec<Coord>,
    packages:           Vec<Coord>,
    available_packages: Vec<Coord>,
    blockades:          BTreeSet<Coord>,
    static_collidables: Vec<Coord>,
}

impl Grid {
    /// An all-empty grid.
    pub fn new(columns: u32, rows: u32) -> Self {
        Self {
            columns,
            rows,
            cells: vec![Cell::Empty; columns as usize * rows as usize],
            starts: Vec::new(),
            ends: Vec::new(),
            packages: Vec::new(),
            available_packages: Vec::new(),
            blockades: BTreeSet::new(),
            static_collidables: Vec::new(),
        }
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    #[inline]
    pub fn columns(&self) -> u32 {
        self.columns
    }

    #[inline]
    pub fn rows(&self) -> u32 {
        self.rows
    }

    #[inline]
    pub fn contains(&self, coord: Coord) -> bool {
        coord.col >= 0
            && coord.row >= 0
            && (coord.col as u32) < self.columns
            && (coord.row as u32) < self.rows
    }

    fn index_of(&self, coord: Coord) -> SpatialResult<usize> {
        if !self.contains(coord) {
            return Err(SpatialError::OutOfBounds {
                coord,
                columns: self.columns,
                rows: self.rows,
            });
        }
        Ok(coord.row as usize * self.columns as usize + coord.col as usize)
    }

    /// Every coordinate in row-major order.
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (0..self.rows as i32).flat_map(move |row| (0..self.columns as i32).map(move |col| Coord::new(col, row)))
    }

    // ── Cell access ───────────────────────────────────────────────────────

    pub fn cell(&self, coord: Coord) -> SpatialResult<Cell> {
        Ok(self.cells[self.index_of(coord)?])
    }

    /// Paint `cell` at `coord`.
    ///
    /// Marking a package also makes it available; marking a start or end
    /// registers it.  Nothing is ever removed from the derived sets here:
    /// a picked-up package is painted `Empty` but stays in `packages` so a
    /// reset can restore it.  Use [`Grid::erase`] to undo authoring.
    pub fn set_state(&mut self, coord: Coord, cell: Cell) -> SpatialResult<()> {
        let idx = self.index_of(coord)?;
        self.cells[idx] = cell;

        match cell {
            Cell::Package => {
                add_unique(&mut self.packages, coord);
                add_unique(&mut self.available_packages, coord);
            }
            Cell::Start => add_unique(&mut self.starts, coord),
            Cell::End => add_unique(&mut self.ends, coord),
            Cell::Blockade | Cell::Empty => {}
        }

        if cell == Cell::Blockade {
            self.blockades.insert(coord);
        } else {
            self.blockades.remove(&coord);
        }
        Ok(())
    }

    /// Clear `coord` completely: the cell becomes `Empty` and the coordinate
    /// leaves every derived set.  Authoring only; never used mid-run.
    pub fn erase(&mut self, coord: Coord) -> SpatialResult<()> {
        let idx = self.index_of(coord)?;
        self.cells[idx] = Cell::Empty;
        self.starts.retain(|&c| c != coord);
        self.ends.retain(|&c| c != coord);
        self.packages.retain(|&c| c != coord);
        self.available_packages.retain(|&c| c != coord);
        self.blockades.remove(&coord);
        Ok(())
    }

    // ── Derived sets ──────────────────────────────────────────────────────

    /// Start points in declaration order.  One robot is created per start.
    pub fn starts(&self) -> &[Coord] {
        &self.starts
    }

    /// Delivery points in declaration order.
    pub fn ends(&self) -> &[Coord] {
        &self.ends
    }

    /// Every coordinate ever marked as a package.
    pub fn packages(&self) -> &[Coord] {
        &self.packages
    }

    /// Packages not yet claimed by any robot.  Always a subset of
    /// [`Grid::packages`].
    pub fn available_packages(&self) -> &[Coord] {
        &self.available_packages
    }

    pub fn blockades(&self) -> impl Iterator<Item = Coord> + '_ {
        self.blockades.iter().copied()
    }

    /// Remove `coord` from the available set.
    ///
    /// # Errors
    ///
    /// [`SpatialError::TaskClaimFailed`] if the package is not available.
    pub fn claim_package(&mut self, coord: Coord) -> SpatialResult<()> {
        match self.available_packages.iter().position(|&c| c == coord) {
            Some(pos) => {
                self.available_packages.remove(pos);
                Ok(())
            }
            None => Err(SpatialError::TaskClaimFailed(coord)),
        }
    }

    /// Put a claimed package back into the available set.  Only used when a
    /// robot abandons its plan; returns `false` if `coord` was never a
    /// package, is already available, or has been picked up.
    pub fn release_package(&mut self, coord: Coord) -> bool {
        if !self.packages.contains(&coord) || self.available_packages.contains(&coord) {
            return false;
        }
        if !matches!(self.cell(coord), Ok(Cell::Package)) {
            return false;
        }
        self.available_packages.push(coord);
        true
    }

    // ── Collidables ───────────────────────────────────────────────────────

    /// Block `coord` for the next path query.
    pub fn push_collidable(&mut self, coord: Coord) {
        self.static_collidables.push(coord);
    }

    /// Unblock the most recently pushed transient collidable.
    pub fn pop_collidable(&mut self) -> Option<Coord> {
        self.static_collidables.pop()
    }

    /// Transient collidables currently pushed.
    pub fn static_collidables(&self) -> &[Coord] {
        &self.static_collidables
    }

    /// Everything a path query must avoid: blockades plus transient
    /// collidables.
    pub fn collidables(&self) -> impl Iterator<Item = Coord> + '_ {
        self.blockades().chain(self.static_collidables.iter().copied())
    }

    // ── Lifecycle ─────────────────────────────────────────────────────────

    /// Restore every declared package to the board and make all of them
    /// available again.
    pub fn reset(&mut self) {
        for i in 0..self.packages.len() {
            let coord = self.packages[i];
            // Packages are only ever recorded after a successful bounds check.
            if let Ok(idx) = self.index_of(coord) {
                self.cells[idx] = Cell::Package;
            }
            self.blockades.remove(&coord);
        }
        self.available_packages = self.packages.clone();
        self.static_collidables.clear();
    }

    /// Paint `count` randomly chosen empty cells with `cell`.
    ///
    /// Deterministic for a given grid and RNG state.  Returns the painted
    /// coordinates; fewer than `count` when the grid runs out of empty cells.
    pub fn scatter(&mut self, cell: Cell, count: usize, rng: &mut SimRng) -> Vec<Coord> {
        let mut empty: Vec<Coord> = self
            .coords()
            .filter(|&c| matches!(self.cell(c), Ok(Cell::Empty)))
            .collect();
        rng.shuffle(&mut empty);
        empty.truncate(count);
        for &coord in &empty {
            // Every candidate came from `coords()`, so it is in bounds.
            let _ = self.set_state(coord, cell);
        }
        empty
    }
}

impl fmt::Display for Grid {
    /// Render in the text layout format understood by
    /// [`parse_layout`][crate::parse_layout].
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.columns.max(1) as usize) {
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

fn add_unique(set: &mut Vec<Coord>, coord: Coord) {
    if !set.contains(&coord) {
        set.push(coord);
    }
}
