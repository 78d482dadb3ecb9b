//! Spatial-subsystem error type.

use thiserror::Error;

use rb_core::Coord;

/// Errors produced by `rb-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    /// A grid read or write outside the declared extents.  Always a
    /// programmer or configuration error.
    #[error("cell {coord} is outside the {columns}x{rows} grid")]
    OutOfBounds { coord: Coord, columns: u32, rows: u32 },

    /// No route between an origin and any of the candidate destinations.
    /// Callers treat this as "stay idle and retry", never as fatal.
    #[error("no path from {from} to any of {candidates} candidate(s)")]
    NoPath { from: Coord, candidates: usize },

    /// A package was claimed that is not (or no longer) available.
    #[error("package at {0} is not available to claim")]
    TaskClaimFailed(Coord),

    #[error("layout parse error on line {line}: {msg}")]
    Parse { line: usize, msg: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
