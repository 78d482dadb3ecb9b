//! Text layout loader.
//!
//! # Format
//!
//! One text line per grid row, top row first.  Every row must have the same
//! width.
//!
//! ```text
//! ; warehouse floor, 5x3
//! S...E
//! .#P#.
//! S...P
//! ```
//!
//! | Char | Cell       |
//! |------|------------|
//! | `.`  | `Empty`    |
//! | `#`  | `Blockade` |
//! | `S`  | `Start`    |
//! | `E`  | `End`      |
//! | `P`  | `Package`  |
//!
//! Blank lines and lines starting with `;` are ignored.  Cells are painted
//! row by row, left to right, so starts, ends and packages are declared in
//! reading order and robots are numbered the same way.

use std::io::Read;
use std::path::Path;

use rb_core::Coord;

use crate::{Cell, Grid, SpatialError, SpatialResult};

/// Load a layout from a file.
pub fn load_layout_path(path: &Path) -> SpatialResult<Grid> {
    let mut text = String::new();
    std::fs::File::open(path)?.read_to_string(&mut text)?;
    parse_layout(&text)
}

/// Parse a layout from text.
pub fn parse_layout(text: &str) -> SpatialResult<Grid> {
    // (source line number, row text)
    let rows: Vec<(usize, &str)> = text
        .lines()
        .enumerate()
        .map(|(i, l)| (i + 1, l.trim_end()))
        .filter(|(_, l)| !l.is_empty() && !l.starts_with(';'))
        .collect();

    let Some(&(_, first)) = rows.first() else {
        return Err(SpatialError::Parse { line: 0, msg: "layout has no rows".into() });
    };
    let columns = first.chars().count();

    let mut grid = Grid::new(columns as u32, rows.len() as u32);

    for (row, &(line, text)) in rows.iter().enumerate() {
        let width = text.chars().count();
        if width != columns {
            return Err(SpatialError::Parse {
                line,
                msg: format!("row is {width} cells wide, expected {columns}"),
            });
        }
        for (col, ch) in text.chars().enumerate() {
            let cell = Cell::from_symbol(ch).ok_or_else(|| SpatialError::Parse {
                line,
                msg: format!("unknown cell symbol {ch:?} in column {col}"),
            })?;
            if cell != Cell::Empty {
                grid.set_state(Coord::new(col as i32, row as i32), cell)?;
            }
        }
    }

    Ok(grid)
}
