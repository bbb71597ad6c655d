//! Conversion between a [`Grid`] and its compact text code.
//!
//! The code is the standard base64 encoding of one tag byte per cell, in column-major order:
//! byte `k` describes cell `(k / height, k % height)`.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use log::debug;

use crate::error::{CodeError, MazeError};
use crate::grid::{Cell, Grid};

const TAG_EMPTY: u8 = 0;
const TAG_WALL: u8 = 1;
const TAG_START: u8 = 2;
const TAG_END: u8 = 3;

impl Cell {
    /// The tag written to the grid code. `Traversed` is transient and is stored as `Empty`.
    pub fn tag(self) -> u8 {
        match self {
            Cell::Empty | Cell::Traversed => TAG_EMPTY,
            Cell::Wall => TAG_WALL,
            Cell::Start => TAG_START,
            Cell::End => TAG_END,
        }
    }

    pub fn from_tag(tag: u8) -> Option<Cell> {
        match tag {
            TAG_EMPTY => Some(Cell::Empty),
            TAG_WALL => Some(Cell::Wall),
            TAG_START => Some(Cell::Start),
            TAG_END => Some(Cell::End),
            _ => None,
        }
    }
}

pub fn encode(grid: &Grid) -> String {
    let tags: Vec<u8> = grid.cells().iter().map(|c| c.tag()).collect();
    STANDARD.encode(tags)
}

/// Decodes a code produced by [`encode`] for a grid of the given size.
///
/// Either the whole grid is returned or an error; a partially decoded grid is never produced.
pub fn decode(code: &str, width: usize, height: usize) -> Result<Grid, MazeError> {
    let tags = STANDARD
        .decode(code.trim())
        .map_err(CodeError::Base64)?;

    let expected = width * height;
    if tags.len() != expected {
        return Err(CodeError::Length {
            expected,
            got: tags.len(),
        }
        .into());
    }

    let cells = tags
        .iter()
        .enumerate()
        .map(|(index, &tag)| Cell::from_tag(tag).ok_or(CodeError::Tag { index, tag }))
        .collect::<Result<Vec<Cell>, CodeError>>()?;

    debug!("decoded {}x{} grid", width, height);

    Ok(Grid::from_cells(width, height, cells))
}
