use anyhow::anyhow;
use image::{DynamicImage, GenericImageView};

use crate::grid::{Cell, Grid};

/// Builds a grid from an image with one pixel per cell.
/// Dark pixels become walls, red pixels the start and green pixels the end.
pub fn parse_img(img: &DynamicImage) -> Result<Grid, anyhow::Error> {
    let width = img.width() as usize;
    let height = img.height() as usize;

    let mut cells = Vec::with_capacity(width * height);

    for col in 0..width {
        for row in 0..height {
            let [r, g, b, _] = img.get_pixel(col as u32, row as u32).0;

            cells.push(if r < 128 && g < 128 && b < 128 {
                Cell::Wall
            } else if r >= 128 && g < 128 && b < 128 {
                Cell::Start
            } else if g >= 128 && r < 128 && b < 128 {
                Cell::End
            } else {
                Cell::Empty
            });
        }
    }

    Ok(Grid::from_cells(width, height, cells))
}

/// Builds a grid from a text drawing, one line per row, using the characters of
/// [`Cell::to_char`] (`.` and `#` are accepted as empty and wall as well).
/// Short lines are padded with empty cells.
pub fn parse_text(text: &str) -> Result<Grid, anyhow::Error> {
    let lines: Vec<Vec<char>> = text.lines().map(|l| l.chars().collect()).collect();

    let height = lines.len();
    let width = lines.iter().map(|l| l.len()).max().unwrap_or(0);

    if width == 0 || height == 0 {
        return Err(anyhow!("the maze drawing is empty"));
    }

    let mut cells = Vec::with_capacity(width * height);

    for col in 0..width {
        for (row, line) in lines.iter().enumerate() {
            let c = line.get(col).copied().unwrap_or(' ');
            let cell = Cell::from_char(c)
                .ok_or_else(|| anyhow!("unknown cell '{}' at column {}, row {}", c, col, row))?;
            cells.push(cell);
        }
    }

    Ok(Grid::from_cells(width, height, cells))
}
