use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::error::MazeError;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Wall,
    Start,
    End,
    /// Marks a cell that is part of the path found by the solver
    Traversed,
}

impl Cell {
    /// Returns true if the solver is allowed to step into a cell in this state
    pub fn is_passable(&self) -> bool {
        matches!(self, Cell::Empty | Cell::End)
    }

    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => ' ',
            Cell::Wall => 'X',
            Cell::Start => 'S',
            Cell::End => 'E',
            Cell::Traversed => 'T',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            ' ' | '.' => Some(Cell::Empty),
            'X' | '#' => Some(Cell::Wall),
            'S' => Some(Cell::Start),
            'E' => Some(Cell::End),
            'T' => Some(Cell::Traversed),
            _ => None,
        }
    }
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// The order in which neighbors are enumerated. The solver relies on it for tie-breaking.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub col: usize,
    pub row: usize,
}

impl Point {
    pub fn new(col: usize, row: usize) -> Self {
        Self { col, row }
    }

    /// The adjacent point in `direction`, or None if it would have a negative coordinate.
    /// Row 0 is the top row, so `Up` decreases the row.
    pub fn step(self, direction: Direction) -> Option<Point> {
        match direction {
            Direction::Up => self.row.checked_sub(1).map(|row| Point { row, ..self }),
            Direction::Right => Some(Point {
                col: self.col + 1,
                ..self
            }),
            Direction::Down => Some(Point {
                row: self.row + 1,
                ..self
            }),
            Direction::Left => self.col.checked_sub(1).map(|col| Point { col, ..self }),
        }
    }
}

impl Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

/// One of the four orthogonal neighbors of a cell
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct Neighbor {
    pub direction: Direction,
    /// None if the neighbor lies outside of the grid
    pub point: Option<Point>,
    pub passable: bool,
}

/// Fixed-size rectangular maze, indexed by (column, row).
///
/// Cells are stored column-major, so the storage order is the same order the grid code uses:
/// cell `(col, row)` lives at index `col * height + row`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    start: Option<Point>,
    end: Option<Point>,
}

impl Grid {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::Empty; width * height],
            start: None,
            end: None,
        }
    }

    /// Builds a grid from column-major cells and recomputes the start and end references.
    /// If the cells contain several start (or end) cells, the last one wins.
    pub(crate) fn from_cells(width: usize, height: usize, cells: Vec<Cell>) -> Self {
        debug_assert_eq!(cells.len(), width * height);

        let last = |target: Cell| {
            cells
                .iter()
                .rposition(|c| *c == target)
                .map(|i| Point::new(i / height, i % height))
        };
        let start = last(Cell::Start);
        let end = last(Cell::End);

        Self {
            width,
            height,
            cells,
            start,
            end,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn start(&self) -> Option<Point> {
        self.start
    }

    pub fn end(&self) -> Option<Point> {
        self.end
    }

    pub fn is_valid(&self, point: Point) -> bool {
        point.col < self.width && point.row < self.height
    }

    fn index(&self, point: Point) -> Result<usize, MazeError> {
        if self.is_valid(point) {
            Ok(point.col * self.height + point.row)
        } else {
            Err(MazeError::OutOfBounds {
                point,
                width: self.width,
                height: self.height,
            })
        }
    }

    pub fn get(&self, point: Point) -> Result<Cell, MazeError> {
        self.index(point).map(|i| self.cells[i])
    }

    /// Changes the state of the cell at `point`, keeping the start and end references in sync.
    ///
    /// The order of operations is fixed:
    /// 1. when painting `Start` (or `End`), the previous start (or end) cell elsewhere is reset
    ///    to `Empty`
    /// 2. the new state is written
    /// 3. if the cell used to be the start (or end) and no longer is, that reference is cleared
    ///
    /// Painting `Start` over the current end cell therefore clears the end, and vice versa.
    pub fn set(&mut self, point: Point, cell: Cell) -> Result<(), MazeError> {
        let index = self.index(point)?;
        let old = self.cells[index];

        match cell {
            Cell::Start => {
                if let Some(previous) = self.start.replace(point) {
                    if previous != point {
                        self.mark(previous, Cell::Empty);
                    }
                }
            }
            Cell::End => {
                if let Some(previous) = self.end.replace(point) {
                    if previous != point {
                        self.mark(previous, Cell::Empty);
                    }
                }
            }
            _ => {}
        }

        self.cells[index] = cell;

        if old == Cell::Start && cell != Cell::Start && self.start == Some(point) {
            self.start = None;
        }
        if old == Cell::End && cell != Cell::End && self.end == Some(point) {
            self.end = None;
        }

        Ok(())
    }

    /// Writes a cell without touching the start and end references
    pub(crate) fn mark(&mut self, point: Point, cell: Cell) {
        if let Ok(index) = self.index(point) {
            self.cells[index] = cell;
        }
    }

    /// Returns the four neighbors of `point` in the order up, right, down, left.
    /// Neighbors outside of the grid are reported as not passable instead of being left out.
    pub fn neighbors_of(&self, point: Point) -> [Neighbor; 4] {
        Direction::ALL.map(|direction| {
            let neighbor = point.step(direction).filter(|p| self.is_valid(*p));
            Neighbor {
                direction,
                point: neighbor,
                passable: neighbor
                    .and_then(|p| self.get(p).ok())
                    .is_some_and(|c| c.is_passable()),
            }
        })
    }

    /// Iterates over all cells in storage order (column by column)
    pub fn iter(&self) -> impl Iterator<Item = (Point, Cell)> + '_ {
        let height = self.height;
        self.cells.iter().enumerate().map(move |(i, cell)| {
            (
                Point {
                    col: i / height,
                    row: i % height,
                },
                *cell,
            )
        })
    }

    pub(crate) fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Collapses all `Traversed` cells back to `Empty`
    pub fn clear_traversed(&mut self) {
        for cell in self.cells.iter_mut() {
            if *cell == Cell::Traversed {
                *cell = Cell::Empty;
            }
        }
    }

    /// Resets every cell to `Empty`
    pub fn clear(&mut self) {
        self.cells.fill(Cell::Empty);
        self.start = None;
        self.end = None;
    }
}

impl Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                write!(f, "{}", self.cells[col * self.height + row])?;
            }
            write!(f, "\n")?;
        }

        Ok(())
    }
}
