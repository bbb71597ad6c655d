use log::debug;
use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::MazeError;
use crate::find::{self, PathFinderState};
use crate::grid::{Cell, Grid, Point};

/// The cell states a user can paint
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum PaintMode {
    #[default]
    Wall,
    Empty,
    Start,
    End,
}

impl PaintMode {
    pub const ALL: [PaintMode; 4] = [
        PaintMode::Wall,
        PaintMode::Empty,
        PaintMode::Start,
        PaintMode::End,
    ];

    pub fn label(&self) -> &str {
        match self {
            PaintMode::Wall => "Wall",
            PaintMode::Empty => "Empty",
            PaintMode::Start => "Start",
            PaintMode::End => "End",
        }
    }
}

impl From<PaintMode> for Cell {
    fn from(mode: PaintMode) -> Self {
        match mode {
            PaintMode::Wall => Cell::Wall,
            PaintMode::Empty => Cell::Empty,
            PaintMode::Start => Cell::Start,
            PaintMode::End => Cell::End,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SessionState {
    Editing,
    Solving,
}

/// Owns the grid being edited together with the current paint mode.
///
/// All changes to the grid go through the session, which refuses them while a solve is in
/// progress.
#[derive(Debug)]
pub struct Session {
    grid: Grid,
    mode: PaintMode,
    state: SessionState,
}

impl Session {
    pub fn new(width: usize, height: usize) -> Self {
        Self::from_grid(Grid::new(width, height))
    }

    pub fn from_grid(grid: Grid) -> Self {
        Self {
            grid,
            mode: PaintMode::default(),
            state: SessionState::Editing,
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn current_mode(&self) -> PaintMode {
        self.mode
    }

    pub fn set_current_mode(&mut self, mode: PaintMode) {
        debug!("paint mode: {:?}", mode);
        self.mode = mode;
    }

    fn check_editing(&self) -> Result<(), MazeError> {
        match self.state {
            SessionState::Editing => Ok(()),
            SessionState::Solving => Err(MazeError::Solving),
        }
    }

    /// Paints the cell at `point` with the current mode
    pub fn paint(&mut self, point: Point) -> Result<(), MazeError> {
        self.paint_with(point, self.mode)
    }

    pub fn paint_with(&mut self, point: Point, mode: PaintMode) -> Result<(), MazeError> {
        self.check_editing()?;
        self.grid.set(point, mode.into())
    }

    /// Resets the cell at `point` to `Empty`, regardless of the current mode
    pub fn erase(&mut self, point: Point) -> Result<(), MazeError> {
        self.paint_with(point, PaintMode::Empty)
    }

    pub fn clear(&mut self) -> Result<(), MazeError> {
        self.check_editing()?;
        self.grid.clear();
        Ok(())
    }

    /// Removes the marks of the last solution
    pub fn clear_solution(&mut self) -> Result<(), MazeError> {
        self.check_editing()?;
        self.grid.clear_traversed();
        Ok(())
    }

    pub fn code(&self) -> String {
        codec::encode(&self.grid)
    }

    /// Replaces the grid with the one described by `code`, which must have the same size.
    /// The current grid is left untouched if the code is rejected.
    pub fn load_code(&mut self, code: &str) -> Result<(), MazeError> {
        self.check_editing()?;
        self.grid = codec::decode(code, self.grid.width(), self.grid.height())?;
        Ok(())
    }

    /// Locks the grid against painting
    pub fn begin_solve(&mut self) -> Result<(), MazeError> {
        self.check_editing()?;
        debug!("entering solving mode");
        self.state = SessionState::Solving;
        Ok(())
    }

    pub fn end_solve(&mut self) {
        debug!("leaving solving mode");
        self.state = SessionState::Editing;
    }

    /// Runs the solver on the grid, leaving the found path marked for display
    pub fn solve(&mut self) -> Result<PathFinderState, MazeError> {
        self.begin_solve()?;
        let result = find::solve(&mut self.grid);
        self.end_solve();
        result
    }
}
