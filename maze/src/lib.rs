//! Grid maze model, text codec and depth-first maze solver.
//!
//! A [`Session`] owns a [`Grid`] that is painted cell by cell and solved with [`find::solve`].

pub mod codec;
pub mod error;
pub mod find;
pub mod grid;
pub mod paint;
pub mod util;

pub use error::{CodeError, MazeError};
pub use find::{solve, PathFinderState, PathResult};
pub use grid::{Cell, Direction, Grid, Neighbor, Point};
pub use paint::{PaintMode, Session, SessionState};
