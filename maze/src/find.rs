use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::error::MazeError;
use crate::grid::{Cell, Direction, Grid, Point};

#[derive(Debug, PartialEq, Clone, Eq, Serialize, Deserialize)]
pub struct PathResult {
    /// From the cell next to `start` up to and including `goal`
    pub path: Vec<Point>,
    pub start: Point,
    pub goal: Point,
    /// Number of cells entered during the search, dead ends included
    pub visited: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathFinderState {
    Computing,
    NoPathFound,
    PathFound(PathResult),
}

impl PathFinderState {
    fn is_done(&self) -> bool {
        !matches!(self, PathFinderState::Computing)
    }

    /// The path that was found, empty if there is none
    pub fn path(&self) -> &[Point] {
        match self {
            PathFinderState::PathFound(result) => &result.path,
            _ => &[],
        }
    }
}

/// A cell on the search stack and the next direction to try from it
#[derive(Debug)]
struct Frame {
    point: Point,
    next: usize,
    /// The state the cell had before it was marked
    previous: Cell,
}

/// Depth-first search with backtracking.
///
/// Cells are marked `Traversed` on entry and restored when all of their neighbors have been
/// exhausted, so once the search ends only the path to the goal is left marked. Neighbors
/// are tried in the fixed order up, right, down, left and the first path reaching the goal is
/// kept. This finds *a* path, not the shortest one.
#[derive(Debug)]
struct PathFinder {
    start: Point,
    goal: Point,
    stack: Vec<Frame>,
    visited: usize,
    state: PathFinderState,
}

impl PathFinder {
    fn new(start: Point, goal: Point) -> Self {
        Self {
            start,
            goal,
            stack: vec![Frame {
                point: start,
                next: 0,
                previous: Cell::Start,
            }],
            visited: 0,
            state: PathFinderState::Computing,
        }
    }

    fn finish(mut self, grid: &mut Grid) -> PathFinderState {
        loop {
            match self.step(grid) {
                PathFinderState::Computing => {}
                s => return s,
            }
        }
    }

    fn step(&mut self, grid: &mut Grid) -> PathFinderState {
        if self.state.is_done() {
            return self.state.clone();
        }

        let Some(frame) = self.stack.last_mut() else {
            self.state = PathFinderState::NoPathFound;
            return self.state.clone();
        };

        if frame.next == Direction::ALL.len() {
            // dead end, undo the mark unless this is the start cell
            let (point, previous) = (frame.point, frame.previous);
            self.stack.pop();
            if point != self.start {
                grid.mark(point, previous);
            }
            return self.state.clone();
        }

        let index = frame.next;
        frame.next += 1;
        let neighbor = grid.neighbors_of(frame.point)[index];

        let Some(point) = neighbor.point.filter(|_| neighbor.passable) else {
            return self.state.clone();
        };

        self.visited += 1;

        if point == self.goal {
            let mut path: Vec<Point> = self
                .stack
                .iter()
                .skip(1)
                .map(|frame| frame.point)
                .collect();
            path.push(point);

            self.state = PathFinderState::PathFound(PathResult {
                path,
                start: self.start,
                goal: self.goal,
                visited: self.visited,
            });
            return self.state.clone();
        }

        let Ok(previous) = grid.get(point) else {
            return self.state.clone();
        };
        grid.mark(point, Cell::Traversed);
        self.stack.push(Frame {
            point,
            next: 0,
            previous,
        });

        self.state.clone()
    }
}

/// Searches for a path from the start cell to the end cell of `grid`.
///
/// Marks left over from a previous solve are cleared first. On success the cells between start
/// and end along the path are left `Traversed`; otherwise the grid has no `Traversed` cells.
/// A grid without an end cell has no path, which is not an error.
pub fn solve(grid: &mut Grid) -> Result<PathFinderState, MazeError> {
    let start = grid.start().ok_or(MazeError::NoStart)?;

    grid.clear_traversed();

    let Some(goal) = grid.end() else {
        debug!("no end cell, nothing to search for");
        return Ok(PathFinderState::NoPathFound);
    };

    let state = PathFinder::new(start, goal).finish(grid);

    match &state {
        PathFinderState::PathFound(result) => info!(
            "found path {} -> {} of length {} after visiting {} cells",
            start,
            goal,
            result.path.len(),
            result.visited
        ),
        _ => info!("no path from {} to {}", start, goal),
    }

    Ok(state)
}

#[cfg(test)]
mod test {

    use super::*;
    use crate::util::parse_text;

    fn create_basic_grid() -> Grid {
        parse_text(
            "XXXXXXX\n\
             XS   EX\n\
             X XXX X\n\
             X X   X\n\
             X X XXX\n\
             X     X\n\
             XXXXXXX\n",
        )
        .unwrap()
    }

    fn traversed(grid: &Grid) -> Vec<Point> {
        grid.iter()
            .filter(|(_, c)| *c == Cell::Traversed)
            .map(|(p, _)| p)
            .collect()
    }

    #[test]
    fn test_straight_line() {
        let mut grid = Grid::new(3, 1);
        grid.set(Point::new(0, 0), Cell::Start).unwrap();
        grid.set(Point::new(2, 0), Cell::End).unwrap();

        let state = solve(&mut grid).unwrap();

        assert_eq!(state.path(), &[Point::new(1, 0), Point::new(2, 0)]);
        assert_eq!(grid.get(Point::new(0, 0)), Ok(Cell::Start));
        assert_eq!(grid.get(Point::new(1, 0)), Ok(Cell::Traversed));
        assert_eq!(grid.get(Point::new(2, 0)), Ok(Cell::End));
    }

    #[test]
    fn test_straight_line_in_walled_corridor() {
        let mut grid = parse_text("S E\nXXX\n   \n").unwrap();

        let state = solve(&mut grid).unwrap();

        assert!(matches!(
            state,
            PathFinderState::PathFound(PathResult {
                start: Point { col: 0, row: 0 },
                goal: Point { col: 2, row: 0 },
                ..
            })
        ));
        assert_eq!(state.path(), &[Point::new(1, 0), Point::new(2, 0)]);
    }

    #[test]
    fn test_adjacent_end() {
        let mut grid = parse_text("SE\n").unwrap();

        let state = solve(&mut grid).unwrap();

        assert_eq!(state.path(), &[Point::new(1, 0)]);
        assert!(traversed(&grid).is_empty());
    }

    #[test]
    fn test_walled_off_end() {
        let mut grid = Grid::new(6, 6);
        grid.set(Point::new(0, 0), Cell::Start).unwrap();
        grid.set(Point::new(5, 5), Cell::End).unwrap();
        grid.set(Point::new(4, 5), Cell::Wall).unwrap();
        grid.set(Point::new(5, 4), Cell::Wall).unwrap();
        grid.set(Point::new(4, 4), Cell::Wall).unwrap();

        let before = grid.clone();
        let state = solve(&mut grid).unwrap();

        assert_eq!(state, PathFinderState::NoPathFound);
        assert!(state.path().is_empty());
        assert!(traversed(&grid).is_empty());
        assert_eq!(grid, before);
    }

    #[test]
    fn test_backtracking_restores_extra_end() {
        use base64::{engine::general_purpose::STANDARD, Engine as _};

        // start, a stray end cell, a wall and the actual end
        let code = STANDARD.encode([2u8, 3, 1, 3]);
        let mut grid = crate::codec::decode(&code, 4, 1).unwrap();
        assert_eq!(grid.end(), Some(Point::new(3, 0)));

        let before = grid.clone();
        let state = solve(&mut grid).unwrap();

        assert_eq!(state, PathFinderState::NoPathFound);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_no_start() {
        let mut grid = Grid::new(3, 3);
        grid.set(Point::new(2, 2), Cell::End).unwrap();

        assert_eq!(solve(&mut grid), Err(MazeError::NoStart));
    }

    #[test]
    fn test_no_end_is_no_path() {
        let mut grid = Grid::new(3, 3);
        grid.set(Point::new(0, 0), Cell::Start).unwrap();

        assert_eq!(solve(&mut grid), Ok(PathFinderState::NoPathFound));
        assert!(traversed(&grid).is_empty());
    }

    #[test]
    fn test_basic_route() {
        let mut grid = create_basic_grid();

        let state = solve(&mut grid).unwrap();

        // up is blocked, so right is taken first and leads straight to the end
        assert_eq!(
            state.path(),
            &[
                Point::new(2, 1),
                Point::new(3, 1),
                Point::new(4, 1),
                Point::new(5, 1)
            ]
        );
        assert_eq!(
            traversed(&grid),
            vec![Point::new(2, 1), Point::new(3, 1), Point::new(4, 1)]
        );
    }

    #[test]
    fn test_dead_ends_are_unmarked() {
        // right leads into a dead end, the end is only reachable going down
        let mut grid = parse_text(
            "XXXXXX\n\
             XS  XX\n\
             X XXXX\n\
             X   EX\n\
             XXXXXX\n",
        )
        .unwrap();

        let state = solve(&mut grid).unwrap();

        assert_eq!(
            state.path(),
            &[
                Point::new(1, 2),
                Point::new(1, 3),
                Point::new(2, 3),
                Point::new(3, 3),
                Point::new(4, 3)
            ]
        );
        // the dead end to the right was visited but is not left marked
        assert_eq!(grid.get(Point::new(2, 1)), Ok(Cell::Empty));
        assert_eq!(grid.get(Point::new(3, 1)), Ok(Cell::Empty));
        assert_eq!(traversed(&grid).len(), 4);

        match state {
            PathFinderState::PathFound(result) => assert_eq!(result.visited, 7),
            s => panic!("expected a path, got {:?}", s),
        }
    }

    #[test]
    fn test_first_path_not_shortest() {
        // the end is directly below the start, but right is tried before down
        let mut grid = parse_text(
            "S  \n\
             E  \n",
        )
        .unwrap();

        let state = solve(&mut grid).unwrap();

        assert_eq!(
            state.path(),
            &[
                Point::new(1, 0),
                Point::new(2, 0),
                Point::new(2, 1),
                Point::new(1, 1),
                Point::new(0, 1)
            ]
        );
    }

    #[test]
    fn test_deterministic() {
        let mut grid = create_basic_grid();
        grid.set(Point::new(2, 1), Cell::Wall).unwrap();

        let first = solve(&mut grid).unwrap();
        let second = solve(&mut grid).unwrap();
        let third = solve(&mut grid.clone()).unwrap();

        assert!(matches!(first, PathFinderState::PathFound(_)));
        assert_eq!(first, second);
        assert_eq!(first, third);
    }

    #[test]
    fn test_open_grid_terminates() {
        let mut grid = Grid::new(30, 30);
        grid.set(Point::new(0, 0), Cell::Start).unwrap();
        grid.set(Point::new(29, 29), Cell::End).unwrap();

        let state = solve(&mut grid).unwrap();

        assert_eq!(state.path().last(), Some(&Point::new(29, 29)));
        match state {
            PathFinderState::PathFound(result) => assert!(result.visited <= 30 * 30),
            s => panic!("expected a path, got {:?}", s),
        }
    }
}
