use criterion::{black_box, criterion_group, criterion_main, Criterion};
use maze::{solve, Cell, Grid, PathFinderState, Point};

/// A maze of vertical walls with alternating gaps at the bottom and the top, which forces the
/// solver through every free cell
fn create_serpentine(size: usize) -> Grid {
    let mut grid = Grid::new(size, size);

    for col in (1..size).step_by(2) {
        let gap = if (col / 2) % 2 == 0 { size - 1 } else { 0 };
        for row in (0..size).filter(|r| *r != gap) {
            grid.set(Point::new(col, row), Cell::Wall).unwrap();
        }
    }

    grid.set(Point::new(0, 0), Cell::Start).unwrap();
    let last = if size % 2 == 0 { size - 2 } else { size - 1 };
    grid.set(Point::new(last, size - 1), Cell::End).unwrap();

    grid
}

fn bench_serpentine(c: &mut Criterion, size: usize) {
    let grid = create_serpentine(size);

    c.bench_function(&format!("serpentine_{}", size), |b| {
        b.iter(|| {
            let mut grid = black_box(grid.clone());
            let res = solve(&mut grid).unwrap();
            assert!(matches!(res, PathFinderState::PathFound(_)));
        })
    });
}

fn bench_open(c: &mut Criterion, size: usize) {
    let mut grid = Grid::new(size, size);
    grid.set(Point::new(0, 0), Cell::Start).unwrap();
    grid.set(Point::new(size / 2, size / 2), Cell::End).unwrap();

    c.bench_function(&format!("open_{}", size), |b| {
        b.iter(|| {
            let mut grid = black_box(grid.clone());
            let res = solve(&mut grid).unwrap();
            assert!(matches!(res, PathFinderState::PathFound(_)));
        })
    });
}

pub fn maze_small(c: &mut Criterion) {
    bench_serpentine(c, 21);
    bench_open(c, 20);
}

pub fn maze_medium(c: &mut Criterion) {
    bench_serpentine(c, 101);
    bench_open(c, 100);
}

pub fn maze_large(c: &mut Criterion) {
    bench_serpentine(c, 401);
    bench_open(c, 400);
}

criterion_group!(benches, maze_small, maze_medium, maze_large);
criterion_main!(benches);
