use egui::{Pos2, Rect, Vec2};
use maze::Point;

/// Placement of the grid cells on screen.
///
/// Cells are `cell_size` pixels wide and separated (and surrounded) by `spacing` pixels.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CellLayout {
    pub origin: Pos2,
    pub cell_size: f32,
    pub spacing: f32,
    pub columns: usize,
    pub rows: usize,
}

impl CellLayout {
    fn stride(&self) -> f32 {
        self.cell_size + self.spacing
    }

    /// Total size of the drawn grid
    pub fn size(&self) -> Vec2 {
        Vec2::new(
            self.columns as f32 * self.stride() + self.spacing,
            self.rows as f32 * self.stride() + self.spacing,
        )
    }

    pub fn cell_rect(&self, point: Point) -> Rect {
        let min = self.origin
            + Vec2::new(
                point.col as f32 * self.stride() + self.spacing,
                point.row as f32 * self.stride() + self.spacing,
            );
        Rect::from_min_size(min, Vec2::splat(self.cell_size))
    }

    /// The cell under `pos`. Positions outside of the grid are clamped to the closest edge cell,
    /// so a drag that leaves the grid keeps painting along the border.
    pub fn to_point(&self, pos: Pos2) -> Point {
        let clamp = |offset: f32, count: usize| {
            let index = (offset / self.stride()).floor();
            if index <= 0.0 {
                0
            } else {
                (index as usize).min(count.saturating_sub(1))
            }
        };

        Point {
            col: clamp(pos.x - self.origin.x, self.columns),
            row: clamp(pos.y - self.origin.y, self.rows),
        }
    }
}

#[cfg(test)]
mod test {

    use super::*;

    fn create_layout() -> CellLayout {
        CellLayout {
            origin: Pos2::new(10.0, 20.0),
            cell_size: 24.0,
            spacing: 1.0,
            columns: 20,
            rows: 10,
        }
    }

    #[test]
    fn test_size() {
        assert_eq!(create_layout().size(), Vec2::new(501.0, 251.0));
    }

    #[test]
    fn test_to_point() {
        let layout = create_layout();

        assert_eq!(layout.to_point(Pos2::new(10.0, 20.0)), Point::new(0, 0));
        assert_eq!(layout.to_point(Pos2::new(36.0, 71.0)), Point::new(1, 2));
    }

    #[test]
    fn test_to_point_is_clamped() {
        let layout = create_layout();

        assert_eq!(layout.to_point(Pos2::new(-100.0, 5.0)), Point::new(0, 0));
        assert_eq!(layout.to_point(Pos2::new(10_000.0, 10_000.0)), Point::new(19, 9));
        assert_eq!(layout.to_point(Pos2::new(510.5, 30.0)), Point::new(19, 0));
    }

    #[test]
    fn test_cell_rect_maps_back() {
        let layout = create_layout();

        for point in [Point::new(0, 0), Point::new(7, 3), Point::new(19, 9)] {
            let rect = layout.cell_rect(point);
            assert_eq!(rect.width(), 24.0);
            assert_eq!(layout.to_point(rect.center()), point);
        }
    }
}
