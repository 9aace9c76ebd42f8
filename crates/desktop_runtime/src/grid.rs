//! Desktop icon lattice: snapping pixel positions onto grid cells.

use crate::model::{Point, Viewport};

/// Width of one icon grid cell.
pub const GRID_CELL_WIDTH: i32 = 90;
/// Height of one icon grid cell.
pub const GRID_CELL_HEIGHT: i32 = 84;
/// Left margin of the first grid column.
pub const GRID_OFFSET_X: i32 = 8;
/// Top margin of the first grid row.
pub const GRID_OFFSET_Y: i32 = 8;
/// Space reserved below the icon area for the status bar.
pub const DESKTOP_FOOTER_HEIGHT: i32 = 40;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub col: i32,
    pub row: i32,
}

impl GridCell {
    pub fn origin(self) -> Point {
        Point::new(
            self.col * GRID_CELL_WIDTH + GRID_OFFSET_X,
            self.row * GRID_CELL_HEIGHT + GRID_OFFSET_Y,
        )
    }
}

/// Returns the nearest non-negative grid cell for `point`.
pub fn grid_cell_for(point: Point) -> GridCell {
    GridCell {
        col: round_half_up(point.x - GRID_OFFSET_X, GRID_CELL_WIDTH).max(0),
        row: round_half_up(point.y - GRID_OFFSET_Y, GRID_CELL_HEIGHT).max(0),
    }
}

/// Snaps `point` to the origin of its nearest grid cell.
///
/// No upper bound is applied here; callers clamp the pre-snap coordinate with
/// [`clamp_icon_to_viewport`].
pub fn snap_to_grid(point: Point) -> Point {
    grid_cell_for(point).origin()
}

/// Clamps a raw icon position so the icon stays inside the usable desktop area.
pub fn clamp_icon_to_viewport(point: Point, viewport: Viewport) -> Point {
    let max_x = viewport.width - GRID_CELL_WIDTH;
    let max_y = viewport.height - GRID_CELL_HEIGHT - DESKTOP_FOOTER_HEIGHT;
    Point::new(point.x.min(max_x).max(0), point.y.min(max_y).max(0))
}

/// Clamps then snaps, yielding a grid-aligned position inside the desktop area.
pub fn place_on_grid(point: Point, viewport: Viewport) -> Point {
    snap_to_grid(clamp_icon_to_viewport(point, viewport))
}

/// Grid cells whose origins fit inside `viewport`, ordered by distance from `near`.
pub(crate) fn cells_by_distance(near: Point, viewport: Viewport) -> Vec<Point> {
    let max = clamp_icon_to_viewport(Point::new(i32::MAX, i32::MAX), viewport);
    let last_col = (max.x - GRID_OFFSET_X).div_euclid(GRID_CELL_WIDTH).max(0);
    let last_row = (max.y - GRID_OFFSET_Y).div_euclid(GRID_CELL_HEIGHT).max(0);
    let mut cells = Vec::new();
    for row in 0..=last_row {
        for col in 0..=last_col {
            cells.push(GridCell { col, row }.origin());
        }
    }
    cells.sort_by_key(|cell| {
        let dx = i64::from(cell.x - near.x);
        let dy = i64::from(cell.y - near.y);
        (dx * dx + dy * dy, cell.y, cell.x)
    });
    cells
}

// floor(value / step + 0.5) without going through floats.
fn round_half_up(value: i32, step: i32) -> i32 {
    (2 * value + step).div_euclid(2 * step)
}
