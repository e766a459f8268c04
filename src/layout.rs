//! Mapping between grid coordinates and world space.
//!
//! Grid `x` runs along world X and grid `y` along world Z. Tiles are cubes of `cell_size`
//! whose bottom rests on `origin.y`.
use glam::Vec3;
use grid_util::point::Point;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardLayout {
    pub width: usize,
    pub height: usize,
    pub cell_size: f32,
    /// World position of the center of cell (0, 0) projected onto the board's base plane.
    pub origin: Vec3,
    pub block_height: f32,
}

impl Default for BoardLayout {
    /// The 10x10 board of unit cubes centered on the world origin.
    fn default() -> BoardLayout {
        BoardLayout {
            width: 10,
            height: 10,
            cell_size: 1.0,
            origin: Vec3::new(-5.0, 0.0, -5.0),
            block_height: 1.0,
        }
    }
}

impl BoardLayout {
    pub fn contains(&self, cell: Point) -> bool {
        cell.x >= 0
            && cell.y >= 0
            && (cell.x as usize) < self.width
            && (cell.y as usize) < self.height
    }

    /// Point on the base plane below the center of `cell`.
    pub fn cell_ground(&self, cell: Point) -> Vec3 {
        self.cell_surface(cell, self.origin.y)
    }

    /// Center of the tile cube of `cell`.
    pub fn cell_center(&self, cell: Point) -> Vec3 {
        self.cell_surface(cell, self.origin.y + self.block_height * 0.5)
    }

    /// Point above the center of `cell` at world height `y`.
    pub fn cell_surface(&self, cell: Point, y: f32) -> Vec3 {
        Vec3::new(
            self.origin.x + cell.x as f32 * self.cell_size,
            y,
            self.origin.z + cell.y as f32 * self.cell_size,
        )
    }

    /// Cell whose column contains the world position, if it lies on the board.
    pub fn world_to_cell(&self, position: Vec3) -> Option<Point> {
        let x = ((position.x - self.origin.x) / self.cell_size).round() as i32;
        let y = ((position.z - self.origin.z) / self.cell_size).round() as i32;
        let cell = Point::new(x, y);
        self.contains(cell).then_some(cell)
    }

    /// All cells, `x` major and `y` minor.
    pub fn cells(&self) -> impl Iterator<Item = Point> {
        let height = self.height as i32;
        (0..self.width as i32).flat_map(move |x| (0..height).map(move |y| Point::new(x, y)))
    }
}
