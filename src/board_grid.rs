use crate::error::GridError;
use crate::{C, D, N_SMALLVEC_SIZE};
use core::fmt;
use grid_util::grid::{BoolGrid, Grid};
use grid_util::point::Point;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

/// When a diagonal step is allowed, judged by the two cells orthogonally adjacent to
/// both the origin and the destination of the step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum DiagonalMovement {
    /// Only the 4 cardinal neighbours are considered.
    Never,
    /// Diagonal steps are always allowed, even between two blocked cells.
    Always,
    /// Diagonal steps are refused when both orthogonal cells are blocked.
    IfAtMostOneObstacle,
    /// Diagonal steps are refused when any orthogonal cell is blocked (no corner crossing).
    OnlyWhenNoObstacles,
}

impl DiagonalMovement {
    pub fn allows_diagonal(&self) -> bool {
        !matches!(self, DiagonalMovement::Never)
    }
}

/// A single board cell. Identity is its coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Cell {
    pub x: i32,
    pub y: i32,
    pub walkable: bool,
}

impl Cell {
    pub fn point(&self) -> Point {
        Point::new(self.x, self.y)
    }
}

/// Connected components of the walkable cells under one [DiagonalMovement] policy.
#[derive(Clone, Debug)]
pub struct Components {
    sets: UnionFind<usize>,
    walkable: BoolGrid,
}

impl Components {
    /// Checks if start and goal are walkable and on the same component.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        let walkable = |p: &Point| self.walkable.point_in_bounds(*p) && self.walkable.get_point(*p);
        walkable(start)
            && walkable(goal)
            && self.sets.equiv(
                self.walkable.get_ix_point(start),
                self.walkable.get_ix_point(goal),
            )
    }
}

/// [BoardGrid] is the fixed-size walkability grid of the board, stored in a [BoolGrid] in which
/// a cell is walkable when its value is [true]. Dimensions are set at construction and never
/// change; [Clone] yields an independent snapshot, which is what every path query runs against.
#[derive(Clone, Debug)]
pub struct BoardGrid {
    grid: BoolGrid,
}

impl BoardGrid {
    /// Creates a fully walkable board.
    pub fn new(width: usize, height: usize) -> BoardGrid {
        BoardGrid::filled(width, height, true)
    }
    pub fn filled(width: usize, height: usize, walkable: bool) -> BoardGrid {
        BoardGrid {
            grid: BoolGrid::new(width, height, walkable),
        }
    }
    pub fn width(&self) -> usize {
        self.grid.width()
    }
    pub fn height(&self) -> usize {
        self.grid.height()
    }
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        self.grid.point_in_bounds(Point::new(x, y))
    }
    pub fn point_in_bounds(&self, point: Point) -> bool {
        self.grid.point_in_bounds(point)
    }
    fn checked_point(&self, x: i32, y: i32) -> Result<Point, GridError> {
        let point = Point::new(x, y);
        if self.grid.point_in_bounds(point) {
            Ok(point)
        } else {
            Err(GridError::OutOfBounds {
                x,
                y,
                width: self.width(),
                height: self.height(),
            })
        }
    }

    /// Looks up the cell at `(x, y)`, failing with [GridError::OutOfBounds] off the board.
    pub fn cell_at(&self, x: i32, y: i32) -> Result<Cell, GridError> {
        let point = self.checked_point(x, y)?;
        Ok(Cell {
            x,
            y,
            walkable: self.grid.get_point(point),
        })
    }
    pub fn is_walkable_at(&self, x: i32, y: i32) -> Result<bool, GridError> {
        self.checked_point(x, y).map(|p| self.grid.get_point(p))
    }
    /// Walkability of a point; anything off the board counts as blocked.
    pub fn is_walkable(&self, point: Point) -> bool {
        self.grid.point_in_bounds(point) && self.grid.get_point(point)
    }
    pub fn set_walkable(&mut self, x: i32, y: i32, walkable: bool) -> Result<(), GridError> {
        let point = self.checked_point(x, y)?;
        self.grid.set_point(point, walkable);
        Ok(())
    }
    pub fn cells(&self) -> impl Iterator<Item = Cell> + '_ {
        (0..self.height() as i32).flat_map(move |y| {
            (0..self.width() as i32).map(move |x| Cell {
                x,
                y,
                walkable: self.grid.get(x as usize, y as usize),
            })
        })
    }

    /// Whether a single step from `from` to the adjacent `to` is legal under `movement`.
    pub fn can_move(&self, from: Point, to: Point, movement: DiagonalMovement) -> bool {
        if !self.is_walkable(to) {
            return false;
        }
        if !from.dir_obj(&to).diagonal() {
            return true;
        }
        debug_assert!(from.move_distance(&to) == 1);
        let side_a = self.is_walkable(Point::new(from.x, to.y));
        let side_b = self.is_walkable(Point::new(to.x, from.y));
        match movement {
            DiagonalMovement::Never => false,
            DiagonalMovement::Always => true,
            DiagonalMovement::IfAtMostOneObstacle => side_a || side_b,
            DiagonalMovement::OnlyWhenNoObstacles => side_a && side_b,
        }
    }

    /// Moore neighbourhood of `point` when diagonal movement is enabled, von Neumann
    /// neighbourhood otherwise. Legality is not checked.
    pub fn neighborhood_points(
        &self,
        point: &Point,
        movement: DiagonalMovement,
    ) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
        if movement.allows_diagonal() {
            point.moore_neighborhood().into_iter().collect()
        } else {
            point.neumann_neighborhood().into_iter().collect()
        }
    }

    /// Legal successors of `pos` together with their step cost, [C] for cardinal and [D] for
    /// diagonal steps.
    pub fn neighborhood_points_and_cost(
        &self,
        pos: &Point,
        movement: DiagonalMovement,
    ) -> SmallVec<[(Point, i32); N_SMALLVEC_SIZE]> {
        self.neighborhood_points(pos, movement)
            .into_iter()
            .filter(|p| self.can_move(*pos, *p, movement))
            // Odd direction numbers are the diagonals
            .map(|p| (p, (pos.dir_obj(&p).num() % 2) * (D - C) + C))
            .collect()
    }

    /// Generates a new [UnionFind] structure and links up walkable neighbours to the same
    /// components. Moves are symmetric, so only neighbours with a larger index are linked.
    pub fn generate_components(&self, movement: DiagonalMovement) -> Components {
        let mut sets = UnionFind::new(self.width() * self.height());
        for cell in self.cells().filter(|c| c.walkable) {
            let point = cell.point();
            let parent_ix = self.grid.get_ix_point(&point);
            for n in self.neighborhood_points(&point, movement) {
                if self.can_move(point, n, movement) {
                    let ix = self.grid.get_ix_point(&n);
                    if ix > parent_ix {
                        sets.union(parent_ix, ix);
                    }
                }
            }
        }
        Components {
            sets,
            walkable: self.grid.clone(),
        }
    }
}

impl fmt::Display for BoardGrid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for y in 0..self.height() {
            let row = (0..self.width())
                .map(|x| if self.grid.get(x, y) { '.' } else { '#' })
                .collect::<String>();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
