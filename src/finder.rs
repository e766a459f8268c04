use crate::astar::astar;
use crate::board_grid::{BoardGrid, DiagonalMovement};
use crate::{C, D, E};
use core::fmt;
use grid_util::point::Point;
use log::{debug, info, warn};

/// Estimate of the remaining cost, evaluated on the absolute axis deltas `(dx, dy)` between
/// a cell and the goal in unit-cost space.
#[derive(Clone, Copy)]
pub enum Heuristic {
    Manhattan,
    Euclidean,
    /// Cost of taking as many diagonal steps as possible before going straight.
    Octile,
    Chebyshev,
    Custom(fn(f64, f64) -> f64),
}

impl Heuristic {
    /// Heuristic value in integer cost units (a cardinal step costs [C]).
    pub fn estimate(&self, dx: i32, dy: i32) -> i32 {
        let (dx, dy) = (dx.abs(), dy.abs());
        match self {
            Heuristic::Manhattan => (dx + dy) * C,
            Heuristic::Euclidean => (((dx * dx + dy * dy) as f64).sqrt() * C as f64) as i32,
            // Formula from https://github.com/riscy/a_star_on_grids
            Heuristic::Octile => (E * (dx - dy).abs() + D * (dx + dy)) / 2,
            Heuristic::Chebyshev => dx.max(dy) * C,
            Heuristic::Custom(f) => (f(dx as f64, dy as f64) * C as f64) as i32,
        }
    }
}

impl fmt::Debug for Heuristic {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Heuristic::Manhattan => write!(f, "Manhattan"),
            Heuristic::Euclidean => write!(f, "Euclidean"),
            Heuristic::Octile => write!(f, "Octile"),
            Heuristic::Chebyshev => write!(f, "Chebyshev"),
            Heuristic::Custom(_) => write!(f, "Custom"),
        }
    }
}

/// Search configuration. `dont_cross_corners` only matters when `allow_diagonal` is set.
#[derive(Clone, Copy, Debug)]
pub struct FinderOptions {
    pub allow_diagonal: bool,
    pub dont_cross_corners: bool,
    pub heuristic: Heuristic,
    /// Scales the heuristic; values above 1 give weighted A*.
    pub heuristic_factor: f32,
    movement_override: Option<DiagonalMovement>,
}

impl Default for FinderOptions {
    fn default() -> FinderOptions {
        FinderOptions {
            allow_diagonal: false,
            dont_cross_corners: false,
            heuristic: Heuristic::Manhattan,
            heuristic_factor: 1.0,
            movement_override: None,
        }
    }
}

impl FinderOptions {
    pub fn new(allow_diagonal: bool, dont_cross_corners: bool) -> FinderOptions {
        FinderOptions {
            allow_diagonal,
            dont_cross_corners,
            ..FinderOptions::default()
        }
    }
    pub fn with_heuristic(mut self, heuristic: Heuristic) -> FinderOptions {
        self.heuristic = heuristic;
        self
    }
    pub fn with_heuristic_factor(mut self, factor: f32) -> FinderOptions {
        self.heuristic_factor = factor;
        self
    }
    /// Pins the diagonal policy, ignoring `allow_diagonal` and `dont_cross_corners`.
    pub fn with_diagonal_movement(mut self, movement: DiagonalMovement) -> FinderOptions {
        self.movement_override = Some(movement);
        self
    }
    pub fn diagonal_movement(&self) -> DiagonalMovement {
        if let Some(movement) = self.movement_override {
            movement
        } else if !self.allow_diagonal {
            DiagonalMovement::Never
        } else if self.dont_cross_corners {
            DiagonalMovement::OnlyWhenNoObstacles
        } else {
            DiagonalMovement::IfAtMostOneObstacle
        }
    }
}

/// A* path finder over a [BoardGrid] snapshot. Searches are pure functions of the grid,
/// endpoints and options.
#[derive(Clone, Debug, Default)]
pub struct AstarFinder {
    pub options: FinderOptions,
}

impl AstarFinder {
    pub fn new(options: FinderOptions) -> AstarFinder {
        AstarFinder { options }
    }

    fn heuristic(&self, p1: &Point, p2: &Point) -> i32 {
        (self.options.heuristic.estimate(p1.x - p2.x, p1.y - p2.y) as f32
            * self.options.heuristic_factor) as i32
    }

    /// Computes a shortest path from `start` to `goal`, both inclusive. An empty path means
    /// the goal cannot be reached, including when either endpoint is blocked or off the board.
    pub fn find_path(&self, grid: &BoardGrid, start: Point, goal: Point) -> Vec<Point> {
        let movement = self.options.diagonal_movement();
        debug!("A* query {} -> {} ({:?})", start, goal, movement);
        if !grid.is_walkable(start) || !grid.is_walkable(goal) {
            info!("{} or {} is not a walkable cell", start, goal);
            return Vec::new();
        }
        let components = grid.generate_components(movement);
        if !components.reachable(&start, &goal) {
            info!("{} is not reachable from {}", goal, start);
            return Vec::new();
        }
        match astar(
            &start,
            |node| grid.neighborhood_points_and_cost(node, movement),
            |point| self.heuristic(point, &goal),
            |point| *point == goal,
        ) {
            Some((path, _cost)) => path,
            None => {
                warn!("Reachable goal could not be pathed to, are the components correct?");
                Vec::new()
            }
        }
    }

    /// Computes a path from the start to the goal closest by heuristic and returns the selected
    /// goal in addition to the path.
    pub fn find_path_multiple_goals(
        &self,
        grid: &BoardGrid,
        start: Point,
        goals: &[Point],
    ) -> Option<(Point, Vec<Point>)> {
        let movement = self.options.diagonal_movement();
        if !grid.is_walkable(start) {
            return None;
        }
        let components = grid.generate_components(movement);
        let goals = goals
            .iter()
            .copied()
            .filter(|g| grid.is_walkable(*g) && components.reachable(&start, g))
            .collect::<Vec<Point>>();
        if goals.is_empty() {
            info!("None of the goals is reachable from {}", start);
            return None;
        }
        let (path, _cost) = astar(
            &start,
            |node| grid.neighborhood_points_and_cost(node, movement),
            |point| {
                goals
                    .iter()
                    .map(|g| self.heuristic(point, g))
                    .min()
                    .unwrap_or(0)
            },
            |point| goals.contains(point),
        )?;
        path.last().copied().map(|goal| (goal, path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::path_cost;

    fn blocked(width: usize, height: usize, cells: &[(i32, i32)]) -> BoardGrid {
        let mut grid = BoardGrid::new(width, height);
        for (x, y) in cells {
            grid.set_walkable(*x, *y, false).unwrap();
        }
        grid
    }

    fn moves(path: &[Point]) -> usize {
        path.len().saturating_sub(1)
    }

    /// Asserts that the case in which start and goal are equal is handled correctly.
    #[test]
    fn equal_start_goal() {
        for allow_diag in [false, true] {
            let grid = BoardGrid::new(1, 1);
            let finder = AstarFinder::new(FinderOptions::new(allow_diag, false));
            let start = Point::new(0, 0);
            assert_eq!(finder.find_path(&grid, start, start), vec![start]);
        }
    }

    /// Asserts that the optimal solution around a center obstacle is found.
    #[test]
    fn solve_simple_problem() {
        for (options, expected) in [
            (FinderOptions::new(false, false), 5),
            (FinderOptions::new(true, false), 4),
            (FinderOptions::new(true, true), 5),
        ] {
            let grid = blocked(3, 3, &[(1, 1)]);
            let finder = AstarFinder::new(options.with_heuristic(Heuristic::Octile));
            let path = finder.find_path(&grid, Point::new(0, 0), Point::new(2, 2));
            assert_eq!(path.len(), expected, "{:?}", options);
        }
    }

    #[test]
    fn endpoints_included() {
        let grid = BoardGrid::new(10, 10);
        let finder = AstarFinder::default();
        let start = Point::new(2, 7);
        let goal = Point::new(8, 1);
        let path = finder.find_path(&grid, start, goal);
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
        assert_eq!(moves(&path), 12);
        assert_eq!(path_cost(&path), 12 * C);
    }

    #[test]
    fn open_grid_distances() {
        let grid = BoardGrid::new(7, 5);
        let orthogonal = AstarFinder::default();
        let diagonal =
            AstarFinder::new(FinderOptions::new(true, true).with_heuristic(Heuristic::Octile));
        for start in grid.cells().map(|c| c.point()) {
            for goal in grid.cells().map(|c| c.point()) {
                let (dx, dy) = ((goal.x - start.x).abs(), (goal.y - start.y).abs());
                let path = orthogonal.find_path(&grid, start, goal);
                assert_eq!(moves(&path), (dx + dy) as usize);
                let path = diagonal.find_path(&grid, start, goal);
                assert_eq!(moves(&path), dx.max(dy) as usize);
                assert_eq!((path[0], path[path.len() - 1]), (start, goal));
            }
        }
    }

    #[test]
    fn steps_are_adjacent() {
        let grid = blocked(6, 6, &[(2, 0), (2, 1), (2, 2), (2, 3), (4, 5), (4, 4)]);
        for options in [FinderOptions::new(false, false), FinderOptions::new(true, true)] {
            let path = AstarFinder::new(options).find_path(&grid, Point::new(0, 0), Point::new(5, 5));
            assert!(!path.is_empty());
            for pair in path.windows(2) {
                let (a, b) = (pair[0], pair[1]);
                assert!((a.x - b.x).abs() <= 1 && (a.y - b.y).abs() <= 1);
                assert!(grid.can_move(a, b, options.diagonal_movement()));
            }
        }
    }

    #[test]
    fn blocked_endpoints_give_empty_path() {
        let grid = blocked(4, 4, &[(3, 3)]);
        let finder = AstarFinder::default();
        assert!(finder
            .find_path(&grid, Point::new(0, 0), Point::new(3, 3))
            .is_empty());
        assert!(finder
            .find_path(&grid, Point::new(3, 3), Point::new(0, 0))
            .is_empty());
        assert!(finder
            .find_path(&grid, Point::new(0, 0), Point::new(4, 0))
            .is_empty());
    }

    // Tests whether the corner rules have the expected effect on path existence in a minimal setting.
    #[test]
    fn diagonal_switch_path() {
        //  ___
        // |.#|
        // |#.|
        //  __
        let grid = blocked(2, 2, &[(1, 0), (0, 1)]);
        let start = Point::new(0, 0);
        let goal = Point::new(1, 1);
        let path_for = |movement| {
            AstarFinder::new(FinderOptions::default().with_diagonal_movement(movement))
                .find_path(&grid, start, goal)
        };
        assert!(path_for(DiagonalMovement::Never).is_empty());
        assert!(path_for(DiagonalMovement::OnlyWhenNoObstacles).is_empty());
        assert!(path_for(DiagonalMovement::IfAtMostOneObstacle).is_empty());
        assert_eq!(path_for(DiagonalMovement::Always), vec![start, goal]);
    }

    #[test]
    fn test_multiple_goals() {
        for (allow_diag, expected) in [(false, 7), (true, 5)] {
            let grid = blocked(5, 5, &[(1, 1)]);
            let finder = AstarFinder::new(
                FinderOptions::new(allow_diag, false).with_heuristic(Heuristic::Octile),
            );
            let goals = [Point::new(4, 4), Point::new(3, 3), Point::new(9, 9)];
            let (selected, path) = finder
                .find_path_multiple_goals(&grid, Point::new(0, 0), &goals)
                .unwrap();
            assert_eq!(selected, Point::new(3, 3));
            assert_eq!(path.len(), expected);
        }
    }

    #[test]
    fn custom_heuristic_is_scaled() {
        let h = Heuristic::Custom(|dx, dy| dx + dy);
        assert_eq!(h.estimate(-3, 4), Heuristic::Manhattan.estimate(3, 4));
        assert_eq!(Heuristic::Octile.estimate(3, 1), 2 * C + D);
        assert_eq!(Heuristic::Chebyshev.estimate(3, 1), 3 * C);
        assert_eq!(Heuristic::Euclidean.estimate(3, 4), 5 * C);
    }

    #[test]
    fn diagonal_policy_from_flags() {
        assert_eq!(
            FinderOptions::new(false, true).diagonal_movement(),
            DiagonalMovement::Never
        );
        assert_eq!(
            FinderOptions::new(true, true).diagonal_movement(),
            DiagonalMovement::OnlyWhenNoObstacles
        );
        assert_eq!(
            FinderOptions::new(true, false).diagonal_movement(),
            DiagonalMovement::IfAtMostOneObstacle
        );
    }
}
