/// Fuzzes the path finder on random boards: a path must be found exactly when start and goal
/// share a connected component, and its cost must match an uninformed search. All movement
/// policies are exercised.
use rand::prelude::*;
use tile_pathing::{
    astar::astar, path_cost, AstarFinder, BoardGrid, DiagonalMovement, FinderOptions, Heuristic,
    Point,
};

const POLICIES: [DiagonalMovement; 4] = [
    DiagonalMovement::Never,
    DiagonalMovement::Always,
    DiagonalMovement::IfAtMostOneObstacle,
    DiagonalMovement::OnlyWhenNoObstacles,
];

fn random_grid(w: usize, h: usize, rng: &mut StdRng) -> BoardGrid {
    let mut grid = BoardGrid::new(w, h);
    for x in 0..w as i32 {
        for y in 0..h as i32 {
            grid.set_walkable(x, y, !rng.gen_bool(0.4)).unwrap();
        }
    }
    grid
}

fn visualize_grid(grid: &BoardGrid, start: &Point, end: &Point) {
    for y in 0..grid.height() as i32 {
        for x in 0..grid.width() as i32 {
            let p = Point::new(x, y);
            if *start == p {
                print!("S");
            } else if *end == p {
                print!("G");
            } else if !grid.is_walkable(p) {
                print!("#");
            } else {
                print!(".");
            }
        }
        println!();
    }
}

/// Dijkstra (A* with a zero heuristic) over the same successor function.
fn reference_cost(grid: &BoardGrid, start: Point, end: Point, movement: DiagonalMovement) -> Option<i32> {
    astar(
        &start,
        |node| grid.neighborhood_points_and_cost(node, movement),
        |_| 0,
        |node| *node == end,
    )
    .map(|(_, cost)| cost)
}

#[test]
fn fuzz() {
    const N: usize = 10;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(0);
    let start = Point::new(0, 0);
    let end = Point::new(N as i32 - 1, N as i32 - 1);
    for movement in POLICIES {
        let finder = AstarFinder::new(FinderOptions::default().with_diagonal_movement(movement));
        for _ in 0..N_GRIDS {
            let mut grid = random_grid(N, N, &mut rng);
            grid.set_walkable(start.x, start.y, true).unwrap();
            grid.set_walkable(end.x, end.y, true).unwrap();
            let reachable = grid.generate_components(movement).reachable(&start, &end);
            let path = finder.find_path(&grid, start, end);
            // Show the grid if a path is not found
            if path.is_empty() == reachable {
                visualize_grid(&grid, &start, &end);
            }
            assert_eq!(!path.is_empty(), reachable);
        }
    }
}

#[test]
fn fuzz_distance() {
    const N: usize = 6;
    const N_GRIDS: usize = 2000;
    let mut rng = StdRng::seed_from_u64(1);
    for movement in POLICIES {
        let heuristic = if movement.allows_diagonal() {
            Heuristic::Octile
        } else {
            Heuristic::Manhattan
        };
        let finder = AstarFinder::new(
            FinderOptions::default()
                .with_diagonal_movement(movement)
                .with_heuristic(heuristic),
        );
        for _ in 0..N_GRIDS {
            let grid = random_grid(N, N, &mut rng);
            let start = Point::new(rng.gen_range(0..N as i32), rng.gen_range(0..N as i32));
            let end = Point::new(rng.gen_range(0..N as i32), rng.gen_range(0..N as i32));
            let path = finder.find_path(&grid, start, end);
            let expected = if grid.is_walkable(start) && grid.is_walkable(end) {
                reference_cost(&grid, start, end, movement)
            } else {
                None
            };
            match expected {
                Some(cost) => {
                    if path_cost(&path) != cost {
                        println!("movement: {movement:?}; path: {path:?}");
                        visualize_grid(&grid, &start, &end);
                    }
                    assert_eq!(path.first(), Some(&start));
                    assert_eq!(path.last(), Some(&end));
                    assert_eq!(path_cost(&path), cost);
                }
                None => assert!(path.is_empty()),
            }
        }
    }
}

#[test]
fn repeated_queries_are_identical() {
    let mut rng = StdRng::seed_from_u64(2);
    let finder = AstarFinder::new(FinderOptions::new(true, true));
    for _ in 0..200 {
        let grid = random_grid(10, 10, &mut rng);
        let start = Point::new(rng.gen_range(0..10), rng.gen_range(0..10));
        let end = Point::new(rng.gen_range(0..10), rng.gen_range(0..10));
        let snapshot = grid.clone();
        assert_eq!(
            finder.find_path(&snapshot, start, end),
            finder.find_path(&snapshot, start, end)
        );
        assert_eq!(finder.find_path(&grid, start, end), finder.find_path(&snapshot, start, end));
    }
}
