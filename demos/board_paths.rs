use tile_pathing::{AstarFinder, BoardGrid, FinderOptions, Heuristic, Point};

// In this example paths are found on a grid with shape
//  _____
// |S    |
// | ### |
// |   #E|
//  _____
// where
// - # marks an obstacle
// - S marks the start
// - E marks the end
//
// Once with a 4-neighborhood, once with diagonal steps that may not cross corners.

fn main() {
    env_logger::init();
    let mut grid = BoardGrid::new(5, 3);
    for (x, y) in [(1, 1), (2, 1), (3, 1), (3, 2)] {
        grid.set_walkable(x, y, false).expect("cell is on the board");
    }
    println!("{}", grid);
    let start = Point::new(0, 0);
    let end = Point::new(4, 2);
    for options in [
        FinderOptions::default(),
        FinderOptions::new(true, true).with_heuristic(Heuristic::Octile),
    ] {
        let path = AstarFinder::new(options).find_path(&grid.clone(), start, end);
        println!("Path ({:?}):", options.diagonal_movement());
        for p in path {
            println!("{:?}", p);
        }
    }
}
