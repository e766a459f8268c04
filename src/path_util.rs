use grid_util::point::Point;

/// Turns waypoints into a path on the grid which can be followed step by step. Between two
/// waypoints diagonal steps are taken first, then straight ones, so segments whose axes
/// differ unequally are only reproduced exactly when they came from [compress_path].
pub fn expand_path(waypoints: &[Point]) -> Vec<Point> {
    let mut path: Vec<Point> = Vec::new();
    let mut iter = waypoints.iter();
    let Some(mut current) = iter.next().copied() else {
        return path;
    };
    path.push(current);
    for next in iter {
        while current.move_distance(next) >= 1 {
            let delta = current.dir(next);
            current = current + delta;
            path.push(current);
        }
    }
    path
}

/// Keeps the endpoints and every cell at which the step direction changes.
pub fn compress_path(path: &[Point]) -> Vec<Point> {
    if path.len() < 3 {
        return path.to_vec();
    }
    let mut waypoints = vec![path[0]];
    for window in path.windows(3) {
        let (a, b, c) = (window[0], window[1], window[2]);
        if a.dir_obj(&b) != b.dir_obj(&c) {
            waypoints.push(b);
        }
    }
    waypoints.push(path[path.len() - 1]);
    waypoints
}
