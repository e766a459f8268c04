//! # tile_pathing
//!
//! Pathfinding and path display for a small tile board. A [BoardGrid] holds the
//! walkability of every tile, an [AstarFinder] runs A* over a snapshot of it with
//! configurable diagonal rules and heuristics, a [PickResolver] turns mouse clicks into
//! tiles by casting a ray through a [PerspectiveCamera], and a [PathVisualizer] maps the
//! resulting path to renderable primitives (spheres and line strips along the path, or a
//! parabolic arc between its endpoints).
//!
//! Rendering and windowing stay outside the crate behind the [SceneHost] trait; a
//! [PathScene] wires the pieces together and drives the two-click selection cycle.
//! Costs are integers: a cardinal step costs [C] and a diagonal step costs [D].
pub mod astar;
pub mod board_grid;
pub mod config;
pub mod error;
pub mod finder;
pub mod layout;
pub mod path_util;
pub mod picking;
pub mod scene;
pub mod selection;
pub mod visualizer;

pub use board_grid::{BoardGrid, Cell, Components, DiagonalMovement};
pub use config::{ClickTrigger, SceneConfig};
pub use error::GridError;
pub use finder::{AstarFinder, FinderOptions, Heuristic};
pub use grid_util::point::Point;
pub use layout::BoardLayout;
pub use picking::{
    BoardMarker, Highlight, PerspectiveCamera, PickHit, PickResolver, Ray, RayCaster, Viewport,
};
pub use scene::{ClickEvent, ClickOutcome, HeadlessHost, PathScene, SceneHost};
pub use selection::{Selection, SelectionEvent};
pub use visualizer::{Color, PathGeometry, PathStyle, PathVisualizer, Primitive, Visualization};

/// Cost of a cardinal step.
pub const C: i32 = 99;
/// Cost of a diagonal step, `C` times the square root of two rounded down.
pub const D: i32 = 140;
/// Helper constant for the octile distance closed form.
pub const E: i32 = 2 * C - D;
const N_SMALLVEC_SIZE: usize = 8;

/// Sums the step costs along a path. Steps are expected to be between adjacent cells.
pub fn path_cost(path: &[Point]) -> i32 {
    path.windows(2)
        .map(|w| {
            let diagonal = w[0].x != w[1].x && w[0].y != w[1].y;
            if diagonal {
                D
            } else {
                C
            }
        })
        .sum()
}

/// Converts the integer cost to an approximate floating point equivalent where cardinal
/// directions have cost 1.0.
pub fn unit_cost(cost: i32) -> f64 {
    (cost as f64) / (C as f64)
}
