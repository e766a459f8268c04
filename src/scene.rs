//! Thin adapter between the board logic and whatever renders it.
//!
//! The renderer, window and input plumbing stay behind [SceneHost]. [PathScene] owns the
//! grid, the tile markers and the selection state and reacts to clicks: the first accepted
//! pick marks the start tile, the second runs a path query on a fresh copy of the grid and
//! replaces the drawn path.
use crate::board_grid::BoardGrid;
use crate::config::SceneConfig;
use crate::finder::AstarFinder;
use crate::picking::{BoardMarker, PerspectiveCamera, PickResolver, RayCaster, Viewport};
use crate::selection::{Selection, SelectionEvent};
use crate::visualizer::{
    highlight_range, mark_path, reset_highlights, PathVisualizer, Primitive,
};
use grid_util::point::Point;
use log::{debug, info};

/// Rendering collaborator. Only needs to report its viewport, expose a camera to cast pick
/// rays with and maintain a single group of path primitives.
pub trait SceneHost {
    type Camera: RayCaster;

    fn viewport(&self) -> Viewport;
    fn camera(&self) -> &Self::Camera;
    fn clear_path_group(&mut self);
    fn add_to_path_group(&mut self, primitive: Primitive);
    /// Per-frame tick, e.g. to advance camera controls.
    fn update(&mut self) {}
}

/// In-memory [SceneHost] used by tests and demos.
#[derive(Clone, Debug)]
pub struct HeadlessHost {
    pub camera: PerspectiveCamera,
    pub viewport: Viewport,
    pub path_group: Vec<Primitive>,
    pub frames: u64,
}

impl HeadlessHost {
    pub fn new(camera: PerspectiveCamera, viewport: Viewport) -> HeadlessHost {
        HeadlessHost {
            camera,
            viewport,
            path_group: Vec::new(),
            frames: 0,
        }
    }
}

impl SceneHost for HeadlessHost {
    type Camera = PerspectiveCamera;

    fn viewport(&self) -> Viewport {
        self.viewport
    }
    fn camera(&self) -> &PerspectiveCamera {
        &self.camera
    }
    fn clear_path_group(&mut self) {
        self.path_group.clear();
    }
    fn add_to_path_group(&mut self, primitive: Primitive) {
        self.path_group.push(primitive);
    }
    fn update(&mut self) {
        self.frames += 1;
    }
}

/// A mouse click in pixels with the modifier key state.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClickEvent {
    pub x: f32,
    pub y: f32,
    pub ctrl_key: bool,
}

impl ClickEvent {
    pub fn plain(x: f32, y: f32) -> ClickEvent {
        ClickEvent {
            x,
            y,
            ctrl_key: false,
        }
    }
    pub fn with_ctrl(x: f32, y: f32) -> ClickEvent {
        ClickEvent {
            x,
            y,
            ctrl_key: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ClickOutcome {
    /// The click does not take part in selection under the configured trigger.
    Ignored,
    /// Nothing on the board was hit; the selection is unchanged.
    Missed,
    StartSelected(Point),
    PathDrawn {
        start: Point,
        end: Point,
        path: Vec<Point>,
    },
    Unreachable {
        start: Point,
        end: Point,
    },
}

pub struct PathScene<H: SceneHost> {
    host: H,
    grid: BoardGrid,
    markers: Vec<BoardMarker>,
    selection: Selection,
    finder: AstarFinder,
    visualizer: PathVisualizer,
    resolver: PickResolver,
    config: SceneConfig,
}

impl<H: SceneHost> PathScene<H> {
    pub fn new(config: SceneConfig, host: H) -> PathScene<H> {
        let layout = config.layout;
        PathScene {
            host,
            grid: BoardGrid::new(layout.width, layout.height),
            markers: BoardMarker::grid(&layout),
            selection: Selection::new(),
            finder: AstarFinder::new(config.finder),
            visualizer: PathVisualizer::new(layout, config.visualizer),
            resolver: PickResolver::default(),
            config,
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }
    pub fn grid(&self) -> &BoardGrid {
        &self.grid
    }
    /// Board setup, e.g. blocking tiles. Queries already answered are not affected.
    pub fn grid_mut(&mut self) -> &mut BoardGrid {
        &mut self.grid
    }
    pub fn markers(&self) -> &[BoardMarker] {
        &self.markers
    }
    pub fn selection(&self) -> &Selection {
        &self.selection
    }
    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn update(&mut self) {
        self.host.update();
    }

    /// Drops a pending start tile, the drawn path and all tile highlights.
    pub fn reset(&mut self) {
        self.selection.clear();
        self.host.clear_path_group();
        reset_highlights(&mut self.markers);
    }

    pub fn handle_click(&mut self, event: ClickEvent) -> ClickOutcome {
        if !self.config.trigger.accepts(event.ctrl_key) {
            return ClickOutcome::Ignored;
        }
        let Some(hit) = self.resolver.resolve(
            event.x,
            event.y,
            self.host.viewport(),
            self.host.camera(),
            &self.markers,
        ) else {
            debug!("click at ({}, {}) hit nothing", event.x, event.y);
            return ClickOutcome::Missed;
        };
        match self.selection.pick(hit.cell) {
            SelectionEvent::StartSelected(start) => {
                if self.config.range_highlight_on_start {
                    highlight_range(
                        &mut self.markers,
                        start,
                        self.visualizer.options.highlight_range,
                    );
                }
                ClickOutcome::StartSelected(start)
            }
            SelectionEvent::PathRequested { start, end } => self.find_and_draw(start, end),
        }
    }

    fn find_and_draw(&mut self, start: Point, end: Point) -> ClickOutcome {
        info!("Path requested from {} to {}", start, end);
        let snapshot = self.grid.clone();
        let path = self.finder.find_path(&snapshot, start, end);
        let layout = &self.visualizer.layout;
        let visualization =
            self.visualizer
                .visualize(&path, layout.cell_ground(start), layout.cell_ground(end));
        self.visualizer.present(&mut self.host, &visualization);
        mark_path(&mut self.markers, &path);
        if path.is_empty() {
            ClickOutcome::Unreachable { start, end }
        } else {
            ClickOutcome::PathDrawn { start, end, path }
        }
    }
}
