//! Turns a found path into renderable primitives.
//!
//! Two drawing styles exist and can be combined: a polyline of small spheres along the
//! path cells joined by a line strip, and a single parabolic arc from the start tile to the
//! end tile. Spheres within `highlight_range` (straight-line distance in grid units) of the
//! first path cell use `near_color`, the others `far_color`.
use crate::layout::BoardLayout;
use crate::picking::{BoardMarker, Highlight};
use crate::scene::SceneHost;
use glam::Vec3;
use grid_util::point::Point;
use log::info;

/// A `0xRRGGBB` color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Color(pub u32);

impl Color {
    pub const RED: Color = Color(0xff0000);
    pub const BLUE: Color = Color(0x0000ff);

    /// Channels scaled to `[0, 1]`.
    pub fn rgb(&self) -> [f32; 3] {
        [
            ((self.0 >> 16) & 0xff) as f32 / 255.0,
            ((self.0 >> 8) & 0xff) as f32 / 255.0,
            (self.0 & 0xff) as f32 / 255.0,
        ]
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Primitive {
    Sphere {
        center: Vec3,
        radius: f32,
        color: Color,
    },
    LineStrip {
        points: Vec<Vec3>,
        color: Color,
        depth_test: bool,
    },
}

/// Everything drawn for one path.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PathGeometry {
    pub primitives: Vec<Primitive>,
}

impl PathGeometry {
    pub fn spheres(&self) -> impl Iterator<Item = (Vec3, Color)> + '_ {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::Sphere { center, color, .. } => Some((*center, *color)),
            _ => None,
        })
    }
    pub fn line_strips(&self) -> impl Iterator<Item = &[Vec3]> + '_ {
        self.primitives.iter().filter_map(|p| match p {
            Primitive::LineStrip { points, .. } => Some(points.as_slice()),
            _ => None,
        })
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Visualization {
    /// The path was empty; nothing is drawn.
    Unreachable,
    Path(PathGeometry),
}

impl Visualization {
    pub fn is_unreachable(&self) -> bool {
        matches!(self, Visualization::Unreachable)
    }
    pub fn geometry(&self) -> Option<&PathGeometry> {
        match self {
            Visualization::Path(geometry) => Some(geometry),
            Visualization::Unreachable => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PathStyle {
    Polyline,
    Arc,
    /// Arc and polyline together.
    Combined,
}

impl PathStyle {
    pub fn draws_polyline(&self) -> bool {
        matches!(self, PathStyle::Polyline | PathStyle::Combined)
    }
    pub fn draws_arc(&self) -> bool {
        matches!(self, PathStyle::Arc | PathStyle::Combined)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualizerOptions {
    pub style: PathStyle,
    /// Height of the arc apex above the base plane.
    pub arc_height: f32,
    pub arc_segments: usize,
    pub highlight_range: f32,
    pub sphere_radius: f32,
    /// World height of the path spheres.
    pub marker_height: f32,
    /// Extra height of the line strip above the spheres.
    pub line_lift: f32,
    pub near_color: Color,
    pub far_color: Color,
    pub line_color: Color,
    pub arc_color: Color,
    pub line_depth_test: bool,
}

impl Default for VisualizerOptions {
    fn default() -> VisualizerOptions {
        VisualizerOptions {
            style: PathStyle::Combined,
            arc_height: 5.0,
            arc_segments: 20,
            highlight_range: 3.0,
            sphere_radius: 0.2,
            marker_height: 1.5,
            line_lift: 0.0,
            near_color: Color::BLUE,
            far_color: Color::RED,
            line_color: Color::BLUE,
            arc_color: Color::RED,
            line_depth_test: false,
        }
    }
}

/// Point at parameter `t` of the parabola from `start` to `end`. The horizontal position is
/// interpolated linearly; the height is `(1 - 4 (t - 0.5)^2) * apex_height`, so it is zero at
/// both ends whatever the endpoint heights are.
pub fn parabola_point(t: f32, start: Vec3, end: Vec3, apex_height: f32) -> Vec3 {
    let x = start.x * (1.0 - t) + end.x * t;
    let z = start.z * (1.0 - t) + end.z * t;
    let y = (1.0 - 4.0 * (t - 0.5) * (t - 0.5)) * apex_height;
    Vec3::new(x, y, z)
}

/// `segments + 1` evenly spaced samples of the arc, endpoints included.
pub fn sample_arc(start: Vec3, end: Vec3, apex_height: f32, segments: usize) -> Vec<Vec3> {
    let segments = segments.max(1);
    (0..=segments)
        .map(|i| parabola_point(i as f32 / segments as f32, start, end, apex_height))
        .collect()
}

/// Sets [Highlight::InRange] on every marker within `range` grid units of `center` and resets
/// the rest.
pub fn highlight_range(markers: &mut [BoardMarker], center: Point, range: f32) {
    for marker in markers.iter_mut() {
        marker.highlight = if marker.cell.euclidean_distance(&center) <= range {
            Highlight::InRange
        } else {
            Highlight::Plain
        };
    }
}

/// Sets [Highlight::OnPath] on the markers of all path cells. Markers of an earlier path that
/// are not on `path` go back to [Highlight::Plain], so only one path is ever marked.
pub fn mark_path(markers: &mut [BoardMarker], path: &[Point]) {
    for marker in markers.iter_mut() {
        if path.contains(&marker.cell) {
            marker.highlight = Highlight::OnPath;
        } else if marker.highlight == Highlight::OnPath {
            marker.highlight = Highlight::Plain;
        }
    }
}

pub fn reset_highlights(markers: &mut [BoardMarker]) {
    for marker in markers.iter_mut() {
        marker.highlight = Highlight::Plain;
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct PathVisualizer {
    pub layout: BoardLayout,
    pub options: VisualizerOptions,
}

impl PathVisualizer {
    pub fn new(layout: BoardLayout, options: VisualizerOptions) -> PathVisualizer {
        PathVisualizer { layout, options }
    }

    /// Color of a path sphere at `cell` for a path starting at `origin`.
    pub fn node_color(&self, origin: &Point, cell: &Point) -> Color {
        if origin.euclidean_distance(cell) <= self.options.highlight_range {
            self.options.near_color
        } else {
            self.options.far_color
        }
    }

    /// Builds the geometry for `path`. `start` and `end` are the world positions the arc
    /// connects.
    pub fn visualize(&self, path: &[Point], start: Vec3, end: Vec3) -> Visualization {
        let Some(origin) = path.first() else {
            info!("No path found");
            return Visualization::Unreachable;
        };
        let opts = &self.options;
        let mut primitives = Vec::new();
        if opts.style.draws_arc() {
            primitives.push(Primitive::LineStrip {
                points: sample_arc(start, end, opts.arc_height, opts.arc_segments),
                color: opts.arc_color,
                depth_test: true,
            });
        }
        if opts.style.draws_polyline() {
            let mut line = Vec::with_capacity(path.len());
            for cell in path {
                let center = self.layout.cell_surface(*cell, opts.marker_height);
                primitives.push(Primitive::Sphere {
                    center,
                    radius: opts.sphere_radius,
                    color: self.node_color(origin, cell),
                });
                line.push(center + Vec3::Y * opts.line_lift);
            }
            primitives.push(Primitive::LineStrip {
                points: line,
                color: opts.line_color,
                depth_test: opts.line_depth_test,
            });
        }
        info!("Path visualized ({} cells)", path.len());
        Visualization::Path(PathGeometry { primitives })
    }

    /// Replaces whatever path is currently drawn on `host` with `visualization`.
    pub fn present<H: SceneHost + ?Sized>(&self, host: &mut H, visualization: &Visualization) {
        host.clear_path_group();
        if let Visualization::Path(geometry) = visualization {
            for primitive in &geometry.primitives {
                host.add_to_path_group(primitive.clone());
            }
        }
    }
}
