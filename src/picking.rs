//! Screen-space picking of board tiles.
//!
//! A click is normalized to device coordinates, turned into a world-space [Ray] by a
//! [RayCaster] (usually a [PerspectiveCamera]) and intersected with the axis-aligned boxes of
//! all [BoardMarker]s. The nearest hit wins.
use crate::layout::BoardLayout;
use glam::{Mat4, Vec2, Vec3};
use grid_util::point::Point;
use log::debug;

/// Size of the drawing surface in pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Viewport {
        Viewport { width, height }
    }
    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
    /// Normalizes a pixel position to device coordinates in `[-1, 1]`, with `+y` pointing up.
    pub fn to_ndc(&self, screen_x: f32, screen_y: f32) -> Vec2 {
        Vec2::new(
            (screen_x / self.width) * 2.0 - 1.0,
            -(screen_y / self.height) * 2.0 + 1.0,
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    /// Unit length.
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Ray {
        Ray {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
    /// Distance along the ray to the box `[min, max]` using the slab method. A ray starting
    /// inside the box reports its exit distance. Faces count as part of the box, also for rays
    /// running parallel to them.
    pub fn intersect_aabb(&self, min: Vec3, max: Vec3) -> Option<f32> {
        let mut t_enter = f32::NEG_INFINITY;
        let mut t_exit = f32::INFINITY;
        for axis in 0..3 {
            let (o, d) = (self.origin[axis], self.direction[axis]);
            if d == 0.0 {
                if o < min[axis] || o > max[axis] {
                    return None;
                }
                continue;
            }
            let t1 = (min[axis] - o) / d;
            let t2 = (max[axis] - o) / d;
            t_enter = t_enter.max(t1.min(t2));
            t_exit = t_exit.min(t1.max(t2));
        }
        if t_exit < 0.0 || t_enter > t_exit {
            return None;
        }
        Some(if t_enter >= 0.0 { t_enter } else { t_exit })
    }
}

/// Anything that can shoot a ray through a point given in device coordinates.
pub trait RayCaster {
    fn ray_through(&self, ndc: Vec2) -> Ray;
}

/// Right-handed perspective camera with OpenGL depth conventions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PerspectiveCamera {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov_y_degrees: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl PerspectiveCamera {
    pub fn new(position: Vec3, target: Vec3, aspect: f32) -> PerspectiveCamera {
        PerspectiveCamera {
            position,
            target,
            up: Vec3::Y,
            fov_y_degrees: 75.0,
            aspect,
            near: 0.01,
            far: 1000.0,
        }
    }
    /// Straight above the board center.
    pub fn overhead(aspect: f32) -> PerspectiveCamera {
        PerspectiveCamera::new(Vec3::new(0.0, 20.0, 0.0), Vec3::ZERO, aspect)
    }
    /// Above and to the side of the board, looking at its center.
    pub fn angled(aspect: f32) -> PerspectiveCamera {
        PerspectiveCamera::new(Vec3::new(20.0, 20.0, 0.0), Vec3::ZERO, aspect)
    }

    pub fn view_matrix(&self) -> Mat4 {
        let forward = (self.target - self.position).normalize_or_zero();
        // Looking along the up vector leaves the roll undefined; fall back to -Z as up.
        let up = if forward.cross(self.up).length_squared() < 1e-8 {
            Vec3::NEG_Z
        } else {
            self.up
        };
        Mat4::look_at_rh(self.position, self.target, up)
    }
    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh_gl(
            self.fov_y_degrees.to_radians(),
            self.aspect,
            self.near,
            self.far,
        )
    }
    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
    /// Pixel position of a world point, the inverse of [Viewport::to_ndc] after projection.
    pub fn world_to_screen(&self, world: Vec3, viewport: Viewport) -> Vec2 {
        let ndc = self.view_projection().project_point3(world);
        Vec2::new(
            (ndc.x + 1.0) * 0.5 * viewport.width,
            (1.0 - ndc.y) * 0.5 * viewport.height,
        )
    }
}

impl RayCaster for PerspectiveCamera {
    fn ray_through(&self, ndc: Vec2) -> Ray {
        let inverse = self.view_projection().inverse();
        let far = inverse.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Ray::new(self.position, far - self.position)
    }
}

/// Display-only highlight state of a tile; never feeds back into the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Highlight {
    #[default]
    Plain,
    InRange,
    OnPath,
}

/// The pickable box drawn for one board cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoardMarker {
    pub cell: Point,
    pub center: Vec3,
    pub half_extents: Vec3,
    pub highlight: Highlight,
}

impl BoardMarker {
    /// One marker per cell of `layout`, ordered `x` major, so the marker of `(x, y)` has index
    /// `x * height + y`.
    pub fn grid(layout: &BoardLayout) -> Vec<BoardMarker> {
        let half = Vec3::new(layout.cell_size, layout.block_height, layout.cell_size) * 0.5;
        layout
            .cells()
            .map(|cell| BoardMarker {
                cell,
                center: layout.cell_center(cell),
                half_extents: half,
                highlight: Highlight::Plain,
            })
            .collect()
    }
    pub fn min(&self) -> Vec3 {
        self.center - self.half_extents
    }
    pub fn max(&self) -> Vec3 {
        self.center + self.half_extents
    }
    pub fn intersect(&self, ray: &Ray) -> Option<f32> {
        ray.intersect_aabb(self.min(), self.max())
    }
}

/// Nearest marker under the cursor.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickHit {
    pub index: usize,
    pub cell: Point,
    pub distance: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PickResolver {
    /// Hits farther away than this are ignored.
    pub far: f32,
}

impl Default for PickResolver {
    fn default() -> PickResolver {
        PickResolver { far: f32::INFINITY }
    }
}

impl PickResolver {
    /// Resolves a click at pixel `(screen_x, screen_y)` to the nearest marker. Equally near
    /// hits resolve to the lower index.
    pub fn resolve<R: RayCaster + ?Sized>(
        &self,
        screen_x: f32,
        screen_y: f32,
        viewport: Viewport,
        camera: &R,
        markers: &[BoardMarker],
    ) -> Option<PickHit> {
        if viewport.is_empty() {
            return None;
        }
        let ndc = viewport.to_ndc(screen_x, screen_y);
        let ray = camera.ray_through(ndc);
        let hit = markers
            .iter()
            .enumerate()
            .filter_map(|(index, marker)| {
                marker
                    .intersect(&ray)
                    .filter(|d| *d <= self.far)
                    .map(|distance| PickHit {
                        index,
                        cell: marker.cell,
                        distance,
                    })
            })
            .fold(None, |best: Option<PickHit>, hit| match best {
                Some(b) if b.distance <= hit.distance => Some(b),
                _ => Some(hit),
            });
        debug!("pick at ndc {:?} -> {:?}", ndc, hit.map(|h| h.cell));
        hit
    }
}
