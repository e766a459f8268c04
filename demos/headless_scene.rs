use tile_pathing::{
    ClickEvent, HeadlessHost, PathScene, PerspectiveCamera, Point, Primitive, SceneConfig,
    Viewport,
};

// Drives the arc scene without a window: two clicks on tiles of the default 10x10 board
// compute and draw a path, a click beside the board is ignored. Run with RUST_LOG=debug to
// follow picks and path queries.
fn main() {
    env_logger::init();
    let viewport = Viewport::new(1280.0, 720.0);
    let camera = PerspectiveCamera::angled(viewport.aspect());
    let mut scene = PathScene::new(SceneConfig::arc_path(), HeadlessHost::new(camera, viewport));
    scene.grid_mut().set_walkable(4, 4, false).expect("cell is on the board");

    let layout = scene.config().layout;
    let clicks = [Point::new(1, 2), Point::new(8, 7)].map(|cell| {
        let top = layout.cell_center(cell) + glam::Vec3::Y * (layout.block_height * 0.5);
        let screen = camera.world_to_screen(top, viewport);
        ClickEvent::plain(screen.x, screen.y)
    });

    println!("{:?}", scene.handle_click(ClickEvent::plain(2.0, 2.0)));
    for click in clicks {
        println!("{:?}", scene.handle_click(click));
        scene.update();
    }
    for primitive in &scene.host().path_group {
        match primitive {
            Primitive::Sphere { center, color, .. } => {
                println!("sphere at {:?} color {:06x}", center, color.0)
            }
            Primitive::LineStrip { points, color, .. } => {
                println!("line of {} points color {:06x}", points.len(), color.0)
            }
        }
    }
}
