use splatvox_rs::octree::{Albedo, VoxelTree, V3c};
use splatvox_rs::render::{Camera, Frustum, PlanarRenderer, RenderConfig};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".into()),
        )
        .init();

    // a diagonal staircase of colored voxels
    let size = 32u32;
    let mut tree = VoxelTree::new(size).ok().unwrap();
    for step in 0..size {
        for x in 0..size {
            tree.insert(
                &V3c::new(x, step, step),
                Albedo::default()
                    .with_red((8 * step) as u8)
                    .with_green(255 - (8 * step) as u8)
                    .with_blue((x * 8) as u8)
                    .with_alpha(255),
            )
            .ok();
        }
    }

    let config = RenderConfig {
        mask_depth: 9,
        display_width: 512,
        display_height: 512,
        frustum: Frustum::default(),
    };
    let mut renderer = PlanarRenderer::new(config).ok().unwrap();
    let camera = Camera::axis_aligned(V3c::new(16, 20, -40));

    let stats = renderer.render(&tree, &camera);
    println!("prepare {:?} | query {:?}", stats.prepare, stats.query);

    use image::{ImageBuffer, Rgba};
    let size = renderer.target_size();
    let img: ImageBuffer<Rgba<u8>, _> =
        ImageBuffer::from_raw(size, size, renderer.pixels().to_vec()).unwrap();
    img.save("planar.png").ok();
    println!("saved planar.png");
}
