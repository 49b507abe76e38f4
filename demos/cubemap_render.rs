use splatvox_rs::octree::{Albedo, VoxelTree, V3c};
use splatvox_rs::render::{
    Camera, CubeFace, CubemapRenderer, FaceTarget, Frustum, RenderConfig,
};

struct PngTarget;

impl FaceTarget for PngTarget {
    fn upload(&mut self, face: CubeFace, size: u32, pixels: &[u8]) {
        use image::{ImageBuffer, Rgba};
        let img: ImageBuffer<Rgba<u8>, _> =
            ImageBuffer::from_raw(size, size, pixels.to_vec()).unwrap();
        let path = format!("face_{:?}.png", face);
        img.save(&path).ok();
        println!("saved {}", path);
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "debug".into()),
        )
        .init();

    // fill the tree with a colored floor, some pillars and a hovering cube
    let size = 64u32;
    let mut tree = VoxelTree::new(size).ok().unwrap();
    for x in 0..size {
        for z in 0..size {
            tree.insert(
                &V3c::new(x, 8, z),
                Albedo::default()
                    .with_red((x * 4) as u8)
                    .with_green(96)
                    .with_blue((z * 4) as u8)
                    .with_alpha(255),
            )
            .ok();
        }
    }
    for (px, pz) in [(12, 12), (12, 52), (52, 12), (52, 52)] {
        for y in 9..40 {
            tree.insert(&V3c::new(px, y, pz), Albedo::from(0xB0A080u32))
                .ok();
        }
    }
    for x in 28..36 {
        for y in 28..36 {
            for z in 28..36 {
                tree.insert(&V3c::new(x, y, z), Albedo::from(0xD04040u32)).ok();
            }
        }
    }

    let config = RenderConfig {
        mask_depth: 9,
        display_width: 512,
        display_height: 512,
        frustum: Frustum::default(),
    };
    let mut renderer = CubemapRenderer::new(config).ok().unwrap();
    let camera = Camera::axis_aligned(V3c::new(20, 20, 20));

    let stats = renderer.render(&tree, &camera, &mut PngTarget);
    println!(
        "prepare {:?} | query {:?} | transfer {:?}",
        stats.prepare, stats.query, stats.transfer
    );
}
