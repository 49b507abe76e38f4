use criterion::{criterion_group, criterion_main};

use splatvox_rs::octree::{Albedo, VoxelTree, V3c};
use splatvox_rs::render::{Camera, CubeFace, CubemapRenderer, FaceTarget, Frustum, PlanarRenderer, RenderConfig};

struct DiscardTarget;

impl FaceTarget for DiscardTarget {
    fn upload(&mut self, _face: CubeFace, _size: u32, pixels: &[u8]) {
        criterion::black_box(pixels);
    }
}

fn scene(tree_size: u32) -> VoxelTree {
    let mut tree = VoxelTree::new(tree_size).ok().unwrap();
    for x in 0..tree_size {
        for y in 0..tree_size {
            for z in 0..tree_size {
                if x < (tree_size / 4)
                    || y < (tree_size / 4)
                    || z < (tree_size / 4)
                    || ((tree_size / 2) <= x && (tree_size / 2) <= y && (tree_size / 2) <= z)
                {
                    tree.insert(&V3c::new(x, y, z), Albedo::from(0x00ABCDEFu32))
                        .ok()
                        .unwrap();
                }
            }
        }
    }
    tree
}

fn criterion_benchmark(c: &mut criterion::Criterion) {
    let tree_size = 64;
    let tree = scene(tree_size);
    let config = RenderConfig {
        mask_depth: 8,
        display_width: 256,
        display_height: 256,
        frustum: Frustum::default(),
    };

    c.bench_function("cubemap render", |b| {
        let mut renderer = CubemapRenderer::new(config.clone()).ok().unwrap();
        let camera = Camera::axis_aligned(V3c::new(
            (tree_size / 2 + 5) as i64,
            (tree_size / 2 + 3) as i64,
            (tree_size / 2) as i64,
        ));
        let mut target = DiscardTarget;
        b.iter(|| {
            renderer.render(&tree, &camera, &mut target);
        })
    });

    c.bench_function("planar render", |b| {
        let mut renderer = PlanarRenderer::new(config.clone()).ok().unwrap();
        let camera = Camera::axis_aligned(V3c::new(
            (tree_size / 2) as i64,
            (tree_size / 2) as i64,
            -(tree_size as i64),
        ));
        b.iter(|| {
            renderer.render(&tree, &camera);
            criterion::black_box(renderer.pixels());
        })
    });

    c.bench_function("tree insert", |b| {
        use rand::Rng;
        let mut rng = rand::thread_rng();
        let mut tree = VoxelTree::new(tree_size).ok().unwrap();
        b.iter(|| {
            tree.insert(
                &V3c::new(
                    rng.gen_range(0..tree_size),
                    rng.gen_range(0..tree_size),
                    rng.gen_range(0..tree_size),
                ),
                Albedo::from(0x00ABCDEFu32),
            )
            .ok()
            .unwrap();
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
