//! Whole-pipeline checks: camera rays through a scene to written pixels.

use prism_renderer::{
    render, trace_ray, BvhNode, Camera, Color, Hittable, ImageWriter, Lambertian, Material,
    PpmWriter, Ray, RenderConfig, Scene, Schedule, Sphere, Vec3,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::Arc;

const BACKGROUND: Color = Color::new(0.5, 0.7, 1.0);

fn single_sphere_world() -> Scene {
    let material: Arc<dyn Material> = Arc::new(Lambertian::new(Color::splat(0.5)));
    let mut world = Scene::new();
    world.add(Arc::new(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5, material)));
    world
}

fn config() -> RenderConfig {
    RenderConfig {
        background: BACKGROUND,
        use_sky_gradient: false,
        seed: Some(42),
        schedule: Schedule::PerRow,
    }
}

fn camera(width: u32, samples: u32, depth: u32) -> Camera {
    let mut camera = Camera::new()
        .with_image(width, 1.0)
        .with_quality(samples, depth)
        .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
        .with_lens(90.0, 0.0, 1.0);
    camera.initialize();
    camera
}

#[test]
fn center_ray_hits_sphere_and_miss_sees_background() {
    let world = single_sphere_world();
    let mut rng = StdRng::seed_from_u64(42);

    let center = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
    let color = trace_ray(&center, &world, None, 1, &config(), &mut rng);
    assert_ne!(color, BACKGROUND);

    let miss = Ray::new(Vec3::ZERO, Vec3::new(1.0, 0.0, -1.0));
    let color = trace_ray(&miss, &world, None, 1, &config(), &mut rng);
    assert_eq!(color, BACKGROUND);
}

#[test]
fn rendered_image_has_sphere_in_the_middle() {
    let world = single_sphere_world();
    let mut rng = StdRng::seed_from_u64(42);
    let bvh = BvhNode::from_scene(&world, &mut rng);
    let camera = camera(21, 1, 1);

    let image = render(&camera, &bvh, None, &config());
    assert_eq!((image.width, image.height), (21, 21));

    // Depth 1: the sphere is black, everything else is background
    assert_eq!(image.get_pixel(10, 10), Color::ZERO);
    assert_eq!(image.get_pixel(0, 0), BACKGROUND);
    assert_eq!(image.get_pixel(20, 20), BACKGROUND);
}

#[test]
fn bvh_and_scene_render_identically() {
    let material: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.6, 0.4, 0.2)));
    let mut world = Scene::new();
    for i in 0..12 {
        let x = (i % 4) as f64 - 1.5;
        let y = (i / 4) as f64 - 1.0;
        world.add(Arc::new(Sphere::new(Vec3::new(x, y, -3.0), 0.4, material.clone())));
    }

    let mut rng = StdRng::seed_from_u64(7);
    let bvh = BvhNode::from_scene(&world, &mut rng);
    let camera = camera(16, 4, 4);

    let linear = render(&camera, &world, None, &config());
    let accelerated = render(&camera, &bvh as &dyn Hittable, None, &config());
    assert_eq!(linear, accelerated);
}

#[test]
fn written_ppm_matches_image() {
    let world = single_sphere_world();
    let camera = camera(5, 1, 1);
    let image = render(&camera, &world, None, &config());

    let mut out = Vec::new();
    PpmWriter.write(&image, &mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let mut lines = text.lines();

    assert_eq!(lines.next(), Some("P3"));
    assert_eq!(lines.next(), Some("5 5"));
    assert_eq!(lines.next(), Some("255"));

    let rows: Vec<&str> = lines.collect();
    assert_eq!(rows.len(), 5);
    for row in &rows {
        assert_eq!(row.split_whitespace().count(), 15);
    }
    // Corner is background, centre is the unlit sphere
    assert!(rows[0].starts_with("180 213 255"));
    assert_eq!(rows[2].split_whitespace().nth(6), Some("0"));
}
