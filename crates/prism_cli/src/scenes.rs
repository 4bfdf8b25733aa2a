//! Built-in demo scenes.
//!
//! Each builder returns the world (already under a BVH), the lights to sample
//! directly, an uninitialized camera, and the render settings the scene
//! looks right with.

use crate::cli::SceneChoice;
use prism_math::Vec3;
use prism_renderer::sampling::{random_f64, random_range, random_vec3};
use prism_renderer::{
    make_box, BvhNode, Camera, CheckerTexture, Color, Dielectric, DiffuseLight, Hittable,
    Lambertian, Material, Metal, Quad, RenderConfig, RotateY, Scene, Sphere, Translate,
};
use rand::RngCore;
use std::sync::Arc;

/// Everything needed to render one demo.
pub struct SceneSetup {
    pub world: Arc<dyn Hittable>,
    pub lights: Option<Arc<dyn Hittable>>,
    pub camera: Camera,
    pub config: RenderConfig,
}

/// Build the chosen demo. Random placement and BVH axes come from `rng`.
pub fn build(choice: SceneChoice, rng: &mut dyn RngCore) -> SceneSetup {
    match choice {
        SceneChoice::SingleSphere => single_sphere(rng),
        SceneChoice::Spheres => spheres(rng),
        SceneChoice::CheckeredSpheres => checkered_spheres(rng),
        SceneChoice::Quads => quads(rng),
        SceneChoice::SimpleLight => simple_light(rng),
        SceneChoice::CornellBox => cornell_box(rng),
    }
}

fn sky() -> RenderConfig {
    RenderConfig {
        use_sky_gradient: true,
        ..RenderConfig::default()
    }
}

fn dark() -> RenderConfig {
    RenderConfig {
        background: Color::ZERO,
        ..RenderConfig::default()
    }
}

fn bvh(scene: &Scene, rng: &mut dyn RngCore) -> Arc<dyn Hittable> {
    Arc::new(BvhNode::from_scene(scene, rng))
}

fn single_sphere(rng: &mut dyn RngCore) -> SceneSetup {
    let mut world = Scene::new();
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, 0.0, -1.0),
        0.5,
        Arc::new(Lambertian::new(Color::new(0.5, 0.5, 0.5))),
    )));

    let camera = Camera::new()
        .with_image(400, 16.0 / 9.0)
        .with_quality(16, 10)
        .with_position(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y)
        .with_lens(90.0, 0.0, 1.0);

    SceneSetup {
        world: bvh(&world, rng),
        lights: None,
        camera,
        config: sky(),
    }
}

fn spheres(rng: &mut dyn RngCore) -> SceneSetup {
    let mut world = Scene::new();

    let checker = Arc::new(CheckerTexture::from_colors(
        0.32,
        Color::new(0.2, 0.3, 0.1),
        Color::new(0.9, 0.9, 0.9),
    ));
    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Arc::new(Lambertian::from_texture(checker)),
    )));

    for a in -11..11 {
        for b in -11..11 {
            let choose_mat = random_f64(rng);
            let center = Vec3::new(
                a as f64 + 0.9 * random_f64(rng),
                0.2,
                b as f64 + 0.9 * random_f64(rng),
            );

            if (center - Vec3::new(4.0, 0.2, 0.0)).length() <= 0.9 {
                continue;
            }

            let material: Arc<dyn Material> = if choose_mat < 0.8 {
                // Diffuse
                let albedo = random_vec3(rng, 0.0, 1.0) * random_vec3(rng, 0.0, 1.0);
                Arc::new(Lambertian::new(albedo))
            } else if choose_mat < 0.95 {
                // Metal
                let albedo = random_vec3(rng, 0.5, 1.0);
                let fuzz = random_range(rng, 0.0, 0.5);
                Arc::new(Metal::new(albedo, fuzz))
            } else {
                // Glass
                Arc::new(Dielectric::new(1.5))
            };
            world.add(Arc::new(Sphere::new(center, 0.2, material)));
        }
    }

    world.add(Arc::new(Sphere::new(
        Vec3::new(0.0, 1.0, 0.0),
        1.0,
        Arc::new(Dielectric::new(1.5)),
    )));
    world.add(Arc::new(Sphere::new(
        Vec3::new(-4.0, 1.0, 0.0),
        1.0,
        Arc::new(Lambertian::new(Color::new(0.4, 0.2, 0.1))),
    )));
    world.add(Arc::new(Sphere::new(
        Vec3::new(4.0, 1.0, 0.0),
        1.0,
        Arc::new(Metal::new(Color::new(0.7, 0.6, 0.5), 0.0)),
    )));

    log::info!("Spheres scene has {} objects", world.len());

    let camera = Camera::new()
        .with_image(400, 16.0 / 9.0)
        .with_quality(16, 20)
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.6, 10.0);

    SceneSetup {
        world: bvh(&world, rng),
        lights: None,
        camera,
        config: sky(),
    }
}

fn checkered_spheres(rng: &mut dyn RngCore) -> SceneSetup {
    let checker = Arc::new(CheckerTexture::from_colors(
        0.32,
        Color::new(0.2, 0.3, 0.1),
        Color::new(0.9, 0.9, 0.9),
    ));
    let material: Arc<dyn Material> = Arc::new(Lambertian::from_texture(checker));

    let mut world = Scene::new();
    world.add(Arc::new(Sphere::new(Vec3::new(0.0, -10.0, 0.0), 10.0, material.clone())));
    world.add(Arc::new(Sphere::new(Vec3::new(0.0, 10.0, 0.0), 10.0, material)));

    let camera = Camera::new()
        .with_image(400, 16.0 / 9.0)
        .with_quality(16, 20)
        .with_position(Vec3::new(13.0, 2.0, 3.0), Vec3::ZERO, Vec3::Y)
        .with_lens(20.0, 0.0, 10.0);

    SceneSetup {
        world: bvh(&world, rng),
        lights: None,
        camera,
        config: sky(),
    }
}

fn quads(rng: &mut dyn RngCore) -> SceneSetup {
    let left_red = Arc::new(Lambertian::new(Color::new(1.0, 0.2, 0.2)));
    let back_green = Arc::new(Lambertian::new(Color::new(0.2, 1.0, 0.2)));
    let right_blue = Arc::new(Lambertian::new(Color::new(0.2, 0.2, 1.0)));
    let upper_orange = Arc::new(Lambertian::new(Color::new(1.0, 0.5, 0.0)));
    let lower_teal = Arc::new(Lambertian::new(Color::new(0.2, 0.8, 0.8)));

    let mut world = Scene::new();
    world.add(Arc::new(Quad::new(
        Vec3::new(-3.0, -2.0, 5.0),
        Vec3::new(0.0, 0.0, -4.0),
        Vec3::new(0.0, 4.0, 0.0),
        left_red,
    )));
    world.add(Arc::new(Quad::new(
        Vec3::new(-2.0, -2.0, 0.0),
        Vec3::new(4.0, 0.0, 0.0),
        Vec3::new(0.0, 4.0, 0.0),
        back_green,
    )));
    world.add(Arc::new(Quad::new(
        Vec3::new(3.0, -2.0, 1.0),
        Vec3::new(0.0, 0.0, 4.0),
        Vec3::new(0.0, 4.0, 0.0),
        right_blue,
    )));
    world.add(Arc::new(Quad::new(
        Vec3::new(-2.0, 3.0, 1.0),
        Vec3::new(4.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 4.0),
        upper_orange,
    )));
    world.add(Arc::new(Quad::new(
        Vec3::new(-2.0, -3.0, 5.0),
        Vec3::new(4.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -4.0),
        lower_teal,
    )));

    let camera = Camera::new()
        .with_image(400, 1.0)
        .with_quality(16, 20)
        .with_position(Vec3::new(0.0, 0.0, 9.0), Vec3::ZERO, Vec3::Y)
        .with_lens(80.0, 0.0, 10.0);

    SceneSetup {
        world: bvh(&world, rng),
        lights: None,
        camera,
        config: sky(),
    }
}

fn simple_light(rng: &mut dyn RngCore) -> SceneSetup {
    let checker = Arc::new(CheckerTexture::from_colors(
        0.5,
        Color::new(0.2, 0.3, 0.1),
        Color::new(0.9, 0.9, 0.9),
    ));
    let ground: Arc<dyn Material> = Arc::new(Lambertian::from_texture(checker));
    let matte: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.7, 0.4, 0.3)));
    let difflight: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::new(4.0, 4.0, 4.0)));

    let quad_light: Arc<dyn Hittable> = Arc::new(Quad::new(
        Vec3::new(3.0, 1.0, -2.0),
        Vec3::new(2.0, 0.0, 0.0),
        Vec3::new(0.0, 2.0, 0.0),
        difflight.clone(),
    ));
    let sphere_light: Arc<dyn Hittable> =
        Arc::new(Sphere::new(Vec3::new(0.0, 7.0, 0.0), 2.0, difflight));

    let mut world = Scene::new();
    world.add(Arc::new(Sphere::new(Vec3::new(0.0, -1000.0, 0.0), 1000.0, ground)));
    world.add(Arc::new(Sphere::new(Vec3::new(0.0, 2.0, 0.0), 2.0, matte)));
    world.add(quad_light.clone());
    world.add(sphere_light.clone());

    let mut lights = Scene::new();
    lights.add(quad_light);
    lights.add(sphere_light);

    let camera = Camera::new()
        .with_image(400, 16.0 / 9.0)
        .with_quality(64, 20)
        .with_position(Vec3::new(26.0, 3.0, 6.0), Vec3::new(0.0, 2.0, 0.0), Vec3::Y)
        .with_lens(20.0, 0.0, 10.0);

    SceneSetup {
        world: bvh(&world, rng),
        lights: Some(Arc::new(lights)),
        camera,
        config: dark(),
    }
}

fn cornell_box(rng: &mut dyn RngCore) -> SceneSetup {
    let red: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.65, 0.05, 0.05)));
    let white: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.73, 0.73, 0.73)));
    let green: Arc<dyn Material> = Arc::new(Lambertian::new(Color::new(0.12, 0.45, 0.15)));
    let light: Arc<dyn Material> = Arc::new(DiffuseLight::new(Color::new(15.0, 15.0, 15.0)));

    let mut world = Scene::new();
    world.add(Arc::new(Quad::new(
        Vec3::new(555.0, 0.0, 0.0),
        Vec3::new(0.0, 555.0, 0.0),
        Vec3::new(0.0, 0.0, 555.0),
        green,
    )));
    world.add(Arc::new(Quad::new(
        Vec3::ZERO,
        Vec3::new(0.0, 555.0, 0.0),
        Vec3::new(0.0, 0.0, 555.0),
        red,
    )));

    // Ceiling light faces down into the box
    let ceiling_light: Arc<dyn Hittable> = Arc::new(Quad::new(
        Vec3::new(343.0, 554.0, 332.0),
        Vec3::new(-130.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -105.0),
        light,
    ));
    world.add(ceiling_light.clone());

    world.add(Arc::new(Quad::new(
        Vec3::ZERO,
        Vec3::new(555.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, 555.0),
        white.clone(),
    )));
    world.add(Arc::new(Quad::new(
        Vec3::new(555.0, 555.0, 555.0),
        Vec3::new(-555.0, 0.0, 0.0),
        Vec3::new(0.0, 0.0, -555.0),
        white.clone(),
    )));
    world.add(Arc::new(Quad::new(
        Vec3::new(0.0, 0.0, 555.0),
        Vec3::new(555.0, 0.0, 0.0),
        Vec3::new(0.0, 555.0, 0.0),
        white.clone(),
    )));

    let tall: Arc<dyn Hittable> = Arc::new(make_box(
        Vec3::ZERO,
        Vec3::new(165.0, 330.0, 165.0),
        white.clone(),
    ));
    let tall = Arc::new(RotateY::new(tall, 15.0));
    world.add(Arc::new(Translate::new(tall, Vec3::new(265.0, 0.0, 295.0))));

    let short: Arc<dyn Hittable> =
        Arc::new(make_box(Vec3::ZERO, Vec3::new(165.0, 165.0, 165.0), white));
    let short = Arc::new(RotateY::new(short, -18.0));
    world.add(Arc::new(Translate::new(short, Vec3::new(130.0, 0.0, 65.0))));

    let mut lights = Scene::new();
    lights.add(ceiling_light);

    let camera = Camera::new()
        .with_image(600, 1.0)
        .with_quality(64, 50)
        .with_position(
            Vec3::new(278.0, 278.0, -800.0),
            Vec3::new(278.0, 278.0, 0.0),
            Vec3::Y,
        )
        .with_lens(40.0, 0.0, 10.0);

    SceneSetup {
        world: bvh(&world, rng),
        lights: Some(Arc::new(lights)),
        camera,
        config: dark(),
    }
}
