//! Core path tracing renderer.
//!
//! Implements Monte Carlo path tracing with:
//! - Iterative path construction with a hard depth cutoff
//! - Explicit light sampling toward registered lights
//! - Stratified anti-aliasing

use crate::pdf::{HittablePdf, Pdf};
use crate::schedule::{render_rows, Schedule};
use crate::{Camera, Color, HitRecord, Hittable, ImageBuffer, Ray, Scattered};
use prism_math::Interval;
use rand::RngCore;
use std::time::Instant;

/// Closest parametric distance accepted for a hit, to skip self-intersection.
pub const T_MIN: f64 = 0.001;

/// Densities at or below this are treated as a sample that cannot be weighted.
const PDF_EPSILON: f64 = 1e-12;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Background color when ray doesn't hit anything
    pub background: Color,
    /// Whether to use sky gradient instead of solid background
    pub use_sky_gradient: bool,
    /// Base seed for the per-row generators; `None` draws a fresh one
    pub seed: Option<u64>,
    /// How rows are spread across threads
    pub schedule: Schedule,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: Color::ZERO,
            use_sky_gradient: false,
            seed: None,
            schedule: Schedule::PerRow,
        }
    }
}

/// Compute the radiance arriving along a ray.
///
/// `lights`, when present, is sampled directly at diffuse surfaces instead of
/// the material's own density. `depth` bounds the number of surface
/// interactions; zero yields black.
pub fn trace_ray(
    ray: &Ray,
    world: &dyn Hittable,
    lights: Option<&dyn Hittable>,
    depth: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut radiance = Color::ZERO;
    let mut throughput = Color::ONE;
    let mut current = *ray;

    for _ in 0..depth {
        let mut rec = HitRecord::default();

        if !world.hit(&current, Interval::new(T_MIN, f64::INFINITY), &mut rec) {
            radiance += throughput * background(&current, config);
            break;
        }

        let emission = rec.material.emitted(&current, &rec, rec.u, rec.v, rec.p);
        radiance += throughput * emission;

        // Absorbed
        let Some(srec) = rec.material.scatter(&current, &rec, rng) else {
            break;
        };

        match srec.scattered {
            Scattered::Specular(next) => {
                throughput *= srec.attenuation;
                current = next;
            }
            Scattered::Diffuse(material_pdf) => {
                let (direction, pdf) = match lights {
                    Some(lights) => {
                        let light_pdf = HittablePdf::new(lights, rec.p);
                        let direction = light_pdf.generate(rng);
                        (direction, light_pdf.value(direction))
                    }
                    None => {
                        let direction = material_pdf.generate(rng);
                        (direction, material_pdf.value(direction))
                    }
                };

                // Behind the surface, or a grazing light sample
                if direction.dot(rec.normal) <= 0.0 || !pdf.is_finite() || pdf <= PDF_EPSILON {
                    break;
                }

                let scattered = Ray::new(rec.p, direction);
                let scattering_pdf = rec.material.scattering_pdf(&current, &rec, &scattered);

                throughput *= srec.attenuation * scattering_pdf / pdf;
                current = scattered;
            }
        }
    }

    radiance
}

/// Color for a ray that escapes the scene.
fn background(ray: &Ray, config: &RenderConfig) -> Color {
    if config.use_sky_gradient {
        sky_gradient(ray)
    } else {
        config.background
    }
}

/// Compute sky gradient background.
fn sky_gradient(ray: &Ray) -> Color {
    let a = 0.5 * (ray.direction().y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Render a single pixel (column `x`, row `y`) with stratified multi-sampling.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    lights: Option<&dyn Hittable>,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;
    let sqrt_spp = camera.sqrt_spp();

    for s_j in 0..sqrt_spp {
        for s_i in 0..sqrt_spp {
            let ray = camera.generate_ray(x, y, s_i, s_j, rng);
            pixel_color += trace_ray(&ray, world, lights, camera.max_depth, config, rng);
        }
    }

    // Average the samples
    pixel_color * camera.pixel_samples_scale()
}

/// Render the entire scene to an image buffer.
///
/// The camera must already be initialized.
pub fn render(
    camera: &Camera,
    world: &dyn Hittable,
    lights: Option<&dyn Hittable>,
    config: &RenderConfig,
) -> ImageBuffer {
    let mut image = ImageBuffer::new(camera.image_width, camera.image_height());
    let base_seed = config.seed.unwrap_or_else(rand::random);

    log::info!(
        "Rendering {}x{} at {} spp, depth {}, {:?} schedule, seed {}",
        camera.image_width,
        camera.image_height(),
        camera.sqrt_spp() * camera.sqrt_spp(),
        camera.max_depth,
        config.schedule,
        base_seed
    );

    let start = Instant::now();
    render_rows(camera, world, lights, config, base_seed, &mut image);
    log::info!("Render finished in {:.2?}", start.elapsed());

    image
}
