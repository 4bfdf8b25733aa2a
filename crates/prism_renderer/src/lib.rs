//! Prism renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer for physically-based still images: spheres and
//! quads under a BVH, diffuse/metal/glass/emissive materials, and direct
//! sampling of registered lights.

mod buffer;
mod bvh;
mod camera;
mod hittable;
mod instance;
mod material;
mod output;
mod quad;
mod renderer;
mod schedule;
mod sphere;

pub mod pdf;
pub mod sampling;
pub mod texture;

pub use buffer::ImageBuffer;
pub use bvh::BvhNode;
pub use camera::Camera;
pub use hittable::{HitRecord, Hittable, Scene};
pub use instance::{RotateY, Translate};
pub use material::{
    Color, Dielectric, DiffuseLight, Lambertian, Material, Metal, ScatterRecord, Scattered,
};
pub use output::{
    color_to_rgb, linear_to_gamma, writer_for_path, ImageWriter, OutputError, OutputResult,
    PngWriter, PpmWriter,
};
pub use quad::{make_box, Quad};
pub use renderer::{render, render_pixel, trace_ray, RenderConfig, T_MIN};
pub use schedule::{generate_row_bands, render_row, render_rows, row_seed, RowBand, Schedule};
pub use sphere::Sphere;
pub use texture::{CheckerTexture, SolidColor, Texture};

/// Re-export Vec3 and common math types from prism_math
pub use prism_math::{Aabb, Interval, Ray, Vec3};
