//! Procedural textures.
//!
//! A texture is a pure function of surface coordinates and world position.
//! Textures are shared between materials through `Arc`.

use crate::Color;
use prism_math::Vec3;
use std::sync::Arc;

/// Trait for color lookups on a surface.
pub trait Texture: Send + Sync {
    /// Color at texture coordinates (u, v) and world point `p`.
    fn value(&self, u: f64, v: f64, p: Vec3) -> Color;
}

/// A constant color.
#[derive(Debug, Clone, Copy)]
pub struct SolidColor {
    albedo: Color,
}

impl SolidColor {
    pub fn new(albedo: Color) -> Self {
        Self { albedo }
    }

    pub fn from_rgb(red: f64, green: f64, blue: f64) -> Self {
        Self::new(Color::new(red, green, blue))
    }
}

impl Texture for SolidColor {
    fn value(&self, _u: f64, _v: f64, _p: Vec3) -> Color {
        self.albedo
    }
}

/// 3D checkerboard alternating between two textures.
///
/// Parity is taken over the integer cell of the scaled world point, so the
/// pattern is a lattice of cubes rather than something painted on in UV space.
/// Either side may itself be a checker.
pub struct CheckerTexture {
    inv_scale: f64,
    even: Arc<dyn Texture>,
    odd: Arc<dyn Texture>,
}

impl CheckerTexture {
    /// Create a checker from two textures. `scale` is the cell edge length.
    pub fn new(scale: f64, even: Arc<dyn Texture>, odd: Arc<dyn Texture>) -> Self {
        Self {
            inv_scale: 1.0 / scale,
            even,
            odd,
        }
    }

    /// Create a checker from two solid colors.
    pub fn from_colors(scale: f64, even: Color, odd: Color) -> Self {
        Self::new(
            scale,
            Arc::new(SolidColor::new(even)),
            Arc::new(SolidColor::new(odd)),
        )
    }
}

impl Texture for CheckerTexture {
    fn value(&self, u: f64, v: f64, p: Vec3) -> Color {
        let cell = (self.inv_scale * p).floor();
        let parity = (cell.x as i64 + cell.y as i64 + cell.z as i64).rem_euclid(2);

        if parity == 0 {
            self.even.value(u, v, p)
        } else {
            self.odd.value(u, v, p)
        }
    }
}
