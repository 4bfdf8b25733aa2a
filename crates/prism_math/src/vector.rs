// Geometry helpers on top of glam's DVec3
//
// glam covers the arithmetic (dot, cross, length, normalize). The optics
// formulas here follow the renderer's conventions: `refract` takes the ratio
// etai / etat and never returns zero on total internal reflection, so callers
// must check for that before refracting.

use crate::Vec3;

/// Extension trait for Vec3 with renderer-specific predicates and optics.
pub trait Vec3Ext {
    /// True when every component is below 1e-8 in magnitude.
    fn near_zero(&self) -> bool;

    /// Reflect about the normal `n`.
    fn reflect(self, n: Vec3) -> Vec3;

    /// Refract a unit vector through a surface with unit normal `n`.
    ///
    /// Splits the outgoing direction into the parts perpendicular and parallel
    /// to the normal (Snell's law).
    fn refract(self, n: Vec3, etai_over_etat: f64) -> Vec3;
}

impl Vec3Ext for Vec3 {
    #[inline]
    fn near_zero(&self) -> bool {
        const S: f64 = 1e-8;
        self.x.abs() < S && self.y.abs() < S && self.z.abs() < S
    }

    #[inline]
    fn reflect(self, n: Vec3) -> Vec3 {
        self - 2.0 * self.dot(n) * n
    }

    #[inline]
    fn refract(self, n: Vec3, etai_over_etat: f64) -> Vec3 {
        let cos_theta = (-self).dot(n).min(1.0);
        let r_out_perp = etai_over_etat * (self + cos_theta * n);
        let r_out_parallel = -(1.0 - r_out_perp.length_squared()).abs().sqrt() * n;
        r_out_perp + r_out_parallel
    }
}
