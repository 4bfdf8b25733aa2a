//! Prism math kernel.
//!
//! Everything here is double precision: the renderer accumulates many small
//! Monte Carlo contributions and intersects rays against large scenes, where
//! single precision shows up as acne and leaking light.

// Re-export the glam types the renderer builds on
pub use glam::{DMat3, DVec3};

/// The workspace-wide 3D vector. Also used for points and RGB colors.
pub type Vec3 = DVec3;

mod aabb;
mod interval;
mod onb;
mod ray;
mod transform;
mod vector;

pub use aabb::Aabb;
pub use interval::Interval;
pub use onb::Onb;
pub use ray::Ray;
pub use transform::{rotation_y, DMat3Ext};
pub use vector::Vec3Ext;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_creation() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(v.x, 1.0);
        assert_eq!(v.y, 2.0);
        assert_eq!(v.z, 3.0);
    }

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        assert_eq!(a + b, Vec3::new(5.0, 7.0, 9.0));
        assert_eq!(a * b, Vec3::new(4.0, 10.0, 18.0));
        assert_eq!(a.dot(b), 32.0);
        assert_eq!(a.cross(b), Vec3::new(-3.0, 6.0, -3.0));
    }
}
