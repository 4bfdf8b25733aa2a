// Rotation utilities for DMat3
//
// Extends glam::DMat3 with the bounding-box transform the instancing
// wrappers need. glam already provides mul_vec3() and transpose().

use glam::DMat3;

use crate::Aabb;

/// Rotation about +Y by `degrees`, carrying object space into world space.
///
/// The inverse (world to object) is the transpose.
pub fn rotation_y(degrees: f64) -> DMat3 {
    DMat3::from_rotation_y(degrees.to_radians())
}

/// Extension trait for DMat3 to provide additional transform utilities
pub trait DMat3Ext {
    /// Transform an axis-aligned bounding box.
    /// Computes the bounding box of all 8 transformed corners, which is
    /// conservative for any linear map.
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb;
}

impl DMat3Ext for DMat3 {
    fn transform_aabb(&self, aabb: &Aabb) -> Aabb {
        let corners = aabb.corners();

        let first = self.mul_vec3(corners[0]);
        let (result_min, result_max) = corners[1..]
            .iter()
            .map(|&corner| self.mul_vec3(corner))
            .fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));

        Aabb::from_points(result_min, result_max)
    }
}
