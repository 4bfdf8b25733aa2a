//! Instancing wrappers: reuse one piece of geometry under a rigid transform.
//!
//! Rays are carried into object space, tested against the wrapped object,
//! and the hit is carried back to world space. The wrapped object is shared,
//! so the same box can be placed several times without copying it.

use crate::{
    hittable::{HitRecord, Hittable},
    Ray,
};
use prism_math::{rotation_y, Aabb, DMat3, DMat3Ext, Interval, Vec3};
use rand::RngCore;
use std::sync::Arc;

/// An object moved by a fixed offset.
pub struct Translate {
    object: Arc<dyn Hittable>,
    offset: Vec3,
    bbox: Aabb,
}

impl Translate {
    pub fn new(object: Arc<dyn Hittable>, offset: Vec3) -> Self {
        let bbox = object.bounding_box().translate(offset);
        Self {
            object,
            offset,
            bbox,
        }
    }
}

impl Hittable for Translate {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        // Move the ray backwards by the offset
        let offset_ray = Ray::new(ray.origin() - self.offset, ray.direction());

        if !self.object.hit(&offset_ray, ray_t, rec) {
            return false;
        }

        // Move the intersection point forwards by the offset
        rec.p += self.offset;
        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    fn pdf_value(&self, origin: Vec3, direction: Vec3) -> f64 {
        self.object.pdf_value(origin - self.offset, direction)
    }

    fn random(&self, origin: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        self.object.random(origin - self.offset, rng)
    }
}

/// An object rotated about the +Y axis through the origin.
pub struct RotateY {
    object: Arc<dyn Hittable>,
    /// Object to world
    rotation: DMat3,
    /// World to object
    inverse: DMat3,
    bbox: Aabb,
}

impl RotateY {
    /// Rotate `object` by `degrees`. Positive angles turn +X towards -Z.
    pub fn new(object: Arc<dyn Hittable>, degrees: f64) -> Self {
        let rotation = rotation_y(degrees);
        let bbox = rotation.transform_aabb(&object.bounding_box());

        Self {
            object,
            rotation,
            inverse: rotation.transpose(),
            bbox,
        }
    }
}

impl Hittable for RotateY {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        // Rotation keeps lengths, so t means the same thing in both spaces
        let object_ray = Ray::new(
            self.inverse * ray.origin(),
            self.inverse * ray.direction(),
        );

        if !self.object.hit(&object_ray, ray_t, rec) {
            return false;
        }

        rec.p = self.rotation * rec.p;
        rec.normal = self.rotation * rec.normal;
        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    fn pdf_value(&self, origin: Vec3, direction: Vec3) -> f64 {
        self.object
            .pdf_value(self.inverse * origin, self.inverse * direction)
    }

    fn random(&self, origin: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        self.rotation * self.object.random(self.inverse * origin, rng)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{make_box, Lambertian, Material, Quad, Sphere};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grey() -> Arc<dyn Material> {
        Arc::new(Lambertian::new(Vec3::splat(0.5)))
    }

    fn unit_cube() -> Arc<dyn Hittable> {
        Arc::new(make_box(Vec3::ZERO, Vec3::ONE, grey()))
    }

    #[test]
    fn test_translate_moves_hit_point() {
        let sphere: Arc<dyn Hittable> = Arc::new(Sphere::new(Vec3::ZERO, 1.0, grey()));
        let moved = Translate::new(sphere, Vec3::new(5.0, 0.0, 0.0));

        let ray = Ray::new(Vec3::new(5.0, 0.0, 10.0), Vec3::NEG_Z);
        let mut rec = HitRecord::default();

        assert!(moved.hit(&ray, Interval::new(0.001, f64::INFINITY), &mut rec));
        assert!((rec.t - 9.0).abs() < 1e-9);
        assert!((rec.p - Vec3::new(5.0, 0.0, 1.0)).length() < 1e-9);
        assert!((rec.normal - Vec3::Z).length() < 1e-9);

        // The original spot is now empty
        let ray = Ray::new(Vec3::new(0.0, 0.0, 10.0), Vec3::NEG_Z);
        assert!(!moved.hit(&ray, Interval::new(0.001, f64::INFINITY), &mut rec));
    }

    #[test]
    fn test_translate_bounding_box() {
        let moved = Translate::new(unit_cube(), Vec3::new(265.0, 0.0, 295.0));
        let bbox = moved.bounding_box();

        // Flat faces pad the box by up to 1e-4 per axis
        assert!((bbox.x.min - 265.0).abs() <= 1e-4 && (bbox.x.max - 266.0).abs() <= 1e-4);
        assert!((bbox.z.min - 295.0).abs() <= 1e-4 && (bbox.z.max - 296.0).abs() <= 1e-4);
    }

    #[test]
    fn test_rotate_y_quarter_turn() {
        // Cube spanning x in [0, 1] swings round to z in [-1, 0]
        let turned = RotateY::new(unit_cube(), 90.0);
        let bbox = turned.bounding_box();

        assert!(bbox.x.min.abs() <= 1e-4 && (bbox.x.max - 1.0).abs() <= 1e-4);
        assert!((bbox.z.min + 1.0).abs() <= 1e-4 && bbox.z.max.abs() <= 1e-4);

        let ray = Ray::new(Vec3::new(0.5, 0.5, -5.0), Vec3::Z);
        let mut rec = HitRecord::default();
        assert!(turned.hit(&ray, Interval::new(0.001, f64::INFINITY), &mut rec));
        assert!((rec.p.z + 1.0).abs() < 1e-9);
        assert!((rec.normal - Vec3::NEG_Z).length() < 1e-9);
        assert!(rec.front_face);
    }

    #[test]
    fn test_rotate_y_bounding_box_contains_object() {
        let turned = RotateY::new(unit_cube(), 15.0);
        let bbox = turned.bounding_box();

        // Diagonal of the unit square footprint is longer than either side
        assert!(bbox.x.size() > 1.0);
        assert!(bbox.z.size() > 1.0);
        assert!((bbox.y.size() - 1.0).abs() <= 2e-4);

        for corner in Aabb::from_points(Vec3::ZERO, Vec3::ONE).corners() {
            let world = rotation_y(15.0) * corner;
            assert!(bbox.x.contains(world.x) || (bbox.x.min - world.x).abs() < 1e-9);
            assert!(bbox.z.contains(world.z) || (bbox.z.max - world.z).abs() < 1e-9);
        }
    }

    #[test]
    fn test_rotate_then_translate_hits_where_expected() {
        let placed = Translate::new(
            Arc::new(RotateY::new(unit_cube(), 90.0)),
            Vec3::new(10.0, 0.0, 0.0),
        );

        // Occupies x in [10, 11], z in [-1, 0]
        let ray = Ray::new(Vec3::new(10.5, 0.5, 5.0), Vec3::NEG_Z);
        let mut rec = HitRecord::default();
        assert!(placed.hit(&ray, Interval::new(0.001, f64::INFINITY), &mut rec));
        assert!(rec.p.z.abs() < 1e-9);
        assert!((rec.t - 5.0).abs() < 1e-9);

        let ray = Ray::new(Vec3::new(10.5, 0.5, 5.0), Vec3::Z);
        assert!(!placed.hit(&ray, Interval::new(0.001, f64::INFINITY), &mut rec));
    }

    #[test]
    fn test_wrapped_light_sampling_follows_transform() {
        let light: Arc<dyn Hittable> = Arc::new(Quad::new(
            Vec3::new(-1.0, 5.0, -1.0),
            Vec3::new(2.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 2.0),
            grey(),
        ));
        let moved = Translate::new(light.clone(), Vec3::new(3.0, 0.0, 0.0));
        let mut rng = StdRng::seed_from_u64(42);

        // Same geometry seen from a point offset the same way
        let direct = light.pdf_value(Vec3::ZERO, Vec3::Y);
        let shifted = moved.pdf_value(Vec3::new(3.0, 0.0, 0.0), Vec3::Y);
        assert!((direct - shifted).abs() < 1e-12);

        for _ in 0..50 {
            let d = moved.random(Vec3::ZERO, &mut rng);
            assert!(moved.pdf_value(Vec3::ZERO, d) > 0.0);
        }

        let turned = RotateY::new(light, 30.0);
        for _ in 0..50 {
            let d = turned.random(Vec3::ZERO, &mut rng);
            assert!(turned.pdf_value(Vec3::ZERO, d) > 0.0);
        }
    }
}
