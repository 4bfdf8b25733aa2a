//! Bounding Volume Hierarchy (BVH) acceleration structure.
//!
//! Binary tree over shared primitives. Each level splits on a randomly chosen
//! axis at the median of the primitives' box minimums.

use crate::{HitRecord, Hittable, Ray, Scene};
use prism_math::{Aabb, Interval};
use rand::{Rng, RngCore};
use std::cmp::Ordering;
use std::sync::Arc;

/// BVH node - either a branch with two children or nothing at all.
///
/// Leaves are the primitives themselves. A single primitive sits in both
/// children of its parent.
pub enum BvhNode {
    /// Internal node with two children.
    Branch {
        left: Arc<dyn Hittable>,
        right: Arc<dyn Hittable>,
        bbox: Aabb,
    },
    /// Empty node (built from an empty primitive list).
    Empty,
}

impl BvhNode {
    /// Create a BVH from a list of hittable objects.
    ///
    /// The axis choices are drawn from `rng`, so a seeded generator gives
    /// the same tree every time.
    pub fn new(mut objects: Vec<Arc<dyn Hittable>>, rng: &mut dyn RngCore) -> Self {
        if objects.is_empty() {
            return BvhNode::Empty;
        }

        let count = objects.len();
        let node = Self::build(&mut objects, rng);
        log::info!(
            "Built BVH over {} primitives, bounds {:?}",
            count,
            node.bounding_box()
        );
        node
    }

    /// Build a BVH over the objects of a scene. The scene itself is left untouched.
    pub fn from_scene(scene: &Scene, rng: &mut dyn RngCore) -> Self {
        Self::new(scene.objects().to_vec(), rng)
    }

    /// Recursive BVH construction over a non-empty slice.
    fn build(objects: &mut [Arc<dyn Hittable>], rng: &mut dyn RngCore) -> Self {
        let axis = rng.gen_range(0..3);

        let (left, right): (Arc<dyn Hittable>, Arc<dyn Hittable>) = match objects.len() {
            1 => (objects[0].clone(), objects[0].clone()),
            2 => (objects[0].clone(), objects[1].clone()),
            _ => {
                objects.sort_unstable_by(|a, b| box_compare(a.as_ref(), b.as_ref(), axis));

                let mid = objects.len() / 2;
                let (lower, upper) = objects.split_at_mut(mid);
                (
                    Arc::new(Self::build(lower, rng)),
                    Arc::new(Self::build(upper, rng)),
                )
            }
        };

        let bbox = Aabb::surrounding(&left.bounding_box(), &right.bounding_box());
        BvhNode::Branch { left, right, bbox }
    }
}

/// Order two primitives by the minimum of their boxes along `axis`.
fn box_compare(a: &dyn Hittable, b: &dyn Hittable, axis: usize) -> Ordering {
    let a_min = a.bounding_box().axis_interval(axis).min;
    let b_min = b.bounding_box().axis_interval(axis).min;
    a_min.partial_cmp(&b_min).unwrap_or(Ordering::Equal)
}

impl Hittable for BvhNode {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        match self {
            BvhNode::Empty => false,

            BvhNode::Branch { left, right, bbox } => {
                if !bbox.hit(ray, ray_t) {
                    return false;
                }

                let hit_left = left.hit(ray, ray_t, rec);

                // Only check right up to closest hit
                let right_max = if hit_left { rec.t } else { ray_t.max };
                let hit_right = right.hit(ray, Interval::new(ray_t.min, right_max), rec);

                hit_left || hit_right
            }
        }
    }

    fn bounding_box(&self) -> Aabb {
        match self {
            BvhNode::Empty => Aabb::EMPTY,
            BvhNode::Branch { bbox, .. } => *bbox,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, Lambertian, Material, Sphere};
    use prism_math::Vec3;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn sphere(center: Vec3, radius: f64, albedo: Color) -> Arc<dyn Hittable> {
        let material: Arc<dyn Material> = Arc::new(Lambertian::new(albedo));
        Arc::new(Sphere::new(center, radius, material))
    }

    #[test]
    fn test_bvh_empty() {
        let mut rng = StdRng::seed_from_u64(42);
        let bvh = BvhNode::new(vec![], &mut rng);
        assert!(matches!(bvh, BvhNode::Empty));
        assert_eq!(bvh.bounding_box(), Aabb::EMPTY);

        let ray = Ray::new(Vec3::ZERO, Vec3::NEG_Z);
        let mut rec = HitRecord::default();
        assert!(!bvh.hit(&ray, Interval::new(0.001, f64::INFINITY), &mut rec));
    }

    #[test]
    fn test_bvh_single_sphere() {
        let mut rng = StdRng::seed_from_u64(42);
        let objects = vec![sphere(Vec3::new(0.0, 0.0, -1.0), 0.5, Color::splat(0.5))];
        let bvh = BvhNode::new(objects, &mut rng);

        // Single primitive shared by both children
        match &bvh {
            BvhNode::Branch { left, right, .. } => assert!(Arc::ptr_eq(left, right)),
            BvhNode::Empty => panic!("expected a branch"),
        }

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();
        assert!(bvh.hit(&ray, Interval::new(0.001, f64::INFINITY), &mut rec));
        assert!((rec.t - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_bvh_multiple_spheres() {
        let mut rng = StdRng::seed_from_u64(42);
        let spheres: Vec<Arc<dyn Hittable>> = (0..10)
            .map(|i| sphere(Vec3::new(i as f64, 0.0, -5.0), 0.5, Color::splat(0.5)))
            .collect();

        let bvh = BvhNode::new(spheres, &mut rng);

        // Test ray that hits sphere at x=5
        let ray = Ray::new(Vec3::new(5.0, 0.0, 0.0), Vec3::new(0.0, 0.0, -1.0));
        let mut rec = HitRecord::default();
        assert!(bvh.hit(&ray, Interval::new(0.001, f64::INFINITY), &mut rec));

        // Hit point should be near z = -4.5 (sphere at z=-5, radius 0.5)
        assert!((rec.p.z - (-4.5)).abs() < 1e-9);

        let bbox = bvh.bounding_box();
        assert_eq!(bbox.x, Interval::new(-0.5, 9.5));
    }

    #[test]
    fn test_bvh_leaves_source_scene_intact() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut scene = Scene::new();
        for i in 0..5 {
            scene.add(sphere(Vec3::new(0.0, i as f64, -3.0), 0.25, Color::ONE));
        }
        let before: Vec<f64> = scene
            .objects()
            .iter()
            .map(|o| o.bounding_box().y.min)
            .collect();

        let bvh = BvhNode::from_scene(&scene, &mut rng);

        let after: Vec<f64> = scene
            .objects()
            .iter()
            .map(|o| o.bounding_box().y.min)
            .collect();
        assert_eq!(before, after);
        assert_eq!(bvh.bounding_box(), scene.bounding_box());
    }

    /// Pointer to the material a hit landed on, for identity comparisons.
    fn material_addr(rec: &HitRecord) -> *const u8 {
        rec.material as *const dyn Material as *const u8
    }

    proptest! {
        #[test]
        fn bvh_matches_linear_scan(
            spheres in prop::collection::vec(
                ((-10.0f64..10.0, -10.0f64..10.0, -30.0f64..-5.0), 0.1f64..2.0),
                1..40,
            ),
            seed in any::<u64>(),
            target in (-8.0f64..8.0, -8.0f64..8.0),
        ) {
            let mut scene = Scene::new();
            for (i, ((x, y, z), r)) in spheres.iter().enumerate() {
                let albedo = Color::splat(i as f64 / spheres.len() as f64);
                scene.add(sphere(Vec3::new(*x, *y, *z), *r, albedo));
            }

            let mut rng = StdRng::seed_from_u64(seed);
            let bvh = BvhNode::from_scene(&scene, &mut rng);

            let ray = Ray::new(Vec3::ZERO, Vec3::new(target.0, target.1, -10.0));
            let interval = Interval::new(0.001, f64::INFINITY);

            let mut linear_rec = HitRecord::default();
            let mut bvh_rec = HitRecord::default();
            let linear_hit = scene.hit(&ray, interval, &mut linear_rec);
            let bvh_hit = bvh.hit(&ray, interval, &mut bvh_rec);

            prop_assert_eq!(linear_hit, bvh_hit);
            if linear_hit {
                prop_assert_eq!(linear_rec.t, bvh_rec.t);
                prop_assert_eq!(linear_rec.p, bvh_rec.p);
                prop_assert_eq!(material_addr(&linear_rec), material_addr(&bvh_rec));
            }
        }
    }
}
