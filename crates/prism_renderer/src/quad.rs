//! Planar parallelogram primitive, and boxes built from six of them.

use crate::{
    hittable::{HitRecord, Hittable, Scene},
    sampling::random_f64,
    Material, Ray,
};
use prism_math::{Aabb, Interval, Vec3};
use rand::RngCore;
use std::sync::Arc;

/// Slack on the planar coordinates so rays aimed at an exact corner or edge
/// still hit after rounding.
const EDGE_EPSILON: f64 = 1e-9;

/// A parallelogram with corner `q` and edges `u` and `v`.
///
/// The front face is the side `u × v` points to.
pub struct Quad {
    q: Vec3,
    u: Vec3,
    v: Vec3,
    /// `n / (n · n)` for the unnormalized plane normal `n`, used to project
    /// a planar point onto the (u, v) basis
    w: Vec3,
    normal: Vec3,
    /// Plane offset: `normal · x = d` for every point on the plane
    d: f64,
    area: f64,
    material: Arc<dyn Material>,
    bbox: Aabb,
}

impl Quad {
    /// Create a new quad. `u` and `v` must not be parallel.
    pub fn new(q: Vec3, u: Vec3, v: Vec3, material: Arc<dyn Material>) -> Self {
        // Either diagonal may be the longer one
        let bbox_diagonal1 = Aabb::from_points(q, q + u + v);
        let bbox_diagonal2 = Aabb::from_points(q + u, q + v);
        let bbox = Aabb::surrounding(&bbox_diagonal1, &bbox_diagonal2);

        let n = u.cross(v);
        let normal = n.normalize();
        let d = normal.dot(q);
        let w = n / n.dot(n);
        let area = n.length();

        Self {
            q,
            u,
            v,
            w,
            normal,
            d,
            area,
            material,
            bbox,
        }
    }

    /// Planar coordinates of a point on the quad's plane, relative to `q`.
    /// The quad itself is `[0, 1] × [0, 1]`.
    fn planar_coordinates(&self, point: Vec3) -> (f64, f64) {
        let planar_hitpt_vector = point - self.q;
        let alpha = self.w.dot(planar_hitpt_vector.cross(self.v));
        let beta = self.w.dot(self.u.cross(planar_hitpt_vector));
        (alpha, beta)
    }

    fn is_interior(alpha: f64, beta: f64) -> bool {
        let unit_interval = Interval::new(0.0, 1.0).expand(2.0 * EDGE_EPSILON);
        unit_interval.contains(alpha) && unit_interval.contains(beta)
    }
}

impl Hittable for Quad {
    fn hit<'a>(&'a self, ray: &Ray, ray_t: Interval, rec: &mut HitRecord<'a>) -> bool {
        let denom = self.normal.dot(ray.direction());

        // No hit if the ray is parallel to the plane
        if denom.abs() < 1e-8 {
            return false;
        }

        let t = (self.d - self.normal.dot(ray.origin())) / denom;
        if !ray_t.contains(t) {
            return false;
        }

        let intersection = ray.at(t);
        let (alpha, beta) = self.planar_coordinates(intersection);
        if !Self::is_interior(alpha, beta) {
            return false;
        }

        rec.t = t;
        rec.p = intersection;
        rec.u = alpha;
        rec.v = beta;
        rec.material = self.material.as_ref();
        rec.set_face_normal(ray, self.normal);

        true
    }

    fn bounding_box(&self) -> Aabb {
        self.bbox
    }

    /// Area density converted to solid angle: `distance² / (|cos θ| · area)`.
    fn pdf_value(&self, origin: Vec3, direction: Vec3) -> f64 {
        let ray = Ray::new(origin, direction);
        let mut rec = HitRecord::default();
        if !self.hit(&ray, Interval::new(0.001, f64::INFINITY), &mut rec) {
            return 0.0;
        }

        // t is a distance because ray directions are unit length
        let distance_squared = rec.t * rec.t;
        let cosine = ray.direction().dot(rec.normal).abs();

        distance_squared / (cosine * self.area)
    }

    fn random(&self, origin: Vec3, rng: &mut dyn RngCore) -> Vec3 {
        let p = self.q + random_f64(rng) * self.u + random_f64(rng) * self.v;
        p - origin
    }
}

/// A closed axis-aligned box with corners `a` and `b`, as six outward-facing quads.
pub fn make_box(a: Vec3, b: Vec3, material: Arc<dyn Material>) -> Scene {
    let mut sides = Scene::new();

    let min = a.min(b);
    let max = a.max(b);

    let dx = Vec3::new(max.x - min.x, 0.0, 0.0);
    let dy = Vec3::new(0.0, max.y - min.y, 0.0);
    let dz = Vec3::new(0.0, 0.0, max.z - min.z);

    let faces = [
        (Vec3::new(min.x, min.y, max.z), dx, dy),  // front
        (Vec3::new(max.x, min.y, max.z), -dz, dy), // right
        (Vec3::new(max.x, min.y, min.z), -dx, dy), // back
        (Vec3::new(min.x, min.y, min.z), dz, dy),  // left
        (Vec3::new(min.x, max.y, max.z), dx, -dz), // top
        (Vec3::new(min.x, min.y, min.z), dx, dz),  // bottom
    ];

    for (q, u, v) in faces {
        sides.add(Arc::new(Quad::new(q, u, v, material.clone())));
    }

    sides
}
