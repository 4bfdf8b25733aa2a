use crate::Vec3;

/// Orthonormal basis (u, v, w) with `w` aligned to a given direction.
///
/// Used to carry directions sampled around +Z into the frame of a surface
/// normal or of the axis of a cone.
#[derive(Debug, Clone, Copy)]
pub struct Onb {
    axis: [Vec3; 3],
}

impl Onb {
    /// Build a basis whose `w` axis is `n` normalized. `n` must be non-zero.
    pub fn new(n: Vec3) -> Self {
        let w = n.normalize();
        // Any helper not parallel to w works
        let a = if w.x.abs() > 0.9 { Vec3::Y } else { Vec3::X };
        let v = w.cross(a).normalize();
        let u = w.cross(v);

        Self { axis: [u, v, w] }
    }

    #[inline]
    pub fn u(&self) -> Vec3 {
        self.axis[0]
    }

    #[inline]
    pub fn v(&self) -> Vec3 {
        self.axis[1]
    }

    #[inline]
    pub fn w(&self) -> Vec3 {
        self.axis[2]
    }

    /// Map local basis coordinates to world space.
    #[inline]
    pub fn transform(&self, local: Vec3) -> Vec3 {
        local.x * self.axis[0] + local.y * self.axis[1] + local.z * self.axis[2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_orthonormal(onb: &Onb) {
        for a in [onb.u(), onb.v(), onb.w()] {
            assert!((a.length() - 1.0).abs() < 1e-12);
        }
        assert!(onb.u().dot(onb.v()).abs() < 1e-12);
        assert!(onb.v().dot(onb.w()).abs() < 1e-12);
        assert!(onb.w().dot(onb.u()).abs() < 1e-12);
    }

    #[test]
    fn test_onb_is_orthonormal() {
        for n in [
            Vec3::Y,
            Vec3::X,
            Vec3::new(0.95, 0.1, 0.0),
            Vec3::new(-3.0, 2.0, 7.0),
        ] {
            let onb = Onb::new(n);
            assert_orthonormal(&onb);
            assert!((onb.w() - n.normalize()).length() < 1e-12);
        }
    }

    #[test]
    fn test_onb_transform_local_z_is_w() {
        let onb = Onb::new(Vec3::new(1.0, 1.0, 0.0));
        let world = onb.transform(Vec3::Z);
        assert!((world - onb.w()).length() < 1e-12);
    }
}
