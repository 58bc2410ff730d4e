use crate::glam::{Mat4, Vec3A, Vec4};

/// An axis-aligned bounding box, given by its minimum and maximum corners.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub min: Vec3A,
    pub max: Vec3A,
}

impl Aabb {
    pub fn from_min_and_max(min: Vec3A, max: Vec3A) -> Self {
        Self { min, max }
    }

    pub fn from_center_and_size(center: Vec3A, size: Vec3A) -> Self {
        let half = 0.5 * size;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    pub fn center(&self) -> Vec3A {
        0.5 * (self.min + self.max)
    }

    pub fn size(&self) -> Vec3A {
        self.max - self.min
    }

    pub fn contains(&self, p: Vec3A) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Squared distance from `p` to the closest point on (or in) this box. Zero when `p` is inside.
    ///
    /// Each axis is clamped separately, so this is the distance to the box's surface, not to its center.
    pub fn squared_distance_to_point(&self, p: Vec3A) -> f32 {
        let outside = (self.min - p).max(p - self.max).max(Vec3A::ZERO);
        outside.length_squared()
    }
}

/// A plane `normal · p + d = 0`. Points with a positive signed distance are on the side the normal points toward.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Plane {
    pub normal: Vec3A,
    pub d: f32,
}

impl Plane {
    /// Builds a plane from the `(a, b, c, d)` coefficients of `ax + by + cz + d = 0`, normalizing them.
    pub fn from_coefficients(coefficients: Vec4) -> Self {
        let normal = Vec3A::from(coefficients.truncate());
        let inv_len = normal.length().recip();
        Self {
            normal: normal * inv_len,
            d: coefficients.w * inv_len,
        }
    }

    pub fn signed_distance(&self, p: Vec3A) -> f32 {
        self.normal.dot(p) + self.d
    }
}

/// Six inward-facing planes bounding the volume a camera can see.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frustum {
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Extracts the frustum planes from a combined `projection * view` matrix (Gribb/Hartmann).
    ///
    /// Assumes the `[0, 1]` clip-space depth range produced by `glam`'s `perspective_*` constructors.
    pub fn from_view_projection(view_projection: Mat4) -> Self {
        let [r0, r1, r2, r3] = [0, 1, 2, 3].map(|i| view_projection.row(i));
        Self {
            planes: [
                Plane::from_coefficients(r3 + r0), // left
                Plane::from_coefficients(r3 - r0), // right
                Plane::from_coefficients(r3 + r1), // bottom
                Plane::from_coefficients(r3 - r1), // top
                Plane::from_coefficients(r2),      // near
                Plane::from_coefficients(r3 - r2), // far
            ],
        }
    }

    /// Conservative box test: returns `false` only if `aabb` lies entirely outside of one of the planes.
    ///
    /// For each plane only the box corner furthest along the plane normal (the "positive vertex") is tested.
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        self.planes.iter().all(|plane| {
            let positive_vertex = Vec3A::select(plane.normal.cmpge(Vec3A::ZERO), aabb.max, aabb.min);
            plane.signed_distance(positive_vertex) >= 0.0
        })
    }

    pub fn contains_point(&self, p: Vec3A) -> bool {
        self.planes.iter().all(|plane| plane.signed_distance(p) >= 0.0)
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

#[cfg(test)]
mod test {
    use super::*;

    use crate::glam::Vec3;
    use approx::assert_relative_eq;

    fn looking_down_negative_z() -> Frustum {
        let proj = Mat4::perspective_rh(std::f32::consts::FRAC_PI_2, 1.0, 0.1, 100.0);
        let view = Mat4::look_at_rh(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0), Vec3::Y);
        Frustum::from_view_projection(proj * view)
    }

    #[test]
    fn distance_to_box_is_zero_inside() {
        let aabb = Aabb::from_center_and_size(Vec3A::ZERO, Vec3A::splat(2.0));
        assert!(aabb.contains(Vec3A::new(0.5, -0.5, 0.9)));
        assert_eq!(aabb.squared_distance_to_point(Vec3A::new(0.5, -0.5, 0.9)), 0.0);
    }

    #[test]
    fn distance_to_box_clamps_each_axis() {
        let aabb = Aabb::from_center_and_size(Vec3A::ZERO, Vec3A::splat(2.0));

        // Face region.
        assert_relative_eq!(aabb.squared_distance_to_point(Vec3A::new(3.0, 0.0, 0.0)), 4.0);
        // Corner region.
        assert_relative_eq!(aabb.squared_distance_to_point(Vec3A::new(2.0, -2.0, 2.0)), 3.0);
        // Edge region.
        assert_relative_eq!(aabb.squared_distance_to_point(Vec3A::new(0.0, 3.0, -3.0)), 8.0);
    }

    #[test]
    fn box_center_and_size() {
        let aabb = Aabb::from_min_and_max(Vec3A::new(1.0, 2.0, 3.0), Vec3A::new(3.0, 6.0, 9.0));
        assert_eq!(aabb.center(), Vec3A::new(2.0, 4.0, 6.0));
        assert_eq!(aabb.size(), Vec3A::new(2.0, 4.0, 6.0));
    }

    #[test]
    fn frustum_sees_box_in_front() {
        let frustum = looking_down_negative_z();
        let aabb = Aabb::from_center_and_size(Vec3A::new(0.0, 0.0, -10.0), Vec3A::ONE);
        assert!(frustum.intersects_aabb(&aabb));
        assert!(frustum.contains_point(Vec3A::new(0.0, 0.0, -10.0)));
    }

    #[test]
    fn frustum_culls_box_behind() {
        let frustum = looking_down_negative_z();
        let aabb = Aabb::from_center_and_size(Vec3A::new(0.0, 0.0, 10.0), Vec3A::ONE);
        assert!(!frustum.intersects_aabb(&aabb));
    }

    #[test]
    fn frustum_culls_box_beyond_far_plane() {
        let frustum = looking_down_negative_z();
        let aabb = Aabb::from_center_and_size(Vec3A::new(0.0, 0.0, -200.0), Vec3A::ONE);
        assert!(!frustum.intersects_aabb(&aabb));
    }

    #[test]
    fn frustum_keeps_box_straddling_a_side_plane() {
        let frustum = looking_down_negative_z();
        // With a 90 degree FOV, the right plane passes through x = 10 at z = -10.
        let aabb = Aabb::from_center_and_size(Vec3A::new(10.5, 0.0, -10.0), Vec3A::splat(2.0));
        assert!(frustum.intersects_aabb(&aabb));

        let far_right = Aabb::from_center_and_size(Vec3A::new(20.0, 0.0, -10.0), Vec3A::splat(2.0));
        assert!(!frustum.intersects_aabb(&far_right));
    }
}
