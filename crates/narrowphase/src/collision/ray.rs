//! Ray-intersection suite
//!
//! One closed-form test per primitive shape, each returning the smallest
//! valid hit parameter `t` such that `origin + t * direction` lies on the
//! shape surface. Failure (miss, parallel or degenerate geometry) is always
//! reported as `None`, never as a panic.

use crate::collision::hull::BoundingHull;
use crate::collision::polynomial::solve_quartic;
use crate::collision::volumes::{
    BoundingBox, BoundingCapsule, BoundingCylinder, BoundingOrientedBox, BoundingSphere,
    BoundingTorus,
};
use crate::foundation::math::{noz, rotate_from_to, Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Tolerance for parallel-ray and on-surface decisions
const RAY_EPSILON: f32 = 1e-6;

/// A ray for intersection queries and picking.
///
/// The direction is stored exactly as given. Routines that require a
/// normalized direction say so; everything else works with the parameter
/// space the caller supplied.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Ray {
    /// The origin point of the ray
    pub origin: Vec3,
    /// The direction of the ray
    pub direction: Vec3,
}

/// Result of a ray-triangle test
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TriangleHit {
    /// Hit parameter along the ray
    pub t: f32,
    /// True if the ray approaches the triangle from the side its normal
    /// points toward
    pub front_facing: bool,
}

/// Sign-bit barycentric point-in-triangle test.
///
/// Solves the 2x2 barycentric system and checks `x >= 0, y >= 0,
/// x + y <= ac_bb` purely through the sign bits of the three values.
fn point_in_triangle(point: Vec3, a: Vec3, b: Vec3, c: Vec3) -> bool {
    let e10 = b - a;
    let e20 = c - a;
    let aa = e10.dot(&e10);
    let bb = e10.dot(&e20);
    let cc = e20.dot(&e20);
    let ac_bb = aa * cc - bb * bb;
    let vp = point - a;
    let d = vp.dot(&e10);
    let e = vp.dot(&e20);
    let x = d * cc - e * bb;
    let y = e * aa - d * bb;
    let z = x + y - ac_bb;
    ((z.to_bits() & !(x.to_bits() | y.to_bits())) & 0x8000_0000) != 0
}

impl Ray {
    /// Creates a new ray; the direction is kept as passed in
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Point along the ray at parameter t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }

    /// Intersects the plane `dot(n, p) + d == 0`.
    ///
    /// Returns `None` when the ray is parallel to the plane. The returned
    /// parameter may be negative; callers that only want hits in front of
    /// the origin filter themselves.
    pub fn intersect_plane(&self, normal: Vec3, d: f32) -> Option<f32> {
        let ndotd = self.direction.dot(&normal);
        if ndotd.abs() < RAY_EPSILON {
            return None;
        }

        Some(-(self.origin.dot(&normal) + d) / ndotd)
    }

    /// Intersects the plane through `point` with the given normal
    pub fn intersect_plane_point(&self, normal: Vec3, point: Vec3) -> Option<f32> {
        let d = -normal.dot(&point);
        self.intersect_plane(normal, d)
    }

    /// Slab test against an axis-aligned box.
    ///
    /// A zero direction component produces infinite slab bounds, which the
    /// min/max arithmetic handles. Hits behind or exactly at the origin
    /// report `None`.
    pub fn intersect_aabb(&self, a: &BoundingBox) -> Option<f32> {
        let inv_dir = Vec3::new(
            1.0 / self.direction.x,
            1.0 / self.direction.y,
            1.0 / self.direction.z,
        );

        let tx1 = (a.min_corner.x - self.origin.x) * inv_dir.x;
        let tx2 = (a.max_corner.x - self.origin.x) * inv_dir.x;

        let mut tmin = tx1.min(tx2);
        let mut tmax = tx1.max(tx2);

        let ty1 = (a.min_corner.y - self.origin.y) * inv_dir.y;
        let ty2 = (a.max_corner.y - self.origin.y) * inv_dir.y;

        tmin = tmin.max(ty1.min(ty2));
        tmax = tmax.min(ty1.max(ty2));

        let tz1 = (a.min_corner.z - self.origin.z) * inv_dir.z;
        let tz2 = (a.max_corner.z - self.origin.z) * inv_dir.z;

        tmin = tmin.max(tz1.min(tz2));
        tmax = tmax.min(tz1.max(tz2));

        (tmax >= tmin && tmin > 0.0).then_some(tmin)
    }

    /// Intersects an oriented box by rotating the ray into the box's local
    /// frame and running the AABB slab test there
    pub fn intersect_obb(&self, a: &BoundingOrientedBox) -> Option<f32> {
        let inv_rotation = a.rotation.conjugate();
        let local = Ray {
            origin: inv_rotation * (self.origin - a.center),
            direction: inv_rotation * self.direction,
        };
        local.intersect_aabb(&BoundingBox::from_center_radius(Vec3::zeros(), a.radius))
    }

    /// Intersects a triangle, reporting the hit parameter and which side the
    /// ray came from (`front_facing` is true when the ray direction opposes
    /// the triangle normal)
    pub fn intersect_triangle(&self, a: Vec3, b: Vec3, c: Vec3) -> Option<TriangleHit> {
        let normal = noz((b - a).cross(&(c - a)));
        let d = -normal.dot(&a);

        let n_dot_r = self.direction.dot(&normal);
        if n_dot_r.abs() <= RAY_EPSILON {
            return None;
        }

        let t = -(self.origin.dot(&normal) + d) / n_dot_r;

        let q = self.point_at(t);
        let front_facing = n_dot_r < 0.0;
        (t >= 0.0 && point_in_triangle(q, a, b, c)).then_some(TriangleHit { t, front_facing })
    }

    /// Intersects a sphere given by center and radius.
    ///
    /// Requires a normalized direction. Rays starting outside and pointing
    /// away are rejected up front; an origin inside the sphere reports a hit
    /// at `t = 0`.
    pub fn intersect_sphere(&self, center: Vec3, radius: f32) -> Option<f32> {
        let m = self.origin - center;
        let b = m.dot(&self.direction);
        let c = m.dot(&m) - radius * radius;

        if c > 0.0 && b > 0.0 {
            return None;
        }

        let discr = b * b - c;
        if discr < 0.0 {
            return None;
        }

        let t = -b - discr.sqrt();
        Some(t.max(0.0))
    }

    /// Intersects a bounding sphere
    pub fn intersect_sphere_volume(&self, sphere: &BoundingSphere) -> Option<f32> {
        self.intersect_sphere(sphere.center, sphere.radius)
    }

    /// Intersects a finite capped cylinder.
    ///
    /// The ray is rotated into a frame where the cylinder axis is +Y with
    /// its base at the origin. Side hits are only possible when the origin
    /// projects outside the infinite cylinder; hits outside the cap range
    /// fall through to the two end-cap disks.
    pub fn intersect_cylinder(&self, cylinder: &BoundingCylinder) -> Option<f32> {
        let axis = cylinder.position_b - cylinder.position_a;
        let height = axis.norm();

        let q = rotate_from_to(axis, Vec3::new(0.0, 1.0, 0.0));

        let o = q * (self.origin - cylinder.position_a);
        let d = q * self.direction;

        let mut hit_t = None;
        let mut y = -1.0;

        if Vec2::new(o.x, o.z).norm_squared() > cylinder.radius * cylinder.radius {
            // Outside the infinite cylinder; only here can the sides be hit
            let a = d.x * d.x + d.z * d.z;
            let b = d.x * o.x + d.z * o.z;
            let c = o.x * o.x + o.z * o.z - cylinder.radius * cylinder.radius;

            let delta = b * b - a * c;
            if delta < RAY_EPSILON {
                return None;
            }

            let t = (-b - delta.sqrt()) / a;
            if t <= RAY_EPSILON {
                return None; // Behind ray
            }

            hit_t = Some(t);
            y = o.y + t * d.y;
        }

        // Check the caps. Always taken if the side branch was skipped.
        if y > height + RAY_EPSILON || y < -RAY_EPSILON {
            let local_ray = Ray {
                origin: o,
                direction: d,
            };

            if d.y < 0.0 {
                if let Some(dist) = local_ray.intersect_disk(
                    Vec3::new(0.0, height, 0.0),
                    Vec3::new(0.0, 1.0, 0.0),
                    cylinder.radius,
                ) {
                    hit_t = Some(dist);
                }
            }
            if d.y > 0.0 {
                if let Some(dist) = local_ray.intersect_disk(
                    Vec3::zeros(),
                    Vec3::new(0.0, -1.0, 0.0),
                    cylinder.radius,
                ) {
                    hit_t = Some(dist);
                }
            }

            if let Some(t) = hit_t {
                y = o.y + t * d.y;
            }
        }

        (y > -RAY_EPSILON && y < height + RAY_EPSILON)
            .then_some(hit_t)
            .flatten()
    }

    /// Intersects a capsule: minimum over the connecting cylinder and the
    /// two end-cap spheres
    pub fn intersect_capsule(&self, capsule: &BoundingCapsule) -> Option<f32> {
        let mut result = None;

        if let Some(t) = self.intersect_cylinder(&BoundingCylinder {
            position_a: capsule.position_a,
            position_b: capsule.position_b,
            radius: capsule.radius,
        }) {
            result = Some(t);
        }
        if let Some(t) = self.intersect_sphere(capsule.position_a, capsule.radius) {
            result = Some(result.map_or(t, |prev: f32| prev.min(t)));
        }
        if let Some(t) = self.intersect_sphere(capsule.position_b, capsule.radius) {
            result = Some(result.map_or(t, |prev: f32| prev.min(t)));
        }

        result
    }

    /// Intersects a flat disk given by center, normal, and radius
    pub fn intersect_disk(&self, pos: Vec3, normal: Vec3, radius: f32) -> Option<f32> {
        let t = self.intersect_plane_point(normal, pos)?;
        ((self.point_at(t) - pos).norm() <= radius).then_some(t)
    }

    /// Intersects a flat rectangle spanned by tangent and bitangent with the
    /// given half-extents
    pub fn intersect_rectangle(
        &self,
        pos: Vec3,
        tangent: Vec3,
        bitangent: Vec3,
        radius: Vec2,
    ) -> Option<f32> {
        let normal = tangent.cross(&bitangent);
        let t = self.intersect_plane_point(normal, pos)?;

        let offset = self.point_at(t) - pos;
        let projected = Vec2::new(offset.dot(&tangent).abs(), offset.dot(&bitangent).abs());
        (projected.x <= radius.x && projected.y <= radius.y).then_some(t)
    }

    /// Intersects a torus.
    ///
    /// The ray is rotated into the torus frame (up axis to +Y), the quartic
    /// coefficients of the implicit torus equation are built, and the
    /// smallest real root beyond the surface epsilon wins. Only a root-less
    /// quartic reports a miss.
    pub fn intersect_torus(&self, torus: &BoundingTorus) -> Option<f32> {
        let q = rotate_from_to(torus.up_axis, Vec3::new(0.0, 1.0, 0.0));

        let o = q * (self.origin - torus.position);
        let d = q * self.direction;

        let sum_d_sqrd = d.dot(&d);
        let e = o.dot(&o) - torus.major_radius * torus.major_radius
            - torus.tube_radius * torus.tube_radius;
        let f = o.dot(&d);
        let four_a_sqrd = 4.0 * torus.major_radius * torus.major_radius;

        let solution = solve_quartic(
            e * e - four_a_sqrd * (torus.tube_radius * torus.tube_radius - o.y * o.y),
            4.0 * f * e + 2.0 * four_a_sqrd * o.y * d.y,
            2.0 * sum_d_sqrd * e + 4.0 * f * f + four_a_sqrd * d.y * d.y,
            4.0 * sum_d_sqrd * f,
            sum_d_sqrd * sum_d_sqrd,
        );

        if solution.is_empty() {
            return None;
        }

        // Smallest root greater than the epsilon; the roots are unsorted
        let mut min_t = f32::MAX;
        for &t in solution.iter() {
            if t > RAY_EPSILON && t < min_t {
                min_t = t;
            }
        }
        Some(min_t)
    }

    /// Intersects a convex hull by testing every face in the hull's local
    /// frame and keeping the nearest hit. O(faces), no acceleration
    /// structure.
    pub fn intersect_hull(&self, hull: &BoundingHull<'_>) -> Option<f32> {
        let inv_rotation = hull.rotation.conjugate();
        let local = Ray {
            origin: inv_rotation * (self.origin - hull.position),
            direction: inv_rotation * self.direction,
        };

        let geometry = hull.geometry;
        let mut min_t = None;

        for face in &geometry.faces {
            let a = geometry.vertices[usize::from(face.a)];
            let b = geometry.vertices[usize::from(face.b)];
            let c = geometry.vertices[usize::from(face.c)];

            if let Some(hit) = local.intersect_triangle(a, b, c) {
                if min_t.map_or(true, |t| hit.t < t) {
                    min_t = Some(hit.t);
                }
            }
        }

        min_t
    }
}
