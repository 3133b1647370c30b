//! Closest-point utilities
//!
//! Reusable distance primitives consumed by the overlap predicates and by
//! callers that need witness points (character controllers, animation IK).
//! Algorithms follow Ericson, "Real-Time Collision Detection", ch. 5.

use crate::collision::volumes::{BoundingBox, LineSegment};
use crate::foundation::math::{constants::EPSILON, utils::clamp, Vec3};

/// Closest point on a line segment to the query point.
///
/// A segment collapsed to a point returns that point.
pub fn closest_point_on_segment(q: Vec3, l: &LineSegment) -> Vec3 {
    let ab = l.b - l.a;
    let len_sq = ab.norm_squared();
    if len_sq <= EPSILON {
        return l.a;
    }
    let mut t = (q - l.a).dot(&ab) / len_sq;
    t = clamp(t, 0.0, 1.0);
    l.a + ab * t
}

/// Closest point on (or in) an AABB to the query point
pub fn closest_point_on_aabb(q: Vec3, aabb: &BoundingBox) -> Vec3 {
    let mut result = Vec3::zeros();
    for i in 0..3 {
        let mut v = q[i];
        if v < aabb.min_corner[i] {
            v = aabb.min_corner[i];
        }
        if v > aabb.max_corner[i] {
            v = aabb.max_corner[i];
        }
        result[i] = v;
    }
    result
}

/// Closest point on a triangle to the query point.
///
/// Walks the Voronoi regions of the triangle: vertex regions first, then
/// edge regions, falling through to the interior.
pub fn closest_point_on_triangle(p: Vec3, a: Vec3, b: Vec3, c: Vec3) -> Vec3 {
    let ab = b - a;
    let ac = c - a;
    let ap = p - a;
    let d1 = ab.dot(&ap);
    let d2 = ac.dot(&ap);
    if d1 <= 0.0 && d2 <= 0.0 {
        return a; // Barycentric coordinates (1,0,0)
    }

    // Check if P in vertex region outside B
    let bp = p - b;
    let d3 = ab.dot(&bp);
    let d4 = ac.dot(&bp);
    if d3 >= 0.0 && d4 <= d3 {
        return b; // Barycentric coordinates (0,1,0)
    }

    // Check if P in edge region of AB, if so return projection of P onto AB
    let vc = d1 * d4 - d3 * d2;
    if vc <= 0.0 && d1 >= 0.0 && d3 <= 0.0 {
        let v = d1 / (d1 - d3);
        return a + v * ab; // Barycentric coordinates (1-v,v,0)
    }

    // Check if P in vertex region outside C
    let cp = p - c;
    let d5 = ab.dot(&cp);
    let d6 = ac.dot(&cp);
    if d6 >= 0.0 && d5 <= d6 {
        return c; // Barycentric coordinates (0,0,1)
    }

    // Check if P in edge region of AC, if so return projection of P onto AC
    let vb = d5 * d2 - d1 * d6;
    if vb <= 0.0 && d2 >= 0.0 && d6 <= 0.0 {
        let w = d2 / (d2 - d6);
        return a + w * ac; // Barycentric coordinates (1-w,0,w)
    }

    // Check if P in edge region of BC, if so return projection of P onto BC
    let va = d3 * d6 - d5 * d4;
    if va <= 0.0 && (d4 - d3) >= 0.0 && (d5 - d6) >= 0.0 {
        let w = (d4 - d3) / ((d4 - d3) + (d5 - d6));
        return b + w * (c - b); // Barycentric coordinates (0,1-w,w)
    }

    // P inside face region. Compute the projection through barycentrics.
    let denom = 1.0 / (va + vb + vc);
    let v = vb * denom;
    let w = vc * denom;
    a + ab * v + ac * w
}

/// Witness points of the closest approach between two segments
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SegmentClosestPoints {
    /// Closest point on the first segment
    pub on_first: Vec3,
    /// Closest point on the second segment
    pub on_second: Vec3,
    /// Squared distance between the witness points
    pub distance_squared: f32,
}

/// Closest points between two line segments.
///
/// Handles all degeneracies: either or both segments collapsing to a point,
/// and parallel segments (an arbitrary but valid pair is returned).
pub fn closest_point_segment_segment(l1: &LineSegment, l2: &LineSegment) -> SegmentClosestPoints {
    let d1 = l1.b - l1.a; // Direction vector of segment S1
    let d2 = l2.b - l2.a; // Direction vector of segment S2
    let r = l1.a - l2.a;
    let a = d1.norm_squared(); // Squared length of S1, always nonnegative
    let e = d2.norm_squared(); // Squared length of S2, always nonnegative
    let f = d2.dot(&r);

    let s;
    let mut t;

    if a <= EPSILON && e <= EPSILON {
        // Both segments degenerate into points
        return SegmentClosestPoints {
            on_first: l1.a,
            on_second: l2.a,
            distance_squared: (l1.a - l2.a).norm_squared(),
        };
    }
    if a <= EPSILON {
        // First segment degenerates into a point
        s = 0.0;
        t = clamp(f / e, 0.0, 1.0); // s = 0 => t = (b*s + f) / e = f / e
    } else {
        let c = d1.dot(&r);
        if e <= EPSILON {
            // Second segment degenerates into a point
            t = 0.0;
            s = clamp(-c / a, 0.0, 1.0); // t = 0 => s = (b*t - c) / a = -c / a
        } else {
            // The general nondegenerate case
            let b = d1.dot(&d2);
            let denom = a * e - b * b; // Always nonnegative

            // If segments not parallel, compute closest point on L1 to L2 and
            // clamp to segment S1. Else pick arbitrary s (here 0).
            let mut s_ = if denom != 0.0 {
                clamp((b * f - c * e) / denom, 0.0, 1.0)
            } else {
                0.0
            };

            // Compute point on L2 closest to S1(s): t = (b*s + f) / e
            t = (b * s_ + f) / e;

            // If t in [0,1] done. Else clamp t and recompute s for the new t.
            if t < 0.0 {
                t = 0.0;
                s_ = clamp(-c / a, 0.0, 1.0);
            } else if t > 1.0 {
                t = 1.0;
                s_ = clamp((b - c) / a, 0.0, 1.0);
            }
            s = s_;
        }
    }

    let on_first = l1.a + d1 * s;
    let on_second = l2.a + d2 * t;
    SegmentClosestPoints {
        on_first,
        on_second,
        distance_squared: (on_first - on_second).norm_squared(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_point_segment_clamps_to_endpoints() {
        let l = LineSegment {
            a: Vec3::zeros(),
            b: Vec3::new(1.0, 0.0, 0.0),
        };
        assert_relative_eq!(closest_point_on_segment(Vec3::new(-2.0, 1.0, 0.0), &l), l.a);
        assert_relative_eq!(closest_point_on_segment(Vec3::new(5.0, -1.0, 0.0), &l), l.b);
        assert_relative_eq!(
            closest_point_on_segment(Vec3::new(0.25, 3.0, 0.0), &l),
            Vec3::new(0.25, 0.0, 0.0)
        );
    }

    #[test]
    fn test_point_segment_degenerate() {
        let p = LineSegment {
            a: Vec3::new(3.0, -1.0, 2.0),
            b: Vec3::new(3.0, -1.0, 2.0),
        };
        let result = closest_point_on_segment(Vec3::new(10.0, 0.0, 0.0), &p);
        assert!(result.iter().all(|v| v.is_finite()));
        assert_relative_eq!(result, p.a);
    }

    #[test]
    fn test_point_aabb_inside_is_identity() {
        let bb = BoundingBox::from_center_radius(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        let inside = Vec3::new(0.2, -0.3, 0.9);
        assert_eq!(closest_point_on_aabb(inside, &bb), inside);
        assert_eq!(
            closest_point_on_aabb(Vec3::new(4.0, 0.0, -7.0), &bb),
            Vec3::new(1.0, 0.0, -1.0)
        );
    }

    #[test]
    fn test_point_triangle_regions() {
        let a = Vec3::zeros();
        let b = Vec3::new(2.0, 0.0, 0.0);
        let c = Vec3::new(0.0, 2.0, 0.0);

        // Vertex region
        assert_relative_eq!(closest_point_on_triangle(Vec3::new(-1.0, -1.0, 0.0), a, b, c), a);
        // Edge region of AB
        assert_relative_eq!(
            closest_point_on_triangle(Vec3::new(1.0, -1.0, 0.0), a, b, c),
            Vec3::new(1.0, 0.0, 0.0)
        );
        // Interior projects onto the plane
        assert_relative_eq!(
            closest_point_on_triangle(Vec3::new(0.5, 0.5, 3.0), a, b, c),
            Vec3::new(0.5, 0.5, 0.0)
        );
    }

    #[test]
    fn test_segment_segment_crossing() {
        let l1 = LineSegment {
            a: Vec3::new(-1.0, 0.0, 0.0),
            b: Vec3::new(1.0, 0.0, 0.0),
        };
        let l2 = LineSegment {
            a: Vec3::new(0.0, -1.0, 1.0),
            b: Vec3::new(0.0, 1.0, 1.0),
        };
        let result = closest_point_segment_segment(&l1, &l2);
        assert_relative_eq!(result.on_first, Vec3::zeros(), epsilon = 1e-6);
        assert_relative_eq!(result.on_second, Vec3::new(0.0, 0.0, 1.0), epsilon = 1e-6);
        assert_relative_eq!(result.distance_squared, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_segment_segment_degenerate_points() {
        let p1 = LineSegment {
            a: Vec3::new(1.0, 2.0, 3.0),
            b: Vec3::new(1.0, 2.0, 3.0),
        };
        let p2 = LineSegment {
            a: Vec3::new(1.0, 2.0, 7.0),
            b: Vec3::new(1.0, 2.0, 7.0),
        };
        let result = closest_point_segment_segment(&p1, &p2);
        assert_relative_eq!(result.distance_squared, 16.0);
    }

    #[test]
    fn test_segment_segment_parallel() {
        let l1 = LineSegment {
            a: Vec3::zeros(),
            b: Vec3::new(1.0, 0.0, 0.0),
        };
        let l2 = LineSegment {
            a: Vec3::new(0.0, 2.0, 0.0),
            b: Vec3::new(1.0, 2.0, 0.0),
        };
        let result = closest_point_segment_segment(&l1, &l2);
        assert_relative_eq!(result.distance_squared, 4.0, epsilon = 1e-6);
    }
}
