//! Pairwise boolean overlap predicates.
//!
//! Each function answers "do these two volumes intersect" with surface
//! contact counting as overlap. Cheap analytic tests are used wherever a
//! closed form exists; pairs without one (anything involving a convex hull
//! or a cylinder against a box) fall through to the GJK engine in
//! [`crate::collision::gjk`].

use crate::collision::closest::{
    closest_point_on_aabb, closest_point_on_segment, closest_point_on_triangle,
    closest_point_segment_segment,
};
use crate::collision::gjk::gjk_intersection;
use crate::collision::hull::BoundingHull;
use crate::collision::volumes::{
    signed_distance_to_plane, BoundingBox, BoundingCapsule, BoundingCylinder, BoundingOrientedBox,
    BoundingSphere, LineSegment,
};
use crate::foundation::math::{constants::EPSILON, noz, Quat, Vec3, Vec4};
use crate::foundation::math::utils::lerp_vec3;

/// Sphere vs sphere: center distance against the radius sum
pub fn sphere_vs_sphere(a: &BoundingSphere, b: &BoundingSphere) -> bool {
    let d = a.center - b.center;
    let radius_sum = a.radius + b.radius;
    d.norm_squared() <= radius_sum * radius_sum
}

/// Sphere vs plane
pub fn sphere_vs_plane(s: &BoundingSphere, plane: Vec4) -> bool {
    signed_distance_to_plane(s.center, plane).abs() <= s.radius
}

/// Sphere vs capsule: sphere test against the closest point on the core
/// segment
pub fn sphere_vs_capsule(s: &BoundingSphere, c: &BoundingCapsule) -> bool {
    let closest = closest_point_on_segment(
        s.center,
        &LineSegment {
            a: c.position_a,
            b: c.position_b,
        },
    );
    sphere_vs_sphere(
        s,
        &BoundingSphere {
            center: closest,
            radius: c.radius,
        },
    )
}

/// Sphere vs cylinder.
///
/// When the sphere center projects onto the axis the cylinder acts like a
/// sphere at that point. Past an end cap, the sphere is tested against the
/// cap rim diameter closest to it.
pub fn sphere_vs_cylinder(s: &BoundingSphere, c: &BoundingCylinder) -> bool {
    let ab = c.position_b - c.position_a;
    let t = (s.center - c.position_a).dot(&ab) / ab.norm_squared();
    if (0.0..=1.0).contains(&t) {
        return sphere_vs_sphere(
            s,
            &BoundingSphere {
                center: lerp_vec3(c.position_a, c.position_b, t),
                radius: c.radius,
            },
        );
    }

    let (p, up) = if t <= 0.0 {
        (c.position_a, -ab)
    } else {
        (c.position_b, ab)
    };

    let projected_dir_to_center = noz(up.cross(&(s.center - p)).cross(&up));
    let end_a = p + projected_dir_to_center * c.radius;
    let end_b = p - projected_dir_to_center * c.radius;

    let closest_to_sphere = closest_point_on_segment(s.center, &LineSegment { a: end_a, b: end_b });
    let sq_distance = (closest_to_sphere - s.center).norm_squared();

    sq_distance <= s.radius * s.radius
}

/// Sphere vs axis-aligned box: distance to the clamped point
pub fn sphere_vs_aabb(s: &BoundingSphere, a: &BoundingBox) -> bool {
    let p = closest_point_on_aabb(s.center, a);
    let sq_distance = (p - s.center).norm_squared();
    sq_distance <= s.radius * s.radius
}

/// Sphere vs oriented box: rotate the sphere into the box frame and reuse
/// the AABB test
pub fn sphere_vs_obb(s: &BoundingSphere, o: &BoundingOrientedBox) -> bool {
    let aabb = BoundingBox::from_center_radius(o.center, o.radius);
    let local = BoundingSphere {
        center: o.rotation.conjugate() * (s.center - o.center) + o.center,
        radius: s.radius,
    };
    sphere_vs_aabb(&local, &aabb)
}

/// Sphere vs convex hull via GJK
pub fn sphere_vs_hull(s: &BoundingSphere, h: &BoundingHull<'_>) -> bool {
    gjk_intersection(s, h)
}

/// Sphere vs triangle: distance to the closest point on the triangle
pub fn sphere_vs_triangle(s: &BoundingSphere, a: Vec3, b: Vec3, c: Vec3) -> bool {
    let p = closest_point_on_triangle(s.center, a, b, c);
    let v = p - s.center;
    v.dot(&v) <= s.radius * s.radius
}

/// Capsule vs capsule: sphere test at the closest points of the two core
/// segments
pub fn capsule_vs_capsule(a: &BoundingCapsule, b: &BoundingCapsule) -> bool {
    let closest = closest_point_segment_segment(
        &LineSegment {
            a: a.position_a,
            b: a.position_b,
        },
        &LineSegment {
            a: b.position_a,
            b: b.position_b,
        },
    );
    sphere_vs_sphere(
        &BoundingSphere {
            center: closest.on_first,
            radius: a.radius,
        },
        &BoundingSphere {
            center: closest.on_second,
            radius: b.radius,
        },
    )
}

/// Capsule vs cylinder: reduce the capsule to a sphere at the closest point
/// between the two axes
pub fn capsule_vs_cylinder(a: &BoundingCapsule, b: &BoundingCylinder) -> bool {
    let closest = closest_point_segment_segment(
        &LineSegment {
            a: a.position_a,
            b: a.position_b,
        },
        &LineSegment {
            a: b.position_a,
            b: b.position_b,
        },
    );
    sphere_vs_cylinder(
        &BoundingSphere {
            center: closest.on_first,
            radius: a.radius,
        },
        b,
    )
}

/// Capsule vs axis-aligned box via GJK
pub fn capsule_vs_aabb(c: &BoundingCapsule, b: &BoundingBox) -> bool {
    gjk_intersection(c, b)
}

/// Capsule vs oriented box: rotate the capsule into the box frame and reuse
/// the AABB test
pub fn capsule_vs_obb(c: &BoundingCapsule, o: &BoundingOrientedBox) -> bool {
    let aabb = BoundingBox::from_center_radius(o.center, o.radius);
    let inv_rotation = o.rotation.conjugate();
    let local = BoundingCapsule {
        position_a: inv_rotation * (c.position_a - o.center) + o.center,
        position_b: inv_rotation * (c.position_b - o.center) + o.center,
        radius: c.radius,
    };
    capsule_vs_aabb(&local, &aabb)
}

/// Capsule vs convex hull via GJK
pub fn capsule_vs_hull(c: &BoundingCapsule, h: &BoundingHull<'_>) -> bool {
    gjk_intersection(c, h)
}

/// Capsule vs triangle.
///
/// Traces the capsule axis through the triangle plane, picks the capsule
/// point closest to that trace, and finishes with a sphere-triangle test.
/// A capsule axis parallel to the plane falls back to the segment midpoint
/// as the reference.
pub fn capsule_vs_triangle(capsule: &BoundingCapsule, a: Vec3, b: Vec3, c: Vec3) -> bool {
    let axis = noz(capsule.position_b - capsule.position_a);

    let tri_normal = noz((b - a).cross(&(c - a)));
    let d = -tri_normal.dot(&a);

    let ndotd = axis.dot(&tri_normal);

    let trace = if ndotd.abs() > EPSILON {
        let t = -(capsule.position_a.dot(&tri_normal) + d) / ndotd;
        capsule.position_a + t * axis
    } else {
        (capsule.position_a + capsule.position_b) * 0.5
    };
    let closest = closest_point_on_triangle(trace, a, b, c);

    let reference = closest_point_on_segment(
        closest,
        &LineSegment {
            a: capsule.position_a,
            b: capsule.position_b,
        },
    );

    sphere_vs_triangle(
        &BoundingSphere {
            center: reference,
            radius: capsule.radius,
        },
        a,
        b,
        c,
    )
}

/// Cylinder vs cylinder via GJK
pub fn cylinder_vs_cylinder(a: &BoundingCylinder, b: &BoundingCylinder) -> bool {
    gjk_intersection(a, b)
}

/// Cylinder vs axis-aligned box via GJK
pub fn cylinder_vs_aabb(c: &BoundingCylinder, b: &BoundingBox) -> bool {
    gjk_intersection(c, b)
}

/// Cylinder vs oriented box: rotate the cylinder into the box frame and
/// reuse the AABB test
pub fn cylinder_vs_obb(c: &BoundingCylinder, o: &BoundingOrientedBox) -> bool {
    let aabb = BoundingBox::from_center_radius(o.center, o.radius);
    let inv_rotation = o.rotation.conjugate();
    let local = BoundingCylinder {
        position_a: inv_rotation * (c.position_a - o.center) + o.center,
        position_b: inv_rotation * (c.position_b - o.center) + o.center,
        radius: c.radius,
    };
    cylinder_vs_aabb(&local, &aabb)
}

/// Cylinder vs convex hull via GJK
pub fn cylinder_vs_hull(c: &BoundingCylinder, h: &BoundingHull<'_>) -> bool {
    gjk_intersection(c, h)
}

/// AABB vs AABB: per-axis interval overlap
pub fn aabb_vs_aabb(a: &BoundingBox, b: &BoundingBox) -> bool {
    if a.max_corner.x < b.min_corner.x || a.min_corner.x > b.max_corner.x {
        return false;
    }
    if a.max_corner.y < b.min_corner.y || a.min_corner.y > b.max_corner.y {
        return false;
    }
    if a.max_corner.z < b.min_corner.z || a.min_corner.z > b.max_corner.z {
        return false;
    }
    true
}

/// AABB vs oriented box: promote the AABB to an identity-rotation OBB
pub fn aabb_vs_obb(a: &BoundingBox, o: &BoundingOrientedBox) -> bool {
    obb_vs_obb(
        &BoundingOrientedBox {
            rotation: Quat::identity(),
            center: a.center(),
            radius: a.radius(),
        },
        o,
    )
}

/// AABB vs convex hull via GJK
pub fn aabb_vs_hull(a: &BoundingBox, h: &BoundingHull<'_>) -> bool {
    gjk_intersection(a, h)
}

/// AABB vs plane: projected box radius against the center distance
pub fn aabb_vs_plane(a: &BoundingBox, plane: Vec4) -> bool {
    let center = a.center();
    let radius = a.radius();

    let r = radius.x * plane.x.abs() + radius.y * plane.y.abs() + radius.z * plane.z.abs();
    let s = signed_distance_to_plane(center, plane).abs();

    s <= r
}

/// AABB vs triangle: separating-axis test over the 9 edge cross products,
/// the 3 box face normals, and the triangle normal.
///
/// The projected box radius on each axis gets an epsilon added so a
/// triangle edge parallel to a box edge does not produce a false negative
/// from a near-zero cross product.
pub fn aabb_vs_triangle(aabb: &BoundingBox, a: Vec3, b: Vec3, c: Vec3) -> bool {
    let radius = aabb.radius();
    let center = aabb.center();

    let a = a - center;
    let b = b - center;
    let c = c - center;

    let f0 = b - a;
    let f1 = c - b;
    let f2 = a - c;

    // True if the two projections [min(p0,p1), max(p0,p1)] and [-r, r]
    // are disjoint
    let separated = |p0: f32, p1: f32, r: f32| (-p0.max(p1)).max(p0.min(p1)) > r + EPSILON;

    // Axis (1, 0, 0) x f0 = (0, -f0.z, f0.y); projections of a and b
    // coincide, so only two of the three vertices are needed per axis
    if separated(
        a.z * f0.y - a.y * f0.z,
        c.z * f0.y - c.y * f0.z,
        radius.y * f0.z.abs() + radius.z * f0.y.abs(),
    ) {
        return false;
    }
    // Axis (1, 0, 0) x f1
    if separated(
        a.z * f1.y - a.y * f1.z,
        b.z * f1.y - b.y * f1.z,
        radius.y * f1.z.abs() + radius.z * f1.y.abs(),
    ) {
        return false;
    }
    // Axis (1, 0, 0) x f2
    if separated(
        a.z * f2.y - a.y * f2.z,
        b.z * f2.y - b.y * f2.z,
        radius.y * f2.z.abs() + radius.z * f2.y.abs(),
    ) {
        return false;
    }

    // Axis (0, 1, 0) x f0 = (f0.z, 0, -f0.x)
    if separated(
        a.x * f0.z - a.z * f0.x,
        c.x * f0.z - c.z * f0.x,
        radius.x * f0.z.abs() + radius.z * f0.x.abs(),
    ) {
        return false;
    }
    // Axis (0, 1, 0) x f1
    if separated(
        a.x * f1.z - a.z * f1.x,
        b.x * f1.z - b.z * f1.x,
        radius.x * f1.z.abs() + radius.z * f1.x.abs(),
    ) {
        return false;
    }
    // Axis (0, 1, 0) x f2
    if separated(
        a.x * f2.z - a.z * f2.x,
        b.x * f2.z - b.z * f2.x,
        radius.x * f2.z.abs() + radius.z * f2.x.abs(),
    ) {
        return false;
    }

    // Axis (0, 0, 1) x f0 = (-f0.y, f0.x, 0)
    if separated(
        a.y * f0.x - a.x * f0.y,
        c.y * f0.x - c.x * f0.y,
        radius.x * f0.y.abs() + radius.y * f0.x.abs(),
    ) {
        return false;
    }
    // Axis (0, 0, 1) x f1
    if separated(
        a.y * f1.x - a.x * f1.y,
        b.y * f1.x - b.x * f1.y,
        radius.x * f1.y.abs() + radius.y * f1.x.abs(),
    ) {
        return false;
    }
    // Axis (0, 0, 1) x f2
    if separated(
        a.y * f2.x - a.x * f2.y,
        b.y * f2.x - b.x * f2.y,
        radius.x * f2.y.abs() + radius.y * f2.x.abs(),
    ) {
        return false;
    }

    // Face normals of the box: interval overlap per component
    if a.x.max(b.x.max(c.x)) < -radius.x || a.x.min(b.x.min(c.x)) > radius.x {
        return false;
    }
    if a.y.max(b.y.max(c.y)) < -radius.y || a.y.min(b.y.min(c.y)) > radius.y {
        return false;
    }
    if a.z.max(b.z.max(c.z)) < -radius.z || a.z.min(b.z.min(c.z)) > radius.z {
        return false;
    }

    // Triangle face normal
    let tri_normal = f0.cross(&f1);
    let tri_d = tri_normal.dot(&a);

    let r = radius.x * tri_normal.x.abs()
        + radius.y * tri_normal.y.abs()
        + radius.z * tri_normal.z.abs();

    tri_d.abs() <= r
}

/// Oriented box vs oriented box: full 15-axis separating-axis test.
///
/// The rotation of B relative to A is built from axis dot products; every
/// absolute entry gets an epsilon added so near-parallel edges do not
/// produce a degenerate cross-product axis.
pub fn obb_vs_obb(a: &BoundingOrientedBox, b: &BoundingOrientedBox) -> bool {
    let axes_a = [
        a.rotation * Vec3::new(1.0, 0.0, 0.0),
        a.rotation * Vec3::new(0.0, 1.0, 0.0),
        a.rotation * Vec3::new(0.0, 0.0, 1.0),
    ];
    let axes_b = [
        b.rotation * Vec3::new(1.0, 0.0, 0.0),
        b.rotation * Vec3::new(0.0, 1.0, 0.0),
        b.rotation * Vec3::new(0.0, 0.0, 1.0),
    ];

    let mut r = [[0.0_f32; 3]; 3];
    let mut abs_r = [[0.0_f32; 3]; 3];
    for i in 0..3 {
        for j in 0..3 {
            r[i][j] = axes_a[i].dot(&axes_b[j]);
            abs_r[i][j] = r[i][j].abs() + EPSILON;
        }
    }

    // Translation, expressed in A's frame
    let t_world = b.center - a.center;
    let t = a.rotation.conjugate() * t_world;

    // A's face axes
    for i in 0..3 {
        let ra = a.radius[i];
        let rb = abs_r[i][0] * b.radius.x + abs_r[i][1] * b.radius.y + abs_r[i][2] * b.radius.z;
        if t[i].abs() > ra + rb {
            return false;
        }
    }

    // B's face axes
    for j in 0..3 {
        let ra = abs_r[0][j] * a.radius.x + abs_r[1][j] * a.radius.y + abs_r[2][j] * a.radius.z;
        let rb = b.radius[j];
        let d = r[0][j] * t.x + r[1][j] * t.y + r[2][j] * t.z;
        if d.abs() > ra + rb {
            return false;
        }
    }

    // a.x x b.x
    let ra = a.radius.y * abs_r[2][0] + a.radius.z * abs_r[1][0];
    let rb = b.radius.y * abs_r[0][2] + b.radius.z * abs_r[0][1];
    if (t.z * r[1][0] - t.y * r[2][0]).abs() > ra + rb {
        return false;
    }

    // a.x x b.y
    let ra = a.radius.y * abs_r[2][1] + a.radius.z * abs_r[1][1];
    let rb = b.radius.x * abs_r[0][2] + b.radius.z * abs_r[0][0];
    if (t.z * r[1][1] - t.y * r[2][1]).abs() > ra + rb {
        return false;
    }

    // a.x x b.z
    let ra = a.radius.y * abs_r[2][2] + a.radius.z * abs_r[1][2];
    let rb = b.radius.x * abs_r[0][1] + b.radius.y * abs_r[0][0];
    if (t.z * r[1][2] - t.y * r[2][2]).abs() > ra + rb {
        return false;
    }

    // a.y x b.x
    let ra = a.radius.x * abs_r[2][0] + a.radius.z * abs_r[0][0];
    let rb = b.radius.y * abs_r[1][2] + b.radius.z * abs_r[1][1];
    if (t.x * r[2][0] - t.z * r[0][0]).abs() > ra + rb {
        return false;
    }

    // a.y x b.y
    let ra = a.radius.x * abs_r[2][1] + a.radius.z * abs_r[0][1];
    let rb = b.radius.x * abs_r[1][2] + b.radius.z * abs_r[1][0];
    if (t.x * r[2][1] - t.z * r[0][1]).abs() > ra + rb {
        return false;
    }

    // a.y x b.z
    let ra = a.radius.x * abs_r[2][2] + a.radius.z * abs_r[0][2];
    let rb = b.radius.x * abs_r[1][1] + b.radius.y * abs_r[1][0];
    if (t.x * r[2][2] - t.z * r[0][2]).abs() > ra + rb {
        return false;
    }

    // a.z x b.x
    let ra = a.radius.x * abs_r[1][0] + a.radius.y * abs_r[0][0];
    let rb = b.radius.y * abs_r[2][2] + b.radius.z * abs_r[2][1];
    if (t.y * r[0][0] - t.x * r[1][0]).abs() > ra + rb {
        return false;
    }

    // a.z x b.y
    let ra = a.radius.x * abs_r[1][1] + a.radius.y * abs_r[0][1];
    let rb = b.radius.x * abs_r[2][2] + b.radius.z * abs_r[2][0];
    if (t.y * r[0][1] - t.x * r[1][1]).abs() > ra + rb {
        return false;
    }

    // a.z x b.z
    let ra = a.radius.x * abs_r[1][2] + a.radius.y * abs_r[0][2];
    let rb = b.radius.x * abs_r[2][1] + b.radius.y * abs_r[2][0];
    if (t.y * r[0][2] - t.x * r[1][2]).abs() > ra + rb {
        return false;
    }

    true
}

/// Oriented box vs convex hull via GJK
pub fn obb_vs_hull(o: &BoundingOrientedBox, h: &BoundingHull<'_>) -> bool {
    gjk_intersection(o, h)
}

/// Oriented box vs plane: projected radius along the three rotated axes
pub fn obb_vs_plane(a: &BoundingOrientedBox, plane: Vec4) -> bool {
    let e0 = a.rotation * Vec3::new(1.0, 0.0, 0.0);
    let e1 = a.rotation * Vec3::new(0.0, 1.0, 0.0);
    let e2 = a.rotation * Vec3::new(0.0, 0.0, 1.0);

    let normal = plane.xyz();
    let r = a.radius.x * normal.dot(&e0).abs()
        + a.radius.y * normal.dot(&e1).abs()
        + a.radius.z * normal.dot(&e2).abs();

    let s = signed_distance_to_plane(a.center, plane).abs();

    s <= r
}

/// Oriented box vs triangle: rotate the triangle into the box frame and
/// reuse the AABB SAT
pub fn obb_vs_triangle(obb: &BoundingOrientedBox, a: Vec3, b: Vec3, c: Vec3) -> bool {
    let inv_rotation = obb.rotation.conjugate();
    let a = inv_rotation * (a - obb.center);
    let b = inv_rotation * (b - obb.center);
    let c = inv_rotation * (c - obb.center);

    aabb_vs_triangle(&BoundingBox::from_min_max(-obb.radius, obb.radius), a, b, c)
}

/// Convex hull vs convex hull via GJK
pub fn hull_vs_hull(a: &BoundingHull<'_>, b: &BoundingHull<'_>) -> bool {
    gjk_intersection(a, b)
}
