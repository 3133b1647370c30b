//! Boolean GJK convex-intersection engine.
//!
//! Works on Minkowski-difference support points: any two shapes that can
//! answer "farthest point in a direction" can be tested against each other,
//! which covers the pairs the analytic predicates in
//! [`crate::collision::overlap`] have no closed form for. Boolean result
//! only; no penetration depth or contact information.

use crate::collision::hull::BoundingHull;
use crate::collision::volumes::{
    BoundingBox, BoundingCapsule, BoundingCylinder, BoundingOrientedBox, BoundingSphere,
};
use crate::foundation::math::{noz, Vec3};

/// Norm below which a search direction counts as degenerate. The search
/// direction is normalized every iteration, so this only fires when the
/// origin lies on the simplex itself and no direction can make progress.
const DEGENERATE_DIRECTION: f32 = 1e-12;

/// Iteration cap; curved shape pairs in grazing contact can otherwise
/// creep toward the origin indefinitely
const MAX_ITERATIONS: u32 = 128;

/// Farthest-point query in a given direction, in world space.
///
/// The direction is not necessarily normalized; implementations that need a
/// unit vector normalize themselves.
pub trait Support {
    /// Returns the point of the shape farthest along `dir`
    fn support(&self, dir: Vec3) -> Vec3;
}

impl Support for BoundingSphere {
    fn support(&self, dir: Vec3) -> Vec3 {
        dir.normalize() * self.radius + self.center
    }
}

impl Support for BoundingCapsule {
    fn support(&self, dir: Vec3) -> Vec3 {
        let dist_a = dir.dot(&self.position_a);
        let dist_b = dir.dot(&self.position_b);
        let farther_point = if dist_a > dist_b {
            self.position_a
        } else {
            self.position_b
        };
        dir.normalize() * self.radius + farther_point
    }
}

impl Support for BoundingCylinder {
    fn support(&self, dir: Vec3) -> Vec3 {
        let dist_a = dir.dot(&self.position_a);
        let dist_b = dir.dot(&self.position_b);
        let farther_point = if dist_a > dist_b {
            self.position_a
        } else {
            self.position_b
        };

        // Project the direction into the cap plane to reach the rim
        let n = self.position_a - self.position_b;
        let projected_dir = noz(n.cross(&dir).cross(&n));
        farther_point + projected_dir * self.radius
    }
}

impl Support for BoundingBox {
    fn support(&self, dir: Vec3) -> Vec3 {
        Vec3::new(
            if dir.x < 0.0 {
                self.min_corner.x
            } else {
                self.max_corner.x
            },
            if dir.y < 0.0 {
                self.min_corner.y
            } else {
                self.max_corner.y
            },
            if dir.z < 0.0 {
                self.min_corner.z
            } else {
                self.max_corner.z
            },
        )
    }
}

impl Support for BoundingOrientedBox {
    fn support(&self, dir: Vec3) -> Vec3 {
        let dir = self.rotation.conjugate() * dir;
        let r = Vec3::new(
            if dir.x < 0.0 {
                -self.radius.x
            } else {
                self.radius.x
            },
            if dir.y < 0.0 {
                -self.radius.y
            } else {
                self.radius.y
            },
            if dir.z < 0.0 {
                -self.radius.z
            } else {
                self.radius.z
            },
        );
        self.center + self.rotation * r
    }
}

impl Support for BoundingHull<'_> {
    fn support(&self, dir: Vec3) -> Vec3 {
        let dir = self.rotation.conjugate() * dir;

        let mut max_dist = f32::MIN;
        let mut result = Vec3::zeros();
        for v in &self.geometry.vertices {
            let d = dir.dot(v);
            if d > max_dist {
                max_dist = d;
                result = *v;
            }
        }

        self.position + self.rotation * result
    }
}

/// A triangle extruded downward along -y, forming a convex prism.
///
/// Useful for testing convex volumes against one-sided ground geometry
/// where anything below the surface should still register.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExtrudedTriangle {
    /// The three surface vertices followed by their extruded copies
    pub points: [Vec3; 6],
}

impl ExtrudedTriangle {
    /// Default extrusion depth
    pub const DEFAULT_EXTRUSION: f32 = 10.0;

    /// Extrudes the triangle `(a, b, c)` downward by `extrusion`
    pub fn new(a: Vec3, b: Vec3, c: Vec3, extrusion: f32) -> Self {
        let down = Vec3::new(0.0, -extrusion, 0.0);
        Self {
            points: [a, b, c, a + down, b + down, c + down],
        }
    }

    /// Extrudes by [`Self::DEFAULT_EXTRUSION`]
    pub fn from_triangle(a: Vec3, b: Vec3, c: Vec3) -> Self {
        Self::new(a, b, c, Self::DEFAULT_EXTRUSION)
    }
}

impl Support for ExtrudedTriangle {
    fn support(&self, dir: Vec3) -> Vec3 {
        let mut max_d = self.points[0].dot(&dir);
        let mut result = self.points[0];
        for p in &self.points[1..] {
            let d = p.dot(&dir);
            if d > max_d {
                max_d = d;
                result = *p;
            }
        }
        result
    }
}

/// A Minkowski-difference sample carrying the witness point on each shape
#[derive(Debug, Clone, Copy)]
struct SupportPoint {
    on_a: Vec3,
    on_b: Vec3,
}

impl SupportPoint {
    /// The point of the Minkowski difference this sample represents
    fn minkowski(&self) -> Vec3 {
        self.on_a - self.on_b
    }
}

impl Default for SupportPoint {
    fn default() -> Self {
        Self {
            on_a: Vec3::zeros(),
            on_b: Vec3::zeros(),
        }
    }
}

fn support_point(a: &impl Support, b: &impl Support, dir: Vec3) -> SupportPoint {
    SupportPoint {
        on_a: a.support(dir),
        on_b: b.support(-dir),
    }
}

/// `cross(cross(a, b), a)`: the component of b perpendicular to a, scaled
fn cross_aba(a: Vec3, b: Vec3) -> Vec3 {
    a.cross(&b).cross(&a)
}

/// Simplex state between iterations. Slots fill from `c` backward; the
/// newest point is passed separately until the simplex closes.
#[derive(Debug, Clone, Copy, Default)]
struct Simplex {
    b: SupportPoint,
    c: SupportPoint,
    d: SupportPoint,
    num_points: u32,
}

enum SimplexUpdate {
    /// The simplex encloses the origin
    Stop,
    /// Keep iterating with the updated direction
    KeepGoing,
    /// The simplex degenerated into a state that should be geometrically
    /// impossible; treated as no intersection
    UnexpectedError,
}

/// Line/triangle stage: the simplex holds `b` and `c`, the newest point is
/// `a`. Either the origin is beyond one of the edges touching `a` (the
/// simplex stays a line) or it is above or below the triangle face (the
/// simplex grows to a triangle).
fn update_triangle(s: &mut Simplex, a: SupportPoint, dir: &mut Vec3) -> SimplexUpdate {
    let ao = -a.minkowski();
    let ab = s.b.minkowski() - a.minkowski();
    let ac = s.c.minkowski() - a.minkowski();
    let abc = ab.cross(&ac);

    let ab_perp = ab.cross(&abc);
    if ab_perp.dot(&ao) >= 0.0 {
        // Origin beyond edge ab
        s.c = s.b;
        s.b = a;
        *dir = cross_aba(ab, ao);
        return SimplexUpdate::KeepGoing;
    }

    let ac_perp = abc.cross(&ac);
    if ac_perp.dot(&ao) >= 0.0 {
        // Origin beyond edge ac
        s.b = a;
        *dir = cross_aba(ac, ao);
        return SimplexUpdate::KeepGoing;
    }

    if abc.dot(&ao) >= 0.0 {
        s.d = s.c;
        s.c = s.b;
        s.b = a;
        *dir = abc;
    } else {
        // Below the face: flip the winding so the origin stays on the
        // positive side
        s.d = s.b;
        s.b = a;
        *dir = -abc;
    }
    s.num_points = 3;
    SimplexUpdate::KeepGoing
}

/// Tetrahedron stage: the simplex holds `b`, `c`, `d`, the newest point is
/// `a`. Classify the origin against the three faces touching `a`; if it is
/// behind all of them the tetrahedron encloses it. Otherwise the face (or
/// the better of two candidate faces, picked by the shared-edge test)
/// becomes the new triangle and the triangle stage runs again.
fn update_tetrahedron(s: &mut Simplex, a: SupportPoint, dir: &mut Vec3) -> SimplexUpdate {
    let ao = -a.minkowski();
    let ab = s.b.minkowski() - a.minkowski();
    let ac = s.c.minkowski() - a.minkowski();
    let ad = s.d.minkowski() - a.minkowski();

    let abc = ab.cross(&ac);
    let acd = ac.cross(&ad);
    let adb = ad.cross(&ab);

    let mut face_mask = 0_u32;
    if abc.dot(&ao) > 0.0 {
        face_mask |= 0b001;
    }
    if acd.dot(&ao) > 0.0 {
        face_mask |= 0b010;
    }
    if adb.dot(&ao) > 0.0 {
        face_mask |= 0b100;
    }

    match face_mask {
        0b000 => return SimplexUpdate::Stop,
        0b001 => {} // Face abc; slots already in position
        0b010 => {
            // Face acd
            s.b = s.c;
            s.c = s.d;
        }
        0b100 => {
            // Face adb
            s.c = s.b;
            s.b = s.d;
        }
        0b011 => {
            // Beyond abc and acd; the shared edge ac decides
            if abc.cross(&ac).dot(&ao) > 0.0 {
                s.b = s.c;
                s.c = s.d;
            }
        }
        0b110 => {
            // Beyond acd and adb; the shared edge ad decides
            if acd.cross(&ad).dot(&ao) > 0.0 {
                s.c = s.b;
                s.b = s.d;
            } else {
                s.b = s.c;
                s.c = s.d;
            }
        }
        0b101 => {
            // Beyond adb and abc; the shared edge ab decides
            if adb.cross(&ab).dot(&ao) <= 0.0 {
                s.c = s.b;
                s.b = s.d;
            }
        }
        _ => return SimplexUpdate::UnexpectedError,
    }

    s.num_points = 2;
    update_triangle(s, a, dir)
}

fn update_simplex(s: &mut Simplex, a: SupportPoint, dir: &mut Vec3) -> SimplexUpdate {
    match s.num_points {
        2 => update_triangle(s, a, dir),
        3 => update_tetrahedron(s, a, dir),
        _ => SimplexUpdate::UnexpectedError,
    }
}

/// Tests two convex shapes for intersection.
///
/// Returns true when the shapes overlap, surface contact included. Expands
/// a simplex inside the Minkowski difference until it either encloses the
/// origin or proves a support point cannot pass it.
pub fn gjk_intersection(shape_a: &impl Support, shape_b: &impl Support) -> bool {
    let mut dir = Vec3::new(1.0, 0.1, -0.2); // Arbitrary

    // First point
    let mut simplex = Simplex {
        c: support_point(shape_a, shape_b, dir),
        ..Simplex::default()
    };
    if simplex.c.minkowski().dot(&dir) < 0.0 {
        return false;
    }

    // Second point
    dir = -simplex.c.minkowski();
    simplex.b = support_point(shape_a, shape_b, dir);
    if simplex.b.minkowski().dot(&dir) < 0.0 {
        return false;
    }

    dir = cross_aba(simplex.c.minkowski() - simplex.b.minkowski(), -simplex.b.minkowski());
    simplex.num_points = 2;

    for _ in 0..MAX_ITERATIONS {
        // Normalize so the progress tests are independent of shape scale;
        // the simplex updates produce directions whose magnitude shrinks
        // with the simplex, not with the remaining distance.
        let Some(unit_dir) = dir.try_normalize(DEGENERATE_DIRECTION) else {
            return false;
        };
        dir = unit_dir;

        let a = support_point(shape_a, shape_b, dir);
        if a.minkowski().dot(&dir) < 0.0 {
            return false;
        }

        match update_simplex(&mut simplex, a, &mut dir) {
            SimplexUpdate::Stop => return true,
            SimplexUpdate::KeepGoing => {}
            SimplexUpdate::UnexpectedError => {
                log::warn!("GJK simplex reached an impossible configuration, reporting miss");
                return false;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::hull::HullGeometry;
    use crate::foundation::math::Quat;

    fn sphere(x: f32, y: f32, z: f32, r: f32) -> BoundingSphere {
        BoundingSphere {
            center: Vec3::new(x, y, z),
            radius: r,
        }
    }

    #[test]
    fn test_spheres_match_analytic_test() {
        let a = sphere(0.0, 0.0, 0.0, 1.0);
        assert!(gjk_intersection(&a, &sphere(1.8, 0.0, 0.0, 1.0)));
        assert!(!gjk_intersection(&a, &sphere(2.2, 0.0, 0.0, 1.0)));
    }

    #[test]
    fn test_cube_hulls() {
        let (vertices, triangles) = crate::collision::hull::tests::cube_mesh();
        let geometry = HullGeometry::from_mesh(&vertices, &triangles).unwrap();

        let at = |x: f32| BoundingHull {
            rotation: Quat::identity(),
            position: Vec3::new(x, 0.0, 0.0),
            geometry: &geometry,
        };

        // Unit cubes centered 1.999 apart: faces just in contact
        let a = at(0.0);
        assert!(gjk_intersection(&a, &at(1.999)));
        assert!(!gjk_intersection(&a, &at(2.5)));
        // Symmetric in argument order
        assert!(gjk_intersection(&at(1.999), &a));
        assert!(!gjk_intersection(&at(2.5), &a));
    }

    #[test]
    fn test_hull_contains_sphere() {
        let (vertices, triangles) = crate::collision::hull::tests::cube_mesh();
        let geometry = HullGeometry::from_mesh(&vertices, &triangles).unwrap();
        let hull = BoundingHull {
            rotation: Quat::identity(),
            position: Vec3::zeros(),
            geometry: &geometry,
        };

        // Fully contained shape, no surface contact at all
        assert!(gjk_intersection(&hull, &sphere(0.0, 0.0, 0.0, 0.25)));
        assert!(!gjk_intersection(&hull, &sphere(5.0, 0.0, 0.0, 0.25)));
    }

    #[test]
    fn test_rotated_obb_against_aabb() {
        let bb = BoundingBox::from_center_radius(Vec3::zeros(), Vec3::new(1.0, 1.0, 1.0));
        let rot = Quat::from_axis_angle(&Vec3::z_axis(), std::f32::consts::FRAC_PI_4);
        let near = BoundingOrientedBox {
            rotation: rot,
            center: Vec3::new(2.0, 0.0, 0.0),
            radius: Vec3::new(1.0, 1.0, 1.0),
        };
        // Corner reach sqrt(2) covers the 1.0 gap
        assert!(gjk_intersection(&bb, &near));
        let far = BoundingOrientedBox {
            rotation: rot,
            center: Vec3::new(3.0, 0.0, 0.0),
            radius: Vec3::new(1.0, 1.0, 1.0),
        };
        assert!(!gjk_intersection(&bb, &far));
    }

    #[test]
    fn test_capsule_against_extruded_triangle() {
        let prism = ExtrudedTriangle::from_triangle(
            Vec3::new(-2.0, 0.0, -2.0),
            Vec3::new(2.0, 0.0, -2.0),
            Vec3::new(0.0, 0.0, 2.0),
        );
        // Hanging just above the surface, radius reaches it
        let touching =
            BoundingCapsule::new(Vec3::new(0.0, 0.4, 0.0), Vec3::new(0.0, 2.0, 0.0), 0.5);
        assert!(gjk_intersection(&touching, &prism));
        // Below the surface still counts: the triangle is a solid prism
        let sunken =
            BoundingCapsule::new(Vec3::new(0.0, -3.0, 0.0), Vec3::new(0.0, -2.0, 0.0), 0.5);
        assert!(gjk_intersection(&sunken, &prism));
        let above = BoundingCapsule::new(Vec3::new(0.0, 1.0, 0.0), Vec3::new(0.0, 2.0, 0.0), 0.5);
        assert!(!gjk_intersection(&above, &prism));
    }

    #[test]
    fn test_shallow_penetration_between_small_spheres() {
        // Sub-0.1 overlaps between sub-unit shapes produce short search
        // directions; they must still register, in both argument orders
        let a = sphere(0.0, 0.0, 0.0, 0.24);
        let b = sphere(0.78, 0.0, 0.0, 0.62);
        assert!(gjk_intersection(&a, &b));
        assert!(gjk_intersection(&b, &a));
    }

    #[test]
    fn test_randomized_spheres_match_analytic() {
        use rand::{Rng, SeedableRng};
        let mut rng = rand::rngs::StdRng::seed_from_u64(0x5eed_cafe);
        let random_sphere = |rng: &mut rand::rngs::StdRng| BoundingSphere {
            center: Vec3::new(
                rng.gen_range(-2.0..2.0),
                rng.gen_range(-2.0..2.0),
                rng.gen_range(-2.0..2.0),
            ),
            radius: rng.gen_range(0.1..1.0),
        };
        for _ in 0..20_000 {
            let a = random_sphere(&mut rng);
            let b = random_sphere(&mut rng);
            let gap = (a.center - b.center).norm() - (a.radius + b.radius);
            // Near-touching pairs are decided by float noise either way
            if gap.abs() < 1e-2 {
                continue;
            }
            assert_eq!(
                gjk_intersection(&a, &b),
                gap <= 0.0,
                "spheres r={}/{} gap={}",
                a.radius,
                b.radius,
                gap
            );
        }
    }

    #[test]
    fn test_randomized_capsule_symmetry() {
        use crate::collision::closest::closest_point_segment_segment;
        use crate::collision::volumes::LineSegment;
        use rand::{Rng, SeedableRng};

        let mut rng = rand::rngs::StdRng::seed_from_u64(2026);
        let random_point = |rng: &mut rand::rngs::StdRng| {
            Vec3::new(
                rng.gen_range(-2.0..2.0),
                rng.gen_range(-2.0..2.0),
                rng.gen_range(-2.0..2.0),
            )
        };
        for _ in 0..5_000 {
            let a = BoundingCapsule::new(
                random_point(&mut rng),
                random_point(&mut rng),
                rng.gen_range(0.1..0.8),
            );
            let b = BoundingCapsule::new(
                random_point(&mut rng),
                random_point(&mut rng),
                rng.gen_range(0.1..0.8),
            );
            let core_distance = closest_point_segment_segment(
                &LineSegment {
                    a: a.position_a,
                    b: a.position_b,
                },
                &LineSegment {
                    a: b.position_a,
                    b: b.position_b,
                },
            )
            .distance_squared
            .sqrt();
            let gap = core_distance - (a.radius + b.radius);
            if gap.abs() < 1e-2 {
                continue;
            }
            let forward = gjk_intersection(&a, &b);
            assert_eq!(forward, gjk_intersection(&b, &a));
            assert_eq!(forward, gap <= 0.0, "capsule pair gap={gap}");
        }
    }

    #[test]
    fn test_cylinder_between_caps() {
        let a = BoundingCylinder::new(Vec3::new(0.0, -1.0, 0.0), Vec3::new(0.0, 1.0, 0.0), 1.0);
        let overlapping =
            BoundingCylinder::new(Vec3::new(1.5, -1.0, 0.0), Vec3::new(1.5, 1.0, 0.0), 1.0);
        assert!(gjk_intersection(&a, &overlapping));
        let apart = BoundingCylinder::new(Vec3::new(3.0, -1.0, 0.0), Vec3::new(3.0, 1.0, 0.0), 1.0);
        assert!(!gjk_intersection(&a, &apart));
    }
}
