//! Primitive bounding-volume types
//!
//! Plain-data shape descriptors consumed by the ray-intersection suite, the
//! pairwise overlap predicates, and the GJK engine. All of these are value
//! types; callers supply already-validated data (no NaN or negative-radius
//! guards are performed here).

use crate::foundation::math::{constants::PI, Quat, Vec2, Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// A line segment between two points
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineSegment {
    /// First endpoint
    pub a: Vec3,
    /// Second endpoint
    pub b: Vec3,
}

/// A bounding sphere
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingSphere {
    /// The center position of the sphere
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Enclosed volume (4/3 pi r^3)
    pub fn volume(&self) -> f32 {
        let sq_radius = self.radius * self.radius;
        4.0 / 3.0 * PI * sq_radius * self.radius
    }
}

/// A capsule: the set of points within `radius` of the segment
/// `position_a..position_b`. Degenerates to a sphere when the endpoints
/// coincide.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingCapsule {
    /// First endpoint of the core segment
    pub position_a: Vec3,
    /// Second endpoint of the core segment
    pub position_b: Vec3,
    /// Radius around the core segment
    pub radius: f32,
}

impl BoundingCapsule {
    /// Creates a new capsule from its core segment and radius
    pub fn new(position_a: Vec3, position_b: Vec3, radius: f32) -> Self {
        Self {
            position_a,
            position_b,
            radius,
        }
    }

    /// Enclosed volume: end-cap sphere plus connecting cylinder
    pub fn volume(&self) -> f32 {
        let sq_radius_pi = PI * self.radius * self.radius;
        let sphere_volume = 4.0 / 3.0 * sq_radius_pi * self.radius;
        let height = (self.position_a - self.position_b).norm();
        sphere_volume + sq_radius_pi * height
    }
}

/// A finite capped cylinder between two endpoint positions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingCylinder {
    /// Center of the bottom cap
    pub position_a: Vec3,
    /// Center of the top cap
    pub position_b: Vec3,
    /// Cylinder radius
    pub radius: f32,
}

impl BoundingCylinder {
    /// Creates a new cylinder from its cap centers and radius
    pub fn new(position_a: Vec3, position_b: Vec3, radius: f32) -> Self {
        Self {
            position_a,
            position_b,
            radius,
        }
    }

    /// Enclosed volume (pi r^2 h)
    pub fn volume(&self) -> f32 {
        let sq_radius_pi = PI * self.radius * self.radius;
        let height = (self.position_a - self.position_b).norm();
        sq_radius_pi * height
    }
}

/// A torus described by its center, up axis, and two radii
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingTorus {
    /// Center of the torus
    pub position: Vec3,
    /// Unit axis the ring revolves around
    pub up_axis: Vec3,
    /// Distance from the center to the middle of the tube
    pub major_radius: f32,
    /// Radius of the tube itself
    pub tube_radius: f32,
}

/// The eight corners of a box, named by which max-components they take
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoxCorners {
    /// Corner at the min position
    pub i: Vec3,
    /// Corner offset along x
    pub x: Vec3,
    /// Corner offset along y
    pub y: Vec3,
    /// Corner offset along x and y
    pub xy: Vec3,
    /// Corner offset along z
    pub z: Vec3,
    /// Corner offset along x and z
    pub xz: Vec3,
    /// Corner offset along y and z
    pub yz: Vec3,
    /// Corner at the max position
    pub xyz: Vec3,
}

impl BoxCorners {
    /// All eight corners as an array
    pub fn as_array(&self) -> [Vec3; 8] {
        [
            self.i, self.x, self.y, self.xy, self.z, self.xz, self.yz, self.xyz,
        ]
    }
}

/// An axis-aligned bounding box
///
/// Callers maintain the `min_corner <= max_corner` invariant component-wise;
/// [`BoundingBox::negative_infinity`] is the canonical empty box and the
/// identity value for incremental [`BoundingBox::grow`] accumulation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Component-wise minimum corner
    pub min_corner: Vec3,
    /// Component-wise maximum corner
    pub max_corner: Vec3,
}

impl BoundingBox {
    /// Expand the box to contain the given point
    pub fn grow(&mut self, o: Vec3) {
        self.min_corner.x = self.min_corner.x.min(o.x);
        self.min_corner.y = self.min_corner.y.min(o.y);
        self.min_corner.z = self.min_corner.z.min(o.z);
        self.max_corner.x = self.max_corner.x.max(o.x);
        self.max_corner.y = self.max_corner.y.max(o.y);
        self.max_corner.z = self.max_corner.z.max(o.z);
    }

    /// Expand the box outward by the given amount on all sides
    pub fn pad(&mut self, p: Vec3) {
        self.min_corner -= p;
        self.max_corner += p;
    }

    /// Center of the box
    pub fn center(&self) -> Vec3 {
        (self.min_corner + self.max_corner) * 0.5
    }

    /// Half-extents of the box
    pub fn radius(&self) -> Vec3 {
        (self.max_corner - self.min_corner) * 0.5
    }

    /// Whether the point lies inside the box (boundary inclusive)
    pub fn contains(&self, p: Vec3) -> bool {
        p.x >= self.min_corner.x
            && p.x <= self.max_corner.x
            && p.y >= self.min_corner.y
            && p.y <= self.max_corner.y
            && p.z >= self.min_corner.z
            && p.z <= self.max_corner.z
    }

    /// Enclosed volume
    pub fn volume(&self) -> f32 {
        let diameter = self.max_corner - self.min_corner;
        diameter.x * diameter.y * diameter.z
    }

    /// The axis-aligned box enclosing this box after rotating and translating it
    pub fn transform_to_aabb(&self, rotation: Quat, translation: Vec3) -> BoundingBox {
        let mut result = BoundingBox::negative_infinity();
        for corner in self.corners().as_array() {
            result.grow(rotation * corner + translation);
        }
        result
    }

    /// This box as an oriented box after rotating and translating it
    pub fn transform_to_obb(&self, rotation: Quat, translation: Vec3) -> BoundingOrientedBox {
        BoundingOrientedBox {
            center: rotation * self.center() + translation,
            radius: self.radius(),
            rotation,
        }
    }

    /// The eight corners of the box
    pub fn corners(&self) -> BoxCorners {
        BoxCorners {
            i: self.min_corner,
            x: Vec3::new(self.max_corner.x, self.min_corner.y, self.min_corner.z),
            y: Vec3::new(self.min_corner.x, self.max_corner.y, self.min_corner.z),
            xy: Vec3::new(self.max_corner.x, self.max_corner.y, self.min_corner.z),
            z: Vec3::new(self.min_corner.x, self.min_corner.y, self.max_corner.z),
            xz: Vec3::new(self.max_corner.x, self.min_corner.y, self.max_corner.z),
            yz: Vec3::new(self.min_corner.x, self.max_corner.y, self.max_corner.z),
            xyz: self.max_corner,
        }
    }

    /// The eight corners of the box, rotated and translated
    pub fn corners_transformed(&self, rotation: Quat, translation: Vec3) -> BoxCorners {
        let c = self.corners();
        BoxCorners {
            i: rotation * c.i + translation,
            x: rotation * c.x + translation,
            y: rotation * c.y + translation,
            xy: rotation * c.xy + translation,
            z: rotation * c.z + translation,
            xz: rotation * c.xz + translation,
            yz: rotation * c.yz + translation,
            xyz: rotation * c.xyz + translation,
        }
    }

    /// The box containing all of space
    pub fn everything() -> BoundingBox {
        BoundingBox {
            min_corner: Vec3::new(f32::MIN, f32::MIN, f32::MIN),
            max_corner: Vec3::new(f32::MAX, f32::MAX, f32::MAX),
        }
    }

    /// The inverted box: growing it by any point yields that point.
    /// Canonical empty value for bounds accumulation.
    pub fn negative_infinity() -> BoundingBox {
        BoundingBox {
            min_corner: Vec3::new(f32::MAX, f32::MAX, f32::MAX),
            max_corner: Vec3::new(f32::MIN, f32::MIN, f32::MIN),
        }
    }

    /// Box from explicit corners
    pub fn from_min_max(min_corner: Vec3, max_corner: Vec3) -> BoundingBox {
        BoundingBox {
            min_corner,
            max_corner,
        }
    }

    /// Box from center and half-extents
    pub fn from_center_radius(center: Vec3, radius: Vec3) -> BoundingBox {
        BoundingBox {
            min_corner: center - radius,
            max_corner: center + radius,
        }
    }
}

/// An oriented bounding box: center, half-extents ("radius"), and rotation
///
/// Half-extents must be non-negative.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingOrientedBox {
    /// Rotation from box-local space to world space
    pub rotation: Quat,
    /// Center of the box
    pub center: Vec3,
    /// Half-extents along the box-local axes
    pub radius: Vec3,
}

impl BoundingOrientedBox {
    /// Enclosed volume
    pub fn volume(&self) -> f32 {
        let diameter = self.radius * 2.0;
        diameter.x * diameter.y * diameter.z
    }

    /// The axis-aligned box enclosing this oriented box
    pub fn aabb(&self) -> BoundingBox {
        BoundingBox::from_min_max(-self.radius, self.radius)
            .transform_to_aabb(self.rotation, self.center)
    }

    /// The axis-aligned box enclosing this box after a further transform
    pub fn transform_to_aabb(&self, rotation: Quat, translation: Vec3) -> BoundingBox {
        BoundingBox::from_min_max(-self.radius, self.radius)
            .transform_to_aabb(rotation * self.rotation, rotation * self.center + translation)
    }

    /// This box after a further rotation and translation
    pub fn transform_to_obb(&self, rotation: Quat, translation: Vec3) -> BoundingOrientedBox {
        BoundingOrientedBox {
            rotation: rotation * self.rotation,
            center: rotation * self.center + translation,
            radius: self.radius,
        }
    }

    /// The eight corners of the box in world space
    pub fn corners(&self) -> BoxCorners {
        BoundingBox::from_min_max(-self.radius, self.radius)
            .corners_transformed(self.rotation, self.center)
    }
}

/// A 2D axis-aligned bounding rectangle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingRectangle {
    /// Component-wise minimum corner
    pub min_corner: Vec2,
    /// Component-wise maximum corner
    pub max_corner: Vec2,
}

impl BoundingRectangle {
    /// Expand the rectangle to contain the given point
    pub fn grow(&mut self, o: Vec2) {
        self.min_corner.x = self.min_corner.x.min(o.x);
        self.min_corner.y = self.min_corner.y.min(o.y);
        self.max_corner.x = self.max_corner.x.max(o.x);
        self.max_corner.y = self.max_corner.y.max(o.y);
    }

    /// Expand the rectangle outward by the given amount on all sides
    pub fn pad(&mut self, p: Vec2) {
        self.min_corner -= p;
        self.max_corner += p;
    }

    /// Center of the rectangle
    pub fn center(&self) -> Vec2 {
        (self.min_corner + self.max_corner) * 0.5
    }

    /// Half-extents of the rectangle
    pub fn radius(&self) -> Vec2 {
        (self.max_corner - self.min_corner) * 0.5
    }

    /// Whether the point lies inside the rectangle (boundary inclusive)
    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min_corner.x
            && p.x <= self.max_corner.x
            && p.y >= self.min_corner.y
            && p.y <= self.max_corner.y
    }

    /// The inverted rectangle, canonical empty value for bounds accumulation
    pub fn negative_infinity() -> BoundingRectangle {
        BoundingRectangle {
            min_corner: Vec2::new(f32::MAX, f32::MAX),
            max_corner: Vec2::new(f32::MIN, f32::MIN),
        }
    }

    /// Rectangle from explicit corners
    pub fn from_min_max(min_corner: Vec2, max_corner: Vec2) -> BoundingRectangle {
        BoundingRectangle {
            min_corner,
            max_corner,
        }
    }

    /// Rectangle from center and half-extents
    pub fn from_center_radius(center: Vec2, radius: Vec2) -> BoundingRectangle {
        BoundingRectangle {
            min_corner: center - radius,
            max_corner: center + radius,
        }
    }
}

/// Build the plane equation `(n, d)` with `d = -dot(n, point)`
pub fn create_plane(point: Vec3, normal: Vec3) -> Vec4 {
    let d = -normal.dot(&point);
    Vec4::new(normal.x, normal.y, normal.z, d)
}

/// Signed distance from a point to a plane given as `(n, d)`
pub fn signed_distance_to_plane(p: Vec3, plane: Vec4) -> f32 {
    Vec4::new(p.x, p.y, p.z, 1.0).dot(&plane)
}

/// A plane stored as its equation coefficients `(n, d)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingPlane {
    /// Plane equation: `dot(n, p) + d == 0` on the plane
    pub plane: Vec4,
}

impl BoundingPlane {
    /// Plane through `point` with the given normal
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        Self {
            plane: create_plane(point, normal),
        }
    }

    /// Signed distance from the point to the plane
    pub fn signed_distance(&self, p: Vec3) -> f32 {
        signed_distance_to_plane(p, self.plane)
    }
}
