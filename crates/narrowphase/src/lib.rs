//! # Narrowphase
//!
//! An analytic narrow-phase collision geometry library.
//!
//! ## Features
//!
//! - **Bounding Volumes**: Spheres, capsules, cylinders, boxes (axis-aligned
//!   and oriented), tori, planes, and convex hulls
//! - **Ray Casting**: Closed-form ray intersection against every primitive,
//!   including a quartic-based torus test
//! - **Overlap Predicates**: Boolean pairwise intersection tests, using
//!   separating axes where a closed form exists
//! - **GJK**: A boolean convex-intersection engine for the pairs without one
//! - **Closest Points**: Point/segment/triangle/box proximity queries
//!
//! ## Quick Start
//!
//! ```rust
//! use narrowphase::prelude::*;
//!
//! let a = BoundingSphere { center: Vec3::new(0.0, 0.0, 0.0), radius: 1.0 };
//! let b = BoundingSphere { center: Vec3::new(1.5, 0.0, 0.0), radius: 1.0 };
//! assert!(sphere_vs_sphere(&a, &b));
//!
//! let ray = Ray::new(Vec3::new(0.0, 0.0, -5.0), Vec3::new(0.0, 0.0, 1.0));
//! let t = ray.intersect_sphere(a.center, a.radius);
//! assert_eq!(t, Some(4.0));
//! ```

pub mod collision;
pub mod config;
pub mod foundation;

/// Common imports for library users
pub mod prelude {
    pub use crate::{
        collision::{
            gjk::{gjk_intersection, ExtrudedTriangle, Support},
            hull::{BoundingHull, HullGeometries, HullGeometry, HullGeometryKey},
            overlap::*,
            ray::{Ray, TriangleHit},
            volumes::{
                create_plane, signed_distance_to_plane, BoundingBox, BoundingCapsule,
                BoundingCylinder, BoundingOrientedBox, BoundingPlane, BoundingRectangle,
                BoundingSphere, BoundingTorus, BoxCorners, LineSegment,
            },
        },
        config::{ColliderSet, ColliderShape, Config, NamedCollider},
        foundation::math::{Quat, Vec2, Vec3, Vec4},
    };
}
