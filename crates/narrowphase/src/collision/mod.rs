//! Narrow-phase collision geometry
//!
//! This module groups the analytic collision toolbox:
//! - Bounding volume primitives and transforms
//! - Convex hull geometry with a shared-geometry registry
//! - Closest-point queries
//! - Polynomial root solvers up to quartics
//! - Ray intersection against every primitive
//! - Pairwise boolean overlap predicates
//! - The GJK convex-intersection engine

pub mod closest;
pub mod gjk;
pub mod hull;
pub mod overlap;
pub mod polynomial;
pub mod ray;
pub mod volumes;
