//! Math utilities and types
//!
//! Provides the fundamental math types used by the collision geometry
//! routines, plus a few vector helpers the intersection tests rely on.

pub use nalgebra::{Matrix3, Matrix4, Quaternion, Unit, Vector2, Vector3, Vector4};

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// 4D vector type
pub type Vec4 = Vector4<f32>;

/// 3x3 matrix type
pub type Mat3 = Matrix3<f32>;

/// 4x4 matrix type
pub type Mat4 = Matrix4<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// General-purpose tolerance for "is this zero" decisions in the
    /// separating-axis tests and segment degeneracy checks.
    pub const EPSILON: f32 = 1e-6;
}

/// Normalize-or-zero: returns the normalized vector, or the zero vector if
/// the input is too short to normalize reliably.
pub fn noz(v: Vec3) -> Vec3 {
    let sq = v.norm_squared();
    if sq < 1e-8 {
        Vec3::zeros()
    } else {
        v / sq.sqrt()
    }
}

/// Shortest-arc rotation taking `from` onto `to`.
///
/// Antiparallel inputs rotate 180 degrees around an arbitrary perpendicular
/// axis, so the result is always a valid rotation.
pub fn rotate_from_to(from: Vec3, to: Vec3) -> Quat {
    Quat::rotation_between(&from, &to).unwrap_or_else(|| {
        let mut axis = Vec3::x().cross(&from);
        if axis.norm_squared() < 1e-8 {
            // Pick another if colinear
            axis = Vec3::y().cross(&from);
        }
        Quat::from_axis_angle(&Unit::new_normalize(axis), constants::PI)
    })
}

/// Math utility functions
pub mod utils {
    /// Clamp a value between min and max
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min {
            min
        } else if value > max {
            max
        } else {
            value
        }
    }

    /// Linear interpolation
    pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
        a + (b - a) * t
    }

    /// Component-wise linear interpolation of two points
    pub fn lerp_vec3(a: super::Vec3, b: super::Vec3, t: f32) -> super::Vec3 {
        a + (b - a) * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_noz_short_vector_is_zero() {
        assert_eq!(noz(Vec3::new(1e-6, 0.0, 0.0)), Vec3::zeros());
        assert_relative_eq!(noz(Vec3::new(0.0, 3.0, 4.0)), Vec3::new(0.0, 0.6, 0.8));
    }

    #[test]
    fn test_rotate_from_to_maps_axis() {
        let q = rotate_from_to(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(q * Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }

    #[test]
    fn test_rotate_from_to_antiparallel() {
        let q = rotate_from_to(Vec3::new(0.0, -1.0, 0.0), Vec3::new(0.0, 1.0, 0.0));
        assert_relative_eq!(q * Vec3::new(0.0, -1.0, 0.0), Vec3::new(0.0, 1.0, 0.0), epsilon = 1e-6);
    }
}
