//! Collider configuration files
//!
//! Collider sets can be authored in RON files and loaded at runtime, so
//! tools and tests can describe collision shapes without recompiling.

use crate::collision::volumes::{
    BoundingBox, BoundingCapsule, BoundingCylinder, BoundingOrientedBox, BoundingSphere,
    BoundingTorus,
};
use serde::{Deserialize, Serialize};

/// Configuration trait for RON-backed files
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    fn load_from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(ConfigError::Io)?;
        ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Save configuration to file
    fn save_to_file(&self, path: &str) -> Result<(), ConfigError> {
        let contents = ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))?;
        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),
}

/// A primitive collision shape as it appears in a collider file.
///
/// Hulls are deliberately absent: their geometry comes from mesh data and
/// is registered at runtime, not described in configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum ColliderShape {
    /// Sphere collider
    Sphere(BoundingSphere),
    /// Capsule collider
    Capsule(BoundingCapsule),
    /// Cylinder collider
    Cylinder(BoundingCylinder),
    /// Axis-aligned box collider
    Box(BoundingBox),
    /// Oriented box collider
    OrientedBox(BoundingOrientedBox),
    /// Torus collider
    Torus(BoundingTorus),
}

/// A named collider entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NamedCollider {
    /// Identifier referenced by the game object setup
    pub name: String,
    /// The shape itself
    pub shape: ColliderShape,
}

/// A set of named colliders, typically one file per object archetype
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ColliderSet {
    /// All colliders in the set
    pub colliders: Vec<NamedCollider>,
}

impl Config for ColliderSet {}

impl ColliderSet {
    /// Looks up a collider by name
    pub fn find(&self, name: &str) -> Option<&ColliderShape> {
        self.colliders
            .iter()
            .find(|c| c.name == name)
            .map(|c| &c.shape)
    }
}
