//! Convex-hull collision geometry
//!
//! A hull is split into two parts: the shared [`HullGeometry`] record
//! (vertices, faces with normals, edge adjacency), built once from an indexed
//! mesh at load time, and the lightweight per-instance [`BoundingHull`]
//! placement that borrows it. Many instances can reference one geometry.
//!
//! The referenced geometry MUST be convex. No runtime validation is
//! performed; a non-convex hull silently produces wrong intersection results.

use crate::collision::volumes::BoundingBox;
use crate::foundation::math::{Quat, Vec3};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Errors reported while building hull geometry from a mesh
#[derive(Error, Debug)]
pub enum HullGeometryError {
    /// More vertices than the 16-bit face indices can address
    #[error("too many vertices for hull geometry: {0} (max {max})", max = u16::MAX)]
    TooManyVertices(usize),
    /// A triangle references a vertex outside the vertex list
    #[error("triangle {triangle} references out-of-bounds vertex {vertex}")]
    VertexOutOfBounds {
        /// Index of the offending triangle
        triangle: usize,
        /// The out-of-bounds vertex index
        vertex: u32,
    },
    /// An edge is shared by more than two faces, so the mesh cannot be a
    /// closed convex polyhedron
    #[error("edge ({from}, {to}) is shared by more than two faces")]
    NonManifoldEdge {
        /// First endpoint of the edge
        from: u16,
        /// Second endpoint of the edge
        to: u16,
    },
    /// The edge count does not satisfy Euler's formula
    /// `edges == vertices + faces - 2` for a convex polyhedron
    #[error("mesh is not a closed convex polyhedron: {edges} edges, expected {expected}")]
    EulerMismatch {
        /// Number of distinct edges found
        edges: usize,
        /// Expected edge count from Euler's formula
        expected: usize,
    },
}

/// A triangular hull face: three vertex indices and the face normal
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HullFace {
    /// First vertex index
    pub a: u16,
    /// Second vertex index
    pub b: u16,
    /// Third vertex index
    pub c: u16,
    /// Face normal (cross product of the edges, not normalized)
    pub normal: Vec3,
}

/// A hull edge with its two adjacent faces
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HullEdge {
    /// Lower vertex index of the edge
    pub from: u16,
    /// Higher vertex index of the edge
    pub to: u16,
    /// First owning face
    pub face_a: u16,
    /// Second owning face
    pub face_b: u16,
}

/// Shared convex-hull geometry, built once and referenced by many instances
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HullGeometry {
    /// Hull vertices in hull-local space
    pub vertices: Vec<Vec3>,
    /// Edge adjacency, one entry per distinct edge
    pub edges: Vec<HullEdge>,
    /// Triangular faces with their normals
    pub faces: Vec<HullFace>,
    /// Local-space bounds of the vertices
    pub aabb: BoundingBox,
}

impl HullGeometry {
    /// Builds hull geometry from a raw indexed triangle mesh.
    ///
    /// Collects vertices and per-face normals, and derives the shared-edge
    /// adjacency. The edge count is checked against Euler's formula for
    /// convex polyhedra (`edges == vertices + faces - 2`) as a consistency
    /// check on the input mesh; convexity itself is the caller's invariant
    /// and is not validated.
    pub fn from_mesh(
        vertices: &[Vec3],
        triangles: &[[u32; 3]],
    ) -> Result<HullGeometry, HullGeometryError> {
        if vertices.len() > usize::from(u16::MAX) {
            return Err(HullGeometryError::TooManyVertices(vertices.len()));
        }

        let expected_edges = (vertices.len() + triangles.len()).saturating_sub(2);

        let mut aabb = BoundingBox::negative_infinity();
        for &v in vertices {
            aabb.grow(v);
        }

        let mut faces = Vec::with_capacity(triangles.len());
        let mut edges: Vec<HullEdge> = Vec::with_capacity(expected_edges);
        let mut edge_map: HashMap<u32, usize> = HashMap::with_capacity(expected_edges);

        for (face_index, tri) in triangles.iter().enumerate() {
            for &vertex in tri {
                if vertex as usize >= vertices.len() {
                    return Err(HullGeometryError::VertexOutOfBounds {
                        triangle: face_index,
                        vertex,
                    });
                }
            }

            let [a, b, c] = *tri;
            let va = vertices[a as usize];
            let vb = vertices[b as usize];
            let vc = vertices[c as usize];
            let normal = (vb - va).cross(&(vc - va));

            #[allow(clippy::cast_possible_truncation)]
            let face = HullFace {
                a: a as u16,
                b: b as u16,
                c: c as u16,
                normal,
            };
            faces.push(face);

            #[allow(clippy::cast_possible_truncation)]
            let face_index = face_index as u16;
            add_edge(face.a, face.b, face_index, &mut edge_map, &mut edges)?;
            add_edge(face.b, face.c, face_index, &mut edge_map, &mut edges)?;
            add_edge(face.a, face.c, face_index, &mut edge_map, &mut edges)?;
        }

        if edges.len() != expected_edges {
            return Err(HullGeometryError::EulerMismatch {
                edges: edges.len(),
                expected: expected_edges,
            });
        }

        Ok(HullGeometry {
            vertices: vertices.to_vec(),
            edges,
            faces,
            aabb,
        })
    }
}

fn add_edge(
    a: u16,
    b: u16,
    face: u16,
    edge_map: &mut HashMap<u32, usize>,
    edges: &mut Vec<HullEdge>,
) -> Result<(), HullGeometryError> {
    let from = a.min(b);
    let to = a.max(b);
    let key = (u32::from(from) << 16) | u32::from(to);

    match edge_map.get(&key) {
        None => {
            edge_map.insert(key, edges.len());
            edges.push(HullEdge {
                from,
                to,
                face_a: face,
                face_b: u16::MAX,
            });
            Ok(())
        }
        Some(&index) => {
            let edge = &mut edges[index];
            if edge.face_b != u16::MAX {
                return Err(HullGeometryError::NonManifoldEdge { from, to });
            }
            edge.face_b = face;
            Ok(())
        }
    }
}

slotmap::new_key_type! {
    /// Handle to a [`HullGeometry`] stored in a [`HullGeometries`] registry
    pub struct HullGeometryKey;
}

/// Registry of shared hull geometries for persistent colliders.
///
/// Instances reference geometry through a stable key rather than a raw
/// pointer, so the representation is uniform for persistent and transient
/// colliders and lifetimes stay checked.
#[derive(Debug, Default)]
pub struct HullGeometries {
    geometries: slotmap::SlotMap<HullGeometryKey, HullGeometry>,
}

impl HullGeometries {
    /// Creates an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a geometry and returns its key
    pub fn insert(&mut self, geometry: HullGeometry) -> HullGeometryKey {
        self.geometries.insert(geometry)
    }

    /// Looks up a stored geometry
    pub fn get(&self, key: HullGeometryKey) -> Option<&HullGeometry> {
        self.geometries.get(key)
    }

    /// Removes a stored geometry, returning it if the key was live
    pub fn remove(&mut self, key: HullGeometryKey) -> Option<HullGeometry> {
        self.geometries.remove(key)
    }

    /// Builds a placed hull instance borrowing the stored geometry
    pub fn instance(
        &self,
        key: HullGeometryKey,
        rotation: Quat,
        position: Vec3,
    ) -> Option<BoundingHull<'_>> {
        self.get(key).map(|geometry| BoundingHull {
            rotation,
            position,
            geometry,
        })
    }
}

/// A placed convex-hull instance: rotation and position over shared geometry.
///
/// The borrow ties the instance's lifetime to the geometry it references.
#[derive(Debug, Clone, Copy)]
pub struct BoundingHull<'a> {
    /// Rotation from hull-local space to world space
    pub rotation: Quat,
    /// World-space position of the hull origin
    pub position: Vec3,
    /// The shared convex geometry (must be convex)
    pub geometry: &'a HullGeometry,
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Unit cube with 8 vertices and 12 triangles
    pub(crate) fn cube_mesh() -> (Vec<Vec3>, Vec<[u32; 3]>) {
        let vertices = vec![
            Vec3::new(-1.0, -1.0, -1.0),
            Vec3::new(1.0, -1.0, -1.0),
            Vec3::new(-1.0, 1.0, -1.0),
            Vec3::new(1.0, 1.0, -1.0),
            Vec3::new(-1.0, -1.0, 1.0),
            Vec3::new(1.0, -1.0, 1.0),
            Vec3::new(-1.0, 1.0, 1.0),
            Vec3::new(1.0, 1.0, 1.0),
        ];
        let triangles = vec![
            [0, 2, 1],
            [1, 2, 3],
            [4, 5, 6],
            [5, 7, 6],
            [0, 1, 4],
            [1, 5, 4],
            [2, 6, 3],
            [3, 6, 7],
            [0, 4, 2],
            [2, 4, 6],
            [1, 3, 5],
            [3, 7, 5],
        ];
        (vertices, triangles)
    }

    #[test]
    fn test_cube_geometry_counts() {
        let (vertices, triangles) = cube_mesh();
        let hull = HullGeometry::from_mesh(&vertices, &triangles).unwrap();
        assert_eq!(hull.vertices.len(), 8);
        assert_eq!(hull.faces.len(), 12);
        // Euler: 8 + 12 - 2
        assert_eq!(hull.edges.len(), 18);
        assert_eq!(hull.aabb.min_corner, Vec3::new(-1.0, -1.0, -1.0));
        assert_eq!(hull.aabb.max_corner, Vec3::new(1.0, 1.0, 1.0));
    }

    #[test]
    fn test_every_edge_has_two_faces() {
        let (vertices, triangles) = cube_mesh();
        let hull = HullGeometry::from_mesh(&vertices, &triangles).unwrap();
        for edge in &hull.edges {
            assert_ne!(edge.face_a, u16::MAX);
            assert_ne!(edge.face_b, u16::MAX);
        }
    }

    #[test]
    fn test_open_mesh_fails_euler_check() {
        // A single triangle is not a closed polyhedron.
        let vertices = vec![
            Vec3::zeros(),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        let triangles = vec![[0, 1, 2]];
        let err = HullGeometry::from_mesh(&vertices, &triangles).unwrap_err();
        assert!(matches!(err, HullGeometryError::EulerMismatch { .. }));
    }

    #[test]
    fn test_out_of_bounds_vertex_is_reported() {
        let vertices = vec![Vec3::zeros(), Vec3::new(1.0, 0.0, 0.0)];
        let triangles = vec![[0, 1, 7]];
        let err = HullGeometry::from_mesh(&vertices, &triangles).unwrap_err();
        assert!(matches!(err, HullGeometryError::VertexOutOfBounds { vertex: 7, .. }));
    }

    #[test]
    fn test_registry_instance_borrows_geometry() {
        let (vertices, triangles) = cube_mesh();
        let mut registry = HullGeometries::new();
        let key = registry.insert(HullGeometry::from_mesh(&vertices, &triangles).unwrap());

        let hull = registry
            .instance(key, Quat::identity(), Vec3::new(1.0, 2.0, 3.0))
            .unwrap();
        assert_eq!(hull.geometry.vertices.len(), 8);
        assert_eq!(hull.position, Vec3::new(1.0, 2.0, 3.0));

        let removed = registry.remove(key);
        assert!(removed.is_some());
        assert!(registry.get(key).is_none());
    }
}
