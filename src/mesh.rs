//! Mesh: raw triangulated-surface input for grid construction.
//!
//! A `Mesh` is nothing more than an ordered list of vertex positions and an
//! ordered list of triangles, each a triple of indices into the vertex list.
//! Winding order is not assumed to be consistent; the metric cache orients
//! face normals itself (see [`NormalOrientation`](crate::grid::NormalOrientation)).

use serde::{Deserialize, Serialize};

use crate::grid::GridConfig;
use crate::mesh_error::MeshGridError;
use crate::topology::validation::validate_mesh;

/// Vertex positions plus triangle index triples.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<[f64; 3]>,
    pub faces: Vec<[u32; 3]>,
}

impl Mesh {
    pub fn new(vertices: Vec<[f64; 3]>, faces: Vec<[u32; 3]>) -> Self {
        Mesh { vertices, faces }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Check the mesh against the rules a [`Grid`](crate::grid::Grid) needs.
    pub fn validate(&self, config: &GridConfig) -> Result<(), MeshGridError> {
        validate_mesh(&self.vertices, &self.faces, config)
    }
}
