//! Mesh and topology validation helpers.

use serde::{Deserialize, Serialize};

use crate::grid::GridConfig;
use crate::mesh_error::MeshGridError;
use crate::topology::arrow::{Arrow, IncidentFaces};

/// Behavior for non-manifold detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NonManifoldHandling {
    /// Skip non-manifold detection.
    Ignore,
    /// Log a warning on non-manifold edges.
    #[default]
    Warn,
    /// Return an error on the first non-manifold edge.
    Error,
}

/// Validate raw mesh input before any topology is derived.
///
/// Checks, in order: empty vertex list, empty face list, face indices in
/// range, repeated indices within a face (when rejected by `config`), and
/// finite vertex coordinates.
pub fn validate_mesh(
    vertices: &[[f64; 3]],
    faces: &[[u32; 3]],
    config: &GridConfig,
) -> Result<(), MeshGridError> {
    if vertices.is_empty() {
        return Err(MeshGridError::EmptyVertices);
    }
    if faces.is_empty() {
        return Err(MeshGridError::EmptyFaces);
    }

    let vertex_count = vertices.len();
    for (face, ids) in faces.iter().enumerate() {
        if let Some(&vertex) = ids.iter().find(|&&v| v as usize >= vertex_count) {
            return Err(MeshGridError::VertexIndexOutOfBounds {
                face,
                vertex,
                vertex_count,
            });
        }
        if config.reject_degenerate_faces
            && (ids[0] == ids[1] || ids[1] == ids[2] || ids[0] == ids[2])
        {
            return Err(MeshGridError::DegenerateFace { face });
        }
    }

    if let Some(vertex) = vertices
        .iter()
        .position(|p| p.iter().any(|c| !c.is_finite()))
    {
        return Err(MeshGridError::NonFiniteVertex { vertex });
    }

    Ok(())
}

/// Detect edges shared by more than two faces.
///
/// `edges` and `incident` are parallel slices as produced by the topology
/// builder.
pub fn validate_non_manifold(
    edges: &[Arrow],
    incident: &[IncidentFaces],
    handling: NonManifoldHandling,
) -> Result<(), MeshGridError> {
    if handling == NonManifoldHandling::Ignore {
        return Ok(());
    }

    for (edge, faces) in edges.iter().zip(incident) {
        let IncidentFaces::NonManifold(count) = *faces else {
            continue;
        };
        match handling {
            NonManifoldHandling::Warn => {
                log::warn!(
                    "Non-manifold edge detected: ({}, {}) incident_faces={count}",
                    edge.from,
                    edge.to
                );
            }
            NonManifoldHandling::Error => {
                return Err(MeshGridError::NonManifoldEdge {
                    a: edge.from,
                    b: edge.to,
                    incident_faces: count,
                });
            }
            NonManifoldHandling::Ignore => {}
        }
    }

    Ok(())
}
