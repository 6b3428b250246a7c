//! MeshGridError: Unified error type for mesh-grid public APIs
//!
//! Construction of grids, rasters and spatial indices reports every
//! recoverable failure through this type. Contract violations inside the
//! calculus kernels (mismatched buffer lengths) are programmer errors and
//! panic instead.

use thiserror::Error;

use crate::data::raster::Mapping;

/// Unified error type for mesh-grid operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MeshGridError {
    /// The mesh has no vertices.
    #[error("Invalid mesh: vertex list is empty")]
    EmptyVertices,
    /// The mesh has no faces; a grid requires at least one triangle.
    #[error("Invalid mesh: face list is empty (a grid requires faces)")]
    EmptyFaces,
    /// A face references a vertex that does not exist.
    #[error("Invalid mesh: face {face} references vertex {vertex}, but only {vertex_count} vertices exist")]
    VertexIndexOutOfBounds {
        face: usize,
        vertex: u32,
        vertex_count: usize,
    },
    /// A face repeats a vertex index.
    #[error("Invalid mesh: face {face} is degenerate (repeats a vertex index)")]
    DegenerateFace { face: usize },
    /// A vertex position contains NaN or infinity.
    #[error("Invalid mesh: vertex {vertex} has a non-finite coordinate")]
    NonFiniteVertex { vertex: usize },
    /// An edge is shared by more than two faces.
    #[error("Topology error: edge ({a}, {b}) has {incident_faces} incident faces (expected at most 2)")]
    NonManifoldEdge {
        a: u32,
        b: u32,
        incident_faces: usize,
    },
    /// Spatial index distance bounds are unusable.
    #[error("Invalid spacing: need 0 < min_spacing <= max_spacing, got min={min}, max={max}")]
    InvalidSpacing { min: f64, max: f64 },
    /// The spatial index cell table would exceed its size cap.
    #[error("Spatial index too large: cell width {cell_width} needs more than {limit} cells")]
    LookupTooLarge { cell_width: f64, limit: usize },
    /// A mesh generator was called with unusable parameters.
    #[error("Invalid geometry: {0}")]
    InvalidGeometry(String),
    /// A raster was built with the wrong number of elements for its mapping.
    #[error("Raster size mismatch for {mapping:?} mapping: expected {expected}, found {found}")]
    RasterSizeMismatch {
        mapping: Mapping,
        expected: usize,
        found: usize,
    },
    /// A structural invariant of a built grid does not hold.
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}
