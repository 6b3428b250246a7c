#![cfg_attr(docsrs, feature(doc_cfg))]
//! # mesh-grid
//!
//! mesh-grid turns a closed triangulated surface into a dual-mesh [`Grid`](grid::Grid)
//! and provides finite-volume vector calculus (gradient, divergence, curl,
//! Laplacian) over fields stored at its vertices. It is meant as the
//! numerical substrate for simulating continuous fields on unstructured,
//! irregular meshes such as subdivided planetary spheres.
//!
//! ## Features
//! - Deterministic, sort-based topology: arrows, edges and incident faces
//! - Precomputed face, vertex, edge, arrow and dual-cell metrics
//! - Gauss-Green finite-volume operators, correct on anisotropic meshes
//! - O(1) nearest-vertex lookup on the sphere via an octahedral projection
//! - Optional data-parallel per-arrow passes (`rayon` feature)
//!
//! ## Determinism
//!
//! Grid construction depends only on the input vertex and face lists, and
//! every operator sums fluxes in arrow order, so identical inputs give
//! bit-identical outputs with or without `rayon`.
//!
//! ## Usage
//!
//! ```
//! use mesh_grid::prelude::*;
//!
//! let grid = Grid::from_mesh(&meshgen::icosphere(2)).unwrap();
//! let height = Raster::from_fn(&grid, Mapping::Cell, |v| grid.vertex_positions()[v][2]);
//! let slope = height.gradient();
//! assert_eq!(slope.len(), grid.vertex_count());
//! ```
//!
//! ## Invariant checks
//! Debug builds (or the `strict-invariants` / `check-invariants` features)
//! validate every grid after construction through [`DebugInvariants`].

pub mod algs;
pub mod data;
pub mod debug_invariants;
pub mod geometry;
pub mod grid;
pub mod mesh;
pub mod mesh_error;
pub mod spatial;
pub mod topology;

pub use debug_invariants::DebugInvariants;

/// A convenient prelude to import the most-used traits & types:
pub mod prelude {
    pub use crate::algs::meshgen;
    pub use crate::algs::vector_calculus::{curl, divergence, gradient, laplacian};
    pub use crate::data::raster::{Mapping, Raster};
    pub use crate::data::value::FieldValue;
    pub use crate::debug_invariants::DebugInvariants;
    pub use crate::geometry::metrics::MetricCache;
    pub use crate::geometry::vector::Vec3;
    pub use crate::grid::{Grid, GridConfig, NormalOrientation, SpheroidGrid};
    pub use crate::mesh::Mesh;
    pub use crate::mesh_error::MeshGridError;
    pub use crate::spatial::voronoi::SpatialIndex;
    pub use crate::topology::{Arrow, IncidentFaces, NonManifoldHandling};
}
