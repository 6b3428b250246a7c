//! Grid: an immutable dual mesh built once from a triangulated surface.
//!
//! A [`Grid`] pairs the deduplicated [`Topology`] of a mesh with its
//! [`MetricCache`]. Both halves sit behind `Arc`, so cloning a grid is cheap
//! and every clone shares the same read-only data. Rasters and the calculus
//! operators borrow a grid and never mutate it.
//!
//! ```
//! use mesh_grid::algs::meshgen;
//! use mesh_grid::grid::Grid;
//!
//! let mesh = meshgen::diamond();
//! let grid = Grid::from_mesh(&mesh).unwrap();
//! assert_eq!(grid.vertex_count(), 5);
//! assert_eq!(grid.arrow_count(), 2 * grid.edge_count());
//! ```

pub mod config;
pub mod spheroid;

pub use config::{GridConfig, NormalOrientation};
pub use spheroid::SpheroidGrid;

use std::sync::Arc;

use crate::data::raster::Mapping;
use crate::debug_invariants::DebugInvariants;
use crate::geometry::metrics::MetricCache;
use crate::geometry::vector::Vec3;
use crate::mesh::Mesh;
use crate::mesh_error::MeshGridError;
use crate::topology::arrow::Arrow;
use crate::topology::builder::{Topology, build_topology};
use crate::topology::validation::{validate_mesh, validate_non_manifold};

/// Topology and metrics of a triangulated surface.
#[derive(Clone, Debug)]
pub struct Grid {
    topology: Arc<Topology>,
    metrics: Arc<MetricCache>,
}

static_assertions::assert_impl_all!(Grid: Send, Sync);

impl Grid {
    /// Build a grid with the default [`GridConfig`].
    pub fn new(vertices: &[Vec3], faces: &[[u32; 3]]) -> Result<Self, MeshGridError> {
        Self::with_config(vertices, faces, &GridConfig::default())
    }

    pub fn from_mesh(mesh: &Mesh) -> Result<Self, MeshGridError> {
        Self::with_config(&mesh.vertices, &mesh.faces, &GridConfig::default())
    }

    /// Validate the input, build its topology, then compute every metric.
    pub fn with_config(
        vertices: &[Vec3],
        faces: &[[u32; 3]],
        config: &GridConfig,
    ) -> Result<Self, MeshGridError> {
        validate_mesh(vertices, faces, config)?;

        let topology = build_topology(vertices.len(), faces);
        validate_non_manifold(topology.edges(), topology.edge_faces(), config.non_manifold)?;
        let boundary = topology.boundary_edge_count();
        if boundary > 0 {
            log::warn!(
                "mesh is open: {boundary} of {} edges have a single incident face",
                topology.edge_count()
            );
        }

        let metrics = MetricCache::new(vertices, &topology, config.orientation);
        let grid = Grid {
            topology: Arc::new(topology),
            metrics: Arc::new(metrics),
        };
        crate::debug_invariants!(grid.validate_invariants(), "Grid construction");

        log::debug!(
            "built grid: total_area={:.6} dual_area={:.6}",
            grid.metrics.total_area(),
            grid.metrics.total_dual_area()
        );
        Ok(grid)
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.topology.vertex_count()
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.topology.face_count()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.topology.edge_count()
    }

    #[inline]
    pub fn arrow_count(&self) -> usize {
        self.topology.arrow_count()
    }

    /// Number of elements a raster with `mapping` holds on this grid.
    #[inline]
    pub fn cell_count(&self, mapping: Mapping) -> usize {
        match mapping {
            Mapping::Cell => self.vertex_count(),
            Mapping::Arrow => self.arrow_count(),
        }
    }

    #[inline]
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    #[inline]
    pub fn metrics(&self) -> &MetricCache {
        &self.metrics
    }

    #[inline]
    pub fn arrows(&self) -> &[Arrow] {
        self.topology.arrows()
    }

    #[inline]
    pub fn vertex_positions(&self) -> &[Vec3] {
        &self.metrics.vertex_positions
    }

    /// Whether two handles share the same underlying data.
    pub fn ptr_eq(&self, other: &Grid) -> bool {
        Arc::ptr_eq(&self.topology, &other.topology) && Arc::ptr_eq(&self.metrics, &other.metrics)
    }

    /// Face vertex ids as one flat `[a0, b0, c0, a1, ...]` slice.
    pub fn flattened_face_vertex_ids(&self) -> &[u32] {
        bytemuck::cast_slice(self.topology.face_vertex_ids())
    }

    /// Face corner coordinates as one flat `[x, y, z, x, y, z, ...]` buffer,
    /// three corners per face.
    pub fn flattened_face_vertex_coordinates(&self) -> Vec<f64> {
        let positions = &self.metrics.vertex_positions;
        let corners: Vec<Vec3> = self
            .flattened_face_vertex_ids()
            .iter()
            .map(|&v| positions[v as usize])
            .collect();
        bytemuck::cast_slice(&corners).to_vec()
    }
}

impl DebugInvariants for Grid {
    fn debug_assert_invariants(&self) {
        crate::debug_invariants!(self.validate_invariants(), "Grid invalid");
    }

    fn validate_invariants(&self) -> Result<(), MeshGridError> {
        let t = &*self.topology;
        let m = &*self.metrics;

        // 1) two arrows per edge, canonical first
        if t.arrow_count() != 2 * t.edge_count() {
            return Err(MeshGridError::InvariantViolation(format!(
                "arrow_count {} != 2 * edge_count {}",
                t.arrow_count(),
                t.edge_count()
            )));
        }
        for (i, arrow) in t.arrows().iter().enumerate() {
            let rev = t.arrows()[Topology::reverse_arrow_id(i)];
            if rev != arrow.reversed() {
                return Err(MeshGridError::InvariantViolation(format!(
                    "arrow {i} ({}, {}) is not paired with its reverse",
                    arrow.from, arrow.to
                )));
            }
        }

        // 2) parallel metric arrays
        let lengths = [
            (m.vertex_dual_areas.len(), t.vertex_count(), "vertex"),
            (m.face_areas.len(), t.face_count(), "face"),
            (m.edge_lengths.len(), t.edge_count(), "edge"),
            (m.arrow_dual_areas.len(), t.arrow_count(), "arrow"),
        ];
        if let Some((found, expected, what)) = lengths.iter().find(|(f, e, _)| f != e) {
            return Err(MeshGridError::InvariantViolation(format!(
                "{what} metrics have {found} entries, expected {expected}"
            )));
        }

        // 3) vertex dual areas are the sum of their outgoing slices
        for v in 0..t.vertex_count() {
            let slices: f64 = t
                .adjacency()
                .arrows_from(v)
                .iter()
                .map(|&a| m.arrow_dual_areas[a as usize])
                .sum();
            let dual = m.vertex_dual_areas[v];
            if (slices - dual).abs() > 1e-9 * dual.abs().max(1.0) {
                return Err(MeshGridError::InvariantViolation(format!(
                    "vertex {v} dual area {dual} != sum of slices {slices}"
                )));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algs::meshgen;

    fn with_dual_area_off_by_one(grid: &Grid) -> Grid {
        let mut metrics = (*grid.metrics).clone();
        metrics.vertex_dual_areas[0] += 1.0;
        Grid {
            topology: Arc::clone(&grid.topology),
            metrics: Arc::new(metrics),
        }
    }

    #[test]
    fn invariants_catch_dual_area_drift() {
        let grid = Grid::from_mesh(&meshgen::octahedron()).unwrap();
        assert!(grid.validate_invariants().is_ok());
        let broken = with_dual_area_off_by_one(&grid);
        let err = broken.validate_invariants().unwrap_err();
        match err {
            MeshGridError::InvariantViolation(msg) => assert!(msg.contains("vertex 0"), "{msg}"),
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "[invariants] Grid invalid")]
    fn debug_assert_panics_on_drift() {
        let grid = Grid::from_mesh(&meshgen::octahedron()).unwrap();
        with_dual_area_off_by_one(&grid).debug_assert_invariants();
    }

    #[test]
    fn diamond_counts() {
        let grid = Grid::from_mesh(&meshgen::diamond()).unwrap();
        assert_eq!(grid.vertex_count(), 5);
        assert_eq!(grid.face_count(), 4);
        assert_eq!(grid.edge_count(), 8);
        assert_eq!(grid.arrow_count(), 16);
        assert_eq!(grid.cell_count(Mapping::Cell), 5);
        assert_eq!(grid.cell_count(Mapping::Arrow), 16);
        assert!(grid.validate_invariants().is_ok());
    }

    #[test]
    fn empty_faces_is_an_error() {
        let err = Grid::new(&[[0.0; 3]], &[]).unwrap_err();
        assert_eq!(err, MeshGridError::EmptyFaces);
    }

    #[test]
    fn non_manifold_error_mode() {
        let v = [
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, -1.0, 0.0],
            [0.0, 0.0, 1.0],
        ];
        let f = [[0, 1, 2], [0, 1, 3], [0, 1, 4]];
        let cfg = GridConfig {
            non_manifold: crate::topology::NonManifoldHandling::Error,
            ..Default::default()
        };
        let err = Grid::with_config(&v, &f, &cfg).unwrap_err();
        assert!(matches!(err, MeshGridError::NonManifoldEdge { a: 0, b: 1, incident_faces: 3 }));
        // the default only warns
        assert!(Grid::new(&v, &f).is_ok());
    }

    #[test]
    fn clones_share_data() {
        let grid = Grid::from_mesh(&meshgen::octahedron()).unwrap();
        let other = grid.clone();
        assert!(grid.ptr_eq(&other));
    }

    #[test]
    fn flattened_buffers() {
        let mesh = meshgen::tetrahedron();
        let grid = Grid::from_mesh(&mesh).unwrap();
        let ids = grid.flattened_face_vertex_ids();
        assert_eq!(ids.len(), 3 * mesh.faces.len());
        assert_eq!(&ids[..3], &mesh.faces[0]);
        let coords = grid.flattened_face_vertex_coordinates();
        assert_eq!(coords.len(), 9 * mesh.faces.len());
        assert_eq!(&coords[3..6], &mesh.vertices[mesh.faces[0][1] as usize]);
    }
}
