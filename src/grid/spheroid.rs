//! A grid over a sphere-like surface, paired with a nearest-vertex index.

use std::ops::Deref;

use crate::geometry::vector::{Vec3, distance, normalize};
use crate::grid::{Grid, GridConfig};
use crate::mesh::Mesh;
use crate::mesh_error::MeshGridError;
use crate::spatial::voronoi::SpatialIndex;

/// Margin applied to the longest edge so every cell is reached by a seed.
const MAX_SPACING_MARGIN: f64 = 1.5;

/// [`Grid`] plus a [`SpatialIndex`] over its vertex directions.
///
/// Dereferences to the grid, so every grid accessor and calculus operator
/// applies directly.
#[derive(Clone, Debug)]
pub struct SpheroidGrid {
    grid: Grid,
    index: SpatialIndex,
}

impl SpheroidGrid {
    pub fn new(vertices: &[Vec3], faces: &[[u32; 3]]) -> Result<Self, MeshGridError> {
        Self::from_grid(Grid::new(vertices, faces)?)
    }

    pub fn from_mesh(mesh: &Mesh) -> Result<Self, MeshGridError> {
        Self::from_grid(Grid::from_mesh(mesh)?)
    }

    pub fn with_config(
        vertices: &[Vec3],
        faces: &[[u32; 3]],
        config: &GridConfig,
    ) -> Result<Self, MeshGridError> {
        Self::from_grid(Grid::with_config(vertices, faces, config)?)
    }

    /// Index an existing grid. Spacing bounds come from the shortest and
    /// longest edges once projected onto the unit sphere.
    ///
    /// The shortest edge is raised to
    /// [`SpatialIndex::min_supported_spacing`]; vertices closer together than
    /// that may then resolve through the linear fallback.
    pub fn from_grid(grid: Grid) -> Result<Self, MeshGridError> {
        let positions = grid.vertex_positions();
        let (min_spacing, max_spacing) = grid.topology().edges().iter().fold(
            (f64::INFINITY, 0.0f64),
            |(lo, hi), e| {
                let d = distance(
                    normalize(positions[e.from as usize]),
                    normalize(positions[e.to as usize]),
                );
                (lo.min(d), hi.max(d))
            },
        );
        let floor = SpatialIndex::min_supported_spacing();
        if min_spacing < floor {
            log::warn!(
                "shortest projected edge {min_spacing:.3e} is below the index resolution; \
                 indexing at {floor:.3e}"
            );
        }
        let index = SpatialIndex::new(
            positions,
            min_spacing.max(floor),
            max_spacing * MAX_SPACING_MARGIN,
        )?;
        Ok(SpheroidGrid { grid, index })
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn index(&self) -> &SpatialIndex {
        &self.index
    }

    /// Vertex whose direction is nearest to `point`'s.
    ///
    /// Uses the index, and scans every vertex only when no indexed vertex
    /// reaches the point's cell.
    pub fn nearest_vertex_id(&self, point: Vec3) -> u32 {
        self.index
            .get_value(point)
            .unwrap_or_else(|| self.nearest_vertex_id_linear(point))
    }

    /// Batch form of [`nearest_vertex_id`](Self::nearest_vertex_id).
    ///
    /// # Panics
    /// If `out` and `points` differ in length.
    pub fn nearest_vertex_ids(&self, points: &[Vec3], out: &mut [u32]) {
        assert_eq!(
            points.len(),
            out.len(),
            "nearest_vertex_ids: output length must match the number of points"
        );
        for (o, &p) in out.iter_mut().zip(points) {
            *o = self.nearest_vertex_id(p);
        }
    }

    fn nearest_vertex_id_linear(&self, point: Vec3) -> u32 {
        let p = normalize(point);
        self.grid
            .vertex_positions()
            .iter()
            .map(|&v| distance(normalize(v), p))
            .enumerate()
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map_or(0, |(i, _)| i as u32)
    }

    /// Transfer a per-vertex field onto arbitrary points (for example the
    /// vertices of another grid) by nearest vertex.
    ///
    /// # Panics
    /// If `values` does not have one element per vertex.
    pub fn resample<T: Copy>(&self, values: &[T], targets: &[Vec3]) -> Vec<T> {
        assert_eq!(
            values.len(),
            self.grid.vertex_count(),
            "resample: values must have one element per vertex"
        );
        targets
            .iter()
            .map(|&p| values[self.nearest_vertex_id(p) as usize])
            .collect()
    }
}

impl Deref for SpheroidGrid {
    type Target = Grid;

    fn deref(&self) -> &Grid {
        &self.grid
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algs::meshgen;

    #[test]
    fn vertices_find_themselves() {
        let sg = SpheroidGrid::from_mesh(&meshgen::icosphere(1)).unwrap();
        for (i, &p) in sg.vertex_positions().iter().enumerate() {
            assert_eq!(sg.nearest_vertex_id(p), i as u32);
        }
    }

    #[test]
    fn derefs_to_grid() {
        let sg = SpheroidGrid::from_mesh(&meshgen::octahedron()).unwrap();
        assert_eq!(sg.vertex_count(), 6);
        assert_eq!(sg.arrow_count(), 24);
        assert!(sg.index().max_spacing() > sg.index().min_spacing());
    }

    #[test]
    fn resample_onto_itself_is_identity() {
        let sg = SpheroidGrid::from_mesh(&meshgen::icosphere(1)).unwrap();
        let values: Vec<f64> = (0..sg.vertex_count()).map(|i| i as f64).collect();
        let out = sg.resample(&values, sg.vertex_positions());
        assert_eq!(out, values);
    }

    #[test]
    fn linear_fallback_matches_index() {
        let sg = SpheroidGrid::from_mesh(&meshgen::octahedron()).unwrap();
        assert_eq!(sg.nearest_vertex_id_linear([0.1, 0.2, 0.9]), 4);
        assert_eq!(sg.nearest_vertex_id([0.1, 0.2, 0.9]), 4);
    }

    #[test]
    fn a_very_short_edge_still_builds() {
        // split one octahedron face around a point next to its first corner
        let mut mesh = meshgen::octahedron();
        let [a, b, c] = mesh.faces.pop().unwrap();
        let (pa, pb, pc) = (
            mesh.vertices[a as usize],
            mesh.vertices[b as usize],
            mesh.vertices[c as usize],
        );
        let near: Vec3 = normalize(std::array::from_fn(|k| pa[k] + 1e-9 * (pb[k] + pc[k])));
        let p = mesh.vertices.len() as u32;
        mesh.vertices.push(near);
        mesh.faces.extend([[a, b, p], [b, c, p], [c, a, p]]);

        let sg = SpheroidGrid::from_mesh(&mesh).unwrap();
        assert_eq!(sg.index().min_spacing(), SpatialIndex::min_supported_spacing());
        for i in 0..6u32 {
            if i != a {
                assert_eq!(sg.nearest_vertex_id(sg.vertex_positions()[i as usize]), i);
            }
        }
    }
}
