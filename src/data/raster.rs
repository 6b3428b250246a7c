//! Raster: one value per vertex or per arrow of a grid.
//!
//! A `Raster<'g, T>` owns its values and borrows the [`Grid`] they are laid
//! out over, so the grid is guaranteed to outlive it. Its length is checked
//! against [`Grid::cell_count`] once, at construction.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

use crate::algs::vector_calculus;
use crate::data::value::FieldValue;
use crate::geometry::vector::Vec3;
use crate::grid::Grid;
use crate::mesh_error::MeshGridError;

/// Which grid elements a raster is indexed by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mapping {
    /// One value per vertex.
    Cell,
    /// One value per arrow.
    Arrow,
}

#[derive(Clone, Debug)]
pub struct Raster<'g, T> {
    grid: &'g Grid,
    mapping: Mapping,
    values: Vec<T>,
}

impl<'g, T> Raster<'g, T> {
    /// Wrap `values`, failing with [`MeshGridError::RasterSizeMismatch`] if
    /// their count does not match `grid.cell_count(mapping)`.
    pub fn try_from_vec(
        grid: &'g Grid,
        mapping: Mapping,
        values: Vec<T>,
    ) -> Result<Self, MeshGridError> {
        let expected = grid.cell_count(mapping);
        if values.len() != expected {
            return Err(MeshGridError::RasterSizeMismatch {
                mapping,
                expected,
                found: values.len(),
            });
        }
        Ok(Raster { grid, mapping, values })
    }

    /// Value of element `i` is `f(i)`.
    pub fn from_fn(grid: &'g Grid, mapping: Mapping, f: impl FnMut(usize) -> T) -> Self {
        let values = (0..grid.cell_count(mapping)).map(f).collect();
        Raster { grid, mapping, values }
    }

    #[inline]
    pub fn grid(&self) -> &'g Grid {
        self.grid
    }

    #[inline]
    pub fn mapping(&self) -> Mapping {
        self.mapping
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[inline]
    pub fn as_slice(&self) -> &[T] {
        &self.values
    }

    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.values
    }

    pub fn into_vec(self) -> Vec<T> {
        self.values
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.values.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.values.iter_mut()
    }

    /// Element-wise transform onto the same grid and mapping.
    pub fn map<U>(&self, f: impl FnMut(&T) -> U) -> Raster<'g, U> {
        Raster {
            grid: self.grid,
            mapping: self.mapping,
            values: self.values.iter().map(f).collect(),
        }
    }

    /// Element-wise combination with another raster on the same grid.
    ///
    /// # Panics
    /// If the rasters use different grids or mappings.
    pub fn zip_with<U, V>(
        &self,
        other: &Raster<'_, U>,
        mut f: impl FnMut(&T, &U) -> V,
    ) -> Raster<'g, V> {
        assert!(
            self.grid.ptr_eq(other.grid) && self.mapping == other.mapping,
            "zip_with: rasters must share a grid and mapping"
        );
        Raster {
            grid: self.grid,
            mapping: self.mapping,
            values: self.values.iter().zip(&other.values).map(|(a, b)| f(a, b)).collect(),
        }
    }

    fn assert_cells(&self, op: &str) {
        assert_eq!(self.mapping, Mapping::Cell, "{op} needs a per-vertex raster");
    }
}

impl<'g, T: Clone> Raster<'g, T> {
    pub fn filled(grid: &'g Grid, mapping: Mapping, value: T) -> Self {
        Raster {
            grid,
            mapping,
            values: vec![value; grid.cell_count(mapping)],
        }
    }
}

impl<T> Index<usize> for Raster<'_, T> {
    type Output = T;

    #[inline]
    fn index(&self, i: usize) -> &T {
        &self.values[i]
    }
}

impl<T> IndexMut<usize> for Raster<'_, T> {
    #[inline]
    fn index_mut(&mut self, i: usize) -> &mut T {
        &mut self.values[i]
    }
}

impl<'a, T> IntoIterator for &'a Raster<'_, T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.values.iter()
    }
}

impl<'g> Raster<'g, f64> {
    pub fn gradient(&self) -> Raster<'g, Vec3> {
        self.assert_cells("gradient");
        self.derived(vector_calculus::gradient(self.grid, &self.values))
    }
}

impl<'g> Raster<'g, Vec3> {
    pub fn divergence(&self) -> Raster<'g, f64> {
        self.assert_cells("divergence");
        self.derived(vector_calculus::divergence(self.grid, &self.values))
    }

    pub fn curl(&self) -> Raster<'g, Vec3> {
        self.assert_cells("curl");
        self.derived(vector_calculus::curl(self.grid, &self.values))
    }
}

impl<'g, T: FieldValue> Raster<'g, T> {
    /// Scalar or component-wise vector Laplacian.
    pub fn laplacian(&self) -> Raster<'g, T> {
        self.assert_cells("laplacian");
        self.derived(vector_calculus::laplacian(self.grid, &self.values))
    }

    fn derived<U>(&self, values: Vec<U>) -> Raster<'g, U> {
        Raster {
            grid: self.grid,
            mapping: Mapping::Cell,
            values,
        }
    }
}
