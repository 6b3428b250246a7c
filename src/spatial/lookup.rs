//! Flat per-cell table over the octahedral projection of the unit sphere.
//!
//! Every side is a square grid of `dimensions × dimensions` cells of width
//! `cell_width` spanning `[-1, 1]` along the side's `x` and `y` axes. Cells
//! are stored side-major, then row-major, in one contiguous `Vec`.

use crate::geometry::vector::{Vec3, add, dot, scale};
use crate::mesh_error::MeshGridError;
use crate::spatial::octahedron::{SIDE_COUNT, SIDES, side_id};

/// Largest table [`SpheroidLookup::new`] allocates, summed over all sides.
pub const MAX_CELLS: usize = 1 << 22;

/// Smallest cell width whose table fits in [`MAX_CELLS`].
pub fn min_cell_width() -> f64 {
    let dimensions = ((MAX_CELLS / SIDE_COUNT) as f64).sqrt().floor();
    // one cell of slack for rounding in `2 / cell_width`
    2.0 / (dimensions - 2.0)
}

/// Cells along each axis of a side, if the whole table fits in [`MAX_CELLS`].
fn side_dimensions(cell_width: f64) -> Option<usize> {
    if !(cell_width.is_finite() && cell_width > 0.0) {
        return None;
    }
    let per_axis = (2.0 / cell_width).ceil();
    if per_axis >= MAX_CELLS as f64 {
        return None;
    }
    let dimensions = per_axis as usize + 1;
    dimensions
        .checked_mul(dimensions)
        .and_then(|n| n.checked_mul(SIDE_COUNT))
        .filter(|&n| n <= MAX_CELLS)
        .map(|_| dimensions)
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpheroidLookup<T> {
    cell_width: f64,
    dimensions: usize,
    cells: Vec<T>,
}

impl<T: Clone> SpheroidLookup<T> {
    /// A table with every cell set to `fill`.
    ///
    /// Fails with [`MeshGridError::LookupTooLarge`] unless `cell_width` is
    /// positive and at least [`min_cell_width`].
    pub fn new(cell_width: f64, fill: T) -> Result<Self, MeshGridError> {
        let dimensions = side_dimensions(cell_width).ok_or(MeshGridError::LookupTooLarge {
            cell_width,
            limit: MAX_CELLS,
        })?;
        Ok(SpheroidLookup {
            cell_width,
            dimensions,
            cells: vec![fill; SIDE_COUNT * dimensions * dimensions],
        })
    }
}

impl<T> SpheroidLookup<T> {
    #[inline]
    pub fn cell_width(&self) -> f64 {
        self.cell_width
    }

    /// Cells along each axis of a side.
    #[inline]
    pub fn dimensions(&self) -> usize {
        self.dimensions
    }

    #[inline]
    pub fn cells(&self) -> &[T] {
        &self.cells
    }

    #[inline]
    pub fn memory_id(&self, side: usize, x: usize, y: usize) -> usize {
        (side * self.dimensions + y) * self.dimensions + x
    }

    #[inline]
    fn axis_cell(&self, coordinate: f64) -> usize {
        let i = ((coordinate + 1.0) / self.cell_width).floor();
        i.clamp(0.0, (self.dimensions - 1) as f64) as usize
    }

    /// Cell of `side` containing the projection of `point`, clamped to the grid.
    pub fn cell_of(&self, side: usize, point: Vec3) -> (usize, usize) {
        let basis = &SIDES[side];
        (self.axis_cell(dot(basis.x, point)), self.axis_cell(dot(basis.y, point)))
    }

    /// Point on the unit sphere above the center of cell `(x, y)` of `side`.
    pub fn cell_midpoint(&self, side: usize, x: usize, y: usize) -> Vec3 {
        let basis = &SIDES[side];
        let u = (x as f64 + 0.5) * self.cell_width - 1.0;
        let v = (y as f64 + 0.5) * self.cell_width - 1.0;
        let w = (1.0 - u * u - v * v).max(0.0).sqrt();
        add(add(scale(basis.x, u), scale(basis.y, v)), scale(basis.z, w))
    }

    /// Value of the cell containing `point`, which should have unit length.
    #[inline]
    pub fn get(&self, point: Vec3) -> &T {
        let side = side_id(point);
        let (x, y) = self.cell_of(side, point);
        &self.cells[self.memory_id(side, x, y)]
    }

    #[inline]
    pub fn cell_mut(&mut self, side: usize, x: usize, y: usize) -> &mut T {
        let id = self.memory_id(side, x, y);
        &mut self.cells[id]
    }

    /// Transform every cell, keeping the layout.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> SpheroidLookup<U> {
        SpheroidLookup {
            cell_width: self.cell_width,
            dimensions: self.dimensions,
            cells: self.cells.into_iter().map(f).collect(),
        }
    }
}
