//! Nearest-seed lookup on the unit sphere.
//!
//! Building the index is a localized brute-force Voronoi relaxation: each
//! seed visits the cells within `max_spacing` of it on every octahedron side
//! it can reach and claims those whose midpoint it is closer to than any
//! earlier claimant. A query is then a single table read.
//!
//! Results are exact only up to the cell resolution (`min_spacing / 8`): a
//! query returns the seed nearest to the *midpoint* of the query's cell.
//! Cells farther than `max_spacing` from every seed are never claimed and
//! yield `None`.

use crate::geometry::vector::{Vec3, distance, dot, normalize};
use crate::mesh_error::MeshGridError;
use crate::spatial::lookup::{SpheroidLookup, min_cell_width};
use crate::spatial::octahedron::{SIDE_COUNT, SIDE_MIN_COSINE, SIDES};

/// Cells per minimum seed spacing.
const CELLS_PER_SPACING: f64 = 8.0;

#[derive(Clone, Debug, PartialEq)]
pub struct SpatialIndex {
    lookup: SpheroidLookup<Option<u32>>,
    seed_count: usize,
    min_spacing: f64,
    max_spacing: f64,
}

impl SpatialIndex {
    /// Index `seeds` (projected onto the unit sphere).
    ///
    /// `min_spacing` sets the cell resolution; `max_spacing` bounds how far
    /// from a seed its claim reaches. Fails with
    /// [`MeshGridError::InvalidSpacing`] unless `0 < min_spacing <= max_spacing`
    /// and both are finite, and with [`MeshGridError::LookupTooLarge`] when
    /// `min_spacing` is below [`min_supported_spacing`](Self::min_supported_spacing).
    pub fn new(
        seeds: &[Vec3],
        min_spacing: f64,
        max_spacing: f64,
    ) -> Result<Self, MeshGridError> {
        if !(min_spacing.is_finite()
            && max_spacing.is_finite()
            && min_spacing > 0.0
            && min_spacing <= max_spacing)
        {
            return Err(MeshGridError::InvalidSpacing {
                min: min_spacing,
                max: max_spacing,
            });
        }

        let cell_width = min_spacing / CELLS_PER_SPACING;
        let mut best: SpheroidLookup<(Option<u32>, f64)> =
            SpheroidLookup::new(cell_width, (None, f64::INFINITY))?;
        let dim = best.dimensions() as isize;
        let radius = (max_spacing / cell_width).ceil() as isize + 1;

        for (id, &seed) in seeds.iter().enumerate() {
            let p = normalize(seed);
            for side in 0..SIDE_COUNT {
                if dot(SIDES[side].z, p) < SIDE_MIN_COSINE - max_spacing {
                    continue;
                }
                let (cx, cy) = best.cell_of(side, p);
                let (cx, cy) = (cx as isize, cy as isize);
                for y in (cy - radius).max(0)..=(cy + radius).min(dim - 1) {
                    for x in (cx - radius).max(0)..=(cx + radius).min(dim - 1) {
                        let (x, y) = (x as usize, y as usize);
                        let d = distance(best.cell_midpoint(side, x, y), p);
                        let cell = best.cell_mut(side, x, y);
                        if d <= max_spacing && d < cell.1 {
                            *cell = (Some(id as u32), d);
                        }
                    }
                }
            }
        }

        let lookup = best.map(|(id, _)| id);
        log::debug!(
            "built spatial index: seeds={} cell_width={cell_width:.6} dimensions={} claimed_cells={}",
            seeds.len(),
            lookup.dimensions(),
            lookup.cells().iter().filter(|c| c.is_some()).count()
        );

        Ok(SpatialIndex {
            lookup,
            seed_count: seeds.len(),
            min_spacing,
            max_spacing,
        })
    }

    /// Id of the seed nearest to `point`'s direction, if any seed reaches it.
    #[inline]
    pub fn get_value(&self, point: Vec3) -> Option<u32> {
        *self.lookup.get(normalize(point))
    }

    /// Batch form of [`get_value`](Self::get_value).
    ///
    /// # Panics
    /// If `out` and `points` differ in length.
    pub fn get_values(&self, points: &[Vec3], out: &mut [Option<u32>]) {
        assert_eq!(
            points.len(),
            out.len(),
            "get_values: output length must match the number of points"
        );
        for (o, &p) in out.iter_mut().zip(points) {
            *o = self.get_value(p);
        }
    }

    /// Smallest `min_spacing` whose cell table fits under
    /// [`MAX_CELLS`](crate::spatial::lookup::MAX_CELLS).
    pub fn min_supported_spacing() -> f64 {
        min_cell_width() * CELLS_PER_SPACING
    }

    #[inline]
    pub fn seed_count(&self) -> usize {
        self.seed_count
    }

    #[inline]
    pub fn cell_width(&self) -> f64 {
        self.lookup.cell_width()
    }

    #[inline]
    pub fn dimensions(&self) -> usize {
        self.lookup.dimensions()
    }

    #[inline]
    pub fn min_spacing(&self) -> f64 {
        self.min_spacing
    }

    #[inline]
    pub fn max_spacing(&self) -> f64 {
        self.max_spacing
    }
}
