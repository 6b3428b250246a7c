//! Finite-volume gradient, divergence, curl and Laplacian over vertex fields.
//!
//! Every operator runs the same three passes over a [`Grid`]:
//!
//! 1. **differential** per arrow: `field[to] - field[from]`;
//! 2. **flux** per arrow through the arrow's dual segment;
//! 3. **aggregate** fluxes into each arrow's origin vertex, in arrow order,
//!    then divide by the vertex dual area.
//!
//! Fluxes through the arrow's dual segment:
//!
//! | operator   | flux                          |
//! |------------|-------------------------------|
//! | gradient   | `Δf · n̂ · dual_length`        |
//! | divergence | `(ΔF · n̂) · dual_length`      |
//! | curl       | `(ΔF × n̂) · dual_length`      |
//! | laplacian  | `Δf / length · dual_length`   |
//!
//! where `Δf` is the arrow differential and `n̂` the arrow's dual normal.
//! The full differential is used rather than its midpoint average, so on a
//! regular patch gradient and divergence read twice the continuum value and
//! curl reads minus twice it; the Laplacian matches the continuum value.
//! A vertex with zero dual area (isolated, or surrounded only by boundary
//! arrows) gets the zero value.
//!
//! The `*_into` forms take caller-owned scratch buffers of `arrow_count`
//! elements and an output of `vertex_count` elements; wrong lengths are a
//! contract violation and panic. With the `rayon` feature the per-arrow
//! passes run in parallel; aggregation always runs sequentially, so results
//! are bit-identical either way.

use crate::data::value::FieldValue;
use crate::geometry::vector::{Vec3, ZERO, cross, dot, scale};
use crate::grid::Grid;

#[inline]
fn assert_len(op: &str, buffer: &str, found: usize, expected: usize) {
    assert_eq!(
        found, expected,
        "{op}: {buffer} has {found} elements, expected {expected}"
    );
}

fn check_sizes(op: &str, grid: &Grid, field: usize, scratch: &[usize], out: usize) {
    assert_len(op, "field", field, grid.vertex_count());
    for &s in scratch {
        assert_len(op, "arrow scratch", s, grid.arrow_count());
    }
    assert_len(op, "output", out, grid.vertex_count());
}

/// Run `f(i, &mut values[i])` for every arrow `i`.
fn for_each_arrow<U: Send>(values: &mut [U], f: impl Fn(usize, &mut U) + Send + Sync) {
    #[cfg(feature = "rayon")]
    {
        use rayon::prelude::*;
        values.par_iter_mut().enumerate().for_each(|(i, v)| f(i, v));
    }
    #[cfg(not(feature = "rayon"))]
    for (i, v) in values.iter_mut().enumerate() {
        f(i, v);
    }
}

/// `out[i] = field[to] - field[from]` for every arrow `i`.
pub fn arrow_differentials<T: FieldValue>(grid: &Grid, field: &[T], out: &mut [T]) {
    let arrows = grid.arrows();
    for_each_arrow(out, |i, o| {
        let a = arrows[i];
        *o = field[a.to as usize].sub(field[a.from as usize]);
    });
}

/// Sum per-arrow `fluxes` into their origin vertices and divide by the
/// vertex dual areas.
pub fn aggregate_fluxes<U: FieldValue>(grid: &Grid, fluxes: &[U], out: &mut [U]) {
    out.fill(U::ZERO);
    for (arrow, &flux) in grid.arrows().iter().zip(fluxes) {
        let o = &mut out[arrow.from as usize];
        *o = o.add(flux);
    }
    for (o, &area) in out.iter_mut().zip(&grid.metrics().vertex_dual_areas) {
        *o = if area > 0.0 { o.scale(1.0 / area) } else { U::ZERO };
    }
}

/// Gradient of a scalar field.
///
/// # Panics
/// If `field`/`out` do not have `vertex_count` elements or the scratch
/// buffers do not have `arrow_count` elements.
pub fn gradient_into(
    grid: &Grid,
    field: &[f64],
    differentials: &mut [f64],
    fluxes: &mut [Vec3],
    out: &mut [Vec3],
) {
    let scratch = [differentials.len(), fluxes.len()];
    check_sizes("gradient", grid, field.len(), &scratch, out.len());
    arrow_differentials(grid, field, differentials);

    let m = grid.metrics();
    let differentials = &*differentials;
    for_each_arrow(fluxes, |i, o| {
        *o = scale(m.arrow_dual_normals[i], differentials[i] * m.arrow_dual_lengths[i]);
    });
    aggregate_fluxes(grid, fluxes, out);
}

pub fn gradient(grid: &Grid, field: &[f64]) -> Vec<Vec3> {
    let mut differentials = vec![0.0; grid.arrow_count()];
    let mut fluxes = vec![ZERO; grid.arrow_count()];
    let mut out = vec![ZERO; grid.vertex_count()];
    gradient_into(grid, field, &mut differentials, &mut fluxes, &mut out);
    out
}

/// Divergence of a vector field.
///
/// # Panics
/// On buffer length mismatch, as for [`gradient_into`].
pub fn divergence_into(
    grid: &Grid,
    field: &[Vec3],
    differentials: &mut [Vec3],
    fluxes: &mut [f64],
    out: &mut [f64],
) {
    let scratch = [differentials.len(), fluxes.len()];
    check_sizes("divergence", grid, field.len(), &scratch, out.len());
    arrow_differentials(grid, field, differentials);

    let m = grid.metrics();
    let differentials = &*differentials;
    for_each_arrow(fluxes, |i, o| {
        *o = dot(differentials[i], m.arrow_dual_normals[i]) * m.arrow_dual_lengths[i];
    });
    aggregate_fluxes(grid, fluxes, out);
}

pub fn divergence(grid: &Grid, field: &[Vec3]) -> Vec<f64> {
    let mut differentials = vec![ZERO; grid.arrow_count()];
    let mut fluxes = vec![0.0; grid.arrow_count()];
    let mut out = vec![0.0; grid.vertex_count()];
    divergence_into(grid, field, &mut differentials, &mut fluxes, &mut out);
    out
}

/// Curl of a vector field. `arrow_scratch` holds the differentials and is
/// then overwritten with the fluxes.
///
/// # Panics
/// On buffer length mismatch, as for [`gradient_into`].
pub fn curl_into(grid: &Grid, field: &[Vec3], arrow_scratch: &mut [Vec3], out: &mut [Vec3]) {
    check_sizes("curl", grid, field.len(), &[arrow_scratch.len()], out.len());
    arrow_differentials(grid, field, arrow_scratch);

    let m = grid.metrics();
    for_each_arrow(arrow_scratch, |i, o| {
        *o = scale(cross(*o, m.arrow_dual_normals[i]), m.arrow_dual_lengths[i]);
    });
    aggregate_fluxes(grid, arrow_scratch, out);
}

pub fn curl(grid: &Grid, field: &[Vec3]) -> Vec<Vec3> {
    let mut scratch = vec![ZERO; grid.arrow_count()];
    let mut out = vec![ZERO; grid.vertex_count()];
    curl_into(grid, field, &mut scratch, &mut out);
    out
}

/// Laplacian of a scalar field, or the component-wise Laplacian of a
/// vector field. `arrow_scratch` holds the differentials and is then
/// overwritten with the fluxes.
///
/// # Panics
/// On buffer length mismatch, as for [`gradient_into`].
pub fn laplacian_into<T: FieldValue>(
    grid: &Grid,
    field: &[T],
    arrow_scratch: &mut [T],
    out: &mut [T],
) {
    check_sizes("laplacian", grid, field.len(), &[arrow_scratch.len()], out.len());
    arrow_differentials(grid, field, arrow_scratch);

    let m = grid.metrics();
    for_each_arrow(arrow_scratch, |i, o| {
        let length = m.arrow_lengths[i];
        *o = if length > 0.0 {
            o.scale(m.arrow_dual_lengths[i] / length)
        } else {
            T::ZERO
        };
    });
    aggregate_fluxes(grid, arrow_scratch, out);
}

pub fn laplacian<T: FieldValue>(grid: &Grid, field: &[T]) -> Vec<T> {
    let mut scratch = vec![T::ZERO; grid.arrow_count()];
    let mut out = vec![T::ZERO; grid.vertex_count()];
    laplacian_into(grid, field, &mut scratch, &mut out);
    out
}
