#![allow(dead_code)]
use mesh_grid::prelude::*;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

pub fn grid(mesh: &Mesh) -> Grid {
    Grid::from_mesh(mesh).unwrap()
}

/// Deterministic RNG for reproducible fields.
pub fn rng(seed: u64) -> SmallRng {
    SmallRng::seed_from_u64(seed)
}

/// Uniformly distributed directions on the unit sphere.
pub fn random_unit_vectors(rng: &mut SmallRng, n: usize) -> Vec<Vec3> {
    let mut out = Vec::with_capacity(n);
    while out.len() < n {
        let p: Vec3 = [
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        ];
        let len = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
        if len > 1e-3 && len <= 1.0 {
            out.push([p[0] / len, p[1] / len, p[2] / len]);
        }
    }
    out
}

pub fn dist(a: Vec3, b: Vec3) -> f64 {
    ((a[0] - b[0]).powi(2) + (a[1] - b[1]).powi(2) + (a[2] - b[2]).powi(2)).sqrt()
}

/// Index and distance of the point in `seeds` closest to `p`.
pub fn brute_force_nearest(seeds: &[Vec3], p: Vec3) -> (usize, f64) {
    seeds
        .iter()
        .map(|&s| dist(s, p))
        .enumerate()
        .min_by(|a, b| a.1.total_cmp(&b.1))
        .unwrap()
}

/// Vertices with a full ring of six neighbors (lattice interior).
pub fn interior_vertices(grid: &Grid) -> Vec<usize> {
    grid.metrics()
        .vertex_neighbor_counts
        .iter()
        .enumerate()
        .filter(|&(_, &n)| n == 6)
        .map(|(v, _)| v)
        .collect()
}

pub fn assert_close(got: f64, want: f64, tol: f64, what: &str) {
    assert!(
        (got - want).abs() <= tol,
        "{what}: got {got}, want {want} (tol {tol})"
    );
}

pub fn assert_vec_close(got: Vec3, want: Vec3, tol: f64, what: &str) {
    assert!(
        dist(got, want) <= tol,
        "{what}: got {got:?}, want {want:?} (tol {tol})"
    );
}
