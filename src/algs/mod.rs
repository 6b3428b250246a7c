//! Algorithms over grids: the vector-calculus operators and reference mesh
//! generators.

pub mod meshgen;
pub mod vector_calculus;

pub use vector_calculus::{curl, divergence, gradient, laplacian};
