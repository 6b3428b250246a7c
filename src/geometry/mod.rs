//! Geometry for mesh-grid.
//!
//! Fixed-size vector helpers and the per-element metric cache the calculus
//! operators read from.

pub mod metrics;
pub mod vector;

pub use metrics::MetricCache;
pub use vector::Vec3;
