//! Mesh connectivity: arrows, edges, incident faces and adjacency.

pub mod adjacency;
pub mod arrow;
pub mod builder;
pub mod validation;

pub use adjacency::VertexArrows;
pub use arrow::{Arrow, IncidentFaces};
pub use builder::{Topology, build_topology};
pub use validation::NonManifoldHandling;
