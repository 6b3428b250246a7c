//! O(1) nearest-seed lookup on the unit sphere through an octahedral
//! projection.

pub mod lookup;
pub mod octahedron;
pub mod voronoi;

pub use lookup::SpheroidLookup;
pub use voronoi::SpatialIndex;
