//! Field data laid out over a grid.

pub mod raster;
pub mod value;

pub use raster::{Mapping, Raster};
pub use value::FieldValue;
