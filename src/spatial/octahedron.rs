//! The eight sides of the octahedron the sphere is projected onto.
//!
//! Side `i` covers the octant whose coordinate signs are the bits of `i`:
//! bit 0 for x, bit 1 for y, bit 2 for z (set means positive). Each side has
//! an orthonormal basis whose `z` axis points at the octant's center and
//! whose `x`/`y` axes span the side's flat 2D grid.

use once_cell::sync::Lazy;

use crate::geometry::vector::{Vec3, cross, normalize};

pub const SIDE_COUNT: usize = 8;

/// Smallest `dot(z, p)` of any unit point `p` inside a side's octant.
pub const SIDE_MIN_COSINE: f64 = 0.577_350_269_189_625_8;

/// Tangent frame of one octahedron side.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SideBasis {
    pub x: Vec3,
    pub y: Vec3,
    pub z: Vec3,
}

impl SideBasis {
    fn for_side(side: usize) -> Self {
        let sign = |bit: usize| if side & (1 << bit) != 0 { 1.0 } else { -1.0 };
        let z = normalize([sign(0), sign(1), sign(2)]);
        let x = normalize(cross(z, [0.0, 0.0, 1.0]));
        let y = normalize(cross(z, x));
        SideBasis { x, y, z }
    }
}

/// Bases of all eight sides, indexed by side id.
pub static SIDES: Lazy<[SideBasis; SIDE_COUNT]> =
    Lazy::new(|| std::array::from_fn(SideBasis::for_side));

/// Side whose octant contains `point`; zero coordinates count as negative.
#[inline]
pub fn side_id(point: Vec3) -> usize {
    (point[0] > 0.0) as usize | ((point[1] > 0.0) as usize) << 1 | ((point[2] > 0.0) as usize) << 2
}
