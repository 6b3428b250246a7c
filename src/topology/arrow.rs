//! Arrow: a directed connection between two mesh-adjacent vertices.
//!
//! Every undirected edge of a triangle mesh gives rise to two arrows,
//! `(a, b)` and `(b, a)`. The *canonical* direction is the one with
//! `from < to`; that direction is what the topology stores as the edge.
//! This module also defines [`IncidentFaces`], the explicit record of which
//! faces border an arrow (or edge).

use bytemuck::{Pod, Zeroable};
use serde::{Deserialize, Serialize};

/// A directed vertex pair `from → to`.
#[derive(
    Copy,
    Clone,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Pod,
    Zeroable,
)]
#[repr(C)]
pub struct Arrow {
    /// Origin vertex id.
    pub from: u32,
    /// Destination vertex id.
    pub to: u32,
}

impl Arrow {
    /// Construct a new `Arrow` from `from` → `to`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use mesh_grid::topology::arrow::Arrow;
    /// let a = Arrow::new(3, 1);
    /// assert_eq!(a.endpoints(), (3, 1));
    /// assert_eq!(a.reversed(), Arrow::new(1, 3));
    /// assert!(!a.is_canonical());
    /// ```
    #[inline]
    pub const fn new(from: u32, to: u32) -> Self {
        Arrow { from, to }
    }

    /// Returns the `(from, to)` endpoints.
    #[inline]
    pub const fn endpoints(&self) -> (u32, u32) {
        (self.from, self.to)
    }

    /// The same connection, pointing the other way.
    #[inline]
    pub const fn reversed(&self) -> Self {
        Arrow::new(self.to, self.from)
    }

    /// `true` when this arrow points from the lower id to the higher id,
    /// i.e. it is the direction stored as an edge.
    #[inline]
    pub const fn is_canonical(&self) -> bool {
        self.from < self.to
    }

    /// The canonical (edge) direction of this connection.
    #[inline]
    pub fn canonical(&self) -> Self {
        Arrow::new(self.from.min(self.to), self.from.max(self.to))
    }

    /// Ordering key: lower endpoint, then higher endpoint, then origin.
    ///
    /// Sorting by this key keeps arrows that touch low vertex ids together
    /// and places the two directions of an edge next to each other, with
    /// the canonical direction first.
    #[inline]
    pub fn sort_key(&self) -> (u32, u32, u32) {
        let c = self.canonical();
        (c.from, c.to, self.from)
    }
}

//------------------------------------------------------------------------------
// Incident faces
//------------------------------------------------------------------------------

/// Faces bordering an arrow or edge.
///
/// On a closed 2-manifold every connection has exactly two incident faces.
/// Anything else is recorded explicitly rather than left uninitialised.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IncidentFaces {
    /// The two bordering faces, lower face id first.
    Pair(u32, u32),
    /// Only one face borders the connection (open surface).
    Boundary(u32),
    /// More than two faces share the connection; carries the face count.
    NonManifold(usize),
}

impl IncidentFaces {
    /// Classify a sorted, deduplicated list of face ids.
    pub(crate) fn from_sorted(face_ids: &[u32]) -> Self {
        match *face_ids {
            [a, b] => IncidentFaces::Pair(a, b),
            [a] => IncidentFaces::Boundary(a),
            _ => IncidentFaces::NonManifold(face_ids.len()),
        }
    }

    /// The face pair, if the connection has exactly two faces.
    #[inline]
    pub fn pair(&self) -> Option<(u32, u32)> {
        match *self {
            IncidentFaces::Pair(a, b) => Some((a, b)),
            _ => None,
        }
    }

    #[inline]
    pub fn is_pair(&self) -> bool {
        matches!(self, IncidentFaces::Pair(..))
    }

    /// Number of faces bordering the connection.
    #[inline]
    pub fn count(&self) -> usize {
        match *self {
            IncidentFaces::Pair(..) => 2,
            IncidentFaces::Boundary(_) => 1,
            IncidentFaces::NonManifold(n) => n,
        }
    }
}

//------------------------------------------------------------------------------
// Unit Tests
//------------------------------------------------------------------------------
