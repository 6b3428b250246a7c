//! CSR (compressed sparse row) vertex → outgoing-arrow adjacency.
//!
//! Immutable and cache-friendly: the outgoing arrows of vertex `v` occupy
//! `offsets[v]..offsets[v + 1]` of two parallel arrays (arrow ids and the
//! neighbor each arrow points to). Within a vertex, arrows appear in global
//! arrow order, so iteration is deterministic.

use crate::topology::arrow::Arrow;

/// Outgoing arrows per vertex.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VertexArrows {
    offsets: Vec<u32>,
    arrow_ids: Vec<u32>,
    neighbor_ids: Vec<u32>,
}

impl VertexArrows {
    /// Build from the global arrow list of a mesh with `vertex_count` vertices.
    pub fn new(vertex_count: usize, arrows: &[Arrow]) -> Self {
        // 1) degree counts
        let mut degree = vec![0u32; vertex_count];
        for arrow in arrows {
            degree[arrow.from as usize] += 1;
        }

        // prefix sums
        let mut offsets = vec![0u32; vertex_count + 1];
        for v in 0..vertex_count {
            offsets[v + 1] = offsets[v] + degree[v];
        }

        // 2) populate in arrow order
        let mut arrow_ids = vec![0u32; arrows.len()];
        let mut neighbor_ids = vec![0u32; arrows.len()];
        let mut write = offsets.clone();
        for (i, arrow) in arrows.iter().enumerate() {
            let pos = write[arrow.from as usize] as usize;
            arrow_ids[pos] = i as u32;
            neighbor_ids[pos] = arrow.to;
            write[arrow.from as usize] += 1;
        }

        Self {
            offsets,
            arrow_ids,
            neighbor_ids,
        }
    }

    #[inline]
    fn range(&self, vertex: usize) -> std::ops::Range<usize> {
        self.offsets[vertex] as usize..self.offsets[vertex + 1] as usize
    }

    /// Ids of the arrows leaving `vertex`.
    #[inline]
    pub fn arrows_from(&self, vertex: usize) -> &[u32] {
        &self.arrow_ids[self.range(vertex)]
    }

    /// Ids of the vertices adjacent to `vertex`.
    #[inline]
    pub fn neighbor_ids(&self, vertex: usize) -> &[u32] {
        &self.neighbor_ids[self.range(vertex)]
    }

    /// Number of arrows leaving `vertex`.
    #[inline]
    pub fn degree(&self, vertex: usize) -> usize {
        self.range(vertex).len()
    }

    /// Number of vertices covered.
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.offsets.len().saturating_sub(1)
    }
}
