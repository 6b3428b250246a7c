//! Topology builder: deduplicate triangle connectivity into arrows and edges.
//!
//! Every face contributes its three undirected vertex pairs in both
//! directions, each tagged with the face id. One sort over
//! `(lower id, higher id, origin, face)` then does all the work:
//!
//! * equal arrows become adjacent, so deduplication is a single linear pass;
//! * the faces bordering an arrow arrive sorted, so the incident-face lookup
//!   falls out of the same pass;
//! * the two directions of an edge end up next to each other, canonical
//!   direction first, so arrow `2k` is edge `k` and arrow `2k + 1` is its
//!   reverse.
//!
//! No hash table is involved, so the result depends only on the input.

use itertools::Itertools;

use crate::topology::adjacency::VertexArrows;
use crate::topology::arrow::{Arrow, IncidentFaces};

/// Connectivity of a triangle mesh: faces, arrows, edges and adjacency.
#[derive(Clone, Debug, PartialEq)]
pub struct Topology {
    vertex_count: usize,
    face_vertex_ids: Vec<[u32; 3]>,
    arrows: Vec<Arrow>,
    arrow_faces: Vec<IncidentFaces>,
    edges: Vec<Arrow>,
    edge_faces: Vec<IncidentFaces>,
    adjacency: VertexArrows,
}

/// Build the topology of a mesh whose faces have already been validated
/// (all indices `< vertex_count`).
///
/// Faces that repeat a vertex contribute only their distinct pairs.
pub fn build_topology(vertex_count: usize, faces: &[[u32; 3]]) -> Topology {
    // 1) half-edge records, both directions, tagged with their face
    let mut half: Vec<(Arrow, u32)> = Vec::with_capacity(6 * faces.len());
    for (face_id, ids) in faces.iter().enumerate() {
        for (a, b) in ids.iter().copied().tuple_combinations() {
            if a == b {
                continue;
            }
            half.push((Arrow::new(a, b), face_id as u32));
            half.push((Arrow::new(b, a), face_id as u32));
        }
    }

    // 2) deterministic order, preserving locality by lower endpoint
    half.sort_unstable_by_key(|&(arrow, face)| (arrow.sort_key(), face));

    // 3) dedupe arrows; faces of each arrow arrive sorted
    let mut arrows = Vec::with_capacity(half.len() / 2);
    let mut arrow_faces = Vec::with_capacity(half.len() / 2);
    let mut face_ids: Vec<u32> = Vec::with_capacity(4);
    for (arrow, group) in &half.iter().chunk_by(|&&(arrow, _)| arrow) {
        face_ids.clear();
        face_ids.extend(group.map(|&(_, face)| face).dedup());
        arrows.push(arrow);
        arrow_faces.push(IncidentFaces::from_sorted(&face_ids));
    }

    // 4) edges are the canonical arrows
    let (edges, edge_faces): (Vec<Arrow>, Vec<IncidentFaces>) = arrows
        .iter()
        .zip(&arrow_faces)
        .filter(|(arrow, _)| arrow.is_canonical())
        .map(|(&arrow, &faces)| (arrow, faces))
        .unzip();

    let adjacency = VertexArrows::new(vertex_count, &arrows);

    log::debug!(
        "built topology: vertices={vertex_count} faces={} edges={} arrows={}",
        faces.len(),
        edges.len(),
        arrows.len()
    );

    Topology {
        vertex_count,
        face_vertex_ids: faces.to_vec(),
        arrows,
        arrow_faces,
        edges,
        edge_faces,
        adjacency,
    }
}

impl Topology {
    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    #[inline]
    pub fn face_count(&self) -> usize {
        self.face_vertex_ids.len()
    }

    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    #[inline]
    pub fn arrow_count(&self) -> usize {
        self.arrows.len()
    }

    /// Vertex id triples of every face, in input order.
    #[inline]
    pub fn face_vertex_ids(&self) -> &[[u32; 3]] {
        &self.face_vertex_ids
    }

    /// All arrows, sorted by [`Arrow::sort_key`].
    #[inline]
    pub fn arrows(&self) -> &[Arrow] {
        &self.arrows
    }

    /// Faces bordering each arrow (parallel to [`arrows`](Self::arrows)).
    #[inline]
    pub fn arrow_faces(&self) -> &[IncidentFaces] {
        &self.arrow_faces
    }

    /// Canonical (`from < to`) connections, one per undirected edge.
    #[inline]
    pub fn edges(&self) -> &[Arrow] {
        &self.edges
    }

    /// Faces bordering each edge (parallel to [`edges`](Self::edges)).
    #[inline]
    pub fn edge_faces(&self) -> &[IncidentFaces] {
        &self.edge_faces
    }

    /// Outgoing-arrow adjacency per vertex.
    #[inline]
    pub fn adjacency(&self) -> &VertexArrows {
        &self.adjacency
    }

    /// Id of the arrow pointing the opposite way.
    #[inline]
    pub const fn reverse_arrow_id(arrow_id: usize) -> usize {
        arrow_id ^ 1
    }

    /// Id of the edge an arrow belongs to.
    #[inline]
    pub const fn arrow_edge_id(arrow_id: usize) -> usize {
        arrow_id / 2
    }

    /// Id of the canonical arrow of an edge.
    #[inline]
    pub const fn edge_arrow_id(edge_id: usize) -> usize {
        edge_id * 2
    }

    /// Number of arrows leaving each vertex.
    pub fn vertex_neighbor_counts(&self) -> Vec<u32> {
        (0..self.vertex_count)
            .map(|v| self.adjacency.degree(v) as u32)
            .collect()
    }

    /// Edges bordered by a single face.
    pub fn boundary_edge_count(&self) -> usize {
        self.edge_faces
            .iter()
            .filter(|f| matches!(f, IncidentFaces::Boundary(_)))
            .count()
    }

    /// Edges bordered by more than two faces.
    pub fn non_manifold_edge_count(&self) -> usize {
        self.edge_faces
            .iter()
            .filter(|f| matches!(f, IncidentFaces::NonManifold(_)))
            .count()
    }
}
