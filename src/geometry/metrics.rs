//! Metric cache: every geometric quantity the finite-volume calculus needs.
//!
//! Quantities are computed in dependency order, one whole-array pass per
//! group:
//!
//! 1. faces: endpoints, midpoints (centroids), areas, oriented normals;
//! 2. vertices: areas (a third of every incident face) and area-weighted
//!    normals;
//! 3. edges and arrows: endpoints, midpoints, offsets, lengths, normals;
//! 4. duals: for each arrow, the segment joining the midpoints of its two
//!    incident faces, that segment's length and outward normal, and the
//!    "pie slice" area it closes off around the arrow's origin. Slices sum
//!    into the vertex dual areas.
//!
//! The dual normal of an arrow is perpendicular to both the dual segment and
//! the arrow's own normal and always points along the arrow's offset, so a
//! flux computed from it has the same sign convention for every arrow.
//!
//! Connections without exactly two incident faces have a collapsed dual:
//! both dual endpoints sit at the arrow midpoint and the dual length, dual
//! normal and slice area are zero.

use itertools::izip;

use crate::geometry::vector::{
    Vec3, ZERO, add, cross, distance, dot, mean, midpoint, norm, normalize, scale, sub,
};
use crate::grid::NormalOrientation;
use crate::topology::builder::Topology;

/// Precomputed per-face, per-vertex, per-edge, per-arrow and per-dual geometry.
#[derive(Clone, Debug, PartialEq)]
pub struct MetricCache {
    /// Mean of all vertex positions.
    pub mesh_centroid: Vec3,

    pub face_endpoint_a: Vec<Vec3>,
    pub face_endpoint_b: Vec<Vec3>,
    pub face_endpoint_c: Vec<Vec3>,
    pub face_midpoints: Vec<Vec3>,
    pub face_normals: Vec<Vec3>,
    pub face_areas: Vec<f64>,
    pub face_average_area: f64,

    pub vertex_positions: Vec<Vec3>,
    pub vertex_normals: Vec<Vec3>,
    pub vertex_areas: Vec<f64>,
    pub vertex_dual_areas: Vec<f64>,
    pub vertex_neighbor_counts: Vec<u32>,
    pub vertex_average_area: f64,

    pub edge_endpoint_a: Vec<Vec3>,
    pub edge_endpoint_b: Vec<Vec3>,
    pub edge_midpoints: Vec<Vec3>,
    pub edge_lengths: Vec<f64>,
    pub edge_normals: Vec<Vec3>,
    pub edge_average_length: f64,

    pub arrow_endpoint_from: Vec<Vec3>,
    pub arrow_endpoint_to: Vec<Vec3>,
    pub arrow_midpoints: Vec<Vec3>,
    pub arrow_offsets: Vec<Vec3>,
    pub arrow_lengths: Vec<f64>,
    pub arrow_normals: Vec<Vec3>,
    pub arrow_average_length: f64,

    pub arrow_dual_endpoint_a: Vec<Vec3>,
    pub arrow_dual_endpoint_b: Vec<Vec3>,
    pub arrow_dual_lengths: Vec<f64>,
    pub arrow_dual_normals: Vec<Vec3>,
    pub arrow_dual_areas: Vec<f64>,
}

struct FaceMetrics {
    endpoint_a: Vec<Vec3>,
    endpoint_b: Vec<Vec3>,
    endpoint_c: Vec<Vec3>,
    midpoints: Vec<Vec3>,
    normals: Vec<Vec3>,
    areas: Vec<f64>,
}

struct VertexMetrics {
    normals: Vec<Vec3>,
    areas: Vec<f64>,
}

struct ArrowDuals {
    endpoint_a: Vec<Vec3>,
    endpoint_b: Vec<Vec3>,
    lengths: Vec<f64>,
    normals: Vec<Vec3>,
    areas: Vec<f64>,
}

impl MetricCache {
    /// Compute all metrics for `vertices` connected as described by `topology`.
    pub fn new(vertices: &[Vec3], topology: &Topology, orientation: NormalOrientation) -> Self {
        let mesh_centroid = mean(vertices);

        let faces = face_metrics(vertices, topology.face_vertex_ids(), mesh_centroid, orientation);
        let verts = vertex_metrics(vertices.len(), topology.face_vertex_ids(), &faces);

        // edges
        let edges = topology.edges();
        let edge_endpoint_a: Vec<Vec3> = edges.iter().map(|e| vertices[e.from as usize]).collect();
        let edge_endpoint_b: Vec<Vec3> = edges.iter().map(|e| vertices[e.to as usize]).collect();
        let edge_midpoints: Vec<Vec3> = izip!(&edge_endpoint_a, &edge_endpoint_b)
            .map(|(&a, &b)| midpoint(a, b))
            .collect();
        let edge_lengths: Vec<f64> = izip!(&edge_endpoint_a, &edge_endpoint_b)
            .map(|(&a, &b)| distance(a, b))
            .collect();
        let edge_normals: Vec<Vec3> = edges
            .iter()
            .map(|e| normalize(add(verts.normals[e.from as usize], verts.normals[e.to as usize])))
            .collect();

        // arrows
        let arrows = topology.arrows();
        let arrow_endpoint_from: Vec<Vec3> =
            arrows.iter().map(|a| vertices[a.from as usize]).collect();
        let arrow_endpoint_to: Vec<Vec3> = arrows.iter().map(|a| vertices[a.to as usize]).collect();
        let arrow_midpoints: Vec<Vec3> = izip!(&arrow_endpoint_from, &arrow_endpoint_to)
            .map(|(&a, &b)| midpoint(a, b))
            .collect();
        let arrow_offsets: Vec<Vec3> = izip!(&arrow_endpoint_from, &arrow_endpoint_to)
            .map(|(&from, &to)| sub(to, from))
            .collect();
        let arrow_lengths: Vec<f64> = arrow_offsets.iter().map(|&o| norm(o)).collect();
        let arrow_normals: Vec<Vec3> = arrows
            .iter()
            .map(|a| normalize(add(verts.normals[a.from as usize], verts.normals[a.to as usize])))
            .collect();

        let duals = arrow_duals(
            topology,
            &faces.midpoints,
            &arrow_endpoint_from,
            &arrow_midpoints,
            &arrow_offsets,
            &arrow_normals,
        );

        let mut vertex_dual_areas = vec![0.0; vertices.len()];
        for (arrow, &area) in arrows.iter().zip(&duals.areas) {
            vertex_dual_areas[arrow.from as usize] += area;
        }

        MetricCache {
            mesh_centroid,

            face_average_area: average(&faces.areas),
            face_endpoint_a: faces.endpoint_a,
            face_endpoint_b: faces.endpoint_b,
            face_endpoint_c: faces.endpoint_c,
            face_midpoints: faces.midpoints,
            face_normals: faces.normals,
            face_areas: faces.areas,

            vertex_positions: vertices.to_vec(),
            vertex_average_area: average(&verts.areas),
            vertex_normals: verts.normals,
            vertex_areas: verts.areas,
            vertex_dual_areas,
            vertex_neighbor_counts: topology.vertex_neighbor_counts(),

            edge_average_length: average(&edge_lengths),
            edge_endpoint_a,
            edge_endpoint_b,
            edge_midpoints,
            edge_lengths,
            edge_normals,

            arrow_average_length: average(&arrow_lengths),
            arrow_endpoint_from,
            arrow_endpoint_to,
            arrow_midpoints,
            arrow_offsets,
            arrow_lengths,
            arrow_normals,

            arrow_dual_endpoint_a: duals.endpoint_a,
            arrow_dual_endpoint_b: duals.endpoint_b,
            arrow_dual_lengths: duals.lengths,
            arrow_dual_normals: duals.normals,
            arrow_dual_areas: duals.areas,
        }
    }

    /// Sum of all face areas.
    pub fn total_area(&self) -> f64 {
        self.face_areas.iter().sum()
    }

    /// Sum of all vertex dual areas.
    pub fn total_dual_area(&self) -> f64 {
        self.vertex_dual_areas.iter().sum()
    }
}

fn average(values: &[f64]) -> f64 {
    if values.is_empty() {
        0.0
    } else {
        values.iter().sum::<f64>() / values.len() as f64
    }
}

fn face_metrics(
    vertices: &[Vec3],
    face_vertex_ids: &[[u32; 3]],
    mesh_centroid: Vec3,
    orientation: NormalOrientation,
) -> FaceMetrics {
    let n = face_vertex_ids.len();
    let mut out = FaceMetrics {
        endpoint_a: Vec::with_capacity(n),
        endpoint_b: Vec::with_capacity(n),
        endpoint_c: Vec::with_capacity(n),
        midpoints: Vec::with_capacity(n),
        normals: Vec::with_capacity(n),
        areas: Vec::with_capacity(n),
    };
    let mut zero_area = 0usize;

    for ids in face_vertex_ids {
        let a = vertices[ids[0] as usize];
        let b = vertices[ids[1] as usize];
        let c = vertices[ids[2] as usize];
        let mid = scale(add(add(a, b), c), 1.0 / 3.0);

        // |cross| is the parallelogram area; the triangle is half of it
        let raw = cross(sub(c, b), sub(a, b));
        let area = norm(raw) / 2.0;
        if area == 0.0 {
            zero_area += 1;
        }

        let mut normal = normalize(raw);
        let reference = match orientation {
            NormalOrientation::Centroid => Some(sub(mid, mesh_centroid)),
            NormalOrientation::Origin => Some(mid),
            NormalOrientation::Winding => None,
        };
        if let Some(r) = reference {
            if dot(normal, r) < 0.0 {
                normal = scale(normal, -1.0);
            }
        }

        out.endpoint_a.push(a);
        out.endpoint_b.push(b);
        out.endpoint_c.push(c);
        out.midpoints.push(mid);
        out.normals.push(normal);
        out.areas.push(area);
    }

    if zero_area > 0 {
        log::warn!("{zero_area} of {n} faces have zero area");
    }
    out
}

fn vertex_metrics(
    vertex_count: usize,
    face_vertex_ids: &[[u32; 3]],
    faces: &FaceMetrics,
) -> VertexMetrics {
    let mut areas = vec![0.0; vertex_count];
    let mut normals = vec![ZERO; vertex_count];
    for (ids, &area, &normal) in izip!(face_vertex_ids, &faces.areas, &faces.normals) {
        let weighted = scale(normal, area);
        for &v in ids {
            let v = v as usize;
            areas[v] += area / 3.0;
            normals[v] = add(normals[v], weighted);
        }
    }
    for n in &mut normals {
        *n = normalize(*n);
    }
    VertexMetrics { normals, areas }
}

fn arrow_duals(
    topology: &Topology,
    face_midpoints: &[Vec3],
    arrow_endpoint_from: &[Vec3],
    arrow_midpoints: &[Vec3],
    arrow_offsets: &[Vec3],
    arrow_normals: &[Vec3],
) -> ArrowDuals {
    let n = topology.arrow_count();
    let mut out = ArrowDuals {
        endpoint_a: Vec::with_capacity(n),
        endpoint_b: Vec::with_capacity(n),
        lengths: Vec::with_capacity(n),
        normals: Vec::with_capacity(n),
        areas: Vec::with_capacity(n),
    };

    for (faces, &from, &mid, &offset, &normal) in izip!(
        topology.arrow_faces(),
        arrow_endpoint_from,
        arrow_midpoints,
        arrow_offsets,
        arrow_normals
    ) {
        let Some((fa, fb)) = faces.pair() else {
            out.endpoint_a.push(mid);
            out.endpoint_b.push(mid);
            out.lengths.push(0.0);
            out.normals.push(ZERO);
            out.areas.push(0.0);
            continue;
        };
        let a = face_midpoints[fa as usize];
        let b = face_midpoints[fb as usize];

        let mut dual_normal = normalize(cross(sub(b, a), normal));
        if dot(dual_normal, offset) < 0.0 {
            dual_normal = scale(dual_normal, -1.0);
        }

        out.endpoint_a.push(a);
        out.endpoint_b.push(b);
        out.lengths.push(distance(a, b));
        out.normals.push(dual_normal);
        out.areas.push(norm(cross(sub(a, from), sub(b, from))) / 2.0);
    }

    let collapsed = topology
        .arrow_faces()
        .iter()
        .filter(|f| !f.is_pair())
        .count();
    if collapsed > 0 {
        log::warn!("{collapsed} of {n} arrows lack two incident faces; their duals are collapsed");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::topology::builder::build_topology;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-12
    }

    fn octahedron() -> (Vec<Vec3>, Vec<[u32; 3]>) {
        let v = vec![
            [1.0, 0.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, -1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, -1.0],
        ];
        let f = vec![
            [0, 2, 4],
            [2, 1, 4],
            [1, 3, 4],
            [3, 0, 4],
            [2, 0, 5],
            [1, 2, 5],
            [3, 1, 5],
            [0, 3, 5],
        ];
        (v, f)
    }

    fn cache(v: &[Vec3], f: &[[u32; 3]]) -> MetricCache {
        let t = build_topology(v.len(), f);
        MetricCache::new(v, &t, NormalOrientation::Centroid)
    }

    #[test]
    fn triangle_area_and_normal() {
        let v = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let m = cache(&v, &[[0, 1, 2]]);
        assert!(approx(m.face_areas[0], 0.5));
        // coplanar with the centroid: the winding normal is kept
        assert_eq!(m.face_normals[0], [0.0, 0.0, 1.0]);
        assert!(approx(m.vertex_areas.iter().sum::<f64>(), 0.5));
    }

    #[test]
    fn octahedron_normals_point_outward() {
        let (v, f) = octahedron();
        let m = cache(&v, &f);
        for (n, mid) in m.face_normals.iter().zip(&m.face_midpoints) {
            assert!(dot(*n, *mid) > 0.0);
            assert!(approx(norm(*n), 1.0));
        }
        for (n, p) in m.vertex_normals.iter().zip(&m.vertex_positions) {
            assert!(approx(dot(*n, *p), 1.0));
        }
    }

    #[test]
    fn winding_orientation_keeps_inward_normals() {
        let (v, mut f) = octahedron();
        for face in &mut f {
            face.swap(1, 2);
        }
        let t = build_topology(v.len(), &f);
        let m = MetricCache::new(&v, &t, NormalOrientation::Winding);
        assert!(m.face_normals.iter().zip(&m.face_midpoints).all(|(n, c)| dot(*n, *c) < 0.0));
        let m = MetricCache::new(&v, &t, NormalOrientation::Origin);
        assert!(m.face_normals.iter().zip(&m.face_midpoints).all(|(n, c)| dot(*n, *c) > 0.0));
    }

    #[test]
    fn dual_normals_follow_arrow_offsets() {
        let (v, f) = octahedron();
        let m = cache(&v, &f);
        for (dn, off) in m.arrow_dual_normals.iter().zip(&m.arrow_offsets) {
            assert!(dot(*dn, *off) > 0.0);
            assert!(approx(norm(*dn), 1.0));
        }
    }

    #[test]
    fn dual_areas_sum_slices() {
        let (v, f) = octahedron();
        let t = build_topology(v.len(), &f);
        let m = MetricCache::new(&v, &t, NormalOrientation::Centroid);
        let mut sums = vec![0.0; v.len()];
        for (a, &area) in t.arrows().iter().zip(&m.arrow_dual_areas) {
            sums[a.from as usize] += area;
        }
        for (s, d) in sums.iter().zip(&m.vertex_dual_areas) {
            assert!(approx(*s, *d));
        }
        // every octahedron vertex is equivalent
        assert!(m.vertex_dual_areas.iter().all(|&d| approx(d, m.vertex_dual_areas[0])));
    }

    #[test]
    fn averages() {
        let (v, f) = octahedron();
        let m = cache(&v, &f);
        let side = 2f64.sqrt();
        assert!(approx(m.edge_average_length, side));
        assert!(approx(m.arrow_average_length, side));
        assert!(approx(m.face_average_area, 3f64.sqrt() / 4.0 * side * side));
        assert!(approx(m.vertex_average_area, m.total_area() / 6.0));
    }

    #[test]
    fn boundary_arrows_have_collapsed_duals() {
        let v = [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]];
        let m = cache(&v, &[[0, 1, 2]]);
        assert!(m.arrow_dual_lengths.iter().all(|&l| l == 0.0));
        assert!(m.arrow_dual_normals.iter().all(|&n| n == ZERO));
        assert!(m.vertex_dual_areas.iter().all(|&a| a == 0.0));
        assert_eq!(m.arrow_dual_endpoint_a, m.arrow_midpoints);
    }
}
