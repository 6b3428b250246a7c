//! Reference mesh generators: platonic solids, subdivided spheres, and flat
//! lattices for exercising grids with known geometry.

use std::collections::BTreeMap;

use crate::geometry::vector::{Vec3, midpoint, normalize};
use crate::mesh::Mesh;
use crate::mesh_error::MeshGridError;

type MeshGenResult = Result<Mesh, MeshGridError>;

fn invalid_geometry(message: impl Into<String>) -> MeshGridError {
    MeshGridError::InvalidGeometry(message.into())
}

/// Regular tetrahedron inscribed in the unit sphere.
pub fn tetrahedron() -> Mesh {
    let s = 1.0 / 3f64.sqrt();
    Mesh::new(
        vec![[s, s, s], [s, -s, -s], [-s, s, -s], [-s, -s, s]],
        vec![[0, 2, 1], [0, 1, 3], [0, 3, 2], [1, 2, 3]],
    )
}

/// Unit octahedron with a vertex on each coordinate half-axis.
pub fn octahedron() -> Mesh {
    Mesh::new(
        vec![
            [1.0, 0.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, -1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, -1.0],
        ],
        vec![
            [0, 2, 4],
            [2, 1, 4],
            [1, 3, 4],
            [3, 0, 4],
            [2, 0, 5],
            [1, 2, 5],
            [3, 1, 5],
            [0, 3, 5],
        ],
    )
}

/// Regular icosahedron inscribed in the unit sphere.
pub fn icosahedron() -> Mesh {
    let t = (1.0 + 5f64.sqrt()) / 2.0;
    let vertices = [
        [-1.0, t, 0.0],
        [1.0, t, 0.0],
        [-1.0, -t, 0.0],
        [1.0, -t, 0.0],
        [0.0, -1.0, t],
        [0.0, 1.0, t],
        [0.0, -1.0, -t],
        [0.0, 1.0, -t],
        [t, 0.0, -1.0],
        [t, 0.0, 1.0],
        [-t, 0.0, -1.0],
        [-t, 0.0, 1.0],
    ]
    .into_iter()
    .map(normalize)
    .collect();
    let faces = vec![
        [0, 11, 5],
        [0, 5, 1],
        [0, 1, 7],
        [0, 7, 10],
        [0, 10, 11],
        [1, 5, 9],
        [5, 11, 4],
        [11, 10, 2],
        [10, 7, 6],
        [7, 1, 8],
        [3, 9, 4],
        [3, 4, 2],
        [3, 2, 6],
        [3, 6, 8],
        [3, 8, 9],
        [4, 9, 5],
        [2, 4, 11],
        [6, 2, 10],
        [8, 6, 7],
        [9, 8, 1],
    ];
    Mesh::new(vertices, faces)
}

/// Split every face into four, projecting the new edge midpoints onto the
/// unit sphere. Shared edges get one midpoint.
pub fn subdivide(mesh: &Mesh) -> Mesh {
    let mut vertices = mesh.vertices.clone();
    let mut midpoints: BTreeMap<(u32, u32), u32> = BTreeMap::new();
    let mut split = |a: u32, b: u32, vertices: &mut Vec<Vec3>| -> u32 {
        *midpoints.entry((a.min(b), a.max(b))).or_insert_with(|| {
            let p = normalize(midpoint(vertices[a as usize], vertices[b as usize]));
            vertices.push(p);
            (vertices.len() - 1) as u32
        })
    };

    let mut faces = Vec::with_capacity(4 * mesh.faces.len());
    for &[a, b, c] in &mesh.faces {
        let ab = split(a, b, &mut vertices);
        let bc = split(b, c, &mut vertices);
        let ca = split(c, a, &mut vertices);
        faces.extend([[a, ab, ca], [b, bc, ab], [c, ca, bc], [ab, bc, ca]]);
    }
    Mesh::new(vertices, faces)
}

/// Icosahedron subdivided `level` times: `10 * 4^level + 2` vertices.
pub fn icosphere(level: usize) -> Mesh {
    (0..level).fold(icosahedron(), |mesh, _| subdivide(&mesh))
}

/// Latitude/longitude sphere of radius 1 with `n_lat` bands and `n_lon`
/// meridians; strongly anisotropic near the poles.
pub fn uv_sphere(n_lat: usize, n_lon: usize) -> MeshGenResult {
    if n_lat < 2 || n_lon < 3 {
        return Err(invalid_geometry("uv sphere requires n_lat >= 2 and n_lon >= 3"));
    }

    let mut vertices = vec![[0.0, 0.0, 1.0]];
    let mut rings: Vec<Vec<u32>> = Vec::with_capacity(n_lat - 1);
    for lat in 1..n_lat {
        let theta = std::f64::consts::PI * lat as f64 / n_lat as f64;
        let ring = (0..n_lon)
            .map(|lon| {
                let phi = std::f64::consts::TAU * lon as f64 / n_lon as f64;
                vertices.push([theta.sin() * phi.cos(), theta.sin() * phi.sin(), theta.cos()]);
                (vertices.len() - 1) as u32
            })
            .collect();
        rings.push(ring);
    }
    let bottom = vertices.len() as u32;
    vertices.push([0.0, 0.0, -1.0]);

    let mut faces = Vec::new();
    let first = &rings[0];
    let last = &rings[rings.len() - 1];
    for lon in 0..n_lon {
        let next = (lon + 1) % n_lon;
        faces.push([0, first[lon], first[next]]);
        faces.push([last[lon], bottom, last[next]]);
    }
    for band in rings.windows(2) {
        let (a, b) = (&band[0], &band[1]);
        for lon in 0..n_lon {
            let next = (lon + 1) % n_lon;
            faces.push([a[lon], b[lon], b[next]]);
            faces.push([a[lon], b[next], a[next]]);
        }
    }
    Ok(Mesh::new(vertices, faces))
}

/// Apex at the origin surrounded by north, east, south and west points:
/// 5 vertices, 4 faces, 8 edges. An open fan, all faces wound to +z.
pub fn diamond() -> Mesh {
    Mesh::new(
        vec![
            [0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, -1.0, 0.0],
            [-1.0, 0.0, 0.0],
        ],
        vec![[0, 2, 1], [0, 3, 2], [0, 4, 3], [0, 1, 4]],
    )
}

/// Flat equilateral lattice in the z = 0 plane with `rows × cols` vertices,
/// neighbor distance `spacing`, odd rows shifted by half a spacing. All
/// faces are wound to +z. Interior vertices have six neighbors.
pub fn triangular_lattice(rows: usize, cols: usize, spacing: f64) -> MeshGenResult {
    if rows < 2 || cols < 2 {
        return Err(invalid_geometry(
            "triangular lattice requires at least 2 rows and 2 columns",
        ));
    }
    if !(spacing.is_finite() && spacing > 0.0) {
        return Err(invalid_geometry("lattice spacing must be positive and finite"));
    }

    let row_height = spacing * 3f64.sqrt() / 2.0;
    let mut vertices = Vec::with_capacity(rows * cols);
    for r in 0..rows {
        let shift = if r % 2 == 1 { spacing / 2.0 } else { 0.0 };
        for c in 0..cols {
            vertices.push([c as f64 * spacing + shift, r as f64 * row_height, 0.0]);
        }
    }

    let idx = |r: usize, c: usize| (r * cols + c) as u32;
    let mut faces = Vec::with_capacity(2 * (rows - 1) * (cols - 1));
    for r in 0..rows - 1 {
        for c in 0..cols - 1 {
            if r % 2 == 0 {
                faces.push([idx(r, c), idx(r, c + 1), idx(r + 1, c)]);
                faces.push([idx(r, c + 1), idx(r + 1, c + 1), idx(r + 1, c)]);
            } else {
                faces.push([idx(r, c), idx(r + 1, c + 1), idx(r + 1, c)]);
                faces.push([idx(r, c), idx(r, c + 1), idx(r + 1, c + 1)]);
            }
        }
    }
    Ok(Mesh::new(vertices, faces))
}
