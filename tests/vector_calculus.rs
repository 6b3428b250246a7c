mod util;

use mesh_grid::algs::vector_calculus::{curl_into, divergence_into, gradient_into, laplacian_into};
use mesh_grid::prelude::*;
use rand::Rng;
use util::{assert_close, assert_vec_close, grid, interior_vertices, rng};

fn lattice() -> Grid {
    grid(&meshgen::triangular_lattice(6, 7, 0.5).unwrap())
}

#[test]
fn linear_gradient_on_a_lattice() {
    let g = lattice();
    let field: Vec<f64> = g
        .vertex_positions()
        .iter()
        .map(|p| 3.0 * p[0] + p[1])
        .collect();
    let grad = gradient(&g, &field);
    for v in interior_vertices(&g) {
        assert_vec_close(grad[v], [6.0, 2.0, 0.0], 1e-9, "grad(3x + y)");
    }
}

#[test]
fn linear_divergence_and_curl_on_a_lattice() {
    let g = lattice();
    let radial: Vec<Vec3> = g
        .vertex_positions()
        .iter()
        .map(|p| [p[0], p[1], 0.0])
        .collect();
    let swirl: Vec<Vec3> = g
        .vertex_positions()
        .iter()
        .map(|p| [-p[1], p[0], 0.0])
        .collect();
    let div = divergence(&g, &radial);
    let rot = curl(&g, &swirl);
    let div_swirl = divergence(&g, &swirl);
    for v in interior_vertices(&g) {
        assert_close(div[v], 4.0, 1e-9, "div(x, y, 0)");
        assert_vec_close(rot[v], [0.0, 0.0, -4.0], 1e-9, "curl(-y, x, 0)");
        assert_close(div_swirl[v], 0.0, 1e-9, "div(-y, x, 0)");
    }
}

#[test]
fn quadratic_laplacian_is_exact_on_a_lattice() {
    let g = lattice();
    let scalar: Vec<f64> = g
        .vertex_positions()
        .iter()
        .map(|p| p[0] * p[0] + p[1] * p[1])
        .collect();
    let vector: Vec<Vec3> = g
        .vertex_positions()
        .iter()
        .map(|p| [p[0] * p[0], 3.0 * p[1] * p[1], p[0]])
        .collect();
    let lap = laplacian(&g, &scalar);
    let vlap = laplacian(&g, &vector);
    for v in interior_vertices(&g) {
        assert_close(lap[v], 4.0, 1e-9, "lap(x^2 + y^2)");
        assert_vec_close(vlap[v], [2.0, 6.0, 0.0], 1e-9, "vector laplacian");
    }
}

#[test]
fn gradient_then_gradient_again_is_bit_identical() {
    let g = grid(&meshgen::diamond());
    let field = [1.0, 2.0, 3.0, 4.0, 5.0];
    let first = gradient(&g, &field);
    let second = gradient(&g, &field);
    assert_eq!(first, second);
}

#[test]
fn all_operators_are_deterministic() {
    let g = grid(&meshgen::icosphere(2));
    let mut r = rng(7);
    let scalar: Vec<f64> = (0..g.vertex_count())
        .map(|_| r.gen_range(-5.0..5.0))
        .collect();
    let vector: Vec<Vec3> = (0..g.vertex_count())
        .map(|_| [r.gen_range(-1.0..1.0), r.gen_range(-1.0..1.0), r.gen_range(-1.0..1.0)])
        .collect();
    assert_eq!(gradient(&g, &scalar), gradient(&g, &scalar));
    assert_eq!(divergence(&g, &vector), divergence(&g, &vector));
    assert_eq!(curl(&g, &vector), curl(&g, &vector));
    assert_eq!(laplacian(&g, &scalar), laplacian(&g, &scalar));
    assert_eq!(laplacian(&g, &vector), laplacian(&g, &vector));
}

#[test]
fn scratch_forms_match_allocating_forms() {
    let g = grid(&meshgen::icosphere(1));
    let (n, a) = (g.vertex_count(), g.arrow_count());
    let scalar: Vec<f64> = g
        .vertex_positions()
        .iter()
        .map(|p| p[0] * p[1] + p[2])
        .collect();
    let vector: Vec<Vec3> = g
        .vertex_positions()
        .iter()
        .map(|p| [p[1], -p[0], p[2] * p[2]])
        .collect();

    let mut ds = vec![0.0; a];
    let mut dv = vec![[0.0; 3]; a];
    let mut fs = vec![0.0; a];
    let mut fv = vec![[0.0; 3]; a];

    let mut grad = vec![[0.0; 3]; n];
    gradient_into(&g, &scalar, &mut ds, &mut fv, &mut grad);
    assert_eq!(grad, gradient(&g, &scalar));

    let mut div = vec![0.0; n];
    divergence_into(&g, &vector, &mut dv, &mut fs, &mut div);
    assert_eq!(div, divergence(&g, &vector));

    let mut rot = vec![[0.0; 3]; n];
    curl_into(&g, &vector, &mut dv, &mut rot);
    assert_eq!(rot, curl(&g, &vector));

    let mut lap = vec![0.0; n];
    laplacian_into(&g, &scalar, &mut ds, &mut lap);
    assert_eq!(lap, laplacian(&g, &scalar));
}

#[test]
fn gradient_of_height_is_tangential_on_the_sphere() {
    let g = grid(&meshgen::icosphere(2));
    let z: Vec<f64> = g.vertex_positions().iter().map(|p| p[2]).collect();
    let grad = gradient(&g, &z);
    for (gr, p) in grad.iter().zip(g.vertex_positions()) {
        // twice the surface gradient of z on the unit sphere: 2 (e_z - z p)
        let expected = [-2.0 * p[2] * p[0], -2.0 * p[2] * p[1], 2.0 * (1.0 - p[2] * p[2])];
        assert_vec_close(*gr, expected, 0.3, "gradient of z");
    }
}

#[test]
fn divergence_of_position_on_the_sphere_is_about_four() {
    let g = grid(&meshgen::icosphere(2));
    let div = divergence(&g, g.vertex_positions());
    for d in div {
        assert!((3.8..4.7).contains(&d), "div(r) = {d}");
    }
}

#[test]
fn product_rule_holds_approximately() {
    let g = grid(&meshgen::icosphere(2));
    let a: Vec<f64> = g.vertex_positions().iter().map(|p| p[0] + 2.0).collect();
    let b: Vec<f64> = g
        .vertex_positions()
        .iter()
        .map(|p| p[1] * p[2] + 3.0)
        .collect();
    let ab: Vec<f64> = a.iter().zip(&b).map(|(x, y)| x * y).collect();
    let lhs = gradient(&g, &ab);
    let ga = gradient(&g, &a);
    let gb = gradient(&g, &b);
    for v in 0..g.vertex_count() {
        let rhs = [
            a[v] * gb[v][0] + b[v] * ga[v][0],
            a[v] * gb[v][1] + b[v] * ga[v][1],
            a[v] * gb[v][2] + b[v] * ga[v][2],
        ];
        assert_vec_close(lhs[v], rhs, 0.2, "product rule");
    }
}

#[test]
fn laplacian_conserves_on_closed_meshes() {
    for mesh in [meshgen::icosphere(2), meshgen::uv_sphere(8, 12).unwrap()] {
        let g = grid(&mesh);
        let mut r = rng(11);
        let field: Vec<f64> = (0..g.vertex_count())
            .map(|_| r.gen_range(-1.0..1.0))
            .collect();
        let lap = laplacian(&g, &field);
        let total: f64 = lap
            .iter()
            .zip(&g.metrics().vertex_dual_areas)
            .map(|(l, a)| l * a)
            .sum();
        let scale: f64 = lap
            .iter()
            .zip(&g.metrics().vertex_dual_areas)
            .map(|(l, a)| (l * a).abs())
            .sum();
        assert!(total.abs() <= 1e-10 * scale.max(1.0), "net flux {total}");
    }
}

#[test]
fn constant_fields_have_vanishing_derivatives() {
    let g = grid(&meshgen::icosphere(1));
    let c = vec![2.5; g.vertex_count()];
    let cv = vec![[1.0, -2.0, 0.5]; g.vertex_count()];
    assert!(gradient(&g, &c).iter().all(|v| *v == [0.0; 3]));
    assert!(laplacian(&g, &c).iter().all(|v| *v == 0.0));
    assert!(divergence(&g, &cv).iter().all(|v| *v == 0.0));
    assert!(curl(&g, &cv).iter().all(|v| *v == [0.0; 3]));
}

#[test]
fn raster_methods_delegate_to_the_operators() {
    let g = grid(&meshgen::icosphere(1));
    let height = Raster::from_fn(&g, Mapping::Cell, |v| g.vertex_positions()[v][2]);
    let slope = height.gradient();
    assert_eq!(slope.as_slice(), gradient(&g, height.as_slice()).as_slice());
    assert_eq!(slope.divergence().as_slice(), divergence(&g, slope.as_slice()).as_slice());
    assert_eq!(slope.curl().as_slice(), curl(&g, slope.as_slice()).as_slice());
    assert_eq!(height.laplacian().into_vec(), laplacian(&g, height.as_slice()));
}

#[test]
#[should_panic(expected = "per-vertex raster")]
fn arrow_rasters_have_no_gradient() {
    let g = grid(&meshgen::octahedron());
    let r = Raster::filled(&g, Mapping::Arrow, 1.0);
    let _ = r.gradient();
}
