use super::predicates::{max_edge_sq, min_angle_sin2, orient2d};
use super::*;
use crate::error::Error;
use approx::assert_relative_eq;
use nalgebra::Point2;

fn p(x: f64, y: f64) -> Point2<f64> {
    Point2::new(x, y)
}

fn unit_square() -> Vec<Point2<f64>> {
    vec![p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)]
}

fn l_shape() -> Vec<Point2<f64>> {
    vec![
        p(0.0, 0.0),
        p(2.0, 0.0),
        p(2.0, 1.0),
        p(1.0, 1.0),
        p(1.0, 2.0),
        p(0.0, 2.0),
    ]
}

fn total_area(tris: &[[Point2<f64>; 3]]) -> f64 {
    tris.iter().map(|[a, b, c]| 0.5 * orient2d(a, b, c)).sum()
}

#[test]
fn square_with_generous_bounds_keeps_two_triangles() {
    let tris = refine_polygon_2d(&unit_square(), &RefineCfg::new(0.125, 10.0)).unwrap();
    assert_eq!(tris.len(), 2);
    assert_relative_eq!(total_area(&tris), 1.0, epsilon = 1e-12);
}

#[test]
fn size_bound_forces_subdivision() {
    let tris = refine_polygon_2d(&unit_square(), &RefineCfg::new(0.125, 1.0)).unwrap();
    assert!(tris.len() > 2);
    for [a, b, c] in &tris {
        assert!(max_edge_sq(a, b, c) <= 1.0 + 1e-9);
    }
}

#[test]
fn refined_square_meets_both_quality_bounds() {
    let cfg = RefineCfg::new(0.125, 0.3);
    let r = refine(&unit_square(), &cfg).unwrap();
    assert!(!r.capped);
    assert!(r.steiner_points > 0);
    for [a, b, c] in &r.triangles {
        assert!(orient2d(a, b, c) > 0.0, "triangle not CCW");
        assert!(max_edge_sq(a, b, c) <= 0.09 + 1e-9);
        assert!(min_angle_sin2(a, b, c) >= 0.125 - 1e-9);
    }
    assert_relative_eq!(total_area(&r.triangles), 1.0, epsilon = 1e-9);
}

#[test]
fn non_convex_polygon_area_is_preserved() {
    let tris = refine_polygon_2d(&l_shape(), &RefineCfg::new(0.125, 0.25)).unwrap();
    assert_relative_eq!(total_area(&tris), 3.0, epsilon = 1e-9);
    // Nothing lands in the notch.
    for [a, b, c] in &tris {
        let g = p((a.x + b.x + c.x) / 3.0, (a.y + b.y + c.y) / 3.0);
        assert!(!(g.x > 1.0 && g.y > 1.0));
    }
}

#[test]
fn clockwise_input_yields_ccw_triangles() {
    let mut cw = unit_square();
    cw.reverse();
    let tris = refine_polygon_2d(&cw, &RefineCfg::new(0.125, 0.5)).unwrap();
    assert!(tris.iter().all(|[a, b, c]| orient2d(a, b, c) > 0.0));
    assert_relative_eq!(total_area(&tris), 1.0, epsilon = 1e-9);
}

#[test]
fn boundary_vertices_survive() {
    let input = l_shape();
    let tris = refine_polygon_2d(&input, &RefineCfg::default()).unwrap();
    for v in &input {
        assert!(tris.iter().flatten().any(|q| (q - v).norm() < 1e-12));
    }
}

#[test]
fn well_shaped_triangle_is_returned_as_is() {
    let input = [p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0)];
    let tris = refine_polygon_2d(&input, &RefineCfg::new(0.125, f64::INFINITY)).unwrap();
    assert_eq!(tris.len(), 1);
    for v in &input {
        assert!(tris[0].iter().any(|q| q == v));
    }
}

#[test]
fn collinear_boundary_points_are_kept() {
    let input = [p(0.0, 0.0), p(0.5, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)];
    let tris = refine_polygon_2d(&input, &RefineCfg::new(0.125, 10.0)).unwrap();
    assert!(tris.iter().flatten().any(|q| (q - p(0.5, 0.0)).norm() < 1e-12));
    assert_relative_eq!(total_area(&tris), 1.0, epsilon = 1e-12);
}

#[test]
fn duplicate_closing_vertex_is_ignored() {
    let mut input = unit_square();
    input.push(p(0.0, 0.0));
    let tris = refine_polygon_2d(&input, &RefineCfg::new(0.125, 10.0)).unwrap();
    assert_eq!(tris.len(), 2);
}

#[test]
fn degenerate_boundaries_are_rejected() {
    let cfg = RefineCfg::default();
    let collinear = [p(0.0, 0.0), p(1.0, 0.0), p(2.0, 0.0)];
    assert!(matches!(
        refine_polygon_2d(&collinear, &cfg),
        Err(Error::DegenerateProjection { .. })
    ));
    let too_few = [p(0.0, 0.0), p(1.0, 1.0)];
    assert!(matches!(
        refine_polygon_2d(&too_few, &cfg),
        Err(Error::DegenerateProjection { .. })
    ));
    let repeated = [p(1.0, 1.0), p(1.0, 1.0), p(1.0, 1.0)];
    assert!(matches!(
        refine_polygon_2d(&repeated, &cfg),
        Err(Error::DegenerateProjection { .. })
    ));
}

#[test]
fn invalid_quality_parameters_are_rejected() {
    let sq = unit_square();
    for cfg in [
        RefineCfg::new(0.0, 0.1),
        RefineCfg::new(-0.1, 0.1),
        RefineCfg::new(f64::NAN, 0.1),
        RefineCfg::new(0.125, 0.0),
        RefineCfg::new(0.125, -1.0),
        RefineCfg::new(0.125, f64::NAN),
    ] {
        assert!(matches!(
            refine_polygon_2d(&sq, &cfg),
            Err(Error::InvalidQualityParameters { .. })
        ));
    }
}

#[test]
fn refinement_is_deterministic() {
    let cfg = RefineCfg::new(0.125, 0.2);
    let a = refine_polygon_2d(&l_shape(), &cfg).unwrap();
    let b = refine_polygon_2d(&l_shape(), &cfg).unwrap();
    assert_eq!(a, b);
}

#[test]
fn uniform_scaling_gives_the_same_mesh_shape() {
    let s = 1024.0;
    let small = refine_polygon_2d(&l_shape(), &RefineCfg::new(0.125, 0.4)).unwrap();
    let big_input: Vec<Point2<f64>> = l_shape().iter().map(|q| p(q.x * s, q.y * s)).collect();
    let big = refine_polygon_2d(&big_input, &RefineCfg::new(0.125, 0.4 * s)).unwrap();
    assert_eq!(small.len(), big.len());
}

#[test]
fn steiner_cap_stops_refinement() {
    let cfg = RefineCfg {
        max_steiner: 5,
        ..RefineCfg::new(0.125, 0.01)
    };
    let r = refine(&unit_square(), &cfg).unwrap();
    assert!(r.capped);
    assert!(r.steiner_points >= 5);
    assert_relative_eq!(total_area(&r.triangles), 1.0, epsilon = 1e-9);
}

#[test]
fn size_bound_between_side_and_diagonal_still_subdivides() {
    // Sides 1.0 satisfy the bound; only the diagonal (≈1.414) violates it.
    let tris = refine_polygon_2d(&unit_square(), &RefineCfg::new(0.125, 1.2)).unwrap();
    assert!(tris.len() > 2);
    for [a, b, c] in &tris {
        assert!(max_edge_sq(a, b, c) <= 1.2 * 1.2 + 1e-12);
    }
    assert_relative_eq!(total_area(&tris), 1.0, epsilon = 1e-12);
}

#[test]
fn fine_size_bound_produces_thousands_of_quality_triangles() {
    let cfg = RefineCfg::new(0.125, 0.02);
    let r = refine(&unit_square(), &cfg).unwrap();
    assert!(!r.capped);
    // An equilateral triangle with side 0.02 covers ≈1.73e-4.
    assert!(r.triangles.len() > 5_000);
    for [a, b, c] in &r.triangles {
        assert!(orient2d(a, b, c) > 0.0);
        assert!(max_edge_sq(a, b, c) <= 0.02 * 0.02 + 1e-15);
        assert!(min_angle_sin2(a, b, c) >= 0.125 - 1e-9);
    }
    assert_relative_eq!(total_area(&r.triangles), 1.0, epsilon = 1e-9);
}
