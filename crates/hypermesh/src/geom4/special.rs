//! Special polytopes as face lists, used in tests, benchmarks and the CLI.
//!
//! Purpose
//! - Provide canonical 2-face lists for common shapes: the tesseract, a 3-cube
//!   embedded in R^4, a right 4-simplex and a 4D "house" (prism over a gabled
//!   3D house).
//! - Keep constructors small and explicit so tests can rely on face order and
//!   vertex winding deterministically.
//!
//! Counts (V, E, F₂)
//! - tesseract: (16, 32, 24); cube3: (8, 12, 6); simplex4: (5, 10, 10);
//!   house4: (20, 40, 29).

use nalgebra::Point4;

use super::types::Polygon4;
use crate::topology::{unique_adjacencies, EdgeKeying};

/// Free-axis pairs in the order of the classic hardcoded tesseract table
/// (ffvv, fvfv, fvvf, vffv, vfvf, vvff).
const TESSERACT_FREE_AXES: [(usize, usize); 6] = [(2, 3), (1, 3), (1, 2), (0, 3), (0, 2), (0, 1)];
/// Square winding over the two free axes (false = low side, true = high side).
const SQUARE_WINDING: [(bool, bool); 4] = [(false, false), (false, true), (true, true), (true, false)];
const CORNERS: [(bool, bool); 4] = [(false, false), (false, true), (true, false), (true, true)];

/// The 24 square 2-faces of the hypercube `[-a, a]^4`.
pub fn tesseract(a: f64) -> Vec<Polygon4> {
    let coord = |hi: bool| if hi { a } else { -a };
    let mut faces = Vec::with_capacity(24);
    for (v1, v2) in TESSERACT_FREE_AXES {
        let fixed: Vec<usize> = (0..4).filter(|&k| k != v1 && k != v2).collect();
        for (h1, h2) in CORNERS {
            let vertices = SQUARE_WINDING
                .iter()
                .map(|&(w1, w2)| {
                    let mut c = [0.0; 4];
                    c[fixed[0]] = coord(h1);
                    c[fixed[1]] = coord(h2);
                    c[v1] = coord(w1);
                    c[v2] = coord(w2);
                    Point4::from(c)
                })
                .collect();
            faces.push(Polygon4::new_unchecked(vertices));
        }
    }
    faces
}

/// The 6 square faces of the cube `[-a, a]^3 × {0}`.
pub fn cube3(a: f64) -> Vec<Polygon4> {
    let coord = |hi: bool| if hi { a } else { -a };
    let mut faces = Vec::with_capacity(6);
    for fixed in 0..3 {
        let free: Vec<usize> = (0..3).filter(|&k| k != fixed).collect();
        for side in [false, true] {
            let vertices = SQUARE_WINDING
                .iter()
                .map(|&(w1, w2)| {
                    let mut c = [0.0; 4];
                    c[fixed] = coord(side);
                    c[free[0]] = coord(w1);
                    c[free[1]] = coord(w2);
                    Point4::from(c)
                })
                .collect();
            faces.push(Polygon4::new_unchecked(vertices));
        }
    }
    faces
}

/// The 10 triangular 2-faces of the simplex `conv{0, a·e1, a·e2, a·e3, a·e4}`.
pub fn simplex4(a: f64) -> Vec<Polygon4> {
    let mut verts = vec![Point4::origin()];
    for k in 0..4 {
        let mut c = [0.0; 4];
        c[k] = a;
        verts.push(Point4::from(c));
    }
    let mut faces = Vec::with_capacity(10);
    for i in 0..5 {
        for j in i + 1..5 {
            for k in j + 1..5 {
                faces.push(Polygon4::new_unchecked(vec![verts[i], verts[j], verts[k]]));
            }
        }
    }
    faces
}

/// Gabled 3D house (floor `y = -1`, eaves `y = 1`, ridge `y = 2` along z) as a
/// prism over `w ∈ [-1, 1]`: both caps plus one square per house edge.
pub fn house4() -> Vec<Polygon4> {
    let floor = [
        [-1.0, -1.0, -1.0],
        [1.0, -1.0, -1.0],
        [1.0, -1.0, 1.0],
        [-1.0, -1.0, 1.0],
    ];
    let eaves = [
        [-1.0, 1.0, -1.0],
        [1.0, 1.0, -1.0],
        [1.0, 1.0, 1.0],
        [-1.0, 1.0, 1.0],
    ];
    let ridge = [[0.0, 2.0, -1.0], [0.0, 2.0, 1.0]];
    let [b0, b1, b2, b3] = floor;
    let [t0, t1, t2, t3] = eaves;
    let [r0, r1] = ridge;
    let house: [Vec<[f64; 3]>; 7] = [
        vec![b0, b1, b2, b3],
        vec![b0, b3, t3, t0],
        vec![b1, t1, t2, b2],
        vec![b3, b2, t2, r1, t3],
        vec![b0, t0, r0, t1, b1],
        vec![t0, t3, r1, r0],
        vec![t1, r0, r1, t2],
    ];
    let at_w = |face: &[[f64; 3]], w: f64| {
        Polygon4::new_unchecked(face.iter().map(|p| Point4::new(p[0], p[1], p[2], w)).collect())
    };
    let low: Vec<Polygon4> = house.iter().map(|f| at_w(f.as_slice(), -1.0)).collect();
    let high: Vec<Polygon4> = house.iter().map(|f| at_w(f.as_slice(), 1.0)).collect();
    let sides: Vec<Polygon4> = unique_adjacencies(&low, EdgeKeying::Undirected)
        .into_iter()
        .map(|(p, q)| {
            let lift = |x: &Point4<f64>| Point4::new(x[0], x[1], x[2], 1.0);
            Polygon4::new_unchecked(vec![p, q, lift(&q), lift(&p)])
        })
        .collect();
    let mut faces = low;
    faces.extend(high);
    faces.extend(sides);
    faces
}
