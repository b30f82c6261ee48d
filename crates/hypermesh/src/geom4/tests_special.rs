//! Smoke tests for the special polytope face lists.
//!
//! We assert counts, planarity and frame recovery per face, which is what the
//! pipeline relies on.

use super::{special, PlanarFrame, Polygon4};
use approx::assert_relative_eq;

fn all_faces_are_planar(faces: &[Polygon4]) {
    for (i, f) in faces.iter().enumerate() {
        let frame = PlanarFrame::from_polygon(f).unwrap_or_else(|e| panic!("face {i}: {e}"));
        assert!(f.planarity_residual(&frame) < 1e-12, "face {i} not planar");
    }
}

#[test]
fn tesseract_basic_props() {
    let faces = special::tesseract(1.0);
    assert_eq!(faces.len(), 24);
    assert!(faces.iter().all(|f| f.len() == 4));
    all_faces_are_planar(&faces);
    // Every face is a 2×2 square of the [-1, 1]^4 boundary.
    for f in &faces {
        let v = f.vertices();
        for (p, q) in f.boundary_edges() {
            assert_relative_eq!((q - p).norm(), 2.0, epsilon = 1e-12);
        }
        assert!(v.iter().all(|p| p.iter().all(|c| c.abs() == 1.0)));
    }
}

#[test]
fn tesseract_first_face_matches_reference_ordering() {
    let faces = special::tesseract(1.0);
    let want = [
        [-1.0, -1.0, -1.0, -1.0],
        [-1.0, -1.0, -1.0, 1.0],
        [-1.0, -1.0, 1.0, 1.0],
        [-1.0, -1.0, 1.0, -1.0],
    ];
    for (p, w) in faces[0].vertices().iter().zip(want) {
        assert_eq!(p.coords.as_slice(), &w);
    }
}

#[test]
fn cube_lives_in_w_zero() {
    let faces = special::cube3(0.5);
    assert_eq!(faces.len(), 6);
    all_faces_are_planar(&faces);
    assert!(faces.iter().flat_map(|f| f.vertices()).all(|p| p.w == 0.0));
}

#[test]
fn simplex_faces_are_triangles() {
    let faces = special::simplex4(1.0);
    assert_eq!(faces.len(), 10);
    assert!(faces.iter().all(|f| f.len() == 3));
    all_faces_are_planar(&faces);
}

#[test]
fn house_has_caps_and_sides() {
    let faces = special::house4();
    assert_eq!(faces.len(), 29);
    assert_eq!(faces.iter().filter(|f| f.len() == 5).count(), 4);
    all_faces_are_planar(&faces);
}
