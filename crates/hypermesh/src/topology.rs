//! Topology extraction: unique vertices and edges across faces, edge subdivision.
//!
//! Purpose
//! - Faces of a polytope share vertices and edges by value. Rendering wants each
//!   vertex and each edge once, with edges cut into short segments.
//!
//! Invariants
//! - Points are compared through `VertexKey` (coordinates on a fixed grid); the
//!   first occurrence of each key is the representative.
//! - Output order is first-occurrence order over the face list, never hash order.
//! - Every `Edge4` starts exactly at its adjacency start and ends exactly at its end.

use std::collections::HashSet;

use nalgebra::Point4;

use crate::geom4::{Edge4, Polygon4, VertexKey};

/// How boundary adjacencies of different faces are identified.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgeKeying {
    /// `A→B` and `B→A` are the same edge; the first direction seen is kept.
    #[default]
    Undirected,
    /// `A→B` and `B→A` are distinct edges.
    Directed,
}

impl EdgeKeying {
    #[inline]
    fn key(self, a: VertexKey, b: VertexKey) -> (VertexKey, VertexKey) {
        match self {
            Self::Undirected if b < a => (b, a),
            _ => (a, b),
        }
    }
}

/// Every distinct polygon vertex, in first-occurrence order.
pub fn extract_vertices(polygons: &[Polygon4]) -> Vec<Point4<f64>> {
    let mut seen = HashSet::new();
    polygons
        .iter()
        .flat_map(|poly| poly.vertices().iter())
        .filter(|p| seen.insert(VertexKey::of(p)))
        .copied()
        .collect()
}

/// Distinct boundary adjacencies `(start, end)`, including each polygon's
/// closing edge, in first-occurrence order. Zero-length adjacencies are dropped.
pub fn unique_adjacencies(polygons: &[Polygon4], keying: EdgeKeying) -> Vec<(Point4<f64>, Point4<f64>)> {
    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for poly in polygons {
        for (p, q) in poly.boundary_edges() {
            let (kp, kq) = (VertexKey::of(p), VertexKey::of(q));
            if kp == kq {
                continue;
            }
            if seen.insert(keying.key(kp, kq)) {
                out.push((*p, *q));
            }
        }
    }
    out
}

/// Polyline from `start` to `end` with points every `split_every` along the way.
///
/// Points sit at distances `0, s, 2s, …` strictly below the segment length,
/// followed by `end` unless the last of them already equals it. A `split_every`
/// that is not finite and positive yields `[start, end]`.
pub fn subdivide_segment(start: &Point4<f64>, end: &Point4<f64>, split_every: f64) -> Edge4 {
    let d = end - start;
    let len = d.norm();
    if !(split_every.is_finite() && split_every > 0.0) || len <= split_every {
        return Edge4::between(*start, *end);
    }
    let dir = d / len;
    let mut points = vec![*start];
    // len > split_every, so at least one interior point follows `start`.
    let mut i = 1usize;
    loop {
        let t = i as f64 * split_every;
        if t >= len {
            break;
        }
        points.push(start + dir * t);
        i += 1;
    }
    if points.last() != Some(end) {
        points.push(*end);
    }
    Edge4::new(points).unwrap_or_else(|| Edge4::between(*start, *end))
}

/// Unique edges of the polytope, each subdivided by [`subdivide_segment`].
pub fn extract_edges(polygons: &[Polygon4], split_every: f64, keying: EdgeKeying) -> Vec<Edge4> {
    unique_adjacencies(polygons, keying)
        .iter()
        .map(|(p, q)| subdivide_segment(p, q, split_every))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom4::special;
    use approx::assert_relative_eq;

    fn edge_key(e: &Edge4) -> (VertexKey, VertexKey) {
        EdgeKeying::Undirected.key(VertexKey::of(e.start()), VertexKey::of(e.end()))
    }

    #[test]
    fn cube_has_eight_vertices_and_twelve_edges() {
        let cube = special::cube3(1.0);
        assert_eq!(extract_vertices(&cube).len(), 8);
        let edges = extract_edges(&cube, f64::INFINITY, EdgeKeying::Undirected);
        assert_eq!(edges.len(), 12);
        for e in &edges {
            assert_eq!(e.points().len(), 2);
            assert_relative_eq!((e.end() - e.start()).norm(), 2.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn directed_keying_lists_each_edge_at_most_twice() {
        let cube = special::cube3(1.0);
        let edges = extract_edges(&cube, 0.0, EdgeKeying::Directed);
        assert!(edges.len() >= 12 && edges.len() <= 24);
        let mut counts = std::collections::HashMap::new();
        for e in &edges {
            *counts.entry(edge_key(e)).or_insert(0) += 1;
        }
        assert_eq!(counts.len(), 12);
        assert!(counts.values().all(|&c| c <= 2));
    }

    #[test]
    fn vertices_keep_first_occurrence_order() {
        let a = Point4::new(0.0, 0.0, 0.0, 0.0);
        let b = Point4::new(1.0, 0.0, 0.0, 0.0);
        let c = Point4::new(0.0, 1.0, 0.0, 0.0);
        let d = Point4::new(1.0, 1.0, 0.0, 0.0);
        let polys = [
            Polygon4::new(vec![a, b, c]).unwrap(),
            Polygon4::new(vec![c, b, d]).unwrap(),
        ];
        assert_eq!(extract_vertices(&polys), vec![a, b, c, d]);
        let adj = unique_adjacencies(&polys, EdgeKeying::Undirected);
        assert_eq!(adj, vec![(a, b), (b, c), (c, a), (b, d), (d, c)]);
    }

    #[test]
    fn nearly_equal_points_collapse() {
        let a = Point4::new(0.3, 0.0, 0.0, 0.0);
        let a2 = Point4::new(0.1 + 0.2, 0.0, 0.0, 0.0);
        let b = Point4::new(1.0, 0.0, 0.0, 0.0);
        let c = Point4::new(0.0, 1.0, 0.0, 0.0);
        let polys = [
            Polygon4::new(vec![a, b, c]).unwrap(),
            Polygon4::new(vec![b, a2, c]).unwrap(),
        ];
        assert_eq!(extract_vertices(&polys).len(), 3);
        assert_eq!(extract_edges(&polys, 0.0, EdgeKeying::Undirected).len(), 3);
    }

    #[test]
    fn unit_edge_split_every_point_three() {
        let a = Point4::new(0.0, 0.0, 0.0, 0.0);
        let b = Point4::new(1.0, 0.0, 0.0, 0.0);
        let e = subdivide_segment(&a, &b, 0.3);
        let xs: Vec<f64> = e.points().iter().map(|p| p.x).collect();
        assert_eq!(xs.len(), 5);
        for (x, want) in xs.iter().zip([0.0, 0.3, 0.6, 0.9, 1.0]) {
            assert_relative_eq!(*x, want, epsilon = 1e-12);
        }
        assert_eq!(e.start(), &a);
        assert_eq!(e.end(), &b);
        assert_eq!(e.segment_count(), 4);
    }

    #[test]
    fn exact_multiple_does_not_repeat_the_end() {
        let a = Point4::new(0.0, 0.0, 0.0, 0.0);
        let b = Point4::new(0.0, 0.0, 0.0, 1.0);
        let e = subdivide_segment(&a, &b, 0.25);
        assert_eq!(e.points().len(), 5);
        assert_eq!(e.end(), &b);
    }

    #[test]
    fn non_positive_or_non_finite_split_disables_subdivision() {
        let a = Point4::new(0.0, 0.0, 0.0, 0.0);
        let b = Point4::new(3.0, 4.0, 0.0, 0.0);
        for s in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert_eq!(subdivide_segment(&a, &b, s).points(), &[a, b]);
        }
        assert_eq!(subdivide_segment(&a, &b, 10.0).points(), &[a, b]);
    }

    #[test]
    fn identical_points_give_no_edges() {
        let p = Point4::new(1.0, 1.0, 1.0, 1.0);
        let polys = [Polygon4::new(vec![p, p, p]).unwrap()];
        assert!(extract_edges(&polys, 0.1, EdgeKeying::Undirected).is_empty());
        assert_eq!(extract_vertices(&polys), vec![p]);
    }

    #[test]
    fn fixture_counts_match_euler_data() {
        for (faces, v, e) in [
            (special::tesseract(1.0), 16, 32),
            (special::simplex4(1.0), 5, 10),
            (special::house4(), 20, 40),
        ] {
            assert_eq!(extract_vertices(&faces).len(), v);
            assert_eq!(unique_adjacencies(&faces, EdgeKeying::Undirected).len(), e);
        }
    }

    #[test]
    fn edges_need_at_least_two_points() {
        let a = Point4::new(0.0, 0.0, 0.0, 0.0);
        let b = Point4::new(1.0, 0.0, 0.0, 0.0);
        assert!(Edge4::new(Vec::new()).is_none());
        assert!(Edge4::new(vec![a]).is_none());
        let e = Edge4::new(vec![a, b]).unwrap();
        assert_eq!((e.start(), e.end()), (&a, &b));
        assert_eq!(e.segment_count(), 1);
        assert_eq!(Edge4::between(a, b), e);
    }
}
