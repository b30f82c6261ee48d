//! Core 4D types: hyperplanes, polygons, triangles, meshes, edge polylines.

use nalgebra::{Point4, Vector4};

use super::cfg::BASIS_EPS;
use super::frame::PlanarFrame;
use crate::error::{Error, Result};

/// Hyperplane `n · x = c` in R^4 with unit normal `n`.
///
/// Invariants:
/// - `n` has unit length (enforced by `through`).
/// - Signed distance is `n·x − c`, positive on the side `n` points to.
#[derive(Clone, Copy, Debug)]
pub struct Hyperplane4 {
    pub n: Vector4<f64>,
    pub c: f64,
}

impl Hyperplane4 {
    /// Hyperplane through `p` orthogonal to `normal`; `None` if `normal` is ~0.
    #[inline]
    pub fn through(p: &Point4<f64>, normal: &Vector4<f64>) -> Option<Self> {
        let n = normal.try_normalize(BASIS_EPS)?;
        Some(Self {
            n,
            c: n.dot(&p.coords),
        })
    }
    #[inline]
    pub fn signed_distance(&self, p: &Point4<f64>) -> f64 {
        self.n.dot(&p.coords) - self.c
    }
    /// Orthogonal projection of `p` onto the hyperplane.
    #[inline]
    pub fn project(&self, p: &Point4<f64>) -> Point4<f64> {
        *p - self.n * self.signed_distance(p)
    }
}

/// Planar polygon in R^4, implicitly closed (last vertex connects to first).
///
/// Invariants:
/// - At least 3 vertices (checked by `new`).
/// - Vertices are assumed coplanar with the plane through vertices 0, 1, 2; this
///   is not enforced (see `planarity_residual`).
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon4 {
    vertices: Vec<Point4<f64>>,
}

impl Polygon4 {
    pub fn new(vertices: Vec<Point4<f64>>) -> Result<Self> {
        if vertices.len() < 3 {
            return Err(Error::DegeneratePolygon(format!(
                "{} vertices, need at least 3",
                vertices.len()
            )));
        }
        Ok(Self { vertices })
    }

    /// Fixture constructor; callers guarantee at least 3 vertices.
    pub(crate) fn new_unchecked(vertices: Vec<Point4<f64>>) -> Self {
        debug_assert!(vertices.len() >= 3);
        Self { vertices }
    }

    /// Convenience constructor from raw coordinate rows.
    pub fn from_coords(coords: &[[f64; 4]]) -> Result<Self> {
        Self::new(coords.iter().map(|c| Point4::from(*c)).collect())
    }

    #[inline]
    pub fn vertices(&self) -> &[Point4<f64>] {
        &self.vertices
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Closed boundary as consecutive `(start, end)` pairs, including last→first.
    pub fn boundary_edges(&self) -> impl Iterator<Item = (&Point4<f64>, &Point4<f64>)> + '_ {
        let n = self.vertices.len();
        (0..n).map(move |i| (&self.vertices[i], &self.vertices[(i + 1) % n]))
    }

    /// Vertex centroid (arithmetic mean).
    pub fn centroid(&self) -> Point4<f64> {
        let sum = self
            .vertices
            .iter()
            .fold(Vector4::zeros(), |acc, p| acc + p.coords);
        Point4::from(sum / self.vertices.len() as f64)
    }

    /// Largest distance of any vertex from the plane of `frame`.
    pub fn planarity_residual(&self, frame: &PlanarFrame) -> f64 {
        self.vertices
            .iter()
            .map(|p| (*p - frame.lift(&frame.project(p))).norm())
            .fold(0.0, f64::max)
    }
}

/// One mesh facet in R^4.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Triangle4 {
    pub vertices: [Point4<f64>; 3],
}

impl Triangle4 {
    #[inline]
    pub fn new(vertices: [Point4<f64>; 3]) -> Self {
        Self { vertices }
    }
    /// Area via the Gram determinant of the two edge vectors (valid in any dimension).
    pub fn area(&self) -> f64 {
        let a = self.vertices[1] - self.vertices[0];
        let b = self.vertices[2] - self.vertices[0];
        let gram = a.norm_squared() * b.norm_squared() - a.dot(&b).powi(2);
        0.5 * gram.max(0.0).sqrt()
    }
}

/// Straight RGB color, components in [0, 1].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }
    #[inline]
    pub const fn with_alpha(self, a: f32) -> Rgba {
        Rgba {
            r: self.r,
            g: self.g,
            b: self.b,
            a,
        }
    }
}

/// Straight (non-premultiplied) RGBA color.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rgba {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Rgba {
    /// Translucent blue used for faces that carry no material.
    pub const DEFAULT_FACE: Rgba = Rgba::new(0.0, 0.0, 1.0, 0.2);

    #[inline]
    pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self { r, g, b, a }
    }
    #[inline]
    pub fn to_array(self) -> [f32; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::DEFAULT_FACE
    }
}

/// Triangulated face: the refinement result of one input polygon.
#[derive(Clone, Debug, PartialEq)]
pub struct Mesh4 {
    pub triangles: Vec<Triangle4>,
    pub color: Rgba,
}

impl Mesh4 {
    pub fn area(&self) -> f64 {
        self.triangles.iter().map(Triangle4::area).sum()
    }
}

/// Wireframe polyline between two adjacent polytope vertices.
///
/// Invariants:
/// - At least 2 points; first is the adjacency start, last is its end (exactly).
#[derive(Clone, Debug, PartialEq)]
pub struct Edge4 {
    points: Vec<Point4<f64>>,
}

impl Edge4 {
    /// Polyline through `points`; `None` for fewer than 2 points.
    pub fn new(points: Vec<Point4<f64>>) -> Option<Self> {
        (points.len() >= 2).then_some(Self { points })
    }

    /// Single segment from `start` to `end`.
    pub fn between(start: Point4<f64>, end: Point4<f64>) -> Self {
        Self {
            points: vec![start, end],
        }
    }

    #[inline]
    pub fn points(&self) -> &[Point4<f64>] {
        &self.points
    }

    #[inline]
    pub fn start(&self) -> &Point4<f64> {
        &self.points[0]
    }
    #[inline]
    pub fn end(&self) -> &Point4<f64> {
        &self.points[self.points.len() - 1]
    }
    /// Number of line segments (`points.len() - 1`).
    #[inline]
    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }
    /// Consecutive point pairs, ready for line-list rendering.
    pub fn segments(&self) -> impl Iterator<Item = (&Point4<f64>, &Point4<f64>)> + '_ {
        self.points.windows(2).map(|w| (&w[0], &w[1]))
    }
}
