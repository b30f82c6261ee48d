//! Planar frames: basis recovery for a face plane, projection to 2D and lifting back.
//!
//! A frame is an origin plus two orthonormal directions spanning the plane of a
//! polygon. `project` drops the off-plane component; `lift` is its inverse on the
//! plane. Callers only pass points they assume lie on the plane.

use nalgebra::{Matrix2x4, Matrix4x2, Point2, Point4, Vector4};

use super::cfg::{BASIS_EPS, COLLINEAR_EPS};
use super::types::{Hyperplane4, Polygon4};
use crate::error::{Error, Result};

/// Origin and orthonormal basis `{e1, e2}` of a 2-plane in R^4.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlanarFrame {
    pub origin: Point4<f64>,
    pub e1: Vector4<f64>,
    pub e2: Vector4<f64>,
}

impl PlanarFrame {
    /// Frame of the plane through `p0, p1, p2`, with origin `p0`.
    ///
    /// `e1` points from `p0` to `p1`. `e2` is the direction from `p0` to the
    /// projection of `p2` onto the hyperplane through `p0` orthogonal to `e1`.
    pub fn from_points(p0: &Point4<f64>, p1: &Point4<f64>, p2: &Point4<f64>) -> Result<Self> {
        let e1 = (p1 - p0).try_normalize(BASIS_EPS).ok_or_else(|| {
            Error::DegeneratePolygon("first two vertices coincide".to_string())
        })?;
        let hyperplane = Hyperplane4::through(p0, &e1).ok_or_else(|| {
            Error::DegeneratePolygon("first two vertices coincide".to_string())
        })?;
        let off_axis = hyperplane.project(p2) - p0;
        let span = (p2 - p0).norm();
        if span <= BASIS_EPS || off_axis.norm() <= COLLINEAR_EPS * span {
            return Err(Error::DegeneratePolygon(
                "third vertex is collinear with the first edge".to_string(),
            ));
        }
        let e2 = off_axis.normalize();
        Ok(Self {
            origin: *p0,
            e1,
            e2,
        })
    }

    /// Frame recovered from the first three vertices of `polygon`.
    pub fn from_polygon(polygon: &Polygon4) -> Result<Self> {
        let v = polygon.vertices();
        Self::from_points(&v[0], &v[1], &v[2])
    }

    #[inline]
    pub fn project(&self, p: &Point4<f64>) -> Point2<f64> {
        project(p, &self.origin, &self.e1, &self.e2)
    }

    #[inline]
    pub fn lift(&self, q: &Point2<f64>) -> Point4<f64> {
        lift(q.x, q.y, &self.origin, &self.e1, &self.e2)
    }

    /// Linear chart `(U, Uᵀ)`: `U` is 2×4 with rows `e1, e2`, so `y = U (x − o)`
    /// and `x = o + Uᵀ y` on the plane.
    pub fn chart(&self) -> (Matrix2x4<f64>, Matrix4x2<f64>) {
        let u = Matrix2x4::from_rows(&[self.e1.transpose(), self.e2.transpose()]);
        let ut = Matrix4x2::from_columns(&[self.e1, self.e2]);
        (u, ut)
    }
}

/// Plane coordinates `((p − o)·e1, (p − o)·e2)`.
#[inline]
pub fn project(
    point: &Point4<f64>,
    origin: &Point4<f64>,
    e1: &Vector4<f64>,
    e2: &Vector4<f64>,
) -> Point2<f64> {
    let d = point - origin;
    Point2::new(d.dot(e1), d.dot(e2))
}

/// Point `o + u·e1 + v·e2`.
#[inline]
pub fn lift(
    u: f64,
    v: f64,
    origin: &Point4<f64>,
    e1: &Vector4<f64>,
    e2: &Vector4<f64>,
) -> Point4<f64> {
    origin + e1 * u + e2 * v
}
