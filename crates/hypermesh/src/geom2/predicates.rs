//! Floating-point geometric predicates and constructions in the plane.
//!
//! Signs follow the usual conventions: `orient2d > 0` for a left turn (CCW),
//! `in_circle > 0` when `d` is strictly inside the circumcircle of CCW `abc`.
//! Callers compare against scale-aware tolerances (`Tolerances`).

use nalgebra::Point2;

/// Twice the signed area of triangle `abc`.
#[inline]
pub fn orient2d(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    (b.x - a.x) * (c.y - a.y) - (b.y - a.y) * (c.x - a.x)
}

/// Incircle determinant; positive iff `d` lies inside the circle through CCW `a, b, c`.
pub fn in_circle(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>, d: &Point2<f64>) -> f64 {
    let (adx, ady) = (a.x - d.x, a.y - d.y);
    let (bdx, bdy) = (b.x - d.x, b.y - d.y);
    let (cdx, cdy) = (c.x - d.x, c.y - d.y);
    let ad = adx * adx + ady * ady;
    let bd = bdx * bdx + bdy * bdy;
    let cd = cdx * cdx + cdy * cdy;
    ad * (bdx * cdy - cdx * bdy) + bd * (cdx * ady - adx * cdy) + cd * (adx * bdy - bdx * ady)
}

/// Circumcenter of `abc`; `None` for (near) collinear input.
pub fn circumcenter(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> Option<Point2<f64>> {
    let (bx, by) = (b.x - a.x, b.y - a.y);
    let (cx, cy) = (c.x - a.x, c.y - a.y);
    let d = 2.0 * (bx * cy - by * cx);
    if d == 0.0 || !d.is_finite() {
        return None;
    }
    let b2 = bx * bx + by * by;
    let c2 = cx * cx + cy * cy;
    let ux = (cy * b2 - by * c2) / d;
    let uy = (bx * c2 - cx * b2) / d;
    let center = Point2::new(a.x + ux, a.y + uy);
    (center.x.is_finite() && center.y.is_finite()).then_some(center)
}

/// `true` if `p` lies strictly inside the diametral circle of segment `ab`
/// (the angle `apb` is obtuse), with relative slack `rel_eps`.
#[inline]
pub fn encroaches(p: &Point2<f64>, a: &Point2<f64>, b: &Point2<f64>, rel_eps: f64) -> bool {
    let dot = (a - p).dot(&(b - p));
    dot < -rel_eps * (b - a).norm_squared()
}

/// Shoelace signed area of a closed polygon (positive for CCW).
pub fn signed_area(points: &[Point2<f64>]) -> f64 {
    let n = points.len();
    if n < 3 {
        return 0.0;
    }
    let mut twice = 0.0;
    for i in 0..n {
        let p = points[i];
        let q = points[(i + 1) % n];
        twice += p.x * q.y - q.x * p.y;
    }
    0.5 * twice
}

/// Squared sine of the smallest angle of `abc` (0 for degenerate triangles).
///
/// With squared edge lengths `l0 <= l1 <= l2`, the smallest angle is opposite
/// `l0` and `sin² = 4·A² / (l1·l2)`.
pub fn min_angle_sin2(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    let mut l = [
        (b - a).norm_squared(),
        (c - b).norm_squared(),
        (a - c).norm_squared(),
    ];
    l.sort_by(f64::total_cmp);
    if l[1] == 0.0 {
        return 0.0;
    }
    let twice_area = orient2d(a, b, c);
    twice_area * twice_area / (l[1] * l[2])
}

/// Squared length of the longest edge of `abc`.
#[inline]
pub fn max_edge_sq(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    (b - a)
        .norm_squared()
        .max((c - b).norm_squared())
        .max((a - c).norm_squared())
}

/// Squared length of the shortest edge of `abc`.
#[inline]
pub fn min_edge_sq(a: &Point2<f64>, b: &Point2<f64>, c: &Point2<f64>) -> f64 {
    (b - a)
        .norm_squared()
        .min((c - b).norm_squared())
        .min((a - c).norm_squared())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn p(x: f64, y: f64) -> Point2<f64> {
        Point2::new(x, y)
    }

    #[test]
    fn orientation_and_incircle_signs() {
        assert!(orient2d(&p(0.0, 0.0), &p(1.0, 0.0), &p(0.0, 1.0)) > 0.0);
        assert!(orient2d(&p(0.0, 0.0), &p(0.0, 1.0), &p(1.0, 0.0)) < 0.0);
        let (a, b, c) = (p(0.0, 0.0), p(1.0, 0.0), p(0.0, 1.0));
        assert!(in_circle(&a, &b, &c, &p(0.5, 0.5)) > 0.0);
        assert!(in_circle(&a, &b, &c, &p(2.0, 2.0)) < 0.0);
        // Fourth corner of the unit square is cocircular.
        assert!(in_circle(&a, &b, &c, &p(1.0, 1.0)).abs() < 1e-15);
    }

    #[test]
    fn circumcenter_of_right_triangle_is_hypotenuse_midpoint() {
        let cc = circumcenter(&p(0.0, 0.0), &p(2.0, 0.0), &p(0.0, 2.0)).unwrap();
        assert_relative_eq!(cc, p(1.0, 1.0), epsilon = 1e-12);
        assert!(circumcenter(&p(0.0, 0.0), &p(1.0, 1.0), &p(2.0, 2.0)).is_none());
    }

    #[test]
    fn diametral_circle_encroachment() {
        let (a, b) = (p(0.0, 0.0), p(2.0, 0.0));
        assert!(encroaches(&p(1.0, 0.5), &a, &b, 1e-12));
        assert!(!encroaches(&p(1.0, 1.0), &a, &b, 1e-12)); // on the circle
        assert!(!encroaches(&p(1.0, 3.0), &a, &b, 1e-12));
    }

    #[test]
    fn quality_measures() {
        // Right isosceles: smallest angle 45°, sin² = 0.5.
        let s = min_angle_sin2(&p(0.0, 0.0), &p(1.0, 0.0), &p(0.0, 1.0));
        assert_relative_eq!(s, 0.5, epsilon = 1e-12);
        // Equilateral: 60°, sin² = 0.75.
        let s = min_angle_sin2(&p(0.0, 0.0), &p(1.0, 0.0), &p(0.5, 3f64.sqrt() / 2.0));
        assert_relative_eq!(s, 0.75, epsilon = 1e-12);
        assert_relative_eq!(
            max_edge_sq(&p(0.0, 0.0), &p(1.0, 0.0), &p(0.0, 1.0)),
            2.0,
            epsilon = 1e-12
        );
        assert_relative_eq!(signed_area(&[p(0.0, 0.0), p(1.0, 0.0), p(1.0, 1.0), p(0.0, 1.0)]), 1.0);
    }
}
