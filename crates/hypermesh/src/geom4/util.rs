//! Canonical dedup keys for 4D points.

use nalgebra::Point4;

use super::cfg::DEDUP_EPS;

/// Canonicalized coordinates of a point: each coordinate rounded to a grid of
/// `DEDUP_EPS`. Two points with the same key are treated as the same vertex.
///
/// Each component is the rounded grid value encoded as an order-preserving
/// integer of its `f64` bits, so keys never saturate: distinct grid values give
/// distinct keys for any |x| below `f64::MAX · DEDUP_EPS`. Rounding puts points that straddle a cell
/// boundary (`(k + ½)·DEDUP_EPS`) into different cells however close they are.
///
/// Ordering follows the numeric order of the grid coordinates, lexicographically,
/// which gives edge keys a direction-independent canonical form.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VertexKey(pub i64, pub i64, pub i64, pub i64);

impl VertexKey {
    #[inline]
    pub fn of(p: &Point4<f64>) -> Self {
        let (x, y, z, w) = quantize4(p, DEDUP_EPS);
        Self(x, y, z, w)
    }
}

pub(crate) fn quantize4(p: &Point4<f64>, tol: f64) -> (i64, i64, i64, i64) {
    let s = 1.0 / tol;
    (
        grid_key(p[0], s),
        grid_key(p[1], s),
        grid_key(p[2], s),
        grid_key(p[3], s),
    )
}

/// `round(x · s)` as a totally ordered integer; `-0.0` maps to `0.0`.
#[inline]
fn grid_key(x: f64, s: f64) -> i64 {
    let r = (x * s).round() + 0.0;
    let bits = r.to_bits() as i64;
    // Negative floats order backwards in their bit pattern.
    if bits < 0 {
        bits ^ i64::MAX
    } else {
        bits
    }
}
