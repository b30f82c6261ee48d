//! Refinement configuration and scale-aware tolerances.

use crate::error::{Error, Result};

/// Relative tolerance for orientation tests (scaled by `scale²`).
const ORIENT_REL_EPS: f64 = 1e-12;
/// Relative tolerance for incircle tests (scaled by `scale⁴`).
const CIRCLE_REL_EPS: f64 = 1e-12;
/// Relative slack for diametral-circle encroachment (scaled by segment length²).
pub(crate) const ENCROACH_REL_EPS: f64 = 1e-10;
/// Smallest feature length, relative to the input scale, the refiner will create.
const MIN_FEATURE_REL: f64 = 1e-7;
/// Polygons whose |area| is below this fraction of `scale²` are degenerate.
pub(crate) const AREA_REL_EPS: f64 = 1e-12;

/// Quality bounds for Delaunay refinement.
///
/// - `shape_ratio` bounds the squared sine of the smallest triangle angle from
///   below: `0.125` ≈ 20.7°. Values above ~0.2 may not terminate before
///   `max_steiner` on inputs with sharp corners.
/// - `max_edge_length` bounds the longest triangle edge; `f64::INFINITY`
///   disables the size criterion.
/// - `max_steiner` caps the number of inserted points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RefineCfg {
    pub shape_ratio: f64,
    pub max_edge_length: f64,
    pub max_steiner: usize,
}

impl Default for RefineCfg {
    fn default() -> Self {
        Self {
            shape_ratio: 0.125,
            max_edge_length: 0.1,
            max_steiner: 100_000,
        }
    }
}

impl RefineCfg {
    pub fn new(shape_ratio: f64, max_edge_length: f64) -> Self {
        Self {
            shape_ratio,
            max_edge_length,
            ..Self::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        let shape_ok = self.shape_ratio.is_finite() && self.shape_ratio > 0.0;
        let size_ok = !self.max_edge_length.is_nan() && self.max_edge_length > 0.0;
        if shape_ok && size_ok {
            Ok(())
        } else {
            Err(Error::InvalidQualityParameters {
                shape_ratio: self.shape_ratio,
                max_edge_length: self.max_edge_length,
            })
        }
    }
}

/// Absolute tolerances derived from the bounding-box extent of one input.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Tolerances {
    pub orient: f64,
    pub circle: f64,
    pub min_len_sq: f64,
}

impl Tolerances {
    pub fn for_scale(scale: f64) -> Self {
        let s2 = scale * scale;
        let min_len = MIN_FEATURE_REL * scale;
        Self {
            orient: ORIENT_REL_EPS * s2,
            circle: CIRCLE_REL_EPS * s2 * s2,
            min_len_sq: min_len * min_len,
        }
    }
}
