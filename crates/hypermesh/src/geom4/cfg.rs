//! Tolerance defaults for 4D geometry (internal).
//!
//! Policy
//! - Defaults are fixed constants to avoid “tolerance juggling” at call sites.
//!   Refinement quality is configurable (`RefineCfg`); these are not.

/// Grid step used to canonicalize coordinates for vertex/edge dedup.
/// Rounding merges points within one cell only: two points closer than this but
/// on either side of a half-step boundary stay distinct.
pub(crate) const DEDUP_EPS: f64 = 1e-9;
/// Minimum length of `v1 − v0` for a usable first basis vector.
pub(crate) const BASIS_EPS: f64 = 1e-12;
/// Relative collinearity threshold for the second basis vector:
/// `|v2⊥| <= COLLINEAR_EPS · |v2 − v0|` counts as collinear.
pub(crate) const COLLINEAR_EPS: f64 = 1e-9;
