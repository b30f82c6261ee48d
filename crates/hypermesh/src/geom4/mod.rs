//! 4D face geometry: polygons, planar frames, meshes, and canonical fixtures.
//!
//! Purpose
//! - Hold the data model the pipeline passes around (`Polygon4` in, `Mesh4` and
//!   `Edge4` out) and the plane chart used to flatten a face.
//!
//! Assumptions and conventions
//! - Points are `nalgebra::Point4<f64>`, directions `Vector4<f64>`.
//! - A polygon is implicitly closed and assumed planar; only the first three
//!   vertices define its plane.
//! - Dedup equality is grid-canonicalized (`VertexKey`, step `1e-9`), never raw
//!   float equality.

mod cfg;
mod frame;
pub mod special;
mod types;
mod util;

pub use frame::{lift, project, PlanarFrame};
pub use types::{Edge4, Hyperplane4, Mesh4, Polygon4, Rgb, Rgba, Triangle4};
pub use util::VertexKey;

#[cfg(test)]
mod tests_special;
