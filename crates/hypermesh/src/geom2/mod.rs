//! Planar meshing: predicates, constrained Delaunay triangulation and quality refinement.
//!
//! Purpose
//! - Mesh a simple polygon given in plane coordinates into well-shaped triangles,
//!   bounded below in smallest angle and above in edge length.
//!
//! Why this design
//! - Ear clipping (`earcutr`) gives a valid boundary-conforming start; Lawson flips
//!   and Ruppert-style insertion then work on an index-based triangulation with no
//!   unsafe code and deterministic iteration order.
//! - All tolerances derive from the input's bounding-box extent (`Tolerances`),
//!   so behavior is invariant under uniform scaling.
//!
//! Code cross-refs: `RefineCfg`, `refine_polygon_2d`, `Refinement`.

mod cdt;
mod cfg;
pub mod predicates;
mod refine;

pub use cfg::RefineCfg;
pub use refine::{refine, refine_polygon_2d, Refinement};

#[cfg(test)]
mod tests;
