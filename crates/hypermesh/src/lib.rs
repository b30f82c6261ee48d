//! Renderable meshes for 4D polytopes.
//!
//! Each 2-face of a polytope is a planar polygon in R^4. The face pipeline
//! recovers the polygon's plane, projects it to 2D, refines it into
//! well-shaped triangles and lifts them back (`mesh`, on top of `geom2` and
//! `geom4`). `topology` deduplicates vertices and edges across faces, and
//! `build` runs both for a whole polytope.
//!
//! API Policy
//! - `api` and `prelude` are the curated surfaces; module paths may move.

pub mod api;
pub mod build;
pub mod error;
pub mod geom2;
pub mod geom4;
pub mod mesh;
pub mod rand4;
pub mod topology;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use error::{Error, Result};

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::build::{
        build_polytope, BuildCfg, FaceColors, FacePolicy, MaterialTable, PolytopeModel,
        Tessellation,
    };
    pub use crate::error::{Error, Result};
    pub use crate::geom2::RefineCfg;
    pub use crate::geom4::{special, Edge4, Mesh4, PlanarFrame, Polygon4, Rgb, Rgba, Triangle4};
    pub use crate::topology::EdgeKeying;
    pub use nalgebra::{Point2, Point4, Vector4};
}
