//! Curated API surface (UNSTABLE).
//!
//! Important
//! - Convenience re-exports for the CLI, benches and examples. Prefer these
//!   paths over deep module paths; breaking changes are allowed.

// Face pipeline
pub use crate::geom2::{refine, refine_polygon_2d, RefineCfg, Refinement};
pub use crate::geom4::{lift, project, Hyperplane4, PlanarFrame, Polygon4, VertexKey};
pub use crate::mesh::{fan_triangulate, refine_polygon};
// Outputs
pub use crate::geom4::{Edge4, Mesh4, Rgb, Rgba, Triangle4};
// Topology
pub use crate::topology::{
    extract_edges, extract_vertices, subdivide_segment, unique_adjacencies, EdgeKeying,
};
// Whole-polytope build
pub use crate::build::{
    build_polytope, mesh_face, BuildCfg, FaceColors, FacePolicy, MaterialTable, PolytopeModel,
    SkippedFace, Tessellation,
};
// Fixtures and random faces
pub use crate::geom4::special::{cube3, house4, simplex4, tesseract};
pub use crate::rand4::{draw_planar_polygon, FaceSampler, PlanarSample, RadialCfg, ReplayToken, VertexCount};
