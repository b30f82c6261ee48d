//! Mesh assembly: refine one planar 4D polygon and lift the result back.
//!
//! Pipeline per face: `PlanarFrame::from_polygon` → project every vertex →
//! `refine_polygon_2d` → lift every triangle vertex → `Mesh4`.

use nalgebra::Point2;

use crate::error::Result;
use crate::geom2::{refine_polygon_2d, RefineCfg};
use crate::geom4::{Mesh4, PlanarFrame, Polygon4, Rgba, Triangle4};

/// Quality-refined mesh of `polygon`, tagged with `color`.
///
/// Errors
/// - `DegeneratePolygon` if the first three vertices do not span a plane.
/// - `DegenerateProjection`, `InvalidQualityParameters`, `Triangulation` from
///   the planar refinement.
pub fn refine_polygon(polygon: &Polygon4, cfg: &RefineCfg, color: Rgba) -> Result<Mesh4> {
    let frame = PlanarFrame::from_polygon(polygon)?;
    tracing::debug!(
        vertices = polygon.len(),
        residual = polygon.planarity_residual(&frame),
        "projecting face"
    );
    let boundary: Vec<Point2<f64>> = polygon.vertices().iter().map(|p| frame.project(p)).collect();
    let triangles = refine_polygon_2d(&boundary, cfg)?
        .into_iter()
        .map(|t| Triangle4::new(t.map(|q| frame.lift(&q))))
        .collect();
    Ok(Mesh4 { triangles, color })
}

/// Fan of triangles around the vertex centroid, one per boundary edge; no refinement.
///
/// The frame is still recovered so degenerate faces fail the same way as in
/// [`refine_polygon`]. Triangles follow the polygon's winding.
pub fn fan_triangulate(polygon: &Polygon4, color: Rgba) -> Result<Mesh4> {
    PlanarFrame::from_polygon(polygon)?;
    let center = polygon.centroid();
    let triangles = polygon
        .boundary_edges()
        .map(|(p, q)| Triangle4::new([*p, *q, center]))
        .collect();
    Ok(Mesh4 { triangles, color })
}
