//! Polytope assembly: mesh every face, extract topology, collect the model.
//!
//! Purpose
//! - One call turns a face list plus colors into the three renderable outputs
//!   (faces, edges, vertices) and a report of faces that could not be meshed.
//!
//! Why this design
//! - Faces are independent, so meshing fans out over `rayon` when
//!   `BuildCfg::parallel` is set; `collect` keeps the input order.
//! - The result is an owned `PolytopeModel`; rebuilding replaces it wholesale.
//! - Color lookup is validated up front (`FaceColors::from_materials`) so the
//!   per-face loop never fails on a missing material.

use std::collections::BTreeMap;

use nalgebra::Point4;
use rayon::prelude::*;

use crate::error::{Error, Result};
use crate::geom2::RefineCfg;
use crate::geom4::{Edge4, Mesh4, Polygon4, Rgb, Rgba};
use crate::mesh::{fan_triangulate, refine_polygon};
use crate::topology::{extract_edges, extract_vertices, EdgeKeying};

/// What to do when a face fails to mesh.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FacePolicy {
    /// Record the failure in `PolytopeModel::skipped` and continue.
    #[default]
    Skip,
    /// Stop at the first failing face (lowest index) with `Error::Face`.
    Abort,
}

/// Per-face triangulation strategy.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Tessellation {
    /// Quality Delaunay refinement.
    Refine(RefineCfg),
    /// Centroid fan, no refinement.
    Fan,
}

impl Default for Tessellation {
    fn default() -> Self {
        Tessellation::Refine(RefineCfg::default())
    }
}

/// Build configuration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BuildCfg {
    pub tessellation: Tessellation,
    /// Wireframe segment length; non-finite or non-positive disables subdivision.
    pub split_every: f64,
    pub policy: FacePolicy,
    pub edge_keying: EdgeKeying,
    /// Mesh faces on the rayon pool.
    pub parallel: bool,
}

impl Default for BuildCfg {
    fn default() -> Self {
        Self {
            tessellation: Tessellation::default(),
            split_every: 0.1,
            policy: FacePolicy::Skip,
            edge_keying: EdgeKeying::Undirected,
            parallel: true,
        }
    }
}

/// Material colors by index.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MaterialTable {
    colors: BTreeMap<usize, Rgb>,
}

impl MaterialTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, index: usize, color: Rgb) -> Option<Rgb> {
        self.colors.insert(index, color)
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.colors.get(&index).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }
}

impl FromIterator<(usize, Rgb)> for MaterialTable {
    fn from_iter<I: IntoIterator<Item = (usize, Rgb)>>(iter: I) -> Self {
        Self {
            colors: iter.into_iter().collect(),
        }
    }
}

/// Colors for the faces of one build.
#[derive(Clone, Debug, PartialEq)]
pub enum FaceColors {
    Uniform(Rgba),
    PerFace(Vec<Rgba>),
}

impl Default for FaceColors {
    fn default() -> Self {
        FaceColors::Uniform(Rgba::DEFAULT_FACE)
    }
}

impl FaceColors {
    /// Resolve `material_index[face]` through `table`, all faces with opacity `alpha`.
    ///
    /// Fails with `MissingMaterial` for the first index not in the table.
    pub fn from_materials(material_index: &[usize], table: &MaterialTable, alpha: f32) -> Result<Self> {
        material_index
            .iter()
            .enumerate()
            .map(|(face, &material)| {
                table
                    .get(material)
                    .map(|rgb| rgb.with_alpha(alpha))
                    .ok_or(Error::MissingMaterial { face, material })
            })
            .collect::<Result<Vec<_>>>()
            .map(FaceColors::PerFace)
    }

    fn validate(&self, faces: usize) -> Result<()> {
        match self {
            FaceColors::PerFace(c) if c.len() != faces => Err(Error::FaceCountMismatch {
                colors: c.len(),
                faces,
            }),
            _ => Ok(()),
        }
    }

    #[inline]
    fn color(&self, face: usize) -> Rgba {
        match self {
            FaceColors::Uniform(c) => *c,
            FaceColors::PerFace(c) => c.get(face).copied().unwrap_or_default(),
        }
    }
}

/// A face that produced no mesh, with the reason.
#[derive(Clone, Debug, PartialEq)]
pub struct SkippedFace {
    pub index: usize,
    pub error: Error,
}

/// Renderable outputs of one polytope build.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PolytopeModel {
    /// One mesh per successfully meshed face, in input order.
    pub faces: Vec<Mesh4>,
    pub edges: Vec<Edge4>,
    pub vertices: Vec<Point4<f64>>,
    pub skipped: Vec<SkippedFace>,
}

impl PolytopeModel {
    pub fn triangle_count(&self) -> usize {
        self.faces.iter().map(|m| m.triangles.len()).sum()
    }

    pub fn surface_area(&self) -> f64 {
        self.faces.iter().map(Mesh4::area).sum()
    }
}

/// Mesh one face with the configured strategy.
pub fn mesh_face(polygon: &Polygon4, tessellation: &Tessellation, color: Rgba) -> Result<Mesh4> {
    match tessellation {
        Tessellation::Refine(cfg) => refine_polygon(polygon, cfg, color),
        Tessellation::Fan => fan_triangulate(polygon, color),
    }
}

/// Build faces, edges and vertices for `polygons`.
///
/// Topology is extracted from the faces that meshed; skipped faces contribute
/// no edges or vertices. Errors: `FaceCountMismatch` for a per-face color list of the wrong
/// length; `InvalidQualityParameters` for a bad refinement config; `Face` for the
/// first failing face under `FacePolicy::Abort`.
pub fn build_polytope(polygons: &[Polygon4], colors: &FaceColors, cfg: &BuildCfg) -> Result<PolytopeModel> {
    let span = tracing::info_span!("build_polytope", faces = polygons.len());
    let _enter = span.enter();

    colors.validate(polygons.len())?;
    if let Tessellation::Refine(rc) = &cfg.tessellation {
        rc.validate()?;
    }

    // Rayon workers do not inherit the caller's span; enter it per face.
    let mesh_one = |(i, poly): (usize, &Polygon4)| {
        let _enter = span.enter();
        mesh_face(poly, &cfg.tessellation, colors.color(i))
    };
    let results: Vec<Result<Mesh4>> = if cfg.parallel {
        polygons.par_iter().enumerate().map(mesh_one).collect()
    } else {
        polygons.iter().enumerate().map(mesh_one).collect()
    };

    let mut faces = Vec::with_capacity(results.len());
    let mut skipped = Vec::new();
    for (index, res) in results.into_iter().enumerate() {
        match res {
            Ok(mesh) => faces.push(mesh),
            Err(error) => match cfg.policy {
                FacePolicy::Abort => {
                    return Err(Error::Face {
                        index,
                        source: Box::new(error),
                    })
                }
                FacePolicy::Skip => {
                    tracing::warn!(face = index, %error, "skipping face");
                    skipped.push(SkippedFace { index, error });
                }
            },
        }
    }

    let meshed: Vec<Polygon4> = if skipped.is_empty() {
        polygons.to_vec()
    } else {
        let mut bad = skipped.iter().map(|s| s.index).peekable();
        polygons
            .iter()
            .enumerate()
            .filter(|&(i, _)| bad.next_if_eq(&i).is_none())
            .map(|(_, p)| p.clone())
            .collect()
    };
    let vertices = extract_vertices(&meshed);
    let edges = extract_edges(&meshed, cfg.split_every, cfg.edge_keying);
    let model = PolytopeModel {
        faces,
        edges,
        vertices,
        skipped,
    };
    tracing::info!(
        faces = model.faces.len(),
        skipped = model.skipped.len(),
        triangles = model.triangle_count(),
        edges = model.edges.len(),
        vertices = model.vertices.len(),
        "built polytope"
    );
    Ok(model)
}
