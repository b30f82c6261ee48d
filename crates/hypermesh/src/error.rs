//! Error type shared by the face pipeline and the polytope builder.

use thiserror::Error;

/// Result alias for hypermesh operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while meshing a face or assembling a polytope.
///
/// Face-level kinds (`DegeneratePolygon`, `DegenerateProjection`,
/// `InvalidQualityParameters`, `Triangulation`) come out of the per-face
/// pipeline; the builder either records them or wraps them in `Face`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    #[error("degenerate polygon: {0}")]
    DegeneratePolygon(String),

    #[error("degenerate projection: projected area {area:.3e} is below tolerance")]
    DegenerateProjection { area: f64 },

    #[error(
        "invalid quality parameters: shape ratio {shape_ratio}, max edge length {max_edge_length}"
    )]
    InvalidQualityParameters {
        shape_ratio: f64,
        max_edge_length: f64,
    },

    #[error("triangulation failed: {0}")]
    Triangulation(String),

    #[error("face {face} references material {material}, which is not in the table")]
    MissingMaterial { face: usize, material: usize },

    #[error("{colors} face colors supplied for {faces} faces")]
    FaceCountMismatch { colors: usize, faces: usize },

    #[error("face {index}: {source}")]
    Face {
        index: usize,
        #[source]
        source: Box<Error>,
    },
}

impl Error {
    /// Underlying face-level error, looking through `Face` wrappers.
    pub fn root(&self) -> &Error {
        match self {
            Error::Face { source, .. } => source.root(),
            other => other,
        }
    }
}
