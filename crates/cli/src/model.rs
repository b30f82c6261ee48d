//! Serializable view of a built polytope for the JSON output.

use hypermesh::prelude::{Point4, PolytopeModel};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ModelDoc {
    pub faces: Vec<FaceDoc>,
    pub edges: Vec<Vec<[f64; 4]>>,
    pub vertices: Vec<[f64; 4]>,
    pub skipped: Vec<SkippedDoc>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct FaceDoc {
    /// Straight RGBA.
    pub color: [f32; 4],
    pub triangles: Vec<[[f64; 4]; 3]>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SkippedDoc {
    pub index: usize,
    pub error: String,
}

#[inline]
fn coords(p: &Point4<f64>) -> [f64; 4] {
    [p.x, p.y, p.z, p.w]
}

impl From<&PolytopeModel> for ModelDoc {
    fn from(model: &PolytopeModel) -> Self {
        Self {
            faces: model
                .faces
                .iter()
                .map(|m| FaceDoc {
                    color: m.color.to_array(),
                    triangles: m
                        .triangles
                        .iter()
                        .map(|t| t.vertices.each_ref().map(coords))
                        .collect(),
                })
                .collect(),
            edges: model
                .edges
                .iter()
                .map(|e| e.points().iter().map(coords).collect())
                .collect(),
            vertices: model.vertices.iter().map(coords).collect(),
            skipped: model
                .skipped
                .iter()
                .map(|s| SkippedDoc {
                    index: s.index,
                    error: s.error.to_string(),
                })
                .collect(),
        }
    }
}
