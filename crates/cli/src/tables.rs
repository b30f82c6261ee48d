//! Tabular exports (polars): unique vertices and wireframe segments.

use anyhow::{bail, Context, Result};
use hypermesh::prelude::PolytopeModel;
use polars::prelude::*;
use std::fs::File;
use std::path::Path;

/// One row per unique vertex: `x, y, z, w`.
pub fn vertices_frame(model: &PolytopeModel) -> PolarsResult<DataFrame> {
    let v = &model.vertices;
    df!(
        "x" => v.iter().map(|p| p.x).collect::<Vec<f64>>(),
        "y" => v.iter().map(|p| p.y).collect::<Vec<f64>>(),
        "z" => v.iter().map(|p| p.z).collect::<Vec<f64>>(),
        "w" => v.iter().map(|p| p.w).collect::<Vec<f64>>()
    )
}

/// One row per wireframe segment: edge index, segment index, both endpoints.
pub fn segments_frame(model: &PolytopeModel) -> PolarsResult<DataFrame> {
    let mut edge = Vec::new();
    let mut segment = Vec::new();
    let mut start: [Vec<f64>; 4] = Default::default();
    let mut end: [Vec<f64>; 4] = Default::default();
    for (i, e) in model.edges.iter().enumerate() {
        for (j, (p, q)) in e.segments().enumerate() {
            edge.push(i as u32);
            segment.push(j as u32);
            for k in 0..4 {
                start[k].push(p[k]);
                end[k].push(q[k]);
            }
        }
    }
    let [x0, y0, z0, w0] = start;
    let [x1, y1, z1, w1] = end;
    df!(
        "edge" => edge,
        "segment" => segment,
        "x0" => x0,
        "y0" => y0,
        "z0" => z0,
        "w0" => w0,
        "x1" => x1,
        "y1" => y1,
        "z1" => z1,
        "w1" => w1
    )
}

/// Write `df` as CSV or Parquet, chosen by the file extension.
pub fn write_frame(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or_default();
    match ext {
        "csv" => {
            let mut file =
                File::create(path).with_context(|| format!("creating {}", path.display()))?;
            CsvWriter::new(&mut file).finish(df)?;
        }
        "parquet" => {
            let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
            ParquetWriter::new(file).finish(df)?;
        }
        other => bail!("unsupported table extension {other:?} (use .csv or .parquet)"),
    }
    tracing::info!(rows = df.height(), path = %path.display(), "wrote table");
    Ok(())
}
