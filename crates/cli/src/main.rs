use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use hypermesh::prelude::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::fmt::SubscriberBuilder;

mod model;
mod provenance;
mod tables;

use provenance::{write_sidecar, Payload};

#[derive(Parser)]
#[command(name = "hypermesh")]
#[command(about = "Build renderable meshes and wireframes for 4D polytopes")]
struct Cmd {
    /// Optional run tag; propagated to provenance and logs
    #[arg(long)]
    tag: Option<String>,

    /// Log per-face details
    #[arg(long, short)]
    verbose: bool,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Build a polytope and write its faces, edges and vertices as JSON
    Build {
        #[command(flatten)]
        polytope: PolytopeArgs,
        #[arg(long)]
        out: PathBuf,
    },
    /// Write vertex and edge-segment tables (.csv or .parquet)
    Export {
        #[command(flatten)]
        polytope: PolytopeArgs,
        #[arg(long)]
        vertices: PathBuf,
        #[arg(long)]
        edges: Option<PathBuf>,
    },
    /// Print a small provenance JSON block
    Report,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Fixture {
    Tesseract,
    Cube,
    Simplex,
    House,
}

impl Fixture {
    fn faces(self) -> Vec<Polygon4> {
        match self {
            Fixture::Tesseract => special::tesseract(1.0),
            Fixture::Cube => special::cube3(1.0),
            Fixture::Simplex => special::simplex4(1.0),
            Fixture::House => special::house4(),
        }
    }
}

#[derive(Args, Debug)]
struct PolytopeArgs {
    #[arg(long, value_enum, default_value_t = Fixture::Tesseract)]
    polytope: Fixture,
    /// Lower bound on sin² of the smallest triangle angle
    #[arg(long, default_value_t = RefineCfg::default().shape_ratio)]
    shape_ratio: f64,
    /// Upper bound on triangle edge length
    #[arg(long, default_value_t = RefineCfg::default().max_edge_length)]
    max_edge: f64,
    /// Wireframe segment length (0 disables subdivision)
    #[arg(long, default_value_t = BuildCfg::default().split_every)]
    split_every: f64,
    /// Centroid fan instead of quality refinement
    #[arg(long)]
    fan: bool,
    /// Fail on the first face that cannot be meshed
    #[arg(long)]
    abort_on_error: bool,
    /// Keep A→B and B→A as separate edges
    #[arg(long)]
    directed_edges: bool,
    /// Mesh faces on a single thread
    #[arg(long)]
    serial: bool,
}

impl PolytopeArgs {
    fn build_cfg(&self) -> BuildCfg {
        BuildCfg {
            tessellation: if self.fan {
                Tessellation::Fan
            } else {
                Tessellation::Refine(RefineCfg::new(self.shape_ratio, self.max_edge))
            },
            split_every: self.split_every,
            policy: if self.abort_on_error {
                FacePolicy::Abort
            } else {
                FacePolicy::Skip
            },
            edge_keying: if self.directed_edges {
                EdgeKeying::Directed
            } else {
                EdgeKeying::Undirected
            },
            parallel: !self.serial,
        }
    }

    fn params(&self) -> serde_json::Value {
        serde_json::json!({
            "polytope": format!("{:?}", self.polytope).to_lowercase(),
            "tessellation": if self.fan { "fan" } else { "refine" },
            "shape_ratio": self.shape_ratio,
            "max_edge": self.max_edge,
            "split_every": self.split_every,
            "abort_on_error": self.abort_on_error,
            "directed_edges": self.directed_edges,
        })
    }

    fn build(&self) -> Result<PolytopeModel> {
        let faces = self.polytope.faces();
        build_polytope(&faces, &FaceColors::default(), &self.build_cfg())
            .with_context(|| format!("building {:?}", self.polytope))
    }
}

fn main() -> Result<()> {
    let cmd = Cmd::parse();
    let level = if cmd.verbose { Level::DEBUG } else { Level::INFO };
    SubscriberBuilder::default()
        .with_target(false)
        .with_max_level(level)
        .init();
    match cmd.action {
        Action::Build { polytope, out } => build(&polytope, &out, cmd.tag),
        Action::Export {
            polytope,
            vertices,
            edges,
        } => export(&polytope, &vertices, edges.as_deref(), cmd.tag),
        Action::Report => report(cmd.tag),
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating output dir {}", parent.display()))?;
        }
    }
    Ok(())
}

fn build(args: &PolytopeArgs, out: &Path, tag: Option<String>) -> Result<()> {
    tracing::info!(polytope = ?args.polytope, out = %out.display(), tag = ?tag, "build");
    let model = args.build()?;
    ensure_parent(out)?;
    let file = File::create(out).with_context(|| format!("creating {}", out.display()))?;
    serde_json::to_writer_pretty(BufWriter::new(file), &model::ModelDoc::from(&model))
        .with_context(|| format!("writing {}", out.display()))?;
    let mut params = args.params();
    params["triangles"] = model.triangle_count().into();
    params["skipped"] = model.skipped.len().into();
    write_sidecar(out, Payload::new(params).with_tag(tag))?;
    Ok(())
}

fn export(args: &PolytopeArgs, vertices: &Path, edges: Option<&Path>, tag: Option<String>) -> Result<()> {
    tracing::info!(polytope = ?args.polytope, tag = ?tag, "export");
    let model = args.build()?;
    tables::write_frame(&mut tables::vertices_frame(&model)?, vertices)?;
    if let Some(path) = edges {
        tables::write_frame(&mut tables::segments_frame(&model)?, path)?;
    }
    let payload = Payload::new(args.params())
        .with_tag(tag)
        .with_outputs(edges.map(Path::to_path_buf));
    write_sidecar(vertices, payload)?;
    Ok(())
}

fn report(tag: Option<String>) -> Result<()> {
    let mut obj = provenance::header(tag.as_deref());
    let refine = RefineCfg::default();
    let build = BuildCfg::default();
    obj["defaults"] = serde_json::json!({
        "shape_ratio": refine.shape_ratio,
        "max_edge_length": refine.max_edge_length,
        "max_steiner": refine.max_steiner,
        "split_every": build.split_every,
        "face_color": Rgba::DEFAULT_FACE.to_array(),
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}
