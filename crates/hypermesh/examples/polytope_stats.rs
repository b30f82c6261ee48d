//! Print mesh and wireframe counts for the built-in polytopes.
//!
//! Usage:
//!   cargo run -p hypermesh --example polytope_stats -- [tesseract|cube|simplex|house] [max_edge]
//!
//! Prints (V, E, F) from topology extraction plus triangle count, surface area
//! and build time for the given size bound (default 0.1).

use std::time::Instant;

use hypermesh::prelude::*;

fn main() {
    let name = std::env::args().nth(1).unwrap_or_else(|| "tesseract".to_string());
    let max_edge: f64 = std::env::args()
        .nth(2)
        .and_then(|s| s.parse().ok())
        .unwrap_or(0.1);
    let faces = match name.as_str() {
        "tesseract" => special::tesseract(1.0),
        "cube" => special::cube3(1.0),
        "simplex" => special::simplex4(1.0),
        "house" => special::house4(),
        _ => {
            eprintln!("usage: polytope_stats [tesseract|cube|simplex|house] [max_edge]");
            return;
        }
    };
    let cfg = BuildCfg {
        tessellation: Tessellation::Refine(RefineCfg::new(0.125, max_edge)),
        ..BuildCfg::default()
    };
    let start = Instant::now();
    let model = match build_polytope(&faces, &FaceColors::default(), &cfg) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("build failed: {e}");
            return;
        }
    };
    let elapsed = start.elapsed().as_secs_f64() * 1e3;
    println!(
        "polytope={name} V={} E={} F={} skipped={}",
        model.vertices.len(),
        model.edges.len(),
        faces.len(),
        model.skipped.len()
    );
    println!(
        "triangles={} surface_area={:.9} max_edge={max_edge}",
        model.triangle_count(),
        model.surface_area()
    );
    println!("build_time_ms={elapsed:.3}");
}
