// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CLI tool: export extracted floor plan geometry as a glTF/GLB scene
//!
//! Usage:
//!   floorplan-glb <input> <output> [--format glb|gltf] [--no-materials]

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use floorplan_glb_pipeline::{create_glb, ExportConfig, OutputFormat};

fn print_usage() {
    eprintln!("Usage: floorplan-glb <input> <output> [options]");
    eprintln!();
    eprintln!("  <input>    data directory, or a .txt file inside it");
    eprintln!("  <output>   .glb or .gltf file to write");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --format <glb|gltf>   container form (default: from output extension)");
    eprintln!("  --no-materials        do not attach flat-color materials");
    eprintln!("  -h, --help            show this help");
    eprintln!();
    eprintln!("Environment: FLOORPLAN_GLB_FORMAT, FLOORPLAN_GLB_MATERIALS,");
    eprintln!("             FLOORPLAN_GLB_GENERATOR, RUST_LOG");
}

fn main() -> Result<()> {
    let args: Vec<String> = env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_usage();
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let mut config = ExportConfig::from_env();
    let mut positional: Vec<PathBuf> = Vec::new();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--format" => {
                i += 1;
                let value = args.get(i).context("--format needs a value")?;
                let format: OutputFormat = value
                    .parse()
                    .map_err(|err: String| anyhow::anyhow!(err))?;
                config.format = Some(format);
            }
            "--no-materials" => {
                config.materials = false;
            }
            other if other.starts_with("--") => {
                print_usage();
                bail!("unknown option: {}", other);
            }
            other => positional.push(PathBuf::from(other)),
        }
        i += 1;
    }

    let [input, output] = positional.as_slice() else {
        print_usage();
        bail!("expected <input> and <output>, got {} paths", positional.len());
    };

    let summary = create_glb(input, output, &config).with_context(|| {
        format!("exporting {} to {}", input.display(), output.display())
    })?;

    println!(
        "{} ({}): {} nodes, {} triangles",
        summary.output.display(),
        summary.format,
        summary.stats.nodes,
        summary.stats.triangles
    );
    if summary.stats.meshes_rejected > 0 || summary.stats.faces.partial > 0 {
        println!(
            "  {} meshes rejected, {} faces partially triangulated",
            summary.stats.meshes_rejected, summary.stats.faces.partial
        );
    }
    println!("  data directory: {}", summary.data_dir.display());

    Ok(())
}
