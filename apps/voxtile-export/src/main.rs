//! voxtile headless exporter
//!
//! Builds a block scene from the command line and writes it as a single
//! decimated Wavefront OBJ mesh, using the same culling and decimation as
//! the editor's export command.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p voxtile-export -- [OPTIONS]
//! ```
//!
//! ## Examples
//!
//! ```bash
//! # Export the starting tile full of cubes
//! cargo run -p voxtile-export -- -o tile.obj
//!
//! # A small ramp, without decimation
//! cargo run -p voxtile-export -- -b 0,0,0,cube -b 1,0,0,slope,1 --no-decimate
//! ```
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Set log level (e.g., info, debug, trace)

mod args;

use anyhow::{bail, Context};
use tracing_subscriber::EnvFilter;
use voxtile_core::{EditorConfig, TileDims};
use voxtile_mesh::MeshLibrary;
use voxtile_scene::{export_scene, ExportOptions, Scene};

use crate::args::ExportArgs;

fn main() -> anyhow::Result<()> {
    if std::env::args().any(|arg| arg == "-h" || arg == "--help") {
        print_help();
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = ExportArgs::from_env()?;
    let config = EditorConfig::new(&args.model_dir)
        .with_tile_dims(TileDims::cube(args.tile_size)?)
        .with_start_tile(args.fill);
    config.validate()?;

    let library = MeshLibrary::load(&config.model_dir);
    if library.is_empty() {
        bail!("no block models found in {}", config.model_dir.display());
    }

    let mut scene = Scene::new(&config);
    for block in &args.blocks {
        scene.add_block(block.location, block.block_type, block.rotation, false);
    }
    tracing::info!("scene has {} tiles", scene.tiles().len());

    let options = ExportOptions::new().with_decimation(args.decimate);
    let summary = export_scene(&scene, &library, options, &args.output)
        .with_context(|| format!("exporting to {}", args.output.display()))?;

    match summary.decimation {
        Some(stats) => println!(
            "{}: {} triangles -> {} after {} collapses",
            args.output.display(),
            stats.faces_before,
            stats.faces_after,
            stats.collapses
        ),
        None => println!("{}: {} triangles", args.output.display(), summary.faces),
    }
    if let Some(bounds) = summary.bounds {
        println!("extent {} from {}", bounds.size(), bounds.min);
    }
    Ok(())
}

fn print_help() {
    eprintln!(
        "voxtile headless exporter

USAGE:
    cargo run -p voxtile-export -- [OPTIONS]

OPTIONS:
    -m, --models <DIR>      Directory holding the .rawmodel block meshes
                            Default: assets/models
    -o, --output <PATH>     OBJ file to write (default: scene.obj)
    -b, --block <SPEC>      Place a block, SPEC is X,Y,Z,SHAPE[,ROTATION]
                            Shapes: cube slope rslope diagonal cornerslope
                                    rcornerslope invcorner rinvcorner
                            May be repeated
    --fill                  Start from a tile filled with cubes
                            (implied when no --block is given)
    --tile-size <N>         Tile edge length in blocks (default: 8)
    --no-decimate           Write the culled mesh without decimating it

OTHER:
    -h, --help              Print this help message

ENVIRONMENT VARIABLES:
    RUST_LOG                Set log level (e.g., info, debug, trace)"
    );
}
