//! Command line parsing.

use std::path::PathBuf;

use anyhow::{bail, Context};
use glam::IVec3;
use voxtile_core::constants::TILE_SIZE;
use voxtile_core::BlockType;

/// One block requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockSpec {
    pub location: IVec3,
    pub block_type: BlockType,
    pub rotation: u8,
}

/// Export options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArgs {
    pub model_dir: PathBuf,
    pub output: PathBuf,
    pub decimate: bool,
    pub fill: bool,
    pub tile_size: i32,
    pub blocks: Vec<BlockSpec>,
}

impl Default for ExportArgs {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from("assets/models"),
            output: PathBuf::from("scene.obj"),
            decimate: true,
            fill: false,
            tile_size: TILE_SIZE,
            blocks: Vec::new(),
        }
    }
}

impl ExportArgs {
    /// Parse the process arguments.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::parse(std::env::args().skip(1))
    }

    /// Parse arguments, program name excluded.
    pub fn parse<I>(args: I) -> anyhow::Result<Self>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut parsed = Self::default();
        let mut args = args.into_iter().map(Into::into);
        while let Some(arg) = args.next() {
            let mut value = |name: &str| {
                args.next()
                    .with_context(|| format!("{name} needs a value"))
            };
            match arg.as_str() {
                "-m" | "--models" => parsed.model_dir = value(&arg)?.into(),
                "-o" | "--output" => parsed.output = value(&arg)?.into(),
                "--no-decimate" => parsed.decimate = false,
                "--fill" => parsed.fill = true,
                "--tile-size" => {
                    let raw = value(&arg)?;
                    parsed.tile_size = raw
                        .parse()
                        .with_context(|| format!("invalid tile size '{raw}'"))?;
                }
                "-b" | "--block" => parsed.blocks.push(parse_block(&value(&arg)?)?),
                other => bail!("unknown argument '{other}'"),
            }
        }
        // An empty scene exports nothing, so start from the filled tile.
        if parsed.blocks.is_empty() {
            parsed.fill = true;
        }
        Ok(parsed)
    }
}

fn parse_shape(name: &str) -> anyhow::Result<BlockType> {
    let shape = match name.to_ascii_lowercase().as_str() {
        "cube" => BlockType::Cube,
        "slope" => BlockType::Slope,
        "rslope" => BlockType::RSlope,
        "cornerslope" => BlockType::CornerSlope,
        "rcornerslope" => BlockType::RCornerSlope,
        "invcorner" => BlockType::InvCorner,
        "rinvcorner" => BlockType::RInvCorner,
        "diagonal" => BlockType::Diagonal,
        "diagonalcorner" => BlockType::DiagonalCorner,
        "rdiagonalcorner" => BlockType::RDiagonalCorner,
        _ => bail!("unknown block shape '{name}'"),
    };
    Ok(shape)
}

/// `X,Y,Z,SHAPE[,ROTATION]`
fn parse_block(raw: &str) -> anyhow::Result<BlockSpec> {
    let parts: Vec<&str> = raw.split(',').map(str::trim).collect();
    if !(4..=5).contains(&parts.len()) {
        bail!("block '{raw}' should look like X,Y,Z,SHAPE[,ROTATION]");
    }
    let mut coords = [0; 3];
    for (coord, part) in coords.iter_mut().zip(&parts) {
        *coord = part
            .parse()
            .with_context(|| format!("invalid coordinate '{part}' in block '{raw}'"))?;
    }
    let rotation = match parts.get(4) {
        Some(part) => part
            .parse()
            .with_context(|| format!("invalid rotation '{part}' in block '{raw}'"))?,
        None => 0,
    };
    Ok(BlockSpec {
        location: IVec3::from_array(coords),
        block_type: parse_shape(parts[3])?,
        rotation,
    })
}
