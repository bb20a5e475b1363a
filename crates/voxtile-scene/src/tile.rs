//! Dense block storage for one tile.

use glam::IVec3;
use voxtile_core::{Block, TileDims};

/// A fixed-size box of blocks at a tile-grid location.
#[derive(Clone, Debug, PartialEq)]
pub struct Tile {
    /// Position in tile coordinates.
    pub location: IVec3,
    blocks: Vec<Block>,
}

impl Tile {
    /// Create an empty tile.
    pub fn new(location: IVec3, dims: TileDims) -> Self {
        Self {
            location,
            blocks: vec![Block::EMPTY; dims.volume()],
        }
    }

    /// Create a tile with every block set to `block`.
    pub fn filled(location: IVec3, dims: TileDims, block: Block) -> Self {
        Self {
            location,
            blocks: vec![block; dims.volume()],
        }
    }

    /// Block at a flattened in-tile index.
    #[inline]
    pub fn block(&self, index: usize) -> Block {
        self.blocks.get(index).copied().unwrap_or(Block::EMPTY)
    }

    /// Overwrite a block. Out-of-range indices are ignored.
    #[inline]
    pub fn set_block(&mut self, index: usize, block: Block) {
        if let Some(slot) = self.blocks.get_mut(index) {
            *slot = block;
        }
    }

    /// All blocks in index order.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Non-empty blocks with their in-tile indices.
    pub fn occupied(&self) -> impl Iterator<Item = (usize, Block)> + '_ {
        self.blocks
            .iter()
            .enumerate()
            .filter(|(_, block)| !block.is_empty())
            .map(|(index, block)| (index, *block))
    }

    /// Whether every block is empty.
    pub fn is_empty(&self) -> bool {
        self.blocks.iter().all(Block::is_empty)
    }
}
