//! Output buffers for generated terrain: one vertical column of blocks,
//! and a chunk-sized grid of columns.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

use crate::block::BlockState;

/// Number of block cells in a vertical column.
pub const WORLD_HEIGHT: usize = 256;

/// Highest valid block y coordinate.
pub const MAX_BLOCK_Y: i32 = WORLD_HEIGHT as i32 - 1;

/// Horizontal edge length of a chunk, in columns.
pub const CHUNK_SIZE: usize = 16;

/// A single vertical column of blocks, y in `0..WORLD_HEIGHT`.
///
/// The buffer is exclusively owned by its producer during generation, so
/// writes need no synchronization.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ColumnBlocks {
    blocks: [BlockState; WORLD_HEIGHT],
}

impl ColumnBlocks {
    /// Creates a column filled with air.
    pub fn new_air() -> Self {
        Self {
            blocks: [BlockState::AIR; WORLD_HEIGHT],
        }
    }

    /// Returns the block at height `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= WORLD_HEIGHT`.
    #[inline]
    pub fn get(&self, y: usize) -> BlockState {
        self.blocks[y]
    }

    /// Sets the block at height `y`.
    ///
    /// # Panics
    ///
    /// Panics if `y >= WORLD_HEIGHT`.
    #[inline]
    pub fn set(&mut self, y: usize, state: BlockState) {
        self.blocks[y] = state;
    }

    /// Iterates over all cells bottom-up.
    pub fn iter(&self) -> impl Iterator<Item = BlockState> + '_ {
        self.blocks.iter().copied()
    }

    /// Returns the highest y holding a non-air block, or `None` for an
    /// all-air column.
    pub fn top_solid(&self) -> Option<usize> {
        self.blocks.iter().rposition(|b| !b.is_air())
    }

    /// Hashes every cell into a u64 digest for determinism comparisons.
    pub fn content_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        for block in &self.blocks {
            block.hash(&mut hasher);
        }
        hasher.finish()
    }
}

impl Default for ColumnBlocks {
    fn default() -> Self {
        Self::new_air()
    }
}

/// A `CHUNK_SIZE` x `CHUNK_SIZE` grid of columns, the unit produced by the
/// background generation pool.
#[derive(Clone, Debug)]
pub struct ChunkBlocks {
    columns: Vec<ColumnBlocks>,
}

impl ChunkBlocks {
    /// Creates a chunk filled with air.
    pub fn new_air() -> Self {
        Self {
            columns: vec![ColumnBlocks::new_air(); CHUNK_SIZE * CHUNK_SIZE],
        }
    }

    /// Returns the column at local coordinates.
    ///
    /// # Panics
    ///
    /// Panics if `local_x` or `local_z` is `>= CHUNK_SIZE`.
    pub fn column(&self, local_x: usize, local_z: usize) -> &ColumnBlocks {
        assert!(local_x < CHUNK_SIZE && local_z < CHUNK_SIZE);
        &self.columns[local_z * CHUNK_SIZE + local_x]
    }

    /// Mutable access to the column at local coordinates.
    ///
    /// # Panics
    ///
    /// Panics if `local_x` or `local_z` is `>= CHUNK_SIZE`.
    pub fn column_mut(&mut self, local_x: usize, local_z: usize) -> &mut ColumnBlocks {
        assert!(local_x < CHUNK_SIZE && local_z < CHUNK_SIZE);
        &mut self.columns[local_z * CHUNK_SIZE + local_x]
    }

    /// Hashes every column into a u64 digest for determinism comparisons.
    pub fn content_hash(&self) -> u64 {
        let mut hasher = DefaultHasher::new();
        for column in &self.columns {
            column.content_hash().hash(&mut hasher);
        }
        hasher.finish()
    }
}

impl Default for ChunkBlocks {
    fn default() -> Self {
        Self::new_air()
    }
}
