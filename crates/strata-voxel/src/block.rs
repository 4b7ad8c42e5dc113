//! Block identity as an opaque (id, data) pair.
//!
//! Ids come from an external block registry; the terrain pipeline never
//! interprets them beyond equality with [`BlockState::AIR`].

use serde::{Deserialize, Serialize};

/// Compact block identifier plus variant data, stored in every column cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlockState {
    /// Registry id of the block type.
    pub id: u16,
    /// Variant/metadata value attached to the block.
    pub data: u16,
}

impl BlockState {
    /// The empty cell. Zero-initialized buffers represent air.
    pub const AIR: Self = Self { id: 0, data: 0 };

    /// Creates a block state from a registry id and variant data.
    pub const fn new(id: u16, data: u16) -> Self {
        Self { id, data }
    }

    /// Creates a block state with zero variant data.
    pub const fn simple(id: u16) -> Self {
        Self { id, data: 0 }
    }

    /// Returns `true` if this cell is air.
    pub const fn is_air(&self) -> bool {
        self.id == 0
    }
}

/// Well-known ids emitted by the built-in base generator kinds.
///
/// External registries are free to remap these; the base kinds only need
/// stable values to pre-fill columns with.
pub mod block_ids {
    use super::BlockState;

    pub const AIR: BlockState = BlockState::simple(0);
    pub const STONE: BlockState = BlockState::simple(1);
    pub const DIRT: BlockState = BlockState::simple(2);
    pub const GRASS: BlockState = BlockState::simple(3);
    pub const BEDROCK: BlockState = BlockState::simple(4);
    pub const WATER: BlockState = BlockState::simple(5);
    pub const NETHERRACK: BlockState = BlockState::simple(6);
    pub const END_STONE: BlockState = BlockState::simple(7);
}
