//! Block identity and column/chunk output buffers for the terrain pipeline.

pub mod block;
pub mod column;

pub use block::{BlockState, block_ids};
pub use column::{CHUNK_SIZE, ChunkBlocks, ColumnBlocks, MAX_BLOCK_Y, WORLD_HEIGHT};
