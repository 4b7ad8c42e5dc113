//! World generation: per-dimension generators, the dimension registry,
//! RON presets, and the background column-batch pool.
//!
//! A [`Generator`] is configured through its builder-style setters, then
//! frozen by its first `generate_column` call; from that point on it is an
//! immutable, thread-safe sampling function from `(x, z)` to a column of
//! blocks. The [`DimensionRegistry`] binds generators to dimension ids and
//! runs the optional post-generation [`ColumnEditor`] hook.

pub mod dimension;
pub mod error;
pub mod generator;
pub mod preset;
pub mod worker;

pub use dimension::{ColumnEditor, DimensionRegistry};
pub use error::{PresetError, RegistryError, WorldGenError};
pub use generator::{BaseKind, Generator};
pub use preset::{GeneratorPreset, generator_from_ron};
pub use worker::{BatchTask, ColumnBatchGenerator, GeneratedBatch, generate_batch_sync};
