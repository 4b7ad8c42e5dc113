//! World generation error types.

use strata_noise::NoiseConfigError;
use strata_terrain::TerrainConfigError;

/// Errors raised by the per-dimension [`crate::Generator`] surface.
#[derive(Debug, thiserror::Error)]
pub enum WorldGenError {
    /// A setter was invoked after the generator froze. Configuration is
    /// immutable once generation has started, because workers may already
    /// be reading the graph.
    #[error("generator is frozen; configuration is immutable once generation has started")]
    FrozenMutation,

    /// Invalid noise configuration.
    #[error(transparent)]
    Noise(#[from] NoiseConfigError),

    /// Invalid terrain configuration.
    #[error(transparent)]
    Terrain(#[from] TerrainConfigError),
}

/// Errors raised by the dimension registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    /// A generator is already registered under this dimension id.
    #[error("dimension {0} is already registered")]
    DuplicateDimension(i32),

    /// No generator is registered under this dimension id.
    #[error("unknown dimension {0}")]
    UnknownDimension(i32),
}

/// Errors raised while loading a generator preset.
#[derive(Debug, thiserror::Error)]
pub enum PresetError {
    /// The RON document failed to parse.
    #[error("failed to parse preset: {0}")]
    Parse(#[source] ron::error::SpannedError),

    /// The preset parsed but described an invalid configuration.
    #[error(transparent)]
    Noise(#[from] NoiseConfigError),

    /// The preset parsed but described an invalid terrain configuration.
    #[error(transparent)]
    Terrain(#[from] TerrainConfigError),

    /// The preset parsed but generator assembly failed.
    #[error(transparent)]
    WorldGen(#[from] WorldGenError),
}
