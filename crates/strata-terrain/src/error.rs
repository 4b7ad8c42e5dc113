//! Terrain configuration error types.

/// Errors raised while building terrain materials, layers, or models.
#[derive(Debug, thiserror::Error)]
pub enum TerrainConfigError {
    /// A layer's vertical range is inverted.
    #[error("invalid terrain layer range: min_y {min_y} > max_y {max_y}")]
    InvalidRange { min_y: i32, max_y: i32 },

    /// A surface or filling band was given a zero or negative width.
    #[error("band width must be positive, got {0}")]
    InvalidBandWidth(i32),

    /// A scalar parameter was NaN or infinite.
    #[error("non-finite value for {0}")]
    NonFinite(&'static str),
}
