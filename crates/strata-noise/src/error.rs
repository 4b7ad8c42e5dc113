//! Noise configuration error types.

/// Errors raised while building noise pipeline entities.
///
/// All of these are setup-time configuration faults; sampling itself never
/// errors.
#[derive(Debug, thiserror::Error)]
pub enum NoiseConfigError {
    /// A parameter was NaN or infinite.
    #[error("non-finite value for {0}")]
    NonFinite(&'static str),

    /// A conversion curve node's x coordinate fell outside the unit interval.
    #[error("conversion node x {0} outside [0, 1]")]
    NodeOutOfRange(f64),
}
