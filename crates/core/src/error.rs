//! Error types for the particle-field core.
//!
//! The simulation itself never fails; these errors cover the fallible edges
//! around it (surfaces, colors, seeds, preferences, snapshots).

use thiserror::Error;

/// Errors produced at the edges of the particle-field simulator.
#[derive(Debug, Error)]
pub enum FieldError {
    /// Width or height was zero (or overflowed) when allocating a surface.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A viewport extent was negative, zero, NaN or infinite.
    #[error("invalid viewport {width}x{height}: extents must be finite and positive")]
    InvalidViewport { width: f64, height: f64 },

    /// A parameter existed but had the wrong JSON type.
    #[error("parameter type mismatch for '{name}': expected {expected}, got {got}")]
    ParamTypeMismatch {
        name: String,
        expected: String,
        got: String,
    },

    /// A numeric parameter was outside its usable domain.
    #[error("invalid value {value} for parameter '{name}': must be finite and positive")]
    InvalidParam { name: String, value: f64 },

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// A theme name was not recognized.
    #[error("unknown theme: {0}")]
    UnknownTheme(String),

    /// Writing or reading an artifact failed.
    #[error("i/o error: {0}")]
    Io(String),
}
