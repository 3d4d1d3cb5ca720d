//! Error types for sound field evaluation.
//!
//! Numeric degeneracies (a grid point sitting exactly on a source) are not
//! errors: they surface as non-finite values in the returned field.

use thiserror::Error;

/// Errors that can occur while building signals, grids, rooms or configurations.
#[derive(Debug, Error)]
pub enum FieldError {
    /// Sample rate is invalid (must be finite and > 0).
    #[error("invalid sample rate: {samplerate} Hz (must be finite and > 0)")]
    InvalidSampleRate {
        /// The invalid sample rate
        samplerate: f64,
    },

    /// Causal offset of a signal is not a finite number.
    #[error("invalid time offset: {time} s (must be finite)")]
    InvalidTimeOffset {
        /// The invalid offset
        time: f64,
    },

    /// Pulse duration is invalid (must be finite and > 0).
    #[error("invalid pulse duration: {duration} s (must be finite and > 0)")]
    InvalidDuration {
        /// The invalid duration
        duration: f64,
    },

    /// Grid components cannot be broadcast against each other.
    #[error("grid components cannot be broadcast together: x {x:?}, y {y:?}, z {z:?}")]
    GridShapeMismatch {
        /// Shape of the x component
        x: Vec<usize>,
        /// Shape of the y component
        y: Vec<usize>,
        /// Shape of the z component
        z: Vec<usize>,
    },

    /// Grid spacing is invalid (must be finite and > 0).
    #[error("invalid grid spacing: {spacing} (must be finite and > 0)")]
    InvalidSpacing {
        /// The invalid spacing
        spacing: f64,
    },

    /// Axis bounds are not finite numbers.
    #[error("invalid grid axis: [{min}, {max}] (bounds must be finite)")]
    InvalidAxis {
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },

    /// Axis would hold more samples than a grid may have.
    #[error("grid axis [{min}, {max}] with spacing {spacing} needs too many points")]
    TooManyGridPoints {
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
        /// Requested spacing
        spacing: f64,
    },

    /// Speed of sound is invalid (must be finite and > 0).
    #[error("invalid speed of sound: {c} m/s (must be finite and > 0)")]
    InvalidSpeedOfSound {
        /// The invalid speed of sound
        c: f64,
    },

    /// Room dimensions are invalid (all must be finite and > 0).
    #[error("invalid room dimensions: {dimensions:?} (all must be finite and > 0)")]
    InvalidRoom {
        /// The invalid dimensions
        dimensions: [f64; 3],
    },

    /// A wall reflection coefficient is not a finite number.
    #[error("invalid reflection coefficient for wall {wall}: {value}")]
    InvalidReflectionCoefficient {
        /// Wall index (-x, +x, -y, +y, -z, +z)
        wall: usize,
        /// The invalid coefficient
        value: f64,
    },

    /// Source does not lie strictly inside the room.
    #[error("source position {position:?} lies outside the room {dimensions:?}")]
    SourceOutsideRoom {
        /// Source position
        position: [f64; 3],
        /// Room dimensions
        dimensions: [f64; 3],
    },

    /// Reading or writing a configuration file failed.
    #[error("failed to access configuration file: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration could not be parsed or serialized.
    #[error("invalid configuration JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// A specialized `Result` type for sound field operations.
pub type Result<T> = std::result::Result<T, FieldError>;

impl FieldError {
    /// Returns `true` if this error comes from building an excitation signal.
    pub fn is_signal_error(&self) -> bool {
        matches!(
            self,
            FieldError::InvalidSampleRate { .. }
                | FieldError::InvalidTimeOffset { .. }
                | FieldError::InvalidDuration { .. }
        )
    }

    /// Returns `true` if this error comes from building a grid.
    pub fn is_grid_error(&self) -> bool {
        matches!(
            self,
            FieldError::GridShapeMismatch { .. }
                | FieldError::InvalidSpacing { .. }
                | FieldError::InvalidAxis { .. }
                | FieldError::TooManyGridPoints { .. }
        )
    }

    /// Returns `true` if this error describes an invalid room setup.
    ///
    /// This includes `InvalidRoom`, `InvalidReflectionCoefficient`
    /// and `SourceOutsideRoom`.
    pub fn is_room_error(&self) -> bool {
        matches!(
            self,
            FieldError::InvalidRoom { .. }
                | FieldError::InvalidReflectionCoefficient { .. }
                | FieldError::SourceOutsideRoom { .. }
        )
    }

    /// Returns `true` if this error comes from loading or saving a configuration.
    pub fn is_config_error(&self) -> bool {
        matches!(self, FieldError::Io(_) | FieldError::Json(_))
    }
}
