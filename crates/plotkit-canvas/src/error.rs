//! Error types for path construction.

use plotkit_geometry::GeometryError;
use thiserror::Error;

/// Canvas error type
///
/// Unifies geometry contract violations with failures raised by
/// downstream drawing sinks.
#[derive(Error, Debug)]
pub enum CanvasError {
    /// Geometry error (negative radius, singular transform)
    #[error(transparent)]
    Geometry(#[from] GeometryError),

    /// A drawing sink rejected a forwarded call
    #[error("sink failure: {reason}")]
    Sink {
        /// The reason reported by the sink.
        reason: String,
    },
}

impl CanvasError {
    /// Creates a sink failure from a string message.
    pub fn sink(reason: impl Into<String>) -> Self {
        CanvasError::Sink {
            reason: reason.into(),
        }
    }
}

/// Result type using CanvasError
pub type Result<T> = std::result::Result<T, CanvasError>;
