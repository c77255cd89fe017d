//! Error types for geometry operations.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry error type
///
/// Represents contract violations in geometric input (invalid radii)
/// and unrecoverable transform failures (singular matrices).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A negative radius was passed to an arc or ellipse operation
    #[error("negative radius: {radius}")]
    NegativeRadius {
        /// The offending radius value.
        radius: f64,
    },

    /// Inversion was requested on a non-invertible composed matrix.
    ///
    /// Only reachable when a caller has issued a degenerate scale or raw
    /// transform. This is a programming error; there is no fallback to
    /// the identity matrix.
    #[error("transform matrix is singular and cannot be inverted")]
    SingularTransform,
}

/// Result type using GeometryError
pub type Result<T> = std::result::Result<T, GeometryError>;
