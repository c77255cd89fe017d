//! # PlotKit Geometry
//!
//! Geometry primitives shared by the PlotKit crates:
//! - 2D affine matrices and the append-only transform stack
//! - Adaptive Bezier flattening (curves to polylines)
//! - Geometry error types

pub mod error;
pub mod flatten;
pub mod matrix;
pub mod point;

pub use error::{GeometryError, Result};
pub use flatten::{flatten_cubic, flatten_quadratic};
pub use matrix::{AffineMatrix, TransformStack};
pub use point::Point;
