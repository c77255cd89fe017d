//! Affine matrices and the transform stack.
//!
//! Matrices use the canvas convention of six coefficients `(a, b, c, d, e, f)`
//! mapping `x' = a*x + c*y + e`, `y' = b*x + d*y + f`.

use serde::{Deserialize, Serialize};

use crate::error::{GeometryError, Result};
use crate::point::Point;

/// A 2D affine transformation matrix.
///
/// Laid out as:
///
/// ```text
/// | a  c  e |
/// | b  d  f |
/// | 0  0  1 |
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffineMatrix {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl AffineMatrix {
    /// The identity matrix, the neutral element of composition.
    pub const IDENTITY: AffineMatrix = AffineMatrix {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 1.0,
        e: 0.0,
        f: 0.0,
    };

    /// Creates a matrix from raw coefficients.
    pub fn new(a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> Self {
        Self { a, b, c, d, e, f }
    }

    /// Creates a translation matrix.
    pub fn translation(tx: f64, ty: f64) -> Self {
        Self::new(1.0, 0.0, 0.0, 1.0, tx, ty)
    }

    /// Creates a scaling matrix.
    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self::new(sx, 0.0, 0.0, sy, 0.0, 0.0)
    }

    /// Creates a rotation matrix about the origin. Angle is in radians.
    pub fn rotation(angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(cos, sin, -sin, cos, 0.0, 0.0)
    }

    /// Creates a rotation matrix about the point `(cx, cy)`.
    pub fn rotation_about(angle: f64, cx: f64, cy: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        Self::new(
            cos,
            sin,
            -sin,
            cos,
            cx - cos * cx + sin * cy,
            cy - sin * cx - cos * cy,
        )
    }

    /// Composes two matrices as the matrix product `self * other`.
    ///
    /// When applied to a point, `other` takes effect first.
    pub fn multiply(&self, other: &AffineMatrix) -> AffineMatrix {
        AffineMatrix {
            a: self.a * other.a + self.c * other.b,
            b: self.b * other.a + self.d * other.b,
            c: self.a * other.c + self.c * other.d,
            d: self.b * other.c + self.d * other.d,
            e: self.a * other.e + self.c * other.f + self.e,
            f: self.b * other.e + self.d * other.f + self.f,
        }
    }

    /// Applies the matrix to a point.
    pub fn apply(&self, p: Point) -> Point {
        Point::new(
            self.a * p.x + self.c * p.y + self.e,
            self.b * p.x + self.d * p.y + self.f,
        )
    }

    /// The determinant of the linear part.
    pub fn determinant(&self) -> f64 {
        self.a * self.d - self.b * self.c
    }

    /// Computes the inverse matrix.
    ///
    /// Fails with [`GeometryError::SingularTransform`] when the determinant
    /// is zero. A singular matrix can only arise from a caller-supplied
    /// degenerate scale or raw transform.
    pub fn invert(&self) -> Result<AffineMatrix> {
        let det = self.determinant();
        if det == 0.0 {
            return Err(GeometryError::SingularTransform);
        }
        Ok(AffineMatrix {
            a: self.d / det,
            b: -self.b / det,
            c: -self.c / det,
            d: self.a / det,
            e: (self.c * self.f - self.d * self.e) / det,
            f: (self.b * self.e - self.a * self.f) / det,
        })
    }
}

impl Default for AffineMatrix {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// An ordered stack of affine transform operations with a cached
/// composed matrix.
///
/// Operations are append-only; the effective matrix is the product of all
/// appended matrices in issue order, earliest first. The composed matrix is
/// recomputed on every append, reset, and restore.
#[derive(Debug, Clone, Default)]
pub struct TransformStack {
    ops: Vec<AffineMatrix>,
    composed: AffineMatrix,
    saved: Vec<AffineMatrix>,
}

impl TransformStack {
    /// Creates an empty stack whose composed matrix is the identity.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rotation about `(cx, cy)`. Angle is in radians.
    pub fn rotate(&mut self, angle: f64, cx: f64, cy: f64) {
        self.push(AffineMatrix::rotation_about(angle, cx, cy));
    }

    /// Appends a scale operation.
    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.push(AffineMatrix::scaling(sx, sy));
    }

    /// Appends a translation.
    pub fn translate(&mut self, tx: f64, ty: f64) {
        self.push(AffineMatrix::translation(tx, ty));
    }

    /// Appends a raw matrix.
    pub fn transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        self.push(AffineMatrix::new(a, b, c, d, e, f));
    }

    /// Clears all operations and saved snapshots back to the identity.
    pub fn reset(&mut self) {
        self.ops.clear();
        self.saved.clear();
        self.composed = AffineMatrix::IDENTITY;
    }

    /// Snapshots the current composed matrix.
    pub fn save(&mut self) {
        self.saved.push(self.composed);
    }

    /// Restores the most recent snapshot, replacing the current
    /// composition. A no-op when nothing has been saved.
    pub fn restore(&mut self) {
        if let Some(m) = self.saved.pop() {
            self.ops.clear();
            self.ops.push(m);
            self.composed = m;
        }
    }

    /// The composed matrix.
    pub fn matrix(&self) -> &AffineMatrix {
        &self.composed
    }

    /// Maps a point through the composed matrix.
    pub fn map_point(&self, p: Point) -> Point {
        self.composed.apply(p)
    }

    /// Maps a point through the inverse of the composed matrix.
    ///
    /// Propagates [`GeometryError::SingularTransform`] when the composition
    /// is degenerate.
    pub fn unmap_point(&self, p: Point) -> Result<Point> {
        Ok(self.composed.invert()?.apply(p))
    }

    fn push(&mut self, m: AffineMatrix) {
        self.ops.push(m);
        self.composed = self
            .ops
            .iter()
            .skip(1)
            .fold(self.ops[0], |acc, op| acc.multiply(op));
    }
}
