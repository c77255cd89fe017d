//! # PlotKit
//!
//! Converts canvas-style vector drawing commands (moves, lines, quadratic
//! and cubic curves, arcs, ellipses, rectangles) into straight-line
//! segments for line-only drawing targets and into HPGL pen plotter
//! command text.
//!
//! ## Architecture
//!
//! PlotKit is organized as a workspace with multiple crates:
//!
//! 1. **plotkit-geometry** - Affine matrices, the transform stack, and
//!    adaptive Bezier flattening
//! 2. **plotkit-canvas** - The path engine and the drawing-sink
//!    capability it feeds
//! 3. **plotkit-hpgl** - The HPGL command buffer and text encoder
//! 4. **plotkit** - Facade crate re-exporting the public surface

pub use plotkit_geometry as geometry;

pub use plotkit_geometry::{
    flatten_cubic, flatten_quadratic, AffineMatrix, GeometryError, Point, TransformStack,
};

pub use plotkit_canvas::{Canvas, CanvasError, DrawSink, RecordedOp, SegmentRecorder};

pub use plotkit_hpgl::{HpglEncoder, PlotterCommand};
