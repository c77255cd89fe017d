//! # PlotKit Canvas
//!
//! A canvas-style path construction engine for line-only output targets.
//!
//! [`Canvas`] accepts the usual path operations (moves, lines, quadratic and
//! cubic curves, arcs, ellipses, rectangles) with an affine transform stack
//! in effect, flattens everything that is not a straight line, and forwards
//! plain `move_to`/`line_to` calls to every attached [`DrawSink`].

pub mod canvas;
pub mod error;
pub mod sink;

pub use canvas::{Canvas, DEFAULT_ARC_RESOLUTION, DEFAULT_CURVE_RESOLUTION};
pub use error::{CanvasError, Result};
pub use sink::{DrawSink, RecordedOp, SegmentRecorder};
