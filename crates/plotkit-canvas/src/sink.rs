//! Drawing sink capability and helpers.

use std::cell::RefCell;
use std::rc::Rc;

use crate::error::Result;

/// A downstream drawing target that only understands straight-line
/// segments.
///
/// A [`Canvas`](crate::Canvas) holds any number of sinks and invokes each
/// of them sequentially, in attachment order, for every forwarded
/// operation. Coordinates arrive in device space (after the canvas
/// transform has been applied).
pub trait DrawSink {
    /// Start a new subpath at `(x, y)` without drawing.
    fn move_to(&mut self, x: f64, y: f64) -> Result<()>;

    /// Draw a straight segment from the current position to `(x, y)`.
    fn line_to(&mut self, x: f64, y: f64) -> Result<()>;
}

impl<S: DrawSink + ?Sized> DrawSink for Box<S> {
    fn move_to(&mut self, x: f64, y: f64) -> Result<()> {
        (**self).move_to(x, y)
    }

    fn line_to(&mut self, x: f64, y: f64) -> Result<()> {
        (**self).line_to(x, y)
    }
}

/// Shared-handle sink, so a caller can keep inspecting a sink it has
/// attached to a canvas.
impl<S: DrawSink> DrawSink for Rc<RefCell<S>> {
    fn move_to(&mut self, x: f64, y: f64) -> Result<()> {
        self.borrow_mut().move_to(x, y)
    }

    fn line_to(&mut self, x: f64, y: f64) -> Result<()> {
        self.borrow_mut().line_to(x, y)
    }
}

/// A single call forwarded to a sink.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RecordedOp {
    MoveTo { x: f64, y: f64 },
    LineTo { x: f64, y: f64 },
}

/// A sink that records every forwarded call.
///
/// Useful for driving renderers that want the flattened polyline as data,
/// and for asserting on engine output in tests.
#[derive(Debug, Clone, Default)]
pub struct SegmentRecorder {
    ops: Vec<RecordedOp>,
}

impl SegmentRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// All recorded calls, in the order they were forwarded.
    pub fn ops(&self) -> &[RecordedOp] {
        &self.ops
    }

    /// Number of recorded `move_to` calls.
    pub fn move_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, RecordedOp::MoveTo { .. }))
            .count()
    }

    /// Number of recorded `line_to` calls.
    pub fn line_count(&self) -> usize {
        self.ops
            .iter()
            .filter(|op| matches!(op, RecordedOp::LineTo { .. }))
            .count()
    }

    /// Drops all recorded calls.
    pub fn clear(&mut self) {
        self.ops.clear();
    }
}

impl DrawSink for SegmentRecorder {
    fn move_to(&mut self, x: f64, y: f64) -> Result<()> {
        self.ops.push(RecordedOp::MoveTo { x, y });
        Ok(())
    }

    fn line_to(&mut self, x: f64, y: f64) -> Result<()> {
        self.ops.push(RecordedOp::LineTo { x, y });
        Ok(())
    }
}
