//! HPGL command stream encoder.

use std::fmt;

use tracing::debug;

use plotkit_canvas::{DrawSink, Result as CanvasResult};
use plotkit_geometry::{Point, TransformStack};

use crate::command::PlotterCommand;

/// Encodes incoming drawing calls into a buffered HPGL command stream.
///
/// Every incoming coordinate has its y-axis inverted (plotter-up is
/// canvas-down), is mapped through the encoder's own transform stack and
/// rounded to the nearest integer. Redundant consecutive commands are
/// coalesced: a pen-up followed by another pen-up keeps only the latest
/// move, and a pen-down repeating the previous pen-down's coordinates is
/// dropped.
#[derive(Debug, Clone, Default)]
pub struct HpglEncoder {
    commands: Vec<PlotterCommand>,
    transforms: TransformStack,
}

impl HpglEncoder {
    /// Creates an encoder with an empty buffer and identity transform.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a rotation about `(cx, cy)` to the transform stack.
    /// Angle is in radians.
    pub fn rotate(&mut self, angle: f64, cx: f64, cy: f64) {
        self.transforms.rotate(angle, cx, cy);
    }

    /// Appends a scale operation to the transform stack.
    pub fn scale(&mut self, sx: f64, sy: f64) {
        self.transforms.scale(sx, sy);
    }

    /// Appends a translation to the transform stack.
    pub fn translate(&mut self, tx: f64, ty: f64) {
        self.transforms.translate(tx, ty);
    }

    /// Appends a raw matrix to the transform stack.
    pub fn transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) {
        self.transforms.transform(a, b, c, d, e, f);
    }

    /// Resets the transform stack to the identity.
    pub fn reset_transform(&mut self) {
        self.transforms.reset();
    }

    /// Snapshots the current composed transform.
    pub fn save(&mut self) {
        self.transforms.save();
    }

    /// Restores the most recently saved transform snapshot.
    pub fn restore(&mut self) {
        self.transforms.restore();
    }

    /// Clears the command buffer. Transforms persist.
    pub fn begin_path(&mut self) {
        debug!("clearing {} buffered plotter commands", self.commands.len());
        self.commands.clear();
    }

    /// Buffers a pen-up travel to `(x, y)`.
    pub fn move_to(&mut self, x: f64, y: f64) {
        let (xi, yi) = self.encode_point(x, y);
        self.push(PlotterCommand::PenUp { x: xi, y: yi });
    }

    /// Buffers a pen-down draw to `(x, y)`.
    pub fn line_to(&mut self, x: f64, y: f64) {
        let (xi, yi) = self.encode_point(x, y);
        self.push(PlotterCommand::PenDown { x: xi, y: yi });
    }

    /// The buffered commands, in output order.
    pub fn commands(&self) -> &[PlotterCommand] {
        &self.commands
    }

    /// Whether the buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    fn encode_point(&self, x: f64, y: f64) -> (i32, i32) {
        let p = self.transforms.map_point(Point::new(x, -y));
        (p.x.round() as i32, p.y.round() as i32)
    }

    fn push(&mut self, cmd: PlotterCommand) {
        if let Some(prev) = self.commands.last().copied() {
            match (prev, cmd) {
                // Only the most recent pending move before the next draw
                // matters.
                (PlotterCommand::PenUp { .. }, PlotterCommand::PenUp { .. }) => {
                    self.commands.pop();
                }
                // Never draw to the same point twice in a row.
                (PlotterCommand::PenDown { x: px, y: py }, PlotterCommand::PenDown { x, y })
                    if px == x && py == y =>
                {
                    return;
                }
                _ => {}
            }
        }
        self.commands.push(cmd);
    }
}

impl fmt::Display for HpglEncoder {
    /// Renders the buffer as HPGL text: one `<KIND> <x> <y>;` command
    /// per line, each terminated by `;` and a newline. An empty buffer
    /// renders as the empty string.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for cmd in &self.commands {
            writeln!(f, "{};", cmd)?;
        }
        Ok(())
    }
}

impl DrawSink for HpglEncoder {
    fn move_to(&mut self, x: f64, y: f64) -> CanvasResult<()> {
        HpglEncoder::move_to(self, x, y);
        Ok(())
    }

    fn line_to(&mut self, x: f64, y: f64) -> CanvasResult<()> {
        HpglEncoder::line_to(self, x, y);
        Ok(())
    }
}
