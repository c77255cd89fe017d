//! Plotter command representation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A single buffered plotter command with integer device coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlotterCommand {
    /// Move to `(x, y)` with the pen raised (no drawing).
    PenUp { x: i32, y: i32 },
    /// Move to `(x, y)` with the pen lowered, drawing a straight line.
    PenDown { x: i32, y: i32 },
}

impl PlotterCommand {
    /// Target coordinates of the command.
    pub fn target(&self) -> (i32, i32) {
        match *self {
            PlotterCommand::PenUp { x, y } | PlotterCommand::PenDown { x, y } => (x, y),
        }
    }

    /// Whether this command draws (pen down).
    pub fn is_pen_down(&self) -> bool {
        matches!(self, PlotterCommand::PenDown { .. })
    }
}

impl fmt::Display for PlotterCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PlotterCommand::PenUp { x, y } => write!(f, "PU {} {}", x, y),
            PlotterCommand::PenDown { x, y } => write!(f, "PD {} {}", x, y),
        }
    }
}
