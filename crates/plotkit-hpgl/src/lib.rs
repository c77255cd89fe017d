//! # PlotKit HPGL
//!
//! Encodes `move_to`/`line_to` drawing calls into an HPGL-style pen
//! plotter command stream: `PU x y;` (pen up, travel) and `PD x y;`
//! (pen down, draw), integer coordinates, one command per line.
//!
//! [`HpglEncoder`] implements the canvas drawing-sink capability, so it
//! can be attached to a [`plotkit_canvas::Canvas`] as a terminal output,
//! or driven directly.

pub mod command;
pub mod encoder;

pub use command::PlotterCommand;
pub use encoder::HpglEncoder;
