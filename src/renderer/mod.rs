//! Terminal renderer - the "blind" output layer.
//!
//! The renderer knows only about lines of styled segments. It doesn't
//! understand widgets or layout: the compositor hands it finished
//! [`LayoutUpdate`]s and it turns them into terminal commands.
//!
//! - [`lines`] - cell-accurate slicing, padding and cropping of lines
//! - [`LayoutUpdate`] - one composited region and its encoding
//! - [`TerminalWriter`] - synchronized, flushed output of whole frames

pub mod lines;
pub mod output;
pub mod terminal;

pub use lines::{adjust_width, blank, cell_length, crop, divide, line_text, simplify};
pub use output::LayoutUpdate;
pub use terminal::TerminalWriter;
