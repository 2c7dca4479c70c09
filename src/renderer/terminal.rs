//! Terminal writer for composited updates.
//!
//! Each batch of updates is wrapped in a synchronized-update block so the
//! terminal shows either the old frame or the new one, never a mix.
//!
//! # Algorithm
//!
//! 1. Begin synchronized update
//! 2. For each update: move to each line of its region, write styled text
//! 3. End synchronized update
//! 4. Flush (one syscall for the whole frame)

use std::io::{self, Write};

use crossterm::cursor::{Hide, Show};
use crossterm::queue;
use crossterm::style::{Attribute, SetAttribute};
use crossterm::terminal::{
    BeginSynchronizedUpdate, Clear, ClearType, EndSynchronizedUpdate, EnterAlternateScreen,
    LeaveAlternateScreen,
};

use super::output::LayoutUpdate;

/// Writes [`LayoutUpdate`]s to a terminal.
pub struct TerminalWriter<W: Write> {
    writer: W,
}

impl TerminalWriter<io::Stdout> {
    /// Writer on standard output.
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write one update.
    pub fn write_update(&mut self, update: &LayoutUpdate) -> io::Result<()> {
        self.write_updates(std::iter::once(update))
    }

    /// Write several updates as one frame.
    pub fn write_updates<'u, I>(&mut self, updates: I) -> io::Result<()>
    where
        I: IntoIterator<Item = &'u LayoutUpdate>,
    {
        queue!(self.writer, BeginSynchronizedUpdate)?;
        for update in updates {
            update.render_to(&mut self.writer)?;
        }
        queue!(self.writer, EndSynchronizedUpdate)?;
        self.writer.flush()
    }

    /// Enter fullscreen mode (alternate screen buffer, hidden cursor).
    pub fn enter_fullscreen(&mut self) -> io::Result<()> {
        queue!(
            self.writer,
            EnterAlternateScreen,
            Hide,
            Clear(ClearType::All)
        )?;
        self.writer.flush()
    }

    /// Leave fullscreen mode.
    pub fn exit_fullscreen(&mut self) -> io::Result<()> {
        queue!(
            self.writer,
            SetAttribute(Attribute::Reset),
            Show,
            LeaveAlternateScreen
        )?;
        self.writer.flush()
    }

    pub fn get_ref(&self) -> &W {
        &self.writer
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Region;
    use crate::types::Segment;

    #[test]
    fn test_updates_are_synchronized() {
        let mut writer = TerminalWriter::new(Vec::new());
        let update = LayoutUpdate::new(Region::new(0, 0, 2, 1), vec![vec![Segment::plain("hi")]]);
        writer.write_update(&update).unwrap();

        let output = String::from_utf8(writer.into_inner()).unwrap();
        assert!(output.starts_with("\x1b[?2026h"));
        assert!(output.ends_with("\x1b[?2026l"));
        assert!(output.contains("hi"));
    }

    #[test]
    fn test_multiple_updates_one_frame() {
        let mut writer = TerminalWriter::new(Vec::new());
        let updates = [
            LayoutUpdate::new(Region::new(0, 0, 1, 1), vec![vec![Segment::plain("a")]]),
            LayoutUpdate::new(Region::new(5, 3, 1, 1), vec![vec![Segment::plain("b")]]),
        ];
        writer.write_updates(&updates).unwrap();

        let output = String::from_utf8(writer.into_inner()).unwrap();
        assert_eq!(output.matches("\x1b[?2026h").count(), 1);
        assert!(output.contains("\x1b[4;6H"));
    }

    #[test]
    fn test_fullscreen_round_trip() {
        let mut writer = TerminalWriter::new(Vec::new());
        writer.enter_fullscreen().unwrap();
        writer.exit_fullscreen().unwrap();

        let output = String::from_utf8(writer.into_inner()).unwrap();
        assert!(output.contains("\x1b[?1049h"));
        assert!(output.contains("\x1b[?1049l"));
        assert!(output.contains("\x1b[?25l"));
        assert!(output.contains("\x1b[?25h"));
    }
}
