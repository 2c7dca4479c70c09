//! Screen updates and their terminal encoding.

use std::io::{self, Write};

use crossterm::cursor::MoveTo;
use crossterm::queue;
use crossterm::style::{
    Attribute, Color, Print, SetAttribute, SetBackgroundColor, SetForegroundColor,
};

use crate::geometry::Region;
use crate::types::{Attr, Lines, Rgba, Style};

// =============================================================================
// LayoutUpdate
// =============================================================================

/// Composited lines for one screen region.
///
/// Every line is exactly `region.width` cells and there are exactly
/// `region.height` lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayoutUpdate {
    pub region: Region,
    pub lines: Lines,
}

impl LayoutUpdate {
    pub fn new(region: Region, lines: Lines) -> Self {
        Self { region, lines }
    }

    /// Queue the update as terminal commands. Does not flush.
    pub fn render_to<W: Write>(&self, writer: &mut W) -> io::Result<()> {
        let mut state = StyleState::new();
        let x = clamp_u16(self.region.x);
        for (row, line) in self.lines.iter().enumerate() {
            let y = clamp_u16(self.region.y.saturating_add(row as i32));
            queue!(writer, MoveTo(x, y))?;
            for segment in line {
                state.apply(writer, segment.style)?;
                queue!(writer, Print(&segment.text))?;
            }
        }
        queue!(writer, SetAttribute(Attribute::Reset))
    }
}

#[inline]
fn clamp_u16(value: i32) -> u16 {
    value.clamp(0, i32::from(u16::MAX)) as u16
}

// =============================================================================
// StyleState
// =============================================================================

/// Tracks the terminal's current style so only changes are emitted.
#[derive(Debug, Default)]
struct StyleState {
    fg: Option<Rgba>,
    bg: Option<Rgba>,
    attrs: Attr,
}

impl StyleState {
    fn new() -> Self {
        Self::default()
    }

    fn apply<W: Write>(&mut self, writer: &mut W, style: Style) -> io::Result<()> {
        // Attributes can only be cleared by a full reset, which drops colors too.
        if style.attrs != self.attrs {
            queue!(writer, SetAttribute(Attribute::Reset))?;
            for attribute in attributes(style.attrs) {
                queue!(writer, SetAttribute(attribute))?;
            }
            self.fg = None;
            self.bg = None;
            self.attrs = style.attrs;
        }
        if self.fg != Some(style.fg) {
            queue!(writer, SetForegroundColor(color(style.fg)))?;
            self.fg = Some(style.fg);
        }
        if self.bg != Some(style.bg) {
            queue!(writer, SetBackgroundColor(color(style.bg)))?;
            self.bg = Some(style.bg);
        }
        Ok(())
    }
}

fn color(rgba: Rgba) -> Color {
    if rgba.is_terminal_default() {
        Color::Reset
    } else if rgba.is_ansi() {
        Color::AnsiValue(rgba.ansi_index())
    } else {
        Color::Rgb {
            r: rgba.r.clamp(0, 255) as u8,
            g: rgba.g.clamp(0, 255) as u8,
            b: rgba.b.clamp(0, 255) as u8,
        }
    }
}

fn attributes(attrs: Attr) -> impl Iterator<Item = Attribute> {
    [
        (Attr::BOLD, Attribute::Bold),
        (Attr::DIM, Attribute::Dim),
        (Attr::ITALIC, Attribute::Italic),
        (Attr::UNDERLINE, Attribute::Underlined),
        (Attr::BLINK, Attribute::SlowBlink),
        (Attr::INVERSE, Attribute::Reverse),
        (Attr::HIDDEN, Attribute::Hidden),
        (Attr::STRIKETHROUGH, Attribute::CrossedOut),
    ]
    .into_iter()
    .filter(move |(flag, _)| attrs.contains(*flag))
    .map(|(_, attribute)| attribute)
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Segment;

    fn encode(update: &LayoutUpdate) -> String {
        let mut buffer = Vec::new();
        update.render_to(&mut buffer).unwrap();
        String::from_utf8(buffer).unwrap()
    }

    #[test]
    fn test_render_to_moves_per_line() {
        let update = LayoutUpdate::new(
            Region::new(2, 1, 3, 2),
            vec![vec![Segment::plain("abc")], vec![Segment::plain("def")]],
        );
        let output = encode(&update);
        // MoveTo is 1-based row;column.
        let first = output.find("\x1b[2;3H").unwrap();
        let second = output.find("\x1b[3;3H").unwrap();
        assert!(first < output.find("abc").unwrap());
        assert!(second < output.find("def").unwrap());
        assert!(output.find("abc").unwrap() < second);
    }

    #[test]
    fn test_style_emitted_once_per_change() {
        let red = Style::new(Rgba::RED, Rgba::TERMINAL_DEFAULT);
        let update = LayoutUpdate::new(
            Region::new(0, 0, 4, 1),
            vec![vec![
                Segment::new("ab", red),
                Segment::new("cd", red),
            ]],
        );
        let output = encode(&update);
        assert_eq!(output.matches("\x1b[38;2;255;0;0m").count(), 1);
    }

    #[test]
    fn test_attributes_reset_between_styles() {
        let bold = Style::DEFAULT.with_attrs(Attr::BOLD);
        let update = LayoutUpdate::new(
            Region::new(0, 0, 2, 1),
            vec![vec![Segment::new("a", bold), Segment::plain("b")]],
        );
        let output = encode(&update);
        let bold_at = output.find("\x1b[1m").unwrap();
        let reset_after = output[bold_at..].find("\x1b[0m").unwrap();
        assert!(bold_at + reset_after < output.find('b').unwrap());
    }

    #[test]
    fn test_color_mapping() {
        assert_eq!(color(Rgba::TERMINAL_DEFAULT), Color::Reset);
        assert_eq!(color(Rgba::ansi(4)), Color::AnsiValue(4));
        assert_eq!(color(Rgba::rgb(1, 2, 3)), Color::Rgb { r: 1, g: 2, b: 3 });
    }

    #[test]
    fn test_negative_origin_clamped() {
        assert_eq!(clamp_u16(-4), 0);
        assert_eq!(clamp_u16(70_000), u16::MAX);
    }
}
