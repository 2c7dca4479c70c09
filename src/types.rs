//! Core paint types.
//!
//! Widgets hand the compositor lines of styled [`Segment`]s. The compositor
//! slices and reassembles those lines but never looks inside a style; the
//! renderer turns them into terminal writes.

use unicode_width::UnicodeWidthChar;

// =============================================================================
// Color
// =============================================================================

/// RGBA color with 8-bit channels (0-255).
///
/// Special value: r=-1 means "terminal default" (let terminal pick),
/// r=-2 marks an ANSI palette color with the index stored in `g`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgba {
    pub r: i16,
    pub g: i16,
    pub b: i16,
    pub a: i16,
}

impl Rgba {
    /// Create a new RGBA color.
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as i16,
            g: g as i16,
            b: b as i16,
            a: a as i16,
        }
    }

    /// Create an opaque RGB color.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Terminal default color (let terminal decide).
    pub const TERMINAL_DEFAULT: Self = Self {
        r: -1,
        g: -1,
        b: -1,
        a: -1,
    };

    pub const BLACK: Self = Self::rgb(0, 0, 0);
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    pub const RED: Self = Self::rgb(255, 0, 0);
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    pub const BLUE: Self = Self::rgb(0, 0, 255);

    /// Create an ANSI palette color (0-255).
    pub const fn ansi(index: u8) -> Self {
        Self {
            r: -2,
            g: index as i16,
            b: 0,
            a: 255,
        }
    }

    #[inline]
    pub const fn is_terminal_default(&self) -> bool {
        self.r == -1
    }

    #[inline]
    pub const fn is_ansi(&self) -> bool {
        self.r == -2
    }

    /// Get ANSI palette index (only valid if is_ansi() returns true).
    #[inline]
    pub const fn ansi_index(&self) -> u8 {
        self.g as u8
    }
}

// =============================================================================
// Attributes (bitflags)
// =============================================================================

bitflags::bitflags! {
    /// Text attributes as a bitfield for efficient storage and comparison.
    ///
    /// Combine with bitwise OR: `Attr::BOLD | Attr::ITALIC`
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Attr: u8 {
        const NONE = 0;
        const BOLD = 1 << 0;
        const DIM = 1 << 1;
        const ITALIC = 1 << 2;
        const UNDERLINE = 1 << 3;
        const BLINK = 1 << 4;
        const INVERSE = 1 << 5;
        const HIDDEN = 1 << 6;
        const STRIKETHROUGH = 1 << 7;
    }
}

// =============================================================================
// Style
// =============================================================================

/// Visual style of a run of cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Style {
    pub fg: Rgba,
    pub bg: Rgba,
    pub attrs: Attr,
}

impl Style {
    pub const DEFAULT: Self = Self {
        fg: Rgba::TERMINAL_DEFAULT,
        bg: Rgba::TERMINAL_DEFAULT,
        attrs: Attr::NONE,
    };

    pub const fn new(fg: Rgba, bg: Rgba) -> Self {
        Self {
            fg,
            bg,
            attrs: Attr::NONE,
        }
    }

    pub const fn with_attrs(mut self, attrs: Attr) -> Self {
        self.attrs = attrs;
        self
    }
}

impl Default for Style {
    fn default() -> Self {
        Self::DEFAULT
    }
}

// =============================================================================
// Segment
// =============================================================================

/// A run of text sharing one style.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Segment {
    pub text: String,
    pub style: Style,
}

/// One rendered terminal line.
pub type Line = Vec<Segment>;

/// A block of rendered lines, top to bottom.
pub type Lines = Vec<Line>;

impl Segment {
    pub fn new(text: impl Into<String>, style: Style) -> Self {
        Self {
            text: text.into(),
            style,
        }
    }

    /// Unstyled text.
    pub fn plain(text: impl Into<String>) -> Self {
        Self::new(text, Style::DEFAULT)
    }

    /// `width` spaces in the given style.
    pub fn blank(width: usize, style: Style) -> Self {
        Self::new(" ".repeat(width), style)
    }

    /// Number of terminal cells the text occupies.
    pub fn cell_length(&self) -> usize {
        self.text.chars().map(char_width).sum()
    }

    /// Split at a cell position.
    ///
    /// A double-width character straddling the cut is replaced by a space on
    /// each side so both halves keep their exact cell lengths.
    pub fn split_cells(&self, cut: usize) -> (Segment, Segment) {
        let mut left = String::new();
        let mut position = 0;
        let mut chars = self.text.char_indices();

        while position < cut {
            let Some((index, ch)) = chars.next() else {
                return (self.clone(), Segment::new(String::new(), self.style));
            };
            let width = char_width(ch);
            if position + width > cut {
                // Wide character across the cut.
                left.push(' ');
                let rest = &self.text[index + ch.len_utf8()..];
                let right = format!(" {rest}");
                return (Segment::new(left, self.style), Segment::new(right, self.style));
            }
            left.push(ch);
            position += width;
        }

        let right = chars.as_str().to_string();
        (Segment::new(left, self.style), Segment::new(right, self.style))
    }
}

/// Display width of a character; control characters count as zero.
#[inline]
pub fn char_width(ch: char) -> usize {
    UnicodeWidthChar::width(ch).unwrap_or(0)
}

// =============================================================================
// Tests
// =============================================================================
