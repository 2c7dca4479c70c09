//! Test widgets shared by the unit tests.

use crate::engine::Widget;
use crate::error::RenderError;
use crate::geometry::Size;
use crate::styles::Styles;
use crate::types::{Lines, Segment, Style};

/// A widget with a fixed natural size that paints itself with one character.
#[derive(Debug, Clone)]
pub struct TestWidget {
    pub styles: Styles,
    pub content: Size,
    pub fill: char,
    pub style: Style,
    pub transparent: bool,
    pub fail: bool,
}

impl TestWidget {
    pub fn new() -> Self {
        Self {
            styles: Styles::default(),
            content: Size::ZERO,
            fill: '.',
            style: Style::DEFAULT,
            transparent: false,
            fail: false,
        }
    }

    pub fn styled(styles: Styles) -> Self {
        Self::new().with_styles(styles)
    }

    pub fn with_styles(mut self, styles: Styles) -> Self {
        self.styles = styles;
        self
    }

    pub fn with_content(mut self, width: i32, height: i32) -> Self {
        self.content = Size::new(width, height);
        self
    }

    pub fn with_fill(mut self, fill: char) -> Self {
        self.fill = fill;
        self
    }

    pub fn transparent(mut self) -> Self {
        self.transparent = true;
        self
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

impl Default for TestWidget {
    fn default() -> Self {
        Self::new()
    }
}

impl Widget for TestWidget {
    fn styles(&self) -> &Styles {
        &self.styles
    }

    fn content_width(&self, _container: Size, _viewport: Size) -> i32 {
        self.content.width
    }

    fn content_height(&self, _container: Size, _viewport: Size, _width: i32) -> i32 {
        self.content.height
    }

    fn render_lines(&self, size: Size) -> Result<Lines, RenderError> {
        if self.fail {
            return Err("render failed".into());
        }
        let text: String = std::iter::repeat_n(self.fill, size.width as usize).collect();
        Ok((0..size.height)
            .map(|_| vec![Segment::new(text.clone(), self.style)])
            .collect())
    }

    fn is_transparent(&self) -> bool {
        self.transparent
    }
}

