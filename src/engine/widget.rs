//! The capability interface layout and compositing need from a widget.

use crate::error::RenderError;
use crate::geometry::Size;
use crate::styles::Styles;
use crate::types::Lines;

/// A node in the widget tree, as seen by layout and compositing.
///
/// Measurement methods must be pure: a container is measured by arranging
/// its children speculatively, possibly several times per reflow, and every
/// call with the same inputs must give the same answer.
pub trait Widget {
    /// Resolved style rules.
    fn styles(&self) -> &Styles;

    /// Natural content width, excluding padding and border.
    ///
    /// Only called for widgets without children; containers are measured
    /// from their arranged children.
    fn content_width(&self, _container: Size, _viewport: Size) -> i32 {
        0
    }

    /// Natural content height for a given content `width`, excluding padding
    /// and border.
    fn content_height(&self, _container: Size, _viewport: Size, _width: i32) -> i32 {
        0
    }

    /// Render the widget's whole region (`size` includes padding and border).
    ///
    /// Lines shorter or longer than `size.width`, and missing lines, are
    /// padded or cropped by the compositor.
    fn render_lines(&self, size: Size) -> Result<Lines, RenderError>;

    /// Transparent widgets are arranged and hit-tested but never painted.
    fn is_transparent(&self) -> bool {
        false
    }

    /// Called once per reflow with the final outer size, before children are
    /// arranged.
    fn pre_render(&mut self, _size: Size) {}
}
