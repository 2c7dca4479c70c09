//! Layout Module - arrange a container's children.
//!
//! # Architecture
//!
//! ```text
//! Styles ──► box model ──► strategy (vertical / horizontal / dock / grid / center)
//!                               │
//!                               ▼
//!                     ArrangeResult { placements, widgets }
//! ```
//!
//! Every strategy is a pure function of the tree snapshot and the available
//! size. Containers are measured by arranging their children speculatively,
//! so the same container may be arranged several times in one reflow and
//! must give identical results each time.
//!
//! Docked children are taken out of the flow first whatever the container's
//! layout; the remaining children are arranged in what the docks leave.

mod box_model;
mod center;
mod dock;
mod fraction;
mod grid;
mod horizontal;
mod placement;
mod resolve;
mod vertical;

pub use box_model::*;
pub use fraction::*;
pub use placement::*;
pub use resolve::*;

pub use dock::{DockArrangement, arrange_docks};

use tracing::trace;

use crate::engine::{WidgetId, WidgetTree};
use crate::error::ArrangeError;
use crate::geometry::Size;
use crate::styles::{Axis, LayoutKind, Overflow, Styles};

// =============================================================================
// Context
// =============================================================================

/// Read-only view of the tree shared by every layout call in a pass.
#[derive(Clone, Copy)]
pub struct LayoutContext<'a> {
    pub tree: &'a WidgetTree,
    /// Terminal size, for viewport units.
    pub viewport: Size,
}

impl<'a> LayoutContext<'a> {
    pub fn new(tree: &'a WidgetTree, viewport: Size) -> Self {
        Self { tree, viewport }
    }

    /// Styles of a mounted widget.
    #[inline]
    pub fn styles(&self, id: WidgetId) -> Result<&'a Styles, ArrangeError> {
        self.tree.styles(id)
    }

    /// Children taking part in layout (`display` not `none`), in order.
    ///
    /// Fails if any child is not mounted.
    pub fn displayed_children(&self, id: WidgetId) -> Result<Vec<WidgetId>, ArrangeError> {
        let mut displayed = Vec::new();
        for &child in self.tree.children(id) {
            if self.styles(child)?.is_displayed() {
                displayed.push(child);
            }
        }
        Ok(displayed)
    }

    /// Box model for a widget, measuring content through the tree.
    pub fn box_model(
        &self,
        id: WidgetId,
        container: Size,
        width_fraction: Fraction,
        height_fraction: Fraction,
    ) -> Result<BoxModel, ArrangeError> {
        get_box_model(
            self.styles(id)?,
            container,
            self.viewport,
            width_fraction,
            height_fraction,
            |container, _| self.content_width(id, container),
            |container, _, width| self.content_height(id, container, width),
        )
    }

    /// Natural content width.
    ///
    /// Leaves answer themselves; containers are arranged with no space and
    /// measured by the extent of what they place.
    pub fn content_width(&self, id: WidgetId, container: Size) -> Result<i32, ArrangeError> {
        let widget = self.tree.mounted(id)?;
        if self.tree.children(id).is_empty() {
            return Ok(widget.content_width(container, self.viewport));
        }
        let styles = widget.styles();
        let mut width = self.measure_children(id, Size::ZERO, Axis::Horizontal)?;
        if styles.overflow_y == Overflow::Scroll {
            width += styles.scrollbar_size_vertical;
        }
        Ok(width)
    }

    /// Natural content height for a content `width`.
    pub fn content_height(
        &self,
        id: WidgetId,
        container: Size,
        width: i32,
    ) -> Result<i32, ArrangeError> {
        let widget = self.tree.mounted(id)?;
        if self.tree.children(id).is_empty() {
            return Ok(widget.content_height(container, self.viewport, width));
        }
        let styles = widget.styles();
        let mut height = self.measure_children(id, Size::new(width, 0), Axis::Vertical)?;
        if styles.overflow_x == Overflow::Scroll {
            height += styles.scrollbar_size_horizontal;
        }
        Ok(height)
    }

    /// Extent along `axis` of what a container places within `size`.
    ///
    /// Docks are measured against an unbounded axis so they add to the
    /// natural size instead of being squeezed out by it.
    fn measure_children(&self, id: WidgetId, size: Size, axis: Axis) -> Result<i32, ArrangeError> {
        let kind = self.styles(id)?.layout_kind();
        let children = self.displayed_children(id)?;
        let mut any_docked = false;
        for &child in &children {
            any_docked |= self.styles(child)?.is_docked();
        }
        if any_docked {
            return dock::measure(self, id, &children, size, kind, axis);
        }

        let total = kind.arrange(self, id, &children, size)?.total_region();
        Ok(match axis {
            Axis::Horizontal => total.right(),
            Axis::Vertical => total.bottom(),
        })
    }
}

// =============================================================================
// Dispatch
// =============================================================================

impl LayoutKind {
    /// Arrange `children` within `size` with this strategy.
    ///
    /// `children` must already exclude undisplayed widgets.
    pub fn arrange(
        self,
        ctx: &LayoutContext<'_>,
        parent: WidgetId,
        children: &[WidgetId],
        size: Size,
    ) -> Result<ArrangeResult, ArrangeError> {
        match self {
            LayoutKind::Vertical => vertical::arrange(ctx, children, size),
            LayoutKind::Horizontal => horizontal::arrange(ctx, children, size),
            LayoutKind::Dock => dock::arrange(ctx, parent, children, size, LayoutKind::Dock),
            LayoutKind::Grid => grid::arrange(ctx, parent, children, size),
            LayoutKind::Center => center::arrange(ctx, children, size),
        }
    }
}

/// Arrange the displayed children of `parent` within `size`.
///
/// Placements are relative to the container's content origin.
pub fn arrange(
    ctx: &LayoutContext<'_>,
    parent: WidgetId,
    size: Size,
) -> Result<ArrangeResult, ArrangeError> {
    let kind = ctx.styles(parent)?.layout_kind();
    let children = ctx.displayed_children(parent)?;

    let mut any_docked = false;
    for &child in &children {
        any_docked |= ctx.styles(child)?.is_docked();
    }

    let result = if any_docked && kind != LayoutKind::Dock {
        dock::arrange(ctx, parent, &children, size, kind)?
    } else {
        kind.arrange(ctx, parent, &children, size)?
    };

    trace!(
        widget = ?parent,
        layout = ?kind,
        width = size.width,
        height = size.height,
        placements = result.placements.len(),
        "arranged container"
    );
    Ok(result)
}
