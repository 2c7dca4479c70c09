//! Error types.
//!
//! Geometry never fails. Arrangement failures abort a whole reflow, so the
//! compositor keeps its previous map. Lookup failures are values the caller
//! is expected to handle (nothing under the cursor, widget not mounted).

use thiserror::Error;

use crate::engine::WidgetId;
use crate::geometry::Region;

/// Error returned by a widget's content renderer.
pub type RenderError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Failure while measuring or arranging the widget tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ArrangeError {
    /// The widget exists but is not ready to take part in layout.
    #[error("widget {0:?} is not mounted")]
    NotMounted(WidgetId),

    /// The handle no longer resolves in the widget arena.
    #[error("widget {0:?} is no longer in the tree")]
    StaleHandle(WidgetId),
}

/// Failure reported by the compositor.
#[derive(Debug, Error)]
pub enum CompositorError {
    /// The widget is not in the current map.
    #[error("widget {0:?} is not in the current map")]
    NoWidget(WidgetId),

    /// No visible widget covers the given screen cell.
    #[error("no widget under ({x}, {y})")]
    NoWidgetAt { x: i32, y: i32 },

    #[error(transparent)]
    Arrange(#[from] ArrangeError),

    /// A widget's content renderer failed.
    #[error("widget {widget:?} failed to render in {region:?}")]
    Render {
        widget: WidgetId,
        region: Region,
        #[source]
        source: RenderError,
    },
}

impl CompositorError {
    /// True for the lookup misses (`NoWidget`, `NoWidgetAt`).
    pub fn is_no_widget(&self) -> bool {
        matches!(self, Self::NoWidget(_) | Self::NoWidgetAt { .. })
    }
}

/// Invalid resolved style values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StyleError {
    #[error("spacing takes 1, 2 or 4 values, got {0}")]
    SpacingValues(usize),
}
