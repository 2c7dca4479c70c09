//! # spark-compositor
//!
//! Screen compositor and layout engine for terminal user interfaces.
//!
//! ## Architecture
//!
//! Widgets live in a [`WidgetTree`] arena and expose their resolved
//! [`Styles`], natural content size and rendered lines through the
//! [`Widget`] trait. The compositor arranges the tree into a screen map and
//! paints it:
//! ```text
//! WidgetTree → layout strategies → arrangement driver → CompositorMap → cuts/chops → LayoutUpdate
//! ```
//!
//! All sizes are resolved with exact fractions and truncated to whole cells
//! only at final offsets, so rounding never drifts across many tracks.
//!
//! ## Modules
//!
//! - [`geometry`] - Offset, Size, Region, Spacing
//! - [`styles`] - Scalars and the resolved style snapshot
//! - [`engine`] - Widget arena and the `Widget` capability trait
//! - [`layout`] - Scalar resolver, box model, vertical/horizontal/dock/grid/center
//! - [`pipeline`] - Arrangement driver producing the compositor map
//! - [`compositor`] - Reflow diffs, rendering, hit-testing
//! - [`renderer`] - Line operations and terminal output

pub mod compositor;
pub mod config;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod layout;
pub mod pipeline;
pub mod renderer;
pub mod styles;
pub mod types;

#[cfg(test)]
mod testing;

// Re-export commonly used items
pub use types::*;

pub use compositor::{Compositor, ReflowResult, SpatialMap};
pub use config::CompositorConfig;
pub use engine::{ScrollbarChrome, Widget, WidgetId, WidgetTree};
pub use error::{ArrangeError, CompositorError, RenderError, StyleError};
pub use geometry::{Offset, Region, Size, Spacing};
pub use layout::{ArrangeResult, BoxModel, Fraction, LayoutContext, WidgetPlacement};
pub use pipeline::{CompositorMap, MapGeometry, Order, OrderKey, arrange_root};
pub use renderer::{LayoutUpdate, TerminalWriter};
pub use styles::{
    AlignHorizontal, AlignVertical, Axis, BoxSizing, Display, DockEdge, GridStyles, LayoutKind,
    Overflow, Scalar, Styles, Unit, Visibility,
};
