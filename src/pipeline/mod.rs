//! Arrangement Pipeline
//!
//! Turns a widget tree and a screen size into the compositor map.
//!
//! # Pipeline Architecture
//!
//! ```text
//! WidgetTree → layout::arrange (per container) → arrange_root → CompositorMap
//! ```
//!
//! ## Data Flow
//!
//! 1. **arrange_root** - Places the root over the whole screen
//! 2. **layout::arrange** - Places each container's children in its content region
//! 3. **MapGeometry** - Absolute region, clip, order and virtual size per widget
//!
//! ## Key Design Principles
//!
//! - **Pure Layout**: strategies read the tree and return placements
//! - **All or Nothing**: any failure leaves no partial map behind
//! - **Handles Only**: the map stores [`WidgetId`](crate::engine::WidgetId)s, never widgets

pub mod arrange;

pub use arrange::{CompositorMap, MapGeometry, Order, OrderKey, arrange_root};
