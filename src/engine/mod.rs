//! Widget engine - the arena that owns the widget tree.
//!
//! Widgets live in a generation-checked arena and are addressed by
//! [`WidgetId`] handles. Layout placements and compositor map entries store
//! handles, never the widgets themselves, so a removed widget can never be
//! reached through a stale entry: its handle simply stops resolving.
//!
//! ```text
//! WidgetTree
//!   root ──► Screen (vertical)
//!              ├── Header   (dock: top)
//!              ├── Body     (grid)
//!              │     ├── Cell
//!              │     └── Cell
//!              └── Footer   (dock: bottom)
//! ```

mod tree;
mod widget;

pub use tree::*;
pub use widget::*;
