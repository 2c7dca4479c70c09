//! Resolved styles.
//!
//! The stylesheet parser and cascade live outside this crate. Layout only
//! consumes the result: a [`Styles`] snapshot per widget. Rules that may be
//! left unset (width, height, min/max) are `Option`s so "explicitly set"
//! and "defaulted" stay distinguishable.

mod scalar;

pub use scalar::*;

use crate::geometry::{Offset, Spacing};

// =============================================================================
// Enums
// =============================================================================

/// How a container arranges its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum LayoutKind {
    /// Stack top to bottom.
    #[default]
    Vertical = 0,
    /// Stack left to right.
    Horizontal = 1,
    /// Children docked to container edges.
    Dock = 2,
    /// Row-major grid of tracks.
    Grid = 3,
    /// Every child centered over the whole container.
    Center = 4,
}

/// Whether width/height include padding and border.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum BoxSizing {
    /// Width/height describe the outer size; the gutter eats into content.
    #[default]
    BorderBox = 0,
    /// Width/height describe the content; the gutter is added outside.
    ContentBox = 1,
}

/// Edge a docked widget attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum DockEdge {
    Top = 0,
    Right = 1,
    Bottom = 2,
    Left = 3,
}

/// Horizontal alignment of a child within its available width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum AlignHorizontal {
    #[default]
    Left = 0,
    Center = 1,
    Right = 2,
}

/// Vertical alignment of a child within its available height.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum AlignVertical {
    #[default]
    Top = 0,
    Middle = 1,
    Bottom = 2,
}

impl AlignHorizontal {
    /// Offset of an item of `size` within `space`.
    pub const fn offset(&self, space: i32, size: i32) -> i32 {
        match self {
            Self::Left => 0,
            Self::Center => (space - size) / 2,
            Self::Right => space - size,
        }
    }
}

impl AlignVertical {
    /// Offset of an item of `size` within `space`.
    pub const fn offset(&self, space: i32, size: i32) -> i32 {
        match self {
            Self::Top => 0,
            Self::Middle => (space - size) / 2,
            Self::Bottom => space - size,
        }
    }
}

/// Scroll behavior along one axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Overflow {
    /// Content is clipped, no scrollbar.
    #[default]
    Hidden = 0,
    /// Scrollbar always shown.
    Scroll = 1,
    /// Scrollbar shown when content overflows.
    Auto = 2,
}

/// Whether an arranged widget is painted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Visibility {
    #[default]
    Visible = 0,
    /// Takes up space but is neither painted nor hit-tested.
    Hidden = 1,
}

/// Whether a widget takes part in layout at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(u8)]
pub enum Display {
    #[default]
    Block = 0,
    /// Excluded from arrangement.
    None = 1,
}

// =============================================================================
// Grid
// =============================================================================

/// Grid container rules.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct GridStyles {
    /// Column track sizes, repeated to fill `size_columns`.
    pub columns: Vec<Scalar>,
    /// Row track sizes, repeated to fill the row count.
    pub rows: Vec<Scalar>,
    /// Number of columns (at least 1).
    pub size_columns: u16,
    /// Number of rows, or 0 to grow with the children.
    pub size_rows: u16,
    /// Space between rows.
    pub gutter_horizontal: i32,
    /// Space between columns.
    pub gutter_vertical: i32,
    /// Draw keylines: inset the grid by one cell and reserve the gutters.
    pub keyline: bool,
}

// =============================================================================
// Styles
// =============================================================================

/// Resolved style rules for one widget.
#[derive(Debug, Clone, PartialEq)]
pub struct Styles {
    /// Layout for children. `None` means the default vertical stack.
    pub layout: Option<LayoutKind>,

    pub width: Option<Scalar>,
    pub height: Option<Scalar>,
    pub min_width: Option<Scalar>,
    pub min_height: Option<Scalar>,
    pub max_width: Option<Scalar>,
    pub max_height: Option<Scalar>,
    pub box_sizing: BoxSizing,

    pub padding: Spacing,
    pub border: Spacing,
    pub margin: Spacing,

    /// Explicit translation applied after layout.
    pub offset: Offset,

    /// Edge to dock to when the parent uses [`LayoutKind::Dock`].
    pub dock: Option<DockEdge>,
    /// Paint order among siblings; also the dock layer.
    pub z_index: i32,

    pub align_horizontal: AlignHorizontal,
    pub align_vertical: AlignVertical,

    pub overflow_x: Overflow,
    pub overflow_y: Overflow,
    /// Width of the vertical scrollbar.
    pub scrollbar_size_vertical: i32,
    /// Height of the horizontal scrollbar.
    pub scrollbar_size_horizontal: i32,

    pub grid: GridStyles,
    pub column_span: u16,
    pub row_span: u16,

    pub visibility: Visibility,
    pub display: Display,
}

impl Default for Styles {
    fn default() -> Self {
        Self {
            layout: None,
            width: None,
            height: None,
            min_width: None,
            min_height: None,
            max_width: None,
            max_height: None,
            box_sizing: BoxSizing::BorderBox,
            padding: Spacing::ZERO,
            border: Spacing::ZERO,
            margin: Spacing::ZERO,
            offset: Offset::ZERO,
            dock: None,
            z_index: 0,
            align_horizontal: AlignHorizontal::Left,
            align_vertical: AlignVertical::Top,
            overflow_x: Overflow::Hidden,
            overflow_y: Overflow::Hidden,
            scrollbar_size_vertical: 2,
            scrollbar_size_horizontal: 1,
            grid: GridStyles::default(),
            column_span: 1,
            row_span: 1,
            visibility: Visibility::Visible,
            display: Display::Block,
        }
    }
}

impl Styles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Padding plus border.
    #[inline]
    pub fn gutter(&self) -> Spacing {
        self.padding + self.border
    }

    #[inline]
    pub fn is_displayed(&self) -> bool {
        self.display == Display::Block
    }

    #[inline]
    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    #[inline]
    pub fn is_docked(&self) -> bool {
        self.dock.is_some()
    }

    /// Layout used when the widget has children.
    #[inline]
    pub fn layout_kind(&self) -> LayoutKind {
        self.layout.unwrap_or_default()
    }

    /// True if either axis may show a scrollbar.
    pub fn is_scrollable(&self) -> bool {
        self.overflow_x != Overflow::Hidden || self.overflow_y != Overflow::Hidden
    }

    // -------------------------------------------------------------------------
    // Builders
    // -------------------------------------------------------------------------

    pub fn with_layout(mut self, layout: LayoutKind) -> Self {
        self.layout = Some(layout);
        self
    }

    pub fn with_width(mut self, width: Scalar) -> Self {
        self.width = Some(width);
        self
    }

    pub fn with_height(mut self, height: Scalar) -> Self {
        self.height = Some(height);
        self
    }

    pub fn with_size(self, width: Scalar, height: Scalar) -> Self {
        self.with_width(width).with_height(height)
    }

    pub fn with_min_width(mut self, value: Scalar) -> Self {
        self.min_width = Some(value);
        self
    }

    pub fn with_min_height(mut self, value: Scalar) -> Self {
        self.min_height = Some(value);
        self
    }

    pub fn with_max_width(mut self, value: Scalar) -> Self {
        self.max_width = Some(value);
        self
    }

    pub fn with_max_height(mut self, value: Scalar) -> Self {
        self.max_height = Some(value);
        self
    }

    pub fn with_box_sizing(mut self, box_sizing: BoxSizing) -> Self {
        self.box_sizing = box_sizing;
        self
    }

    pub fn with_padding(mut self, padding: Spacing) -> Self {
        self.padding = padding;
        self
    }

    pub fn with_border(mut self, border: Spacing) -> Self {
        self.border = border;
        self
    }

    pub fn with_margin(mut self, margin: Spacing) -> Self {
        self.margin = margin;
        self
    }

    pub fn with_offset(mut self, offset: Offset) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_dock(mut self, edge: DockEdge) -> Self {
        self.dock = Some(edge);
        self
    }

    pub fn with_z_index(mut self, z: i32) -> Self {
        self.z_index = z;
        self
    }

    pub fn with_align(mut self, horizontal: AlignHorizontal, vertical: AlignVertical) -> Self {
        self.align_horizontal = horizontal;
        self.align_vertical = vertical;
        self
    }

    pub fn with_overflow(mut self, x: Overflow, y: Overflow) -> Self {
        self.overflow_x = x;
        self.overflow_y = y;
        self
    }

    pub fn with_grid(mut self, grid: GridStyles) -> Self {
        self.layout = Some(LayoutKind::Grid);
        self.grid = grid;
        self
    }

    pub fn with_span(mut self, columns: u16, rows: u16) -> Self {
        self.column_span = columns;
        self.row_span = rows;
        self
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn with_display(mut self, display: Display) -> Self {
        self.display = display;
        self
    }
}
