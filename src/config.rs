//! Compositor configuration.

use std::num::NonZeroUsize;

use crate::geometry::Size;
use crate::types::Style;

/// Default coarse cell size of the spatial map.
pub const DEFAULT_SPATIAL_GRID: Size = Size::new(100, 20);

/// Default number of widget renders kept in the render cache.
pub const DEFAULT_RENDER_CACHE_CAPACITY: usize = 256;

/// Tunables for a [`Compositor`](crate::compositor::Compositor).
#[derive(Debug, Clone, PartialEq)]
pub struct CompositorConfig {
    /// Size of one spatial map bucket, in cells.
    pub spatial_grid: Size,
    /// Maximum number of cached widget renders.
    pub render_cache_capacity: NonZeroUsize,
    /// Style of spans no widget covers.
    pub blank_style: Style,
}

impl Default for CompositorConfig {
    fn default() -> Self {
        Self {
            spatial_grid: DEFAULT_SPATIAL_GRID,
            render_cache_capacity: NonZeroUsize::new(DEFAULT_RENDER_CACHE_CAPACITY)
                .unwrap_or(NonZeroUsize::MIN),
            blank_style: Style::DEFAULT,
        }
    }
}

impl CompositorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the spatial map bucket size. Zero dimensions are raised to 1.
    pub fn with_spatial_grid(mut self, width: i32, height: i32) -> Self {
        self.spatial_grid = Size::new(width.max(1), height.max(1));
        self
    }

    pub fn with_render_cache_capacity(mut self, capacity: NonZeroUsize) -> Self {
        self.render_cache_capacity = capacity;
        self
    }

    pub fn with_blank_style(mut self, style: Style) -> Self {
        self.blank_style = style;
        self
    }
}
