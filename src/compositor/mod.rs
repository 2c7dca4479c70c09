//! Screen compositor.
//!
//! Owns the current screen map (widget → region, clip, order, virtual size)
//! and everything derived from it:
//!
//! ```text
//! reflow ──► CompositorMap ──► layers      (front-to-back paint order)
//!                          ├─► spatial map (hit-test prefilter)
//!                          └─► cuts        (per-line column breakpoints, lazy)
//!
//! render ──► widget lines (LRU cached) ──► chops per line ──► LayoutUpdate
//! ```
//!
//! The map is replaced wholesale on a successful reflow and left untouched
//! when a reflow fails.

mod render;
mod spatial_map;

pub use spatial_map::SpatialMap;

use std::cell::OnceCell;
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use lru::LruCache;
use tracing::debug;

use crate::config::CompositorConfig;
use crate::engine::{WidgetId, WidgetTree};
use crate::error::CompositorError;
use crate::geometry::{Offset, Region, Size};
use crate::pipeline::{CompositorMap, MapGeometry, arrange_root};
use crate::types::Lines;

// =============================================================================
// ReflowResult
// =============================================================================

/// What a reflow changed, relative to the previous map.
///
/// The three sets are disjoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReflowResult {
    /// Visible before, gone or invisible now.
    pub hidden: IndexSet<WidgetId>,
    /// Visible now, gone or invisible before.
    pub shown: IndexSet<WidgetId>,
    /// Visible before and after, with a different size.
    pub resized: IndexSet<WidgetId>,
}

impl ReflowResult {
    pub fn is_empty(&self) -> bool {
        self.hidden.is_empty() && self.shown.is_empty() && self.resized.is_empty()
    }
}

// =============================================================================
// Compositor
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct RenderKey {
    widget: WidgetId,
    size: Size,
    generation: u64,
}

/// Arranges the widget tree and paints it into terminal lines.
pub struct Compositor {
    config: CompositorConfig,
    size: Size,
    map: CompositorMap,
    /// Visible widgets, front to back.
    layers: Vec<WidgetId>,
    spatial_map: SpatialMap<WidgetId>,
    cuts: OnceCell<Vec<Vec<i32>>>,
    cache: LruCache<RenderKey, Arc<Lines>>,
}

impl Compositor {
    pub fn new() -> Self {
        Self::with_config(CompositorConfig::default())
    }

    pub fn with_config(config: CompositorConfig) -> Self {
        Self {
            spatial_map: SpatialMap::new(config.spatial_grid),
            cache: LruCache::new(config.render_cache_capacity),
            config,
            size: Size::ZERO,
            map: CompositorMap::new(),
            layers: Vec::new(),
            cuts: OnceCell::new(),
        }
    }

    pub fn config(&self) -> &CompositorConfig {
        &self.config
    }

    /// Screen size of the current map.
    pub fn size(&self) -> Size {
        self.size
    }

    /// The current map.
    pub fn map(&self) -> &CompositorMap {
        &self.map
    }

    // -------------------------------------------------------------------------
    // Reflow
    // -------------------------------------------------------------------------

    /// Arrange the tree under `root` for a screen of `size`.
    ///
    /// On failure the previous map stays in place.
    pub fn reflow(
        &mut self,
        tree: &mut WidgetTree,
        root: WidgetId,
        size: Size,
    ) -> Result<ReflowResult, CompositorError> {
        debug!(width = size.width, height = size.height, "reflow started");
        let map = match arrange_root(tree, root, size) {
            Ok(map) => map,
            Err(error) => {
                debug!(%error, "reflow aborted");
                return Err(error.into());
            }
        };

        let result = diff_maps(&self.map, &map);
        self.replace_map(map, size);
        debug!(
            widgets = self.map.len(),
            shown = result.shown.len(),
            hidden = result.hidden.len(),
            resized = result.resized.len(),
            "reflow finished"
        );
        Ok(result)
    }

    fn replace_map(&mut self, map: CompositorMap, size: Size) {
        let mut layers: Vec<(&WidgetId, &MapGeometry)> =
            map.iter().filter(|(_, geometry)| geometry.visible).collect();
        layers.sort_by(|(_, a), (_, b)| b.order.cmp(&a.order));
        self.layers = layers.into_iter().map(|(&id, _)| id).collect();

        let mut spatial_map = SpatialMap::new(self.config.spatial_grid);
        spatial_map.insert(self.layers.iter().map(|id| {
            let geometry = &map[id];
            (geometry.visible_region(), geometry.fixed, *id)
        }));
        self.spatial_map = spatial_map;

        self.map = map;
        self.size = size;
        self.cuts = OnceCell::new();
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Geometry of a mapped widget.
    pub fn find_widget(&self, widget: WidgetId) -> Result<&MapGeometry, CompositorError> {
        self.map.get(&widget).ok_or(CompositorError::NoWidget(widget))
    }

    /// Screen origin of a mapped widget.
    pub fn get_offset(&self, widget: WidgetId) -> Result<Offset, CompositorError> {
        self.find_widget(widget).map(|geometry| geometry.region.origin())
    }

    pub fn contains(&self, widget: WidgetId) -> bool {
        self.map.contains_key(&widget)
    }

    /// Every mapped widget, in arrangement order.
    pub fn widgets(&self) -> impl Iterator<Item = WidgetId> + '_ {
        self.map.keys().copied()
    }

    /// Visible widgets, front to back.
    pub fn layers(&self) -> &[WidgetId] {
        &self.layers
    }

    /// Visible widgets with a non-empty visible region, front to back, with
    /// their region and clip.
    pub fn visible_widgets(&self) -> IndexMap<WidgetId, (Region, Region)> {
        let screen = self.size.region();
        self.layers
            .iter()
            .filter_map(|id| {
                let geometry = self.map.get(id)?;
                let visible = geometry.visible_region().intersection(&screen);
                (!visible.is_empty()).then_some((*id, (geometry.region, geometry.clip)))
            })
            .collect()
    }

    /// The front-most visible widget under a screen cell.
    pub fn get_widget_at(&self, x: i32, y: i32) -> Result<(WidgetId, Region), CompositorError> {
        self.get_widgets_at(x, y)
            .next()
            .ok_or(CompositorError::NoWidgetAt { x, y })
    }

    /// Every visible widget under a screen cell, front to back.
    pub fn get_widgets_at(
        &self,
        x: i32,
        y: i32,
    ) -> impl Iterator<Item = (WidgetId, Region)> + '_ {
        let candidates = self
            .spatial_map
            .get_values_in_region(Region::new(x, y, 1, 1));
        self.layers.iter().filter_map(move |id| {
            if !candidates.contains(id) {
                return None;
            }
            let geometry = self.map.get(id)?;
            geometry
                .visible_region()
                .contains_point(x, y)
                .then_some((*id, geometry.region))
        })
    }
}

impl Default for Compositor {
    fn default() -> Self {
        Self::new()
    }
}

/// Shown, hidden and resized widgets between two maps.
fn diff_maps(old: &CompositorMap, new: &CompositorMap) -> ReflowResult {
    let visible = |map: &CompositorMap| -> IndexSet<WidgetId> {
        map.iter()
            .filter(|(_, geometry)| geometry.visible)
            .map(|(&id, _)| id)
            .collect()
    };
    let old_visible = visible(old);
    let new_visible = visible(new);

    let resized = new_visible
        .intersection(&old_visible)
        .filter(|id| old[*id].region.size() != new[*id].region.size())
        .copied()
        .collect();

    ReflowResult {
        hidden: old_visible.difference(&new_visible).copied().collect(),
        shown: new_visible.difference(&old_visible).copied().collect(),
        resized,
    }
}

// =============================================================================
// Tests
// =============================================================================
