//! Arrangement driver - turn the widget tree into a screen map.
//!
//! Walks the tree from the root, arranging each container's children within
//! its content region and recording every widget's absolute region, clip,
//! paint order and virtual size.
//!
//! # Coordinate spaces
//!
//! ```text
//! placement.region            relative to the container's content origin
//!   + container origin        absolute, unscrolled
//!   - scroll offset           absolute (skipped for fixed placements)
//! clip = parent clip ∩ container content region
//! ```
//!
//! The driver keeps no state between calls. A failure anywhere returns an
//! error and nothing else: the caller's previous map is untouched.

use indexmap::IndexMap;
use smallvec::{SmallVec, smallvec};

use crate::engine::{WidgetId, WidgetTree};
use crate::error::ArrangeError;
use crate::geometry::{Region, Size};
use crate::layout::{self, ArrangeResult, LayoutContext};
use crate::styles::Overflow;

// =============================================================================
// Order
// =============================================================================

/// One level of a paint order path.
///
/// Compared field by field: scrollbar chrome sits above docks, docks sit
/// above flowed content, then higher `z` wins, then the later placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OrderKey {
    pub tier: u8,
    pub z: i32,
    pub seq: u32,
}

impl OrderKey {
    pub const CONTENT_TIER: u8 = 0;
    pub const DOCK_TIER: u8 = 1;
    pub const CHROME_TIER: u8 = 2;

    pub const ROOT: Self = Self::content(0, 0);

    pub const fn content(z: i32, seq: u32) -> Self {
        Self {
            tier: Self::CONTENT_TIER,
            z,
            seq,
        }
    }

    /// Docked widgets stay in place while content scrolls underneath.
    pub const fn docked(z: i32, seq: u32) -> Self {
        Self {
            tier: Self::DOCK_TIER,
            z,
            seq,
        }
    }

    pub const fn chrome(seq: u32) -> Self {
        Self {
            tier: Self::CHROME_TIER,
            z: 0,
            seq,
        }
    }
}

/// Hierarchical paint order: the path of keys from the root.
///
/// Sorting ascending gives back-to-front order. A descendant always sorts
/// after (above) its ancestors.
pub type Order = SmallVec<[OrderKey; 8]>;

// =============================================================================
// Map
// =============================================================================

/// Where a widget ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapGeometry {
    /// Absolute region, style offset and scrolling applied.
    pub region: Region,
    pub order: Order,
    /// Visible window through the ancestors' content regions.
    pub clip: Region,
    /// Full scrollable extent of the content.
    pub virtual_size: Size,
    /// Region minus padding and border.
    pub container_size: Size,
    /// Region relative to the parent's content origin, before scrolling.
    pub virtual_region: Region,
    /// False for widgets (or descendants of widgets) with `visibility: hidden`.
    pub visible: bool,
    /// Placed independently of the parent's scroll offset.
    pub fixed: bool,
}

impl MapGeometry {
    /// The part of the region that can actually be seen.
    #[inline]
    pub fn visible_region(&self) -> Region {
        self.region.intersection(&self.clip)
    }
}

/// Widget to geometry, in arrangement order.
pub type CompositorMap = IndexMap<WidgetId, MapGeometry>;

// =============================================================================
// Driver
// =============================================================================

/// Arrange the tree under `root` on a screen of `size`.
///
/// Calls [`Widget::pre_render`](crate::engine::Widget::pre_render) on each
/// placed widget with its final size before arranging its children.
pub fn arrange_root(
    tree: &mut WidgetTree,
    root: WidgetId,
    size: Size,
) -> Result<CompositorMap, ArrangeError> {
    let offset = tree.styles(root)?.offset;
    let screen = size.region();
    let mut arranger = Arranger {
        tree,
        viewport: size,
        map: CompositorMap::new(),
    };
    arranger.add_widget(
        root,
        Placed {
            region: screen.translate(offset),
            virtual_region: screen,
            order: smallvec![OrderKey::ROOT],
            clip: screen,
            visible: true,
            fixed: false,
        },
    )?;
    Ok(arranger.map)
}

struct Placed {
    region: Region,
    virtual_region: Region,
    order: Order,
    clip: Region,
    visible: bool,
    fixed: bool,
}

struct Arranger<'t> {
    tree: &'t mut WidgetTree,
    viewport: Size,
    map: CompositorMap,
}

impl Arranger<'_> {
    fn add_widget(&mut self, id: WidgetId, placed: Placed) -> Result<(), ArrangeError> {
        self.tree.mounted(id)?;
        if let Some(widget) = self.tree.get_mut(id) {
            widget.pre_render(placed.region.size());
        }

        let styles = self.tree.styles(id)?;
        let visible = placed.visible && styles.is_visible();
        let container_region = placed.region.shrink(styles.gutter());

        if self.tree.children(id).is_empty() {
            self.map.insert(
                id,
                MapGeometry {
                    region: placed.region,
                    order: placed.order,
                    clip: placed.clip,
                    virtual_size: placed.region.size(),
                    container_size: container_region.size(),
                    virtual_region: placed.virtual_region,
                    visible,
                    fixed: placed.fixed,
                },
            );
            return Ok(());
        }

        let scrollable = self.arrange_container(id, container_region)?;
        let child_region = scrollable.child_region;
        let scroll = self.tree.scroll_offset(id);
        let sub_clip = placed.clip.intersection(&child_region);
        let total = child_region
            .reset_offset()
            .union(&scrollable.arrangement.total_region());

        self.map.insert(
            id,
            MapGeometry {
                region: placed.region,
                order: placed.order.clone(),
                clip: placed.clip,
                virtual_size: total.size(),
                container_size: container_region.size(),
                virtual_region: placed.virtual_region,
                visible,
                fixed: placed.fixed,
            },
        );

        for (seq, placement) in scrollable.arrangement.placements.iter().enumerate() {
            let Some(child) = placement.widget else {
                continue;
            };
            let local = placement.offset_region();
            let origin = if placement.fixed {
                child_region.origin()
            } else {
                child_region.origin() - scroll
            };
            let mut order = placed.order.clone();
            order.push(if placement.fixed {
                OrderKey::docked(placement.order, seq as u32)
            } else {
                OrderKey::content(placement.order, seq as u32)
            });
            self.add_widget(
                child,
                Placed {
                    region: local.translate(origin),
                    virtual_region: local,
                    order,
                    clip: sub_clip,
                    visible,
                    fixed: placement.fixed,
                },
            )?;
        }

        if visible {
            self.add_scrollbars(id, &scrollable, container_region, &placed);
        }
        Ok(())
    }

    /// Arrange a container's children, reserving scrollbar space as needed.
    fn arrange_container(
        &self,
        id: WidgetId,
        container_region: Region,
    ) -> Result<Scrollable, ArrangeError> {
        let styles = self.tree.styles(id)?;
        let ctx = LayoutContext::new(&*self.tree, self.viewport);
        let bars = ScrollbarSizes {
            vertical: styles.scrollbar_size_vertical,
            horizontal: styles.scrollbar_size_horizontal,
        };

        let mut show_vertical = styles.overflow_y == Overflow::Scroll;
        let mut show_horizontal = styles.overflow_x == Overflow::Scroll;
        let mut child_region =
            bars.scrollable_region(container_region, show_vertical, show_horizontal);
        let mut arrangement = layout::arrange(&ctx, id, child_region.size())?;

        if styles.overflow_x == Overflow::Auto || styles.overflow_y == Overflow::Auto {
            let total = arrangement.total_region();
            let need_vertical = styles.overflow_y == Overflow::Auto
                && !show_vertical
                && total.height > child_region.height;
            let need_horizontal = styles.overflow_x == Overflow::Auto
                && !show_horizontal
                && total.width > child_region.width;
            if need_vertical || need_horizontal {
                show_vertical |= need_vertical;
                show_horizontal |= need_horizontal;
                child_region =
                    bars.scrollable_region(container_region, show_vertical, show_horizontal);
                arrangement = layout::arrange(&ctx, id, child_region.size())?;
            }
        }

        Ok(Scrollable {
            arrangement,
            child_region,
            bars,
            show_vertical,
            show_horizontal,
        })
    }

    /// Place registered scrollbar chrome over the container's content region.
    fn add_scrollbars(
        &mut self,
        id: WidgetId,
        scrollable: &Scrollable,
        container_region: Region,
        placed: &Placed,
    ) {
        let chrome = self.tree.scrollbars(id);
        if chrome.is_empty() {
            return;
        }
        let (vertical, horizontal, corner) = scrollable.bars.chrome_regions(
            container_region,
            scrollable.show_vertical,
            scrollable.show_horizontal,
        );
        let parts = [
            (chrome.vertical, vertical),
            (chrome.horizontal, horizontal),
            (chrome.corner, corner),
        ];
        for (seq, (widget, region)) in parts.into_iter().enumerate() {
            let (Some(widget), Some(region)) = (widget, region) else {
                continue;
            };
            if !self.tree.is_mounted(widget) {
                continue;
            }
            let mut order = placed.order.clone();
            order.push(OrderKey::chrome(seq as u32));
            self.map.insert(
                widget,
                MapGeometry {
                    region,
                    order,
                    clip: placed.clip,
                    virtual_size: region.size(),
                    container_size: region.size(),
                    virtual_region: region - container_region.origin(),
                    visible: true,
                    fixed: true,
                },
            );
        }
    }
}

// =============================================================================
// Scrollbars
// =============================================================================

struct Scrollable {
    arrangement: ArrangeResult,
    child_region: Region,
    bars: ScrollbarSizes,
    show_vertical: bool,
    show_horizontal: bool,
}

#[derive(Debug, Clone, Copy)]
struct ScrollbarSizes {
    vertical: i32,
    horizontal: i32,
}

impl ScrollbarSizes {
    /// The container region minus the space taken by visible scrollbars.
    fn scrollable_region(&self, region: Region, vertical: bool, horizontal: bool) -> Region {
        match (vertical, horizontal) {
            (true, true) => region.split(-self.vertical, -self.horizontal).0,
            (true, false) => region.split_vertical(-self.vertical).0,
            (false, true) => region.split_horizontal(-self.horizontal).0,
            (false, false) => region,
        }
    }

    /// Regions of the vertical bar, horizontal bar and corner.
    fn chrome_regions(
        &self,
        region: Region,
        vertical: bool,
        horizontal: bool,
    ) -> (Option<Region>, Option<Region>, Option<Region>) {
        match (vertical, horizontal) {
            (true, true) => {
                let (_, right, bottom, corner) = region.split(-self.vertical, -self.horizontal);
                (Some(right), Some(bottom), Some(corner))
            }
            (true, false) => (Some(region.split_vertical(-self.vertical).1), None, None),
            (false, true) => (None, Some(region.split_horizontal(-self.horizontal).1), None),
            (false, false) => (None, None, None),
        }
    }
}
