//! Layout output: where each child goes, relative to its container.

use indexmap::IndexSet;

use crate::engine::WidgetId;
use crate::geometry::{Offset, Region, Spacing};

/// One placed child, in the container's content coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetPlacement {
    /// Outer region, margin excluded.
    pub region: Region,
    /// Style offset, applied after layout.
    pub offset: Offset,
    pub margin: Spacing,
    /// `None` reserves space without an occupant (virtual size markers).
    pub widget: Option<WidgetId>,
    /// Paint order among siblings; higher paints on top.
    pub order: i32,
    /// Fixed placements do not move with the container's scroll offset.
    pub fixed: bool,
}

impl WidgetPlacement {
    pub fn new(region: Region, margin: Spacing, widget: WidgetId, order: i32) -> Self {
        Self {
            region,
            offset: Offset::ZERO,
            margin,
            widget: Some(widget),
            order,
            fixed: false,
        }
    }

    /// A placement with no widget, marking content extent.
    pub fn virtual_size(region: Region) -> Self {
        Self {
            region,
            offset: Offset::ZERO,
            margin: Spacing::ZERO,
            widget: None,
            order: 0,
            fixed: false,
        }
    }

    pub fn with_offset(mut self, offset: Offset) -> Self {
        self.offset = offset;
        self
    }

    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    /// Move the placement by `offset`.
    pub fn translate(self, offset: Offset) -> Self {
        Self {
            region: self.region.translate(offset),
            ..self
        }
    }

    /// Region including the style offset.
    pub fn offset_region(&self) -> Region {
        self.region.translate(self.offset)
    }
}

/// Result of arranging one container.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ArrangeResult {
    /// Placements in arrangement order.
    pub placements: Vec<WidgetPlacement>,
    /// Every child that received a placement, in order.
    pub widgets: IndexSet<WidgetId>,
}

impl ArrangeResult {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, placement: WidgetPlacement) {
        if let Some(widget) = placement.widget {
            self.widgets.insert(widget);
        }
        self.placements.push(placement);
    }

    pub fn extend(&mut self, other: ArrangeResult) {
        self.placements.extend(other.placements);
        self.widgets.extend(other.widgets);
    }

    /// Placements that own a widget.
    pub fn widget_placements(&self) -> impl Iterator<Item = &WidgetPlacement> {
        self.placements
            .iter()
            .filter(|placement| placement.widget.is_some())
    }

    /// The virtual size marker, if the strategy emitted one.
    pub fn virtual_placement(&self) -> Option<&WidgetPlacement> {
        self.placements
            .iter()
            .rev()
            .find(|placement| placement.widget.is_none())
    }

    /// Bounding box of every placement, margins included on the far edges.
    ///
    /// Anchored at the origin: content never extends up or left of it.
    pub fn total_region(&self) -> Region {
        let (right, bottom) = self.placements.iter().fold((0, 0), |(right, bottom), placement| {
            let region = placement.offset_region();
            (
                right.max(region.right() + placement.margin.right),
                bottom.max(region.bottom() + placement.margin.bottom),
            )
        });
        Region::new(0, 0, right, bottom)
    }

    /// Shift every placement by `offset`.
    pub fn translate(&mut self, offset: Offset) {
        if offset.is_origin() {
            return;
        }
        for placement in &mut self.placements {
            *placement = placement.translate(offset);
        }
    }
}
