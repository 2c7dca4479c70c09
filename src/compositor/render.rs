//! Painting: cuts, chops and widget renders.
//!
//! # Algorithm
//!
//! 1. **Cuts** - every visible widget contributes its left and right edge as
//!    breakpoints on each line it covers. Between two neighbouring cuts
//!    exactly one widget is front-most.
//! 2. **Chops** - each line is split into one bucket per pair of cuts.
//!    Widgets are walked front to back and fill only empty buckets, so the
//!    front-most widget wins every span.
//! 3. **Assembly** - buckets are joined left to right, uncovered spans are
//!    blanked, and the line is cropped to the requested region.

use std::sync::Arc;

use tracing::{trace, warn};

use super::{Compositor, RenderKey};
use crate::engine::{WidgetId, WidgetTree};
use crate::error::CompositorError;
use crate::geometry::Region;
use crate::renderer::{LayoutUpdate, lines};
use crate::types::{Line, Lines, Style};

/// A widget taking part in one render: its region, its visible part and
/// its lines.
struct Painted {
    region: Region,
    visible: Region,
    lines: Arc<Lines>,
}

impl Compositor {
    // -------------------------------------------------------------------------
    // Cuts
    // -------------------------------------------------------------------------

    /// Sorted column breakpoints for every screen line, `0` and the screen
    /// width included. Computed once per map.
    pub fn cuts(&self) -> &[Vec<i32>] {
        self.cuts.get_or_init(|| {
            let screen = self.size.region();
            let width = self.size.width;
            let mut cuts: Vec<Vec<i32>> = (0..self.size.height.max(0))
                .map(|_| vec![0, width])
                .collect();

            for id in &self.layers {
                let Some(geometry) = self.map.get(id) else {
                    continue;
                };
                let region = geometry.visible_region();
                if region.is_empty() || !screen.contains_region(&region) {
                    continue;
                }
                let (x1, x2) = region.x_extents();
                for y in region.line_range() {
                    let line = &mut cuts[y as usize];
                    line.push(x1);
                    line.push(x2);
                }
            }

            for line in &mut cuts {
                line.sort_unstable();
                line.dedup();
            }
            cuts
        })
    }

    // -------------------------------------------------------------------------
    // Render
    // -------------------------------------------------------------------------

    /// Composite the screen, or the part of it inside `crop`.
    ///
    /// Returns one line per row of the (screen-clipped) crop region, each
    /// exactly as wide as the region.
    pub fn render(
        &mut self,
        tree: &WidgetTree,
        crop: Option<Region>,
    ) -> Result<Lines, CompositorError> {
        let screen = self.size.region();
        let crop = crop.map_or(screen, |crop| crop.intersection(&screen));
        if crop.is_empty() {
            return Ok(Vec::new());
        }

        let painted = self.painted_widgets(tree, crop)?;
        trace!(crop = ?crop, widgets = painted.len(), "render");

        let blank_style = self.config.blank_style;
        let cuts = self.cuts();
        let rendered = crop
            .line_range()
            .map(|y| {
                let line = chop_line(&painted, &cuts[y as usize], y, blank_style);
                lines::simplify(lines::crop(
                    &line,
                    crop.x as usize,
                    crop.right() as usize,
                ))
            })
            .collect();
        Ok(rendered)
    }

    /// Composite the whole screen.
    pub fn render_full(&mut self, tree: &WidgetTree) -> Result<LayoutUpdate, CompositorError> {
        let region = self.size.region();
        let lines = self.render(tree, None)?;
        Ok(LayoutUpdate::new(region, lines))
    }

    /// Re-composite only the visible part of one widget.
    ///
    /// `None` if the widget is not mapped, not visible or fully clipped.
    pub fn update_widget(
        &mut self,
        tree: &WidgetTree,
        widget: WidgetId,
    ) -> Result<Option<LayoutUpdate>, CompositorError> {
        self.update_widgets(tree, [widget])
    }

    /// Re-composite the smallest region covering several widgets.
    pub fn update_widgets<I>(
        &mut self,
        tree: &WidgetTree,
        widgets: I,
    ) -> Result<Option<LayoutUpdate>, CompositorError>
    where
        I: IntoIterator<Item = WidgetId>,
    {
        let screen = self.size.region();
        let regions: Vec<Region> = widgets
            .into_iter()
            .filter_map(|widget| self.map.get(&widget))
            .filter(|geometry| geometry.visible)
            .map(|geometry| geometry.visible_region().intersection(&screen))
            .filter(|region| !region.is_empty())
            .collect();
        if regions.is_empty() {
            return Ok(None);
        }
        let region = Region::from_union(regions);
        let lines = self.render(tree, Some(region))?;
        Ok(Some(LayoutUpdate::new(region, lines)))
    }

    /// Style of the front-most opaque widget's cell at a screen position.
    ///
    /// `None` when no widget paints there or the widget left the cell empty.
    pub fn get_style_at(
        &mut self,
        tree: &WidgetTree,
        x: i32,
        y: i32,
    ) -> Result<Option<Style>, CompositorError> {
        let hit = self
            .get_widgets_at(x, y)
            .find(|(id, _)| tree.get(*id).is_some_and(|widget| !widget.is_transparent()));
        let Some((widget, region)) = hit else {
            return Ok(None);
        };
        let rendered = self.render_widget(tree, widget, region)?;
        let Some(line) = rendered.get((y - region.y) as usize) else {
            return Ok(None);
        };
        let column = (x - region.x) as usize;
        let cell = lines::crop(line, column, column + 1);
        Ok(cell.first().map(|segment| segment.style))
    }

    // -------------------------------------------------------------------------
    // Widget renders
    // -------------------------------------------------------------------------

    /// Opaque visible widgets overlapping `crop`, front to back, rendered.
    ///
    /// The visible part is kept whole: its edges are cuts, crop edges may not be.
    fn painted_widgets(
        &mut self,
        tree: &WidgetTree,
        crop: Region,
    ) -> Result<Vec<Painted>, CompositorError> {
        let candidates: Vec<(WidgetId, Region, Region)> = self
            .layers
            .iter()
            .filter_map(|id| {
                let geometry = self.map.get(id)?;
                let visible = geometry.visible_region();
                let transparent = tree.get(*id).is_none_or(|widget| widget.is_transparent());
                (visible.overlaps(&crop) && !transparent).then_some((*id, geometry.region, visible))
            })
            .collect();

        candidates
            .into_iter()
            .map(|(id, region, visible)| {
                self.render_widget(tree, id, region).map(|lines| Painted {
                    region,
                    visible,
                    lines,
                })
            })
            .collect()
    }

    /// Lines for a widget's whole region, exactly sized, from the cache if
    /// the widget has not been refreshed since.
    fn render_widget(
        &mut self,
        tree: &WidgetTree,
        widget: WidgetId,
        region: Region,
    ) -> Result<Arc<Lines>, CompositorError> {
        let size = region.size();
        let key = RenderKey {
            widget,
            size,
            generation: tree.render_generation(widget),
        };
        if let Some(lines) = self.cache.get(&key) {
            return Ok(Arc::clone(lines));
        }

        let rendered = tree
            .get(widget)
            .ok_or(CompositorError::NoWidget(widget))?
            .render_lines(size)
            .map_err(|source| {
                warn!(widget = ?widget, region = ?region, error = %source, "widget render failed");
                CompositorError::Render {
                    widget,
                    region,
                    source,
                }
            })?;

        let width = size.width.max(0) as usize;
        let height = size.height.max(0) as usize;
        let blank_style = self.config.blank_style;
        let mut sized: Lines = rendered
            .into_iter()
            .take(height)
            .map(|line| lines::adjust_width(line, width, blank_style))
            .collect();
        sized.resize_with(height, || lines::blank(width, blank_style));

        let sized = Arc::new(sized);
        self.cache.put(key, Arc::clone(&sized));
        Ok(sized)
    }
}

/// Assemble one full-width screen line from front-to-back painted widgets.
fn chop_line(painted: &[Painted], cuts: &[i32], y: i32, blank_style: Style) -> Line {
    let mut buckets: Vec<Option<Line>> = vec![None; cuts.len().saturating_sub(1)];

    for widget in painted {
        if !widget.visible.line_range().contains(&y) {
            continue;
        }
        let Some(source) = widget.lines.get((y - widget.region.y) as usize) else {
            continue;
        };
        let (x1, x2) = widget.visible.x_extents();
        let first = cuts.partition_point(|&cut| cut < x1);
        let last = cuts.partition_point(|&cut| cut < x2);
        if first >= last {
            continue;
        }

        // One piece per bucket in [first, last), after a leading piece that
        // covers the widget's cells left of x1.
        let relative: Vec<usize> = cuts[first..=last.min(cuts.len() - 1)]
            .iter()
            .map(|&cut| (cut - widget.region.x) as usize)
            .collect();
        let mut pieces = lines::divide(source, &relative).into_iter().skip(1);
        for bucket in &mut buckets[first..last] {
            let piece = pieces.next();
            if bucket.is_none() {
                *bucket = piece;
            }
        }
    }

    let mut line: Line = Vec::new();
    for (index, bucket) in buckets.into_iter().enumerate() {
        match bucket {
            Some(piece) => line.extend(piece),
            None => {
                let width = (cuts[index + 1] - cuts[index]).max(0) as usize;
                line.extend(lines::blank(width, blank_style));
            }
        }
    }
    line
}

// =============================================================================
// Tests
// =============================================================================
