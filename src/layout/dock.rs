//! Dock layout - attach children to the container's edges.
//!
//! Docked children are grouped by `(z_index, edge)` in first-occurrence
//! order. Each z-layer starts from the full container and every group
//! consumes a strip from what its layer has left, stacking inward from the
//! edge. Layers never compete for space; a higher layer simply paints over a
//! lower one.
//!
//! Children without a dock fill what their layer has left (dock layout) or
//! are arranged by the container's own layout in what layer 0 has left.

use indexmap::IndexMap;

use super::{ArrangeResult, Fraction, LayoutContext, WidgetPlacement, resolve_box_models};
use crate::engine::WidgetId;
use crate::error::ArrangeError;
use crate::geometry::{Region, Size};
use crate::styles::{Axis, DockEdge, LayoutKind};

/// Docked placements plus the space each z-layer has left.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DockArrangement {
    pub result: ArrangeResult,
    /// Remaining region per z-layer that has docks.
    pub layers: IndexMap<i32, Region>,
}

impl DockArrangement {
    /// What `z` has left; the full container for layers without docks.
    pub fn remaining(&self, z: i32, size: Size) -> Region {
        self.layers.get(&z).copied().unwrap_or(size.region())
    }
}

/// Place the docked widgets among `children` within `size`.
///
/// Children without a dock edge are ignored.
pub fn arrange_docks(
    ctx: &LayoutContext<'_>,
    children: &[WidgetId],
    size: Size,
) -> Result<DockArrangement, ArrangeError> {
    let mut groups: IndexMap<(i32, DockEdge), Vec<WidgetId>> = IndexMap::new();
    for &child in children {
        let styles = ctx.styles(child)?;
        if let Some(edge) = styles.dock {
            groups.entry((styles.z_index, edge)).or_default().push(child);
        }
    }

    let mut result = ArrangeResult::new();
    let mut layers: IndexMap<i32, Region> = IndexMap::new();

    for ((z, edge), widgets) in groups {
        let region = *layers.entry(z).or_insert(size.region());
        let axis = edge_axis(edge);
        let models = resolve_box_models(ctx, &widgets, region.size(), Size::ZERO, axis)?;

        // A layer with nothing left still places later groups, at zero size.
        let open = !region.is_empty();
        let mut remaining = if open { axis.of(region.size()) } else { 0 };
        let mut consumed = 0;
        for (&widget, model) in widgets.iter().zip(&models) {
            if open && remaining == 0 {
                break;
            }
            let styles = ctx.styles(widget)?;
            let margin = model.margin;
            let size = model.size();
            let (along, cross_set, cross) = match axis {
                Axis::Vertical => (
                    size.height + margin.height(),
                    styles.width.is_some(),
                    size.width + margin.width(),
                ),
                Axis::Horizontal => (
                    size.width + margin.width(),
                    styles.height.is_some(),
                    size.height + margin.height(),
                ),
            };
            // Invisible docks keep a placement but give up their strip.
            let along = if styles.is_visible() {
                along.clamp(0, remaining)
            } else {
                0
            };

            let strip = match edge {
                DockEdge::Top => Region::new(
                    region.x,
                    region.y + consumed,
                    if cross_set { cross } else { region.width },
                    along,
                ),
                DockEdge::Bottom => Region::new(
                    region.x,
                    region.bottom() - consumed - along,
                    if cross_set { cross } else { region.width },
                    along,
                ),
                DockEdge::Left => Region::new(
                    region.x + consumed,
                    region.y,
                    along,
                    if cross_set { cross } else { region.height },
                ),
                DockEdge::Right => Region::new(
                    region.right() - consumed - along,
                    region.y,
                    along,
                    if cross_set { cross } else { region.height },
                ),
            };
            let placed = if along > 0 {
                strip.shrink(margin)
            } else {
                strip
            };

            result.push(
                WidgetPlacement::new(placed, margin, widget, z)
                    .with_offset(styles.offset)
                    .fixed(),
            );
            consumed += along;
            remaining -= along;
        }

        let remaining_region = match edge {
            DockEdge::Top => Region::new(region.x, region.y + consumed, region.width, region.height - consumed),
            DockEdge::Bottom => Region::new(region.x, region.y, region.width, region.height - consumed),
            DockEdge::Left => Region::new(region.x + consumed, region.y, region.width - consumed, region.height),
            DockEdge::Right => Region::new(region.x, region.y, region.width - consumed, region.height),
        };
        layers.insert(z, remaining_region);
    }

    Ok(DockArrangement { result, layers })
}

/// Natural extent along `axis` of a container with docked children.
///
/// `size` bounds the container across `axis`; along `axis` it is unbounded.
/// Docks on the measured edges stack their own extent. Docks on the other
/// edges narrow what their layer has left and stand beside it.
pub(super) fn measure(
    ctx: &LayoutContext<'_>,
    parent: WidgetId,
    children: &[WidgetId],
    size: Size,
    flow: LayoutKind,
    axis: Axis,
) -> Result<i32, ArrangeError> {
    #[derive(Debug, Clone, Copy, Default)]
    struct Extent {
        stacked: i32,
        narrowed: i32,
        beside: i32,
        content: i32,
    }

    let across = axis.cross();
    let bounded = |narrowed: i32| {
        let cross = (across.of(size) - narrowed).max(0);
        match axis {
            Axis::Vertical => Size::new(cross, 0),
            Axis::Horizontal => Size::new(0, cross),
        }
    };
    let outer = |child: WidgetId, available: Size| -> Result<Size, ArrangeError> {
        let model = ctx.box_model(
            child,
            available,
            Fraction::from(available.width),
            Fraction::from(available.height),
        )?;
        Ok(model.size() + model.margin.totals())
    };

    let mut layers: IndexMap<i32, Extent> = IndexMap::new();
    let mut undocked = Vec::new();
    for &child in children {
        let styles = ctx.styles(child)?;
        let Some(edge) = styles.dock else {
            undocked.push(child);
            continue;
        };
        let narrowed = layers.get(&styles.z_index).map_or(0, |extent| extent.narrowed);
        let extent = layers.entry(styles.z_index).or_default();
        if !styles.is_visible() {
            continue;
        }
        let outer = outer(child, bounded(narrowed))?;
        if edge_axis(edge) == axis {
            extent.stacked += axis.of(outer);
        } else {
            extent.narrowed += across.of(outer);
            extent.beside = extent.beside.max(axis.of(outer));
        }
    }

    if flow == LayoutKind::Dock {
        for child in undocked {
            let z = ctx.styles(child)?.z_index;
            let narrowed = layers.get(&z).map_or(0, |extent| extent.narrowed);
            let outer = outer(child, bounded(narrowed))?;
            let extent = layers.entry(z).or_default();
            extent.content = extent.content.max(axis.of(outer));
        }
    } else if !undocked.is_empty() {
        let narrowed = layers.get(&0).map_or(0, |extent| extent.narrowed);
        let total = flow
            .arrange(ctx, parent, &undocked, bounded(narrowed))?
            .total_region();
        let along = match axis {
            Axis::Vertical => total.bottom(),
            Axis::Horizontal => total.right(),
        };
        layers.entry(0).or_default().content = along;
    }

    Ok(layers
        .values()
        .map(|extent| extent.stacked + extent.content.max(extent.beside))
        .max()
        .unwrap_or(0))
}

fn edge_axis(edge: DockEdge) -> Axis {
    match edge {
        DockEdge::Top | DockEdge::Bottom => Axis::Vertical,
        DockEdge::Left | DockEdge::Right => Axis::Horizontal,
    }
}

/// Arrange docks, then the remaining children with `flow`.
///
/// With `flow == LayoutKind::Dock` each undocked child fills what its own
/// z-layer has left. Any other layout arranges the undocked children
/// together in what layer 0 has left.
pub(super) fn arrange(
    ctx: &LayoutContext<'_>,
    parent: WidgetId,
    children: &[WidgetId],
    size: Size,
    flow: LayoutKind,
) -> Result<ArrangeResult, ArrangeError> {
    let mut undocked = Vec::new();
    for &child in children {
        if !ctx.styles(child)?.is_docked() {
            undocked.push(child);
        }
    }

    let mut docks = arrange_docks(ctx, children, size)?;
    let mut result = std::mem::take(&mut docks.result);

    if flow == LayoutKind::Dock {
        for child in undocked {
            let styles = ctx.styles(child)?;
            let region = docks.remaining(styles.z_index, size);
            let model = ctx.box_model(
                child,
                region.size(),
                Fraction::from(region.width),
                Fraction::from(region.height),
            )?;
            let margin = model.margin;
            let inner = region.shrink(margin);
            let width = match styles.width {
                Some(_) => model.size().width,
                None => inner.width,
            };
            let height = match styles.height {
                Some(_) => model.size().height,
                None => inner.height,
            };
            let placed = Region::new(inner.x, inner.y, width, height).crop_size(inner.size());
            result.push(
                WidgetPlacement::new(placed, margin, child, styles.z_index)
                    .with_offset(styles.offset),
            );
        }
        return Ok(result);
    }

    if !undocked.is_empty() {
        let content = docks.remaining(0, size);
        let mut flowed = flow.arrange(ctx, parent, &undocked, content.size())?;
        flowed.translate(content.origin());
        result.extend(flowed);
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::WidgetTree;
    use crate::geometry::Spacing;
    use crate::styles::{Display, Scalar, Styles, Visibility};
    use crate::testing::TestWidget;

    struct Fixture {
        tree: WidgetTree,
        root: WidgetId,
    }

    impl Fixture {
        fn new() -> Self {
            let mut tree = WidgetTree::new();
            let root = tree.insert_root(TestWidget::styled(
                Styles::new().with_layout(LayoutKind::Dock),
            ));
            Self { tree, root }
        }

        fn add(&mut self, styles: Styles) -> WidgetId {
            self.tree
                .insert_child(self.root, TestWidget::styled(styles))
                .unwrap()
        }

        fn arrange(&self, size: Size) -> ArrangeResult {
            let ctx = LayoutContext::new(&self.tree, size);
            let children = ctx.displayed_children(self.root).unwrap();
            arrange(&ctx, self.root, &children, size, LayoutKind::Dock).unwrap()
        }
    }

    fn dock(edge: DockEdge, cells: f32) -> Styles {
        let styles = Styles::new().with_dock(edge);
        match edge {
            DockEdge::Top | DockEdge::Bottom => styles.with_height(Scalar::cells(cells)),
            DockEdge::Left | DockEdge::Right => styles.with_width(Scalar::cells(cells)),
        }
    }

    fn region_of(result: &ArrangeResult, id: WidgetId) -> Option<Region> {
        result
            .placements
            .iter()
            .find(|placement| placement.widget == Some(id))
            .map(|placement| placement.region)
    }

    #[test]
    fn test_top_dock_and_remaining() {
        let mut fixture = Fixture::new();
        let header = fixture.add(dock(DockEdge::Top, 3.0));
        let body = fixture.add(Styles::new());

        let size = Size::new(40, 24);
        let ctx = LayoutContext::new(&fixture.tree, size);
        let docks = arrange_docks(&ctx, &[header, body], size).unwrap();
        assert_eq!(region_of(&docks.result, header), Some(Region::new(0, 0, 40, 3)));
        assert_eq!(docks.remaining(0, size), Region::new(0, 3, 40, 21));

        let result = fixture.arrange(size);
        assert_eq!(region_of(&result, body), Some(Region::new(0, 3, 40, 21)));
        assert!(result.placements[0].fixed);
        assert!(!result.placements[1].fixed);
    }

    #[test]
    fn test_docks_consume_in_order() {
        let mut fixture = Fixture::new();
        let top = fixture.add(dock(DockEdge::Top, 2.0));
        let left = fixture.add(dock(DockEdge::Left, 5.0));
        let bottom = fixture.add(dock(DockEdge::Bottom, 1.0));
        let right = fixture.add(dock(DockEdge::Right, 4.0));
        let body = fixture.add(Styles::new());

        let result = fixture.arrange(Size::new(40, 20));
        assert_eq!(region_of(&result, top), Some(Region::new(0, 0, 40, 2)));
        assert_eq!(region_of(&result, left), Some(Region::new(0, 2, 5, 18)));
        assert_eq!(region_of(&result, bottom), Some(Region::new(5, 19, 35, 1)));
        assert_eq!(region_of(&result, right), Some(Region::new(36, 2, 4, 17)));
        assert_eq!(region_of(&result, body), Some(Region::new(5, 2, 31, 17)));
    }

    #[test]
    fn test_same_edge_stacks_inward() {
        let mut fixture = Fixture::new();
        let first = fixture.add(dock(DockEdge::Bottom, 1.0));
        let second = fixture.add(dock(DockEdge::Bottom, 2.0));

        let result = fixture.arrange(Size::new(10, 10));
        assert_eq!(region_of(&result, first), Some(Region::new(0, 9, 10, 1)));
        assert_eq!(region_of(&result, second), Some(Region::new(0, 7, 10, 2)));
    }

    #[test]
    fn test_layers_do_not_compete() {
        let mut fixture = Fixture::new();
        let base = fixture.add(dock(DockEdge::Top, 3.0));
        let overlay = fixture.add(dock(DockEdge::Top, 5.0).with_z_index(1));

        let result = fixture.arrange(Size::new(20, 10));
        assert_eq!(region_of(&result, base), Some(Region::new(0, 0, 20, 3)));
        assert_eq!(region_of(&result, overlay), Some(Region::new(0, 0, 20, 5)));
        assert_eq!(result.placements[1].order, 1);
    }

    #[test]
    fn test_exhausted_docks_stop() {
        let mut fixture = Fixture::new();
        let a = fixture.add(dock(DockEdge::Top, 6.0));
        let b = fixture.add(dock(DockEdge::Top, 6.0));
        let c = fixture.add(dock(DockEdge::Top, 6.0));
        let d = fixture.add(dock(DockEdge::Left, 3.0));

        let result = fixture.arrange(Size::new(10, 10));
        assert_eq!(region_of(&result, a), Some(Region::new(0, 0, 10, 6)));
        // Clamped to what is left, never negative.
        assert_eq!(region_of(&result, b), Some(Region::new(0, 6, 10, 4)));
        // Leftovers of the group that ran out are dropped.
        assert_eq!(region_of(&result, c), None);
        assert!(!result.widgets.contains(&c));
        // Later groups still get a zero-size placement at the remaining edge.
        assert_eq!(region_of(&result, d), Some(Region::new(0, 10, 0, 0)));
        assert!(result.widgets.contains(&d));
    }

    #[test]
    fn test_fraction_docks_share_strip() {
        let mut fixture = Fixture::new();
        let a = fixture.add(
            Styles::new()
                .with_dock(DockEdge::Left)
                .with_width(Scalar::fraction(1.0)),
        );
        let b = fixture.add(
            Styles::new()
                .with_dock(DockEdge::Left)
                .with_width(Scalar::fraction(3.0)),
        );

        let result = fixture.arrange(Size::new(20, 4));
        assert_eq!(region_of(&result, a), Some(Region::new(0, 0, 5, 4)));
        assert_eq!(region_of(&result, b), Some(Region::new(5, 0, 15, 4)));
    }

    #[test]
    fn test_dock_margin_and_hidden_widgets() {
        let mut fixture = Fixture::new();
        let header = fixture.add(dock(DockEdge::Top, 3.0).with_margin(Spacing::new(0, 1, 1, 1)));
        let gone = fixture.add(dock(DockEdge::Top, 3.0).with_display(Display::None));
        let ghost = fixture.add(dock(DockEdge::Top, 2.0).with_visibility(Visibility::Hidden));
        let toolbar = fixture.add(dock(DockEdge::Top, 1.0));

        let result = fixture.arrange(Size::new(20, 10));
        assert_eq!(region_of(&result, header), Some(Region::new(1, 0, 18, 3)));
        assert_eq!(region_of(&result, gone), None);
        // Invisible docks are placed but take no space.
        assert_eq!(region_of(&result, ghost), Some(Region::new(0, 4, 20, 0)));
        assert_eq!(region_of(&result, toolbar), Some(Region::new(0, 4, 20, 1)));
    }

    #[test]
    fn test_hidden_dock_first_in_group() {
        let mut fixture = Fixture::new();
        let hidden = fixture.add(dock(DockEdge::Top, 2.0).with_visibility(Visibility::Hidden));
        let shown = fixture.add(dock(DockEdge::Top, 1.0));
        let body = fixture.add(Styles::new());

        let result = fixture.arrange(Size::new(6, 5));
        assert!(result.widgets.contains(&hidden));
        assert_eq!(region_of(&result, shown), Some(Region::new(0, 0, 6, 1)));
        assert_eq!(region_of(&result, body), Some(Region::new(0, 1, 6, 4)));
    }
}
