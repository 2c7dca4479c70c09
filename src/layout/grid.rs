//! Grid layout - row-major cells with spans.
//!
//! # Placement
//!
//! Children claim cells in row-major order. A child whose span would
//! overlap a claimed cell moves on to the next free cell; a collision is
//! never an error. Spans wider than the grid are clamped to the column
//! count, and spans past the last track are clamped to it.
//!
//! # Tracks
//!
//! Column and row sizes repeat to fill the grid and are shared out by the
//! scalar resolver. `auto` tracks take the largest natural size of the
//! widgets in them that span exactly one track on that axis; wider widgets
//! are left out of the measurement.

use std::collections::HashSet;

use indexmap::IndexMap;

use super::{ArrangeResult, Fraction, LayoutContext, WidgetPlacement, resolve};
use crate::engine::WidgetId;
use crate::error::ArrangeError;
use crate::geometry::{Offset, Region, Size};
use crate::styles::{Axis, Scalar, Styles};

/// A child's claimed cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Cell {
    column: usize,
    row: usize,
    column_span: usize,
    row_span: usize,
}

pub(super) fn arrange(
    ctx: &LayoutContext<'_>,
    parent: WidgetId,
    children: &[WidgetId],
    size: Size,
) -> Result<ArrangeResult, ArrangeError> {
    let grid = &ctx.styles(parent)?.grid;
    let viewport = ctx.viewport;
    let column_count = usize::from(grid.size_columns.max(1));

    let (size, offset, gutter_horizontal, gutter_vertical) = if grid.keyline {
        (
            size - Size::new(2, 2),
            Offset::new(1, 1),
            grid.gutter_horizontal.max(1),
            grid.gutter_vertical.max(1),
        )
    } else {
        (
            size,
            Offset::ZERO,
            grid.gutter_horizontal,
            grid.gutter_vertical,
        )
    };

    // Claim cells.
    let mut occupied: HashSet<(usize, usize)> = HashSet::new();
    let mut cells: IndexMap<WidgetId, Cell> = IndexMap::new();
    let mut cursor = 0usize;
    for &child in children {
        let styles = ctx.styles(child)?;
        let column_span = usize::from(styles.column_span.max(1)).min(column_count);
        let row_span = usize::from(styles.row_span.max(1));
        loop {
            let (column, row) = (cursor % column_count, cursor / column_count);
            let free = (column..column + column_span)
                .all(|c| (row..row + row_span).all(|r| !occupied.contains(&(c, r))));
            if free {
                for c in column..column + column_span {
                    for r in row..row + row_span {
                        occupied.insert((c, r));
                    }
                }
                cells.insert(
                    child,
                    Cell {
                        column,
                        row,
                        column_span,
                        row_span,
                    },
                );
                break;
            }
            cursor += 1;
            debug_assert!(
                cursor / column_count <= occupied.len() + 1,
                "grid placement scanned past every claimed row"
            );
        }
        cursor += 1;
    }

    let row_count = if grid.size_rows > 0 {
        usize::from(grid.size_rows)
    } else {
        cells
            .values()
            .map(|cell| cell.row + cell.row_span)
            .max()
            .unwrap_or(0)
    };
    if row_count == 0 {
        return Ok(ArrangeResult::new());
    }

    let default_row = if size.height > 0 {
        Scalar::fraction(1.0)
    } else {
        Scalar::auto()
    };
    let mut column_scalars = repeat_scalars(&grid.columns, Scalar::fraction(1.0), column_count);
    let mut row_scalars = repeat_scalars(&grid.rows, default_row, row_count);

    // Auto columns.
    for (column, scalar) in column_scalars.iter_mut().enumerate() {
        if !scalar.is_auto() {
            continue;
        }
        let mut width = 0;
        for (&widget, cell) in &cells {
            if cell.column != column || cell.column_span != 1 {
                continue;
            }
            let styles = ctx.styles(widget)?;
            let natural = ctx.content_width(widget, size)? + styles.gutter().width();
            width = width.max(apply_limits(
                styles,
                natural,
                Axis::Horizontal,
                size,
                viewport,
            ));
        }
        *scalar = Scalar::cells(width as f32);
    }
    let columns = resolve(
        &column_scalars,
        size.width,
        gutter_vertical,
        Axis::Horizontal,
        size,
        viewport,
    );

    // Auto rows.
    for (row, scalar) in row_scalars.iter_mut().enumerate() {
        if !scalar.is_auto() {
            continue;
        }
        let mut height = 0;
        for (&widget, cell) in &cells {
            if cell.row != row || cell.row_span != 1 {
                continue;
            }
            let styles = ctx.styles(widget)?;
            let gutter = styles.gutter();
            let (start, _) = columns[cell.column];
            let (last_start, last_width) =
                columns[(cell.column + cell.column_span - 1).min(column_count - 1)];
            let cell_width = last_start + last_width - start;
            let natural =
                ctx.content_height(widget, size, cell_width - gutter.width())? + gutter.height();
            height = height.max(apply_limits(
                styles,
                natural,
                Axis::Vertical,
                size,
                viewport,
            ));
        }
        *scalar = Scalar::cells(height as f32);
    }
    let rows = resolve(
        &row_scalars,
        size.height,
        gutter_horizontal,
        Axis::Vertical,
        size,
        viewport,
    );

    // Place.
    let max_column = columns.len() - 1;
    let max_row = rows.len() - 1;
    let mut result = ArrangeResult::new();
    for (&widget, cell) in &cells {
        if cell.row > max_row {
            continue;
        }
        let styles = ctx.styles(widget)?;
        let (x, _) = columns[cell.column];
        let (y, _) = rows[cell.row];
        let (x2, last_width) = columns[(cell.column + cell.column_span - 1).min(max_column)];
        let (y2, last_height) = rows[(cell.row + cell.row_span - 1).min(max_row)];
        let cell_size = Size::new(x2 + last_width - x, y2 + last_height - y);

        let model = ctx.box_model(
            widget,
            cell_size,
            Fraction::from(cell_size.width),
            Fraction::from(cell_size.height),
        )?;
        let margin = model.margin;
        let inner = cell_size - margin.totals();
        let width = match styles.width {
            Some(_) => model.size().width.min(inner.width),
            None => inner.width,
        };
        let height = match styles.height {
            Some(_) => model.size().height.min(inner.height),
            None => inner.height,
        };
        let region = Region::new(
            x + margin.left + styles.align_horizontal.offset(inner.width, width),
            y + margin.top + styles.align_vertical.offset(inner.height, height),
            width,
            height,
        )
        .translate(offset);

        result.push(
            WidgetPlacement::new(region, margin, widget, styles.z_index).with_offset(styles.offset),
        );
    }
    Ok(result)
}

/// Repeat `scalars` (or `default` if empty) to exactly `count` entries.
fn repeat_scalars(scalars: &[Scalar], default: Scalar, count: usize) -> Vec<Scalar> {
    if scalars.is_empty() {
        return vec![default; count];
    }
    scalars.iter().copied().cycle().take(count).collect()
}

/// Clamp a measured track size to a widget's min/max rules.
fn apply_limits(styles: &Styles, value: i32, axis: Axis, size: Size, viewport: Size) -> i32 {
    let (min, max) = match axis {
        Axis::Horizontal => (styles.min_width, styles.max_width),
        Axis::Vertical => (styles.min_height, styles.max_height),
    };
    let resolve = |scalar: Scalar| {
        scalar
            .resolve(axis, size, viewport, Fraction::ONE)
            .to_cells()
    };
    let mut value = value;
    if let Some(min) = min {
        value = value.max(resolve(min));
    }
    if let Some(max) = max {
        value = value.min(resolve(max));
    }
    value
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::WidgetTree;
    use crate::geometry::Spacing;
    use crate::styles::GridStyles;
    use crate::testing::TestWidget;

    struct Fixture {
        tree: WidgetTree,
        root: WidgetId,
    }

    impl Fixture {
        fn new(grid: GridStyles) -> Self {
            let mut tree = WidgetTree::new();
            let root = tree.insert_root(TestWidget::styled(Styles::new().with_grid(grid)));
            Self { tree, root }
        }

        fn add(&mut self, widget: TestWidget) -> WidgetId {
            self.tree.insert_child(self.root, widget).unwrap()
        }

        fn arrange(&self, size: Size) -> ArrangeResult {
            let ctx = LayoutContext::new(&self.tree, size);
            let children = ctx.displayed_children(self.root).unwrap();
            arrange(&ctx, self.root, &children, size).unwrap()
        }
    }

    fn grid(columns: u16, rows: u16) -> GridStyles {
        GridStyles {
            size_columns: columns,
            size_rows: rows,
            ..Default::default()
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
    fn test_grid_even_cells() {
        let mut fixture = Fixture::new(grid(2, 2));
        let ids: Vec<_> = (0..4).map(|_| fixture.add(TestWidget::new())).collect();
        let result = fixture.arrange(Size::new(20, 10));

        assert_eq!(region_of(&result, ids[0]), Some(Region::new(0, 0, 10, 5)));
        assert_eq!(region_of(&result, ids[1]), Some(Region::new(10, 0, 10, 5)));
        assert_eq!(region_of(&result, ids[2]), Some(Region::new(0, 5, 10, 5)));
        assert_eq!(region_of(&result, ids[3]), Some(Region::new(10, 5, 10, 5)));
    }

    #[test]
    fn test_grid_span_skips_occupied_cells() {
        let mut fixture = Fixture::new(grid(2, 2));
        let wide = fixture.add(TestWidget::styled(Styles::new().with_span(2, 1)));
        let next = fixture.add(TestWidget::new());
        let result = fixture.arrange(Size::new(20, 10));

        assert_eq!(region_of(&result, wide), Some(Region::new(0, 0, 20, 5)));
        // Lands at (column 0, row 1), not (column 1, row 0).
        assert_eq!(region_of(&result, next), Some(Region::new(0, 5, 10, 5)));
    }

    #[test]
    fn test_grid_row_span_collision_moves_on() {
        let mut fixture = Fixture::new(grid(2, 0));
        let tall = fixture.add(TestWidget::styled(Styles::new().with_span(1, 2)));
        let a = fixture.add(TestWidget::new());
        let b = fixture.add(TestWidget::new());
        let result = fixture.arrange(Size::new(20, 8));

        assert_eq!(region_of(&result, tall), Some(Region::new(0, 0, 10, 8)));
        assert_eq!(region_of(&result, a), Some(Region::new(10, 0, 10, 4)));
        // (0, 1) is taken by `tall`.
        assert_eq!(region_of(&result, b), Some(Region::new(10, 4, 10, 4)));
    }

    #[test]
    fn test_grid_span_clamped_to_tracks() {
        let mut fixture = Fixture::new(grid(2, 1));
        let huge = fixture.add(TestWidget::styled(Styles::new().with_span(5, 5)));
        let result = fixture.arrange(Size::new(20, 10));
        assert_eq!(region_of(&result, huge), Some(Region::new(0, 0, 20, 10)));
    }

    #[test]
    fn test_grid_rows_beyond_declared_are_dropped() {
        let mut fixture = Fixture::new(grid(1, 1));
        let first = fixture.add(TestWidget::new());
        let second = fixture.add(TestWidget::new());
        let result = fixture.arrange(Size::new(10, 10));
        assert_eq!(region_of(&result, first), Some(Region::new(0, 0, 10, 10)));
        assert_eq!(region_of(&result, second), None);
        assert!(!result.widgets.contains(&second));
    }

    #[test]
    fn test_grid_gutters() {
        let mut fixture = Fixture::new(GridStyles {
            gutter_horizontal: 1,
            gutter_vertical: 2,
            ..grid(2, 2)
        });
        let ids: Vec<_> = (0..4).map(|_| fixture.add(TestWidget::new())).collect();
        let result = fixture.arrange(Size::new(22, 11));

        assert_eq!(region_of(&result, ids[0]), Some(Region::new(0, 0, 10, 5)));
        assert_eq!(region_of(&result, ids[3]), Some(Region::new(12, 6, 10, 5)));
    }

    #[test]
    fn test_grid_keyline_insets() {
        let mut fixture = Fixture::new(GridStyles {
            keyline: true,
            ..grid(2, 1)
        });
        let a = fixture.add(TestWidget::new());
        let b = fixture.add(TestWidget::new());
        let result = fixture.arrange(Size::new(23, 5));

        // 21 usable columns, one reserved for the keyline between cells.
        assert_eq!(region_of(&result, a), Some(Region::new(1, 1, 10, 3)));
        assert_eq!(region_of(&result, b), Some(Region::new(12, 1, 10, 3)));
    }

    #[test]
    fn test_grid_auto_columns_ignore_multi_span() {
        let mut fixture = Fixture::new(GridStyles {
            columns: vec![Scalar::auto(), Scalar::fraction(1.0)],
            ..grid(2, 0)
        });
        let wide = fixture.add(
            TestWidget::styled(Styles::new().with_span(2, 1)).with_content(30, 1),
        );
        let narrow = fixture.add(
            TestWidget::styled(Styles::new().with_padding(Spacing::horizontal(1)))
                .with_content(4, 1),
        );
        let result = fixture.arrange(Size::new(40, 10));

        assert_eq!(region_of(&result, wide), Some(Region::new(0, 0, 40, 5)));
        // Auto column sized from `narrow` only: 4 + 2 padding.
        assert_eq!(region_of(&result, narrow), Some(Region::new(0, 5, 6, 5)));
    }

    #[test]
    fn test_grid_auto_rows_when_unbounded() {
        let mut fixture = Fixture::new(grid(2, 0));
        let a = fixture.add(TestWidget::new().with_content(3, 2));
        let b = fixture.add(TestWidget::new().with_content(3, 4));
        let c = fixture.add(TestWidget::new().with_content(3, 1));
        let result = fixture.arrange(Size::new(10, 0));

        assert_eq!(region_of(&result, a), Some(Region::new(0, 0, 5, 4)));
        assert_eq!(region_of(&result, b), Some(Region::new(5, 0, 5, 4)));
        assert_eq!(region_of(&result, c), Some(Region::new(0, 4, 5, 1)));
        assert_eq!(result.total_region(), Region::new(0, 0, 10, 5));
    }

    #[test]
    fn test_grid_auto_track_respects_limits() {
        let mut fixture = Fixture::new(GridStyles {
            columns: vec![Scalar::auto()],
            ..grid(1, 1)
        });
        let a = fixture.add(
            TestWidget::styled(Styles::new().with_max_width(Scalar::cells(5.0)))
                .with_content(12, 1),
        );
        let result = fixture.arrange(Size::new(40, 3));
        assert_eq!(region_of(&result, a), Some(Region::new(0, 0, 5, 3)));
    }

    #[test]
    fn test_grid_no_children() {
        let fixture = Fixture::new(grid(3, 0));
        assert!(fixture.arrange(Size::new(10, 10)).placements.is_empty());
    }
}
