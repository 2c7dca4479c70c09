//! End-to-end layout and compositing scenarios.

mod common;

use common::{TestWidget, build, sized};
use spark_compositor::layout::{self, resolve};
use spark_compositor::renderer::line_text;
use spark_compositor::{
    Axis, Compositor, CompositorError, DockEdge, GridStyles, LayoutContext, LayoutKind, Region,
    Scalar, Size, Styles, WidgetTree,
};
use test_case::test_case;

// =============================================================================
// Resolver
// =============================================================================

#[test_case(&[Scalar::fraction(1.0), Scalar::fraction(1.0)], 21, 1, &[(0, 10), (11, 10)] ; "two fractions with gutter")]
#[test_case(&[Scalar::cells(5.0), Scalar::fraction(1.0)], 12, 0, &[(0, 5), (5, 7)] ; "fixed then fraction")]
#[test_case(&[Scalar::fraction(1.0), Scalar::fraction(2.0)], 10, 0, &[(0, 3), (3, 7)] ; "weighted fractions")]
#[test_case(&[Scalar::fraction(1.0); 3], 10, 0, &[(0, 3), (3, 3), (6, 4)] ; "no drift across tracks")]
#[test_case(&[Scalar::percent(50.0), Scalar::fraction(1.0)], 30, 2, &[(0, 15), (17, 13)] ; "percent of container")]
#[test_case(&[], 10, 1, &[] ; "no dimensions")]
fn resolver(dimensions: &[Scalar], total: i32, gutter: i32, expected: &[(i32, i32)]) {
    let size = Size::new(total, 1);
    let resolved = resolve(dimensions, total, gutter, Axis::Horizontal, size, size);
    assert_eq!(resolved, expected);
}

// =============================================================================
// Layouts
// =============================================================================

#[test]
fn vertical_auto_heights_stack() {
    let mut tree = WidgetTree::new();
    let root = tree.insert_root(TestWidget::new(Styles::new()));
    let ids: Vec<_> = (0..3)
        .map(|_| {
            let styles = Styles::new().with_width(Scalar::fraction(1.0));
            tree.insert_child(root, TestWidget::new(styles).with_content(4, 2))
                .unwrap()
        })
        .collect();

    let ctx = LayoutContext::new(&tree, Size::new(20, 10));
    let result = layout::arrange(&ctx, root, Size::new(20, 10)).unwrap();
    for (index, id) in ids.iter().enumerate() {
        let placement = &result.placements[index];
        assert_eq!(placement.widget, Some(*id));
        assert_eq!(placement.region, Region::new(0, index as i32 * 2, 20, 2));
    }
    assert_eq!(
        result.virtual_placement().unwrap().region,
        Region::new(0, 0, 20, 6)
    );
}

#[test]
fn dock_top_leaves_remaining_region() {
    let header = Styles::new()
        .with_height(Scalar::cells(3.0))
        .with_dock(DockEdge::Top);
    let body = Styles::new().with_size(Scalar::fraction(1.0), Scalar::fraction(1.0));
    let (tree, root, ids) = build(LayoutKind::Dock, vec![header, body]);

    let ctx = LayoutContext::new(&tree, Size::new(40, 24));
    let result = layout::arrange(&ctx, root, Size::new(40, 24)).unwrap();
    let region_of = |id| {
        result
            .widget_placements()
            .find(|placement| placement.widget == Some(id))
            .map(|placement| placement.region)
    };
    assert_eq!(region_of(ids[0]), Some(Region::new(0, 0, 40, 3)));
    assert_eq!(region_of(ids[1]), Some(Region::new(0, 3, 40, 21)));
}

#[test_case(2, 2, 20, 10, Region::new(0, 5, 10, 5) ; "declared rows")]
#[test_case(2, 0, 20, 10, Region::new(0, 5, 10, 5) ; "rows grow with children")]
#[test_case(3, 2, 30, 10, Region::new(20, 0, 10, 5) ; "third column free")]
fn grid_span_then_next(columns: u16, rows: u16, width: i32, height: i32, expected: Region) {
    let mut tree = WidgetTree::new();
    let root = tree.insert_root(TestWidget::new(Styles::new().with_grid(GridStyles {
        size_columns: columns,
        size_rows: rows,
        ..Default::default()
    })));
    tree.insert_child(root, TestWidget::new(Styles::new().with_span(2, 1)))
        .unwrap();
    let next = tree.insert_child(root, TestWidget::new(Styles::new())).unwrap();

    let ctx = LayoutContext::new(&tree, Size::new(width, height));
    let result = layout::arrange(&ctx, root, Size::new(width, height)).unwrap();
    let placement = result
        .widget_placements()
        .find(|placement| placement.widget == Some(next))
        .unwrap();
    assert_eq!(placement.region, expected);
}

#[test_case(LayoutKind::Vertical ; "vertical")]
#[test_case(LayoutKind::Horizontal ; "horizontal")]
#[test_case(LayoutKind::Dock ; "dock")]
#[test_case(LayoutKind::Grid ; "grid")]
#[test_case(LayoutKind::Center ; "center")]
fn zero_size_container(kind: LayoutKind) {
    let (tree, root, _) = build(kind, vec![sized(3.0, 2.0), Styles::new()]);
    let ctx = LayoutContext::new(&tree, Size::ZERO);
    let result = layout::arrange(&ctx, root, Size::ZERO).unwrap();
    for placement in &result.placements {
        assert!(placement.region.width >= 0 && placement.region.height >= 0);
    }
}

// =============================================================================
// Compositor
// =============================================================================

#[test]
fn overlapping_widgets_front_wins_both_mapped() {
    let back = sized(10.0, 5.0);
    let front = sized(10.0, 5.0).with_z_index(1);
    let (mut tree, root, ids) = build(LayoutKind::Center, vec![back, front]);

    let mut compositor = Compositor::new();
    compositor.reflow(&mut tree, root, Size::new(10, 5)).unwrap();

    let rendered = compositor
        .render(&tree, Some(Region::new(0, 0, 10, 5)))
        .unwrap();
    for line in &rendered {
        assert_eq!(line_text(line), "bbbbbbbbbb");
    }
    assert!(compositor.contains(ids[0]));
    assert_eq!(
        compositor.find_widget(ids[0]).unwrap().region,
        Region::new(0, 0, 10, 5)
    );
}

#[test]
fn hit_test_outside_everything() {
    let (mut tree, root, _) = build(LayoutKind::Vertical, vec![sized(4.0, 2.0)]);
    let mut compositor = Compositor::new();
    compositor.reflow(&mut tree, root, Size::new(10, 5)).unwrap();

    let error = compositor.get_widget_at(11, 1).unwrap_err();
    assert!(error.is_no_widget());
    assert!(matches!(error, CompositorError::NoWidgetAt { x: 11, y: 1 }));
    assert!(compositor.get_widget_at(-1, 0).is_err());
}

#[test]
fn transparent_root_leaves_gaps_blank_but_hit_testable() {
    let mut tree = WidgetTree::new();
    let root = tree.insert_root(TransparentRoot(Styles::new()));
    tree.insert_child(root, TestWidget::new(sized(2.0, 1.0)).with_fill('x'))
        .unwrap();

    let mut compositor = Compositor::new();
    compositor.reflow(&mut tree, root, Size::new(4, 1)).unwrap();
    let rendered = compositor.render(&tree, None).unwrap();
    assert_eq!(line_text(&rendered[0]), "xx  ");
    assert_eq!(compositor.get_widget_at(3, 0).unwrap().0, root);
}

struct TransparentRoot(Styles);

impl spark_compositor::Widget for TransparentRoot {
    fn styles(&self) -> &Styles {
        &self.0
    }

    fn render_lines(&self, _size: Size) -> Result<spark_compositor::Lines, spark_compositor::RenderError> {
        Ok(Vec::new())
    }

    fn is_transparent(&self) -> bool {
        true
    }
}
