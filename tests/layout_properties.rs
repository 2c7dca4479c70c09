//! Property tests for the scalar resolver and the flow layouts.

mod common;

use common::{build, sized};
use proptest::prelude::*;
use spark_compositor::layout::{self, resolve};
use spark_compositor::{Axis, LayoutContext, LayoutKind, Region, Scalar, Size, Spacing};

fn scalar() -> impl Strategy<Value = Scalar> {
    prop_oneof![
        (0u8..30).prop_map(|cells| Scalar::cells(f32::from(cells))),
        (1u8..6).prop_map(|weight| Scalar::fraction(f32::from(weight))),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn resolver_stays_within_budget(
        dimensions in prop::collection::vec(scalar(), 1..8),
        gutter in 0i32..3,
        extra in 0i32..200,
    ) {
        let gutters = gutter * (dimensions.len() as i32 - 1);
        let fixed: i32 = dimensions
            .iter()
            .filter(|scalar| scalar.is_cells())
            .map(|scalar| scalar.value as i32)
            .sum();

        let total = fixed + gutters + extra;
        let size = Size::new(total, 10);
        let resolved = resolve(&dimensions, total, gutter, Axis::Horizontal, size, size);

        prop_assert_eq!(resolved.len(), dimensions.len());
        let used: i32 = resolved.iter().map(|(_, length)| length).sum();
        prop_assert!(used + gutters <= total);

        let mut expected_offset = 0;
        for (offset, length) in &resolved {
            prop_assert_eq!(*offset, expected_offset);
            prop_assert!(*length >= 0);
            expected_offset = offset + length + gutter;
        }

        if dimensions.iter().any(Scalar::is_fraction) {
            prop_assert_eq!(used + gutters, total);
        }
    }

    #[test]
    fn resolver_keeps_exact_fixed_values(
        cells in prop::collection::vec(0i32..40, 1..10),
        gutter in 0i32..3,
    ) {
        let dimensions: Vec<Scalar> = cells.iter().map(|&value| Scalar::cells(value as f32)).collect();
        let total = cells.iter().sum::<i32>() + gutter * (cells.len() as i32 - 1);
        let size = Size::new(total, 1);
        let resolved = resolve(&dimensions, total, gutter, Axis::Horizontal, size, size);
        let lengths: Vec<i32> = resolved.iter().map(|(_, length)| *length).collect();
        prop_assert_eq!(lengths, cells);
    }

    #[test]
    fn flow_virtual_placement_is_union_of_children(
        horizontal in any::<bool>(),
        children in prop::collection::vec((1u8..15, 1u8..8, 0i32..3, 0i32..3), 1..6),
        width in 1i32..60,
        height in 1i32..40,
    ) {
        let kind = if horizontal { LayoutKind::Horizontal } else { LayoutKind::Vertical };
        let styles = children
            .iter()
            .map(|&(w, h, before, after)| {
                let margin = if horizontal {
                    Spacing::new(0, after, 0, before)
                } else {
                    Spacing::new(before, 0, after, 0)
                };
                sized(f32::from(w), f32::from(h)).with_margin(margin)
            })
            .collect();
        let (tree, root, _) = build(kind, styles);
        let ctx = LayoutContext::new(&tree, Size::new(width, height));
        let result = layout::arrange(&ctx, root, Size::new(width, height)).unwrap();

        let union = Region::from_union(result.widget_placements().map(|placement| {
            placement.offset_region().grow(placement.margin)
        }));
        let virtual_region = result.virtual_placement().unwrap().region;
        prop_assert!(virtual_region.contains_region(&union));
        prop_assert_eq!(virtual_region.x, 0);
        prop_assert_eq!(virtual_region.y, 0);
        if horizontal {
            prop_assert_eq!(virtual_region.width, union.right());
        } else {
            prop_assert_eq!(virtual_region.height, union.bottom());
        }
    }

    #[test]
    fn arrange_is_idempotent(
        kind in prop_oneof![
            Just(LayoutKind::Vertical),
            Just(LayoutKind::Horizontal),
            Just(LayoutKind::Grid),
            Just(LayoutKind::Center),
            Just(LayoutKind::Dock),
        ],
        weights in prop::collection::vec(1u8..5, 0..7),
        width in 0i32..80,
        height in 0i32..30,
    ) {
        let styles = weights
            .iter()
            .map(|&weight| {
                spark_compositor::Styles::new()
                    .with_size(Scalar::fraction(f32::from(weight)), Scalar::cells(f32::from(weight)))
            })
            .collect();
        let (tree, root, _) = build(kind, styles);
        let ctx = LayoutContext::new(&tree, Size::new(width, height));
        let first = layout::arrange(&ctx, root, Size::new(width, height)).unwrap();
        let second = layout::arrange(&ctx, root, Size::new(width, height)).unwrap();
        prop_assert_eq!(first, second);
    }
}
