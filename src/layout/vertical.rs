//! Vertical layout - stack children top to bottom.
//!
//! Adjacent margins collapse: the gap between two children is the larger of
//! the upper child's bottom margin and the lower child's top margin. A
//! trailing placement with no widget reports the stacked height.

use super::{ArrangeResult, Fraction, LayoutContext, WidgetPlacement, resolve_box_models};
use crate::engine::WidgetId;
use crate::error::ArrangeError;
use crate::geometry::{Region, Size, Spacing};
use crate::styles::Axis;

pub(super) fn arrange(
    ctx: &LayoutContext<'_>,
    children: &[WidgetId],
    size: Size,
) -> Result<ArrangeResult, ArrangeError> {
    let mut result = ArrangeResult::new();
    if children.is_empty() {
        result.push(WidgetPlacement::virtual_size(Region::new(0, 0, size.width, 0)));
        return Ok(result);
    }

    let margins: Vec<Spacing> = children
        .iter()
        .map(|&child| ctx.styles(child).map(|styles| styles.margin))
        .collect::<Result<_, _>>()?;
    let gaps = collapsed_gaps(&margins);
    let margin_footprint = Size::new(
        margins.iter().map(Spacing::width).max().unwrap_or(0),
        margins[0].top + gaps.iter().sum::<i32>(),
    );

    let models = resolve_box_models(ctx, children, size, margin_footprint, Axis::Vertical)?;

    let mut y = Fraction::from(margins[0].top);
    let mut right = size.width;
    for ((&child, model), gap) in children.iter().zip(&models).zip(&gaps) {
        let styles = ctx.styles(child)?;
        let margin = model.margin;
        let width = model.width.to_cells();
        let next_y = y + model.height;
        let x = margin.left
            + styles
                .align_horizontal
                .offset(size.width - margin.width(), width);
        let top = y.to_cells();
        let region = Region::new(x, top, width, next_y.to_cells() - top);

        right = right.max(region.right() + margin.right);
        result.push(
            WidgetPlacement::new(region, margin, child, styles.z_index).with_offset(styles.offset),
        );
        y = next_y + Fraction::from(*gap);
    }

    result.push(WidgetPlacement::virtual_size(Region::new(
        0,
        0,
        right,
        y.to_cells(),
    )));
    Ok(result)
}

/// Space after each item: collapsed gap to the next, trailing margin for the last.
pub(super) fn collapsed_gaps(margins: &[Spacing]) -> Vec<i32> {
    margins
        .iter()
        .enumerate()
        .map(|(index, margin)| match margins.get(index + 1) {
            Some(next) => margin.bottom.max(next.top),
            None => margin.bottom,
        })
        .collect()
}
