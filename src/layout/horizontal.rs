//! Horizontal layout - stack children left to right.
//!
//! The transpose of the vertical layout: left/right margins collapse and
//! each child is aligned vertically by its own rule.

use super::vertical::collapsed_gaps;
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
        result.push(WidgetPlacement::virtual_size(Region::new(0, 0, 0, size.height)));
        return Ok(result);
    }

    let margins: Vec<Spacing> = children
        .iter()
        .map(|&child| ctx.styles(child).map(|styles| styles.margin))
        .collect::<Result<_, _>>()?;
    let transposed: Vec<Spacing> = margins.iter().map(Spacing::transpose).collect();
    let gaps = collapsed_gaps(&transposed);
    let margin_footprint = Size::new(
        margins[0].left + gaps.iter().sum::<i32>(),
        margins.iter().map(Spacing::height).max().unwrap_or(0),
    );

    let models = resolve_box_models(ctx, children, size, margin_footprint, Axis::Horizontal)?;

    let mut x = Fraction::from(margins[0].left);
    let mut bottom = size.height;
    for ((&child, model), gap) in children.iter().zip(&models).zip(&gaps) {
        let styles = ctx.styles(child)?;
        let margin = model.margin;
        let height = model.height.to_cells();
        let next_x = x + model.width;
        let y = margin.top
            + styles
                .align_vertical
                .offset(size.height - margin.height(), height);
        let left = x.to_cells();
        let region = Region::new(left, y, next_x.to_cells() - left, height);

        bottom = bottom.max(region.bottom() + margin.bottom);
        result.push(
            WidgetPlacement::new(region, margin, child, styles.z_index).with_offset(styles.offset),
        );
        x = next_x + Fraction::from(*gap);
    }

    result.push(WidgetPlacement::virtual_size(Region::new(
        0,
        0,
        x.to_cells(),
        bottom,
    )));
    Ok(result)
}
