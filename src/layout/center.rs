//! Center layout - every child centered over the whole container.
//!
//! Children do not share space and may overlap; meant for a single modal
//! child.

use super::{ArrangeResult, Fraction, LayoutContext, WidgetPlacement};
use crate::engine::WidgetId;
use crate::error::ArrangeError;
use crate::geometry::{Region, Size};

pub(super) fn arrange(
    ctx: &LayoutContext<'_>,
    children: &[WidgetId],
    size: Size,
) -> Result<ArrangeResult, ArrangeError> {
    let mut result = ArrangeResult::new();
    for &child in children {
        let styles = ctx.styles(child)?;
        let model = ctx.box_model(
            child,
            size,
            Fraction::from(size.width),
            Fraction::from(size.height),
        )?;
        let margin = model.margin;
        let child_size = model.size();
        let space = size - margin.totals();
        let region = Region::new(
            margin.left + (space.width - child_size.width) / 2,
            margin.top + (space.height - child_size.height) / 2,
            child_size.width,
            child_size.height,
        );
        result.push(
            WidgetPlacement::new(region, margin, child, styles.z_index).with_offset(styles.offset),
        );
    }
    Ok(result)
}
