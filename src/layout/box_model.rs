//! Box model - the outer size of one widget.
//!
//! # Sizing rules
//!
//! - Unset or `auto` width/height: measure the content, then add the gutter.
//! - Explicit with `border-box`: the resolved value is the outer size and
//!   the gutter is taken out of the content.
//! - Explicit with `content-box`: the resolved value is the content size and
//!   the gutter is added outside.
//! - Then `min` raises, then `max` lowers, each only if the rule is set.
//!
//! Margin is reported separately and never folded into the size.

use super::{Fraction, LayoutContext};
use crate::engine::WidgetId;
use crate::error::ArrangeError;
use crate::geometry::{Size, Spacing};
use crate::styles::{Axis, BoxSizing, Scalar, Styles};

/// Outer size of a widget (content plus gutter) and its margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoxModel {
    pub width: Fraction,
    pub height: Fraction,
    pub margin: Spacing,
}

impl BoxModel {
    /// Outer size truncated to cells.
    pub fn size(&self) -> Size {
        Size::new(self.width.to_cells(), self.height.to_cells())
    }
}

/// Compute the box model of one widget.
///
/// `container` is the space the widget is laid out in, `width_fraction` and
/// `height_fraction` the size of `1fr` along each axis. The measurement
/// callbacks receive the container minus gutter and margin and must return
/// pure content sizes.
#[allow(clippy::too_many_arguments)]
pub fn get_box_model<W, H>(
    styles: &Styles,
    container: Size,
    viewport: Size,
    width_fraction: Fraction,
    height_fraction: Fraction,
    content_width: W,
    content_height: H,
) -> Result<BoxModel, ArrangeError>
where
    W: FnOnce(Size, Size) -> Result<i32, ArrangeError>,
    H: FnOnce(Size, Size, i32) -> Result<i32, ArrangeError>,
{
    let is_border_box = styles.box_sizing == BoxSizing::BorderBox;
    let gutter = styles.gutter();
    let margin = styles.margin;
    let resolve_container = container - margin.totals();
    let content_container = resolve_container - gutter.totals();

    let explicit = |scalar: Scalar, axis: Axis, fraction: Fraction, gutter: i32| {
        let value = scalar.resolve(axis, resolve_container, viewport, fraction);
        if is_border_box {
            value - Fraction::from(gutter)
        } else {
            value
        }
    };

    // Width
    let mut width = match styles.width {
        Some(scalar) if !scalar.is_auto() => {
            explicit(scalar, Axis::Horizontal, width_fraction, gutter.width())
        }
        _ => Fraction::from(content_width(content_container, viewport)?),
    };
    if let Some(min_width) = styles.min_width {
        width = width.max(explicit(min_width, Axis::Horizontal, width_fraction, gutter.width()));
    }
    if let Some(max_width) = styles.max_width {
        width = width.min(explicit(max_width, Axis::Horizontal, width_fraction, gutter.width()));
    }
    let width = width.max(Fraction::ZERO);

    // Height
    let mut height = match styles.height {
        Some(scalar) if !scalar.is_auto() => {
            explicit(scalar, Axis::Vertical, height_fraction, gutter.height())
        }
        _ => Fraction::from(content_height(content_container, viewport, width.to_cells())?),
    };
    if let Some(min_height) = styles.min_height {
        height = height.max(explicit(min_height, Axis::Vertical, height_fraction, gutter.height()));
    }
    if let Some(max_height) = styles.max_height {
        height = height.min(explicit(max_height, Axis::Vertical, height_fraction, gutter.height()));
    }
    let height = height.max(Fraction::ZERO);

    Ok(BoxModel {
        width: width + Fraction::from(gutter.width()),
        height: height + Fraction::from(gutter.height()),
        margin,
    })
}

/// Size of `1fr` once fractional widgets clamped by min/max are taken out.
///
/// A widget whose fractional size falls outside its min/max is fixed at the
/// limit and removed from the pool; the unit is recomputed until stable.
pub fn resolve_fraction_unit(
    styles: &[&Styles],
    size: Size,
    viewport: Size,
    remaining_space: Fraction,
    axis: Axis,
) -> Fraction {
    if remaining_space.is_zero() || styles.is_empty() {
        return Fraction::ONE;
    }

    let resolve_limit = |scalar: Option<Scalar>| {
        scalar.map(|scalar| scalar.resolve(axis, size, viewport, Fraction::ONE))
    };
    let candidates: Vec<(Scalar, Option<Fraction>, Option<Fraction>)> = styles
        .iter()
        .filter_map(|styles| {
            let (dimension, min, max) = match axis {
                Axis::Horizontal => (styles.width, styles.min_width, styles.max_width),
                Axis::Vertical => (styles.height, styles.min_height, styles.max_height),
            };
            dimension.map(|dimension| (dimension, resolve_limit(min), resolve_limit(max)))
        })
        .collect();

    let initial_space = remaining_space;
    let mut remaining_space = remaining_space;
    let mut remaining_fraction: Fraction = candidates
        .iter()
        .map(|(scalar, _, _)| Fraction::from_f32(scalar.value))
        .sum();
    let mut resolved = vec![false; candidates.len()];

    while remaining_fraction.is_positive() {
        let mut changed = false;
        let fraction_unit = remaining_space / remaining_fraction;
        for (index, (scalar, min, max)) in candidates.iter().enumerate() {
            if resolved[index] {
                continue;
            }
            let value = scalar.resolve(axis, size, viewport, fraction_unit);
            let clamp = match (min, max) {
                (Some(min), _) if value < *min => Some(*min),
                (_, Some(max)) if value > *max => Some(*max),
                _ => None,
            };
            if let Some(limit) = clamp {
                remaining_space = remaining_space - limit;
                remaining_fraction = remaining_fraction - Fraction::from_f32(scalar.value);
                resolved[index] = true;
                changed = true;
            }
        }
        if !changed {
            break;
        }
    }

    if remaining_fraction.is_positive() {
        remaining_space / remaining_fraction
    } else {
        initial_space
    }
}

/// Box models for a run of siblings sharing `size` along `axis`.
///
/// Siblings with a fractional dimension on `axis` are resolved last, from
/// the space the others leave. `margin` is the total margin footprint of
/// the run.
pub fn resolve_box_models(
    ctx: &LayoutContext<'_>,
    children: &[WidgetId],
    size: Size,
    margin: Size,
    axis: Axis,
) -> Result<Vec<BoxModel>, ArrangeError> {
    let styles: Vec<&Styles> = children
        .iter()
        .map(|&child| ctx.styles(child))
        .collect::<Result<_, _>>()?;
    let dimension = |styles: &Styles| match axis {
        Axis::Horizontal => styles.width,
        Axis::Vertical => styles.height,
    };

    let fraction_width = Fraction::from((size.width - margin.width).max(0));
    let fraction_height = Fraction::from((size.height - margin.height).max(0));

    let mut models: Vec<Option<BoxModel>> = Vec::with_capacity(children.len());
    for (&child, styles) in children.iter().zip(&styles) {
        if dimension(styles).is_some_and(|scalar| scalar.is_fraction()) {
            models.push(None);
        } else {
            models.push(Some(ctx.box_model(child, size, fraction_width, fraction_height)?));
        }
    }
    if models.iter().all(Option::is_some) {
        return Ok(models.into_iter().flatten().collect());
    }

    let fractional: Vec<&Styles> = styles
        .iter()
        .copied()
        .filter(|styles| dimension(styles).is_some_and(|scalar| scalar.is_fraction()))
        .collect();
    let consumed: Fraction = models
        .iter()
        .flatten()
        .map(|model| match axis {
            Axis::Horizontal => model.width,
            Axis::Vertical => model.height,
        })
        .sum();
    let remaining_space = (axis.of(size) - consumed.to_cells() - axis.of(margin)).max(0);
    let fraction_unit = resolve_fraction_unit(
        &fractional,
        size,
        ctx.viewport,
        Fraction::from(remaining_space),
        axis,
    );
    let (width_fraction, height_fraction) = match axis {
        Axis::Horizontal => (fraction_unit, fraction_height),
        Axis::Vertical => (fraction_width, fraction_unit),
    };

    children
        .iter()
        .zip(models)
        .map(|(&child, model)| match model {
            Some(model) => Ok(model),
            None => ctx.box_model(child, size, width_fraction, height_fraction),
        })
        .collect()
}
