//! Scalar resolver - share a length between a run of dimensions.
//!
//! Fixed dimensions (cells, percentages, viewport units) are resolved first,
//! then whatever is left after the fixed lengths and the gutters is divided
//! between the `fr` dimensions by weight. All arithmetic is exact; values are
//! truncated only when turned into offsets, so rounding error never
//! accumulates across tracks.

use super::Fraction;
use crate::geometry::Size;
use crate::styles::{Axis, Scalar};

/// Resolve `dimensions` into `(offset, length)` pairs within `total`.
///
/// `gutter` cells separate adjacent items. Fixed dimensions are not
/// validated: over-budget input produces over-budget output rather than an
/// error.
pub fn resolve(
    dimensions: &[Scalar],
    total: i32,
    gutter: i32,
    axis: Axis,
    container: Size,
    viewport: Size,
) -> Vec<(i32, i32)> {
    if dimensions.is_empty() {
        return Vec::new();
    }

    let fixed: Vec<Option<Fraction>> = dimensions
        .iter()
        .map(|scalar| {
            (!scalar.is_fraction())
                .then(|| scalar.resolve(axis, container, viewport, Fraction::ONE))
        })
        .collect();

    let total_fraction: Fraction = dimensions
        .iter()
        .filter(|scalar| scalar.is_fraction())
        .map(|scalar| Fraction::from_f32(scalar.value))
        .sum();

    let lengths: Vec<Fraction> = if total_fraction.is_positive() {
        let total_gutter = gutter as i64 * (dimensions.len() as i64 - 1);
        let consumed: Fraction = fixed.iter().flatten().copied().sum();
        let remaining =
            (Fraction::from_int(total as i64 - total_gutter) - consumed).max(Fraction::ZERO);
        let fraction_unit = remaining / total_fraction;
        dimensions
            .iter()
            .zip(&fixed)
            .map(|(scalar, fixed)| {
                fixed.unwrap_or_else(|| Fraction::from_f32(scalar.value) * fraction_unit)
            })
            .collect()
    } else {
        fixed.iter().map(|fixed| fixed.unwrap_or(Fraction::ZERO)).collect()
    };

    let gutter = Fraction::from(gutter);
    let mut start = Fraction::ZERO;
    let mut results = Vec::with_capacity(lengths.len());
    for length in lengths {
        let end = start + length;
        let offset = start.to_cells();
        results.push((offset, end.to_cells() - offset));
        start = end + gutter;
    }
    results
}
