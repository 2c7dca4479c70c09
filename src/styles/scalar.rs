//! Scalar dimensions.
//!
//! A [`Scalar`] is a number with a unit. Cells are absolute, percentages
//! reference the container, `vw`/`vh` reference the viewport and `fr`
//! shares out whatever space is left once everything else is resolved.

use crate::geometry::Size;
use crate::layout::Fraction;

/// Unit of a [`Scalar`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Unit {
    /// Absolute terminal cells.
    #[default]
    Cells,
    /// Share of the space left after fixed dimensions (`fr`).
    Fraction,
    /// Percent of the container along the resolved axis.
    Percent,
    /// Percent of the container width (`w`).
    Width,
    /// Percent of the container height (`h`).
    Height,
    /// Percent of the viewport width (`vw`).
    ViewWidth,
    /// Percent of the viewport height (`vh`).
    ViewHeight,
    /// Sized from content.
    Auto,
}

/// Axis a dimension is resolved along; decides what `Percent` refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Length of `size` along this axis.
    #[inline]
    pub const fn of(&self, size: Size) -> i32 {
        match self {
            Axis::Horizontal => size.width,
            Axis::Vertical => size.height,
        }
    }

    /// The other axis.
    #[inline]
    pub const fn cross(&self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }
}

/// A dimension value with a unit.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scalar {
    pub value: f32,
    pub unit: Unit,
}

impl Scalar {
    pub const fn new(value: f32, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub const fn cells(value: f32) -> Self {
        Self::new(value, Unit::Cells)
    }

    pub const fn fraction(value: f32) -> Self {
        Self::new(value, Unit::Fraction)
    }

    pub const fn percent(value: f32) -> Self {
        Self::new(value, Unit::Percent)
    }

    pub const fn view_width(value: f32) -> Self {
        Self::new(value, Unit::ViewWidth)
    }

    pub const fn view_height(value: f32) -> Self {
        Self::new(value, Unit::ViewHeight)
    }

    pub const fn auto() -> Self {
        Self::new(1.0, Unit::Auto)
    }

    #[inline]
    pub const fn is_auto(&self) -> bool {
        matches!(self.unit, Unit::Auto)
    }

    #[inline]
    pub const fn is_fraction(&self) -> bool {
        matches!(self.unit, Unit::Fraction)
    }

    #[inline]
    pub const fn is_cells(&self) -> bool {
        matches!(self.unit, Unit::Cells)
    }

    /// True for units that do not depend on sibling dimensions.
    #[inline]
    pub const fn is_fixed(&self) -> bool {
        !matches!(self.unit, Unit::Fraction | Unit::Auto)
    }

    /// Resolve to an exact cell count.
    ///
    /// `fraction_unit` is the size of `1fr`. `Auto` resolves to zero; callers
    /// measure content for auto dimensions instead.
    pub fn resolve(
        &self,
        axis: Axis,
        container: Size,
        viewport: Size,
        fraction_unit: Fraction,
    ) -> Fraction {
        let value = Fraction::from_f32(self.value);
        let hundred = Fraction::from_int(100);
        match self.unit {
            Unit::Cells => value,
            Unit::Fraction => value * fraction_unit,
            Unit::Percent => value * Fraction::from(axis.of(container)) / hundred,
            Unit::Width => value * Fraction::from(container.width) / hundred,
            Unit::Height => value * Fraction::from(container.height) / hundred,
            Unit::ViewWidth => value * Fraction::from(viewport.width) / hundred,
            Unit::ViewHeight => value * Fraction::from(viewport.height) / hundred,
            Unit::Auto => Fraction::ZERO,
        }
    }
}

impl From<i32> for Scalar {
    fn from(cells: i32) -> Self {
        Scalar::cells(cells as f32)
    }
}
