//! Geometry kernel.
//!
//! Value types shared by layout and compositing: [`Offset`], [`Size`],
//! [`Region`] and [`Spacing`]. Every operation here is pure and total.
//! Degenerate (zero-area) regions are valid inputs and simply produce
//! empty results.
//!
//! Coordinates are signed because scrolled content routinely sits above or
//! to the left of the screen origin.

use std::ops::{Add, Neg, Range, Sub};

use crate::error::StyleError;

// =============================================================================
// Offset
// =============================================================================

/// A point (or displacement) in cell coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Offset {
    pub x: i32,
    pub y: i32,
}

impl Offset {
    /// The origin.
    pub const ZERO: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Check if this is the origin.
    #[inline]
    pub const fn is_origin(&self) -> bool {
        self.x == 0 && self.y == 0
    }

    /// Linear blend towards `destination`.
    ///
    /// `factor` is clamped to `0.0..=1.0`; the result is truncated to cells.
    pub fn blend(self, destination: Offset, factor: f32) -> Offset {
        let factor = factor.clamp(0.0, 1.0);
        let x = self.x as f32 + (destination.x - self.x) as f32 * factor;
        let y = self.y as f32 + (destination.y - self.y) as f32 * factor;
        Offset::new(x as i32, y as i32)
    }

    /// Straight line distance to `other`.
    pub fn distance_to(self, other: Offset) -> f32 {
        let dx = (other.x - self.x) as f32;
        let dy = (other.y - self.y) as f32;
        (dx * dx + dy * dy).sqrt()
    }

    /// Clamp both components into `0..width` / `0..height`.
    pub fn clamped(self, width: i32, height: i32) -> Offset {
        Offset::new(
            self.x.clamp(0, (width - 1).max(0)),
            self.y.clamp(0, (height - 1).max(0)),
        )
    }
}

impl Add for Offset {
    type Output = Offset;

    #[inline]
    fn add(self, rhs: Offset) -> Offset {
        Offset::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Offset {
    type Output = Offset;

    #[inline]
    fn sub(self, rhs: Offset) -> Offset {
        Offset::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for Offset {
    type Output = Offset;

    #[inline]
    fn neg(self) -> Offset {
        Offset::new(-self.x, -self.y)
    }
}

impl From<(i32, i32)> for Offset {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

// =============================================================================
// Size
// =============================================================================

/// A width and height in cells.
///
/// Negative dimensions are clamped to zero by the constructor. A size with
/// either dimension zero has no area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const ZERO: Self = Self { width: 0, height: 0 };

    pub const fn new(width: i32, height: i32) -> Self {
        Self {
            width: if width < 0 { 0 } else { width },
            height: if height < 0 { 0 } else { height },
        }
    }

    /// Number of cells covered.
    #[inline]
    pub const fn area(&self) -> i32 {
        self.width * self.height
    }

    /// True when either dimension is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// A region of this size anchored at the origin.
    #[inline]
    pub const fn region(&self) -> Region {
        Region::new(0, 0, self.width, self.height)
    }

    /// Check if a point lies within `[0, width) x [0, height)`.
    #[inline]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && x < self.width && y < self.height
    }

    pub const fn with_width(self, width: i32) -> Size {
        Size::new(width, self.height)
    }

    pub const fn with_height(self, height: i32) -> Size {
        Size::new(self.width, height)
    }

    /// Grow (or shrink, for negative values) both dimensions.
    pub const fn expand(self, width: i32, height: i32) -> Size {
        Size::new(self.width + width, self.height + height)
    }

    /// Linear blend towards `destination`.
    pub fn blend(self, destination: Size, factor: f32) -> Size {
        let factor = factor.clamp(0.0, 1.0);
        let width = self.width as f32 + (destination.width - self.width) as f32 * factor;
        let height = self.height as f32 + (destination.height - self.height) as f32 * factor;
        Size::new(width as i32, height as i32)
    }
}

impl Add for Size {
    type Output = Size;

    fn add(self, rhs: Size) -> Size {
        Size::new(self.width + rhs.width, self.height + rhs.height)
    }
}

impl Sub for Size {
    type Output = Size;

    fn sub(self, rhs: Size) -> Size {
        Size::new(self.width - rhs.width, self.height - rhs.height)
    }
}

impl From<(i32, i32)> for Size {
    fn from((width, height): (i32, i32)) -> Self {
        Self::new(width, height)
    }
}

// =============================================================================
// Region
// =============================================================================

/// An axis-aligned rectangle.
///
/// `x`/`y` may be negative. `width`/`height` are never negative when built
/// through the constructors; a region with a zero dimension contains nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Region {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Region {
    pub const EMPTY: Self = Self {
        x: 0,
        y: 0,
        width: 0,
        height: 0,
    };

    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width: if width < 0 { 0 } else { width },
            height: if height < 0 { 0 } else { height },
        }
    }

    /// Build from non-inclusive corners. Inverted corners give an empty region.
    pub const fn from_corners(x1: i32, y1: i32, x2: i32, y2: i32) -> Self {
        Self::new(x1, y1, x2 - x1, y2 - y1)
    }

    pub const fn from_offset_size(offset: Offset, size: Size) -> Self {
        Self::new(offset.x, offset.y, size.width, size.height)
    }

    /// Bounding box of every non-empty region in the iterator, or [`Region::EMPTY`].
    pub fn from_union<I>(regions: I) -> Region
    where
        I: IntoIterator<Item = Region>,
    {
        regions
            .into_iter()
            .fold(Region::EMPTY, |total, region| total.union(&region))
    }

    // -------------------------------------------------------------------------
    // Derived views
    // -------------------------------------------------------------------------

    #[inline]
    pub const fn area(&self) -> i32 {
        self.width * self.height
    }

    /// True when the region contains no cells.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    #[inline]
    pub const fn right(&self) -> i32 {
        self.x + self.width
    }

    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y + self.height
    }

    /// `(x1, y1, x2, y2)` with non-inclusive maxima.
    #[inline]
    pub const fn corners(&self) -> (i32, i32, i32, i32) {
        (self.x, self.y, self.x + self.width, self.y + self.height)
    }

    /// Half-open horizontal extent `[x, right)`.
    #[inline]
    pub const fn x_extents(&self) -> (i32, i32) {
        (self.x, self.x + self.width)
    }

    /// Half-open vertical extent `[y, bottom)`.
    #[inline]
    pub const fn y_extents(&self) -> (i32, i32) {
        (self.y, self.y + self.height)
    }

    #[inline]
    pub const fn origin(&self) -> Offset {
        Offset::new(self.x, self.y)
    }

    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Bottom-right corner (non-inclusive).
    #[inline]
    pub const fn bottom_right(&self) -> Offset {
        Offset::new(self.right(), self.bottom())
    }

    /// The cell closest to the middle.
    pub const fn center(&self) -> Offset {
        Offset::new(self.x + self.width / 2, self.y + self.height / 2)
    }

    /// Rows covered by the region.
    #[inline]
    pub fn line_range(&self) -> Range<i32> {
        self.y..self.bottom()
    }

    /// Columns covered by the region.
    #[inline]
    pub fn column_span(&self) -> Range<i32> {
        self.x..self.right()
    }

    // -------------------------------------------------------------------------
    // Transforms
    // -------------------------------------------------------------------------

    #[inline]
    pub const fn translate(&self, offset: Offset) -> Region {
        Region::new(self.x + offset.x, self.y + offset.y, self.width, self.height)
    }

    /// Same size, moved to `offset`.
    #[inline]
    pub const fn at_offset(&self, offset: Offset) -> Region {
        Region::new(offset.x, offset.y, self.width, self.height)
    }

    /// Same size, moved to the origin.
    #[inline]
    pub const fn reset_offset(&self) -> Region {
        Region::new(0, 0, self.width, self.height)
    }

    /// Grow symmetrically: `width` columns on each side, `height` rows above and below.
    pub const fn expand(&self, width: i32, height: i32) -> Region {
        Region::new(
            self.x - width,
            self.y - height,
            self.width + width * 2,
            self.height + height * 2,
        )
    }

    /// Grow outward by a spacing.
    pub const fn grow(&self, spacing: Spacing) -> Region {
        Region::new(
            self.x - spacing.left,
            self.y - spacing.top,
            self.width + spacing.width(),
            self.height + spacing.height(),
        )
    }

    /// Shrink inward by a spacing. Never produces a negative size.
    pub const fn shrink(&self, spacing: Spacing) -> Region {
        Region::new(
            self.x + spacing.left,
            self.y + spacing.top,
            self.width - spacing.width(),
            self.height - spacing.height(),
        )
    }

    /// Limit the size, keeping the origin.
    pub fn crop_size(&self, size: Size) -> Region {
        Region::new(
            self.x,
            self.y,
            self.width.min(size.width),
            self.height.min(size.height),
        )
    }

    /// Crop to `[0, width) x [0, height)`.
    pub fn clip(&self, width: i32, height: i32) -> Region {
        self.intersection(&Region::new(0, 0, width, height))
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    /// Check if the regions share at least one cell.
    #[inline]
    pub const fn overlaps(&self, other: &Region) -> bool {
        !self.is_empty()
            && !other.is_empty()
            && self.x < other.x + other.width
            && other.x < self.x + self.width
            && self.y < other.y + other.height
            && other.y < self.y + self.height
    }

    #[inline]
    pub const fn contains_point(&self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.width && y < self.y + self.height
    }

    /// Check if `other` lies entirely inside this region.
    ///
    /// An empty `other` covers no cells and is always contained.
    pub const fn contains_region(&self, other: &Region) -> bool {
        if other.is_empty() {
            return true;
        }
        other.x >= self.x
            && other.y >= self.y
            && other.x + other.width <= self.x + self.width
            && other.y + other.height <= self.y + self.height
    }

    /// Overlapping area of both regions.
    ///
    /// Disjoint regions give a zero-area region anchored at the clamped
    /// top-left corner; only its emptiness is meaningful.
    #[inline]
    pub const fn intersection(&self, other: &Region) -> Region {
        let x1 = if self.x > other.x { self.x } else { other.x };
        let y1 = if self.y > other.y { self.y } else { other.y };
        let x2 = if self.right() < other.right() {
            self.right()
        } else {
            other.right()
        };
        let y2 = if self.bottom() < other.bottom() {
            self.bottom()
        } else {
            other.bottom()
        };
        Region::from_corners(x1, y1, x2, y2)
    }

    /// Bounding box of both regions. Empty regions do not contribute.
    pub const fn union(&self, other: &Region) -> Region {
        if self.is_empty() {
            return *other;
        }
        if other.is_empty() {
            return *self;
        }
        let x1 = if self.x < other.x { self.x } else { other.x };
        let y1 = if self.y < other.y { self.y } else { other.y };
        let x2 = if self.right() > other.right() {
            self.right()
        } else {
            other.right()
        };
        let y2 = if self.bottom() > other.bottom() {
            self.bottom()
        } else {
            other.bottom()
        };
        Region::from_corners(x1, y1, x2, y2)
    }

    // -------------------------------------------------------------------------
    // Splits
    // -------------------------------------------------------------------------

    /// Split into four at a relative `(cut_x, cut_y)`.
    ///
    /// Negative cuts count from the right/bottom edge.
    /// Returns `(top_left, top_right, bottom_left, bottom_right)`.
    pub fn split(&self, cut_x: i32, cut_y: i32) -> (Region, Region, Region, Region) {
        let cut_x = if cut_x < 0 { self.width + cut_x } else { cut_x }.clamp(0, self.width);
        let cut_y = if cut_y < 0 { self.height + cut_y } else { cut_y }.clamp(0, self.height);
        let (x, y, w, h) = (self.x, self.y, self.width, self.height);
        (
            Region::new(x, y, cut_x, cut_y),
            Region::new(x + cut_x, y, w - cut_x, cut_y),
            Region::new(x, y + cut_y, cut_x, h - cut_y),
            Region::new(x + cut_x, y + cut_y, w - cut_x, h - cut_y),
        )
    }

    /// Split into left and right at a relative column (negative counts from the right).
    pub fn split_vertical(&self, cut: i32) -> (Region, Region) {
        let cut = if cut < 0 { self.width + cut } else { cut }.clamp(0, self.width);
        (
            Region::new(self.x, self.y, cut, self.height),
            Region::new(self.x + cut, self.y, self.width - cut, self.height),
        )
    }

    /// Split into top and bottom at a relative row (negative counts from the bottom).
    pub fn split_horizontal(&self, cut: i32) -> (Region, Region) {
        let cut = if cut < 0 { self.height + cut } else { cut }.clamp(0, self.height);
        (
            Region::new(self.x, self.y, self.width, cut),
            Region::new(self.x, self.y + cut, self.width, self.height - cut),
        )
    }
}

impl Add<Offset> for Region {
    type Output = Region;

    #[inline]
    fn add(self, rhs: Offset) -> Region {
        self.translate(rhs)
    }
}

impl Sub<Offset> for Region {
    type Output = Region;

    #[inline]
    fn sub(self, rhs: Offset) -> Region {
        self.translate(-rhs)
    }
}

impl From<Size> for Region {
    fn from(size: Size) -> Self {
        size.region()
    }
}

// =============================================================================
// Spacing
// =============================================================================

/// A four-sided inset: padding, border or margin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Spacing {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl Spacing {
    pub const ZERO: Self = Self::all(0);

    pub const fn new(top: i32, right: i32, bottom: i32, left: i32) -> Self {
        Self {
            top,
            right,
            bottom,
            left,
        }
    }

    /// Same value on every side.
    pub const fn all(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Top and bottom only.
    pub const fn vertical(value: i32) -> Self {
        Self::new(value, 0, value, 0)
    }

    /// Left and right only.
    pub const fn horizontal(value: i32) -> Self {
        Self::new(0, value, 0, value)
    }

    /// CSS-style expansion of 1, 2 or 4 values.
    ///
    /// - 1 value: every side
    /// - 2 values: (vertical, horizontal)
    /// - 4 values: (top, right, bottom, left)
    pub fn unpack(values: &[i32]) -> Result<Self, StyleError> {
        match *values {
            [all] => Ok(Self::all(all)),
            [vertical, horizontal] => Ok(Self::new(vertical, horizontal, vertical, horizontal)),
            [top, right, bottom, left] => Ok(Self::new(top, right, bottom, left)),
            _ => Err(StyleError::SpacingValues(values.len())),
        }
    }

    /// `left + right`
    #[inline]
    pub const fn width(&self) -> i32 {
        self.left + self.right
    }

    /// `top + bottom`
    #[inline]
    pub const fn height(&self) -> i32 {
        self.top + self.bottom
    }

    /// Total horizontal and vertical space as a size.
    #[inline]
    pub const fn totals(&self) -> Size {
        Size::new(self.width(), self.height())
    }

    #[inline]
    pub const fn top_left(&self) -> Offset {
        Offset::new(self.left, self.top)
    }

    #[inline]
    pub const fn bottom_right(&self) -> Offset {
        Offset::new(self.right, self.bottom)
    }

    /// Swap the axes: top with left, bottom with right.
    #[inline]
    pub const fn transpose(&self) -> Spacing {
        Spacing::new(self.left, self.bottom, self.right, self.top)
    }

    /// Per-side maximum of two spacings.
    pub fn grow_maximum(&self, other: &Spacing) -> Spacing {
        Spacing::new(
            self.top.max(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
            self.left.max(other.left),
        )
    }
}

impl Add for Spacing {
    type Output = Spacing;

    fn add(self, rhs: Spacing) -> Spacing {
        Spacing::new(
            self.top + rhs.top,
            self.right + rhs.right,
            self.bottom + rhs.bottom,
            self.left + rhs.left,
        )
    }
}

impl Sub for Spacing {
    type Output = Spacing;

    fn sub(self, rhs: Spacing) -> Spacing {
        Spacing::new(
            self.top - rhs.top,
            self.right - rhs.right,
            self.bottom - rhs.bottom,
            self.left - rhs.left,
        )
    }
}

// =============================================================================
// Tests
// =============================================================================
