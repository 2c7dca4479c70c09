//! Exact rational numbers for track and box sizing.
//!
//! Fractional units divide leftover space. Keeping the intermediate values
//! exact and truncating only when an offset is produced means rounding error
//! never exceeds one cell, however many tracks share the space.

use std::cmp::Ordering;
use std::ops::{Add, Div, Mul, Neg, Sub};

/// Scale used when converting style values (which are `f32`) to fractions.
const FLOAT_SCALE: i64 = 1000;

/// A reduced fraction with a positive denominator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fraction {
    num: i64,
    den: i64,
}

fn gcd(mut a: i128, mut b: i128) -> i128 {
    a = a.abs();
    b = b.abs();
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

impl Fraction {
    pub const ZERO: Self = Self { num: 0, den: 1 };
    pub const ONE: Self = Self { num: 1, den: 1 };

    /// Build `num / den`. A zero denominator yields zero.
    pub fn new(num: i64, den: i64) -> Self {
        Self::reduce(num as i128, den as i128)
    }

    fn reduce(num: i128, den: i128) -> Self {
        if den == 0 || num == 0 {
            return Self::ZERO;
        }
        let divisor = gcd(num, den);
        let (mut num, mut den) = (num / divisor, den / divisor);
        if den < 0 {
            num = -num;
            den = -den;
        }
        if den > i64::MAX as i128 {
            // Too fine to represent: fall back to the nearest coarser
            // denominator. The error stays far below one cell.
            let scale = den / i64::MAX as i128 + 1;
            num /= scale;
            den /= scale;
            let divisor = gcd(num, den).abs().max(1);
            num /= divisor;
            den /= divisor;
        }
        Self {
            num: num.clamp(i64::MIN as i128, i64::MAX as i128) as i64,
            den: den as i64,
        }
    }

    pub const fn from_int(value: i64) -> Self {
        Self { num: value, den: 1 }
    }

    /// Convert a style value, keeping three decimal places.
    pub fn from_f32(value: f32) -> Self {
        if !value.is_finite() {
            return Self::ZERO;
        }
        Self::new((value as f64 * FLOAT_SCALE as f64).round() as i64, FLOAT_SCALE)
    }

    #[inline]
    pub const fn numerator(&self) -> i64 {
        self.num
    }

    #[inline]
    pub const fn denominator(&self) -> i64 {
        self.den
    }

    #[inline]
    pub const fn is_zero(&self) -> bool {
        self.num == 0
    }

    #[inline]
    pub const fn is_positive(&self) -> bool {
        self.num > 0
    }

    /// Round towards negative infinity.
    #[inline]
    pub const fn floor(&self) -> i64 {
        self.num.div_euclid(self.den)
    }

    /// Truncate to a cell count (floored, saturating at `i32` bounds).
    #[inline]
    pub fn to_cells(&self) -> i32 {
        self.floor().clamp(i32::MIN as i64, i32::MAX as i64) as i32
    }
}

impl Default for Fraction {
    fn default() -> Self {
        Self::ZERO
    }
}

impl From<i32> for Fraction {
    fn from(value: i32) -> Self {
        Self::from_int(value as i64)
    }
}

impl From<i64> for Fraction {
    fn from(value: i64) -> Self {
        Self::from_int(value)
    }
}

impl Ord for Fraction {
    fn cmp(&self, other: &Self) -> Ordering {
        let left = self.num as i128 * other.den as i128;
        let right = other.num as i128 * self.den as i128;
        left.cmp(&right)
    }
}

impl PartialOrd for Fraction {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Add for Fraction {
    type Output = Fraction;

    fn add(self, rhs: Fraction) -> Fraction {
        Fraction::reduce(
            self.num as i128 * rhs.den as i128 + rhs.num as i128 * self.den as i128,
            self.den as i128 * rhs.den as i128,
        )
    }
}

impl Sub for Fraction {
    type Output = Fraction;

    fn sub(self, rhs: Fraction) -> Fraction {
        self + (-rhs)
    }
}

impl Mul for Fraction {
    type Output = Fraction;

    fn mul(self, rhs: Fraction) -> Fraction {
        Fraction::reduce(
            self.num as i128 * rhs.num as i128,
            self.den as i128 * rhs.den as i128,
        )
    }
}

impl Div for Fraction {
    type Output = Fraction;

    /// Division by zero yields zero.
    fn div(self, rhs: Fraction) -> Fraction {
        Fraction::reduce(
            self.num as i128 * rhs.den as i128,
            self.den as i128 * rhs.num as i128,
        )
    }
}

impl Neg for Fraction {
    type Output = Fraction;

    fn neg(self) -> Fraction {
        Fraction {
            num: -self.num,
            den: self.den,
        }
    }
}

impl std::iter::Sum for Fraction {
    fn sum<I: Iterator<Item = Fraction>>(iter: I) -> Self {
        iter.fold(Fraction::ZERO, |total, value| total + value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reduce() {
        let f = Fraction::new(10, 4);
        assert_eq!(f.numerator(), 5);
        assert_eq!(f.denominator(), 2);
        assert_eq!(Fraction::new(3, -6), Fraction::new(-1, 2));
        assert_eq!(Fraction::new(1, 0), Fraction::ZERO);
    }

    #[test]
    fn test_out_of_range_stays_close() {
        let tiny = Fraction::new(1, i64::MAX - 1) * Fraction::new(1, i64::MAX - 2);
        assert!(tiny.denominator() > 0);
        assert!(tiny >= Fraction::ZERO && tiny < Fraction::new(1, 1_000_000));

        let fine = Fraction::new(3, i64::MAX - 1) * Fraction::new(i64::MAX - 2, 7);
        assert!(fine.denominator() > 0);
        assert_eq!(fine.floor(), 0);
        assert!(fine > Fraction::new(42, 100) && fine < Fraction::new(43, 100));

        let huge = Fraction::from_int(i64::MAX) * Fraction::from_int(4);
        assert_eq!(huge, Fraction::from_int(i64::MAX));
    }

    #[test]
    fn test_arithmetic() {
        let third = Fraction::new(1, 3);
        assert_eq!(third + third + third, Fraction::ONE);
        assert_eq!(Fraction::ONE - third, Fraction::new(2, 3));
        assert_eq!(third * Fraction::from_int(6), Fraction::from_int(2));
        assert_eq!(Fraction::from_int(20) / Fraction::from_int(3), Fraction::new(20, 3));
        assert_eq!(Fraction::ONE / Fraction::ZERO, Fraction::ZERO);
    }

    #[test]
    fn test_floor() {
        assert_eq!(Fraction::new(20, 3).floor(), 6);
        assert_eq!(Fraction::new(-1, 2).floor(), -1);
        assert_eq!(Fraction::from_int(7).to_cells(), 7);
    }

    #[test]
    fn test_from_f32() {
        assert_eq!(Fraction::from_f32(1.5), Fraction::new(3, 2));
        assert_eq!(Fraction::from_f32(2.0), Fraction::from_int(2));
        assert_eq!(Fraction::from_f32(f32::NAN), Fraction::ZERO);
    }

    #[test]
    fn test_ordering() {
        assert!(Fraction::new(1, 3) < Fraction::new(1, 2));
        assert_eq!(Fraction::new(1, 3).max(Fraction::new(1, 2)), Fraction::new(1, 2));
        assert_eq!(Fraction::new(1, 3).min(Fraction::new(1, 2)), Fraction::new(1, 3));
    }
}
