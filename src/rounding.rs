//! Implementation of increment rounding functionality

use crate::{
    options::{RoundingMode, UnsignedRoundingMode},
    TemporalError, TemporalResult,
};

use core::{cmp::Ordering, num::NonZeroU128};

use num_traits::{ConstZero, Euclid, FromPrimitive, NumCast, Signed, ToPrimitive};

/// An exact integer that can be rounded to an increment.
pub(crate) trait Roundable:
    Euclid + PartialOrd + Signed + FromPrimitive + ToPrimitive + NumCast + ConstZero + Copy
{
    fn is_exact(dividend: Self, divisor: Self) -> bool {
        dividend.rem_euclid(&divisor) == Self::ZERO
    }

    /// Compares the distance below the quotient's magnitude against the
    /// distance above it.
    fn compare_remainder(dividend: Self, divisor: Self) -> Ordering {
        let remainder = dividend.abs() % divisor;
        let above = divisor - remainder;
        remainder.partial_cmp(&above).unwrap_or(Ordering::Equal)
    }

    fn is_even_cardinal(dividend: Self, divisor: Self) -> bool {
        Self::result_floor(dividend, divisor) % 2 == 0
    }

    fn result_floor(dividend: Self, divisor: Self) -> u128 {
        (dividend / divisor).abs().to_u128().unwrap_or(u128::MAX)
    }

    fn result_ceil(dividend: Self, divisor: Self) -> u128 {
        Self::result_floor(dividend, divisor).saturating_add(1)
    }
}

impl Roundable for i128 {}

impl Roundable for i64 {}

/// Rounds a signed integer to a multiple of a positive increment.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub(crate) struct IncrementRounder<T: Roundable> {
    sign: bool,
    dividend: T,
    divisor: T,
    increment: i128,
}

impl<T: Roundable> IncrementRounder<T> {
    #[inline]
    pub(crate) fn from_signed_num(number: T, increment: NonZeroU128) -> TemporalResult<Self> {
        let divisor = <T as NumCast>::from(increment.get()).ok_or(
            TemporalError::range().with_message("rounding increment exceeds the numeric range."),
        )?;
        let increment = i128::try_from(increment.get()).map_err(|_| {
            TemporalError::range().with_message("rounding increment exceeds the numeric range.")
        })?;
        Ok(Self {
            sign: number >= T::ZERO,
            dividend: number,
            divisor,
            increment,
        })
    }

    /// Rounds with `mode` and returns the rounded value, a multiple of the increment.
    #[inline]
    pub(crate) fn round(&self, mode: RoundingMode) -> i128 {
        let unsigned_rounding_mode = mode.get_unsigned_round_mode(self.sign);
        let magnitude =
            apply_unsigned_rounding_mode(self.dividend, self.divisor, unsigned_rounding_mode)
                as i128;
        let rounded = if self.sign { magnitude } else { -magnitude };
        rounded.saturating_mul(self.increment)
    }
}

/// Applies the unsigned rounding mode to `|dividend / divisor|`, returning
/// the chosen bound `r1` or `r2 = r1 + 1`.
fn apply_unsigned_rounding_mode<T: Roundable>(
    dividend: T,
    divisor: T,
    unsigned_rounding_mode: UnsignedRoundingMode,
) -> u128 {
    // If x is equal to r1, return r1.
    if T::is_exact(dividend, divisor) {
        return T::result_floor(dividend, divisor);
    }

    match unsigned_rounding_mode {
        UnsignedRoundingMode::Zero => return T::result_floor(dividend, divisor),
        UnsignedRoundingMode::Infinity => return T::result_ceil(dividend, divisor),
        _ => {}
    }

    match T::compare_remainder(dividend, divisor) {
        Ordering::Less => T::result_floor(dividend, divisor),
        Ordering::Greater => T::result_ceil(dividend, divisor),
        Ordering::Equal => match unsigned_rounding_mode {
            UnsignedRoundingMode::HalfZero => T::result_floor(dividend, divisor),
            UnsignedRoundingMode::HalfInfinity => T::result_ceil(dividend, divisor),
            // Ties go to the even cardinal.
            _ if T::is_even_cardinal(dividend, divisor) => T::result_floor(dividend, divisor),
            _ => T::result_ceil(dividend, divisor),
        },
    }
}

#[cfg(test)]
mod tests {
    use core::num::NonZeroU128;

    use super::{IncrementRounder, Roundable, RoundingMode};
    use core::fmt::Debug;

    const MODES: [RoundingMode; 9] = [
        RoundingMode::Ceil,
        RoundingMode::Floor,
        RoundingMode::Expand,
        RoundingMode::Trunc,
        RoundingMode::HalfCeil,
        RoundingMode::HalfFloor,
        RoundingMode::HalfExpand,
        RoundingMode::HalfTrunc,
        RoundingMode::HalfEven,
    ];

    /// Expected results, in the order of `MODES`.
    #[derive(Debug)]
    struct TestCase<T> {
        x: T,
        increment: u128,
        expected: [i128; 9],
    }

    impl<T: Roundable + Debug> TestCase<T> {
        fn run(&self) {
            let rounder =
                IncrementRounder::from_signed_num(self.x, NonZeroU128::new(self.increment).unwrap())
                    .unwrap();
            for (mode, expected) in MODES.iter().zip(self.expected) {
                assert_eq!(
                    expected,
                    rounder.round(*mode),
                    "Testing {:?}/{:?} with mode {mode:?}",
                    self.x,
                    self.increment
                );
            }
        }
    }

    #[test]
    fn rounding_modes_on_i128() {
        const CASES: &[TestCase<i128>] = &[
            TestCase {
                x: 7,
                increment: 2,
                expected: [8, 6, 8, 6, 8, 6, 8, 6, 8],
            },
            TestCase {
                x: -7,
                increment: 2,
                expected: [-6, -8, -8, -6, -6, -8, -8, -6, -8],
            },
            TestCase {
                x: 25,
                increment: 10,
                expected: [30, 20, 30, 20, 30, 20, 30, 20, 20],
            },
            TestCase {
                x: 35,
                increment: 10,
                expected: [40, 30, 40, 30, 40, 30, 40, 30, 40],
            },
            TestCase {
                x: -35,
                increment: 10,
                expected: [-30, -40, -40, -30, -30, -40, -40, -30, -40],
            },
            TestCase {
                x: 0,
                increment: 5,
                expected: [0; 9],
            },
        ];

        for case in CASES {
            case.run();
        }
    }

    #[test]
    fn odd_increments_have_no_false_ties() {
        const CASES: &[TestCase<i64>] = &[
            TestCase {
                x: 1,
                increment: 3,
                expected: [3, 0, 3, 0, 0, 0, 0, 0, 0],
            },
            TestCase {
                x: -2,
                increment: 3,
                expected: [0, -3, -3, 0, -3, -3, -3, -3, -3],
            },
        ];

        for case in CASES {
            case.run();
        }
    }

    #[test]
    fn half_hour_rounding_of_large_span() {
        TestCase {
            x: -84_082_624_864_197_532i128,
            increment: 1_800_000_000_000,
            expected: [
                -84_081_600_000_000_000,
                -84_083_400_000_000_000,
                -84_083_400_000_000_000,
                -84_081_600_000_000_000,
                -84_083_400_000_000_000,
                -84_083_400_000_000_000,
                -84_083_400_000_000_000,
                -84_083_400_000_000_000,
                -84_083_400_000_000_000,
            ],
        }
        .run();
    }
}
