//! Exact nanosecond values on the epoch timeline.
//!
//! `DayTimeNano` is the two-limb exact integer used for every value that may
//! not fit in a double: epoch positions and spans of time. `EpochNanoseconds`
//! is a `DayTimeNano` that has been validated to lie within the representable
//! instant range of ±10^8 days from the Unix epoch.

use core::num::NonZeroU128;
use core::ops::{Add, Div, Mul, Neg, Sub};

use crate::{
    error::ErrorMessage,
    options::{ResolvedRoundingOptions, RoundingOptions},
    rounding::IncrementRounder,
    Sign, TemporalError, TemporalResult, NS_PER_DAY,
};

const NS_PER_DAY_I64: i64 = NS_PER_DAY as i64;
const NS_PER_DAY_I128: i128 = NS_PER_DAY as i128;

/// The maximum number of whole days an instant may be from the epoch.
pub(crate) const MAX_EPOCH_DAYS: i64 = 100_000_000;

/// An exact integer count of nanoseconds split into whole days and a
/// sub-day remainder.
///
/// Every constructor and operation balances the value so that
/// `|time_nanos| < NS_PER_DAY` and `days` and `time_nanos` never disagree in
/// sign. Under that invariant the derived lexicographic ordering is the
/// numeric ordering.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DayTimeNano {
    days: i64,
    time_nanos: i64,
}

impl DayTimeNano {
    /// The zero value.
    pub const ZERO: Self = Self {
        days: 0,
        time_nanos: 0,
    };

    /// Creates a balanced value from a day count and a nanosecond count of
    /// any magnitude.
    #[must_use]
    pub fn new(days: i64, nanoseconds: i64) -> Self {
        let days = days.saturating_add(nanoseconds / NS_PER_DAY_I64);
        let time_nanos = nanoseconds % NS_PER_DAY_I64;
        Self::balance(days, time_nanos)
    }

    /// Creates a value representing a whole number of days.
    #[inline]
    #[must_use]
    pub const fn from_days(days: i64) -> Self {
        Self {
            days,
            time_nanos: 0,
        }
    }

    /// Creates a value from a total nanosecond count.
    ///
    /// Counts whose day component exceeds `i64` saturate.
    #[must_use]
    pub fn from_nanoseconds(nanoseconds: i128) -> Self {
        let days = nanoseconds / NS_PER_DAY_I128;
        let days = i64::try_from(days).unwrap_or(if days < 0 { i64::MIN } else { i64::MAX });
        Self {
            days,
            time_nanos: (nanoseconds % NS_PER_DAY_I128) as i64,
        }
    }

    // Restores the sign coherence of the limbs, assuming `|time_nanos| < NS_PER_DAY`.
    fn balance(days: i64, time_nanos: i64) -> Self {
        let (days, time_nanos) = if days > 0 && time_nanos < 0 {
            (days - 1, time_nanos + NS_PER_DAY_I64)
        } else if days < 0 && time_nanos > 0 {
            (days + 1, time_nanos - NS_PER_DAY_I64)
        } else {
            (days, time_nanos)
        };
        Self { days, time_nanos }
    }

    /// Returns the whole days of this value, truncated toward zero.
    #[inline]
    #[must_use]
    pub const fn days(&self) -> i64 {
        self.days
    }

    /// Returns the sub-day nanoseconds of this value. Carries the sign of the
    /// value.
    #[inline]
    #[must_use]
    pub const fn time_nanos(&self) -> i64 {
        self.time_nanos
    }

    /// Returns the whole days of this value, floored, together with the
    /// non-negative nanoseconds into that day.
    #[must_use]
    pub const fn floor_days(&self) -> (i64, i64) {
        if self.time_nanos < 0 {
            (self.days - 1, self.time_nanos + NS_PER_DAY_I64)
        } else {
            (self.days, self.time_nanos)
        }
    }

    /// Returns the total nanosecond count.
    #[inline]
    #[must_use]
    pub fn as_nanoseconds(&self) -> i128 {
        i128::from(self.days) * NS_PER_DAY_I128 + i128::from(self.time_nanos)
    }

    #[inline]
    #[must_use]
    pub fn sign(&self) -> Sign {
        if self.days != 0 {
            Sign::from(self.days.signum() as i8)
        } else {
            Sign::from(self.time_nanos.signum() as i8)
        }
    }

    #[inline]
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.days == 0 && self.time_nanos == 0
    }

    #[inline]
    #[must_use]
    pub fn abs(&self) -> Self {
        Self {
            days: self.days.saturating_abs(),
            time_nanos: self.time_nanos.abs(),
        }
    }

    /// Divides by `divisor`, truncating toward zero, and returns the quotient
    /// together with the remainder, which keeps the sign of `self`.
    ///
    /// # Panics
    ///
    /// Panics if `divisor` is zero.
    #[must_use]
    pub fn div_rem(&self, divisor: u64) -> (i128, i128) {
        let value = self.as_nanoseconds();
        let divisor = i128::from(divisor);
        (value / divisor, value % divisor)
    }

    /// Returns this value as a fractional count of `divisor` nanoseconds.
    ///
    /// The quotient and remainder are converted separately so that the
    /// fraction keeps full precision for large values.
    #[must_use]
    pub fn divide(&self, divisor: u64) -> f64 {
        let (quotient, remainder) = self.div_rem(divisor);
        quotient as f64 + remainder as f64 / divisor as f64
    }

    /// Rounds this value to a multiple of `increment` nanoseconds.
    pub(crate) fn round(
        &self,
        increment: NonZeroU128,
        mode: crate::options::RoundingMode,
    ) -> TemporalResult<Self> {
        let rounded = IncrementRounder::<i128>::from_signed_num(self.as_nanoseconds(), increment)?
            .round(mode);
        Ok(Self::from_nanoseconds(rounded))
    }
}

impl Add for DayTimeNano {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(
            self.days.saturating_add(rhs.days),
            self.time_nanos + rhs.time_nanos,
        )
    }
}

impl Sub for DayTimeNano {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        self + (-rhs)
    }
}

impl Neg for DayTimeNano {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self {
            days: self.days.saturating_neg(),
            time_nanos: -self.time_nanos,
        }
    }
}

impl Mul<i64> for DayTimeNano {
    type Output = Self;

    fn mul(self, rhs: i64) -> Self::Output {
        let nanos = i128::from(self.time_nanos) * i128::from(rhs);
        let carry = (nanos / NS_PER_DAY_I128) as i64;
        let time_nanos = (nanos % NS_PER_DAY_I128) as i64;
        Self::balance(
            self.days.saturating_mul(rhs).saturating_add(carry),
            time_nanos,
        )
    }
}

impl Div<i64> for DayTimeNano {
    type Output = Self;

    /// Divides by `rhs`, truncating toward zero.
    fn div(self, rhs: i64) -> Self::Output {
        Self::from_nanoseconds(self.as_nanoseconds() / i128::from(rhs))
    }
}

impl From<i64> for DayTimeNano {
    fn from(value: i64) -> Self {
        Self::new(0, value)
    }
}

// ==== EpochNanoseconds ====

/// A `DayTimeNano` that lies within ±10^8 days of the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct EpochNanoseconds(pub(crate) DayTimeNano);

impl TryFrom<DayTimeNano> for EpochNanoseconds {
    type Error = TemporalError;

    fn try_from(value: DayTimeNano) -> Result<Self, Self::Error> {
        let result = Self(value);
        result.check_validity()?;
        Ok(result)
    }
}

impl TryFrom<i128> for EpochNanoseconds {
    type Error = TemporalError;

    fn try_from(value: i128) -> Result<Self, Self::Error> {
        Self::try_from(DayTimeNano::from_nanoseconds(value))
    }
}

impl From<EpochNanoseconds> for DayTimeNano {
    fn from(value: EpochNanoseconds) -> Self {
        value.0
    }
}

impl EpochNanoseconds {
    /// The earliest representable instant, -271821-04-20T00:00Z.
    pub const MIN: Self = Self(DayTimeNano::from_days(-MAX_EPOCH_DAYS));
    /// The latest representable instant, +275760-09-13T00:00Z.
    pub const MAX: Self = Self(DayTimeNano::from_days(MAX_EPOCH_DAYS));

    #[inline]
    #[must_use]
    pub fn as_i128(&self) -> i128 {
        self.0.as_nanoseconds()
    }

    #[inline]
    #[must_use]
    pub const fn as_day_time_nano(&self) -> DayTimeNano {
        self.0
    }

    pub fn check_validity(&self) -> TemporalResult<()> {
        if !is_valid_epoch_nanos(&self.0) {
            return Err(TemporalError::range().with_enum(ErrorMessage::InstantOutOfRange));
        }
        Ok(())
    }

    /// Adds an exact span of time, failing if the result leaves the instant range.
    pub fn checked_add(&self, span: DayTimeNano) -> TemporalResult<Self> {
        Self::try_from(self.0 + span)
    }

    /// Returns the exact span `other - self`.
    #[inline]
    #[must_use]
    pub fn until(&self, other: &Self) -> DayTimeNano {
        other.0 - self.0
    }

    /// Rounds this instant to an increment of a time unit.
    ///
    /// The increment must evenly divide a day.
    pub fn round(&self, options: RoundingOptions) -> TemporalResult<Self> {
        let resolved = ResolvedRoundingOptions::from_instant_options(options)?;
        let increment = resolved.increment_nanoseconds()?;
        let rounded = self.0.round(increment, resolved.rounding_mode)?;
        Self::try_from(rounded)
    }
}

/// Utility for determining if the nanos are within a valid range.
#[inline]
#[must_use]
pub(crate) fn is_valid_epoch_nanos(nanos: &DayTimeNano) -> bool {
    (EpochNanoseconds::MIN.0..=EpochNanoseconds::MAX.0).contains(nanos)
}

#[cfg(test)]
mod tests {
    use super::{DayTimeNano, EpochNanoseconds, NS_PER_DAY_I128, NS_PER_DAY_I64};
    use crate::{
        options::{RoundingIncrement, RoundingMode, RoundingOptions, Unit},
        Sign,
    };

    #[test]
    fn balancing_keeps_coherent_sign() {
        let value = DayTimeNano::new(2, -1);
        assert_eq!(value.days(), 1);
        assert_eq!(value.time_nanos(), NS_PER_DAY_I64 - 1);

        let value = DayTimeNano::new(-2, 1);
        assert_eq!(value.days(), -1);
        assert_eq!(value.time_nanos(), 1 - NS_PER_DAY_I64);

        let value = DayTimeNano::new(0, 3 * NS_PER_DAY_I64 + 5);
        assert_eq!((value.days(), value.time_nanos()), (3, 5));

        let value = DayTimeNano::from_nanoseconds(-NS_PER_DAY_I128 - 7);
        assert_eq!((value.days(), value.time_nanos()), (-1, -7));
        assert_eq!(value.floor_days(), (-2, NS_PER_DAY_I64 - 7));
    }

    #[test]
    fn arithmetic() {
        let a = DayTimeNano::new(1, 500);
        let b = DayTimeNano::new(0, -1000);
        assert_eq!((a + b).as_nanoseconds(), NS_PER_DAY_I128 - 500);
        assert_eq!((b - a).as_nanoseconds(), -NS_PER_DAY_I128 - 1500);
        assert_eq!((-a).as_nanoseconds(), -NS_PER_DAY_I128 - 500);

        let half_day = DayTimeNano::new(0, NS_PER_DAY_I64 / 2);
        assert_eq!(half_day * 3, DayTimeNano::new(1, NS_PER_DAY_I64 / 2));
        assert_eq!(half_day * -4, DayTimeNano::from_days(-2));

        // Division truncates toward zero.
        assert_eq!(DayTimeNano::from(-7) / 2, DayTimeNano::from(-3));
        assert_eq!(DayTimeNano::from_days(1) / 3, DayTimeNano::from(28_800_000_000_000));
        assert_eq!(DayTimeNano::from(-7).div_rem(2), (-3, -1));
    }

    #[test]
    fn comparison_and_sign() {
        let values = [
            DayTimeNano::new(-1, -5),
            DayTimeNano::from_days(-1),
            DayTimeNano::from(-5),
            DayTimeNano::ZERO,
            DayTimeNano::from(5),
            DayTimeNano::from_days(1),
        ];
        for window in values.windows(2) {
            assert!(window[0] < window[1]);
            assert!(window[0].as_nanoseconds() < window[1].as_nanoseconds());
        }
        assert_eq!(values[0].sign(), Sign::Negative);
        assert_eq!(values[3].sign(), Sign::Zero);
        assert_eq!(values[4].sign(), Sign::Positive);
        assert_eq!(values[0].abs(), DayTimeNano::new(1, 5));
    }

    #[test]
    fn beyond_double_precision() {
        // 2^53 + 1 nanoseconds is exact.
        let value = DayTimeNano::from_nanoseconds(9_007_199_254_740_993);
        assert_eq!(value.as_nanoseconds(), 9_007_199_254_740_993);
        let doubled = value * 2;
        assert_eq!(doubled.as_nanoseconds(), 18_014_398_509_481_986);
        assert_eq!(DayTimeNano::from_days(3).divide(NS_PER_DAY_I128 as u64 * 2), 1.5);
    }

    #[test]
    fn epoch_bounds() {
        let max = EpochNanoseconds::MAX.as_i128();
        assert_eq!(max, 8_640_000_000_000_000_000_000);
        assert!(EpochNanoseconds::try_from(max).is_ok());
        assert!(EpochNanoseconds::try_from(max + 1).is_err());
        assert!(EpochNanoseconds::try_from(-max).is_ok());
        assert!(EpochNanoseconds::try_from(-max - 1).is_err());
        assert!(EpochNanoseconds::MAX
            .checked_add(DayTimeNano::from(1))
            .is_err());
    }

    #[test]
    fn instant_rounding() {
        let instant = EpochNanoseconds::try_from(1_725_000_000_123_456_789i128).unwrap();
        let options = RoundingOptions {
            smallest_unit: Some(Unit::Millisecond),
            ..Default::default()
        };
        assert_eq!(
            instant.round(options).unwrap().as_i128(),
            1_725_000_000_123_000_000
        );

        let options = RoundingOptions {
            smallest_unit: Some(Unit::Hour),
            rounding_mode: Some(RoundingMode::Ceil),
            increment: Some(RoundingIncrement::try_new(6).unwrap()),
            ..Default::default()
        };
        // 2024-08-30T06:40:00.123456789Z rounds up to 12:00.
        assert_eq!(
            instant.round(options).unwrap().as_i128(),
            1_724_997_600_000_000_000 + 6 * 3_600_000_000_000
        );

        // Increments must divide a day.
        let options = RoundingOptions {
            smallest_unit: Some(Unit::Hour),
            increment: Some(RoundingIncrement::try_new(5).unwrap()),
            ..Default::default()
        };
        assert!(instant.round(options).is_err());
    }
}
