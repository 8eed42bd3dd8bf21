//! An implementation of `TimeDuration` and it's methods.

use crate::{error::ErrorMessage, options::Unit, Sign, TemporalError, TemporalResult};

use super::{duration_sign, is_valid_duration, normalized::NormalizedTimeDuration};

/// `TimeDuration` holds the clock part of a duration: hours down to
/// nanoseconds.
///
/// Microseconds and nanoseconds are wider than the other fields because a
/// duration balanced to those units may count more of them than an `i64`
/// holds.
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimeDuration {
    /// `TimeDuration`'s internal hour value.
    pub hours: i64,
    /// `TimeDuration`'s internal minute value.
    pub minutes: i64,
    /// `TimeDuration`'s internal second value.
    pub seconds: i64,
    /// `TimeDuration`'s internal millisecond value.
    pub milliseconds: i64,
    /// `TimeDuration`'s internal microsecond value.
    pub microseconds: i128,
    /// `TimeDuration`'s internal nanosecond value.
    pub nanoseconds: i128,
}

// ==== TimeDuration Private API ====

impl TimeDuration {
    /// Creates a new `TimeDuration` without validation.
    #[inline]
    #[must_use]
    pub(crate) const fn new_unchecked(
        hours: i64,
        minutes: i64,
        seconds: i64,
        milliseconds: i64,
        microseconds: i128,
        nanoseconds: i128,
    ) -> Self {
        Self {
            hours,
            minutes,
            seconds,
            milliseconds,
            microseconds,
            nanoseconds,
        }
    }

    /// Balances a time span into days and time fields no larger than
    /// `largest_unit`. Every field takes the sign of the span.
    ///
    /// Days are only split off when `largest_unit` is a date unit.
    ///
    /// Equivalent to `BalanceTimeDuration`.
    pub(crate) fn from_normalized(
        norm: NormalizedTimeDuration,
        largest_unit: Unit,
    ) -> TemporalResult<(i64, Self)> {
        let sign = norm.0.sign().as_sign_multiplier() as i128;
        let nanoseconds = norm.0.as_nanoseconds().abs();

        let (mut days, mut hours, mut minutes, mut seconds) = (0i128, 0i128, 0i128, 0i128);
        let (mut milliseconds, mut microseconds) = (0i128, 0i128);
        let mut rest = nanoseconds;

        // Split off each unit in turn, from the smallest up to `largest_unit`.
        if largest_unit > Unit::Nanosecond {
            microseconds = rest / 1_000;
            rest %= 1_000;
        }
        if largest_unit > Unit::Microsecond {
            milliseconds = microseconds / 1_000;
            microseconds %= 1_000;
        }
        if largest_unit > Unit::Millisecond {
            seconds = milliseconds / 1_000;
            milliseconds %= 1_000;
        }
        if largest_unit > Unit::Second {
            minutes = seconds / 60;
            seconds %= 60;
        }
        if largest_unit > Unit::Minute {
            hours = minutes / 60;
            minutes %= 60;
        }
        if largest_unit > Unit::Hour {
            days = hours / 24;
            hours %= 24;
        }

        let narrow = |value: i128| {
            i64::try_from(value * sign)
                .map_err(|_| TemporalError::range().with_enum(ErrorMessage::DurationOutOfRange))
        };

        let result = Self::new_unchecked(
            narrow(hours)?,
            narrow(minutes)?,
            narrow(seconds)?,
            narrow(milliseconds)?,
            microseconds * sign,
            rest * sign,
        );
        let days = narrow(days)?;

        if !is_valid_duration(
            0,
            0,
            0,
            days,
            result.hours,
            result.minutes,
            result.seconds,
            result.milliseconds,
            result.microseconds,
            result.nanoseconds,
        ) {
            return Err(TemporalError::range().with_enum(ErrorMessage::DurationOutOfRange));
        }

        Ok((days, result))
    }

    /// Returns this `TimeDuration` as a `NormalizedTimeDuration`.
    #[inline]
    pub(crate) fn to_normalized(self) -> NormalizedTimeDuration {
        NormalizedTimeDuration::from_time_duration(&self)
    }

    #[inline]
    pub(crate) fn fields(&self) -> [i128; 6] {
        [
            self.hours.into(),
            self.minutes.into(),
            self.seconds.into(),
            self.milliseconds.into(),
            self.microseconds,
            self.nanoseconds,
        ]
    }
}

// ==== TimeDuration's public API ====

impl TimeDuration {
    /// Creates a new validated `TimeDuration`.
    pub fn new(
        hours: i64,
        minutes: i64,
        seconds: i64,
        milliseconds: i64,
        microseconds: i128,
        nanoseconds: i128,
    ) -> TemporalResult<Self> {
        if !is_valid_duration(
            0,
            0,
            0,
            0,
            hours,
            minutes,
            seconds,
            milliseconds,
            microseconds,
            nanoseconds,
        ) {
            return Err(TemporalError::range().with_enum(ErrorMessage::TimeDurationOutOfRange));
        }
        Ok(Self::new_unchecked(
            hours,
            minutes,
            seconds,
            milliseconds,
            microseconds,
            nanoseconds,
        ))
    }

    /// Returns a new `TimeDuration` representing the absolute value of the current.
    #[inline]
    #[must_use]
    pub fn abs(&self) -> Self {
        Self::new_unchecked(
            self.hours.abs(),
            self.minutes.abs(),
            self.seconds.abs(),
            self.milliseconds.abs(),
            self.microseconds.abs(),
            self.nanoseconds.abs(),
        )
    }

    /// Returns a negated `TimeDuration`.
    #[inline]
    #[must_use]
    pub fn negated(&self) -> Self {
        Self::new_unchecked(
            -self.hours,
            -self.minutes,
            -self.seconds,
            -self.milliseconds,
            -self.microseconds,
            -self.nanoseconds,
        )
    }

    #[inline]
    #[must_use]
    pub fn sign(&self) -> Sign {
        duration_sign(&self.fields())
    }

    /// Returns whether the total of this time duration stays below 2^53
    /// seconds.
    #[inline]
    #[must_use]
    pub fn is_within_range(&self) -> bool {
        is_valid_duration(
            0,
            0,
            0,
            0,
            self.hours,
            self.minutes,
            self.seconds,
            self.milliseconds,
            self.microseconds,
            self.nanoseconds,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::TimeDuration;
    use crate::{
        builtins::core::duration::normalized::NormalizedTimeDuration, options::Unit,
        time::DayTimeNano, Sign,
    };

    fn norm(nanoseconds: i128) -> NormalizedTimeDuration {
        NormalizedTimeDuration(DayTimeNano::from_nanoseconds(nanoseconds))
    }

    #[test]
    fn balance_into_largest_unit() {
        // 1 day, 2 hours, 3 minutes, 4.005006007 seconds
        let total = 93_784_005_006_007i128;
        let (days, time) = TimeDuration::from_normalized(norm(total), Unit::Day).unwrap();
        assert_eq!(days, 1);
        assert_eq!(time, TimeDuration::new_unchecked(2, 3, 4, 5, 6, 7));

        let (days, time) = TimeDuration::from_normalized(norm(total), Unit::Hour).unwrap();
        assert_eq!(days, 0);
        assert_eq!(time, TimeDuration::new_unchecked(26, 3, 4, 5, 6, 7));

        let (_, time) = TimeDuration::from_normalized(norm(-total), Unit::Second).unwrap();
        assert_eq!(time, TimeDuration::new_unchecked(0, 0, -93_784, -5, -6, -7));

        let (_, time) = TimeDuration::from_normalized(norm(total), Unit::Nanosecond).unwrap();
        assert_eq!(time, TimeDuration::new_unchecked(0, 0, 0, 0, 0, total));
    }

    #[test]
    fn range_and_sign() {
        let max_seconds = (1i64 << 53) - 1;
        assert!(TimeDuration::new(0, 0, max_seconds, 999, 999, 999).is_ok());
        assert!(TimeDuration::new(0, 0, max_seconds, 1000, 0, 0).is_err());
        assert!(TimeDuration::new(1, -1, 0, 0, 0, 0).is_err());

        let time = TimeDuration::new(0, -5, 0, 0, 0, -1).unwrap();
        assert_eq!(time.sign(), Sign::Negative);
        assert_eq!(time.abs().sign(), Sign::Positive);
        assert_eq!(time.negated(), time.abs());
        assert_eq!(time.to_normalized().0.as_nanoseconds(), -300_000_000_001);
    }
}
