//! This module implements the normalized `Duration` records and the
//! rounding of durations relative to an anchor.

use core::num::NonZeroU128;

use crate::{
    builtins::core::{calendar::CalendarMethods, timezone::TimeZoneMethods},
    epoch_nanoseconds::DayTimeNano,
    error::ErrorMessage,
    iso::IsoDateTime,
    options::{
        ArithmeticOverflow, Disambiguation, ResolvedRoundingOptions, RoundingIncrement,
        RoundingMode, Unit,
    },
    rounding::IncrementRounder,
    temporal_assert, Sign, TemporalError, TemporalResult, TemporalUnwrap,
};

use super::{DateDuration, TimeDuration};

/// The largest time span a duration may hold: 2^53 seconds, less one
/// nanosecond.
const MAX_TIME_DURATION: i128 = 9_007_199_254_740_991_999_999_999;

// ==== NormalizedTimeDuration ====
//
// A time duration represented in pure nanoseconds.
//
// Invariants:
//
// nanoseconds.abs() <= MAX_TIME_DURATION

/// A `TimeDuration` collapsed into an exact count of nanoseconds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub(crate) struct NormalizedTimeDuration(pub(crate) DayTimeNano);

impl NormalizedTimeDuration {
    pub(crate) const ZERO: Self = Self(DayTimeNano::ZERO);

    /// Equivalent to `TimeDurationFromComponents`.
    pub(crate) fn from_time_duration(time: &TimeDuration) -> Self {
        let nanoseconds = i128::from(time.hours)
            .saturating_mul(3_600_000_000_000)
            .saturating_add(i128::from(time.minutes).saturating_mul(60_000_000_000))
            .saturating_add(i128::from(time.seconds).saturating_mul(1_000_000_000))
            .saturating_add(i128::from(time.milliseconds).saturating_mul(1_000_000))
            .saturating_add(time.microseconds.saturating_mul(1_000))
            .saturating_add(time.nanoseconds);
        Self(DayTimeNano::from_nanoseconds(nanoseconds))
    }

    /// Creates a validated time duration from an exact span.
    pub(crate) fn new(nanos: DayTimeNano) -> TemporalResult<Self> {
        if nanos.as_nanoseconds().abs() > MAX_TIME_DURATION {
            return Err(TemporalError::range().with_enum(ErrorMessage::TimeDurationOutOfRange));
        }
        Ok(Self(nanos))
    }

    /// Returns the span from `one` to `two`.
    ///
    /// Equivalent to `TimeDurationFromEpochNanosecondsDifference(two, one)`.
    pub(crate) fn from_epoch_difference(one: DayTimeNano, two: DayTimeNano) -> TemporalResult<Self> {
        Self::new(two - one)
    }

    /// Equivalent to `AddTimeDuration`.
    pub(crate) fn checked_add(&self, other: &Self) -> TemporalResult<Self> {
        Self::new(self.0 + other.0)
    }

    pub(crate) fn checked_sub(&self, other: &Self) -> TemporalResult<Self> {
        Self::new(self.0 - other.0)
    }

    /// Equivalent to `Add24HourDaysToTimeDuration`.
    pub(crate) fn add_days(&self, days: i64) -> TemporalResult<Self> {
        Self::new(self.0 + DayTimeNano::from_days(days))
    }

    #[inline]
    pub(crate) fn sign(&self) -> Sign {
        self.0.sign()
    }

    /// Returns this span as a fractional count of a day-time unit.
    ///
    /// Equivalent to `TotalTimeDuration`.
    pub(crate) fn total(&self, unit: Unit) -> TemporalResult<f64> {
        let unit_nanoseconds = unit
            .as_nanoseconds()
            .ok_or(TemporalError::range().with_enum(ErrorMessage::SmallestUnitNotTimeUnit))?;
        Ok(self.0.divide(unit_nanoseconds))
    }

    /// Equivalent to `RoundTimeDurationToIncrement`.
    pub(crate) fn round_to_increment(
        &self,
        increment: NonZeroU128,
        mode: RoundingMode,
    ) -> TemporalResult<Self> {
        Self::new(self.0.round(increment, mode)?)
    }

    /// Rounds to the resolved increment of the smallest unit.
    ///
    /// Equivalent to `RoundTimeDuration`.
    pub(crate) fn round(&self, options: ResolvedRoundingOptions) -> TemporalResult<Self> {
        self.round_to_increment(options.increment_nanoseconds()?, options.rounding_mode)
    }
}

// ==== NormalizedDurationRecord ====
//
// A record consisting of a DateDuration and NormalizedTimeDuration
//

/// The internal form of a duration: a `DateDuration` and a
/// `NormalizedTimeDuration` that agree in sign.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub(crate) struct NormalizedDurationRecord {
    date: DateDuration,
    norm: NormalizedTimeDuration,
}

impl NormalizedDurationRecord {
    /// Equivalent to `CombineDateAndTimeDuration`.
    pub(crate) fn new(date: DateDuration, norm: NormalizedTimeDuration) -> TemporalResult<Self> {
        if date.sign() != Sign::Zero && norm.sign() != Sign::Zero && date.sign() != norm.sign() {
            return Err(TemporalError::range().with_enum(ErrorMessage::DurationMixedSign));
        }
        Ok(Self { date, norm })
    }

    pub(crate) fn from_date_duration(date: DateDuration) -> TemporalResult<Self> {
        Self::new(date, NormalizedTimeDuration::ZERO)
    }

    #[inline]
    pub(crate) fn date(&self) -> DateDuration {
        self.date
    }

    #[inline]
    pub(crate) fn normalized_time_duration(&self) -> NormalizedTimeDuration {
        self.norm
    }

    /// Equivalent to `InternalDurationSign`.
    pub(crate) fn sign(&self) -> Sign {
        match self.date.sign() {
            Sign::Zero => self.norm.sign(),
            sign => sign,
        }
    }
}

// ==== RelativeAnchor ====

/// The starting point of a relative rounding: a date-time in a calendar,
/// and optionally the time zone that turns it into an exact time.
#[derive(Clone, Copy)]
pub(crate) struct RelativeAnchor<'a> {
    pub(crate) date_time: IsoDateTime,
    pub(crate) calendar: &'a dyn CalendarMethods,
    pub(crate) time_zone: Option<&'a dyn TimeZoneMethods>,
}

impl RelativeAnchor<'_> {
    /// Returns the exact time of the anchor advanced by a date duration.
    /// Without a time zone, the result is the UTC reading of the local
    /// date-time.
    fn epoch_nanoseconds_after(&self, duration: &DateDuration) -> TemporalResult<DayTimeNano> {
        let end = self.date_time.add_date_duration(
            self.calendar,
            duration,
            NormalizedTimeDuration::ZERO,
            ArithmeticOverflow::Constrain,
        )?;
        match self.time_zone {
            Some(time_zone) => Ok(time_zone
                .get_epoch_nanoseconds_for(end, Disambiguation::Compatible)?
                .0),
            None => Ok(end.utc_epoch_nanos()),
        }
    }
}

// ==== Nudge Duration Rounding Functions ====

// Below implements the nudge rounding functionality for Duration.
//
// A nudge rounds the smallest unit of a duration, and reports the exact
// time the rounded duration ends at. When the rounding crosses into the
// next larger unit, the result is bubbled up through the larger units.

#[derive(Debug)]
struct NudgeRecord {
    normalized: NormalizedDurationRecord,
    total: Option<f64>,
    nudge_epoch_ns: DayTimeNano,
    expanded: bool,
}

#[inline]
fn truncate_to_increment(value: i64, increment: i64) -> i64 {
    value / increment * increment
}

impl NormalizedDurationRecord {
    /// Equivalent to `NudgeToCalendarUnit`.
    fn nudge_calendar_unit(
        &self,
        sign: Sign,
        dest_epoch_ns: DayTimeNano,
        anchor: &RelativeAnchor<'_>,
        options: ResolvedRoundingOptions,
    ) -> TemporalResult<NudgeRecord> {
        let increment = i64::from(options.increment.get());
        let sign_multiplier = i64::from(sign.as_sign_multiplier());
        let date = self.date;

        let (r1, start_duration, end_duration) = match options.smallest_unit {
            Unit::Year => {
                let r1 = truncate_to_increment(date.years, increment);
                let r2 = r1 + increment * sign_multiplier;
                (
                    r1,
                    DateDuration::new(r1, 0, 0, 0)?,
                    DateDuration::new(r2, 0, 0, 0)?,
                )
            }
            Unit::Month => {
                let r1 = truncate_to_increment(date.months, increment);
                let r2 = r1 + increment * sign_multiplier;
                (
                    r1,
                    date.adjust(0, Some(0), Some(r1))?,
                    date.adjust(0, Some(0), Some(r2))?,
                )
            }
            Unit::Week => {
                // Fold the days into weeks counted from the end of the
                // years and months.
                let years_months = date.adjust(0, Some(0), None)?;
                let weeks_start = anchor.calendar.date_add(
                    &anchor.date_time.date,
                    &years_months,
                    ArithmeticOverflow::Constrain,
                )?;
                let weeks_end = weeks_start.add_days(date.days);
                let until = anchor
                    .calendar
                    .date_until(&weeks_start, &weeks_end, Unit::Week)?;
                let r1 = truncate_to_increment(date.weeks + until.weeks, increment);
                let r2 = r1 + increment * sign_multiplier;
                (
                    r1,
                    date.adjust(0, Some(r1), None)?,
                    date.adjust(0, Some(r2), None)?,
                )
            }
            Unit::Day => {
                let r1 = truncate_to_increment(date.days, increment);
                let r2 = r1 + increment * sign_multiplier;
                (
                    r1,
                    date.adjust(r1, None, None)?,
                    date.adjust(r2, None, None)?,
                )
            }
            _ => return Err(TemporalError::assert()),
        };

        let start_epoch_ns = anchor.epoch_nanoseconds_after(&start_duration)?;
        let end_epoch_ns = anchor.epoch_nanoseconds_after(&end_duration)?;

        let within = if sign == Sign::Negative {
            end_epoch_ns <= dest_epoch_ns && dest_epoch_ns <= start_epoch_ns
        } else {
            start_epoch_ns <= dest_epoch_ns && dest_epoch_ns <= end_epoch_ns
        };
        if !within || start_epoch_ns == end_epoch_ns {
            return Err(TemporalError::range()
                .with_message("Rounding destination lies outside the rounded unit."));
        }

        // The position of the destination is r1 + progress * increment * sign,
        // with progress = numerator / denominator. It is kept as an exact
        // fraction over the denominator until it has been rounded.
        let numerator = (dest_epoch_ns - start_epoch_ns).as_nanoseconds().abs();
        let denominator = (end_epoch_ns - start_epoch_ns).as_nanoseconds().abs();
        let scaled = i128::from(r1) * denominator
            + i128::from(sign_multiplier) * i128::from(increment) * numerator;
        let total = scaled as f64 / denominator as f64;

        let divisor = NonZeroU128::new(i128::from(increment).unsigned_abs() * denominator.unsigned_abs())
            .temporal_unwrap()?;
        let rounded_unit = IncrementRounder::<i128>::from_signed_num(scaled, divisor)?
            .round(options.rounding_mode)
            / denominator;

        // Rounding to a multiple of the increment lands on r1 or r2.
        let expanded = rounded_unit != i128::from(r1);
        let (duration, nudge_epoch_ns) = if expanded {
            (end_duration, end_epoch_ns)
        } else {
            (start_duration, start_epoch_ns)
        };

        Ok(NudgeRecord {
            normalized: NormalizedDurationRecord::from_date_duration(duration)?,
            total: Some(total),
            nudge_epoch_ns,
            expanded,
        })
    }

    /// Rounds the time of a zoned duration within the day it ends in, whose
    /// length is set by the time zone.
    ///
    /// Equivalent to `NudgeToZonedTime`.
    fn nudge_to_zoned_time(
        &self,
        sign: Sign,
        anchor: &RelativeAnchor<'_>,
        options: ResolvedRoundingOptions,
    ) -> TemporalResult<NudgeRecord> {
        let time_zone = anchor.time_zone.temporal_unwrap()?;
        let start = anchor.calendar.date_add(
            &anchor.date_time.date,
            &self.date,
            ArithmeticOverflow::Constrain,
        )?;
        let sign_multiplier = i64::from(sign.as_sign_multiplier());
        let start_date_time = IsoDateTime::new_unchecked(start, anchor.date_time.time);
        let end_date_time =
            IsoDateTime::new_unchecked(start.add_days(sign_multiplier), anchor.date_time.time);

        let start_epoch_ns = time_zone
            .get_epoch_nanoseconds_for(start_date_time, Disambiguation::Compatible)?
            .0;
        let end_epoch_ns = time_zone
            .get_epoch_nanoseconds_for(end_date_time, Disambiguation::Compatible)?
            .0;

        let day_span = NormalizedTimeDuration::from_epoch_difference(start_epoch_ns, end_epoch_ns)?;
        temporal_assert!(
            day_span.sign() == sign,
            "day span {day_span:?} does not agree with {sign:?}"
        );

        let increment = options.increment_nanoseconds()?;
        let rounded_time = self.norm.round_to_increment(increment, options.rounding_mode)?;
        let beyond_day_span = rounded_time.checked_sub(&day_span)?;

        let (expanded, day_delta, rounded_time, nudge_epoch_ns) =
            if beyond_day_span.sign() != sign.negate() {
                let rounded = beyond_day_span.round_to_increment(increment, options.rounding_mode)?;
                (true, sign_multiplier, rounded, end_epoch_ns + rounded.0)
            } else {
                (false, 0, rounded_time, start_epoch_ns + rounded_time.0)
            };

        let days = self
            .date
            .days
            .checked_add(day_delta)
            .ok_or(TemporalError::range().with_enum(ErrorMessage::DurationOutOfRange))?;
        let normalized = NormalizedDurationRecord::new(self.date.adjust(days, None, None)?, rounded_time)?;

        Ok(NudgeRecord {
            normalized,
            total: None,
            nudge_epoch_ns,
            expanded,
        })
    }

    /// Rounds the days and time of a duration as exact 24-hour days.
    ///
    /// Equivalent to `NudgeToDayOrTime`.
    fn nudge_to_day_or_time(
        &self,
        dest_epoch_ns: DayTimeNano,
        options: ResolvedRoundingOptions,
    ) -> TemporalResult<NudgeRecord> {
        let norm = self.norm.add_days(self.date.days)?;
        let total = norm.total(options.smallest_unit)?;

        let rounded_norm = norm.round(options)?;
        let diff_norm = rounded_norm.checked_sub(&norm)?;

        let whole_days = norm.0.days();
        let rounded_whole_days = rounded_norm.0.days();
        let day_delta = rounded_whole_days - whole_days;
        let expanded = Sign::from(day_delta.signum() as i8) == norm.sign();

        let nudge_epoch_ns = dest_epoch_ns + diff_norm.0;

        let (days, remainder) = if options.largest_unit.is_date_unit() {
            (
                rounded_whole_days,
                NormalizedTimeDuration(DayTimeNano::from(rounded_norm.0.time_nanos())),
            )
        } else {
            (0, rounded_norm)
        };

        Ok(NudgeRecord {
            normalized: NormalizedDurationRecord::new(self.date.adjust(days, None, None)?, remainder)?,
            total: Some(total),
            nudge_epoch_ns,
            expanded,
        })
    }

    /// Carries a rounded duration into larger units, one unit at a time,
    /// while the nudged end reaches the end of the next larger unit.
    ///
    /// Equivalent to `BubbleRelativeDuration`.
    fn bubble_relative_duration(
        &self,
        sign: Sign,
        nudge_epoch_ns: DayTimeNano,
        anchor: &RelativeAnchor<'_>,
        largest_unit: Unit,
        smallest_unit: Unit,
    ) -> TemporalResult<NormalizedDurationRecord> {
        let mut duration = *self;
        if smallest_unit >= largest_unit {
            return Ok(duration);
        }
        let sign_multiplier = i64::from(sign.as_sign_multiplier());

        let mut unit = smallest_unit + 1;
        while unit != Unit::Auto && unit <= largest_unit {
            // Weeks only take a carry when they are the largest unit.
            if unit != Unit::Week || largest_unit == Unit::Week {
                let date = duration.date;
                let end_duration = match unit {
                    Unit::Year => DateDuration::new(date.years + sign_multiplier, 0, 0, 0)?,
                    Unit::Month => date.adjust(0, Some(0), Some(date.months + sign_multiplier))?,
                    Unit::Week => date.adjust(0, Some(date.weeks + sign_multiplier), None)?,
                    Unit::Day => date.adjust(date.days + sign_multiplier, None, None)?,
                    _ => return Err(TemporalError::assert()),
                };

                let end_epoch_ns = anchor.epoch_nanoseconds_after(&end_duration)?;
                let beyond_end = nudge_epoch_ns - end_epoch_ns;
                if beyond_end.sign() == sign.negate() {
                    break;
                }
                duration = NormalizedDurationRecord::from_date_duration(end_duration)?;
            }
            unit = unit + 1;
        }

        Ok(duration)
    }

    /// Rounds a duration that ends at `dest_epoch_ns` when added to the
    /// anchor.
    ///
    /// Equivalent to `RoundRelativeDuration`.
    pub(crate) fn round_relative_duration(
        &self,
        dest_epoch_ns: DayTimeNano,
        anchor: &RelativeAnchor<'_>,
        options: ResolvedRoundingOptions,
    ) -> TemporalResult<Self> {
        let irregular_unit = options.smallest_unit.is_calendar_unit()
            || (anchor.time_zone.is_some() && options.smallest_unit == Unit::Day);

        let sign = if self.sign() == Sign::Negative {
            Sign::Negative
        } else {
            Sign::Positive
        };

        let nudge_result = if irregular_unit {
            self.nudge_calendar_unit(sign, dest_epoch_ns, anchor, options)?
        } else if anchor.time_zone.is_some() {
            self.nudge_to_zoned_time(sign, anchor, options)?
        } else {
            self.nudge_to_day_or_time(dest_epoch_ns, options)?
        };

        let mut duration = nudge_result.normalized;
        if nudge_result.expanded && options.smallest_unit != Unit::Week {
            #[cfg(feature = "log")]
            log::trace!(
                "rounding to {} expanded into the next unit, bubbling up to {}",
                options.smallest_unit,
                options.largest_unit
            );
            let start_unit = options.smallest_unit.max(Unit::Day);
            duration = duration.bubble_relative_duration(
                sign,
                nudge_result.nudge_epoch_ns,
                anchor,
                options.largest_unit,
                start_unit,
            )?;
        }

        Ok(duration)
    }

    /// Returns the fractional count of `unit` in a duration that ends at
    /// `dest_epoch_ns` when added to the anchor.
    ///
    /// Equivalent to `TotalRelativeDuration`.
    pub(crate) fn total_relative_duration(
        &self,
        dest_epoch_ns: DayTimeNano,
        anchor: &RelativeAnchor<'_>,
        unit: Unit,
    ) -> TemporalResult<f64> {
        if unit.is_calendar_unit() || (anchor.time_zone.is_some() && unit == Unit::Day) {
            let sign = if self.sign() == Sign::Negative {
                Sign::Negative
            } else {
                Sign::Positive
            };
            let options = ResolvedRoundingOptions {
                largest_unit: unit,
                smallest_unit: unit,
                increment: RoundingIncrement::ONE,
                rounding_mode: RoundingMode::Trunc,
            };
            return self
                .nudge_calendar_unit(sign, dest_epoch_ns, anchor, options)?
                .total
                .temporal_unwrap();
        }

        self.norm.add_days(self.date.days)?.total(unit)
    }
}
