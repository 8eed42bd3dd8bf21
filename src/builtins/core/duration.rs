//! This module implements `Duration` along with it's methods and components.

use crate::{
    builtins::core::{calendar::CalendarMethods, diff, timezone::TimeZoneMethods},
    epoch_nanoseconds::EpochNanoseconds,
    error::ErrorMessage,
    iso::{IsoDate, IsoDateTime, IsoTime},
    options::{
        ArithmeticOverflow, Disambiguation, RelativeTo, ResolvedRoundingOptions, RoundingOptions,
        Unit,
    },
    temporal_assert, Sign, TemporalError, TemporalResult, NS_PER_DAY,
};
use core::cmp::Ordering;

use self::normalized::{NormalizedDurationRecord, NormalizedTimeDuration};

mod date;
pub(crate) mod normalized;
mod time;


#[doc(inline)]
pub use date::DateDuration;
#[doc(inline)]
pub use time::TimeDuration;

/// 2^53 seconds, expressed in nanoseconds.
const MAX_TOTAL_NANOSECONDS: i128 = 9_007_199_254_740_992_000_000_000;
/// 2^32, the exclusive bound of the calendar fields.
const MAX_CALENDAR_FIELD: u64 = 1 << 32;

/// A span of time made up of a `DateDuration` and a `TimeDuration`.
///
/// Every non-zero field of a `Duration` shares one sign, the calendar fields
/// are below 2^32 in magnitude, and the days and time together stay below
/// 2^53 seconds.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Duration {
    date: DateDuration,
    time: TimeDuration,
}

// ==== Private Duration methods ====

impl Duration {
    /// Creates a new `Duration` from a `DateDuration` and `TimeDuration`.
    #[inline]
    pub(crate) const fn new_unchecked(date: DateDuration, time: TimeDuration) -> Self {
        Self { date, time }
    }

    /// Balances an internal record into a `Duration` whose time fields are
    /// no larger than `largest_unit`.
    ///
    /// Equivalent to `TemporalDurationFromInternal`.
    pub(crate) fn from_internal(
        internal: NormalizedDurationRecord,
        largest_unit: Unit,
    ) -> TemporalResult<Self> {
        let (balanced_days, time) =
            TimeDuration::from_normalized(internal.normalized_time_duration(), largest_unit)?;
        let date = internal.date();
        let days = date
            .days
            .checked_add(balanced_days)
            .ok_or(TemporalError::range().with_enum(ErrorMessage::DurationOutOfRange))?;
        Self::new(
            date.years,
            date.months,
            date.weeks,
            days,
            time.hours,
            time.minutes,
            time.seconds,
            time.milliseconds,
            time.microseconds,
            time.nanoseconds,
        )
    }

    /// Equivalent to `ToInternalDurationRecord`.
    pub(crate) fn to_internal(self) -> TemporalResult<NormalizedDurationRecord> {
        NormalizedDurationRecord::new(self.date, self.time.to_normalized())
    }

    /// Returns the days and time of this duration as one span, counting
    /// every day as 24 hours.
    ///
    /// Equivalent to `ToInternalDurationRecordWith24HourDays`.
    pub(crate) fn to_normalized_with_days(self) -> TemporalResult<NormalizedTimeDuration> {
        self.time.to_normalized().add_days(self.date.days)
    }

    /// Returns the largest unit with a non-zero field, or nanoseconds for a
    /// zero duration.
    ///
    /// Equivalent to `DefaultTemporalLargestUnit`.
    pub(crate) fn default_largest_unit(&self) -> Unit {
        let fields = [
            (i128::from(self.date.years), Unit::Year),
            (i128::from(self.date.months), Unit::Month),
            (i128::from(self.date.weeks), Unit::Week),
            (i128::from(self.date.days), Unit::Day),
            (i128::from(self.time.hours), Unit::Hour),
            (i128::from(self.time.minutes), Unit::Minute),
            (i128::from(self.time.seconds), Unit::Second),
            (i128::from(self.time.milliseconds), Unit::Millisecond),
            (self.time.microseconds, Unit::Microsecond),
        ];
        fields
            .iter()
            .find(|(value, _)| *value != 0)
            .map_or(Unit::Nanosecond, |(_, unit)| *unit)
    }
}

// ==== Public Duration API ====

impl Duration {
    /// Creates a new validated `Duration`.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        years: i64,
        months: i64,
        weeks: i64,
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
        milliseconds: i64,
        microseconds: i128,
        nanoseconds: i128,
    ) -> TemporalResult<Self> {
        let set = [
            i128::from(years),
            i128::from(months),
            i128::from(weeks),
            i128::from(days),
            i128::from(hours),
            i128::from(minutes),
            i128::from(seconds),
            i128::from(milliseconds),
            microseconds,
            nanoseconds,
        ];
        if !fields_share_sign(&set) {
            return Err(TemporalError::range().with_enum(ErrorMessage::DurationMixedSign));
        }
        if !is_valid_duration(
            years,
            months,
            weeks,
            days,
            hours,
            minutes,
            seconds,
            milliseconds,
            microseconds,
            nanoseconds,
        ) {
            return Err(TemporalError::range().with_enum(ErrorMessage::DurationOutOfRange));
        }
        Ok(Self::new_unchecked(
            DateDuration::new_unchecked(years, months, weeks, days),
            TimeDuration::new_unchecked(
                hours,
                minutes,
                seconds,
                milliseconds,
                microseconds,
                nanoseconds,
            ),
        ))
    }

    /// Creates a `Duration` from its date and time parts, validating the
    /// combination.
    pub fn from_parts(date: DateDuration, time: TimeDuration) -> TemporalResult<Self> {
        Self::new(
            date.years,
            date.months,
            date.weeks,
            date.days,
            time.hours,
            time.minutes,
            time.seconds,
            time.milliseconds,
            time.microseconds,
            time.nanoseconds,
        )
    }

    /// Returns a reference to the inner `DateDuration`.
    #[inline]
    #[must_use]
    pub fn date(&self) -> &DateDuration {
        &self.date
    }

    /// Returns a reference to the inner `TimeDuration`.
    #[inline]
    #[must_use]
    pub fn time(&self) -> &TimeDuration {
        &self.time
    }

    #[inline]
    #[must_use]
    pub const fn years(&self) -> i64 {
        self.date.years
    }

    #[inline]
    #[must_use]
    pub const fn months(&self) -> i64 {
        self.date.months
    }

    #[inline]
    #[must_use]
    pub const fn weeks(&self) -> i64 {
        self.date.weeks
    }

    #[inline]
    #[must_use]
    pub const fn days(&self) -> i64 {
        self.date.days
    }

    #[inline]
    #[must_use]
    pub const fn hours(&self) -> i64 {
        self.time.hours
    }

    #[inline]
    #[must_use]
    pub const fn minutes(&self) -> i64 {
        self.time.minutes
    }

    #[inline]
    #[must_use]
    pub const fn seconds(&self) -> i64 {
        self.time.seconds
    }

    #[inline]
    #[must_use]
    pub const fn milliseconds(&self) -> i64 {
        self.time.milliseconds
    }

    #[inline]
    #[must_use]
    pub const fn microseconds(&self) -> i128 {
        self.time.microseconds
    }

    #[inline]
    #[must_use]
    pub const fn nanoseconds(&self) -> i128 {
        self.time.nanoseconds
    }

    /// Determines the sign for the current self.
    #[inline]
    #[must_use]
    pub fn sign(&self) -> Sign {
        match self.date.sign() {
            Sign::Zero => self.time.sign(),
            sign => sign,
        }
    }

    /// Returns whether every field of this `Duration` is zero.
    #[inline]
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.sign() == Sign::Zero
    }

    /// Returns a negated `Duration`
    #[inline]
    #[must_use]
    pub fn negated(&self) -> Self {
        Self::new_unchecked(self.date.negated(), self.time.negated())
    }

    /// Returns the absolute value of `Duration`.
    #[inline]
    #[must_use]
    pub fn abs(&self) -> Self {
        Self::new_unchecked(self.date.abs(), self.time.abs())
    }
}

// ==== Duration arithmetic ====

impl Duration {
    /// Adds two durations.
    ///
    /// Durations without years, months or weeks are summed exactly, with days
    /// counted as 24 hours. Otherwise both are added in turn to midnight of
    /// the anchor, date and time together, and the result is measured back
    /// from it.
    pub fn add(&self, other: &Self, relative_to: Option<RelativeTo<'_>>) -> TemporalResult<Self> {
        let largest_unit = self.default_largest_unit().max(other.default_largest_unit());

        match relative_to {
            Some(RelativeTo::ZonedDateTime(zoned)) => {
                let start = zoned.epoch_nanoseconds;
                let intermediate = add_zoned_date_time(
                    start,
                    zoned.time_zone,
                    zoned.calendar,
                    &self.to_internal()?,
                    ArithmeticOverflow::Constrain,
                )?;
                let end = add_zoned_date_time(
                    intermediate,
                    zoned.time_zone,
                    zoned.calendar,
                    &other.to_internal()?,
                    ArithmeticOverflow::Constrain,
                )?;
                if largest_unit.is_time_unit() {
                    let norm = NormalizedTimeDuration::from_epoch_difference(start.0, end.0)?;
                    return Self::from_internal(
                        NormalizedDurationRecord::new(DateDuration::default(), norm)?,
                        largest_unit,
                    );
                }
                let internal = diff::difference_zoned_date_time(
                    start,
                    end,
                    zoned.calendar,
                    zoned.time_zone,
                    largest_unit,
                )?;
                Self::from_internal(internal, Unit::Hour)
            }
            Some(RelativeTo::PlainDate(plain)) if largest_unit.is_calendar_unit() => {
                let start = IsoDateTime::new_unchecked(plain.date, IsoTime::default());
                let intermediate =
                    self.add_to_date_time(&start, plain.calendar, ArithmeticOverflow::Constrain)?;
                let end = other.add_to_date_time(
                    &intermediate,
                    plain.calendar,
                    ArithmeticOverflow::Constrain,
                )?;
                let internal =
                    diff::difference_iso_date_time(&start, &end, plain.calendar, largest_unit)?;
                Self::from_internal(internal, largest_unit)
            }
            None if largest_unit.is_calendar_unit() => {
                Err(TemporalError::usage().with_enum(ErrorMessage::RelativeToRequired))
            }
            _ => {
                let norm = self
                    .to_normalized_with_days()?
                    .checked_add(&other.to_normalized_with_days()?)?;
                Self::from_internal(
                    NormalizedDurationRecord::new(DateDuration::default(), norm)?,
                    largest_unit,
                )
            }
        }
    }

    /// Subtracts `other` from this duration.
    #[inline]
    pub fn subtract(&self, other: &Self, relative_to: Option<RelativeTo<'_>>) -> TemporalResult<Self> {
        self.add(&other.negated(), relative_to)
    }

    /// Compares two durations.
    ///
    /// Durations made of days and time compare exactly, with days counted
    /// as 24 hours. Calendar units are resolved against the anchor, and a
    /// zoned anchor resolves days as well.
    pub fn compare(&self, other: &Self, relative_to: Option<RelativeTo<'_>>) -> TemporalResult<Ordering> {
        if self == other {
            return Ok(Ordering::Equal);
        }

        let calendar_units = self.date.has_calendar_units() || other.date.has_calendar_units();

        if let Some(RelativeTo::ZonedDateTime(zoned)) = relative_to {
            if calendar_units || self.date.days != 0 || other.date.days != 0 {
                let after_one = add_zoned_date_time(
                    zoned.epoch_nanoseconds,
                    zoned.time_zone,
                    zoned.calendar,
                    &self.to_internal()?,
                    ArithmeticOverflow::Constrain,
                )?;
                let after_two = add_zoned_date_time(
                    zoned.epoch_nanoseconds,
                    zoned.time_zone,
                    zoned.calendar,
                    &other.to_internal()?,
                    ArithmeticOverflow::Constrain,
                )?;
                return Ok(after_one.cmp(&after_two));
            }
        }

        let (days_one, days_two) = if calendar_units {
            let Some(RelativeTo::PlainDate(plain)) = relative_to else {
                return Err(TemporalError::usage().with_enum(ErrorMessage::RelativeToRequired));
            };
            (
                self.date.days_from(&plain.date, plain.calendar)?,
                other.date.days_from(&plain.date, plain.calendar)?,
            )
        } else {
            (self.date.days, other.date.days)
        };

        let norm_one = self.time.to_normalized().add_days(days_one)?;
        let norm_two = other.time.to_normalized().add_days(days_two)?;
        Ok(norm_one.cmp(&norm_two))
    }
}

// ==== Duration rounding and totals ====

impl Duration {
    /// Rounds this duration to the smallest unit and increment of
    /// `options`, balancing it up to the largest unit.
    ///
    /// Calendar units require an anchor; a zoned anchor also makes days
    /// calendar-relative.
    pub fn round(&self, options: RoundingOptions, relative_to: Option<RelativeTo<'_>>) -> TemporalResult<Self> {
        let existing_largest_unit = self.default_largest_unit();
        let resolved = ResolvedRoundingOptions::from_duration_options(options, existing_largest_unit)?;

        match relative_to {
            Some(RelativeTo::ZonedDateTime(zoned)) => {
                let target = add_zoned_date_time(
                    zoned.epoch_nanoseconds,
                    zoned.time_zone,
                    zoned.calendar,
                    &self.to_internal()?,
                    ArithmeticOverflow::Constrain,
                )?;
                let internal = diff::difference_zoned_date_time_with_rounding(
                    zoned.epoch_nanoseconds,
                    target,
                    zoned.calendar,
                    zoned.time_zone,
                    resolved,
                )?;
                let largest_unit = if resolved.largest_unit.is_date_unit() {
                    Unit::Hour
                } else {
                    resolved.largest_unit
                };
                Self::from_internal(internal, largest_unit)
            }
            Some(RelativeTo::PlainDate(plain)) => {
                let (start, end) = self.plain_target(plain.date, plain.calendar)?;
                let internal = diff::difference_plain_date_time_with_rounding(
                    &start,
                    &end,
                    plain.calendar,
                    resolved,
                )?;
                Self::from_internal(internal, resolved.largest_unit)
            }
            None => {
                if existing_largest_unit.is_calendar_unit() || resolved.largest_unit.is_calendar_unit() {
                    return Err(TemporalError::usage().with_enum(ErrorMessage::RelativeToRequired));
                }
                temporal_assert!(
                    !resolved.smallest_unit.is_calendar_unit(),
                    "calendar smallest unit {} without a relative anchor",
                    resolved.smallest_unit
                );

                let rounded = self.to_normalized_with_days()?.round(resolved)?;
                let internal = if resolved.smallest_unit == Unit::Day {
                    NormalizedDurationRecord::from_date_duration(DateDuration::new(
                        0,
                        0,
                        0,
                        rounded.0.days(),
                    )?)?
                } else {
                    NormalizedDurationRecord::new(DateDuration::default(), rounded)?
                };
                Self::from_internal(internal, resolved.largest_unit)
            }
        }
    }

    /// Returns the fractional count of `unit` in this duration.
    ///
    /// Without an anchor, only days and time units can be totaled, with days
    /// counted as 24 hours.
    pub fn total(&self, unit: Unit, relative_to: Option<RelativeTo<'_>>) -> TemporalResult<f64> {
        if unit == Unit::Auto {
            return Err(TemporalError::range().with_message("A unit is required to total a duration."));
        }

        match relative_to {
            Some(RelativeTo::ZonedDateTime(zoned)) => {
                let target = add_zoned_date_time(
                    zoned.epoch_nanoseconds,
                    zoned.time_zone,
                    zoned.calendar,
                    &self.to_internal()?,
                    ArithmeticOverflow::Constrain,
                )?;
                diff::difference_zoned_date_time_with_total(
                    zoned.epoch_nanoseconds,
                    target,
                    zoned.calendar,
                    zoned.time_zone,
                    unit,
                )
            }
            Some(RelativeTo::PlainDate(plain)) => {
                let (start, end) = self.plain_target(plain.date, plain.calendar)?;
                diff::difference_plain_date_time_with_total(&start, &end, plain.calendar, unit)
            }
            None => {
                if self.default_largest_unit().is_calendar_unit() || unit.is_calendar_unit() {
                    return Err(TemporalError::usage().with_enum(ErrorMessage::RelativeToRequired));
                }
                self.to_normalized_with_days()?.total(unit)
            }
        }
    }

    /// Returns midnight of `date` and the date-time this duration reaches
    /// from it. The time is added first, and its day carry joins the days.
    fn plain_target(
        &self,
        date: IsoDate,
        calendar: &dyn CalendarMethods,
    ) -> TemporalResult<(IsoDateTime, IsoDateTime)> {
        let internal = self.to_internal()?;
        let (carry, target_time) = IsoTime::default().add(internal.normalized_time_duration().0);
        let date_duration = internal.date().adjust(
            internal
                .date()
                .days
                .checked_add(carry)
                .ok_or(TemporalError::range().with_enum(ErrorMessage::DurationOutOfRange))?,
            None,
            None,
        )?;
        let target_date = calendar.date_add(&date, &date_duration, ArithmeticOverflow::Constrain)?;
        Ok((
            IsoDateTime::new_unchecked(date, IsoTime::default()),
            IsoDateTime::new_unchecked(target_date, target_time),
        ))
    }
}

// ==== Adding durations to points in time ====

impl Duration {
    /// Adds this duration to a calendar date. Time fields are truncated to
    /// whole days.
    ///
    /// Equivalent to `AddDurationToDate`.
    pub fn add_to_date(
        &self,
        date: &IsoDate,
        calendar: &dyn CalendarMethods,
        overflow: ArithmeticOverflow,
    ) -> TemporalResult<IsoDate> {
        let time_days = self.time.to_normalized().0.days();
        let days = self
            .date
            .days
            .checked_add(time_days)
            .ok_or(TemporalError::range().with_enum(ErrorMessage::DurationOutOfRange))?;
        calendar.date_add(date, &self.date.adjust(days, None, None)?, overflow)
    }

    /// Adds this duration to a wall-clock date-time.
    ///
    /// Equivalent to `AddDurationToDateTime`.
    pub fn add_to_date_time(
        &self,
        date_time: &IsoDateTime,
        calendar: &dyn CalendarMethods,
        overflow: ArithmeticOverflow,
    ) -> TemporalResult<IsoDateTime> {
        date_time.add_date_duration(calendar, &self.date, self.time.to_normalized(), overflow)
    }

    /// Adds this duration to an exact time in a time zone.
    ///
    /// Equivalent to `AddDurationToZonedDateTime`.
    pub fn add_to_zoned(
        &self,
        epoch_ns: EpochNanoseconds,
        time_zone: &dyn TimeZoneMethods,
        calendar: &dyn CalendarMethods,
        overflow: ArithmeticOverflow,
    ) -> TemporalResult<EpochNanoseconds> {
        add_zoned_date_time(epoch_ns, time_zone, calendar, &self.to_internal()?, overflow)
    }
}

/// Adds the date part of a duration on the local calendar, then the time
/// part as exact time.
///
/// Equivalent to `AddZonedDateTime`.
pub(crate) fn add_zoned_date_time(
    epoch_ns: EpochNanoseconds,
    time_zone: &dyn TimeZoneMethods,
    calendar: &dyn CalendarMethods,
    duration: &NormalizedDurationRecord,
    overflow: ArithmeticOverflow,
) -> TemporalResult<EpochNanoseconds> {
    let time = duration.normalized_time_duration();
    if duration.date().sign() == Sign::Zero {
        return epoch_ns.checked_add(time.0);
    }

    let iso = time_zone.get_iso_datetime_for(&epoch_ns)?;
    let added = calendar.date_add(&iso.date, &duration.date(), overflow)?;
    let intermediate = IsoDateTime::new(added, iso.time)?;
    let intermediate_ns = time_zone.get_epoch_nanoseconds_for(intermediate, Disambiguation::Compatible)?;
    intermediate_ns.checked_add(time.0)
}

// ==== Validity ====

fn fields_share_sign(set: &[i128]) -> bool {
    let sign = duration_sign(set);
    set.iter().all(|v| match sign {
        Sign::Positive => *v >= 0,
        Sign::Negative => *v <= 0,
        Sign::Zero => true,
    })
}

fn total_nanoseconds(
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
    milliseconds: i64,
    microseconds: i128,
    nanoseconds: i128,
) -> Option<i128> {
    i128::from(days)
        .checked_mul(i128::from(NS_PER_DAY))?
        .checked_add(i128::from(hours).checked_mul(3_600_000_000_000)?)?
        .checked_add(i128::from(minutes).checked_mul(60_000_000_000)?)?
        .checked_add(i128::from(seconds).checked_mul(1_000_000_000)?)?
        .checked_add(i128::from(milliseconds).checked_mul(1_000_000)?)?
        .checked_add(microseconds.checked_mul(1_000)?)?
        .checked_add(nanoseconds)
}

/// Utility function to check whether the `Duration` fields are valid.
///
/// Equivalent to `IsValidDuration`.
#[inline]
#[must_use]
#[allow(clippy::too_many_arguments)]
pub(crate) fn is_valid_duration(
    years: i64,
    months: i64,
    weeks: i64,
    days: i64,
    hours: i64,
    minutes: i64,
    seconds: i64,
    milliseconds: i64,
    microseconds: i128,
    nanoseconds: i128,
) -> bool {
    let set = [
        i128::from(years),
        i128::from(months),
        i128::from(weeks),
        i128::from(days),
        i128::from(hours),
        i128::from(minutes),
        i128::from(seconds),
        i128::from(milliseconds),
        microseconds,
        nanoseconds,
    ];
    if !fields_share_sign(&set) {
        return false;
    }

    if years.unsigned_abs() >= MAX_CALENDAR_FIELD
        || months.unsigned_abs() >= MAX_CALENDAR_FIELD
        || weeks.unsigned_abs() >= MAX_CALENDAR_FIELD
    {
        return false;
    }

    // The time span is summed exactly; overflowing the sum is out of range.
    total_nanoseconds(
        days,
        hours,
        minutes,
        seconds,
        milliseconds,
        microseconds,
        nanoseconds,
    )
    .is_some_and(|total| total.abs() < MAX_TOTAL_NANOSECONDS)
}

/// Utility function for determining the sign for the current set of `Duration` fields.
///
/// Equivalent to `DurationSign`.
#[inline]
#[must_use]
pub(crate) fn duration_sign(set: &[i128]) -> Sign {
    set.iter()
        .find(|v| **v != 0)
        .map_or(Sign::Zero, |v| Sign::from(v.cmp(&0)))
}

impl From<TimeDuration> for Duration {
    fn from(value: TimeDuration) -> Self {
        Self::new_unchecked(DateDuration::default(), value)
    }
}

impl From<DateDuration> for Duration {
    fn from(value: DateDuration) -> Self {
        Self::new_unchecked(value, TimeDuration::default())
    }
}
