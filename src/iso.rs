//! This module implements the ISO field records.
//!
//! The three record types are:
//!   - `IsoDateTime`
//!   - `IsoDate`
//!   - `IsoTime`
//!
//! An `IsoDate` is a proleptic Gregorian year, month and day. An `IsoTime` is
//! a wall-clock time of day down to the nanosecond, and an `IsoDateTime`
//! combines both.
//!
//! Conversions to and from the epoch go through whole epoch days, using the
//! `date_equations` crate, so no platform date object bounds the supported
//! year range.

use core::num::NonZeroU128;

use crate::{
    builtins::core::{
        calendar::CalendarMethods,
        duration::{normalized::NormalizedTimeDuration, DateDuration},
    },
    epoch_nanoseconds::{is_valid_epoch_nanos, DayTimeNano, EpochNanoseconds},
    error::ErrorMessage,
    options::{ArithmeticOverflow, ResolvedRoundingOptions, RoundingOptions},
    rounding::IncrementRounder,
    utils, TemporalError, TemporalResult, NS_PER_DAY,
};

const NS_PER_DAY_I64: i64 = NS_PER_DAY as i64;

/// The earliest ISO year that contains representable date-times.
pub(crate) const MIN_ISO_YEAR: i32 = -271_821;
/// The latest ISO year that contains representable date-times.
pub(crate) const MAX_ISO_YEAR: i32 = 275_760;

/// `IsoDateTime` is the record of an `IsoDate` and an `IsoTime`.
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDateTime {
    pub date: IsoDate,
    pub time: IsoTime,
}

impl IsoDateTime {
    /// Creates a new `IsoDateTime` without any validation.
    #[inline]
    pub(crate) const fn new_unchecked(date: IsoDate, time: IsoTime) -> Self {
        Self { date, time }
    }

    /// Creates a new validated `IsoDateTime` that is within valid limits.
    pub fn new(date: IsoDate, time: IsoTime) -> TemporalResult<Self> {
        let result = Self::new_unchecked(date, time);
        result.check_within_limits()?;
        Ok(result)
    }

    /// Creates the wall-clock `IsoDateTime` of an exact time seen through a
    /// UTC offset in nanoseconds.
    ///
    /// Equivalent to `GetISOPartsFromEpoch` followed by `BalanceISODateTime`.
    #[must_use]
    pub fn from_epoch_nanos(epoch_nanos: &DayTimeNano, offset_nanoseconds: i64) -> Self {
        let local = *epoch_nanos + DayTimeNano::from(offset_nanoseconds);
        let (days, nanos) = local.floor_days();
        let (_, time) = IsoTime::from_nanoseconds(nanos);
        Self::new_unchecked(IsoDate::from_epoch_days(days), time)
    }

    /// Returns the exact time of this date-time read as UTC.
    ///
    /// The result is exact for any valid date and time, whether or not it
    /// lies inside the instant range.
    #[inline]
    #[must_use]
    pub fn utc_epoch_nanos(&self) -> DayTimeNano {
        DayTimeNano::new(self.date.to_epoch_days(), self.time.to_nanoseconds())
    }

    /// Returns this `IsoDateTime` as a validated instant, read as UTC.
    pub fn as_nanoseconds(&self) -> TemporalResult<EpochNanoseconds> {
        EpochNanoseconds::try_from(self.utc_epoch_nanos())
    }

    /// Returns whether this date-time can be resolved to an instant by some
    /// UTC offset of less than a day.
    #[inline]
    #[must_use]
    pub fn is_within_limits(&self) -> bool {
        if !(MIN_ISO_YEAR..=MAX_ISO_YEAR).contains(&self.date.year) {
            return false;
        }
        // At the boundary years, shift the value one day minus one nanosecond
        // toward the epoch before testing it against the instant range.
        let nudge = match self.date.year {
            MIN_ISO_YEAR => 1,
            MAX_ISO_YEAR => -1,
            _ => 0,
        };
        let nudged =
            self.utc_epoch_nanos() + DayTimeNano::from_days(nudge) - DayTimeNano::from(nudge);
        is_valid_epoch_nanos(&nudged)
    }

    /// Equivalent to `ISODateTimeWithinLimits`, failing with a range error.
    pub fn check_within_limits(&self) -> TemporalResult<()> {
        if !self.is_within_limits() {
            return Err(TemporalError::range().with_enum(ErrorMessage::DateTimeOutOfRange));
        }
        Ok(())
    }

    /// Rounds this date-time to an increment of a time unit, or to the
    /// nearest day.
    pub fn round(&self, options: RoundingOptions) -> TemporalResult<Self> {
        let resolved = ResolvedRoundingOptions::from_dt_options(options)?;
        self.round_with_resolved(resolved)
    }

    pub(crate) fn round_with_resolved(
        &self,
        resolved: ResolvedRoundingOptions,
    ) -> TemporalResult<Self> {
        let (overflow_day, time) = self.time.round(resolved)?;
        let result = Self::new_unchecked(self.date.add_days(overflow_day), time);
        result.check_within_limits()?;
        Ok(result)
    }

    /// Adds a date duration and a time span to this date-time.
    ///
    /// Equivalent to `AddDateTime`: the time is added first and its day
    /// carry joins the date duration's days.
    pub(crate) fn add_date_duration(
        &self,
        calendar: &dyn CalendarMethods,
        date_duration: &DateDuration,
        norm: NormalizedTimeDuration,
        overflow: ArithmeticOverflow,
    ) -> TemporalResult<Self> {
        let (overflow_day, time) = self.time.add(norm.0);
        let date_duration = date_duration.adjust(
            date_duration
                .days
                .checked_add(overflow_day)
                .ok_or(TemporalError::range().with_enum(ErrorMessage::DurationOutOfRange))?,
            None,
            None,
        )?;
        let date = calendar.date_add(&self.date, &date_duration, overflow)?;
        Self::new(date, time)
    }
}

// ==== `IsoDate` section ====

/// `IsoDate` is the record of an ISO year, month and day.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
}

impl Default for IsoDate {
    fn default() -> Self {
        Self::new_unchecked(1970, 1, 1)
    }
}

impl IsoDate {
    /// Creates a new `IsoDate` without determining the validity.
    #[inline]
    pub(crate) const fn new_unchecked(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }

    /// Creates a new valid `IsoDate`, rejecting out of range fields.
    pub fn try_new(year: i32, month: u8, day: u8) -> TemporalResult<Self> {
        Self::new_with_overflow(year, month.into(), day.into(), ArithmeticOverflow::Reject)
    }

    /// Creates a new `IsoDate`, regulating the month and day with `overflow`,
    /// and checks that the date lies within the representable range.
    pub fn new_with_overflow(
        year: i32,
        month: i32,
        day: i32,
        overflow: ArithmeticOverflow,
    ) -> TemporalResult<Self> {
        let date = Self::regulate(year, month, day, overflow)?;
        date.check_within_limits()?;
        Ok(date)
    }

    /// Equivalent to `RegulateISODate`.
    pub(crate) fn regulate(
        year: i32,
        month: i32,
        day: i32,
        overflow: ArithmeticOverflow,
    ) -> TemporalResult<Self> {
        match overflow {
            ArithmeticOverflow::Constrain => {
                let month = month.clamp(1, 12) as u8;
                let days_in_month = utils::iso_days_in_month(year, month);
                let day = day.clamp(1, days_in_month.into()) as u8;
                Ok(Self::new_unchecked(year, month, day))
            }
            ArithmeticOverflow::Reject => {
                if !(1..=12).contains(&month) {
                    return Err(TemporalError::range().with_enum(ErrorMessage::MonthOutOfRange));
                }
                let month = month as u8;
                if !(1..=i32::from(utils::iso_days_in_month(year, month))).contains(&day) {
                    return Err(TemporalError::range().with_enum(ErrorMessage::DayOutOfRange));
                }
                Ok(Self::new_unchecked(year, month, day as u8))
            }
        }
    }

    /// Creates the `IsoDate` that is `epoch_days` days after 1970-01-01.
    #[inline]
    #[must_use]
    pub fn from_epoch_days(epoch_days: i64) -> Self {
        let (year, month, day) = utils::iso_from_epoch_days(epoch_days);
        Self::new_unchecked(year, month, day)
    }

    /// Returns the number of days since 1970-01-01.
    #[inline]
    #[must_use]
    pub fn to_epoch_days(&self) -> i64 {
        utils::epoch_days_from_iso(self.year, self.month, self.day.into())
    }

    /// Returns the date `days` days after this one.
    #[inline]
    #[must_use]
    pub(crate) fn add_days(&self, days: i64) -> Self {
        Self::from_epoch_days(self.to_epoch_days() + days)
    }

    /// Returns whether the month and day are valid for the year.
    #[inline]
    #[must_use]
    pub fn is_valid(&self) -> bool {
        (1..=12).contains(&self.month)
            && (1..=utils::iso_days_in_month(self.year, self.month)).contains(&self.day)
    }

    /// Checks that noon of this date is within the date-time limits.
    pub fn check_within_limits(&self) -> TemporalResult<()> {
        if !IsoDateTime::new_unchecked(*self, IsoTime::noon()).is_within_limits() {
            return Err(TemporalError::range().with_enum(ErrorMessage::DateOutOfRange));
        }
        Ok(())
    }

    /// Checks that the year and month of this date are within the year-month
    /// limits, -271821-04 to 275760-09.
    pub fn check_year_month_within_limits(&self) -> TemporalResult<()> {
        let within = match self.year {
            MIN_ISO_YEAR => self.month >= 4,
            MAX_ISO_YEAR => self.month <= 9,
            year => (MIN_ISO_YEAR..MAX_ISO_YEAR).contains(&year),
        };
        if !within {
            return Err(TemporalError::range().with_enum(ErrorMessage::YearMonthOutOfRange));
        }
        Ok(())
    }

    /// Returns the ISO day of the week, where Monday is 1 and Sunday is 7.
    #[inline]
    #[must_use]
    pub fn day_of_week(&self) -> u8 {
        utils::iso_day_of_week(self.to_epoch_days())
    }

    /// Returns the ordinal day of the year, starting at 1.
    #[inline]
    #[must_use]
    pub fn day_of_year(&self) -> u16 {
        let first = utils::epoch_days_from_iso(self.year, 1, 1);
        (self.to_epoch_days() - first + 1) as u16
    }

    #[inline]
    #[must_use]
    pub fn days_in_month(&self) -> u8 {
        utils::iso_days_in_month(self.year, self.month)
    }

    #[inline]
    #[must_use]
    pub fn days_in_year(&self) -> u16 {
        utils::iso_days_in_year(self.year)
    }

    #[inline]
    #[must_use]
    pub fn in_leap_year(&self) -> bool {
        utils::is_leap_year(self.year)
    }

    /// Returns the ISO 8601 week-numbering year and week of this date.
    ///
    /// Weeks start on Monday, and week 1 is the week that contains the
    /// year's first Thursday.
    #[must_use]
    pub fn iso_week_of_year(&self) -> (i32, u8) {
        let day_of_year = i32::from(self.day_of_year());
        let day_of_week = i32::from(self.day_of_week());
        let week = (day_of_year - day_of_week + 10) / 7;

        if week < 1 {
            // The date belongs to the last week of the previous year, which
            // has 53 weeks when it starts on a Thursday.
            let jan_first = i32::from(IsoDate::new_unchecked(self.year, 1, 1).day_of_week());
            let long_year = jan_first == 5 || (jan_first == 6 && utils::is_leap_year(self.year - 1));
            return (self.year - 1, if long_year { 53 } else { 52 });
        }

        if week == 53 && i32::from(self.days_in_year()) - day_of_year < 4 - day_of_week {
            return (self.year + 1, 1);
        }

        (self.year, week as u8)
    }

    /// Adds years and months to an ISO year and month, balancing the result.
    #[inline]
    pub(crate) fn balance_year_month(year: i32, month: i64) -> (i32, u8) {
        let year = i64::from(year) + (month - 1).div_euclid(12);
        let month = (month - 1).rem_euclid(12) as u8 + 1;
        (year.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32, month)
    }

    /// Adds a date duration in the ISO calendar.
    ///
    /// Equivalent to `AddISODate`.
    pub(crate) fn add_date_duration(
        &self,
        duration: &DateDuration,
        overflow: ArithmeticOverflow,
    ) -> TemporalResult<Self> {
        let years = i64::from(self.year) + duration.years;
        let years = i32::try_from(years)
            .map_err(|_| TemporalError::range().with_enum(ErrorMessage::DateOutOfRange))?;
        let (year, month) = Self::balance_year_month(years, i64::from(self.month) + duration.months);
        let intermediate = Self::regulate(year, month.into(), self.day.into(), overflow)?;

        let days = duration
            .weeks
            .checked_mul(7)
            .and_then(|weeks| weeks.checked_add(duration.days))
            .ok_or(TemporalError::range().with_enum(ErrorMessage::DateOutOfRange))?;
        let result = Self::from_epoch_days(intermediate.to_epoch_days().saturating_add(days));
        result.check_within_limits()?;
        Ok(result)
    }
}

// ==== `IsoTime` section ====

/// An `IsoTime` record, a wall-clock time of day.
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IsoTime {
    pub hour: u8,         // 0..=23
    pub minute: u8,       // 0..=59
    pub second: u8,       // 0..=59
    pub millisecond: u16, // 0..=999
    pub microsecond: u16, // 0..=999
    pub nanosecond: u16,  // 0..=999
}

impl IsoTime {
    /// Creates a new `IsoTime` without any validation.
    #[inline]
    pub(crate) const fn new_unchecked(
        hour: u8,
        minute: u8,
        second: u8,
        millisecond: u16,
        microsecond: u16,
        nanosecond: u16,
    ) -> Self {
        Self {
            hour,
            minute,
            second,
            millisecond,
            microsecond,
            nanosecond,
        }
    }

    /// Creates a new regulated `IsoTime`.
    pub fn new(
        hour: i32,
        minute: i32,
        second: i32,
        millisecond: i32,
        microsecond: i32,
        nanosecond: i32,
        overflow: ArithmeticOverflow,
    ) -> TemporalResult<IsoTime> {
        match overflow {
            ArithmeticOverflow::Constrain => Ok(Self::new_unchecked(
                hour.clamp(0, 23) as u8,
                minute.clamp(0, 59) as u8,
                second.clamp(0, 59) as u8,
                millisecond.clamp(0, 999) as u16,
                microsecond.clamp(0, 999) as u16,
                nanosecond.clamp(0, 999) as u16,
            )),
            ArithmeticOverflow::Reject => {
                let sub_second = 0..=999;
                if !(0..=23).contains(&hour)
                    || !(0..=59).contains(&minute)
                    || !(0..=59).contains(&second)
                    || !sub_second.contains(&millisecond)
                    || !sub_second.contains(&microsecond)
                    || !sub_second.contains(&nanosecond)
                {
                    return Err(TemporalError::range().with_enum(ErrorMessage::InvalidIsoTime));
                }
                Ok(Self::new_unchecked(
                    hour as u8,
                    minute as u8,
                    second as u8,
                    millisecond as u16,
                    microsecond as u16,
                    nanosecond as u16,
                ))
            }
        }
    }

    /// Returns an `IsoTime` set to 12:00:00
    #[inline]
    pub(crate) const fn noon() -> Self {
        Self::new_unchecked(12, 0, 0, 0, 0, 0)
    }

    /// Returns the nanoseconds since midnight.
    #[must_use]
    pub fn to_nanoseconds(&self) -> i64 {
        let minutes = i64::from(self.hour) * 60 + i64::from(self.minute);
        let seconds = minutes * 60 + i64::from(self.second);
        let millis = seconds * 1000 + i64::from(self.millisecond);
        let micros = millis * 1000 + i64::from(self.microsecond);
        micros * 1000 + i64::from(self.nanosecond)
    }

    /// Balances a nanosecond count since midnight into whole days and an
    /// `IsoTime`. The count may be negative.
    ///
    /// Equivalent to `BalanceTime`.
    #[must_use]
    pub(crate) fn from_nanoseconds(nanoseconds: i64) -> (i64, Self) {
        let days = nanoseconds.div_euclid(NS_PER_DAY_I64);
        let nanos = nanoseconds.rem_euclid(NS_PER_DAY_I64);

        let (micros, nanosecond) = (nanos / 1000, nanos % 1000);
        let (millis, microsecond) = (micros / 1000, micros % 1000);
        let (seconds, millisecond) = (millis / 1000, millis % 1000);
        let (minutes, second) = (seconds / 60, seconds % 60);
        let (hour, minute) = (minutes / 60, minutes % 60);

        let time = Self::new_unchecked(
            hour as u8,
            minute as u8,
            second as u8,
            millisecond as u16,
            microsecond as u16,
            nanosecond as u16,
        );
        (days, time)
    }

    /// Returns the exact span `other - self`.
    #[inline]
    #[must_use]
    pub(crate) fn diff(&self, other: &Self) -> DayTimeNano {
        DayTimeNano::from(other.to_nanoseconds() - self.to_nanoseconds())
    }

    /// Adds a span of time, returning the day carry and the new time.
    ///
    /// Equivalent to `AddTime`.
    #[must_use]
    pub(crate) fn add(&self, span: DayTimeNano) -> (i64, Self) {
        let (days, nanos) = (span + DayTimeNano::from(self.to_nanoseconds())).floor_days();
        let (_, time) = Self::from_nanoseconds(nanos);
        (days, time)
    }

    /// Rounds this time to the resolved increment, returning the day carry
    /// and the rounded time.
    ///
    /// Equivalent to `RoundTime`.
    pub(crate) fn round(&self, resolved: ResolvedRoundingOptions) -> TemporalResult<(i64, Self)> {
        let increment: NonZeroU128 = resolved.increment_nanoseconds()?;
        let rounded = IncrementRounder::<i64>::from_signed_num(self.to_nanoseconds(), increment)?
            .round(resolved.rounding_mode);
        let rounded = i64::try_from(rounded).map_err(|_| TemporalError::assert())?;
        Ok(Self::from_nanoseconds(rounded))
    }

    /// Checks if the time is a valid `IsoTime`
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.hour < 24
            && self.minute < 60
            && self.second < 60
            && self.millisecond < 1000
            && self.microsecond < 1000
            && self.nanosecond < 1000
    }
}

#[cfg(test)]
mod tests {
    use super::{IsoDate, IsoDateTime, IsoTime};
    use crate::{
        builtins::core::duration::DateDuration,
        epoch_nanoseconds::DayTimeNano,
        options::{ArithmeticOverflow, RoundingIncrement, RoundingMode, RoundingOptions, Unit},
        NS_PER_DAY,
    };

    const MAX_DAY_NANOS: i64 = NS_PER_DAY as i64 - 1;

    fn time(hour: u8, minute: u8, second: u8, ns_fraction: i64) -> IsoTime {
        let (_, sub) = IsoTime::from_nanoseconds(ns_fraction);
        IsoTime::new_unchecked(
            hour,
            minute,
            second,
            sub.millisecond,
            sub.microsecond,
            sub.nanosecond,
        )
    }

    #[test]
    fn iso_week_numbering() {
        assert_eq!(IsoDate::new_unchecked(2021, 1, 1).iso_week_of_year(), (2020, 53));
        assert_eq!(IsoDate::new_unchecked(1977, 1, 1).iso_week_of_year(), (1976, 53));
        assert_eq!(IsoDate::new_unchecked(2024, 12, 30).iso_week_of_year(), (2025, 1));
        assert_eq!(IsoDate::new_unchecked(2023, 1, 1).iso_week_of_year(), (2022, 52));
        assert_eq!(IsoDate::new_unchecked(2020, 12, 31).iso_week_of_year(), (2020, 53));
        assert_eq!(IsoDate::new_unchecked(2024, 6, 15).iso_week_of_year(), (2024, 24));
    }

    #[test]
    fn day_queries() {
        let date = IsoDate::new_unchecked(2024, 3, 1);
        assert_eq!(date.day_of_year(), 61);
        assert_eq!(date.day_of_week(), 5);
        assert_eq!(date.days_in_year(), 366);
        assert!(date.in_leap_year());
        assert_eq!(IsoDate::new_unchecked(1970, 1, 1).day_of_week(), 4);
        assert_eq!(IsoDate::new_unchecked(2023, 12, 31).day_of_year(), 365);
    }

    #[test]
    fn regulation() {
        let constrained =
            IsoDate::new_with_overflow(2023, 2, 31, ArithmeticOverflow::Constrain).unwrap();
        assert_eq!(constrained, IsoDate::new_unchecked(2023, 2, 28));
        let constrained =
            IsoDate::new_with_overflow(2023, 13, 0, ArithmeticOverflow::Constrain).unwrap();
        assert_eq!(constrained, IsoDate::new_unchecked(2023, 12, 1));
        assert!(IsoDate::try_new(2023, 2, 29).is_err());
        assert!(IsoDate::try_new(2024, 2, 29).is_ok());
        assert!(IsoDate::try_new(2024, 0, 1).is_err());
    }

    #[test]
    fn epoch_day_round_trip() {
        for days in [-100_000_001i64, -719_468, -1, 0, 1, 11_016, 100_000_001] {
            assert_eq!(IsoDate::from_epoch_days(days).to_epoch_days(), days);
        }
        assert_eq!(IsoDate::from_epoch_days(-1), IsoDate::new_unchecked(1969, 12, 31));
    }

    #[test]
    fn date_time_limits() {
        let max = IsoDateTime::new_unchecked(
            IsoDate::new_unchecked(275_760, 9, 13),
            time(23, 59, 59, 999_999_999),
        );
        assert!(max.check_within_limits().is_ok());
        let past_max =
            IsoDateTime::new_unchecked(IsoDate::new_unchecked(275_760, 9, 14), IsoTime::default());
        assert!(past_max.check_within_limits().is_err());

        let min = IsoDateTime::new_unchecked(IsoDate::new_unchecked(-271_821, 4, 19), time(0, 0, 0, 1));
        assert!(min.check_within_limits().is_ok());
        let before_min =
            IsoDateTime::new_unchecked(IsoDate::new_unchecked(-271_821, 4, 19), IsoTime::default());
        assert!(before_min.check_within_limits().is_err());

        assert!(IsoDateTime::new_unchecked(IsoDate::new_unchecked(275_761, 1, 1), IsoTime::default())
            .check_within_limits()
            .is_err());
    }

    #[test]
    fn date_limits() {
        assert!(IsoDate::try_new(-271_821, 4, 19).is_ok());
        assert!(IsoDate::try_new(-271_821, 4, 18).is_err());
        assert!(IsoDate::try_new(275_760, 9, 13).is_ok());
        assert!(IsoDate::try_new(275_760, 9, 14).is_err());

        assert!(IsoDate::new_unchecked(-271_821, 4, 1)
            .check_year_month_within_limits()
            .is_ok());
        assert!(IsoDate::new_unchecked(-271_821, 3, 31)
            .check_year_month_within_limits()
            .is_err());
        assert!(IsoDate::new_unchecked(275_760, 9, 30)
            .check_year_month_within_limits()
            .is_ok());
        assert!(IsoDate::new_unchecked(275_760, 10, 1)
            .check_year_month_within_limits()
            .is_err());
    }

    #[test]
    fn epoch_conversion_with_offset() {
        let epoch = DayTimeNano::ZERO;
        let dt = IsoDateTime::from_epoch_nanos(&epoch, -3_600_000_000_000);
        assert_eq!(dt.date, IsoDate::new_unchecked(1969, 12, 31));
        assert_eq!(dt.time, IsoTime::new_unchecked(23, 0, 0, 0, 0, 0));

        let instant = DayTimeNano::from_nanoseconds(1_709_251_199_999_999_999);
        let dt = IsoDateTime::from_epoch_nanos(&instant, 0);
        assert_eq!(dt.date, IsoDate::new_unchecked(2024, 2, 29));
        assert_eq!(dt.time.to_nanoseconds(), MAX_DAY_NANOS);
        assert_eq!(dt.utc_epoch_nanos(), instant);
    }

    #[test]
    fn time_balancing() {
        let (days, time) = IsoTime::from_nanoseconds(-1);
        assert_eq!(days, -1);
        assert_eq!(time.to_nanoseconds(), MAX_DAY_NANOS);

        let noon = IsoTime::noon();
        let (days, time) = noon.add(DayTimeNano::new(1, 13 * 3_600_000_000_000));
        assert_eq!(days, 2);
        assert_eq!(time, IsoTime::new_unchecked(1, 0, 0, 0, 0, 0));

        let (days, time) = noon.add(DayTimeNano::from(-13 * 3_600_000_000_000));
        assert_eq!(days, -1);
        assert_eq!(time, IsoTime::new_unchecked(23, 0, 0, 0, 0, 0));
        assert!(IsoTime::new(24, 0, 0, 0, 0, 0, ArithmeticOverflow::Reject).is_err());
    }

    #[test]
    fn date_time_rounding() {
        let dt = IsoDateTime::new_unchecked(
            IsoDate::new_unchecked(2024, 2, 29),
            IsoTime::new_unchecked(23, 44, 30, 0, 0, 0),
        );
        let options = RoundingOptions {
            smallest_unit: Some(Unit::Minute),
            increment: Some(RoundingIncrement::try_new(30).unwrap()),
            ..Default::default()
        };
        let rounded = dt.round(options).unwrap();
        assert_eq!(rounded.date, IsoDate::new_unchecked(2024, 2, 29));
        assert_eq!(rounded.time, IsoTime::new_unchecked(23, 30, 0, 0, 0, 0));

        let options = RoundingOptions {
            smallest_unit: Some(Unit::Hour),
            rounding_mode: Some(RoundingMode::Ceil),
            ..Default::default()
        };
        let rounded = dt.round(options).unwrap();
        assert_eq!(rounded.date, IsoDate::new_unchecked(2024, 3, 1));
        assert_eq!(rounded.time, IsoTime::default());

        let options = RoundingOptions {
            smallest_unit: Some(Unit::Day),
            ..Default::default()
        };
        assert_eq!(dt.round(options).unwrap().date, IsoDate::new_unchecked(2024, 3, 1));
    }

    #[test]
    fn iso_date_addition() {
        let date = IsoDate::new_unchecked(2024, 1, 31);
        let one_month = DateDuration::new_unchecked(0, 1, 0, 0);
        assert_eq!(
            date.add_date_duration(&one_month, ArithmeticOverflow::Constrain)
                .unwrap(),
            IsoDate::new_unchecked(2024, 2, 29)
        );
        assert!(date
            .add_date_duration(&one_month, ArithmeticOverflow::Reject)
            .is_err());

        let mixed = DateDuration::new_unchecked(1, 2, 1, 3);
        assert_eq!(
            IsoDate::new_unchecked(2023, 11, 15)
                .add_date_duration(&mixed, ArithmeticOverflow::Constrain)
                .unwrap(),
            IsoDate::new_unchecked(2025, 1, 25)
        );

        let back = DateDuration::new_unchecked(0, -13, 0, -1);
        assert_eq!(
            IsoDate::new_unchecked(2024, 3, 31)
                .add_date_duration(&back, ArithmeticOverflow::Constrain)
                .unwrap(),
            IsoDate::new_unchecked(2023, 2, 27)
        );

        let too_far = DateDuration::new_unchecked(0, 0, 0, 200_000_000);
        assert!(date
            .add_date_duration(&too_far, ArithmeticOverflow::Constrain)
            .is_err());
    }
}
