//! The difference engine.
//!
//! This module computes the `Duration` between two dates, two wall-clock
//! date-times, two exact times in a time zone, two exact times, or two
//! wall-clock times. Each difference is taken exactly, then optionally
//! rounded to a smallest unit relative to its starting point.

use crate::{
    builtins::core::{
        calendar::CalendarMethods,
        duration::{
            normalized::{NormalizedDurationRecord, NormalizedTimeDuration, RelativeAnchor},
            DateDuration, Duration,
        },
        timezone::TimeZoneMethods,
    },
    epoch_nanoseconds::{DayTimeNano, EpochNanoseconds},
    iso::{IsoDate, IsoDateTime, IsoTime},
    options::{
        DifferenceOperation, DifferenceSettings, Disambiguation, ResolvedRoundingOptions,
        RoundingIncrement, Unit, UnitGroup,
    },
    Sign, TemporalResult, TemporalUnwrap,
};


// ==== Exact differences ====

/// Returns the span between two wall-clock date-times, with the time
/// adjusted so that it never disagrees in sign with the date.
///
/// Equivalent to `DifferenceISODateTime`.
pub(crate) fn difference_iso_date_time(
    start: &IsoDateTime,
    end: &IsoDateTime,
    calendar: &dyn CalendarMethods,
    largest_unit: Unit,
) -> TemporalResult<NormalizedDurationRecord> {
    let mut time = start.time.diff(&end.time);
    let time_sign = time.sign();
    let date_sign = Sign::from(end.date.cmp(&start.date));

    // Borrow a day from the date when the time runs the other way.
    let mut adjusted_date = end.date;
    if time_sign == date_sign.negate() {
        let borrowed = i64::from(time_sign as i8);
        adjusted_date = adjusted_date.add_days(borrowed);
        time = time - DayTimeNano::from_days(borrowed);
    }

    let date_largest_unit = largest_unit.max(Unit::Day);
    let date = calendar.date_until(&start.date, &adjusted_date, date_largest_unit)?;
    let date = if largest_unit == date_largest_unit {
        DateDuration::new(date.years, date.months, date.weeks, date.days)?
    } else {
        // Time-unit differences carry their whole days as time.
        time = time + DayTimeNano::from_days(date.days);
        DateDuration::default()
    };

    NormalizedDurationRecord::new(date, NormalizedTimeDuration::new(time)?)
}

/// Returns the span between two exact times, with its date part measured
/// on the local calendar of `time_zone`.
///
/// The local date of the end is walked back one day at a time until the
/// remaining exact time agrees in sign with the whole span.
///
/// Equivalent to `DifferenceZonedDateTime`.
pub(crate) fn difference_zoned_date_time(
    start_ns: EpochNanoseconds,
    end_ns: EpochNanoseconds,
    calendar: &dyn CalendarMethods,
    time_zone: &dyn TimeZoneMethods,
    largest_unit: Unit,
) -> TemporalResult<NormalizedDurationRecord> {
    let span = end_ns.0 - start_ns.0;
    if span.is_zero() {
        return Ok(NormalizedDurationRecord::default());
    }
    let sign = span.sign();

    let start = time_zone.get_iso_datetime_for(&start_ns)?;
    let end = time_zone.get_iso_datetime_for(&end_ns)?;
    if start.date == end.date {
        return NormalizedDurationRecord::new(
            DateDuration::default(),
            NormalizedTimeDuration::new(span)?,
        );
    }

    let sign_multiplier = i64::from(sign as i8);
    // A forward span may need to step over a day lost to a transition.
    let max_day_correction = if sign == Sign::Positive { 2 } else { 1 };
    let mut day_correction = i64::from(start.time.diff(&end.time).sign() == sign.negate());

    let mut corrected = None;
    while day_correction <= max_day_correction {
        let intermediate_date = end.date.add_days(-day_correction * sign_multiplier);
        let intermediate_ns = time_zone.get_epoch_nanoseconds_for(
            IsoDateTime::new_unchecked(intermediate_date, start.time),
            Disambiguation::Compatible,
        )?;
        let time = NormalizedTimeDuration::from_epoch_difference(intermediate_ns.0, end_ns.0)?;
        if time.sign() != sign.negate() {
            corrected = Some((intermediate_date, time));
            break;
        }
        day_correction += 1;
    }
    let (intermediate_date, time) = corrected.temporal_unwrap()?;

    let date = calendar.date_until(&start.date, &intermediate_date, largest_unit.max(Unit::Day))?;
    NormalizedDurationRecord::new(
        DateDuration::new(date.years, date.months, date.weeks, date.days)?,
        time,
    )
}

/// Equivalent to `DifferenceInstant`.
pub(crate) fn difference_instant(
    start_ns: EpochNanoseconds,
    end_ns: EpochNanoseconds,
    options: ResolvedRoundingOptions,
) -> TemporalResult<NormalizedDurationRecord> {
    let time = NormalizedTimeDuration::from_epoch_difference(start_ns.0, end_ns.0)?;
    NormalizedDurationRecord::new(DateDuration::default(), time.round(options)?)
}

// ==== Rounded differences and totals ====

/// Equivalent to `DifferencePlainDateTimeWithRounding`.
pub(crate) fn difference_plain_date_time_with_rounding(
    start: &IsoDateTime,
    end: &IsoDateTime,
    calendar: &dyn CalendarMethods,
    options: ResolvedRoundingOptions,
) -> TemporalResult<NormalizedDurationRecord> {
    if start == end {
        return Ok(NormalizedDurationRecord::default());
    }
    start.check_within_limits()?;
    end.check_within_limits()?;

    let diff = difference_iso_date_time(start, end, calendar, options.largest_unit)?;
    if options.is_noop() {
        return Ok(diff);
    }

    let anchor = RelativeAnchor {
        date_time: *start,
        calendar,
        time_zone: None,
    };
    diff.round_relative_duration(end.utc_epoch_nanos(), &anchor, options)
}

/// Equivalent to `DifferencePlainDateTimeWithTotal`.
pub(crate) fn difference_plain_date_time_with_total(
    start: &IsoDateTime,
    end: &IsoDateTime,
    calendar: &dyn CalendarMethods,
    unit: Unit,
) -> TemporalResult<f64> {
    if start == end {
        return Ok(0.0);
    }
    start.check_within_limits()?;
    end.check_within_limits()?;

    let diff = difference_iso_date_time(start, end, calendar, unit)?;
    if unit == Unit::Nanosecond {
        return Ok(diff.normalized_time_duration().0.as_nanoseconds() as f64);
    }

    let anchor = RelativeAnchor {
        date_time: *start,
        calendar,
        time_zone: None,
    };
    diff.total_relative_duration(end.utc_epoch_nanos(), &anchor, unit)
}

/// Equivalent to `DifferenceZonedDateTimeWithRounding`.
pub(crate) fn difference_zoned_date_time_with_rounding(
    start_ns: EpochNanoseconds,
    end_ns: EpochNanoseconds,
    calendar: &dyn CalendarMethods,
    time_zone: &dyn TimeZoneMethods,
    options: ResolvedRoundingOptions,
) -> TemporalResult<NormalizedDurationRecord> {
    if options.largest_unit.is_time_unit() {
        return difference_instant(start_ns, end_ns, options);
    }

    let diff = difference_zoned_date_time(start_ns, end_ns, calendar, time_zone, options.largest_unit)?;
    if options.is_noop() {
        return Ok(diff);
    }

    let anchor = RelativeAnchor {
        date_time: time_zone.get_iso_datetime_for(&start_ns)?,
        calendar,
        time_zone: Some(time_zone),
    };
    diff.round_relative_duration(end_ns.0, &anchor, options)
}

/// Equivalent to `DifferenceZonedDateTimeWithTotal`.
pub(crate) fn difference_zoned_date_time_with_total(
    start_ns: EpochNanoseconds,
    end_ns: EpochNanoseconds,
    calendar: &dyn CalendarMethods,
    time_zone: &dyn TimeZoneMethods,
    unit: Unit,
) -> TemporalResult<f64> {
    if unit.is_time_unit() {
        return NormalizedTimeDuration::from_epoch_difference(start_ns.0, end_ns.0)?.total(unit);
    }

    let diff = difference_zoned_date_time(start_ns, end_ns, calendar, time_zone, unit)?;
    let anchor = RelativeAnchor {
        date_time: time_zone.get_iso_datetime_for(&start_ns)?,
        calendar,
        time_zone: Some(time_zone),
    };
    diff.total_relative_duration(end_ns.0, &anchor, unit)
}

// ==== Public difference operations ====

#[inline]
fn apply_sign(duration: Duration, sign: Sign) -> Duration {
    if sign == Sign::Negative {
        duration.negated()
    } else {
        duration
    }
}

/// Returns the duration between two calendar dates.
///
/// The largest unit defaults to days, and the smallest unit to days. A
/// `since` difference is the negated `until` difference, rounded with the
/// negated rounding mode.
pub fn diff_dates(
    calendar: &dyn CalendarMethods,
    one: &IsoDate,
    two: &IsoDate,
    operation: DifferenceOperation,
    settings: DifferenceSettings,
) -> TemporalResult<Duration> {
    let (sign, resolved) = ResolvedRoundingOptions::from_diff_settings(
        settings,
        operation,
        UnitGroup::Date,
        Unit::Day,
        Unit::Day,
    )?;
    one.check_within_limits()?;
    two.check_within_limits()?;

    if one == two {
        return Ok(Duration::default());
    }

    let date = calendar.date_until(one, two, resolved.largest_unit)?;
    let mut internal = NormalizedDurationRecord::from_date_duration(DateDuration::new(
        date.years,
        date.months,
        date.weeks,
        date.days,
    )?)?;

    if resolved.smallest_unit != Unit::Day || resolved.increment != RoundingIncrement::ONE {
        let start = IsoDateTime::new_unchecked(*one, IsoTime::default());
        let end = IsoDateTime::new_unchecked(*two, IsoTime::default());
        let anchor = RelativeAnchor {
            date_time: start,
            calendar,
            time_zone: None,
        };
        internal = internal.round_relative_duration(end.utc_epoch_nanos(), &anchor, resolved)?;
    }

    Ok(apply_sign(Duration::from_internal(internal, Unit::Day)?, sign))
}

/// Returns the duration between two wall-clock date-times.
///
/// The largest unit defaults to days, and the smallest unit to
/// nanoseconds.
pub fn diff_date_times(
    calendar: &dyn CalendarMethods,
    one: &IsoDateTime,
    two: &IsoDateTime,
    operation: DifferenceOperation,
    settings: DifferenceSettings,
) -> TemporalResult<Duration> {
    let (sign, resolved) = ResolvedRoundingOptions::from_diff_settings(
        settings,
        operation,
        UnitGroup::DateTime,
        Unit::Day,
        Unit::Nanosecond,
    )?;

    let internal = difference_plain_date_time_with_rounding(one, two, calendar, resolved)?;
    Ok(apply_sign(
        Duration::from_internal(internal, resolved.largest_unit)?,
        sign,
    ))
}

/// Returns the duration between two exact times, measuring days and larger
/// units on the local calendar of `time_zone`.
///
/// The largest unit defaults to hours, and the smallest unit to
/// nanoseconds. Days are only as long as the time zone makes them.
pub fn diff_zoned_epoch_nanoseconds(
    calendar: &dyn CalendarMethods,
    time_zone: &dyn TimeZoneMethods,
    one: &EpochNanoseconds,
    two: &EpochNanoseconds,
    operation: DifferenceOperation,
    settings: DifferenceSettings,
) -> TemporalResult<Duration> {
    let (sign, resolved) = ResolvedRoundingOptions::from_diff_settings(
        settings,
        operation,
        UnitGroup::DateTime,
        Unit::Hour,
        Unit::Nanosecond,
    )?;

    if one == two {
        return Ok(Duration::default());
    }

    let internal =
        difference_zoned_date_time_with_rounding(*one, *two, calendar, time_zone, resolved)?;
    // Days and larger units are already in the date part; the time part
    // balances no further than hours.
    let largest_unit = if resolved.largest_unit.is_date_unit() {
        Unit::Hour
    } else {
        resolved.largest_unit
    };
    Ok(apply_sign(Duration::from_internal(internal, largest_unit)?, sign))
}

/// Returns the exact duration between two instants.
///
/// The largest unit defaults to seconds and may be at most hours.
pub fn diff_epoch_nanoseconds(
    one: &EpochNanoseconds,
    two: &EpochNanoseconds,
    operation: DifferenceOperation,
    settings: DifferenceSettings,
) -> TemporalResult<Duration> {
    let (sign, resolved) = ResolvedRoundingOptions::from_diff_settings(
        settings,
        operation,
        UnitGroup::Time,
        Unit::Second,
        Unit::Nanosecond,
    )?;

    let internal = difference_instant(*one, *two, resolved)?;
    Ok(apply_sign(
        Duration::from_internal(internal, resolved.largest_unit)?,
        sign,
    ))
}

/// Returns the duration between two wall-clock times of the same day.
pub fn diff_times(
    one: &IsoTime,
    two: &IsoTime,
    operation: DifferenceOperation,
    settings: DifferenceSettings,
) -> TemporalResult<Duration> {
    let (sign, resolved) = ResolvedRoundingOptions::from_diff_settings(
        settings,
        operation,
        UnitGroup::Time,
        Unit::Hour,
        Unit::Nanosecond,
    )?;

    let time = NormalizedTimeDuration::new(one.diff(two))?.round(resolved)?;
    let internal = NormalizedDurationRecord::new(DateDuration::default(), time)?;
    Ok(apply_sign(
        Duration::from_internal(internal, resolved.largest_unit)?,
        sign,
    ))
}
