//! Native implementation of the arithmetic options.
//!
//! Differences, roundings and totals are all configured through the
//! explicit option structs in this module. They are resolved once, into a
//! `ResolvedRoundingOptions`, before any arithmetic happens.

use crate::error::ErrorMessage;
use crate::{Sign, TemporalError, TemporalResult, MS_PER_DAY, NS_PER_DAY};
use core::num::NonZeroU128;
use core::ops::Add;
use core::{fmt, str::FromStr};

mod increment;
mod relative_to;

pub use increment::RoundingIncrement;
pub use relative_to::{PlainRelativeTo, RelativeTo, ZonedRelativeTo};

// ==== RoundingOptions / DifferenceSettings ====

/// Whether a difference is measured from the receiver to the argument
/// (`Until`) or from the argument to the receiver (`Since`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DifferenceOperation {
    Until,
    Since,
}

/// The set of units that a difference may be expressed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum UnitGroup {
    Date,
    Time,
    DateTime,
}

impl UnitGroup {
    fn contains(self, unit: Unit) -> bool {
        match self {
            Self::Date => unit.is_date_unit(),
            Self::Time => unit.is_time_unit(),
            Self::DateTime => unit != Unit::Auto,
        }
    }
}

/// The options for a difference between two dates, date-times or instants.
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy)]
pub struct DifferenceSettings {
    pub largest_unit: Option<Unit>,
    pub smallest_unit: Option<Unit>,
    pub rounding_mode: Option<RoundingMode>,
    pub increment: Option<RoundingIncrement>,
}

impl DifferenceSettings {
    /// Settings that express a difference in `largest_unit` without rounding.
    #[must_use]
    pub fn with_largest_unit(largest_unit: Unit) -> Self {
        Self {
            largest_unit: Some(largest_unit),
            ..Default::default()
        }
    }
}

/// The options for rounding a duration or a date-time.
#[non_exhaustive]
#[derive(Debug, Clone, Copy)]
pub struct RoundingOptions {
    pub largest_unit: Option<Unit>,
    pub smallest_unit: Option<Unit>,
    pub rounding_mode: Option<RoundingMode>,
    pub increment: Option<RoundingIncrement>,
}

// Note: having both largest and smallest unit None would auto throw.
impl Default for RoundingOptions {
    fn default() -> Self {
        Self {
            largest_unit: Some(Unit::Auto),
            smallest_unit: None,
            rounding_mode: None,
            increment: None,
        }
    }
}

/// Internal options object that represents the resolved rounding options.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ResolvedRoundingOptions {
    pub(crate) largest_unit: Unit,
    pub(crate) smallest_unit: Unit,
    pub(crate) increment: RoundingIncrement,
    pub(crate) rounding_mode: RoundingMode,
}

impl ResolvedRoundingOptions {
    pub(crate) fn from_diff_settings(
        options: DifferenceSettings,
        operation: DifferenceOperation,
        group: UnitGroup,
        fallback_largest: Unit,
        fallback_smallest: Unit,
    ) -> TemporalResult<(Sign, Self)> {
        let increment = options.increment.unwrap_or_default();
        let rounding_mode = options.rounding_mode.unwrap_or(RoundingMode::Trunc);
        // `since` rounds the negated difference, so the mode flips direction.
        let (sign, rounding_mode) = match operation {
            DifferenceOperation::Since => (Sign::Negative, rounding_mode.negate()),
            DifferenceOperation::Until => (Sign::Positive, rounding_mode),
        };

        let smallest_unit = options.smallest_unit.unwrap_or(fallback_smallest);
        if !group.contains(smallest_unit) {
            return Err(TemporalError::range().with_enum(match group {
                UnitGroup::Date => ErrorMessage::SmallestUnitNotDateUnit,
                _ => ErrorMessage::SmallestUnitNotTimeUnit,
            }));
        }

        let default_largest = smallest_unit.max(fallback_largest);
        let largest_unit = match options.largest_unit {
            Some(Unit::Auto) | None => default_largest,
            Some(unit) => unit,
        };
        if !group.contains(largest_unit) {
            return Err(TemporalError::range().with_enum(match group {
                UnitGroup::Date => ErrorMessage::LargestUnitNotDateUnit,
                _ => ErrorMessage::LargestUnitNotTimeUnit,
            }));
        }

        if largest_unit < smallest_unit {
            return Err(
                TemporalError::range().with_enum(ErrorMessage::SmallestUnitLargerThanLargestUnit)
            );
        }

        if let Some(max) = smallest_unit.to_maximum_rounding_increment() {
            increment.validate(max.into(), false)?;
        }

        let resolved = ResolvedRoundingOptions {
            largest_unit,
            smallest_unit,
            increment,
            rounding_mode,
        };

        Ok((sign, resolved))
    }

    pub(crate) fn from_duration_options(
        options: RoundingOptions,
        existing_largest: Unit,
    ) -> TemporalResult<Self> {
        if options.largest_unit.is_none() && options.smallest_unit.is_none() {
            return Err(TemporalError::range().with_enum(ErrorMessage::BothUnitsMissing));
        }

        let increment = options.increment.unwrap_or_default();
        let rounding_mode = options.rounding_mode.unwrap_or_default();
        let smallest_unit = match options.smallest_unit {
            Some(Unit::Auto) | None => Unit::Nanosecond,
            Some(unit) => unit,
        };

        let default_largest = existing_largest.max(smallest_unit);
        let largest_unit = match options.largest_unit {
            Some(Unit::Auto) | None => default_largest,
            Some(unit) => unit,
        };

        if largest_unit < smallest_unit {
            return Err(
                TemporalError::range().with_enum(ErrorMessage::SmallestUnitLargerThanLargestUnit)
            );
        }

        if let Some(max) = smallest_unit.to_maximum_rounding_increment() {
            increment.validate(max.into(), false)?;
        }

        if increment != RoundingIncrement::ONE
            && largest_unit != smallest_unit
            && smallest_unit.is_date_unit()
        {
            return Err(
                TemporalError::range().with_enum(ErrorMessage::RoundingIncrementWithCalendarUnit)
            );
        }

        Ok(Self {
            largest_unit,
            smallest_unit,
            increment,
            rounding_mode,
        })
    }

    /// Resolves the options for rounding a wall-clock time or date-time.
    pub(crate) fn from_dt_options(options: RoundingOptions) -> TemporalResult<Self> {
        let increment = options.increment.unwrap_or_default();
        let rounding_mode = options.rounding_mode.unwrap_or_default();
        let smallest_unit = options.smallest_unit.unwrap_or(Unit::Day);
        // A day is the coarsest unit of a wall-clock time: it can only round by one.
        let (maximum, inclusive) = if smallest_unit == Unit::Day {
            (1, true)
        } else {
            let maximum = smallest_unit
                .to_maximum_rounding_increment()
                .ok_or(TemporalError::range().with_enum(ErrorMessage::SmallestUnitNotTimeUnit))?;
            (maximum, false)
        };

        increment.validate(maximum.into(), inclusive)?;

        Ok(Self {
            largest_unit: Unit::Auto,
            smallest_unit,
            increment,
            rounding_mode,
        })
    }

    pub(crate) fn from_instant_options(options: RoundingOptions) -> TemporalResult<Self> {
        let increment = options.increment.unwrap_or_default();
        let rounding_mode = options.rounding_mode.unwrap_or_default();
        let Some(smallest_unit) = options.smallest_unit else {
            return Err(TemporalError::range()
                .with_message("smallestUnit is required when rounding an instant."));
        };
        let maximum = match smallest_unit {
            Unit::Hour => 24u64,
            Unit::Minute => 24 * 60,
            Unit::Second => 24 * 3600,
            Unit::Millisecond => MS_PER_DAY as u64,
            Unit::Microsecond => MS_PER_DAY as u64 * 1000,
            Unit::Nanosecond => NS_PER_DAY,
            _ => return Err(TemporalError::range().with_enum(ErrorMessage::SmallestUnitNotTimeUnit)),
        };

        increment.validate(maximum, true)?;

        Ok(Self {
            largest_unit: Unit::Auto,
            smallest_unit,
            increment,
            rounding_mode,
        })
    }

    #[inline]
    pub(crate) fn is_noop(&self) -> bool {
        self.smallest_unit == Unit::Nanosecond && self.increment == RoundingIncrement::ONE
    }

    /// Returns the rounding increment in nanoseconds for a day-time smallest unit.
    pub(crate) fn increment_nanoseconds(&self) -> TemporalResult<NonZeroU128> {
        let unit_nanos = self
            .smallest_unit
            .as_nanoseconds()
            .ok_or(TemporalError::range().with_enum(ErrorMessage::SmallestUnitNotTimeUnit))?;
        let unit_nanos = NonZeroU128::new(u128::from(unit_nanos)).ok_or(TemporalError::assert())?;
        Ok(self.increment.as_extended_increment().saturating_mul(unit_nanos))
    }
}

// ==== Options enums and methods ====

/// The relevant unit that should be used for the operation that
/// this option is provided as a value.
///
/// Units are ordered from finest to coarsest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Unit {
    /// The `Auto` unit
    Auto = 0,
    /// The `Nanosecond` unit
    Nanosecond,
    /// The `Microsecond` unit
    Microsecond,
    /// The `Millisecond` unit
    Millisecond,
    /// The `Second` unit
    Second,
    /// The `Minute` unit
    Minute,
    /// The `Hour` unit
    Hour,
    /// The `Day` unit
    Day,
    /// The `Week` unit
    Week,
    /// The `Month` unit
    Month,
    /// The `Year` unit
    Year,
}

impl Unit {
    /// Returns the largest rounding increment (exclusive) for the unit, or
    /// `None` when the increment is unbounded.
    #[inline]
    #[must_use]
    pub fn to_maximum_rounding_increment(self) -> Option<u32> {
        use Unit::{
            Auto, Day, Hour, Microsecond, Millisecond, Minute, Month, Nanosecond, Second, Week,
            Year,
        };
        let max = match self {
            Year | Month | Week | Day | Auto => return None,
            Hour => 24,
            Minute | Second => 60,
            Millisecond | Microsecond | Nanosecond => 1000,
        };

        Some(max)
    }

    /// Returns the nanosecond length of a day-time unit.
    #[must_use]
    pub fn as_nanoseconds(&self) -> Option<u64> {
        use Unit::{
            Auto, Day, Hour, Microsecond, Millisecond, Minute, Month, Nanosecond, Second, Week,
            Year,
        };
        match self {
            Year | Month | Week | Auto => None,
            Day => Some(NS_PER_DAY),
            Hour => Some(3_600_000_000_000),
            Minute => Some(60_000_000_000),
            Second => Some(1_000_000_000),
            Millisecond => Some(1_000_000),
            Microsecond => Some(1_000),
            Nanosecond => Some(1),
        }
    }

    /// Year, month and week: units whose length depends on the calendar.
    #[inline]
    #[must_use]
    pub fn is_calendar_unit(&self) -> bool {
        matches!(self, Self::Year | Self::Month | Self::Week)
    }

    #[inline]
    #[must_use]
    pub fn is_date_unit(&self) -> bool {
        matches!(self, Self::Year | Self::Month | Self::Week | Self::Day)
    }

    #[inline]
    #[must_use]
    pub fn is_time_unit(&self) -> bool {
        use Unit::{Hour, Microsecond, Millisecond, Minute, Nanosecond, Second};
        matches!(
            self,
            Hour | Minute | Second | Millisecond | Microsecond | Nanosecond
        )
    }
}

impl From<usize> for Unit {
    fn from(value: usize) -> Self {
        match value {
            10 => Self::Year,
            9 => Self::Month,
            8 => Self::Week,
            7 => Self::Day,
            6 => Self::Hour,
            5 => Self::Minute,
            4 => Self::Second,
            3 => Self::Millisecond,
            2 => Self::Microsecond,
            1 => Self::Nanosecond,
            _ => Self::Auto,
        }
    }
}

impl Add<usize> for Unit {
    type Output = Unit;

    fn add(self, rhs: usize) -> Self::Output {
        Unit::from(self as usize + rhs)
    }
}

/// A parsing error for `Unit`
#[derive(Debug, Clone, Copy)]
pub struct ParseUnitError;

impl fmt::Display for ParseUnitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("provided string was not a valid Unit")
    }
}

impl FromStr for Unit {
    type Err = ParseUnitError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "auto" => Ok(Self::Auto),
            "year" | "years" => Ok(Self::Year),
            "month" | "months" => Ok(Self::Month),
            "week" | "weeks" => Ok(Self::Week),
            "day" | "days" => Ok(Self::Day),
            "hour" | "hours" => Ok(Self::Hour),
            "minute" | "minutes" => Ok(Self::Minute),
            "second" | "seconds" => Ok(Self::Second),
            "millisecond" | "milliseconds" => Ok(Self::Millisecond),
            "microsecond" | "microseconds" => Ok(Self::Microsecond),
            "nanosecond" | "nanoseconds" => Ok(Self::Nanosecond),
            _ => Err(ParseUnitError),
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auto => "auto",
            Self::Year => "year",
            Self::Month => "month",
            Self::Week => "week",
            Self::Day => "day",
            Self::Hour => "hour",
            Self::Minute => "minute",
            Self::Second => "second",
            Self::Millisecond => "millisecond",
            Self::Microsecond => "microsecond",
            Self::Nanosecond => "nanosecond",
        }
        .fmt(f)
    }
}

/// `ArithmeticOverflow` is the policy applied when an addition produces a
/// day-of-month or month-of-year outside the calendar's bounds.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ArithmeticOverflow {
    /// Clamp to the calendar's bounds.
    #[default]
    Constrain,
    /// Fail with a range error.
    Reject,
}

/// A parsing error for `ArithmeticOverflow`
#[derive(Debug, Clone, Copy)]
pub struct ParseArithmeticOverflowError;

impl fmt::Display for ParseArithmeticOverflowError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("provided string was not a valid overflow value")
    }
}

impl FromStr for ArithmeticOverflow {
    type Err = ParseArithmeticOverflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "constrain" => Ok(Self::Constrain),
            "reject" => Ok(Self::Reject),
            _ => Err(ParseArithmeticOverflowError),
        }
    }
}

impl fmt::Display for ArithmeticOverflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Constrain => "constrain",
            Self::Reject => "reject",
        }
        .fmt(f)
    }
}

/// The disambiguation options for a local date-time that falls in a time
/// zone gap or fold.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Disambiguation {
    /// Compatible option
    ///
    /// Earlier for folds, later for gaps.
    #[default]
    Compatible,
    /// Earlier option
    Earlier,
    /// Later option
    Later,
    /// Reject option
    Reject,
}

/// A parsing error on `Disambiguation` options.
#[derive(Debug, Clone, Copy)]
pub struct ParseDisambiguationError;

impl fmt::Display for ParseDisambiguationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("provided string was not a valid Disambiguation value")
    }
}

impl FromStr for Disambiguation {
    type Err = ParseDisambiguationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "compatible" => Ok(Self::Compatible),
            "earlier" => Ok(Self::Earlier),
            "later" => Ok(Self::Later),
            "reject" => Ok(Self::Reject),
            _ => Err(ParseDisambiguationError),
        }
    }
}

impl fmt::Display for Disambiguation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compatible => "compatible",
            Self::Earlier => "earlier",
            Self::Later => "later",
            Self::Reject => "reject",
        }
        .fmt(f)
    }
}

/// Declares the specified `RoundingMode` for the operation.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum RoundingMode {
    /// Ceil RoundingMode
    Ceil,
    /// Floor RoundingMode
    Floor,
    /// Expand RoundingMode
    Expand,
    /// Truncate RoundingMode
    Trunc,
    /// HalfCeil RoundingMode
    HalfCeil,
    /// HalfFloor RoundingMode
    HalfFloor,
    /// HalfExpand RoundingMode - Default
    #[default]
    HalfExpand,
    /// HalfTruncate RoundingMode
    HalfTrunc,
    /// HalfEven RoundingMode
    HalfEven,
}

/// The `UnsignedRoundingMode`: a rounding mode applied to a magnitude.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsignedRoundingMode {
    /// `Infinity` `RoundingMode`
    Infinity,
    /// `Zero` `RoundingMode`
    Zero,
    /// `HalfInfinity` `RoundingMode`
    HalfInfinity,
    /// `HalfZero` `RoundingMode`
    HalfZero,
    /// `HalfEven` `RoundingMode`
    HalfEven,
}

impl RoundingMode {
    /// Inverts the current `RoundingMode` for a value whose sign has been
    /// flipped. Only the directional modes change.
    #[inline]
    #[must_use]
    pub const fn negate(self) -> Self {
        use RoundingMode::{
            Ceil, Expand, Floor, HalfCeil, HalfEven, HalfExpand, HalfFloor, HalfTrunc, Trunc,
        };

        match self {
            Ceil => Self::Floor,
            Floor => Self::Ceil,
            HalfCeil => Self::HalfFloor,
            HalfFloor => Self::HalfCeil,
            Trunc => Self::Trunc,
            Expand => Self::Expand,
            HalfTrunc => Self::HalfTrunc,
            HalfExpand => Self::HalfExpand,
            HalfEven => Self::HalfEven,
        }
    }

    /// Returns the `UnsignedRoundingMode` to apply to the magnitude of a
    /// value with the provided sign.
    #[inline]
    #[must_use]
    pub const fn get_unsigned_round_mode(self, is_positive: bool) -> UnsignedRoundingMode {
        use RoundingMode::{
            Ceil, Expand, Floor, HalfCeil, HalfEven, HalfExpand, HalfFloor, HalfTrunc, Trunc,
        };

        match self {
            Ceil if is_positive => UnsignedRoundingMode::Infinity,
            Ceil => UnsignedRoundingMode::Zero,
            Floor if is_positive => UnsignedRoundingMode::Zero,
            Floor => UnsignedRoundingMode::Infinity,
            Expand => UnsignedRoundingMode::Infinity,
            Trunc => UnsignedRoundingMode::Zero,
            HalfCeil if is_positive => UnsignedRoundingMode::HalfInfinity,
            HalfCeil => UnsignedRoundingMode::HalfZero,
            HalfFloor if is_positive => UnsignedRoundingMode::HalfZero,
            HalfFloor => UnsignedRoundingMode::HalfInfinity,
            HalfExpand => UnsignedRoundingMode::HalfInfinity,
            HalfTrunc => UnsignedRoundingMode::HalfZero,
            HalfEven => UnsignedRoundingMode::HalfEven,
        }
    }
}

impl FromStr for RoundingMode {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ceil" => Ok(Self::Ceil),
            "floor" => Ok(Self::Floor),
            "expand" => Ok(Self::Expand),
            "trunc" => Ok(Self::Trunc),
            "halfCeil" => Ok(Self::HalfCeil),
            "halfFloor" => Ok(Self::HalfFloor),
            "halfExpand" => Ok(Self::HalfExpand),
            "halfTrunc" => Ok(Self::HalfTrunc),
            "halfEven" => Ok(Self::HalfEven),
            _ => Err(TemporalError::range().with_message("RoundingMode not an accepted value.")),
        }
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ceil => "ceil",
            Self::Floor => "floor",
            Self::Expand => "expand",
            Self::Trunc => "trunc",
            Self::HalfCeil => "halfCeil",
            Self::HalfFloor => "halfFloor",
            Self::HalfExpand => "halfExpand",
            Self::HalfTrunc => "halfTrunc",
            Self::HalfEven => "halfEven",
        }
        .fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use core::str::FromStr;

    use super::{
        DifferenceOperation, DifferenceSettings, ResolvedRoundingOptions, RoundingIncrement,
        RoundingMode, RoundingOptions, Unit, UnitGroup,
    };
    use crate::{error::ErrorKind, Sign};

    #[test]
    fn unit_ordering_and_groups() {
        assert!(Unit::Nanosecond < Unit::Second);
        assert!(Unit::Day < Unit::Week);
        assert_eq!(Unit::Day + 1, Unit::Week);
        assert_eq!(Unit::Year + 1, Unit::Auto);
        assert!(Unit::Week.is_calendar_unit());
        assert!(!Unit::Day.is_calendar_unit());
        assert!(Unit::Day.is_date_unit());
        assert!(Unit::Hour.is_time_unit());
        assert_eq!(Unit::from_str("months").unwrap(), Unit::Month);
        assert!(Unit::from_str("fortnight").is_err());
    }

    #[test]
    fn negate_swaps_directional_modes() {
        assert_eq!(RoundingMode::Ceil.negate(), RoundingMode::Floor);
        assert_eq!(RoundingMode::HalfFloor.negate(), RoundingMode::HalfCeil);
        assert_eq!(RoundingMode::Trunc.negate(), RoundingMode::Trunc);
        assert_eq!(RoundingMode::HalfEven.negate(), RoundingMode::HalfEven);
        assert_eq!(
            RoundingMode::from_str("halfExpand").unwrap(),
            RoundingMode::default()
        );
    }

    #[test]
    fn diff_settings_resolution() {
        let (sign, resolved) = ResolvedRoundingOptions::from_diff_settings(
            DifferenceSettings::default(),
            DifferenceOperation::Since,
            UnitGroup::DateTime,
            Unit::Day,
            Unit::Nanosecond,
        )
        .unwrap();
        assert_eq!(sign, Sign::Negative);
        assert_eq!(resolved.largest_unit, Unit::Day);
        assert_eq!(resolved.rounding_mode, RoundingMode::Trunc);
        assert!(resolved.is_noop());

        let settings = DifferenceSettings {
            smallest_unit: Some(Unit::Month),
            rounding_mode: Some(RoundingMode::Floor),
            ..Default::default()
        };
        let (_, resolved) = ResolvedRoundingOptions::from_diff_settings(
            settings,
            DifferenceOperation::Since,
            UnitGroup::Date,
            Unit::Day,
            Unit::Day,
        )
        .unwrap();
        // The default largest unit grows to fit the smallest unit.
        assert_eq!(resolved.largest_unit, Unit::Month);
        assert_eq!(resolved.rounding_mode, RoundingMode::Ceil);

        let settings = DifferenceSettings {
            largest_unit: Some(Unit::Hour),
            smallest_unit: Some(Unit::Day),
            ..Default::default()
        };
        let err = ResolvedRoundingOptions::from_diff_settings(
            settings,
            DifferenceOperation::Until,
            UnitGroup::DateTime,
            Unit::Day,
            Unit::Nanosecond,
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Range);

        let settings = DifferenceSettings::with_largest_unit(Unit::Hour);
        assert!(ResolvedRoundingOptions::from_diff_settings(
            settings,
            DifferenceOperation::Until,
            UnitGroup::Date,
            Unit::Day,
            Unit::Day,
        )
        .is_err());
    }

    #[test]
    fn increment_must_divide_next_unit() {
        for (increment, ok) in [(15, true), (7, false), (60, false), (30, true)] {
            let settings = DifferenceSettings {
                smallest_unit: Some(Unit::Minute),
                increment: Some(RoundingIncrement::try_new(increment).unwrap()),
                ..Default::default()
            };
            let result = ResolvedRoundingOptions::from_diff_settings(
                settings,
                DifferenceOperation::Until,
                UnitGroup::DateTime,
                Unit::Day,
                Unit::Nanosecond,
            );
            assert_eq!(result.is_ok(), ok, "increment {increment}");
        }
    }

    #[test]
    fn duration_options_resolution() {
        let options = RoundingOptions {
            largest_unit: None,
            smallest_unit: None,
            ..Default::default()
        };
        assert!(ResolvedRoundingOptions::from_duration_options(options, Unit::Hour).is_err());

        let options = RoundingOptions {
            smallest_unit: Some(Unit::Minute),
            ..Default::default()
        };
        let resolved = ResolvedRoundingOptions::from_duration_options(options, Unit::Day).unwrap();
        assert_eq!(resolved.largest_unit, Unit::Day);
        assert_eq!(resolved.rounding_mode, RoundingMode::HalfExpand);

        let options = RoundingOptions {
            largest_unit: Some(Unit::Year),
            smallest_unit: Some(Unit::Month),
            increment: Some(RoundingIncrement::try_new(3).unwrap()),
            ..Default::default()
        };
        assert!(ResolvedRoundingOptions::from_duration_options(options, Unit::Day).is_err());
    }

    #[test]
    fn date_time_rounding_day_increment_is_one() {
        let options = RoundingOptions {
            smallest_unit: Some(Unit::Day),
            increment: Some(RoundingIncrement::try_new(2).unwrap()),
            ..Default::default()
        };
        assert!(ResolvedRoundingOptions::from_dt_options(options).is_err());
        let options = RoundingOptions {
            smallest_unit: Some(Unit::Day),
            ..Default::default()
        };
        assert!(ResolvedRoundingOptions::from_dt_options(options).is_ok());
    }
}
