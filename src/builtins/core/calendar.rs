//! This module implements the calendar capability interface and the
//! calendars that ship with the crate.
//!
//! The arithmetic engines never branch on which calendar is active: they
//! only call [`CalendarMethods`]. A calendar supplies its field conversions
//! and its month and year lengths, and the provided methods build date
//! addition and date difference on top of them.

use core::{fmt, str::FromStr};

use icu_calendar::{
    types::DateFields as IcuDateFields, AnyCalendar, AnyCalendarKind, Date as IcuDate, Iso,
};
use tinystr::TinyAsciiStr;

use crate::{
    builtins::core::duration::DateDuration,
    error::ErrorMessage,
    iso::{IsoDate, MAX_ISO_YEAR, MIN_ISO_YEAR},
    options::{ArithmeticOverflow, Unit},
    utils, TemporalError, TemporalResult,
};

/// The calendar-relative year, ordinal month and day of a date.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDateFields {
    pub year: i32,
    /// The ordinal month, starting at 1.
    pub month: u8,
    pub day: u8,
}

impl CalendarDateFields {
    #[inline]
    #[must_use]
    pub const fn new(year: i32, month: u8, day: u8) -> Self {
        Self { year, month, day }
    }
}

/// A month code, such as `M01` or the leap month `M05L`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MonthCode(pub(crate) TinyAsciiStr<4>);

impl MonthCode {
    /// Creates the month code of a common (non-leap) month.
    pub fn from_ordinal(month: u8) -> TemporalResult<Self> {
        if !(1..=13).contains(&month) {
            return Err(TemporalError::range().with_enum(ErrorMessage::MonthOutOfRange));
        }
        let bytes = [b'M', b'0' + month / 10, b'0' + month % 10];
        TinyAsciiStr::try_from_utf8(&bytes)
            .map(Self)
            .map_err(|_| TemporalError::assert())
    }

    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    /// Returns whether this is the code of a leap month.
    #[inline]
    #[must_use]
    pub fn is_leap_month(&self) -> bool {
        self.0.len() == 4 && self.0.as_str().ends_with('L')
    }
}

impl fmt::Display for MonthCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The capability interface of a calendar.
///
/// Implementors supply the field conversions and the month and year
/// lengths. Date addition (`date_add`) and date difference (`date_until`)
/// are provided on top of them, and may be overridden when a calendar has a
/// faster closed form.
pub trait CalendarMethods {
    /// The calendar identifier, such as `iso8601` or `hebrew`.
    fn identifier(&self) -> &str;

    /// Returns the calendar fields of an ISO date.
    fn calendar_fields(&self, date: &IsoDate) -> TemporalResult<CalendarDateFields>;

    /// Returns the ISO date of valid calendar fields.
    fn iso_from_fields(&self, fields: CalendarDateFields) -> TemporalResult<IsoDate>;

    /// Returns the number of days in the month of the calendar year.
    fn days_in_month(&self, year: i32, month: u8) -> TemporalResult<u8>;

    /// Returns the number of months in the calendar year.
    fn months_in_year(&self, year: i32) -> TemporalResult<u8>;

    /// Returns the month code of a date.
    fn month_code(&self, date: &IsoDate) -> TemporalResult<MonthCode> {
        MonthCode::from_ordinal(self.calendar_fields(date)?.month)
    }

    /// Moves a calendar year and month by a count of months.
    fn add_months(&self, year: i32, month: u8, months: i64) -> TemporalResult<(i32, u8)> {
        let (mut year, mut month) = (year, i64::from(month) + months);
        loop {
            let months_in_year = i64::from(self.months_in_year(year)?);
            if month > months_in_year {
                month -= months_in_year;
                year += 1;
            } else if month < 1 {
                year -= 1;
                month += i64::from(self.months_in_year(year)?);
            } else {
                break;
            }
            // The walk is bounded by the representable years.
            if !(MIN_ISO_YEAR - 1..=MAX_ISO_YEAR + 1).contains(&year) {
                return Err(TemporalError::range().with_enum(ErrorMessage::DateOutOfRange));
            }
        }
        Ok((year, month as u8))
    }

    /// Returns the number of months in the `years` years starting at
    /// `year`. The count is negative for a negative span, covering the
    /// years before `year`.
    fn months_in_year_span(&self, year: i32, years: i64) -> TemporalResult<i64> {
        let end = i64::from(year) + years;
        if !(i64::from(MIN_ISO_YEAR) - 1..=i64::from(MAX_ISO_YEAR) + 1).contains(&end) {
            return Err(TemporalError::range().with_enum(ErrorMessage::DateOutOfRange));
        }
        let end = end as i32;
        let mut months = 0i64;
        if years >= 0 {
            for y in year..end {
                months += i64::from(self.months_in_year(y)?);
            }
        } else {
            for y in end..year {
                months -= i64::from(self.months_in_year(y)?);
            }
        }
        Ok(months)
    }

    /// Adds a date duration to a date.
    ///
    /// Years are added first and the month is regulated against the new
    /// year; months are added next and the day is regulated against the new
    /// month. Weeks and days are added last as exact days.
    fn date_add(
        &self,
        date: &IsoDate,
        duration: &DateDuration,
        overflow: ArithmeticOverflow,
    ) -> TemporalResult<IsoDate> {
        let mut intermediate = *date;
        if duration.years != 0 || duration.months != 0 {
            let fields = self.calendar_fields(date)?;
            let year = i32::try_from(i64::from(fields.year) + duration.years)
                .map_err(|_| TemporalError::range().with_enum(ErrorMessage::DateOutOfRange))?;

            let months_in_year = self.months_in_year(year)?;
            let month = regulate(fields.month, months_in_year, overflow, ErrorMessage::MonthOutOfRange)?;
            let (year, month) = self.add_months(year, month, duration.months)?;

            let days_in_month = self.days_in_month(year, month)?;
            let day = regulate(fields.day, days_in_month, overflow, ErrorMessage::DayOutOfRange)?;
            intermediate = self.iso_from_fields(CalendarDateFields::new(year, month, day))?;
        }

        let days = duration
            .weeks
            .checked_mul(7)
            .and_then(|days| days.checked_add(duration.days))
            .ok_or(TemporalError::range().with_enum(ErrorMessage::DateOutOfRange))?;
        let result = IsoDate::from_epoch_days(intermediate.to_epoch_days().saturating_add(days));
        result.check_within_limits()?;
        Ok(result)
    }

    /// Returns the date duration from `one` to `two`, in units no larger
    /// than `largest_unit`.
    ///
    /// For a year or month largest unit, the year and month differences are
    /// corrected until they agree in sign with the day difference, then the
    /// remaining days are counted exactly from the constrained intermediate
    /// date.
    fn date_until(
        &self,
        one: &IsoDate,
        two: &IsoDate,
        largest_unit: Unit,
    ) -> TemporalResult<DateDuration> {
        if largest_unit < Unit::Month {
            let days = two.to_epoch_days() - one.to_epoch_days();
            if largest_unit == Unit::Week {
                return Ok(DateDuration::new_unchecked(0, 0, days / 7, days % 7));
            }
            return Ok(DateDuration::new_unchecked(0, 0, 0, days));
        }

        if one == two {
            return Ok(DateDuration::default());
        }

        let start = self.calendar_fields(one)?;
        let end = self.calendar_fields(two)?;
        let (mut years, mut months) = self.diff_years_and_months(start, end)?;

        if largest_unit == Unit::Month {
            months += self.months_in_year_span(start.year, years)?;
            years = 0;
        }

        let intermediate = self.date_add(
            one,
            &DateDuration::new_unchecked(years, months, 0, 0),
            ArithmeticOverflow::Constrain,
        )?;
        let days = two.to_epoch_days() - intermediate.to_epoch_days();

        Ok(DateDuration::new_unchecked(years, months, 0, days))
    }

    #[doc(hidden)]
    fn diff_years_and_months(
        &self,
        start: CalendarDateFields,
        end: CalendarDateFields,
    ) -> TemporalResult<(i64, i64)> {
        let (start_month, start_day) = (i64::from(start.month), i64::from(start.day));
        let (mut end_year, mut end_month) = (end.year, end.month);

        let mut diff = YearMonthDayDiff::default();
        diff.update_year_month(self, start.year, start_month, end_year, end_month)?;
        diff.update_day(self, start_day, end_year, end_month, end.day)?;

        let day_sign = diff.days.signum();
        let sign = match (diff.years.signum(), diff.months.signum()) {
            (0, 0) => day_sign,
            (0, month_sign) => month_sign,
            (year_sign, _) => year_sign,
        };

        if sign != 0 {
            if day_sign == -sign {
                // The end day is short of the start day: borrow one month.
                let old_days_in_month = diff.days_in_month;
                (end_year, end_month) = self.add_months(end_year, end_month, -sign)?;
                diff.update_year_month(self, start.year, start_month, end_year, end_month)?;
                diff.update_day(self, start_day, end_year, end_month, end.day)?;
                diff.days += if sign < 0 {
                    -old_days_in_month
                } else {
                    diff.days_in_month
                };
            }

            if diff.months.signum() == -sign {
                // The end month is short of the start month: borrow one year.
                let old_months_in_year = diff.months_in_year;
                end_year -= sign as i32;
                diff.update_year_month(self, start.year, start_month, end_year, end_month)?;
                diff.months += if sign < 0 {
                    -old_months_in_year
                } else {
                    diff.months_in_year
                };
            }
        }

        Ok((diff.years, diff.months))
    }

    /// Returns the ISO day of the week, where Monday is 1 and Sunday is 7.
    fn day_of_week(&self, date: &IsoDate) -> u8 {
        date.day_of_week()
    }

    /// Returns the ordinal day of the calendar year.
    fn day_of_year(&self, date: &IsoDate) -> TemporalResult<u16> {
        let fields = self.calendar_fields(date)?;
        let first = self.iso_from_fields(CalendarDateFields::new(fields.year, 1, 1))?;
        Ok((date.to_epoch_days() - first.to_epoch_days() + 1) as u16)
    }

    /// Returns the number of days in the calendar year.
    fn days_in_year(&self, year: i32) -> TemporalResult<u16> {
        let mut days = 0u16;
        for month in 1..=self.months_in_year(year)? {
            days += u16::from(self.days_in_month(year, month)?);
        }
        Ok(days)
    }

    /// Returns the week of the year, for calendars that define weeks.
    fn week_of_year(&self, _date: &IsoDate) -> Option<u8> {
        None
    }

    /// Returns the week-numbering year, for calendars that define weeks.
    fn year_of_week(&self, _date: &IsoDate) -> Option<i32> {
        None
    }
}

/// The running year, month and day differences of a date difference,
/// together with the month and year lengths at the end date.
#[derive(Debug, Default)]
struct YearMonthDayDiff {
    years: i64,
    months: i64,
    days: i64,
    months_in_year: i64,
    days_in_month: i64,
}

impl YearMonthDayDiff {
    fn update_year_month<C: CalendarMethods + ?Sized>(
        &mut self,
        calendar: &C,
        start_year: i32,
        start_month: i64,
        end_year: i32,
        end_month: u8,
    ) -> TemporalResult<()> {
        self.years = i64::from(end_year) - i64::from(start_year);
        self.months_in_year = i64::from(calendar.months_in_year(end_year)?);
        self.months = i64::from(end_month) - start_month.min(self.months_in_year);
        Ok(())
    }

    fn update_day<C: CalendarMethods + ?Sized>(
        &mut self,
        calendar: &C,
        start_day: i64,
        end_year: i32,
        end_month: u8,
        end_day: u8,
    ) -> TemporalResult<()> {
        self.days_in_month = i64::from(calendar.days_in_month(end_year, end_month)?);
        self.days = i64::from(end_day) - start_day.min(self.days_in_month);
        Ok(())
    }
}

#[inline]
fn regulate(
    value: u8,
    max: u8,
    overflow: ArithmeticOverflow,
    message: ErrorMessage,
) -> TemporalResult<u8> {
    if value <= max {
        return Ok(value);
    }
    match overflow {
        ArithmeticOverflow::Constrain => Ok(max),
        ArithmeticOverflow::Reject => Err(TemporalError::range().with_enum(message)),
    }
}

// ==== IsoCalendar ====

/// The proleptic Gregorian ISO 8601 calendar.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct IsoCalendar;

impl CalendarMethods for IsoCalendar {
    fn identifier(&self) -> &str {
        "iso8601"
    }

    fn calendar_fields(&self, date: &IsoDate) -> TemporalResult<CalendarDateFields> {
        Ok(CalendarDateFields::new(date.year, date.month, date.day))
    }

    fn iso_from_fields(&self, fields: CalendarDateFields) -> TemporalResult<IsoDate> {
        IsoDate::regulate(
            fields.year,
            fields.month.into(),
            fields.day.into(),
            ArithmeticOverflow::Reject,
        )
    }

    fn days_in_month(&self, year: i32, month: u8) -> TemporalResult<u8> {
        if !(1..=12).contains(&month) {
            return Err(TemporalError::range().with_enum(ErrorMessage::MonthOutOfRange));
        }
        Ok(utils::iso_days_in_month(year, month))
    }

    fn months_in_year(&self, _year: i32) -> TemporalResult<u8> {
        Ok(12)
    }

    fn add_months(&self, year: i32, month: u8, months: i64) -> TemporalResult<(i32, u8)> {
        Ok(IsoDate::balance_year_month(year, i64::from(month) + months))
    }

    fn months_in_year_span(&self, _year: i32, years: i64) -> TemporalResult<i64> {
        Ok(years * 12)
    }

    fn date_add(
        &self,
        date: &IsoDate,
        duration: &DateDuration,
        overflow: ArithmeticOverflow,
    ) -> TemporalResult<IsoDate> {
        date.add_date_duration(duration, overflow)
    }

    fn day_of_year(&self, date: &IsoDate) -> TemporalResult<u16> {
        Ok(date.day_of_year())
    }

    fn days_in_year(&self, year: i32) -> TemporalResult<u16> {
        Ok(utils::iso_days_in_year(year))
    }

    fn week_of_year(&self, date: &IsoDate) -> Option<u8> {
        Some(date.iso_week_of_year().1)
    }

    fn year_of_week(&self, date: &IsoDate) -> Option<i32> {
        Some(date.iso_week_of_year().0)
    }
}

// ==== IcuCalendar ====

/// A non-ISO calendar delegated to `icu_calendar`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IcuCalendar(AnyCalendarKind);

impl IcuCalendar {
    /// Resolves a calendar identifier, such as `hebrew` or `islamic-civil`.
    pub fn try_from_identifier(identifier: &str) -> TemporalResult<Self> {
        let kind = match identifier.to_ascii_lowercase().as_str() {
            "buddhist" => AnyCalendarKind::Buddhist,
            "chinese" => AnyCalendarKind::Chinese,
            "coptic" => AnyCalendarKind::Coptic,
            "dangi" => AnyCalendarKind::Dangi,
            "ethioaa" => AnyCalendarKind::EthiopianAmeteAlem,
            "ethiopic" => AnyCalendarKind::Ethiopian,
            "gregory" => AnyCalendarKind::Gregorian,
            "hebrew" => AnyCalendarKind::Hebrew,
            "indian" => AnyCalendarKind::Indian,
            "islamic-civil" => AnyCalendarKind::HijriTabularTypeIIFriday,
            "islamic-rgsa" => AnyCalendarKind::HijriSimulatedMecca,
            "islamic-tbla" => AnyCalendarKind::HijriTabularTypeIIThursday,
            "islamic-umalqura" => AnyCalendarKind::HijriUmmAlQura,
            "japanese" => AnyCalendarKind::Japanese,
            "persian" => AnyCalendarKind::Persian,
            "roc" => AnyCalendarKind::Roc,
            _ => return Err(TemporalError::range().with_message("Not a builtin calendar.")),
        };
        Ok(Self(kind))
    }

    #[inline]
    #[must_use]
    pub fn kind(&self) -> AnyCalendarKind {
        self.0
    }

    fn date_from_iso(&self, date: &IsoDate) -> TemporalResult<IcuDate<AnyCalendar>> {
        let iso = IcuDate::try_new_iso(date.year, date.month, date.day)
            .map_err(|_| TemporalError::range().with_enum(ErrorMessage::InvalidIsoDate))?;
        Ok(iso.to_any().to_calendar(AnyCalendar::new(self.0)))
    }

    fn date_from_fields(&self, fields: CalendarDateFields) -> TemporalResult<IcuDate<AnyCalendar>> {
        let mut icu_fields = IcuDateFields::default();
        icu_fields.extended_year = Some(fields.year);
        icu_fields.ordinal_month = Some(fields.month);
        icu_fields.day = Some(fields.day);
        IcuDate::try_from_fields(icu_fields, Default::default(), AnyCalendar::new(self.0))
            .map_err(|_| TemporalError::range().with_message("Invalid calendar fields."))
    }
}

impl CalendarMethods for IcuCalendar {
    fn identifier(&self) -> &str {
        match self.0 {
            AnyCalendarKind::Buddhist => "buddhist",
            AnyCalendarKind::Chinese => "chinese",
            AnyCalendarKind::Coptic => "coptic",
            AnyCalendarKind::Dangi => "dangi",
            AnyCalendarKind::EthiopianAmeteAlem => "ethioaa",
            AnyCalendarKind::Ethiopian => "ethiopic",
            AnyCalendarKind::Gregorian => "gregory",
            AnyCalendarKind::Hebrew => "hebrew",
            AnyCalendarKind::Indian => "indian",
            AnyCalendarKind::HijriTabularTypeIIFriday => "islamic-civil",
            AnyCalendarKind::HijriSimulatedMecca => "islamic-rgsa",
            AnyCalendarKind::HijriTabularTypeIIThursday => "islamic-tbla",
            AnyCalendarKind::HijriUmmAlQura => "islamic-umalqura",
            AnyCalendarKind::Japanese => "japanese",
            AnyCalendarKind::Persian => "persian",
            AnyCalendarKind::Roc => "roc",
            _ => "iso8601",
        }
    }

    fn calendar_fields(&self, date: &IsoDate) -> TemporalResult<CalendarDateFields> {
        let date = self.date_from_iso(date)?;
        Ok(CalendarDateFields::new(
            date.year().extended_year(),
            date.month().ordinal,
            date.day_of_month().0,
        ))
    }

    fn iso_from_fields(&self, fields: CalendarDateFields) -> TemporalResult<IsoDate> {
        let iso = self.date_from_fields(fields)?.to_calendar(Iso);
        Ok(IsoDate::new_unchecked(
            iso.year().extended_year(),
            iso.month().ordinal,
            iso.day_of_month().0,
        ))
    }

    fn days_in_month(&self, year: i32, month: u8) -> TemporalResult<u8> {
        Ok(self
            .date_from_fields(CalendarDateFields::new(year, month, 1))?
            .days_in_month())
    }

    fn months_in_year(&self, year: i32) -> TemporalResult<u8> {
        Ok(self
            .date_from_fields(CalendarDateFields::new(year, 1, 1))?
            .months_in_year())
    }

    fn month_code(&self, date: &IsoDate) -> TemporalResult<MonthCode> {
        Ok(MonthCode(self.date_from_iso(date)?.month().to_input().code().0))
    }

    fn day_of_year(&self, date: &IsoDate) -> TemporalResult<u16> {
        Ok(self.date_from_iso(date)?.day_of_year().0)
    }

    fn days_in_year(&self, year: i32) -> TemporalResult<u16> {
        Ok(self
            .date_from_fields(CalendarDateFields::new(year, 1, 1))?
            .days_in_year())
    }
}

// ==== Calendar ====

/// The closed set of calendars known to the crate.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Calendar {
    #[default]
    Iso,
    Icu(IcuCalendar),
}

impl Calendar {
    #[inline]
    #[must_use]
    pub fn is_iso(&self) -> bool {
        matches!(self, Self::Iso)
    }

    fn methods(&self) -> &dyn CalendarMethods {
        match self {
            Self::Iso => &IsoCalendar,
            Self::Icu(calendar) => calendar,
        }
    }
}

impl FromStr for Calendar {
    type Err = TemporalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("iso8601") {
            return Ok(Self::Iso);
        }
        IcuCalendar::try_from_identifier(s).map(Self::Icu)
    }
}

impl CalendarMethods for Calendar {
    fn identifier(&self) -> &str {
        self.methods().identifier()
    }

    fn calendar_fields(&self, date: &IsoDate) -> TemporalResult<CalendarDateFields> {
        self.methods().calendar_fields(date)
    }

    fn iso_from_fields(&self, fields: CalendarDateFields) -> TemporalResult<IsoDate> {
        self.methods().iso_from_fields(fields)
    }

    fn days_in_month(&self, year: i32, month: u8) -> TemporalResult<u8> {
        self.methods().days_in_month(year, month)
    }

    fn months_in_year(&self, year: i32) -> TemporalResult<u8> {
        self.methods().months_in_year(year)
    }

    fn month_code(&self, date: &IsoDate) -> TemporalResult<MonthCode> {
        self.methods().month_code(date)
    }

    fn add_months(&self, year: i32, month: u8, months: i64) -> TemporalResult<(i32, u8)> {
        self.methods().add_months(year, month, months)
    }

    fn months_in_year_span(&self, year: i32, years: i64) -> TemporalResult<i64> {
        self.methods().months_in_year_span(year, years)
    }

    fn date_add(
        &self,
        date: &IsoDate,
        duration: &DateDuration,
        overflow: ArithmeticOverflow,
    ) -> TemporalResult<IsoDate> {
        self.methods().date_add(date, duration, overflow)
    }

    fn date_until(
        &self,
        one: &IsoDate,
        two: &IsoDate,
        largest_unit: Unit,
    ) -> TemporalResult<DateDuration> {
        self.methods().date_until(one, two, largest_unit)
    }

    fn day_of_year(&self, date: &IsoDate) -> TemporalResult<u16> {
        self.methods().day_of_year(date)
    }

    fn days_in_year(&self, year: i32) -> TemporalResult<u16> {
        self.methods().days_in_year(year)
    }

    fn week_of_year(&self, date: &IsoDate) -> Option<u8> {
        self.methods().week_of_year(date)
    }

    fn year_of_week(&self, date: &IsoDate) -> Option<i32> {
        self.methods().year_of_week(date)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use core::str::FromStr;

    use super::{Calendar, CalendarDateFields, CalendarMethods, IcuCalendar, IsoCalendar, MonthCode};
    use crate::{
        builtins::core::duration::DateDuration,
        iso::IsoDate,
        options::{ArithmeticOverflow, Unit},
        TemporalResult,
    };

    /// A calendar of thirteen 28-day months, with years that start on the
    /// ISO epoch day of their year count. Nothing about it matches ISO, so
    /// arithmetic through it only works if it goes through the trait.
    #[derive(Debug, Clone, Copy)]
    pub(crate) struct FixedCalendar;

    impl FixedCalendar {
        pub(crate) fn date(year: i32, month: u8, day: u8) -> IsoDate {
            FixedCalendar
                .iso_from_fields(CalendarDateFields::new(year, month, day))
                .unwrap()
        }
    }

    impl CalendarMethods for FixedCalendar {
        fn identifier(&self) -> &str {
            "fixed"
        }

        fn calendar_fields(&self, date: &IsoDate) -> TemporalResult<CalendarDateFields> {
            let days = date.to_epoch_days();
            let year = days.div_euclid(364);
            let day_of_year = days.rem_euclid(364);
            Ok(CalendarDateFields::new(
                year as i32,
                (day_of_year / 28) as u8 + 1,
                (day_of_year % 28) as u8 + 1,
            ))
        }

        fn iso_from_fields(&self, fields: CalendarDateFields) -> TemporalResult<IsoDate> {
            let days = i64::from(fields.year) * 364
                + (i64::from(fields.month) - 1) * 28
                + i64::from(fields.day)
                - 1;
            Ok(IsoDate::from_epoch_days(days))
        }

        fn days_in_month(&self, _year: i32, _month: u8) -> TemporalResult<u8> {
            Ok(28)
        }

        fn months_in_year(&self, _year: i32) -> TemporalResult<u8> {
            Ok(13)
        }
    }

    fn iso(year: i32, month: u8, day: u8) -> IsoDate {
        IsoDate::new_unchecked(year, month, day)
    }

    #[test]
    fn calendar_from_str_is_case_insensitive() {
        assert_eq!(Calendar::from_str("iSo8601").unwrap(), Calendar::default());
        assert_eq!(
            Calendar::from_str("Hebrew").unwrap().identifier(),
            "hebrew"
        );
        assert!(Calendar::from_str("\u{0130}SO8601").is_err());
        assert!(Calendar::from_str("").is_err());
    }

    #[test]
    fn month_codes() {
        assert_eq!(MonthCode::from_ordinal(1).unwrap().as_str(), "M01");
        assert_eq!(MonthCode::from_ordinal(12).unwrap().as_str(), "M12");
        assert!(MonthCode::from_ordinal(0).is_err());
        assert!(!MonthCode::from_ordinal(5).unwrap().is_leap_month());
        assert_eq!(
            IsoCalendar.month_code(&iso(2024, 7, 4)).unwrap().as_str(),
            "M07"
        );
    }

    #[test]
    fn date_until_largest_year() {
        // tests format: (Date one, Date two, (years, months, weeks, days))
        let tests = [
            ((2021, 7, 16), (2021, 7, 16), (0, 0, 0, 0)),
            ((2021, 7, 16), (2021, 7, 17), (0, 0, 0, 1)),
            ((2021, 7, 16), (2021, 7, 23), (0, 0, 0, 7)),
            ((2021, 7, 16), (2021, 8, 16), (0, 1, 0, 0)),
            ((2020, 12, 16), (2021, 1, 16), (0, 1, 0, 0)),
            ((2021, 1, 5), (2021, 2, 5), (0, 1, 0, 0)),
            ((2021, 1, 7), (2021, 3, 7), (0, 2, 0, 0)),
            ((2021, 7, 16), (2021, 8, 17), (0, 1, 0, 1)),
            ((2021, 7, 16), (2021, 8, 13), (0, 0, 0, 28)),
            ((2021, 7, 16), (2021, 9, 16), (0, 2, 0, 0)),
            ((2021, 7, 16), (2022, 7, 16), (1, 0, 0, 0)),
            ((2021, 7, 16), (2031, 7, 16), (10, 0, 0, 0)),
            ((2021, 7, 16), (2022, 7, 19), (1, 0, 0, 3)),
            ((2021, 7, 16), (2022, 9, 19), (1, 2, 0, 3)),
            ((2021, 7, 16), (2031, 12, 16), (10, 5, 0, 0)),
            ((1997, 12, 16), (2021, 7, 16), (23, 7, 0, 0)),
            ((1997, 7, 16), (2021, 7, 16), (24, 0, 0, 0)),
            ((1997, 7, 16), (2021, 7, 15), (23, 11, 0, 29)),
            ((1997, 6, 16), (2021, 6, 15), (23, 11, 0, 30)),
            ((1960, 2, 16), (2020, 3, 16), (60, 1, 0, 0)),
            ((1960, 2, 16), (2021, 3, 15), (61, 0, 0, 27)),
            ((1960, 2, 16), (2020, 3, 15), (60, 0, 0, 28)),
            ((2021, 3, 30), (2021, 7, 16), (0, 3, 0, 16)),
            ((2020, 3, 30), (2021, 7, 16), (1, 3, 0, 16)),
            ((1960, 3, 30), (2021, 7, 16), (61, 3, 0, 16)),
            ((2019, 12, 30), (2021, 7, 16), (1, 6, 0, 16)),
            ((2020, 12, 30), (2021, 7, 16), (0, 6, 0, 16)),
            ((1997, 12, 30), (2021, 7, 16), (23, 6, 0, 16)),
            ((1, 12, 25), (2021, 7, 16), (2019, 6, 0, 21)),
            ((2019, 12, 30), (2021, 3, 5), (1, 2, 0, 5)),
            ((2021, 7, 17), (2021, 7, 16), (0, 0, 0, -1)),
            ((2021, 7, 23), (2021, 7, 16), (0, 0, 0, -7)),
            ((2021, 8, 16), (2021, 7, 16), (0, -1, 0, 0)),
            ((2021, 1, 16), (2020, 12, 16), (0, -1, 0, 0)),
            ((2021, 2, 5), (2021, 1, 5), (0, -1, 0, 0)),
            ((2021, 3, 7), (2021, 1, 7), (0, -2, 0, 0)),
            ((2021, 8, 17), (2021, 7, 16), (0, -1, 0, -1)),
            ((2021, 8, 13), (2021, 7, 16), (0, 0, 0, -28)),
            ((2021, 9, 16), (2021, 7, 16), (0, -2, 0, 0)),
            ((2022, 7, 16), (2021, 7, 16), (-1, 0, 0, 0)),
            ((2031, 7, 16), (2021, 7, 16), (-10, 0, 0, 0)),
            ((2022, 7, 19), (2021, 7, 16), (-1, 0, 0, -3)),
            ((2022, 9, 19), (2021, 7, 16), (-1, -2, 0, -3)),
            ((2031, 12, 16), (2021, 7, 16), (-10, -5, 0, 0)),
            ((2021, 7, 16), (1997, 12, 16), (-23, -7, 0, 0)),
            ((2021, 7, 16), (1997, 7, 16), (-24, 0, 0, 0)),
            ((2021, 7, 15), (1997, 7, 16), (-23, -11, 0, -30)),
            ((2021, 6, 15), (1997, 6, 16), (-23, -11, 0, -29)),
            ((2020, 3, 16), (1960, 2, 16), (-60, -1, 0, 0)),
            ((2021, 3, 15), (1960, 2, 16), (-61, 0, 0, -28)),
            ((2020, 3, 15), (1960, 2, 16), (-60, 0, 0, -28)),
            ((2021, 7, 16), (2021, 3, 30), (0, -3, 0, -17)),
            ((2021, 7, 16), (2020, 3, 30), (-1, -3, 0, -17)),
            ((2021, 7, 16), (1960, 3, 30), (-61, -3, 0, -17)),
            ((2021, 7, 16), (2019, 12, 30), (-1, -6, 0, -17)),
            ((2021, 7, 16), (2020, 12, 30), (0, -6, 0, -17)),
            ((2021, 7, 16), (1997, 12, 30), (-23, -6, 0, -17)),
            ((2021, 7, 16), (1, 12, 25), (-2019, -6, 0, -22)),
            ((2021, 3, 5), (2019, 12, 30), (-1, -2, 0, -6)),
        ];

        for (one, two, expected) in tests {
            let first = iso(one.0, one.1, one.2);
            let second = iso(two.0, two.1, two.2);
            let result = IsoCalendar.date_until(&first, &second, Unit::Year).unwrap();
            assert_eq!(
                (result.years, result.months, result.weeks, result.days),
                expected,
                "date_until {one:?} -> {two:?}"
            );
        }
    }

    #[test]
    fn date_until_smaller_largest_units() {
        let one = iso(2023, 11, 15);
        let two = iso(2024, 2, 10);
        let months = IsoCalendar.date_until(&one, &two, Unit::Month).unwrap();
        assert_eq!(months, DateDuration::new_unchecked(0, 2, 0, 26));

        let weeks = IsoCalendar.date_until(&one, &two, Unit::Week).unwrap();
        assert_eq!(weeks, DateDuration::new_unchecked(0, 0, 12, 3));
        let weeks = IsoCalendar.date_until(&two, &one, Unit::Week).unwrap();
        assert_eq!(weeks, DateDuration::new_unchecked(0, 0, -12, -3));

        let days = IsoCalendar.date_until(&one, &two, Unit::Day).unwrap();
        assert_eq!(days, DateDuration::new_unchecked(0, 0, 0, 87));

        let months = IsoCalendar
            .date_until(&iso(2020, 5, 1), &iso(2018, 3, 1), Unit::Month)
            .unwrap();
        assert_eq!(months, DateDuration::new_unchecked(0, -26, 0, 0));
    }

    #[test]
    fn month_end_overshoot_uses_constrained_month() {
        let result = IsoCalendar
            .date_until(&iso(2024, 1, 31), &iso(2024, 3, 1), Unit::Month)
            .unwrap();
        assert_eq!(result, DateDuration::new_unchecked(0, 1, 0, 1));

        let result = IsoCalendar
            .date_until(&iso(2023, 1, 30), &iso(2023, 2, 28), Unit::Month)
            .unwrap();
        assert_eq!(result, DateDuration::new_unchecked(0, 1, 0, 0));

        let result = IsoCalendar
            .date_until(&iso(2024, 3, 1), &iso(2024, 1, 31), Unit::Month)
            .unwrap();
        assert_eq!(result, DateDuration::new_unchecked(0, -1, 0, -1));
    }

    #[test]
    fn generic_date_add_matches_iso() {
        let cases = [
            ((2024, 1, 31), (0, 1, 0, 0)),
            ((2024, 2, 29), (1, 0, 0, 0)),
            ((2023, 11, 15), (1, 2, 1, 3)),
            ((2024, 3, 31), (0, -13, 0, -1)),
            ((2000, 12, 31), (-3, 25, -2, 40)),
        ];
        let gregorian = IcuCalendar::try_from_identifier("gregory").unwrap();
        for (date, (y, m, w, d)) in cases {
            let date = iso(date.0, date.1, date.2);
            let duration = DateDuration::new_unchecked(y, m, w, d);
            let expected = IsoCalendar
                .date_add(&date, &duration, ArithmeticOverflow::Constrain)
                .unwrap();
            assert_eq!(
                gregorian
                    .date_add(&date, &duration, ArithmeticOverflow::Constrain)
                    .unwrap(),
                expected
            );
        }

        assert!(gregorian
            .date_add(
                &iso(2024, 1, 31),
                &DateDuration::new_unchecked(0, 1, 0, 0),
                ArithmeticOverflow::Reject
            )
            .is_err());
    }

    #[test]
    fn fixed_calendar_arithmetic() {
        let cal = FixedCalendar;
        let start = FixedCalendar::date(10, 13, 20);
        let end = FixedCalendar::date(12, 2, 5);
        assert_eq!(cal.calendar_fields(&start).unwrap(), CalendarDateFields::new(10, 13, 20));

        // 10-13-20 -> 11-13-20 -> 12-01-20 (one month) -> 12-02-05 (13 days)
        let until = cal.date_until(&start, &end, Unit::Year).unwrap();
        assert_eq!(until, DateDuration::new_unchecked(1, 1, 0, 13));
        let until = cal.date_until(&start, &end, Unit::Month).unwrap();
        assert_eq!(until, DateDuration::new_unchecked(0, 14, 0, 13));

        let back = cal.date_until(&end, &start, Unit::Month).unwrap();
        assert_eq!(back, DateDuration::new_unchecked(0, -14, 0, -13));

        let added = cal
            .date_add(&start, &until, ArithmeticOverflow::Reject)
            .unwrap();
        assert_eq!(added, end);
        assert_eq!(cal.days_in_year(10).unwrap(), 364);
        assert_eq!(cal.day_of_year(&start).unwrap(), 12 * 28 + 20);
    }

    #[test]
    fn icu_calendar_fields() {
        let gregorian = IcuCalendar::try_from_identifier("gregory").unwrap();
        let date = iso(2024, 3, 1);
        assert_eq!(
            gregorian.calendar_fields(&date).unwrap(),
            CalendarDateFields::new(2024, 3, 1)
        );
        assert_eq!(gregorian.days_in_month(2024, 2).unwrap(), 29);
        assert_eq!(gregorian.days_in_year(2023).unwrap(), 365);

        let hebrew = IcuCalendar::try_from_identifier("hebrew").unwrap();
        assert_eq!(hebrew.months_in_year(5784).unwrap(), 13);
        assert_eq!(hebrew.months_in_year(5783).unwrap(), 12);
        let fields = hebrew.calendar_fields(&date).unwrap();
        assert_eq!(fields.year, 5784);
        assert_eq!(hebrew.iso_from_fields(fields).unwrap(), date);
        // 2024-03-01 falls in Adar I of the leap year 5784.
        let code = hebrew.month_code(&date).unwrap();
        assert_eq!(code.as_str(), "M05L");
        assert!(code.is_leap_month());
        assert_eq!(gregorian.month_code(&date).unwrap().as_str(), "M03");

        assert!(IcuCalendar::try_from_identifier("julian").is_err());
    }

    #[test]
    fn icu_date_until_round_trips() {
        let pairs = [
            ((2023, 12, 1), (2025, 4, 20)),
            ((2024, 3, 1), (2023, 9, 30)),
            ((2019, 1, 31), (2024, 2, 29)),
        ];
        for id in ["hebrew", "islamic-civil", "coptic", "persian"] {
            let calendar = IcuCalendar::try_from_identifier(id).unwrap();
            for (one, two) in pairs {
                let (one, two) = (iso(one.0, one.1, one.2), iso(two.0, two.1, two.2));
                for unit in [Unit::Year, Unit::Month] {
                    let duration = calendar.date_until(&one, &two, unit).unwrap();
                    let added = calendar
                        .date_add(&one, &duration, ArithmeticOverflow::Constrain)
                        .unwrap();
                    assert_eq!(added, two, "{id} {one:?} -> {two:?} in {unit}");
                }
            }
        }
    }
}
