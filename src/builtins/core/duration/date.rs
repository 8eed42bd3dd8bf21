//! Implementation of a `DateDuration`

use crate::{
    builtins::core::calendar::CalendarMethods, error::ErrorMessage, iso::IsoDate,
    options::ArithmeticOverflow, Sign, TemporalError, TemporalResult,
};

use super::{duration_sign, is_valid_duration};

/// `DateDuration` holds the calendar part of a duration: years, months,
/// weeks and days.
///
/// All non-zero fields of a valid `DateDuration` share one sign.
#[non_exhaustive]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateDuration {
    /// `DateDuration`'s internal year value.
    pub years: i64,
    /// `DateDuration`'s internal month value.
    pub months: i64,
    /// `DateDuration`'s internal week value.
    pub weeks: i64,
    /// `DateDuration`'s internal day value.
    pub days: i64,
}

impl DateDuration {
    /// Creates a new, non-validated `DateDuration`.
    #[inline]
    #[must_use]
    pub(crate) const fn new_unchecked(years: i64, months: i64, weeks: i64, days: i64) -> Self {
        Self {
            years,
            months,
            weeks,
            days,
        }
    }

    /// Returns the fields of this `DateDuration`, largest first.
    #[inline]
    #[must_use]
    pub(crate) fn fields(&self) -> [i64; 4] {
        [self.years, self.months, self.weeks, self.days]
    }
}

impl DateDuration {
    /// Creates a new `DateDuration` with provided values.
    ///
    /// Equivalent to `CreateDateDurationRecord`.
    #[inline]
    pub fn new(years: i64, months: i64, weeks: i64, days: i64) -> TemporalResult<Self> {
        if !is_valid_duration(years, months, weeks, days, 0, 0, 0, 0, 0, 0) {
            return Err(TemporalError::range().with_enum(ErrorMessage::DurationOutOfRange));
        }
        Ok(Self::new_unchecked(years, months, weeks, days))
    }

    /// Returns a negated `DateDuration`.
    #[inline]
    #[must_use]
    pub fn negated(&self) -> Self {
        Self::new_unchecked(-self.years, -self.months, -self.weeks, -self.days)
    }

    /// Returns a new `DateDuration` representing the absolute value of the current.
    #[inline]
    #[must_use]
    pub fn abs(&self) -> Self {
        Self::new_unchecked(
            self.years.abs(),
            self.months.abs(),
            self.weeks.abs(),
            self.days.abs(),
        )
    }

    /// Returns the sign for the current `DateDuration`.
    #[inline]
    #[must_use]
    pub fn sign(&self) -> Sign {
        duration_sign(&self.fields().map(i128::from))
    }

    /// Returns whether the duration holds years, months or weeks.
    #[inline]
    #[must_use]
    pub fn has_calendar_units(&self) -> bool {
        self.years != 0 || self.months != 0 || self.weeks != 0
    }

    /// Returns the number of days this duration spans when added to
    /// `relative_to` in `calendar`.
    ///
    /// Equivalent to `DateDurationDays`.
    pub(crate) fn days_from(
        &self,
        relative_to: &IsoDate,
        calendar: &dyn CalendarMethods,
    ) -> TemporalResult<i64> {
        if !self.has_calendar_units() {
            return Ok(self.days);
        }
        let later = calendar.date_add(
            relative_to,
            &self.adjust(0, None, None)?,
            ArithmeticOverflow::Constrain,
        )?;
        let calendar_days = later.to_epoch_days() - relative_to.to_epoch_days();
        self.days
            .checked_add(calendar_days)
            .ok_or(TemporalError::range().with_enum(ErrorMessage::DurationOutOfRange))
    }

    /// Replaces the days, and optionally the weeks and months, of this
    /// duration.
    ///
    /// Equivalent to `AdjustDateDurationRecord`.
    pub(crate) fn adjust(
        &self,
        days: i64,
        weeks: Option<i64>,
        months: Option<i64>,
    ) -> TemporalResult<Self> {
        Self::new(
            self.years,
            months.unwrap_or(self.months),
            weeks.unwrap_or(self.weeks),
            days,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::DateDuration;
    use crate::{builtins::core::calendar::IsoCalendar, iso::IsoDate, Sign};

    #[test]
    fn sign_and_validation() {
        assert_eq!(DateDuration::default().sign(), Sign::Zero);
        assert_eq!(DateDuration::new(0, 0, 0, -3).unwrap().sign(), Sign::Negative);
        assert_eq!(
            DateDuration::new(0, 2, 0, 3).unwrap().negated(),
            DateDuration::new(0, -2, 0, -3).unwrap()
        );
        assert!(DateDuration::new(1, -1, 0, 0).is_err());
        assert!(DateDuration::new(1 << 32, 0, 0, 0).is_err());
        assert!(DateDuration::new((1 << 32) - 1, 0, 0, 0).is_ok());
    }

    #[test]
    fn adjust_keeps_unreplaced_fields() {
        let duration = DateDuration::new(1, 2, 3, 4).unwrap();
        assert_eq!(
            duration.adjust(9, None, None).unwrap(),
            DateDuration::new(1, 2, 3, 9).unwrap()
        );
        assert_eq!(
            duration.adjust(0, Some(0), Some(5)).unwrap(),
            DateDuration::new(1, 5, 0, 0).unwrap()
        );
        assert!(duration.adjust(-1, None, None).is_err());
    }

    #[test]
    fn days_from_relative_date() {
        let start = IsoDate::new_unchecked(2024, 1, 31);
        let one_month = DateDuration::new(0, 1, 0, 2).unwrap();
        // 2024-01-31 + 1 month is constrained to 2024-02-29.
        assert_eq!(one_month.days_from(&start, &IsoCalendar).unwrap(), 31);
        let days = DateDuration::new(0, 0, 0, 10).unwrap();
        assert_eq!(days.days_from(&start, &IsoCalendar).unwrap(), 10);
    }
}
