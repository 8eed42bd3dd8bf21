//! The `relativeTo` anchor for calendar-relative duration operations.

use core::fmt;

use crate::builtins::core::{calendar::CalendarMethods, timezone::TimeZoneMethods};
use crate::epoch_nanoseconds::EpochNanoseconds;
use crate::iso::IsoDate;
use crate::TemporalResult;

/// A calendar date used as the anchor for a duration operation.
#[derive(Clone, Copy)]
pub struct PlainRelativeTo<'a> {
    pub(crate) date: IsoDate,
    pub(crate) calendar: &'a dyn CalendarMethods,
}

impl<'a> PlainRelativeTo<'a> {
    /// Creates a plain anchor, checking that the date is within the
    /// representable range.
    pub fn try_new(date: IsoDate, calendar: &'a dyn CalendarMethods) -> TemporalResult<Self> {
        date.check_within_limits()?;
        Ok(Self { date, calendar })
    }

    #[inline]
    #[must_use]
    pub fn date(&self) -> IsoDate {
        self.date
    }
}

impl fmt::Debug for PlainRelativeTo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlainRelativeTo")
            .field("date", &self.date)
            .field("calendar", &self.calendar.identifier())
            .finish()
    }
}

/// An exact instant, in a time zone and calendar, used as the anchor for a
/// duration operation.
#[derive(Clone, Copy)]
pub struct ZonedRelativeTo<'a> {
    pub(crate) epoch_nanoseconds: EpochNanoseconds,
    pub(crate) calendar: &'a dyn CalendarMethods,
    pub(crate) time_zone: &'a dyn TimeZoneMethods,
}

impl<'a> ZonedRelativeTo<'a> {
    #[must_use]
    pub fn new(
        epoch_nanoseconds: EpochNanoseconds,
        calendar: &'a dyn CalendarMethods,
        time_zone: &'a dyn TimeZoneMethods,
    ) -> Self {
        Self {
            epoch_nanoseconds,
            calendar,
            time_zone,
        }
    }

    #[inline]
    #[must_use]
    pub fn epoch_nanoseconds(&self) -> EpochNanoseconds {
        self.epoch_nanoseconds
    }
}

impl fmt::Debug for ZonedRelativeTo<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZonedRelativeTo")
            .field("epoch_nanoseconds", &self.epoch_nanoseconds)
            .field("calendar", &self.calendar.identifier())
            .finish_non_exhaustive()
    }
}

/// The anchor for rounding, totaling, adding or comparing durations that
/// carry calendar units.
#[derive(Debug, Clone, Copy)]
pub enum RelativeTo<'a> {
    PlainDate(PlainRelativeTo<'a>),
    ZonedDateTime(ZonedRelativeTo<'a>),
}

impl<'a> From<PlainRelativeTo<'a>> for RelativeTo<'a> {
    fn from(value: PlainRelativeTo<'a>) -> Self {
        Self::PlainDate(value)
    }
}

impl<'a> From<ZonedRelativeTo<'a>> for RelativeTo<'a> {
    fn from(value: ZonedRelativeTo<'a>) -> Self {
        Self::ZonedDateTime(value)
    }
}
