//! This module implements the time zone capability interface and its
//! disambiguation of local date-times.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Write;

use crate::{
    epoch_nanoseconds::{DayTimeNano, EpochNanoseconds},
    error::ErrorMessage,
    iso::IsoDateTime,
    options::Disambiguation,
    TemporalError, TemporalResult, TemporalUnwrap, NS_PER_DAY,
};

const NS_PER_DAY_I64: i64 = NS_PER_DAY as i64;
const NS_PER_MINUTE: i64 = 60_000_000_000;

/// The capability interface of a time zone.
///
/// Implementors answer two queries: the UTC offset in effect at an exact
/// instant, and the instants a local date-time may denote. Everything else,
/// including the resolution of gaps and folds, is provided.
pub trait TimeZoneMethods {
    /// The time zone identifier.
    fn identifier(&self) -> String;

    /// Returns the UTC offset in nanoseconds in effect at an instant.
    ///
    /// The offset must be less than a day in magnitude.
    fn get_offset_nanoseconds_for(&self, epoch_ns: &EpochNanoseconds) -> TemporalResult<i64>;

    /// Returns the instants, in ascending order, that the local date-time
    /// denotes: one ordinarily, none in a gap and two in a fold.
    fn get_possible_epoch_nanoseconds_for(
        &self,
        iso: IsoDateTime,
    ) -> TemporalResult<Vec<EpochNanoseconds>>;

    /// Returns the local date-time of an instant.
    fn get_iso_datetime_for(&self, epoch_ns: &EpochNanoseconds) -> TemporalResult<IsoDateTime> {
        let offset = self.get_offset_nanoseconds_for(epoch_ns)?;
        Ok(IsoDateTime::from_epoch_nanos(&epoch_ns.0, offset))
    }

    /// Resolves a local date-time to a single instant.
    ///
    /// Equivalent to `GetEpochNanosecondsFor`.
    fn get_epoch_nanoseconds_for(
        &self,
        iso: IsoDateTime,
        disambiguation: Disambiguation,
    ) -> TemporalResult<EpochNanoseconds> {
        let possible = self.get_possible_epoch_nanoseconds_for(iso)?;
        self.disambiguate_possible_epoch_nanoseconds(possible, iso, disambiguation)
    }

    /// Picks one of the possible instants of a local date-time.
    ///
    /// In a fold, `compatible` and `earlier` pick the first instant and
    /// `later` the last. In a gap, the local time is shifted by the size of
    /// the gap, measured from the offsets a day either side of it: backwards
    /// for `earlier`, forwards for `compatible` and `later`. `reject` fails
    /// in both cases.
    ///
    /// Equivalent to `DisambiguatePossibleEpochNanoseconds`.
    fn disambiguate_possible_epoch_nanoseconds(
        &self,
        possible: Vec<EpochNanoseconds>,
        iso: IsoDateTime,
        disambiguation: Disambiguation,
    ) -> TemporalResult<EpochNanoseconds> {
        match (possible.as_slice(), disambiguation) {
            ([single], _) => return Ok(*single),
            ([], Disambiguation::Reject) | ([_, _, ..], Disambiguation::Reject) => {
                return Err(TemporalError::range().with_enum(ErrorMessage::AmbiguousLocalTime))
            }
            ([first, ..], Disambiguation::Compatible | Disambiguation::Earlier) => {
                #[cfg(feature = "log")]
                log::debug!("resolved fold at {iso:?} to the earlier instant");
                return Ok(*first);
            }
            ([.., last], Disambiguation::Later) => {
                #[cfg(feature = "log")]
                log::debug!("resolved fold at {iso:?} to the later instant");
                return Ok(*last);
            }
            ([], _) => {}
        }

        // The local time is in a gap. Measure the gap from the offsets in
        // effect a day before and a day after.
        let local = iso.utc_epoch_nanos();
        let day_before = EpochNanoseconds::try_from(local - DayTimeNano::from_days(1))?;
        let day_after = EpochNanoseconds::try_from(local + DayTimeNano::from_days(1))?;
        let offset_before = self.get_offset_nanoseconds_for(&day_before)?;
        let offset_after = self.get_offset_nanoseconds_for(&day_after)?;
        let gap = offset_after - offset_before;
        crate::temporal_assert!(
            gap.abs() <= NS_PER_DAY_I64,
            "time zone transition of {gap}ns exceeds a day"
        );

        let (shift, take_last) = if disambiguation == Disambiguation::Earlier {
            (-gap, false)
        } else {
            (gap, true)
        };
        let (carry, time) = iso.time.add(DayTimeNano::from(shift));
        let shifted = IsoDateTime::new_unchecked(iso.date.add_days(carry), time);

        #[cfg(feature = "log")]
        log::debug!("resolved gap at {iso:?} by shifting {shift}ns to {shifted:?}");

        let possible = self.get_possible_epoch_nanoseconds_for(shifted)?;
        let resolved = if take_last {
            possible.last()
        } else {
            possible.first()
        };
        resolved.copied().temporal_unwrap()
    }
}

// ==== UtcOffset ====

/// A fixed UTC offset, in nanoseconds, of less than a day in magnitude.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UtcOffset(i64);

impl UtcOffset {
    /// The zero offset.
    pub const UTC: Self = Self(0);

    /// Creates an offset from nanoseconds.
    pub fn try_from_nanoseconds(nanoseconds: i64) -> TemporalResult<Self> {
        if nanoseconds.abs() >= NS_PER_DAY_I64 {
            return Err(TemporalError::range().with_enum(ErrorMessage::OffsetOutOfRange));
        }
        Ok(Self(nanoseconds))
    }

    /// Creates an offset from whole minutes.
    pub fn try_from_minutes(minutes: i16) -> TemporalResult<Self> {
        Self::try_from_nanoseconds(i64::from(minutes) * NS_PER_MINUTE)
    }

    #[inline]
    #[must_use]
    pub const fn nanoseconds(&self) -> i64 {
        self.0
    }
}

impl TimeZoneMethods for UtcOffset {
    /// Formats the offset as `±HH:MM`, with seconds and a fraction only
    /// when they are non-zero.
    fn identifier(&self) -> String {
        let sign = if self.0 < 0 { '-' } else { '+' };
        let magnitude = self.0.unsigned_abs();
        let hours = magnitude / 3_600_000_000_000;
        let minutes = magnitude / 60_000_000_000 % 60;
        let seconds = magnitude / 1_000_000_000 % 60;
        let fraction = magnitude % 1_000_000_000;

        let mut out = String::new();
        // Writing into a `String` does not fail.
        let _ = write!(out, "{sign}{hours:02}:{minutes:02}");
        if seconds != 0 || fraction != 0 {
            let _ = write!(out, ":{seconds:02}");
        }
        if fraction != 0 {
            let digits = alloc::format!("{fraction:09}");
            out.push('.');
            out.push_str(digits.trim_end_matches('0'));
        }
        out
    }

    fn get_offset_nanoseconds_for(&self, _epoch_ns: &EpochNanoseconds) -> TemporalResult<i64> {
        Ok(self.0)
    }

    fn get_possible_epoch_nanoseconds_for(
        &self,
        iso: IsoDateTime,
    ) -> TemporalResult<Vec<EpochNanoseconds>> {
        iso.check_within_limits()?;
        let epoch_ns = EpochNanoseconds::try_from(iso.utc_epoch_nanos() - DayTimeNano::from(self.0))?;
        Ok(alloc::vec![epoch_ns])
    }
}
