//! The `temporal_arith` crate is the date and duration arithmetic engine
//! behind a Temporal-style date/time library.
//!
//! It computes calendar-aware differences between dates, date-times and
//! zoned instants, adds durations to them, and rounds or totals durations,
//! with exact integer arithmetic on an epoch-nanosecond timeline.
//!
//! ```rust
//! use temporal_arith::{diff_dates, iso::IsoDate, IsoCalendar};
//! use temporal_arith::options::{DifferenceOperation, DifferenceSettings, Unit};
//!
//! let start = IsoDate::try_new(2024, 1, 31).unwrap();
//! let end = IsoDate::try_new(2024, 3, 1).unwrap();
//!
//! let duration = diff_dates(
//!     &IsoCalendar,
//!     &start,
//!     &end,
//!     DifferenceOperation::Until,
//!     DifferenceSettings::with_largest_unit(Unit::Month),
//! )
//! .unwrap();
//!
//! assert_eq!(duration.months(), 1);
//! assert_eq!(duration.days(), 1);
//! ```
//!
//! Calendars and time zones are collaborators: the engine only talks to
//! them through the [`CalendarMethods`] and [`TimeZoneMethods`] traits.
#![no_std]
#![cfg_attr(not(test), forbid(clippy::unwrap_used))]
#![allow(
    clippy::module_name_repetitions,
    clippy::redundant_pub_crate,
    clippy::too_many_lines,
    clippy::cognitive_complexity,
    clippy::missing_errors_doc,
    clippy::option_if_let_else,

    // It may be worth to look if we can fix the issues highlighted by these lints.
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss,
    clippy::cast_possible_wrap,
)]

extern crate alloc;
extern crate core;

#[cfg(feature = "std")]
extern crate std;

pub mod error;
pub mod iso;
pub mod options;

mod builtins;
mod epoch_nanoseconds;

#[doc(hidden)]
pub(crate) mod rounding;
#[doc(hidden)]
pub(crate) mod utils;

use core::cmp::Ordering;

/// Re-export of `TinyAsciiStr` from `tinystr`, which backs `MonthCode`.
pub use tinystr::TinyAsciiStr;

#[doc(inline)]
pub use error::TemporalError;

/// The `Temporal` result type
pub type TemporalResult<T> = Result<T, TemporalError>;

pub mod time {
    //! Exact time values.
    pub use crate::epoch_nanoseconds::{DayTimeNano, EpochNanoseconds};
}

pub use crate::builtins::core::{
    calendar::{Calendar, CalendarDateFields, CalendarMethods, IcuCalendar, IsoCalendar, MonthCode},
    diff::{diff_date_times, diff_dates, diff_epoch_nanoseconds, diff_times, diff_zoned_epoch_nanoseconds},
    duration::{DateDuration, Duration, TimeDuration},
    timezone::{TimeZoneMethods, UtcOffset},
};

/// A library specific trait for unwrapping assertions.
pub(crate) trait TemporalUnwrap {
    type Output;

    /// Assertion based unwrapping. This will panic in debug builds, but
    /// returns an assertion error at runtime.
    fn temporal_unwrap(self) -> TemporalResult<Self::Output>;
}

impl<T> TemporalUnwrap for Option<T> {
    type Output = T;

    fn temporal_unwrap(self) -> TemporalResult<Self::Output> {
        debug_assert!(self.is_some());
        self.ok_or(TemporalError::assert())
    }
}

#[doc(hidden)]
#[macro_export]
macro_rules! temporal_assert {
    ($condition:expr $(,)*) => {
        if !$condition {
            return Err($crate::TemporalError::assert());
        }
    };
    ($condition:expr, $($args:tt)+) => {
        if !$condition {
            #[cfg(feature = "log")]
            log::error!($($args)+);
            return Err($crate::TemporalError::assert());
        }
    };
}

/// A general Sign type.
#[repr(i8)]
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Sign {
    #[default]
    Positive = 1,
    Zero = 0,
    Negative = -1,
}

impl From<i8> for Sign {
    fn from(value: i8) -> Self {
        match value.cmp(&0) {
            Ordering::Greater => Self::Positive,
            Ordering::Equal => Self::Zero,
            Ordering::Less => Self::Negative,
        }
    }
}

impl From<Ordering> for Sign {
    fn from(value: Ordering) -> Self {
        match value {
            Ordering::Greater => Self::Positive,
            Ordering::Equal => Self::Zero,
            Ordering::Less => Self::Negative,
        }
    }
}

impl Sign {
    /// Coerces the current `Sign` to be either negative or positive.
    pub(crate) fn as_sign_multiplier(&self) -> i8 {
        if matches!(self, Self::Zero) {
            return 1;
        }
        *self as i8
    }

    pub(crate) fn negate(&self) -> Sign {
        Sign::from(-(*self as i8))
    }
}

// Relevant numeric constants
/// Nanoseconds per day constant: 8.64e+13
pub const NS_PER_DAY: u64 = MS_PER_DAY as u64 * 1_000_000;
/// Milliseconds per day constant: 8.64e+7
pub const MS_PER_DAY: u32 = 24 * 60 * 60 * 1000;
