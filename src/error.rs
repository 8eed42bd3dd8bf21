//! This module implements `TemporalError`.

use alloc::borrow::Cow;
use core::fmt;

/// `TemporalError`'s error type.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Error.
    #[default]
    Generic,
    /// TypeError
    Type,
    /// RangeError
    Range,
    /// A required companion value, such as a `relativeTo` anchor, was missing.
    Usage,
    /// Assert
    Assert,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Generic => "Error",
            Self::Type => "TypeError",
            Self::Range => "RangeError",
            Self::Usage => "UsageError",
            Self::Assert => "ImplementationError",
        }
        .fmt(f)
    }
}

/// The error type for `temporal_arith`.
#[derive(Debug, Clone, PartialEq)]
pub struct TemporalError {
    kind: ErrorKind,
    msg: Cow<'static, str>,
}

impl TemporalError {
    #[inline]
    #[must_use]
    const fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            msg: Cow::Borrowed(""),
        }
    }

    /// Create a generic error
    #[inline]
    #[must_use]
    pub fn general<S>(msg: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        Self::new(ErrorKind::Generic).with_message(msg)
    }

    /// Create a range error.
    #[inline]
    #[must_use]
    pub const fn range() -> Self {
        Self::new(ErrorKind::Range)
    }

    /// Create a type error.
    #[inline]
    #[must_use]
    pub const fn r#type() -> Self {
        Self::new(ErrorKind::Type)
    }

    /// Create an error for a missing companion value.
    #[inline]
    #[must_use]
    pub const fn usage() -> Self {
        Self::new(ErrorKind::Usage)
    }

    /// Create an assertion error.
    #[inline]
    #[must_use]
    pub const fn assert() -> Self {
        Self::new(ErrorKind::Assert)
    }

    /// Add a message to the error.
    #[inline]
    #[must_use]
    pub fn with_message<S>(mut self, msg: S) -> Self
    where
        S: Into<Cow<'static, str>>,
    {
        self.msg = msg.into();
        self
    }

    /// Add one of the crate's recurring messages to the error.
    #[inline]
    #[must_use]
    pub fn with_enum(mut self, msg: ErrorMessage) -> Self {
        self.msg = Cow::Borrowed(msg.to_str());
        self
    }

    /// Returns this error's kind.
    #[inline]
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        self.kind
    }

    /// Returns the error message.
    #[inline]
    #[must_use]
    pub fn message(&self) -> &str {
        &self.msg
    }

    /// Extracts the error message.
    #[inline]
    #[must_use]
    pub fn into_message(self) -> Cow<'static, str> {
        self.msg
    }
}

impl fmt::Display for TemporalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;

        let msg = self.msg.trim();
        if !msg.is_empty() {
            write!(f, ": {msg}")?;
        }

        Ok(())
    }
}

impl core::error::Error for TemporalError {}

/// The recurring error messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorMessage {
    InstantOutOfRange,
    DateTimeOutOfRange,
    DateOutOfRange,
    YearMonthOutOfRange,
    InvalidIsoDate,
    InvalidIsoTime,
    DurationMixedSign,
    DurationOutOfRange,
    TimeDurationOutOfRange,
    RelativeToRequired,
    SmallestUnitLargerThanLargestUnit,
    SmallestUnitNotDateUnit,
    LargestUnitNotDateUnit,
    SmallestUnitNotTimeUnit,
    LargestUnitNotTimeUnit,
    BothUnitsMissing,
    RoundingIncrementOutOfRange,
    RoundingIncrementNotDivisor,
    RoundingIncrementWithCalendarUnit,
    AmbiguousLocalTime,
    OffsetOutOfRange,
    DayOutOfRange,
    MonthOutOfRange,
}

impl ErrorMessage {
    /// Returns the message text.
    pub const fn to_str(self) -> &'static str {
        match self {
            Self::InstantOutOfRange => "Instant nanoseconds are not within a valid epoch range.",
            Self::DateTimeOutOfRange => "DateTime is not within a valid epoch range.",
            Self::DateOutOfRange => "Date is not within a valid epoch range.",
            Self::YearMonthOutOfRange => "Year-month is not within a valid epoch range.",
            Self::InvalidIsoDate => "Not a valid ISO date.",
            Self::InvalidIsoTime => "Not a valid ISO time.",
            Self::DurationMixedSign => "Duration fields must all share the same sign.",
            Self::DurationOutOfRange => "Duration fields exceed the valid duration range.",
            Self::TimeDurationOutOfRange => "Time duration exceeds the maximum time duration.",
            Self::RelativeToRequired => {
                "relativeTo is required for calendar units or calendar-relative operations."
            }
            Self::SmallestUnitLargerThanLargestUnit => {
                "smallestUnit must not be larger than largestUnit."
            }
            Self::SmallestUnitNotDateUnit => "smallestUnit must be a date unit.",
            Self::LargestUnitNotDateUnit => "largestUnit must be a date unit.",
            Self::SmallestUnitNotTimeUnit => "smallestUnit must be a time unit.",
            Self::LargestUnitNotTimeUnit => "largestUnit must be a time unit.",
            Self::BothUnitsMissing => "smallestUnit and largestUnit cannot both be None.",
            Self::RoundingIncrementOutOfRange => "roundingIncrement exceeds its maximum value.",
            Self::RoundingIncrementNotDivisor => {
                "roundingIncrement must evenly divide the next largest unit."
            }
            Self::RoundingIncrementWithCalendarUnit => {
                "roundingIncrement greater than 1 requires largestUnit to equal a date smallestUnit."
            }
            Self::AmbiguousLocalTime => "Rejecting an ambiguous or skipped local date-time.",
            Self::OffsetOutOfRange => "UTC offset must be less than a day.",
            Self::DayOutOfRange => "day value is not in a valid range.",
            Self::MonthOutOfRange => "month value is not in a valid range.",
        }
    }
}
