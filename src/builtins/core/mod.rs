//! The core arithmetic built-ins: calendars, time zones, durations and the
//! difference engine.

pub(crate) mod calendar;
pub(crate) mod diff;
pub(crate) mod duration;
pub(crate) mod timezone;
