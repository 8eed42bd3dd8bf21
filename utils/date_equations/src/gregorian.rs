/// Gregorian Date Calculations
///
/// This module contains the logic for Gregorian Date Calculations.
///
/// ## Extending the Neri-Schneider window
///
/// Neri-Schneider work on unsigned integers inside a window of rata die
/// values. Rather than picking a fixed shift large enough for the supported
/// date range, the equations below split any rata die into a count of whole
/// 400-year cycles and an offset inside the cycle. The offset is always
/// non-negative, so the unsigned equations apply, and the cycle count is
/// added back to the year afterwards.
///
/// | Significant Date     | Epoch Days   |
/// | ---------------------|--------------|
/// | April 19, -271_821   | -100_000_001 |
/// | January 1, 1970      | 0            |
/// | September 14, 275_760 | 100_000_001 |
///
pub mod neri_schneider;

pub use neri_schneider::{
    epoch_days_from_gregorian_date as epoch_days_from_ymd,
    gregorian_ymd_from_epoch_days as ymd_from_epoch_days, iso_weekday_from_epoch_days,
    rata_die_from_gregorian_date,
};
