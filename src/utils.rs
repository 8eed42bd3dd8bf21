//! Utility date and time equations for the ISO 8601 calendar.

use date_equations::gregorian;

/// Returns whether the ISO year is a leap year.
#[inline]
pub(crate) const fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// `ISODaysInMonth`
#[inline]
pub(crate) const fn iso_days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ if is_leap_year(year) => 29,
        _ => 28,
    }
}

#[inline]
pub(crate) const fn iso_days_in_year(year: i32) -> u16 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Returns the days since the epoch for an ISO date. The day may lie outside
/// of the month, in which case it carries into the neighbouring months.
#[inline]
pub(crate) fn epoch_days_from_iso(year: i32, month: u8, day: i64) -> i64 {
    gregorian::epoch_days_from_ymd(year, month, 1) + day - 1
}

#[inline]
pub(crate) const fn iso_from_epoch_days(epoch_days: i64) -> (i32, u8, u8) {
    gregorian::ymd_from_epoch_days(epoch_days)
}

/// The ISO day of week, where Monday is 1 and Sunday is 7.
#[inline]
pub(crate) const fn iso_day_of_week(epoch_days: i64) -> u8 {
    gregorian::iso_weekday_from_epoch_days(epoch_days)
}

#[cfg(test)]
mod tests {
    use super::{epoch_days_from_iso, iso_days_in_month, iso_days_in_year, is_leap_year};

    #[test]
    fn leap_years() {
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
        assert!(is_leap_year(2024));
        assert!(is_leap_year(0));
        assert!(is_leap_year(-4));
        assert!(!is_leap_year(-100));
        assert_eq!(iso_days_in_year(1600), 366);
    }

    #[test]
    fn days_in_month() {
        assert_eq!(iso_days_in_month(2000, 2), 29);
        assert_eq!(iso_days_in_month(1900, 2), 28);
        assert_eq!(iso_days_in_month(2023, 2), 28);
        assert_eq!(iso_days_in_month(2023, 4), 30);
        assert_eq!(iso_days_in_month(2023, 12), 31);
    }

    #[test]
    fn overflowing_days_carry() {
        assert_eq!(epoch_days_from_iso(1970, 1, 1), 0);
        assert_eq!(epoch_days_from_iso(1970, 1, 32), 31);
        assert_eq!(epoch_days_from_iso(1970, 1, 0), -1);
        assert_eq!(epoch_days_from_iso(1970, 3, -58), 0);
    }
}
