// NOTE: the computational calendar starts the year on March 1st, so that the
// leap day is the last day of the computational year.

const EPOCH_COMPUTATIONAL_RATA_DIE: i64 = 719_468;

const DAYS_IN_A_400Y_CYCLE: u32 = 146_097;
const TWO_POWER_THIRTY_NINE: u64 = 549_755_813_888; // 2^39 constant
const TWO_POWER_SIXTEEN: u32 = 65_536; // 2^16 constant

// ==== Gregorian date to rata die ====

/// Returns the computational rata die for a proleptic Gregorian date.
///
/// Unlike the original equations, the century terms use floored division so
/// that years before 1 BCE resolve to the correct day.
pub const fn rata_die_from_gregorian_date(year: i32, month: u8, day: u8) -> i64 {
    let (year, month, day, century) = rata_die_first_equations(year, month, day);
    let y_star = (1461 * year).div_euclid(4) - century + century.div_euclid(4);
    let m_star = (979 * month - 2919) / 32;
    y_star + m_star + day
}

/// Returns the number of days since 1970-01-01 for a proleptic Gregorian date.
pub const fn epoch_days_from_gregorian_date(year: i32, month: u8, day: u8) -> i64 {
    rata_die_from_gregorian_date(year, month, day) - EPOCH_COMPUTATIONAL_RATA_DIE
}

// Returns Y, M, D, C
const fn rata_die_first_equations(year: i32, month: u8, day: u8) -> (i64, i64, i64, i64) {
    let j = (month <= 2) as i64;
    let computational_year = year as i64 - j;
    let computational_month = month as i64 + 12 * j;
    let computational_day = day as i64 - 1;
    (
        computational_year,
        computational_month,
        computational_day,
        computational_year.div_euclid(100),
    )
}

// ==== Rata die to Gregorian date ====

/// Returns C, N_c for a rata die inside a single 400-year cycle.
const fn first_equations(rata_die: u32) -> (u32, u32) {
    let n_one = 4 * rata_die + 3;
    (
        n_one.div_euclid(DAYS_IN_A_400Y_CYCLE),
        n_one.rem_euclid(DAYS_IN_A_400Y_CYCLE),
    )
}

/// Returns Y, N_y
const fn second_equations(rata_die: u32) -> (u32, u32) {
    let (century, rem) = first_equations(rata_die);
    let n_two = rem | 3;
    let year_of_century = (376_287_347 * n_two as u64).div_euclid(TWO_POWER_THIRTY_NINE) as u32;
    let day_of_year = (n_two - 1461 * year_of_century).div_euclid(4);
    (100 * century + year_of_century, day_of_year)
}

/// Returns Y, M, D, N_y in the computational calendar.
const fn third_equations(rata_die: u32) -> (u32, u32, u32, u32) {
    let (year, day_of_year) = second_equations(rata_die);
    let n_three = 2141 * day_of_year + 197_913;
    let month = n_three.div_euclid(TWO_POWER_SIXTEEN);
    let day = n_three.rem_euclid(TWO_POWER_SIXTEEN).div_euclid(2141);
    (year, month, day, day_of_year)
}

/// Maps a rata die within `[0, 146_097)` onto a Gregorian year, month and day.
const fn gregorian_ymd_in_cycle(rata_die: u32) -> (u32, u8, u8) {
    let (year, month, day, day_of_year) = third_equations(rata_die);
    let j = (day_of_year >= 306) as u32;
    (year + j, (month - 12 * j) as u8, (day + 1) as u8)
}

/// Returns the proleptic Gregorian year, month and day for a count of days
/// since 1970-01-01.
pub const fn gregorian_ymd_from_epoch_days(epoch_days: i64) -> (i32, u8, u8) {
    let rata_die = epoch_days + EPOCH_COMPUTATIONAL_RATA_DIE;
    let cycles = rata_die.div_euclid(DAYS_IN_A_400Y_CYCLE as i64);
    let offset = rata_die.rem_euclid(DAYS_IN_A_400Y_CYCLE as i64) as u32;
    let (year, month, day) = gregorian_ymd_in_cycle(offset);
    ((year as i64 + 400 * cycles) as i32, month, day)
}

/// Returns the ISO 8601 weekday for a count of days since 1970-01-01, where
/// Monday is 1 and Sunday is 7.
pub const fn iso_weekday_from_epoch_days(epoch_days: i64) -> u8 {
    // 1970-01-01 was a Thursday.
    ((epoch_days + 3).rem_euclid(7) + 1) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPOCH_RATA_DIE: u32 = 719_468; // This is the Rata Die for 1970-01-01

    #[test]
    fn epoch_equations() {
        let (century, rem) = first_equations(EPOCH_RATA_DIE % DAYS_IN_A_400Y_CYCLE);
        assert_eq!(century, 3);
        assert_eq!(rem, 102_032);
        let (year, day_of_year) = second_equations(EPOCH_RATA_DIE % DAYS_IN_A_400Y_CYCLE);
        assert_eq!(year, 369);
        // Beginning of January in the computational calendar is day number 306
        assert_eq!(day_of_year, 306);
    }

    #[test]
    fn epoch_ymd() {
        assert_eq!(gregorian_ymd_from_epoch_days(0), (1970, 1, 1));
        assert_eq!(epoch_days_from_gregorian_date(1970, 1, 1), 0);
        assert_eq!(rata_die_from_gregorian_date(1970, 1, 1), 719_468);
    }

    #[test]
    fn negative_years() {
        assert_eq!(epoch_days_from_gregorian_date(1, 1, 1), -719_162);
        assert_eq!(epoch_days_from_gregorian_date(0, 3, 1), -719_468);
        assert_eq!(epoch_days_from_gregorian_date(-1, 1, 1), -719_893);
        assert_eq!(gregorian_ymd_from_epoch_days(-719_469), (0, 2, 29));
        assert_eq!(gregorian_ymd_from_epoch_days(-719_893), (-1, 1, 1));
    }

    #[test]
    fn epoch_days_limit_to_date() {
        assert_eq!(gregorian_ymd_from_epoch_days(100_000_001), (275_760, 9, 14));
        assert_eq!(gregorian_ymd_from_epoch_days(100_000_000), (275_760, 9, 13));
        assert_eq!(gregorian_ymd_from_epoch_days(-100_000_001), (-271_821, 4, 19));
        assert_eq!(gregorian_ymd_from_epoch_days(-100_000_000), (-271_821, 4, 20));
        assert_eq!(epoch_days_from_gregorian_date(275_760, 9, 14), 100_000_001);
        assert_eq!(epoch_days_from_gregorian_date(-271_821, 4, 19), -100_000_001);
    }

    #[test]
    fn round_trip_across_cycles() {
        let mut days = -100_000_001i64;
        while days <= 100_000_001 {
            let (year, month, day) = gregorian_ymd_from_epoch_days(days);
            assert_eq!(epoch_days_from_gregorian_date(year, month, day), days);
            days += 9_973;
        }
    }

    #[test]
    fn weekdays() {
        assert_eq!(iso_weekday_from_epoch_days(0), 4);
        assert_eq!(iso_weekday_from_epoch_days(-1), 3);
        // 2021-01-01 was a Friday.
        assert_eq!(
            iso_weekday_from_epoch_days(epoch_days_from_gregorian_date(2021, 1, 1)),
            5
        );
    }
}
