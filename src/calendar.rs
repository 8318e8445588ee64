use chrono::{Datelike, NaiveDate};

/// Returns the first day of the month immediately preceding `day`'s month,
/// rolling over to December of the previous year when `day` is in January.
pub fn first_day_of_last_month(day: NaiveDate) -> NaiveDate {
    let (year, month) = match day.month() {
        1 => (day.year() - 1, 12),
        m => (day.year(), m - 1),
    };
    NaiveDate::from_ymd_opt(year, month, 1).expect("first of a month is always a valid date")
}

/// Returns the last day of the month immediately preceding `day`'s month.
pub fn last_day_of_last_month(day: NaiveDate) -> NaiveDate {
    day.with_day(1)
        .expect("day 1 is valid in every month")
        .pred_opt()
        .expect("date not at the calendar minimum")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_previous_month_within_year() {
        assert_eq!(
            first_day_of_last_month(date(2023, 3, 15)),
            date(2023, 2, 1)
        );
        assert_eq!(last_day_of_last_month(date(2023, 3, 15)), date(2023, 2, 28));
    }

    #[test]
    fn test_january_rolls_over_to_previous_year() {
        assert_eq!(
            first_day_of_last_month(date(2023, 1, 10)),
            date(2022, 12, 1)
        );
        assert_eq!(last_day_of_last_month(date(2023, 1, 10)), date(2022, 12, 31));
    }

    #[test]
    fn test_leap_february() {
        assert_eq!(last_day_of_last_month(date(2024, 3, 1)), date(2024, 2, 29));
    }

    #[test]
    fn test_varying_month_lengths() {
        assert_eq!(last_day_of_last_month(date(2023, 5, 20)), date(2023, 4, 30));
        assert_eq!(last_day_of_last_month(date(2023, 8, 1)), date(2023, 7, 31));
    }
}
