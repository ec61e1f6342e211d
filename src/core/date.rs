//! Date arithmetic and comparison helpers on `NaiveDateTime`.
//!
//! Shifts return `None` when the result leaves chrono's representable range.
//! Month and year shifts clamp to the last valid day (Jan 31 + 1 month is
//! Feb 28/29).

use chrono::{Datelike, Local, Months, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta};

pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// First leap year at or after `year`.
pub fn next_leap_year(year: i32) -> Option<i32> {
    (year..=i32::MAX).find(|y| is_leap_year(*y))
}

/// Last leap year at or before `year`.
pub fn previous_leap_year(year: i32) -> Option<i32> {
    (i32::MIN..=year).rev().find(|y| is_leap_year(*y))
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

pub(crate) fn shift_days(value: NaiveDateTime, days: i64) -> Option<NaiveDateTime> {
    value.checked_add_signed(TimeDelta::try_days(days)?)
}

pub(crate) fn shift_months(value: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let amount = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 {
        value.checked_add_months(amount)
    } else {
        value.checked_sub_months(amount)
    }
}

fn leap_day(year: i32) -> Option<NaiveDateTime> {
    NaiveDate::from_ymd_opt(year, 2, 29).map(|date| date.and_time(NaiveTime::MIN))
}

pub trait DateTimeExt: Sized {
    fn tomorrow(self) -> Option<Self>;
    fn yesterday(self) -> Option<Self>;
    fn next_hour(self) -> Option<Self>;
    fn last_hour(self) -> Option<Self>;
    fn next_week(self) -> Option<Self>;
    fn last_week(self) -> Option<Self>;
    fn next_month(self) -> Option<Self>;
    fn previous_month(self) -> Option<Self>;
    fn next_year(self) -> Option<Self>;
    fn last_year(self) -> Option<Self>;

    fn days_ago(self, days: i32) -> Option<Self>;
    fn days_after(self, days: i32) -> Option<Self>;
    fn weeks_ago(self, weeks: i32) -> Option<Self>;
    fn weeks_after(self, weeks: i32) -> Option<Self>;
    fn months_ago(self, months: i32) -> Option<Self>;
    fn months_after(self, months: i32) -> Option<Self>;
    fn years_ago(self, years: i32) -> Option<Self>;
    fn years_after(self, years: i32) -> Option<Self>;

    /// Midnight on the first day of the month.
    fn first_day_of_month(self) -> Self;
    /// Midnight on the last day of the month.
    fn last_day_of_month(self) -> Option<Self>;
    fn days_in_month(self) -> u32;
    /// Whole calendar days from `self` to `target` (negative if in the past).
    fn days_left(self, target: Self) -> i64;

    /// Inclusive on both ends.
    fn is_between(self, start: Self, end: Self) -> bool;
    fn is_before(self, target: Self) -> bool;
    fn is_after(self, target: Self) -> bool;

    fn is_year_leap(self) -> bool;
    /// Feb 29 of the first leap year at or after this date's year.
    fn next_leap_year(self) -> Option<Self>;
    /// Feb 29 of the last leap year at or before this date's year.
    fn previous_leap_year(self) -> Option<Self>;

    /// Difference in calendar years to `today`; birthdays are not considered.
    fn age_at(self, today: NaiveDate) -> i32;
    fn age(self) -> i32;
    /// English weekday name, e.g. `"Monday"`.
    fn day_name(self) -> String;
}

impl DateTimeExt for NaiveDateTime {
    fn tomorrow(self) -> Option<Self> {
        shift_days(self, 1)
    }

    fn yesterday(self) -> Option<Self> {
        shift_days(self, -1)
    }

    fn next_hour(self) -> Option<Self> {
        self.checked_add_signed(TimeDelta::try_hours(1)?)
    }

    fn last_hour(self) -> Option<Self> {
        self.checked_sub_signed(TimeDelta::try_hours(1)?)
    }

    fn next_week(self) -> Option<Self> {
        shift_days(self, 7)
    }

    fn last_week(self) -> Option<Self> {
        shift_days(self, -7)
    }

    fn next_month(self) -> Option<Self> {
        shift_months(self, 1)
    }

    fn previous_month(self) -> Option<Self> {
        shift_months(self, -1)
    }

    fn next_year(self) -> Option<Self> {
        shift_months(self, 12)
    }

    fn last_year(self) -> Option<Self> {
        shift_months(self, -12)
    }

    fn days_ago(self, days: i32) -> Option<Self> {
        shift_days(self, -i64::from(days))
    }

    fn days_after(self, days: i32) -> Option<Self> {
        shift_days(self, i64::from(days))
    }

    fn weeks_ago(self, weeks: i32) -> Option<Self> {
        shift_days(self, -i64::from(weeks) * 7)
    }

    fn weeks_after(self, weeks: i32) -> Option<Self> {
        shift_days(self, i64::from(weeks) * 7)
    }

    fn months_ago(self, months: i32) -> Option<Self> {
        shift_months(self, -i64::from(months))
    }

    fn months_after(self, months: i32) -> Option<Self> {
        shift_months(self, i64::from(months))
    }

    fn years_ago(self, years: i32) -> Option<Self> {
        shift_months(self, -i64::from(years) * 12)
    }

    fn years_after(self, years: i32) -> Option<Self> {
        shift_months(self, i64::from(years) * 12)
    }

    fn first_day_of_month(self) -> Self {
        let date = self.date();
        date.with_day(1).unwrap_or(date).and_time(NaiveTime::MIN)
    }

    fn last_day_of_month(self) -> Option<Self> {
        self.first_day_of_month().next_month()?.yesterday()
    }

    fn days_in_month(self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    fn days_left(self, target: Self) -> i64 {
        (target.date() - self.date()).num_days()
    }

    fn is_between(self, start: Self, end: Self) -> bool {
        self >= start && self <= end
    }

    fn is_before(self, target: Self) -> bool {
        self < target
    }

    fn is_after(self, target: Self) -> bool {
        self > target
    }

    fn is_year_leap(self) -> bool {
        is_leap_year(self.year())
    }

    fn next_leap_year(self) -> Option<Self> {
        leap_day(next_leap_year(self.year())?)
    }

    fn previous_leap_year(self) -> Option<Self> {
        leap_day(previous_leap_year(self.year())?)
    }

    fn age_at(self, today: NaiveDate) -> i32 {
        today.year() - self.year()
    }

    fn age(self) -> i32 {
        self.age_at(Local::now().date_naive())
    }

    fn day_name(self) -> String {
        self.format("%A").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn leap_year_rules() {
        assert!(is_leap_year(2024));
        assert!(is_leap_year(2000));
        assert!(!is_leap_year(1900));
        assert!(!is_leap_year(2023));
    }

    #[test]
    fn leap_year_search_includes_start() {
        assert_eq!(next_leap_year(2024), Some(2024));
        assert_eq!(next_leap_year(2097), Some(2104));
        assert_eq!(previous_leap_year(2023), Some(2020));
        assert_eq!(previous_leap_year(1903), Some(1896));
    }

    #[test]
    fn day_and_hour_shifts() {
        let base = at(2024, 2, 28, 23);
        assert_eq!(base.tomorrow(), Some(at(2024, 2, 29, 23)));
        assert_eq!(base.yesterday(), Some(at(2024, 2, 27, 23)));
        assert_eq!(base.next_hour(), Some(at(2024, 2, 29, 0)));
        assert_eq!(base.last_hour(), Some(at(2024, 2, 28, 22)));
        assert_eq!(base.next_week(), Some(at(2024, 3, 6, 23)));
        assert_eq!(base.weeks_ago(2), Some(at(2024, 2, 14, 23)));
    }

    #[test]
    fn month_shifts_clamp_to_month_end() {
        let base = at(2024, 1, 31, 8);
        assert_eq!(base.next_month(), Some(at(2024, 2, 29, 8)));
        assert_eq!(base.months_after(3), Some(at(2024, 4, 30, 8)));
        assert_eq!(at(2024, 3, 31, 8).previous_month(), Some(at(2024, 2, 29, 8)));
    }

    #[test]
    fn year_shifts_move_whole_years() {
        let leap_day = at(2024, 2, 29, 0);
        assert_eq!(leap_day.next_year(), Some(at(2025, 2, 28, 0)));
        assert_eq!(leap_day.last_year(), Some(at(2023, 2, 28, 0)));
        assert_eq!(leap_day.years_after(4), Some(at(2028, 2, 29, 0)));
        assert_eq!(leap_day.years_ago(1), Some(at(2023, 2, 28, 0)));
    }

    #[test]
    fn month_bounds() {
        let date = at(2023, 2, 14, 15);
        assert_eq!(date.first_day_of_month(), at(2023, 2, 1, 0));
        assert_eq!(date.last_day_of_month(), Some(at(2023, 2, 28, 0)));
        assert_eq!(date.days_in_month(), 28);
        assert_eq!(at(2024, 12, 5, 0).last_day_of_month(), Some(at(2024, 12, 31, 0)));
    }

    #[test]
    fn days_left_ignores_time_of_day() {
        let start = at(2024, 1, 1, 23);
        assert_eq!(start.days_left(at(2024, 1, 3, 1)), 2);
        assert_eq!(start.days_left(at(2023, 12, 31, 0)), -1);
    }

    #[test]
    fn comparisons() {
        let date = at(2024, 6, 1, 0);
        assert!(date.is_between(date, at(2024, 6, 2, 0)));
        assert!(!date.is_between(at(2024, 6, 2, 0), at(2024, 6, 3, 0)));
        assert!(date.is_before(at(2024, 6, 1, 1)));
        assert!(date.is_after(at(2024, 5, 31, 23)));
    }

    #[test]
    fn leap_day_lookup() {
        let date = at(2021, 7, 4, 12);
        assert!(!date.is_year_leap());
        assert_eq!(date.next_leap_year(), Some(at(2024, 2, 29, 0)));
        assert_eq!(date.previous_leap_year(), Some(at(2020, 2, 29, 0)));
    }

    #[test]
    fn age_and_day_name() {
        let birth = at(1990, 12, 31, 0);
        assert_eq!(birth.age_at(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()), 34);
        assert_eq!(at(2024, 6, 3, 0).day_name(), "Monday");
    }

    #[test]
    fn shifts_out_of_range_return_none() {
        assert_eq!(NaiveDateTime::MAX.tomorrow(), None);
        assert_eq!(NaiveDateTime::MIN.previous_month(), None);
    }
}
