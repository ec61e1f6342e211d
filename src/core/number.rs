//! Extension methods for `i32`.
//!
//! Relative-date helpers (`days_ago`, `months_after`, ...) are anchored at
//! the local clock; use the `DateTimeExt` equivalents with an explicit
//! anchor when the result must be reproducible.

use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};

use crate::bytes::{Base64Formatting, BytesExt};
use crate::date::{self, DateTimeExt};
use crate::locale::Locale;
use crate::random;
use crate::storage::{self, DigitalStorage};

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

fn usize_length(length: i32) -> usize {
    usize::try_from(length).unwrap_or(0)
}

pub trait IntExt: Sized {
    fn is_even(self) -> bool;
    fn is_odd(self) -> bool;
    fn is_greater_than(self, target: Self) -> bool;
    fn is_less_than(self, target: Self) -> bool;
    fn is_equal_to(self, target: Self) -> bool;

    fn is_leap_year(self) -> bool;
    /// First leap year at or after `self`.
    fn next_leap_year(self) -> Option<Self>;
    /// Last leap year at or before `self`.
    fn previous_leap_year(self) -> Option<Self>;

    /// Midnight `self` days before today.
    fn days_ago(self) -> Option<NaiveDateTime>;
    fn days_after(self) -> Option<NaiveDateTime>;
    fn weeks_ago(self) -> Option<NaiveDateTime>;
    fn weeks_after(self) -> Option<NaiveDateTime>;
    fn months_ago(self) -> Option<NaiveDateTime>;
    fn months_after(self) -> Option<NaiveDateTime>;
    fn years_ago(self) -> Option<NaiveDateTime>;
    fn years_after(self) -> Option<NaiveDateTime>;
    /// `0001-01-01T00:00:00` plus `self` days.
    fn days(self) -> Option<NaiveDateTime>;

    /// `N0` formatting with the locale's group separator.
    fn separate_thousands(self, locale: &Locale) -> String;

    /// Random decimal digits; non-positive lengths give `""`.
    fn random_digits(self) -> String;
    fn generate_random_string(self, upper: bool, include_digits: bool) -> String;

    fn to_kb(self, from: DigitalStorage) -> f64;
    fn to_mb(self, from: DigitalStorage) -> f64;
    fn to_gb(self, from: DigitalStorage) -> f64;
    fn to_tb(self, from: DigitalStorage) -> f64;

    /// Base64 of the little-endian bytes.
    fn to_base64(self, formatting: Base64Formatting) -> String;
}

impl IntExt for i32 {
    fn is_even(self) -> bool {
        self % 2 == 0
    }

    fn is_odd(self) -> bool {
        self % 2 != 0
    }

    fn is_greater_than(self, target: Self) -> bool {
        self > target
    }

    fn is_less_than(self, target: Self) -> bool {
        self < target
    }

    fn is_equal_to(self, target: Self) -> bool {
        self == target
    }

    fn is_leap_year(self) -> bool {
        date::is_leap_year(self)
    }

    fn next_leap_year(self) -> Option<Self> {
        date::next_leap_year(self)
    }

    fn previous_leap_year(self) -> Option<Self> {
        date::previous_leap_year(self)
    }

    fn days_ago(self) -> Option<NaiveDateTime> {
        Local::now()
            .date_naive()
            .and_time(NaiveTime::MIN)
            .days_ago(self)
    }

    fn days_after(self) -> Option<NaiveDateTime> {
        now().days_after(self)
    }

    fn weeks_ago(self) -> Option<NaiveDateTime> {
        now().weeks_ago(self)
    }

    fn weeks_after(self) -> Option<NaiveDateTime> {
        now().weeks_after(self)
    }

    fn months_ago(self) -> Option<NaiveDateTime> {
        now().months_ago(self)
    }

    fn months_after(self) -> Option<NaiveDateTime> {
        now().months_after(self)
    }

    fn years_ago(self) -> Option<NaiveDateTime> {
        now().years_ago(self)
    }

    fn years_after(self) -> Option<NaiveDateTime> {
        now().years_after(self)
    }

    fn days(self) -> Option<NaiveDateTime> {
        let epoch = NaiveDate::from_ymd_opt(1, 1, 1)?.and_time(NaiveTime::MIN);
        epoch.days_after(self)
    }

    fn separate_thousands(self, locale: &Locale) -> String {
        locale.group_digits(i64::from(self))
    }

    fn random_digits(self) -> String {
        random::random_digits(usize_length(self))
    }

    fn generate_random_string(self, upper: bool, include_digits: bool) -> String {
        random::generate_random_string(usize_length(self), upper, include_digits)
    }

    fn to_kb(self, from: DigitalStorage) -> f64 {
        storage::to_kb(self, from)
    }

    fn to_mb(self, from: DigitalStorage) -> f64 {
        storage::to_mb(self, from)
    }

    fn to_gb(self, from: DigitalStorage) -> f64 {
        storage::to_gb(self, from)
    }

    fn to_tb(self, from: DigitalStorage) -> f64 {
        storage::to_tb(self, from)
    }

    fn to_base64(self, formatting: Base64Formatting) -> String {
        self.to_le_bytes().to_base64(formatting)
    }
}
