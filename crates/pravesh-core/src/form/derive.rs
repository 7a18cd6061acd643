//! Derivation of computed fields.
//!
//! Derivation is idempotent and has no failure mode: absent inputs yield an
//! empty or `None` derived value, never an error.

use chrono::{Datelike, NaiveDate};

/// Title options offered for a gender selection.
pub const TITLES_MALE: &[&str] = &["Mr."];
pub const TITLES_FEMALE: &[&str] = &["Ms.", "Mrs."];
pub const TITLES_OTHER: &[&str] = &["Mx."];

/// ## Summary
/// Joins the three name parts with single spaces and trims the edges.
///
/// Interior whitespace is preserved: an empty middle name leaves a double
/// space between first and last name.
#[must_use]
pub fn full_name(first: &str, middle: &str, last: &str) -> String {
    format!("{first} {middle} {last}").trim().to_string()
}

/// ## Summary
/// Whole calendar years elapsed from `dob` to `today`, decremented by one
/// when today's (month, day) precedes the birth (month, day).
///
/// A `dob` in the future yields a negative value; callers decide whether
/// that is acceptable.
#[must_use]
pub fn age_on(dob: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - dob.year();
    if (today.month(), today.day()) < (dob.month(), dob.day()) {
        age -= 1;
    }
    age
}

/// ## Summary
/// Parses a date-of-birth field in the form's `YYYY-MM-DD` wire format.
#[must_use]
pub fn parse_dob(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

/// ## Summary
/// Derives the age field from a raw date-of-birth value; `None` when the
/// value is absent or not a calendar date.
#[must_use]
pub fn age_from_field(dob: &str, today: NaiveDate) -> Option<i32> {
    parse_dob(dob).map(|date| age_on(date, today))
}

/// ## Summary
/// Title options as a function of gender.
#[must_use]
pub fn title_options(gender: &str) -> &'static [&'static str] {
    match gender {
        "Male" => TITLES_MALE,
        "Female" => TITLES_FEMALE,
        _ => TITLES_OTHER,
    }
}
