//! Date parsing and calendar arithmetic.
//!
//! `normalize_date` is the only place GEDCOM date payloads are parsed. It is
//! total: any input yields either a valid date or `GedDate::Invalid`.

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::models::date::GedDate;

const MONTHS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Parse a `DD MON YYYY` payload such as `06 JUN 0260`
#[must_use]
pub fn parse_date_string(s: &str) -> Option<NaiveDate> {
    let mut parts = s.split_whitespace();
    let (day, month, year) = (parts.next()?, parts.next()?, parts.next()?);
    if parts.next().is_some() || day.len() > 2 || year.len() > 4 {
        return None;
    }

    if !(is_digits(day) && is_digits(year)) {
        return None;
    }

    let day: u32 = day.parse().ok()?;
    let month = MONTHS
        .iter()
        .position(|m| m.eq_ignore_ascii_case(month))
        .and_then(|idx| u32::try_from(idx + 1).ok())?;
    let year: i32 = year.parse().ok()?;

    NaiveDate::from_ymd_opt(year, month, day)
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// Normalize a date payload, falling back to the INVALID marker
#[must_use]
pub fn normalize_date(payload: &str) -> GedDate {
    parse_date_string(payload).map_or_else(
        || GedDate::Invalid(payload.to_string()),
        GedDate::Valid,
    )
}

/// Whole years elapsed from `from` to `to`.
///
/// One is subtracted when `(to.month, to.day) < (from.month, from.day)`, so on
/// the anniversary itself the full difference counts.
#[must_use]
pub fn years_between(from: NaiveDate, to: NaiveDate) -> i32 {
    let years = to.year() - from.year();
    if (to.month(), to.day()) < (from.month(), from.day()) {
        years - 1
    } else {
        years
    }
}

/// `date` shifted forward by whole months, clamped to the end of the month
#[must_use]
pub fn add_months(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    date.checked_add_months(Months::new(months))
}

/// Signed number of days from `from` to `to`
#[must_use]
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

/// Whether `date` falls within the `days` days ending at `today` (inclusive)
#[must_use]
pub fn within_last_days(date: NaiveDate, today: NaiveDate, days: u64) -> bool {
    today
        .checked_sub_days(Days::new(days))
        .is_some_and(|start| start <= date && date <= today)
}

/// Next occurrence of the month/day of `date` on or after `today`.
///
/// 29 February falls on 1 March in non-leap years.
#[must_use]
pub fn next_anniversary(date: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
    let on_year = |year: i32| {
        NaiveDate::from_ymd_opt(year, date.month(), date.day())
            .or_else(|| NaiveDate::from_ymd_opt(year, 3, 1))
    };
    let this_year = on_year(today.year())?;
    if this_year >= today {
        Some(this_year)
    } else {
        on_year(today.year() + 1)
    }
}

/// Whether the month/day of `date` recurs within the next `days` days (today included)
#[must_use]
pub fn within_next_days(date: NaiveDate, today: NaiveDate, days: i64) -> bool {
    next_anniversary(date, today).is_some_and(|next| days_between(today, next) <= days)
}
