//! Date parsing and calendar-month helpers shared by the aggregators.
//!
//! All user-facing dates use the `YYYY-MM-DD` format. Months are represented
//! as a [Date] pinned to the first day of the month so they can be compared
//! and sorted like any other date.

use time::{Date, Month, format_description::BorrowedFormatItem, macros::format_description};

use crate::Error;

const DATE_FORMAT: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parse a `YYYY-MM-DD` date string.
///
/// # Errors
/// Returns [Error::InvalidDate] with the original text if it cannot be parsed
/// as a calendar date.
pub fn parse_date(text: &str) -> Result<Date, Error> {
    Date::parse(text.trim(), DATE_FORMAT).map_err(|_| Error::InvalidDate(text.to_owned()))
}

/// The first calendar day of the month containing `date`.
pub fn month_start(date: Date) -> Date {
    date.replace_day(1).expect("day 1 is valid in every month")
}

/// The last calendar day of the month containing `date`.
pub fn month_end(date: Date) -> Date {
    date.replace_day(days_in_month(date.year(), date.month()))
        .expect("the day count comes from the calendar")
}

/// Shift a date by a whole number of months, clamping the day to the length
/// of the target month (e.g. 31 January shifted by one month is 28 or 29
/// February).
pub fn shift_months(date: Date, months: i32) -> Date {
    let month_index = date.year() * 12 + i32::from(u8::from(date.month())) - 1 + months;
    let year = month_index.div_euclid(12);
    let month = Month::try_from((month_index.rem_euclid(12) + 1) as u8)
        .expect("month index is always in 1..=12");
    let day = date.day().min(days_in_month(year, month));

    Date::from_calendar_date(year, month, day).expect("day is clamped to the month length")
}

/// The full English name of a month, e.g. "January".
pub fn month_name(month: Month) -> &'static str {
    match month {
        Month::January => "January",
        Month::February => "February",
        Month::March => "March",
        Month::April => "April",
        Month::May => "May",
        Month::June => "June",
        Month::July => "July",
        Month::August => "August",
        Month::September => "September",
        Month::October => "October",
        Month::November => "November",
        Month::December => "December",
    }
}

/// The three-letter abbreviation of a month, e.g. "Jan".
pub fn month_abbreviation(month: Month) -> &'static str {
    &month_name(month)[..3]
}

/// A short month label for chart axes and monthly report rows, e.g.
/// "Mar 2024".
pub fn month_label(date: Date) -> String {
    format!("{} {}", month_abbreviation(date.month()), date.year())
}

fn days_in_month(year: i32, month: Month) -> u8 {
    let first = Date::from_calendar_date(year, month, 1).expect("day 1 is valid in every month");
    let first_of_next = match month {
        Month::December => Date::from_calendar_date(year + 1, Month::January, 1),
        _ => Date::from_calendar_date(year, month.next(), 1),
    }
    .expect("day 1 is valid in every month");

    (first_of_next - first).whole_days() as u8
}
