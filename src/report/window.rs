//! Resolves named or custom date-range selectors into concrete report
//! windows.

use serde::{Deserialize, Serialize};
use time::{Date, Month};

use crate::{
    Error,
    dates::{month_abbreviation, month_end, month_name, month_start, parse_date, shift_months},
};

/// The named date ranges a report can be requested for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RangePreset {
    /// The first to the last calendar day of the current month.
    ThisMonth,
    /// The first to the last day of the previous calendar month.
    LastMonth,
    /// 1 January to 31 December of the current year.
    ThisYear,
    /// 1 January to 31 December of the previous year.
    LastYear,
    /// From six months ago to today.
    #[serde(rename = "last_6_months")]
    LastSixMonths,
    /// A caller-supplied start and end date.
    Custom,
}

impl RangePreset {
    /// Parse a range key, falling back to [RangePreset::ThisMonth] for
    /// unknown keys rather than failing.
    pub fn from_key(key: &str) -> Self {
        match key {
            "this_month" => Self::ThisMonth,
            "last_month" => Self::LastMonth,
            "this_year" => Self::ThisYear,
            "last_year" => Self::LastYear,
            "last_6_months" => Self::LastSixMonths,
            "custom" => Self::Custom,
            other => {
                tracing::debug!("unknown date range key {other:?}, defaulting to this_month");
                Self::ThisMonth
            }
        }
    }

    /// The key used on the wire.
    pub fn as_key(self) -> &'static str {
        match self {
            Self::ThisMonth => "this_month",
            Self::LastMonth => "last_month",
            Self::ThisYear => "this_year",
            Self::LastYear => "last_year",
            Self::LastSixMonths => "last_6_months",
            Self::Custom => "custom",
        }
    }
}

/// A resolved report window: concrete inclusive boundary dates plus a human
/// label for display.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportWindow {
    /// The first day of the window.
    pub start: Date,
    /// The last day of the window (inclusive).
    pub end: Date,
    /// A display label such as "March 2024" or "Jan - Mar 2024".
    pub label: String,
}

/// Resolve a range selector into a concrete window as of `today`.
///
/// The custom dates are only read when the preset is [RangePreset::Custom].
///
/// # Errors
/// For custom ranges, this function will return a:
/// - [Error::MissingField] if either date is absent or empty,
/// - or [Error::InvalidDate] if either date cannot be parsed,
/// - or [Error::EmptyDateRange] if the range does not end after it starts.
pub fn resolve_window(
    preset: RangePreset,
    custom_start: Option<&str>,
    custom_end: Option<&str>,
    today: Date,
) -> Result<ReportWindow, Error> {
    let (start, end) = match preset {
        RangePreset::ThisMonth => (month_start(today), month_end(today)),
        RangePreset::LastMonth => {
            let in_last_month = shift_months(month_start(today), -1);
            (in_last_month, month_end(in_last_month))
        }
        RangePreset::ThisYear => year_bounds(today.year()),
        RangePreset::LastYear => year_bounds(today.year() - 1),
        RangePreset::LastSixMonths => (shift_months(today, -6), today),
        RangePreset::Custom => {
            let start_text = custom_start
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .ok_or(Error::MissingField("start date"))?;
            let end_text = custom_end
                .map(str::trim)
                .filter(|text| !text.is_empty())
                .ok_or(Error::MissingField("end date"))?;

            let start = parse_date(start_text)?;
            let end = parse_date(end_text)?;

            if start >= end {
                return Err(Error::EmptyDateRange { start, end });
            }

            (start, end)
        }
    };

    Ok(ReportWindow {
        start,
        end,
        label: window_label(start, end),
    })
}

fn year_bounds(year: i32) -> (Date, Date) {
    let start = Date::from_calendar_date(year, Month::January, 1)
        .expect("1 January is valid in every year");
    let end = Date::from_calendar_date(year, Month::December, 31)
        .expect("31 December is valid in every year");

    (start, end)
}

/// Format the display label for a window.
///
/// Windows within one calendar month use the full month name; windows within
/// one year abbreviate both months; anything longer spells out both
/// month-year pairs.
fn window_label(start: Date, end: Date) -> String {
    if start.year() == end.year() && start.month() == end.month() {
        format!("{} {}", month_name(start.month()), start.year())
    } else if start.year() == end.year() {
        format!(
            "{} - {} {}",
            month_abbreviation(start.month()),
            month_abbreviation(end.month()),
            start.year()
        )
    } else {
        format!(
            "{} {} - {} {}",
            month_abbreviation(start.month()),
            start.year(),
            month_abbreviation(end.month()),
            end.year()
        )
    }
}
