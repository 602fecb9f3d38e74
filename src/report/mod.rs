//! Time-windowed financial reports.
//!
//! This module contains:
//! - The date-range resolver that turns named or custom selectors into
//!   concrete report windows
//! - The four report builders: summary, detailed, category, and monthly
//!
//! The builders are pure functions over a ledger slice the caller fetched
//! once; grouping, sort order, and field names are the wire contract the UI
//! and export layers depend on.

mod category;
mod detailed;
mod monthly;
mod summary;
mod window;

use serde::{Deserialize, Serialize};

use crate::transaction::Transaction;

pub use category::{CategoryReport, CategoryStats};
pub use detailed::{DetailedReport, DetailedTotals};
pub use monthly::{MonthlyReport, MonthlyTotal, SavingsBucket, savings_bucket, savings_rate};
pub use summary::{CategoryTotal, DailyTotal, KindTotals, SummaryReport};
pub use window::{RangePreset, ReportWindow, resolve_window};

/// The report shapes a caller can request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    /// Totals per kind, category breakdown, and daily trends.
    Summary,
    /// The raw transaction list plus totals.
    Detailed,
    /// Per-category statistics.
    Category,
    /// Per-month totals with savings rates.
    Monthly,
}

impl ReportKind {
    /// Parse a report type key, falling back to [ReportKind::Summary] for
    /// unknown keys rather than failing.
    pub fn from_key(key: &str) -> Self {
        match key {
            "summary" => Self::Summary,
            "detailed" => Self::Detailed,
            "category" => Self::Category,
            "monthly" => Self::Monthly,
            other => {
                tracing::debug!("unknown report type {other:?}, defaulting to summary");
                Self::Summary
            }
        }
    }
}

/// A generated report. The serialized form is tagged with a `type` field
/// matching the requested [ReportKind].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Report {
    /// Totals, category breakdown, and daily trends.
    Summary(SummaryReport),
    /// The raw transaction list plus totals.
    Detailed(DetailedReport),
    /// Per-category statistics.
    Category(CategoryReport),
    /// Per-month totals with savings rates.
    Monthly(MonthlyReport),
}

/// Build a report of the requested shape from a resolved window and the
/// ledger rows for that window.
///
/// The builders are pure: calling this twice with the same slice yields the
/// same report, and the input order of `ledger` does not matter.
pub fn build_report(kind: ReportKind, window: ReportWindow, ledger: &[Transaction]) -> Report {
    match kind {
        ReportKind::Summary => Report::Summary(summary::build(window, ledger)),
        ReportKind::Detailed => Report::Detailed(detailed::build(window, ledger)),
        ReportKind::Category => Report::Category(category::build(window, ledger)),
        ReportKind::Monthly => Report::Monthly(monthly::build(window, ledger)),
    }
}
