//! The dashboard overview: a fixed composite report shown on the home page.
//!
//! Unlike the reports in [crate::report], the dashboard ignores user-chosen
//! windows. It always shows the all-time balance, this month's totals, a
//! six month cash-flow trend, this month's expense breakdown, and the most
//! recent transactions.

mod core;

pub use core::{
    CategoryShare, Dashboard, DashboardTotals, MonthlyCashFlow, RECENT_TRANSACTION_COUNT,
    TREND_MONTH_COUNT, build_dashboard,
};
