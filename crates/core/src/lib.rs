// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apply;
mod command;
mod error;
mod export;
mod query;
mod report;
mod saved_search;
mod state;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use apply::{apply, comment_added_event, create_ticket};
pub use command::{NewTicket, TicketCommand, TicketUpdate};
pub use error::CoreError;
pub use export::{ExportRow, UNASSIGNED, UNKNOWN_USER, export_ticket_report};
pub use query::{newest_first, select_breached, select_visible};
pub use report::{
    BreakdownEntry, RECENT_WINDOW_DAYS, RESOLUTION_TARGET_DAYS, ReportSnapshot, ReportSummary,
    ResolutionTrendPoint, SlaMetrics, StatusCount, TREND_WINDOW_MONTHS, TeamPerformance,
    TicketTrendPoint, build_ticket_report,
};
pub use saved_search::{NewSavedSearch, SavedSearch, SavedSearchUpdate, order_for, visible_to};
pub use state::TransitionResult;
