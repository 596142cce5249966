// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::query::newest_first;
use serde::Serialize;
use servicedesk_domain::{DirectoryUser, Ticket, TicketFilter, display_name_or};
use time::OffsetDateTime;

/// Display name used when a requester is missing from the directory.
pub const UNKNOWN_USER: &str = "Unknown";

/// Display name used for tickets without an assignee.
pub const UNASSIGNED: &str = "Unassigned";

/// One flat export row per ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExportRow {
    pub ticket_number: String,
    pub title: String,
    pub status: String,
    pub priority: String,
    pub impact: String,
    pub urgency: String,
    pub service_level: String,
    pub category: String,
    pub subcategory: String,
    pub requester: String,
    pub assignee: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub due_date: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub closed_at: Option<OffsetDateTime>,
}

/// Flattens the tickets matching `filter` into export rows, newest first.
///
/// Requester and assignee ids are replaced by directory display names.
#[must_use]
pub fn export_ticket_report(
    tickets: &[Ticket],
    filter: &TicketFilter,
    users: &[DirectoryUser],
) -> Vec<ExportRow> {
    let matches = filter.predicate();
    let mut selected: Vec<&Ticket> = tickets.iter().filter(|&t| matches(t)).collect();
    selected.sort_by(|a, b| newest_first(a, b));

    selected
        .into_iter()
        .map(|ticket| ExportRow {
            ticket_number: ticket.ticket_number.to_string(),
            title: ticket.title.clone(),
            status: ticket.status.to_string(),
            priority: ticket.priority.to_string(),
            impact: ticket.impact.to_string(),
            urgency: ticket.urgency.to_string(),
            service_level: ticket.service_level.to_string(),
            category: ticket.category.display_name().to_string(),
            subcategory: ticket.subcategory.clone().unwrap_or_default(),
            requester: display_name_or(users, Some(&ticket.requester_id), UNKNOWN_USER)
                .to_string(),
            assignee: ticket.assignee_id.as_deref().map_or_else(
                || UNASSIGNED.to_string(),
                |id| display_name_or(users, Some(id), UNKNOWN_USER).to_string(),
            ),
            created_at: ticket.created_at,
            due_date: ticket.due_date,
            closed_at: ticket.closed_at,
        })
        .collect()
}
