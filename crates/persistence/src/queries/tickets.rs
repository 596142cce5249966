// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ticket, history and sequence queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use servicedesk_audit::HistoryEntry;
use servicedesk_domain::Ticket;
use tracing::debug;

use crate::data_models::{
    parse_optional_timestamp, parse_stored, parse_timestamp,
};
use crate::diesel_schema::{ticket_history, ticket_sequences, tickets};
use crate::error::PersistenceError;

/// Diesel Queryable struct for ticket rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = tickets)]
struct TicketRow {
    ticket_id: i64,
    ticket_number: String,
    title: String,
    description: String,
    category: String,
    subcategory: Option<String>,
    priority: String,
    impact: String,
    urgency: String,
    service_level: String,
    status: String,
    requester_id: String,
    assignee_id: Option<String>,
    resolution: Option<String>,
    created_at: String,
    updated_at: String,
    due_date: Option<String>,
    closed_at: Option<String>,
    first_responded_at: Option<String>,
    version: i64,
}

impl TryFrom<TicketRow> for Ticket {
    type Error = PersistenceError;

    fn try_from(row: TicketRow) -> Result<Self, Self::Error> {
        Ok(Self {
            ticket_id: Some(row.ticket_id),
            ticket_number: parse_stored(&row.ticket_number)?,
            title: row.title,
            description: row.description,
            category: parse_stored(&row.category)?,
            subcategory: row.subcategory,
            priority: parse_stored(&row.priority)?,
            impact: parse_stored(&row.impact)?,
            urgency: parse_stored(&row.urgency)?,
            service_level: parse_stored(&row.service_level)?,
            status: parse_stored(&row.status)?,
            requester_id: row.requester_id,
            assignee_id: row.assignee_id,
            resolution: row.resolution,
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
            due_date: parse_optional_timestamp(row.due_date.as_deref())?,
            closed_at: parse_optional_timestamp(row.closed_at.as_deref())?,
            first_responded_at: parse_optional_timestamp(row.first_responded_at.as_deref())?,
            version: row.version,
        })
    }
}

/// Diesel Queryable struct for history rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = ticket_history)]
struct HistoryRow {
    history_id: i64,
    ticket_id: i64,
    sequence: i64,
    field: String,
    old_value: Option<String>,
    new_value: Option<String>,
    changed_by: String,
    changed_at: String,
}

impl TryFrom<HistoryRow> for HistoryEntry {
    type Error = PersistenceError;

    fn try_from(row: HistoryRow) -> Result<Self, Self::Error> {
        Ok(Self {
            history_id: row.history_id,
            ticket_id: row.ticket_id,
            sequence: row.sequence,
            field: row.field,
            old_value: row.old_value,
            new_value: row.new_value,
            changed_by: row.changed_by,
            changed_at: parse_timestamp(&row.changed_at)?,
        })
    }
}

/// Retrieves a ticket by storage key.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if no such ticket exists.
pub fn get_ticket(conn: &mut SqliteConnection, ticket_id: i64) -> Result<Ticket, PersistenceError> {
    debug!(ticket_id, "Loading ticket");

    let row: Option<TicketRow> = tickets::table
        .filter(tickets::ticket_id.eq(ticket_id))
        .select(TicketRow::as_select())
        .first(conn)
        .optional()?;

    row.ok_or_else(|| PersistenceError::not_found("Ticket", ticket_id))?
        .try_into()
}

/// Retrieves every ticket, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row is invalid.
pub fn list_tickets(conn: &mut SqliteConnection) -> Result<Vec<Ticket>, PersistenceError> {
    let rows: Vec<TicketRow> = tickets::table
        .order(tickets::ticket_id.asc())
        .select(TicketRow::as_select())
        .load(conn)?;
    debug!(count = rows.len(), "Loaded tickets");

    rows.into_iter().map(Ticket::try_from).collect()
}

/// Retrieves the tickets a user requested or is assigned to.
///
/// # Errors
///
/// Returns an error if the query fails or a row is invalid.
pub fn list_tickets_for_party(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> Result<Vec<Ticket>, PersistenceError> {
    let rows: Vec<TicketRow> = tickets::table
        .filter(
            tickets::requester_id
                .eq(user_id)
                .or(tickets::assignee_id.eq(user_id)),
        )
        .order(tickets::ticket_id.asc())
        .select(TicketRow::as_select())
        .load(conn)?;

    rows.into_iter().map(Ticket::try_from).collect()
}

/// Returns the stored version of a ticket, if it exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_ticket_version(
    conn: &mut SqliteConnection,
    ticket_id: i64,
) -> Result<Option<i64>, PersistenceError> {
    Ok(tickets::table
        .filter(tickets::ticket_id.eq(ticket_id))
        .select(tickets::version)
        .first(conn)
        .optional()?)
}

/// Retrieves a ticket's history ordered by sequence.
///
/// # Errors
///
/// Returns an error if the query fails or a row is invalid.
pub fn get_ticket_history(
    conn: &mut SqliteConnection,
    ticket_id: i64,
) -> Result<Vec<HistoryEntry>, PersistenceError> {
    let rows: Vec<HistoryRow> = ticket_history::table
        .filter(ticket_history::ticket_id.eq(ticket_id))
        .order(ticket_history::sequence.asc())
        .select(HistoryRow::as_select())
        .load(conn)?;

    rows.into_iter().map(HistoryEntry::try_from).collect()
}

/// Returns the highest history sequence for a ticket, 0 if none.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn last_history_sequence(
    conn: &mut SqliteConnection,
    ticket_id: i64,
) -> Result<i64, PersistenceError> {
    let last: Option<i64> = ticket_history::table
        .filter(ticket_history::ticket_id.eq(ticket_id))
        .select(diesel::dsl::max(ticket_history::sequence))
        .first(conn)?;
    Ok(last.unwrap_or(0))
}

/// Returns the last ticket sequence issued for `year`, if any.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn current_ticket_sequence(
    conn: &mut SqliteConnection,
    year: i32,
) -> Result<Option<i64>, PersistenceError> {
    Ok(ticket_sequences::table
        .filter(ticket_sequences::year.eq(year))
        .select(ticket_sequences::last_value)
        .first(conn)
        .optional()?)
}
