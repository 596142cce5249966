// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ticket writes: number allocation, inserts, versioned updates, history
//! and outbox rows.
//!
//! None of these open a transaction; callers wrap them so that a ticket
//! row, its history and its events commit together.

use diesel::SqliteConnection;
use diesel::prelude::*;
use servicedesk_audit::{DomainEvent, HistoryDraft, HistoryEntry, RecordedEvent};
use servicedesk_domain::{Ticket, TicketNumber};
use tracing::{debug, info};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{format_optional_timestamp, format_timestamp};
use crate::diesel_schema::{domain_events, ticket_history, ticket_sequences, tickets};
use crate::error::PersistenceError;

/// Allocates the next ticket number for `year`.
///
/// The per-year counter row is created on first use and incremented on
/// every later call. A rolled-back transaction releases the increment.
///
/// # Errors
///
/// Returns an error if the upsert fails or the counter overflows the
/// six-digit sequence.
pub fn next_ticket_number(
    conn: &mut SqliteConnection,
    year: i32,
) -> Result<TicketNumber, PersistenceError> {
    let value: i64 = diesel::insert_into(ticket_sequences::table)
        .values((
            ticket_sequences::year.eq(year),
            ticket_sequences::last_value.eq(1_i64),
        ))
        .on_conflict(ticket_sequences::year)
        .do_update()
        .set(ticket_sequences::last_value.eq(ticket_sequences::last_value + 1_i64))
        .returning(ticket_sequences::last_value)
        .get_result(conn)?;

    let sequence: u32 = u32::try_from(value).map_err(|_| {
        PersistenceError::ReconstructionError(format!(
            "ticket sequence {value} for {year} is out of range"
        ))
    })?;
    debug!(year, sequence, "Allocated ticket sequence");

    TicketNumber::new(year, sequence)
        .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))
}

/// Inserts a new ticket and returns its storage key.
///
/// # Errors
///
/// Returns an error if the ticket already has a key or the insert fails.
pub fn insert_ticket(conn: &mut SqliteConnection, ticket: &Ticket) -> Result<i64, PersistenceError> {
    if ticket.ticket_id.is_some() {
        return Err(PersistenceError::ReconstructionError(format!(
            "ticket {} is already stored",
            ticket.ticket_number
        )));
    }

    diesel::insert_into(tickets::table)
        .values((
            tickets::ticket_number.eq(ticket.ticket_number.to_string()),
            tickets::title.eq(&ticket.title),
            tickets::description.eq(&ticket.description),
            tickets::category.eq(ticket.category.as_str()),
            tickets::subcategory.eq(ticket.subcategory.as_deref()),
            tickets::priority.eq(ticket.priority.as_str()),
            tickets::impact.eq(ticket.impact.as_str()),
            tickets::urgency.eq(ticket.urgency.as_str()),
            tickets::service_level.eq(ticket.service_level.as_str()),
            tickets::status.eq(ticket.status.as_str()),
            tickets::requester_id.eq(&ticket.requester_id),
            tickets::assignee_id.eq(ticket.assignee_id.as_deref()),
            tickets::resolution.eq(ticket.resolution.as_deref()),
            tickets::created_at.eq(format_timestamp(ticket.created_at)?),
            tickets::updated_at.eq(format_timestamp(ticket.updated_at)?),
            tickets::due_date.eq(format_optional_timestamp(ticket.due_date)?),
            tickets::closed_at.eq(format_optional_timestamp(ticket.closed_at)?),
            tickets::first_responded_at.eq(format_optional_timestamp(ticket.first_responded_at)?),
            tickets::version.eq(ticket.version),
        ))
        .execute(conn)?;

    let ticket_id: i64 = get_last_insert_rowid(conn)?;
    info!(
        ticket_id,
        ticket_number = %ticket.ticket_number,
        requester_id = %ticket.requester_id,
        "Inserted ticket"
    );
    Ok(ticket_id)
}

/// Writes a changed ticket if its stored version still equals
/// `ticket.version`, bumping the version by one.
///
/// Returns the number of rows updated: 0 means the ticket is missing or
/// was changed by someone else.
///
/// # Errors
///
/// Returns an error if the ticket has no key or the update fails.
pub fn update_ticket_if_current(
    conn: &mut SqliteConnection,
    ticket: &Ticket,
) -> Result<usize, PersistenceError> {
    let ticket_id: i64 = ticket.ticket_id.ok_or_else(|| {
        PersistenceError::ReconstructionError(format!(
            "ticket {} has no storage key",
            ticket.ticket_number
        ))
    })?;

    let updated: usize = diesel::update(
        tickets::table
            .filter(tickets::ticket_id.eq(ticket_id))
            .filter(tickets::version.eq(ticket.version)),
    )
    .set((
        tickets::title.eq(&ticket.title),
        tickets::description.eq(&ticket.description),
        tickets::category.eq(ticket.category.as_str()),
        tickets::subcategory.eq(ticket.subcategory.as_deref()),
        tickets::priority.eq(ticket.priority.as_str()),
        tickets::impact.eq(ticket.impact.as_str()),
        tickets::urgency.eq(ticket.urgency.as_str()),
        tickets::service_level.eq(ticket.service_level.as_str()),
        tickets::status.eq(ticket.status.as_str()),
        tickets::assignee_id.eq(ticket.assignee_id.as_deref()),
        tickets::resolution.eq(ticket.resolution.as_deref()),
        tickets::updated_at.eq(format_timestamp(ticket.updated_at)?),
        tickets::due_date.eq(format_optional_timestamp(ticket.due_date)?),
        tickets::closed_at.eq(format_optional_timestamp(ticket.closed_at)?),
        tickets::first_responded_at.eq(format_optional_timestamp(ticket.first_responded_at)?),
        tickets::version.eq(tickets::version + 1_i64),
    ))
    .execute(conn)?;

    debug!(ticket_id, expected_version = ticket.version, updated, "Versioned ticket update");
    Ok(updated)
}

/// Appends history entries after `last_sequence`, in order.
///
/// # Errors
///
/// Returns an error if an insert fails.
pub fn insert_history(
    conn: &mut SqliteConnection,
    ticket_id: i64,
    last_sequence: i64,
    drafts: &[HistoryDraft],
) -> Result<Vec<HistoryEntry>, PersistenceError> {
    let mut entries: Vec<HistoryEntry> = Vec::with_capacity(drafts.len());
    let mut sequence: i64 = last_sequence;

    for draft in drafts {
        sequence += 1;
        diesel::insert_into(ticket_history::table)
            .values((
                ticket_history::ticket_id.eq(ticket_id),
                ticket_history::sequence.eq(sequence),
                ticket_history::field.eq(&draft.field),
                ticket_history::old_value.eq(draft.old_value.as_deref()),
                ticket_history::new_value.eq(draft.new_value.as_deref()),
                ticket_history::changed_by.eq(&draft.changed_by),
                ticket_history::changed_at.eq(format_timestamp(draft.changed_at)?),
            ))
            .execute(conn)?;

        entries.push(HistoryEntry {
            history_id: get_last_insert_rowid(conn)?,
            ticket_id,
            sequence,
            field: draft.field.clone(),
            old_value: draft.old_value.clone(),
            new_value: draft.new_value.clone(),
            changed_by: draft.changed_by.clone(),
            changed_at: draft.changed_at,
        });
    }

    debug!(ticket_id, count = entries.len(), "Inserted history entries");
    Ok(entries)
}

/// Stores one event in the outbox, undispatched.
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn insert_event(
    conn: &mut SqliteConnection,
    event: &DomainEvent,
) -> Result<RecordedEvent, PersistenceError> {
    let payload_json: String = serde_json::to_string(&event.payload)?;
    diesel::insert_into(domain_events::table)
        .values((
            domain_events::event_type.eq(event.event_type.as_str()),
            domain_events::ticket_id.eq(event.ticket_id),
            domain_events::ticket_number.eq(&event.ticket_number),
            domain_events::actor_id.eq(&event.actor_id),
            domain_events::occurred_at.eq(format_timestamp(event.occurred_at)?),
            domain_events::payload_json.eq(payload_json),
            domain_events::dispatched.eq(0),
        ))
        .execute(conn)?;

    let event_id: i64 = get_last_insert_rowid(conn)?;
    debug!(event_id, event_type = %event.event_type, "Queued domain event");
    Ok(RecordedEvent {
        event_id,
        event: event.clone(),
        dispatched: false,
    })
}

/// Stores events in the outbox, in order.
///
/// # Errors
///
/// Returns an error if any insert fails.
pub fn insert_events(
    conn: &mut SqliteConnection,
    events: &[DomainEvent],
) -> Result<Vec<RecordedEvent>, PersistenceError> {
    events.iter().map(|event| insert_event(conn, event)).collect()
}

/// Marks outbox events as dispatched.
///
/// # Errors
///
/// Returns an error if the update fails.
pub fn mark_events_dispatched(
    conn: &mut SqliteConnection,
    event_ids: &[i64],
) -> Result<usize, PersistenceError> {
    if event_ids.is_empty() {
        return Ok(0);
    }
    let updated: usize = diesel::update(
        domain_events::table.filter(domain_events::event_id.eq_any(event_ids)),
    )
    .set(domain_events::dispatched.eq(1))
    .execute(conn)?;
    debug!(updated, "Marked events dispatched");
    Ok(updated)
}
