// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Outbox reads.

use diesel::SqliteConnection;
use diesel::prelude::*;
use servicedesk_audit::{DomainEvent, RecordedEvent};

use crate::data_models::{flag, parse_stored, parse_timestamp};
use crate::diesel_schema::domain_events;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = domain_events)]
struct EventRow {
    event_id: i64,
    event_type: String,
    ticket_id: Option<i64>,
    ticket_number: String,
    actor_id: String,
    occurred_at: String,
    payload_json: String,
    dispatched: i32,
}

impl TryFrom<EventRow> for RecordedEvent {
    type Error = PersistenceError;

    fn try_from(row: EventRow) -> Result<Self, Self::Error> {
        Ok(Self {
            event_id: row.event_id,
            event: DomainEvent {
                event_type: parse_stored(&row.event_type)?,
                ticket_id: row.ticket_id,
                ticket_number: row.ticket_number,
                actor_id: row.actor_id,
                occurred_at: parse_timestamp(&row.occurred_at)?,
                payload: serde_json::from_str(&row.payload_json)?,
            },
            dispatched: flag(row.dispatched),
        })
    }
}

/// Lists outbox events that have not been dispatched, in insertion order.
///
/// # Errors
///
/// Returns an error if the query fails or a row is invalid.
pub fn list_undispatched_events(
    conn: &mut SqliteConnection,
) -> Result<Vec<RecordedEvent>, PersistenceError> {
    let rows: Vec<EventRow> = domain_events::table
        .filter(domain_events::dispatched.eq(0))
        .order(domain_events::event_id.asc())
        .select(EventRow::as_select())
        .load(conn)?;

    rows.into_iter().map(RecordedEvent::try_from).collect()
}

/// Lists every event recorded for a ticket, in insertion order.
///
/// # Errors
///
/// Returns an error if the query fails or a row is invalid.
pub fn list_ticket_events(
    conn: &mut SqliteConnection,
    ticket_id: i64,
) -> Result<Vec<RecordedEvent>, PersistenceError> {
    let rows: Vec<EventRow> = domain_events::table
        .filter(domain_events::ticket_id.eq(ticket_id))
        .order(domain_events::event_id.asc())
        .select(EventRow::as_select())
        .load(conn)?;

    rows.into_iter().map(RecordedEvent::try_from).collect()
}
