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
    clippy::unwrap_used,
    clippy::expect_used
)]

use serde::{Deserialize, Serialize};
use servicedesk_domain::{DomainError, Role};
use std::str::FromStr;
use time::OffsetDateTime;

#[cfg(test)]
mod tests;

/// History field name for the creation entry.
pub const FIELD_CREATED: &str = "created";
/// History field name for the first response by support.
pub const FIELD_FIRST_RESPONSE: &str = "first_response";

/// Represents the entity performing an action.
///
/// The identity is established upstream; this crate never authenticates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The role the actor acts under.
    pub role: Role,
}

impl Actor {
    /// Creates a new Actor.
    #[must_use]
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }
}

/// A history record that has not been stored yet.
///
/// Produced by the lifecycle together with the new ticket state. The
/// store assigns `history_id` and the per-ticket `sequence` when writing it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryDraft {
    /// The ticket field that changed (e.g. `status`, `assignee_id`).
    pub field: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub changed_by: String,
    #[serde(with = "time::serde::rfc3339")]
    pub changed_at: OffsetDateTime,
}

impl HistoryDraft {
    /// Records a change of `field` from `old_value` to `new_value`.
    #[must_use]
    pub fn changed(
        field: &str,
        old_value: Option<String>,
        new_value: Option<String>,
        actor: &Actor,
        changed_at: OffsetDateTime,
    ) -> Self {
        Self {
            field: field.to_string(),
            old_value,
            new_value,
            changed_by: actor.id.clone(),
            changed_at,
        }
    }

    /// The entry written once when a ticket is created.
    #[must_use]
    pub fn created(ticket_number: &str, actor: &Actor, changed_at: OffsetDateTime) -> Self {
        Self::changed(
            FIELD_CREATED,
            None,
            Some(ticket_number.to_string()),
            actor,
            changed_at,
        )
    }

    /// Returns true if this draft records a status change.
    #[must_use]
    pub fn is_status_change(&self) -> bool {
        self.field == "status"
    }
}

/// A stored, immutable history record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub history_id: i64,
    pub ticket_id: i64,
    /// Monotonic per ticket, starting at 1.
    pub sequence: i64,
    pub field: String,
    pub old_value: Option<String>,
    pub new_value: Option<String>,
    pub changed_by: String,
    #[serde(with = "time::serde::rfc3339")]
    pub changed_at: OffsetDateTime,
}

/// The kinds of outbound domain events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventType {
    TicketCreated,
    StatusChanged,
    TicketAssigned,
    CommentAdded,
}

impl EventType {
    /// Returns the stored string form.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::TicketCreated => "TICKET_CREATED",
            Self::StatusChanged => "STATUS_CHANGED",
            Self::TicketAssigned => "TICKET_ASSIGNED",
            Self::CommentAdded => "COMMENT_ADDED",
        }
    }
}

impl FromStr for EventType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "TICKET_CREATED" => Ok(Self::TicketCreated),
            "STATUS_CHANGED" => Ok(Self::StatusChanged),
            "TICKET_ASSIGNED" => Ok(Self::TicketAssigned),
            "COMMENT_ADDED" => Ok(Self::CommentAdded),
            other => Err(DomainError::validation(
                "event_type",
                format!("unknown event type '{other}'"),
            )),
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A state change announced to the notification collaborator.
///
/// Events are written to the outbox in the same transaction as the change
/// they describe and published once after commit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainEvent {
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Filled in by the store for tickets created in the same transaction.
    pub ticket_id: Option<i64>,
    pub ticket_number: String,
    pub actor_id: String,
    #[serde(rename = "timestamp", with = "time::serde::rfc3339")]
    pub occurred_at: OffsetDateTime,
    pub payload: serde_json::Value,
}

impl DomainEvent {
    /// Creates an event for `ticket_number`.
    #[must_use]
    pub fn new(
        event_type: EventType,
        ticket_id: Option<i64>,
        ticket_number: impl Into<String>,
        actor: &Actor,
        occurred_at: OffsetDateTime,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            event_type,
            ticket_id,
            ticket_number: ticket_number.into(),
            actor_id: actor.id.clone(),
            occurred_at,
            payload,
        }
    }
}

/// An event as stored in the outbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordedEvent {
    pub event_id: i64,
    #[serde(flatten)]
    pub event: DomainEvent,
    pub dispatched: bool,
}
