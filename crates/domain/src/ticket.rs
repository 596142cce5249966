// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::classification::{Category, Impact, Priority, ServiceLevel, Urgency};
use crate::error::DomainError;
use crate::ticket_status::TicketStatus;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Prefix shared by all ticket numbers.
const TICKET_NUMBER_PREFIX: &str = "TKT";

/// Human-facing ticket identifier: `TKT-{year}-{6-digit sequence}`.
///
/// The sequence restarts every calendar year. Numbers are never reused.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TicketNumber {
    year: i32,
    sequence: u32,
}

impl TicketNumber {
    /// Creates a ticket number from its parts.
    ///
    /// # Errors
    ///
    /// Returns an error if the year is outside 1..=9999 or the sequence is 0.
    pub fn new(year: i32, sequence: u32) -> Result<Self, DomainError> {
        if !(1..=9999).contains(&year) {
            return Err(DomainError::validation(
                "ticket_number",
                format!("year {year} out of range"),
            ));
        }
        if sequence == 0 {
            return Err(DomainError::validation(
                "ticket_number",
                "sequence starts at 1",
            ));
        }
        Ok(Self { year, sequence })
    }

    /// The calendar year the number was issued in.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// The per-year sequence value.
    #[must_use]
    pub const fn sequence(&self) -> u32 {
        self.sequence
    }
}

impl std::fmt::Display for TicketNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{TICKET_NUMBER_PREFIX}-{:04}-{:06}",
            self.year, self.sequence
        )
    }
}

impl FromStr for TicketNumber {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::validation("ticket_number", format!("malformed '{s}'"));

        let mut parts = s.splitn(3, '-');
        let (Some(prefix), Some(year), Some(sequence)) = (parts.next(), parts.next(), parts.next())
        else {
            return Err(invalid());
        };
        if prefix != TICKET_NUMBER_PREFIX || year.len() != 4 || sequence.len() < 6 {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let sequence: u32 = sequence.parse().map_err(|_| invalid())?;
        Self::new(year, sequence)
    }
}

impl TryFrom<String> for TicketNumber {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TicketNumber> for String {
    fn from(value: TicketNumber) -> Self {
        value.to_string()
    }
}

/// A support ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Internal storage key. `None` until persisted.
    pub ticket_id: Option<i64>,
    pub ticket_number: TicketNumber,
    pub title: String,
    pub description: String,
    pub category: Category,
    pub subcategory: Option<String>,
    pub priority: Priority,
    pub impact: Impact,
    pub urgency: Urgency,
    pub service_level: ServiceLevel,
    pub status: TicketStatus,
    /// The creator. Never changes.
    pub requester_id: String,
    pub assignee_id: Option<String>,
    pub resolution: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub due_date: Option<OffsetDateTime>,
    /// Set iff `status` is `Resolved` or `Closed`.
    #[serde(with = "time::serde::rfc3339::option")]
    pub closed_at: Option<OffsetDateTime>,
    /// First action by support staff other than the requester.
    #[serde(with = "time::serde::rfc3339::option")]
    pub first_responded_at: Option<OffsetDateTime>,
    /// Optimistic concurrency token, bumped on every persisted change.
    pub version: i64,
}

impl Ticket {
    /// Returns the storage key or a `NotFound` error for unsaved tickets.
    ///
    /// # Errors
    ///
    /// Returns an error if the ticket has not been persisted.
    pub fn require_id(&self) -> Result<i64, DomainError> {
        self.ticket_id
            .ok_or_else(|| DomainError::not_found("Ticket", &self.ticket_number))
    }

    /// Returns true if `user_id` is the requester or the assignee.
    #[must_use]
    pub fn is_party(&self, user_id: &str) -> bool {
        self.requester_id == user_id || self.assignee_id.as_deref() == Some(user_id)
    }
}

/// A comment on a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub comment_id: i64,
    pub ticket_id: i64,
    pub author_id: String,
    pub content: String,
    /// Internal comments are hidden from non-elevated actors.
    pub is_internal: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Attachment metadata. The bytes live in an external store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub attachment_id: i64,
    pub ticket_id: i64,
    pub filename: String,
    pub size_bytes: u64,
    pub mime_type: String,
    /// Opaque reference into the file store. Never interpreted here.
    pub storage_key: String,
    pub uploaded_by: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
