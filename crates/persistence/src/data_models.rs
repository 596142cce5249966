// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::PersistenceError;
use servicedesk_audit::{HistoryEntry, RecordedEvent};
use servicedesk_domain::{Comment, DomainError, Ticket};
use std::str::FromStr;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

/// A comment to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub ticket_id: i64,
    pub author_id: String,
    pub content: String,
    pub is_internal: bool,
    pub created_at: OffsetDateTime,
}

/// Attachment metadata to be inserted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewAttachment {
    pub ticket_id: i64,
    pub filename: String,
    pub size_bytes: u64,
    pub mime_type: String,
    pub storage_key: String,
    pub uploaded_by: String,
    pub created_at: OffsetDateTime,
}

/// What a committed ticket change wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredChange {
    /// The ticket as stored, with its new version.
    pub ticket: Ticket,
    pub history: Vec<HistoryEntry>,
    /// Outbox rows, not yet dispatched.
    pub events: Vec<RecordedEvent>,
}

/// What a committed comment wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredComment {
    pub comment: Comment,
    /// The first-response stamp the comment caused, if any.
    pub response: Option<StoredChange>,
    pub event: RecordedEvent,
}

/// Formats a timestamp for storage.
pub(crate) fn format_timestamp(at: OffsetDateTime) -> Result<String, PersistenceError> {
    Ok(at.format(&Rfc3339)?)
}

/// Formats an optional timestamp for storage.
pub(crate) fn format_optional_timestamp(
    at: Option<OffsetDateTime>,
) -> Result<Option<String>, PersistenceError> {
    at.map(format_timestamp).transpose()
}

/// Parses a stored timestamp.
pub(crate) fn parse_timestamp(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| {
        PersistenceError::ReconstructionError(format!("invalid timestamp '{value}': {e}"))
    })
}

/// Parses an optional stored timestamp.
pub(crate) fn parse_optional_timestamp(
    value: Option<&str>,
) -> Result<Option<OffsetDateTime>, PersistenceError> {
    value.map(parse_timestamp).transpose()
}

/// Parses a stored enumeration or identifier through its `FromStr`.
pub(crate) fn parse_stored<T>(value: &str) -> Result<T, PersistenceError>
where
    T: FromStr<Err = DomainError>,
{
    value
        .parse()
        .map_err(|e: DomainError| PersistenceError::ReconstructionError(e.to_string()))
}

/// Converts a stored 0/1 flag.
pub(crate) const fn flag(value: i32) -> bool {
    value != 0
}

/// Converts a flag for storage.
pub(crate) fn to_flag(value: bool) -> i32 {
    i32::from(value)
}
