// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Request and response shapes of the API boundary.
//!
//! Inputs that the core already defines with serde (`NewTicket`,
//! `TicketUpdate`, `TicketFilter`, `NewSavedSearch`, `SavedSearchUpdate`)
//! are accepted as-is and not duplicated here.

use serde::{Deserialize, Serialize};
use servicedesk::SavedSearch;
use servicedesk_audit::HistoryEntry;
use servicedesk_domain::{
    Attachment, Comment, DomainError, Role, Ticket, TicketFilter, TicketStatus,
};
use std::str::FromStr;
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::error::{ApiError, translate_domain_error};

/// Represents whether a specific action is permitted.
///
/// Serializes to JSON as true/false.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The action is permitted.
    Allowed,
    /// The action is not permitted.
    Denied,
}

impl Capability {
    /// Returns true if the capability is allowed.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Creates a capability from a boolean value.
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Allowed } else { Self::Denied }
    }
}

impl Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bool(self.is_allowed())
    }
}

impl<'de> Deserialize<'de> for Capability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        bool::deserialize(deserializer).map(Self::from_bool)
    }
}

/// What the caller may do with one ticket. Advisory only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketCapabilities {
    pub can_edit_details: Capability,
    pub can_classify: Capability,
    pub can_assign: Capability,
    pub can_change_status: Capability,
    pub can_reopen: Capability,
    pub can_view_internal_comments: Capability,
}

/// A ticket as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketInfo {
    #[serde(flatten)]
    pub ticket: Ticket,
    /// Past due and still open at the time of the request.
    pub is_breached: bool,
    /// Resolution-time compliance; absent while the ticket is open.
    pub sla_compliant: Option<bool>,
    pub capabilities: TicketCapabilities,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListTicketsResponse {
    pub tickets: Vec<TicketInfo>,
}

/// Query-string form of a ticket filter.
///
/// Multi-valued fields are comma separated (`status=OPEN,IN_PROGRESS`);
/// dates are RFC 3339.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListTicketsQuery {
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub requester_id: Option<String>,
    pub assignee_id: Option<String>,
    pub status: Option<String>,
    pub priority: Option<String>,
    pub category: Option<String>,
    pub text: Option<String>,
}

impl ListTicketsQuery {
    /// Parses the query into a typed filter.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidInput` for an unknown enumeration value or
    /// a malformed date.
    pub fn into_filter(self) -> Result<TicketFilter, ApiError> {
        Ok(TicketFilter {
            date_from: parse_date("date_from", self.date_from.as_deref())?,
            date_to: parse_date("date_to", self.date_to.as_deref())?,
            requester_id: self.requester_id,
            assignee_id: self.assignee_id,
            statuses: parse_list(self.status.as_deref())?,
            priorities: parse_list(self.priority.as_deref())?,
            categories: parse_list(self.category.as_deref())?,
            text: self.text,
        })
    }
}

fn parse_date(field: &str, value: Option<&str>) -> Result<Option<OffsetDateTime>, ApiError> {
    value
        .map(|v| {
            OffsetDateTime::parse(v, &Rfc3339).map_err(|e| ApiError::InvalidInput {
                field: field.to_string(),
                message: format!("'{v}' is not an RFC 3339 timestamp: {e}"),
            })
        })
        .transpose()
}

fn parse_list<T>(value: Option<&str>) -> Result<Vec<T>, ApiError>
where
    T: FromStr<Err = DomainError>,
{
    value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|item| !item.is_empty())
        .map(|item| item.parse().map_err(translate_domain_error))
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionStatusRequest {
    pub status: TicketStatus,
    #[serde(default)]
    pub resolution: Option<String>,
    /// Optimistic guard: the status the caller last saw.
    #[serde(default)]
    pub expected_status: Option<TicketStatus>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReopenTicketRequest {
    pub expected_status: Option<TicketStatus>,
}

/// Assigns a ticket, or unassigns it when `assignee_id` is null.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssignTicketRequest {
    pub assignee_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryResponse {
    pub ticket_id: i64,
    pub entries: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddCommentRequest {
    pub content: String,
    #[serde(default)]
    pub is_internal: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCommentRequest {
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListCommentsResponse {
    pub ticket_id: i64,
    pub comments: Vec<Comment>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddAttachmentRequest {
    pub filename: String,
    pub size_bytes: u64,
    pub mime_type: String,
    /// Opaque key of the already uploaded blob.
    pub storage_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListAttachmentsResponse {
    pub ticket_id: i64,
    pub attachments: Vec<Attachment>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ListSavedSearchesQuery {
    pub include_public: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListSavedSearchesResponse {
    pub searches: Vec<SavedSearch>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuplicateSavedSearchRequest {
    /// Defaults to `"{original} (Copy)"`.
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteSavedSearchResponse {
    pub search_id: i64,
    pub tickets: Vec<TicketInfo>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpsertDirectoryUserRequest {
    pub display_name: String,
    pub email: String,
    pub role: Role,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

const fn default_active() -> bool {
    true
}
