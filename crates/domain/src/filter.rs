// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The typed ticket filter shared by reports, listings and saved searches.
//!
//! A filter is turned into a single predicate: every given field must
//! match (AND), and within a multi-valued field any value may match (OR).
//! An empty multi-valued field places no constraint.

use crate::classification::{Category, Priority};
use crate::error::DomainError;
use crate::ticket::Ticket;
use crate::ticket_status::TicketStatus;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Structured ticket filter criteria.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketFilter {
    /// Inclusive lower bound on `created_at`.
    #[serde(with = "time::serde::rfc3339::option")]
    pub date_from: Option<OffsetDateTime>,
    /// Inclusive upper bound on `created_at`.
    #[serde(with = "time::serde::rfc3339::option")]
    pub date_to: Option<OffsetDateTime>,
    pub requester_id: Option<String>,
    pub assignee_id: Option<String>,
    pub statuses: Vec<TicketStatus>,
    pub priorities: Vec<Priority>,
    pub categories: Vec<Category>,
    /// Case-insensitive match on number, title or description.
    pub text: Option<String>,
}

impl TicketFilter {
    /// Checks the criteria are coherent.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if `date_from` is after `date_to`.
    pub fn validate(&self) -> Result<(), DomainError> {
        if let (Some(from), Some(to)) = (self.date_from, self.date_to)
            && from > to
        {
            return Err(DomainError::validation(
                "date_from",
                "date_from must not be after date_to",
            ));
        }
        Ok(())
    }

    /// Evaluates the filter against a ticket.
    #[must_use]
    pub fn matches(&self, ticket: &Ticket) -> bool {
        self.matches_date_range(ticket)
            && self
                .requester_id
                .as_deref()
                .is_none_or(|id| ticket.requester_id == id)
            && self
                .assignee_id
                .as_deref()
                .is_none_or(|id| ticket.assignee_id.as_deref() == Some(id))
            && any_of(&self.statuses, &ticket.status)
            && any_of(&self.priorities, &ticket.priority)
            && any_of(&self.categories, &ticket.category)
            && self.matches_text(ticket)
    }

    /// Returns a predicate closure over this filter.
    pub fn predicate(&self) -> impl Fn(&Ticket) -> bool + '_ {
        move |ticket| self.matches(ticket)
    }

    fn matches_date_range(&self, ticket: &Ticket) -> bool {
        self.date_from.is_none_or(|from| ticket.created_at >= from)
            && self.date_to.is_none_or(|to| ticket.created_at <= to)
    }

    fn matches_text(&self, ticket: &Ticket) -> bool {
        let Some(needle) = self.text.as_deref().map(str::trim) else {
            return true;
        };
        if needle.is_empty() {
            return true;
        }
        let needle = needle.to_lowercase();
        ticket
            .ticket_number
            .to_string()
            .to_lowercase()
            .contains(&needle)
            || ticket.title.to_lowercase().contains(&needle)
            || ticket.description.to_lowercase().contains(&needle)
    }
}

fn any_of<T: PartialEq>(allowed: &[T], value: &T) -> bool {
    allowed.is_empty() || allowed.contains(value)
}
