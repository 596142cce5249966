// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use servicedesk_audit::{DomainEvent, HistoryDraft};
use servicedesk_domain::Ticket;

/// The result of applying a command to a ticket.
///
/// Holds the new ticket together with the history entries and outbound
/// events the change produced. The store writes all three in one
/// transaction or not at all.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionResult {
    /// The ticket after the change.
    pub new_ticket: Ticket,
    /// One entry per changed field, in the order the changes were applied.
    pub history: Vec<HistoryDraft>,
    /// Events to publish once the change has committed.
    pub events: Vec<DomainEvent>,
}

impl TransitionResult {
    /// Returns true if the command changed anything.
    ///
    /// A result without history is a no-op (e.g. assigning the current
    /// assignee) and needs no write.
    #[must_use]
    pub const fn has_changes(&self) -> bool {
        !self.history.is_empty()
    }

    /// Returns true if the result contains a change of `field`.
    #[must_use]
    pub fn changed(&self, field: &str) -> bool {
        self.history.iter().any(|h| h.field == field)
    }
}
