// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use servicedesk_audit::Actor;
use servicedesk_domain::{Ticket, TicketFilter, can_access, is_breached};
use std::cmp::Ordering;
use time::OffsetDateTime;

/// Orders tickets by creation time, newest first, then by number.
#[must_use]
pub fn newest_first(a: &Ticket, b: &Ticket) -> Ordering {
    b.created_at.cmp(&a.created_at).then_with(|| {
        (b.ticket_number.year(), b.ticket_number.sequence())
            .cmp(&(a.ticket_number.year(), a.ticket_number.sequence()))
    })
}

/// Returns the tickets matching `filter` that `actor` may see, newest first.
#[must_use]
pub fn select_visible(tickets: Vec<Ticket>, filter: &TicketFilter, actor: &Actor) -> Vec<Ticket> {
    let matches = filter.predicate();
    let mut selected: Vec<Ticket> = tickets
        .into_iter()
        .filter(|t| can_access(t, &actor.id, actor.role) && matches(t))
        .collect();
    selected.sort_by(newest_first);
    selected
}

/// Returns the open tickets past their due date at `now`, oldest due first.
#[must_use]
pub fn select_breached(tickets: Vec<Ticket>, now: OffsetDateTime) -> Vec<Ticket> {
    let mut breached: Vec<Ticket> = tickets
        .into_iter()
        .filter(|t| is_breached(t, now))
        .collect();
    breached.sort_by(|a, b| a.due_date.cmp(&b.due_date));
    breached
}
