// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for authorization-aware UI gating.
//!
//! Capabilities expose what a caller may do with a ticket without leaking
//! domain internals. They are advisory only and do not replace the checks
//! the lifecycle performs.

use servicedesk_domain::{Ticket, TicketStatus, has_elevated_access, is_breached, is_compliant};
use time::OffsetDateTime;

use crate::auth::AuthenticatedActor;
use crate::request_response::{Capability, TicketCapabilities, TicketInfo};

/// Computes what `actor` may do with `ticket`.
///
/// Mirrors the lifecycle rules: elevated roles may do everything; the
/// requester may edit title and description, close a resolved ticket and
/// reopen a finished one.
#[must_use]
pub fn compute_ticket_capabilities(
    actor: &AuthenticatedActor,
    ticket: &Ticket,
) -> TicketCapabilities {
    let elevated: bool = has_elevated_access(actor.role);
    let requester: bool = ticket.requester_id == actor.id;

    TicketCapabilities {
        can_edit_details: Capability::from_bool(elevated || requester),
        can_classify: Capability::from_bool(elevated),
        can_assign: Capability::from_bool(elevated),
        can_change_status: Capability::from_bool(
            elevated || (requester && ticket.status == TicketStatus::Resolved),
        ),
        can_reopen: Capability::from_bool(
            ticket.status.is_terminal() && (elevated || requester),
        ),
        can_view_internal_comments: Capability::from_bool(elevated),
    }
}

/// Wraps a ticket with its live SLA state and the caller's capabilities.
#[must_use]
pub fn to_ticket_info(
    actor: &AuthenticatedActor,
    ticket: Ticket,
    now: OffsetDateTime,
) -> TicketInfo {
    TicketInfo {
        is_breached: is_breached(&ticket, now),
        sla_compliant: is_compliant(&ticket),
        capabilities: compute_ticket_capabilities(actor, &ticket),
        ticket,
    }
}
