// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ticket visibility and sub-resource mutation rules.

use crate::error::DomainError;
use crate::role::{Role, can_moderate, has_elevated_access};
use crate::ticket::{Comment, Ticket};

/// Returns true if the actor may see the ticket and its sub-resources.
///
/// Visible to the requester, the assignee, and any elevated role.
#[must_use]
pub fn can_access(ticket: &Ticket, actor_id: &str, role: Role) -> bool {
    has_elevated_access(role) || ticket.is_party(actor_id)
}

/// Enforces ticket visibility.
///
/// # Errors
///
/// Returns `DomainError::Forbidden` unless [`can_access`] holds.
pub fn assert_can_access(ticket: &Ticket, actor_id: &str, role: Role) -> Result<(), DomainError> {
    if can_access(ticket, actor_id, role) {
        Ok(())
    } else {
        Err(DomainError::forbidden(
            "access ticket",
            format!(
                "{actor_id} is neither requester nor assignee of {}",
                ticket.ticket_number
            ),
        ))
    }
}

/// Enforces edit/delete rights on a comment or attachment.
///
/// Permitted to the owner, or to a manager/admin. Support staff cannot
/// edit other people's content.
///
/// # Errors
///
/// Returns `DomainError::Forbidden` otherwise.
pub fn assert_can_mutate(owner_id: &str, actor_id: &str, role: Role) -> Result<(), DomainError> {
    if owner_id == actor_id || can_moderate(role) {
        Ok(())
    } else {
        Err(DomainError::forbidden(
            "modify resource",
            format!("{actor_id} does not own it"),
        ))
    }
}

/// Removes internal comments for actors without elevated access.
///
/// This is a read-time projection; storage is unaffected.
#[must_use]
pub fn project_comments_for(comments: Vec<Comment>, role: Role) -> Vec<Comment> {
    if has_elevated_access(role) {
        comments
    } else {
        comments.into_iter().filter(|c| !c.is_internal).collect()
    }
}

/// Returns true if this actor's activity counts as a first response.
///
/// Only elevated actors who are not the requester respond.
#[must_use]
pub fn counts_as_response(ticket: &Ticket, actor_id: &str, role: Role) -> bool {
    has_elevated_access(role) && ticket.requester_id != actor_id
}
