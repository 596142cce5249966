// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The caller identity handed to every API function, and the role checks
//! that are not tied to a single ticket.

use servicedesk_audit::Actor;
use servicedesk_domain::{Role, has_elevated_access};

use crate::error::AuthError;

/// An authenticated caller.
///
/// Identity is established upstream (the HTTP layer trusts a gateway);
/// this crate only consumes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedActor {
    /// The directory user id of the caller.
    pub id: String,
    /// The caller's role.
    pub role: Role,
}

impl AuthenticatedActor {
    /// Creates a new authenticated actor.
    #[must_use]
    pub fn new(id: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            role,
        }
    }

    /// Converts this caller into the actor recorded in history and events.
    #[must_use]
    pub fn to_audit_actor(&self) -> Actor {
        Actor::new(self.id.clone(), self.role)
    }
}

/// Authorization checks for operations that are not about one ticket.
///
/// Ticket-level access (party or elevated) is enforced by the lifecycle
/// itself.
pub struct AuthorizationService;

impl AuthorizationService {
    /// Checks if an actor may build reports and exports.
    ///
    /// Reports cover every ticket, so they need an elevated role.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` for end users.
    pub fn authorize_reporting(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        if has_elevated_access(actor.role) {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from("build_ticket_report"),
                required_role: String::from("SUPPORT_STAFF"),
            })
        }
    }

    /// Checks if an actor may maintain the directory mirror.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Unauthorized` unless the actor is an admin.
    pub fn authorize_directory_admin(actor: &AuthenticatedActor) -> Result<(), AuthError> {
        if actor.role == Role::Admin {
            Ok(())
        } else {
            Err(AuthError::Unauthorized {
                action: String::from("upsert_directory_user"),
                required_role: String::from("ADMIN"),
            })
        }
    }
}
