// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::role::{Role, has_elevated_access, is_support_agent};
use serde::{Deserialize, Serialize};

/// A user as known to the identity directory.
///
/// Read model only. Identity is owned elsewhere and synchronized in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DirectoryUser {
    pub user_id: String,
    pub display_name: String,
    pub email: String,
    pub role: Role,
    pub is_active: bool,
}

impl DirectoryUser {
    /// Returns true if the user may be assigned tickets.
    #[must_use]
    pub fn is_assignable(&self) -> bool {
        self.is_active && has_elevated_access(self.role)
    }

    /// Returns true if the user appears in team performance reports.
    #[must_use]
    pub fn is_team_member(&self) -> bool {
        self.is_active && is_support_agent(self.role)
    }

    /// Validates the directory record.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if the id or display name is blank.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.user_id.trim().is_empty() {
            return Err(DomainError::validation("user_id", "must not be empty"));
        }
        if self.display_name.trim().is_empty() {
            return Err(DomainError::validation("display_name", "must not be empty"));
        }
        Ok(())
    }
}

/// Looks up a display name, falling back to `fallback` for unknown ids.
#[must_use]
pub fn display_name_or<'a>(
    users: &'a [DirectoryUser],
    user_id: Option<&str>,
    fallback: &'a str,
) -> &'a str {
    user_id
        .and_then(|id| users.iter().find(|u| u.user_id == id))
        .map_or(fallback, |u| u.display_name.as_str())
}
