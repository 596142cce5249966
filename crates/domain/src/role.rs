// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The closed set of actor roles.
///
/// Role decisions anywhere in the system go through
/// [`has_elevated_access`] and [`can_moderate`]; callers never compare
/// role lists themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// A person who submits tickets.
    EndUser,
    /// Front-line support.
    SupportStaff,
    /// Support team lead.
    SupportManager,
    /// System administrator.
    Admin,
}

impl Role {
    /// Returns the string representation of the role.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::EndUser => "END_USER",
            Self::SupportStaff => "SUPPORT_STAFF",
            Self::SupportManager => "SUPPORT_MANAGER",
            Self::Admin => "ADMIN",
        }
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "END_USER" => Ok(Self::EndUser),
            "SUPPORT_STAFF" => Ok(Self::SupportStaff),
            "SUPPORT_MANAGER" => Ok(Self::SupportManager),
            "ADMIN" => Ok(Self::Admin),
            _ => Err(DomainError::validation(
                "role",
                format!("unknown value '{s}'"),
            )),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns true for roles with cross-ticket visibility.
#[must_use]
pub const fn has_elevated_access(role: Role) -> bool {
    matches!(
        role,
        Role::SupportStaff | Role::SupportManager | Role::Admin
    )
}

/// Returns true for roles that may edit or delete other people's
/// comments and attachments.
#[must_use]
pub const fn can_moderate(role: Role) -> bool {
    matches!(role, Role::SupportManager | Role::Admin)
}

/// Returns true for roles that appear in team performance reports.
#[must_use]
pub const fn is_support_agent(role: Role) -> bool {
    matches!(role, Role::SupportStaff | Role::SupportManager)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elevated_access() {
        assert!(!has_elevated_access(Role::EndUser));
        assert!(has_elevated_access(Role::SupportStaff));
        assert!(has_elevated_access(Role::SupportManager));
        assert!(has_elevated_access(Role::Admin));
    }

    #[test]
    fn test_staff_cannot_moderate() {
        assert!(!can_moderate(Role::EndUser));
        assert!(!can_moderate(Role::SupportStaff));
        assert!(can_moderate(Role::SupportManager));
        assert!(can_moderate(Role::Admin));
    }

    #[test]
    fn test_admin_is_not_a_support_agent() {
        assert!(is_support_agent(Role::SupportStaff));
        assert!(is_support_agent(Role::SupportManager));
        assert!(!is_support_agent(Role::Admin));
    }
}
