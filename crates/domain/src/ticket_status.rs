// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ticket status states and the lifecycle transition table.
//!
//! Reopening is not a separate state: a reopen re-enters `Open` from
//! `Resolved` or `Closed`.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Lifecycle status of a ticket.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TicketStatus {
    /// Submitted, not yet triaged.
    New,
    /// Triaged and waiting for work.
    Open,
    /// Someone is working on it.
    InProgress,
    /// A resolution has been recorded.
    Resolved,
    /// Finished.
    Closed,
}

impl TicketStatus {
    /// All statuses in lifecycle order.
    pub const ALL: &'static [Self] = &[
        Self::New,
        Self::Open,
        Self::InProgress,
        Self::Resolved,
        Self::Closed,
    ];

    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Open => "OPEN",
            Self::InProgress => "IN_PROGRESS",
            Self::Resolved => "RESOLVED",
            Self::Closed => "CLOSED",
        }
    }

    /// Returns true for `Resolved` and `Closed`.
    ///
    /// `closed_at` is set exactly when a ticket is in a terminal status.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Resolved | Self::Closed)
    }

    /// Returns true for statuses counted as pending work.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::New | Self::Open | Self::InProgress)
    }

    /// Checks the transition table.
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (
                Self::New,
                Self::Open | Self::InProgress | Self::Resolved | Self::Closed
            ) | (
                Self::Open,
                Self::InProgress | Self::Resolved | Self::Closed
            ) | (
                Self::InProgress,
                Self::Open | Self::Resolved | Self::Closed
            ) | (Self::Resolved, Self::Closed | Self::Open)
                | (Self::Closed, Self::Open)
        )
    }

    /// Validates a transition against the table.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTransition` if the pair is not in the table.
    pub fn validate_transition(&self, target: Self) -> Result<(), DomainError> {
        if self.can_transition_to(target) {
            Ok(())
        } else {
            Err(DomainError::InvalidTransition {
                from: self.as_str().to_string(),
                to: target.as_str().to_string(),
            })
        }
    }

    /// Returns true if moving from `self` to `target` is a reopen.
    #[must_use]
    pub const fn is_reopen(&self, target: Self) -> bool {
        self.is_terminal() && matches!(target, Self::Open)
    }
}

impl FromStr for TicketStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEW" => Ok(Self::New),
            "OPEN" => Ok(Self::Open),
            "IN_PROGRESS" => Ok(Self::InProgress),
            "RESOLVED" => Ok(Self::Resolved),
            "CLOSED" => Ok(Self::Closed),
            _ => Err(DomainError::validation(
                "status",
                format!("unknown value '{s}'"),
            )),
        }
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALLOWED: &[(TicketStatus, TicketStatus)] = &[
        (TicketStatus::New, TicketStatus::Open),
        (TicketStatus::New, TicketStatus::InProgress),
        (TicketStatus::New, TicketStatus::Resolved),
        (TicketStatus::New, TicketStatus::Closed),
        (TicketStatus::Open, TicketStatus::InProgress),
        (TicketStatus::Open, TicketStatus::Resolved),
        (TicketStatus::Open, TicketStatus::Closed),
        (TicketStatus::InProgress, TicketStatus::Open),
        (TicketStatus::InProgress, TicketStatus::Resolved),
        (TicketStatus::InProgress, TicketStatus::Closed),
        (TicketStatus::Resolved, TicketStatus::Closed),
        (TicketStatus::Resolved, TicketStatus::Open),
        (TicketStatus::Closed, TicketStatus::Open),
    ];

    #[test]
    fn test_transition_table_is_exact() {
        for from in TicketStatus::ALL {
            for to in TicketStatus::ALL {
                let expected = ALLOWED.contains(&(*from, *to));
                assert_eq!(
                    from.can_transition_to(*to),
                    expected,
                    "{from} -> {to} should be {expected}"
                );
            }
        }
    }

    #[test]
    fn test_rejected_transition_reports_both_ends() {
        match TicketStatus::Closed.validate_transition(TicketStatus::InProgress) {
            Err(DomainError::InvalidTransition { from, to }) => {
                assert_eq!(from, "CLOSED");
                assert_eq!(to, "IN_PROGRESS");
            }
            other => panic!("expected InvalidTransition, got {other:?}"),
        }
    }

    #[test]
    fn test_self_transitions_are_rejected() {
        for status in TicketStatus::ALL {
            assert!(status.validate_transition(*status).is_err());
        }
    }

    #[test]
    fn test_reopen_detection() {
        assert!(TicketStatus::Resolved.is_reopen(TicketStatus::Open));
        assert!(TicketStatus::Closed.is_reopen(TicketStatus::Open));
        assert!(!TicketStatus::InProgress.is_reopen(TicketStatus::Open));
    }

    #[test]
    fn test_status_string_round_trip() {
        for status in TicketStatus::ALL {
            match status.as_str().parse::<TicketStatus>() {
                Ok(parsed) => assert_eq!(*status, parsed),
                Err(e) => panic!("Failed to parse status string {status}: {e}"),
            }
        }
        assert!("REOPENED".parse::<TicketStatus>().is_err());
    }
}
