// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! SLA targets, due-date computation and compliance predicates.
//!
//! Breach is a live predicate evaluated against a supplied clock; it is
//! never stored.

use crate::classification::ServiceLevel;
use crate::error::DomainError;
use crate::ticket::Ticket;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};

/// Upper bound for any configured target (ten years).
const MAX_TARGET_HOURS: u32 = 87_600;

/// Response and resolution targets for one service level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlaTargets {
    /// Hours allowed until the first response.
    pub response_hours: u32,
    /// Hours allowed until resolution.
    pub resolution_hours: u32,
}

impl SlaTargets {
    /// Creates a new target pair.
    #[must_use]
    pub const fn new(response_hours: u32, resolution_hours: u32) -> Self {
        Self {
            response_hours,
            resolution_hours,
        }
    }

    /// Resolution window as a duration.
    #[must_use]
    pub fn resolution_window(&self) -> Duration {
        Duration::hours(i64::from(self.resolution_hours))
    }

    /// Response window as a duration.
    #[must_use]
    pub fn response_window(&self) -> Duration {
        Duration::hours(i64::from(self.response_hours))
    }

    fn validate(&self, level: ServiceLevel) -> Result<(), DomainError> {
        if self.resolution_hours > MAX_TARGET_HOURS {
            return Err(DomainError::validation(
                "sla",
                format!(
                    "{level}: resolution target {} exceeds {MAX_TARGET_HOURS} hours",
                    self.resolution_hours
                ),
            ));
        }
        if self.response_hours > self.resolution_hours {
            return Err(DomainError::validation(
                "sla",
                format!(
                    "{level}: response target {} exceeds resolution target {}",
                    self.response_hours, self.resolution_hours
                ),
            ));
        }
        Ok(())
    }
}

/// The SLA mapping from service level to targets.
///
/// Defaults: STANDARD 8h/40h, PREMIUM 4h/16h, `CRITICAL_SUPPORT` 0h/4h.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlaPolicy {
    /// Targets for `ServiceLevel::Standard`.
    pub standard: SlaTargets,
    /// Targets for `ServiceLevel::Premium`.
    pub premium: SlaTargets,
    /// Targets for `ServiceLevel::CriticalSupport`.
    pub critical_support: SlaTargets,
}

impl Default for SlaPolicy {
    fn default() -> Self {
        Self {
            standard: SlaTargets::new(8, 40),
            premium: SlaTargets::new(4, 16),
            critical_support: SlaTargets::new(0, 4),
        }
    }
}

impl SlaPolicy {
    /// Builds a policy from explicit targets, validating each.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` if a response target exceeds its
    /// resolution target or a target is unreasonably large.
    pub fn new(
        standard: SlaTargets,
        premium: SlaTargets,
        critical_support: SlaTargets,
    ) -> Result<Self, DomainError> {
        let policy = Self {
            standard,
            premium,
            critical_support,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// Validates every target pair.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::Validation` on the first invalid pair.
    pub fn validate(&self) -> Result<(), DomainError> {
        for level in ServiceLevel::ALL {
            self.resolve_sla_targets(*level).validate(*level)?;
        }
        Ok(())
    }

    /// Returns the targets for a service level.
    #[must_use]
    pub const fn resolve_sla_targets(&self, level: ServiceLevel) -> SlaTargets {
        match level {
            ServiceLevel::Standard => self.standard,
            ServiceLevel::Premium => self.premium,
            ServiceLevel::CriticalSupport => self.critical_support,
        }
    }

    /// Computes the resolution due date: `created_at + resolution_hours`.
    ///
    /// The result is never earlier than `created_at`.
    #[must_use]
    pub fn compute_due_date(
        &self,
        created_at: OffsetDateTime,
        level: ServiceLevel,
    ) -> OffsetDateTime {
        created_at.saturating_add(self.resolve_sla_targets(level).resolution_window())
    }

    /// Deadline for the first response.
    #[must_use]
    pub fn response_deadline(
        &self,
        created_at: OffsetDateTime,
        level: ServiceLevel,
    ) -> OffsetDateTime {
        created_at.saturating_add(self.resolve_sla_targets(level).response_window())
    }

    /// Whether the first response met the response target.
    ///
    /// `None` when the ticket has not been responded to yet.
    #[must_use]
    pub fn is_response_compliant(&self, ticket: &Ticket) -> Option<bool> {
        ticket.first_responded_at.map(|responded| {
            responded <= self.response_deadline(ticket.created_at, ticket.service_level)
        })
    }
}

/// Whether a ticket was closed within its due date.
///
/// `None` when the ticket is not closed or has no due date; such tickets
/// take no part in compliance ratios.
#[must_use]
pub fn is_compliant(ticket: &Ticket) -> Option<bool> {
    match (ticket.closed_at, ticket.due_date) {
        (Some(closed_at), Some(due_date)) => Some(closed_at <= due_date),
        _ => None,
    }
}

/// Whether an open ticket is past its due date at `now`.
///
/// Reports count these as overdue. Tickets without a due date are never
/// breached.
#[must_use]
pub fn is_breached(ticket: &Ticket, now: OffsetDateTime) -> bool {
    !ticket.status.is_terminal() && ticket.due_date.is_some_and(|due| now > due)
}
