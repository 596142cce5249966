// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur while applying service desk domain rules.
///
/// These are terminal for the calling request. Nothing in the domain
/// retries or swallows them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The referenced resource does not exist.
    NotFound {
        /// The kind of resource (e.g., "Ticket", "Comment").
        resource: &'static str,
        /// The identifier that was looked up.
        id: String,
    },
    /// The actor lacks visibility or mutation rights.
    Forbidden {
        /// The action that was attempted.
        action: String,
        /// Why the action was refused.
        reason: String,
    },
    /// A required field is missing or malformed.
    Validation {
        /// The offending field.
        field: String,
        /// A human-readable description of the problem.
        message: String,
    },
    /// The requested status transition is not in the lifecycle table.
    InvalidTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
    },
    /// An optimistic concurrency check failed.
    Conflict {
        /// The kind of resource that changed underneath the caller.
        resource: &'static str,
        /// A human-readable description of the conflict.
        message: String,
    },
}

impl DomainError {
    /// Shorthand for a `Validation` error.
    #[must_use]
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Shorthand for a `Forbidden` error.
    #[must_use]
    pub fn forbidden(action: &str, reason: impl Into<String>) -> Self {
        Self::Forbidden {
            action: action.to_string(),
            reason: reason.into(),
        }
    }

    /// Shorthand for a `NotFound` error.
    #[must_use]
    pub fn not_found(resource: &'static str, id: impl ToString) -> Self {
        Self::NotFound {
            resource,
            id: id.to_string(),
        }
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound { resource, id } => write!(f, "{resource} '{id}' not found"),
            Self::Forbidden { action, reason } => {
                write!(f, "Forbidden: cannot {action}: {reason}")
            }
            Self::Validation { field, message } => {
                write!(f, "Invalid value for '{field}': {message}")
            }
            Self::InvalidTransition { from, to } => {
                write!(f, "Invalid status transition from {from} to {to}")
            }
            Self::Conflict { resource, message } => {
                write!(f, "{resource} was modified concurrently: {message}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
