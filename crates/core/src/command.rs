// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use serde::{Deserialize, Serialize};
use servicedesk_domain::{
    Category, DirectoryUser, Impact, Priority, ServiceLevel, TicketStatus, Urgency,
};

/// A command represents user intent against an existing ticket.
///
/// Commands are the only way to request ticket state changes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketCommand {
    /// Move the ticket to another status.
    Transition {
        /// The requested status.
        to: TicketStatus,
        /// Resolution text, required when entering `Resolved`.
        resolution: Option<String>,
        /// If set, the current status must equal this value.
        expected_status: Option<TicketStatus>,
    },
    /// Reopen a resolved or closed ticket.
    Reopen {
        /// If set, the current status must equal this value.
        expected_status: Option<TicketStatus>,
    },
    /// Assign the ticket to a support user.
    Assign {
        /// The directory record of the new assignee.
        assignee: DirectoryUser,
    },
    /// Remove the current assignee.
    Unassign,
    /// Edit descriptive or classification fields.
    UpdateFields(TicketUpdate),
    /// Note that support has responded (e.g. by commenting).
    RecordFirstResponse,
}

/// Partial ticket edit. `None` leaves a field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TicketUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    /// `Some(None)` clears the subcategory.
    #[serde(with = "double_option", skip_serializing_if = "Option::is_none")]
    pub subcategory: Option<Option<String>>,
    pub priority: Option<Priority>,
    pub impact: Option<Impact>,
    pub urgency: Option<Urgency>,
    pub service_level: Option<ServiceLevel>,
}

impl TicketUpdate {
    /// Returns true if no field was supplied.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && !self.touches_classification()
    }

    /// Returns true if any field restricted to support roles is supplied.
    #[must_use]
    pub const fn touches_classification(&self) -> bool {
        self.category.is_some()
            || self.subcategory.is_some()
            || self.priority.is_some()
            || self.impact.is_some()
            || self.urgency.is_some()
            || self.service_level.is_some()
    }
}

/// Input for a new ticket. Classification defaults apply to omitted fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewTicket {
    pub title: String,
    pub description: String,
    pub category: Category,
    #[serde(default)]
    pub subcategory: Option<String>,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub impact: Impact,
    #[serde(default)]
    pub urgency: Urgency,
    #[serde(default)]
    pub service_level: ServiceLevel,
}

/// Distinguishes an absent field from an explicit `null`.
mod double_option {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[allow(clippy::ref_option)]
    pub fn serialize<S, T>(value: &Option<Option<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
        T: Serialize,
    {
        match value {
            Some(inner) => inner.serialize(serializer),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
    where
        D: Deserializer<'de>,
        T: Deserialize<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Some)
    }
}
