// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod directory_tests;
mod initialization_tests;

use crate::{Persistence, PersistenceError, StoredChange};
use servicedesk::{CoreError, NewTicket, create_ticket};
use servicedesk_audit::Actor;
use servicedesk_domain::{Category, Impact, Priority, Role, ServiceLevel, SlaPolicy, Urgency};
use time::OffsetDateTime;
use time::macros::datetime;

pub const T0: OffsetDateTime = datetime!(2026-03-02 09:00 UTC);

/// Either side of a failed ticket creation.
#[derive(Debug)]
pub enum CreateError {
    Store(PersistenceError),
    Rejected(CoreError),
}

impl From<PersistenceError> for CreateError {
    fn from(err: PersistenceError) -> Self {
        Self::Store(err)
    }
}

pub fn requester() -> Actor {
    Actor::new("alice", Role::EndUser)
}

pub fn staff() -> Actor {
    Actor::new("sam", Role::SupportStaff)
}

pub fn new_ticket_input(title: &str) -> NewTicket {
    NewTicket {
        title: title.to_string(),
        description: String::from("Connection resets at the top of each hour"),
        category: Category::Network,
        subcategory: Some(String::from("VPN")),
        priority: Priority::High,
        impact: Impact::Moderate,
        urgency: Urgency::Normal,
        service_level: ServiceLevel::Premium,
    }
}

/// Creates and stores a ticket requested by `alice` at `at`.
pub fn create_stored_ticket(
    persistence: &mut Persistence,
    title: &str,
    at: OffsetDateTime,
) -> StoredChange {
    persistence
        .create_ticket(at.year(), |number| {
            create_ticket(
                new_ticket_input(title),
                number,
                &requester(),
                at,
                &SlaPolicy::default(),
            )
            .map_err(CreateError::Rejected)
        })
        .unwrap()
}
