// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{NewTicket, TransitionResult, create_ticket};
use servicedesk_audit::Actor;
use servicedesk_domain::{
    Category, DirectoryUser, Impact, Priority, Role, ServiceLevel, SlaPolicy, Ticket,
    TicketNumber, Urgency,
};
use time::OffsetDateTime;
use time::macros::datetime;

pub const T0: OffsetDateTime = datetime!(2026-03-02 09:00 UTC);

pub fn requester() -> Actor {
    Actor::new("alice", Role::EndUser)
}

pub fn staff() -> Actor {
    Actor::new("sam", Role::SupportStaff)
}

pub fn manager() -> Actor {
    Actor::new("morgan", Role::SupportManager)
}

pub fn outsider() -> Actor {
    Actor::new("bob", Role::EndUser)
}

pub fn create_test_user(user_id: &str, role: Role) -> DirectoryUser {
    DirectoryUser {
        user_id: user_id.to_string(),
        display_name: format!("User {user_id}"),
        email: format!("{user_id}@example.com"),
        role,
        is_active: true,
    }
}

pub fn new_ticket_input(service_level: ServiceLevel) -> NewTicket {
    NewTicket {
        title: String::from("VPN drops every hour"),
        description: String::from("Connection resets at the top of each hour"),
        category: Category::Network,
        subcategory: None,
        priority: Priority::Medium,
        impact: Impact::Moderate,
        urgency: Urgency::Normal,
        service_level,
    }
}

/// Creates a saved ticket (storage key 1) requested by `alice` at `created_at`.
pub fn create_test_ticket(service_level: ServiceLevel, created_at: OffsetDateTime) -> Ticket {
    let result: TransitionResult = create_ticket(
        new_ticket_input(service_level),
        TicketNumber::new(created_at.year(), 1).unwrap(),
        &requester(),
        created_at,
        &SlaPolicy::default(),
    )
    .unwrap();
    let mut ticket = result.new_ticket;
    ticket.ticket_id = Some(1);
    ticket
}
