// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use servicedesk::NewTicket;
use servicedesk_domain::{
    Category, DirectoryUser, Impact, Priority, Role, ServiceLevel, SlaPolicy, Urgency,
};
use servicedesk_persistence::Persistence;
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{AuthenticatedActor, TicketInfo, create_ticket};

pub const T0: OffsetDateTime = datetime!(2026-03-02 09:00 UTC);

pub fn create_test_requester() -> AuthenticatedActor {
    AuthenticatedActor::new("alice", Role::EndUser)
}

pub fn create_test_bystander() -> AuthenticatedActor {
    AuthenticatedActor::new("bob", Role::EndUser)
}

pub fn create_test_agent() -> AuthenticatedActor {
    AuthenticatedActor::new("sam", Role::SupportStaff)
}

pub fn create_test_manager() -> AuthenticatedActor {
    AuthenticatedActor::new("maria", Role::SupportManager)
}

pub fn create_test_admin() -> AuthenticatedActor {
    AuthenticatedActor::new("root", Role::Admin)
}

fn directory_user(user_id: &str, display_name: &str, role: Role, is_active: bool) -> DirectoryUser {
    DirectoryUser {
        user_id: user_id.to_string(),
        display_name: display_name.to_string(),
        email: format!("{user_id}@example.com"),
        role,
        is_active,
    }
}

/// Opens an in-memory store with a small directory.
///
/// `ivan` is a disabled agent and cannot take tickets.
pub fn setup_test_persistence() -> Persistence {
    let mut persistence = Persistence::new_in_memory().unwrap();
    for user in [
        directory_user("alice", "Alice Archer", Role::EndUser, true),
        directory_user("bob", "Bob Baker", Role::EndUser, true),
        directory_user("sam", "Sam Support", Role::SupportStaff, true),
        directory_user("maria", "Maria Manager", Role::SupportManager, true),
        directory_user("ivan", "Ivan Idle", Role::SupportStaff, false),
    ] {
        persistence.upsert_directory_user(&user).unwrap();
    }
    persistence
}

pub fn create_test_new_ticket(title: &str) -> NewTicket {
    NewTicket {
        title: title.to_string(),
        description: String::from("Laptop will not boot past the logo"),
        category: Category::Hardware,
        subcategory: None,
        priority: Priority::Medium,
        impact: Impact::Minor,
        urgency: Urgency::Normal,
        service_level: ServiceLevel::Standard,
    }
}

/// Opens a ticket as `alice` and returns it with its id.
pub fn open_test_ticket(
    persistence: &mut Persistence,
    title: &str,
    at: OffsetDateTime,
) -> (i64, TicketInfo) {
    let created = create_ticket(
        persistence,
        create_test_new_ticket(title),
        &create_test_requester(),
        &SlaPolicy::default(),
        at,
    )
    .unwrap();
    let ticket_id = created.response.ticket.ticket_id.unwrap();
    (ticket_id, created.response)
}
