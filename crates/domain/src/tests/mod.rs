// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod sla_tests;
mod ticket_number_tests;

use time::OffsetDateTime;
use time::macros::datetime;

use crate::{
    Category, Impact, Priority, ServiceLevel, SlaPolicy, Ticket, TicketNumber, TicketStatus,
    Urgency,
};

pub const T0: OffsetDateTime = datetime!(2026-03-02 09:00 UTC);

/// Builds an unsaved NEW ticket created at `created_at` by `requester`.
pub fn create_test_ticket(requester: &str, created_at: OffsetDateTime) -> Ticket {
    let level = ServiceLevel::Standard;
    Ticket {
        ticket_id: Some(1),
        ticket_number: TicketNumber::new(2026, 1).unwrap(),
        title: String::from("Printer offline"),
        description: String::from("The third floor printer does not respond"),
        category: Category::Hardware,
        subcategory: None,
        priority: Priority::Medium,
        impact: Impact::Moderate,
        urgency: Urgency::Normal,
        service_level: level,
        status: TicketStatus::New,
        requester_id: requester.to_string(),
        assignee_id: None,
        resolution: None,
        created_at,
        updated_at: created_at,
        due_date: Some(SlaPolicy::default().compute_due_date(created_at, level)),
        closed_at: None,
        first_responded_at: None,
        version: 1,
    }
}
