// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{T0, create_test_ticket, create_test_user, requester, staff};
use crate::{CoreError, TicketCommand, apply};
use servicedesk_audit::EventType;
use servicedesk_domain::{DomainError, Role, ServiceLevel, SlaPolicy, TicketStatus};
use time::Duration;

fn assign_to(user_id: &str, role: Role) -> TicketCommand {
    TicketCommand::Assign {
        assignee: create_test_user(user_id, role),
    }
}

#[test]
fn test_assigning_new_ticket_auto_triages_to_open() {
    let ticket = create_test_ticket(ServiceLevel::Standard, T0);
    let now = T0 + Duration::minutes(30);

    let result = apply(
        &ticket,
        assign_to("sam", Role::SupportStaff),
        &staff(),
        now,
        &SlaPolicy::default(),
    )
    .unwrap();

    assert_eq!(result.new_ticket.assignee_id.as_deref(), Some("sam"));
    assert_eq!(result.new_ticket.status, TicketStatus::Open);

    let fields: Vec<&str> = result.history.iter().map(|h| h.field.as_str()).collect();
    assert_eq!(fields, vec!["assignee_id", "status", "first_response"]);

    let events: Vec<EventType> = result.events.iter().map(|e| e.event_type).collect();
    assert_eq!(
        events,
        vec![EventType::TicketAssigned, EventType::StatusChanged]
    );
    assert_eq!(result.events[1].payload["auto_triaged"], true);
}

#[test]
fn test_reassigning_in_progress_ticket_keeps_status() {
    let mut ticket = create_test_ticket(ServiceLevel::Standard, T0);
    ticket.status = TicketStatus::InProgress;
    ticket.assignee_id = Some(String::from("sam"));

    let result = apply(
        &ticket,
        assign_to("morgan", Role::SupportManager),
        &staff(),
        T0 + Duration::hours(1),
        &SlaPolicy::default(),
    )
    .unwrap();

    assert_eq!(result.new_ticket.status, TicketStatus::InProgress);
    let entry = &result.history[0];
    assert_eq!(entry.field, "assignee_id");
    assert_eq!(entry.old_value.as_deref(), Some("sam"));
    assert_eq!(entry.new_value.as_deref(), Some("morgan"));
}

#[test]
fn test_assigning_current_assignee_changes_nothing() {
    let mut ticket = create_test_ticket(ServiceLevel::Standard, T0);
    ticket.status = TicketStatus::Open;
    ticket.assignee_id = Some(String::from("sam"));
    ticket.first_responded_at = Some(T0);

    let result = apply(
        &ticket,
        assign_to("sam", Role::SupportStaff),
        &staff(),
        T0 + Duration::hours(1),
        &SlaPolicy::default(),
    )
    .unwrap();

    assert!(!result.has_changes());
    assert!(result.events.is_empty());
    assert_eq!(result.new_ticket, ticket);
}

#[test]
fn test_end_users_cannot_assign() {
    let ticket = create_test_ticket(ServiceLevel::Standard, T0);

    let result = apply(
        &ticket,
        assign_to("sam", Role::SupportStaff),
        &requester(),
        T0,
        &SlaPolicy::default(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::Forbidden { .. }))
    ));
}

#[test]
fn test_assignee_must_be_active_support_user() {
    let ticket = create_test_ticket(ServiceLevel::Standard, T0);

    let end_user = apply(
        &ticket,
        assign_to("carol", Role::EndUser),
        &staff(),
        T0,
        &SlaPolicy::default(),
    );
    assert!(matches!(
        end_user,
        Err(CoreError::DomainViolation(DomainError::Validation { ref field, .. })) if field == "assignee_id"
    ));

    let mut inactive = create_test_user("dana", Role::SupportStaff);
    inactive.is_active = false;
    let result = apply(
        &ticket,
        TicketCommand::Assign { assignee: inactive },
        &staff(),
        T0,
        &SlaPolicy::default(),
    );
    assert!(result.is_err());
}

#[test]
fn test_unassign_records_history_and_event() {
    let mut ticket = create_test_ticket(ServiceLevel::Standard, T0);
    ticket.status = TicketStatus::Open;
    ticket.assignee_id = Some(String::from("sam"));
    ticket.first_responded_at = Some(T0);

    let result = apply(
        &ticket,
        TicketCommand::Unassign,
        &staff(),
        T0 + Duration::hours(1),
        &SlaPolicy::default(),
    )
    .unwrap();

    assert_eq!(result.new_ticket.assignee_id, None);
    assert_eq!(result.history.len(), 1);
    assert_eq!(result.history[0].new_value, None);
    assert_eq!(result.events[0].event_type, EventType::TicketAssigned);
    assert!(result.events[0].payload["assignee_id"].is_null());
}
