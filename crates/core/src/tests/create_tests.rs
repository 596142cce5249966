// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{T0, new_ticket_input, requester};
use crate::{CoreError, create_ticket};
use servicedesk_audit::{EventType, FIELD_CREATED};
use servicedesk_domain::{
    DomainError, Impact, Priority, ServiceLevel, SlaPolicy, TicketNumber, TicketStatus, Urgency,
};
use time::Duration;

#[test]
fn test_create_sets_defaults_and_due_date() {
    let input = new_ticket_input(ServiceLevel::CriticalSupport);
    let result = create_ticket(
        input,
        TicketNumber::new(2026, 12).unwrap(),
        &requester(),
        T0,
        &SlaPolicy::default(),
    )
    .unwrap();
    let ticket = &result.new_ticket;

    assert_eq!(ticket.ticket_id, None);
    assert_eq!(ticket.ticket_number.to_string(), "TKT-2026-000012");
    assert_eq!(ticket.status, TicketStatus::New);
    assert_eq!(ticket.requester_id, "alice");
    assert_eq!(ticket.assignee_id, None);
    assert_eq!(ticket.due_date, Some(T0 + Duration::hours(4)));
    assert_eq!(ticket.closed_at, None);
    assert_eq!(ticket.created_at, T0);
    assert_eq!(ticket.updated_at, T0);
    assert_eq!(ticket.version, 1);
}

#[test]
fn test_create_defaults_deserialize_from_minimal_input() {
    let input: crate::NewTicket = serde_json::from_str(
        r#"{"title": "Mouse", "description": "Left click sticks", "category": "HARDWARE"}"#,
    )
    .unwrap();

    assert_eq!(input.priority, Priority::Medium);
    assert_eq!(input.impact, Impact::Moderate);
    assert_eq!(input.urgency, Urgency::Normal);
    assert_eq!(input.service_level, ServiceLevel::Standard);
}

#[test]
fn test_create_records_one_history_entry_and_one_event() {
    let result = create_ticket(
        new_ticket_input(ServiceLevel::Standard),
        TicketNumber::new(2026, 3).unwrap(),
        &requester(),
        T0,
        &SlaPolicy::default(),
    )
    .unwrap();

    assert_eq!(result.history.len(), 1);
    assert_eq!(result.history[0].field, FIELD_CREATED);
    assert_eq!(
        result.history[0].new_value.as_deref(),
        Some("TKT-2026-000003")
    );

    assert_eq!(result.events.len(), 1);
    assert_eq!(result.events[0].event_type, EventType::TicketCreated);
    assert_eq!(result.events[0].actor_id, "alice");
    assert_eq!(result.events[0].occurred_at, T0);
}

#[test]
fn test_create_rejects_blank_title() {
    let mut input = new_ticket_input(ServiceLevel::Standard);
    input.title = String::from("  ");

    let result = create_ticket(
        input,
        TicketNumber::new(2026, 1).unwrap(),
        &requester(),
        T0,
        &SlaPolicy::default(),
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::Validation { ref field, .. })) if field == "title"
    ));
}

#[test]
fn test_create_trims_blank_subcategory_to_none() {
    let mut input = new_ticket_input(ServiceLevel::Standard);
    input.subcategory = Some(String::from("   "));

    let ticket = create_ticket(
        input,
        TicketNumber::new(2026, 1).unwrap(),
        &requester(),
        T0,
        &SlaPolicy::default(),
    )
    .unwrap()
    .new_ticket;

    assert_eq!(ticket.subcategory, None);
}
