// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Actor, DomainEvent, EventType, FIELD_CREATED, HistoryDraft};
use servicedesk_domain::Role;
use time::macros::datetime;

#[test]
fn test_actor_creation_requires_all_fields() {
    let actor: Actor = Actor::new("user-123", Role::SupportStaff);

    assert_eq!(actor.id, "user-123");
    assert_eq!(actor.role, Role::SupportStaff);
}

#[test]
fn test_history_draft_records_actor_and_time() {
    let actor = Actor::new("sam", Role::SupportStaff);
    let at = datetime!(2026-03-02 10:00 UTC);
    let draft = HistoryDraft::changed(
        "priority",
        Some(String::from("MEDIUM")),
        Some(String::from("HIGH")),
        &actor,
        at,
    );

    assert_eq!(draft.field, "priority");
    assert_eq!(draft.old_value.as_deref(), Some("MEDIUM"));
    assert_eq!(draft.new_value.as_deref(), Some("HIGH"));
    assert_eq!(draft.changed_by, "sam");
    assert_eq!(draft.changed_at, at);
    assert!(!draft.is_status_change());
}

#[test]
fn test_created_entry_carries_ticket_number() {
    let actor = Actor::new("alice", Role::EndUser);
    let draft = HistoryDraft::created("TKT-2026-000001", &actor, datetime!(2026-03-02 10:00 UTC));

    assert_eq!(draft.field, FIELD_CREATED);
    assert_eq!(draft.old_value, None);
    assert_eq!(draft.new_value.as_deref(), Some("TKT-2026-000001"));
}

#[test]
fn test_event_type_round_trips_through_stored_form() {
    for kind in [
        EventType::TicketCreated,
        EventType::StatusChanged,
        EventType::TicketAssigned,
        EventType::CommentAdded,
    ] {
        assert_eq!(kind.as_str().parse::<EventType>().unwrap(), kind);
    }
    assert!("TICKET_DELETED".parse::<EventType>().is_err());
}

#[test]
fn test_event_serializes_with_wire_field_names() {
    let actor = Actor::new("alice", Role::EndUser);
    let event = DomainEvent::new(
        EventType::TicketCreated,
        Some(7),
        "TKT-2026-000007",
        &actor,
        datetime!(2026-03-02 10:00 UTC),
        serde_json::json!({"title": "VPN down"}),
    );

    let value = serde_json::to_value(&event).unwrap();
    assert_eq!(value["type"], "TICKET_CREATED");
    assert_eq!(value["ticket_id"], 7);
    assert_eq!(value["actor_id"], "alice");
    assert_eq!(value["timestamp"], "2026-03-02T10:00:00Z");
    assert_eq!(value["payload"]["title"], "VPN down");
}
