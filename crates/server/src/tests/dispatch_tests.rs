// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use servicedesk_api::AuthenticatedActor;
use servicedesk_audit::EventType;
use servicedesk_domain::{Category, Impact, Priority, Role, ServiceLevel, Urgency};
use time::OffsetDateTime;

use super::helpers::{create_test_app, create_test_app_state, create_test_ticket};

fn new_ticket() -> servicedesk::NewTicket {
    servicedesk::NewTicket {
        title: String::from("Printer offline"),
        description: String::from("Third floor printer"),
        category: Category::Hardware,
        subcategory: None,
        priority: Priority::Low,
        impact: Impact::Minor,
        urgency: Urgency::Low,
        service_level: ServiceLevel::Standard,
    }
}

#[tokio::test]
async fn test_committed_events_are_broadcast_and_marked() {
    let (app_state, app) = create_test_app();
    let mut rx = app_state.broadcaster.subscribe();

    let ticket_id = create_test_ticket(&app, "Monitor dead").await;

    let event = rx.try_recv().unwrap();
    assert_eq!(event.event_type, EventType::TicketCreated);
    assert_eq!(event.ticket_id, Some(ticket_id));
    assert_eq!(event.actor_id, "alice");

    let mut persistence = app_state.persistence.lock().await;
    assert!(persistence.list_undispatched_events().unwrap().is_empty());
    assert_eq!(persistence.list_ticket_events(ticket_id).unwrap().len(), 1);
}

#[tokio::test]
async fn test_pending_outbox_is_replayed() {
    let app_state = create_test_app_state();
    {
        let mut persistence = app_state.persistence.lock().await;
        servicedesk_api::create_ticket(
            &mut persistence,
            new_ticket(),
            &AuthenticatedActor::new("alice", Role::EndUser),
            &app_state.sla_policy,
            OffsetDateTime::now_utc(),
        )
        .unwrap();
    }
    let mut rx = app_state.broadcaster.subscribe();

    assert_eq!(app_state.dispatch_pending().await.unwrap(), 1);
    assert_eq!(rx.try_recv().unwrap().event_type, EventType::TicketCreated);
    assert_eq!(app_state.dispatch_pending().await.unwrap(), 0);
}
