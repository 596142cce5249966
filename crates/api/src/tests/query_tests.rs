// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use servicedesk_domain::{Category, Priority, TicketStatus};

use super::helpers::{T0, create_test_requester, open_test_ticket, setup_test_persistence};
use crate::{ApiError, AssignTicketRequest, Capability, ListTicketsQuery, get_ticket};

#[test]
fn test_empty_query_is_unfiltered() {
    let filter = ListTicketsQuery::default().into_filter().unwrap();
    assert!(filter.statuses.is_empty());
    assert_eq!(filter.date_from, None);
    assert_eq!(filter.text, None);
}

#[test]
fn test_query_parses_comma_lists_and_dates() {
    let query = ListTicketsQuery {
        date_from: Some(String::from("2026-03-02T09:00:00Z")),
        status: Some(String::from("OPEN, IN_PROGRESS,")),
        priority: Some(String::from("CRITICAL")),
        category: Some(String::from("NETWORK,ACCESS")),
        text: Some(String::from("vpn")),
        ..ListTicketsQuery::default()
    };
    let filter = query.into_filter().unwrap();

    assert_eq!(filter.date_from, Some(T0));
    assert_eq!(
        filter.statuses,
        vec![TicketStatus::Open, TicketStatus::InProgress]
    );
    assert_eq!(filter.priorities, vec![Priority::Critical]);
    assert_eq!(filter.categories, vec![Category::Network, Category::Access]);
    assert_eq!(filter.text.as_deref(), Some("vpn"));
}

#[test]
fn test_query_rejects_unknown_values() {
    let query = ListTicketsQuery {
        status: Some(String::from("PENDING")),
        ..ListTicketsQuery::default()
    };
    assert!(matches!(
        query.into_filter(),
        Err(ApiError::InvalidInput { ref field, .. }) if field == "status"
    ));

    let query = ListTicketsQuery {
        date_to: Some(String::from("yesterday")),
        ..ListTicketsQuery::default()
    };
    assert!(matches!(
        query.into_filter(),
        Err(ApiError::InvalidInput { ref field, .. }) if field == "date_to"
    ));
}

#[test]
fn test_capability_serializes_as_bool() {
    assert_eq!(serde_json::to_value(Capability::Allowed).unwrap(), true);
    assert_eq!(serde_json::to_value(Capability::Denied).unwrap(), false);
    let parsed: Capability = serde_json::from_str("true").unwrap();
    assert_eq!(parsed, Capability::Allowed);
}

#[test]
fn test_ticket_info_flattens_ticket_fields() {
    let mut persistence = setup_test_persistence();
    let (ticket_id, _) = open_test_ticket(&mut persistence, "Laptop dead", T0);
    let info = get_ticket(&mut persistence, ticket_id, &create_test_requester(), T0).unwrap();

    let json = serde_json::to_value(&info).unwrap();
    assert_eq!(json["title"], "Laptop dead");
    assert_eq!(json["status"], "NEW");
    assert_eq!(json["is_breached"], false);
    assert!(json["sla_compliant"].is_null());
    assert_eq!(json["capabilities"]["can_assign"], false);
}

#[test]
fn test_assign_request_null_means_unassign() {
    let request: AssignTicketRequest = serde_json::from_str(r#"{"assignee_id": null}"#).unwrap();
    assert_eq!(request.assignee_id, None);
    let request: AssignTicketRequest = serde_json::from_str(r#"{"assignee_id": "sam"}"#).unwrap();
    assert_eq!(request.assignee_id.as_deref(), Some("sam"));
}
