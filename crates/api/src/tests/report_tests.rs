// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use servicedesk_domain::{SlaPolicy, TicketFilter, TicketStatus};
use time::Duration;

use super::helpers::{
    T0, create_test_agent, create_test_manager, create_test_requester, open_test_ticket,
    setup_test_persistence,
};
use crate::{ApiError, TransitionStatusRequest, build_report, transition_ticket_status};

#[test]
fn test_report_counts_all_tickets_for_support() {
    let mut persistence = setup_test_persistence();
    let policy = SlaPolicy::default();
    let (resolved, _) = open_test_ticket(&mut persistence, "Laptop dead", T0);
    open_test_ticket(&mut persistence, "Mouse missing", T0 + Duration::hours(1));
    open_test_ticket(&mut persistence, "Monitor flicker", T0 + Duration::hours(2));

    transition_ticket_status(
        &mut persistence,
        resolved,
        TransitionStatusRequest {
            status: TicketStatus::Resolved,
            resolution: Some(String::from("Replaced")),
            expected_status: None,
        },
        &create_test_agent(),
        &policy,
        T0 + Duration::hours(6),
    )
    .unwrap();

    let now = T0 + Duration::hours(48);
    let report = build_report(
        &mut persistence,
        &TicketFilter::default(),
        &create_test_agent(),
        &policy,
        now,
    )
    .unwrap();

    assert_eq!(report.generated_at, now);
    assert_eq!(report.summary.total, 3);
    assert_eq!(report.summary.resolved, 1);
    assert_eq!(report.summary.pending, 2);
    // Standard tickets are due after 40 hours.
    assert_eq!(report.summary.overdue, 2);
    assert_eq!(report.status_breakdown.len(), TicketStatus::ALL.len());
    assert_eq!(report.sla_metrics.resolution_compliance, 100);
}

#[test]
fn test_report_respects_filter() {
    let mut persistence = setup_test_persistence();
    open_test_ticket(&mut persistence, "Old", T0);
    open_test_ticket(&mut persistence, "New", T0 + Duration::days(3));

    let filter = TicketFilter {
        date_from: Some(T0 + Duration::days(1)),
        ..TicketFilter::default()
    };
    let report = build_report(
        &mut persistence,
        &filter,
        &create_test_manager(),
        &SlaPolicy::default(),
        T0 + Duration::days(4),
    )
    .unwrap();
    assert_eq!(report.summary.total, 1);
    assert_eq!(report.filter, filter);
}

#[test]
fn test_end_user_cannot_build_report() {
    let mut persistence = setup_test_persistence();
    let result = build_report(
        &mut persistence,
        &TicketFilter::default(),
        &create_test_requester(),
        &SlaPolicy::default(),
        T0,
    );
    assert!(matches!(result, Err(ApiError::Forbidden { .. })));
}

#[test]
fn test_report_rejects_inverted_range() {
    let mut persistence = setup_test_persistence();
    let filter = TicketFilter {
        date_from: Some(T0),
        date_to: Some(T0 - Duration::hours(1)),
        ..TicketFilter::default()
    };
    let result = build_report(
        &mut persistence,
        &filter,
        &create_test_manager(),
        &SlaPolicy::default(),
        T0,
    );
    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}
