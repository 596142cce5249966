// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use time::Duration;

use super::{T0, create_test_ticket};
use crate::{
    DomainError, ServiceLevel, SlaPolicy, SlaTargets, TicketStatus, is_breached, is_compliant,
};

#[test]
fn test_default_targets() {
    let policy = SlaPolicy::default();
    assert_eq!(
        policy.resolve_sla_targets(ServiceLevel::Standard),
        SlaTargets::new(8, 40)
    );
    assert_eq!(
        policy.resolve_sla_targets(ServiceLevel::Premium),
        SlaTargets::new(4, 16)
    );
    assert_eq!(
        policy.resolve_sla_targets(ServiceLevel::CriticalSupport),
        SlaTargets::new(0, 4)
    );
}

#[test]
fn test_due_date_is_deterministic_and_not_before_creation() {
    let policy = SlaPolicy::default();
    for level in ServiceLevel::ALL {
        let first = policy.compute_due_date(T0, *level);
        let second = policy.compute_due_date(T0, *level);
        assert_eq!(first, second);
        assert!(first >= T0);
    }
}

#[test]
fn test_critical_support_due_in_four_hours() {
    let due = SlaPolicy::default().compute_due_date(T0, ServiceLevel::CriticalSupport);
    assert_eq!(due, T0 + Duration::hours(4));
}

#[test]
fn test_zero_hour_override_gives_due_date_equal_to_creation() {
    let policy = SlaPolicy::new(
        SlaTargets::new(0, 0),
        SlaTargets::new(0, 0),
        SlaTargets::new(0, 0),
    )
    .unwrap();
    assert_eq!(policy.compute_due_date(T0, ServiceLevel::Standard), T0);
}

#[test]
fn test_policy_rejects_response_longer_than_resolution() {
    let result = SlaPolicy::new(
        SlaTargets::new(50, 40),
        SlaTargets::new(4, 16),
        SlaTargets::new(0, 4),
    );
    assert!(matches!(result, Err(DomainError::Validation { .. })));
}

#[test]
fn test_resolved_before_due_date_is_compliant() {
    let mut ticket = create_test_ticket("u1", T0);
    ticket.service_level = ServiceLevel::CriticalSupport;
    ticket.due_date = Some(T0 + Duration::hours(4));

    ticket.status = TicketStatus::Resolved;
    ticket.closed_at = Some(T0 + Duration::hours(3));
    assert_eq!(is_compliant(&ticket), Some(true));

    ticket.closed_at = Some(T0 + Duration::hours(5));
    assert_eq!(is_compliant(&ticket), Some(false));
}

#[test]
fn test_closing_exactly_at_due_date_is_compliant() {
    let mut ticket = create_test_ticket("u1", T0);
    ticket.status = TicketStatus::Closed;
    ticket.closed_at = ticket.due_date;
    assert_eq!(is_compliant(&ticket), Some(true));
}

#[test]
fn test_open_ticket_has_no_compliance_verdict() {
    let ticket = create_test_ticket("u1", T0);
    assert_eq!(is_compliant(&ticket), None);
}

#[test]
fn test_breach_is_live_and_only_for_open_tickets() {
    let mut ticket = create_test_ticket("u1", T0);
    let due = ticket.due_date.unwrap();

    assert!(!is_breached(&ticket, due));
    assert!(is_breached(&ticket, due + Duration::seconds(1)));

    ticket.status = TicketStatus::Resolved;
    ticket.closed_at = Some(due + Duration::hours(1));
    assert!(!is_breached(&ticket, due + Duration::hours(2)));
}

#[test]
fn test_missing_due_date_is_never_breached() {
    let mut ticket = create_test_ticket("u1", T0);
    ticket.due_date = None;
    assert!(!is_breached(&ticket, T0 + Duration::days(365)));
}

#[test]
fn test_response_compliance_uses_response_target() {
    let policy = SlaPolicy::default();
    let mut ticket = create_test_ticket("u1", T0);
    assert_eq!(policy.is_response_compliant(&ticket), None);

    ticket.first_responded_at = Some(T0 + Duration::hours(8));
    assert_eq!(policy.is_response_compliant(&ticket), Some(true));

    ticket.first_responded_at = Some(T0 + Duration::hours(9));
    assert_eq!(policy.is_response_compliant(&ticket), Some(false));
}

#[test]
fn test_policy_deserializes_partial_overrides() {
    let policy: SlaPolicy = serde_json::from_str(
        r#"{"premium": {"response_hours": 2, "resolution_hours": 8}}"#,
    )
    .unwrap();
    assert_eq!(policy.premium, SlaTargets::new(2, 8));
    assert_eq!(policy.standard, SlaTargets::new(8, 40));
}
