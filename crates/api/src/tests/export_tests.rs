// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use servicedesk::ExportRow;
use servicedesk_domain::{SlaPolicy, TicketFilter, TicketStatus};
use time::Duration;

use super::helpers::{
    T0, create_test_manager, create_test_requester, open_test_ticket, setup_test_persistence,
};
use crate::{
    ApiError, AssignTicketRequest, EXPORT_HEADERS, assign_ticket, export_report_csv,
    render_export_csv,
};

fn sample_row() -> ExportRow {
    ExportRow {
        ticket_number: String::from("TKT-2026-000007"),
        title: String::from("VPN drops, again"),
        status: String::from("OPEN"),
        priority: String::from("HIGH"),
        impact: String::from("MODERATE"),
        urgency: String::from("NORMAL"),
        service_level: String::from("PREMIUM"),
        category: String::from("Network"),
        subcategory: String::new(),
        requester: String::from("Alice Archer"),
        assignee: String::from("Unassigned"),
        created_at: T0,
        due_date: Some(T0 + Duration::hours(16)),
        closed_at: None,
    }
}

#[test]
fn test_empty_export_still_has_header() {
    let csv = render_export_csv(&[]).unwrap();
    assert_eq!(csv, format!("{}\n", EXPORT_HEADERS.join(",")));
}

#[test]
fn test_export_quotes_fields_and_formats_dates() {
    let csv = render_export_csv(&[sample_row()]).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(
        lines[1],
        "TKT-2026-000007,\"VPN drops, again\",OPEN,HIGH,MODERATE,NORMAL,PREMIUM,Network,,\
         Alice Archer,Unassigned,2026-03-02T09:00:00Z,2026-03-03T01:00:00Z,"
    );
}

#[test]
fn test_export_report_uses_directory_names() {
    let mut persistence = setup_test_persistence();
    let (first, _) = open_test_ticket(&mut persistence, "Laptop dead", T0);
    open_test_ticket(&mut persistence, "Mouse missing", T0 + Duration::hours(1));
    let manager = create_test_manager();
    assign_ticket(
        &mut persistence,
        first,
        AssignTicketRequest {
            assignee_id: Some(String::from("sam")),
        },
        &manager,
        &SlaPolicy::default(),
        T0,
    )
    .unwrap();

    let csv = export_report_csv(&mut persistence, &TicketFilter::default(), &manager).unwrap();
    let mut reader = csv::Reader::from_reader(csv.as_bytes());
    let headers = reader.headers().unwrap().clone();
    assert_eq!(headers.iter().collect::<Vec<_>>(), EXPORT_HEADERS.to_vec());

    let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
    assert_eq!(records.len(), 2);
    assert_eq!(&records[0][1], "Mouse missing");
    assert_eq!(&records[0][10], "Unassigned");
    assert_eq!(&records[1][1], "Laptop dead");
    assert_eq!(&records[1][9], "Alice Archer");
    assert_eq!(&records[1][10], "Sam Support");
}

#[test]
fn test_export_applies_filter() {
    let mut persistence = setup_test_persistence();
    open_test_ticket(&mut persistence, "Laptop dead", T0);

    let filter = TicketFilter {
        statuses: vec![TicketStatus::Closed],
        ..TicketFilter::default()
    };
    let csv = export_report_csv(&mut persistence, &filter, &create_test_manager()).unwrap();
    assert_eq!(csv.lines().count(), 1);
}

#[test]
fn test_end_user_cannot_export() {
    let mut persistence = setup_test_persistence();
    let result = export_report_csv(
        &mut persistence,
        &TicketFilter::default(),
        &create_test_requester(),
    );
    assert!(matches!(result, Err(ApiError::Forbidden { .. })));
}
