// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, TicketNumber};

#[test]
fn test_format_is_zero_padded() {
    let number = TicketNumber::new(2026, 42).unwrap();
    assert_eq!(number.to_string(), "TKT-2026-000042");
}

#[test]
fn test_sequence_past_six_digits_still_formats() {
    let number = TicketNumber::new(2026, 1_234_567).unwrap();
    assert_eq!(number.to_string(), "TKT-2026-1234567");
    assert_eq!("TKT-2026-1234567".parse::<TicketNumber>().unwrap(), number);
}

#[test]
fn test_parse_reads_year_and_sequence() {
    let number: TicketNumber = "TKT-2025-000310".parse().unwrap();
    assert_eq!(number.year(), 2025);
    assert_eq!(number.sequence(), 310);
}

#[test]
fn test_malformed_numbers_are_rejected() {
    for raw in [
        "",
        "TKT-2026",
        "INC-2026-000001",
        "TKT-26-000001",
        "TKT-2026-01",
        "TKT-2026-000000",
        "TKT-abcd-000001",
    ] {
        assert!(
            matches!(
                raw.parse::<TicketNumber>(),
                Err(DomainError::Validation { .. })
            ),
            "{raw} should not parse"
        );
    }
}

#[test]
fn test_zero_sequence_is_invalid() {
    assert!(TicketNumber::new(2026, 0).is_err());
}

#[test]
fn test_serializes_as_string() {
    let number = TicketNumber::new(2026, 7).unwrap();
    let json = serde_json::to_string(&number).unwrap();
    assert_eq!(json, "\"TKT-2026-000007\"");
}
