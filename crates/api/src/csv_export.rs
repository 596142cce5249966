// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! CSV rendering of ticket export rows.

use servicedesk::ExportRow;

use crate::error::ApiError;

/// Column headers, in `ExportRow` field order.
pub const EXPORT_HEADERS: [&str; 14] = [
    "ticket_number",
    "title",
    "status",
    "priority",
    "impact",
    "urgency",
    "service_level",
    "category",
    "subcategory",
    "requester",
    "assignee",
    "created_at",
    "due_date",
    "closed_at",
];

/// Renders export rows as CSV text with a header line.
///
/// The header is written even when there are no rows.
///
/// # Errors
///
/// Returns `ApiError::Internal` if a row cannot be serialized.
pub fn render_export_csv(rows: &[ExportRow]) -> Result<String, ApiError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(EXPORT_HEADERS).map_err(csv_failure)?;
    for row in rows {
        writer.serialize(row).map_err(csv_failure)?;
    }

    let bytes: Vec<u8> = writer.into_inner().map_err(|e| ApiError::Internal {
        message: format!("Failed to finish CSV export: {e}"),
    })?;
    String::from_utf8(bytes).map_err(|e| ApiError::Internal {
        message: format!("CSV export is not UTF-8: {e}"),
    })
}

fn csv_failure(err: csv::Error) -> ApiError {
    ApiError::Internal {
        message: format!("Failed to write CSV export: {err}"),
    }
}
