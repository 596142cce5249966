// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Comment and attachment queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use servicedesk_domain::{Attachment, Comment};

use crate::data_models::{flag, parse_timestamp};
use crate::diesel_schema::{attachments, comments};
use crate::error::PersistenceError;

/// Diesel Queryable struct for comment rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = comments)]
struct CommentRow {
    comment_id: i64,
    ticket_id: i64,
    author_id: String,
    content: String,
    is_internal: i32,
    created_at: String,
    updated_at: String,
}

impl TryFrom<CommentRow> for Comment {
    type Error = PersistenceError;

    fn try_from(row: CommentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            comment_id: row.comment_id,
            ticket_id: row.ticket_id,
            author_id: row.author_id,
            content: row.content,
            is_internal: flag(row.is_internal),
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = attachments)]
struct AttachmentRow {
    attachment_id: i64,
    ticket_id: i64,
    filename: String,
    size_bytes: i64,
    mime_type: String,
    storage_key: String,
    uploaded_by: String,
    created_at: String,
}

impl TryFrom<AttachmentRow> for Attachment {
    type Error = PersistenceError;

    fn try_from(row: AttachmentRow) -> Result<Self, Self::Error> {
        let size_bytes: u64 = u64::try_from(row.size_bytes).map_err(|_| {
            PersistenceError::ReconstructionError(format!(
                "attachment {} has negative size {}",
                row.attachment_id, row.size_bytes
            ))
        })?;
        Ok(Self {
            attachment_id: row.attachment_id,
            ticket_id: row.ticket_id,
            filename: row.filename,
            size_bytes,
            mime_type: row.mime_type,
            storage_key: row.storage_key,
            uploaded_by: row.uploaded_by,
            created_at: parse_timestamp(&row.created_at)?,
        })
    }
}

/// Retrieves all comments on a ticket, oldest first.
///
/// Visibility filtering is the caller's concern.
///
/// # Errors
///
/// Returns an error if the query fails or a row is invalid.
pub fn list_comments(
    conn: &mut SqliteConnection,
    ticket_id: i64,
) -> Result<Vec<Comment>, PersistenceError> {
    let rows: Vec<CommentRow> = comments::table
        .filter(comments::ticket_id.eq(ticket_id))
        .order(comments::comment_id.asc())
        .select(CommentRow::as_select())
        .load(conn)?;

    rows.into_iter().map(Comment::try_from).collect()
}

/// Retrieves a single comment.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the comment does not exist.
pub fn get_comment(
    conn: &mut SqliteConnection,
    comment_id: i64,
) -> Result<Comment, PersistenceError> {
    let row: Option<CommentRow> = comments::table
        .filter(comments::comment_id.eq(comment_id))
        .select(CommentRow::as_select())
        .first(conn)
        .optional()?;

    row.ok_or_else(|| PersistenceError::not_found("Comment", comment_id))?
        .try_into()
}

/// Retrieves the attachment metadata of a ticket, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row is invalid.
pub fn list_attachments(
    conn: &mut SqliteConnection,
    ticket_id: i64,
) -> Result<Vec<Attachment>, PersistenceError> {
    let rows: Vec<AttachmentRow> = attachments::table
        .filter(attachments::ticket_id.eq(ticket_id))
        .order(attachments::attachment_id.asc())
        .select(AttachmentRow::as_select())
        .load(conn)?;

    rows.into_iter().map(Attachment::try_from).collect()
}

/// Retrieves a single attachment.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the attachment does not exist.
pub fn get_attachment(
    conn: &mut SqliteConnection,
    attachment_id: i64,
) -> Result<Attachment, PersistenceError> {
    let row: Option<AttachmentRow> = attachments::table
        .filter(attachments::attachment_id.eq(attachment_id))
        .select(AttachmentRow::as_select())
        .first(conn)
        .optional()?;

    row.ok_or_else(|| PersistenceError::not_found("Attachment", attachment_id))?
        .try_into()
}
