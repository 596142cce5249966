// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Comment and attachment writes.

use diesel::SqliteConnection;
use diesel::prelude::*;
use servicedesk_domain::{Attachment, Comment};
use time::OffsetDateTime;
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{NewAttachment, NewComment, format_timestamp, to_flag};
use crate::diesel_schema::{attachments, comments};
use crate::error::PersistenceError;

/// Inserts a comment.
///
/// # Errors
///
/// Returns an error if the insert fails, including when the ticket does
/// not exist.
pub fn insert_comment(
    conn: &mut SqliteConnection,
    comment: &NewComment,
) -> Result<Comment, PersistenceError> {
    let created_at: String = format_timestamp(comment.created_at)?;
    diesel::insert_into(comments::table)
        .values((
            comments::ticket_id.eq(comment.ticket_id),
            comments::author_id.eq(&comment.author_id),
            comments::content.eq(&comment.content),
            comments::is_internal.eq(to_flag(comment.is_internal)),
            comments::created_at.eq(&created_at),
            comments::updated_at.eq(&created_at),
        ))
        .execute(conn)?;

    let comment_id: i64 = get_last_insert_rowid(conn)?;
    info!(
        comment_id,
        ticket_id = comment.ticket_id,
        author_id = %comment.author_id,
        is_internal = comment.is_internal,
        "Inserted comment"
    );

    Ok(Comment {
        comment_id,
        ticket_id: comment.ticket_id,
        author_id: comment.author_id.clone(),
        content: comment.content.clone(),
        is_internal: comment.is_internal,
        created_at: comment.created_at,
        updated_at: comment.created_at,
    })
}

/// Replaces a comment's content.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the comment does not exist.
pub fn update_comment_content(
    conn: &mut SqliteConnection,
    comment_id: i64,
    content: &str,
    updated_at: OffsetDateTime,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(comments::table.filter(comments::comment_id.eq(comment_id)))
        .set((
            comments::content.eq(content),
            comments::updated_at.eq(format_timestamp(updated_at)?),
        ))
        .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::not_found("Comment", comment_id));
    }
    info!(comment_id, "Updated comment");
    Ok(())
}

/// Deletes a comment.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the comment does not exist.
pub fn delete_comment(conn: &mut SqliteConnection, comment_id: i64) -> Result<(), PersistenceError> {
    let deleted: usize =
        diesel::delete(comments::table.filter(comments::comment_id.eq(comment_id))).execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::not_found("Comment", comment_id));
    }
    info!(comment_id, "Deleted comment");
    Ok(())
}

/// Inserts attachment metadata. The blob itself lives elsewhere.
///
/// # Errors
///
/// Returns an error if the size does not fit or the insert fails.
pub fn insert_attachment(
    conn: &mut SqliteConnection,
    attachment: &NewAttachment,
) -> Result<Attachment, PersistenceError> {
    let size_bytes: i64 = i64::try_from(attachment.size_bytes).map_err(|_| {
        PersistenceError::SerializationError(format!(
            "attachment size {} does not fit in storage",
            attachment.size_bytes
        ))
    })?;

    diesel::insert_into(attachments::table)
        .values((
            attachments::ticket_id.eq(attachment.ticket_id),
            attachments::filename.eq(&attachment.filename),
            attachments::size_bytes.eq(size_bytes),
            attachments::mime_type.eq(&attachment.mime_type),
            attachments::storage_key.eq(&attachment.storage_key),
            attachments::uploaded_by.eq(&attachment.uploaded_by),
            attachments::created_at.eq(format_timestamp(attachment.created_at)?),
        ))
        .execute(conn)?;

    let attachment_id: i64 = get_last_insert_rowid(conn)?;
    info!(
        attachment_id,
        ticket_id = attachment.ticket_id,
        size_bytes,
        "Inserted attachment metadata"
    );

    Ok(Attachment {
        attachment_id,
        ticket_id: attachment.ticket_id,
        filename: attachment.filename.clone(),
        size_bytes: attachment.size_bytes,
        mime_type: attachment.mime_type.clone(),
        storage_key: attachment.storage_key.clone(),
        uploaded_by: attachment.uploaded_by.clone(),
        created_at: attachment.created_at,
    })
}

/// Deletes attachment metadata.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the attachment does not exist.
pub fn delete_attachment(
    conn: &mut SqliteConnection,
    attachment_id: i64,
) -> Result<(), PersistenceError> {
    let deleted: usize = diesel::delete(
        attachments::table.filter(attachments::attachment_id.eq(attachment_id)),
    )
    .execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::not_found("Attachment", attachment_id));
    }
    info!(attachment_id, "Deleted attachment");
    Ok(())
}
