// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.
//!
//! Every handler takes the store, the authenticated caller and, where the
//! outcome depends on the clock, the current time. Ticket mutations return
//! the committed outbox events alongside the response so the caller can
//! publish them.

use servicedesk::{
    ExportRow, NewSavedSearch, NewTicket, ReportSnapshot, SavedSearch, SavedSearchUpdate,
    TicketCommand, TicketUpdate, TransitionResult, apply, build_ticket_report,
    comment_added_event, export_ticket_report, select_breached, select_visible, visible_to,
};
use servicedesk_audit::{Actor, HistoryEntry, RecordedEvent};
use servicedesk_domain::{
    Attachment, Comment, DirectoryUser, SlaPolicy, Ticket, TicketFilter, assert_can_access,
    assert_can_mutate, counts_as_response, has_elevated_access, project_comments_for,
    validate_comment_content,
};
use servicedesk_persistence::{
    NewAttachment, NewComment, Persistence, StoredChange, StoredComment,
};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::attachment_policy::AttachmentPolicy;
use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::capabilities::to_ticket_info;
use crate::csv_export::render_export_csv;
use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    AddAttachmentRequest, AddCommentRequest, AssignTicketRequest, DuplicateSavedSearchRequest,
    ExecuteSavedSearchResponse, HistoryResponse, ListAttachmentsResponse, ListCommentsResponse,
    ListSavedSearchesQuery, ListSavedSearchesResponse, ListTicketsResponse, ReopenTicketRequest,
    TicketInfo, TransitionStatusRequest, UpdateCommentRequest, UpsertDirectoryUserRequest,
};

/// The result of a state-changing API operation.
///
/// Carries the committed outbox events with the response so that a
/// successful operation is always published.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResult<T> {
    /// The response to return to the caller.
    pub response: T,
    /// Events committed with the change, not yet dispatched.
    pub events: Vec<RecordedEvent>,
}

/// Loads a ticket and enforces visibility.
fn load_visible_ticket(
    persistence: &mut Persistence,
    ticket_id: i64,
    actor: &AuthenticatedActor,
) -> Result<Ticket, ApiError> {
    let ticket: Ticket = persistence.get_ticket(ticket_id)?;
    assert_can_access(&ticket, &actor.id, actor.role).map_err(translate_domain_error)?;
    Ok(ticket)
}

/// Loads the tickets that could possibly be visible to `actor`.
///
/// End users only ever see tickets they are a party to, so only those are
/// read.
fn load_candidates(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<Vec<Ticket>, ApiError> {
    let tickets: Vec<Ticket> = if has_elevated_access(actor.role) {
        persistence.list_tickets()?
    } else {
        persistence.list_tickets_for_party(&actor.id)?
    };
    Ok(tickets)
}

fn to_ticket_infos(
    actor: &AuthenticatedActor,
    tickets: Vec<Ticket>,
    now: OffsetDateTime,
) -> Vec<TicketInfo> {
    tickets
        .into_iter()
        .map(|ticket| to_ticket_info(actor, ticket, now))
        .collect()
}

/// Applies a lifecycle command to a stored ticket and commits the result.
fn run_ticket_command(
    persistence: &mut Persistence,
    ticket_id: i64,
    command: TicketCommand,
    actor: &AuthenticatedActor,
    policy: &SlaPolicy,
    now: OffsetDateTime,
) -> Result<ApiResult<TicketInfo>, ApiError> {
    let ticket: Ticket = persistence.get_ticket(ticket_id)?;
    let audit_actor: Actor = actor.to_audit_actor();

    let change: TransitionResult =
        apply(&ticket, command, &audit_actor, now, policy).map_err(translate_core_error)?;
    let stored: StoredChange = persistence.persist_ticket_change(&change)?;

    if !stored.history.is_empty() {
        info!(
            ticket_id,
            actor_id = %actor.id,
            version = stored.ticket.version,
            fields = ?stored.history.iter().map(|h| h.field.as_str()).collect::<Vec<_>>(),
            "Ticket changed"
        );
    }

    Ok(ApiResult {
        response: to_ticket_info(actor, stored.ticket, now),
        events: stored.events,
    })
}

// ----------------------------------------------------------------------
// Tickets
// ----------------------------------------------------------------------

/// Opens a new ticket on behalf of the caller.
///
/// The ticket number is allocated in the same transaction as the insert.
///
/// # Errors
///
/// Returns an error if the title or description is blank, or the store
/// fails.
pub fn create_ticket(
    persistence: &mut Persistence,
    request: NewTicket,
    actor: &AuthenticatedActor,
    policy: &SlaPolicy,
    now: OffsetDateTime,
) -> Result<ApiResult<TicketInfo>, ApiError> {
    let audit_actor: Actor = actor.to_audit_actor();
    let stored: StoredChange = persistence.create_ticket(now.year(), |number| {
        servicedesk::create_ticket(request, number, &audit_actor, now, policy)
            .map_err(translate_core_error)
    })?;

    info!(
        ticket_id = ?stored.ticket.ticket_id,
        ticket_number = %stored.ticket.ticket_number,
        requester_id = %actor.id,
        "Ticket created"
    );

    Ok(ApiResult {
        response: to_ticket_info(actor, stored.ticket, now),
        events: stored.events,
    })
}

/// Returns one ticket.
///
/// # Errors
///
/// Returns `ResourceNotFound` for an unknown id and `Forbidden` if the
/// caller is neither a party nor elevated.
pub fn get_ticket(
    persistence: &mut Persistence,
    ticket_id: i64,
    actor: &AuthenticatedActor,
    now: OffsetDateTime,
) -> Result<TicketInfo, ApiError> {
    let ticket: Ticket = load_visible_ticket(persistence, ticket_id, actor)?;
    Ok(to_ticket_info(actor, ticket, now))
}

/// Lists the tickets visible to the caller that match `filter`, newest
/// first.
///
/// # Errors
///
/// Returns `InvalidInput` if the date range is inverted.
pub fn list_tickets(
    persistence: &mut Persistence,
    filter: &TicketFilter,
    actor: &AuthenticatedActor,
    now: OffsetDateTime,
) -> Result<ListTicketsResponse, ApiError> {
    filter.validate().map_err(translate_domain_error)?;
    let candidates: Vec<Ticket> = load_candidates(persistence, actor)?;
    let tickets: Vec<Ticket> = select_visible(candidates, filter, &actor.to_audit_actor());
    debug!(actor_id = %actor.id, count = tickets.len(), "Listed tickets");

    Ok(ListTicketsResponse {
        tickets: to_ticket_infos(actor, tickets, now),
    })
}

/// Lists visible open tickets past their due date, most overdue first.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn list_breached_tickets(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    now: OffsetDateTime,
) -> Result<ListTicketsResponse, ApiError> {
    let candidates: Vec<Ticket> = load_candidates(persistence, actor)?;
    let visible: Vec<Ticket> =
        select_visible(candidates, &TicketFilter::default(), &actor.to_audit_actor());
    let breached: Vec<Ticket> = select_breached(visible, now);

    Ok(ListTicketsResponse {
        tickets: to_ticket_infos(actor, breached, now),
    })
}

/// Edits descriptive or classification fields.
///
/// # Errors
///
/// Returns an error if the caller may not edit the given fields, a value
/// is invalid, or the ticket changed concurrently.
pub fn update_ticket(
    persistence: &mut Persistence,
    ticket_id: i64,
    update: TicketUpdate,
    actor: &AuthenticatedActor,
    policy: &SlaPolicy,
    now: OffsetDateTime,
) -> Result<ApiResult<TicketInfo>, ApiError> {
    run_ticket_command(
        persistence,
        ticket_id,
        TicketCommand::UpdateFields(update),
        actor,
        policy,
        now,
    )
}

/// Moves a ticket to another status.
///
/// # Errors
///
/// Returns `InvalidTransition` for a move outside the lifecycle table,
/// `InvalidInput` when resolving without a resolution, `Conflict` when
/// `expected_status` is stale, and `Forbidden` for a disallowed caller.
pub fn transition_ticket_status(
    persistence: &mut Persistence,
    ticket_id: i64,
    request: TransitionStatusRequest,
    actor: &AuthenticatedActor,
    policy: &SlaPolicy,
    now: OffsetDateTime,
) -> Result<ApiResult<TicketInfo>, ApiError> {
    run_ticket_command(
        persistence,
        ticket_id,
        TicketCommand::Transition {
            to: request.status,
            resolution: request.resolution,
            expected_status: request.expected_status,
        },
        actor,
        policy,
        now,
    )
}

/// Reopens a resolved or closed ticket.
///
/// # Errors
///
/// Returns `InvalidTransition` if the ticket is not finished.
pub fn reopen_ticket(
    persistence: &mut Persistence,
    ticket_id: i64,
    request: ReopenTicketRequest,
    actor: &AuthenticatedActor,
    policy: &SlaPolicy,
    now: OffsetDateTime,
) -> Result<ApiResult<TicketInfo>, ApiError> {
    run_ticket_command(
        persistence,
        ticket_id,
        TicketCommand::Reopen {
            expected_status: request.expected_status,
        },
        actor,
        policy,
        now,
    )
}

/// Assigns a ticket to a support user, or unassigns it.
///
/// # Errors
///
/// Returns `InvalidInput` if the assignee is unknown to the directory or
/// cannot take tickets, and `Forbidden` unless the caller is elevated.
pub fn assign_ticket(
    persistence: &mut Persistence,
    ticket_id: i64,
    request: AssignTicketRequest,
    actor: &AuthenticatedActor,
    policy: &SlaPolicy,
    now: OffsetDateTime,
) -> Result<ApiResult<TicketInfo>, ApiError> {
    let command: TicketCommand = match request.assignee_id {
        Some(assignee_id) => {
            let assignee: DirectoryUser = persistence
                .find_directory_user(&assignee_id)?
                .ok_or_else(|| ApiError::InvalidInput {
                    field: String::from("assignee_id"),
                    message: format!("'{assignee_id}' is not in the directory"),
                })?;
            TicketCommand::Assign { assignee }
        }
        None => TicketCommand::Unassign,
    };

    run_ticket_command(persistence, ticket_id, command, actor, policy, now)
}

/// Returns a ticket's history in sequence order.
///
/// # Errors
///
/// Returns `ResourceNotFound` or `Forbidden` as for [`get_ticket`].
pub fn get_ticket_history(
    persistence: &mut Persistence,
    ticket_id: i64,
    actor: &AuthenticatedActor,
) -> Result<HistoryResponse, ApiError> {
    load_visible_ticket(persistence, ticket_id, actor)?;
    let entries: Vec<HistoryEntry> = persistence.get_ticket_history(ticket_id)?;
    Ok(HistoryResponse { ticket_id, entries })
}

// ----------------------------------------------------------------------
// Comments
// ----------------------------------------------------------------------

/// Adds a comment to a ticket.
///
/// The first comment by an elevated user other than the requester also
/// stamps the ticket's first response, in the same transaction.
///
/// # Errors
///
/// Returns an error if the caller cannot see the ticket, the content is
/// blank, or the store fails.
pub fn add_comment(
    persistence: &mut Persistence,
    ticket_id: i64,
    request: AddCommentRequest,
    actor: &AuthenticatedActor,
    policy: &SlaPolicy,
    now: OffsetDateTime,
) -> Result<ApiResult<Comment>, ApiError> {
    let ticket: Ticket = load_visible_ticket(persistence, ticket_id, actor)?;
    validate_comment_content(&request.content).map_err(translate_domain_error)?;
    let audit_actor: Actor = actor.to_audit_actor();

    let response: Option<TransitionResult> = if ticket.first_responded_at.is_none()
        && counts_as_response(&ticket, &actor.id, actor.role)
    {
        Some(
            apply(
                &ticket,
                TicketCommand::RecordFirstResponse,
                &audit_actor,
                now,
                policy,
            )
            .map_err(translate_core_error)?,
        )
    } else {
        None
    };

    let comment = NewComment {
        ticket_id,
        author_id: actor.id.clone(),
        content: request.content.trim().to_string(),
        is_internal: request.is_internal,
        created_at: now,
    };
    let stored: StoredComment = persistence.add_comment(&comment, response.as_ref(), |c| {
        comment_added_event(&ticket, c, &audit_actor, now)
    })?;

    info!(
        ticket_id,
        comment_id = stored.comment.comment_id,
        author_id = %actor.id,
        is_internal = stored.comment.is_internal,
        first_response = stored.response.is_some(),
        "Comment added"
    );

    let mut events: Vec<RecordedEvent> = stored
        .response
        .map(|change| change.events)
        .unwrap_or_default();
    events.push(stored.event);

    Ok(ApiResult {
        response: stored.comment,
        events,
    })
}

/// Lists a ticket's comments, oldest first.
///
/// Internal comments are left out for end users.
///
/// # Errors
///
/// Returns an error if the caller cannot see the ticket.
pub fn list_comments(
    persistence: &mut Persistence,
    ticket_id: i64,
    actor: &AuthenticatedActor,
) -> Result<ListCommentsResponse, ApiError> {
    load_visible_ticket(persistence, ticket_id, actor)?;
    let comments: Vec<Comment> = persistence.list_comments(ticket_id)?;
    Ok(ListCommentsResponse {
        ticket_id,
        comments: project_comments_for(comments, actor.role),
    })
}

/// Loads a comment the caller may modify.
fn load_mutable_comment(
    persistence: &mut Persistence,
    comment_id: i64,
    actor: &AuthenticatedActor,
) -> Result<Comment, ApiError> {
    let comment: Comment = persistence.get_comment(comment_id)?;
    load_visible_ticket(persistence, comment.ticket_id, actor)?;
    assert_can_mutate(&comment.author_id, &actor.id, actor.role).map_err(translate_domain_error)?;
    Ok(comment)
}

/// Replaces a comment's content.
///
/// # Errors
///
/// Returns `Forbidden` unless the caller wrote the comment or moderates,
/// and `InvalidInput` for blank content.
pub fn update_comment(
    persistence: &mut Persistence,
    comment_id: i64,
    request: UpdateCommentRequest,
    actor: &AuthenticatedActor,
    now: OffsetDateTime,
) -> Result<Comment, ApiError> {
    load_mutable_comment(persistence, comment_id, actor)?;
    validate_comment_content(&request.content).map_err(translate_domain_error)?;

    let updated: Comment = persistence.update_comment(comment_id, request.content.trim(), now)?;
    info!(comment_id, actor_id = %actor.id, "Comment updated");
    Ok(updated)
}

/// Deletes a comment.
///
/// # Errors
///
/// Returns `Forbidden` unless the caller wrote the comment or moderates.
pub fn delete_comment(
    persistence: &mut Persistence,
    comment_id: i64,
    actor: &AuthenticatedActor,
) -> Result<(), ApiError> {
    load_mutable_comment(persistence, comment_id, actor)?;
    persistence.delete_comment(comment_id)?;
    info!(comment_id, actor_id = %actor.id, "Comment deleted");
    Ok(())
}

// ----------------------------------------------------------------------
// Attachments
// ----------------------------------------------------------------------

/// Records metadata of an uploaded attachment.
///
/// # Errors
///
/// Returns an error if the caller cannot see the ticket or the metadata
/// violates the attachment policy.
pub fn add_attachment(
    persistence: &mut Persistence,
    ticket_id: i64,
    request: AddAttachmentRequest,
    actor: &AuthenticatedActor,
    policy: &AttachmentPolicy,
    now: OffsetDateTime,
) -> Result<Attachment, ApiError> {
    load_visible_ticket(persistence, ticket_id, actor)?;
    policy.validate(
        &request.filename,
        request.size_bytes,
        &request.mime_type,
        &request.storage_key,
    )?;

    let attachment: Attachment = persistence.add_attachment(&NewAttachment {
        ticket_id,
        filename: request.filename.trim().to_string(),
        size_bytes: request.size_bytes,
        mime_type: request.mime_type.trim().to_string(),
        storage_key: request.storage_key,
        uploaded_by: actor.id.clone(),
        created_at: now,
    })?;
    info!(
        ticket_id,
        attachment_id = attachment.attachment_id,
        size_bytes = attachment.size_bytes,
        "Attachment added"
    );
    Ok(attachment)
}

/// Lists a ticket's attachment metadata.
///
/// # Errors
///
/// Returns an error if the caller cannot see the ticket.
pub fn list_attachments(
    persistence: &mut Persistence,
    ticket_id: i64,
    actor: &AuthenticatedActor,
) -> Result<ListAttachmentsResponse, ApiError> {
    load_visible_ticket(persistence, ticket_id, actor)?;
    Ok(ListAttachmentsResponse {
        ticket_id,
        attachments: persistence.list_attachments(ticket_id)?,
    })
}

/// Deletes attachment metadata.
///
/// # Errors
///
/// Returns `Forbidden` unless the caller uploaded it or moderates.
pub fn delete_attachment(
    persistence: &mut Persistence,
    attachment_id: i64,
    actor: &AuthenticatedActor,
) -> Result<(), ApiError> {
    let attachment: Attachment = persistence.get_attachment(attachment_id)?;
    load_visible_ticket(persistence, attachment.ticket_id, actor)?;
    assert_can_mutate(&attachment.uploaded_by, &actor.id, actor.role)
        .map_err(translate_domain_error)?;

    persistence.delete_attachment(attachment_id)?;
    info!(attachment_id, actor_id = %actor.id, "Attachment deleted");
    Ok(())
}

// ----------------------------------------------------------------------
// Reporting
// ----------------------------------------------------------------------

/// Builds the ticket report over all tickets matching `filter`.
///
/// # Errors
///
/// Returns `Forbidden` for end users and `InvalidInput` for an inverted
/// date range.
pub fn build_report(
    persistence: &mut Persistence,
    filter: &TicketFilter,
    actor: &AuthenticatedActor,
    policy: &SlaPolicy,
    now: OffsetDateTime,
) -> Result<ReportSnapshot, ApiError> {
    AuthorizationService::authorize_reporting(actor)?;
    filter.validate().map_err(translate_domain_error)?;

    let tickets: Vec<Ticket> = persistence.list_tickets()?;
    let users: Vec<DirectoryUser> = persistence.list_directory_users()?;
    let report: ReportSnapshot = build_ticket_report(&tickets, filter, &users, now, policy);
    debug!(actor_id = %actor.id, total = report.summary.total, "Built ticket report");
    Ok(report)
}

/// Exports the tickets matching `filter` as CSV.
///
/// # Errors
///
/// Returns `Forbidden` for end users and `InvalidInput` for an inverted
/// date range.
pub fn export_report_csv(
    persistence: &mut Persistence,
    filter: &TicketFilter,
    actor: &AuthenticatedActor,
) -> Result<String, ApiError> {
    AuthorizationService::authorize_reporting(actor)?;
    filter.validate().map_err(translate_domain_error)?;

    let tickets: Vec<Ticket> = persistence.list_tickets()?;
    let users: Vec<DirectoryUser> = persistence.list_directory_users()?;
    let rows: Vec<ExportRow> = export_ticket_report(&tickets, filter, &users);
    debug!(actor_id = %actor.id, rows = rows.len(), "Exported tickets");
    render_export_csv(&rows)
}

// ----------------------------------------------------------------------
// Saved searches
// ----------------------------------------------------------------------

fn saved_search_id(search: &SavedSearch) -> Result<i64, ApiError> {
    search.search_id.ok_or_else(|| ApiError::Internal {
        message: format!("saved search '{}' has no id", search.name),
    })
}

/// Saves a named filter owned by the caller.
///
/// # Errors
///
/// Returns `InvalidInput` for a blank or overlong name or incoherent
/// criteria.
pub fn create_saved_search(
    persistence: &mut Persistence,
    request: NewSavedSearch,
    actor: &AuthenticatedActor,
    now: OffsetDateTime,
) -> Result<SavedSearch, ApiError> {
    let search: SavedSearch = SavedSearch::create(request, &actor.to_audit_actor(), now)
        .map_err(translate_domain_error)?;
    let stored: SavedSearch = persistence.insert_saved_search(&search)?;
    info!(search_id = ?stored.search_id, owner_id = %actor.id, "Saved search created");
    Ok(stored)
}

/// Lists the caller's searches, plus public ones when asked.
///
/// # Errors
///
/// Returns an error if the store fails.
pub fn list_saved_searches(
    persistence: &mut Persistence,
    query: &ListSavedSearchesQuery,
    actor: &AuthenticatedActor,
) -> Result<ListSavedSearchesResponse, ApiError> {
    let searches: Vec<SavedSearch> =
        persistence.list_saved_searches(&actor.id, query.include_public)?;
    Ok(ListSavedSearchesResponse {
        searches: visible_to(searches, &actor.id, query.include_public),
    })
}

/// Returns one saved search.
///
/// # Errors
///
/// Returns `Forbidden` for another user's private search.
pub fn get_saved_search(
    persistence: &mut Persistence,
    search_id: i64,
    actor: &AuthenticatedActor,
) -> Result<SavedSearch, ApiError> {
    let search: SavedSearch = persistence.get_saved_search(search_id)?;
    search
        .assert_can_read(&actor.id)
        .map_err(translate_domain_error)?;
    Ok(search)
}

/// Edits a saved search.
///
/// # Errors
///
/// Returns `Forbidden` unless the caller owns the search.
pub fn update_saved_search(
    persistence: &mut Persistence,
    search_id: i64,
    update: SavedSearchUpdate,
    actor: &AuthenticatedActor,
    now: OffsetDateTime,
) -> Result<SavedSearch, ApiError> {
    let mut search: SavedSearch = persistence.get_saved_search(search_id)?;
    search
        .apply_update(update, &actor.to_audit_actor(), now)
        .map_err(translate_domain_error)?;
    persistence.update_saved_search(&search)?;
    info!(search_id, owner_id = %actor.id, "Saved search updated");
    Ok(search)
}

/// Deletes a saved search.
///
/// # Errors
///
/// Returns `Forbidden` unless the caller owns the search.
pub fn delete_saved_search(
    persistence: &mut Persistence,
    search_id: i64,
    actor: &AuthenticatedActor,
) -> Result<(), ApiError> {
    let search: SavedSearch = persistence.get_saved_search(search_id)?;
    search
        .assert_owner(&actor.id)
        .map_err(translate_domain_error)?;
    persistence.delete_saved_search(search_id)?;
    info!(search_id, owner_id = %actor.id, "Saved search deleted");
    Ok(())
}

/// Runs a saved search over the tickets visible to the caller.
///
/// # Errors
///
/// Returns `Forbidden` for another user's private search.
pub fn execute_saved_search(
    persistence: &mut Persistence,
    search_id: i64,
    actor: &AuthenticatedActor,
    now: OffsetDateTime,
) -> Result<ExecuteSavedSearchResponse, ApiError> {
    let search: SavedSearch = get_saved_search(persistence, search_id, actor)?;
    let candidates: Vec<Ticket> = load_candidates(persistence, actor)?;
    let tickets: Vec<Ticket> = search
        .execute(candidates, &actor.to_audit_actor())
        .map_err(translate_domain_error)?;

    Ok(ExecuteSavedSearchResponse {
        search_id,
        tickets: to_ticket_infos(actor, tickets, now),
    })
}

/// Copies a readable saved search into a new private one owned by the
/// caller.
///
/// # Errors
///
/// Returns `Forbidden` for another user's private search.
pub fn duplicate_saved_search(
    persistence: &mut Persistence,
    search_id: i64,
    request: DuplicateSavedSearchRequest,
    actor: &AuthenticatedActor,
    now: OffsetDateTime,
) -> Result<SavedSearch, ApiError> {
    let original: SavedSearch = persistence.get_saved_search(search_id)?;
    let copy: SavedSearch = original
        .duplicate_for(&actor.to_audit_actor(), request.name, now)
        .map_err(translate_domain_error)?;
    let stored: SavedSearch = persistence.insert_saved_search(&copy)?;
    info!(
        search_id = saved_search_id(&stored)?,
        source_id = search_id,
        owner_id = %actor.id,
        "Saved search duplicated"
    );
    Ok(stored)
}

// ----------------------------------------------------------------------
// Directory
// ----------------------------------------------------------------------

/// Inserts or replaces a directory user.
///
/// # Errors
///
/// Returns `Forbidden` unless the caller is an admin, and `InvalidInput`
/// for a blank display name.
pub fn upsert_directory_user(
    persistence: &mut Persistence,
    user_id: &str,
    request: UpsertDirectoryUserRequest,
    actor: &AuthenticatedActor,
) -> Result<DirectoryUser, ApiError> {
    AuthorizationService::authorize_directory_admin(actor)?;

    let user = DirectoryUser {
        user_id: user_id.to_string(),
        display_name: request.display_name.trim().to_string(),
        email: request.email.trim().to_string(),
        role: request.role,
        is_active: request.is_active,
    };
    user.validate().map_err(translate_domain_error)?;
    persistence.upsert_directory_user(&user)?;
    info!(user_id, role = %user.role, actor_id = %actor.id, "Directory user upserted");
    Ok(user)
}
