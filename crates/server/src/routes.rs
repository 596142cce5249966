// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! HTTP routes.
//!
//! Handlers stay thin: extract the caller and the request, run the API
//! function against the locked store, then publish whatever events the
//! change committed.

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::{StatusCode, header},
    response::IntoResponse,
    routing::{delete, get, patch, post, put},
};
use servicedesk::{
    NewSavedSearch, NewTicket, ReportSnapshot, SavedSearch, SavedSearchUpdate, TicketUpdate,
};
use servicedesk_api::{
    AddAttachmentRequest, AddCommentRequest, ApiResult, AssignTicketRequest,
    DuplicateSavedSearchRequest, ExecuteSavedSearchResponse, HistoryResponse,
    ListAttachmentsResponse, ListCommentsResponse, ListSavedSearchesQuery,
    ListSavedSearchesResponse, ListTicketsQuery, ListTicketsResponse, ReopenTicketRequest,
    TicketInfo, TransitionStatusRequest, UpdateCommentRequest, UpsertDirectoryUserRequest,
};
use servicedesk_domain::{Attachment, Comment, DirectoryUser, TicketFilter};
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::error::HttpError;
use crate::identity::CallerActor;
use crate::live::live_events_handler;
use crate::state::AppState;

/// Publishes the events of a committed change and returns its response.
async fn commit<T>(app_state: &AppState, result: ApiResult<T>) -> T {
    app_state.dispatch(result.events).await;
    result.response
}

// ----------------------------------------------------------------------
// Tickets
// ----------------------------------------------------------------------

async fn handle_create_ticket(
    AxumState(app_state): AxumState<AppState>,
    CallerActor(actor): CallerActor,
    Json(req): Json<NewTicket>,
) -> Result<(StatusCode, Json<TicketInfo>), HttpError> {
    info!(actor_id = %actor.id, category = %req.category, "Handling create_ticket request");

    let mut persistence = app_state.persistence.lock().await;
    let result = servicedesk_api::create_ticket(
        &mut persistence,
        req,
        &actor,
        &app_state.sla_policy,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(commit(&app_state, result).await)))
}

async fn handle_list_tickets(
    AxumState(app_state): AxumState<AppState>,
    CallerActor(actor): CallerActor,
    Query(query): Query<ListTicketsQuery>,
) -> Result<Json<ListTicketsResponse>, HttpError> {
    debug!(actor_id = %actor.id, ?query, "Handling list_tickets request");
    let filter: TicketFilter = query.into_filter()?;

    let mut persistence = app_state.persistence.lock().await;
    let response = servicedesk_api::list_tickets(
        &mut persistence,
        &filter,
        &actor,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(response))
}

async fn handle_list_breached_tickets(
    AxumState(app_state): AxumState<AppState>,
    CallerActor(actor): CallerActor,
) -> Result<Json<ListTicketsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response =
        servicedesk_api::list_breached_tickets(&mut persistence, &actor, OffsetDateTime::now_utc())?;
    Ok(Json(response))
}

async fn handle_get_ticket(
    AxumState(app_state): AxumState<AppState>,
    CallerActor(actor): CallerActor,
    Path(ticket_id): Path<i64>,
) -> Result<Json<TicketInfo>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = servicedesk_api::get_ticket(
        &mut persistence,
        ticket_id,
        &actor,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(response))
}

async fn handle_update_ticket(
    AxumState(app_state): AxumState<AppState>,
    CallerActor(actor): CallerActor,
    Path(ticket_id): Path<i64>,
    Json(req): Json<TicketUpdate>,
) -> Result<Json<TicketInfo>, HttpError> {
    info!(actor_id = %actor.id, ticket_id, "Handling update_ticket request");

    let mut persistence = app_state.persistence.lock().await;
    let result = servicedesk_api::update_ticket(
        &mut persistence,
        ticket_id,
        req,
        &actor,
        &app_state.sla_policy,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(commit(&app_state, result).await))
}

async fn handle_transition_status(
    AxumState(app_state): AxumState<AppState>,
    CallerActor(actor): CallerActor,
    Path(ticket_id): Path<i64>,
    Json(req): Json<TransitionStatusRequest>,
) -> Result<Json<TicketInfo>, HttpError> {
    info!(actor_id = %actor.id, ticket_id, to = %req.status, "Handling transition_status request");

    let mut persistence = app_state.persistence.lock().await;
    let result = servicedesk_api::transition_ticket_status(
        &mut persistence,
        ticket_id,
        req,
        &actor,
        &app_state.sla_policy,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(commit(&app_state, result).await))
}

async fn handle_reopen_ticket(
    AxumState(app_state): AxumState<AppState>,
    CallerActor(actor): CallerActor,
    Path(ticket_id): Path<i64>,
    Json(req): Json<ReopenTicketRequest>,
) -> Result<Json<TicketInfo>, HttpError> {
    info!(actor_id = %actor.id, ticket_id, "Handling reopen_ticket request");

    let mut persistence = app_state.persistence.lock().await;
    let result = servicedesk_api::reopen_ticket(
        &mut persistence,
        ticket_id,
        req,
        &actor,
        &app_state.sla_policy,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(commit(&app_state, result).await))
}

async fn handle_assign_ticket(
    AxumState(app_state): AxumState<AppState>,
    CallerActor(actor): CallerActor,
    Path(ticket_id): Path<i64>,
    Json(req): Json<AssignTicketRequest>,
) -> Result<Json<TicketInfo>, HttpError> {
    info!(
        actor_id = %actor.id,
        ticket_id,
        assignee_id = ?req.assignee_id,
        "Handling assign_ticket request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let result = servicedesk_api::assign_ticket(
        &mut persistence,
        ticket_id,
        req,
        &actor,
        &app_state.sla_policy,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok(Json(commit(&app_state, result).await))
}

async fn handle_get_ticket_history(
    AxumState(app_state): AxumState<AppState>,
    CallerActor(actor): CallerActor,
    Path(ticket_id): Path<i64>,
) -> Result<Json<HistoryResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = servicedesk_api::get_ticket_history(&mut persistence, ticket_id, &actor)?;
    Ok(Json(response))
}

// ----------------------------------------------------------------------
// Comments and attachments
// ----------------------------------------------------------------------

async fn handle_add_comment(
    AxumState(app_state): AxumState<AppState>,
    CallerActor(actor): CallerActor,
    Path(ticket_id): Path<i64>,
    Json(req): Json<AddCommentRequest>,
) -> Result<(StatusCode, Json<Comment>), HttpError> {
    info!(
        actor_id = %actor.id,
        ticket_id,
        is_internal = req.is_internal,
        "Handling add_comment request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let result = servicedesk_api::add_comment(
        &mut persistence,
        ticket_id,
        req,
        &actor,
        &app_state.sla_policy,
        OffsetDateTime::now_utc(),
    )?;
    drop(persistence);

    Ok((StatusCode::CREATED, Json(commit(&app_state, result).await)))
}

async fn handle_list_comments(
    AxumState(app_state): AxumState<AppState>,
    CallerActor(actor): CallerActor,
    Path(ticket_id): Path<i64>,
) -> Result<Json<ListCommentsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = servicedesk_api::list_comments(&mut persistence, ticket_id, &actor)?;
    Ok(Json(response))
}

async fn handle_update_comment(
    AxumState(app_state): AxumState<AppState>,
    CallerActor(actor): CallerActor,
    Path(comment_id): Path<i64>,
    Json(req): Json<UpdateCommentRequest>,
) -> Result<Json<Comment>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let comment = servicedesk_api::update_comment(
        &mut persistence,
        comment_id,
        req,
        &actor,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(comment))
}

async fn handle_delete_comment(
    AxumState(app_state): AxumState<AppState>,
    CallerActor(actor): CallerActor,
    Path(comment_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    servicedesk_api::delete_comment(&mut persistence, comment_id, &actor)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn handle_add_attachment(
    AxumState(app_state): AxumState<AppState>,
    CallerActor(actor): CallerActor,
    Path(ticket_id): Path<i64>,
    Json(req): Json<AddAttachmentRequest>,
) -> Result<(StatusCode, Json<Attachment>), HttpError> {
    info!(
        actor_id = %actor.id,
        ticket_id,
        size_bytes = req.size_bytes,
        "Handling add_attachment request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let attachment = servicedesk_api::add_attachment(
        &mut persistence,
        ticket_id,
        req,
        &actor,
        &app_state.attachment_policy,
        OffsetDateTime::now_utc(),
    )?;
    Ok((StatusCode::CREATED, Json(attachment)))
}

async fn handle_list_attachments(
    AxumState(app_state): AxumState<AppState>,
    CallerActor(actor): CallerActor,
    Path(ticket_id): Path<i64>,
) -> Result<Json<ListAttachmentsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = servicedesk_api::list_attachments(&mut persistence, ticket_id, &actor)?;
    Ok(Json(response))
}

async fn handle_delete_attachment(
    AxumState(app_state): AxumState<AppState>,
    CallerActor(actor): CallerActor,
    Path(attachment_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    servicedesk_api::delete_attachment(&mut persistence, attachment_id, &actor)?;
    Ok(StatusCode::NO_CONTENT)
}

// ----------------------------------------------------------------------
// Reports
// ----------------------------------------------------------------------

async fn handle_build_report(
    AxumState(app_state): AxumState<AppState>,
    CallerActor(actor): CallerActor,
    Json(filter): Json<TicketFilter>,
) -> Result<Json<ReportSnapshot>, HttpError> {
    info!(actor_id = %actor.id, "Handling build_report request");

    let mut persistence = app_state.persistence.lock().await;
    let report = servicedesk_api::build_report(
        &mut persistence,
        &filter,
        &actor,
        &app_state.sla_policy,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(report))
}

async fn handle_export_report(
    AxumState(app_state): AxumState<AppState>,
    CallerActor(actor): CallerActor,
    Json(filter): Json<TicketFilter>,
) -> Result<impl IntoResponse, HttpError> {
    info!(actor_id = %actor.id, "Handling export_report request");

    let mut persistence = app_state.persistence.lock().await;
    let csv: String = servicedesk_api::export_report_csv(&mut persistence, &filter, &actor)?;
    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"tickets.csv\"",
            ),
        ],
        csv,
    ))
}

// ----------------------------------------------------------------------
// Saved searches
// ----------------------------------------------------------------------

async fn handle_create_saved_search(
    AxumState(app_state): AxumState<AppState>,
    CallerActor(actor): CallerActor,
    Json(req): Json<NewSavedSearch>,
) -> Result<(StatusCode, Json<SavedSearch>), HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let search = servicedesk_api::create_saved_search(
        &mut persistence,
        req,
        &actor,
        OffsetDateTime::now_utc(),
    )?;
    Ok((StatusCode::CREATED, Json(search)))
}

async fn handle_list_saved_searches(
    AxumState(app_state): AxumState<AppState>,
    CallerActor(actor): CallerActor,
    Query(query): Query<ListSavedSearchesQuery>,
) -> Result<Json<ListSavedSearchesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = servicedesk_api::list_saved_searches(&mut persistence, &query, &actor)?;
    Ok(Json(response))
}

async fn handle_get_saved_search(
    AxumState(app_state): AxumState<AppState>,
    CallerActor(actor): CallerActor,
    Path(search_id): Path<i64>,
) -> Result<Json<SavedSearch>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let search = servicedesk_api::get_saved_search(&mut persistence, search_id, &actor)?;
    Ok(Json(search))
}

async fn handle_update_saved_search(
    AxumState(app_state): AxumState<AppState>,
    CallerActor(actor): CallerActor,
    Path(search_id): Path<i64>,
    Json(req): Json<SavedSearchUpdate>,
) -> Result<Json<SavedSearch>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let search = servicedesk_api::update_saved_search(
        &mut persistence,
        search_id,
        req,
        &actor,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(search))
}

async fn handle_delete_saved_search(
    AxumState(app_state): AxumState<AppState>,
    CallerActor(actor): CallerActor,
    Path(search_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    servicedesk_api::delete_saved_search(&mut persistence, search_id, &actor)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn handle_execute_saved_search(
    AxumState(app_state): AxumState<AppState>,
    CallerActor(actor): CallerActor,
    Path(search_id): Path<i64>,
) -> Result<Json<ExecuteSavedSearchResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let response = servicedesk_api::execute_saved_search(
        &mut persistence,
        search_id,
        &actor,
        OffsetDateTime::now_utc(),
    )?;
    Ok(Json(response))
}

async fn handle_duplicate_saved_search(
    AxumState(app_state): AxumState<AppState>,
    CallerActor(actor): CallerActor,
    Path(search_id): Path<i64>,
    Json(req): Json<DuplicateSavedSearchRequest>,
) -> Result<(StatusCode, Json<SavedSearch>), HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let search = servicedesk_api::duplicate_saved_search(
        &mut persistence,
        search_id,
        req,
        &actor,
        OffsetDateTime::now_utc(),
    )?;
    Ok((StatusCode::CREATED, Json(search)))
}

// ----------------------------------------------------------------------
// Directory
// ----------------------------------------------------------------------

async fn handle_upsert_directory_user(
    AxumState(app_state): AxumState<AppState>,
    CallerActor(actor): CallerActor,
    Path(user_id): Path<String>,
    Json(req): Json<UpsertDirectoryUserRequest>,
) -> Result<Json<DirectoryUser>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    let user = servicedesk_api::upsert_directory_user(&mut persistence, &user_id, req, &actor)?;
    Ok(Json(user))
}

/// Builds the application router with all endpoints.
pub fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/tickets", post(handle_create_ticket).get(handle_list_tickets))
        .route("/tickets/breached", get(handle_list_breached_tickets))
        .route(
            "/tickets/{ticket_id}",
            get(handle_get_ticket).patch(handle_update_ticket),
        )
        .route("/tickets/{ticket_id}/status", post(handle_transition_status))
        .route("/tickets/{ticket_id}/reopen", post(handle_reopen_ticket))
        .route("/tickets/{ticket_id}/assign", post(handle_assign_ticket))
        .route("/tickets/{ticket_id}/history", get(handle_get_ticket_history))
        .route(
            "/tickets/{ticket_id}/comments",
            post(handle_add_comment).get(handle_list_comments),
        )
        .route(
            "/comments/{comment_id}",
            patch(handle_update_comment).delete(handle_delete_comment),
        )
        .route(
            "/tickets/{ticket_id}/attachments",
            post(handle_add_attachment).get(handle_list_attachments),
        )
        .route("/attachments/{attachment_id}", delete(handle_delete_attachment))
        .route("/reports/tickets", post(handle_build_report))
        .route("/reports/tickets/export", post(handle_export_report))
        .route(
            "/saved-searches",
            post(handle_create_saved_search).get(handle_list_saved_searches),
        )
        .route(
            "/saved-searches/{search_id}",
            get(handle_get_saved_search)
                .patch(handle_update_saved_search)
                .delete(handle_delete_saved_search),
        )
        .route(
            "/saved-searches/{search_id}/execute",
            post(handle_execute_saved_search),
        )
        .route(
            "/saved-searches/{search_id}/duplicate",
            post(handle_duplicate_saved_search),
        )
        .route("/directory/users/{user_id}", put(handle_upsert_directory_user))
        .route("/live", get(live_events_handler))
        .with_state(app_state)
}
