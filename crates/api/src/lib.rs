// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod attachment_policy;
mod auth;
mod capabilities;
mod csv_export;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use attachment_policy::{
    AttachmentPolicy, AttachmentPolicyError, DEFAULT_MAX_ATTACHMENT_BYTES,
};
pub use auth::{AuthenticatedActor, AuthorizationService};
pub use capabilities::{compute_ticket_capabilities, to_ticket_info};
pub use csv_export::{EXPORT_HEADERS, render_export_csv};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error,
    translate_persistence_error,
};
pub use handlers::{
    ApiResult, add_attachment, add_comment, assign_ticket, build_report, create_saved_search,
    create_ticket, delete_attachment, delete_comment, delete_saved_search, duplicate_saved_search,
    execute_saved_search, export_report_csv, get_saved_search, get_ticket, get_ticket_history,
    list_attachments, list_breached_tickets, list_comments, list_saved_searches, list_tickets,
    reopen_ticket, transition_ticket_status, update_comment, update_saved_search, update_ticket,
    upsert_directory_user,
};
pub use request_response::{
    AddAttachmentRequest, AddCommentRequest, AssignTicketRequest, Capability,
    DuplicateSavedSearchRequest, ExecuteSavedSearchResponse, HistoryResponse,
    ListAttachmentsResponse, ListCommentsResponse, ListSavedSearchesQuery,
    ListSavedSearchesResponse, ListTicketsQuery, ListTicketsResponse, ReopenTicketRequest,
    TicketCapabilities, TicketInfo, TransitionStatusRequest, UpdateCommentRequest,
    UpsertDirectoryUserRequest,
};
