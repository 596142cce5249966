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

mod access;
mod classification;
mod directory;
mod error;
mod filter;
mod role;
mod sla;
mod ticket;
mod ticket_status;
mod validation;

#[cfg(test)]
mod tests;

pub use access::{
    assert_can_access, assert_can_mutate, can_access, counts_as_response, project_comments_for,
};
pub use classification::{Category, Impact, Priority, ServiceLevel, Urgency};
pub use directory::{DirectoryUser, display_name_or};
pub use error::DomainError;
pub use filter::TicketFilter;
pub use role::{Role, can_moderate, has_elevated_access, is_support_agent};
pub use sla::{SlaPolicy, SlaTargets, is_breached, is_compliant};
pub use ticket::{Attachment, Comment, Ticket, TicketNumber};
pub use ticket_status::TicketStatus;
pub use validation::{
    MAX_SEARCH_NAME_LEN, MAX_TITLE_LEN, validate_comment_content, validate_description,
    validate_required_text, validate_resolution, validate_search_name, validate_title,
};
