// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-side database operations.

pub mod comments;
pub mod directory;
pub mod events;
pub mod saved_searches;
pub mod tickets;

pub use comments::{get_attachment, get_comment, list_attachments, list_comments};
pub use directory::{find_directory_user, list_directory_users};
pub use events::{list_ticket_events, list_undispatched_events};
pub use saved_searches::{get_saved_search, list_saved_searches};
pub use tickets::{
    current_ticket_sequence, get_ticket, get_ticket_history, get_ticket_version,
    last_history_sequence, list_tickets, list_tickets_for_party,
};
