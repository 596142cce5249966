// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Write-side database operations.

pub mod comments;
pub mod directory;
pub mod saved_searches;
pub mod tickets;

pub use comments::{
    delete_attachment, delete_comment, insert_attachment, insert_comment, update_comment_content,
};
pub use directory::upsert_directory_user;
pub use saved_searches::{delete_saved_search, insert_saved_search, update_saved_search};
pub use tickets::{
    insert_event, insert_events, insert_history, insert_ticket, mark_events_dispatched, next_ticket_number,
    update_ticket_if_current,
};
