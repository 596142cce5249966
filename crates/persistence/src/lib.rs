// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the service desk.
//!
//! Tickets, their history, comments, attachment metadata, saved searches,
//! the directory mirror and the event outbox live in one `SQLite` database
//! accessed through Diesel.
//!
//! ## Write model
//!
//! Every ticket change is written as one transaction: the ticket row, its
//! history entries and its outbox events commit together or not at all.
//! Ticket updates are guarded by the row's `version`; a stale writer gets
//! `PersistenceError::VersionConflict` and nothing is written.
//!
//! Ticket numbers come from a per-year counter row that is incremented in
//! the same transaction as the ticket insert.
//!
//! ## Testing
//!
//! `Persistence::new_in_memory` gives every caller its own shared-cache
//! in-memory database, so tests never see each other's rows.

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
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use servicedesk::{SavedSearch, TransitionResult};
use servicedesk_audit::{DomainEvent, HistoryEntry, RecordedEvent};
use servicedesk_domain::{Attachment, Comment, DirectoryUser, Ticket, TicketNumber};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;
use tracing::{info, warn};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{NewAttachment, NewComment, StoredChange, StoredComment};
pub use error::PersistenceError;

/// Atomic counter for generating unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Failure inside a transaction that runs caller code.
///
/// Keeps the caller's own error apart from store failures so it can be
/// handed back unchanged after the rollback.
enum TxError<E> {
    Store(PersistenceError),
    Rejected(E),
}

impl<E> From<diesel::result::Error> for TxError<E> {
    fn from(err: diesel::result::Error) -> Self {
        Self::Store(err.into())
    }
}

impl<E> From<PersistenceError> for TxError<E> {
    fn from(err: PersistenceError) -> Self {
        Self::Store(err)
    }
}

/// The service desk store.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a store backed by a fresh in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url = format!("file:memdb_test_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a store backed by a database file, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if enforcement is off.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ------------------------------------------------------------------
    // Tickets
    // ------------------------------------------------------------------

    /// Creates a ticket.
    ///
    /// Allocates the next number for `year`, hands it to `build` and stores
    /// what `build` returns: the ticket, its history and its events. If
    /// `build` fails, the transaction rolls back and its error is returned
    /// unchanged; the number is not consumed.
    ///
    /// # Errors
    ///
    /// Returns `build`'s error, or a store error converted into `E`.
    pub fn create_ticket<E, F>(&mut self, year: i32, build: F) -> Result<StoredChange, E>
    where
        F: FnOnce(TicketNumber) -> Result<TransitionResult, E>,
        E: From<PersistenceError>,
    {
        let outcome: Result<StoredChange, TxError<E>> = self.conn.immediate_transaction(|conn| {
            let number: TicketNumber = mutations::next_ticket_number(conn, year)?;
            let result: TransitionResult = build(number).map_err(TxError::Rejected)?;
            Ok(store_new_ticket(conn, &result)?)
        });

        outcome.map_err(|err| match err {
            TxError::Store(e) => E::from(e),
            TxError::Rejected(e) => e,
        })
    }

    /// Stores a change produced by the ticket lifecycle.
    ///
    /// The write only happens if the stored version still equals
    /// `change.new_ticket.version`. A result without history is a no-op and
    /// returns the ticket as given.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::VersionConflict` if the ticket changed
    /// since it was read, or `PersistenceError::NotFound` if it is gone.
    pub fn persist_ticket_change(
        &mut self,
        change: &TransitionResult,
    ) -> Result<StoredChange, PersistenceError> {
        if !change.has_changes() {
            return Ok(StoredChange {
                ticket: change.new_ticket.clone(),
                history: Vec::new(),
                events: Vec::new(),
            });
        }
        self.conn
            .immediate_transaction(|conn| store_ticket_change(conn, change))
    }

    /// Retrieves a ticket.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the ticket does not exist.
    pub fn get_ticket(&mut self, ticket_id: i64) -> Result<Ticket, PersistenceError> {
        queries::get_ticket(&mut self.conn, ticket_id)
    }

    /// Retrieves every ticket.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_tickets(&mut self) -> Result<Vec<Ticket>, PersistenceError> {
        queries::list_tickets(&mut self.conn)
    }

    /// Retrieves the tickets `user_id` requested or is assigned to.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_tickets_for_party(&mut self, user_id: &str) -> Result<Vec<Ticket>, PersistenceError> {
        queries::list_tickets_for_party(&mut self.conn, user_id)
    }

    /// Retrieves a ticket's history ordered by sequence.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_ticket_history(
        &mut self,
        ticket_id: i64,
    ) -> Result<Vec<HistoryEntry>, PersistenceError> {
        queries::get_ticket_history(&mut self.conn, ticket_id)
    }

    /// Returns the last ticket sequence issued for `year`.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn current_ticket_sequence(&mut self, year: i32) -> Result<Option<i64>, PersistenceError> {
        queries::current_ticket_sequence(&mut self.conn, year)
    }

    // ------------------------------------------------------------------
    // Comments and attachments
    // ------------------------------------------------------------------

    /// Stores a comment together with its `CommentAdded` event and, when
    /// given, the first-response change the comment caused.
    ///
    /// `event` receives the stored comment so the event can carry its id.
    ///
    /// # Errors
    ///
    /// Returns an error if any write fails; nothing is stored then.
    pub fn add_comment<F>(
        &mut self,
        comment: &NewComment,
        response: Option<&TransitionResult>,
        event: F,
    ) -> Result<StoredComment, PersistenceError>
    where
        F: FnOnce(&Comment) -> DomainEvent,
    {
        self.conn.immediate_transaction(|conn| {
            let stored: Comment = mutations::insert_comment(conn, comment)?;
            let response: Option<StoredChange> = response
                .filter(|change| change.has_changes())
                .map(|change| store_ticket_change(conn, change))
                .transpose()?;
            let event: RecordedEvent = mutations::insert_event(conn, &event(&stored))?;
            Ok(StoredComment {
                comment: stored,
                response,
                event,
            })
        })
    }

    /// Lists all comments on a ticket, internal ones included.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_comments(&mut self, ticket_id: i64) -> Result<Vec<Comment>, PersistenceError> {
        queries::list_comments(&mut self.conn, ticket_id)
    }

    /// Retrieves a comment.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the comment does not exist.
    pub fn get_comment(&mut self, comment_id: i64) -> Result<Comment, PersistenceError> {
        queries::get_comment(&mut self.conn, comment_id)
    }

    /// Replaces a comment's content and returns the stored comment.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the comment does not exist.
    pub fn update_comment(
        &mut self,
        comment_id: i64,
        content: &str,
        now: OffsetDateTime,
    ) -> Result<Comment, PersistenceError> {
        mutations::update_comment_content(&mut self.conn, comment_id, content, now)?;
        queries::get_comment(&mut self.conn, comment_id)
    }

    /// Deletes a comment.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the comment does not exist.
    pub fn delete_comment(&mut self, comment_id: i64) -> Result<(), PersistenceError> {
        mutations::delete_comment(&mut self.conn, comment_id)
    }

    /// Stores attachment metadata.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn add_attachment(
        &mut self,
        attachment: &NewAttachment,
    ) -> Result<Attachment, PersistenceError> {
        mutations::insert_attachment(&mut self.conn, attachment)
    }

    /// Lists the attachment metadata of a ticket.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_attachments(&mut self, ticket_id: i64) -> Result<Vec<Attachment>, PersistenceError> {
        queries::list_attachments(&mut self.conn, ticket_id)
    }

    /// Retrieves attachment metadata.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the attachment does not exist.
    pub fn get_attachment(&mut self, attachment_id: i64) -> Result<Attachment, PersistenceError> {
        queries::get_attachment(&mut self.conn, attachment_id)
    }

    /// Deletes attachment metadata.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the attachment does not exist.
    pub fn delete_attachment(&mut self, attachment_id: i64) -> Result<(), PersistenceError> {
        mutations::delete_attachment(&mut self.conn, attachment_id)
    }

    // ------------------------------------------------------------------
    // Saved searches
    // ------------------------------------------------------------------

    /// Stores a new saved search.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn insert_saved_search(
        &mut self,
        search: &SavedSearch,
    ) -> Result<SavedSearch, PersistenceError> {
        mutations::insert_saved_search(&mut self.conn, search)
    }

    /// Overwrites a stored saved search.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the search does not exist.
    pub fn update_saved_search(&mut self, search: &SavedSearch) -> Result<(), PersistenceError> {
        mutations::update_saved_search(&mut self.conn, search)
    }

    /// Deletes a saved search.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the search does not exist.
    pub fn delete_saved_search(&mut self, search_id: i64) -> Result<(), PersistenceError> {
        mutations::delete_saved_search(&mut self.conn, search_id)
    }

    /// Retrieves a saved search.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the search does not exist.
    pub fn get_saved_search(&mut self, search_id: i64) -> Result<SavedSearch, PersistenceError> {
        queries::get_saved_search(&mut self.conn, search_id)
    }

    /// Lists `owner_id`'s searches, plus public ones when asked.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_saved_searches(
        &mut self,
        owner_id: &str,
        include_public: bool,
    ) -> Result<Vec<SavedSearch>, PersistenceError> {
        queries::list_saved_searches(&mut self.conn, owner_id, include_public)
    }

    // ------------------------------------------------------------------
    // Directory
    // ------------------------------------------------------------------

    /// Inserts or replaces a directory user.
    ///
    /// # Errors
    ///
    /// Returns an error if the upsert fails.
    pub fn upsert_directory_user(&mut self, user: &DirectoryUser) -> Result<(), PersistenceError> {
        mutations::upsert_directory_user(&mut self.conn, user)
    }

    /// Looks up a directory user.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_directory_user(
        &mut self,
        user_id: &str,
    ) -> Result<Option<DirectoryUser>, PersistenceError> {
        queries::find_directory_user(&mut self.conn, user_id)
    }

    /// Lists every directory user.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_directory_users(&mut self) -> Result<Vec<DirectoryUser>, PersistenceError> {
        queries::list_directory_users(&mut self.conn)
    }

    // ------------------------------------------------------------------
    // Outbox
    // ------------------------------------------------------------------

    /// Lists events not yet dispatched, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_undispatched_events(&mut self) -> Result<Vec<RecordedEvent>, PersistenceError> {
        queries::list_undispatched_events(&mut self.conn)
    }

    /// Lists every event recorded for a ticket.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_ticket_events(
        &mut self,
        ticket_id: i64,
    ) -> Result<Vec<RecordedEvent>, PersistenceError> {
        queries::list_ticket_events(&mut self.conn, ticket_id)
    }

    /// Marks events as dispatched.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn mark_events_dispatched(&mut self, event_ids: &[i64]) -> Result<usize, PersistenceError> {
        mutations::mark_events_dispatched(&mut self.conn, event_ids)
    }
}

/// Inserts a freshly created ticket with its history and events.
fn store_new_ticket(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
) -> Result<StoredChange, PersistenceError> {
    let ticket_id: i64 = mutations::insert_ticket(conn, &result.new_ticket)?;
    let ticket = Ticket {
        ticket_id: Some(ticket_id),
        ..result.new_ticket.clone()
    };

    let history: Vec<HistoryEntry> = mutations::insert_history(conn, ticket_id, 0, &result.history)?;
    let events: Vec<DomainEvent> = result
        .events
        .iter()
        .cloned()
        .map(|mut event| {
            event.ticket_id.get_or_insert(ticket_id);
            event
        })
        .collect();
    let events: Vec<RecordedEvent> = mutations::insert_events(conn, &events)?;

    Ok(StoredChange {
        ticket,
        history,
        events,
    })
}

/// Writes a versioned ticket change with its history and events.
fn store_ticket_change(
    conn: &mut SqliteConnection,
    change: &TransitionResult,
) -> Result<StoredChange, PersistenceError> {
    let ticket: &Ticket = &change.new_ticket;
    let ticket_id: i64 = ticket
        .ticket_id
        .ok_or_else(|| PersistenceError::not_found("Ticket", ticket.ticket_number.to_string()))?;

    if mutations::update_ticket_if_current(conn, ticket)? == 0 {
        return Err(match queries::get_ticket_version(conn, ticket_id)? {
            None => PersistenceError::not_found("Ticket", ticket_id),
            Some(stored_version) => {
                warn!(
                    ticket_id,
                    expected_version = ticket.version,
                    stored_version,
                    "Rejected stale ticket update"
                );
                PersistenceError::VersionConflict {
                    ticket_id,
                    expected_version: ticket.version,
                }
            }
        });
    }

    let last_sequence: i64 = queries::last_history_sequence(conn, ticket_id)?;
    let history: Vec<HistoryEntry> =
        mutations::insert_history(conn, ticket_id, last_sequence, &change.history)?;
    let events: Vec<RecordedEvent> = mutations::insert_events(conn, &change.events)?;

    info!(
        ticket_id,
        version = ticket.version + 1,
        changes = history.len(),
        "Stored ticket change"
    );

    Ok(StoredChange {
        ticket: Ticket {
            version: ticket.version + 1,
            ..ticket.clone()
        },
        history,
        events,
    })
}
