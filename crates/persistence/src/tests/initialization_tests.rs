// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{T0, create_stored_ticket};
use crate::Persistence;
use crate::backend::sqlite::{get_last_insert_rowid, run_migrations};

#[test]
fn test_in_memory_databases_are_isolated() {
    let mut first = Persistence::new_in_memory().unwrap();
    let mut second = Persistence::new_in_memory().unwrap();

    create_stored_ticket(&mut first, "Only here", T0);

    assert_eq!(first.list_tickets().unwrap().len(), 1);
    assert!(second.list_tickets().unwrap().is_empty());
}

#[test]
fn test_foreign_keys_are_enforced() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    persistence.verify_foreign_key_enforcement().unwrap();
}

#[test]
fn test_migrations_are_idempotent() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    run_migrations(&mut persistence.conn).unwrap();
    persistence.verify_foreign_key_enforcement().unwrap();
}

#[test]
fn test_last_insert_rowid_tracks_inserts() {
    let mut persistence = Persistence::new_in_memory().unwrap();
    let stored = create_stored_ticket(&mut persistence, "Rowid", T0);
    let last = get_last_insert_rowid(&mut persistence.conn).unwrap();
    assert_eq!(last, stored.events[0].event_id);
}

#[test]
fn test_file_database_opens_in_a_fresh_directory() {
    let dir = tempfile::tempdir().unwrap();
    let mut persistence = Persistence::new_with_file(dir.path().join("desk.db")).unwrap();
    persistence.verify_foreign_key_enforcement().unwrap();
    assert!(persistence.list_tickets().unwrap().is_empty());
}
