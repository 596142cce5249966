// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use servicedesk::SavedSearch;
use tracing::info;

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{format_timestamp, to_flag};
use crate::diesel_schema::saved_searches;
use crate::error::PersistenceError;

/// Inserts a new saved search and returns it with its id.
///
/// # Errors
///
/// Returns an error if the criteria cannot be serialized or the insert
/// fails.
pub fn insert_saved_search(
    conn: &mut SqliteConnection,
    search: &SavedSearch,
) -> Result<SavedSearch, PersistenceError> {
    let criteria_json: String = serde_json::to_string(&search.criteria)?;
    diesel::insert_into(saved_searches::table)
        .values((
            saved_searches::owner_id.eq(&search.owner_id),
            saved_searches::name.eq(&search.name),
            saved_searches::description.eq(search.description.as_deref()),
            saved_searches::criteria_json.eq(criteria_json),
            saved_searches::is_public.eq(to_flag(search.is_public)),
            saved_searches::created_at.eq(format_timestamp(search.created_at)?),
            saved_searches::updated_at.eq(format_timestamp(search.updated_at)?),
        ))
        .execute(conn)?;

    let search_id: i64 = get_last_insert_rowid(conn)?;
    info!(search_id, owner_id = %search.owner_id, name = %search.name, "Inserted saved search");

    Ok(SavedSearch {
        search_id: Some(search_id),
        ..search.clone()
    })
}

/// Overwrites the editable fields of a stored search.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the search does not exist.
pub fn update_saved_search(
    conn: &mut SqliteConnection,
    search: &SavedSearch,
) -> Result<(), PersistenceError> {
    let search_id: i64 = search
        .search_id
        .ok_or_else(|| PersistenceError::not_found("SavedSearch", "unsaved"))?;
    let criteria_json: String = serde_json::to_string(&search.criteria)?;

    let updated: usize =
        diesel::update(saved_searches::table.filter(saved_searches::search_id.eq(search_id)))
            .set((
                saved_searches::name.eq(&search.name),
                saved_searches::description.eq(search.description.as_deref()),
                saved_searches::criteria_json.eq(criteria_json),
                saved_searches::is_public.eq(to_flag(search.is_public)),
                saved_searches::updated_at.eq(format_timestamp(search.updated_at)?),
            ))
            .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::not_found("SavedSearch", search_id));
    }
    info!(search_id, "Updated saved search");
    Ok(())
}

/// Deletes a saved search.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the search does not exist.
pub fn delete_saved_search(
    conn: &mut SqliteConnection,
    search_id: i64,
) -> Result<(), PersistenceError> {
    let deleted: usize =
        diesel::delete(saved_searches::table.filter(saved_searches::search_id.eq(search_id)))
            .execute(conn)?;
    if deleted == 0 {
        return Err(PersistenceError::not_found("SavedSearch", search_id));
    }
    info!(search_id, "Deleted saved search");
    Ok(())
}
