// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use servicedesk::SavedSearch;
use servicedesk_domain::TicketFilter;

use crate::data_models::{flag, parse_timestamp};
use crate::diesel_schema::saved_searches;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = saved_searches)]
struct SavedSearchRow {
    search_id: i64,
    owner_id: String,
    name: String,
    description: Option<String>,
    criteria_json: String,
    is_public: i32,
    created_at: String,
    updated_at: String,
}

impl TryFrom<SavedSearchRow> for SavedSearch {
    type Error = PersistenceError;

    fn try_from(row: SavedSearchRow) -> Result<Self, Self::Error> {
        let criteria: TicketFilter = serde_json::from_str(&row.criteria_json)?;
        Ok(Self {
            search_id: Some(row.search_id),
            owner_id: row.owner_id,
            name: row.name,
            description: row.description,
            criteria,
            is_public: flag(row.is_public),
            created_at: parse_timestamp(&row.created_at)?,
            updated_at: parse_timestamp(&row.updated_at)?,
        })
    }
}

/// Retrieves a saved search by id.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the search does not exist.
pub fn get_saved_search(
    conn: &mut SqliteConnection,
    search_id: i64,
) -> Result<SavedSearch, PersistenceError> {
    let row: Option<SavedSearchRow> = saved_searches::table
        .filter(saved_searches::search_id.eq(search_id))
        .select(SavedSearchRow::as_select())
        .first(conn)
        .optional()?;

    row.ok_or_else(|| PersistenceError::not_found("SavedSearch", search_id))?
        .try_into()
}

/// Retrieves searches owned by `owner_id`, plus every public search when
/// `include_public` is set.
///
/// # Errors
///
/// Returns an error if the query fails or a row is invalid.
pub fn list_saved_searches(
    conn: &mut SqliteConnection,
    owner_id: &str,
    include_public: bool,
) -> Result<Vec<SavedSearch>, PersistenceError> {
    let rows: Vec<SavedSearchRow> = if include_public {
        saved_searches::table
            .filter(
                saved_searches::owner_id
                    .eq(owner_id)
                    .or(saved_searches::is_public.ne(0)),
            )
            .select(SavedSearchRow::as_select())
            .load(conn)?
    } else {
        saved_searches::table
            .filter(saved_searches::owner_id.eq(owner_id))
            .select(SavedSearchRow::as_select())
            .load(conn)?
    };

    rows.into_iter().map(SavedSearch::try_from).collect()
}
