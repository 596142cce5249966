// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Directory user lookups.

use diesel::SqliteConnection;
use diesel::prelude::*;
use servicedesk_domain::DirectoryUser;

use crate::data_models::{flag, parse_stored};
use crate::diesel_schema::directory_users;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = directory_users)]
struct DirectoryUserRow {
    user_id: String,
    display_name: String,
    email: String,
    role: String,
    is_active: i32,
}

impl TryFrom<DirectoryUserRow> for DirectoryUser {
    type Error = PersistenceError;

    fn try_from(row: DirectoryUserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            user_id: row.user_id,
            display_name: row.display_name,
            email: row.email,
            role: parse_stored(&row.role)?,
            is_active: flag(row.is_active),
        })
    }
}

/// Looks up a directory user.
///
/// # Errors
///
/// Returns an error if the query fails or the row is invalid.
pub fn find_directory_user(
    conn: &mut SqliteConnection,
    user_id: &str,
) -> Result<Option<DirectoryUser>, PersistenceError> {
    directory_users::table
        .filter(directory_users::user_id.eq(user_id))
        .select(DirectoryUserRow::as_select())
        .first(conn)
        .optional()?
        .map(DirectoryUser::try_from)
        .transpose()
}

/// Lists every directory user ordered by display name.
///
/// # Errors
///
/// Returns an error if the query fails or a row is invalid.
pub fn list_directory_users(
    conn: &mut SqliteConnection,
) -> Result<Vec<DirectoryUser>, PersistenceError> {
    let rows: Vec<DirectoryUserRow> = directory_users::table
        .order((directory_users::display_name.asc(), directory_users::user_id.asc()))
        .select(DirectoryUserRow::as_select())
        .load(conn)?;

    rows.into_iter().map(DirectoryUser::try_from).collect()
}
