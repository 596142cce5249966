// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use servicedesk_domain::DirectoryUser;
use tracing::info;

use crate::data_models::to_flag;
use crate::diesel_schema::directory_users;
use crate::error::PersistenceError;

/// Inserts or replaces a directory user.
///
/// # Errors
///
/// Returns an error if the upsert fails.
pub fn upsert_directory_user(
    conn: &mut SqliteConnection,
    user: &DirectoryUser,
) -> Result<(), PersistenceError> {
    diesel::insert_into(directory_users::table)
        .values((
            directory_users::user_id.eq(&user.user_id),
            directory_users::display_name.eq(&user.display_name),
            directory_users::email.eq(&user.email),
            directory_users::role.eq(user.role.as_str()),
            directory_users::is_active.eq(to_flag(user.is_active)),
        ))
        .on_conflict(directory_users::user_id)
        .do_update()
        .set((
            directory_users::display_name.eq(&user.display_name),
            directory_users::email.eq(&user.email),
            directory_users::role.eq(user.role.as_str()),
            directory_users::is_active.eq(to_flag(user.is_active)),
        ))
        .execute(conn)?;

    info!(
        user_id = %user.user_id,
        role = %user.role,
        is_active = user.is_active,
        "Upserted directory user"
    );
    Ok(())
}
