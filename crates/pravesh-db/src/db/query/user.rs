//! User table queries.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema;
use crate::error::DbResult;
use crate::model::user::{NewUser, User};

/// ## Summary
/// Looks a user up by their unique email.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn by_email(conn: &mut DbConnection<'_>, email: &str) -> DbResult<Option<User>> {
    let row = schema::app_user::table
        .filter(schema::app_user::email.eq(email))
        .select(User::as_select())
        .first::<User>(conn)
        .await
        .optional()?;

    Ok(row)
}

/// ## Summary
/// Inserts a new user and returns the stored row.
///
/// ## Errors
/// Returns an error if the insert fails, including when the unique email
/// index rejects a duplicate.
pub async fn insert(conn: &mut DbConnection<'_>, new_user: &NewUser) -> DbResult<User> {
    let row = diesel::insert_into(schema::app_user::table)
        .values(new_user)
        .returning(User::as_select())
        .get_result::<User>(conn)
        .await?;

    Ok(row)
}
