//! Registration and login operations.

use chrono::Utc;

use pravesh_core::form::validate::{RegistrationInput, validate_registration};
use pravesh_db::db::connection::DbConnection;
use pravesh_db::db::query::user as user_query;
use pravesh_db::model::user::{NewUser, User};

use crate::auth::password::{hash_password, verify_password};
use crate::error::{ServiceError, ServiceResult};

/// ## Summary
/// Registers a new user: validates the submission, rejects a duplicate
/// email, and stores the credential as an Argon2id hash.
///
/// ## Side Effects
/// - Inserts an `app_user` row
///
/// ## Errors
/// - `Validation` with the full violations map when any rule fails
/// - `Conflict` when the email is already registered; the existing user row
///   is left untouched
/// - `Storage` when database operations fail
pub async fn register(
    conn: &mut DbConnection<'_>,
    input: &RegistrationInput,
    photo_path: Option<String>,
) -> ServiceResult<User> {
    validate_registration(input).map_err(ServiceError::Validation)?;

    if user_query::by_email(conn, &input.email).await?.is_some() {
        return Err(ServiceError::Conflict("User already exists".to_string()));
    }

    let password_hash = hash_password(&input.password)?;

    let new_user = NewUser {
        id: uuid::Uuid::now_v7(),
        username: input.username.clone(),
        first_name: input.first_name.clone(),
        middle_name: input.middle_name.clone(),
        last_name: input.last_name.clone(),
        mobile_number: input.mobile_number.clone(),
        email: input.email.clone(),
        password_hash,
        photo: photo_path,
        created_at: Utc::now(),
    };

    let user = user_query::insert(conn, &new_user).await?;

    tracing::info!(user_id = %user.id, email = %user.email, "User registered successfully");

    Ok(user)
}

/// ## Summary
/// Authenticates a login attempt by credential comparison. No session or
/// token is issued; the caller consumes the returned user directly (the
/// credential hash is excluded from serialization by the model).
///
/// ## Errors
/// - `NotFound` when no user matches the email
/// - `InvalidCredential` when the hash comparison fails
/// - `Storage` when database operations fail
pub async fn login(conn: &mut DbConnection<'_>, email: &str, password: &str) -> ServiceResult<User> {
    let Some(user) = user_query::by_email(conn, email).await? else {
        return Err(ServiceError::NotFound("User not found".to_string()));
    };

    verify_password(password, &user.password_hash)?;

    tracing::info!(user_id = %user.id, email = %user.email, "User logged in successfully");

    Ok(user)
}
