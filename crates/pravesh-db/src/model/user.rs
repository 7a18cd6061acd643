//! Registered users. Created at registration, read at login, never updated
//! or deleted in this scope.

use chrono::{DateTime, Utc};
use diesel::{pg::Pg, prelude::*};
use serde::{Deserialize, Serialize};

use crate::db::schema;

/// A registered user. The credential hash is never serialized into a
/// response body.
#[derive(
    Debug, Clone, PartialEq, Eq, Identifiable, Queryable, Selectable, Serialize, Deserialize,
)]
#[diesel(table_name = schema::app_user)]
#[diesel(check_for_backend(Pg))]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: uuid::Uuid,
    pub username: String,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub photo: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::app_user)]
pub struct NewUser {
    pub id: uuid::Uuid,
    pub username: String,
    pub first_name: String,
    pub middle_name: String,
    pub last_name: String,
    pub mobile_number: String,
    pub email: String,
    pub password_hash: String,
    pub photo: Option<String>,
    pub created_at: DateTime<Utc>,
}
