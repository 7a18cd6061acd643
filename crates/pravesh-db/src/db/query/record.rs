//! Record table queries. Each mutating query persists before returning;
//! there is no buffering of writes across requests.

use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::connection::DbConnection;
use crate::db::schema;
use crate::error::DbResult;
use crate::model::record::{NewRecord, Record};

/// ## Summary
/// Inserts a new record and returns the stored row.
///
/// ## Errors
/// Returns an error if the insert fails.
pub async fn insert(conn: &mut DbConnection<'_>, new_record: &NewRecord) -> DbResult<Record> {
    let row = diesel::insert_into(schema::record::table)
        .values(new_record)
        .returning(Record::as_select())
        .get_result::<Record>(conn)
        .await?;

    Ok(row)
}

/// ## Summary
/// Looks a record up by id.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn by_id(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> DbResult<Option<Record>> {
    let row = schema::record::table
        .find(id)
        .select(Record::as_select())
        .first::<Record>(conn)
        .await
        .optional()?;

    Ok(row)
}

/// ## Summary
/// All records in insertion order, stable across repeated reads absent
/// concurrent writes.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn all_in_insertion_order(conn: &mut DbConnection<'_>) -> DbResult<Vec<Record>> {
    let rows = schema::record::table
        .order((schema::record::created_at.asc(), schema::record::id.asc()))
        .select(Record::as_select())
        .load::<Record>(conn)
        .await?;

    Ok(rows)
}

/// ## Summary
/// Overwrites a record with its merged replacement and returns the stored
/// row.
///
/// ## Errors
/// Returns an error if the update fails.
pub async fn update(conn: &mut DbConnection<'_>, merged: &Record) -> DbResult<Record> {
    let row = diesel::update(schema::record::table.find(merged.id))
        .set(merged)
        .returning(Record::as_select())
        .get_result::<Record>(conn)
        .await?;

    Ok(row)
}

/// ## Summary
/// Hard-deletes a record; returns the number of rows removed (0 or 1).
///
/// ## Errors
/// Returns an error if the delete fails.
pub async fn delete(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> DbResult<usize> {
    let removed = diesel::delete(schema::record::table.find(id))
        .execute(conn)
        .await?;

    Ok(removed)
}
