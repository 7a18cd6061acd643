//! Record lifecycle: validate → derive → persist.
//!
//! Every mutation re-runs the full validation over the would-be stored
//! record, so server state never drifts from the rule set even when a
//! client skipped its own checks.

use chrono::Utc;

use pravesh_core::form::state::{FormPatch, FormState};
use pravesh_core::form::validate::validate_record;
use pravesh_db::db::connection::DbConnection;
use pravesh_db::db::query::record as record_query;
use pravesh_db::model::record::{NewRecord, Record};

use crate::error::{ServiceError, ServiceResult};

/// ## Summary
/// All records in insertion order.
///
/// ## Errors
/// Returns an error if the store is unreachable.
pub async fn list(conn: &mut DbConnection<'_>) -> ServiceResult<Vec<Record>> {
    Ok(record_query::all_in_insertion_order(conn).await?)
}

/// ## Summary
/// Creates a record from a fresh submission: applies the submitted fields
/// over an empty form, validates everything at once, and persists.
///
/// ## Errors
/// - `Validation` with the full violations map when any rule fails
/// - `Storage` when the write fails
pub async fn create(conn: &mut DbConnection<'_>, patch: &FormPatch) -> ServiceResult<Record> {
    let now = Utc::now();
    let state = FormState::new().apply(patch, now.date_naive());

    validate_record(&state).map_err(ServiceError::Validation)?;

    let new_record = NewRecord::from_state(uuid::Uuid::now_v7(), &state, now)?;
    let stored = record_query::insert(conn, &new_record).await?;

    tracing::info!(record_id = %stored.id, "Record created");

    Ok(stored)
}

/// ## Summary
/// Merges a partial update over an existing record. Only keys present in
/// the patch overwrite; omitted attachment fields keep their previous
/// stored path. Full name and age are re-derived from the merged state and
/// the result is re-validated before it is written back.
///
/// An empty patch returns the stored record without touching the store.
///
/// ## Errors
/// - `NotFound` when no record with `id` exists
/// - `Validation` when the merged record violates any rule
/// - `Storage` when the write fails
pub async fn update(
    conn: &mut DbConnection<'_>,
    id: uuid::Uuid,
    patch: &FormPatch,
) -> ServiceResult<Record> {
    let Some(existing) = record_query::by_id(conn, id).await? else {
        return Err(ServiceError::NotFound(format!("no record with id {id}")));
    };

    if patch.is_empty() {
        return Ok(existing);
    }

    let now = Utc::now();
    let merged_state = existing.to_form_state().apply(patch, now.date_naive());

    validate_record(&merged_state).map_err(ServiceError::Validation)?;

    let merged = existing.with_state(&merged_state, now)?;
    let stored = record_query::update(conn, &merged).await?;

    tracing::info!(record_id = %stored.id, "Record updated");

    Ok(stored)
}

/// ## Summary
/// Hard-deletes a record by id; the row is removed, not tombstoned.
///
/// ## Errors
/// - `NotFound` when no record with `id` exists
/// - `Storage` when the delete fails
pub async fn delete(conn: &mut DbConnection<'_>, id: uuid::Uuid) -> ServiceResult<()> {
    let removed = record_query::delete(conn, id).await?;

    if removed == 0 {
        return Err(ServiceError::NotFound(format!("no record with id {id}")));
    }

    tracing::info!(record_id = %id, "Record deleted");

    Ok(())
}
