//! Record lifecycle tests against a live database.
//!
//! Covers the persistence properties the in-crate unit tests cannot reach:
//! create-then-read equality, the empty-patch short circuit, merge and
//! re-derivation on partial update, and delete semantics for missing rows.

use pravesh_test::component::db::query::record as record_query;
use pravesh_test::component::form::state::FormPatch;
use pravesh_test::component::service::error::ServiceError;
use pravesh_test::component::service::record;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn create_then_read_returns_equal_record() {
    let mut conn = conn().await;

    let stored = record::create(&mut conn, &complete_record_patch())
        .await
        .expect("Failed to create record");
    assert_eq!(stored.full_name, "Asha Vijay Rao");
    assert_eq!(stored.date_of_birth.to_string(), "2000-06-15");
    assert!(stored.age >= 26);

    let fetched = record_query::by_id(&mut conn, stored.id)
        .await
        .expect("Failed to read record back");
    assert_eq!(fetched, Some(stored));
}

#[test_log::test(tokio::test)]
async fn empty_patch_leaves_record_unchanged() {
    let mut conn = conn().await;

    let stored = record::create(&mut conn, &complete_record_patch())
        .await
        .expect("Failed to create record");

    let after = record::update(&mut conn, stored.id, &FormPatch::default())
        .await
        .expect("Empty patch should succeed");
    // No write happened: the timestamp is the stored one, not a fresh now.
    assert_eq!(after.updated_at, stored.updated_at);
    assert_eq!(after, stored);

    let fetched = record_query::by_id(&mut conn, stored.id)
        .await
        .expect("Failed to read record back");
    assert_eq!(fetched, Some(stored));
}

#[test_log::test(tokio::test)]
async fn partial_update_merges_and_rederives() {
    let mut conn = conn().await;

    let stored = record::create(&mut conn, &complete_record_patch())
        .await
        .expect("Failed to create record");

    let mut patch = FormPatch::default();
    assert!(patch.set_wire("lastName", "Deshmukh".into()));

    let updated = record::update(&mut conn, stored.id, &patch)
        .await
        .expect("Failed to update record");

    assert_eq!(updated.last_name, "Deshmukh");
    assert_eq!(updated.full_name, "Asha Vijay Deshmukh");
    // Untouched fields and attachment paths survive the merge.
    assert_eq!(updated.mother_name, stored.mother_name);
    assert_eq!(updated.marksheet, stored.marksheet);
    assert_eq!(updated.created_at, stored.created_at);
    assert!(updated.updated_at > stored.updated_at);
}

#[test_log::test(tokio::test)]
async fn delete_of_missing_id_is_not_found() {
    let mut conn = conn().await;

    let result = record::delete(&mut conn, uuid::Uuid::now_v7()).await;
    assert!(matches!(result, Err(ServiceError::NotFound(_))));
}

#[test_log::test(tokio::test)]
async fn delete_twice_succeeds_then_not_found() {
    let mut conn = conn().await;

    let stored = record::create(&mut conn, &complete_record_patch())
        .await
        .expect("Failed to create record");

    record::delete(&mut conn, stored.id)
        .await
        .expect("First delete should succeed");

    let second = record::delete(&mut conn, stored.id).await;
    assert!(matches!(second, Err(ServiceError::NotFound(_))));

    let fetched = record_query::by_id(&mut conn, stored.id)
        .await
        .expect("Failed to query deleted record");
    assert_eq!(fetched, None);
}
