//! Registration and login tests against a live database.
//!
//! Exercises the unique-email conflict path and credential verification,
//! which both depend on real stored rows and Argon2 hashes.

use pravesh_test::component::db::query::user as user_query;
use pravesh_test::component::service::auth;
use pravesh_test::component::service::error::ServiceError;

use super::helpers::*;

#[test_log::test(tokio::test)]
async fn duplicate_email_registration_is_a_conflict() {
    let mut conn = conn().await;
    let email = unique_email("dup");

    let first = auth::service::register(&mut conn, &registration_input(&email), None)
        .await
        .expect("First registration should succeed");

    let mut second_input = registration_input(&email);
    second_input.username = "imposter".into();
    let second = auth::service::register(&mut conn, &second_input, None).await;
    assert!(matches!(second, Err(ServiceError::Conflict(_))));

    // The existing row is untouched by the rejected attempt.
    let stored = user_query::by_email(&mut conn, &email)
        .await
        .expect("Failed to read user back")
        .expect("First registration should still be stored");
    assert_eq!(stored.id, first.id);
    assert_eq!(stored.username, first.username);
}

#[test_log::test(tokio::test)]
async fn login_verifies_the_stored_credential() {
    let mut conn = conn().await;
    let email = unique_email("login");

    let registered = auth::service::register(&mut conn, &registration_input(&email), None)
        .await
        .expect("Registration should succeed");

    let user = auth::service::login(&mut conn, &email, "secret99")
        .await
        .expect("Login with the right password should succeed");
    assert_eq!(user.id, registered.id);

    let wrong = auth::service::login(&mut conn, &email, "wrong-password").await;
    assert!(matches!(wrong, Err(ServiceError::InvalidCredential)));

    let unknown = auth::service::login(&mut conn, "nobody@example.com", "secret99").await;
    assert!(matches!(unknown, Err(ServiceError::NotFound(_))));
}
