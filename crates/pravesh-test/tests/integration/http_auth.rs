//! HTTP-level tests through the full router, matching the handler wiring
//! in the application entry point: depot hoops for the pool and settings,
//! then the API routes.

use salvo::http::StatusCode;
use salvo::test::{ResponseExt, TestClient};
use salvo::{Router, Service};

use pravesh_test::component::config::ConfigHandler;
use pravesh_test::component::db::connection::DbProviderHandler;

use super::helpers::*;

async fn test_service() -> Service {
    let router = Router::new()
        .hoop(DbProviderHandler {
            provider: pool().await.clone(),
        })
        .hoop(ConfigHandler {
            settings: test_config(),
        })
        .push(pravesh_test::app::api::routes());

    Service::new(router)
}

fn status_of(response: &salvo::Response) -> StatusCode {
    response
        .status_code
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

#[test_log::test(tokio::test)]
async fn healthcheck_responds_ok() {
    let service = test_service().await;

    let mut response = TestClient::get("http://127.0.0.1:5800/healthcheck")
        .send(&service)
        .await;

    assert_eq!(status_of(&response), StatusCode::OK);
    let body = response.take_string().await.expect("Failed to read body");
    assert_eq!(body, "OK");
}

#[test_log::test(tokio::test)]
async fn register_then_login_over_http() {
    let service = test_service().await;
    let email = unique_email("http");

    let mut response = TestClient::post("http://127.0.0.1:5800/register")
        .json(&serde_json::json!({
            "username": "asharao",
            "firstName": "Asha",
            "middleName": "",
            "lastName": "Rao",
            "mobileNumber": "9876543210",
            "email": email,
            "password": "secret99",
            "confirmPassword": "secret99",
        }))
        .send(&service)
        .await;

    assert_eq!(status_of(&response), StatusCode::OK);
    let body: serde_json::Value = response.take_json().await.expect("Failed to read body");
    assert_eq!(body["message"], "User registered successfully!");

    let mut response = TestClient::post("http://127.0.0.1:5800/login")
        .json(&serde_json::json!({
            "email": email,
            "password": "secret99",
        }))
        .send(&service)
        .await;

    assert_eq!(status_of(&response), StatusCode::OK);
    let body: serde_json::Value = response.take_json().await.expect("Failed to read body");
    assert_eq!(body["message"], "Login successful");
    assert_eq!(body["user"]["email"], email.as_str());
    // The credential hash never crosses the wire.
    assert!(body["user"].get("passwordHash").is_none());

    let response = TestClient::post("http://127.0.0.1:5800/login")
        .json(&serde_json::json!({
            "email": email,
            "password": "not-the-password",
        }))
        .send(&service)
        .await;
    assert_eq!(status_of(&response), StatusCode::BAD_REQUEST);
}

#[test_log::test(tokio::test)]
async fn duplicate_registration_over_http_is_rejected() {
    let service = test_service().await;
    let email = unique_email("http-dup");

    let payload = serde_json::json!({
        "username": "asharao",
        "firstName": "Asha",
        "middleName": "",
        "lastName": "Rao",
        "mobileNumber": "9876543210",
        "email": email,
        "password": "secret99",
        "confirmPassword": "secret99",
    });

    let response = TestClient::post("http://127.0.0.1:5800/register")
        .json(&payload)
        .send(&service)
        .await;
    assert_eq!(status_of(&response), StatusCode::OK);

    let mut response = TestClient::post("http://127.0.0.1:5800/register")
        .json(&payload)
        .send(&service)
        .await;
    assert_eq!(status_of(&response), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.take_json().await.expect("Failed to read body");
    assert_eq!(body["error"], "User already exists");
}
