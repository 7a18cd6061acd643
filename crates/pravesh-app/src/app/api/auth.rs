use std::path::Path;

use salvo::http::StatusCode;
use salvo::http::form::FormData;
use salvo::writing::Json;
use salvo::{Depot, Request, Response, Router, handler};
use serde::{Deserialize, Serialize};
use tracing::error;

use pravesh_core::form::validate::{PhotoUpload, RegistrationInput};
use pravesh_db::model::user::User;
use pravesh_service::error::ServiceError;
use pravesh_service::{auth, upload};

use super::{ErrorResponse, ViolationsResponse};
use crate::config::get_config_from_depot;
use crate::db_handler::get_db_from_depot;

/// ## Summary
/// Registration request payload for the JSON flow. The multipart flow
/// carries the same fields plus an optional photo part.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub middle_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub mobile_number: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

/// ## Summary
/// Success response payload
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// ## Summary
/// Login request payload
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// ## Summary
/// Login response payload; the user's credential hash is never serialized.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: User,
}

impl From<RegisterRequest> for RegistrationInput {
    fn from(req: RegisterRequest) -> Self {
        Self {
            username: req.username,
            first_name: req.first_name,
            middle_name: req.middle_name,
            last_name: req.last_name,
            mobile_number: req.mobile_number,
            email: req.email,
            password: req.password,
            confirm_password: req.confirm_password,
            photo: None,
        }
    }
}

fn field(form: &FormData, name: &str) -> String {
    form.fields.get(name).cloned().unwrap_or_default()
}

/// Registration as submitted through a multipart form: text fields plus an
/// optional photo part. The photo's metadata rides along for validation;
/// the file itself is stored only after the submission passes.
fn registration_from_form(form: &FormData) -> RegistrationInput {
    let photo = form.files.get("photo").map(|file| PhotoUpload {
        content_type: file
            .content_type()
            .map(|mime| mime.to_string())
            .unwrap_or_default(),
        size: file.size(),
    });

    RegistrationInput {
        username: field(form, "username"),
        first_name: field(form, "firstName"),
        middle_name: field(form, "middleName"),
        last_name: field(form, "lastName"),
        mobile_number: field(form, "mobileNumber"),
        email: field(form, "email"),
        password: field(form, "password"),
        confirm_password: field(form, "confirmPassword"),
        photo,
    }
}

fn is_multipart(req: &Request) -> bool {
    req.content_type()
        .is_some_and(|mime| mime.subtype() == salvo::http::mime::FORM_DATA)
}

/// ## Summary
/// POST /register - Creates a user account. Accepts either a JSON body or a
/// multipart form with an optional profile photo.
///
/// ## Side Effects
/// - Inserts an `app_user` row with an Argon2id credential hash
/// - Stores the uploaded photo when one is supplied
///
/// ## Errors
/// Returns HTTP 400 with the violations map when validation fails
/// Returns HTTP 400 if the email is already registered
/// Returns HTTP 500 if storage operations fail
#[handler]
async fn register_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    tracing::debug!("Processing user registration request");

    let (input, photo_path) = if is_multipart(req) {
        let form = match req.form_data().await {
            Ok(f) => f,
            Err(e) => {
                error!(error = ?e, "Failed to parse registration form");
                res.status_code(StatusCode::BAD_REQUEST);
                res.render(Json(ErrorResponse {
                    error: "Invalid request body".to_string(),
                }));
                return;
            }
        };

        let input = registration_from_form(form);

        let photo_path = if input.photo.is_some() {
            let config = match get_config_from_depot(depot) {
                Ok(c) => c,
                Err(e) => {
                    error!(error = ?e, "Failed to get configuration");
                    res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
                    res.render(Json(ErrorResponse {
                        error: "Registration failed".to_string(),
                    }));
                    return;
                }
            };

            // Unwrap is safe per the is_some check above, but stay explicit.
            let Some(file) = form.files.get("photo") else {
                res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
                res.render(Json(ErrorResponse {
                    error: "Registration failed".to_string(),
                }));
                return;
            };

            match upload::store_file(Path::new(&config.storage.upload_dir), file).await {
                Ok(path) => Some(path),
                Err(e) => {
                    error!(error = ?e, "Failed to store registration photo");
                    res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
                    res.render(Json(ErrorResponse {
                        error: "Registration failed".to_string(),
                    }));
                    return;
                }
            }
        } else {
            None
        };

        (input, photo_path)
    } else {
        let register_req: RegisterRequest = match req.parse_json().await {
            Ok(r) => r,
            Err(e) => {
                error!(error = ?e, "Failed to parse registration request");
                res.status_code(StatusCode::BAD_REQUEST);
                res.render(Json(ErrorResponse {
                    error: "Invalid request body".to_string(),
                }));
                return;
            }
        };

        (register_req.into(), None)
    };

    let provider = match get_db_from_depot(depot) {
        Ok(p) => p,
        Err(e) => {
            error!(error = ?e, "Failed to get database provider");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse {
                error: "Registration failed".to_string(),
            }));
            return;
        }
    };

    let mut conn = match provider.get_connection().await {
        Ok(c) => c,
        Err(e) => {
            error!(error = ?e, "Failed to get database connection");
            res.status_code(StatusCode::SERVICE_UNAVAILABLE);
            res.render(Json(ErrorResponse {
                error: "Registration failed".to_string(),
            }));
            return;
        }
    };

    match auth::service::register(&mut conn, &input, photo_path).await {
        Ok(_) => {
            res.render(Json(MessageResponse {
                message: "User registered successfully!".to_string(),
            }));
        }
        Err(ServiceError::Validation(errors)) => {
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Json(ViolationsResponse { errors }));
        }
        Err(ServiceError::Conflict(message)) => {
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Json(ErrorResponse { error: message }));
        }
        Err(e) => {
            error!(error = ?e, "Failed to register user");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse {
                error: "Registration failed".to_string(),
            }));
        }
    }
}

/// ## Summary
/// POST /login - Verifies an email/password pair and returns the matching
/// user on success. No session or token is issued.
///
/// ## Errors
/// Returns HTTP 400 if no user matches or the credential is wrong
/// Returns HTTP 500 if database operations fail
#[handler]
async fn login_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    tracing::debug!("Processing login request");

    let login_req: LoginRequest = match req.parse_json().await {
        Ok(r) => r,
        Err(e) => {
            error!(error = ?e, "Failed to parse login request");
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Json(ErrorResponse {
                error: "Invalid request body".to_string(),
            }));
            return;
        }
    };

    let provider = match get_db_from_depot(depot) {
        Ok(p) => p,
        Err(e) => {
            error!(error = ?e, "Failed to get database provider");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse {
                error: "Login failed".to_string(),
            }));
            return;
        }
    };

    let mut conn = match provider.get_connection().await {
        Ok(c) => c,
        Err(e) => {
            error!(error = ?e, "Failed to get database connection");
            res.status_code(StatusCode::SERVICE_UNAVAILABLE);
            res.render(Json(ErrorResponse {
                error: "Login failed".to_string(),
            }));
            return;
        }
    };

    match auth::service::login(&mut conn, &login_req.email, &login_req.password).await {
        Ok(user) => {
            res.render(Json(LoginResponse {
                message: "Login successful".to_string(),
                user,
            }));
        }
        Err(ServiceError::NotFound(message)) => {
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Json(ErrorResponse { error: message }));
        }
        Err(ServiceError::InvalidCredential) => {
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Json(ErrorResponse {
                error: "Invalid credentials".to_string(),
            }));
        }
        Err(e) => {
            error!(error = ?e, "Failed to log user in");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse {
                error: "Login failed".to_string(),
            }));
        }
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::new()
        .push(Router::with_path("register").post(register_handler))
        .push(Router::with_path("login").post(login_handler))
}
