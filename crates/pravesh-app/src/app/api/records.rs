use std::path::Path;

use salvo::http::StatusCode;
use salvo::http::form::FormData;
use salvo::writing::{Json, Text};
use salvo::{Depot, Request, Response, Router, handler};
use tracing::error;

use pravesh_core::constants::EXPORT_FILE_NAME;
use pravesh_core::form::state::FormPatch;
use pravesh_service::error::ServiceError;
use pravesh_service::{export, record, upload};

use super::{ErrorResponse, ViolationsResponse};
use crate::config::get_config_from_depot;
use crate::db_handler::get_db_from_depot;

const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// Builds a field patch from a multipart submission: every recognized text
/// field plus the stored paths of any uploaded attachments. Unknown field
/// names are ignored rather than rejected.
async fn patch_from_form(
    upload_dir: &Path,
    form: &FormData,
) -> Result<FormPatch, ServiceError> {
    let mut patch = FormPatch::default();

    for (name, value) in form.fields.iter() {
        patch.set_wire(name, value.clone());
    }

    for (field, path) in upload::store_attachments(upload_dir, form).await? {
        patch.set_attachment(field, path);
    }

    Ok(patch)
}

/// ## Summary
/// GET /records - Every stored record in insertion order.
///
/// ## Errors
/// Returns HTTP 500 if the store is unreachable.
#[handler]
async fn list_handler(depot: &mut Depot, res: &mut Response) {
    let provider = match get_db_from_depot(depot) {
        Ok(p) => p,
        Err(e) => {
            error!(error = ?e, "Failed to get database provider");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse {
                error: "Error fetching records".to_string(),
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
                error: "Error fetching records".to_string(),
            }));
            return;
        }
    };

    match record::list(&mut conn).await {
        Ok(records) => {
            res.render(Json(records));
        }
        Err(e) => {
            error!(error = ?e, "Failed to fetch records");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse {
                error: "Error fetching records".to_string(),
            }));
        }
    }
}

/// ## Summary
/// POST /submit - Accepts a multipart admission form, stores the uploaded
/// attachments, and creates a record from the submitted fields.
///
/// ## Side Effects
/// - Writes uploaded files into the blob directory
/// - Inserts a record row
///
/// ## Errors
/// Returns HTTP 400 with the full violations map when validation fails
/// Returns HTTP 500 if storage operations fail
#[handler]
async fn submit_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let form = match req.form_data().await {
        Ok(f) => f,
        Err(e) => {
            error!(error = ?e, "Failed to parse submission form");
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Json(ErrorResponse {
                error: "Invalid form data".to_string(),
            }));
            return;
        }
    };

    let config = match get_config_from_depot(depot) {
        Ok(c) => c,
        Err(e) => {
            error!(error = ?e, "Failed to get configuration");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse {
                error: "Error submitting record".to_string(),
            }));
            return;
        }
    };

    let patch = match patch_from_form(Path::new(&config.storage.upload_dir), form).await {
        Ok(p) => p,
        Err(e) => {
            error!(error = ?e, "Failed to store attachments");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse {
                error: "Error submitting record".to_string(),
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
                error: "Error submitting record".to_string(),
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
                error: "Error submitting record".to_string(),
            }));
            return;
        }
    };

    match record::create(&mut conn, &patch).await {
        Ok(_) => {
            res.render(Text::Plain("Record added successfully!"));
        }
        Err(ServiceError::Validation(errors)) => {
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Json(ViolationsResponse { errors }));
        }
        Err(e) => {
            error!(error = ?e, "Failed to create record");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse {
                error: "Error submitting record".to_string(),
            }));
        }
    }
}

/// ## Summary
/// PUT /update/{id} - Merges a partial multipart form over an existing
/// record. Fields absent from the submission keep their stored values.
///
/// ## Errors
/// Returns HTTP 404 if the id does not parse or no record matches
/// Returns HTTP 400 with the violations map if the merged record is invalid
/// Returns HTTP 500 if storage operations fail
#[handler]
async fn update_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(id) = req
        .param::<String>("id")
        .and_then(|raw| uuid::Uuid::parse_str(&raw).ok())
    else {
        res.status_code(StatusCode::NOT_FOUND);
        res.render(Json(ErrorResponse {
            error: "Record not found!".to_string(),
        }));
        return;
    };

    let form = match req.form_data().await {
        Ok(f) => f,
        Err(e) => {
            error!(error = ?e, "Failed to parse update form");
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Json(ErrorResponse {
                error: "Invalid form data".to_string(),
            }));
            return;
        }
    };

    let config = match get_config_from_depot(depot) {
        Ok(c) => c,
        Err(e) => {
            error!(error = ?e, "Failed to get configuration");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse {
                error: "Error updating record".to_string(),
            }));
            return;
        }
    };

    let patch = match patch_from_form(Path::new(&config.storage.upload_dir), form).await {
        Ok(p) => p,
        Err(e) => {
            error!(error = ?e, "Failed to store attachments");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse {
                error: "Error updating record".to_string(),
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
                error: "Error updating record".to_string(),
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
                error: "Error updating record".to_string(),
            }));
            return;
        }
    };

    match record::update(&mut conn, id, &patch).await {
        Ok(_) => {
            res.render(Text::Plain("Record updated successfully!"));
        }
        Err(ServiceError::NotFound(_)) => {
            res.status_code(StatusCode::NOT_FOUND);
            res.render(Json(ErrorResponse {
                error: "Record not found!".to_string(),
            }));
        }
        Err(ServiceError::Validation(errors)) => {
            res.status_code(StatusCode::BAD_REQUEST);
            res.render(Json(ViolationsResponse { errors }));
        }
        Err(e) => {
            error!(error = ?e, "Failed to update record");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse {
                error: "Error updating record".to_string(),
            }));
        }
    }
}

/// ## Summary
/// DELETE /delete/{id} - Removes a record permanently.
///
/// ## Errors
/// Returns HTTP 404 if the id does not parse or no record matches
/// Returns HTTP 500 if the delete fails
#[handler]
async fn delete_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let Some(id) = req
        .param::<String>("id")
        .and_then(|raw| uuid::Uuid::parse_str(&raw).ok())
    else {
        res.status_code(StatusCode::NOT_FOUND);
        res.render(Json(ErrorResponse {
            error: "Record not found!".to_string(),
        }));
        return;
    };

    let provider = match get_db_from_depot(depot) {
        Ok(p) => p,
        Err(e) => {
            error!(error = ?e, "Failed to get database provider");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse {
                error: "Error deleting record".to_string(),
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
                error: "Error deleting record".to_string(),
            }));
            return;
        }
    };

    match record::delete(&mut conn, id).await {
        Ok(()) => {
            res.render(Text::Plain("Record deleted successfully!"));
        }
        Err(ServiceError::NotFound(_)) => {
            res.status_code(StatusCode::NOT_FOUND);
            res.render(Json(ErrorResponse {
                error: "Record not found!".to_string(),
            }));
        }
        Err(e) => {
            error!(error = ?e, "Failed to delete record");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse {
                error: "Error deleting record".to_string(),
            }));
        }
    }
}

/// ## Summary
/// GET /export - Streams every record as an xlsx workbook download.
///
/// ## Errors
/// Returns HTTP 500 if the workbook cannot be built or written.
#[handler]
async fn export_handler(depot: &mut Depot, res: &mut Response) {
    let provider = match get_db_from_depot(depot) {
        Ok(p) => p,
        Err(e) => {
            error!(error = ?e, "Failed to get database provider");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse {
                error: "Error exporting records".to_string(),
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
                error: "Error exporting records".to_string(),
            }));
            return;
        }
    };

    let records = match record::list(&mut conn).await {
        Ok(r) => r,
        Err(e) => {
            error!(error = ?e, "Failed to fetch records for export");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse {
                error: "Error exporting records".to_string(),
            }));
            return;
        }
    };

    let buffer = match export::export_workbook(&records) {
        Ok(b) => b,
        Err(e) => {
            error!(error = ?e, "Failed to build export workbook");
            res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
            res.render(Json(ErrorResponse {
                error: "Error exporting records".to_string(),
            }));
            return;
        }
    };

    let disposition = format!("attachment; filename=\"{EXPORT_FILE_NAME}\"");

    if let Err(e) = res
        .add_header("Content-Type", XLSX_CONTENT_TYPE, true)
        .and_then(|res| res.add_header("Content-Disposition", disposition, true))
        .and_then(|res| res.write_body(buffer))
    {
        error!(error = ?e, "Failed to write export response");
        res.status_code(StatusCode::INTERNAL_SERVER_ERROR);
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::new()
        .push(Router::with_path("records").get(list_handler))
        .push(Router::with_path("submit").post(submit_handler))
        .push(Router::with_path("update/{id}").put(update_handler))
        .push(Router::with_path("delete/{id}").delete(delete_handler))
        .push(Router::with_path("export").get(export_handler))
}
