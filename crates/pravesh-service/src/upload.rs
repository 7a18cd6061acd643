//! Upload handler: multipart file parts → stored blob paths.
//!
//! Only the four known attachment field names are considered; the result is
//! an explicit field-name-to-path table the caller merges into the record
//! patch. Writes are independent per file: a failure is surfaced as a
//! single error and already-written files are not rolled back.

use std::collections::BTreeMap;
use std::path::Path;

use chrono::Utc;
use salvo::http::form::{FilePart, FormData};

use pravesh_core::constants::ATTACHMENT_FIELDS;

use crate::error::{ServiceError, ServiceResult};

/// ## Summary
/// Stores every recognized attachment part of a multipart submission and
/// returns wire field name → stored path.
///
/// ## Errors
/// Returns `Upload` if any file write fails.
pub async fn store_attachments(
    upload_dir: &Path,
    form: &FormData,
) -> ServiceResult<BTreeMap<&'static str, String>> {
    let mut stored = BTreeMap::new();

    for field in ATTACHMENT_FIELDS {
        if let Some(file) = form.files.get(*field) {
            let path = store_file(upload_dir, file).await?;
            tracing::debug!(field, path = %path, "Stored attachment");
            stored.insert(*field, path);
        }
    }

    Ok(stored)
}

/// ## Summary
/// Writes a single uploaded part into the blob directory under a
/// collision-resistant `{unix_millis}-{original_name}` file name and
/// returns the stored path.
///
/// ## Errors
/// Returns `Upload` if the write fails.
pub async fn store_file(upload_dir: &Path, file: &FilePart) -> ServiceResult<String> {
    let name = storage_file_name(Utc::now().timestamp_millis(), file.name());
    let dest = upload_dir.join(&name);

    tokio::fs::copy(file.path(), &dest)
        .await
        .map_err(|e| ServiceError::Upload(format!("failed to store {name}: {e}")))?;

    Ok(dest.to_string_lossy().into_owned())
}

fn storage_file_name(millis: i64, original: Option<&str>) -> String {
    // Strip any client-supplied directory components.
    let original = original
        .and_then(|n| Path::new(n).file_name())
        .and_then(|n| n.to_str())
        .unwrap_or("upload");
    format!("{millis}-{original}")
}
