use thiserror::Error;

use pravesh_core::form::validate::Violations;

/// Service layer errors - the operation-level taxonomy.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Field-level violations, returned wholesale so the client can show
    /// every problem at once.
    #[error("Validation failed for {} field(s)", .0.len())]
    Validation(Violations),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid credentials")]
    InvalidCredential,

    #[error("Upload error: {0}")]
    Upload(String),

    #[error("Export error: {0}")]
    Export(#[from] rust_xlsxwriter::XlsxError),

    #[error("Password hash error: {0}")]
    PasswordHash(String),

    #[error(transparent)]
    Storage(#[from] pravesh_db::error::DbError),

    #[error(transparent)]
    Core(#[from] pravesh_core::error::CoreError),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;
