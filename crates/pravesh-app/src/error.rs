use thiserror::Error;

/// Application layer errors - everything a handler can surface.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    CoreError(#[from] pravesh_core::error::CoreError),

    #[error(transparent)]
    DatabaseError(#[from] pravesh_db::error::DbError),

    #[error(transparent)]
    ServiceError(#[from] pravesh_service::error::ServiceError),
}

pub type AppResult<T> = std::result::Result<T, AppError>;
