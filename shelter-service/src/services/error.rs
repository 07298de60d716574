use service_core::error::AppError;
use thiserror::Error;

/// Failures of a single repository call against the store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Database connection error: {0}")]
    Connection(#[source] sqlx::Error),

    #[error("{0}")]
    Query(#[source] sqlx::Error),
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::DatabaseError(anyhow::Error::new(err))
    }
}
