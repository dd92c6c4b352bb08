use sqlx::PgPool;

use crate::app_error::{AppError, StoreErrorKind};

pub mod waitlist;

#[derive(Clone)]
pub struct PostgresPersistence {
    pool: PgPool,
}

impl PostgresPersistence {
    pub fn new(pool: PgPool) -> Self {
        PostgresPersistence { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::RowNotFound => AppError::Store(StoreErrorKind::NoRows),
            sqlx::Error::Database(db_err) => match db_err.code().as_deref() {
                // PostgreSQL unique_violation
                Some("23505") => AppError::Store(StoreErrorKind::UniqueViolation),
                // PostgreSQL check_violation
                Some("23514") => AppError::Store(StoreErrorKind::CheckViolation),
                _ => {
                    // Log the actual error for debugging, but don't expose details
                    tracing::error!(error = ?err, "Database error");
                    AppError::Store(StoreErrorKind::Other)
                }
            },
            _ => {
                tracing::error!(error = ?err, "Database error");
                AppError::Store(StoreErrorKind::Other)
            }
        }
    }
}
