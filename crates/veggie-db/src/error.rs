//! # Database Error Types
//!
//! Errors produced by the persistence layer. Constraint violations coming
//! back from PostgreSQL are mapped to specific variants so the HTTP layer can
//! turn them into the right status codes (unique violation becomes 409,
//! missing rows become 404, and so on).

use thiserror::Error;
use veggie_core::CoreError;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Could not establish a connection to PostgreSQL.
    #[error("Database connection failed: {0}")]
    ConnectionFailed(String),

    /// Schema migration failed at startup.
    #[error("Migration failed: {0}")]
    MigrationFailed(#[from] sqlx::migrate::MigrateError),

    /// Row lookup came up empty.
    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: i64 },

    /// UNIQUE constraint violation (duplicate username, bill number, mobile).
    #[error("Duplicate value for {constraint}")]
    UniqueViolation { constraint: String },

    /// A referenced row does not exist.
    #[error("Referenced row does not exist: {0}")]
    ForeignKeyViolation(String),

    /// CHECK constraint violation (e.g. stock driven negative).
    #[error("Constraint violated: {0}")]
    CheckViolation(String),

    /// Business rule violation surfaced from inside a transaction.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Any other query failure.
    #[error("Query failed: {0}")]
    Query(sqlx::Error),
}

impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match &err {
            sqlx::Error::Database(db_err) => {
                let constraint = db_err.constraint().unwrap_or("unknown").to_string();
                match db_err.kind() {
                    sqlx::error::ErrorKind::UniqueViolation => {
                        DbError::UniqueViolation { constraint }
                    }
                    sqlx::error::ErrorKind::ForeignKeyViolation => {
                        DbError::ForeignKeyViolation(constraint)
                    }
                    sqlx::error::ErrorKind::CheckViolation => DbError::CheckViolation(constraint),
                    _ => DbError::Query(err),
                }
            }
            _ => DbError::Query(err),
        }
    }
}

/// Convenience type alias for Results with DbError.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = DbError::NotFound {
            entity: "inventory",
            id: 7,
        };
        assert_eq!(err.to_string(), "inventory not found: 7");
    }

    #[test]
    fn test_core_error_passes_through_transparently() {
        let err: DbError = CoreError::InvalidItem { vegetable_id: 3 }.into();
        assert_eq!(err.to_string(), "Vegetable ID 3 not in inventory");
    }
}
