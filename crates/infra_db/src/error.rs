//! Database error types
//!
//! This module defines the error types that can occur during database operations,
//! mapping PostgreSQL failures onto meaningful variants.

use thiserror::Error;

/// Errors that can occur during database operations
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to establish a database connection
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Entity not found in database
    #[error("Entity not found: {0}")]
    NotFound(String),

    /// Unique constraint violation
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    /// Check constraint violation
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Migration error
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Stored data could not be decoded into domain values
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Pool exhaustion - no available connections
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Generic SQL error
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Creates a not found error for a specific entity type and identifier
    ///
    /// # Example
    ///
    /// ```rust
    /// use infra_db::DatabaseError;
    ///
    /// let error = DatabaseError::not_found("Booking", "BK-123");
    /// assert!(error.to_string().contains("BK-123"));
    /// ```
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        DatabaseError::NotFound(format!("{} with id '{}' not found", entity, id))
    }

    /// Creates a duplicate entry error
    pub fn duplicate(entity: &str, field: &str, value: impl std::fmt::Display) -> Self {
        DatabaseError::DuplicateEntry(format!(
            "{} with {} '{}' already exists",
            entity, field, value
        ))
    }

    /// Checks if this error indicates a record was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, DatabaseError::NotFound(_))
    }

    /// Checks if this error is a unique constraint violation
    pub fn is_duplicate(&self) -> bool {
        matches!(self, DatabaseError::DuplicateEntry(_))
    }

    /// Checks if this error is a connection-related issue
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            DatabaseError::ConnectionFailed(_) | DatabaseError::PoolExhausted
        )
    }
}

/// Converts SQLx errors to more specific DatabaseError variants
///
/// Database errors are classified by PostgreSQL SQLSTATE code.
impl From<&sqlx::Error> for DatabaseError {
    fn from(error: &sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => {
                DatabaseError::NotFound("Record not found".to_string())
            }
            sqlx::Error::PoolTimedOut => DatabaseError::PoolExhausted,
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                DatabaseError::SerializationError(error.to_string())
            }
            sqlx::Error::Database(db_err) => {
                // https://www.postgresql.org/docs/current/errcodes-appendix.html
                match db_err.code().as_deref() {
                    Some("23505") => DatabaseError::DuplicateEntry(db_err.message().to_string()),
                    Some("23514") => {
                        DatabaseError::ConstraintViolation(db_err.message().to_string())
                    }
                    _ => DatabaseError::QueryFailed(db_err.message().to_string()),
                }
            }
            _ => DatabaseError::QueryFailed(error.to_string()),
        }
    }
}
