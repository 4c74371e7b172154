//! Error types for the care-task engine.

use std::path::PathBuf;

use thiserror::Error;

/// Comprehensive error type for all engine operations.
#[derive(Error, Debug)]
pub enum CareError {
    /// Database connection or query errors
    #[error("Database error: {message}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// No plant in the user's collection carries the given ID
    #[error("Plant with ID {id} not found")]
    PlantNotFound { id: String },
    /// The plant exists but has no task with the given ID
    #[error("Task with ID {id} not found on plant {plant_id}")]
    TaskNotFound { plant_id: String, id: String },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// Calendar arithmetic left the supported date range
    #[error("Date arithmetic error: {source}")]
    DateArithmetic {
        #[from]
        source: jiff::Error,
    },
    /// The stored collection changed between read and write
    #[error("Stale write rejected: expected collection version {expected}, found {found}")]
    StaleWrite { expected: u64, found: u64 },
    /// A blocking storage call panicked or was cancelled
    #[error("Background task failed: {source}")]
    Join {
        #[from]
        source: tokio::task::JoinError,
    },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> CareError {
        CareError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> CareError {
        CareError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl CareError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| CareError::database(message).with_source(e))
    }
}

/// Result type alias for engine operations
pub type Result<T> = std::result::Result<T, CareError>;
