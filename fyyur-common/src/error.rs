//! Common error types for Fyyur

use thiserror::Error;

/// Common result type for Fyyur operations
pub type Result<T> = std::result::Result<T, Error>;

/// Common error types across the Fyyur crates
#[derive(Error, Debug)]
pub enum Error {
    /// Database operation error (wraps sqlx::Error)
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// I/O operation error (wraps std::io::Error)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration loading or validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Requested resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid user input or request parameter
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// True when the database rejected a write because of a constraint
    /// (NOT NULL, UNIQUE/PRIMARY KEY, FOREIGN KEY, CHECK).
    pub fn is_constraint_violation(&self) -> bool {
        match self {
            Error::Database(sqlx::Error::Database(db_err)) => !matches!(
                db_err.kind(),
                sqlx::error::ErrorKind::Other
            ),
            _ => false,
        }
    }
}
