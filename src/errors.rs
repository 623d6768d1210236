//! Unified error types and result handling for the budget tracker.
//!
//! Errors fall into three families: validation failures (bad form input),
//! lookup failures (a referenced entity does not resolve), and dependency
//! failures (database or remote spreadsheet). All errors are surfaced to the
//! immediate caller; nothing in this crate retries.

use thiserror::Error;

/// Crate-wide error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or out-of-range input to a core operation.
    #[error("Validation error: {message}")]
    Validation {
        /// Human-readable description suitable for display
        message: String,
    },

    /// A referenced project identifier does not resolve.
    #[error("Project not found: {id}")]
    ProjectNotFound {
        /// The identifier that failed to resolve
        id: i64,
    },

    /// A referenced unit identifier does not resolve, or the unit belongs
    /// to a different project than the one named in the request.
    #[error("Unit not found: {id}")]
    UnitNotFound {
        /// The identifier that failed to resolve
        id: i64,
    },

    /// A referenced partner identifier does not resolve, or the partner
    /// belongs to a different project than the one named in the request.
    #[error("Partner not found: {id}")]
    PartnerNotFound {
        /// The identifier that failed to resolve
        id: i64,
    },

    /// A referenced purchase identifier does not resolve.
    #[error("Purchase not found: {id}")]
    PurchaseNotFound {
        /// The identifier that failed to resolve
        id: i64,
    },

    /// Configuration file or environment problem.
    #[error("Configuration error: {message}")]
    Config {
        /// What went wrong while loading configuration
        message: String,
    },

    /// Underlying database failure.
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// The remote spreadsheet target rejected or failed a push.
    #[error("Spreadsheet sync error: {message}")]
    Sync {
        /// Failure description reported by the writer
        message: String,
    },

    /// I/O error reading configuration or local files.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for building a [`Error::Validation`] from anything
    /// displayable.
    pub fn validation(message: impl Into<String>) -> Self {
        Error::Validation {
            message: message.into(),
        }
    }
}

/// Convenience `Result` type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
