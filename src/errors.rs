//! Unified error type for `FinGoal`.
//!
//! Every fallible operation in the crate returns [`Result`]. Conditions the client
//! treats as non-fatal (malformed stored objective, failed milestone generation,
//! empty form fields) are handled where they occur and never reach this type.

use thiserror::Error;

/// All errors surfaced by the library and the command-line front end.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config {
        /// Human-readable description of the problem
        message: String,
    },

    /// Database operation failed
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    /// Filesystem access failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Writing rendered text failed
    #[error("Formatting error: {0}")]
    Format(#[from] std::fmt::Error),

    /// JSON encoding or decoding failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request to an external service failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// An external service answered with something unusable
    #[error("Service error: {message}")]
    Service {
        /// What went wrong with the response
        message: String,
    },

    /// Monetary amount is zero, negative or not finite where that is not allowed
    #[error("Invalid amount: {amount}")]
    InvalidAmount {
        /// The rejected amount
        amount: f64,
    },

    /// Currency code outside BRL, USD and EUR
    #[error("Unsupported currency: {code}")]
    UnsupportedCurrency {
        /// The rejected code
        code: String,
    },

    /// A record failed validation before reaching the backend
    #[error("Validation error: {message}")]
    Validation {
        /// Which rule was violated
        message: String,
    },

    /// Objective lookup failed
    #[error("Objective not found: {id}")]
    ObjectiveNotFound {
        /// Identifier that was looked up
        id: String,
    },

    /// Milestone, transaction or document lookup failed
    #[error("{kind} not found: {id}")]
    RecordNotFound {
        /// Record kind ("Milestone", "Transaction", "Document")
        kind: &'static str,
        /// Identifier that was looked up
        id: String,
    },

    /// The authenticator rejected the credentials
    #[error("Invalid credentials")]
    CredentialsRejected,

    /// The operation requires a logged-in user
    #[error("Not logged in")]
    NotLoggedIn,

    /// The operation requires an active objective
    #[error("No objective selected")]
    NoObjectiveSelected,
}

/// Convenience `Result` type
pub type Result<T> = std::result::Result<T, Error>;
