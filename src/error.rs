//! Error types for the MPI subsystem.
//!
//! Follows a two-level hierarchy: validation errors (strict linking path,
//! fail fast per input) and backend errors (store/connectivity, fatal to the
//! whole batch or run). Data-quality anomalies are not errors; they are
//! logged and skipped by the services.

// Error enum variant fields are self-documenting via their #[error(...)] messages
#![allow(missing_docs)]

use chrono::NaiveDate;
use thiserror::Error;

/// The primary error type for all MPI operations.
#[derive(Error, Debug)]
pub enum MpiError {
    /// Demographic validation errors (strict linking path).
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Store and connectivity errors.
    #[error(transparent)]
    Backend(#[from] BackendError),
}

/// Errors raised by the strict demographic validator.
///
/// The lenient bulk cleaner never raises these; it nulls invalid fields
/// instead so one bad record cannot fail a whole batch.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// The NHS number is not a valid 10-digit modulus-11 identifier.
    #[error("invalid NHS number format: {value}")]
    InvalidNhsNumber { value: String },

    /// The postcode does not match the canonical UK outward+inward shape.
    #[error("invalid UK postcode format: {value}")]
    InvalidPostcode { value: String },

    /// A name field was supplied but is empty or whitespace.
    #[error("{field} cannot be empty or whitespace")]
    EmptyName { field: &'static str },

    /// The date of birth is in the future.
    #[error("date of birth cannot be in the future: {value}")]
    DateOfBirthInFuture { value: NaiveDate },

    /// The record does not meet the minimum-information threshold.
    #[error(
        "insufficient data for patient linking: required (nhs_number + date_of_birth) \
         OR (given_name + family_name + sex + postcode + date_of_birth)"
    )]
    InsufficientDemographics,
}

/// Errors originating from the patient store.
#[derive(Error, Debug)]
pub enum BackendError {
    /// Connection to the store failed.
    #[error("connection failed to {backend_name}: {message}")]
    ConnectionFailed {
        backend_name: String,
        message: String,
    },

    /// Connection pool exhausted.
    #[error("connection pool exhausted for {backend_name}")]
    PoolExhausted { backend_name: String },

    /// Query execution error.
    #[error("query execution failed: {message}")]
    QueryError { message: String },

    /// Schema migration error.
    #[error("schema migration failed: {message}")]
    MigrationError { message: String },

    /// Internal backend error.
    #[error("internal error in {backend_name}: {message}")]
    Internal {
        backend_name: String,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

/// Result type alias for MPI operations.
pub type MpiResult<T> = Result<T, MpiError>;

impl From<tokio_postgres::Error> for MpiError {
    fn from(err: tokio_postgres::Error) -> Self {
        MpiError::Backend(BackendError::Internal {
            backend_name: "postgres".to_string(),
            message: err.to_string(),
            source: Some(Box::new(err)),
        })
    }
}
