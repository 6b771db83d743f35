//! Master Patient Index (MPI) identity resolution.
//!
//! Given partial demographic data about a patient (NHS number, names, date
//! of birth, postcode, sex), this crate determines whether the patient
//! already exists in the longitudinal store, returns the matching internal
//! identifier(s), signals ambiguous or zero matches, and provisions a new
//! unverified record on zero match. It also drives the asynchronous
//! verification loop: selecting unverified, untraced patients, batching
//! them into an external PDS MESH trace request, and tracking submission
//! state to avoid resubmission.
//!
//! # Architecture
//!
//! - [`types`] - patient records, demographic queries, match results, and
//!   the outbound MESH batch record
//! - [`demographics`] - lenient bulk cleaning and strict single-record
//!   validation
//! - [`error`] - error types for all operations
//! - [`core`] - trait seams: [`PatientRepository`], [`TraceStatusTracker`],
//!   and the pluggable [`MatchingStrategy`]
//! - [`backends`] - the PostgreSQL implementations
//! - [`service`] - the matching, linking, and trace-submission entry points
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use mpi::backends::postgres::{
//!     PostgresConfig, PostgresPatientRepository, PostgresTraceStatusTracker, connect,
//! };
//! use mpi::service::{AsyncTraceSubmissionService, MatchingService};
//! use mpi::types::DemographicQuery;
//!
//! # async fn example() -> mpi::error::MpiResult<()> {
//! let config = PostgresConfig::from_env();
//! let pool = connect(&config).await?;
//!
//! let repository = Arc::new(PostgresPatientRepository::new(pool.clone(), &config));
//! let tracker = Arc::new(PostgresTraceStatusTracker::new(pool));
//!
//! // Resolve a batch of demographic queries to patient ids.
//! let matching = MatchingService::new(repository.clone());
//! let outcome = matching
//!     .match_patients(vec![DemographicQuery {
//!         nhs_number: Some("9434765919".to_string()),
//!         date_of_birth: chrono::NaiveDate::from_ymd_opt(1980, 5, 15),
//!         ..Default::default()
//!     }])
//!     .await?;
//! assert_eq!(outcome.queries.len(), 1);
//!
//! // Independently, on a timer: submit unverified patients for tracing.
//! let submission = AsyncTraceSubmissionService::new(repository, tracker);
//! let result = submission.submit().await?;
//! println!("submitted {} patients", result.patient_ids.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Matching semantics
//!
//! "No match" and "ambiguous match" are valid outcomes, never errors. A
//! searchable query that matches nothing resolves to exactly one newly
//! created unverified patient. Queries without enough data to search are
//! counted as `zero` and excluded even from creation; they never fail the
//! batch.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod backends;
pub mod core;
pub mod demographics;
pub mod error;
pub mod service;
pub mod types;

// Re-export commonly used types at crate root
pub use crate::core::{MatchingStrategy, PatientRepository, TraceStatusTracker};
pub use crate::error::{MpiError, MpiResult};
pub use crate::service::{AsyncTraceSubmissionService, LinkageService, MatchingService};
pub use crate::types::{DemographicQuery, MatchOutcome, PatientRecord, TraceSubmission};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
