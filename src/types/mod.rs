//! Core data types for patient records, match results, and trace status.

mod matching;
mod patient;
mod trace;

pub use matching::{MatchCounts, MatchOutcome, MatchResult, MatchedQuery};
pub use patient::{DemographicQuery, NewPatient, PatientRecord};
pub use trace::{MeshTraceRequest, TraceStatusRecord, TraceSubmission};
