//! The patient repository trait: the single owner of `patient` table
//! access.

use async_trait::async_trait;

use crate::error::MpiResult;
use crate::types::{DemographicQuery, MatchResult, NewPatient, PatientRecord};

use super::MatchingStrategy;

/// Owns all access to the patient store.
///
/// Matching is delegated to a [`MatchingStrategy`]; `find_patients` uses
/// the repository's default strategy (SQL exact match in production) and
/// `find_patients_with` accepts an override.
#[async_trait]
pub trait PatientRepository: Send + Sync {
    /// Inserts new unverified patient records and returns their assigned
    /// ids in insertion order.
    ///
    /// Inserts happen in fixed-size batches to bound payload size, but the
    /// whole call is one transaction: all rows or none. `verified` is
    /// always stored as false and both timestamps are set by the store.
    /// Empty input is a no-op returning an empty vector.
    async fn save(&self, patients: &[NewPatient]) -> MpiResult<Vec<i64>>;

    /// Finds matches for a batch of cleaned queries using the default
    /// strategy.
    ///
    /// Returns one result per query, in input order. An empty batch
    /// returns immediately without a store call.
    async fn find_patients(&self, queries: &[DemographicQuery]) -> MpiResult<Vec<MatchResult>>;

    /// Finds matches using the supplied strategy instead of the default.
    async fn find_patients_with(
        &self,
        queries: &[DemographicQuery],
        strategy: &dyn MatchingStrategy,
    ) -> MpiResult<Vec<MatchResult>>;

    /// Returns the full projection of every unverified patient.
    async fn find_unverified_patients(&self) -> MpiResult<Vec<PatientRecord>>;
}
