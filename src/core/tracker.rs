//! The trace status tracker trait: the single owner of `trace_status`
//! table access.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::MpiResult;

/// Tracks which patients have been submitted for external verification.
///
/// The tracker provides idempotent-resubmission suppression only, not a
/// completion guarantee: a patient marked submitted is skipped by later
/// runs even if the submission never completes.
#[async_trait]
pub trait TraceStatusTracker: Send + Sync {
    /// Returns the subset of `patient_ids` with no trace status record.
    ///
    /// An empty input returns an empty vector without a store call.
    async fn find_untraced_patients(&self, patient_ids: &[i64]) -> MpiResult<Vec<i64>>;

    /// Records a submission for each patient id.
    ///
    /// An existing record for a patient id is left untouched, so the first
    /// recorded submission time wins.
    async fn mark_submitted(
        &self,
        patient_ids: &[i64],
        submitted_at: DateTime<Utc>,
    ) -> MpiResult<()>;

    /// Records trace completion for each patient id, stamping existing
    /// submission records. Used by the response path.
    async fn mark_completed(
        &self,
        patient_ids: &[i64],
        completed_at: DateTime<Utc>,
    ) -> MpiResult<()>;
}
