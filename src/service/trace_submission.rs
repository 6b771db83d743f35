//! Asynchronous trace-submission service.
//!
//! Selects unverified and untraced patients, builds the outbound MESH
//! batch, and records the submission so later runs skip those patients.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;

use crate::core::{PatientRepository, TraceStatusTracker};
use crate::error::MpiResult;
use crate::types::{MeshTraceRequest, PatientRecord, TraceSubmission};

/// Submits unverified, untraced patients for external demographic
/// confirmation.
///
/// Runs once per external timer trigger. There is no internal guard
/// against overlapping runs: "already traced" and "mark submitted" are
/// separate round trips, so a host that can trigger concurrent runs must
/// provide its own mutual exclusion to avoid duplicate submissions.
pub struct AsyncTraceSubmissionService {
    repository: Arc<dyn PatientRepository>,
    tracker: Arc<dyn TraceStatusTracker>,
}

impl AsyncTraceSubmissionService {
    /// Creates a service over the given repository and tracker.
    pub fn new(
        repository: Arc<dyn PatientRepository>,
        tracker: Arc<dyn TraceStatusTracker>,
    ) -> Self {
        Self {
            repository,
            tracker,
        }
    }

    /// Selects, batches, and records one round of trace submissions.
    ///
    /// Patients whose id appears more than once in the candidate set are
    /// dropped entirely (ambiguous source data), as are patients without
    /// enough fields for either trace form. The whole untraced set is
    /// marked submitted, including rows dropped by the sufficiency filter,
    /// so they are not reselected every run. Returns the ids actually
    /// included in the outbound batch, or an empty result (with no store
    /// mutation) when nothing qualifies.
    pub async fn submit(&self) -> MpiResult<TraceSubmission> {
        let unverified = self.repository.find_unverified_patients().await?;
        let unverified_ids: Vec<i64> = unverified.iter().map(|p| p.id).collect();
        let untraced_ids = self.tracker.find_untraced_patients(&unverified_ids).await?;

        let candidates = Self::find_unique_untraced_patients(&unverified, &untraced_ids);

        let traceable: Vec<&PatientRecord> = candidates
            .iter()
            .copied()
            .filter(|p| {
                if !p.is_traceable() {
                    tracing::warn!(
                        "Dropping patient {} from trace batch: insufficient fields for either trace form",
                        p.id
                    );
                    return false;
                }
                true
            })
            .collect();

        if traceable.is_empty() {
            return Ok(TraceSubmission::empty());
        }

        let batch: Vec<MeshTraceRequest> = traceable
            .iter()
            .map(|p| MeshTraceRequest::from_patient(p))
            .collect();
        let patient_ids: Vec<i64> = batch.iter().map(|r| r.unique_reference).collect();
        let submission_time = Utc::now();

        // Suppress reselection for the entire untraced set, not just the
        // rows that made it into the batch.
        self.tracker
            .mark_submitted(&untraced_ids, submission_time)
            .await?;

        tracing::info!(
            "Submitted trace batch of {} patients ({} untraced candidates marked)",
            patient_ids.len(),
            untraced_ids.len()
        );

        Ok(TraceSubmission {
            patient_ids,
            submission_time: Some(submission_time),
        })
    }

    /// Retains full records for unverified patients in the untraced set,
    /// dropping every record whose patient id occurs more than once.
    fn find_unique_untraced_patients<'a>(
        unverified: &'a [PatientRecord],
        untraced_ids: &[i64],
    ) -> Vec<&'a PatientRecord> {
        let mut occurrences: HashMap<i64, usize> = HashMap::new();
        let untraced: Vec<&PatientRecord> = unverified
            .iter()
            .filter(|p| untraced_ids.contains(&p.id))
            .inspect(|p| *occurrences.entry(p.id).or_insert(0) += 1)
            .collect();

        let mut duplicate_ids: Vec<i64> = occurrences
            .iter()
            .filter(|&(_, &count)| count > 1)
            .map(|(&id, _)| id)
            .collect();
        if !duplicate_ids.is_empty() {
            duplicate_ids.sort_unstable();
            tracing::warn!(
                "Dropping records with duplicate patient ids: {:?}",
                duplicate_ids
            );
        }

        untraced
            .into_iter()
            .filter(|p| occurrences[&p.id] == 1)
            .collect()
    }
}
