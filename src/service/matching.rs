//! Core patient matching service.
//!
//! Orchestrates cleaning, batched matching, and unverified-patient
//! creation against the local MPI.

use std::sync::Arc;

use crate::core::PatientRepository;
use crate::error::MpiResult;
use crate::types::{DemographicQuery, MatchCounts, MatchOutcome, MatchedQuery};

/// Resolves batches of demographic queries to internal patient ids.
///
/// Per-query outcomes are terminal: matched-single, matched-multiple, or
/// matched-zero-then-created. A searchable query never resolves to an
/// empty id list; only queries with no usable searchable field at all come
/// back empty (and are excluded even from creation). Ambiguity is
/// deliberately exposed: a multi-id result is a valid outcome, never
/// resolved heuristically here.
pub struct MatchingService {
    repository: Arc<dyn PatientRepository>,
}

impl MatchingService {
    /// Creates a service over the given repository.
    pub fn new(repository: Arc<dyn PatientRepository>) -> Self {
        Self { repository }
    }

    /// Finds potential matches for every query in the batch.
    ///
    /// Returns one decorated entry per input query, in input order, plus
    /// aggregate counts. A store failure aborts the whole batch; per-query
    /// insufficiency never does.
    pub async fn match_patients(&self, queries: Vec<DemographicQuery>) -> MpiResult<MatchOutcome> {
        if queries.is_empty() {
            return Ok(MatchOutcome {
                queries: Vec::new(),
                counts: MatchCounts::default(),
            });
        }

        // Validate and standardise the input; invalid fields become absent.
        let cleaned: Vec<DemographicQuery> = queries.iter().map(|q| q.cleaned()).collect();

        // Exclude queries which do not have sufficient data for searching.
        let searchable_indices: Vec<usize> = cleaned
            .iter()
            .enumerate()
            .filter(|(_, q)| q.is_searchable())
            .map(|(i, _)| i)
            .collect();
        tracing::debug!(
            "{} of {} queries have sufficient data for searching",
            searchable_indices.len(),
            queries.len()
        );

        let searchable: Vec<DemographicQuery> = searchable_indices
            .iter()
            .map(|&i| cleaned[i].clone())
            .collect();

        // One batched store round trip for the whole input.
        let matches = self.repository.find_patients(&searchable).await?;

        let mut patient_ids: Vec<Vec<i64>> = vec![Vec::new(); queries.len()];
        for (result, &query_index) in matches.iter().zip(&searchable_indices) {
            patient_ids[query_index] = result.patient_ids.clone();
        }

        // A searchable zero-match always resolves to exactly one newly
        // created unverified patient.
        let unmatched_indices: Vec<usize> = searchable_indices
            .iter()
            .copied()
            .filter(|&i| patient_ids[i].is_empty())
            .collect();
        if !unmatched_indices.is_empty() {
            tracing::debug!(
                "Creating unverified patients for {} unmatched queries",
                unmatched_indices.len()
            );
            let new_patients: Vec<_> = unmatched_indices
                .iter()
                .map(|&i| cleaned[i].to_new_patient())
                .collect();
            let new_ids = self.repository.save(&new_patients).await?;
            for (&query_index, id) in unmatched_indices.iter().zip(new_ids) {
                patient_ids[query_index] = vec![id];
            }
        }

        // Decorate the original (pre-clean) queries and aggregate counts.
        let mut counts = MatchCounts {
            total: queries.len(),
            ..Default::default()
        };
        let decorated: Vec<MatchedQuery> = queries
            .into_iter()
            .zip(patient_ids)
            .map(|(query, ids)| {
                match ids.len() {
                    0 => counts.zero += 1,
                    1 => counts.single += 1,
                    _ => counts.multiple += 1,
                }
                MatchedQuery {
                    query,
                    patient_ids: ids,
                }
            })
            .collect();

        Ok(MatchOutcome {
            queries: decorated,
            counts,
        })
    }
}
