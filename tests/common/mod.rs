//! In-memory test doubles for the repository and tracker seams.
//!
//! These mirror the store semantics closely enough for service-level
//! testing: exact matching ANDs per-field equality against verified
//! patients with absent query fields as "don't care", and the tracker
//! suppresses resubmission of any id it has seen.

// Not every test binary exercises every helper.
#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};

use mpi::core::{MatchingStrategy, PatientRepository, TraceStatusTracker};
use mpi::error::MpiResult;
use mpi::types::{DemographicQuery, MatchResult, NewPatient, PatientRecord};

/// An in-memory patient store implementing [`PatientRepository`].
#[derive(Default)]
pub struct InMemoryRepository {
    patients: Mutex<Vec<PatientRecord>>,
    next_id: AtomicI64,
    /// Every batch passed to `save`, in call order.
    pub save_calls: Mutex<Vec<Vec<NewPatient>>>,
    /// Number of `find_patients` calls that reached the store.
    pub find_calls: AtomicUsize,
}

impl InMemoryRepository {
    pub fn new() -> Self {
        Self {
            next_id: AtomicI64::new(1),
            ..Default::default()
        }
    }

    /// Seeds a patient with the next free id and returns it.
    pub fn seed(&self, fields: NewPatient, verified: bool) -> i64 {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        self.patients.lock().unwrap().push(PatientRecord {
            id,
            nhs_number: fields.nhs_number,
            given_name: fields.given_name,
            family_name: fields.family_name,
            date_of_birth: fields.date_of_birth,
            postcode: fields.postcode,
            sex: fields.sex,
            verified,
            created_at: now,
            updated_at: now,
        });
        id
    }

    /// Pushes a pre-built record verbatim, duplicate ids included.
    pub fn push_raw(&self, record: PatientRecord) {
        self.patients.lock().unwrap().push(record);
    }

    /// Snapshot of the stored patients.
    pub fn stored(&self) -> Vec<PatientRecord> {
        self.patients.lock().unwrap().clone()
    }

    /// Flips the verified flag on one patient.
    pub fn set_verified(&self, id: i64, verified: bool) {
        for patient in self.patients.lock().unwrap().iter_mut() {
            if patient.id == id {
                patient.verified = verified;
            }
        }
    }

    fn matches(patient: &PatientRecord, query: &DemographicQuery) -> bool {
        fn field_matches<T: PartialEq>(stored: &Option<T>, queried: &Option<T>) -> bool {
            match queried {
                None => true,
                Some(value) => stored.as_ref() == Some(value),
            }
        }

        patient.verified
            && field_matches(&patient.nhs_number, &query.nhs_number)
            && field_matches(&patient.date_of_birth, &query.date_of_birth)
            && field_matches(&patient.postcode, &query.postcode)
            && field_matches(&patient.given_name, &query.given_name)
            && field_matches(&patient.family_name, &query.family_name)
            && field_matches(&patient.sex, &query.sex)
    }
}

#[async_trait]
impl PatientRepository for InMemoryRepository {
    async fn save(&self, patients: &[NewPatient]) -> MpiResult<Vec<i64>> {
        self.save_calls.lock().unwrap().push(patients.to_vec());
        Ok(patients
            .iter()
            .map(|fields| self.seed(fields.clone(), false))
            .collect())
    }

    async fn find_patients(&self, queries: &[DemographicQuery]) -> MpiResult<Vec<MatchResult>> {
        if queries.is_empty() {
            return Ok(Vec::new());
        }
        self.find_calls.fetch_add(1, Ordering::SeqCst);

        let patients = self.patients.lock().unwrap();
        Ok(queries
            .iter()
            .enumerate()
            .map(|(query_index, query)| {
                let mut patient_ids: Vec<i64> = patients
                    .iter()
                    .filter(|p| Self::matches(p, query))
                    .map(|p| p.id)
                    .collect();
                patient_ids.sort_unstable();
                MatchResult {
                    query_index,
                    patient_ids,
                }
            })
            .collect())
    }

    async fn find_patients_with(
        &self,
        queries: &[DemographicQuery],
        strategy: &dyn MatchingStrategy,
    ) -> MpiResult<Vec<MatchResult>> {
        if queries.is_empty() {
            return Ok(Vec::new());
        }
        strategy.find_matches(queries).await
    }

    async fn find_unverified_patients(&self) -> MpiResult<Vec<PatientRecord>> {
        Ok(self
            .patients
            .lock()
            .unwrap()
            .iter()
            .filter(|p| !p.verified)
            .cloned()
            .collect())
    }
}

/// An in-memory [`TraceStatusTracker`] recording every `mark_submitted`
/// call.
#[derive(Default)]
pub struct InMemoryTracker {
    traced: Mutex<HashSet<i64>>,
    /// Every `(ids, submitted_at)` pair passed to `mark_submitted`.
    pub submitted_calls: Mutex<Vec<(Vec<i64>, DateTime<Utc>)>>,
    /// Every `(ids, completed_at)` pair passed to `mark_completed`.
    pub completed_calls: Mutex<Vec<(Vec<i64>, DateTime<Utc>)>>,
}

impl InMemoryTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds existing trace status rows.
    pub fn seed_traced(&self, ids: &[i64]) {
        self.traced.lock().unwrap().extend(ids.iter().copied());
    }
}

#[async_trait]
impl TraceStatusTracker for InMemoryTracker {
    async fn find_untraced_patients(&self, patient_ids: &[i64]) -> MpiResult<Vec<i64>> {
        if patient_ids.is_empty() {
            return Ok(Vec::new());
        }
        let traced = self.traced.lock().unwrap();
        let mut seen = HashSet::new();
        Ok(patient_ids
            .iter()
            .copied()
            .filter(|id| !traced.contains(id) && seen.insert(*id))
            .collect())
    }

    async fn mark_submitted(
        &self,
        patient_ids: &[i64],
        submitted_at: DateTime<Utc>,
    ) -> MpiResult<()> {
        self.submitted_calls
            .lock()
            .unwrap()
            .push((patient_ids.to_vec(), submitted_at));
        self.traced.lock().unwrap().extend(patient_ids.iter().copied());
        Ok(())
    }

    async fn mark_completed(
        &self,
        patient_ids: &[i64],
        completed_at: DateTime<Utc>,
    ) -> MpiResult<()> {
        self.completed_calls
            .lock()
            .unwrap()
            .push((patient_ids.to_vec(), completed_at));
        Ok(())
    }
}

/// A fully populated set of demographic fields for one synthetic patient.
pub fn full_fields(nhs_number: &str, given: &str, family: &str) -> NewPatient {
    NewPatient {
        nhs_number: Some(nhs_number.to_string()),
        given_name: Some(given.to_string()),
        family_name: Some(family.to_string()),
        date_of_birth: NaiveDate::from_ymd_opt(1980, 5, 15),
        postcode: Some("SW1A 1AA".to_string()),
        sex: Some("male".to_string()),
    }
}
