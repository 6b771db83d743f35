//! PostgreSQL implementation of [`PatientRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use deadpool_postgres::Pool;

use crate::core::{MatchingStrategy, PatientRepository};
use crate::error::MpiResult;
use crate::types::{DemographicQuery, MatchResult, NewPatient, PatientRecord};

use super::config::{PostgresConfig, get_client, query_error};
use super::exact_match::SqlExactMatchStrategy;

/// One multi-row INSERT per batch, all batches inside one transaction.
const INSERT_PATIENTS: &str = "
    INSERT INTO patient
        (nhs_number, given_name, family_name, date_of_birth, postcode, sex,
         verified, created_at, updated_at)
    SELECT n, g, f, d, pc, s, FALSE, $7, $7
    FROM UNNEST(
        $1::TEXT[], $2::TEXT[], $3::TEXT[], $4::DATE[], $5::TEXT[], $6::TEXT[]
    ) AS t (n, g, f, d, pc, s)
    RETURNING id
";

const SELECT_UNVERIFIED: &str = "
    SELECT id, nhs_number, given_name, family_name, date_of_birth, postcode,
           sex, verified, created_at, updated_at
    FROM patient
    WHERE NOT verified
    ORDER BY id
";

/// Repository over the `patient` table.
///
/// Holds the pool and a default matching strategy; constructed once at
/// startup from an explicit configuration.
pub struct PostgresPatientRepository {
    pool: Pool,
    save_batch_size: usize,
    default_strategy: Arc<dyn MatchingStrategy>,
}

impl PostgresPatientRepository {
    /// Creates a repository with SQL exact match as the default strategy.
    pub fn new(pool: Pool, config: &PostgresConfig) -> Self {
        let default_strategy = Arc::new(SqlExactMatchStrategy::new(pool.clone()));
        Self {
            pool,
            save_batch_size: config.save_batch_size.max(1),
            default_strategy,
        }
    }

    /// Replaces the default matching strategy.
    pub fn with_default_strategy(mut self, strategy: Arc<dyn MatchingStrategy>) -> Self {
        self.default_strategy = strategy;
        self
    }
}

#[async_trait]
impl PatientRepository for PostgresPatientRepository {
    async fn save(&self, patients: &[NewPatient]) -> MpiResult<Vec<i64>> {
        if patients.is_empty() {
            return Ok(Vec::new());
        }

        let mut client = get_client(&self.pool).await?;
        let transaction = client
            .transaction()
            .await
            .map_err(|e| query_error(format!("Failed to begin transaction: {}", e)))?;

        let now: DateTime<Utc> = Utc::now();
        let mut ids = Vec::with_capacity(patients.len());

        // Chunked to bound statement payload size; the surrounding
        // transaction keeps the call all-or-nothing.
        for chunk in patients.chunks(self.save_batch_size) {
            let nhs_numbers: Vec<Option<&str>> =
                chunk.iter().map(|p| p.nhs_number.as_deref()).collect();
            let given_names: Vec<Option<&str>> =
                chunk.iter().map(|p| p.given_name.as_deref()).collect();
            let family_names: Vec<Option<&str>> =
                chunk.iter().map(|p| p.family_name.as_deref()).collect();
            let dobs: Vec<Option<NaiveDate>> = chunk.iter().map(|p| p.date_of_birth).collect();
            let postcodes: Vec<Option<&str>> =
                chunk.iter().map(|p| p.postcode.as_deref()).collect();
            let sexes: Vec<Option<&str>> = chunk.iter().map(|p| p.sex.as_deref()).collect();

            let rows = transaction
                .query(
                    INSERT_PATIENTS,
                    &[
                        &nhs_numbers,
                        &given_names,
                        &family_names,
                        &dobs,
                        &postcodes,
                        &sexes,
                        &now,
                    ],
                )
                .await
                .map_err(|e| query_error(format!("Failed to insert patients: {}", e)))?;

            ids.extend(rows.iter().map(|row| row.get::<_, i64>(0)));
        }

        transaction
            .commit()
            .await
            .map_err(|e| query_error(format!("Failed to commit patient insert: {}", e)))?;

        tracing::debug!("Saved {} new unverified patients", ids.len());
        Ok(ids)
    }

    async fn find_patients(&self, queries: &[DemographicQuery]) -> MpiResult<Vec<MatchResult>> {
        self.find_patients_with(queries, self.default_strategy.as_ref())
            .await
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
        let client = get_client(&self.pool).await?;
        let rows = client
            .query(SELECT_UNVERIFIED, &[])
            .await
            .map_err(|e| query_error(format!("Failed to query unverified patients: {}", e)))?;

        Ok(rows
            .iter()
            .map(|row| PatientRecord {
                id: row.get(0),
                nhs_number: row.get(1),
                given_name: row.get(2),
                family_name: row.get(3),
                date_of_birth: row.get(4),
                postcode: row.get(5),
                sex: row.get(6),
                verified: row.get(7),
                created_at: row.get(8),
                updated_at: row.get(9),
            })
            .collect())
    }
}
