//! Exact matching done entirely in SQL.

use async_trait::async_trait;
use chrono::NaiveDate;
use deadpool_postgres::Pool;

use crate::core::MatchingStrategy;
use crate::error::MpiResult;
use crate::types::{DemographicQuery, MatchResult};

use super::config::{get_client, query_error};

/// Matches the whole query batch against verified patients in one round
/// trip.
///
/// The batch is shipped as parallel arrays and unnested server-side; each
/// stored verified patient is matched by ANDing per-field equality
/// predicates where a NULL query field means "don't care". Results come
/// back ordered by query position then patient id, and are regrouped to
/// the originating query.
pub struct SqlExactMatchStrategy {
    pool: Pool,
}

const EXACT_MATCH_QUERY: &str = "
    WITH query_data AS (
        SELECT
            unnest($1::INTEGER[]) AS row_idx,
            unnest($2::TEXT[]) AS nhs_number,
            unnest($3::DATE[]) AS date_of_birth,
            unnest($4::TEXT[]) AS postcode,
            unnest($5::TEXT[]) AS given_name,
            unnest($6::TEXT[]) AS family_name,
            unnest($7::TEXT[]) AS sex
    )
    SELECT
        q.row_idx,
        p.id
    FROM query_data q
    LEFT JOIN patient p ON
        p.verified
        AND (q.nhs_number IS NULL OR p.nhs_number = q.nhs_number)
        AND (q.date_of_birth IS NULL OR p.date_of_birth = q.date_of_birth)
        AND (q.postcode IS NULL OR p.postcode = q.postcode)
        AND (q.given_name IS NULL OR p.given_name = q.given_name)
        AND (q.family_name IS NULL OR p.family_name = q.family_name)
        AND (q.sex IS NULL OR p.sex = q.sex)
    ORDER BY q.row_idx, p.id
";

impl SqlExactMatchStrategy {
    /// Creates a strategy backed by the given pool.
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MatchingStrategy for SqlExactMatchStrategy {
    async fn find_matches(&self, queries: &[DemographicQuery]) -> MpiResult<Vec<MatchResult>> {
        if queries.is_empty() {
            return Ok(Vec::new());
        }

        let row_indices: Vec<i32> = (0..queries.len() as i32).collect();
        let nhs_numbers: Vec<Option<&str>> =
            queries.iter().map(|q| q.nhs_number.as_deref()).collect();
        let dobs: Vec<Option<NaiveDate>> = queries.iter().map(|q| q.date_of_birth).collect();
        let postcodes: Vec<Option<&str>> = queries.iter().map(|q| q.postcode.as_deref()).collect();
        let given_names: Vec<Option<&str>> =
            queries.iter().map(|q| q.given_name.as_deref()).collect();
        let family_names: Vec<Option<&str>> =
            queries.iter().map(|q| q.family_name.as_deref()).collect();
        let sexes: Vec<Option<&str>> = queries.iter().map(|q| q.sex.as_deref()).collect();

        let client = get_client(&self.pool).await?;
        let rows = client
            .query(
                EXACT_MATCH_QUERY,
                &[
                    &row_indices,
                    &nhs_numbers,
                    &dobs,
                    &postcodes,
                    &given_names,
                    &family_names,
                    &sexes,
                ],
            )
            .await
            .map_err(|e| query_error(format!("Exact match query failed: {}", e)))?;

        let mut results: Vec<MatchResult> =
            (0..queries.len()).map(MatchResult::no_match).collect();
        for row in rows {
            let row_idx: i32 = row.get(0);
            // LEFT JOIN returns a NULL id for unmatched queries.
            let patient_id: Option<i64> = row.get(1);
            if let Some(id) = patient_id {
                results[row_idx as usize].patient_ids.push(id);
            }
        }

        Ok(results)
    }
}
