//! PostgreSQL implementation of [`TraceStatusTracker`].

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use deadpool_postgres::Pool;

use crate::core::TraceStatusTracker;
use crate::error::MpiResult;

use super::config::{get_client, query_error};

const SELECT_UNTRACED: &str = "
    SELECT pid
    FROM UNNEST($1::BIGINT[]) AS pid
    WHERE pid NOT IN (
        SELECT patient_id FROM trace_status
    )
";

const INSERT_SUBMITTED: &str = "
    INSERT INTO trace_status (patient_id, submitted_at)
    SELECT pid, $2
    FROM UNNEST($1::BIGINT[]) AS pid
    ON CONFLICT (patient_id) DO NOTHING
";

const UPDATE_COMPLETED: &str = "
    UPDATE trace_status
    SET completed_at = $2
    WHERE patient_id = ANY($1)
";

/// Tracker over the `trace_status` table.
pub struct PostgresTraceStatusTracker {
    pool: Pool,
}

impl PostgresTraceStatusTracker {
    /// Creates a tracker backed by the given pool.
    pub fn new(pool: Pool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TraceStatusTracker for PostgresTraceStatusTracker {
    async fn find_untraced_patients(&self, patient_ids: &[i64]) -> MpiResult<Vec<i64>> {
        if patient_ids.is_empty() {
            return Ok(Vec::new());
        }

        let client = get_client(&self.pool).await?;
        let rows = client
            .query(SELECT_UNTRACED, &[&patient_ids])
            .await
            .map_err(|e| query_error(format!("Failed to query untraced patients: {}", e)))?;

        Ok(rows.iter().map(|row| row.get(0)).collect())
    }

    async fn mark_submitted(
        &self,
        patient_ids: &[i64],
        submitted_at: DateTime<Utc>,
    ) -> MpiResult<()> {
        if patient_ids.is_empty() {
            return Ok(());
        }

        let client = get_client(&self.pool).await?;
        client
            .execute(INSERT_SUBMITTED, &[&patient_ids, &submitted_at])
            .await
            .map_err(|e| query_error(format!("Failed to mark patients submitted: {}", e)))?;

        Ok(())
    }

    async fn mark_completed(
        &self,
        patient_ids: &[i64],
        completed_at: DateTime<Utc>,
    ) -> MpiResult<()> {
        if patient_ids.is_empty() {
            return Ok(());
        }

        let client = get_client(&self.pool).await?;
        client
            .execute(UPDATE_COMPLETED, &[&patient_ids, &completed_at])
            .await
            .map_err(|e| query_error(format!("Failed to mark patients completed: {}", e)))?;

        Ok(())
    }
}
