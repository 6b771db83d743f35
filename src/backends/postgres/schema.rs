//! PostgreSQL schema definitions and migrations for the patient store.

use crate::error::{BackendError, MpiError, MpiResult};

/// Current schema version.
pub const SCHEMA_VERSION: i32 = 2;

/// Initialize the database schema.
pub async fn initialize_schema(client: &deadpool_postgres::Client) -> MpiResult<()> {
    let current_version = get_schema_version(client).await?;

    if current_version == 0 {
        create_schema_v1(client).await?;
        set_schema_version(client, 1).await?;
        migrate_schema(client, 1).await?;
    } else if current_version < SCHEMA_VERSION {
        migrate_schema(client, current_version).await?;
    }

    tracing::info!("MPI schema initialized at version {}", SCHEMA_VERSION);
    Ok(())
}

/// Get the current schema version.
async fn get_schema_version(client: &deadpool_postgres::Client) -> MpiResult<i32> {
    client
        .execute(
            "CREATE TABLE IF NOT EXISTS schema_version (
                version INTEGER NOT NULL
            )",
            &[],
        )
        .await
        .map_err(|e| migration_error(format!("Failed to create schema_version table: {}", e)))?;

    let row = client
        .query_opt("SELECT version FROM schema_version LIMIT 1", &[])
        .await
        .map_err(|e| migration_error(format!("Failed to query schema version: {}", e)))?;

    Ok(row.map(|r| r.get::<_, i32>(0)).unwrap_or(0))
}

/// Set the schema version.
async fn set_schema_version(client: &deadpool_postgres::Client, version: i32) -> MpiResult<()> {
    client
        .execute("DELETE FROM schema_version", &[])
        .await
        .map_err(|e| migration_error(format!("Failed to clear schema_version: {}", e)))?;

    client
        .execute(
            "INSERT INTO schema_version (version) VALUES ($1)",
            &[&version],
        )
        .await
        .map_err(|e| migration_error(format!("Failed to set schema_version: {}", e)))?;

    Ok(())
}

/// Create the initial schema (version 1).
async fn create_schema_v1(client: &deadpool_postgres::Client) -> MpiResult<()> {
    client
        .execute(
            "CREATE TABLE IF NOT EXISTS patient (
                id BIGSERIAL PRIMARY KEY,
                nhs_number TEXT,
                given_name TEXT,
                family_name TEXT,
                date_of_birth DATE,
                postcode TEXT,
                sex TEXT,
                verified BOOLEAN NOT NULL DEFAULT FALSE,
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL
            )",
            &[],
        )
        .await
        .map_err(|e| migration_error(format!("Failed to create patient table: {}", e)))?;

    // The trace-submission loop selects on verified = FALSE every run.
    client
        .execute(
            "CREATE INDEX IF NOT EXISTS patient_unverified_idx
                 ON patient (id) WHERE NOT verified",
            &[],
        )
        .await
        .map_err(|e| migration_error(format!("Failed to create patient index: {}", e)))?;

    client
        .execute(
            "CREATE TABLE IF NOT EXISTS trace_status (
                patient_id BIGINT PRIMARY KEY REFERENCES patient (id),
                submitted_at TIMESTAMPTZ
            )",
            &[],
        )
        .await
        .map_err(|e| migration_error(format!("Failed to create trace_status table: {}", e)))?;

    Ok(())
}

/// Apply migrations from the given version up to [`SCHEMA_VERSION`].
async fn migrate_schema(client: &deadpool_postgres::Client, from_version: i32) -> MpiResult<()> {
    if from_version < 2 {
        client
            .execute(
                "ALTER TABLE trace_status ADD COLUMN IF NOT EXISTS completed_at TIMESTAMPTZ",
                &[],
            )
            .await
            .map_err(|e| migration_error(format!("Failed to add completed_at column: {}", e)))?;
        set_schema_version(client, 2).await?;
    }

    Ok(())
}

fn migration_error(message: String) -> MpiError {
    MpiError::Backend(BackendError::MigrationError { message })
}
