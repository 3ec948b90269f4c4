//! Schema definitions and migration utilities.
//!
//! The schema SQL is embedded at compile time and is idempotent, so it
//! can run at every connect.

use sqlx::PgPool;

use crate::error::{StoreError, StoreResult};

/// Embedded migration SQL for the core schema (001_schema.sql).
pub const SCHEMA_MIGRATION: &str = include_str!("../../../migrations/001_schema.sql");

/// Run all pending migrations against the database.
///
/// Idempotent: every statement checks for existing objects before
/// creating them.
pub async fn run_migrations(pool: &PgPool) -> StoreResult<()> {
    tracing::info!("Running database migrations...");

    sqlx::raw_sql(SCHEMA_MIGRATION)
        .execute(pool)
        .await
        .map_err(|e| StoreError::Migration(format!("schema migration failed: {e}")))?;

    tracing::info!("Migrations completed successfully");
    Ok(())
}

/// Check if the schema has been initialized.
///
/// Returns true if the `papers` table exists.
pub async fn is_schema_initialized(pool: &PgPool) -> StoreResult<bool> {
    let result: (bool,) = sqlx::query_as(
        r#"
        SELECT EXISTS (
            SELECT FROM information_schema.tables
            WHERE table_schema = 'public'
            AND table_name = 'papers'
        )
        "#,
    )
    .fetch_one(pool)
    .await?;

    Ok(result.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_migration_embedded() {
        // Verify the migration SQL is properly embedded
        assert!(SCHEMA_MIGRATION.contains("CREATE TABLE IF NOT EXISTS papers"));
        assert!(SCHEMA_MIGRATION.contains("CREATE TABLE IF NOT EXISTS authors"));
        assert!(SCHEMA_MIGRATION.contains("CREATE TABLE IF NOT EXISTS bib_entries"));
        assert!(SCHEMA_MIGRATION.contains("CREATE TABLE IF NOT EXISTS authorships"));
    }

    #[test]
    fn test_schema_enforces_identity_and_ordering() {
        assert!(SCHEMA_MIGRATION.contains("authors_identity"));
        assert!(SCHEMA_MIGRATION.contains("authorships_ordering"));
        assert!(SCHEMA_MIGRATION.contains("bibtex_key TEXT NOT NULL UNIQUE"));
    }
}
