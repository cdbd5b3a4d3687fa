//! `seed` command: load a CSV export into the sales table

use anyhow::{Context, Result};
use salescope_config::SaleScopeConfig;
use salescope_storage::{CsvImporter, DatabaseConfig, DatabaseConnection, ImportSummary};
use std::path::Path;

/// Replace the stored sales with the rows of `path`.
///
/// The schema is migrated first so seeding works against a fresh database.
pub async fn run_seed(config: &SaleScopeConfig, path: &Path) -> Result<ImportSummary> {
    let database = DatabaseConnection::new(DatabaseConfig::from(&config.database))
        .await
        .context("Failed to connect to the database")?;
    database.migrate().await.context("Failed to run database migrations")?;

    tracing::info!(file = %path.display(), batch_size = config.import.batch_size, "Seeding sales");

    let summary = CsvImporter::new(database.clone())
        .with_batch_size(config.import.batch_size)
        .import_file(path)
        .await
        .with_context(|| format!("Failed to import {}", path.display()))?;

    database.close().await.context("Failed to close the database pool")?;

    tracing::info!(
        rows = summary.rows_read,
        inserted = summary.inserted,
        skipped = summary.skipped_duplicates,
        batches = summary.batches,
        "Seeding complete"
    );

    Ok(summary)
}
