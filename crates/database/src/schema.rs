//! Schema creation and first-run seeding

use crate::error::classify;
use crate::seed;
use crate::DbPool;
use readingjourney_core::{AppError, StatusLabels};
use sqlx::SqliteConnection;
use std::path::PathBuf;

/// Name of the only table
pub const BOOKS_TABLE: &str = "books";

/// What [`initialize`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InitReport {
    /// The books table did not exist and was created
    pub created: bool,
    /// Number of sample books inserted
    pub seeded: usize,
}

/// Quotes a value as an SQL string literal
fn sql_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Status check clause listing the labels in pending, in-progress, done order
///
/// The order records which status each label stands for.
fn status_check_sql(labels: &StatusLabels) -> String {
    let allowed = labels
        .all()
        .iter()
        .map(|label| sql_literal(label))
        .collect::<Vec<_>>()
        .join(", ");

    format!("CHECK(status IN ({}))", allowed)
}

/// DDL for the books table with the status check built from `labels`
pub fn books_table_sql(labels: &StatusLabels) -> String {
    format!(
        r#"
        CREATE TABLE IF NOT EXISTS {table} (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            title TEXT NOT NULL,
            author TEXT NOT NULL,
            status TEXT NOT NULL {check}
        )
        "#,
        table = BOOKS_TABLE,
        check = status_check_sql(labels),
    )
}

/// Creates the books table if it is missing
pub(crate) async fn create_books_table(
    conn: &mut SqliteConnection,
    labels: &StatusLabels,
) -> Result<(), sqlx::Error> {
    let sql = books_table_sql(labels);
    sqlx::query(&sql).execute(&mut *conn).await?;
    Ok(())
}

/// Ensures the books table exists, seeding it on first creation
///
/// Runs in one transaction: either the table and all sample rows exist
/// afterwards, or nothing changed. An existing table is left alone apart
/// from checking that its constraint accepts the configured labels.
pub async fn initialize(
    pool: &DbPool,
    labels: &StatusLabels,
    location: &str,
) -> Result<InitReport, AppError> {
    let unavailable = |message: &str, e: sqlx::Error| {
        log::error!("{} at {}: {}", message, location, e);
        AppError::unavailable(location, message, e)
    };

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| unavailable("Failed to start schema transaction", e))?;

    let existing: Option<String> =
        sqlx::query_scalar("SELECT sql FROM sqlite_master WHERE type = 'table' AND name = ?")
            .bind(BOOKS_TABLE)
            .fetch_optional(&mut *tx)
            .await
            .map_err(|e| unavailable("Failed to inspect schema", e))?;

    let created = match existing {
        Some(ddl) => {
            check_labels(&ddl, labels, location)?;
            false
        }
        None => {
            create_books_table(&mut tx, labels)
                .await
                .map_err(|e| unavailable("Failed to create books table", e))?;
            log::info!("Created table '{}' in {}", BOOKS_TABLE, location);
            true
        }
    };

    let mut report = InitReport {
        created,
        seeded: 0,
    };

    if created {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books")
            .fetch_one(&mut *tx)
            .await
            .map_err(|e| unavailable("Failed to count books", e))?;

        if count == 0 {
            report.seeded = seed::insert_samples(&mut tx, labels)
                .await
                .map_err(|e| unavailable("Failed to insert sample books", e))?;
            log::info!("Inserted {} sample books", report.seeded);
        }
    }

    tx.commit()
        .await
        .map_err(|e| unavailable("Failed to commit schema", e))?;

    Ok(report)
}

/// Fails unless an existing table was created for exactly these labels
///
/// Stored rows only carry the label text, so a label moved to another status
/// would silently change what every row means.
fn check_labels(ddl: &str, labels: &StatusLabels, location: &str) -> Result<(), AppError> {
    if ddl.contains(&status_check_sql(labels)) {
        return Ok(());
    }

    log::error!("Status labels do not match the books table in {}", location);
    Err(AppError::StorageUnavailable {
        path: PathBuf::from(location),
        message: format!(
            "existing '{}' table was created for other status labels (configured: {})",
            BOOKS_TABLE,
            labels.all().join(", ")
        ),
        source: None,
    })
}

/// Verifies database integrity
pub async fn verify_integrity(pool: &DbPool) -> Result<(), AppError> {
    let result: String = sqlx::query_scalar("PRAGMA integrity_check")
        .fetch_one(pool)
        .await
        .map_err(|e| classify("Failed to check integrity", e))?;

    if result != "ok" {
        return Err(AppError::StorageError {
            message: format!("Database integrity check failed: {}", result),
            source: None,
        });
    }

    Ok(())
}
