//! Database connection management

use readingjourney_core::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;

/// Database connection pool
///
/// The store keeps it at a single connection: one exclusive handle for the
/// whole session.
pub type DbPool = Pool<Sqlite>;

/// Path value that selects a private in-memory database
pub const IN_MEMORY_PATH: &str = ":memory:";

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Path to the SQLite database file
    pub path: String,
    /// Enable Write-Ahead Logging (WAL) mode
    pub enable_wal: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: "MyReadingJourney.db".to_string(),
            enable_wal: false,
        }
    }
}

impl DatabaseConfig {
    /// Creates a new configuration with a custom path
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            ..Default::default()
        }
    }

    /// Configuration for a throwaway in-memory database
    pub fn in_memory() -> Self {
        Self::new(IN_MEMORY_PATH)
    }

    /// Enables or disables WAL mode
    pub fn with_wal(mut self, enable: bool) -> Self {
        self.enable_wal = enable;
        self
    }

    /// Returns true if this configuration points at an in-memory database
    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY_PATH
    }
}

/// Opens the database and returns its connection pool
///
/// Any failure here means the location is unusable and is reported as
/// [`AppError::StorageUnavailable`].
pub async fn connect(config: &DatabaseConfig) -> Result<DbPool, AppError> {
    let options = if config.is_in_memory() {
        SqliteConnectOptions::from_str("sqlite::memory:")
            .map_err(|e| AppError::unavailable(&config.path, "Invalid database path", e))?
            .journal_mode(SqliteJournalMode::Memory)
    } else {
        let journal = if config.enable_wal {
            SqliteJournalMode::Wal
        } else {
            SqliteJournalMode::Delete
        };
        SqliteConnectOptions::new()
            .filename(&config.path)
            .create_if_missing(true)
            .journal_mode(journal)
    };

    // Commits must be on disk before a write returns
    let options = options.synchronous(SqliteSynchronous::Full);

    // The handle lives as long as the store, so never let the pool reap it
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .map_err(|e| AppError::unavailable(&config.path, "Failed to open database", e))?;

    log::debug!("Opened database at {}", config.path);
    Ok(pool)
}

/// Creates an in-memory database for testing
#[cfg(test)]
pub async fn create_test_db() -> Result<DbPool, AppError> {
    connect(&DatabaseConfig::in_memory()).await
}

/// Closes the database connection pool
pub async fn close(pool: DbPool) {
    pool.close().await;
}
