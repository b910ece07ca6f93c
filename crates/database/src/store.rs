//! The book store: one owned connection plus the CRUD contract

use crate::connection::{self, DatabaseConfig, DbPool};
use crate::queries::books;
use crate::schema::{self, InitReport};
use readingjourney_core::{
    normalize_status, AppError, Book, BookId, NewBook, ReadingStatus, StatusLabels, Validator,
};
use std::path::{Path, PathBuf};

/// File-backed book collection
///
/// Construct it once with [`BookStore::open`], pass `&BookStore` to whatever
/// needs it, and hand it back to [`BookStore::close`] on the way out.
/// Operations are meant to be awaited one at a time.
pub struct BookStore {
    pool: DbPool,
    labels: StatusLabels,
    location: PathBuf,
}

impl BookStore {
    /// Opens (creating if needed) the database described by `config`
    ///
    /// The schema is not touched until [`BookStore::initialize`] runs.
    pub async fn open(config: DatabaseConfig, labels: StatusLabels) -> Result<Self, AppError> {
        if let Err(errors) = labels.validate() {
            return Err(AppError::InvalidConfiguration {
                setting: "status".to_string(),
                value: labels.all().join(", "),
                reason: errors.join("; "),
            });
        }

        let pool = connection::connect(&config).await?;
        log::info!("Book store opened at {}", config.path);

        Ok(Self {
            pool,
            labels,
            location: PathBuf::from(config.path),
        })
    }

    /// Opens a private in-memory store
    pub async fn open_in_memory(labels: StatusLabels) -> Result<Self, AppError> {
        Self::open(DatabaseConfig::in_memory(), labels).await
    }

    /// Opens a store and initializes it in one step
    pub async fn open_initialized(
        config: DatabaseConfig,
        labels: StatusLabels,
    ) -> Result<(Self, InitReport), AppError> {
        let store = Self::open(config, labels).await?;
        match store.initialize().await {
            Ok(report) => Ok((store, report)),
            Err(e) => {
                store.close().await;
                Err(e)
            }
        }
    }

    /// Labels this store writes and accepts
    pub fn labels(&self) -> &StatusLabels {
        &self.labels
    }

    /// Location of the backing file
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Creates the schema (and sample rows) if this is a fresh database
    pub async fn initialize(&self) -> Result<InitReport, AppError> {
        let location = self.location.to_string_lossy();
        schema::initialize(&self.pool, &self.labels, &location).await
    }

    /// Inserts a book with a free-text status
    ///
    /// The status goes through [`normalize_status`] first. A status that is
    /// still not one of the labels is rejected by the engine with
    /// [`AppError::ConstraintViolation`].
    pub async fn insert(&self, title: &str, author: &str, status: &str) -> Result<BookId, AppError> {
        let status = normalize_status(status, &self.labels);
        books::insert_book(&self.pool, title, author, &status).await
    }

    /// Inserts a book with an already-validated status
    pub async fn insert_book(&self, book: &NewBook) -> Result<BookId, AppError> {
        books::insert_book(
            &self.pool,
            &book.title,
            &book.author,
            self.labels.label(book.status),
        )
        .await
    }

    /// Sets the status of a book from free text
    ///
    /// Returns the number of rows changed; 0 means no book has that id.
    pub async fn update_status(&self, id: BookId, status: &str) -> Result<u64, AppError> {
        let status = normalize_status(status, &self.labels);
        books::update_status(&self.pool, id, &status).await
    }

    /// Sets the status of a book
    ///
    /// Returns the number of rows changed; 0 means no book has that id.
    pub async fn set_status(&self, id: BookId, status: ReadingStatus) -> Result<u64, AppError> {
        books::update_status(&self.pool, id, self.labels.label(status)).await
    }

    /// Permanently removes a book, returning the number of rows removed
    pub async fn delete(&self, id: BookId) -> Result<u64, AppError> {
        books::delete_book(&self.pool, id).await
    }

    /// Snapshot of every book in ascending id order
    pub async fn list_all(&self) -> Result<Vec<Book>, AppError> {
        books::list_books(&self.pool, &self.labels).await
    }

    pub async fn get(&self, id: BookId) -> Result<Option<Book>, AppError> {
        books::get_book(&self.pool, &self.labels, id).await
    }

    pub async fn count(&self) -> Result<i64, AppError> {
        books::count_books(&self.pool).await
    }

    /// Runs SQLite's integrity check
    pub async fn verify_integrity(&self) -> Result<(), AppError> {
        schema::verify_integrity(&self.pool).await
    }

    /// Releases the connection
    pub async fn close(self) {
        connection::close(self.pool).await;
        log::info!("Book store at {} closed", self.location.display());
    }
}
