//! Book database operations
//!
//! Status arguments here are already-normalized labels. The check constraint
//! on `books.status` is what finally accepts or rejects them.

use crate::error::classify;
use crate::DbPool;
use readingjourney_core::{AppError, Book, BookId, StatusLabels};
use sqlx::sqlite::SqliteRow;

pub(crate) const INSERT_BOOK: &str = "INSERT INTO books (title, author, status) VALUES (?, ?, ?)";

/// Inserts a book and returns the id the engine assigned to it
pub async fn insert_book(
    pool: &DbPool,
    title: &str,
    author: &str,
    status_label: &str,
) -> Result<BookId, AppError> {
    let result = sqlx::query(INSERT_BOOK)
        .bind(title)
        .bind(author)
        .bind(status_label)
        .execute(pool)
        .await
        .map_err(|e| classify("Failed to insert book", e))?;

    let id = BookId::new(result.last_insert_rowid());
    log::debug!("Inserted book {} ({:?} by {:?})", id, title, author);
    Ok(id)
}

/// Overwrites the status of a book, returning the number of rows touched
pub async fn update_status(
    pool: &DbPool,
    id: BookId,
    status_label: &str,
) -> Result<u64, AppError> {
    let result = sqlx::query("UPDATE books SET status = ? WHERE id = ?")
        .bind(status_label)
        .bind(id.as_i64())
        .execute(pool)
        .await
        .map_err(|e| classify("Failed to update book status", e))?;

    log::debug!(
        "Status of book {} set to {:?} ({} row(s))",
        id,
        status_label,
        result.rows_affected()
    );
    Ok(result.rows_affected())
}

/// Deletes a book (hard delete), returning the number of rows removed
pub async fn delete_book(pool: &DbPool, id: BookId) -> Result<u64, AppError> {
    let result = sqlx::query("DELETE FROM books WHERE id = ?")
        .bind(id.as_i64())
        .execute(pool)
        .await
        .map_err(|e| classify("Failed to delete book", e))?;

    log::debug!("Deleted book {} ({} row(s))", id, result.rows_affected());
    Ok(result.rows_affected())
}

/// Lists all books in ascending id order
pub async fn list_books(pool: &DbPool, labels: &StatusLabels) -> Result<Vec<Book>, AppError> {
    let rows = sqlx::query("SELECT id, title, author, status FROM books ORDER BY id ASC")
        .fetch_all(pool)
        .await
        .map_err(|e| classify("Failed to list books", e))?;

    rows.into_iter().map(|row| row_to_book(row, labels)).collect()
}

/// Gets a book by id
pub async fn get_book(
    pool: &DbPool,
    labels: &StatusLabels,
    id: BookId,
) -> Result<Option<Book>, AppError> {
    let row = sqlx::query("SELECT id, title, author, status FROM books WHERE id = ?")
        .bind(id.as_i64())
        .fetch_optional(pool)
        .await
        .map_err(|e| classify("Failed to fetch book", e))?;

    row.map(|row| row_to_book(row, labels)).transpose()
}

/// Counts stored books
pub async fn count_books(pool: &DbPool) -> Result<i64, AppError> {
    sqlx::query_scalar("SELECT COUNT(*) FROM books")
        .fetch_one(pool)
        .await
        .map_err(|e| classify("Failed to count books", e))
}

/// Converts a database row to a Book
pub(crate) fn row_to_book(row: SqliteRow, labels: &StatusLabels) -> Result<Book, AppError> {
    use sqlx::Row;

    let id: i64 = row
        .try_get("id")
        .map_err(|e| classify("Missing book ID", e))?;
    let status_label: String = row
        .try_get("status")
        .map_err(|e| classify("Missing status", e))?;
    let status = labels
        .status_of(&status_label)
        .ok_or_else(|| AppError::StorageError {
            message: format!(
                "Book {} has status '{}', which is not one of: {}",
                id,
                status_label,
                labels.all().join(", ")
            ),
            source: None,
        })?;

    Ok(Book {
        id: BookId::new(id),
        title: row
            .try_get("title")
            .map_err(|e| classify("Missing title", e))?,
        author: row
            .try_get("author")
            .map_err(|e| classify("Missing author", e))?,
        status,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::connection::create_test_db;
    use crate::schema::create_books_table;
    use readingjourney_core::ReadingStatus;

    async fn setup() -> Result<(DbPool, StatusLabels), AppError> {
        let pool = create_test_db().await?;
        let labels = StatusLabels::english();

        let mut conn = pool
            .acquire()
            .await
            .map_err(|e| classify("Failed to acquire connection", e))?;
        create_books_table(&mut conn, &labels)
            .await
            .map_err(|e| classify("Failed to create table", e))?;
        drop(conn);

        Ok((pool, labels))
    }

    #[tokio::test]
    async fn test_insert_and_get_book() {
        let (pool, labels) = setup().await.expect("Failed to setup database");

        let id = insert_book(&pool, "Dune", "Frank Herbert", "Pending")
            .await
            .expect("Failed to insert book");

        let book = get_book(&pool, &labels, id)
            .await
            .expect("Failed to get book")
            .expect("Book should exist");
        assert_eq!(book.id, id);
        assert_eq!(book.title, "Dune");
        assert_eq!(book.author, "Frank Herbert");
        assert_eq!(book.status, ReadingStatus::Pending);
    }

    #[tokio::test]
    async fn test_ids_start_at_one_and_increase() {
        let (pool, _labels) = setup().await.expect("Failed to setup database");

        let first = insert_book(&pool, "A", "A", "Done").await.unwrap();
        let second = insert_book(&pool, "B", "B", "Done").await.unwrap();

        assert_eq!(first, BookId::new(1));
        assert_eq!(second, BookId::new(2));
    }

    #[tokio::test]
    async fn test_ids_are_not_reused_after_delete() {
        let (pool, _labels) = setup().await.expect("Failed to setup database");

        let first = insert_book(&pool, "A", "A", "Done").await.unwrap();
        let second = insert_book(&pool, "B", "B", "Done").await.unwrap();
        delete_book(&pool, second).await.unwrap();

        let third = insert_book(&pool, "C", "C", "Done").await.unwrap();
        assert!(third > second);
        assert!(third > first);
    }

    #[tokio::test]
    async fn test_check_constraint_rejects_unknown_status() {
        let (pool, _labels) = setup().await.expect("Failed to setup database");

        let err = insert_book(&pool, "Dune", "Frank Herbert", "Borrowed")
            .await
            .unwrap_err();
        assert!(err.is_constraint_violation(), "got {:?}", err);

        // Labels are matched case-sensitively by the engine
        let err = insert_book(&pool, "Dune", "Frank Herbert", "pending")
            .await
            .unwrap_err();
        assert!(err.is_constraint_violation());

        assert_eq!(count_books(&pool).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_not_null_constraint() {
        let (pool, _labels) = setup().await.expect("Failed to setup database");

        let err = sqlx::query(INSERT_BOOK)
            .bind(Option::<String>::None)
            .bind("Author")
            .bind("Pending")
            .execute(&pool)
            .await
            .map_err(|e| classify("Failed to insert book", e))
            .unwrap_err();

        assert!(err.is_constraint_violation());
    }

    #[tokio::test]
    async fn test_update_status() {
        let (pool, labels) = setup().await.expect("Failed to setup database");
        let id = insert_book(&pool, "Dune", "Frank Herbert", "Pending")
            .await
            .unwrap();

        let affected = update_status(&pool, id, "Done").await.unwrap();
        assert_eq!(affected, 1);

        let book = get_book(&pool, &labels, id).await.unwrap().unwrap();
        assert_eq!(book.status, ReadingStatus::Done);
        assert_eq!(book.title, "Dune");
    }

    #[tokio::test]
    async fn test_update_missing_book_affects_nothing() {
        let (pool, _labels) = setup().await.expect("Failed to setup database");

        let affected = update_status(&pool, BookId::new(9999), "Done")
            .await
            .unwrap();
        assert_eq!(affected, 0);
    }

    #[tokio::test]
    async fn test_update_with_bad_status_is_rejected() {
        let (pool, labels) = setup().await.expect("Failed to setup database");
        let id = insert_book(&pool, "Dune", "Frank Herbert", "Pending")
            .await
            .unwrap();

        let err = update_status(&pool, id, "Lost").await.unwrap_err();
        assert!(err.is_constraint_violation());

        let book = get_book(&pool, &labels, id).await.unwrap().unwrap();
        assert_eq!(book.status, ReadingStatus::Pending);
    }

    #[tokio::test]
    async fn test_delete_book() {
        let (pool, labels) = setup().await.expect("Failed to setup database");
        let id = insert_book(&pool, "Dune", "Frank Herbert", "Pending")
            .await
            .unwrap();

        assert_eq!(delete_book(&pool, id).await.unwrap(), 1);
        assert_eq!(delete_book(&pool, id).await.unwrap(), 0);
        assert!(get_book(&pool, &labels, id).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_list_books_in_id_order() {
        let (pool, labels) = setup().await.expect("Failed to setup database");

        for title in ["C", "A", "B"] {
            insert_book(&pool, title, "Author", "Pending").await.unwrap();
        }

        let books = list_books(&pool, &labels).await.unwrap();
        let ids: Vec<i64> = books.iter().map(|b| b.id.as_i64()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(books[0].title, "C");
    }

    #[tokio::test]
    async fn test_list_empty_table() {
        let (pool, labels) = setup().await.expect("Failed to setup database");
        assert!(list_books(&pool, &labels).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_foreign_label_in_row_is_storage_error() {
        let (pool, _labels) = setup().await.expect("Failed to setup database");
        insert_book(&pool, "Dune", "Frank Herbert", "Done").await.unwrap();

        let err = list_books(&pool, &StatusLabels::spanish()).await.unwrap_err();
        assert!(matches!(err, AppError::StorageError { .. }));
    }
}
