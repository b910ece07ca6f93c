//! Sample books inserted the first time the table is created

use crate::queries::books::INSERT_BOOK;
use readingjourney_core::{ReadingStatus, StatusLabels};
use sqlx::SqliteConnection;

/// Title, author and status of each sample book, in insertion order
pub const SAMPLE_BOOKS: [(&str, &str, ReadingStatus); 5] = [
    ("Choose Wonder Over Worry", "Amber Rae", ReadingStatus::Done),
    ("El poder del Ahora", "Eckhart Tolle", ReadingStatus::InProgress),
    ("The light we carry", "Michelle Obama", ReadingStatus::Pending),
    ("Una nueva tierra", "Eckhart Tolle", ReadingStatus::Done),
    ("Toxic positivity", "Whitney Goodman", ReadingStatus::Pending),
];

/// Inserts [`SAMPLE_BOOKS`] using the configured labels
pub(crate) async fn insert_samples(
    conn: &mut SqliteConnection,
    labels: &StatusLabels,
) -> Result<usize, sqlx::Error> {
    for (title, author, status) in SAMPLE_BOOKS {
        sqlx::query(INSERT_BOOK)
            .bind(title)
            .bind(author)
            .bind(labels.label(status))
            .execute(&mut *conn)
            .await?;
    }

    Ok(SAMPLE_BOOKS.len())
}
