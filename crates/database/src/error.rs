//! Conversion of engine errors into the application taxonomy

use readingjourney_core::AppError;
use sqlx::error::ErrorKind;

/// Converts a failed statement into an [`AppError`]
///
/// Writes rejected by a `CHECK` or `NOT NULL` constraint become
/// [`AppError::ConstraintViolation`]; every other failure becomes
/// [`AppError::StorageError`] carrying the engine's message.
pub(crate) fn classify(context: &str, err: sqlx::Error) -> AppError {
    if is_constraint_violation(&err) {
        log::warn!("{}: {}", context, err);
        AppError::constraint(format!("{}: {}", context, err), err)
    } else {
        log::error!("{}: {}", context, err);
        AppError::storage(context, err)
    }
}

fn is_constraint_violation(err: &sqlx::Error) -> bool {
    match err {
        sqlx::Error::Database(db) => {
            matches!(
                db.kind(),
                ErrorKind::CheckViolation | ErrorKind::NotNullViolation
            ) || db.message().starts_with("CHECK constraint failed")
                || db.message().starts_with("NOT NULL constraint failed")
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_are_storage_errors() {
        let err = classify("Failed to list books", sqlx::Error::RowNotFound);
        assert!(matches!(err, AppError::StorageError { .. }));
        assert!(err.to_string().contains("Failed to list books"));
    }

    #[test]
    fn test_pool_closed_is_storage_error() {
        let err = classify("Failed to delete book", sqlx::Error::PoolClosed);
        assert!(!err.is_constraint_violation());
    }
}
