//! Reading Journey core types
//!
//! Domain model and error taxonomy shared by the store, the configuration
//! layer and the command-line front end.

pub mod error;
pub mod types;

pub use error::{AppError, ErrorSeverity, RecoveryAction};
pub use types::{
    capitalize, normalize_status, Book, BookId, NewBook, ReadingStatus, StatusLabels, Validator,
};
