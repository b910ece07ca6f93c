//! Domain types for Reading Journey
//!
//! - `book`: the stored book and the insert payload
//! - `status`: reading status, stored labels and input normalization
//! - `common`: shared traits

mod book;
mod common;
mod status;

pub use book::{Book, BookId, NewBook};
pub use common::Validator;
pub use status::{capitalize, normalize_status, ReadingStatus, StatusLabels};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_types_are_exported() {
        let _id: BookId = BookId::new(1);
        let _labels: StatusLabels = StatusLabels::default();
        let _book = NewBook::new("Title", "Author", ReadingStatus::Pending);
    }

    #[test]
    fn test_every_status_has_a_label() {
        let labels = StatusLabels::default();
        for status in ReadingStatus::ALL {
            assert_eq!(labels.status_of(labels.label(status)), Some(status));
        }
    }
}
