//! Book domain model

use crate::types::{ReadingStatus, Validator};
use serde::{Deserialize, Serialize};

/// Store-assigned identifier for a book
///
/// Ids start at 1 and are never reused after a deletion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BookId(i64);

impl BookId {
    /// Wraps a raw row id
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Returns the raw row id
    pub fn as_i64(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for BookId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for BookId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<i64>().map(Self)
    }
}

/// A book as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: String,
    pub status: ReadingStatus,
}

/// A book that has not been stored yet and therefore has no id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub status: ReadingStatus,
}

impl NewBook {
    /// Creates a new book payload
    pub fn new(title: impl Into<String>, author: impl Into<String>, status: ReadingStatus) -> Self {
        Self {
            title: title.into(),
            author: author.into(),
            status,
        }
    }
}

impl Validator for NewBook {
    fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if self.title.trim().is_empty() {
            errors.push("Title cannot be empty".to_string());
        }

        if self.author.trim().is_empty() {
            errors.push("Author cannot be empty".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}
