//! Status label configuration section

use crate::validation::{ConfigSection, ValidationError, Validator};
use readingjourney_core::{StatusLabels, Validator as _};
use serde::{Deserialize, Serialize};

/// Longest label accepted in the config file
pub const MAX_LABEL_CHARS: usize = 32;

/// Text stored in the database for each reading status
///
/// The labels end up in the table's check constraint when the database file
/// is first created, so changing them later makes that file unusable.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct StatusConfig {
    pub pending: String,
    pub in_progress: String,
    pub done: String,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self::from_labels(StatusLabels::default())
    }
}

impl StatusConfig {
    pub fn from_labels(labels: StatusLabels) -> Self {
        Self {
            pending: labels.pending,
            in_progress: labels.in_progress,
            done: labels.done,
        }
    }

    /// The label set the store should use
    pub fn labels(&self) -> StatusLabels {
        StatusLabels::new(&self.pending, &self.in_progress, &self.done)
    }
}

impl ConfigSection for StatusConfig {
    fn validate(&self) -> Result<(), Vec<ValidationError>> {
        let fields = [
            ("status.pending", &self.pending),
            ("status.in_progress", &self.in_progress),
            ("status.done", &self.done),
        ];

        let mut results = Vec::new();
        for (field, value) in fields {
            results.push(Validator::not_empty(value, field));
            results.push(Validator::max_chars(value, MAX_LABEL_CHARS, field));
        }

        if results.iter().all(|r| r.is_ok()) {
            if let Err(errors) = self.labels().validate() {
                results.extend(
                    errors
                        .into_iter()
                        .map(|message| Err(ValidationError::new("status", message))),
                );
            }
        }

        Validator::collect_errors(results)
    }
}
