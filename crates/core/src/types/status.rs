//! Reading status and its stored labels
//!
//! The status is a closed enum in code. What ends up in the database is a
//! label taken from a [`StatusLabels`] set, so a library created with the
//! Spanish labels keeps storing `"Terminado"` while the code still talks
//! about [`ReadingStatus::Done`].

use crate::error::AppError;
use crate::types::Validator;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Where the reader is with a book
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReadingStatus {
    Pending,
    InProgress,
    Done,
}

impl ReadingStatus {
    /// All statuses in display order
    pub const ALL: [ReadingStatus; 3] = [Self::Pending, Self::InProgress, Self::Done];

    /// Canonical English name, independent of the configured labels
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "InProgress",
            Self::Done => "Done",
        }
    }
}

impl fmt::Display for ReadingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for ReadingStatus {
    type Err = AppError;

    /// Parses the canonical names, ignoring case and surrounding whitespace
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| AppError::InvalidStatus {
                value: s.to_string(),
                allowed: "Pending, InProgress, Done".to_string(),
            })
    }
}

/// The text stored for each status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusLabels {
    pub pending: String,
    pub in_progress: String,
    pub done: String,
}

impl Default for StatusLabels {
    fn default() -> Self {
        Self::english()
    }
}

impl StatusLabels {
    /// Creates a custom label set
    pub fn new(
        pending: impl Into<String>,
        in_progress: impl Into<String>,
        done: impl Into<String>,
    ) -> Self {
        Self {
            pending: pending.into(),
            in_progress: in_progress.into(),
            done: done.into(),
        }
    }

    /// `Pending` / `InProgress` / `Done`
    pub fn english() -> Self {
        Self::new("Pending", "InProgress", "Done")
    }

    /// `Pendiente` / `En progreso` / `Terminado`
    pub fn spanish() -> Self {
        Self::new("Pendiente", "En progreso", "Terminado")
    }

    /// Returns the stored label for a status
    pub fn label(&self, status: ReadingStatus) -> &str {
        match status {
            ReadingStatus::Pending => &self.pending,
            ReadingStatus::InProgress => &self.in_progress,
            ReadingStatus::Done => &self.done,
        }
    }

    /// Labels in status order
    pub fn all(&self) -> [&str; 3] {
        [&self.pending, &self.in_progress, &self.done]
    }

    /// Exact, case-sensitive lookup of a stored label
    pub fn status_of(&self, label: &str) -> Option<ReadingStatus> {
        ReadingStatus::ALL
            .into_iter()
            .find(|status| self.label(*status) == label)
    }

    /// Case-insensitive lookup, used for user input
    pub fn match_ignore_case(&self, input: &str) -> Option<ReadingStatus> {
        let wanted = input.trim().to_lowercase();
        ReadingStatus::ALL
            .into_iter()
            .find(|status| self.label(*status).to_lowercase() == wanted)
    }

    /// Parses user input into a status, accepting either a configured label
    /// or a canonical name
    pub fn parse(&self, input: &str) -> Result<ReadingStatus, AppError> {
        match self.match_ignore_case(input) {
            Some(status) => Ok(status),
            None => ReadingStatus::from_str(input).map_err(|_| AppError::InvalidStatus {
                value: input.to_string(),
                allowed: self.all().join(", "),
            }),
        }
    }
}

impl Validator for StatusLabels {
    fn validate(&self) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();
        let labels = self.all();

        for (status, label) in ReadingStatus::ALL.iter().zip(labels) {
            if label.trim().is_empty() {
                errors.push(format!("Label for {} cannot be empty", status));
            } else if label.trim() != label {
                errors.push(format!("Label for {} has surrounding whitespace", status));
            }
        }

        for (i, a) in labels.iter().enumerate() {
            for b in &labels[i + 1..] {
                if !a.is_empty() && a.to_lowercase() == b.to_lowercase() {
                    errors.push(format!("Label '{}' is used for more than one status", a));
                }
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// Upper-cases the first character and lower-cases the rest
pub fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// Normalizes free-text status input before it is written
///
/// A case-insensitive match against one of `labels` yields that label
/// verbatim. Anything else is trimmed and capitalized and left for the
/// storage engine's check constraint to accept or reject.
pub fn normalize_status(input: &str, labels: &StatusLabels) -> String {
    let trimmed = input.trim();
    match labels.match_ignore_case(trimmed) {
        Some(status) => labels.label(status).to_string(),
        None => capitalize(trimmed),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_label_presets_are_valid() {
        assert!(StatusLabels::english().is_valid());
        assert!(StatusLabels::spanish().is_valid());
    }

    #[test]
    fn test_duplicate_and_blank_labels_are_invalid() {
        let labels = StatusLabels::new("Todo", "todo", " ");
        let errors = labels.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("pending"), "Pending");
        assert_eq!(capitalize("EN PROGRESO"), "En progreso");
        assert_eq!(capitalize("inProgress"), "Inprogress");
        assert_eq!(capitalize("élan"), "Élan");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_normalize_matches_labels_ignoring_case() {
        let labels = StatusLabels::english();
        assert_eq!(normalize_status("pending", &labels), "Pending");
        assert_eq!(normalize_status("  inprogress ", &labels), "InProgress");
        assert_eq!(normalize_status("DONE", &labels), "Done");
    }

    #[test]
    fn test_normalize_capitalizes_unknown_input() {
        let labels = StatusLabels::english();
        assert_eq!(normalize_status("borrowed", &labels), "Borrowed");
        assert_eq!(normalize_status(" lost ", &labels), "Lost");
    }

    #[test]
    fn test_normalize_with_spanish_labels() {
        let labels = StatusLabels::spanish();
        assert_eq!(normalize_status("en progreso", &labels), "En progreso");
        assert_eq!(normalize_status("terminado", &labels), "Terminado");
        assert_eq!(normalize_status("done", &labels), "Done");
    }

    #[test]
    fn test_status_of_is_case_sensitive() {
        let labels = StatusLabels::english();
        assert_eq!(labels.status_of("Done"), Some(ReadingStatus::Done));
        assert_eq!(labels.status_of("done"), None);
    }

    #[test]
    fn test_reading_status_from_str() {
        assert_eq!("inprogress".parse::<ReadingStatus>().unwrap(), ReadingStatus::InProgress);
        let err = "Borrowed".parse::<ReadingStatus>().unwrap_err();
        assert!(matches!(err, AppError::InvalidStatus { .. }));
    }

    #[test]
    fn test_labels_parse_accepts_label_or_canonical_name() {
        let labels = StatusLabels::spanish();
        assert_eq!(labels.parse("pendiente").unwrap(), ReadingStatus::Pending);
        assert_eq!(labels.parse("Done").unwrap(), ReadingStatus::Done);

        let err = labels.parse("Prestado").unwrap_err();
        assert!(err.to_string().contains("Pendiente, En progreso, Terminado"));
    }
}
