//! Error types and recovery guidance for Reading Journey
//!
//! Every storage-facing failure is converted into an [`AppError`] at the
//! boundary where it happens. Errors are grouped into two severity tiers:
//! - **Recoverable**: the operation is aborted, the caller reports it and the
//!   interactive session keeps going (bad input, a failed query)
//! - **Fatal**: the store cannot be used at all until the user picks another
//!   location or fixes the configuration
//!
//! Nothing in the workspace retries automatically. The recovery action tells
//! the presentation layer what to suggest to the user.

use std::fmt;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// What the user (or the calling code) should do after an error
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Report the failure and carry on with the next command
    ReportAndContinue,
    /// Ask the user for corrected input and try again
    CorrectInput,
    /// Point the application at a different, writable database location
    ChooseAnotherLocation,
    /// Edit the configuration file
    FixConfiguration,
}

impl fmt::Display for RecoveryAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReportAndContinue => write!(f, "Reporting and continuing"),
            Self::CorrectInput => write!(f, "Correct the input and retry"),
            Self::ChooseAnotherLocation => write!(f, "Choose another database location"),
            Self::FixConfiguration => write!(f, "Fix the configuration"),
        }
    }
}

/// Error severity classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    /// The session can continue with the next operation
    Recoverable,
    /// The store cannot be used until the user intervenes
    Fatal,
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Recoverable => write!(f, "Recoverable"),
            Self::Fatal => write!(f, "Fatal"),
        }
    }
}

/// Main error type for Reading Journey
#[derive(Error, Debug)]
pub enum AppError {
    // ===== Storage Errors =====
    /// The database file (or its schema) cannot be opened or created
    #[error("Storage unavailable at {path}: {message}")]
    StorageUnavailable {
        path: PathBuf,
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A write broke one of the schema's constraints
    #[error("Constraint violation: {message}")]
    ConstraintViolation {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Any other engine-level failure during a store operation
    #[error("Storage error: {message}")]
    StorageError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ===== Input Errors =====
    /// Free text could not be turned into a reading status
    #[error("Invalid status '{value}' (expected one of: {allowed})")]
    InvalidStatus { value: String, allowed: String },

    /// Invalid argument provided
    #[error("Invalid argument: {argument} - {reason}")]
    InvalidArgument { argument: String, reason: String },

    // ===== Configuration Errors =====
    /// Invalid configuration
    #[error("Invalid configuration: {setting} = '{value}' ({reason})")]
    InvalidConfiguration {
        setting: String,
        value: String,
        reason: String,
    },

    // ===== Terminal Errors =====
    /// General I/O error
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: io::Error,
    },
}

impl AppError {
    /// Returns the severity level of this error
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::StorageUnavailable { .. } | Self::InvalidConfiguration { .. } => {
                ErrorSeverity::Fatal
            }
            Self::ConstraintViolation { .. }
            | Self::StorageError { .. }
            | Self::InvalidStatus { .. }
            | Self::InvalidArgument { .. }
            | Self::IoError { .. } => ErrorSeverity::Recoverable,
        }
    }

    /// Returns the recommended recovery action for this error
    pub fn recovery_action(&self) -> RecoveryAction {
        match self {
            Self::StorageUnavailable { .. } => RecoveryAction::ChooseAnotherLocation,
            Self::InvalidConfiguration { .. } => RecoveryAction::FixConfiguration,
            Self::ConstraintViolation { .. }
            | Self::InvalidStatus { .. }
            | Self::InvalidArgument { .. } => RecoveryAction::CorrectInput,
            Self::StorageError { .. } | Self::IoError { .. } => RecoveryAction::ReportAndContinue,
        }
    }

    /// Returns a user-friendly error message suitable for the console
    pub fn user_message(&self) -> String {
        match self {
            Self::StorageUnavailable { path, .. } => format!(
                "Cannot open the book database at {}. Check the path and its permissions.",
                path.display()
            ),
            Self::ConstraintViolation { .. } => {
                "The book was rejected: the status must be one of the allowed values.".to_string()
            }
            Self::StorageError { message, .. } => {
                format!("The operation failed: {}", message)
            }
            Self::InvalidStatus { allowed, .. } => {
                format!("Unknown status. Please use one of: {}.", allowed)
            }
            Self::InvalidArgument { argument, reason } => {
                format!("Invalid {}: {}.", argument, reason)
            }
            Self::InvalidConfiguration { setting, .. } => {
                format!("Invalid setting: {}. Please check your configuration.", setting)
            }
            Self::IoError { .. } => "Could not read from the terminal.".to_string(),
        }
    }

    /// Returns true if this error should be logged at ERROR level
    pub fn is_critical(&self) -> bool {
        self.severity() == ErrorSeverity::Fatal
    }

    /// Returns true if the write was rejected by the schema
    pub fn is_constraint_violation(&self) -> bool {
        matches!(self, Self::ConstraintViolation { .. })
    }

    /// Helper to create a storage-unavailable error from any error type
    pub fn unavailable<E: std::error::Error + Send + Sync + 'static>(
        path: impl Into<PathBuf>,
        message: impl Into<String>,
        source: E,
    ) -> Self {
        Self::StorageUnavailable {
            path: path.into(),
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Helper to create a constraint violation from any error type
    pub fn constraint<E: std::error::Error + Send + Sync + 'static>(
        message: impl Into<String>,
        source: E,
    ) -> Self {
        Self::ConstraintViolation {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Helper to create a storage error from any error type
    ///
    /// The engine's own message is appended so the caller can show it.
    pub fn storage<E: std::error::Error + Send + Sync + 'static>(
        message: impl Into<String>,
        source: E,
    ) -> Self {
        Self::StorageError {
            message: format!("{}: {}", message.into(), source),
            source: Some(Box::new(source)),
        }
    }
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        Self::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}
