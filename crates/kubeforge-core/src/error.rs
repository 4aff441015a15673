//! Unified error handling for kubeforge-core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{DomainError, ValidationError};

/// Root error type for kubeforge-core operations.
#[derive(Debug, Error, Clone)]
pub enum ForgeError {
    /// Errors from the domain layer (validation, conflicts, path tokens).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (I/O, policy, render, update).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl From<ValidationError> for ForgeError {
    fn from(err: ValidationError) -> Self {
        Self::Domain(DomainError::Validation(err))
    }
}

impl ForgeError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {}", message),
                "Check your setup and try again".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in kubeforge".into(),
                "Please report this issue at: https://github.com/cosecruz/kubeforge/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Conflict => ErrorCategory::Conflict,
                crate::domain::ErrorCategory::NotFound => ErrorCategory::NotFound,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    NotFound,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type ForgeResult<T> = Result<T, ForgeError>;

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn validation_errors_are_user_errors() {
        let err: ForgeError = ValidationError::EmptyGroup.into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(!err.suggestions().is_empty());
    }

    #[test]
    fn already_exists_is_a_conflict_naming_the_path() {
        let err: ForgeError = ApplicationError::AlreadyExists {
            path: PathBuf::from("api/v1/frigate_types.go"),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Conflict);
        assert!(err.to_string().contains("api/v1/frigate_types.go"));
    }

    #[test]
    fn missing_project_file_is_not_found() {
        let err: ForgeError = ApplicationError::ProjectNotFound {
            path: PathBuf::from("PROJECT"),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }
}
