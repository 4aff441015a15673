//! Application layer errors.
//!
//! These errors represent failures while running units against the outside
//! world. Business rule violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// Destination exists and its policy is `Error`.
    #[error("{path} already exists")]
    AlreadyExists { path: PathBuf },

    /// Marker update target is missing.
    #[error("cannot update {path}: file not found")]
    FileNotFound { path: PathBuf },

    /// Template failed to parse or execute.
    #[error("template for {path} failed: {reason}")]
    TemplateSyntax { path: String, reason: String },

    /// Source formatter rejected the rendered output.
    #[error("formatting {path} failed: {reason}")]
    FormatFailed { path: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Adapter state lock poisoned.
    #[error("filesystem state lock poisoned")]
    StoreLockError,

    /// No project descriptor where one is required.
    #[error("no project file at {path}")]
    ProjectNotFound { path: PathBuf },

    /// Project descriptor could not be read or written.
    #[error("project file {path} is invalid: {reason}")]
    ProjectFileInvalid { path: PathBuf, reason: String },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::AlreadyExists { path } => vec![
                format!("Refusing to overwrite {}", path.display()),
                "Remove the file or pass --force to regenerate it".into(),
            ],
            Self::FileNotFound { path } => vec![
                format!("{} should have been created by 'kubeforge init'", path.display()),
                "Check that you are in the project root".into(),
            ],
            Self::TemplateSyntax { .. } => vec![
                "A built-in template is broken; please report this issue".into(),
            ],
            Self::FormatFailed { .. } => vec![
                "Check that gofmt is installed and on PATH".into(),
                "Or disable formatting: KUBEFORGE__FORMATTER__ENABLED=false".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::StoreLockError => vec!["Try again".into()],
            Self::ProjectNotFound { .. } => vec![
                "Run 'kubeforge init' first".into(),
                "Or run this command from the project root".into(),
            ],
            Self::ProjectFileInvalid { path, .. } => vec![
                format!("Fix or regenerate {}", path.display()),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::AlreadyExists { .. } => ErrorCategory::Conflict,
            Self::FileNotFound { .. } | Self::ProjectNotFound { .. } => ErrorCategory::NotFound,
            Self::ProjectFileInvalid { .. } => ErrorCategory::Configuration,
            Self::FormatFailed { .. } => ErrorCategory::Validation,
            Self::TemplateSyntax { .. } | Self::FilesystemError { .. } | Self::StoreLockError => {
                ErrorCategory::Internal
            }
        }
    }
}
