// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Resource descriptor validation failures.
///
/// Checks run in declaration order and the first failure wins, so a
/// descriptor with both an empty group and a bad version reports
/// `EmptyGroup`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("group cannot be empty")]
    EmptyGroup,

    #[error("version cannot be empty")]
    EmptyVersion,

    #[error("kind cannot be empty")]
    EmptyKind,

    #[error("group '{group}' is not a valid DNS-1123 subdomain")]
    InvalidGroupFormat { group: String },

    #[error("version '{version}' must match v<N>, v<N>alpha<N> or v<N>beta<N>")]
    InvalidVersionFormat { version: String },

    #[error("kind '{kind}' must be PascalCase, e.g. '{expected}'")]
    KindNotPascalCase { kind: String, expected: String },
}

/// Root domain error type.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("invalid resource: {0}")]
    Validation(#[from] ValidationError),

    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },

    #[error("invalid project version '{value}'")]
    InvalidProjectVersion { value: String },

    // ========================================================================
    // Compatibility / Conflict Errors
    // ========================================================================
    #[error("project version {version} is not supported by this tool")]
    UnsupportedProjectVersion { version: String },

    #[error("resource {gvk} already exists in the project")]
    ResourceAlreadyExists { gvk: String },

    #[error("group '{group}' cannot be added: multiple groups are not allowed by default")]
    MultipleGroupsNotAllowed { group: String },

    // ========================================================================
    // Path Errors
    // ========================================================================
    #[error("path '{pattern}' still contains token {token} but no resource was given")]
    UnresolvedPathToken { pattern: String, token: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Validation(ValidationError::EmptyGroup)
            | Self::Validation(ValidationError::EmptyVersion)
            | Self::Validation(ValidationError::EmptyKind) => vec![
                "Pass all of --group, --version and --kind".into(),
                "A value starting with '-' is read as a missing value".into(),
            ],
            Self::Validation(ValidationError::InvalidGroupFormat { group }) => vec![
                format!("'{}' must be lower-case alphanumerics, '-' or '.'", group),
                "Example: --group ship".into(),
            ],
            Self::Validation(ValidationError::InvalidVersionFormat { .. }) => vec![
                "Versions look like v1, v2alpha1 or v1beta2".into(),
            ],
            Self::Validation(ValidationError::KindNotPascalCase { expected, .. }) => {
                vec![format!("Try: --kind {}", expected)]
            }
            Self::MissingRequiredField { field } => vec![format!("Provide a value for {}", field)],
            Self::InvalidProjectVersion { .. } | Self::UnsupportedProjectVersion { .. } => vec![
                "Supported project versions: 2, 3, 4".into(),
                "Version 1 projects must be migrated first".into(),
            ],
            Self::ResourceAlreadyExists { .. } => vec![
                "Use --force to regenerate the resource files (destructive)".into(),
            ],
            Self::MultipleGroupsNotAllowed { .. } => vec![
                "Enable multi-group layout: kubeforge edit --multigroup".into(),
                "Or reuse a group that already has an API".into(),
            ],
            Self::UnresolvedPathToken { .. } => {
                vec!["This scaffold needs a resource; please report this issue".into()]
            }
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Validation(_)
            | Self::MissingRequiredField { .. }
            | Self::InvalidProjectVersion { .. } => ErrorCategory::Validation,
            Self::UnsupportedProjectVersion { .. }
            | Self::ResourceAlreadyExists { .. }
            | Self::MultipleGroupsNotAllowed { .. } => ErrorCategory::Conflict,
            Self::UnresolvedPathToken { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    NotFound,
    Internal,
}
