//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `kubeforge-adapters` crate provides implementations.

use std::path::Path;

use thiserror::Error;

use crate::domain::{ProjectDescriptor, TemplateData};
use crate::error::ForgeResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `kubeforge_adapters::filesystem::LocalFilesystem` (production)
/// - `kubeforge_adapters::filesystem::MemoryFilesystem` (testing)
///
/// Paths are relative to the project root.
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> ForgeResult<String>;

    /// Create or truncate a file and write `content`.
    fn write_file(&self, path: &Path, content: &str) -> ForgeResult<()>;

    /// Create a directory and all parent directories. Idempotent.
    fn create_dir_all(&self, path: &Path) -> ForgeResult<()>;
}

/// Formatter rejected its input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct FormatError {
    pub reason: String,
}

impl FormatError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Post-processing of generated source, e.g. `gofmt` for Go files.
#[cfg_attr(test, mockall::automock)]
pub trait SourceFormatter: Send + Sync {
    /// Whether files at `path` go through this formatter.
    fn applies_to(&self, path: &Path) -> bool;

    fn format(&self, path: &Path, source: &str) -> Result<String, FormatError>;
}

/// Template failed to parse or execute.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{reason}")]
pub struct TemplateError {
    pub reason: String,
}

impl TemplateError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Port for template rendering.
///
/// Implemented by `kubeforge_adapters::engine::MiniJinjaEngine`. The engine
/// owns the helper functions templates may call.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateEngine: Send + Sync {
    /// Render `body` against `data`. `name` is only used in diagnostics.
    fn render(&self, name: &str, body: &str, data: &TemplateData) -> Result<String, TemplateError>;
}

/// Port for the persisted project descriptor.
///
/// Implemented by `kubeforge_adapters::project_store::YamlProjectStore`.
pub trait ProjectStore: Send + Sync {
    fn exists(&self) -> bool;

    fn load(&self) -> ForgeResult<ProjectDescriptor>;

    fn save(&self, project: &ProjectDescriptor) -> ForgeResult<()>;
}
