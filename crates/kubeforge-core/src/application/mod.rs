//! Application layer for kubeforge.
//!
//! This layer contains:
//! - **Services**: the scaffold orchestrator, unit renderer and marker updater
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Scaffolders**: per-version unit factories and their registry
//! - **Errors**: Application-specific error types
//!
//! Business rules (validation, path resolution, policy) live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod scaffolder;
pub mod services;

pub use services::{MarkerUpdater, RunContext, RunSummary, ScaffoldService, UnitRenderer};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, ProjectStore, SourceFormatter, TemplateEngine};

pub use scaffolder::{ScaffoldRequest, Scaffolder, ScaffolderRegistry};

pub use error::ApplicationError;
