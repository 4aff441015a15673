//! Infrastructure adapters for kubeforge.
//!
//! This crate implements the ports defined in `kubeforge-core::application::ports`.
//! It contains all external dependencies and I/O operations, plus the
//! built-in Go scaffolds that feed the core scaffold service.

pub mod engine;
pub mod filesystem;
pub mod formatter;
pub mod project_store;
pub mod scaffolds;

// Re-export commonly used adapters
pub use engine::MiniJinjaEngine;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use formatter::{GofmtFormatter, PassthroughFormatter};
pub use project_store::{PROJECT_FILE, YamlProjectStore, discover_module_path};
pub use scaffolds::{GoScaffolder, builtin_registry};
