//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `kubeforge-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `SourceFormatter`: Post-formatting of generated sources
//!   - `TemplateEngine`: Template rendering
//!   - `ProjectStore`: The `PROJECT` descriptor
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - `ScaffoldService::run` (called from the CLI layer)

pub mod output;

pub use output::{
    FormatError, Filesystem, ProjectStore, SourceFormatter, TemplateEngine, TemplateError,
};

#[cfg(test)]
pub use output::{MockFilesystem, MockSourceFormatter, MockTemplateEngine};
