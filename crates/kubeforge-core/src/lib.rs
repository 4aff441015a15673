//! kubeforge core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the kubeforge
//! operator scaffolding tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │          kubeforge-cli (CLI)            │
//! │   (init, create api, create webhook)    │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (ScaffoldService, Renderer, Updater)   │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │       Application Ports (Traits)        │
//! │ (Filesystem, Engine, Formatter, Store)  │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    kubeforge-adapters (Infrastructure)  │
//! │ (LocalFilesystem, MiniJinjaEngine, ...) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (ResourceDescriptor, RenderUnit, Marker)│
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use kubeforge_core::prelude::*;
//!
//! let mut resource = ResourceDescriptor::new("crew", "v1", "FirstMate");
//! resource.validate()?;
//!
//! let scaffolder = registry.get(project.version)?;
//! let request = ScaffoldRequest::CreateApi { resource: resource.clone(), resource_files: true, controller: true };
//! let units = scaffolder.units(&project, &request)?;
//!
//! let service = ScaffoldService::new(filesystem, engine, formatter);
//! let summary = service.run(units, &RunContext::new(project, Some(resource)))?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        RunContext, RunSummary, ScaffoldRequest, ScaffoldService, Scaffolder, ScaffolderRegistry,
        ports::{Filesystem, ProjectStore, SourceFormatter, TemplateEngine},
    };
    pub use crate::domain::{
        IfExistsAction, Marker, Pluralizer, ProjectContext, ProjectDescriptor, ProjectVersion,
        RenderUnit, ResourceDescriptor, TemplateData,
    };
    pub use crate::error::{ForgeError, ForgeResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
