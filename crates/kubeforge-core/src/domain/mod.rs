//! Core domain layer for kubeforge.
//!
//! Pure logic only: validation, path resolution, the existing-file policy
//! and the string halves of marker updates. All I/O, templating and
//! formatting go through ports defined in the application layer.
//!
//! - **No I/O**: No filesystem, network, or process calls
//! - **No logging**: errors are returned, never reported from here
//! - **Few crates**: std, thiserror, serde, regex and convert_case

pub mod error;
pub mod inflection;
pub mod marker;
pub mod path;
pub mod project;
pub mod resource;
pub mod template_data;
pub mod unit;

pub use error::{DomainError, ErrorCategory, ValidationError};
pub use inflection::{EnglishPluralizer, Pluralizer};
pub use marker::{CodeFragments, Marker};
pub use project::{
    ApiRecord, ProjectContext, ProjectDescriptor, ProjectVersion, ResourceRecord, WebhookRecord,
};
pub use resource::ResourceDescriptor;
pub use template_data::{ResourceData, TemplateData};
pub use unit::{ExtraValue, IfExistsAction, RenderUnit, UnitKind, WriteDecision};
