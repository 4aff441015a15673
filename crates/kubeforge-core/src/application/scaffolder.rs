//! Scaffolders turn a request into the ordered units for one project version.

use std::collections::BTreeMap;

use crate::domain::{DomainError, ProjectContext, ProjectVersion, RenderUnit, ResourceDescriptor};
use crate::error::ForgeResult;

/// What the user asked to generate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaffoldRequest {
    /// Project skeleton.
    Init,
    /// API types and/or controller for a resource.
    CreateApi {
        resource: ResourceDescriptor,
        resource_files: bool,
        controller: bool,
    },
    /// Admission webhooks for a resource.
    CreateWebhook {
        resource: ResourceDescriptor,
        defaulting: bool,
        validation: bool,
    },
}

impl ScaffoldRequest {
    pub fn resource(&self) -> Option<&ResourceDescriptor> {
        match self {
            Self::Init => None,
            Self::CreateApi { resource, .. } | Self::CreateWebhook { resource, .. } => {
                Some(resource)
            }
        }
    }
}

/// Unit factory for one project layout version.
pub trait Scaffolder: Send + Sync {
    fn version(&self) -> ProjectVersion;

    /// Reject requests this layout cannot serve. Runs before any I/O.
    fn validate(&self, project: &ProjectContext, request: &ScaffoldRequest) -> ForgeResult<()>;

    /// Units to run, in order.
    fn units(&self, project: &ProjectContext, request: &ScaffoldRequest)
    -> ForgeResult<Vec<RenderUnit>>;
}

/// Explicit version → scaffolder table. Built once at startup.
#[derive(Default)]
pub struct ScaffolderRegistry {
    scaffolders: BTreeMap<ProjectVersion, Box<dyn Scaffolder>>,
}

impl ScaffolderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scaffolder, replacing any earlier one for the same version.
    pub fn register(&mut self, scaffolder: Box<dyn Scaffolder>) {
        self.scaffolders.insert(scaffolder.version(), scaffolder);
    }

    pub fn get(&self, version: ProjectVersion) -> ForgeResult<&dyn Scaffolder> {
        self.scaffolders
            .get(&version)
            .map(|scaffolder| scaffolder.as_ref())
            .ok_or_else(|| {
                DomainError::UnsupportedProjectVersion {
                    version: version.to_string(),
                }
                .into()
            })
    }

    pub fn versions(&self) -> impl Iterator<Item = ProjectVersion> + '_ {
        self.scaffolders.keys().copied()
    }
}
