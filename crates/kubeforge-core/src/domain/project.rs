//! Project-level state: the layout version, the persisted project descriptor,
//! and the read-only context handed to a scaffold run.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;
use crate::domain::resource::ResourceDescriptor;

// ── ProjectVersion ───────────────────────────────────────────────────────────

/// Layout version of a project. Each version has its own set of templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ProjectVersion {
    V1,
    V2,
    V3,
    V4,
}

impl ProjectVersion {
    pub const LATEST: Self = Self::V4;

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::V1 => "1",
            Self::V2 => "2",
            Self::V3 => "3",
            Self::V4 => "4",
        }
    }
}

impl Default for ProjectVersion {
    fn default() -> Self {
        Self::LATEST
    }
}

impl fmt::Display for ProjectVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectVersion {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().trim_start_matches('v') {
            "1" => Ok(Self::V1),
            "2" => Ok(Self::V2),
            "3" => Ok(Self::V3),
            "4" => Ok(Self::V4),
            other => Err(DomainError::InvalidProjectVersion {
                value: other.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for ProjectVersion {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ProjectVersion> for String {
    fn from(version: ProjectVersion) -> Self {
        version.as_str().to_string()
    }
}

// ── ProjectContext ───────────────────────────────────────────────────────────

/// Project settings shared by every unit of one run. Never mutated by the core.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProjectContext {
    /// Go module path.
    pub repo: String,
    pub domain: String,
    pub version: ProjectVersion,
    /// License header prepended to generated sources.
    pub boilerplate: String,
    pub multigroup: bool,
    pub project_name: String,
    /// Groups that already have a recorded API or controller.
    pub groups: Vec<String>,
}

// ── ProjectDescriptor ────────────────────────────────────────────────────────

/// Contents of the `PROJECT` file at the project root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectDescriptor {
    pub version: ProjectVersion,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub domain: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub repo: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub project_name: String,
    #[serde(default, skip_serializing_if = "is_false")]
    pub multigroup: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub resources: Vec<ResourceRecord>,
}

/// One API tracked in the project file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceRecord {
    pub group: String,
    pub version: String,
    pub kind: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub plural: String,
    /// Present once the API types have been scaffolded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api: Option<ApiRecord>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub controller: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webhooks: Option<WebhookRecord>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ApiRecord {
    #[serde(default, skip_serializing_if = "is_false")]
    pub namespaced: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct WebhookRecord {
    #[serde(default, skip_serializing_if = "is_false")]
    pub defaulting: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub validation: bool,
}

fn is_false(value: &bool) -> bool {
    !*value
}

impl ResourceRecord {
    fn new(resource: &ResourceDescriptor) -> Self {
        Self {
            group: resource.group.clone(),
            version: resource.version.clone(),
            kind: resource.kind.clone(),
            plural: resource.plural.clone(),
            api: None,
            controller: false,
            webhooks: None,
        }
    }

    fn matches(&self, resource: &ResourceDescriptor) -> bool {
        self.group == resource.group && self.version == resource.version && self.kind == resource.kind
    }

    pub fn has_api(&self) -> bool {
        self.api.is_some()
    }

    /// Copy the recorded plural and scope onto `resource`.
    ///
    /// An explicit plural on `resource` wins when `keep_plural` is set.
    pub fn restore(&self, resource: &mut ResourceDescriptor, keep_plural: bool) {
        if !keep_plural && !self.plural.is_empty() {
            resource.plural = self.plural.clone();
        }
        if let Some(api) = self.api {
            resource.namespaced = api.namespaced;
        }
    }
}

impl ProjectDescriptor {
    pub fn new(version: ProjectVersion, domain: impl Into<String>, repo: impl Into<String>) -> Self {
        Self {
            version,
            domain: domain.into(),
            repo: repo.into(),
            project_name: String::new(),
            multigroup: false,
            resources: Vec::new(),
        }
    }

    /// Build the run context from this descriptor and a boilerplate header.
    pub fn context(&self, boilerplate: impl Into<String>) -> ProjectContext {
        ProjectContext {
            repo: self.repo.clone(),
            domain: self.domain.clone(),
            version: self.version,
            boilerplate: boilerplate.into(),
            multigroup: self.multigroup,
            project_name: self.project_name.clone(),
            groups: self.groups(),
        }
    }

    /// Distinct groups across recorded resources, in first-seen order.
    pub fn groups(&self) -> Vec<String> {
        let mut groups: Vec<String> = Vec::new();
        for record in &self.resources {
            if !groups.contains(&record.group) {
                groups.push(record.group.clone());
            }
        }
        groups
    }

    pub fn has_resource(&self, resource: &ResourceDescriptor) -> bool {
        self.resources.iter().any(|r| r.matches(resource))
    }

    pub fn find_resource(&self, resource: &ResourceDescriptor) -> Option<&ResourceRecord> {
        self.resources.iter().find(|r| r.matches(resource))
    }

    fn entry(&mut self, resource: &ResourceDescriptor) -> &mut ResourceRecord {
        let index = match self.resources.iter().position(|r| r.matches(resource)) {
            Some(index) => index,
            None => {
                self.resources.push(ResourceRecord::new(resource));
                self.resources.len() - 1
            }
        };
        &mut self.resources[index]
    }

    /// Track a new API. Fails when the API types are already recorded.
    pub fn add_resource(
        &mut self,
        resource: &ResourceDescriptor,
        controller: bool,
    ) -> Result<(), DomainError> {
        if self.find_resource(resource).is_some_and(ResourceRecord::has_api) {
            return Err(DomainError::ResourceAlreadyExists {
                gvk: resource.gvk(),
            });
        }
        self.record_api(resource, true, controller);
        Ok(())
    }

    /// Merge what a `create api` run generated into the resource entry.
    ///
    /// Flags only ever switch on; the entry keeps its webhooks.
    pub fn record_api(&mut self, resource: &ResourceDescriptor, api: bool, controller: bool) {
        let record = self.entry(resource);
        if api {
            record.plural = resource.plural.clone();
            record.api = Some(ApiRecord {
                namespaced: resource.namespaced,
            });
        }
        record.controller |= controller;
    }

    /// Mark webhooks on a resource, adding the resource entry if missing.
    pub fn record_webhooks(&mut self, resource: &ResourceDescriptor, webhooks: WebhookRecord) {
        let record = self.entry(resource);
        if record.plural.is_empty() {
            record.plural = resource.plural.clone();
        }
        let entry = record.webhooks.get_or_insert_with(WebhookRecord::default);
        entry.defaulting |= webhooks.defaulting;
        entry.validation |= webhooks.validation;
    }
}
