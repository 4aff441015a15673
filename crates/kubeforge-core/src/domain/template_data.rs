//! The data model templates are rendered against.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::domain::project::ProjectContext;
use crate::domain::resource::ResourceDescriptor;
use crate::domain::unit::ExtraValue;

/// Everything a template can read. Serialized into the engine's context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateData {
    pub boilerplate: String,
    pub domain: String,
    pub repo: String,
    pub project_name: String,
    pub project_version: String,
    pub multigroup: bool,
    pub resource: Option<ResourceData>,
    /// Unit-specific values, merged in per unit by the renderer.
    pub extra: BTreeMap<String, ExtraValue>,
}

/// Resource fields plus the values derived from them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResourceData {
    pub group: String,
    pub version: String,
    pub kind: String,
    pub plural: String,
    pub namespaced: bool,
    pub short_names: Vec<String>,
    pub qualified_group: String,
    pub import_alias: String,
    /// Go import path of the API package.
    pub package: String,
}

impl ResourceData {
    pub fn new(resource: &ResourceDescriptor, project: &ProjectContext) -> Self {
        let package = if project.multigroup {
            format!("{}/apis/{}/{}", project.repo, resource.group, resource.version)
        } else {
            format!("{}/api/{}", project.repo, resource.version)
        };

        Self {
            group: resource.group.clone(),
            version: resource.version.clone(),
            kind: resource.kind.clone(),
            plural: resource.plural.clone(),
            namespaced: resource.namespaced,
            short_names: resource.short_names.clone(),
            qualified_group: resource.qualified_group(&project.domain),
            import_alias: resource.import_alias(),
            package,
        }
    }
}

impl TemplateData {
    pub fn new(project: &ProjectContext, resource: Option<&ResourceDescriptor>) -> Self {
        Self {
            boilerplate: project.boilerplate.clone(),
            domain: project.domain.clone(),
            repo: project.repo.clone(),
            project_name: project.project_name.clone(),
            project_version: project.version.to_string(),
            multigroup: project.multigroup,
            resource: resource.map(|r| ResourceData::new(r, project)),
            extra: BTreeMap::new(),
        }
    }

    /// Copy of this data with unit values layered on top.
    pub fn with_extra(&self, extra: &BTreeMap<String, ExtraValue>) -> Self {
        let mut data = self.clone();
        data.extra
            .extend(extra.iter().map(|(k, v)| (k.clone(), v.clone())));
        data
    }
}
