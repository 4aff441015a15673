//! `PROJECT` file persistence and Go module discovery.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::debug;

use kubeforge_core::{
    application::{
        ApplicationError,
        ports::{Filesystem, ProjectStore},
    },
    domain::ProjectDescriptor,
    error::ForgeResult,
};

pub const PROJECT_FILE: &str = "PROJECT";

/// Reads and writes the project descriptor as YAML through a [`Filesystem`].
pub struct YamlProjectStore {
    filesystem: Arc<dyn Filesystem>,
    path: PathBuf,
}

impl YamlProjectStore {
    pub fn new(filesystem: Arc<dyn Filesystem>) -> Self {
        Self {
            filesystem,
            path: PathBuf::from(PROJECT_FILE),
        }
    }

    fn invalid(&self, reason: impl ToString) -> ApplicationError {
        ApplicationError::ProjectFileInvalid {
            path: self.path.clone(),
            reason: reason.to_string(),
        }
    }
}

impl ProjectStore for YamlProjectStore {
    fn exists(&self) -> bool {
        self.filesystem.exists(&self.path)
    }

    fn load(&self) -> ForgeResult<ProjectDescriptor> {
        if !self.exists() {
            return Err(ApplicationError::ProjectNotFound {
                path: self.path.clone(),
            }
            .into());
        }

        let raw = self.filesystem.read_to_string(&self.path)?;
        let project: ProjectDescriptor =
            serde_yaml::from_str(&raw).map_err(|e| self.invalid(e))?;

        debug!(version = %project.version, resources = project.resources.len(), "loaded project file");
        Ok(project)
    }

    fn save(&self, project: &ProjectDescriptor) -> ForgeResult<()> {
        let yaml = serde_yaml::to_string(project).map_err(|e| self.invalid(e))?;
        self.filesystem.write_file(&self.path, &yaml)
    }
}

/// Module path from the `module` directive of `go.mod`, if there is one.
pub fn discover_module_path(filesystem: &dyn Filesystem) -> ForgeResult<Option<String>> {
    let go_mod = Path::new("go.mod");
    if !filesystem.exists(go_mod) {
        return Ok(None);
    }

    let content = filesystem.read_to_string(go_mod)?;
    Ok(content.lines().find_map(|line| {
        line.trim()
            .strip_prefix("module")
            .filter(|rest| rest.starts_with(char::is_whitespace))
            .map(|rest| rest.trim().trim_matches('"').to_string())
            .filter(|module| !module.is_empty())
    }))
}
