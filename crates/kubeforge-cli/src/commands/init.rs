//! `kubeforge init`: write the project skeleton and the PROJECT file.

use std::path::{Path, PathBuf};

use tracing::{info, instrument};

use kubeforge_adapters::{PROJECT_FILE, discover_module_path, scaffolds::boilerplate};
use kubeforge_core::{
    application::{ApplicationError, ScaffoldRequest, ports::ProjectStore},
    domain::{DomainError, ProjectDescriptor},
    error::ForgeError,
};

use crate::{
    cli::{GlobalArgs, InitArgs},
    commands::Workspace,
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[instrument(skip_all, fields(dir = %global.project_dir.display()))]
pub fn execute(
    args: InitArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    std::fs::create_dir_all(&global.project_dir)?;
    let workspace = Workspace::open(&global, &config);

    if workspace.store().exists() {
        return Err(ForgeError::from(ApplicationError::AlreadyExists {
            path: PathBuf::from(PROJECT_FILE),
        })
        .into());
    }

    let repo = match args.repo {
        Some(repo) => repo,
        None => discover_module_path(workspace.filesystem())?
            .ok_or(ForgeError::from(DomainError::MissingRequiredField { field: "repo" }))?,
    };

    let mut project = ProjectDescriptor::new(
        args.project_version
            .unwrap_or(config.defaults.project_version),
        args.domain.unwrap_or(config.defaults.domain),
        repo,
    );
    project.project_name = args
        .project_name
        .unwrap_or_else(|| default_project_name(&global.project_dir));
    project.multigroup = args.multigroup;

    let header = boilerplate::generate(args.license.into(), &args.owner);
    let context = project.context(header);

    output.header(&format!(
        "Initialising {} (layout v{})",
        project.repo, project.version
    ))?;
    let summary = workspace.scaffold(&context, ScaffoldRequest::Init, false, None)?;
    workspace.save_project(&project)?;

    info!(repo = %project.repo, version = %project.version, "project initialised");
    output.summary("init", &summary)?;
    output.success(&format!("Project {} ready", project.project_name))?;
    output.print("Next: kubeforge create api --group <group> --version <version> --kind <Kind>")?;

    Ok(())
}

/// Lower-cased name of the project directory.
fn default_project_name(dir: &Path) -> String {
    std::fs::canonicalize(dir)
        .unwrap_or_else(|_| dir.to_path_buf())
        .file_name()
        .and_then(|name| name.to_str())
        .map(str::to_lowercase)
        .unwrap_or_else(|| "project".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_name_comes_from_directory() {
        let root = tempfile::tempdir().unwrap();
        let dir = root.path().join("Fleet-Operator");
        std::fs::create_dir(&dir).unwrap();

        assert_eq!(default_project_name(&dir), "fleet-operator");
    }
}
