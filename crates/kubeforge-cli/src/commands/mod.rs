//! Subcommand handlers.
//!
//! Each handler translates its arguments into a [`ScaffoldRequest`], hands
//! it to [`Workspace::scaffold`] and reports the [`RunSummary`].

pub mod completions;
pub mod config;
pub mod create;
pub mod edit;
pub mod init;

use std::sync::Arc;

use tracing::{debug, instrument};

use kubeforge_adapters::{
    GofmtFormatter, LocalFilesystem, MiniJinjaEngine, PassthroughFormatter, YamlProjectStore,
    builtin_registry, scaffolds::boilerplate,
};
use kubeforge_core::{
    application::{
        RunContext, RunSummary, ScaffoldRequest, ScaffoldService,
        ports::{Filesystem, ProjectStore, SourceFormatter},
    },
    domain::{ProjectContext, ProjectDescriptor, ResourceDescriptor},
};

use crate::{
    cli::{GlobalArgs, ResourceArgs},
    config::AppConfig,
    error::CliResult,
};

/// Adapters bound to one project directory.
pub struct Workspace {
    filesystem: Arc<dyn Filesystem>,
    formatter: Arc<dyn SourceFormatter>,
    store: YamlProjectStore,
}

impl Workspace {
    pub fn open(global: &GlobalArgs, config: &AppConfig) -> Self {
        let filesystem: Arc<dyn Filesystem> =
            Arc::new(LocalFilesystem::new(global.project_dir.clone()));
        let formatter: Arc<dyn SourceFormatter> = if config.formatter.enabled {
            Arc::new(GofmtFormatter::with_command(config.formatter.command.clone()))
        } else {
            Arc::new(PassthroughFormatter)
        };

        debug!(
            root = %global.project_dir.display(),
            formatter = config.formatter.enabled,
            "workspace opened"
        );

        Self {
            store: YamlProjectStore::new(Arc::clone(&filesystem)),
            filesystem,
            formatter,
        }
    }

    pub fn filesystem(&self) -> &dyn Filesystem {
        self.filesystem.as_ref()
    }

    pub fn store(&self) -> &YamlProjectStore {
        &self.store
    }

    pub fn load_project(&self) -> CliResult<ProjectDescriptor> {
        Ok(self.store.load()?)
    }

    pub fn save_project(&self, project: &ProjectDescriptor) -> CliResult<()> {
        Ok(self.store.save(project)?)
    }

    /// Run context for an existing project, header read back from disk.
    pub fn context(&self, project: &ProjectDescriptor) -> CliResult<ProjectContext> {
        let header = boilerplate::load(self.filesystem.as_ref())?;
        Ok(project.context(header))
    }

    /// Validate `request`, expand it into units and run them.
    ///
    /// `force` turns refuse-if-exists units into overwrites. Marker updates
    /// that `applied` (the parts an earlier run generated) would produce are
    /// dropped, so multi-line blocks are not inserted twice.
    #[instrument(skip_all, fields(version = %project.version))]
    pub fn scaffold(
        &self,
        project: &ProjectContext,
        request: ScaffoldRequest,
        force: bool,
        applied: Option<ScaffoldRequest>,
    ) -> CliResult<RunSummary> {
        let registry = builtin_registry();
        let scaffolder = registry.get(project.version)?;
        scaffolder.validate(project, &request)?;

        let mut units = scaffolder.units(project, &request)?;
        if let Some(applied) = applied {
            let done = scaffolder.units(project, &applied)?;
            units.retain(|unit| !(unit.is_update() && done.contains(unit)));
            debug!(remaining = units.len(), "dropped marker updates applied earlier");
        }
        if force {
            units.iter_mut().for_each(|unit| unit.force_overwrite());
        }

        let service = ScaffoldService::new(
            Arc::clone(&self.filesystem),
            Box::new(MiniJinjaEngine::new()),
            Arc::clone(&self.formatter),
        );
        let context = RunContext::new(project.clone(), request.resource().cloned());
        Ok(service.run(units, &context)?)
    }
}

/// Validated descriptor from `--group/--version/--kind/--plural`.
pub fn resource_from(args: &ResourceArgs, namespaced: bool) -> CliResult<ResourceDescriptor> {
    let mut resource = ResourceDescriptor::new(&args.group, &args.version, &args.kind)
        .with_namespaced(namespaced);
    if let Some(plural) = &args.plural {
        resource = resource.with_plural(plural.as_str());
    }
    resource.validate().map_err(kubeforge_core::error::ForgeError::from)?;
    Ok(resource)
}
