//! Scaffold Service - main application orchestrator.
//!
//! Runs an ordered list of render units against the filesystem:
//! 1. Resolve the unit's destination path
//! 2. Consult the existing-file policy (creation units)
//! 3. Render and format
//! 4. Write, or hand update units to the marker updater
//!
//! Fail fast: the first error stops the run and nothing is rolled back.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, SourceFormatter, TemplateEngine},
        services::{renderer::UnitRenderer, updater::MarkerUpdater},
    },
    domain::{
        IfExistsAction, ProjectContext, RenderUnit, ResourceDescriptor, TemplateData, UnitKind,
        WriteDecision, path,
    },
    error::ForgeResult,
};

/// Project and resource a run is scaffolding for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    pub project: ProjectContext,
    pub resource: Option<ResourceDescriptor>,
}

impl RunContext {
    pub fn new(project: ProjectContext, resource: Option<ResourceDescriptor>) -> Self {
        Self { project, resource }
    }

    pub fn template_data(&self) -> TemplateData {
        TemplateData::new(&self.project, self.resource.as_ref())
    }
}

/// What a run did, per destination path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub created: Vec<PathBuf>,
    pub overwritten: Vec<PathBuf>,
    pub skipped: Vec<PathBuf>,
    pub updated: Vec<PathBuf>,
    /// Update targets where every fragment was already present.
    pub unchanged: Vec<PathBuf>,
}

impl RunSummary {
    pub fn files_written(&self) -> usize {
        self.created.len() + self.overwritten.len() + self.updated.len()
    }
}

/// Main scaffolding service.
pub struct ScaffoldService {
    filesystem: Arc<dyn Filesystem>,
    renderer: UnitRenderer,
    updater: MarkerUpdater,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    ///
    /// let service = ScaffoldService::new(
    ///     Arc::new(LocalFilesystem::new(root)), // impl Filesystem
    ///     Box::new(MiniJinjaEngine::new()),     // impl TemplateEngine
    ///     Arc::new(GofmtFormatter::new()),      // impl SourceFormatter
    /// );
    /// ```
    pub fn new(
        filesystem: Arc<dyn Filesystem>,
        engine: Box<dyn TemplateEngine>,
        formatter: Arc<dyn SourceFormatter>,
    ) -> Self {
        Self {
            renderer: UnitRenderer::new(engine, Arc::clone(&formatter)),
            updater: MarkerUpdater::new(Arc::clone(&filesystem), formatter),
            filesystem,
        }
    }

    /// Run `units` strictly in order.
    #[instrument(
        skip_all,
        fields(
            units = units.len(),
            resource = %context.resource.as_ref().map(|r| r.gvk()).unwrap_or_default()
        )
    )]
    pub fn run(&self, units: Vec<RenderUnit>, context: &RunContext) -> ForgeResult<RunSummary> {
        let data = context.template_data();
        let mut summary = RunSummary::default();

        for unit in units {
            let resolved = path::resolve(&unit.path, context.resource.as_ref(), &context.project)?;
            let target = PathBuf::from(&resolved);

            match unit.kind {
                UnitKind::Template {
                    body,
                    if_exists,
                    extra,
                } => {
                    let exists = self.filesystem.exists(&target);
                    match if_exists.decide(exists) {
                        WriteDecision::Skip => {
                            debug!(path = %resolved, "exists, skipping");
                            summary.skipped.push(target);
                            continue;
                        }
                        WriteDecision::Fail => {
                            return Err(ApplicationError::AlreadyExists { path: target }.into());
                        }
                        WriteDecision::Proceed => {}
                    }

                    let content = self
                        .renderer
                        .render(&body, &resolved, &data.with_extra(&extra))?;
                    self.write(&target, &content)?;

                    info!(path = %resolved, "wrote file");
                    if exists && if_exists == IfExistsAction::Overwrite {
                        summary.overwritten.push(target);
                    } else {
                        summary.created.push(target);
                    }
                }
                UnitKind::Inserter { fragments } => {
                    if self.updater.update(&target, &fragments)? {
                        summary.updated.push(target);
                    } else {
                        summary.unchanged.push(target);
                    }
                }
            }
        }

        info!(written = summary.files_written(), "scaffold completed");
        Ok(summary)
    }

    fn write(&self, target: &Path, content: &str) -> ForgeResult<()> {
        if let Some(parent) = target.parent() {
            if !parent.as_os_str().is_empty() {
                self.filesystem.create_dir_all(parent)?;
            }
        }
        self.filesystem.write_file(target, content)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{HashMap, HashSet};
    use std::sync::Mutex;

    use super::*;
    use crate::application::ports::{MockSourceFormatter, MockTemplateEngine};
    use crate::domain::{DomainError, ProjectVersion};
    use crate::error::ForgeError;

    #[derive(Default)]
    struct Inner {
        files: HashMap<PathBuf, String>,
        dirs: HashSet<PathBuf>,
    }

    #[derive(Default)]
    struct Files(Mutex<Inner>);

    impl Files {
        fn get(&self, path: &str) -> Option<String> {
            self.0.lock().unwrap().files.get(Path::new(path)).cloned()
        }

        fn put(&self, path: &str, content: &str) {
            self.0
                .lock()
                .unwrap()
                .files
                .insert(PathBuf::from(path), content.to_string());
        }

        fn has_dir(&self, path: &str) -> bool {
            self.0.lock().unwrap().dirs.contains(Path::new(path))
        }
    }

    impl Filesystem for Files {
        fn exists(&self, path: &Path) -> bool {
            let inner = self.0.lock().unwrap();
            inner.files.contains_key(path) || inner.dirs.contains(path)
        }

        fn read_to_string(&self, path: &Path) -> ForgeResult<String> {
            self.0
                .lock()
                .unwrap()
                .files
                .get(path)
                .cloned()
                .ok_or_else(|| {
                    ApplicationError::FileNotFound {
                        path: path.to_path_buf(),
                    }
                    .into()
                })
        }

        fn write_file(&self, path: &Path, content: &str) -> ForgeResult<()> {
            self.put(&path.to_string_lossy(), content);
            Ok(())
        }

        fn create_dir_all(&self, path: &Path) -> ForgeResult<()> {
            self.0.lock().unwrap().dirs.insert(path.to_path_buf());
            Ok(())
        }
    }

    /// Engine that echoes the body with `{kind}` replaced.
    fn echo_engine() -> Box<MockTemplateEngine> {
        let mut engine = MockTemplateEngine::new();
        engine.expect_render().returning(|_, body, data| {
            let kind = data
                .resource
                .as_ref()
                .map(|r| r.kind.clone())
                .unwrap_or_default();
            Ok(body.replace("{kind}", &kind))
        });
        Box::new(engine)
    }

    fn no_format() -> Arc<MockSourceFormatter> {
        let mut formatter = MockSourceFormatter::new();
        formatter.expect_applies_to().return_const(false);
        Arc::new(formatter)
    }

    fn context() -> RunContext {
        let mut resource = ResourceDescriptor::new("crew", "v1", "FirstMate");
        resource.validate().unwrap();
        RunContext::new(
            ProjectContext {
                repo: "example.com/fleet".into(),
                domain: "example.com".into(),
                version: ProjectVersion::V3,
                ..ProjectContext::default()
            },
            Some(resource),
        )
    }

    fn service(files: &Arc<Files>) -> ScaffoldService {
        ScaffoldService::new(files.clone(), echo_engine(), no_format())
    }

    #[test]
    fn creates_file_at_resolved_path() {
        let files = Arc::new(Files::default());
        let summary = service(&files)
            .run(
                vec![RenderUnit::template(
                    "api/%[group]/%[version]/%[kind]_types.go",
                    "type {kind} struct{}",
                )],
                &context(),
            )
            .unwrap();

        assert_eq!(
            files.get("api/v1/firstmate_types.go").as_deref(),
            Some("type FirstMate struct{}")
        );
        assert!(files.has_dir("api/v1"));
        assert_eq!(summary.created, vec![PathBuf::from("api/v1/firstmate_types.go")]);
    }

    #[test]
    fn error_policy_fails_without_touching_file() {
        let files = Arc::new(Files::default());
        files.put("api/v1/firstmate_types.go", "user edits");

        let err = service(&files)
            .run(
                vec![RenderUnit::template("api/%[version]/%[kind]_types.go", "new")],
                &context(),
            )
            .unwrap_err();

        match err {
            ForgeError::Application(ApplicationError::AlreadyExists { path }) => {
                assert_eq!(path, PathBuf::from("api/v1/firstmate_types.go"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(
            files.get("api/v1/firstmate_types.go").as_deref(),
            Some("user edits")
        );
    }

    #[test]
    fn skip_policy_keeps_existing_file_and_creates_nothing() {
        let files = Arc::new(Files::default());
        files.put("hack/boilerplate.go.txt", "mine");

        let summary = service(&files)
            .run(
                vec![
                    RenderUnit::template("hack/boilerplate.go.txt", "theirs")
                        .if_exists(IfExistsAction::Skip),
                ],
                &context(),
            )
            .unwrap();

        assert_eq!(files.get("hack/boilerplate.go.txt").as_deref(), Some("mine"));
        assert!(!files.has_dir("hack"));
        assert_eq!(summary.skipped.len(), 1);
        assert_eq!(summary.files_written(), 0);
    }

    #[test]
    fn overwrite_policy_replaces_content() {
        let files = Arc::new(Files::default());
        files.put("config/rbac/role.yaml", "old");

        let summary = service(&files)
            .run(
                vec![
                    RenderUnit::template("config/rbac/role.yaml", "new")
                        .if_exists(IfExistsAction::Overwrite),
                ],
                &context(),
            )
            .unwrap();

        assert_eq!(files.get("config/rbac/role.yaml").as_deref(), Some("new"));
        assert_eq!(summary.overwritten.len(), 1);
    }

    #[test]
    fn run_stops_at_first_failure() {
        let files = Arc::new(Files::default());
        files.put("b.txt", "exists");

        let result = service(&files).run(
            vec![
                RenderUnit::template("a.txt", "a"),
                RenderUnit::template("b.txt", "b"),
                RenderUnit::template("c.txt", "c"),
            ],
            &context(),
        );

        assert!(result.is_err());
        assert!(files.get("a.txt").is_some());
        assert!(files.get("c.txt").is_none());
    }

    #[test]
    fn update_units_patch_existing_files() {
        let files = Arc::new(Files::default());
        files.put("main.go", "func init() {\n\t// +kubeforge:scaffold:scheme\n}\n");

        let unit = RenderUnit::inserter("main.go").insert_at("scheme", "\tcrewv1.AddToScheme(scheme)");
        let summary = service(&files).run(vec![unit.clone()], &context()).unwrap();
        assert_eq!(summary.updated, vec![PathBuf::from("main.go")]);

        let again = service(&files).run(vec![unit], &context()).unwrap();
        assert_eq!(again.unchanged, vec![PathBuf::from("main.go")]);
        assert_eq!(
            files.get("main.go").unwrap().matches("crewv1.AddToScheme").count(),
            1
        );
    }

    #[test]
    fn unresolved_token_without_resource_is_an_error() {
        let files = Arc::new(Files::default());
        let ctx = RunContext::new(context().project, None);

        let err = service(&files)
            .run(vec![RenderUnit::template("api/%[version]/x.go", "")], &ctx)
            .unwrap_err();
        assert!(matches!(
            err,
            ForgeError::Domain(DomainError::UnresolvedPathToken { .. })
        ));
    }
}
