//! Built-in Go operator scaffolds, one per project layout version.
//!
//! [`builtin_registry`] is the single entry point: it registers a
//! [`GoScaffolder`] for layouts 2, 3 and 4. Layout 1 is not registered,
//! so asking the registry for it yields `UnsupportedProjectVersion`.
//!
//! Each request expands to template units first and marker updates last, so
//! a hub file created by one unit is always on disk before it is patched.

pub mod boilerplate;
pub mod templates;

use kubeforge_core::{
    application::{ScaffoldRequest, Scaffolder, ScaffolderRegistry},
    domain::{
        DomainError, IfExistsAction, ProjectContext, ProjectVersion, RenderUnit,
        ResourceDescriptor, marker::names, path,
    },
    error::ForgeResult,
};

use templates::{api, controller, project, webhook};

/// Build the registry of every layout this crate ships.
pub fn builtin_registry() -> ScaffolderRegistry {
    let mut registry = ScaffolderRegistry::new();
    registry.register(Box::new(GoScaffolder::v2()));
    registry.register(Box::new(GoScaffolder::v3()));
    registry.register(Box::new(GoScaffolder::v4()));
    registry
}

// ── Layout ───────────────────────────────────────────────────────────────────

/// Where things live, and which toolchain versions a layout pins.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Layout {
    main: &'static str,
    controllers: &'static str,
    controller_package: &'static str,
    /// `None` puts webhooks next to the API types.
    webhooks: Option<&'static str>,
    go_version: &'static str,
    k8s_version: &'static str,
    controller_runtime: &'static str,
}

const LAYOUT_V2: Layout = Layout {
    main: "main.go",
    controllers: "controllers",
    controller_package: "controllers",
    webhooks: None,
    go_version: "1.13",
    k8s_version: "v0.17.2",
    controller_runtime: "v0.5.0",
};

const LAYOUT_V3: Layout = Layout {
    main: "main.go",
    controllers: "controllers",
    controller_package: "controllers",
    webhooks: None,
    go_version: "1.19",
    k8s_version: "v0.26.0",
    controller_runtime: "v0.14.1",
};

const LAYOUT_V4: Layout = Layout {
    main: "cmd/main.go",
    controllers: "internal/controller",
    controller_package: "controller",
    webhooks: Some("internal/webhook"),
    go_version: "1.22",
    k8s_version: "v0.31.0",
    controller_runtime: "v0.19.0",
};

const EDITOR_VERBS: &[&str] = &["create", "delete", "get", "list", "patch", "update", "watch"];
const VIEWER_VERBS: &[&str] = &["get", "list", "watch"];

// ── GoScaffolder ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GoScaffolder {
    version: ProjectVersion,
    layout: Layout,
}

impl GoScaffolder {
    pub fn v2() -> Self {
        Self {
            version: ProjectVersion::V2,
            layout: LAYOUT_V2,
        }
    }

    pub fn v3() -> Self {
        Self {
            version: ProjectVersion::V3,
            layout: LAYOUT_V3,
        }
    }

    pub fn v4() -> Self {
        Self {
            version: ProjectVersion::V4,
            layout: LAYOUT_V4,
        }
    }

    fn api_dir(&self, project: &ProjectContext) -> &'static str {
        if project.multigroup {
            "apis/%[group]/%[version]"
        } else {
            "api/%[group]/%[version]"
        }
    }

    fn controllers_dir(&self) -> String {
        format!("{}/%[group]", self.layout.controllers)
    }

    fn init_units(&self, project: &ProjectContext) -> Vec<RenderUnit> {
        let layout = &self.layout;
        let leader_election_id = format!("{}.{}", leader_election_prefix(project), project.domain);

        vec![
            RenderUnit::template("go.mod", project::GO_MOD)
                .if_exists(IfExistsAction::Overwrite)
                .with_extra("go_version", layout.go_version)
                .with_extra("k8s_version", layout.k8s_version)
                .with_extra("controller_runtime", layout.controller_runtime),
            RenderUnit::template(boilerplate::BOILERPLATE_PATH, project::BOILERPLATE)
                .if_exists(IfExistsAction::Skip),
            RenderUnit::template(layout.main, project::MAIN)
                .with_extra("leader_election_id", leader_election_id),
            RenderUnit::template("Makefile", project::MAKEFILE)
                .if_exists(IfExistsAction::Skip)
                .with_extra("main", layout.main),
            RenderUnit::template("Dockerfile", project::DOCKERFILE)
                .if_exists(IfExistsAction::Skip)
                .with_extra("main", layout.main)
                .with_extra("go_version", layout.go_version),
            RenderUnit::template(".gitignore", project::GITIGNORE).if_exists(IfExistsAction::Skip),
            RenderUnit::template("config/default/kustomization.yaml", project::DEFAULT_KUSTOMIZATION)
                .if_exists(IfExistsAction::Skip),
            RenderUnit::template("config/manager/manager.yaml", project::MANAGER)
                .if_exists(IfExistsAction::Overwrite),
            RenderUnit::template("config/rbac/kustomization.yaml", project::RBAC_KUSTOMIZATION)
                .if_exists(IfExistsAction::Skip),
            RenderUnit::template(
                "config/samples/kustomization.yaml",
                project::SAMPLES_KUSTOMIZATION,
            )
            .if_exists(IfExistsAction::Skip),
        ]
    }

    fn api_units(
        &self,
        project: &ProjectContext,
        resource: &ResourceDescriptor,
        resource_files: bool,
        with_controller: bool,
    ) -> ForgeResult<Vec<RenderUnit>> {
        let api_dir = self.api_dir(project);
        let alias = resource.import_alias();
        let package = api_package(project, resource);
        let kind = resource.kind.to_lowercase();

        let mut templates = Vec::new();
        let mut updates = Vec::new();

        if resource_files {
            templates.extend([
                RenderUnit::template(
                    format!("{api_dir}/groupversion_info.go"),
                    api::GROUP_VERSION_INFO,
                )
                .if_exists(IfExistsAction::Skip),
                RenderUnit::template(format!("{api_dir}/%[kind]_types.go"), api::TYPES),
                RenderUnit::template("config/samples/%[group]_%[version]_%[kind].yaml", api::SAMPLE)
                    .if_exists(IfExistsAction::Skip),
                RenderUnit::template("config/crd/kustomization.yaml", api::CRD_KUSTOMIZATION)
                    .if_exists(IfExistsAction::Skip),
                role_unit("editor", EDITOR_VERBS),
                role_unit("viewer", VIEWER_VERBS),
            ]);

            updates.extend([
                RenderUnit::inserter("config/crd/kustomization.yaml").insert_at(
                    names::CRD_RESOURCES,
                    format!(
                        "- bases/{}_{}.yaml",
                        resource.qualified_group(&project.domain),
                        resource.plural
                    ),
                ),
                RenderUnit::inserter("config/samples/kustomization.yaml").insert_at(
                    names::SAMPLES,
                    format!("- {}_{}_{}.yaml", resource.group, resource.version, kind),
                ),
                RenderUnit::inserter("config/rbac/kustomization.yaml")
                    .insert_at(names::RBAC, format!("- {kind}_editor_role.yaml"))
                    .insert_at(names::RBAC, format!("- {kind}_viewer_role.yaml")),
                RenderUnit::inserter(self.layout.main)
                    .insert_at(names::IMPORTS, format!("\t{alias} \"{package}\""))
                    .insert_at(
                        names::SCHEME,
                        format!("\tutilruntime.Must({alias}.AddToScheme(scheme))"),
                    ),
            ]);
        }

        if with_controller {
            let controllers_dir = self.controllers_dir();
            let package_name = self.controller_package_name(project, resource);
            let resolved_dir = path::resolve(&controllers_dir, Some(resource), project)?;
            let crd_path = crd_path_from(&resolved_dir);

            templates.extend([
                RenderUnit::template(
                    format!("{controllers_dir}/%[kind]_controller.go"),
                    controller::CONTROLLER,
                )
                .with_extra("package_name", package_name.as_str()),
                RenderUnit::template(format!("{controllers_dir}/suite_test.go"), controller::SUITE_TEST)
                    .if_exists(IfExistsAction::Skip)
                    .with_extra("package_name", package_name.as_str())
                    .with_extra("crd_path", crd_path),
            ]);

            let (import, qualifier) = if project.multigroup {
                let qualifier = format!("{}controller", safe_group(resource));
                (
                    format!("\t{qualifier} \"{}/{resolved_dir}\"", project.repo),
                    qualifier,
                )
            } else {
                (
                    format!("\t\"{}/{resolved_dir}\"", project.repo),
                    package_name.clone(),
                )
            };

            updates.extend([
                RenderUnit::inserter(format!("{controllers_dir}/suite_test.go"))
                    .insert_at(names::IMPORTS, format!("\t{alias} \"{package}\""))
                    .insert_at(
                        names::SCHEME,
                        format!(
                            "\terr = {alias}.AddToScheme(scheme.Scheme)\n\tExpect(err).NotTo(HaveOccurred())\n"
                        ),
                    ),
                RenderUnit::inserter(self.layout.main)
                    .insert_at(names::IMPORTS, import)
                    .insert_at(
                        names::BUILDER,
                        reconciler_setup(&qualifier, &resource.kind, self.version),
                    ),
            ]);
        }

        templates.extend(updates);
        Ok(templates)
    }

    fn webhook_units(
        &self,
        project: &ProjectContext,
        resource: &ResourceDescriptor,
        defaulting: bool,
        validation: bool,
    ) -> ForgeResult<Vec<RenderUnit>> {
        let webhook_path = format!(
            "{}-{}-{}",
            resource.qualified_group(&project.domain).replace('.', "-"),
            resource.version,
            resource.kind.to_lowercase()
        );

        let (file, body) = match self.layout.webhooks {
            Some(dir) => (
                format!("{dir}/%[group]/%[version]/%[kind]_webhook.go"),
                webhook::WEBHOOK_PACKAGE,
            ),
            None => (
                format!("{}/%[kind]_webhook.go", self.api_dir(project)),
                webhook::WEBHOOK_INLINE,
            ),
        };

        let main_update = match self.layout.webhooks {
            Some(dir) => {
                let resolved = path::resolve(
                    &format!("{dir}/%[group]/%[version]"),
                    Some(resource),
                    project,
                )?;
                let qualifier = format!("webhook{}", resource.import_alias());
                RenderUnit::inserter(self.layout.main)
                    .insert_at(
                        names::IMPORTS,
                        format!("\t{qualifier} \"{}/{resolved}\"", project.repo),
                    )
                    .insert_at(
                        names::BUILDER,
                        webhook_setup(
                            &format!("{qualifier}.Setup{}WebhookWithManager(mgr)", resource.kind),
                            &resource.kind,
                        ),
                    )
            }
            None => RenderUnit::inserter(self.layout.main).insert_at(
                names::BUILDER,
                webhook_setup(
                    &format!(
                        "(&{}.{}{{}}).SetupWebhookWithManager(mgr)",
                        resource.import_alias(),
                        resource.kind
                    ),
                    &resource.kind,
                ),
            ),
        };

        Ok(vec![
            RenderUnit::template(file, body)
                .with_extra("defaulting", defaulting)
                .with_extra("validation", validation)
                .with_extra("webhook_path", webhook_path),
            main_update,
        ])
    }

    fn controller_package_name(
        &self,
        project: &ProjectContext,
        resource: &ResourceDescriptor,
    ) -> String {
        if project.multigroup && !resource.group.is_empty() {
            safe_group(resource)
        } else {
            self.layout.controller_package.to_string()
        }
    }
}

impl Scaffolder for GoScaffolder {
    fn version(&self) -> ProjectVersion {
        self.version
    }

    fn validate(&self, project: &ProjectContext, request: &ScaffoldRequest) -> ForgeResult<()> {
        if project.repo.is_empty() {
            return Err(DomainError::MissingRequiredField { field: "repo" }.into());
        }

        match request {
            ScaffoldRequest::Init => {
                if project.domain.is_empty() {
                    return Err(DomainError::MissingRequiredField { field: "domain" }.into());
                }
            }
            ScaffoldRequest::CreateApi {
                resource,
                resource_files,
                controller,
            } => {
                if !resource_files && !controller {
                    return Err(DomainError::MissingRequiredField {
                        field: "--resource or --controller",
                    }
                    .into());
                }
                resource.clone().validate()?;

                if *resource_files
                    && !project.multigroup
                    && !project.groups.is_empty()
                    && !project.groups.contains(&resource.group)
                {
                    return Err(DomainError::MultipleGroupsNotAllowed {
                        group: resource.group.clone(),
                    }
                    .into());
                }
            }
            ScaffoldRequest::CreateWebhook {
                resource,
                defaulting,
                validation,
            } => {
                if !defaulting && !validation {
                    return Err(DomainError::MissingRequiredField {
                        field: "--defaulting or --programmatic-validation",
                    }
                    .into());
                }
                resource.clone().validate()?;
            }
        }

        Ok(())
    }

    fn units(
        &self,
        project: &ProjectContext,
        request: &ScaffoldRequest,
    ) -> ForgeResult<Vec<RenderUnit>> {
        match request {
            ScaffoldRequest::Init => Ok(self.init_units(project)),
            ScaffoldRequest::CreateApi {
                resource,
                resource_files,
                controller,
            } => self.api_units(project, resource, *resource_files, *controller),
            ScaffoldRequest::CreateWebhook {
                resource,
                defaulting,
                validation,
            } => self.webhook_units(project, resource, *defaulting, *validation),
        }
    }
}

// ── Helpers ──────────────────────────────────────────────────────────────────

fn role_unit(role: &str, verbs: &[&str]) -> RenderUnit {
    RenderUnit::template(format!("config/rbac/%[kind]_{role}_role.yaml"), api::CRD_ROLE)
        .if_exists(IfExistsAction::Overwrite)
        .with_extra("role", role)
        .with_extra("verbs", verbs.iter().map(|v| v.to_string()).collect::<Vec<_>>())
}

fn safe_group(resource: &ResourceDescriptor) -> String {
    resource.group.replace(['-', '.'], "")
}

fn api_package(project: &ProjectContext, resource: &ResourceDescriptor) -> String {
    if project.multigroup {
        format!("{}/apis/{}/{}", project.repo, resource.group, resource.version)
    } else {
        format!("{}/api/{}", project.repo, resource.version)
    }
}

fn leader_election_prefix(project: &ProjectContext) -> String {
    if project.project_name.is_empty() {
        "manager".to_string()
    } else {
        project.project_name.clone()
    }
}

/// `filepath.Join` arguments from a controller dir back to `config/crd/bases`.
fn crd_path_from(dir: &str) -> String {
    let depth = dir.split('/').filter(|s| !s.is_empty()).count();
    let mut parts: Vec<String> = vec!["\"..\"".to_string(); depth];
    parts.extend(["\"config\"", "\"crd\"", "\"bases\""].map(String::from));
    parts.join(", ")
}

fn reconciler_setup(qualifier: &str, kind: &str, version: ProjectVersion) -> String {
    let log_field = if version == ProjectVersion::V2 {
        format!("\t\tLog:    ctrl.Log.WithName(\"controllers\").WithName(\"{kind}\"),\n")
    } else {
        String::new()
    };
    format!(
        "\tif err = (&{qualifier}.{kind}Reconciler{{\n\
         \t\tClient: mgr.GetClient(),\n\
         {log_field}\
         \t\tScheme: mgr.GetScheme(),\n\
         \t}}).SetupWithManager(mgr); err != nil {{\n\
         \t\tsetupLog.Error(err, \"unable to create controller\", \"controller\", \"{kind}\")\n\
         \t\tos.Exit(1)\n\
         \t}}\n"
    )
}

fn webhook_setup(call: &str, kind: &str) -> String {
    format!(
        "\tif os.Getenv(\"ENABLE_WEBHOOKS\") != \"false\" {{\n\
         \t\tif err = {call}; err != nil {{\n\
         \t\t\tsetupLog.Error(err, \"unable to create webhook\", \"webhook\", \"{kind}\")\n\
         \t\t\tos.Exit(1)\n\
         \t\t}}\n\
         \t}}\n"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use kubeforge_core::domain::{UnitKind, ValidationError};
    use kubeforge_core::error::ForgeError;

    fn project(version: ProjectVersion, multigroup: bool) -> ProjectContext {
        ProjectContext {
            repo: "example.com/fleet".into(),
            domain: "example.com".into(),
            version,
            multigroup,
            project_name: "fleet".into(),
            ..ProjectContext::default()
        }
    }

    fn frigate() -> ResourceDescriptor {
        let mut r = ResourceDescriptor::new("ship", "v1beta1", "Frigate");
        r.validate().unwrap();
        r
    }

    fn paths(units: &[RenderUnit]) -> Vec<&str> {
        units.iter().map(|u| u.path.as_str()).collect()
    }

    #[test]
    fn registry_serves_layouts_two_to_four() {
        let registry = builtin_registry();
        assert_eq!(
            registry.versions().collect::<Vec<_>>(),
            vec![ProjectVersion::V2, ProjectVersion::V3, ProjectVersion::V4]
        );
        assert!(registry.get(ProjectVersion::V1).is_err());
    }

    #[test]
    fn init_places_main_per_layout() {
        let v3 = GoScaffolder::v3().units(&project(ProjectVersion::V3, false), &ScaffoldRequest::Init);
        let v4 = GoScaffolder::v4().units(&project(ProjectVersion::V4, false), &ScaffoldRequest::Init);

        assert!(paths(&v3.unwrap()).contains(&"main.go"));
        assert!(paths(&v4.unwrap()).contains(&"cmd/main.go"));
    }

    #[test]
    fn create_api_runs_templates_before_updates() {
        let request = ScaffoldRequest::CreateApi {
            resource: frigate(),
            resource_files: true,
            controller: true,
        };
        let units = GoScaffolder::v3()
            .units(&project(ProjectVersion::V3, false), &request)
            .unwrap();

        let first_update = units.iter().position(RenderUnit::is_update).unwrap();
        assert!(units[first_update..].iter().all(RenderUnit::is_update));
        assert!(paths(&units).contains(&"api/%[group]/%[version]/%[kind]_types.go"));
        assert!(paths(&units).contains(&"controllers/%[group]/%[kind]_controller.go"));
    }

    #[test]
    fn types_file_refuses_to_overwrite() {
        let request = ScaffoldRequest::CreateApi {
            resource: frigate(),
            resource_files: true,
            controller: false,
        };
        let units = GoScaffolder::v3()
            .units(&project(ProjectVersion::V3, false), &request)
            .unwrap();
        let types = units
            .iter()
            .find(|u| u.path.ends_with("_types.go"))
            .unwrap();

        assert!(matches!(
            types.kind,
            UnitKind::Template {
                if_exists: IfExistsAction::Error,
                ..
            }
        ));
    }

    #[test]
    fn multigroup_controller_import_is_aliased() {
        let request = ScaffoldRequest::CreateApi {
            resource: frigate(),
            resource_files: false,
            controller: true,
        };
        let units = GoScaffolder::v3()
            .units(&project(ProjectVersion::V3, true), &request)
            .unwrap();
        let main = units
            .iter()
            .find(|u| u.is_update() && u.path == "main.go")
            .unwrap();

        let UnitKind::Inserter { fragments } = &main.kind else {
            panic!("expected inserter");
        };
        let imports = &fragments[&kubeforge_core::domain::Marker::go(names::IMPORTS)];
        assert_eq!(
            imports,
            &vec!["\tshipcontroller \"example.com/fleet/controllers/ship\"".to_string()]
        );
    }

    #[test]
    fn v4_webhook_lives_in_its_own_package() {
        let request = ScaffoldRequest::CreateWebhook {
            resource: frigate(),
            defaulting: true,
            validation: false,
        };
        let units = GoScaffolder::v4()
            .units(&project(ProjectVersion::V4, false), &request)
            .unwrap();

        assert_eq!(
            paths(&units),
            vec!["internal/webhook/%[group]/%[version]/%[kind]_webhook.go", "cmd/main.go"]
        );
    }

    #[test]
    fn validate_rejects_empty_requests() {
        let scaffolder = GoScaffolder::v3();
        let ctx = project(ProjectVersion::V3, false);

        let api = ScaffoldRequest::CreateApi {
            resource: frigate(),
            resource_files: false,
            controller: false,
        };
        assert!(scaffolder.validate(&ctx, &api).is_err());

        let webhook = ScaffoldRequest::CreateWebhook {
            resource: frigate(),
            defaulting: false,
            validation: false,
        };
        assert!(scaffolder.validate(&ctx, &webhook).is_err());
    }

    #[test]
    fn validate_checks_resource() {
        let request = ScaffoldRequest::CreateApi {
            resource: ResourceDescriptor::new("Ship", "v1", "Frigate"),
            resource_files: true,
            controller: true,
        };
        let err = GoScaffolder::v3()
            .validate(&project(ProjectVersion::V3, false), &request)
            .unwrap_err();

        assert!(matches!(
            err,
            ForgeError::Domain(DomainError::Validation(
                ValidationError::InvalidGroupFormat { .. }
            ))
        ));
    }

    #[test]
    fn single_group_project_refuses_a_second_group() {
        let mut ctx = project(ProjectVersion::V4, false);
        ctx.groups = vec!["ship".into()];
        let crew = ScaffoldRequest::CreateApi {
            resource: ResourceDescriptor::new("crew", "v1beta1", "FirstMate"),
            resource_files: true,
            controller: true,
        };

        let err = GoScaffolder::v4().validate(&ctx, &crew).unwrap_err();
        assert!(matches!(
            err,
            ForgeError::Domain(DomainError::MultipleGroupsNotAllowed { ref group }) if group == "crew"
        ));

        let same_group = ScaffoldRequest::CreateApi {
            resource: ResourceDescriptor::new("ship", "v1", "Destroyer"),
            resource_files: true,
            controller: true,
        };
        assert!(GoScaffolder::v4().validate(&ctx, &same_group).is_ok());

        let controller_only = ScaffoldRequest::CreateApi {
            resource: ResourceDescriptor::new("crew", "v1beta1", "FirstMate"),
            resource_files: false,
            controller: true,
        };
        assert!(GoScaffolder::v4().validate(&ctx, &controller_only).is_ok());

        ctx.multigroup = true;
        assert!(GoScaffolder::v4().validate(&ctx, &crew).is_ok());
    }

    #[test]
    fn init_requires_repo_and_domain() {
        let mut ctx = project(ProjectVersion::V4, false);
        ctx.domain.clear();
        assert!(GoScaffolder::v4().validate(&ctx, &ScaffoldRequest::Init).is_err());
    }

    #[test]
    fn crd_path_climbs_to_project_root() {
        assert_eq!(
            crd_path_from("internal/controller"),
            "\"..\", \"..\", \"config\", \"crd\", \"bases\""
        );
        assert_eq!(crd_path_from("controllers"), "\"..\", \"config\", \"crd\", \"bases\"");
    }
}
