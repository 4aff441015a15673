//! `kubeforge create api` and `kubeforge create webhook`.

use tracing::{info, instrument, warn};

use kubeforge_core::{
    application::ScaffoldRequest,
    domain::{DomainError, ProjectDescriptor, ResourceDescriptor, WebhookRecord},
    error::ForgeError,
};

use crate::{
    cli::{CreateApiArgs, CreateCommands, CreateWebhookArgs, GlobalArgs},
    commands::{Workspace, resource_from},
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

pub fn execute(
    cmd: CreateCommands,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let workspace = Workspace::open(&global, &config);
    match cmd {
        CreateCommands::Api(args) => api(args, &workspace, &output),
        CreateCommands::Webhook(args) => webhook(args, &workspace, &output),
    }
}

#[instrument(skip_all, fields(kind = %args.resource.kind))]
fn api(args: CreateApiArgs, workspace: &Workspace, output: &OutputManager) -> CliResult<()> {
    let mut project = workspace.load_project()?;
    let resource = resource_from(&args.resource, args.namespaced)?;

    let resource_files = choose(args.resource_files, "Create Resource [y/n]")?;
    let controller = choose(args.controller, "Create Controller [y/n]")?;

    let applied = applied_parts(&project, &resource, resource_files, controller);
    if resource_files && applied.api && !args.force {
        return Err(ForgeError::from(DomainError::ResourceAlreadyExists {
            gvk: resource.gvk(),
        })
        .into());
    }
    if applied.any() {
        warn!(
            gvk = %resource.gvk(),
            api = applied.api,
            controller = applied.controller,
            "regenerating existing parts, their marker updates are skipped"
        );
        output.warning(&format!(
            "{} already has some of these files; regenerating them",
            resource.gvk()
        ))?;
    }

    let context = workspace.context(&project)?;
    output.header(&format!("Creating API {}", resource.gvk()))?;
    let summary = workspace.scaffold(
        &context,
        ScaffoldRequest::CreateApi {
            resource: resource.clone(),
            resource_files,
            controller,
        },
        args.force,
        applied.request(&resource),
    )?;

    project.record_api(&resource, resource_files, controller);
    workspace.save_project(&project)?;

    info!(gvk = %resource.gvk(), files = summary.files_written(), "api created");
    output.summary("create api", &summary)?;
    output.success(&format!("API {} created", resource.kind))?;
    Ok(())
}

#[instrument(skip_all, fields(kind = %args.resource.kind))]
fn webhook(args: CreateWebhookArgs, workspace: &Workspace, output: &OutputManager) -> CliResult<()> {
    let mut project = workspace.load_project()?;
    let mut resource = resource_from(&args.resource, true)?;

    match project.find_resource(&resource) {
        Some(record) => record.restore(&mut resource, args.resource.plural.is_some()),
        None => warn!(gvk = %resource.gvk(), "webhook for an API this project does not track"),
    }
    let rerun = has_webhooks(&project, &resource);
    if rerun && !args.force {
        return Err(CliError::InvalidInput {
            message: format!(
                "webhooks for {} already exist; pass --force to regenerate them",
                resource.gvk()
            ),
        });
    }

    let context = workspace.context(&project)?;
    output.header(&format!("Creating webhook for {}", resource.gvk()))?;
    let summary = workspace.scaffold(
        &context,
        ScaffoldRequest::CreateWebhook {
            resource: resource.clone(),
            defaulting: args.defaulting,
            validation: args.validation,
        },
        args.force,
        rerun.then(|| ScaffoldRequest::CreateWebhook {
            resource: resource.clone(),
            defaulting: args.defaulting,
            validation: args.validation,
        }),
    )?;

    project.record_webhooks(
        &resource,
        WebhookRecord {
            defaulting: args.defaulting,
            validation: args.validation,
        },
    );
    workspace.save_project(&project)?;

    info!(gvk = %resource.gvk(), "webhook created");
    output.summary("create webhook", &summary)?;
    output.success(&format!("Webhook for {} created", resource.kind))?;
    Ok(())
}

/// Parts of a `create api` request that an earlier run already generated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct AppliedParts {
    api: bool,
    controller: bool,
}

impl AppliedParts {
    fn any(self) -> bool {
        self.api || self.controller
    }

    /// The request whose marker updates are already in place.
    fn request(self, resource: &ResourceDescriptor) -> Option<ScaffoldRequest> {
        self.any().then(|| ScaffoldRequest::CreateApi {
            resource: resource.clone(),
            resource_files: self.api,
            controller: self.controller,
        })
    }
}

fn applied_parts(
    project: &ProjectDescriptor,
    resource: &ResourceDescriptor,
    resource_files: bool,
    controller: bool,
) -> AppliedParts {
    project
        .find_resource(resource)
        .map(|record| AppliedParts {
            api: resource_files && record.has_api(),
            controller: controller && record.controller,
        })
        .unwrap_or_default()
}

fn has_webhooks(project: &ProjectDescriptor, resource: &ResourceDescriptor) -> bool {
    project.resources.iter().any(|record| {
        record.group == resource.group
            && record.version == resource.version
            && record.kind == resource.kind
            && record.webhooks.is_some()
    })
}

/// Use the flag when given, otherwise ask on a terminal and default to yes.
fn choose(flag: Option<bool>, prompt: &str) -> CliResult<bool> {
    match flag {
        Some(value) => Ok(value),
        None => ask(prompt),
    }
}

#[cfg(feature = "interactive")]
fn ask(prompt: &str) -> CliResult<bool> {
    use std::io::IsTerminal;

    if !std::io::stdin().is_terminal() {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(true)
        .interact()
        .map_err(|e| CliError::Prompt {
            message: e.to_string(),
        })
}

#[cfg(not(feature = "interactive"))]
fn ask(_prompt: &str) -> CliResult<bool> {
    Ok(true)
}
