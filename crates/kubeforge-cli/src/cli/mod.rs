//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases,
//! help text, and value enums.  No business logic lives here.

use clap::{Args, Parser, Subcommand, ValueEnum};

use kubeforge_adapters::scaffolds::boilerplate::License as CoreLicense;
use kubeforge_core::domain::ProjectVersion;

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

#[derive(Debug, Parser)]
#[command(
    name    = "kubeforge",
    bin_name = "kubeforge",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Scaffold Kubernetes operator projects",
    long_about = "kubeforge generates the skeleton of a Go operator project \
                  (API types, controllers, webhooks, RBAC and kustomize manifests) \
                  and wires new APIs into previously generated files.",
    after_help = "EXAMPLES:\n\
        \x20 kubeforge init --domain example.com --repo example.com/fleet\n\
        \x20 kubeforge create api --group ship --version v1beta1 --kind Frigate\n\
        \x20 kubeforge create webhook --group ship --version v1beta1 --kind Frigate --defaulting",
    arg_required_else_help = true,
    subcommand_required    = true,
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Create a new operator project in the project directory.
    #[command(after_help = "EXAMPLES:\n\
            \x20 kubeforge init --domain example.com --repo example.com/fleet\n\
            \x20 kubeforge init --domain example.com --project-version 3 --license none")]
    Init(InitArgs),

    /// Scaffold an API or a webhook into an existing project.
    #[command(subcommand)]
    Create(CreateCommands),

    /// Change project-wide settings recorded in the PROJECT file.
    #[command(after_help = "EXAMPLES:\n\
            \x20 kubeforge edit --multigroup\n\
            \x20 kubeforge edit --multigroup=false")]
    Edit(EditArgs),

    /// Generate shell completion scripts.
    #[command(after_help = "EXAMPLES:\n\
            \x20 kubeforge completions bash > ~/.local/share/bash-completion/completions/kubeforge\n\
            \x20 kubeforge completions zsh  > ~/.zfunc/_kubeforge")]
    Completions(CompletionsArgs),

    /// Inspect the tool configuration.
    #[command(
        subcommand,
        after_help = "EXAMPLES:\n\
            \x20 kubeforge config get defaults.domain\n\
            \x20 kubeforge config list"
    )]
    Config(ConfigCommands),
}

#[derive(Debug, Subcommand)]
pub enum CreateCommands {
    /// Scaffold a Kubernetes API (types, samples, RBAC) and its controller.
    Api(CreateApiArgs),

    /// Scaffold admission webhooks for an existing API.
    Webhook(CreateWebhookArgs),
}

// ── init ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Falls back to `defaults.domain` from the tool configuration.
    #[arg(long, value_name = "DOMAIN", help = "Domain for API groups")]
    pub domain: Option<String>,

    /// Read from `go.mod` when omitted.
    #[arg(long, value_name = "MODULE", help = "Go module path")]
    pub repo: Option<String>,

    #[arg(
        long = "project-version",
        value_name = "VERSION",
        help = "Project layout version (2, 3 or 4)"
    )]
    pub project_version: Option<ProjectVersion>,

    /// Defaults to the name of the project directory.
    #[arg(long = "project-name", value_name = "NAME", help = "Project name")]
    pub project_name: Option<String>,

    #[arg(long, value_name = "OWNER", default_value = "", help = "Copyright owner")]
    pub owner: String,

    #[arg(long, value_enum, default_value = "apache2", help = "License header")]
    pub license: License,

    #[arg(long, help = "Lay out APIs by group (apis/<group>/<version>)")]
    pub multigroup: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum License {
    Apache2,
    None,
}

impl From<License> for CoreLicense {
    fn from(license: License) -> Self {
        match license {
            License::Apache2 => Self::Apache2,
            License::None => Self::None,
        }
    }
}

// ── create ────────────────────────────────────────────────────────────────────

/// Group/version/kind shared by `create api` and `create webhook`.
#[derive(Debug, Args)]
pub struct ResourceArgs {
    #[arg(long, value_name = "GROUP", help = "API group, e.g. ship")]
    pub group: String,

    #[arg(long, value_name = "VERSION", help = "API version, e.g. v1beta1")]
    pub version: String,

    #[arg(long, value_name = "KIND", help = "Kind in UpperCamelCase, e.g. Frigate")]
    pub kind: String,

    #[arg(long, value_name = "PLURAL", help = "Override the plural resource name")]
    pub plural: Option<String>,
}

#[derive(Debug, Args)]
pub struct CreateApiArgs {
    #[command(flatten)]
    pub resource: ResourceArgs,

    /// Omit to be prompted on a terminal.
    #[arg(
        long = "resource",
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Generate the resource files"
    )]
    pub resource_files: Option<bool>,

    /// Omit to be prompted on a terminal.
    #[arg(
        long,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Generate the controller"
    )]
    pub controller: Option<bool>,

    #[arg(
        long,
        action = clap::ArgAction::Set,
        num_args = 0..=1,
        default_missing_value = "true",
        default_value = "true",
        help = "Whether the resource is namespaced"
    )]
    pub namespaced: bool,

    #[arg(long, help = "Regenerate files of an API that already exists")]
    pub force: bool,
}

#[derive(Debug, Args)]
pub struct CreateWebhookArgs {
    #[command(flatten)]
    pub resource: ResourceArgs,

    #[arg(long, help = "Scaffold a mutating (defaulting) webhook")]
    pub defaulting: bool,

    #[arg(
        long = "programmatic-validation",
        help = "Scaffold a validating webhook"
    )]
    pub validation: bool,

    #[arg(long, help = "Overwrite an existing webhook file")]
    pub force: bool,
}

// ── edit ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct EditArgs {
    #[arg(
        long,
        num_args = 0..=1,
        default_missing_value = "true",
        help = "Enable or disable the multi-group layout"
    )]
    pub multigroup: Option<bool>,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── config subcommands ────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Print the value of a configuration key.
    Get {
        /// Dotted key path, e.g. `formatter.command`.
        key: String,
    },
    /// Print the effective configuration.
    List,
    /// Print the path of the default configuration file.
    Path,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::{CommandFactory, Parser};

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_create_api() {
        let cli = Cli::parse_from([
            "kubeforge",
            "create",
            "api",
            "--group",
            "ship",
            "--version",
            "v1beta1",
            "--kind",
            "Frigate",
            "--resource",
            "--controller=false",
        ]);
        let Commands::Create(CreateCommands::Api(args)) = cli.command else {
            panic!("expected create api");
        };
        assert_eq!(args.resource.kind, "Frigate");
        assert_eq!(args.resource_files, Some(true));
        assert_eq!(args.controller, Some(false));
        assert!(args.namespaced);
    }

    #[test]
    fn cluster_scoped_api() {
        let cli = Cli::parse_from([
            "kubeforge",
            "create",
            "api",
            "--group",
            "ship",
            "--version",
            "v1",
            "--kind",
            "Dock",
            "--namespaced=false",
        ]);
        let Commands::Create(CreateCommands::Api(args)) = cli.command else {
            panic!("expected create api");
        };
        assert!(!args.namespaced);
        assert_eq!(args.resource_files, None);
    }

    #[test]
    fn project_version_accepts_prefix() {
        let cli = Cli::parse_from(["kubeforge", "init", "--project-version", "v3"]);
        let Commands::Init(args) = cli.command else {
            panic!("expected init");
        };
        assert_eq!(args.project_version, Some(ProjectVersion::V3));
    }

    #[test]
    fn unknown_project_version_is_rejected() {
        assert!(Cli::try_parse_from(["kubeforge", "init", "--project-version", "9"]).is_err());
    }

    #[test]
    fn edit_multigroup_forms() {
        let on = Cli::parse_from(["kubeforge", "edit", "--multigroup"]);
        let off = Cli::parse_from(["kubeforge", "edit", "--multigroup=false"]);
        assert!(matches!(on.command, Commands::Edit(EditArgs { multigroup: Some(true) })));
        assert!(matches!(off.command, Commands::Edit(EditArgs { multigroup: Some(false) })));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        let result = Cli::try_parse_from(["kubeforge", "--quiet", "--verbose", "config", "list"]);
        assert!(result.is_err());
    }
}
