//! `kubeforge edit`: change settings recorded in the PROJECT file.
//!
//! Only the descriptor changes; files generated under the old layout stay
//! where they are.

use tracing::{info, instrument};

use kubeforge_core::domain::ProjectDescriptor;

use crate::{
    cli::{EditArgs, GlobalArgs},
    commands::Workspace,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

#[instrument(skip_all)]
pub fn execute(
    args: EditArgs,
    global: GlobalArgs,
    config: AppConfig,
    output: OutputManager,
) -> CliResult<()> {
    let workspace = Workspace::open(&global, &config);
    let mut project = workspace.load_project()?;

    if !apply(&mut project, &args)? {
        output.print("PROJECT already up to date")?;
        return Ok(());
    }

    if !project.resources.is_empty() {
        output.warning("Existing APIs keep their current paths; move them by hand if needed")?;
    }
    workspace.save_project(&project)?;

    info!(multigroup = project.multigroup, "project edited");
    output.success(&format!("multigroup = {}", project.multigroup))?;
    Ok(())
}

/// Apply the requested edits, reporting whether anything changed.
fn apply(project: &mut ProjectDescriptor, args: &EditArgs) -> CliResult<bool> {
    let Some(multigroup) = args.multigroup else {
        return Err(CliError::InvalidInput {
            message: "nothing to edit; pass --multigroup[=true|false]".into(),
        });
    };

    let changed = project.multigroup != multigroup;
    project.multigroup = multigroup;
    Ok(changed)
}
