//! Shell completion generation.

use clap::CommandFactory;
use clap_complete::{Generator, generate, shells};

use crate::{
    cli::{Cli, CompletionsArgs, Shell},
    error::CliResult,
};

const BIN: &str = "kubeforge";

pub fn execute(args: CompletionsArgs) -> CliResult<()> {
    let mut out = std::io::stdout();
    match args.shell {
        Shell::Bash => write_script(shells::Bash, &mut out),
        Shell::Zsh => write_script(shells::Zsh, &mut out),
        Shell::Fish => write_script(shells::Fish, &mut out),
        Shell::PowerShell => write_script(shells::PowerShell, &mut out),
        Shell::Elvish => write_script(shells::Elvish, &mut out),
    }
    Ok(())
}

fn write_script<G: Generator>(shell: G, out: &mut dyn std::io::Write) {
    generate(shell, &mut Cli::command(), BIN, out);
}
