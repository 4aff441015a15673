//! Result reporting on stdout.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use console::Term;
use owo_colors::OwoColorize;
use serde::Serialize;

use kubeforge_core::application::RunSummary;

use crate::cli::global::{GlobalArgs, OutputFormat};
use crate::config::AppConfig;

/// JSON document printed for `--output-format json`.
#[derive(Debug, Serialize)]
struct Report<'a> {
    command: &'a str,
    #[serde(flatten)]
    summary: &'a RunSummary,
}

pub struct OutputManager {
    resolved_format: OutputFormat,
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// The `--output-format` flag wins over `output.format` unless it is `auto`.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let requested = match args.output_format {
            OutputFormat::Auto => OutputFormat::from_config(&config.output.format),
            explicit => explicit,
        };
        let resolved_format = match requested {
            OutputFormat::Auto if io::stdout().is_terminal() => OutputFormat::Human,
            OutputFormat::Auto => OutputFormat::Plain,
            other => other,
        };

        Self {
            resolved_format,
            quiet: args.quiet,
            no_color: args.no_color
                || config.output.no_color
                || resolved_format != OutputFormat::Human,
            term: Term::stdout(),
        }
    }

    fn silent(&self) -> bool {
        self.quiet || self.resolved_format == OutputFormat::Json
    }

    pub fn print(&self, msg: &str) -> io::Result<()> {
        if self.silent() {
            return Ok(());
        }
        self.term.write_line(msg)
    }

    pub fn success(&self, msg: &str) -> io::Result<()> {
        if self.silent() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{2713} {msg}")
        } else {
            format!("{} {}", "\u{2713}".green().bold(), msg.green())
        };
        self.term.write_line(&line)
    }

    pub fn warning(&self, msg: &str) -> io::Result<()> {
        if self.silent() {
            return Ok(());
        }
        let line = if self.no_color {
            format!("\u{26a0} {msg}")
        } else {
            format!("{} {}", "\u{26a0}".yellow().bold(), msg.yellow())
        };
        self.term.write_line(&line)
    }

    pub fn header(&self, text: &str) -> io::Result<()> {
        if self.silent() {
            return Ok(());
        }
        let line = if self.no_color {
            text.to_owned()
        } else {
            text.cyan().bold().to_string()
        };
        self.term.write_line(&line)
    }

    /// Per-file outcome of a scaffold run, or one JSON object in JSON mode.
    pub fn summary(&self, command: &str, summary: &RunSummary) -> io::Result<()> {
        if self.resolved_format == OutputFormat::Json {
            let report = Report { command, summary };
            let json = serde_json::to_string_pretty(&report).map_err(io::Error::other)?;
            return self.term.write_line(&json);
        }
        if self.quiet {
            return Ok(());
        }

        for line in summary_lines(summary) {
            self.term.write_line(&line)?;
        }
        Ok(())
    }

    pub fn format(&self) -> OutputFormat {
        self.resolved_format
    }
}

fn summary_lines(summary: &RunSummary) -> Vec<String> {
    let groups: [(&str, &Vec<PathBuf>); 5] = [
        ("create", &summary.created),
        ("overwrite", &summary.overwritten),
        ("update", &summary.updated),
        ("skip", &summary.skipped),
        ("unchanged", &summary.unchanged),
    ];

    groups
        .iter()
        .flat_map(|(label, paths)| {
            paths
                .iter()
                .map(move |path| format!("  {label:<9} {}", path.display()))
        })
        .collect()
}
