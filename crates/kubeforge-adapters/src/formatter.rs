//! Source formatters.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;

use tracing::debug;

use kubeforge_core::application::ports::{FormatError, SourceFormatter};

/// Pipes Go sources through `gofmt`.
#[derive(Debug, Clone)]
pub struct GofmtFormatter {
    command: String,
}

impl GofmtFormatter {
    pub fn new() -> Self {
        Self::with_command("gofmt")
    }

    /// Use a different binary, e.g. `goimports`.
    pub fn with_command(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }
}

impl Default for GofmtFormatter {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceFormatter for GofmtFormatter {
    fn applies_to(&self, path: &Path) -> bool {
        path.extension().is_some_and(|ext| ext == "go")
    }

    fn format(&self, path: &Path, source: &str) -> Result<String, FormatError> {
        debug!(command = %self.command, path = %path.display(), "formatting");

        let mut child = Command::new(&self.command)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| FormatError::new(format!("failed to run {}: {}", self.command, e)))?;

        let writer = child.stdin.take().map(|mut stdin| {
            let source = source.to_owned();
            thread::spawn(move || stdin.write_all(source.as_bytes()))
        });

        let output = child
            .wait_with_output()
            .map_err(|e| FormatError::new(format!("{} did not finish: {}", self.command, e)))?;

        let written = match writer {
            Some(writer) => writer
                .join()
                .map_err(|_| FormatError::new(format!("writer for {} panicked", self.command)))?,
            None => Ok(()),
        };

        if !output.status.success() {
            return Err(FormatError::new(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }
        written.map_err(|e| FormatError::new(format!("failed to write to {}: {}", self.command, e)))?;

        String::from_utf8(output.stdout)
            .map_err(|e| FormatError::new(format!("{} produced invalid UTF-8: {}", self.command, e)))
    }
}

/// Leaves every file as rendered.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughFormatter;

impl SourceFormatter for PassthroughFormatter {
    fn applies_to(&self, _path: &Path) -> bool {
        false
    }

    fn format(&self, _path: &Path, source: &str) -> Result<String, FormatError> {
        Ok(source.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gofmt_applies_to_go_files_only() {
        let formatter = GofmtFormatter::new();
        assert!(formatter.applies_to(Path::new("cmd/main.go")));
        assert!(!formatter.applies_to(Path::new("config/rbac/role.yaml")));
        assert!(!formatter.applies_to(Path::new("Makefile")));
    }

    #[test]
    fn missing_binary_is_a_format_error() {
        let formatter = GofmtFormatter::with_command("kubeforge-no-such-formatter");
        let err = formatter
            .format(Path::new("main.go"), "package main\n")
            .unwrap_err();
        assert!(err.reason.contains("kubeforge-no-such-formatter"));
    }

    #[cfg(unix)]
    #[test]
    fn output_larger_than_a_pipe_buffer_is_read_back() {
        let formatter = GofmtFormatter::with_command("cat");
        let source = "// +kubeforge:scaffold:imports\n".repeat(16 * 1024);
        assert_eq!(formatter.format(Path::new("main.go"), &source).unwrap(), source);
    }

    #[test]
    fn passthrough_never_applies() {
        let formatter = PassthroughFormatter;
        assert!(!formatter.applies_to(Path::new("main.go")));
        assert_eq!(
            formatter.format(Path::new("main.go"), "x").unwrap(),
            "x"
        );
    }
}
