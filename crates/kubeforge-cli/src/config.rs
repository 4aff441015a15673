//! Tool configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! project itself is described by the `PROJECT` file, not by this config.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. Environment variables `KUBEFORGE__<SECTION>__<KEY>`
//! 3. Config file (`--config`, else the platform config dir)
//! 4. Built-in defaults

use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};

use kubeforge_core::domain::ProjectVersion;

const ENV_PREFIX: &str = "KUBEFORGE";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub formatter: FormatterConfig,
    /// Fallbacks for `init` flags.
    pub defaults: Defaults,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormatterConfig {
    /// Run generated `.go` files through `command`.
    pub enabled: bool,
    pub command: String,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            command: "gofmt".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub domain: String,
    pub project_version: ProjectVersion,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            domain: "my.domain".into(),
            project_version: ProjectVersion::LATEST,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
    pub format: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            no_color: false,
            format: "auto".into(),
        }
    }
}

impl AppConfig {
    /// Load configuration. An explicit `config_file` must exist; the default
    /// location is optional.
    pub fn load(config_file: Option<&Path>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.to_path_buf(), true),
            None => (Self::config_path(), false),
        };

        let defaults = config::Config::try_from(&Self::default())
            .context("Failed to build default configuration")?;

        let settings = config::Config::builder()
            .add_source(defaults)
            .add_source(config::File::from(path.as_path()).required(required))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to load configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    /// Default configuration file, falling back to `.kubeforge.toml` in the
    /// current directory when the platform has no config dir.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("io", "kubeforge", "kubeforge")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".kubeforge.toml"))
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_enable_gofmt() {
        let cfg = AppConfig::default();
        assert!(cfg.formatter.enabled);
        assert_eq!(cfg.formatter.command, "gofmt");
        assert_eq!(cfg.defaults.domain, "my.domain");
        assert_eq!(cfg.defaults.project_version, ProjectVersion::V4);
    }

    #[test]
    fn file_overrides_defaults() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[formatter]\nenabled = false\n\n[defaults]\nproject_version = \"3\""
        )
        .unwrap();

        let cfg = AppConfig::load(Some(file.path())).unwrap();
        assert!(!cfg.formatter.enabled);
        assert_eq!(cfg.formatter.command, "gofmt");
        assert_eq!(cfg.defaults.project_version, ProjectVersion::V3);
        assert_eq!(cfg.defaults.domain, "my.domain");
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(AppConfig::load(Some(&dir.path().join("absent.toml"))).is_err());
    }

    #[test]
    fn config_path_is_not_empty() {
        assert!(!AppConfig::config_path().as_os_str().is_empty());
    }
}
