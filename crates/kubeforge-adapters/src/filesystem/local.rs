//! Local filesystem adapter using std::fs.

use std::io;
use std::path::{Path, PathBuf};

use kubeforge_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{ForgeError, ForgeResult},
};

/// Production filesystem implementation using `std::fs`.
///
/// Every path handed in by the core is relative to `root`, the project
/// directory the command runs in.
#[derive(Debug, Clone)]
pub struct LocalFilesystem {
    root: PathBuf,
}

impl LocalFilesystem {
    /// Create a new local filesystem adapter rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn full(&self, path: &Path) -> PathBuf {
        self.root.join(path)
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new(".")
    }
}

impl Filesystem for LocalFilesystem {
    fn exists(&self, path: &Path) -> bool {
        self.full(path).exists()
    }

    fn read_to_string(&self, path: &Path) -> ForgeResult<String> {
        std::fs::read_to_string(self.full(path)).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> ForgeResult<()> {
        std::fs::write(self.full(path), content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn create_dir_all(&self, path: &Path) -> ForgeResult<()> {
        std::fs::create_dir_all(self.full(path))
            .map_err(|e| map_io_error(path, e, "create directory"))
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> ForgeError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn paths_are_relative_to_root() {
        let dir = TempDir::new().unwrap();
        let fs = LocalFilesystem::new(dir.path());

        fs.create_dir_all(Path::new("api/v1")).unwrap();
        fs.write_file(Path::new("api/v1/x.go"), "package v1\n").unwrap();

        assert!(dir.path().join("api/v1/x.go").is_file());
        assert!(fs.exists(Path::new("api/v1/x.go")));
        assert_eq!(
            fs.read_to_string(Path::new("api/v1/x.go")).unwrap(),
            "package v1\n"
        );
    }

    #[test]
    fn write_truncates_existing_content() {
        let dir = TempDir::new().unwrap();
        let fs = LocalFilesystem::new(dir.path());

        fs.write_file(Path::new("a.txt"), "a much longer line").unwrap();
        fs.write_file(Path::new("a.txt"), "short").unwrap();

        assert_eq!(fs.read_to_string(Path::new("a.txt")).unwrap(), "short");
    }

    #[test]
    fn create_dir_all_is_idempotent() {
        let dir = TempDir::new().unwrap();
        let fs = LocalFilesystem::new(dir.path());

        fs.create_dir_all(Path::new("config/rbac")).unwrap();
        fs.create_dir_all(Path::new("config/rbac")).unwrap();
    }

    #[test]
    fn read_missing_file_is_filesystem_error() {
        let dir = TempDir::new().unwrap();
        let fs = LocalFilesystem::new(dir.path());

        let err = fs.read_to_string(Path::new("missing.go")).unwrap_err();
        assert!(matches!(
            err,
            ForgeError::Application(ApplicationError::FilesystemError { ref path, .. })
                if path == Path::new("missing.go")
        ));
    }
}
