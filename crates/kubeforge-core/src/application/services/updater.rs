//! Marker-based updater: idempotent insertion into already generated files.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::application::ApplicationError;
use crate::application::ports::{Filesystem, SourceFormatter};
use crate::domain::CodeFragments;
use crate::domain::marker::{filter_existing, insert_fragments};
use crate::error::ForgeResult;

pub struct MarkerUpdater {
    filesystem: Arc<dyn Filesystem>,
    formatter: Arc<dyn SourceFormatter>,
}

impl MarkerUpdater {
    pub fn new(filesystem: Arc<dyn Filesystem>, formatter: Arc<dyn SourceFormatter>) -> Self {
        Self {
            filesystem,
            formatter,
        }
    }

    /// Insert `fragments` above their markers in `path`.
    ///
    /// Fragments already present as a line are dropped first. Returns `false`
    /// and leaves the file untouched when nothing is left to insert.
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn update(&self, path: &Path, fragments: &CodeFragments) -> ForgeResult<bool> {
        if !self.filesystem.exists(path) {
            return Err(ApplicationError::FileNotFound {
                path: path.to_path_buf(),
            }
            .into());
        }

        let content = self.filesystem.read_to_string(path)?;

        let pending = filter_existing(&content, fragments);
        if pending.is_empty() {
            debug!("all fragments already present");
            return Ok(false);
        }

        let mut updated = insert_fragments(&content, &pending);

        if self.formatter.applies_to(path) {
            updated = self.formatter.format(path, &updated).map_err(|e| {
                ApplicationError::FormatFailed {
                    path: path.display().to_string(),
                    reason: e.reason,
                }
            })?;
        }

        self.filesystem.write_file(path, &updated)?;
        info!(markers = pending.len(), "updated markers");
        Ok(true)
    }
}
