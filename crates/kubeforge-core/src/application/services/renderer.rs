//! Unit renderer: template engine plus optional source formatting.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use crate::application::ApplicationError;
use crate::application::ports::{SourceFormatter, TemplateEngine};
use crate::domain::TemplateData;

/// Renders one template body for a resolved path. No disk side effects.
pub struct UnitRenderer {
    engine: Box<dyn TemplateEngine>,
    formatter: Arc<dyn SourceFormatter>,
}

impl UnitRenderer {
    pub fn new(engine: Box<dyn TemplateEngine>, formatter: Arc<dyn SourceFormatter>) -> Self {
        Self { engine, formatter }
    }

    #[instrument(skip_all, fields(path = %path))]
    pub fn render(
        &self,
        body: &str,
        path: &str,
        data: &TemplateData,
    ) -> Result<String, ApplicationError> {
        let rendered = self.engine.render(path, body, data).map_err(|e| {
            ApplicationError::TemplateSyntax {
                path: path.to_string(),
                reason: e.reason,
            }
        })?;

        let fs_path = Path::new(path);
        if !self.formatter.applies_to(fs_path) {
            return Ok(rendered);
        }

        debug!("formatting rendered source");
        self.formatter
            .format(fs_path, &rendered)
            .map_err(|e| ApplicationError::FormatFailed {
                path: path.to_string(),
                reason: e.reason,
            })
    }
}
