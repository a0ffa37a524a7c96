//! URL cleanup stage.

use crate::build::pipeline::{PipelineContext, PipelineError, ProcessingDocument, Stage};

/// Stage that rewrites links pointing back into the archived site so they
/// resolve inside the archive.
pub struct CleanupStage;

impl Stage for CleanupStage {
    fn name(&self) -> &'static str {
        "cleanup"
    }

    fn process(
        &self,
        doc: &mut ProcessingDocument,
        ctx: &mut PipelineContext<'_>,
    ) -> Result<(), PipelineError> {
        doc.content = ctx.url_cleaner.clean(&doc.content);
        Ok(())
    }
}
