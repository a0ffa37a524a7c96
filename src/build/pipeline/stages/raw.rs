//! Raw content persistence stage.

use tracing::debug;

use crate::build::paths::raw_output_path;
use crate::build::pipeline::{PipelineContext, PipelineError, ProcessingDocument, Stage};

/// Stage that names the raw-content file for the item.
///
/// The file is `<id>.<suffix>` after the suffix composed for the item's
/// format; the write stage persists it. An item whose format has no
/// resolved pipeline fails here.
pub struct RawStage;

impl Stage for RawStage {
    fn name(&self) -> &'static str {
        "raw"
    }

    fn process(
        &self,
        doc: &mut ProcessingDocument,
        ctx: &mut PipelineContext<'_>,
    ) -> Result<(), PipelineError> {
        let pipeline = ctx.pipeline_for(doc)?;

        let raw_path = raw_output_path(ctx.content_dir, doc.id(), &pipeline.suffix);
        debug!(item = doc.id(), path = %raw_path.display(), "raw content path");

        doc.raw_path = Some(raw_path);
        Ok(())
    }
}
