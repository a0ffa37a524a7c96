//! Filter chain stage.

use tracing::info;

use crate::build::executor::execute;
use crate::build::pipeline::{PipelineContext, PipelineError, ProcessingDocument, Stage};

/// Stage that runs the item's content through its format's filter chain.
///
/// After this stage, `doc.content` holds the last filter's output.
pub struct FilterStage;

impl Stage for FilterStage {
    fn name(&self) -> &'static str {
        "filter"
    }

    fn process(
        &self,
        doc: &mut ProcessingDocument,
        ctx: &mut PipelineContext<'_>,
    ) -> Result<(), PipelineError> {
        let pipeline = ctx.pipeline_for(doc)?;
        let item = doc.id();

        info!(item, format = %pipeline.format, "filtering");
        doc.content = execute(&doc.content, pipeline)
            .map_err(|source| PipelineError::Transform { item, source })?;

        Ok(())
    }
}
