//! Site index stage.

use crate::build::paths::index_output_path;
use crate::build::pipeline::{FinalizeStage, PipelineContext, PipelineError};

/// Finalize stage that writes `index.html` listing every written item.
pub struct IndexStage;

impl FinalizeStage for IndexStage {
    fn name(&self) -> &'static str {
        "index"
    }

    fn finalize(&self, ctx: &PipelineContext<'_>) -> Result<(), PipelineError> {
        let html = ctx.renderer.render_index(ctx.index_title, &ctx.index)?;
        std::fs::write(index_output_path(ctx.site_dir), html)?;
        Ok(())
    }
}
