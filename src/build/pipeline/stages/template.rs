//! Page template rendering stage.

use crate::build::pipeline::{PipelineContext, PipelineError, ProcessingDocument, Stage};

/// Stage that wraps the filtered content in the page template, titled
/// with the item title.
///
/// After this stage, `doc.output_html` contains the complete HTML page.
pub struct TemplateStage;

impl Stage for TemplateStage {
    fn name(&self) -> &'static str {
        "template"
    }

    fn process(
        &self,
        doc: &mut ProcessingDocument,
        ctx: &mut PipelineContext<'_>,
    ) -> Result<(), PipelineError> {
        let html = ctx.renderer.render_page(doc.title(), &doc.content)?;
        doc.output_html = Some(html);
        Ok(())
    }
}
