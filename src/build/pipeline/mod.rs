//! Per-item migration pipeline.
//!
//! Each content item passes through a series of stages:
//! 1. Raw naming (format check, raw file named `<id>.<suffix>`)
//! 2. Filter chain (the format's resolved filters, in weight order)
//! 3. URL cleanup (links into the archived site made relative)
//! 4. Template rendering (page wrapper with the item title)
//! 5. File writing (raw body and `<id>.html`, plus an index entry)
//!
//! Items go through every stage before the next item starts. Finalize
//! stages run once after all items, e.g. to write the site index.

mod context;
mod document;
mod error;
mod stages;

pub use context::PipelineContext;
pub use document::ProcessingDocument;
pub use error::PipelineError;

use stages::{CleanupStage, FilterStage, IndexStage, RawStage, TemplateStage, WriteStage};

/// A stage in the item processing pipeline.
#[allow(dead_code)]
pub trait Stage: Send + Sync {
    /// Unique name for this stage.
    fn name(&self) -> &'static str;

    /// Process one item through this stage.
    ///
    /// The item is passed by mutable reference so the stage can transform
    /// its content in place. The `ctx` provides output locations, the
    /// resolved formats and shared services.
    fn process(
        &self,
        doc: &mut ProcessingDocument,
        ctx: &mut PipelineContext<'_>,
    ) -> Result<(), PipelineError>;
}

/// A stage that runs once after all items are processed.
#[allow(dead_code)]
pub trait FinalizeStage: Send + Sync {
    /// Unique name for this stage.
    fn name(&self) -> &'static str;

    /// Run finalization after all items are processed and written.
    fn finalize(&self, ctx: &PipelineContext<'_>) -> Result<(), PipelineError>;
}

/// The item processing pipeline.
///
/// The default pipeline is: raw → filter → cleanup → template → write,
/// finalized by the index stage.
pub struct Pipeline {
    /// Item stages (run for each item in turn)
    stages: Vec<Box<dyn Stage>>,
    /// Run-wide stages (run once after all items)
    finalize_stages: Vec<Box<dyn FinalizeStage>>,
}

impl Pipeline {
    /// Create an empty pipeline with no stages.
    pub fn new() -> Self {
        Self {
            stages: Vec::new(),
            finalize_stages: Vec::new(),
        }
    }

    /// Create the default pipeline with the standard stages.
    pub fn default_pipeline() -> Self {
        let mut pipeline = Self::new();
        pipeline
            .add_stage(RawStage)
            .add_stage(FilterStage)
            .add_stage(CleanupStage)
            .add_stage(TemplateStage)
            .add_stage(WriteStage);
        pipeline.add_finalize_stage(IndexStage);
        pipeline
    }

    /// Add a stage to the end of the pipeline.
    pub fn add_stage<S: Stage + 'static>(&mut self, stage: S) -> &mut Self {
        self.stages.push(Box::new(stage));
        self
    }

    /// Add a finalize stage (runs after all items are processed).
    pub fn add_finalize_stage<S: FinalizeStage + 'static>(&mut self, stage: S) -> &mut Self {
        self.finalize_stages.push(Box::new(stage));
        self
    }

    /// Run the pipeline on a set of items, in order.
    ///
    /// The first error aborts the run; later items are not touched.
    pub fn run(
        &self,
        docs: &mut [ProcessingDocument],
        ctx: &mut PipelineContext<'_>,
    ) -> Result<(), PipelineError> {
        for doc in docs.iter_mut() {
            for stage in &self.stages {
                stage.process(doc, ctx)?;
            }
        }

        for stage in &self.finalize_stages {
            stage.finalize(ctx)?;
        }

        Ok(())
    }

    /// Get the names of all item stages in order.
    #[cfg(test)]
    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|s| s.name()).collect()
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::default_pipeline()
    }
}
