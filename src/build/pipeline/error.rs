//! Pipeline error types.

use crate::build::executor::TransformError;
use crate::build::render::RenderError;

/// Errors that can occur during pipeline processing. All of them end the run.
#[derive(thiserror::Error, Debug)]
pub enum PipelineError {
    #[error("item {item} uses format '{format}', which has no resolved filter chain")]
    UnresolvedFormat { item: i64, format: String },

    #[error("item {item}: {source}")]
    Transform {
        item: i64,
        #[source]
        source: TransformError,
    },

    #[error("rendering error: {0}")]
    Render(#[from] RenderError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("stage '{stage}' failed: {message}")]
    Stage { stage: String, message: String },
}

impl PipelineError {
    /// Create a stage-specific error.
    pub fn stage(stage: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Stage {
            stage: stage.into(),
            message: message.into(),
        }
    }
}
