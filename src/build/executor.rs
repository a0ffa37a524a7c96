//! Execution of a resolved filter chain.

use tracing::debug;

use super::resolver::FormatPipeline;
use crate::filters::FilterError;

/// A filter in a chain failed.
#[derive(thiserror::Error, Debug)]
#[error("filter '{filter}' failed: {source}")]
pub struct TransformError {
    pub filter: String,
    #[source]
    pub source: FilterError,
}

/// Run `content` through every step of `pipeline`, in order.
///
/// Each step receives the previous step's output. The first failure stops
/// the chain.
pub fn execute(content: &str, pipeline: &FormatPipeline) -> Result<String, TransformError> {
    let mut content = content.to_string();

    for step in &pipeline.steps {
        let name = step.definition.name();
        debug!(filter = name, settings = ?step.settings, "run");
        content = step
            .definition
            .filter()
            .apply(&content, &step.settings)
            .map_err(|source| TransformError {
                filter: name.to_string(),
                source,
            })?;
    }

    Ok(content)
}
