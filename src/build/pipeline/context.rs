//! Pipeline context for sharing state across stages.

use std::path::Path;

use crate::build::render::{IndexEntry, Renderer};
use crate::build::resolver::{FormatPipeline, Resolution};
use crate::filters::UrlCleaner;

use super::{PipelineError, ProcessingDocument};

/// Shared context for pipeline stages.
///
/// Holds the output locations, the resolved formats and the services
/// stages need, plus the index entries collected as items are written.
pub struct PipelineContext<'a> {
    // === Output locations ===
    /// Directory for raw-content files
    pub content_dir: &'a Path,

    /// Directory for rendered pages
    pub node_dir: &'a Path,

    /// Site root, where the index is written
    pub site_dir: &'a Path,

    /// URL prefix of rendered pages, e.g. `/node`
    pub node_url_prefix: &'a str,

    // === Formats ===
    /// Resolved filter chains by format
    pub formats: &'a Resolution,

    // === Services ===
    /// Rewrites links into the archived site
    pub url_cleaner: &'a UrlCleaner,

    /// Page and index templates
    pub renderer: &'a Renderer,

    /// Title of the index page
    pub index_title: &'a str,

    // === Collected output ===
    /// One entry per written item, in processing order
    pub index: Vec<IndexEntry>,
}

impl<'a> PipelineContext<'a> {
    /// Create a new pipeline context.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        content_dir: &'a Path,
        node_dir: &'a Path,
        site_dir: &'a Path,
        node_url_prefix: &'a str,
        formats: &'a Resolution,
        url_cleaner: &'a UrlCleaner,
        renderer: &'a Renderer,
        index_title: &'a str,
    ) -> Self {
        Self {
            content_dir,
            node_dir,
            site_dir,
            node_url_prefix,
            formats,
            url_cleaner,
            renderer,
            index_title,
            index: Vec::new(),
        }
    }

    /// Get the resolved pipeline for an item's format.
    ///
    /// An item whose format was never resolved is a fatal error.
    pub fn pipeline_for(&self, doc: &ProcessingDocument) -> Result<&'a FormatPipeline, PipelineError> {
        let formats: &'a Resolution = self.formats;
        formats
            .get(doc.format())
            .ok_or_else(|| PipelineError::UnresolvedFormat {
                item: doc.id(),
                format: doc.format().to_string(),
            })
    }
}
