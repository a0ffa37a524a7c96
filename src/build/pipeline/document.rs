//! Item types for pipeline processing.

use std::path::PathBuf;

use crate::filters::normalize_newlines;
use crate::store::ContentItem;

/// A content item being processed through the pipeline.
///
/// Wraps the stored item with mutable state that evolves through the
/// stages:
///
/// 1. Initially: `raw` and `content` = body with normalized line endings
/// 2. After raw: `raw_path` = where `raw` will be persisted
/// 3. After filter: `content` = output of the format's filter chain
/// 4. After cleanup: `content` = links into the site made relative
/// 5. After template: `output_html` = full page
/// 6. After write: both files exist
///
/// Nothing is written until the write stage, so an item that fails
/// earlier leaves no output behind.
#[derive(Debug)]
pub struct ProcessingDocument {
    /// The item as read from the store.
    pub item: ContentItem,

    /// Body with normalized line endings, as persisted to the content dir.
    pub raw: String,

    /// Content being processed.
    pub content: String,

    /// Raw-content file, named after the format's composed suffix.
    pub raw_path: Option<PathBuf>,

    /// Final HTML output after template rendering.
    pub output_html: Option<String>,

}

impl ProcessingDocument {
    /// Create a new processing document from a stored item.
    pub fn new(item: ContentItem) -> Self {
        let raw = normalize_newlines(&item.body);
        Self {
            item,
            content: raw.clone(),
            raw,
            raw_path: None,
            output_html: None,
        }
    }

    pub fn id(&self) -> i64 {
        self.item.id
    }

    pub fn title(&self) -> &str {
        &self.item.title
    }

    pub fn format(&self) -> &str {
        &self.item.format
    }
}
