//! File writing stage.

use std::path::Path;

use tracing::{debug, info};

use crate::build::paths::{node_output_path, node_url};
use crate::build::pipeline::{PipelineContext, PipelineError, ProcessingDocument, Stage};
use crate::build::render::IndexEntry;

/// Stage that writes the raw body and the rendered page.
///
/// The final HTML from `doc.output_html` goes to `<id>.html` in the node
/// directory, then the raw body goes to `doc.raw_path`. If either write
/// fails, neither file is left behind. The item is then recorded for the
/// site index.
pub struct WriteStage;

impl Stage for WriteStage {
    fn name(&self) -> &'static str {
        "write"
    }

    fn process(
        &self,
        doc: &mut ProcessingDocument,
        ctx: &mut PipelineContext<'_>,
    ) -> Result<(), PipelineError> {
        let raw_path = doc.raw_path.as_ref().ok_or_else(|| {
            PipelineError::stage(
                "write",
                format!("item {} has no raw path (was raw stage run?)", doc.id()),
            )
        })?;

        // Get the final HTML output
        let html = doc.output_html.as_ref().ok_or_else(|| {
            PipelineError::stage(
                "write",
                format!(
                    "item {} has no output HTML (was template stage run?)",
                    doc.id()
                ),
            )
        })?;

        let output_path = node_output_path(ctx.node_dir, doc.id());
        write_or_remove(&output_path, html)?;

        if let Err(e) = write_or_remove(raw_path, &doc.raw) {
            let _ = std::fs::remove_file(&output_path);
            return Err(e.into());
        }
        debug!(item = doc.id(), path = %raw_path.display(), "wrote raw content");
        info!(item = doc.id(), path = %output_path.display(), "done");

        ctx.index.push(IndexEntry {
            id: doc.id(),
            url: node_url(ctx.node_url_prefix, doc.id()),
            title: doc.title().to_string(),
        });

        Ok(())
    }
}

/// Write a file, removing whatever was partially written on failure.
fn write_or_remove(path: &Path, contents: &str) -> std::io::Result<()> {
    std::fs::write(path, contents).inspect_err(|_| {
        let _ = std::fs::remove_file(path);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::build::render::Renderer;
    use crate::build::resolver::Resolution;
    use crate::filters::UrlCleaner;
    use crate::store::ContentItem;

    fn rendered_doc(raw_path: &Path) -> ProcessingDocument {
        let mut doc = ProcessingDocument::new(ContentItem {
            id: 5,
            title: "Five".to_string(),
            body: "body".to_string(),
            format: "plain_text".to_string(),
        });
        doc.raw_path = Some(raw_path.to_path_buf());
        doc.output_html = Some("<p>body</p>".to_string());
        doc
    }

    fn run_write(
        doc: &mut ProcessingDocument,
        content_dir: &Path,
        node_dir: &Path,
    ) -> Result<usize, PipelineError> {
        let resolution = Resolution::default();
        let cleaner = UrlCleaner::new("example.com").unwrap();
        let renderer = Renderer::new().unwrap();
        let mut ctx = PipelineContext::new(
            content_dir,
            node_dir,
            content_dir,
            "/node",
            &resolution,
            &cleaner,
            &renderer,
            "Index",
        );
        WriteStage.process(doc, &mut ctx)?;
        Ok(ctx.index.len())
    }

    #[test]
    fn test_writes_page_and_raw() {
        let dir = tempfile::tempdir().unwrap();
        let raw_path = dir.path().join("5.txt");
        let mut doc = rendered_doc(&raw_path);

        let indexed = run_write(&mut doc, dir.path(), dir.path()).unwrap();

        assert_eq!(indexed, 1);
        assert_eq!(std::fs::read_to_string(&raw_path).unwrap(), "body");
        assert_eq!(
            std::fs::read_to_string(dir.path().join("5.html")).unwrap(),
            "<p>body</p>"
        );
    }

    #[test]
    fn test_failed_raw_write_removes_page() {
        let dir = tempfile::tempdir().unwrap();
        let node_dir = dir.path().join("node");
        std::fs::create_dir(&node_dir).unwrap();
        let raw_path = dir.path().join("missing").join("5.txt");
        let mut doc = rendered_doc(&raw_path);

        let result = run_write(&mut doc, dir.path(), &node_dir);

        assert!(matches!(result, Err(PipelineError::Io(_))));
        assert!(!node_dir.join("5.html").exists());
        assert!(!raw_path.exists());
    }

    #[test]
    fn test_failed_page_write_leaves_no_raw() {
        let dir = tempfile::tempdir().unwrap();
        let raw_path = dir.path().join("5.txt");
        let mut doc = rendered_doc(&raw_path);

        let result = run_write(&mut doc, dir.path(), &dir.path().join("missing"));

        assert!(matches!(result, Err(PipelineError::Io(_))));
        assert!(!raw_path.exists());
    }
}
