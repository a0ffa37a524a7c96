use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::{OutputPaths, RescueConfig};
use crate::filters::{FilterError, UrlCleaner};
use crate::store::{ContentStore, SqliteStore, StoreError};

use super::catalog::FilterCatalog;
use super::paths::node_url_prefix;
use super::pipeline::{Pipeline, PipelineContext, PipelineError, ProcessingDocument};
use super::render::{RenderError, Renderer};
use super::resolver::{FormatResolver, Resolution, ResolveError, ResolveWarning, UnsupportedFilters};

#[derive(thiserror::Error, Debug)]
pub enum MigrateError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("format resolution failed: {0}")]
    Resolve(#[from] ResolveError),

    #[error("{0}")]
    Pipeline(#[from] PipelineError),

    #[error("render error: {0}")]
    Render(#[from] RenderError),

    #[error("invalid site name: {0}")]
    SiteName(#[from] FilterError),

    #[error("failed to prepare {0}: {1}")]
    PrepareDir(PathBuf, std::io::Error),
}

#[derive(Debug)]
pub struct MigrateResult {
    pub output: OutputPaths,
    pub formats: usize,
    pub items: usize,
    pub warnings: Vec<ResolveWarning>,
}

pub struct Migrator {
    config: RescueConfig,
    /// Base path for resolving relative paths (typically the config file's directory)
    base_path: PathBuf,
    catalog: FilterCatalog,
}

impl Migrator {
    pub fn new(config: RescueConfig, base_path: PathBuf) -> Self {
        Self {
            config,
            base_path,
            catalog: FilterCatalog::with_defaults(),
        }
    }

    /// Replace the built-in filter catalog.
    #[cfg(test)]
    pub fn with_catalog(mut self, catalog: FilterCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Open the configured CMS database.
    pub fn open_store(&self) -> Result<SqliteStore, MigrateError> {
        Ok(SqliteStore::open(&self.config.database_path(&self.base_path))?)
    }

    pub fn output_paths(&self) -> OutputPaths {
        self.config.output.resolve(&self.base_path)
    }

    /// Resolve every format in the store into its filter chain and suffix.
    pub fn resolve(&self, store: &dyn ContentStore) -> Result<Resolution, MigrateError> {
        let mut unsupported = UnsupportedFilters::new();
        let resolution = FormatResolver::new(&self.catalog).resolve(store, &mut unsupported)?;
        info!(
            formats = resolution.len(),
            unsupported = unsupported.len(),
            "resolved formats"
        );
        if resolution.is_empty() {
            warn!("the store declares no text formats");
        }
        if !unsupported.is_empty() {
            debug!(
                filters = ?unsupported.iter().collect::<Vec<_>>(),
                "unsupported filters skipped"
            );
        }
        Ok(resolution)
    }

    pub fn migrate(&self, store: &dyn ContentStore) -> Result<MigrateResult, MigrateError> {
        // Migration:
        // 1. Resolve formats -> filter chains + suffixes
        // 2. Prepare output directories
        // 3. Load content items
        // 4. Run each item through the pipeline, then write the index

        // Step 1: Resolve formats
        let resolution = self.resolve(store)?;

        // Step 2: Prepare output directories
        let output = self.output_paths();
        clean_dir(&output.content_dir)?;
        clean_dir(&output.node_dir)?;
        std::fs::create_dir_all(&output.site_dir)
            .map_err(|e| MigrateError::PrepareDir(output.site_dir.clone(), e))?;

        // Step 3: Load content items
        let items = store.content_items()?;
        info!(items = items.len(), "loaded content items");
        let mut docs: Vec<ProcessingDocument> =
            items.into_iter().map(ProcessingDocument::new).collect();

        // Step 4: Run the pipeline
        let url_cleaner = UrlCleaner::new(&self.config.site.name)?;
        let renderer = Renderer::new()?;
        let url_prefix = node_url_prefix(&output.site_dir, &output.node_dir);
        let index_title = self.config.site.index_title();

        let mut ctx = PipelineContext::new(
            &output.content_dir,
            &output.node_dir,
            &output.site_dir,
            &url_prefix,
            &resolution,
            &url_cleaner,
            &renderer,
            &index_title,
        );
        Pipeline::default_pipeline().run(&mut docs, &mut ctx)?;

        Ok(MigrateResult {
            formats: resolution.len(),
            items: ctx.index.len(),
            warnings: resolution.warnings().to_vec(),
            output,
        })
    }
}

/// Empty a directory of its entries, or create it.
fn clean_dir(dir: &Path) -> Result<(), MigrateError> {
    let prepare = |e| MigrateError::PrepareDir(dir.to_path_buf(), e);

    if dir.is_dir() {
        for entry in std::fs::read_dir(dir).map_err(prepare)? {
            let path = entry.map_err(prepare)?.path();
            if path.is_dir() {
                std::fs::remove_dir_all(&path).map_err(prepare)?;
            } else {
                std::fs::remove_file(&path).map_err(prepare)?;
            }
        }
    } else {
        std::fs::create_dir_all(dir).map_err(prepare)?;
    }

    Ok(())
}
