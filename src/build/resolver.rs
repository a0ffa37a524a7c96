//! Resolution of CMS formats into runnable filter chains.
//!
//! For each format declared in the store, the resolver takes the enabled
//! filter rows in ascending weight order, keeps those the catalog knows,
//! decodes their settings and folds their suffix tokens. Rows with equal
//! weights are ordered by qualified filter name.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use tracing::{debug, warn};

use super::catalog::{FilterCatalog, FilterDefinition};
use super::suffix::{Push, SuffixComposer};
use crate::settings::{FilterSettings, SettingsError};
use crate::store::{ContentStore, FilterRow, FormatRow, StoreError};

#[derive(thiserror::Error, Debug)]
pub enum ResolveError {
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    #[error("invalid settings for filter '{filter}' in format '{format}': {source}")]
    Settings {
        format: String,
        filter: String,
        #[source]
        source: SettingsError,
    },
}

/// A non-fatal problem found while resolving formats.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveWarning {
    #[error("unknown filter {filter} ignored")]
    UnsupportedFilter { filter: String },

    #[error("extra filter {token} ignored (from {filter} in format '{format}')")]
    ExtraTerminalSuffix {
        format: String,
        filter: String,
        token: String,
    },
}

/// One filter application in a chain.
#[derive(Debug, Clone)]
pub struct ChainStep {
    pub definition: Arc<FilterDefinition>,
    pub settings: FilterSettings,
}

/// The resolved filter chain and raw-content suffix of one format.
#[derive(Debug, Clone)]
pub struct FormatPipeline {
    pub format: String,
    /// Display name of the format.
    pub name: String,
    /// Steps in execution order.
    pub steps: Vec<ChainStep>,
    /// Composed raw-content suffix; never empty.
    pub suffix: String,
}

/// Filter names found unsupported so far in a run.
///
/// Each name is reported the first time it is recorded only.
#[derive(Debug, Default)]
pub struct UnsupportedFilters(BTreeSet<String>);

impl UnsupportedFilters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a name. Returns true if it was not already recorded.
    pub fn record(&mut self, name: &str) -> bool {
        if self.0.contains(name) {
            return false;
        }
        self.0.insert(name.to_string())
    }

    #[cfg(test)]
    pub fn contains(&self, name: &str) -> bool {
        self.0.contains(name)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

/// Result of resolving every format in a store.
#[derive(Debug, Default)]
pub struct Resolution {
    pipelines: BTreeMap<String, FormatPipeline>,
    warnings: Vec<ResolveWarning>,
}

impl Resolution {
    /// The pipeline for a format identifier, if the format was declared.
    pub fn get(&self, format: &str) -> Option<&FormatPipeline> {
        self.pipelines.get(format)
    }

    /// Pipelines ordered by format identifier.
    pub fn pipelines(&self) -> impl Iterator<Item = &FormatPipeline> {
        self.pipelines.values()
    }

    pub fn len(&self) -> usize {
        self.pipelines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pipelines.is_empty()
    }

    /// Warnings in the order they were raised.
    pub fn warnings(&self) -> &[ResolveWarning] {
        &self.warnings
    }
}

/// Builds [`FormatPipeline`]s from the store's filter configuration.
#[derive(Debug)]
pub struct FormatResolver<'a> {
    catalog: &'a FilterCatalog,
}

impl<'a> FormatResolver<'a> {
    pub fn new(catalog: &'a FilterCatalog) -> Self {
        Self { catalog }
    }

    /// Resolve every format declared in `store`.
    ///
    /// Unsupported filter names are added to `unsupported`; a name already
    /// there is skipped without another warning.
    pub fn resolve(
        &self,
        store: &dyn ContentStore,
        unsupported: &mut UnsupportedFilters,
    ) -> Result<Resolution, ResolveError> {
        let mut resolution = Resolution::default();

        for format in store.formats()? {
            let rows = store.filters(&format.format)?;
            let pipeline =
                self.resolve_format(&format, rows, unsupported, &mut resolution.warnings)?;
            debug!(
                format = %pipeline.format,
                steps = pipeline.steps.len(),
                suffix = %pipeline.suffix,
                "resolved format"
            );
            resolution.pipelines.insert(pipeline.format.clone(), pipeline);
        }

        Ok(resolution)
    }

    /// Resolve one format from its filter rows, in any order.
    pub fn resolve_format(
        &self,
        format: &FormatRow,
        mut rows: Vec<FilterRow>,
        unsupported: &mut UnsupportedFilters,
        warnings: &mut Vec<ResolveWarning>,
    ) -> Result<FormatPipeline, ResolveError> {
        rows.retain(|row| row.enabled);
        rows.sort_by_cached_key(|row| (row.weight, row.qualified_name()));

        let mut steps = Vec::with_capacity(rows.len());
        let mut composer = SuffixComposer::new();

        for row in rows {
            let qualified = row.qualified_name();

            let Some(definition) = self.catalog.lookup(&qualified) else {
                if unsupported.record(&qualified) {
                    warn!(filter = %qualified, "unknown filter ignored");
                    warnings.push(ResolveWarning::UnsupportedFilter { filter: qualified });
                }
                continue;
            };

            let settings =
                FilterSettings::decode(&row.settings).map_err(|source| ResolveError::Settings {
                    format: format.format.clone(),
                    filter: qualified.clone(),
                    source,
                })?;

            if let Some(token) = definition.suffix()
                && composer.push(token) == Push::Ignored
            {
                warn!(
                    format = %format.format,
                    filter = %qualified,
                    token,
                    "extra filter suffix ignored"
                );
                warnings.push(ResolveWarning::ExtraTerminalSuffix {
                    format: format.format.clone(),
                    filter: qualified,
                    token: token.to_string(),
                });
            }

            steps.push(ChainStep {
                definition: Arc::clone(definition),
                settings,
            });
        }

        Ok(FormatPipeline {
            format: format.format.clone(),
            name: format.name.clone(),
            steps,
            suffix: composer.finish(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::{MemoryStore, filter_row, fixture_store};

    fn resolve(store: &dyn ContentStore) -> (Resolution, UnsupportedFilters) {
        let catalog = FilterCatalog::with_defaults();
        let mut unsupported = UnsupportedFilters::new();
        let resolution = FormatResolver::new(&catalog)
            .resolve(store, &mut unsupported)
            .unwrap();
        (resolution, unsupported)
    }

    fn step_names(pipeline: &FormatPipeline) -> Vec<&str> {
        pipeline.steps.iter().map(|s| s.definition.name()).collect()
    }

    #[test]
    fn test_filtered_html_pipeline() {
        let (resolution, unsupported) = resolve(&fixture_store());

        let pipeline = resolution.get("filtered_html").unwrap();
        assert_eq!(pipeline.name, "Filtered HTML");
        assert_eq!(pipeline.suffix, "autop.txt");
        assert_eq!(
            step_names(pipeline),
            vec!["filter.filter_autop", "filter.filter_html_escape"]
        );
        assert!(unsupported.is_empty());
        assert!(resolution.warnings().is_empty());
    }

    #[test]
    fn test_format_without_suffix_tokens_defaults_to_html() {
        let store = MemoryStore::default()
            .with_format("full_html", "Full HTML")
            .with_filter(filter_row("full_html", "filter.filter_url", 0))
            .with_filter(filter_row("full_html", "filter.filter_html", 1));
        let (resolution, _) = resolve(&store);

        let pipeline = resolution.get("full_html").unwrap();
        assert_eq!(pipeline.suffix, "html");
        assert_eq!(pipeline.steps.len(), 2);
    }

    #[test]
    fn test_format_with_no_filters() {
        let store = MemoryStore::default().with_format("empty", "Empty");
        let (resolution, _) = resolve(&store);

        let pipeline = resolution.get("empty").unwrap();
        assert!(pipeline.steps.is_empty());
        assert_eq!(pipeline.suffix, "html");
    }

    #[test]
    fn test_steps_follow_weight_not_row_order() {
        let store = MemoryStore::default()
            .with_format("f", "F")
            .with_filter(filter_row("f", "filter.filter_url", 10))
            .with_filter(filter_row("f", "filter.filter_autop", 5))
            .with_filter(filter_row("f", "filter.filter_html_escape", 20));
        let (resolution, _) = resolve(&store);

        let pipeline = resolution.get("f").unwrap();
        assert_eq!(
            step_names(pipeline),
            vec![
                "filter.filter_autop",
                "filter.filter_url",
                "filter.filter_html_escape"
            ]
        );
        assert_eq!(pipeline.suffix, "autop.txt");
    }

    #[test]
    fn test_equal_weights_ordered_by_name() {
        let store = MemoryStore::default()
            .with_format("f", "F")
            .with_filter(filter_row("f", "php.php_code", 0))
            .with_filter(filter_row("f", "filter.filter_html", 0));
        let (resolution, _) = resolve(&store);

        assert_eq!(
            step_names(resolution.get("f").unwrap()),
            vec!["filter.filter_html", "php.php_code"]
        );
    }

    #[test]
    fn test_disabled_filters_skipped() {
        let mut disabled = filter_row("f", "filter.filter_html_escape", 0);
        disabled.enabled = false;
        let store = MemoryStore::default()
            .with_format("f", "F")
            .with_filter(disabled)
            .with_filter(filter_row("f", "markdown.filter_markdown", 1));
        let (resolution, _) = resolve(&store);

        let pipeline = resolution.get("f").unwrap();
        assert_eq!(step_names(pipeline), vec!["markdown.filter_markdown"]);
        assert_eq!(pipeline.suffix, "md");
    }

    #[test]
    fn test_unsupported_filter_warned_once() {
        let store = MemoryStore::default()
            .with_format("a", "A")
            .with_format("b", "B")
            .with_filter(filter_row("a", "captcha.filter_captcha", 0))
            .with_filter(filter_row("a", "filter.filter_autop", 1))
            .with_filter(filter_row("b", "captcha.filter_captcha", 0));
        let (resolution, unsupported) = resolve(&store);

        assert_eq!(
            resolution.warnings(),
            &[ResolveWarning::UnsupportedFilter {
                filter: "captcha.filter_captcha".to_string()
            }]
        );
        assert_eq!(unsupported.len(), 1);
        assert!(unsupported.contains("captcha.filter_captcha"));
        assert_eq!(step_names(resolution.get("a").unwrap()), vec!["filter.filter_autop"]);
        assert!(resolution.get("b").unwrap().steps.is_empty());
    }

    #[test]
    fn test_unsupported_memo_carries_across_calls() {
        let catalog = FilterCatalog::with_defaults();
        let resolver = FormatResolver::new(&catalog);
        let mut unsupported = UnsupportedFilters::new();
        unsupported.record("captcha.filter_captcha");

        let store = MemoryStore::default()
            .with_format("a", "A")
            .with_filter(filter_row("a", "captcha.filter_captcha", 0));
        let resolution = resolver.resolve(&store, &mut unsupported).unwrap();

        assert!(resolution.warnings().is_empty());
        assert_eq!(unsupported.iter().collect::<Vec<_>>(), vec!["captcha.filter_captcha"]);
    }

    #[test]
    fn test_extra_terminal_suffix_warning() {
        let store = MemoryStore::default()
            .with_format("f", "F")
            .with_filter(filter_row("f", "filter.filter_html_escape", 0))
            .with_filter(filter_row("f", "php.php_code", 1));
        let (resolution, _) = resolve(&store);

        let pipeline = resolution.get("f").unwrap();
        assert_eq!(pipeline.suffix, "txt");
        // The filter still runs; only its suffix is dropped.
        assert_eq!(pipeline.steps.len(), 2);
        assert_eq!(
            resolution.warnings(),
            &[ResolveWarning::ExtraTerminalSuffix {
                format: "f".to_string(),
                filter: "php.php_code".to_string(),
                token: "php".to_string(),
            }]
        );
    }

    #[test]
    fn test_settings_decoded() {
        let mut row = filter_row("f", "filter.filter_url", 0);
        row.settings = br#"a:1:{s:17:"filter_url_length";s:2:"40";}"#.to_vec();
        let store = MemoryStore::default().with_format("f", "F").with_filter(row);
        let (resolution, _) = resolve(&store);

        let step = &resolution.get("f").unwrap().steps[0];
        assert_eq!(step.settings.get_usize("filter_url_length"), Some(40));
    }

    #[test]
    fn test_malformed_settings_are_fatal() {
        let mut row = filter_row("f", "filter.filter_html", 0);
        row.settings = b"a:1:{s:9:\"broken".to_vec();
        let store = MemoryStore::default().with_format("f", "F").with_filter(row);

        let catalog = FilterCatalog::with_defaults();
        let result = FormatResolver::new(&catalog).resolve(&store, &mut UnsupportedFilters::new());

        assert!(matches!(
            result,
            Err(ResolveError::Settings { ref filter, .. }) if filter == "filter.filter_html"
        ));
    }

    #[test]
    fn test_unsupported_filter_settings_not_decoded() {
        let mut row = filter_row("f", "captcha.filter_captcha", 0);
        row.settings = b"garbage".to_vec();
        let store = MemoryStore::default().with_format("f", "F").with_filter(row);
        let (resolution, _) = resolve(&store);

        assert!(resolution.get("f").unwrap().steps.is_empty());
    }
}
