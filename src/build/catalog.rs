//! Registry of the filters the migration knows how to run.
//!
//! CMS formats name their filters as `module.name` (for example
//! `filter.filter_autop`). The catalog maps those names to a transform and
//! the suffix token the filter contributes to raw-content file names.
//! Names missing from the catalog are unsupported and get skipped by the
//! resolver.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::filters::{
    AutopFilter, Filter, HtmlEscapeFilter, HtmlFilter, MarkdownFilter, PhpCodeFilter, UrlFilter,
};

/// A known filter: its transform and its suffix token, if any.
pub struct FilterDefinition {
    name: String,
    filter: Box<dyn Filter>,
    suffix: Option<String>,
}

impl FilterDefinition {
    /// The qualified `module.name` of this filter.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn filter(&self) -> &dyn Filter {
        self.filter.as_ref()
    }

    /// Suffix token, e.g. `"txt"` (closing) or `"autop."` (open).
    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }
}

impl fmt::Debug for FilterDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterDefinition")
            .field("name", &self.name)
            .field("filter", &self.filter.name())
            .field("suffix", &self.suffix)
            .finish()
    }
}

/// Registry of supported filters, keyed by qualified name.
#[derive(Debug)]
pub struct FilterCatalog {
    filters: HashMap<String, Arc<FilterDefinition>>,
}

impl FilterCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self {
            filters: HashMap::new(),
        }
    }

    /// Create a catalog with the built-in filters.
    pub fn with_defaults() -> Self {
        let mut catalog = Self::new();
        catalog.register("filter.filter_html", HtmlFilter, None);
        catalog.register("filter.filter_html_escape", HtmlEscapeFilter, Some("txt"));
        catalog.register("markdown.filter_markdown", MarkdownFilter, Some("md"));
        catalog.register("filter.filter_autop", AutopFilter, Some("autop."));
        catalog.register("filter.filter_url", UrlFilter, None);
        catalog.register("php.php_code", PhpCodeFilter, Some("php"));
        catalog
    }

    /// Register a filter under a qualified name.
    ///
    /// Registering a name again replaces the earlier definition. An empty
    /// suffix token is the same as none.
    pub fn register<F: Filter + 'static>(
        &mut self,
        name: impl Into<String>,
        filter: F,
        suffix: Option<&str>,
    ) -> &mut Self {
        let name = name.into();
        let definition = FilterDefinition {
            name: name.clone(),
            filter: Box::new(filter),
            suffix: suffix.filter(|s| !s.is_empty()).map(str::to_string),
        };
        self.filters.insert(name, Arc::new(definition));
        self
    }

    /// Find the definition for a qualified filter name.
    pub fn lookup(&self, name: &str) -> Option<&Arc<FilterDefinition>> {
        self.filters.get(name)
    }

    /// All registered names, sorted.
    #[cfg(test)]
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.filters.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl Default for FilterCatalog {
    fn default() -> Self {
        Self::with_defaults()
    }
}
