//! Text filters applied to content bodies.
//!
//! Each filter is a pure transform from a body and its settings to a new
//! body. The filters a CMS format names are looked up in the filter
//! catalog and run as a chain; new-line normalization and URL cleanup run
//! outside any chain, before and after it.
//!
//! # Adding a New Filter
//!
//! ```ignore
//! struct ShoutFilter;
//!
//! impl Filter for ShoutFilter {
//!     fn name(&self) -> &'static str { "shout" }
//!     fn apply(&self, content: &str, _settings: &FilterSettings) -> Result<String, FilterError> {
//!         Ok(content.to_uppercase())
//!     }
//! }
//!
//! catalog.register("shout.filter_shout", ShoutFilter, Some("shout."));
//! ```

mod autop;
mod html;
mod markdown;
mod nl;
mod php;
mod url;
mod urlclean;

pub use autop::AutopFilter;
pub use html::{HtmlEscapeFilter, HtmlFilter};
pub use markdown::MarkdownFilter;
pub use nl::normalize_newlines;
pub use php::PhpCodeFilter;
pub use url::UrlFilter;
pub use urlclean::UrlCleaner;

use crate::settings::FilterSettings;

/// Error raised by a filter transform.
#[derive(thiserror::Error, Debug)]
pub enum FilterError {
    #[error("invalid setting '{setting}': {message}")]
    InvalidSetting { setting: String, message: String },

    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

impl FilterError {
    pub fn invalid_setting(setting: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidSetting {
            setting: setting.into(),
            message: message.into(),
        }
    }
}

/// A text transform that can appear in a format's filter chain.
///
/// Implementations must depend only on `content` and `settings`.
pub trait Filter: Send + Sync {
    /// The name of this filter, for diagnostics.
    fn name(&self) -> &'static str;

    /// Transform `content` using this use's `settings`.
    fn apply(&self, content: &str, settings: &FilterSettings) -> Result<String, FilterError>;
}
