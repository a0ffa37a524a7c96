//! Markdown rendering.

use pulldown_cmark::{Options, Parser, html};

use super::{Filter, FilterError};
use crate::settings::FilterSettings;

/// Renders Markdown bodies to HTML with pulldown-cmark.
pub struct MarkdownFilter;

impl Filter for MarkdownFilter {
    fn name(&self) -> &'static str {
        "markdown"
    }

    fn apply(&self, content: &str, _settings: &FilterSettings) -> Result<String, FilterError> {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_SMART_PUNCTUATION;

        let parser = Parser::new_ext(content, options);
        let mut html_output = String::with_capacity(content.len() * 3 / 2);
        html::push_html(&mut html_output, parser);

        Ok(html_output)
    }
}
