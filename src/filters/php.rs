use super::{Filter, FilterError};
use crate::settings::FilterSettings;
use crate::util::escape_html;

/// Archives PHP-evaluated bodies as their source text.
///
/// The code is never executed; it is escaped and shown preformatted.
pub struct PhpCodeFilter;

impl Filter for PhpCodeFilter {
    fn name(&self) -> &'static str {
        "php_code"
    }

    fn apply(&self, content: &str, _settings: &FilterSettings) -> Result<String, FilterError> {
        Ok(format!("<pre>{}</pre>\n", escape_html(content)))
    }
}
