//! Paragraph wrapping.

use std::sync::LazyLock;

use regex::Regex;

use super::{Filter, FilterError};
use crate::settings::FilterSettings;

static BLANK_LINES: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\n[ \t]*\n\s*").expect("blank line pattern"));

static BLOCK_START: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^<(?:!--|(?:table|thead|tfoot|caption|colgroup|tbody|tr|td|th|div|dl|dd|dt|ul|ol|li|pre|select|form|blockquote|address|math|p|h[1-6]|hr|fieldset|legend|section|article|aside|hgroup|header|footer|nav|figure|figcaption|details|menu|summary)\b)",
    )
    .expect("block tag pattern")
});

/// Turns blank-line separated text into paragraphs.
///
/// Each chunk becomes a `<p>` with its single line breaks as `<br />`.
/// Chunks that already open with a block-level tag are left alone.
pub struct AutopFilter;

impl Filter for AutopFilter {
    fn name(&self) -> &'static str {
        "autop"
    }

    fn apply(&self, content: &str, _settings: &FilterSettings) -> Result<String, FilterError> {
        let mut output = String::with_capacity(content.len() + 16);

        for chunk in BLANK_LINES.split(content) {
            let chunk = chunk.trim();
            if chunk.is_empty() {
                continue;
            }

            if BLOCK_START.is_match(chunk) {
                output.push_str(chunk);
            } else {
                output.push_str("<p>");
                let lines: Vec<&str> = chunk.lines().map(str::trim_end).collect();
                output.push_str(&lines.join("<br />\n"));
                output.push_str("</p>");
            }
            output.push('\n');
        }

        Ok(output)
    }
}
