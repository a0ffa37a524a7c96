//! Conversion of bare URLs and e-mail addresses into links.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::{Filter, FilterError};
use crate::settings::FilterSettings;

/// Displayed link text is trimmed to this many characters by default.
const DEFAULT_URL_LENGTH: usize = 72;

static TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<[^>]*>").expect("tag pattern"));

static LINKABLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"(?i)\b(?:(?P<url>(?:https?|ftp)://[^\s<>"']+)|(?P<www>www\.[^\s<>"']+)|(?P<email>[a-z0-9._%+-]+@[a-z0-9-]+(?:\.[a-z0-9-]+)+))"#,
    )
    .expect("linkable pattern")
});

/// Characters that end a sentence rather than a URL.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')', ']'];

/// Turns web and e-mail addresses in text into links.
///
/// Text inside tags and existing `<a>` elements is left alone. Link text
/// longer than `filter_url_length` is shortened with "...".
pub struct UrlFilter;

impl Filter for UrlFilter {
    fn name(&self) -> &'static str {
        "url"
    }

    fn apply(&self, content: &str, settings: &FilterSettings) -> Result<String, FilterError> {
        let max_length = match settings.get("filter_url_length") {
            None => DEFAULT_URL_LENGTH,
            Some(_) => settings.get_usize("filter_url_length").ok_or_else(|| {
                FilterError::invalid_setting("filter_url_length", "expected a non-negative integer")
            })?,
        };

        let mut output = String::with_capacity(content.len());
        let mut anchor_depth = 0usize;
        let mut last = 0;

        for tag in TAG.find_iter(content) {
            let text = &content[last..tag.start()];
            if anchor_depth == 0 {
                output.push_str(&link_text(text, max_length));
            } else {
                output.push_str(text);
            }

            let lower = tag.as_str().to_ascii_lowercase();
            if lower.starts_with("<a ") || lower == "<a>" {
                anchor_depth += 1;
            } else if lower.starts_with("</a") {
                anchor_depth = anchor_depth.saturating_sub(1);
            }
            output.push_str(tag.as_str());
            last = tag.end();
        }

        let rest = &content[last..];
        if anchor_depth == 0 {
            output.push_str(&link_text(rest, max_length));
        } else {
            output.push_str(rest);
        }

        Ok(output)
    }
}

fn link_text(text: &str, max_length: usize) -> String {
    LINKABLE
        .replace_all(text, |caps: &Captures<'_>| {
            let matched = &caps[0];
            let address = matched.trim_end_matches(TRAILING_PUNCTUATION);
            let trailing = &matched[address.len()..];

            let href = if caps.name("email").is_some() {
                format!("mailto:{address}")
            } else if caps.name("www").is_some() {
                format!("http://{address}")
            } else {
                address.to_string()
            };

            format!(
                "<a href=\"{href}\">{}</a>{trailing}",
                trim_display(address, max_length)
            )
        })
        .into_owned()
}

fn trim_display(text: &str, max_length: usize) -> String {
    if text.chars().count() <= max_length {
        return text.to_string();
    }
    let kept: String = text.chars().take(max_length.saturating_sub(3)).collect();
    format!("{kept}...")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(s: &str) -> String {
        UrlFilter.apply(s, &FilterSettings::new()).unwrap()
    }

    #[test]
    fn test_links_urls() {
        assert_eq!(
            url("see http://example.com/a."),
            "see <a href=\"http://example.com/a\">http://example.com/a</a>."
        );
    }

    #[test]
    fn test_links_www_and_email() {
        assert_eq!(
            url("www.example.com or bob@example.org"),
            "<a href=\"http://www.example.com\">www.example.com</a> or <a href=\"mailto:bob@example.org\">bob@example.org</a>"
        );
    }

    #[test]
    fn test_existing_links_untouched() {
        let input = "<a href=\"http://example.com\">http://example.com</a> <img src=\"http://x.org/i.png\">";
        assert_eq!(url(input), input);
    }

    #[test]
    fn test_display_length() {
        let mut settings = FilterSettings::new();
        settings.insert("filter_url_length", "15");
        let output = UrlFilter
            .apply("http://example.com/long/path", &settings)
            .unwrap();
        assert_eq!(
            output,
            "<a href=\"http://example.com/long/path\">http://examp...</a>"
        );
    }

    #[test]
    fn test_invalid_length_setting() {
        let mut settings = FilterSettings::new();
        settings.insert("filter_url_length", "wide");
        assert!(UrlFilter.apply("x", &settings).is_err());
    }
}
