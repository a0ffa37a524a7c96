//! HTML restriction and escaping.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::{Filter, FilterError};
use crate::settings::FilterSettings;
use crate::util::escape_html;

/// Tags allowed when a format's settings don't list any.
const DEFAULT_ALLOWED_HTML: &str =
    "<a> <em> <strong> <cite> <blockquote> <code> <ul> <ol> <li> <dl> <dt> <dd>";

static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<(/?)([A-Za-z][A-Za-z0-9]*)\b([^>]*)>").expect("tag pattern"));

static COMMENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").expect("comment pattern"));

static ALLOWED_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<([A-Za-z][A-Za-z0-9]*)>").expect("allowed tag pattern"));

static EVENT_ATTR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\s+on[a-z]+\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>]+)"#).expect("event attribute pattern")
});

static SCRIPT_URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)(href|src)\s*=\s*(["']?)\s*javascript:[^"'\s>]*"#).expect("script url pattern")
});

/// Strips every tag not listed in the `allowed_html` setting.
///
/// Kept tags lose event-handler attributes and `javascript:` URLs. With
/// `filter_html_nofollow` set, opening `<a>` tags get `rel="nofollow"`.
pub struct HtmlFilter;

impl Filter for HtmlFilter {
    fn name(&self) -> &'static str {
        "html"
    }

    fn apply(&self, content: &str, settings: &FilterSettings) -> Result<String, FilterError> {
        let allowed_html = match settings.get("allowed_html") {
            None => DEFAULT_ALLOWED_HTML,
            Some(value) => value
                .as_str()
                .ok_or_else(|| FilterError::invalid_setting("allowed_html", "expected a string"))?,
        };
        let allowed: HashSet<String> = ALLOWED_NAME
            .captures_iter(allowed_html)
            .map(|caps| caps[1].to_ascii_lowercase())
            .collect();
        let nofollow = settings.get_bool("filter_html_nofollow").unwrap_or(false);

        let without_comments = COMMENT.replace_all(content, "");
        let filtered = TAG.replace_all(&without_comments, |caps: &Captures<'_>| {
            let closing = &caps[1];
            let name = caps[2].to_ascii_lowercase();
            if !allowed.contains(&name) {
                return String::new();
            }
            if !closing.is_empty() {
                return format!("</{name}>");
            }

            let attrs = EVENT_ATTR.replace_all(&caps[3], "");
            let attrs = SCRIPT_URL.replace_all(&attrs, "$1=$2");
            let mut tag = format!("<{name}{attrs}");
            if nofollow && name == "a" && !attrs.to_ascii_lowercase().contains("rel=") {
                tag = format!("{} rel=\"nofollow\"", tag.trim_end_matches('/').trim_end());
            }
            tag.push('>');
            tag
        });

        Ok(filtered.into_owned())
    }
}

/// Displays the body as plain text by escaping all markup.
pub struct HtmlEscapeFilter;

impl Filter for HtmlEscapeFilter {
    fn name(&self) -> &'static str {
        "html_escape"
    }

    fn apply(&self, content: &str, _settings: &FilterSettings) -> Result<String, FilterError> {
        Ok(escape_html(content))
    }
}
