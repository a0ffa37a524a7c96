//! Rewriting of links that point back into the archived site.

use std::sync::LazyLock;

use regex::{Captures, Regex};

use super::FilterError;

static NODE_LINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?i)\bhref\s*=\s*(["'])/(?:\?q=)?node/(\d+)/?(["'#?])"#).expect("node link pattern")
});

/// Makes links into the archived site relative to the archive.
///
/// Absolute `href`/`src` URLs on the site's host lose their scheme and
/// host, and node links gain the `.html` extension of the rendered files.
#[derive(Debug)]
pub struct UrlCleaner {
    site_link: Regex,
}

impl UrlCleaner {
    /// Create a cleaner for the given site host name, e.g. `example.com`.
    pub fn new(site_name: &str) -> Result<Self, FilterError> {
        let host = site_name.trim().trim_start_matches("www.");
        let site_link = Regex::new(&format!(
            r#"(?i)\b(href|src)\s*=\s*(["'])(?:https?:)?//(?:www\.)?{}(?::\d+)?(/[^"']*)?(["'])"#,
            regex::escape(host)
        ))?;
        Ok(Self { site_link })
    }

    pub fn clean(&self, body: &str) -> String {
        let relative = self.site_link.replace_all(body, |caps: &Captures<'_>| {
            let path = caps.get(3).map_or("/", |m| m.as_str());
            format!("{}={}{}{}", &caps[1], &caps[2], path, &caps[4])
        });

        NODE_LINK
            .replace_all(&relative, "href=${1}/node/${2}.html${3}")
            .into_owned()
    }
}
