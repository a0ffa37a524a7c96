//! Output file naming.
//!
//! Each content item produces:
//! - a raw-content file `<content_dir>/<id>.<suffix>`
//! - a rendered page `<node_dir>/<id>.html`
//!
//! and one line in `<site_dir>/index.html`.

use std::path::{Path, PathBuf};

/// Path of the raw-content file for an item.
///
/// # Examples
/// ```ignore
/// raw_output_path(Path::new("content"), 12, "autop.txt") => content/12.autop.txt
/// ```
pub fn raw_output_path(content_dir: &Path, id: i64, suffix: &str) -> PathBuf {
    content_dir.join(format!("{id}.{suffix}"))
}

/// Path of the rendered page for an item.
pub fn node_output_path(node_dir: &Path, id: i64) -> PathBuf {
    node_dir.join(format!("{id}.html"))
}

/// Path of the site index.
pub fn index_output_path(site_dir: &Path) -> PathBuf {
    site_dir.join("index.html")
}

/// URL prefix under which rendered pages are served.
///
/// The node directory's location inside the site directory, or `/node`
/// when it lies outside it.
///
/// # Examples
/// ```ignore
/// node_url_prefix("site", "site/node") => "/node"
/// node_url_prefix("site", "site/archive/pages") => "/archive/pages"
/// node_url_prefix("site", "elsewhere") => "/node"
/// ```
pub fn node_url_prefix(site_dir: &Path, node_dir: &Path) -> String {
    match node_dir.strip_prefix(site_dir) {
        Ok(relative) if !relative.as_os_str().is_empty() => {
            let relative = relative.to_string_lossy().replace('\\', "/");
            format!("/{}", relative.trim_matches('/'))
        }
        _ => "/node".to_string(),
    }
}

/// URL of an item's rendered page.
pub fn node_url(prefix: &str, id: i64) -> String {
    format!("{}/{id}.html", prefix.trim_end_matches('/'))
}

/// Resolve a configured path against a base directory.
pub fn resolve_path(base_path: &Path, path: &Path) -> PathBuf {
    if path.is_relative() {
        base_path.join(path)
    } else {
        path.to_path_buf()
    }
}

/// Get the base path from a config file path (its parent directory).
pub fn base_path_from_config(config_path: &Path) -> PathBuf {
    config_path
        .parent()
        .map(|p| p.to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_output_path() {
        assert_eq!(
            raw_output_path(Path::new("content"), 12, "autop.txt"),
            PathBuf::from("content/12.autop.txt")
        );
        assert_eq!(
            raw_output_path(Path::new("content"), 3, "html"),
            PathBuf::from("content/3.html")
        );
    }

    #[test]
    fn test_node_output_path() {
        assert_eq!(
            node_output_path(Path::new("site/node"), 7),
            PathBuf::from("site/node/7.html")
        );
    }

    #[test]
    fn test_node_url_prefix() {
        assert_eq!(
            node_url_prefix(Path::new("site"), Path::new("site/node")),
            "/node"
        );
        assert_eq!(
            node_url_prefix(Path::new("/out/site"), Path::new("/out/site/archive/pages")),
            "/archive/pages"
        );
        assert_eq!(
            node_url_prefix(Path::new("site"), Path::new("elsewhere")),
            "/node"
        );
        assert_eq!(node_url_prefix(Path::new("site"), Path::new("site")), "/node");
    }

    #[test]
    fn test_node_url() {
        assert_eq!(node_url("/node", 5), "/node/5.html");
        assert_eq!(node_url("/node/", 5), "/node/5.html");
    }

    #[test]
    fn test_resolve_path() {
        assert_eq!(
            resolve_path(Path::new("/project"), Path::new("site")),
            PathBuf::from("/project/site")
        );
        assert_eq!(
            resolve_path(Path::new("/project"), Path::new("/abs/site")),
            PathBuf::from("/abs/site")
        );
    }

    #[test]
    fn test_base_path_from_config() {
        assert_eq!(
            base_path_from_config(Path::new("/project/rescue.yaml")),
            PathBuf::from("/project")
        );
        assert_eq!(
            base_path_from_config(Path::new("rescue.yaml")),
            PathBuf::from("")
        );
    }
}
