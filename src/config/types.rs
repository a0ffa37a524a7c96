//! Configuration type definitions.
//!
//! This module contains the data structures of the `rescue.yaml` file.
//! These types are pure data - no I/O or complex logic.
//!
//! ```yaml
//! site:
//!   name: example.com
//! database:
//!   path: ./example-com.sqlite
//! output:
//!   site_dir: site
//!   content_dir: content
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::build::resolve_path;

/// Root configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RescueConfig {
    pub site: SiteConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub log: LogConfig,
}

// =============================================================================
// Site configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Host name of the site being archived, e.g. `example.com`
    pub name: String,
    /// Title of the index page (defaults to "Archived Content: <name>")
    pub title: Option<String>,
}

impl SiteConfig {
    pub fn index_title(&self) -> String {
        self.title
            .clone()
            .unwrap_or_else(|| format!("Archived Content: {}", self.name))
    }
}

// =============================================================================
// Database configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite copy of the CMS database (relative to the config file)
    pub path: PathBuf,
}

// =============================================================================
// Output configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Top directory of the generated site
    #[serde(default = "default_site_dir")]
    pub site_dir: PathBuf,
    /// Directory for raw, unfiltered content
    #[serde(default = "default_content_dir")]
    pub content_dir: PathBuf,
    /// Directory for rendered pages (defaults to `<site_dir>/node`)
    #[serde(default)]
    pub node_dir: Option<PathBuf>,
}

fn default_site_dir() -> PathBuf {
    PathBuf::from("site")
}

fn default_content_dir() -> PathBuf {
    PathBuf::from("content")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            site_dir: default_site_dir(),
            content_dir: default_content_dir(),
            node_dir: None,
        }
    }
}

/// Output directories resolved against the config file's directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPaths {
    pub site_dir: PathBuf,
    pub content_dir: PathBuf,
    pub node_dir: PathBuf,
}

impl OutputConfig {
    pub fn resolve(&self, base_path: &Path) -> OutputPaths {
        let site_dir = resolve_path(base_path, &self.site_dir);
        let node_dir = match &self.node_dir {
            Some(node_dir) => resolve_path(base_path, node_dir),
            None => site_dir.join("node"),
        };
        OutputPaths {
            content_dir: resolve_path(base_path, &self.content_dir),
            site_dir,
            node_dir,
        }
    }
}

// =============================================================================
// Logging configuration
// =============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Default log filter, overridden by `RUST_LOG`
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}
