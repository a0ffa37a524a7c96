pub mod clean;
pub mod extract;
pub mod formats;

use std::path::{Path, PathBuf};

use crate::config::RescueConfig;
use crate::logging::init_logging;

/// Load the config file and install logging from its `log` section.
fn load_config(config_file: &Path, verbose: bool) -> Result<(RescueConfig, PathBuf), anyhow::Error> {
    let (config, base_path) = RescueConfig::load_from_arg(Some(config_file))?;
    init_logging(&config.log, verbose);
    Ok((config, base_path))
}
