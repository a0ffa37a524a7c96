use std::path::Path;

use crate::{CleanArgs, build::Migrator};

use super::load_config;

pub fn run(args: &CleanArgs, verbose: bool) -> Result<(), anyhow::Error> {
    let (config, base_path) = load_config(&args.config_file, verbose)?;
    let output = Migrator::new(config, base_path).output_paths();

    // Delete the raw content folder, then the generated site (which
    // usually contains the node folder)
    for dir in [&output.content_dir, &output.node_dir, &output.site_dir] {
        remove_dir(dir, args.dry_run)?;
    }

    Ok(())
}

fn remove_dir(path: &Path, dry_run: bool) -> Result<(), anyhow::Error> {
    if !path.exists() {
        return Ok(());
    }
    if dry_run {
        println!("Would delete {}", path.display());
    } else {
        std::fs::remove_dir_all(path)?;
        println!("Deleted {}", path.display());
    }
    Ok(())
}
