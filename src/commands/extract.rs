use tracing::info;

use crate::{ExtractArgs, build::Migrator};

use super::load_config;

pub fn run(args: &ExtractArgs, verbose: bool) -> Result<(), anyhow::Error> {
    let (mut config, base_path) = load_config(&args.config_file, verbose)?;
    if let Some(site) = &args.site {
        config = config.with_site_name(site.clone())?;
    }

    let migrator = Migrator::new(config, base_path);
    let store = migrator.open_store()?;
    let result = migrator.migrate(&store)?;

    info!(
        formats = result.formats,
        items = result.items,
        "migration finished"
    );

    println!(
        "Migrated {} items ({} formats, {} warnings)",
        result.items,
        result.formats,
        result.warnings.len()
    );
    for warning in &result.warnings {
        println!("  warning: {warning}");
    }
    println!("  raw content: {}", result.output.content_dir.display());
    println!("  pages:       {}", result.output.node_dir.display());
    println!("  index:       {}", result.output.site_dir.join("index.html").display());

    Ok(())
}
