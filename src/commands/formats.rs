use serde::Serialize;

use crate::{
    FormatsArgs,
    build::{FormatPipeline, Migrator},
};

use super::load_config;

/// A resolved format as printed by `formats --json`.
#[derive(Debug, Serialize)]
struct FormatSummary<'a> {
    format: &'a str,
    name: &'a str,
    suffix: &'a str,
    filters: Vec<&'a str>,
}

impl<'a> From<&'a FormatPipeline> for FormatSummary<'a> {
    fn from(pipeline: &'a FormatPipeline) -> Self {
        Self {
            format: &pipeline.format,
            name: &pipeline.name,
            suffix: &pipeline.suffix,
            filters: pipeline.steps.iter().map(|s| s.definition.name()).collect(),
        }
    }
}

pub fn run(args: &FormatsArgs, verbose: bool) -> Result<(), anyhow::Error> {
    let (config, base_path) = load_config(&args.config_file, verbose)?;

    let migrator = Migrator::new(config, base_path);
    let store = migrator.open_store()?;
    let resolution = migrator.resolve(&store)?;

    let summaries: Vec<FormatSummary<'_>> =
        resolution.pipelines().map(FormatSummary::from).collect();

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summaries)?);
        return Ok(());
    }

    for summary in &summaries {
        println!("{} ({}) -> .{}", summary.format, summary.name, summary.suffix);
        if summary.filters.is_empty() {
            println!("  (no filters)");
        }
        for filter in &summary.filters {
            println!("  - {filter}");
        }
    }
    for warning in resolution.warnings() {
        println!("warning: {warning}");
    }

    Ok(())
}
