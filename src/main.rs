use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod build;
mod commands;
mod config;
mod filters;
mod logging;
mod settings;
mod store;
mod util;

#[derive(Parser)]
struct Args {
    /// Log at debug level (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// The command to execute
    #[command(subcommand)]
    command: RescueCommand,
}

#[derive(Parser)]
struct ExtractArgs {
    /// The path to the configuration file
    #[arg(short, long, default_value = config::DEFAULT_CONFIG_FILE)]
    config_file: PathBuf,

    /// Host name of the archived site, overriding `site.name`
    #[arg(long)]
    site: Option<String>,
}

#[derive(Parser)]
struct FormatsArgs {
    /// The path to the configuration file
    #[arg(short, long, default_value = config::DEFAULT_CONFIG_FILE)]
    config_file: PathBuf,

    /// Print the resolved formats as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Parser)]
struct CleanArgs {
    /// The path to the configuration file
    #[arg(short, long, default_value = config::DEFAULT_CONFIG_FILE)]
    config_file: PathBuf,

    /// Only print what would be deleted
    #[arg(long)]
    dry_run: bool,
}

#[derive(Subcommand)]
enum RescueCommand {
    /// Migrate every content item into the static archive
    Extract(ExtractArgs),

    /// Show the filter chain and file suffix resolved for each format
    Formats(FormatsArgs),

    /// Remove the generated directories
    Clean(CleanArgs),
}

fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();

    match args.command {
        RescueCommand::Extract(cmd) => {
            commands::extract::run(&cmd, args.verbose)?;
        }
        RescueCommand::Formats(cmd) => {
            commands::formats::run(&cmd, args.verbose)?;
        }
        RescueCommand::Clean(cmd) => {
            commands::clean::run(&cmd, args.verbose)?;
        }
    }

    Ok(())
}
