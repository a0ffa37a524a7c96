mod catalog;
mod executor;
mod migrator;
mod paths;
mod pipeline;
mod render;
mod resolver;
mod suffix;

pub use migrator::Migrator;
pub use paths::{base_path_from_config, resolve_path};
pub use resolver::FormatPipeline;
