//! Default pipeline stages.
//!
//! The standard item processing pipeline consists of:
//!
//! 1. **RawStage** - Check the item's format and name the raw-content file
//! 2. **FilterStage** - Run the format's filter chain
//! 3. **CleanupStage** - Make links into the archived site relative
//! 4. **TemplateStage** - Wrap content in the page template
//! 5. **WriteStage** - Write the raw body and page, record its index entry
//!
//! followed by the **IndexStage** finalizer, which writes the site index.

mod cleanup;
mod filter;
mod index;
mod raw;
mod template;
mod write;

pub use cleanup::CleanupStage;
pub use filter::FilterStage;
pub use index::IndexStage;
pub use raw::RawStage;
pub use template::TemplateStage;
pub use write::WriteStage;
