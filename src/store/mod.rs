//! Access to the source CMS tables.
//!
//! The migration only reads three things from the CMS: the declared
//! formats, each format's filter assignments, and the content items that
//! have a format. [`ContentStore`] is that read surface; [`SqliteStore`]
//! implements it over a SQLite copy of the CMS database.

mod sqlite;

pub use sqlite::SqliteStore;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    #[error("database not found: {0}")]
    NotFound(String),
}

/// A declared content format: `filter_format` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatRow {
    pub format: String,
    pub name: String,
}

/// One configured use of a filter in a format: `filter` row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterRow {
    pub format: String,
    pub module: String,
    pub name: String,
    /// Serialized settings, still encoded as the CMS stored them.
    pub settings: Vec<u8>,
    pub weight: i64,
    pub enabled: bool,
}

impl FilterRow {
    /// The `module.name` identity used by the filter catalog.
    pub fn qualified_name(&self) -> String {
        format!("{}.{}", self.module, self.name)
    }
}

/// A content item with a body and a format.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentItem {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub format: String,
}

/// Read access to the CMS tables.
pub trait ContentStore {
    /// All declared formats, in the store's order.
    fn formats(&self) -> Result<Vec<FormatRow>, StoreError>;

    /// Every filter row configured for `format`, enabled or not.
    ///
    /// Callers must not rely on the row order.
    fn filters(&self, format: &str) -> Result<Vec<FilterRow>, StoreError>;

    /// Content items whose format is set, in the store's natural order.
    fn content_items(&self) -> Result<Vec<ContentItem>, StoreError>;
}

#[cfg(test)]
pub(crate) mod testing;
