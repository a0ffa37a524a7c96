use std::path::Path;

use rusqlite::types::ValueRef;
use rusqlite::{Connection, OpenFlags, Row};
use tracing::debug;

use super::{ContentItem, ContentStore, FilterRow, FormatRow, StoreError};

/// SQLite-backed content store.
///
/// Expects the CMS tables `filter_format`, `filter`, `node` and
/// `field_data_body` as the CMS defines them.
#[derive(Debug)]
pub struct SqliteStore {
    conn: Connection,
}

impl SqliteStore {
    /// Open an existing database read-only.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        if !path.exists() {
            return Err(StoreError::NotFound(path.display().to_string()));
        }
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        debug!(path = %path.display(), "opened content store");
        Ok(Self { conn })
    }

    /// Wrap an already open connection.
    #[cfg(test)]
    pub fn from_connection(conn: Connection) -> Self {
        Self { conn }
    }
}

impl ContentStore for SqliteStore {
    fn formats(&self) -> Result<Vec<FormatRow>, StoreError> {
        let mut stmt = self.conn.prepare("SELECT format, name FROM filter_format")?;
        let rows = stmt.query_map([], |row| {
            Ok(FormatRow {
                format: row.get(0)?,
                name: row.get(1)?,
            })
        })?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    fn filters(&self, format: &str) -> Result<Vec<FilterRow>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT format, module, name, settings, weight, status FROM filter
             WHERE format = ?1
             ORDER BY weight ASC, module ASC, name ASC",
        )?;
        let rows = stmt.query_map([format], |row| {
            Ok(FilterRow {
                format: row.get(0)?,
                module: row.get(1)?,
                name: row.get(2)?,
                settings: blob_or_text(row, 3)?,
                weight: row.get(4)?,
                enabled: row.get::<_, i64>(5)? == 1,
            })
        })?;
        Ok(rows.collect::<Result<_, _>>()?)
    }

    fn content_items(&self) -> Result<Vec<ContentItem>, StoreError> {
        let mut stmt = self.conn.prepare(
            "SELECT node.nid, node.title, field_data_body.body_value,
                    field_data_body.body_format
             FROM node JOIN field_data_body
             ON node.nid = field_data_body.entity_id
             WHERE field_data_body.body_format IS NOT NULL
             ORDER BY node.nid ASC",
        )?;
        let rows = stmt.query_map([], |row| {
            Ok(ContentItem {
                id: row.get(0)?,
                title: row.get(1)?,
                body: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                format: row.get(3)?,
            })
        })?;
        Ok(rows.collect::<Result<_, _>>()?)
    }
}

/// Settings columns hold serialized bytes, stored as either TEXT or BLOB.
fn blob_or_text(row: &Row<'_>, idx: usize) -> rusqlite::Result<Vec<u8>> {
    match row.get_ref(idx)? {
        ValueRef::Blob(bytes) | ValueRef::Text(bytes) => Ok(bytes.to_vec()),
        ValueRef::Null => Ok(Vec::new()),
        other => Err(rusqlite::Error::InvalidColumnType(
            idx,
            "settings".to_string(),
            other.data_type(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::testing::fixture_store;

    #[test]
    fn test_formats() {
        let store = fixture_store();
        let formats = store.formats().unwrap();

        assert_eq!(formats.len(), 2);
        assert!(formats.contains(&FormatRow {
            format: "filtered_html".to_string(),
            name: "Filtered HTML".to_string(),
        }));
    }

    #[test]
    fn test_filters_ordered_by_weight() {
        let store = fixture_store();
        let filters = store.filters("filtered_html").unwrap();

        let names: Vec<String> = filters.iter().map(FilterRow::qualified_name).collect();
        assert_eq!(
            names,
            vec![
                "filter.filter_autop",
                "filter.filter_html_escape",
                "filter.filter_url"
            ]
        );
        assert!(!filters[2].enabled);
        assert_eq!(filters[0].settings, b"a:0:{}");
    }

    #[test]
    fn test_blob_settings() {
        let store = fixture_store();
        let filters = store.filters("plain_text").unwrap();
        assert_eq!(filters[0].settings, b"a:0:{}");
    }

    #[test]
    fn test_content_items_skip_unformatted() {
        let store = fixture_store();
        let items = store.content_items().unwrap();

        let ids: Vec<i64> = items.iter().map(|item| item.id).collect();
        assert_eq!(ids, vec![1, 3]);
        assert_eq!(items[0].body, "line one\nline two");
        assert_eq!(items[0].format, "filtered_html");
    }

    #[test]
    fn test_open_missing_database() {
        let result = SqliteStore::open(Path::new("/nonexistent/site.sqlite"));
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }
}
