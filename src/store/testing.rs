//! Store fixtures shared by tests across the crate.

use std::path::Path;

use rusqlite::Connection;

use super::{ContentItem, ContentStore, FilterRow, FormatRow, SqliteStore, StoreError};

/// A small site: two formats, three nodes (one without a format).
pub(crate) const FIXTURE_SQL: &str = r#"
    CREATE TABLE filter_format (format TEXT PRIMARY KEY, name TEXT NOT NULL);
    CREATE TABLE filter (
        format TEXT NOT NULL,
        module TEXT NOT NULL,
        name TEXT NOT NULL,
        weight INTEGER NOT NULL DEFAULT 0,
        status INTEGER NOT NULL DEFAULT 0,
        settings BLOB
    );
    CREATE TABLE node (nid INTEGER PRIMARY KEY, title TEXT NOT NULL);
    CREATE TABLE field_data_body (
        entity_id INTEGER NOT NULL,
        body_value TEXT,
        body_format TEXT
    );

    INSERT INTO filter_format VALUES ('filtered_html', 'Filtered HTML');
    INSERT INTO filter_format VALUES ('plain_text', 'Plain text');

    INSERT INTO filter VALUES ('filtered_html', 'filter', 'filter_html_escape', 1, 1, 'a:0:{}');
    INSERT INTO filter VALUES ('filtered_html', 'filter', 'filter_autop', 0, 1, 'a:0:{}');
    INSERT INTO filter VALUES ('filtered_html', 'filter', 'filter_url', 2, 0, 'a:0:{}');
    INSERT INTO filter VALUES ('plain_text', 'filter', 'filter_html_escape', 0, 1, X'613A303A7B7D');

    INSERT INTO node VALUES (1, 'Hello');
    INSERT INTO node VALUES (2, 'Caption only');
    INSERT INTO node VALUES (3, 'Plain');
    INSERT INTO field_data_body VALUES (1, 'line one' || char(10) || 'line two', 'filtered_html');
    INSERT INTO field_data_body VALUES (2, NULL, NULL);
    INSERT INTO field_data_body VALUES (3, '<b>raw</b>', 'plain_text');
"#;

/// In-memory SQLite store loaded with [`FIXTURE_SQL`].
pub(crate) fn fixture_store() -> SqliteStore {
    let conn = Connection::open_in_memory().unwrap();
    conn.execute_batch(FIXTURE_SQL).unwrap();
    SqliteStore::from_connection(conn)
}

/// Write [`FIXTURE_SQL`] plus `extra_sql` to a database file at `path`.
pub(crate) fn write_fixture_database(path: &Path, extra_sql: &str) {
    let conn = Connection::open(path).unwrap();
    conn.execute_batch(FIXTURE_SQL).unwrap();
    conn.execute_batch(extra_sql).unwrap();
}

/// Build a filter row with empty settings.
pub(crate) fn filter_row(format: &str, qualified: &str, weight: i64) -> FilterRow {
    let (module, name) = qualified.split_once('.').unwrap();
    FilterRow {
        format: format.to_string(),
        module: module.to_string(),
        name: name.to_string(),
        settings: b"a:0:{}".to_vec(),
        weight,
        enabled: true,
    }
}

/// A store built from plain rows, returning filters in insertion order.
#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    pub formats: Vec<FormatRow>,
    pub filters: Vec<FilterRow>,
    pub items: Vec<ContentItem>,
}

impl MemoryStore {
    pub(crate) fn with_format(mut self, format: &str, name: &str) -> Self {
        self.formats.push(FormatRow {
            format: format.to_string(),
            name: name.to_string(),
        });
        self
    }

    pub(crate) fn with_filter(mut self, row: FilterRow) -> Self {
        self.filters.push(row);
        self
    }

    pub(crate) fn with_item(mut self, id: i64, title: &str, body: &str, format: &str) -> Self {
        self.items.push(ContentItem {
            id,
            title: title.to_string(),
            body: body.to_string(),
            format: format.to_string(),
        });
        self
    }
}

impl ContentStore for MemoryStore {
    fn formats(&self) -> Result<Vec<FormatRow>, StoreError> {
        Ok(self.formats.clone())
    }

    fn filters(&self, format: &str) -> Result<Vec<FilterRow>, StoreError> {
        Ok(self
            .filters
            .iter()
            .filter(|row| row.format == format)
            .cloned()
            .collect())
    }

    fn content_items(&self) -> Result<Vec<ContentItem>, StoreError> {
        Ok(self.items.clone())
    }
}
