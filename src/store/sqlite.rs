//! SQLite-backed record store.
//!
//! Opened read-only for a single resolve-or-fail attempt and dropped on
//! every exit path; no pooling or reuse across calls. Any transport or
//! engine failure surfaces as `StoreUnavailable`, never as "no rows".

use crate::error::FindError;
use crate::store::{RecordQuery, RecordStore};
use rusqlite::{Connection, OpenFlags, OptionalExtension};
use std::path::Path;

#[derive(Debug)]
pub struct SqliteRecordStore {
    conn: Connection,
}

impl SqliteRecordStore {
    /// Open the database file read-only.
    ///
    /// SQLite reads the file lazily, so a probe query runs here to make a
    /// missing or non-database file fail at open time.
    pub fn open(path: &Path) -> Result<Self, FindError> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        conn.query_row("SELECT count(*) FROM sqlite_master", [], |row| {
            row.get::<_, i64>(0)
        })?;
        Ok(Self { conn })
    }

    /// Column names of `table`, in declaration order.
    pub fn column_names(&self, table: &str) -> Result<Vec<String>, FindError> {
        let mut stmt = self
            .conn
            .prepare(&format!("PRAGMA table_info({})", quote_ident(table)))?;
        let mut rows = stmt.query([])?;
        let mut columns = Vec::new();
        while let Some(row) = rows.next()? {
            columns.push(row.get::<_, String>(1)?);
        }
        Ok(columns)
    }
}

impl RecordStore for SqliteRecordStore {
    fn first_table(&self) -> Result<Option<String>, FindError> {
        // rowid order is creation order: the analog of "first sheet".
        let table = self
            .conn
            .query_row(
                "SELECT name FROM sqlite_master
                 WHERE type = 'table' AND name NOT LIKE 'sqlite_%'
                 ORDER BY rowid LIMIT 1",
                [],
                |row| row.get(0),
            )
            .optional()?;
        Ok(table)
    }

    fn has_column(&self, table: &str, column: &str) -> Result<bool, FindError> {
        // SQLite resolves column names case-insensitively; the guard must
        // accept whatever a query would.
        Ok(self
            .column_names(table)?
            .iter()
            .any(|name| name.eq_ignore_ascii_case(column)))
    }

    fn first_image_id(&self, query: &RecordQuery<'_>) -> Result<Option<String>, FindError> {
        let sql = format!(
            "SELECT {} FROM {} WHERE {} LIKE ?1 || '%' AND {} = ?2 LIMIT 1",
            quote_ident(query.image_column),
            quote_ident(query.table),
            quote_ident(query.name_column),
            quote_ident(query.tier_column),
        );
        let id = self
            .conn
            .query_row(&sql, rusqlite::params![query.name_prefix, query.tier_tag], |row| {
                row.get::<_, Option<String>>(0)
            })
            .optional()?;
        // A NULL identifier is an unreadable row, not a transport failure.
        Ok(id.flatten())
    }
}

/// Identifiers (table and column names) cannot be bound as parameters;
/// quote them instead.
fn quote_ident(ident: &str) -> String {
    format!("\"{}\"", ident.replace('"', "\"\""))
}
