//! Table loading and post-load schema setup.
//!
//! [`Loader`] owns the destination connection and drives the per-file
//! pipeline: idempotent table creation, search setup for posts, streaming
//! record insertion, and a single commit per file. After every file has
//! been processed, [`create_indices`](Loader::create_indices) builds the
//! secondary indices.
//!
//! Failure policy follows two deliberate severities. Table creation and
//! individual records are best-effort: failures are logged and the run
//! continues. Search setup and index creation are fatal: their errors
//! propagate so the process can terminate with a non-zero exit. Tests
//! cover both sides; do not fold one into the other.
//!
//! # Example
//!
//! ```no_run
//! use rusqlite::Connection;
//! use sedump_core::catalog;
//! use sedump_sqlite::Loader;
//!
//! let conn = Connection::open("so-dump.db").unwrap();
//! let mut loader = Loader::new(conn);
//!
//! for table in catalog::TABLES {
//!     let report = loader.load_file(table, table.xml_file().as_ref()).unwrap();
//!     println!("{}: {} rows", report.table, report.inserted);
//! }
//! loader.create_indices().unwrap();
//! ```

use std::io::Write;
use std::path::Path;

use rusqlite::{Connection, Transaction, params_from_iter};
use sedump_core::{TableDef, catalog};
use sedump_xml::{Record, RecordReader};
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::convert::{SqlParam, row_values};
use crate::error::{Result, StoreError};
use crate::schema::{INDEX_SQL, SEARCH_SETUP_SQL, SqlTemplates};

/// Outcome of loading one dump file.
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    /// Table the file was loaded into.
    pub table: String,
    /// Records inserted successfully.
    pub inserted: u64,
    /// Records skipped after a coercion, column, or insert failure.
    pub skipped: u64,
}

/// Existence and row count for one catalog table.
#[derive(Debug, Clone, Serialize)]
pub struct TableStatus {
    /// Table name.
    pub name: String,
    /// Whether the table exists in the database.
    pub exists: bool,
    /// Row count (0 when the table does not exist).
    pub rows: u64,
}

/// Snapshot of the destination database against the catalog.
#[derive(Debug, Clone, Serialize)]
pub struct StoreStatus {
    /// One entry per catalog table, in enumeration order.
    pub tables: Vec<TableStatus>,
    /// Whether the posts search structure exists.
    pub search_index: bool,
}

/// Streams dump records into the destination database.
pub struct Loader {
    conn: Connection,
    templates: SqlTemplates,
}

impl Loader {
    /// Creates a loader over an open connection with the default SQL
    /// templates.
    pub fn new(conn: Connection) -> Self {
        Self::with_templates(conn, SqlTemplates::default())
    }

    /// Creates a loader with custom statement templates.
    pub fn with_templates(conn: Connection, templates: SqlTemplates) -> Self {
        Self { conn, templates }
    }

    /// Opens a dump file and loads it into the given table.
    pub fn load_file(&mut self, table: &TableDef, path: &Path) -> Result<LoadReport> {
        let reader = RecordReader::from_path(path)?;
        self.load_table(table, reader)
    }

    /// Loads a stream of records into the given table.
    ///
    /// Creates the table if absent (best-effort), sets up the search
    /// structure when the table is `posts` (fatal on failure), inserts
    /// each record, and commits once after the stream is exhausted.
    ///
    /// Per-record failures are logged, marked with a printed `x`, and
    /// skipped; a reader error abandons the file without committing.
    pub fn load_table<I>(&mut self, table: &TableDef, records: I) -> Result<LoadReport>
    where
        I: IntoIterator<Item = sedump_xml::Result<Record>>,
    {
        let create_sql = self.templates.create_table_sql(table);
        println!("Creating table {}", table.name);
        info!("{create_sql}");
        if let Err(err) = self.conn.execute(&create_sql, []) {
            // Proceed against whatever table already exists.
            warn!("create table {} failed: {err}", table.name);
        }

        if table.name == "posts" {
            self.create_search_index()?;
        }

        let mut inserted: u64 = 0;
        let mut skipped: u64 = 0;
        let tx = self.conn.transaction()?;
        for record in records {
            let record = record?;
            match insert_record(&tx, &self.templates, table, &record) {
                Ok(true) => {
                    inserted += 1;
                    if inserted % 1000 == 0 {
                        println!("{inserted}");
                    }
                }
                Ok(false) => {}
                Err(err) => {
                    warn!("skipping {} record: {err}", table.name);
                    skipped += 1;
                    print!("x");
                    let _ = std::io::stdout().flush();
                }
            }
        }
        println!();
        tx.commit()?;

        Ok(LoadReport {
            table: table.name.to_string(),
            inserted,
            skipped,
        })
    }

    /// Creates the posts search structure: the FTS5 virtual table and its
    /// four synchronization triggers.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::SearchSetup`] on the first failing statement.
    /// This path is fatal by design — a second run against an existing
    /// database fails here rather than silently skipping.
    pub fn create_search_index(&self) -> Result<()> {
        for sql in SEARCH_SETUP_SQL {
            info!("{sql}");
            if let Err(err) = self.conn.execute(sql, []) {
                warn!("search setup failed: {err}");
                return Err(StoreError::SearchSetup(err));
            }
        }
        Ok(())
    }

    /// Creates the three secondary indices.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::IndexCreation`] on the first failing
    /// statement. Like search setup, and unlike record ingestion, this is
    /// fatal — the statements carry no `IF NOT EXISTS`.
    pub fn create_indices(&self) -> Result<()> {
        for sql in INDEX_SQL {
            info!("{sql}");
            if let Err(err) = self.conn.execute(sql, []) {
                warn!("index creation failed: {err}");
                return Err(StoreError::IndexCreation(err));
            }
        }
        Ok(())
    }

    /// Reports existence and row counts for every catalog table plus the
    /// search structure. Missing tables are reported, not errors.
    pub fn status(&self) -> Result<StoreStatus> {
        let mut tables = Vec::with_capacity(catalog::TABLES.len());
        for table in catalog::TABLES {
            let exists = self.table_exists(table.name)?;
            let rows = if exists {
                self.count_rows(table.name)?
            } else {
                0
            };
            tables.push(TableStatus {
                name: table.name.to_string(),
                exists,
                rows,
            });
        }
        let search_index = self.table_exists("posts_search")?;
        Ok(StoreStatus {
            tables,
            search_index,
        })
    }

    /// Returns a reference to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Consumes the loader and returns the underlying connection.
    pub fn into_connection(self) -> Connection {
        self.conn
    }

    fn table_exists(&self, name: &str) -> Result<bool> {
        let mut stmt = self
            .conn
            .prepare("SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name=?1")?;
        let count: i64 = stmt.query_row([name], |row| row.get(0))?;
        Ok(count > 0)
    }

    fn count_rows(&self, table: &str) -> Result<u64> {
        let mut stmt = self.conn.prepare(&format!("SELECT COUNT(*) FROM {table}"))?;
        let count: i64 = stmt.query_row([], |row| row.get(0))?;
        Ok(count as u64)
    }
}

/// Inserts one record; `Ok(false)` means the record had no attributes and
/// nothing was executed.
fn insert_record(
    tx: &Transaction<'_>,
    templates: &SqlTemplates,
    table: &TableDef,
    record: &Record,
) -> Result<bool> {
    if record.is_empty() {
        return Ok(false);
    }
    let (columns, values) = row_values(table, record)?;
    debug!("insert into {}: {:?}", table.name, columns);
    let sql = templates.insert_sql(table.name, &columns);
    tx.execute(&sql, params_from_iter(values.iter().map(SqlParam)))?;
    Ok(true)
}
