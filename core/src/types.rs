//! Schema type definitions for the data-dump catalog.
//!
//! This module defines the data model shared by the reader and the storage
//! backend: declared column types, column and table definitions, and the
//! native value produced by coercion. Table and column definitions are
//! plain static data — there is no behavioral specialization per table.

use serde::{Deserialize, Serialize};

/// Declared type of a catalog column.
///
/// `DateTime` is a declaration label only: values are stored as text and
/// never parsed or validated, which keeps them compatible with SQLite's
/// date functions.
///
/// # Examples
///
/// ```
/// use sedump_core::ColumnType;
///
/// assert_eq!(ColumnType::Integer.as_sql(), "INTEGER");
/// assert_eq!(ColumnType::DateTime.as_sql(), "DATETIME");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    /// Base-10 integer, parsed during coercion.
    Integer,
    /// Free text, passed through unchanged.
    Text,
    /// Timestamp text, passed through unchanged.
    DateTime,
    /// `"TRUE"` maps to 1, every other value to 0.
    Boolean,
}

impl ColumnType {
    /// Returns the SQL type label used in `CREATE TABLE` statements.
    pub fn as_sql(self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Text => "TEXT",
            ColumnType::DateTime => "DATETIME",
            ColumnType::Boolean => "BOOLEAN",
        }
    }
}

/// A column definition: name plus declared type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    /// Column name as it appears in the dump XML and the database.
    pub name: &'static str,
    /// Declared type controlling coercion and the SQL declaration.
    pub ty: ColumnType,
}

/// A table definition: name, source file stem, and ordered columns.
///
/// Column order is the catalog's declaration order. It carries no SQL
/// semantics (inserts name their columns) but fixes the order of rendered
/// DDL and debug output.
///
/// # Examples
///
/// ```
/// use sedump_core::catalog;
///
/// let posts = catalog::table("posts").unwrap();
/// assert_eq!(posts.xml_file(), "Posts.xml");
/// assert!(posts.column("Body").is_some());
/// assert!(posts.column("body").is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableDef {
    /// Lowercase table name in the database.
    pub name: &'static str,
    /// Dump file stem with the export's original casing (e.g. `PostLinks`).
    pub file_stem: &'static str,
    /// Ordered column definitions.
    pub columns: &'static [ColumnDef],
}

impl TableDef {
    /// Looks up a column by its (case-sensitive) attribute name.
    pub fn column(&self, name: &str) -> Option<&'static ColumnDef> {
        self.columns.iter().find(|col| col.name == name)
    }

    /// Returns the expected XML file name for this table.
    pub fn xml_file(&self) -> String {
        format!("{}.xml", self.file_stem)
    }
}

/// A coerced native value ready for parameter binding.
///
/// Integers cover both `INTEGER` columns and the 0/1 encoding of
/// `BOOLEAN` columns; everything else is carried as text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    /// Native integer value.
    Integer(i64),
    /// Text value, including unparsed DATETIME strings.
    Text(String),
}
