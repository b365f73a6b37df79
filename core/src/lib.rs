//! Core types for Stack Exchange data-dump imports.
//!
//! This crate provides the schema catalog and type coercion shared by the
//! XML reader and the SQLite storage backend. It is pure data and
//! conversion logic with no I/O.
//!
//! # Architecture
//!
//! - **`types`** — declared column types, table/column definitions, and
//!   the native [`FieldValue`] produced by coercion
//! - **`catalog`** — the constant seven-table catalog in processing order
//! - **`coerce`** — raw attribute string → native value conversion
//!
//! # Quick start
//!
//! ```
//! use sedump_core::{FieldValue, catalog, coerce};
//!
//! let votes = catalog::table("votes").unwrap();
//! let column = votes.column("VoteTypeId").unwrap();
//! let value = coerce(column.ty, "2").unwrap();
//! assert_eq!(value, FieldValue::Integer(2));
//! ```

mod coerce;
mod types;

pub mod catalog;

pub use coerce::{CoerceError, coerce};
pub use types::{ColumnDef, ColumnType, FieldValue, TableDef};
