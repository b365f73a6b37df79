//! SQLite storage backend for Stack Exchange data-dump imports.
//!
//! This crate turns the catalog from [`sedump_core`] and the record stream
//! from [`sedump_xml`] into a populated SQLite database: base tables, an
//! FTS5 search structure over posts kept consistent by triggers, and the
//! secondary indices built after loading.
//!
//! # Architecture
//!
//! - **`schema`** — statement generation ([`SqlTemplates`]) plus the fixed
//!   search and index statements
//! - **`convert`** — record → (present columns, bound parameters)
//! - **`loader`** — [`Loader`]: per-file pipeline, search setup, indices,
//!   and a read-only [`status`](Loader::status) snapshot
//!
//! # Quick start
//!
//! ```no_run
//! use rusqlite::Connection;
//! use sedump_core::catalog;
//! use sedump_sqlite::Loader;
//!
//! let conn = Connection::open("so-dump.db").unwrap();
//! let mut loader = Loader::new(conn);
//! let posts = catalog::table("posts").unwrap();
//! let report = loader.load_file(posts, "Posts.xml".as_ref()).unwrap();
//! println!("{} inserted, {} skipped", report.inserted, report.skipped);
//! loader.create_indices().unwrap();
//! ```

mod convert;
mod error;
mod loader;
mod schema;

pub use error::{Result, StoreError};
pub use loader::{LoadReport, Loader, StoreStatus, TableStatus};
pub use schema::SqlTemplates;
