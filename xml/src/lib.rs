//! Streaming record reader for Stack Exchange XML data-dump files.
//!
//! Dump files can run to many gigabytes, so this crate never materializes
//! a document tree. [`RecordReader`] is a pull-based iterator that yields
//! one flat attribute [`Record`] per second-level element and releases each
//! element's storage before advancing.
//!
//! # Quick start
//!
//! ```no_run
//! use sedump_xml::RecordReader;
//!
//! let reader = RecordReader::from_path("Posts.xml").unwrap();
//! for record in reader {
//!     let record = record.unwrap();
//!     println!("post {:?}", record.get("Id"));
//! }
//! ```
//!
//! Files whose name ends in `.gz` are decompressed on the fly.

mod error;
mod reader;

pub use error::{Result, XmlError};
pub use reader::{Record, RecordReader};
