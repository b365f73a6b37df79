//! Pull-based record streaming over dump XML.
//!
//! A dump file is one document whose second-level elements each describe a
//! record through attributes:
//!
//! ```xml
//! <?xml version="1.0" encoding="utf-8"?>
//! <votes>
//!   <row Id="1" PostId="3" VoteTypeId="2" CreationDate="2010-07-19T00:00:00.000" />
//!   <row Id="2" PostId="7" VoteTypeId="2" CreationDate="2010-07-19T00:00:00.000" />
//! </votes>
//! ```
//!
//! [`RecordReader`] walks the document event by event and yields one
//! [`Record`] per such element, in document order, reusing a single event
//! buffer so memory stays bounded however large the file is. The sequence
//! is single-pass and non-restartable.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use flate2::read::GzDecoder;
use quick_xml::events::{BytesStart, Event};
use quick_xml::{Decoder, Reader};

use crate::error::{Result, XmlError};

/// One record: an element's attributes in source order.
///
/// Attribute values are entity-unescaped. Sparse by nature — a record
/// carries whatever subset of its table's columns the export emitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    attrs: Vec<(String, String)>,
}

impl Record {
    /// Iterates `(name, value)` pairs in the order they appear in the file.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns the value of the named attribute, if present.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Number of attributes on this record.
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    /// Whether the record carries no attributes at all.
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }
}

/// Streaming iterator of [`Record`]s from one XML document.
///
/// # Examples
///
/// ```
/// use sedump_xml::RecordReader;
///
/// let xml = br#"<badges><row Id="1" Name="Autobiographer" TagBased="FALSE"/></badges>"#;
/// let mut reader = RecordReader::new(&xml[..]);
///
/// let record = reader.next().unwrap().unwrap();
/// assert_eq!(record.get("Name"), Some("Autobiographer"));
/// assert!(reader.next().is_none());
/// ```
pub struct RecordReader<R: BufRead> {
    reader: Reader<R>,
    buf: Vec<u8>,
    depth: usize,
    finished: bool,
}

impl<R: BufRead> std::fmt::Debug for RecordReader<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordReader")
            .field("depth", &self.depth)
            .field("finished", &self.finished)
            .finish_non_exhaustive()
    }
}

impl<R: BufRead> RecordReader<R> {
    /// Creates a reader over an already-open source.
    pub fn new(source: R) -> Self {
        Self {
            reader: Reader::from_reader(source),
            buf: Vec::new(),
            depth: 0,
            finished: false,
        }
    }

    fn read_record(&mut self) -> Result<Option<Record>> {
        loop {
            // Clearing before every event releases the previous element's
            // storage; the buffer never grows past one element.
            self.buf.clear();
            let decoder = self.reader.decoder();
            match self.reader.read_event_into(&mut self.buf)? {
                Event::Start(ref element) => {
                    self.depth += 1;
                    if self.depth == 2 {
                        return Ok(Some(collect_attributes(decoder, element)?));
                    }
                }
                Event::Empty(ref element) => {
                    if self.depth == 1 {
                        return Ok(Some(collect_attributes(decoder, element)?));
                    }
                }
                Event::End(_) => {
                    self.depth = self.depth.saturating_sub(1);
                }
                Event::Eof => {
                    self.finished = true;
                    return Ok(None);
                }
                // Text, declarations, comments, CDATA carry no records.
                _ => {}
            }
        }
    }
}

fn collect_attributes(decoder: Decoder, element: &BytesStart<'_>) -> Result<Record> {
    let mut attrs = Vec::new();
    for attr in element.attributes() {
        let attr = attr.map_err(quick_xml::Error::from)?;
        let name = decoder.decode(attr.key.as_ref())?.into_owned();
        let value = attr.unescape_value()?.into_owned();
        attrs.push((name, value));
    }
    Ok(Record { attrs })
}

impl RecordReader<Box<dyn BufRead>> {
    /// Opens a dump file, decompressing transparently when the file name
    /// ends in `.gz`.
    ///
    /// # Errors
    ///
    /// Returns [`XmlError::Io`] if the file cannot be opened.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let source: Box<dyn BufRead> = if path.extension().is_some_and(|ext| ext == "gz") {
            Box::new(BufReader::new(GzDecoder::new(file)))
        } else {
            Box::new(BufReader::new(file))
        };
        Ok(Self::new(source))
    }
}

impl<R: BufRead> Iterator for RecordReader<R> {
    type Item = std::result::Result<Record, XmlError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        match self.read_record() {
            Ok(record) => record.map(Ok),
            Err(err) => {
                // A parse error is final; the stream does not resume.
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}
