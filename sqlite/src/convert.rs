//! Conversion from attribute records to bindable SQL rows.
//!
//! A [`Record`] becomes a pair of (present column names, coerced values),
//! both in the record's source attribute order. Column names come from the
//! catalog entry so the rendered statement always uses the declared
//! spelling; any attribute with no catalog column rejects the whole record.

use rusqlite::ToSql;
use rusqlite::types::ToSqlOutput;
use sedump_core::{FieldValue, TableDef, coerce};
use sedump_xml::Record;

use crate::error::{Result, StoreError};

/// Borrowing [`ToSql`] adapter for coerced values.
pub(crate) struct SqlParam<'a>(pub &'a FieldValue);

impl ToSql for SqlParam<'_> {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        match self.0 {
            FieldValue::Integer(value) => Ok(ToSqlOutput::from(*value)),
            FieldValue::Text(value) => Ok(ToSqlOutput::from(value.as_str())),
        }
    }
}

/// Coerces a record against its table definition.
///
/// Returns the present column names and values in source attribute order.
/// Absent columns are simply absent — presence is decided by the XML
/// attribute list, never by value content.
///
/// # Errors
///
/// [`StoreError::UnknownColumn`] for an attribute outside the catalog's
/// column set; [`StoreError::Coerce`] for an unparseable value.
pub(crate) fn row_values<'t>(
    table: &'t TableDef,
    record: &Record,
) -> Result<(Vec<&'t str>, Vec<FieldValue>)> {
    let mut columns = Vec::with_capacity(record.len());
    let mut values = Vec::with_capacity(record.len());
    for (name, raw) in record.iter() {
        let column = table
            .column(name)
            .ok_or_else(|| StoreError::UnknownColumn {
                table: table.name.to_string(),
                column: name.to_string(),
            })?;
        values.push(coerce(column.ty, raw)?);
        columns.push(column.name);
    }
    Ok((columns, values))
}
