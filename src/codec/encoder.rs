//! Store encoder
//!
//! Renders tables, in store order, into the text format.

use std::io::Write;

use crate::error::{Result, TabulaError};
use crate::store::Store;
use crate::table::Table;

use super::{INDENT, KEY_SEPARATOR, PAIR_SEPARATOR, TABLE_PREFIX};

/// Encode the whole store to text
///
/// Does not validate; call [`check_encodable`] first when the content may
/// come from untrusted input.
pub fn encode_store(store: &Store) -> String {
    let mut out = String::new();
    for table in store.tables() {
        encode_table(&mut out, table);
    }
    out
}

/// Encode the whole store into a writer
pub fn write_store<W: Write>(writer: &mut W, store: &Store) -> Result<()> {
    writer.write_all(encode_store(store).as_bytes())?;
    Ok(())
}

/// Verify that every name and value survives an encode/decode round trip
pub fn check_encodable(store: &Store) -> Result<()> {
    for table in store.tables() {
        if !is_encodable_name(table.name()) {
            return Err(unencodable(table.name(), "", table.name()));
        }

        for column in table.schema().columns() {
            if !is_encodable_name(&column.name) {
                return Err(unencodable(table.name(), &column.name, &column.name));
            }
        }

        for row in table.rows() {
            for column in table.schema().names() {
                let value = row.get(column).unwrap_or_default();
                if !is_encodable_value(value) {
                    return Err(unencodable(table.name(), column, value));
                }
            }
        }
    }
    Ok(())
}

// =============================================================================
// Private Helpers
// =============================================================================

fn encode_table(out: &mut String, table: &Table) {
    out.push_str(TABLE_PREFIX);
    out.push_str(table.name());
    out.push('\n');

    for column in table.schema().columns() {
        out.push_str(&format!("{}{} ({})\n", INDENT, column.name, column.ty));
    }

    for row in table.rows() {
        out.push_str(INDENT);
        for column in table.schema().names() {
            out.push_str(column);
            out.push_str(KEY_SEPARATOR);
            out.push_str(row.get(column).unwrap_or_default());
            out.push_str(PAIR_SEPARATOR);
        }
        out.push('\n');
    }
}

/// Values may be empty but must not contain a separator or a line break
fn is_encodable_value(value: &str) -> bool {
    !value.contains(KEY_SEPARATOR)
        && !value.contains(PAIR_SEPARATOR)
        && !value.contains(['\n', '\r'])
}

/// Names are additionally non-empty, trimmed, and do not start with ':'
fn is_encodable_name(name: &str) -> bool {
    !name.is_empty()
        && name.trim() == name
        && !name.starts_with(':')
        && is_encodable_value(name)
}

fn unencodable(table: &str, column: &str, value: &str) -> TabulaError {
    TabulaError::Unencodable {
        table: table.to_string(),
        column: column.to_string(),
        value: value.to_string(),
    }
}
