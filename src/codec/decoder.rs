//! Store decoder
//!
//! Line-oriented parser with one recognizer per line shape:
//!
//! 1. `Table: <name>` header
//! 2. indented row: `<name>: <value>, ` pairs (empty for a zero-column table)
//! 3. indented column declaration: `<name> (<type>)`
//!
//! Anything else is unrecognized. In lenient mode such lines are logged and
//! skipped; in strict mode the first one fails the whole decode.

use tracing::warn;

use crate::config::LoadMode;
use crate::error::{Result, TabulaError};
use crate::row::Row;
use crate::schema::{Column, ColumnType, Schema};
use crate::store::Store;
use crate::table::Table;

use super::{INDENT, KEY_SEPARATOR, PAIR_SEPARATOR, TABLE_PREFIX};

/// Summary of a decode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadReport {
    /// Tables in the decoded store
    pub tables: usize,

    /// Rows across all decoded tables
    pub rows: usize,

    /// Unrecognized lines that were skipped (always 0 in strict mode)
    pub skipped_lines: usize,
}

/// Shape of a single line
#[derive(Debug, PartialEq)]
enum Line<'a> {
    Header(&'a str),
    Row(Vec<(&'a str, &'a str)>),
    Column(&'a str, ColumnType),
}

/// Decode text produced by the encoder back into a store
pub fn decode_store(text: &str, mode: LoadMode) -> Result<(Store, LoadReport)> {
    let mut store = Store::new();
    let mut open: Option<Table> = None;
    let mut report = LoadReport::default();

    for (index, line) in text.lines().enumerate() {
        let line_number = index + 1;

        let outcome = recognize(line).and_then(|shape| apply(shape, &mut store, &mut open));

        if let Err(reason) = outcome {
            match mode {
                LoadMode::Strict => {
                    return Err(TabulaError::MalformedEncoding {
                        line: line_number,
                        reason,
                    })
                }
                LoadMode::Lenient => {
                    warn!("Skipping line {}: {}", line_number, reason);
                    report.skipped_lines += 1;
                }
            }
        }
    }

    if let Some(table) = open.take() {
        flush(&mut store, table);
    }

    report.tables = store.len();
    report.rows = store.tables().map(Table::row_count).sum();

    Ok((store, report))
}

// =============================================================================
// Recognizers
// =============================================================================

/// Classify a line, or explain why it matches no known shape
fn recognize(line: &str) -> std::result::Result<Line<'_>, String> {
    if let Some(name) = line.strip_prefix(TABLE_PREFIX) {
        return recognize_header(name);
    }

    let Some(body) = line.strip_prefix(INDENT) else {
        return Err(format!("unrecognized line {:?}", line));
    };

    if let Some(pairs) = recognize_row(body) {
        return Ok(Line::Row(pairs));
    }

    recognize_column(body)
}

fn recognize_header(name: &str) -> std::result::Result<Line<'_>, String> {
    let name = name.trim();
    if name.is_empty() {
        return Err("table header without a name".to_string());
    }
    Ok(Line::Header(name))
}

fn recognize_row(body: &str) -> Option<Vec<(&str, &str)>> {
    if body.is_empty() {
        return Some(Vec::new());
    }

    body.strip_suffix(PAIR_SEPARATOR)?
        .split(PAIR_SEPARATOR)
        .map(|pair| pair.split_once(KEY_SEPARATOR))
        .collect()
}

fn recognize_column(body: &str) -> std::result::Result<Line<'_>, String> {
    let declaration = body.trim();

    let (name, ty) = declaration
        .strip_suffix(')')
        .and_then(|rest| rest.rsplit_once(" ("))
        .ok_or_else(|| format!("unrecognized line {:?}", body))?;

    let name = name.trim();
    if name.is_empty() {
        return Err("column declaration without a name".to_string());
    }

    let ty = ty.parse::<ColumnType>().map_err(|e| e.to_string())?;
    Ok(Line::Column(name, ty))
}

// =============================================================================
// State Transitions
// =============================================================================

fn apply(shape: Line<'_>, store: &mut Store, open: &mut Option<Table>) -> std::result::Result<(), String> {
    match shape {
        Line::Header(name) => {
            if let Some(table) = open.take() {
                flush(store, table);
            }
            *open = Some(Table::new(name, Schema::new()));
            Ok(())
        }
        Line::Column(name, ty) => {
            let table = open
                .as_mut()
                .ok_or_else(|| format!("column {} declared outside of a table", name))?;
            table
                .add_column(Column::new(name, ty))
                .map_err(|e| e.to_string())
        }
        Line::Row(pairs) => {
            let table = open
                .as_mut()
                .ok_or_else(|| "row outside of a table".to_string())?;
            let row = build_row(table, &pairs)?;
            table.push_row(row);
            Ok(())
        }
    }
}

/// Seed a row from the schema and fill in the decoded pairs
fn build_row(table: &Table, pairs: &[(&str, &str)]) -> std::result::Result<Row, String> {
    if pairs.is_empty() && !table.schema().is_empty() {
        return Err(format!("empty row in table {}", table.name()));
    }

    let mut row = Row::seeded(table.schema());
    for (index, (column, value)) in pairs.iter().enumerate() {
        if !table.schema().contains(column) {
            return Err(format!("column {} not declared in table {}", column, table.name()));
        }
        if pairs[..index].iter().any(|(seen, _)| seen == column) {
            return Err(format!("column {} repeated in row", column));
        }
        row.set(*column, *value);
    }
    Ok(row)
}

fn flush(store: &mut Store, table: Table) {
    if store.contains_table(table.name()) {
        warn!("Table {} appears more than once; keeping the last one", table.name());
    }
    store.put_table(table);
}
