//! Table: the row engine
//!
//! A table owns its schema and its rows in insertion order.
//!
//! ## Write semantics
//! - **insert**: all-or-nothing. An unknown column rejects the whole row.
//! - **update**: validate-then-apply per row. Every assignment of a matching
//!   row is checked and coerced before any of them is written, so a failing
//!   row is left untouched; rows updated before it stay updated.
//! - **delete**: the predicate is evaluated against every row before any
//!   row is removed; survivors keep their relative order.

use tracing::{debug, warn};

use crate::error::{Result, TabulaError};
use crate::predicate::Predicate;
use crate::row::Row;
use crate::schema::{Column, ColumnType, Schema};
use crate::value::Value;

/// Projected output of a select
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSet {
    /// Column names, in output order
    pub header: Vec<String>,

    /// Declared type of each header column
    pub types: Vec<ColumnType>,

    /// One entry per matching row, aligned with `header`
    pub rows: Vec<Vec<String>>,
}

impl ResultSet {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// A named, schema-typed collection of rows
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    name: String,
    schema: Schema,
    rows: Vec<Row>,
}

impl Table {
    /// Create an empty table
    pub fn new(name: impl Into<String>, schema: Schema) -> Self {
        Self {
            name: name.into(),
            schema,
            rows: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn column_type(&self, column: &str) -> Option<ColumnType> {
        self.schema.type_of(column)
    }

    /// Append a column and backfill every existing row with `""`
    pub fn add_column(&mut self, column: Column) -> Result<()> {
        let name = column.name.clone();
        self.schema.push(&self.name, column)?;

        for row in &mut self.rows {
            row.backfill(&name);
        }

        debug!("Column {} added to table {} ({} rows backfilled)", name, self.name, self.rows.len());
        Ok(())
    }

    /// Insert a row built from `values`
    ///
    /// The row starts with every declared column set to `""`. Values are
    /// stored verbatim; later duplicates of a key win.
    pub fn insert_row<I, K, V>(&mut self, values: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut row = Row::seeded(&self.schema);

        for (column, value) in values {
            let column = column.into();
            if !self.schema.contains(&column) {
                return Err(column_not_found(&self.name, &column));
            }
            row.set(column, value);
        }

        self.rows.push(row);
        debug!("Row inserted into table {} (now {} rows)", self.name, self.rows.len());
        Ok(())
    }

    /// Project the rows matching `predicate`
    ///
    /// An empty projection selects every column in schema order. Requested
    /// columns may repeat and are emitted as requested.
    pub fn select_rows<S: AsRef<str>>(
        &self,
        projection: &[S],
        predicate: &Predicate,
    ) -> Result<ResultSet> {
        let header: Vec<String> = if projection.is_empty() {
            self.schema.names().map(str::to_string).collect()
        } else {
            projection.iter().map(|c| c.as_ref().to_string()).collect()
        };

        let types = header
            .iter()
            .map(|column| {
                self.schema
                    .type_of(column)
                    .ok_or_else(|| column_not_found(&self.name, column))
            })
            .collect::<Result<Vec<_>>>()?;

        let mut rows = Vec::new();
        for row in self.rows.iter().filter(|row| predicate.matches(row)) {
            let projected = header
                .iter()
                .map(|column| {
                    row.get(column)
                        .map(str::to_string)
                        .ok_or_else(|| column_not_found(&self.name, column))
                })
                .collect::<Result<Vec<_>>>()?;
            rows.push(projected);
        }

        Ok(ResultSet {
            header,
            types,
            rows,
        })
    }

    /// Overwrite columns of every row matching `predicate`
    ///
    /// Returns the number of rows updated. Stops at the first row whose
    /// assignments fail; earlier rows keep their new values.
    pub fn update_rows<I, K, V>(&mut self, set_values: I, predicate: &Predicate) -> Result<usize>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let assignments: Vec<(String, String)> = set_values
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();

        let mut updated = 0;
        for row in &mut self.rows {
            if !predicate.matches(row) {
                continue;
            }

            let staged = match stage_assignments(&self.name, &self.schema, row, &assignments) {
                Ok(staged) => staged,
                Err(e) => {
                    if updated > 0 {
                        warn!("Update of table {} stopped after {} rows: {}", self.name, updated, e);
                    }
                    return Err(e);
                }
            };

            for (column, value) in staged {
                row.set(column, value);
            }
            updated += 1;
        }

        debug!("{} rows updated in table {}", updated, self.name);
        Ok(updated)
    }

    /// Remove every row matching `predicate`, returning how many were removed
    pub fn delete_rows(&mut self, predicate: &Predicate) -> Result<usize> {
        // Decide every row first, then compact
        let matched: Vec<bool> = self.rows.iter().map(|row| predicate.matches(row)).collect();
        let removed = matched.iter().filter(|hit| **hit).count();

        let rows = std::mem::take(&mut self.rows);
        self.rows = rows
            .into_iter()
            .zip(matched)
            .filter_map(|(row, hit)| (!hit).then_some(row))
            .collect();

        debug!("{} rows deleted from table {}", removed, self.name);
        Ok(removed)
    }

    /// Append an already-built row (decoder use; keys are checked by the caller)
    pub(crate) fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }
}

/// Check and coerce every assignment for one row without touching it
fn stage_assignments<'a>(
    table: &str,
    schema: &Schema,
    row: &Row,
    assignments: &'a [(String, String)],
) -> Result<Vec<(&'a str, String)>> {
    let mut staged = Vec::with_capacity(assignments.len());

    for (column, raw) in assignments {
        if !row.contains(column) {
            return Err(column_not_found(table, column));
        }

        let rendered = match schema.type_of(column) {
            Some(ty) => Value::coerce(column, raw, ty)?.render(),
            None => raw.clone(),
        };
        staged.push((column.as_str(), rendered));
    }

    Ok(staged)
}

fn column_not_found(table: &str, column: &str) -> TabulaError {
    TabulaError::ColumnNotFound {
        table: table.to_string(),
        column: column.to_string(),
    }
}
