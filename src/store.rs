//! Store
//!
//! Owns every table of a database session and dispatches row operations
//! to the right one.
//!
//! ## Concurrency
//! The store is single-threaded: mutations take `&mut self` and nothing is
//! locked internally. An embedding that shares a store across threads must
//! guard the whole store with one external lock.
//!
//! ## Ordering
//! Tables are kept in a `BTreeMap`, so iteration (and therefore the saved
//! file) is in table-name order.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::{info, warn};

use crate::codec::{self, LoadReport};
use crate::config::LoadMode;
use crate::error::{Result, TabulaError};
use crate::predicate::Predicate;
use crate::schema::{Column, Schema};
use crate::table::{ResultSet, Table};

/// In-memory database: table name -> table
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store {
    tables: BTreeMap<String, Table>,
}

impl Store {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    // =========================================================================
    // Table Lifecycle
    // =========================================================================

    /// Register a new, empty table
    ///
    /// An existing table of the same name is replaced, rows included.
    /// Repeated column names are rejected and leave the store unchanged.
    pub fn create_table(&mut self, name: &str, columns: Vec<Column>) -> Result<()> {
        let schema = Schema::from_columns(name, columns)?;

        if self.tables.contains_key(name) {
            warn!("Table {} already exists; replacing it", name);
        }
        self.tables.insert(name.to_string(), Table::new(name, schema));

        info!("Table {} created", name);
        Ok(())
    }

    /// Remove a table and all its rows
    pub fn drop_table(&mut self, name: &str) -> Result<()> {
        match self.tables.remove(name) {
            Some(table) => {
                info!("Table {} dropped ({} rows)", name, table.row_count());
                Ok(())
            }
            None => Err(not_found(name)),
        }
    }

    /// Append a column to a table, backfilling existing rows with `""`
    pub fn add_column(&mut self, table: &str, column: Column) -> Result<()> {
        self.table_mut(table)?.add_column(column)
    }

    // =========================================================================
    // Row Operations
    // =========================================================================

    /// Insert one row; see [`Table::insert_row`]
    pub fn insert<I, K, V>(&mut self, table: &str, values: I) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.table_mut(table)?.insert_row(values)
    }

    /// Update matching rows; see [`Table::update_rows`]
    pub fn update<I, K, V>(&mut self, table: &str, set_values: I, predicate: &Predicate) -> Result<usize>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        self.table_mut(table)?.update_rows(set_values, predicate)
    }

    /// Delete matching rows; see [`Table::delete_rows`]
    pub fn delete(&mut self, table: &str, predicate: &Predicate) -> Result<usize> {
        self.table_mut(table)?.delete_rows(predicate)
    }

    /// Project matching rows; see [`Table::select_rows`]
    pub fn select<S: AsRef<str>>(
        &self,
        table: &str,
        projection: &[S],
        predicate: &Predicate,
    ) -> Result<ResultSet> {
        self.table(table)
            .ok_or_else(|| not_found(table))?
            .select_rows(projection, predicate)
    }

    // =========================================================================
    // Persistence
    // =========================================================================

    /// Write the whole store to `path` in the text format
    ///
    /// Content that cannot be represented is rejected before the file is
    /// opened, so a failed save never truncates an existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        codec::check_encodable(self)?;

        let mut writer = BufWriter::new(File::create(path)?);
        codec::write_store(&mut writer, self)?;
        writer.flush()?;

        info!("Database saved to {} ({} tables)", path.display(), self.len());
        Ok(())
    }

    /// Replace the store with the contents of `path`, skipping bad lines
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<LoadReport> {
        self.load_with_mode(path, LoadMode::Lenient)
    }

    /// Replace the store with the contents of `path`
    ///
    /// On error the current contents are kept.
    pub fn load_with_mode(&mut self, path: impl AsRef<Path>, mode: LoadMode) -> Result<LoadReport> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let (store, report) = codec::decode_store(&text, mode)?;
        *self = store;

        info!(
            "Database loaded from {}: {} tables, {} rows, {} lines skipped",
            path.display(),
            report.tables,
            report.rows,
            report.skipped_lines
        );
        Ok(report)
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn table(&self, name: &str) -> Option<&Table> {
        self.tables.get(name)
    }

    pub fn contains_table(&self, name: &str) -> bool {
        self.tables.contains_key(name)
    }

    /// Table names in storage (and encoding) order
    pub fn table_names(&self) -> Vec<&str> {
        self.tables.keys().map(String::as_str).collect()
    }

    /// Iterate tables in name order
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.tables.values()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    /// Put a decoded table in place (decoder use)
    pub(crate) fn put_table(&mut self, table: Table) {
        self.tables.insert(table.name().to_string(), table);
    }

    fn table_mut(&mut self, name: &str) -> Result<&mut Table> {
        self.tables.get_mut(name).ok_or_else(|| not_found(name))
    }
}

fn not_found(table: &str) -> TabulaError {
    TabulaError::NotFound {
        table: table.to_string(),
    }
}
