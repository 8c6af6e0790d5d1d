//! Session Module
//!
//! Ties a [`Store`] to its [`Config`] and executes parsed shell commands.
//!
//! ## Responsibilities
//! - Load the configured data file on open
//! - Route commands to store operations
//! - Save to the configured data file on demand and, if enabled, on close

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::codec::LoadReport;
use crate::config::Config;
use crate::error::{Result, TabulaError};
use crate::schema::Column;
use crate::shell::Command;
use crate::store::Store;
use crate::table::ResultSet;

/// Result of executing one command
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Status message
    Done(String),

    /// Rows changed by an update or delete
    Affected(usize),

    /// Query output
    Rows(ResultSet),

    /// Table names
    Tables(Vec<String>),

    /// Columns of a table
    Schema(Vec<Column>),

    /// Summary of a load
    Loaded(LoadReport),

    /// The caller should stop reading commands
    Exit,
}

/// A database session
pub struct Session {
    config: Config,
    store: Store,
}

impl Session {
    /// Open a session
    ///
    /// Loads `config.data_file` when it exists. A missing file is an empty
    /// database unless `create_missing` is off.
    pub fn open(config: Config) -> Result<Self> {
        let mut store = Store::new();

        if let Some(path) = &config.data_file {
            if path.exists() {
                let report = store.load_with_mode(path, config.load_mode)?;
                debug!("Session opened with {} tables", report.tables);
            } else if config.create_missing {
                info!("Data file {} does not exist yet; starting empty", path.display());
            } else {
                return Err(TabulaError::Config(format!(
                    "data file {} does not exist",
                    path.display()
                )));
            }
        }

        Ok(Self { config, store })
    }

    /// A session with no data file
    pub fn in_memory() -> Self {
        Self {
            config: Config::default(),
            store: Store::new(),
        }
    }

    /// Execute a command
    pub fn execute(&mut self, command: Command) -> Result<Outcome> {
        match command {
            Command::CreateTable { table, columns } => {
                self.store.create_table(&table, columns)?;
                Ok(Outcome::Done(format!("Table {} created", table)))
            }
            Command::AddColumn { table, column } => {
                let name = column.name.clone();
                self.store.add_column(&table, column)?;
                Ok(Outcome::Done(format!("Column {} added to table {}", name, table)))
            }
            Command::DropTable { table } => {
                self.store.drop_table(&table)?;
                Ok(Outcome::Done(format!("Table {} dropped", table)))
            }
            Command::Insert { table, values } => {
                self.store.insert(&table, values)?;
                Ok(Outcome::Done(format!("Data inserted into table {}", table)))
            }
            Command::Update {
                table,
                set_values,
                predicate,
            } => {
                let updated = self.store.update(&table, set_values, &predicate)?;
                Ok(Outcome::Affected(updated))
            }
            Command::Query {
                table,
                projection,
                predicate,
            } => {
                let result = self.store.select(&table, projection.as_slice(), &predicate)?;
                Ok(Outcome::Rows(result))
            }
            Command::Delete { table, predicate } => {
                let removed = self.store.delete(&table, &predicate)?;
                Ok(Outcome::Affected(removed))
            }
            Command::Tables => Ok(Outcome::Tables(
                self.store.table_names().into_iter().map(str::to_string).collect(),
            )),
            Command::Describe { table } => {
                let table = self.store.table(&table).ok_or(TabulaError::NotFound { table })?;
                Ok(Outcome::Schema(table.schema().columns().to_vec()))
            }
            Command::Save { path } => {
                let path = self.resolve_path(path)?;
                self.store.save(&path)?;
                Ok(Outcome::Done(format!("Database saved to {}", path.display())))
            }
            Command::Load { path } => {
                let path = self.resolve_path(path)?;
                let report = self.store.load_with_mode(&path, self.config.load_mode)?;
                Ok(Outcome::Loaded(report))
            }
            Command::Help => Ok(Outcome::Done(crate::shell::HELP.to_string())),
            Command::Exit => Ok(Outcome::Exit),
        }
    }

    /// Save to the configured data file
    pub fn save(&self) -> Result<()> {
        let path = self.resolve_path(None)?;
        self.store.save(path)
    }

    /// Close the session, saving first when autosave is on
    pub fn close(self) -> Result<()> {
        if self.config.autosave && self.config.data_file.is_some() {
            self.save()?;
        }
        Ok(())
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    pub fn store(&self) -> &Store {
        &self.store
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn data_file(&self) -> Option<&Path> {
        self.config.data_file.as_deref()
    }

    /// An explicit path wins over the configured data file
    fn resolve_path(&self, path: Option<PathBuf>) -> Result<PathBuf> {
        path.or_else(|| self.config.data_file.clone())
            .ok_or_else(|| TabulaError::Config("no file given and no data file configured".to_string()))
    }
}
