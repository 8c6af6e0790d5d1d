//! Schema definitions
//!
//! Ordered, typed column declarations of a table. Column order is the
//! canonical order for query output and for the text encoding.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{Result, TabulaError};

/// Declared type of a column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    Int,
    Double,
    String,
}

impl ColumnType {
    /// Spelling used by the command grammar and the text encoding
    pub fn as_str(&self) -> &'static str {
        match self {
            ColumnType::Int => "int",
            ColumnType::Double => "double",
            ColumnType::String => "string",
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ColumnType {
    type Err = TabulaError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "int" => Ok(ColumnType::Int),
            "double" => Ok(ColumnType::Double),
            "string" => Ok(ColumnType::String),
            other => Err(TabulaError::UnknownColumnType(other.to_string())),
        }
    }
}

/// A single column declaration
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub ty: ColumnType,
}

impl Column {
    pub fn new(name: impl Into<String>, ty: ColumnType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// Ordered column list with unique names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    columns: Vec<Column>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a schema from a column list, rejecting repeated names
    pub fn from_columns(table: &str, columns: Vec<Column>) -> Result<Self> {
        let mut schema = Self::new();
        for column in columns {
            schema.push(table, column)?;
        }
        Ok(schema)
    }

    /// Append a column. `table` is only used to name the error.
    pub fn push(&mut self, table: &str, column: Column) -> Result<()> {
        if self.contains(&column.name) {
            return Err(TabulaError::DuplicateColumn {
                table: table.to_string(),
                column: column.name,
            });
        }
        self.columns.push(column);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Declared type of a column, if it exists
    pub fn type_of(&self, name: &str) -> Option<ColumnType> {
        self.get(name).map(|c| c.ty)
    }

    /// Column names in schema order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|c| c.name.as_str())
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
