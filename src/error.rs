//! Error types for Tabula
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

use crate::schema::ColumnType;

/// Result type alias using TabulaError
pub type Result<T> = std::result::Result<T, TabulaError>;

/// Unified error type for Tabula operations
#[derive(Debug, Error)]
pub enum TabulaError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Schema Errors
    // -------------------------------------------------------------------------
    #[error("Table {table} not found")]
    NotFound { table: String },

    #[error("Column {column} already exists in table {table}")]
    DuplicateColumn { table: String, column: String },

    #[error("Unknown column type: {0} (expected int, double or string)")]
    UnknownColumnType(String),

    // -------------------------------------------------------------------------
    // Row Errors
    // -------------------------------------------------------------------------
    #[error("Column {column} not found in table {table}")]
    ColumnNotFound { table: String, column: String },

    #[error("Cannot store {value:?} in {ty} column {column}")]
    Coercion {
        column: String,
        value: String,
        ty: ColumnType,
    },

    // -------------------------------------------------------------------------
    // Encoding Errors
    // -------------------------------------------------------------------------
    #[error("Malformed encoding at line {line}: {reason}")]
    MalformedEncoding { line: usize, reason: String },

    #[error("Cannot encode {value:?} (table {table}, column {column}): breaks the text format")]
    Unencodable {
        table: String,
        column: String,
        value: String,
    },

    // -------------------------------------------------------------------------
    // Shell / Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    #[error("Configuration error: {0}")]
    Config(String),
}
