//! Codec Module
//!
//! Plain-text persistence format for a whole store.
//!
//! ## File Format
//! ```text
//! Table: Employees
//!   ID (int)
//!   Name (string)
//!   ID: 1, Name: John,
//!   ID: 2, Name: ,
//! Table: Projects
//!   ...
//! ```
//!
//! - A `Table:` header opens a table; the next header (or end of file)
//!   closes it.
//! - Column declarations are indented by two spaces: `<name> (<type>)`.
//! - Rows are indented by two spaces and list every column in schema
//!   order as `<name>: <value>, ` (the trailing separator is part of the
//!   format).
//!
//! ## Limitations
//! Names and values are written verbatim, so text containing `": "`,
//! `", "` or a line break cannot round-trip. Such content is rejected at
//! save time with `Unencodable` instead of producing a file that reads
//! back differently.

mod decoder;
mod encoder;

pub use decoder::{decode_store, LoadReport};
pub use encoder::{check_encodable, encode_store, write_store};

/// Prefix of a table header line
pub const TABLE_PREFIX: &str = "Table: ";

/// Indentation of column and row lines
pub const INDENT: &str = "  ";

/// Separator after every `<name>: <value>` pair of a row
pub const PAIR_SEPARATOR: &str = ", ";

/// Separator between a column name and its value
pub const KEY_SEPARATOR: &str = ": ";
