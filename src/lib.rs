//! # Tabula
//!
//! A small, schema-carrying tabular record store:
//! - Named tables with typed columns (`int`, `double`, `string`)
//! - Predicate-filtered select / update / delete
//! - Schema evolution (add column, drop table)
//! - Round-trip persistence to a plain-text file
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 Shell / CLI (Command parsing)                │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//! ┌─────────────────────▼───────────────────────────────────────┐
//! │                        Session                               │
//! │                 (Config + data file)                         │
//! └─────────────────────┬───────────────────────────────────────┘
//!                       │
//!          ┌────────────┴────────────┐
//!          │                         │
//!          ▼                         ▼
//!   ┌─────────────┐          ┌─────────────┐
//!   │    Store    │ ───────▶ │    Codec    │
//!   │  (Tables)   │          │   (Text)    │
//!   └──────┬──────┘          └─────────────┘
//!          │
//!          ▼
//!   ┌──────────────┐
//!   │    Table     │  Predicate · Value coercion
//!   │ (Schema+Rows)│
//!   └──────────────┘
//! ```
//!
//! ## Example
//! ```
//! use tabula::{Column, ColumnType, Predicate, Store};
//!
//! let mut store = Store::new();
//! store
//!     .create_table("users", vec![
//!         Column::new("id", ColumnType::Int),
//!         Column::new("name", ColumnType::String),
//!     ])
//!     .unwrap();
//! store.insert("users", [("id", "1"), ("name", "Ada")]).unwrap();
//!
//! let result = store
//!     .select("users", &["name"], &Predicate::all().and("id", "1"))
//!     .unwrap();
//! assert_eq!(result.rows, vec![vec!["Ada".to_string()]]);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod config;

pub mod value;
pub mod schema;
pub mod row;
pub mod predicate;
pub mod table;
pub mod store;
pub mod codec;
pub mod session;
pub mod shell;

// =============================================================================
// Public API Re-exports
// =============================================================================

pub use error::{TabulaError, Result};
pub use config::{Config, LoadMode};
pub use value::Value;
pub use schema::{Column, ColumnType, Schema};
pub use row::Row;
pub use predicate::Predicate;
pub use table::{ResultSet, Table};
pub use store::Store;
pub use codec::LoadReport;
pub use session::{Outcome, Session};

// =============================================================================
// Version Info
// =============================================================================

/// Current version of Tabula
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
