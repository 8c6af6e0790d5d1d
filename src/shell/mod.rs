//! Shell Module
//!
//! Text front end of the store: turns command lines into [`Command`]s and
//! renders [`Outcome`](crate::session::Outcome)s.
//!
//! ## Commands
//! ```text
//! createTable Employees ID int Name string Salary double
//! addColumn Employees Age int
//! insert Employees ID:1 Name:John Salary:50000
//! update Employees Name:Artur where ID:1
//! query Employees Name: Salary: where ID:1
//! delete Employees where ID:1
//! dropTable Employees
//! tables | describe <T> | save [file] | load [file] | help | exit
//! ```

mod command;
mod format;

pub use command::{parse_command, Command};
pub use format::{format_outcome, format_result, OutputFormat};

/// Text printed by `help`
pub const HELP: &str = "\
Commands:
  createTable <table> (<column> <int|double|string>)*
  addColumn <table> <column> <int|double|string>
  dropTable <table>
  insert <table> (<column>:<value>)*
  update <table> (<column>:<value>)* [where (<column>:<value>)*]
  query <table> (<column>:)* [where (<column>:<value>)*]
  delete <table> [where] (<column>:<value>)*
  tables
  describe <table>
  save [file]
  load [file]
  help
  exit";
