//! Command definitions
//!
//! Parses one line of shell input into a [`Command`]. Tokens are
//! whitespace-separated; `column:value` tokens split on the first `:`.

use std::path::PathBuf;

use crate::error::{Result, TabulaError};
use crate::predicate::Predicate;
use crate::schema::Column;

/// Keyword separating assignments/projections from the predicate
const WHERE: &str = "where";

/// A parsed command
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `createTable <T> (<col> <type>)*`
    CreateTable { table: String, columns: Vec<Column> },

    /// `addColumn <T> <col> <type>`
    AddColumn { table: String, column: Column },

    /// `dropTable <T>`
    DropTable { table: String },

    /// `insert <T> (<col>:<val>)*`
    Insert {
        table: String,
        values: Vec<(String, String)>,
    },

    /// `update <T> (<col>:<val>)* [where (<col>:<val>)*]`
    Update {
        table: String,
        set_values: Vec<(String, String)>,
        predicate: Predicate,
    },

    /// `query <T> (<col>[:])* [where (<col>:<val>)*]`
    Query {
        table: String,
        projection: Vec<String>,
        predicate: Predicate,
    },

    /// `delete <T> [where] (<col>:<val>)*`
    Delete { table: String, predicate: Predicate },

    /// `tables`
    Tables,

    /// `describe <T>`
    Describe { table: String },

    /// `save [file]`
    Save { path: Option<PathBuf> },

    /// `load [file]`
    Load { path: Option<PathBuf> },

    /// `help`
    Help,

    /// `exit` / `quit`
    Exit,
}

impl Command {
    /// Whether executing the command can change the store
    pub fn mutates(&self) -> bool {
        matches!(
            self,
            Command::CreateTable { .. }
                | Command::AddColumn { .. }
                | Command::DropTable { .. }
                | Command::Insert { .. }
                | Command::Update { .. }
                | Command::Delete { .. }
                | Command::Load { .. }
        )
    }
}

/// Parse a line of input. Blank lines yield `None`.
pub fn parse_command(line: &str) -> Result<Option<Command>> {
    let mut tokens = line.split_whitespace();
    let Some(keyword) = tokens.next() else {
        return Ok(None);
    };
    let rest: Vec<&str> = tokens.collect();

    let command = match keyword {
        "createTable" => parse_create_table(&rest)?,
        "addColumn" => parse_add_column(&rest)?,
        "dropTable" => Command::DropTable {
            table: single_table(keyword, &rest)?,
        },
        "insert" => {
            let (table, args) = split_table(keyword, &rest)?;
            Command::Insert {
                table,
                values: parse_pairs(args)?,
            }
        }
        "update" => {
            let (table, args) = split_table(keyword, &rest)?;
            let (assignments, conditions) = split_where(keyword, args)?;
            Command::Update {
                table,
                set_values: parse_pairs(assignments)?,
                predicate: parse_predicate(conditions)?,
            }
        }
        "query" => {
            let (table, args) = split_table(keyword, &rest)?;
            let (columns, conditions) = split_where(keyword, args)?;
            Command::Query {
                table,
                projection: parse_projection(columns)?,
                predicate: parse_predicate(conditions)?,
            }
        }
        "delete" => {
            let (table, args) = split_table(keyword, &rest)?;
            let conditions = match args.split_first() {
                Some((&WHERE, conditions)) => conditions,
                _ => args,
            };
            Command::Delete {
                table,
                predicate: parse_predicate(conditions)?,
            }
        }
        "tables" => {
            no_arguments(keyword, &rest)?;
            Command::Tables
        }
        "describe" => Command::Describe {
            table: single_table(keyword, &rest)?,
        },
        "save" => Command::Save {
            path: optional_path(keyword, &rest)?,
        },
        "load" => Command::Load {
            path: optional_path(keyword, &rest)?,
        },
        "help" => Command::Help,
        "exit" | "quit" => Command::Exit,
        other => return Err(invalid(format!("unknown command {}", other))),
    };

    Ok(Some(command))
}

// =============================================================================
// Per-command Parsers
// =============================================================================

fn parse_create_table(args: &[&str]) -> Result<Command> {
    let (table, spec) = split_table("createTable", args)?;

    if spec.len() % 2 != 0 {
        return Err(invalid(format!(
            "createTable: column {} has no type",
            spec[spec.len() - 1]
        )));
    }

    let columns = spec
        .chunks(2)
        .map(|pair| -> Result<Column> { Ok(Column::new(pair[0], pair[1].parse()?)) })
        .collect::<Result<Vec<_>>>()?;

    Ok(Command::CreateTable { table, columns })
}

fn parse_add_column(args: &[&str]) -> Result<Command> {
    match args {
        [table, name, ty] => Ok(Command::AddColumn {
            table: table.to_string(),
            column: Column::new(*name, ty.parse()?),
        }),
        _ => Err(invalid("usage: addColumn <table> <column> <type>".to_string())),
    }
}

// =============================================================================
// Token Helpers
// =============================================================================

fn split_table<'a, 'b>(keyword: &str, args: &'a [&'b str]) -> Result<(String, &'a [&'b str])> {
    match args.split_first() {
        Some((table, rest)) => Ok((table.to_string(), rest)),
        None => Err(invalid(format!("{}: missing table name", keyword))),
    }
}

fn single_table(keyword: &str, args: &[&str]) -> Result<String> {
    match args {
        [table] => Ok(table.to_string()),
        [] => Err(invalid(format!("{}: missing table name", keyword))),
        _ => Err(invalid(format!("{}: expected a single table name", keyword))),
    }
}

fn no_arguments(keyword: &str, args: &[&str]) -> Result<()> {
    if args.is_empty() {
        Ok(())
    } else {
        Err(invalid(format!("{} takes no arguments", keyword)))
    }
}

fn optional_path(keyword: &str, args: &[&str]) -> Result<Option<PathBuf>> {
    match args {
        [] => Ok(None),
        [path] => Ok(Some(PathBuf::from(path))),
        _ => Err(invalid(format!("{}: expected at most one file name", keyword))),
    }
}

/// Split at the `where` keyword; only one is allowed
fn split_where<'a, 'b>(keyword: &str, args: &'a [&'b str]) -> Result<(&'a [&'b str], &'a [&'b str])> {
    match args.iter().position(|token| *token == WHERE) {
        Some(at) => {
            let (head, tail) = (&args[..at], &args[at + 1..]);
            if tail.contains(&WHERE) {
                return Err(invalid(format!("{}: where given twice", keyword)));
            }
            Ok((head, tail))
        }
        None => Ok((args, &[])),
    }
}

fn parse_pair(token: &str) -> Result<(String, String)> {
    match token.split_once(':') {
        Some((column, value)) if !column.is_empty() => Ok((column.to_string(), value.to_string())),
        _ => Err(invalid(format!("expected <column>:<value>, got {}", token))),
    }
}

fn parse_pairs(tokens: &[&str]) -> Result<Vec<(String, String)>> {
    tokens.iter().map(|token| parse_pair(token)).collect()
}

fn parse_predicate(tokens: &[&str]) -> Result<Predicate> {
    Ok(parse_pairs(tokens)?.into_iter().collect())
}

/// Projection tokens are `Name:` or a bare `Name`
fn parse_projection(tokens: &[&str]) -> Result<Vec<String>> {
    tokens
        .iter()
        .map(|token| {
            let column = token.split_once(':').map_or(*token, |(column, _)| column);
            if column.is_empty() {
                Err(invalid(format!("expected a column name, got {}", token)))
            } else {
                Ok(column.to_string())
            }
        })
        .collect()
}

fn invalid(message: String) -> TabulaError {
    TabulaError::InvalidCommand(message)
}
