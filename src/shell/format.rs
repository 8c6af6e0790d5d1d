//! Output formatting for command outcomes.
//!
//! Query results render as tab-separated lines or as JSON.

use std::str::FromStr;

use serde_json::{json, Value as JsonValue};

use crate::error::TabulaError;
use crate::schema::Column;
use crate::session::Outcome;
use crate::table::ResultSet;
use crate::value::Value;

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Header and rows as tab-separated lines.
    #[default]
    Tab,
    /// `{"columns": [...], "rows": [[...]]}` with typed values.
    Json,
}

impl FromStr for OutputFormat {
    type Err = TabulaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "tab" => Ok(OutputFormat::Tab),
            "json" => Ok(OutputFormat::Json),
            other => Err(TabulaError::Config(format!(
                "unknown output format {} (expected tab or json)",
                other
            ))),
        }
    }
}

/// Formats a query result according to the specified format.
pub fn format_result(result: &ResultSet, format: OutputFormat) -> String {
    match format {
        OutputFormat::Tab => format_tab(result),
        OutputFormat::Json => format_json(result),
    }
}

/// Formats any outcome. Query results and schemas honour `format`.
pub fn format_outcome(outcome: &Outcome, format: OutputFormat) -> String {
    match outcome {
        Outcome::Done(message) => message.clone(),
        Outcome::Affected(1) => "1 row affected".to_string(),
        Outcome::Affected(count) => format!("{} rows affected", count),
        Outcome::Rows(result) => format_result(result, format),
        Outcome::Tables(names) if names.is_empty() => "(no tables)".to_string(),
        Outcome::Tables(names) => names.join("\n"),
        Outcome::Schema(columns) => format_schema(columns, format),
        Outcome::Loaded(report) => format!(
            "Loaded {} tables ({} rows, {} lines skipped)",
            report.tables, report.rows, report.skipped_lines
        ),
        Outcome::Exit => String::new(),
    }
}

/// Formats table columns as `name<TAB>type` lines or a JSON array.
fn format_schema(columns: &[Column], format: OutputFormat) -> String {
    match format {
        OutputFormat::Tab => columns
            .iter()
            .map(|c| format!("{}\t{}", c.name, c.ty))
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => {
            serde_json::to_string_pretty(columns).unwrap_or_else(|_| "[]".to_string())
        }
    }
}

/// Formats the result as tab-separated lines, header first.
fn format_tab(result: &ResultSet) -> String {
    let mut lines = Vec::with_capacity(result.rows.len() + 1);
    lines.push(result.header.join("\t"));
    for row in &result.rows {
        lines.push(row.join("\t"));
    }
    lines.join("\n")
}

/// Formats the result as JSON.
fn format_json(result: &ResultSet) -> String {
    let rows: Vec<Vec<Value>> = result
        .rows
        .iter()
        .map(|row| {
            row.iter()
                .zip(&result.types)
                .map(|(raw, ty)| Value::from_stored(raw, *ty))
                .collect()
        })
        .collect();

    let document: JsonValue = json!({
        "columns": result.header,
        "rows": rows,
    });

    serde_json::to_string_pretty(&document).unwrap_or_else(|_| "{}".to_string())
}
