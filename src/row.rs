//! Row storage
//!
//! A row maps column names to raw text. It carries no type information;
//! the owning table's schema decides how values are coerced on write.

use std::collections::BTreeMap;

use crate::schema::Schema;

/// One record: column name -> text value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    values: BTreeMap<String, String>,
}

impl Row {
    /// A row with every declared column mapped to the empty string
    pub fn seeded(schema: &Schema) -> Self {
        let values = schema
            .names()
            .map(|name| (name.to_string(), String::new()))
            .collect();
        Self { values }
    }

    pub fn get(&self, column: &str) -> Option<&str> {
        self.values.get(column).map(String::as_str)
    }

    pub fn contains(&self, column: &str) -> bool {
        self.values.contains_key(column)
    }

    /// Overwrite (or add) a column value
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.values.insert(column.into(), value.into());
    }

    /// Add `column` with an empty value unless the row already has it
    pub fn backfill(&mut self, column: &str) {
        self.values.entry(column.to_string()).or_default();
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
