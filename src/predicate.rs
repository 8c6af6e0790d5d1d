//! Predicate matcher
//!
//! A predicate is a conjunction of `column = text` conditions. The empty
//! predicate matches every row. Matching is lenient: a row that lacks a
//! referenced column simply does not match.
//!
//! Each column holds at most one condition; a later condition on the same
//! column replaces the earlier one, as with insert and update payloads.

use crate::row::Row;

/// Conjunction of column-equals-value conditions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Predicate {
    conditions: Vec<(String, String)>,
}

impl Predicate {
    /// The predicate that matches every row
    pub fn all() -> Self {
        Self::default()
    }

    /// Add a condition, replacing any earlier one on the same column
    pub fn and(mut self, column: impl Into<String>, expected: impl Into<String>) -> Self {
        let column = column.into();
        let expected = expected.into();

        match self.conditions.iter_mut().find(|(name, _)| *name == column) {
            Some((_, value)) => *value = expected,
            None => self.conditions.push((column, expected)),
        }
        self
    }

    /// Exact text comparison on every condition; no coercion, no substrings
    pub fn matches(&self, row: &Row) -> bool {
        self.conditions
            .iter()
            .all(|(column, expected)| row.get(column) == Some(expected.as_str()))
    }

    pub fn conditions(&self) -> &[(String, String)] {
        &self.conditions
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for Predicate
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        iter.into_iter()
            .fold(Self::all(), |predicate, (k, v)| predicate.and(k, v))
    }
}
