//! Accumulated column metadata and rows for a query, populated by [`Connection`][crate::Connection]
//! events and consumed one row at a time by the caller.

use std::collections::HashMap;

use crate::connection::{ConnectionEvents, QueryEnd, ServerErrorEvent};
use crate::protocol::{ColumnDefinition, ServerStatus};

/// Column metadata for one column in a result set.
pub type Column = ColumnDefinition;

/// The accumulated output of a single `query` call: one column list and row list per statement
/// (more than one only when `multi_statements` is enabled), plus terminal and error metadata
/// from the last response received.
///
/// Row iteration is one-shot: [`array`][Self::array] and [`hash`][Self::hash] each consume the
/// next unread row of their result set; once exhausted they return `None`.
#[derive(Debug, Default)]
pub struct Results {
    column_sets: Vec<Vec<Column>>,
    row_sets: Vec<Vec<Vec<Option<Box<str>>>>>,
    cursors: Vec<usize>,
    affected_rows: u64,
    last_insert_id: u64,
    warnings_count: u16,
    status: ServerStatus,
    error_code: Option<u16>,
    sql_state: Option<Box<str>>,
    error_message: Option<Box<str>>,
}

impl Results {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn status(&self) -> ServerStatus {
        self.status
    }

    /// Column names for the `idx`-th result set.
    pub fn columns(&self, idx: usize) -> Option<Vec<&str>> {
        self.column_sets.get(idx).map(|cols| cols.iter().map(|c| c.name.as_ref()).collect())
    }

    /// Number of rows collected for the first result set.
    pub fn rows(&self) -> usize {
        self.rows_for(0)
    }

    pub fn rows_for(&self, idx: usize) -> usize {
        self.row_sets.get(idx).map_or(0, Vec::len)
    }

    /// Consumes the next row of the first result set.
    pub fn array(&mut self) -> Option<&[Option<Box<str>>]> {
        self.array_for(0)
    }

    /// Consumes the next row of the `idx`-th result set.
    pub fn array_for(&mut self, idx: usize) -> Option<&[Option<Box<str>>]> {
        let cursor = self.cursors.get_mut(idx)?;
        let row = self.row_sets.get(idx)?.get(*cursor)?;
        *cursor += 1;
        Some(row)
    }

    /// Every remaining row of the first result set, consuming them all.
    pub fn arrays(&mut self) -> Vec<Vec<Option<Box<str>>>> {
        self.arrays_for(0)
    }

    pub fn arrays_for(&mut self, idx: usize) -> Vec<Vec<Option<Box<str>>>> {
        let mut out = Vec::new();
        while let Some(row) = self.array_for(idx) {
            out.push(row.to_vec());
        }
        out
    }

    /// Consumes the next row of the first result set as a column name → value mapping. On
    /// duplicate column names the last one wins; callers needing disambiguation should use
    /// [`array`][Self::array] instead.
    pub fn hash(&mut self) -> Option<HashMap<Box<str>, Option<Box<str>>>> {
        self.hash_for(0)
    }

    pub fn hash_for(&mut self, idx: usize) -> Option<HashMap<Box<str>, Option<Box<str>>>> {
        let names: Vec<Box<str>> = self.column_sets.get(idx)?.iter().map(|c| c.name.clone()).collect();
        let row = self.array_for(idx)?.to_vec();

        Some(names.into_iter().zip(row).collect())
    }

    pub fn hashes(&mut self) -> Vec<HashMap<Box<str>, Option<Box<str>>>> {
        self.hashes_for(0)
    }

    pub fn hashes_for(&mut self, idx: usize) -> Vec<HashMap<Box<str>, Option<Box<str>>>> {
        let mut out = Vec::new();
        while let Some(row) = self.hash_for(idx) {
            out.push(row);
        }
        out
    }

    pub fn affected_rows(&self) -> u64 {
        self.affected_rows
    }

    pub fn last_insert_id(&self) -> u64 {
        self.last_insert_id
    }

    pub fn warnings_count(&self) -> u16 {
        self.warnings_count
    }

    pub fn error_code(&self) -> Option<u16> {
        self.error_code
    }

    pub fn sql_state(&self) -> Option<&str> {
        self.sql_state.as_deref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }
}

impl ConnectionEvents for Results {
    fn on_fields(&mut self, columns: Vec<Column>) {
        self.column_sets.push(columns);
        self.row_sets.push(Vec::new());
        self.cursors.push(0);
    }

    fn on_row(&mut self, row: Vec<Option<Box<str>>>) {
        if let Some(rows) = self.row_sets.last_mut() {
            rows.push(row);
        }
    }

    fn on_end(&mut self, end: QueryEnd) {
        self.affected_rows = end.affected_rows;
        self.last_insert_id = end.last_insert_id;
        self.warnings_count = end.warnings_count;
        self.status = end.status;
    }

    fn on_error(&mut self, error: ServerErrorEvent) {
        self.error_code = Some(error.error_code);
        self.sql_state = Some(error.sql_state);
        self.error_message = Some(error.error_message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{FieldFlags, TypeId};

    fn column(name: &str) -> Column {
        Column {
            schema: "".into(),
            table: "".into(),
            org_table: "".into(),
            name: name.into(),
            org_name: name.into(),
            character_set: 33,
            column_length: 0,
            type_id: TypeId::VAR_CHAR,
            flags: FieldFlags::empty(),
            decimals: 0,
        }
    }

    #[test]
    fn it_consumes_rows_in_order_then_reports_absent() {
        let mut results = Results::new();
        results.on_fields(vec![column("n")]);
        results.on_row(vec![Some("1".into())]);
        results.on_row(vec![Some("2".into())]);
        results.on_end(QueryEnd::default());

        assert_eq!(results.array(), Some(&[Some("1".into())][..]));
        assert_eq!(results.array(), Some(&[Some("2".into())][..]));
        assert_eq!(results.array(), None);
    }

    #[test]
    fn it_builds_a_hash_keyed_by_last_duplicate_column() {
        let mut results = Results::new();
        results.on_fields(vec![column("a"), column("a")]);
        results.on_row(vec![Some("first".into()), Some("second".into())]);
        results.on_end(QueryEnd::default());

        let row = results.hash().unwrap();
        assert_eq!(row.len(), 1);
        assert_eq!(row.get("a").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn it_tracks_multiple_result_sets_independently() {
        let mut results = Results::new();
        results.on_fields(vec![column("1")]);
        results.on_row(vec![Some("1".into())]);
        results.on_fields(vec![column("2")]);
        results.on_row(vec![Some("2".into())]);
        results.on_end(QueryEnd::default());

        assert_eq!(results.columns(0), Some(vec!["1"]));
        assert_eq!(results.columns(1), Some(vec!["2"]));
        assert_eq!(results.array_for(0), Some(&[Some("1".into())][..]));
        assert_eq!(results.array_for(1), Some(&[Some("2".into())][..]));
    }
}
