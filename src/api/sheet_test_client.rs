//! Implements the `Sheet` trait using in-memory data for testing purposes.
//!
//! Note: this is compiled even in the "production" version of this app so that we can run the whole
//! app, top-to-bottom, without using Google Sheets.

use crate::api::Sheet;
use crate::model::{Cell, Grid};
use crate::Result;
use anyhow::Context;
use std::io::Cursor;
use tracing::info;

/// An implementation of the `Sheet` trait that does not use Google sheets. It holds a worksheet in
/// memory and remembers every write. `TestSheet::seeded` holds a small card tracking sheet.
#[derive(Debug, Clone)]
pub(crate) struct TestSheet {
    rows: Vec<Vec<String>>,
    writes: Vec<(Cell, String)>,
    reads: usize,
}

impl TestSheet {
    /// Create a new `TestSheet` holding `rows`.
    pub(crate) fn new<S, R>(rows: impl IntoIterator<Item = R>) -> Self
    where
        S: Into<String>,
        R: IntoIterator<Item = S>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(|s| s.into()).collect())
                .collect(),
            writes: Vec::new(),
            reads: 0,
        }
    }

    /// Create a `TestSheet` seeded with the data from this module.
    pub(crate) fn seeded() -> Result<Self> {
        Ok(Self::new(load_csv(SHEET_DATA)?))
    }

    /// Every write, in the order it happened.
    #[cfg(test)]
    pub(crate) fn writes(&self) -> &[(Cell, String)] {
        &self.writes
    }

    /// The number of times the grid has been read.
    #[cfg(test)]
    pub(crate) fn reads(&self) -> usize {
        self.reads
    }

    /// The current value of `cell`, if populated.
    #[cfg(test)]
    pub(crate) fn value(&self, cell: Cell) -> Option<&str> {
        self.rows
            .get(cell.row() - 1)?
            .get(cell.col() - 1)
            .map(String::as_str)
    }
}

#[async_trait::async_trait]
impl Sheet for TestSheet {
    async fn get(&mut self) -> Result<Grid> {
        self.reads += 1;
        Ok(Grid::new(self.rows.clone()))
    }

    async fn update_cell(&mut self, cell: Cell, value: &str) -> Result<()> {
        let row_ix = cell
            .row()
            .checked_sub(1)
            .with_context(|| format!("Invalid cell {cell:?}"))?;
        let col_ix = cell
            .col()
            .checked_sub(1)
            .with_context(|| format!("Invalid cell {cell:?}"))?;

        if self.rows.len() <= row_ix {
            self.rows.resize_with(row_ix + 1, Vec::new);
        }
        let row = &mut self.rows[row_ix];
        if row.len() <= col_ix {
            row.resize(col_ix + 1, String::new());
        }
        row[col_ix] = value.to_string();

        info!("(test sheet) {cell} = {value}");
        self.writes.push((cell, value.to_string()));
        Ok(())
    }
}

/// Loads data from a CSV-formatted string.
fn load_csv(csv_data: &str) -> Result<Vec<Vec<String>>> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(false) // Ensure headers are treated as part of the data
        .flexible(true)
        .from_reader(Cursor::new(csv_data.as_bytes()));

    let mut rows: Vec<Vec<String>> = Vec::new();
    for result in rdr.records() {
        let record = result.context("Invalid seed CSV")?;
        rows.push(record.iter().map(|field| field.to_string()).collect());
    }
    Ok(rows)
}

/// Seed worksheet data. The account ids match the seed budget in `budget_test_client`.
const SHEET_DATA: &str = r##"Card,Account ID,Limit,Balance,Last Charge,Total Spend
Sapphire Preferred,acct-cc-sapphire,"$10,000.00",,,
Gold Card,acct-cc-gold,"$5,000.00",,,
Old Store Card,acct-cc-closed,$500.00,,,
"##;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_seeded_sheet_has_labels() {
        let mut sheet = TestSheet::seeded().unwrap();
        let grid = sheet.get().await.unwrap();
        assert_eq!(grid.find("Balance").unwrap(), Cell::new(1, 4));
        assert_eq!(grid.find("acct-cc-gold").unwrap(), Cell::new(3, 2));
        assert_eq!(grid.get(Cell::new(2, 3)), Some("$10,000.00"));
        assert_eq!(sheet.reads(), 1);
    }

    #[tokio::test]
    async fn test_update_cell_extends_rows() {
        let mut sheet = TestSheet::new(vec![vec!["a"]]);
        sheet.update_cell(Cell::new(3, 2), "x").await.unwrap();
        assert_eq!(sheet.value(Cell::new(3, 2)), Some("x"));
        assert_eq!(sheet.value(Cell::new(1, 1)), Some("a"));
        assert_eq!(sheet.writes(), &[(Cell::new(3, 2), "x".to_string())]);
    }

    #[tokio::test]
    async fn test_update_cell_overwrites() {
        let mut sheet = TestSheet::new(vec![vec!["a", "b"]]);
        sheet.update_cell(Cell::new(1, 2), "c").await.unwrap();
        let grid = sheet.get().await.unwrap();
        assert_eq!(grid.rows(), &[vec!["a".to_string(), "c".to_string()]]);
    }
}
