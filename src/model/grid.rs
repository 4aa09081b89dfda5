//! A snapshot of the values in a worksheet, used to resolve labels and account ids to cells.

use crate::model::Cell;
use crate::Result;
use anyhow::anyhow;

/// The values of a worksheet as returned by the Sheets API: row-major, ragged (trailing empty cells
/// are omitted), with index `[0][0]` being cell `A1`.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Grid {
    rows: Vec<Vec<String>>,
}

impl Grid {
    pub fn new<S, R>(rows: impl IntoIterator<Item = R>) -> Self
    where
        S: Into<String>,
        R: IntoIterator<Item = S>,
    {
        Self {
            rows: rows
                .into_iter()
                .map(|row| row.into_iter().map(|s| s.into()).collect())
                .collect(),
        }
    }

    /// Finds the first cell, scanning rows top to bottom and each row left to right, whose value is
    /// exactly `text`. Returns an error if no cell matches.
    pub fn find(&self, text: &str) -> Result<Cell> {
        self.rows
            .iter()
            .enumerate()
            .find_map(|(row_ix, row)| {
                row.iter()
                    .position(|value| value == text)
                    .map(|col_ix| Cell::new(row_ix + 1, col_ix + 1))
            })
            .ok_or_else(|| anyhow!("No cell in the sheet has the value '{text}'"))
    }

    /// Returns the value at `cell`, if the cell is populated.
    #[cfg(test)]
    pub(crate) fn get(&self, cell: Cell) -> Option<&str> {
        self.rows
            .get(cell.row().checked_sub(1)?)?
            .get(cell.col().checked_sub(1)?)
            .map(String::as_str)
    }

    #[cfg(test)]
    pub(crate) fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}
