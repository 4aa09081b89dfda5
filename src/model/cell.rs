use serde::{Serialize, Serializer};
use std::fmt;

/// A 1-based (row, column) coordinate of a cell in a worksheet, the way spreadsheets number them.
/// Displays in A1 notation, e.g. `Cell::new(7, 3)` is `C7`.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Cell {
    row: usize,
    col: usize,
}

impl Cell {
    /// Creates a cell. Both `row` and `col` are 1-based.
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn col(&self) -> usize {
        self.col
    }

    /// The A1 notation column letters for this cell's column, e.g. `1 -> A`, `28 -> AB`.
    pub fn col_letters(&self) -> String {
        let mut n = self.col;
        let mut letters = Vec::new();
        while n > 0 {
            let rem = (n - 1) % 26;
            letters.push(b'A' + rem as u8);
            n = (n - 1) / 26;
        }
        letters.reverse();
        String::from_utf8_lossy(&letters).into_owned()
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.col_letters(), self.row)
    }
}

impl Serialize for Cell {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_display() {
        assert_eq!(Cell::new(1, 1).to_string(), "A1");
        assert_eq!(Cell::new(7, 3).to_string(), "C7");
        assert_eq!(Cell::new(2, 26).to_string(), "Z2");
        assert_eq!(Cell::new(2, 27).to_string(), "AA2");
        assert_eq!(Cell::new(10, 52).to_string(), "AZ10");
        assert_eq!(Cell::new(3, 702).to_string(), "ZZ3");
    }

    #[test]
    fn test_cell_serialize() {
        let serialized = serde_json::to_string(&Cell::new(7, 3)).unwrap();
        assert_eq!(serialized, r#""C7""#);
    }
}
