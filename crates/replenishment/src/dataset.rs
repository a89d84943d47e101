//! Tabular input contract.
//!
//! Spreadsheet readers hand the engine a [`Table`]: one header row plus data
//! rows of loosely typed [`Cell`]s. Nothing here knows about file formats.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// A single spreadsheet cell as delivered by the reader.
///
/// Serialized untagged: JSON numbers, strings and `null` map directly.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Cell {
    Number(f64),
    Text(String),
    #[default]
    Empty,
}

static EMPTY_CELL: Cell = Cell::Empty;

impl Cell {
    /// True for missing cells and whitespace-only text.
    pub fn is_blank(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            Cell::Number(n) => n.is_nan(),
        }
    }

    /// String form of the cell, or `None` when the cell is missing.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Cell::Empty => None,
            Cell::Text(s) => Some(s.clone()),
            Cell::Number(n) if n.is_nan() => None,
            Cell::Number(n) => Some(n.to_string()),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::Text(value.to_string())
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::Text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Number(value as f64)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Cell::Empty)
    }
}

/// Caps applied to a dataset before processing.
///
/// `None` disables a cap.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetLimits {
    pub max_rows: Option<usize>,
    pub max_columns: Option<usize>,
}

impl DatasetLimits {
    pub const DEFAULT_MAX_ROWS: usize = 2500;
    pub const DEFAULT_MAX_COLUMNS: usize = 11;

    pub fn unlimited() -> Self {
        Self {
            max_rows: None,
            max_columns: None,
        }
    }
}

impl Default for DatasetLimits {
    fn default() -> Self {
        Self {
            max_rows: Some(Self::DEFAULT_MAX_ROWS),
            max_columns: Some(Self::DEFAULT_MAX_COLUMNS),
        }
    }
}

/// A header row plus data rows.
///
/// Rows may be ragged: missing trailing cells read as [`Cell::Empty`] and
/// cells past the last header are never looked at.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Table {
    pub headers: Vec<String>,
    #[serde(default)]
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Builder-style row append (handy in tests and fixtures).
    pub fn with_row<I, C>(mut self, cells: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        self.push_row(cells);
        self
    }

    pub fn push_row<I, C>(&mut self, cells: I)
    where
        I: IntoIterator<Item = C>,
        C: Into<Cell>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
    }

    pub fn width(&self) -> usize {
        self.headers.len()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell at (`row`, `col`); out-of-range positions read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &Cell {
        if col >= self.width() {
            return &EMPTY_CELL;
        }
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .unwrap_or(&EMPTY_CELL)
    }

    /// True when every cell of the row (within the header width) is blank.
    pub fn is_blank_row(&self, row: usize) -> bool {
        (0..self.width()).all(|col| self.cell(row, col).is_blank())
    }

    /// Copy of the table restricted to the first `max_rows` rows and the
    /// first `max_columns` columns.
    pub fn limited(&self, name: &str, limits: &DatasetLimits) -> Table {
        let width = limits
            .max_columns
            .map_or(self.width(), |max| max.min(self.width()));
        let height = limits.max_rows.map_or(self.len(), |max| max.min(self.len()));

        if width < self.width() || height < self.len() {
            warn!(
                dataset = name,
                rows = self.len(),
                columns = self.width(),
                kept_rows = height,
                kept_columns = width,
                "dataset truncated to configured limits"
            );
        }

        Table {
            headers: self.headers[..width].to_vec(),
            rows: self.rows[..height]
                .iter()
                .map(|r| r.iter().take(width).cloned().collect())
                .collect(),
        }
    }

    /// Copy of the table without rows whose cells are all blank.
    pub fn without_blank_rows(&self) -> Table {
        Table {
            headers: self.headers.clone(),
            rows: (0..self.len())
                .filter(|&i| !self.is_blank_row(i))
                .map(|i| self.rows[i].clone())
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Table {
        Table::new(["Item", "Sales", "Stock"])
            .with_row([Cell::from("A"), Cell::from(1.0), Cell::from(2.0)])
            .with_row([Cell::Empty, Cell::from("  "), Cell::Empty])
            .with_row([Cell::from("B")])
    }

    #[test]
    fn ragged_rows_read_missing_cells_as_empty() {
        let t = sample();
        assert_eq!(t.cell(2, 0), &Cell::from("B"));
        assert_eq!(t.cell(2, 2), &Cell::Empty);
        assert_eq!(t.cell(99, 0), &Cell::Empty);
        assert_eq!(t.cell(0, 99), &Cell::Empty);
    }

    #[test]
    fn blank_rows_are_dropped() {
        let t = sample().without_blank_rows();
        assert_eq!(t.len(), 2);
        assert_eq!(t.cell(1, 0), &Cell::from("B"));
    }

    #[test]
    fn limits_truncate_rows_and_columns() {
        let limits = DatasetLimits {
            max_rows: Some(1),
            max_columns: Some(2),
        };
        let t = sample().limited("sales", &limits);
        assert_eq!(t.headers, vec!["Item".to_string(), "Sales".to_string()]);
        assert_eq!(t.len(), 1);
        assert_eq!(t.rows[0].len(), 2);
    }

    #[test]
    fn unlimited_keeps_everything() {
        let t = sample();
        assert_eq!(t.limited("stock", &DatasetLimits::unlimited()), t);
    }

    #[test]
    fn numbers_render_without_trailing_fraction() {
        assert_eq!(Cell::from(123.0).as_text().as_deref(), Some("123"));
        assert_eq!(Cell::from(1.5).as_text().as_deref(), Some("1.5"));
        assert_eq!(Cell::Empty.as_text(), None);
    }

    #[test]
    fn cells_deserialize_untagged() {
        let t: Table = serde_json::from_str(
            r#"{"headers":["Item","Qty"],"rows":[["A", 3], [null, "x"]]}"#,
        )
        .unwrap();
        assert_eq!(t.rows[0][1], Cell::Number(3.0));
        assert_eq!(t.rows[1][0], Cell::Empty);
        assert_eq!(t.rows[1][1], Cell::Text("x".to_string()));
    }
}
