//! In-memory table model for the log sources
//!
//! Both log sources load into the same loosely-typed shape: named columns
//! plus rows of JSON values. Column names are case-sensitive and fixed at
//! load time; cells keep whatever JSON type the source carried (CSV cells
//! are always strings).

use serde::Serialize;
use serde_json::Value;

/// A loaded log source as a column-named grid of JSON values
#[derive(Debug, Clone, Default, Serialize)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Build a table from column names and rows.
    ///
    /// Rows shorter than the column list are padded with null; longer rows
    /// are truncated, so every row has exactly one cell per column.
    pub fn new(columns: Vec<String>, mut rows: Vec<Vec<Value>>) -> Table {
        let width = columns.len();
        for row in &mut rows {
            row.resize(width, Value::Null);
        }
        Table { columns, rows }
    }

    /// Empty table, used when a source is missing or malformed
    pub fn empty() -> Table {
        Table::default()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Position of a column by exact name match
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// Cell value at (row, column name); None when the column is absent
    pub fn cell(&self, row: usize, name: &str) -> Option<&Value> {
        let col = self.column_index(name)?;
        self.rows.get(row)?.get(col)
    }

    /// Cell rendered as display text.
    ///
    /// Strings pass through unquoted; numbers and booleans format plainly;
    /// null and absent columns are None so callers can apply their own
    /// fallback.
    pub fn cell_text(&self, row: usize, name: &str) -> Option<String> {
        match self.cell(row, name)? {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }

    /// Distinct display values of a column, in first-seen row order.
    ///
    /// Null cells are skipped. An absent column yields an empty list.
    pub fn distinct_values(&self, name: &str) -> Vec<String> {
        let mut seen = Vec::new();
        for row in 0..self.len() {
            if let Some(text) = self.cell_text(row, name) {
                if !seen.contains(&text) {
                    seen.push(text);
                }
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Table {
        Table::new(
            vec!["timestamp".into(), "event_type".into(), "zone".into()],
            vec![
                vec![json!("2025-01-01T10:00:00"), json!("Motion"), json!("Zone D")],
                vec![json!("2025-01-01T11:00:00"), json!("Loitering"), json!("Gate B")],
                vec![json!("2025-01-01T12:00:00"), json!("Motion"), json!("Zone D")],
            ],
        )
    }

    #[test]
    fn test_cell_lookup() {
        let t = sample();
        assert_eq!(t.cell_text(1, "event_type"), Some("Loitering".to_string()));
        assert_eq!(t.cell_text(0, "missing_column"), None);
        assert_eq!(t.cell_text(99, "zone"), None);
    }

    #[test]
    fn test_column_names_case_sensitive() {
        let t = sample();
        assert!(t.has_column("zone"));
        assert!(!t.has_column("Zone"));
    }

    #[test]
    fn test_short_rows_pad_with_null() {
        let t = Table::new(
            vec!["a".into(), "b".into()],
            vec![vec![json!("x")]],
        );
        assert_eq!(t.cell(0, "b"), Some(&Value::Null));
        assert_eq!(t.cell_text(0, "b"), None);
    }

    #[test]
    fn test_long_rows_truncate() {
        let t = Table::new(
            vec!["a".into()],
            vec![vec![json!("x"), json!("extra")]],
        );
        assert_eq!(t.rows[0].len(), 1);
    }

    #[test]
    fn test_distinct_values_first_seen_order() {
        let t = sample();
        assert_eq!(
            t.distinct_values("event_type"),
            vec!["Motion".to_string(), "Loitering".to_string()]
        );
        assert!(t.distinct_values("missing").is_empty());
    }

    #[test]
    fn test_non_string_cells_format_plainly() {
        let t = Table::new(
            vec!["n".into(), "b".into()],
            vec![vec![json!(3), json!(true)]],
        );
        assert_eq!(t.cell_text(0, "n"), Some("3".to_string()));
        assert_eq!(t.cell_text(0, "b"), Some("true".to_string()));
    }
}
