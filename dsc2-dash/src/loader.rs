//! Record loading for the two log sources
//!
//! Reads the IVA event log (CSV) and the access-control decision log (JSON
//! array) into in-memory tables. A missing, unreadable, or malformed source
//! degrades to an empty table with a `Missing` status; the pipeline always
//! continues. One warning is logged per failed load, never per row.

use std::path::Path;

use dsc2_common::{Error, Result, Table};
use serde_json::Value;
use tracing::warn;

/// Outcome of a single source load
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Loaded,
    /// Source absent, unreadable, or malformed; detail is human-readable
    Missing(String),
}

impl LoadStatus {
    /// Warning text for the presentation layer, if the load failed
    pub fn warning(&self) -> Option<&str> {
        match self {
            LoadStatus::Loaded => None,
            LoadStatus::Missing(detail) => Some(detail),
        }
    }
}

/// Load the IVA event log (tabular source).
///
/// The first CSV record is the header; every cell loads as a string.
pub fn load_iva(path: &Path) -> (Table, LoadStatus) {
    load_with(path, "IVA logs", parse_csv)
}

/// Load the access-control decision log (JSON array of objects).
pub fn load_access(path: &Path) -> (Table, LoadStatus) {
    load_with(path, "Access logs", parse_json_records)
}

/// Shared degrade-and-warn wrapper around a source parser
fn load_with(
    path: &Path,
    source_name: &str,
    parse: fn(&str) -> Result<Table>,
) -> (Table, LoadStatus) {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            let detail = format!("{} file not found: {} ({})", source_name, path.display(), e);
            warn!("{}", detail);
            return (Table::empty(), LoadStatus::Missing(detail));
        }
    };

    match parse(&text) {
        Ok(table) => (table, LoadStatus::Loaded),
        Err(e) => {
            let detail = format!("{} file unreadable: {} ({})", source_name, path.display(), e);
            warn!("{}", detail);
            (Table::empty(), LoadStatus::Missing(detail))
        }
    }
}

/// Parse CSV text into a table.
///
/// Quoting rules: fields may be wrapped in double quotes; a doubled quote
/// inside a quoted field is a literal quote; commas, CR, and LF are data
/// inside quotes. Both LF and CRLF record terminators are accepted. An
/// unterminated quote is a malformed source.
pub fn parse_csv(text: &str) -> Result<Table> {
    let mut records: Vec<Vec<String>> = Vec::new();
    let mut record: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                _ => field.push(c),
            }
            continue;
        }
        match c {
            '"' => in_quotes = true,
            ',' => {
                record.push(std::mem::take(&mut field));
            }
            '\r' => {
                if chars.peek() == Some(&'\n') {
                    chars.next();
                }
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            '\n' => {
                record.push(std::mem::take(&mut field));
                records.push(std::mem::take(&mut record));
            }
            _ => field.push(c),
        }
    }
    if in_quotes {
        return Err(Error::MalformedSource(
            "unterminated quoted CSV field".to_string(),
        ));
    }
    // Final record without a trailing newline
    if !field.is_empty() || !record.is_empty() {
        record.push(field);
        records.push(record);
    }
    // Drop blank separator lines (single empty field)
    records.retain(|r| !(r.len() == 1 && r[0].is_empty()));

    let mut records = records.into_iter();
    let header = records
        .next()
        .ok_or_else(|| Error::MalformedSource("empty CSV source".to_string()))?;

    let rows = records
        .map(|r| r.into_iter().map(Value::String).collect())
        .collect();

    Ok(Table::new(header, rows))
}

/// Parse a JSON array of objects into a table.
///
/// The column set is the union of keys across all records, in first-seen
/// order; keys absent from a record load as null.
pub fn parse_json_records(text: &str) -> Result<Table> {
    let doc: Value = serde_json::from_str(text)?;
    let records = doc
        .as_array()
        .ok_or_else(|| Error::MalformedSource("expected a JSON array of records".to_string()))?;

    let mut columns: Vec<String> = Vec::new();
    let mut objects = Vec::with_capacity(records.len());
    for record in records {
        let obj = record.as_object().ok_or_else(|| {
            Error::MalformedSource("expected every record to be a JSON object".to_string())
        })?;
        for key in obj.keys() {
            if !columns.iter().any(|c| c == key) {
                columns.push(key.clone());
            }
        }
        objects.push(obj);
    }

    let rows = objects
        .iter()
        .map(|obj| {
            columns
                .iter()
                .map(|col| obj.get(col).cloned().unwrap_or(Value::Null))
                .collect()
        })
        .collect();

    Ok(Table::new(columns, rows))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_temp(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_iva_ok() {
        let file = write_temp(
            "timestamp,event_type,zone\n\
             2025-01-01T10:00:00,Motion,Zone D\n\
             2025-01-01T11:00:00,Loitering,Gate B\n",
        );
        let (table, status) = load_iva(file.path());
        assert_eq!(status, LoadStatus::Loaded);
        assert_eq!(table.columns, vec!["timestamp", "event_type", "zone"]);
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell_text(1, "zone"), Some("Gate B".to_string()));
    }

    #[test]
    fn test_load_iva_missing_file() {
        let (table, status) = load_iva(Path::new("/nonexistent/iva_logs.csv"));
        assert!(table.is_empty());
        assert!(status.warning().unwrap().contains("IVA logs"));
    }

    #[test]
    fn test_load_iva_malformed_degrades_to_empty() {
        let file = write_temp("timestamp,zone\n\"unterminated,Gate A\n");
        let (table, status) = load_iva(file.path());
        assert!(table.is_empty());
        assert!(status.warning().is_some());
    }

    #[test]
    fn test_parse_csv_quoting() {
        let table = parse_csv(
            "a,b\n\"has, comma\",\"line\nbreak\"\n\"doubled \"\" quote\",plain\n",
        )
        .unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.cell_text(0, "a"), Some("has, comma".to_string()));
        assert_eq!(table.cell_text(0, "b"), Some("line\nbreak".to_string()));
        assert_eq!(
            table.cell_text(1, "a"),
            Some("doubled \" quote".to_string())
        );
    }

    #[test]
    fn test_parse_csv_crlf_and_short_rows() {
        let table = parse_csv("a,b,c\r\n1,2\r\n").unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.cell_text(0, "b"), Some("2".to_string()));
        // Short row padded with null
        assert_eq!(table.cell_text(0, "c"), None);
    }

    #[test]
    fn test_parse_csv_empty_is_malformed() {
        assert!(parse_csv("").is_err());
    }

    #[test]
    fn test_parse_csv_header_only() {
        let table = parse_csv("timestamp,event_type,zone\n").unwrap();
        assert_eq!(table.columns.len(), 3);
        assert!(table.is_empty());
    }

    #[test]
    fn test_load_access_ok_with_ragged_keys() {
        let file = write_temp(
            r#"[
                {"timestamp": "2025-01-01T10:00:00", "user_id": "U1", "decision": "ALLOW"},
                {"timestamp": "2025-01-01T11:00:00", "user_id": "U2", "decision": "DENY", "role": "Guard"}
            ]"#,
        );
        let (table, status) = load_access(file.path());
        assert_eq!(status, LoadStatus::Loaded);
        assert_eq!(
            table.columns,
            vec!["timestamp", "user_id", "decision", "role"]
        );
        // Key missing from the first record loads as null
        assert_eq!(table.cell_text(0, "role"), None);
        assert_eq!(table.cell_text(1, "role"), Some("Guard".to_string()));
    }

    #[test]
    fn test_load_access_not_an_array() {
        let file = write_temp(r#"{"decision": "ALLOW"}"#);
        let (table, status) = load_access(file.path());
        assert!(table.is_empty());
        assert!(status.warning().unwrap().contains("Access logs"));
    }

    #[test]
    fn test_load_access_invalid_json() {
        let file = write_temp("not json at all");
        let (table, status) = load_access(file.path());
        assert!(table.is_empty());
        assert!(status.warning().is_some());
    }
}
