//! Report and export generation
//!
//! Serializes the raw tables (exactly as loaded, no synthesized columns)
//! into CSV downloads and a fixed-format text report. Given identical
//! tables and a fixed timestamp the report is byte-reproducible.

use chrono::{DateTime, Utc};
use dsc2_common::{table::Table, time};
use serde_json::Value;

use crate::viewmodel::summarize;

const HEAVY_RULE: &str =
    "═══════════════════════════════════════════════════════════════";
const LIGHT_RULE: &str =
    "───────────────────────────────────────────────────────────────";

/// Section markers, fixed for downstream consumers
pub const SECTION_SUMMARY: &str = "SUMMARY STATISTICS";
pub const SECTION_IVA: &str = "IVA EVENTS DATA";
pub const SECTION_ACCESS: &str = "ACCESS CONTROL DATA";

/// Generate the full text report over the unfiltered tables.
///
/// `generated_at` is injected so identical inputs reproduce identical
/// bytes; the service passes the current time.
pub fn generate_report(iva: &Table, access: &Table, generated_at: DateTime<Utc>) -> String {
    let summary = summarize(iva, access);

    let mut out = String::new();
    out.push_str(HEAVY_RULE);
    out.push('\n');
    out.push_str("Defense Surveillance C2 Dashboard - Report\n");
    out.push_str(&format!("Generated: {}\n", time::report_stamp(generated_at)));
    out.push_str(HEAVY_RULE);
    out.push_str("\n\n");

    out.push_str(SECTION_SUMMARY);
    out.push('\n');
    out.push_str(LIGHT_RULE);
    out.push('\n');
    out.push_str(&format!("Total IVA Events: {}\n", summary.total_iva_events));
    out.push_str(&format!("Loitering Alerts: {}\n", summary.loitering_alerts));
    out.push_str(&format!("Wrong Direction: {}\n", summary.wrong_direction));
    out.push_str(&format!("Access Allowed: {}\n", summary.access_allowed));
    out.push_str(&format!("Access Denied: {}\n", summary.access_denied));
    out.push('\n');

    out.push_str(SECTION_IVA);
    out.push('\n');
    out.push_str(LIGHT_RULE);
    out.push('\n');
    out.push_str(&format_table(iva));
    out.push('\n');

    out.push_str(SECTION_ACCESS);
    out.push('\n');
    out.push_str(LIGHT_RULE);
    out.push('\n');
    out.push_str(&format_table(access));
    out.push('\n');

    out.push_str(HEAVY_RULE);
    out.push('\n');
    out
}

/// Plain-text dump of a table: padded columns, two-space gutters
fn format_table(table: &Table) -> String {
    if table.is_empty() {
        return "No data\n".to_string();
    }

    let cell = |row: usize, col: usize| -> String {
        match &table.rows[row][col] {
            Value::Null => String::new(),
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    };

    let widths: Vec<usize> = table
        .columns
        .iter()
        .enumerate()
        .map(|(col, name)| {
            (0..table.len())
                .map(|row| cell(row, col).chars().count())
                .max()
                .unwrap_or(0)
                .max(name.chars().count())
        })
        .collect();

    let mut out = String::new();
    let mut write_row = |cells: Vec<String>| {
        let line = cells
            .iter()
            .zip(&widths)
            .map(|(text, &width)| format!("{:<width$}", text))
            .collect::<Vec<_>>()
            .join("  ");
        out.push_str(line.trim_end());
        out.push('\n');
    };

    write_row(table.columns.clone());
    for row in 0..table.len() {
        write_row((0..table.columns.len()).map(|col| cell(row, col)).collect());
    }
    out
}

/// Serialize a table to CSV exactly as loaded: header row, one line per
/// record, UTF-8, `\n` line endings, quoting only where required
pub fn to_csv(table: &Table) -> String {
    let mut out = String::new();
    out.push_str(
        &table
            .columns
            .iter()
            .map(|c| csv_field(c))
            .collect::<Vec<_>>()
            .join(","),
    );
    out.push('\n');
    for row in &table.rows {
        let line = row
            .iter()
            .map(|value| match value {
                Value::Null => String::new(),
                Value::String(s) => csv_field(s),
                other => csv_field(&other.to_string()),
            })
            .collect::<Vec<_>>()
            .join(",");
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Quote a CSV field only when it contains a delimiter, quote, or newline
fn csv_field(text: &str) -> String {
    if text.contains(',') || text.contains('"') || text.contains('\n') || text.contains('\r') {
        format!("\"{}\"", text.replace('"', "\"\""))
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::loader::parse_csv;
    use chrono::TimeZone;
    use serde_json::json;

    fn fixed_time() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 8, 30, 0).unwrap()
    }

    fn iva_table() -> Table {
        Table::new(
            vec!["timestamp".into(), "event_type".into(), "zone".into()],
            vec![
                vec![json!("2025-01-01T10:00:00"), json!("Motion"), json!("Zone D")],
                vec![json!("2025-01-01T11:00:00"), json!("Loitering"), json!("Gate B")],
            ],
        )
    }

    fn access_table() -> Table {
        Table::new(
            vec!["timestamp".into(), "user_id".into(), "decision".into()],
            vec![
                vec![json!("2025-01-01T09:00:00"), json!("U-1"), json!("ALLOW")],
                vec![json!("2025-01-01T09:05:00"), json!("U-2"), json!("DENY")],
            ],
        )
    }

    #[test]
    fn test_report_carries_fixed_section_markers() {
        let report = generate_report(&iva_table(), &access_table(), fixed_time());
        assert!(report.contains(SECTION_SUMMARY));
        assert!(report.contains(SECTION_IVA));
        assert!(report.contains(SECTION_ACCESS));
        assert!(report.contains("Generated: 2025-06-01 08:30:00"));
    }

    #[test]
    fn test_report_summary_lines() {
        let report = generate_report(&iva_table(), &access_table(), fixed_time());
        assert!(report.contains("Total IVA Events: 2"));
        assert!(report.contains("Loitering Alerts: 1"));
        assert!(report.contains("Wrong Direction: 0"));
        assert!(report.contains("Access Allowed: 1"));
        assert!(report.contains("Access Denied: 1"));
    }

    #[test]
    fn test_report_byte_reproducible() {
        let a = generate_report(&iva_table(), &access_table(), fixed_time());
        let b = generate_report(&iva_table(), &access_table(), fixed_time());
        assert_eq!(a, b);
    }

    #[test]
    fn test_report_empty_tables_say_no_data() {
        let report = generate_report(&Table::empty(), &Table::empty(), fixed_time());
        assert_eq!(report.matches("No data").count(), 2);
    }

    #[test]
    fn test_csv_round_trip() {
        let table = iva_table();
        let csv = to_csv(&table);
        let reloaded = parse_csv(&csv).unwrap();
        assert_eq!(reloaded.columns, table.columns);
        assert_eq!(reloaded.rows, table.rows);
    }

    #[test]
    fn test_csv_round_trip_with_quoting() {
        let table = Table::new(
            vec!["note".into(), "zone".into()],
            vec![
                vec![json!("has, comma"), json!("Gate A")],
                vec![json!("a \"quoted\" word"), json!("line\nbreak")],
            ],
        );
        let csv = to_csv(&table);
        let reloaded = parse_csv(&csv).unwrap();
        assert_eq!(reloaded.rows, table.rows);
    }

    #[test]
    fn test_csv_plain_fields_unquoted() {
        let csv = to_csv(&iva_table());
        let first_line = csv.lines().next().unwrap();
        assert_eq!(first_line, "timestamp,event_type,zone");
    }

    #[test]
    fn test_table_dump_alignment() {
        let dump = format_table(&iva_table());
        let lines: Vec<&str> = dump.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("timestamp"));
        assert!(lines[1].contains("Motion"));
    }
}
