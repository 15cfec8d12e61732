//! Timestamp formatting shared across DS-C2 modules

use chrono::{DateTime, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Report header stamp: `YYYY-MM-DD HH:MM:SS`
pub fn report_stamp(at: DateTime<Utc>) -> String {
    at.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Compact stamp used in export filenames: `YYYYMMDD_HHMMSS`
pub fn export_stamp(at: DateTime<Utc>) -> String {
    at.format("%Y%m%d_%H%M%S").to_string()
}

/// Download filename for an export: `<source>_<YYYYMMDD_HHMMSS>.<ext>`
pub fn export_filename(source: &str, ext: &str, at: DateTime<Utc>) -> String {
    format!("{}_{}.{}", source, export_stamp(at), ext)
}
