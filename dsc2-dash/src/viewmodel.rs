//! View model construction
//!
//! Derives everything the dashboard widgets need from the two loaded
//! tables: headline summary counts, per-category rollups, sorted timelines,
//! and enriched per-record display rows. The builder never fails; empty
//! tables produce an empty view model with all counts zero.
//!
//! Display enrichment fills columns the source lacks with synthetic values.
//! Every display field carries a provenance tag so consumers can tell real
//! data from display filler; synthetic values are never ground truth and
//! never overwrite a present column.

use std::collections::{BTreeMap, HashSet};

use dsc2_common::{Severity, Table};
use rand::rngs::StdRng;
use rand::Rng;
use serde::Serialize;

/// Canned display descriptions per known event type
const EVENT_DESCRIPTIONS: [(&str, &str); 6] = [
    ("Loitering", "Personnel loitering near perimeter gate"),
    ("Motion", "Motion detected in off-limits storage facility"),
    ("Wrong Direction", "Wrong-way entry at vehicle inspection point"),
    ("Intrusion", "Breach attempt detected at north perimeter wall"),
    ("Abandoned Object", "Unidentified bag left at security checkpoint"),
    ("Crowd Formation", "Large assembly near briefing hall entrance"),
];

const FALLBACK_DESCRIPTION: &str = "Activity detected in surveillance area";

/// Sample personnel roster, cycled by display position
const NAME_ROSTER: [&str; 9] = [
    "Maj. Rajesh N",
    "Sgt. K. Sitadevi",
    "Lt. Col. J. Rahul",
    "Lt. Col. A. Sharma",
    "D. Patel",
    "Cpl. M. Dravid",
    "S. Narasimma",
    "Capt. E. Arun Sammy",
    "WO1 L. Karthikeya",
];

const CLEARANCES: [&str; 5] = [
    "TOP SECRET",
    "SECRET",
    "UNCLEARED",
    "CONFIDENTIAL",
    "TOP SECRET/SCI",
];

/// Zone → access point display names; unknown zones pass through unchanged
const ACCESS_POINTS: [(&str, &str); 5] = [
    ("Gate A", "Gate Alpha"),
    ("Gate B", "Gate Bravo"),
    ("Gate C", "Gate Charlie"),
    ("Zone C", "SCIF Entry"),
    ("Zone D", "Command Center"),
];

const AUTH_METHODS: [&str; 4] = [
    "Biometric + Badge",
    "Badge Only",
    "Biometric + PIN",
    "No Credential",
];

/// Canonical access decision vocabulary
const DECISION_ALLOW: &str = "ALLOW";
const DECISION_DENY: &str = "DENY";
/// Seen in some feeds as an ALLOW synonym; counted as its own literal and
/// surfaced as a data-quality warning, never merged silently
const DECISION_GRANT: &str = "GRANT";

/// Multi-select filters over the IVA table.
///
/// An empty set means "no filtering on that dimension". Access records are
/// never filtered.
#[derive(Debug, Clone, Default)]
pub struct FilterSpec {
    pub event_types: HashSet<String>,
    pub zones: HashSet<String>,
}

impl FilterSpec {
    /// No filtering on either dimension
    pub fn none() -> FilterSpec {
        FilterSpec::default()
    }

    fn retains(&self, event_type: Option<&str>, zone: Option<&str>) -> bool {
        if !self.event_types.is_empty() {
            match event_type {
                Some(v) if self.event_types.contains(v) => {}
                _ => return false,
            }
        }
        if !self.zones.is_empty() {
            match zone {
                Some(v) if self.zones.contains(v) => {}
                _ => return false,
            }
        }
        true
    }
}

/// Where a display value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldOrigin {
    /// Loaded from the source record
    Present,
    /// Fabricated for display; not authoritative
    Synthesized,
    /// Absent from the source and no synthesis rule applies
    Unknown,
}

/// A single display value with its provenance tag
#[derive(Debug, Clone, Serialize)]
pub struct DisplayField {
    pub value: String,
    pub origin: FieldOrigin,
}

impl DisplayField {
    fn present(value: String) -> DisplayField {
        DisplayField {
            value,
            origin: FieldOrigin::Present,
        }
    }

    fn synthesized(value: String) -> DisplayField {
        DisplayField {
            value,
            origin: FieldOrigin::Synthesized,
        }
    }

    fn unknown() -> DisplayField {
        DisplayField {
            value: "N/A".to_string(),
            origin: FieldOrigin::Unknown,
        }
    }

    /// Present when the source has a value, Unknown otherwise
    fn from_cell(cell: Option<String>) -> DisplayField {
        match cell {
            Some(value) => DisplayField::present(value),
            None => DisplayField::unknown(),
        }
    }

    /// Present when the source has a value, else synthesized from `fill`
    fn or_synthesize(cell: Option<String>, fill: impl FnOnce() -> String) -> DisplayField {
        match cell {
            Some(value) => DisplayField::present(value),
            None => DisplayField::synthesized(fill()),
        }
    }
}

/// One enriched IVA timeline entry, in display (sorted) order
#[derive(Debug, Clone, Serialize)]
pub struct IvaDisplayRow {
    pub timestamp: DisplayField,
    pub event_type: DisplayField,
    pub zone: DisplayField,
    pub severity: Severity,
    pub camera: DisplayField,
    pub confidence: DisplayField,
    pub description: DisplayField,
}

/// One enriched access-control timeline entry, in display (sorted) order
#[derive(Debug, Clone, Serialize)]
pub struct AccessDisplayRow {
    pub timestamp: DisplayField,
    pub personnel_id: DisplayField,
    pub name: DisplayField,
    pub clearance: DisplayField,
    pub access_point: DisplayField,
    pub decision: DisplayField,
    pub auth_method: DisplayField,
    pub reason: DisplayField,
}

/// Headline metric-card values, computed over the unfiltered tables
#[derive(Debug, Clone, Default, Serialize)]
pub struct Summary {
    pub total_iva_events: i64,
    pub loitering_alerts: i64,
    pub wrong_direction: i64,
    pub access_allowed: i64,
    pub access_denied: i64,
}

/// Everything the dashboard widgets consume, rebuilt on every refresh
#[derive(Debug, Clone, Default, Serialize)]
pub struct ViewModel {
    pub summary: Summary,
    /// Per-category rollups; event type and zone cover the filtered IVA set
    pub event_type_counts: BTreeMap<String, i64>,
    pub zone_counts: BTreeMap<String, i64>,
    pub decision_counts: BTreeMap<String, i64>,
    pub role_counts: BTreeMap<String, i64>,
    /// Enriched timelines, sorted descending by timestamp
    pub iva_rows: Vec<IvaDisplayRow>,
    pub access_rows: Vec<AccessDisplayRow>,
    /// Distinct filter options from the unfiltered IVA table
    pub event_type_options: Vec<String>,
    pub zone_options: Vec<String>,
    /// Load and data-quality warnings, one entry each
    pub warnings: Vec<String>,
}

/// Build the full view model from the two loaded tables.
///
/// The RNG drives confidence/clearance/auth-method synthesis; the service
/// seeds it from entropy, tests from a fixed seed for reproducibility.
pub fn build(
    iva: &Table,
    access: &Table,
    filters: &FilterSpec,
    rng: &mut StdRng,
) -> ViewModel {
    let filtered = filter_rows(iva, filters);
    let iva_order = sorted_desc(iva, filtered);
    let access_order = sorted_desc(access, (0..access.len()).collect());

    let mut vm = ViewModel {
        summary: summarize(iva, access),
        event_type_counts: value_counts(iva, &iva_order, "event_type"),
        zone_counts: value_counts(iva, &iva_order, "zone"),
        decision_counts: value_counts(access, &access_order, "decision"),
        role_counts: value_counts(access, &access_order, "role"),
        iva_rows: enrich_iva(iva, &iva_order, rng),
        access_rows: enrich_access(access, &access_order, rng),
        event_type_options: iva.distinct_values("event_type"),
        zone_options: iva.distinct_values("zone"),
        warnings: Vec::new(),
    };

    let grants = count_decision(access, DECISION_GRANT);
    if grants > 0 {
        vm.warnings.push(format!(
            "{} access record(s) use decision \"GRANT\"; counted separately from \"ALLOW\"",
            grants
        ));
    }

    vm
}

/// Indices of IVA rows retained by the filter, in original order
fn filter_rows(iva: &Table, filters: &FilterSpec) -> Vec<usize> {
    (0..iva.len())
        .filter(|&row| {
            let event_type = iva.cell_text(row, "event_type");
            let zone = iva.cell_text(row, "zone");
            filters.retains(event_type.as_deref(), zone.as_deref())
        })
        .collect()
}

/// Column used as the timeline sort key: `timestamp` when present, else the
/// first column whose name contains "time" or "date" (case-insensitive)
fn sort_key_column(table: &Table) -> Option<usize> {
    table.column_index("timestamp").or_else(|| {
        table.columns.iter().position(|name| {
            let lower = name.to_lowercase();
            lower.contains("time") || lower.contains("date")
        })
    })
}

/// Stable descending sort of row indices by the timeline key.
///
/// No key column leaves the original order. Ties and null keys preserve
/// original relative order; null keys sort after every value.
fn sorted_desc(table: &Table, mut order: Vec<usize>) -> Vec<usize> {
    let Some(col) = sort_key_column(table) else {
        return order;
    };
    let key = |row: usize| -> Option<String> {
        match &table.rows[row][col] {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    };
    order.sort_by(|&a, &b| key(b).cmp(&key(a)));
    order
}

/// Count distinct values of a column over the given rows.
///
/// A missing column yields an empty map; null cells are skipped.
fn value_counts(table: &Table, order: &[usize], column: &str) -> BTreeMap<String, i64> {
    let mut counts = BTreeMap::new();
    if !table.has_column(column) {
        return counts;
    }
    for &row in order {
        if let Some(value) = table.cell_text(row, column) {
            *counts.entry(value).or_insert(0) += 1;
        }
    }
    counts
}

fn count_decision(access: &Table, decision: &str) -> i64 {
    (0..access.len())
        .filter(|&row| access.cell_text(row, "decision").as_deref() == Some(decision))
        .count() as i64
}

fn count_event_type(iva: &Table, event_type: &str) -> i64 {
    (0..iva.len())
        .filter(|&row| iva.cell_text(row, "event_type").as_deref() == Some(event_type))
        .count() as i64
}

/// Metric-card totals over the unfiltered tables
pub fn summarize(iva: &Table, access: &Table) -> Summary {
    Summary {
        total_iva_events: iva.len() as i64,
        loitering_alerts: count_event_type(iva, "Loitering"),
        wrong_direction: count_event_type(iva, "Wrong Direction"),
        access_allowed: count_decision(access, DECISION_ALLOW),
        access_denied: count_decision(access, DECISION_DENY),
    }
}

/// Enrich filtered+sorted IVA rows for display
fn enrich_iva(iva: &Table, order: &[usize], rng: &mut StdRng) -> Vec<IvaDisplayRow> {
    order
        .iter()
        .enumerate()
        .map(|(position, &row)| {
            let event_type = iva.cell_text(row, "event_type");
            let zone = iva.cell_text(row, "zone");
            let severity = Severity::classify(
                event_type.as_deref().unwrap_or(""),
                zone.as_deref().unwrap_or(""),
            );

            let description_for = |kind: &Option<String>| {
                let kind = kind.as_deref().unwrap_or("");
                EVENT_DESCRIPTIONS
                    .iter()
                    .find(|(name, _)| *name == kind)
                    .map(|(_, text)| *text)
                    .unwrap_or(FALLBACK_DESCRIPTION)
                    .to_string()
            };

            IvaDisplayRow {
                timestamp: DisplayField::from_cell(iva.cell_text(row, "timestamp")),
                event_type: DisplayField::from_cell(event_type.clone()),
                zone: DisplayField::from_cell(zone),
                severity,
                camera: DisplayField::or_synthesize(iva.cell_text(row, "camera"), || {
                    format!("CAM-{:03}", position + 1)
                }),
                confidence: DisplayField::or_synthesize(iva.cell_text(row, "confidence"), || {
                    let raw: f64 = rng.gen_range(0.80..=0.99);
                    format!("{:.2}", (raw * 100.0).round() / 100.0)
                }),
                description: DisplayField::or_synthesize(
                    iva.cell_text(row, "description"),
                    || description_for(&event_type),
                ),
            }
        })
        .collect()
}

/// Enrich sorted access rows for display
fn enrich_access(access: &Table, order: &[usize], rng: &mut StdRng) -> Vec<AccessDisplayRow> {
    let has_zone = access.has_column("zone");
    let mut fallback_seq = 0u32;

    order
        .iter()
        .enumerate()
        .map(|(position, &row)| {
            let personnel_id = access
                .cell_text(row, "personnel_id")
                .map(DisplayField::present)
                .or_else(|| access.cell_text(row, "user_id").map(DisplayField::present))
                .unwrap_or_else(|| {
                    fallback_seq += 1;
                    DisplayField::synthesized(format!("DF-{:04}", fallback_seq))
                });

            let access_point =
                DisplayField::or_synthesize(access.cell_text(row, "access_point"), || {
                    if has_zone {
                        match access.cell_text(row, "zone") {
                            Some(zone) => ACCESS_POINTS
                                .iter()
                                .find(|(name, _)| *name == zone)
                                .map(|(_, point)| point.to_string())
                                .unwrap_or(zone),
                            None => "N/A".to_string(),
                        }
                    } else {
                        ACCESS_POINTS[position % ACCESS_POINTS.len()].1.to_string()
                    }
                });

            AccessDisplayRow {
                timestamp: DisplayField::from_cell(access.cell_text(row, "timestamp")),
                personnel_id,
                name: DisplayField::or_synthesize(access.cell_text(row, "name"), || {
                    NAME_ROSTER[position % NAME_ROSTER.len()].to_string()
                }),
                clearance: DisplayField::or_synthesize(access.cell_text(row, "clearance"), || {
                    CLEARANCES[rng.gen_range(0..CLEARANCES.len())].to_string()
                }),
                access_point,
                decision: DisplayField::from_cell(access.cell_text(row, "decision")),
                auth_method: DisplayField::or_synthesize(
                    access.cell_text(row, "auth_method"),
                    || AUTH_METHODS[rng.gen_range(0..AUTH_METHODS.len())].to_string(),
                ),
                reason: DisplayField::from_cell(access.cell_text(row, "reason")),
            }
        })
        .collect()
}
