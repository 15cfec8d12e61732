//! Event severity classification
//!
//! Maps an IVA event's (event_type, zone) pair to a severity tier. The
//! decision table is fixed and evaluated in priority order; the same inputs
//! always produce the same tier.

use serde::{Deserialize, Serialize};

/// Zones where loitering escalates to HIGH severity
const RESTRICTED_ZONES: [&str; 2] = ["Gate B", "Zone C"];

/// Severity tier of an IVA event
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    /// Classify an event by type and zone.
    ///
    /// Priority order, first match wins:
    /// 1. Loitering in a restricted zone (Gate B, Zone C) → HIGH
    /// 2. Wrong Direction in any zone → MEDIUM
    /// 3. Motion → LOW
    /// 4. Everything else → LOW
    ///
    /// Total over any pair of strings, including empty or unrecognized
    /// values.
    pub fn classify(event_type: &str, zone: &str) -> Severity {
        if event_type == "Loitering" && RESTRICTED_ZONES.contains(&zone) {
            return Severity::High;
        }
        if event_type == "Wrong Direction" {
            return Severity::Medium;
        }
        if event_type == "Motion" {
            return Severity::Low;
        }
        Severity::Low
    }

    /// Uppercase display label, matching the serialized form
    pub fn label(self) -> &'static str {
        match self {
            Severity::High => "HIGH",
            Severity::Medium => "MEDIUM",
            Severity::Low => "LOW",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loitering_restricted_zones_high() {
        assert_eq!(Severity::classify("Loitering", "Gate B"), Severity::High);
        assert_eq!(Severity::classify("Loitering", "Zone C"), Severity::High);
    }

    #[test]
    fn test_loitering_elsewhere_low() {
        assert_eq!(Severity::classify("Loitering", "Gate A"), Severity::Low);
        assert_eq!(Severity::classify("Loitering", "Zone D"), Severity::Low);
        assert_eq!(Severity::classify("Loitering", ""), Severity::Low);
    }

    #[test]
    fn test_wrong_direction_medium_any_zone() {
        assert_eq!(
            Severity::classify("Wrong Direction", "Zone C"),
            Severity::Medium
        );
        assert_eq!(
            Severity::classify("Wrong Direction", "Gate A"),
            Severity::Medium
        );
        assert_eq!(Severity::classify("Wrong Direction", ""), Severity::Medium);
    }

    #[test]
    fn test_motion_low() {
        assert_eq!(Severity::classify("Motion", "Zone D"), Severity::Low);
        assert_eq!(Severity::classify("Motion", "Gate B"), Severity::Low);
    }

    #[test]
    fn test_unrecognized_types_default_low() {
        // No rule matches these, even in restricted zones
        assert_eq!(Severity::classify("Intrusion", "Zone C"), Severity::Low);
        assert_eq!(
            Severity::classify("Abandoned Object", "Gate B"),
            Severity::Low
        );
        assert_eq!(
            Severity::classify("Crowd Formation", "Zone D"),
            Severity::Low
        );
        assert_eq!(Severity::classify("", ""), Severity::Low);
    }

    #[test]
    fn test_labels_match_serialized_form() {
        assert_eq!(Severity::High.label(), "HIGH");
        assert_eq!(Severity::Medium.label(), "MEDIUM");
        assert_eq!(Severity::Low.label(), "LOW");
        assert_eq!(
            serde_json::to_string(&Severity::High).unwrap(),
            "\"HIGH\""
        );
    }
}
