//! Core report record and its closed vocabularies

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Status
// ============================================================================

/// Report lifecycle status
///
/// The transition graph is fixed:
///
/// | From | Allowed To |
/// |------|------------|
/// | PENDING | IN_PROGRESS, DISMISSED |
/// | IN_PROGRESS | RESOLVED, DISMISSED |
/// | RESOLVED | (terminal) |
/// | DISMISSED | (terminal) |
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportStatus {
    Pending,
    InProgress,
    Resolved,
    Dismissed,
}

impl ReportStatus {
    /// All statuses, in lifecycle order
    pub const ALL: [ReportStatus; 4] = [
        ReportStatus::Pending,
        ReportStatus::InProgress,
        ReportStatus::Resolved,
        ReportStatus::Dismissed,
    ];

    /// Terminal statuses accept no further transitions
    pub fn is_terminal(self) -> bool {
        matches!(self, ReportStatus::Resolved | ReportStatus::Dismissed)
    }

    /// Whether the edge `self -> target` exists in the transition graph
    pub fn can_transition_to(self, target: ReportStatus) -> bool {
        use ReportStatus::*;
        matches!(
            (self, target),
            (Pending, InProgress) | (Pending, Dismissed) | (InProgress, Resolved) | (InProgress, Dismissed)
        )
    }

    /// Wire-format label (matches the serde representation)
    pub fn as_str(self) -> &'static str {
        match self {
            ReportStatus::Pending => "PENDING",
            ReportStatus::InProgress => "IN_PROGRESS",
            ReportStatus::Resolved => "RESOLVED",
            ReportStatus::Dismissed => "DISMISSED",
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Incident Category
// ============================================================================

/// Closed set of incident categories a reporter can choose from
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportType {
    Theft,
    Assault,
    Harassment,
    Vandalism,
    Fraud,
    FireOutbreak,
    MedicalEmergency,
    TrafficAccident,
    MissingPerson,
    Other,
}

impl ReportType {
    pub fn as_str(self) -> &'static str {
        match self {
            ReportType::Theft => "THEFT",
            ReportType::Assault => "ASSAULT",
            ReportType::Harassment => "HARASSMENT",
            ReportType::Vandalism => "VANDALISM",
            ReportType::Fraud => "FRAUD",
            ReportType::FireOutbreak => "FIRE_OUTBREAK",
            ReportType::MedicalEmergency => "MEDICAL_EMERGENCY",
            ReportType::TrafficAccident => "TRAFFIC_ACCIDENT",
            ReportType::MissingPerson => "MISSING_PERSON",
            ReportType::Other => "OTHER",
        }
    }
}

impl std::fmt::Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Investigator Analysis
// ============================================================================

/// Priority level assigned during triage
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    Low,
    Medium,
    High,
    Critical,
}

/// Investigator-assigned triage metadata
///
/// Absent on a report until an investigator sets it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Analysis {
    pub priority: Priority,
    pub department: String,
}

// ============================================================================
// Location
// ============================================================================

/// Resolved coordinates for a free-text location
///
/// Advisory only; a report is complete without them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

// ============================================================================
// Report
// ============================================================================

/// Persisted report record
///
/// `internal_id` is the storage key and never leaves investigator-facing
/// paths. `public_id` is the reporter's tracking handle. `version` is the
/// optimistic-concurrency token: every successful mutation increments it
/// by exactly one and appends one timeline event with the same ordinal.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Report {
    pub internal_id: String,
    pub public_id: String,
    pub title: String,
    pub description: String,
    pub report_type: ReportType,
    pub status: ReportStatus,
    pub location: String,
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub attachments: Vec<String>,
    pub analysis: Option<Analysis>,
    pub version: u64,
    pub created_at: DateTime<Utc>,
}

/// Validated submission payload handed to the store
///
/// Boundary validation happens before a draft is constructed; the store
/// re-checks the required fields as a last line of defense.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDraft {
    pub title: String,
    pub description: String,
    pub report_type: ReportType,
    pub location: String,
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub attachments: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_table() {
        use ReportStatus::*;

        assert!(Pending.can_transition_to(InProgress));
        assert!(Pending.can_transition_to(Dismissed));
        assert!(InProgress.can_transition_to(Resolved));
        assert!(InProgress.can_transition_to(Dismissed));

        assert!(!Pending.can_transition_to(Resolved));
        assert!(!Pending.can_transition_to(Pending));
        assert!(!InProgress.can_transition_to(Pending));
        assert!(!InProgress.can_transition_to(InProgress));
    }

    #[test]
    fn test_terminal_statuses_have_no_edges() {
        use ReportStatus::*;

        for terminal in [Resolved, Dismissed] {
            assert!(terminal.is_terminal());
            for target in ReportStatus::ALL {
                assert!(!terminal.can_transition_to(target));
            }
        }
    }

    #[test]
    fn test_status_wire_format() {
        let json = serde_json::to_string(&ReportStatus::InProgress).expect("serialize status");
        assert_eq!(json, "\"IN_PROGRESS\"");

        let back: ReportStatus = serde_json::from_str("\"DISMISSED\"").expect("parse status");
        assert_eq!(back, ReportStatus::Dismissed);
    }
}
