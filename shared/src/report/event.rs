//! Append-only timeline events
//!
//! Every successful mutation of a report appends exactly one event. The
//! timeline is never reordered or truncated; `seq` equals the report
//! version that produced the entry, giving a stable replay order.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timeline event kinds
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    Created,
    StatusChanged,
    AnalysisUpdated,
}

/// Who performed a mutation
///
/// Reporters are always anonymous; investigators carry the identity
/// string supplied by the auth provider. The Projection Guard decides
/// whether that identity may reach a given caller.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "role", content = "id", rename_all = "lowercase")]
pub enum Actor {
    Reporter,
    Investigator(String),
}

impl Actor {
    /// Unredacted display name (investigator paths only)
    pub fn display_name(&self) -> &str {
        match self {
            Actor::Reporter => "reporter",
            Actor::Investigator(id) => id,
        }
    }

    /// Redacted label safe for anonymous callers
    pub fn redacted_name(&self) -> &'static str {
        match self {
            Actor::Reporter => "reporter",
            Actor::Investigator(_) => "investigator",
        }
    }
}

/// One timeline entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TimelineEvent {
    /// Ordinal within the report's timeline; equals the version that
    /// produced the entry (creation is seq 1)
    pub seq: u64,
    pub timestamp: DateTime<Utc>,
    pub actor: Actor,
    pub kind: EventKind,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_actor_redaction() {
        let investigator = Actor::Investigator("ana.torres".to_string());
        assert_eq!(investigator.display_name(), "ana.torres");
        assert_eq!(investigator.redacted_name(), "investigator");

        let reporter = Actor::Reporter;
        assert_eq!(reporter.display_name(), "reporter");
        assert_eq!(reporter.redacted_name(), "reporter");
    }

    #[test]
    fn test_actor_wire_format() {
        let json =
            serde_json::to_value(Actor::Investigator("ana".into())).expect("serialize actor");
        assert_eq!(json["role"], "investigator");
        assert_eq!(json["id"], "ana");

        let json = serde_json::to_value(Actor::Reporter).expect("serialize actor");
        assert_eq!(json["role"], "reporter");
    }
}
