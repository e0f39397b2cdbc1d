//! Role-filtered report views
//!
//! These are the only shapes in which a report may leave the server. The
//! Projection Guard in the server is the single constructor; handlers
//! never serialize a raw [`Report`](super::types::Report).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::event::EventKind;
use super::types::{Analysis, Coordinates, ReportStatus, ReportType};

/// Who is looking at the report
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerRole {
    Anonymous,
    Investigator,
}

/// Timeline entry as exposed to a caller
///
/// `actor` is a plain label here: the unredacted identity for
/// investigators, the generic `"investigator"` label for anonymous
/// callers.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntryView {
    pub timestamp: DateTime<Utc>,
    pub actor: String,
    pub kind: EventKind,
    pub description: String,
}

/// Public tracker view — what an anonymous reporter sees
///
/// Deliberately narrow: no internal id, no analysis, no coordinates, no
/// attachment references, no investigator identities.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnonymousReportView {
    pub public_id: String,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub title: String,
    pub description: String,
    pub location: String,
    pub timeline: Vec<TimelineEntryView>,
}

/// Dashboard view — the full record for authorized investigators
///
/// Carries `version` so the client can supply `expectedVersion` on its
/// next mutation without a re-fetch.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestigatorReportView {
    pub internal_id: String,
    pub public_id: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub report_type: ReportType,
    pub status: ReportStatus,
    pub location: String,
    pub coordinates: Option<Coordinates>,
    pub attachments: Vec<String>,
    pub analysis: Option<Analysis>,
    pub version: u64,
    pub created_at: DateTime<Utc>,
    pub timeline: Vec<TimelineEntryView>,
}

/// Either projection, ready for serialization
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ReportView {
    Anonymous(AnonymousReportView),
    Investigator(InvestigatorReportView),
}
