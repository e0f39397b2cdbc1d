//! Shared types for the TruthLink report platform
//!
//! Common types used by the report server and its clients: the report
//! domain model, timeline events, request/response DTOs and the
//! role-filtered view structures.

pub mod report;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use report::{
    Actor, Analysis, AnonymousReportView, Coordinates, EventKind, InvestigatorReportView,
    Priority, Report, ReportDraft, ReportStatus, ReportType, ReportView, TimelineEntryView,
    TimelineEvent, ViewerRole,
};
