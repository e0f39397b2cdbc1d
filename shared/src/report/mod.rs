//! Report domain types
//!
//! - **types**: the persisted [`Report`] record, status/type enums and the
//!   status transition table
//! - **event**: append-only timeline entries
//! - **dto**: HTTP request/response payloads (camelCase wire form)
//! - **view**: role-filtered projections safe to return to a caller

pub mod dto;
pub mod event;
pub mod types;
pub mod view;

pub use dto::{ListReportsQuery, SubmitReportRequest, SubmitReportResponse, UpdateReportRequest};
pub use event::{Actor, EventKind, TimelineEvent};
pub use types::{Analysis, Coordinates, Priority, Report, ReportDraft, ReportStatus, ReportType};
pub use view::{
    AnonymousReportView, InvestigatorReportView, ReportView, TimelineEntryView, ViewerRole,
};
