//! Projection Guard — the single choke point between a report and a caller
//!
//! Every handler goes through [`project`]; nothing else in the server may
//! serialize a raw [`Report`]. The function is pure and total: the output
//! depends only on the record, its timeline and the viewer role.

use shared::report::{
    AnonymousReportView, InvestigatorReportView, Report, ReportView, TimelineEntryView,
    TimelineEvent, ViewerRole,
};

/// Derive the role-appropriate view of a report.
///
/// - `Anonymous` (public tracker): public id, status, creation time,
///   title, description and location text. Coordinates, analysis,
///   attachments and the internal id are withheld; investigator actors
///   are redacted to a generic label.
/// - `Investigator`: the full record, unredacted.
pub fn project(report: &Report, timeline: &[TimelineEvent], role: ViewerRole) -> ReportView {
    match role {
        ViewerRole::Anonymous => ReportView::Anonymous(AnonymousReportView {
            public_id: report.public_id.clone(),
            status: report.status,
            created_at: report.created_at,
            title: report.title.clone(),
            description: report.description.clone(),
            location: report.location.clone(),
            timeline: timeline
                .iter()
                .map(|event| TimelineEntryView {
                    timestamp: event.timestamp,
                    actor: event.actor.redacted_name().to_string(),
                    kind: event.kind,
                    description: event.description.clone(),
                })
                .collect(),
        }),
        ViewerRole::Investigator => ReportView::Investigator(InvestigatorReportView {
            internal_id: report.internal_id.clone(),
            public_id: report.public_id.clone(),
            title: report.title.clone(),
            description: report.description.clone(),
            report_type: report.report_type,
            status: report.status,
            location: report.location.clone(),
            coordinates: report.coordinates,
            attachments: report.attachments.clone(),
            analysis: report.analysis.clone(),
            version: report.version,
            created_at: report.created_at,
            timeline: timeline
                .iter()
                .map(|event| TimelineEntryView {
                    timestamp: event.timestamp,
                    actor: event.actor.display_name().to_string(),
                    kind: event.kind,
                    description: event.description.clone(),
                })
                .collect(),
        }),
    }
}
