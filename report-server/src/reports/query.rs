//! Query Engine — investigator-facing listing
//!
//! Conjunctive filtering over the report collection with deterministic
//! ordering: newest first, ties broken by internal id so repeated calls
//! against unchanged data always agree.

use shared::report::{Report, ReportStatus, ReportType};

use super::error::ReportResult;
use super::store::ReportStore;

/// Listing filter; an absent dimension matches everything
#[derive(Debug, Clone, Copy, Default)]
pub struct ReportFilter {
    pub status: Option<ReportStatus>,
    pub report_type: Option<ReportType>,
}

impl ReportFilter {
    /// A report passes only if it matches every supplied dimension
    pub fn matches(&self, report: &Report) -> bool {
        self.status.map_or(true, |status| report.status == status)
            && self
                .report_type
                .map_or(true, |report_type| report.report_type == report_type)
    }
}

/// Answers dashboard list requests against the store
#[derive(Debug, Clone)]
pub struct QueryEngine {
    store: ReportStore,
}

impl QueryEngine {
    pub fn new(store: ReportStore) -> Self {
        Self { store }
    }

    /// Filtered, ordered report records — full records, for downstream
    /// Projection Guard application only.
    pub fn list(&self, filter: &ReportFilter) -> ReportResult<Vec<Report>> {
        let mut reports: Vec<Report> = self
            .store
            .all()?
            .into_iter()
            .filter(|report| filter.matches(report))
            .collect();
        sort_for_listing(&mut reports);
        Ok(reports)
    }
}

/// `created_at` descending, `internal_id` ascending on equal timestamps
fn sort_for_listing(reports: &mut [Report]) {
    reports.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| a.internal_id.cmp(&b.internal_id))
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use shared::report::ReportDraft;

    fn draft(title: &str, report_type: ReportType) -> ReportDraft {
        ReportDraft {
            title: title.to_string(),
            description: "details".to_string(),
            report_type,
            location: String::new(),
            coordinates: None,
            attachments: vec![],
        }
    }

    fn synthetic(internal_id: &str, minutes_ago: i64) -> Report {
        Report {
            internal_id: internal_id.to_string(),
            public_id: format!("RPT-{internal_id}"),
            title: "t".to_string(),
            description: "d".to_string(),
            report_type: ReportType::Other,
            status: ReportStatus::Pending,
            location: String::new(),
            coordinates: None,
            attachments: vec![],
            analysis: None,
            version: 1,
            created_at: Utc::now() - Duration::minutes(minutes_ago),
        }
    }

    #[test]
    fn test_conjunctive_filtering() {
        let store = ReportStore::open_in_memory().expect("open store");
        let lifecycle = crate::reports::LifecycleManager::new(store.clone());
        let engine = QueryEngine::new(store.clone());

        let theft = store.create(draft("Theft", ReportType::Theft)).expect("create");
        let fraud = store.create(draft("Fraud", ReportType::Fraud)).expect("create");
        store.create(draft("Fire", ReportType::FireOutbreak)).expect("create");

        lifecycle
            .transition(
                &theft.internal_id,
                1,
                ReportStatus::InProgress,
                shared::report::Actor::Investigator("ana".into()),
            )
            .expect("transition");

        // Single dimension
        let pending = engine
            .list(&ReportFilter {
                status: Some(ReportStatus::Pending),
                report_type: None,
            })
            .expect("list");
        assert_eq!(pending.len(), 2);
        assert!(pending.iter().all(|r| r.status == ReportStatus::Pending));

        // Intersection
        let pending_fraud = engine
            .list(&ReportFilter {
                status: Some(ReportStatus::Pending),
                report_type: Some(ReportType::Fraud),
            })
            .expect("list");
        assert_eq!(pending_fraud.len(), 1);
        assert_eq!(pending_fraud[0].internal_id, fraud.internal_id);

        // No filter matches everything
        assert_eq!(engine.list(&ReportFilter::default()).expect("list").len(), 3);

        // Empty intersection
        let none = engine
            .list(&ReportFilter {
                status: Some(ReportStatus::Resolved),
                report_type: Some(ReportType::Theft),
            })
            .expect("list");
        assert!(none.is_empty());
    }

    #[test]
    fn test_ordering_newest_first() {
        let mut reports = vec![synthetic("b", 30), synthetic("a", 5), synthetic("c", 60)];
        sort_for_listing(&mut reports);
        let ids: Vec<&str> = reports.iter().map(|r| r.internal_id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);
    }

    #[test]
    fn test_equal_timestamps_tie_break_deterministically() {
        let ts = Utc::now();
        let make = |id: &str| {
            let mut report = synthetic(id, 0);
            report.created_at = ts;
            report
        };
        let mut reports = vec![make("c"), make("a"), make("b")];
        sort_for_listing(&mut reports);
        let ids: Vec<&str> = reports.iter().map(|r| r.internal_id.as_str()).collect();
        assert_eq!(ids, ["a", "b", "c"]);

        // Repeated sorting of a shuffled copy agrees
        let mut again = vec![make("b"), make("c"), make("a")];
        sort_for_listing(&mut again);
        let ids_again: Vec<&str> = again.iter().map(|r| r.internal_id.as_str()).collect();
        assert_eq!(ids, ids_again);
    }
}
