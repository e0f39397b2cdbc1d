//! redb-based storage layer for reports and their timelines
//!
//! # Tables
//!
//! | Table | Key | Value | Purpose |
//! |-------|-----|-------|---------|
//! | `reports` | `internal_id` | JSON `Report` | Report records |
//! | `public_index` | `public_id` | `internal_id` | Tracker lookup + uniqueness |
//! | `timeline` | `(internal_id, seq)` | JSON `TimelineEvent` | Append-only audit log |
//!
//! # Consistency
//!
//! Every mutation runs inside a single redb write transaction: the version
//! check, the record update and the event append commit together or not at
//! all. Readers run on MVCC read transactions and can never observe a
//! partially applied record. redb commits are durable when `commit()`
//! returns (copy-on-write with atomic pointer swap).

use redb::{Database, ReadableDatabase, ReadableTable, TableDefinition};
use shared::report::{Actor, EventKind, Report, ReportDraft, ReportStatus, TimelineEvent};
use std::path::Path;
use std::sync::Arc;

use super::error::{ReportError, ReportResult};
use super::public_id::PublicIdGenerator;

/// Table for report records: key = internal_id, value = JSON-serialized Report
const REPORTS_TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("reports");

/// Table mapping public_id -> internal_id (exact-match tracker lookups)
const PUBLIC_INDEX_TABLE: TableDefinition<&str, &str> = TableDefinition::new("public_index");

/// Table for timeline events: key = (internal_id, seq), value = JSON-serialized TimelineEvent
const TIMELINE_TABLE: TableDefinition<(&str, u64), &[u8]> = TableDefinition::new("timeline");

/// Collision retry budget for public id issuance. Hitting it means the
/// entropy source is misconfigured, not that the caller should retry.
const MAX_PUBLIC_ID_ATTEMPTS: u32 = 5;

/// Report storage backed by redb
#[derive(Clone)]
pub struct ReportStore {
    db: Arc<Database>,
    id_generator: Arc<PublicIdGenerator>,
}

impl std::fmt::Debug for ReportStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ReportStore").finish_non_exhaustive()
    }
}

impl ReportStore {
    /// Open or create the database at the given path
    pub fn open(path: impl AsRef<Path>) -> ReportResult<Self> {
        let db = Database::create(path)?;
        Self::with_database(db)
    }

    /// Open an in-memory database (for testing)
    #[cfg(test)]
    pub fn open_in_memory() -> ReportResult<Self> {
        let db = Database::builder().create_with_backend(redb::backends::InMemoryBackend::new())?;
        Self::with_database(db)
    }

    fn with_database(db: Database) -> ReportResult<Self> {
        // Create all tables if they don't exist
        let write_txn = db.begin_write()?;
        {
            let _ = write_txn.open_table(REPORTS_TABLE)?;
            let _ = write_txn.open_table(PUBLIC_INDEX_TABLE)?;
            let _ = write_txn.open_table(TIMELINE_TABLE)?;
        }
        write_txn.commit()?;

        Ok(Self {
            db: Arc::new(db),
            id_generator: Arc::new(PublicIdGenerator::new()),
        })
    }

    // ========== Create ==========

    /// Persist a new report: assigns `internal_id`, a unique `public_id`,
    /// `created_at`, `version = 1`, status PENDING, and the creation event
    /// — all in one committed write transaction.
    pub fn create(&self, draft: ReportDraft) -> ReportResult<Report> {
        if draft.title.trim().is_empty() {
            return Err(ReportError::Validation("title must not be empty".to_string()));
        }
        if draft.description.trim().is_empty() {
            return Err(ReportError::Validation(
                "description must not be empty".to_string(),
            ));
        }

        let now = chrono::Utc::now();
        let internal_id = uuid::Uuid::new_v4().to_string();

        let txn = self.db.begin_write()?;
        let report = {
            let mut reports = txn.open_table(REPORTS_TABLE)?;
            let mut index = txn.open_table(PUBLIC_INDEX_TABLE)?;
            let mut timeline = txn.open_table(TIMELINE_TABLE)?;

            // Issue a public id, re-rolling on the astronomically rare
            // collision. The index check and the insert share this txn,
            // so two concurrent creates can never both claim one id.
            let mut public_id = None;
            for attempt in 0..MAX_PUBLIC_ID_ATTEMPTS {
                let candidate = self.id_generator.generate()?;
                if index.get(candidate.as_str())?.is_none() {
                    public_id = Some(candidate);
                    break;
                }
                tracing::warn!(attempt, "public id collision, regenerating");
            }
            let Some(public_id) = public_id else {
                tracing::error!(
                    attempts = MAX_PUBLIC_ID_ATTEMPTS,
                    "public id space exhausted; entropy source misconfigured"
                );
                return Err(ReportError::IdSpaceExhausted(MAX_PUBLIC_ID_ATTEMPTS));
            };

            let report = Report {
                internal_id: internal_id.clone(),
                public_id: public_id.clone(),
                title: draft.title,
                description: draft.description,
                report_type: draft.report_type,
                status: ReportStatus::Pending,
                location: draft.location,
                coordinates: draft.coordinates,
                attachments: draft.attachments,
                analysis: None,
                version: 1,
                created_at: now,
            };
            let event = TimelineEvent {
                seq: 1,
                timestamp: now,
                actor: Actor::Reporter,
                kind: EventKind::Created,
                description: "Report submitted".to_string(),
            };

            reports.insert(internal_id.as_str(), serde_json::to_vec(&report)?.as_slice())?;
            index.insert(public_id.as_str(), internal_id.as_str())?;
            timeline.insert(
                (internal_id.as_str(), 1u64),
                serde_json::to_vec(&event)?.as_slice(),
            )?;

            report
        };
        txn.commit()?;

        Ok(report)
    }

    // ========== Lookups ==========

    /// Exact-match lookup by public id — the only path reachable by an
    /// unauthenticated caller. No partial matching, no enumeration.
    pub fn get_by_public_id(&self, public_id: &str) -> ReportResult<Option<Report>> {
        let read_txn = self.db.begin_read()?;
        let index = read_txn.open_table(PUBLIC_INDEX_TABLE)?;

        let internal_id = {
            let guard = index.get(public_id)?;
            match guard {
                Some(v) => v.value().to_string(),
                None => return Ok(None),
            }
        };

        let reports = read_txn.open_table(REPORTS_TABLE)?;
        match reports.get(internal_id.as_str())? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// Lookup by internal id (investigator-facing paths only)
    pub fn get_by_internal_id(&self, internal_id: &str) -> ReportResult<Option<Report>> {
        let read_txn = self.db.begin_read()?;
        let reports = read_txn.open_table(REPORTS_TABLE)?;
        match reports.get(internal_id)? {
            Some(value) => Ok(Some(serde_json::from_slice(value.value())?)),
            None => Ok(None),
        }
    }

    /// All report records (investigator-only callers; the Query Engine
    /// filters and orders on top of this)
    pub fn all(&self) -> ReportResult<Vec<Report>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(REPORTS_TABLE)?;

        let mut reports = Vec::new();
        for result in table.iter()? {
            let (_key, value) = result?;
            let report: Report = serde_json::from_slice(value.value())?;
            reports.push(report);
        }

        Ok(reports)
    }

    // ========== Timeline ==========

    /// All timeline events for a report, in replay order
    pub fn timeline(&self, internal_id: &str) -> ReportResult<Vec<TimelineEvent>> {
        let read_txn = self.db.begin_read()?;
        let table = read_txn.open_table(TIMELINE_TABLE)?;

        let mut events = Vec::new();
        let range_start = (internal_id, 0u64);
        let range_end = (internal_id, u64::MAX);

        for result in table.range(range_start..=range_end)? {
            let (_key, value) = result?;
            let event: TimelineEvent = serde_json::from_slice(value.value())?;
            events.push(event);
        }

        events.sort_by_key(|e| e.seq);
        Ok(events)
    }

    // ========== Mutation ==========

    /// Atomic read-modify-write with optimistic concurrency.
    ///
    /// Re-reads the current record inside a write transaction, rejects on
    /// a version mismatch (`Conflict`, nothing applied), runs `mutate`
    /// against the current state, bumps the version, appends the returned
    /// event at `seq = new version`, and commits. Any error path drops
    /// the transaction uncommitted.
    pub fn apply_mutation<F>(
        &self,
        internal_id: &str,
        expected_version: u64,
        mutate: F,
    ) -> ReportResult<Report>
    where
        F: FnOnce(&mut Report) -> ReportResult<TimelineEvent>,
    {
        let txn = self.db.begin_write()?;
        let updated = {
            let mut reports = txn.open_table(REPORTS_TABLE)?;
            let mut timeline = txn.open_table(TIMELINE_TABLE)?;

            let mut report: Report = {
                let guard = reports.get(internal_id)?;
                match guard {
                    Some(value) => serde_json::from_slice(value.value())?,
                    None => return Err(ReportError::NotFound(internal_id.to_string())),
                }
            };

            if report.version != expected_version {
                return Err(ReportError::Conflict {
                    internal_id: internal_id.to_string(),
                    expected: expected_version,
                    found: report.version,
                });
            }

            // The closure sees the current record, never stale state
            let mut event = mutate(&mut report)?;

            report.version += 1;
            event.seq = report.version;

            reports.insert(internal_id, serde_json::to_vec(&report)?.as_slice())?;
            timeline.insert(
                (internal_id, event.seq),
                serde_json::to_vec(&event)?.as_slice(),
            )?;

            report
        };
        txn.commit()?;

        Ok(updated)
    }
}
