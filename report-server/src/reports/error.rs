//! Error taxonomy for the report subsystem

use shared::report::ReportStatus;
use thiserror::Error;

/// Storage errors
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("Database error: {0}")]
    Database(#[from] redb::DatabaseError),

    #[error("Transaction error: {0}")]
    Transaction(#[from] redb::TransactionError),

    #[error("Table error: {0}")]
    Table(#[from] redb::TableError),

    #[error("Storage error: {0}")]
    Storage(#[from] redb::StorageError),

    #[error("Commit error: {0}")]
    Commit(#[from] redb::CommitError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StorageResult<T> = Result<T, StorageError>;

/// Report subsystem errors
///
/// `Conflict` and `InvalidTransition` are detected inside the atomic
/// mutation and returned without side effects; the caller re-fetches and
/// retries (`Conflict`) or re-reads current state (`InvalidTransition`).
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Report not found: {0}")]
    NotFound(String),

    #[error("Version conflict on report {internal_id}: expected {expected}, found {found}")]
    Conflict {
        internal_id: String,
        expected: u64,
        found: u64,
    },

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Public id space exhausted after {0} attempts")]
    IdSpaceExhausted(u32),

    #[error("Secure random source unavailable")]
    EntropyUnavailable,

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl ReportError {
    /// Rejected status-machine edge
    pub fn invalid_edge(from: ReportStatus, to: ReportStatus) -> Self {
        Self::InvalidTransition(format!("{from} -> {to} is not a permitted transition"))
    }

    /// Mutation attempted against a closed (terminal) report
    pub fn closed(status: ReportStatus) -> Self {
        Self::InvalidTransition(format!("report is closed ({status})"))
    }
}

// Direct conversions so `?` works on raw redb/serde calls in store code
impl From<redb::DatabaseError> for ReportError {
    fn from(e: redb::DatabaseError) -> Self {
        Self::Storage(StorageError::Database(e))
    }
}

impl From<redb::TransactionError> for ReportError {
    fn from(e: redb::TransactionError) -> Self {
        Self::Storage(StorageError::Transaction(e))
    }
}

impl From<redb::TableError> for ReportError {
    fn from(e: redb::TableError) -> Self {
        Self::Storage(StorageError::Table(e))
    }
}

impl From<redb::StorageError> for ReportError {
    fn from(e: redb::StorageError) -> Self {
        Self::Storage(StorageError::Storage(e))
    }
}

impl From<redb::CommitError> for ReportError {
    fn from(e: redb::CommitError) -> Self {
        Self::Storage(StorageError::Commit(e))
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(e: serde_json::Error) -> Self {
        Self::Storage(StorageError::Serialization(e))
    }
}

pub type ReportResult<T> = Result<T, ReportError>;
