//! Persisted store and staleness collaborators

use std::collections::HashMap;

use crate::errors::StoreError;
use crate::models::{DetailedFileMetrics, Issue, IssueStatus, ScanRecord, StoredIssue, VisitSignal};

mod json_store;
mod visits;

pub use json_store::JsonStore;
pub use visits::{NoVisits, VisitFile};

/// Per-file metrics persistence, keyed by (scenario, file path)
pub trait MetricsStore {
    /// Insert or replace records for a scenario
    fn upsert_file_metrics(
        &self,
        scenario: &str,
        records: &[DetailedFileMetrics],
    ) -> Result<(), StoreError>;

    /// Records for a scenario with at least `min_lines` lines, ordered by path
    fn file_metrics(
        &self,
        scenario: &str,
        min_lines: usize,
    ) -> Result<Vec<DetailedFileMetrics>, StoreError>;
}

/// Issue persistence with a status lifecycle
pub trait IssueStore {
    /// Insert new issues and refresh known ones; returns how many were new.
    /// Known issues keep their id, status and creation time.
    fn upsert_issues(&self, issues: &[Issue]) -> Result<usize, StoreError>;

    /// Issues for a scenario, optionally filtered by status
    fn issues(
        &self,
        scenario: &str,
        status: Option<IssueStatus>,
    ) -> Result<Vec<StoredIssue>, StoreError>;

    /// Move an issue to another lifecycle state
    fn update_issue_status(&self, id: u64, status: IssueStatus) -> Result<StoredIssue, StoreError>;
}

/// Append-only log of scans
pub trait ScanHistory {
    fn record_scan(&self, record: ScanRecord) -> Result<(), StoreError>;

    /// Scans of a scenario, oldest first
    fn scan_history(&self, scenario: &str) -> Result<Vec<ScanRecord>, StoreError>;
}

/// Read-only visit/staleness signal, owned by an external collaborator
pub trait StalenessProvider {
    /// Signal per scenario-relative file path. Files absent from the map were never visited.
    fn staleness(&self, scenario: &str) -> Result<HashMap<String, VisitSignal>, StoreError>;
}
