use chrono::Utc;
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::RwLock;
use tempfile::NamedTempFile;

use super::{IssueStore, MetricsStore, ScanHistory};
use crate::errors::StoreError;
use crate::models::{DetailedFileMetrics, Issue, IssueStatus, ScanRecord, StoredIssue};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoreState {
    #[serde(default)]
    next_issue_id: u64,

    /// scenario -> file path -> metrics
    #[serde(default)]
    metrics: BTreeMap<String, BTreeMap<String, DetailedFileMetrics>>,

    #[serde(default)]
    issues: Vec<StoredIssue>,

    #[serde(default)]
    scans: Vec<ScanRecord>,
}

/// Store backed by a single JSON document.
///
/// Every write rewrites the whole document through a temporary file in the
/// same directory that is then persisted over the store path.
#[derive(Debug)]
pub struct JsonStore {
    path: Option<PathBuf>,
    state: RwLock<StoreState>,
}

impl JsonStore {
    /// Open the store at `path`, starting empty when the file does not exist
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let state = if path.exists() {
            let content = fs::read_to_string(&path).map_err(|source| StoreError::Io {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&content).map_err(|source| StoreError::Corrupt {
                path: path.clone(),
                source,
            })?
        } else {
            debug!("No store at {:?}, starting empty", path);
            StoreState::default()
        };

        Ok(Self {
            path: Some(path),
            state: RwLock::new(state),
        })
    }

    /// A store that lives only as long as this value
    pub fn in_memory() -> Self {
        Self {
            path: None,
            state: RwLock::new(StoreState::default()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn persist(&self, state: &StoreState) -> Result<(), StoreError> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let io_error = |source| StoreError::Io {
            path: path.clone(),
            source,
        };

        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent).map_err(io_error)?;

        let mut temp_file = NamedTempFile::new_in(parent).map_err(io_error)?;
        serde_json::to_writer_pretty(&mut temp_file, state).map_err(|source| {
            StoreError::Corrupt {
                path: path.clone(),
                source,
            }
        })?;
        temp_file.flush().map_err(io_error)?;
        temp_file.persist(path).map_err(|e| io_error(e.error))?;
        Ok(())
    }

    /// Apply `f` to a copy of the state and keep it only once it is on disk
    fn write<T>(&self, f: impl FnOnce(&mut StoreState) -> Result<T, StoreError>) -> Result<T, StoreError> {
        let mut state = self.state.write().map_err(|_| StoreError::Poisoned)?;
        let mut next = state.clone();
        let value = f(&mut next)?;
        self.persist(&next)?;
        *state = next;
        Ok(value)
    }

    fn read<T>(&self, f: impl FnOnce(&StoreState) -> T) -> Result<T, StoreError> {
        let state = self.state.read().map_err(|_| StoreError::Poisoned)?;
        Ok(f(&state))
    }
}

fn same_finding(stored: &Issue, issue: &Issue) -> bool {
    stored.scenario == issue.scenario
        && stored.file_path == issue.file_path
        && stored.category == issue.category
        && stored.line == issue.line
        && stored.column == issue.column
}

impl MetricsStore for JsonStore {
    fn upsert_file_metrics(
        &self,
        scenario: &str,
        records: &[DetailedFileMetrics],
    ) -> Result<(), StoreError> {
        self.write(|state| {
            let files = state.metrics.entry(scenario.to_string()).or_default();
            for record in records {
                files.insert(record.file_path.clone(), record.clone());
            }
            Ok(())
        })
    }

    fn file_metrics(
        &self,
        scenario: &str,
        min_lines: usize,
    ) -> Result<Vec<DetailedFileMetrics>, StoreError> {
        self.read(|state| {
            state
                .metrics
                .get(scenario)
                .map(|files| {
                    files
                        .values()
                        .filter(|record| record.line_count >= min_lines)
                        .cloned()
                        .collect()
                })
                .unwrap_or_default()
        })
    }
}

impl IssueStore for JsonStore {
    fn upsert_issues(&self, issues: &[Issue]) -> Result<usize, StoreError> {
        self.write(|state| {
            let now = Utc::now();
            let mut inserted = 0;

            for issue in issues {
                if let Some(stored) = state
                    .issues
                    .iter_mut()
                    .find(|stored| same_finding(&stored.issue, issue))
                {
                    stored.issue = issue.clone();
                    stored.updated_at = now;
                    continue;
                }

                state.next_issue_id += 1;
                state.issues.push(StoredIssue {
                    id: state.next_issue_id,
                    issue: issue.clone(),
                    status: IssueStatus::Open,
                    created_at: now,
                    updated_at: now,
                });
                inserted += 1;
            }

            Ok(inserted)
        })
    }

    fn issues(
        &self,
        scenario: &str,
        status: Option<IssueStatus>,
    ) -> Result<Vec<StoredIssue>, StoreError> {
        self.read(|state| {
            state
                .issues
                .iter()
                .filter(|stored| stored.issue.scenario == scenario)
                .filter(|stored| status.map_or(true, |s| stored.status == s))
                .cloned()
                .collect()
        })
    }

    fn update_issue_status(&self, id: u64, status: IssueStatus) -> Result<StoredIssue, StoreError> {
        self.write(|state| {
            let stored = state
                .issues
                .iter_mut()
                .find(|stored| stored.id == id)
                .ok_or(StoreError::IssueNotFound(id))?;
            stored.status = status;
            stored.updated_at = Utc::now();
            Ok(stored.clone())
        })
    }
}

impl ScanHistory for JsonStore {
    fn record_scan(&self, record: ScanRecord) -> Result<(), StoreError> {
        self.write(|state| {
            state.scans.push(record);
            Ok(())
        })
    }

    fn scan_history(&self, scenario: &str) -> Result<Vec<ScanRecord>, StoreError> {
        self.read(|state| {
            state
                .scans
                .iter()
                .filter(|scan| scan.scenario == scenario)
                .cloned()
                .collect()
        })
    }
}
