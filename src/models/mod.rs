//! Core data models for Augur

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

pub mod issues;
pub mod language;
pub mod metrics;
pub mod recommendation;
pub mod results;

pub use issues::*;
pub use language::*;
pub use metrics::*;
pub use recommendation::*;
pub use results::*;

/// Files of one language found under the scenario's source roots
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguageInventory {
    /// Paths relative to the scenario root
    pub files: BTreeSet<String>,

    /// Number of files
    pub file_count: usize,

    /// Non-blank lines across all files
    pub total_lines: usize,

    /// Source root where this language was first found
    pub primary_directory: String,

    /// Non-blank lines per file
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub line_counts: BTreeMap<String, usize>,
}

impl LanguageInventory {
    /// Record one file and its non-blank line count
    pub fn add_file(&mut self, path: String, lines: usize) {
        if self.files.insert(path.clone()) {
            self.file_count += 1;
            self.total_lines += lines;
            self.line_counts.insert(path, lines);
        }
    }
}

/// Result of a full language detection pass
pub type Inventory = BTreeMap<Language, LanguageInventory>;

/// Append-only record of one scan
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScanRecord {
    pub scenario: String,
    pub scanned_at: DateTime<Utc>,
    pub files_scanned: usize,
    pub issues_found: usize,

    /// Files per detected language
    pub languages: BTreeMap<Language, usize>,

    /// Analyses that were skipped, with reasons
    #[serde(default)]
    pub skipped: Vec<String>,
}
