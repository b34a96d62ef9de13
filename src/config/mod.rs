//! Configuration management for Augur

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::models::SortKey;

mod provider;

pub use provider::{ConfigProvider, TomlConfigProvider, CONFIG_FILE_NAMES};

/// Where to look for source files
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Source roots relative to the scenario root; missing roots are skipped
    pub roots: Vec<String>,

    /// Globs (relative to the scenario root) for files to leave out
    pub exclude: Vec<String>,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            roots: vec!["api".to_string(), "ui/src".to_string(), "cli".to_string()],
            exclude: Vec::new(),
        }
    }
}

/// Limits above which the issue generator raises findings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IssueThresholds {
    /// Non-blank line count for a long file
    pub long_file_lines: usize,

    /// Highest acceptable function complexity
    pub max_complexity: u32,

    /// Highest acceptable duplicated share, in percent
    pub max_duplication_pct: f64,

    /// Highest acceptable TODO + FIXME + HACK count
    pub max_tech_debt: usize,

    /// Highest acceptable import count
    pub max_imports: usize,
}

impl Default for IssueThresholds {
    fn default() -> Self {
        Self {
            long_file_lines: 500,
            max_complexity: 15,
            max_duplication_pct: 10.0,
            max_tech_debt: 10,
            max_imports: 20,
        }
    }
}

/// External complexity tool settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComplexityConfig {
    /// Executable name or path of the Go complexity tool
    pub executable: String,

    /// Functions above this complexity are reported as offenders
    pub threshold: u32,

    pub timeout_secs: u64,
}

impl Default for ComplexityConfig {
    fn default() -> Self {
        Self {
            executable: "gocyclo".to_string(),
            threshold: 10,
            timeout_secs: 60,
        }
    }
}

impl ComplexityConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// External duplication tool settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DuplicationConfig {
    /// Executable name or path of the Go duplicate detector
    pub go_executable: String,

    /// Minimum token sequence the Go detector reports
    pub go_min_tokens: usize,

    /// Node package runner used to launch the JavaScript detector
    pub package_runner: String,

    /// Package name of the JavaScript detector
    pub js_tool: String,

    pub js_min_lines: usize,
    pub js_min_tokens: usize,

    /// UI source tree, relative to the scenario root
    pub ui_source_dir: String,

    pub timeout_secs: u64,
}

impl Default for DuplicationConfig {
    fn default() -> Self {
        Self {
            go_executable: "dupl".to_string(),
            go_min_tokens: 15,
            package_runner: "npx".to_string(),
            js_tool: "jscpd".to_string(),
            js_min_lines: 5,
            js_min_tokens: 50,
            ui_source_dir: "ui/src".to_string(),
            timeout_secs: 90,
        }
    }
}

impl DuplicationConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Defaults for recommendation queries
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecommendConfig {
    /// Maximum results; 0 means unlimited
    pub limit: usize,

    pub sort: SortKey,

    /// Skip files shorter than this
    pub min_lines: usize,

    /// Skip files visited more often than this
    pub max_visits: Option<u32>,

    /// JSON file holding visit signals per scenario
    pub visits_file: Option<PathBuf>,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            limit: 20,
            sort: SortKey::default(),
            min_lines: 0,
            max_visits: None,
            visits_file: None,
        }
    }
}

/// Persisted store settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Store file; relative paths resolve against the scenario root
    pub path: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from(".augur/store.json"),
        }
    }
}

/// Main configuration for Augur
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct AugurConfig {
    #[serde(default)]
    pub scan: ScanConfig,

    #[serde(default)]
    pub thresholds: IssueThresholds,

    #[serde(default)]
    pub complexity: ComplexityConfig,

    #[serde(default)]
    pub duplication: DuplicationConfig,

    #[serde(default)]
    pub recommend: RecommendConfig,

    #[serde(default)]
    pub store: StoreConfig,
}
